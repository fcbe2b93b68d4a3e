use std::fmt;

use serde::{Deserialize, Serialize};

/// Menu category. Decides which personalization policies apply to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    StapleRice,
    Soup,
    Porridge,
    MainDish,
    SideDish,
    Kimchi,
    Other,
}

impl Category {
    /// Parse a category label from the reference tables.
    ///
    /// Accepts the Korean labels used by the kitchen data and English aliases.
    /// Unrecognised labels fall back to `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "밥" | "rice" | "staple-rice" | "staple_rice" => Category::StapleRice,
            "국" | "soup" => Category::Soup,
            "죽" | "porridge" => Category::Porridge,
            "주찬" | "main" | "main-dish" | "main_dish" => Category::MainDish,
            "부찬" | "side" | "side-dish" | "side_dish" => Category::SideDish,
            "김치" | "kimchi" => Category::Kimchi,
            _ => Category::Other,
        }
    }

    /// Rice, soup and porridge: the only categories whose portion may be scaled.
    #[inline]
    pub fn is_staple(self) -> bool {
        matches!(
            self,
            Category::StapleRice | Category::Soup | Category::Porridge
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::StapleRice => "밥",
            Category::Soup => "국",
            Category::Porridge => "죽",
            Category::MainDish => "주찬",
            Category::SideDish => "부찬",
            Category::Kimchi => "김치",
            Category::Other => "기타",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-serving nutrient values. Absent values are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientRecord {
    pub energy_kcal: f64,
    pub sodium_mg: f64,
    pub carbohydrate_g: f64,
    pub protein_g: f64,
}

impl NutrientRecord {
    /// All values multiplied by a portion ratio.
    pub fn scaled(&self, ratio: f64) -> Self {
        Self {
            energy_kcal: self.energy_kcal * ratio,
            sodium_mg: self.sodium_mg * ratio,
            carbohydrate_g: self.carbohydrate_g * ratio,
            protein_g: self.protein_g * ratio,
        }
    }

    pub fn add(&mut self, other: &NutrientRecord) {
        self.energy_kcal += other.energy_kcal;
        self.sodium_mg += other.sodium_mg;
        self.carbohydrate_g += other.carbohydrate_g;
        self.protein_g += other.protein_g;
    }
}

/// One ingredient of a menu item, for a standard serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub ingredient: String,
    pub base_grams: f64,
    pub unit_price: f64,
    pub item_code: String,
}

/// A reference menu item.
///
/// `nutrients` is `None` when the nutrient table has no row for the item;
/// such items are never offered as substitutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub category: Category,
    pub nutrients: Option<NutrientRecord>,
    pub ingredients: Vec<IngredientLine>,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
            nutrients: None,
            ingredients: Vec::new(),
        }
    }

    /// Nutrients, or zeros when unknown.
    #[inline]
    pub fn nutrients_or_default(&self) -> NutrientRecord {
        self.nutrients.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_label() {
        assert_eq!(Category::from_label("밥"), Category::StapleRice);
        assert_eq!(Category::from_label(" 부찬 "), Category::SideDish);
        assert_eq!(Category::from_label("Soup"), Category::Soup);
        assert_eq!(Category::from_label("dessert"), Category::Other);
        assert_eq!(Category::from_label(""), Category::Other);
    }

    #[test]
    fn test_staple_categories() {
        assert!(Category::StapleRice.is_staple());
        assert!(Category::Soup.is_staple());
        assert!(Category::Porridge.is_staple());
        assert!(!Category::SideDish.is_staple());
        assert!(!Category::Kimchi.is_staple());
        assert!(!Category::Other.is_staple());
    }

    #[test]
    fn test_scaled_nutrients() {
        let n = NutrientRecord {
            energy_kcal: 300.0,
            sodium_mg: 100.0,
            carbohydrate_g: 60.0,
            protein_g: 6.0,
        };
        let half = n.scaled(0.5);
        assert!((half.energy_kcal - 150.0).abs() < 1e-9);
        assert!((half.protein_g - 3.0).abs() < 1e-9);
    }
}
