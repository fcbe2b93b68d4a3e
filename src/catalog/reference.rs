use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::models::{Category, IngredientLine, MenuItem, NutrientRecord};

/// Read-only lookup over the menu reference tables.
///
/// Every lookup fails soft: unknown items yield `Category::Other`, zero
/// nutrients and no ingredients. Items are kept ordered by name so that
/// category listings (and seeded substitute picks) are reproducible.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    /// All items keyed by trimmed name.
    items: BTreeMap<String, MenuItem>,
}

impl ReferenceCatalog {
    /// Build a catalog from complete menu items. A later item with the same
    /// name replaces an earlier one.
    pub fn new(items: Vec<MenuItem>) -> Self {
        let mut map = BTreeMap::new();
        for item in items {
            map.insert(item.name.trim().to_string(), item);
        }
        Self { items: map }
    }

    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<&MenuItem> {
        self.items.get(name.trim())
    }

    pub fn lookup_category(&self, name: &str) -> Category {
        self.get(name).map(|i| i.category).unwrap_or_default()
    }

    pub fn lookup_nutrients(&self, name: &str) -> NutrientRecord {
        self.get(name)
            .map(MenuItem::nutrients_or_default)
            .unwrap_or_default()
    }

    pub fn lookup_ingredients(&self, name: &str) -> &[IngredientLine] {
        self.get(name)
            .map(|i| i.ingredients.as_slice())
            .unwrap_or(&[])
    }

    /// Items of one category, ordered by name.
    pub fn items_in_category(&self, category: Category) -> Vec<&MenuItem> {
        self.items
            .values()
            .filter(|i| i.category == category)
            .collect()
    }

    /// One ingredient line per distinct ingredient name (first seen wins),
    /// used to seed inventory records with price and item code.
    pub fn distinct_ingredients(&self) -> Vec<&IngredientLine> {
        let mut seen = std::collections::HashSet::new();
        self.items
            .values()
            .flat_map(|i| i.ingredients.iter())
            .filter(|line| seen.insert(line.ingredient.as_str()))
            .collect()
    }

    pub fn all_items(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Assembles a catalog from the separate category, nutrient and ingredient
/// tables. Items may appear in any subset of the tables.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    items: BTreeMap<String, MenuItem>,
    /// Items that already had a category row, whatever its label.
    categorized: BTreeSet<String>,
}

impl CatalogBuilder {
    fn entry(&mut self, name: &str) -> &mut MenuItem {
        let key = name.trim().to_string();
        self.items
            .entry(key.clone())
            .or_insert_with(|| MenuItem::new(key, Category::Other))
    }

    /// First category row for an item wins, even when its label is
    /// unrecognised.
    pub fn category(mut self, name: &str, category: Category) -> Self {
        let key = name.trim();
        if key.is_empty() {
            return self;
        }
        if !self.categorized.insert(key.to_string()) {
            debug!(item = key, "duplicate category row ignored");
        } else {
            self.entry(key).category = category;
        }
        self
    }

    /// First nutrient row for an item wins.
    pub fn nutrients(mut self, name: &str, nutrients: NutrientRecord) -> Self {
        if name.trim().is_empty() {
            return self;
        }
        let item = self.entry(name);
        if item.nutrients.is_none() {
            item.nutrients = Some(nutrients);
        }
        self
    }

    pub fn ingredient(mut self, name: &str, line: IngredientLine) -> Self {
        if name.trim().is_empty() {
            return self;
        }
        self.entry(name).ingredients.push(line);
        self
    }

    pub fn build(self) -> ReferenceCatalog {
        ReferenceCatalog { items: self.items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(ingredient: &str, grams: f64) -> IngredientLine {
        IngredientLine {
            ingredient: ingredient.to_string(),
            base_grams: grams,
            unit_price: 2.0,
            item_code: format!("C-{}", ingredient),
        }
    }

    fn sample_catalog() -> ReferenceCatalog {
        ReferenceCatalog::builder()
            .category("쌀밥", Category::StapleRice)
            .category("멸치볶음", Category::SideDish)
            .category("두부조림", Category::SideDish)
            .nutrients(
                "멸치볶음",
                NutrientRecord {
                    energy_kcal: 120.0,
                    sodium_mg: 650.0,
                    carbohydrate_g: 8.0,
                    protein_g: 9.0,
                },
            )
            .ingredient("멸치볶음", line("멸치", 20.0))
            .ingredient("두부조림", line("두부", 150.0))
            .ingredient("두부조림", line("양파", 20.0))
            .build()
    }

    #[test]
    fn test_lookups_fail_soft() {
        let catalog = sample_catalog();
        assert_eq!(catalog.lookup_category("없는메뉴"), Category::Other);
        assert_eq!(catalog.lookup_nutrients("없는메뉴"), NutrientRecord::default());
        assert!(catalog.lookup_ingredients("없는메뉴").is_empty());
    }

    #[test]
    fn test_missing_nutrient_row_defaults_to_zero() {
        let catalog = sample_catalog();
        assert_eq!(catalog.lookup_nutrients("두부조림").energy_kcal, 0.0);
        assert!(catalog.get("두부조림").unwrap().nutrients.is_none());
    }

    #[test]
    fn test_items_in_category_ordered() {
        let catalog = sample_catalog();
        let names: Vec<&str> = catalog
            .items_in_category(Category::SideDish)
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["두부조림", "멸치볶음"]);
    }

    #[test]
    fn test_first_category_row_wins() {
        let catalog = ReferenceCatalog::builder()
            .category("잡곡밥", Category::StapleRice)
            .category("잡곡밥", Category::SideDish)
            .build();
        assert_eq!(catalog.lookup_category("잡곡밥"), Category::StapleRice);

        let catalog = ReferenceCatalog::builder()
            .category("떡", Category::from_label("간식"))
            .category("떡", Category::SideDish)
            .build();
        assert_eq!(catalog.lookup_category("떡"), Category::Other);
    }

    #[test]
    fn test_distinct_ingredients() {
        let catalog = ReferenceCatalog::builder()
            .ingredient("두부조림", line("두부", 150.0))
            .ingredient("두부국", line("두부", 50.0))
            .build();
        let distinct = catalog.distinct_ingredients();
        assert_eq!(distinct.len(), 1);
        assert_eq!(distinct[0].ingredient, "두부");
    }

    #[test]
    fn test_names_are_trimmed() {
        let catalog = sample_catalog();
        assert_eq!(catalog.lookup_category(" 쌀밥 "), Category::StapleRice);
    }
}
