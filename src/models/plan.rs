use std::fmt;

use serde::Serialize;

use crate::models::{Category, IngredientLine, NutrientRecord};

/// An adjustment applied to a menu item during personalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActionTag {
    LowSodiumSubstitution,
    PorridgeConversion,
    MincedPreparation,
    GroundPreparation,
    /// Calorie balancing, as a truncated percentage of the base serving.
    PortionAdjusted(u32),
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionTag::LowSodiumSubstitution => f.write_str("low-sodium substitution"),
            ActionTag::PorridgeConversion => f.write_str("porridge conversion"),
            ActionTag::MincedPreparation => f.write_str("minced preparation"),
            ActionTag::GroundPreparation => f.write_str("ground preparation"),
            ActionTag::PortionAdjusted(pct) => write!(f, "portion adjusted to {}%", pct),
        }
    }
}

/// One item of a patient's personalized meal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedMenuItem {
    /// Category of the original master-menu item.
    pub category: Category,
    pub original_item: String,
    pub final_item: String,
    /// Multiplier on the base serving, 1.0 = standard portion.
    pub portion_ratio: f64,
    pub tags: Vec<ActionTag>,
    /// Nutrients after substitution, scaled by `portion_ratio`.
    pub nutrients: NutrientRecord,
    /// Ingredient lines of the final item, at base serving size.
    pub ingredients: Vec<IngredientLine>,
}

impl ResolvedMenuItem {
    pub fn was_substituted(&self) -> bool {
        self.original_item != self.final_item
    }

    /// Portion as an integer percentage (truncated).
    pub fn portion_percent(&self) -> u32 {
        (self.portion_ratio * 100.0) as u32
    }

    /// Tags joined for a single table cell.
    pub fn tags_label(&self) -> String {
        self.tags
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
