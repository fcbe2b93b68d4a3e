use serde::{Deserialize, Serialize};

/// Item code shown when an ingredient has no inventory record.
pub const UNKNOWN_ITEM_CODE: &str = "-";

/// Current stock of one ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub ingredient: String,
    pub stock_grams: f64,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub item_code: String,
}

/// A procurement line for an ingredient whose stock does not cover the meal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub item_code: String,
    pub ingredient: String,
    pub stock_grams: f64,
    /// Total requirement, rounded up to whole grams.
    pub required_grams: f64,
    pub shortfall_grams: f64,
    pub estimated_cost: f64,
}
