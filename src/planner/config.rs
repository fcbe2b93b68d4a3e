use serde::{Deserialize, Serialize};

use crate::planner::constants::*;

/// Policy settings for personalization and procurement.
///
/// Every field defaults to the matching constant, so a partial JSON file
/// only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub hypertension_sodium_trigger_mg: f64,
    pub low_sodium_limit_mg: f64,
    pub daily_kcal_per_kg: f64,
    pub meals_per_day: f64,
    pub balance_ratio_min: f64,
    pub balance_ratio_max: f64,
    pub porridge_portion_multiplier: f64,
    pub plain_porridge_item: String,
    pub items_per_meal: usize,
    pub low_stock_threshold_g: f64,
    pub mock_stock_max_g: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            hypertension_sodium_trigger_mg: HYPERTENSION_SODIUM_TRIGGER_MG,
            low_sodium_limit_mg: LOW_SODIUM_LIMIT_MG,
            daily_kcal_per_kg: DAILY_KCAL_PER_KG,
            meals_per_day: MEALS_PER_DAY,
            balance_ratio_min: BALANCE_RATIO_MIN,
            balance_ratio_max: BALANCE_RATIO_MAX,
            porridge_portion_multiplier: PORRIDGE_PORTION_MULTIPLIER,
            plain_porridge_item: PLAIN_PORRIDGE_ITEM.to_string(),
            items_per_meal: ITEMS_PER_MEAL,
            low_stock_threshold_g: LOW_STOCK_THRESHOLD_G,
            mock_stock_max_g: MOCK_STOCK_MAX_G,
        }
    }
}

impl PlannerConfig {
    /// Per-meal energy target: weight × daily kcal/kg ÷ meals per day.
    pub fn meal_target_kcal(&self, weight_kg: f64) -> f64 {
        weight_kg * self.daily_kcal_per_kg / self.meals_per_day
    }
}
