//! Structured request for an external text advisor (recipe or substitution
//! suggestions). The planner only builds the request; nothing it returns is
//! used for quantities, which always come from the reference catalog.

use serde::Serialize;

use crate::catalog::Inventory;
use crate::error::Result;
use crate::models::PatientProfile;
use crate::planner::PatientPlan;

#[derive(Debug, Clone, Serialize)]
pub struct AdvisoryAction {
    pub category: String,
    pub original_item: String,
    pub final_item: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdvisoryPayload {
    pub patient: String,
    pub conditions: Vec<String>,
    pub texture: String,
    pub meal_status: String,
    pub target_kcal: f64,
    pub actions: Vec<AdvisoryAction>,
    /// Best-stocked ingredients, most stock first.
    pub candidate_ingredients: Vec<String>,
    pub question: String,
}

impl AdvisoryPayload {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the advisory request for one patient's personalized meal.
pub fn build_payload(
    patient: &PatientProfile,
    plan: &PatientPlan,
    inventory: &Inventory,
    ingredient_limit: usize,
    question: &str,
) -> AdvisoryPayload {
    let mut stocked = inventory.in_stock();
    stocked.sort_by(|a, b| {
        b.stock_grams
            .partial_cmp(&a.stock_grams)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    AdvisoryPayload {
        patient: patient.name.clone(),
        conditions: patient
            .conditions
            .names()
            .into_iter()
            .map(String::from)
            .collect(),
        texture: patient.texture.to_string(),
        meal_status: patient.meal_status.clone(),
        target_kcal: plan.target_kcal,
        actions: plan
            .items
            .iter()
            .map(|item| AdvisoryAction {
                category: item.category.label().to_string(),
                original_item: item.original_item.clone(),
                final_item: item.final_item.clone(),
                tags: item.tags.iter().map(|t| t.to_string()).collect(),
            })
            .collect(),
        candidate_ingredients: stocked
            .into_iter()
            .take(ingredient_limit)
            .map(|e| e.ingredient.clone())
            .collect(),
        question: question.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ActionTag, Category, Conditions, InventoryEntry, NutrientRecord, ResolvedMenuItem,
    };

    #[test]
    fn test_payload_contents() {
        let patient = PatientProfile::new("박철수", Some(70.0), "다진식").with_conditions(
            Conditions {
                hypertension: true,
                ..Default::default()
            },
        );
        let plan = PatientPlan {
            patient: patient.name.clone(),
            target_kcal: 700.0,
            balance_ratio: 1.0,
            items: vec![ResolvedMenuItem {
                category: Category::SideDish,
                original_item: "멸치볶음".to_string(),
                final_item: "두부조림".to_string(),
                portion_ratio: 1.0,
                tags: vec![ActionTag::LowSodiumSubstitution, ActionTag::MincedPreparation],
                nutrients: NutrientRecord::default(),
                ingredients: Vec::new(),
            }],
        };
        let stock = |name: &str, grams: f64| InventoryEntry {
            ingredient: name.to_string(),
            stock_grams: grams,
            unit_price: 1.0,
            item_code: String::new(),
        };
        let inventory = Inventory::new(vec![
            stock("두부", 3000.0),
            stock("양파", 4500.0),
            stock("멸치", 0.0),
            stock("간장", 200.0),
        ]);

        let payload = build_payload(&patient, &plan, &inventory, 2, "대체 메뉴 추천");

        assert_eq!(payload.conditions, vec!["hypertension"]);
        assert_eq!(payload.texture, "minced");
        assert_eq!(payload.candidate_ingredients, vec!["양파", "두부"]);
        assert_eq!(
            payload.actions[0].tags,
            vec!["low-sodium substitution", "minced preparation"]
        );

        let json = payload.to_json().unwrap();
        assert!(json.contains("\"final_item\": \"두부조림\""));
    }
}
