use crate::catalog::ReferenceCatalog;
use crate::models::NutrientRecord;
use crate::planner::personalize::PatientPlan;

/// Nutrition of a plan, re-derived from the reference catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct NutritionCheck {
    pub target_kcal: f64,
    /// Totals from the catalog values of each final item × portion ratio.
    pub derived: NutrientRecord,
    /// Totals as carried on the plan items.
    pub reported: NutrientRecord,
}

impl NutritionCheck {
    /// Derived energy minus target.
    pub fn energy_deviation(&self) -> f64 {
        self.derived.energy_kcal - self.target_kcal
    }

    /// Derived energy as a percentage of target; 0 when the target is 0.
    pub fn energy_coverage_pct(&self) -> f64 {
        if self.target_kcal > 0.0 {
            self.derived.energy_kcal / self.target_kcal * 100.0
        } else {
            0.0
        }
    }
}

/// Recompute a plan's nutrition from the catalog, ignoring any value the
/// plan carries. Used as the authoritative figure for display and advice.
pub fn verify_plan(catalog: &ReferenceCatalog, plan: &PatientPlan) -> NutritionCheck {
    let mut derived = NutrientRecord::default();
    let mut reported = NutrientRecord::default();

    for item in &plan.items {
        derived.add(
            &catalog
                .lookup_nutrients(&item.final_item)
                .scaled(item.portion_ratio),
        );
        reported.add(&item.nutrients);
    }

    NutritionCheck {
        target_kcal: plan.target_kcal,
        derived,
        reported,
    }
}
