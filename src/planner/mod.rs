pub mod config;
pub mod constants;
pub mod personalize;
pub mod portion;
pub mod procurement;
pub mod substitution;
pub mod validation;

pub use config::PlannerConfig;
pub use constants::*;
pub use personalize::{PatientPlan, PersonalizationEngine};
pub use portion::PortionBalancer;
pub use procurement::{
    ProcurementAggregator, RequirementTotals, order_lines, sum_requirements, total_cost,
};
pub use substitution::{ConstraintKind, Substitution, SubstitutionResolver};
pub use validation::{NutritionCheck, verify_plan};
