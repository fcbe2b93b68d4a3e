pub mod advisory;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod planner;

pub use catalog::{Inventory, MasterMenu, ReferenceCatalog};
pub use error::{PlannerError, Result};
pub use models::{MenuItem, OrderLine, PatientProfile, ResolvedMenuItem};
pub use planner::{PatientPlan, PersonalizationEngine, PlannerConfig, ProcurementAggregator};
