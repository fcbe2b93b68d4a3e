mod menu;
mod order;
mod patient;
mod plan;

pub use menu::{Category, IngredientLine, MenuItem, NutrientRecord};
pub use order::{InventoryEntry, OrderLine, UNKNOWN_ITEM_CODE};
pub use patient::{Conditions, PatientProfile, TextureStatus, parse_condition_flag};
pub use plan::{ActionTag, ResolvedMenuItem};
