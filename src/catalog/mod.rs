mod inventory;
mod menu;
mod persistence;
mod reference;

pub use inventory::Inventory;
pub use menu::MasterMenu;
pub use persistence::{
    CATEGORY_FILE, Dataset, INGREDIENT_FILE, MENU_FILE, NUTRIENT_FILE, PATIENT_FILE, load_catalog,
    load_config, load_dataset, load_inventory, load_master_menu, load_patients, save_order_sheet,
    save_personalized_menu,
};
pub use reference::{CatalogBuilder, ReferenceCatalog};
