pub mod prompts;
pub mod render;

pub use prompts::{
    fuzzy_patient_matches, prompt_question, prompt_yes_no, select_date, select_patient,
};
pub use render::{
    display_inventory_summary, display_nutrition_check, display_order_sheet,
    display_patient_summary, display_personalized_menu,
};
