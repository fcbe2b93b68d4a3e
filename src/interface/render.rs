use crate::catalog::Inventory;
use crate::models::{OrderLine, PatientProfile};
use crate::planner::{NutritionCheck, PatientPlan, total_cost};

/// Display a patient's profile and per-meal energy target.
pub fn display_patient_summary(patient: &PatientProfile, target_kcal: f64) {
    let conditions = patient.conditions.names();
    let conditions = if conditions.is_empty() {
        "none".to_string()
    } else {
        conditions.join(", ")
    };

    println!();
    println!("=== {} ===", patient.name);
    println!("Conditions: {}", conditions);
    println!("Meal status: {} ({})", patient.meal_status, patient.texture);
    println!("Target per meal: {:.0} kcal", target_kcal);
}

/// Display a personalized menu in a formatted table.
pub fn display_personalized_menu(plan: &PatientPlan) {
    if plan.items.is_empty() {
        println!("No menu items for this meal.");
        return;
    }

    println!();
    println!("=== Personalized Menu ===");
    println!();

    // Find max item name lengths for alignment
    let orig_len = plan
        .items
        .iter()
        .map(|i| i.original_item.chars().count())
        .max()
        .unwrap_or(8);
    let final_len = plan
        .items
        .iter()
        .map(|i| i.final_item.chars().count())
        .max()
        .unwrap_or(8);

    for (i, item) in plan.items.iter().enumerate() {
        let tags = item.tags_label();
        let tags_str = if tags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", tags)
        };

        println!(
            "{:>3}. {:<4} {:<ow$} -> {:<fw$} {:>4}% {:>5.0} kcal{}",
            i + 1,
            item.category.label(),
            item.original_item,
            item.final_item,
            item.portion_percent(),
            item.nutrients.energy_kcal,
            tags_str,
            ow = orig_len,
            fw = final_len
        );
    }

    println!();
}

/// Display the catalog-derived nutrition check.
pub fn display_nutrition_check(check: &NutritionCheck) {
    println!("--- Nutrition (from reference data) ---");
    println!(
        "Energy: {:.0} kcal of {:.0} target ({:.0}%)",
        check.derived.energy_kcal,
        check.target_kcal,
        check.energy_coverage_pct()
    );
    println!(
        "Sodium: {:.0} mg | Carbohydrate: {:.1} g | Protein: {:.1} g",
        check.derived.sodium_mg, check.derived.carbohydrate_g, check.derived.protein_g
    );
    println!();
}

/// Display the order sheet with the total estimated cost.
pub fn display_order_sheet(lines: &[OrderLine]) {
    if lines.is_empty() {
        println!("Stock covers every ingredient. Nothing to order.");
        return;
    }

    println!();
    println!("=== Order Sheet ({} items) ===", lines.len());
    println!();

    let name_len = lines
        .iter()
        .map(|l| l.ingredient.chars().count())
        .max()
        .unwrap_or(10);
    let code_len = lines
        .iter()
        .map(|l| l.item_code.chars().count())
        .max()
        .unwrap_or(4);

    println!(
        "{:<cw$}  {:<nw$}  {:>9}  {:>9}  {:>9}  {:>10}",
        "code",
        "item",
        "stock g",
        "need g",
        "order g",
        "cost",
        cw = code_len,
        nw = name_len
    );
    for line in lines {
        println!(
            "{:<cw$}  {:<nw$}  {:>9.0}  {:>9.0}  {:>9.0}  {:>10.0}",
            line.item_code,
            line.ingredient,
            line.stock_grams,
            line.required_grams,
            line.shortfall_grams,
            line.estimated_cost,
            cw = code_len,
            nw = name_len
        );
    }

    println!();
    println!("Total estimated cost: {:.0}", total_cost(lines));
    println!();
}

/// Display registered item count and low-stock items.
pub fn display_inventory_summary(inventory: &Inventory, low_stock_threshold_g: f64) {
    let low = inventory.low_stock(low_stock_threshold_g);

    println!();
    println!("=== Inventory ===");
    println!("Registered items: {}", inventory.len());
    println!(
        "Below {:.0} g: {}",
        low_stock_threshold_g,
        low.len()
    );

    for entry in low {
        println!("  {} - {:.0} g", entry.ingredient, entry.stock_grams);
    }

    println!();
}
