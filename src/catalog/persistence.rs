use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::catalog::{Inventory, MasterMenu, ReferenceCatalog};
use crate::error::{PlannerError, Result};
use crate::models::{
    Category, Conditions, IngredientLine, InventoryEntry, NutrientRecord, OrderLine,
    PatientProfile, ResolvedMenuItem, parse_condition_flag,
};
use crate::planner::PlannerConfig;

pub const MENU_FILE: &str = "menu.csv";
pub const NUTRIENT_FILE: &str = "nutrient.csv";
pub const CATEGORY_FILE: &str = "category.csv";
pub const INGREDIENT_FILE: &str = "ingredient.csv";
pub const PATIENT_FILE: &str = "senior.csv";

#[derive(Debug, Deserialize)]
struct NutrientRow {
    #[serde(rename = "Menu", alias = "menu")]
    menu: String,

    #[serde(rename = "에너지(kcal)", alias = "energy_kcal", default)]
    #[serde(deserialize_with = "csv::invalid_option")]
    energy_kcal: Option<f64>,

    #[serde(rename = "나트륨(mg)", alias = "sodium_mg", default)]
    #[serde(deserialize_with = "csv::invalid_option")]
    sodium_mg: Option<f64>,

    #[serde(rename = "탄수화물(g)", alias = "carbohydrate_g", default)]
    #[serde(deserialize_with = "csv::invalid_option")]
    carbohydrate_g: Option<f64>,

    #[serde(rename = "단백질(g)", alias = "protein_g", default)]
    #[serde(deserialize_with = "csv::invalid_option")]
    protein_g: Option<f64>,
}

impl NutrientRow {
    fn record(&self) -> NutrientRecord {
        NutrientRecord {
            energy_kcal: self.energy_kcal.unwrap_or(0.0).max(0.0),
            sodium_mg: self.sodium_mg.unwrap_or(0.0).max(0.0),
            carbohydrate_g: self.carbohydrate_g.unwrap_or(0.0).max(0.0),
            protein_g: self.protein_g.unwrap_or(0.0).max(0.0),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CategoryRow {
    #[serde(rename = "Menu", alias = "menu")]
    menu: String,

    #[serde(rename = "Category", alias = "category", default)]
    category: String,
}

#[derive(Debug, Deserialize)]
struct IngredientRow {
    #[serde(rename = "Menu", alias = "menu")]
    menu: String,

    #[serde(rename = "Ingredient", alias = "ingredient")]
    ingredient: String,

    #[serde(rename = "Amount_g", alias = "amount_g", default)]
    #[serde(deserialize_with = "csv::invalid_option")]
    amount_g: Option<f64>,

    #[serde(rename = "단가(원/g)", alias = "unit_price", default)]
    #[serde(deserialize_with = "csv::invalid_option")]
    unit_price: Option<f64>,

    #[serde(rename = "품목코드", alias = "item_code", default)]
    item_code: String,
}

#[derive(Debug, Deserialize)]
struct InventoryRow {
    #[serde(rename = "Ingredient", alias = "ingredient")]
    ingredient: String,

    #[serde(rename = "Stock_g", alias = "stock_g", default)]
    #[serde(deserialize_with = "csv::invalid_option")]
    stock_grams: Option<f64>,

    #[serde(rename = "단가(원/g)", alias = "unit_price", default)]
    #[serde(deserialize_with = "csv::invalid_option")]
    unit_price: Option<f64>,

    #[serde(rename = "품목코드", alias = "item_code", default)]
    item_code: String,
}

fn reader_from_path<P: AsRef<Path>>(path: P) -> Result<csv::Reader<fs::File>> {
    Ok(csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?)
}

/// Build the reference catalog from the category, nutrient and ingredient tables.
pub fn load_catalog<P: AsRef<Path>>(
    category_path: P,
    nutrient_path: P,
    ingredient_path: P,
) -> Result<ReferenceCatalog> {
    let mut builder = ReferenceCatalog::builder();

    for row in reader_from_path(category_path)?.deserialize() {
        let row: CategoryRow = row?;
        builder = builder.category(&row.menu, Category::from_label(&row.category));
    }

    for row in reader_from_path(nutrient_path)?.deserialize() {
        let row: NutrientRow = row?;
        builder = builder.nutrients(&row.menu, row.record());
    }

    for row in reader_from_path(ingredient_path)?.deserialize() {
        let row: IngredientRow = row?;
        if row.ingredient.is_empty() {
            debug!(menu = %row.menu, "ingredient row without ingredient name skipped");
            continue;
        }
        builder = builder.ingredient(
            &row.menu,
            IngredientLine {
                ingredient: row.ingredient,
                base_grams: row.amount_g.unwrap_or(0.0).max(0.0),
                unit_price: row.unit_price.unwrap_or(0.0),
                item_code: row.item_code,
            },
        );
    }

    let catalog = builder.build();
    info!(items = catalog.len(), "loaded reference catalog");
    Ok(catalog)
}

/// Load the master menu: the first column is a row label, every other
/// column is a service date holding one item per row.
pub fn load_master_menu<P: AsRef<Path>>(path: P) -> Result<MasterMenu> {
    let mut reader = reader_from_path(path)?;
    let dates: Vec<String> = reader.headers()?.iter().skip(1).map(String::from).collect();

    let mut menu = MasterMenu::new();
    for date in &dates {
        menu.push(date, "");
    }
    for record in reader.records() {
        let record = record?;
        for (date, cell) in dates.iter().zip(record.iter().skip(1)) {
            menu.push(date, cell);
        }
    }

    info!(dates = menu.dates().len(), "loaded master menu");
    Ok(menu)
}

fn column(headers: &HashMap<String, usize>, names: &[&str]) -> Option<usize> {
    names.iter().find_map(|n| headers.get(*n).copied())
}

fn parse_weight(cell: &str) -> Option<f64> {
    let trimmed = cell.trim().trim_end_matches("kg").trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// Load the resident roster.
///
/// `header_row` preamble rows (titles, notes) precede the header row.
/// Rows without a name are skipped; weight problems are left for the
/// planner to reject so the rest of the roster stays usable.
pub fn load_patients<P: AsRef<Path>>(path: P, header_row: usize) -> Result<Vec<PatientProfile>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut records = reader.records().skip(header_row);
    let header = match records.next() {
        Some(h) => h?,
        None => return Ok(Vec::new()),
    };
    let headers: HashMap<String, usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect();

    let name_col = column(&headers, &["수급자명", "name"]).ok_or_else(|| {
        PlannerError::InvalidInput("patient file has no name column".to_string())
    })?;
    let weight_col = column(&headers, &["체중", "weight", "weight_kg"]);
    let hypertension_col = column(&headers, &["고혈압", "hypertension"]);
    let diabetes_col = column(&headers, &["당뇨병", "당뇨", "diabetes"]);
    let dysphagia_col = column(&headers, &["연하곤란", "삼킴장애", "dysphagia"]);
    let status_col = column(&headers, &["현재식사현황", "meal_status"]);

    let mut patients = Vec::new();
    for record in records {
        let record = record?;
        let cell = |col: Option<usize>| col.and_then(|c| record.get(c)).unwrap_or("");

        let name = cell(Some(name_col));
        if name.is_empty() {
            continue;
        }

        let raw_weight = cell(weight_col);
        let weight_kg = parse_weight(raw_weight);
        if weight_kg.is_none() {
            warn!(patient = name, weight = raw_weight, "unreadable weight");
        }

        let conditions = Conditions {
            hypertension: parse_condition_flag(cell(hypertension_col)),
            diabetes: parse_condition_flag(cell(diabetes_col)),
            dysphagia: parse_condition_flag(cell(dysphagia_col)),
        };

        patients.push(
            PatientProfile::new(name, weight_kg, cell(status_col)).with_conditions(conditions),
        );
    }

    info!(count = patients.len(), "loaded patient roster");
    Ok(patients)
}

/// Load an inventory table (Ingredient, Stock_g, unit price, item code).
///
/// Blank or unreadable stock and price cells count as 0.
pub fn load_inventory<P: AsRef<Path>>(path: P) -> Result<Inventory> {
    let mut entries = Vec::new();
    for row in reader_from_path(path)?.deserialize() {
        let row: InventoryRow = row?;
        if row.ingredient.is_empty() {
            continue;
        }
        if row.stock_grams.is_none() {
            warn!(ingredient = %row.ingredient, "no readable stock, counting as 0");
        }
        entries.push(InventoryEntry {
            ingredient: row.ingredient,
            stock_grams: row.stock_grams.unwrap_or(0.0).max(0.0),
            unit_price: row.unit_price.unwrap_or(0.0),
            item_code: row.item_code,
        });
    }
    Ok(Inventory::new(entries))
}

/// Load planner settings from JSON. Omitted fields take their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PlannerConfig> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Everything a planning session reads.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub catalog: ReferenceCatalog,
    pub menu: MasterMenu,
    pub patients: Vec<PatientProfile>,
}

/// Load the standard set of tables from one directory.
pub fn load_dataset<P: AsRef<Path>>(dir: P, patient_header_row: usize) -> Result<Dataset> {
    let dir = dir.as_ref();
    let catalog = load_catalog(
        dir.join(CATEGORY_FILE),
        dir.join(NUTRIENT_FILE),
        dir.join(INGREDIENT_FILE),
    )?;
    let menu = load_master_menu(dir.join(MENU_FILE))?;
    let patients = load_patients(dir.join(PATIENT_FILE), patient_header_row)?;

    Ok(Dataset {
        catalog,
        menu,
        patients,
    })
}

/// Export the order sheet as CSV.
pub fn save_order_sheet<P: AsRef<Path>>(path: P, lines: &[OrderLine]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "item_code",
        "item_name",
        "current_stock_g",
        "required_g",
        "shortfall_g",
        "estimated_cost",
    ])?;

    for line in lines {
        wtr.write_record([
            line.item_code.clone(),
            line.ingredient.clone(),
            line.stock_grams.to_string(),
            line.required_grams.to_string(),
            line.shortfall_grams.to_string(),
            line.estimated_cost.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Export one patient's personalized menu as CSV.
pub fn save_personalized_menu<P: AsRef<Path>>(path: P, plan: &[ResolvedMenuItem]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "category",
        "original_item",
        "final_item",
        "applied_tags",
        "portion_pct",
    ])?;

    for item in plan {
        wtr.write_record([
            item.category.label().to_string(),
            item.original_item.clone(),
            item.final_item.clone(),
            item.tags_label(),
            item.portion_percent().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_patients_skips_preamble() {
        let file = write_temp(
            "입소자 현황,,,,\n\
             작성일,2024-03-01,,,\n\
             ,,,,\n\
             수급자명 ,체중,고혈압,당뇨병,현재식사현황\n\
             김영희,52,O,,다진식\n\
             ,60,,,\n\
             박철수,,,O,일반식\n",
        );

        let patients = load_patients(file.path(), 3).unwrap();
        assert_eq!(patients.len(), 2);

        assert_eq!(patients[0].name, "김영희");
        assert_eq!(patients[0].weight_kg, Some(52.0));
        assert!(patients[0].conditions.hypertension);
        assert!(!patients[0].conditions.diabetes);

        assert_eq!(patients[1].weight_kg, None);
        assert!(patients[1].conditions.diabetes);
    }

    #[test]
    fn test_load_patients_requires_name_column() {
        let file = write_temp("weight,status\n60,regular\n");
        assert!(matches!(
            load_patients(file.path(), 0),
            Err(PlannerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("60.5"), Some(60.5));
        assert_eq!(parse_weight("48kg"), Some(48.0));
        assert_eq!(parse_weight(""), None);
        assert_eq!(parse_weight("unknown"), None);
    }

    #[test]
    fn test_load_master_menu() {
        let file = write_temp(
            "구분,2024-03-01,2024-03-02\n\
             밥,쌀밥,잡곡밥\n\
             국,미역국,\n\
             부찬,멸치볶음,두부조림\n",
        );

        let menu = load_master_menu(file.path()).unwrap();
        assert_eq!(menu.dates().len(), 2);
        assert_eq!(
            menu.meal_for("2024-03-01", 6).unwrap(),
            vec!["쌀밥", "미역국", "멸치볶음"]
        );
        assert_eq!(
            menu.meal_for("2024-03-02", 6).unwrap(),
            vec!["잡곡밥", "두부조림"]
        );
    }

    #[test]
    fn test_order_sheet_export() {
        let out = NamedTempFile::new().unwrap();
        let lines = vec![OrderLine {
            item_code: "F-001".to_string(),
            ingredient: "두부".to_string(),
            stock_grams: 0.0,
            required_grams: 450.0,
            shortfall_grams: 450.0,
            estimated_cost: 1350.0,
        }];
        save_order_sheet(out.path(), &lines).unwrap();

        let content = fs::read_to_string(out.path()).unwrap();
        let mut rows = content.lines();
        assert_eq!(
            rows.next().unwrap(),
            "item_code,item_name,current_stock_g,required_g,shortfall_g,estimated_cost"
        );
        assert_eq!(rows.next().unwrap(), "F-001,두부,0,450,450,1350");
    }

    #[test]
    fn test_load_inventory_blank_cells_default_to_zero() {
        let file = write_temp(
            "Ingredient,Stock_g,단가(원/g),품목코드\n\
             두부,100,,F-001\n\
             양파,,2.5,V-002\n",
        );

        let inventory = load_inventory(file.path()).unwrap();
        assert_eq!(inventory.len(), 2);

        let tofu = inventory.get("두부").unwrap();
        assert_eq!(tofu.stock_grams, 100.0);
        assert_eq!(tofu.unit_price, 0.0);
        assert_eq!(tofu.item_code, "F-001");

        let onion = inventory.get("양파").unwrap();
        assert_eq!(onion.stock_grams, 0.0);
        assert_eq!(onion.unit_price, 2.5);
    }

    #[test]
    fn test_order_sheet_keeps_fractional_cost() {
        let out = NamedTempFile::new().unwrap();
        let lines = vec![OrderLine {
            item_code: "S-004".to_string(),
            ingredient: "참기름".to_string(),
            stock_grams: 0.0,
            required_grams: 3.0,
            shortfall_grams: 3.0,
            estimated_cost: 13.5,
        }];
        save_order_sheet(out.path(), &lines).unwrap();

        let content = fs::read_to_string(out.path()).unwrap();
        assert_eq!(content.lines().nth(1).unwrap(), "S-004,참기름,0,3,3,13.5");
    }

    #[test]
    fn test_load_config_defaults_missing_fields() {
        let file = write_temp(r#"{"low_sodium_limit_mg": 250.0}"#);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.low_sodium_limit_mg, 250.0);
        assert_eq!(config.items_per_meal, PlannerConfig::default().items_per_meal);
    }
}
