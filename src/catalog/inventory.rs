use std::collections::BTreeMap;

use rand::Rng;
use tracing::info;

use crate::catalog::ReferenceCatalog;
use crate::models::InventoryEntry;

/// Ingredient stock keyed by ingredient name.
///
/// Read-only during a planning run; restocking happens between runs.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    entries: BTreeMap<String, InventoryEntry>,
}

impl Inventory {
    /// Later entries for the same ingredient replace earlier ones.
    pub fn new(entries: Vec<InventoryEntry>) -> Self {
        let mut map = BTreeMap::new();
        for entry in entries {
            map.insert(entry.ingredient.trim().to_string(), entry);
        }
        Self { entries: map }
    }

    /// Synthesise stock for every distinct ingredient in the catalog.
    ///
    /// Stock is drawn uniformly from `0..max_stock_grams` whole grams; price
    /// and item code come from the first ingredient line naming it.
    pub fn mock(catalog: &ReferenceCatalog, max_stock_grams: u32, rng: &mut impl Rng) -> Self {
        let entries: Vec<InventoryEntry> = catalog
            .distinct_ingredients()
            .into_iter()
            .map(|line| InventoryEntry {
                ingredient: line.ingredient.clone(),
                stock_grams: rng.gen_range(0..max_stock_grams.max(1)) as f64,
                unit_price: line.unit_price,
                item_code: line.item_code.clone(),
            })
            .collect();

        info!(count = entries.len(), "synthesised mock inventory");
        Self::new(entries)
    }

    pub fn get(&self, ingredient: &str) -> Option<&InventoryEntry> {
        self.entries.get(ingredient.trim())
    }

    /// Stock in grams; unknown ingredients have none.
    pub fn stock_of(&self, ingredient: &str) -> f64 {
        self.get(ingredient).map(|e| e.stock_grams).unwrap_or(0.0)
    }

    /// Ingredients with stock strictly below `threshold_grams`.
    pub fn low_stock(&self, threshold_grams: f64) -> Vec<&InventoryEntry> {
        self.entries
            .values()
            .filter(|e| e.stock_grams < threshold_grams)
            .collect()
    }

    /// Ingredients that have any stock at all.
    pub fn in_stock(&self) -> Vec<&InventoryEntry> {
        self.entries
            .values()
            .filter(|e| e.stock_grams > 0.0)
            .collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &InventoryEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IngredientLine;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn entry(name: &str, stock: f64) -> InventoryEntry {
        InventoryEntry {
            ingredient: name.to_string(),
            stock_grams: stock,
            unit_price: 1.0,
            item_code: String::new(),
        }
    }

    #[test]
    fn test_unknown_ingredient_has_zero_stock() {
        let inventory = Inventory::new(vec![entry("두부", 300.0)]);
        assert_eq!(inventory.stock_of("두부"), 300.0);
        assert_eq!(inventory.stock_of("멸치"), 0.0);
    }

    #[test]
    fn test_low_stock() {
        let inventory = Inventory::new(vec![
            entry("두부", 300.0),
            entry("쌀", 4000.0),
            entry("양파", 999.0),
        ]);
        assert_eq!(inventory.low_stock(1000.0).len(), 2);
        assert_eq!(inventory.in_stock().len(), 3);
    }

    #[test]
    fn test_mock_inventory_is_seeded() {
        let line = |name: &str| IngredientLine {
            ingredient: name.to_string(),
            base_grams: 10.0,
            unit_price: 3.0,
            item_code: format!("C-{}", name),
        };
        let catalog = ReferenceCatalog::builder()
            .ingredient("두부조림", line("두부"))
            .ingredient("두부조림", line("간장"))
            .ingredient("두부국", line("두부"))
            .build();

        let a = Inventory::mock(&catalog, 5000, &mut StdRng::seed_from_u64(7));
        let b = Inventory::mock(&catalog, 5000, &mut StdRng::seed_from_u64(7));

        assert_eq!(a.len(), 2);
        for e in a.entries() {
            assert!(e.stock_grams >= 0.0 && e.stock_grams < 5000.0);
            assert_eq!(b.stock_of(&e.ingredient), e.stock_grams);
            assert_eq!(e.unit_price, 3.0);
        }
        assert_eq!(a.get("간장").unwrap().item_code, "C-간장");
    }
}
