use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::catalog::Inventory;
use crate::models::{OrderLine, ResolvedMenuItem, UNKNOWN_ITEM_CODE};

/// Running gram requirements per ingredient, in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequirementTotals {
    order: Vec<String>,
    grams: HashMap<String, f64>,
}

impl RequirementTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, ingredient: &str, grams: f64) {
        match self.grams.get_mut(ingredient) {
            Some(total) => *total += grams,
            None => {
                self.order.push(ingredient.to_string());
                self.grams.insert(ingredient.to_string(), grams);
            }
        }
    }

    /// Add every ingredient line of a resolved item, scaled by its portion.
    pub fn add_item(&mut self, item: &ResolvedMenuItem) {
        for line in &item.ingredients {
            self.add(&line.ingredient, line.base_grams * item.portion_ratio);
        }
    }

    /// Fold another partial total into this one. Ingredients new to `self`
    /// are appended in `other`'s order.
    pub fn merge(&mut self, other: RequirementTotals) {
        let RequirementTotals { order, mut grams } = other;
        for ingredient in order {
            if let Some(g) = grams.remove(&ingredient) {
                self.add(&ingredient, g);
            }
        }
    }

    pub fn get(&self, ingredient: &str) -> Option<f64> {
        self.grams.get(ingredient).copied()
    }

    /// `(ingredient, grams)` in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.order
            .iter()
            .map(|name| (name.as_str(), self.grams.get(name).copied().unwrap_or(0.0)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Sum a set of plans into one requirement table.
pub fn sum_requirements<'a, I>(plans: I) -> RequirementTotals
where
    I: IntoIterator<Item = &'a [ResolvedMenuItem]>,
{
    let mut totals = RequirementTotals::new();
    for plan in plans {
        for item in plan {
            totals.add_item(item);
        }
    }
    totals
}

/// Compare totals against stock and emit an order line for every
/// ingredient whose stock does not cover the rounded-up requirement.
///
/// Unknown ingredients count as zero stock, price 0 and code "-".
pub fn order_lines(totals: &RequirementTotals, inventory: &Inventory) -> Vec<OrderLine> {
    let mut lines = Vec::new();

    for (ingredient, grams) in totals.iter() {
        let required = grams.max(0.0).ceil();
        let entry = inventory.get(ingredient);
        let stock = entry.map(|e| e.stock_grams).unwrap_or(0.0);

        if stock >= required {
            continue;
        }

        let shortfall = required - stock;
        let unit_price = entry.map(|e| e.unit_price).unwrap_or(0.0);
        let item_code = entry
            .map(|e| e.item_code.clone())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| UNKNOWN_ITEM_CODE.to_string());

        debug!(ingredient, required, stock, shortfall, "shortfall");
        lines.push(OrderLine {
            item_code,
            ingredient: ingredient.to_string(),
            stock_grams: stock,
            required_grams: required,
            shortfall_grams: shortfall,
            estimated_cost: shortfall * unit_price,
        });
    }

    lines
}

/// Aggregates per-patient plans into a procurement order against stock.
pub struct ProcurementAggregator<'a> {
    inventory: &'a Inventory,
}

impl<'a> ProcurementAggregator<'a> {
    pub fn new(inventory: &'a Inventory) -> Self {
        Self { inventory }
    }

    /// Sequential aggregation over every patient's plan.
    pub fn aggregate<P: AsRef<[ResolvedMenuItem]>>(&self, plans: &[P]) -> Vec<OrderLine> {
        let totals = sum_requirements(plans.iter().map(|p| p.as_ref()));
        self.finish(&totals)
    }

    /// Split the plans into up to `workers` chunks, sum each chunk on the
    /// rayon pool and merge the partials in chunk order.
    /// Produces the same lines, in the same order, as `aggregate`.
    pub fn aggregate_partitioned<P>(&self, plans: &[P], workers: usize) -> Vec<OrderLine>
    where
        P: AsRef<[ResolvedMenuItem]> + Sync,
    {
        if plans.is_empty() {
            return Vec::new();
        }
        let chunk_size = plans.len().div_ceil(workers.max(1));

        let partials: Vec<RequirementTotals> = plans
            .par_chunks(chunk_size)
            .map(|chunk| sum_requirements(chunk.iter().map(|p| p.as_ref())))
            .collect();

        let mut totals = RequirementTotals::new();
        for partial in partials {
            totals.merge(partial);
        }
        self.finish(&totals)
    }

    fn finish(&self, totals: &RequirementTotals) -> Vec<OrderLine> {
        let lines = order_lines(totals, self.inventory);
        info!(
            ingredients = totals.len(),
            orders = lines.len(),
            total_cost = total_cost(&lines),
            "procurement aggregated"
        );
        lines
    }
}

/// Sum of estimated costs.
pub fn total_cost(lines: &[OrderLine]) -> f64 {
    lines.iter().map(|l| l.estimated_cost).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, IngredientLine, InventoryEntry, NutrientRecord};

    fn item(ingredients: &[(&str, f64)], ratio: f64) -> ResolvedMenuItem {
        ResolvedMenuItem {
            category: Category::SideDish,
            original_item: "반찬".to_string(),
            final_item: "반찬".to_string(),
            portion_ratio: ratio,
            tags: Vec::new(),
            nutrients: NutrientRecord::default(),
            ingredients: ingredients
                .iter()
                .map(|(name, grams)| IngredientLine {
                    ingredient: name.to_string(),
                    base_grams: *grams,
                    unit_price: 0.0,
                    item_code: String::new(),
                })
                .collect(),
        }
    }

    fn stock(name: &str, grams: f64, price: f64) -> InventoryEntry {
        InventoryEntry {
            ingredient: name.to_string(),
            stock_grams: grams,
            unit_price: price,
            item_code: format!("C-{}", name),
        }
    }

    #[test]
    fn test_totals_keep_first_encounter_order() {
        let mut totals = RequirementTotals::new();
        totals.add("양파", 10.0);
        totals.add("두부", 5.0);
        totals.add("양파", 2.5);

        let rows: Vec<(&str, f64)> = totals.iter().collect();
        assert_eq!(rows, vec![("양파", 12.5), ("두부", 5.0)]);
    }

    #[test]
    fn test_merge_sums_and_appends() {
        let mut a = RequirementTotals::new();
        a.add("쌀", 100.0);
        let mut b = RequirementTotals::new();
        b.add("두부", 30.0);
        b.add("쌀", 50.0);

        a.merge(b);
        assert_eq!(a.get("쌀"), Some(150.0));
        assert_eq!(a.iter().map(|(n, _)| n).collect::<Vec<_>>(), vec!["쌀", "두부"]);
    }

    #[test]
    fn test_ceiling_and_sufficient_stock() {
        let inventory = Inventory::new(vec![stock("쌀", 100.0, 2.0), stock("두부", 500.0, 3.0)]);
        let plans = vec![vec![item(&[("쌀", 90.0), ("두부", 100.0)], 1.125)]];

        let lines = ProcurementAggregator::new(&inventory).aggregate(&plans);

        // 쌀: 101.25 -> 102 > 100; 두부: 112.5 -> 113 <= 500.
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].ingredient, "쌀");
        assert_eq!(lines[0].required_grams, 102.0);
        assert_eq!(lines[0].shortfall_grams, 2.0);
        assert_eq!(lines[0].estimated_cost, 4.0);
        assert_eq!(lines[0].item_code, "C-쌀");
    }

    #[test]
    fn test_unknown_ingredient_ordered_in_full() {
        let inventory = Inventory::default();
        let plans = vec![vec![item(&[("참기름", 3.2)], 1.0)]];

        let lines = ProcurementAggregator::new(&inventory).aggregate(&plans);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].stock_grams, 0.0);
        assert_eq!(lines[0].required_grams, 4.0);
        assert_eq!(lines[0].estimated_cost, 0.0);
        assert_eq!(lines[0].item_code, UNKNOWN_ITEM_CODE);
    }

    #[test]
    fn test_exact_stock_is_sufficient() {
        let inventory = Inventory::new(vec![stock("쌀", 180.0, 2.0)]);
        let plans = vec![vec![item(&[("쌀", 90.0)], 1.0)], vec![item(&[("쌀", 90.0)], 1.0)]];
        assert!(ProcurementAggregator::new(&inventory).aggregate(&plans).is_empty());
    }

    #[test]
    fn test_partitioned_matches_sequential() {
        let inventory = Inventory::new(vec![stock("쌀", 200.0, 2.0)]);
        let plans: Vec<Vec<ResolvedMenuItem>> = (0..7)
            .map(|i| {
                vec![
                    item(&[("쌀", 91.3), ("두부", 41.7)], 0.7 + i as f64 * 0.1),
                    item(&[("멸치", 15.0)], 1.0),
                ]
            })
            .collect();

        let aggregator = ProcurementAggregator::new(&inventory);
        let sequential = aggregator.aggregate(&plans);
        for workers in [1, 2, 3, 8] {
            assert_eq!(aggregator.aggregate_partitioned(&plans, workers), sequential);
        }
    }

    #[test]
    fn test_total_cost() {
        let inventory = Inventory::new(vec![stock("쌀", 0.0, 2.0), stock("두부", 0.0, 3.0)]);
        let plans = vec![vec![item(&[("쌀", 10.0), ("두부", 10.0)], 1.0)]];
        let lines = ProcurementAggregator::new(&inventory).aggregate(&plans);
        assert_eq!(total_cost(&lines), 50.0);
    }
}
