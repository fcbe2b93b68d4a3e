use crate::catalog::ReferenceCatalog;

/// Computes the calorie-balancing ratio for one patient's meal.
///
/// The ratio is the per-meal target divided by the energy of the unmodified
/// master menu, clamped to `[min_ratio, max_ratio]`. It is applied to staple
/// items only; side dishes are batch-cooked and never resized.
#[derive(Debug, Clone, Copy)]
pub struct PortionBalancer {
    pub min_ratio: f64,
    pub max_ratio: f64,
}

impl PortionBalancer {
    pub fn new(min_ratio: f64, max_ratio: f64) -> Self {
        Self {
            min_ratio,
            max_ratio,
        }
    }

    /// Energy of the master-menu items as listed, before any substitution.
    /// Unknown items contribute nothing.
    pub fn menu_energy(catalog: &ReferenceCatalog, master_menu: &[String]) -> f64 {
        master_menu
            .iter()
            .map(|item| catalog.lookup_nutrients(item).energy_kcal)
            .sum()
    }

    /// Clamped ratio; a non-positive menu energy yields 1.0.
    pub fn ratio(&self, target_kcal: f64, current_kcal: f64) -> f64 {
        if current_kcal <= 0.0 {
            return 1.0;
        }
        (target_kcal / current_kcal).clamp(self.min_ratio, self.max_ratio)
    }
}
