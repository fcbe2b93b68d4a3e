use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::catalog::ReferenceCatalog;
use crate::models::{Category, MenuItem, NutrientRecord};

/// The nutrient a substitution constraint is measured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Hypertension: limit sodium (mg).
    Sodium,
    /// Diabetes: limit carbohydrate (g).
    Carbohydrate,
}

impl ConstraintKind {
    #[inline]
    pub fn value_of(self, nutrients: &NutrientRecord) -> f64 {
        match self {
            ConstraintKind::Sodium => nutrients.sodium_mg,
            ConstraintKind::Carbohydrate => nutrients.carbohydrate_g,
        }
    }
}

/// Outcome of a substitute search.
#[derive(Debug, Clone, PartialEq)]
pub struct Substitution {
    /// The item to serve: the substitute, or the current item when nothing changed.
    pub item: String,
    /// False when no candidate qualified or the draw returned the current item.
    pub applied: bool,
}

impl Substitution {
    fn unchanged(item: &str) -> Self {
        Self {
            item: item.to_string(),
            applied: false,
        }
    }
}

/// Finds same-category replacements under a single nutrient ceiling.
///
/// Candidates are drawn uniformly at random from the qualifying set using the
/// caller's RNG; pass a seeded RNG for reproducible plans. A search checks one
/// constraint only and never re-validates the chosen item against others.
pub struct SubstitutionResolver<'a> {
    catalog: &'a ReferenceCatalog,
}

impl<'a> SubstitutionResolver<'a> {
    pub fn new(catalog: &'a ReferenceCatalog) -> Self {
        Self { catalog }
    }

    /// Items of `category` with a nutrient record whose constrained value is
    /// strictly below `max_value`, ordered by name.
    pub fn candidates(
        &self,
        category: Category,
        constraint: ConstraintKind,
        max_value: f64,
    ) -> Vec<&'a MenuItem> {
        self.catalog
            .items_in_category(category)
            .into_iter()
            .filter(|item| {
                item.nutrients
                    .as_ref()
                    .is_some_and(|n| constraint.value_of(n) < max_value)
            })
            .collect()
    }

    pub fn find_substitute<R: Rng + ?Sized>(
        &self,
        current: &str,
        category: Category,
        constraint: ConstraintKind,
        max_value: f64,
        rng: &mut R,
    ) -> Substitution {
        let candidates = self.candidates(category, constraint, max_value);

        let Some(chosen) = candidates.choose(rng) else {
            debug!(item = current, ?constraint, max_value, "no eligible substitute");
            return Substitution::unchanged(current);
        };

        if chosen.name == current.trim() {
            return Substitution::unchanged(current);
        }

        debug!(
            from = current,
            to = %chosen.name,
            pool = candidates.len(),
            "substitute chosen"
        );
        Substitution {
            item: chosen.name.clone(),
            applied: true,
        }
    }
}
