use rand::Rng;
use tracing::{debug, info};

use crate::catalog::ReferenceCatalog;
use crate::error::{PlannerError, Result};
use crate::models::{ActionTag, Category, PatientProfile, ResolvedMenuItem};
use crate::planner::config::PlannerConfig;
use crate::planner::portion::PortionBalancer;
use crate::planner::substitution::{ConstraintKind, SubstitutionResolver};

/// One patient's personalized meal.
#[derive(Debug, Clone)]
pub struct PatientPlan {
    pub patient: String,
    pub target_kcal: f64,
    /// Clamped balancing ratio applied to staple items.
    pub balance_ratio: f64,
    pub items: Vec<ResolvedMenuItem>,
}

impl AsRef<[ResolvedMenuItem]> for PatientPlan {
    fn as_ref(&self) -> &[ResolvedMenuItem] {
        &self.items
    }
}

/// Applies the per-item policy chain to a patient's master menu.
///
/// Stages run in a fixed order for every item:
/// 1. condition-driven substitution (hypertension: salty side dishes)
/// 2. texture modification (porridge conversion, minced or ground preparation)
/// 3. calorie balancing of staple portions
/// 4. output assembly from the final item
pub struct PersonalizationEngine<'a> {
    catalog: &'a ReferenceCatalog,
    config: &'a PlannerConfig,
    resolver: SubstitutionResolver<'a>,
    balancer: PortionBalancer,
}

impl<'a> PersonalizationEngine<'a> {
    pub fn new(catalog: &'a ReferenceCatalog, config: &'a PlannerConfig) -> Self {
        Self {
            catalog,
            config,
            resolver: SubstitutionResolver::new(catalog),
            balancer: PortionBalancer::new(config.balance_ratio_min, config.balance_ratio_max),
        }
    }

    /// Per-meal energy target. Fails when the weight is absent or not positive.
    pub fn meal_target(&self, patient: &PatientProfile) -> Result<f64> {
        let weight = patient.weight_kg.ok_or_else(|| PlannerError::MissingField {
            patient: patient.name.clone(),
            field: "weight",
        })?;
        if !weight.is_finite() || weight <= 0.0 {
            return Err(PlannerError::InvalidField {
                patient: patient.name.clone(),
                field: "weight",
                value: weight.to_string(),
            });
        }
        Ok(self.config.meal_target_kcal(weight))
    }

    /// Personalize one meal for one patient.
    pub fn personalize<R: Rng + ?Sized>(
        &self,
        patient: &PatientProfile,
        master_menu: &[String],
        rng: &mut R,
    ) -> Result<PatientPlan> {
        let target_kcal = self.meal_target(patient)?;
        let menu_kcal = PortionBalancer::menu_energy(self.catalog, master_menu);
        let balance_ratio = self.balancer.ratio(target_kcal, menu_kcal);

        debug!(
            patient = %patient.name,
            target_kcal,
            menu_kcal,
            balance_ratio,
            "portion balance computed"
        );

        let items: Vec<ResolvedMenuItem> = master_menu
            .iter()
            .map(|item| self.resolve_item(patient, item, balance_ratio, &mut *rng))
            .collect();

        info!(
            patient = %patient.name,
            items = items.len(),
            substituted = items.iter().filter(|i| i.was_substituted()).count(),
            "meal personalized"
        );

        Ok(PatientPlan {
            patient: patient.name.clone(),
            target_kcal,
            balance_ratio,
            items,
        })
    }

    /// Personalize the same meal for every patient.
    ///
    /// Any patient with an unusable weight aborts the whole run.
    pub fn personalize_all<R: Rng + ?Sized>(
        &self,
        patients: &[PatientProfile],
        master_menu: &[String],
        rng: &mut R,
    ) -> Result<Vec<PatientPlan>> {
        patients
            .iter()
            .map(|p| self.personalize(p, master_menu, &mut *rng))
            .collect()
    }

    fn resolve_item<R: Rng + ?Sized>(
        &self,
        patient: &PatientProfile,
        item: &str,
        balance_ratio: f64,
        rng: &mut R,
    ) -> ResolvedMenuItem {
        let category = self.catalog.lookup_category(item);
        let mut nutrients = self.catalog.lookup_nutrients(item);
        let mut final_item = item.trim().to_string();
        let mut portion_ratio = 1.0;
        let mut tags = Vec::new();

        // Stage 1: condition-driven substitution.
        if patient.conditions.hypertension
            && category == Category::SideDish
            && nutrients.sodium_mg > self.config.hypertension_sodium_trigger_mg
        {
            let sub = self.resolver.find_substitute(
                item,
                category,
                ConstraintKind::Sodium,
                self.config.low_sodium_limit_mg,
                rng,
            );
            if sub.applied {
                nutrients = self.catalog.lookup_nutrients(&sub.item);
                final_item = sub.item;
                tags.push(ActionTag::LowSodiumSubstitution);
            }
        }

        // Stage 2: texture modification, first match wins per item.
        let texture = patient.texture;
        if texture.porridge && category == Category::StapleRice {
            final_item = self.config.plain_porridge_item.clone();
            portion_ratio = self.config.porridge_portion_multiplier;
            tags.push(ActionTag::PorridgeConversion);
        } else if texture.minced && !category.is_staple() {
            tags.push(ActionTag::MincedPreparation);
        } else if texture.ground && !category.is_staple() {
            tags.push(ActionTag::GroundPreparation);
        }

        // Stage 3: calorie balancing, staples only.
        if category.is_staple() {
            portion_ratio *= balance_ratio;
            if balance_ratio != 1.0 {
                tags.push(ActionTag::PortionAdjusted((balance_ratio * 100.0) as u32));
            }
        }

        // Stage 4: energy keeps the post-substitution snapshot; ingredients
        // follow the final item.
        ResolvedMenuItem {
            category,
            original_item: item.trim().to_string(),
            ingredients: self.catalog.lookup_ingredients(&final_item).to_vec(),
            final_item,
            portion_ratio,
            tags,
            nutrients: nutrients.scaled(portion_ratio),
        }
    }
}
