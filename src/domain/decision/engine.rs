//! Decision Engine - rule-based routine selection.
//!
//! Three filter stages run in a fixed order so that safety constraints
//! dominate comfort constraints, which dominate purity constraints:
//!
//! 1. Safety (UV): photosensitive products leave the daytime slots.
//! 2. Texture (humidity): rich textures first in dry air, light
//!    non-cleansers dropped in humid air.
//! 3. Purity (PM2.5): the strongest evening cleanser is kept for a
//!    double cleanse.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::catalog::{Product, ProductCatalog, RoutineSlot};
use crate::domain::environment::EnvironmentalSnapshot;
use crate::domain::profile::{DailyContext, UserProfile};
use crate::domain::routine::{Alert, MomentSelection, Routine};

/// Occlusivity from which a product is prioritized in dry air.
pub const HIGH_OCCLUSIVITY: u8 = 4;
/// Occlusivity up to which a non-cleanser is dropped in humid air.
pub const LOW_OCCLUSIVITY: u8 = 2;

/// Hard failures of a single decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    #[error("The product catalog is empty; no routine can be produced")]
    EmptyCatalog,
}

/// A filter stage that fired for a given environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppliedFilter {
    UvSafety,
    DryTexture,
    HumidTexture,
    PollutionPurity,
}

/// Pure, stateless routine selection.
pub struct DecisionEngine;

impl DecisionEngine {
    /// Builds the routine for today.
    ///
    /// The profile and daily context are read-only inputs carried for the
    /// augmentation pass; the rules themselves depend on the catalog and the
    /// environment only.
    ///
    /// # Errors
    /// `DecisionError::EmptyCatalog` when the catalog holds no product. Every
    /// other condition degrades to an empty selection with an alert.
    pub fn decide(
        profile: &UserProfile,
        catalog: &ProductCatalog,
        environment: &EnvironmentalSnapshot,
        context: Option<&DailyContext>,
    ) -> Result<Routine, DecisionError> {
        if catalog.is_empty() {
            return Err(DecisionError::EmptyCatalog);
        }

        let stress = context
            .map(|c| c.effective_stress(profile))
            .unwrap_or(profile.stress_level);
        debug!(
            location = %environment.location_id(),
            uv = environment.uv_index(),
            humidity = environment.humidity_pct(),
            pm25 = ?environment.pm25(),
            skin_type = %profile.skin_type,
            stress = stress.value(),
            filters = ?Self::applied_filters(environment),
            products = catalog.len(),
            "Deciding routine"
        );

        Ok(Routine::new(
            Self::select(RoutineSlot::Morning, catalog, environment),
            Self::select(RoutineSlot::Midday, catalog, environment),
            Self::select(RoutineSlot::Evening, catalog, environment),
        ))
    }

    /// Lists the filter stages the environment triggers, in stage order.
    pub fn applied_filters(environment: &EnvironmentalSnapshot) -> Vec<AppliedFilter> {
        let mut filters = Vec::new();
        if environment.is_uv_critical() {
            filters.push(AppliedFilter::UvSafety);
        }
        if environment.is_dry() {
            filters.push(AppliedFilter::DryTexture);
        } else if environment.is_humid() {
            filters.push(AppliedFilter::HumidTexture);
        }
        if environment.is_polluted() {
            filters.push(AppliedFilter::PollutionPurity);
        }
        filters
    }

    fn select(
        slot: RoutineSlot,
        catalog: &ProductCatalog,
        environment: &EnvironmentalSnapshot,
    ) -> MomentSelection {
        // (catalog index, product); the index is the tie-break order.
        let mut candidates: Vec<(usize, &Product)> = catalog
            .iter()
            .enumerate()
            .filter(|(_, p)| p.moment().applies_to(slot))
            .collect();
        let mut alerts = Vec::new();

        // 1. Safety
        if environment.is_uv_critical() && slot.is_daytime() {
            let before = candidates.len();
            candidates.retain(|(_, p)| !p.is_photosensitive());
            let excluded = before - candidates.len();
            if excluded > 0 {
                debug!(%slot, excluded, "UV filter excluded photosensitive products");
                alerts.push(Alert::uv_photosensitive_excluded());
            }
        }

        // 2. Texture
        if environment.is_humid() {
            candidates.retain(|(_, p)| p.is_cleanser() || p.occlusivity().value() > LOW_OCCLUSIVITY);
        }

        // 3. Purity
        if environment.is_polluted() && slot == RoutineSlot::Evening {
            match Self::strongest_cleanser(&candidates) {
                Some((chosen, product)) => {
                    debug!(cleanser = %product.name(), "Pollution filter kept strongest cleanser");
                    alerts.push(Alert::double_cleansing(product.name().as_str()));
                    candidates.retain(|(i, p)| !p.is_cleanser() || *i == chosen);
                }
                None => alerts.push(Alert::no_cleanser_available()),
            }
        }

        let dry = environment.is_dry();
        candidates.sort_by_key(|(index, p)| {
            let texture_rank = u8::from(!(dry && p.occlusivity().value() >= HIGH_OCCLUSIVITY));
            (p.category().application_rank(), texture_rank, *index)
        });

        let products: Vec<_> = candidates.iter().map(|(_, p)| p.name().clone()).collect();
        if products.is_empty() {
            alerts.push(Alert::empty_selection());
        }

        MomentSelection {
            slot,
            products,
            alerts,
        }
    }

    /// Highest cleansing power among cleansers; earliest catalog entry wins ties.
    fn strongest_cleanser<'a>(candidates: &[(usize, &'a Product)]) -> Option<(usize, &'a Product)> {
        candidates
            .iter()
            .filter(|(_, p)| p.is_cleanser())
            .fold(None, |best: Option<(usize, &'a Product)>, &(index, product)| match best {
                Some((_, current)) if current.cleansing_power() >= product.cleansing_power() => best,
                _ => Some((index, product)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{ActiveTag, Category, Moment, ProductName};
    use crate::domain::foundation::{LocationId, Timestamp};
    use crate::domain::routine::AlertKind;
    use proptest::prelude::*;

    fn env(uv: f64, humidity: f64, pm25: f64) -> EnvironmentalSnapshot {
        EnvironmentalSnapshot::new(
            LocationId::new("lyon-france").unwrap(),
            Timestamp::now(),
            uv,
            humidity,
            Some(pm25),
            20.0,
        )
        .unwrap()
    }

    fn product(name: &str, category: Category, moment: Moment) -> Product {
        Product::new(ProductName::new(name).unwrap(), category).with_moment(moment)
    }

    fn names(selection: &MomentSelection) -> Vec<&str> {
        selection.products.iter().map(|p| p.as_str()).collect()
    }

    fn decide(catalog: &ProductCatalog, environment: &EnvironmentalSnapshot) -> Routine {
        DecisionEngine::decide(&UserProfile::default(), catalog, environment, None).unwrap()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Scenarios
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn empty_catalog_is_the_only_hard_failure() {
        let result = DecisionEngine::decide(
            &UserProfile::default(),
            &ProductCatalog::new(),
            &env(1.0, 50.0, 5.0),
            None,
        );
        assert_eq!(result, Err(DecisionError::EmptyCatalog));
    }

    #[test]
    fn bha_and_heavy_cream_under_high_uv_and_dry_air() {
        let catalog = ProductCatalog::from_products(vec![
            product("BHA 2%", Category::Treatment, Moment::Evening)
                .with_photosensitive(true)
                .with_occlusivity(1)
                .with_cleansing_power(1)
                .with_active_tag(ActiveTag::Acne),
            product("Heavy Cream", Category::Moisturizer, Moment::Any)
                .with_occlusivity(5)
                .with_cleansing_power(1)
                .with_active_tag(ActiveTag::Hydration),
        ])
        .unwrap();

        let routine = decide(&catalog, &env(5.0, 30.0, 10.0));

        assert_eq!(names(&routine.morning), vec!["Heavy Cream"]);
        assert_eq!(names(&routine.midday), vec!["Heavy Cream"]);
        assert_eq!(names(&routine.evening), vec!["BHA 2%", "Heavy Cream"]);
        // BHA is evening-only, so nothing was excluded by the UV rule.
        assert!(routine.all_alerts().all(|a| a.kind != AlertKind::UvPhotosensitiveExcluded));
    }

    #[test]
    fn humid_air_drops_light_moisturizer_everywhere() {
        let catalog = ProductCatalog::from_products(vec![
            product("Gel Fluide", Category::Moisturizer, Moment::Any).with_occlusivity(2),
            product("Creme", Category::Moisturizer, Moment::Any).with_occlusivity(3),
        ])
        .unwrap();

        let routine = decide(&catalog, &env(1.0, 80.0, 5.0));

        for selection in routine.selections() {
            assert!(!selection.contains("Gel Fluide"));
            assert!(selection.contains("Creme"));
        }
    }

    #[test]
    fn humid_air_keeps_light_cleansers() {
        let catalog = ProductCatalog::from_products(vec![
            product("Eau Micellaire", Category::Cleanser, Moment::Any).with_occlusivity(1),
        ])
        .unwrap();

        let routine = decide(&catalog, &env(1.0, 90.0, 5.0));
        assert!(routine.morning.contains("Eau Micellaire"));
    }

    #[test]
    fn high_uv_excludes_photosensitive_by_day_only() {
        let catalog = ProductCatalog::from_products(vec![
            product("Retinol", Category::Treatment, Moment::Any).with_photosensitive(true),
            product("SPF 50", Category::Protection, Moment::Any),
        ])
        .unwrap();

        let routine = decide(&catalog, &env(7.0, 55.0, 5.0));

        assert_eq!(names(&routine.morning), vec!["SPF 50"]);
        assert_eq!(names(&routine.midday), vec!["SPF 50"]);
        assert_eq!(names(&routine.evening), vec!["Retinol", "SPF 50"]);
        assert_eq!(routine.morning.alerts, vec![Alert::uv_photosensitive_excluded()]);
        assert_eq!(routine.midday.alerts, vec![Alert::uv_photosensitive_excluded()]);
        assert!(routine.evening.alerts.is_empty());
    }

    #[test]
    fn uv_exactly_at_threshold_excludes_nothing() {
        let catalog = ProductCatalog::from_products(vec![
            product("Retinol", Category::Treatment, Moment::Morning).with_photosensitive(true),
        ])
        .unwrap();

        let routine = decide(&catalog, &env(3.0, 55.0, 5.0));
        assert!(routine.morning.contains("Retinol"));
    }

    #[test]
    fn products_follow_category_order() {
        let catalog = ProductCatalog::from_products(vec![
            product("SPF", Category::Protection, Moment::Morning),
            product("Creme", Category::Moisturizer, Moment::Morning),
            product("Serum", Category::Treatment, Moment::Morning),
            product("Gel", Category::Cleanser, Moment::Morning),
        ])
        .unwrap();

        let routine = decide(&catalog, &env(1.0, 55.0, 5.0));
        assert_eq!(names(&routine.morning), vec!["Gel", "Serum", "Creme", "SPF"]);
    }

    #[test]
    fn dry_air_puts_rich_textures_first_within_category() {
        let catalog = ProductCatalog::from_products(vec![
            product("Lotion", Category::Moisturizer, Moment::Any).with_occlusivity(1),
            product("Creme Legere", Category::Moisturizer, Moment::Any).with_occlusivity(3),
            product("Baume", Category::Moisturizer, Moment::Any).with_occlusivity(5),
            product("Creme Riche", Category::Moisturizer, Moment::Any).with_occlusivity(4),
            product("Gel", Category::Cleanser, Moment::Any).with_occlusivity(1),
        ])
        .unwrap();

        let routine = decide(&catalog, &env(1.0, 30.0, 5.0));
        assert_eq!(
            names(&routine.morning),
            vec!["Gel", "Baume", "Creme Riche", "Lotion", "Creme Legere"]
        );
    }

    #[test]
    fn pollution_keeps_strongest_evening_cleanser_with_alert() {
        let catalog = ProductCatalog::from_products(vec![
            product("Lait", Category::Cleanser, Moment::Any).with_cleansing_power(1),
            product("Mousse", Category::Cleanser, Moment::Evening).with_cleansing_power(4),
            product("Huile", Category::Cleanser, Moment::Evening).with_cleansing_power(4),
            product("Creme", Category::Moisturizer, Moment::Any),
        ])
        .unwrap();

        let routine = decide(&catalog, &env(1.0, 55.0, 40.0));

        assert_eq!(names(&routine.evening), vec!["Mousse", "Creme"]);
        assert_eq!(routine.evening.alerts[0].kind, AlertKind::DoubleCleansing);
        assert!(routine.evening.alerts[0].message.contains("Mousse"));
        // Daytime slots are untouched by the purity filter.
        assert_eq!(names(&routine.morning), vec!["Lait", "Creme"]);
    }

    #[test]
    fn pollution_without_evening_cleanser_degrades_to_alert() {
        let catalog = ProductCatalog::from_products(vec![
            product("Creme", Category::Moisturizer, Moment::Any),
        ])
        .unwrap();

        let routine = decide(&catalog, &env(1.0, 55.0, 40.0));
        assert_eq!(routine.evening.alerts, vec![Alert::no_cleanser_available()]);
        assert!(routine.evening.contains("Creme"));
    }

    #[test]
    fn empty_slot_gets_explanatory_alert() {
        let catalog = ProductCatalog::from_products(vec![
            product("Serum Nuit", Category::Treatment, Moment::Evening),
        ])
        .unwrap();

        let routine = decide(&catalog, &env(1.0, 55.0, 5.0));
        assert!(routine.morning.is_empty());
        assert_eq!(routine.morning.alerts, vec![Alert::empty_selection()]);
        assert!(routine.evening.alerts.is_empty());
    }

    #[test]
    fn missing_pm25_never_triggers_purity_filter() {
        let catalog = ProductCatalog::from_products(vec![
            product("A", Category::Cleanser, Moment::Evening).with_cleansing_power(1),
            product("B", Category::Cleanser, Moment::Evening).with_cleansing_power(5),
        ])
        .unwrap();
        let environment = EnvironmentalSnapshot::new(
            LocationId::new("x").unwrap(),
            Timestamp::now(),
            1.0,
            55.0,
            None,
            20.0,
        )
        .unwrap();

        let routine = decide(&catalog, &environment);
        assert_eq!(names(&routine.evening), vec!["A", "B"]);
    }

    #[test]
    fn applied_filters_report_stage_order() {
        assert_eq!(
            DecisionEngine::applied_filters(&env(6.0, 20.0, 60.0)),
            vec![AppliedFilter::UvSafety, AppliedFilter::DryTexture, AppliedFilter::PollutionPurity]
        );
        assert!(DecisionEngine::applied_filters(&env(1.0, 55.0, 5.0)).is_empty());
    }

    #[test]
    fn inputs_are_not_mutated() {
        let catalog = ProductCatalog::from_products(vec![
            product("B", Category::Moisturizer, Moment::Any).with_occlusivity(1),
            product("A", Category::Cleanser, Moment::Any),
        ])
        .unwrap();
        let snapshot = catalog.clone();

        decide(&catalog, &env(9.0, 20.0, 80.0));
        assert_eq!(catalog, snapshot);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Properties
    // ─────────────────────────────────────────────────────────────────────

    fn arb_category() -> impl Strategy<Value = Category> {
        prop::sample::select(Category::ALL.to_vec())
    }

    fn arb_moment() -> impl Strategy<Value = Moment> {
        prop::sample::select(vec![Moment::Morning, Moment::Midday, Moment::Evening, Moment::Any])
    }

    fn arb_catalog() -> impl Strategy<Value = ProductCatalog> {
        prop::collection::vec(
            (arb_category(), arb_moment(), any::<bool>(), 1i64..=5, 1i64..=5),
            1..12,
        )
        .prop_map(|specs| {
            let products = specs.into_iter().enumerate().map(|(i, (c, m, photo, occ, clean))| {
                product(&format!("P{}", i), c, m)
                    .with_photosensitive(photo)
                    .with_occlusivity(occ)
                    .with_cleansing_power(clean)
            });
            ProductCatalog::from_products(products).unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_no_photosensitive_by_day_under_high_uv(
            catalog in arb_catalog(),
            uv in 3.01f64..15.0,
            humidity in 0.0f64..=100.0,
            pm25 in 0.0f64..100.0,
        ) {
            let routine = decide(&catalog, &env(uv, humidity, pm25));
            for selection in [&routine.morning, &routine.midday] {
                for name in &selection.products {
                    prop_assert!(!catalog.get(name.as_str()).unwrap().is_photosensitive());
                }
            }
        }

        #[test]
        fn prop_evening_is_unaffected_by_uv(
            catalog in arb_catalog(),
            uv in 3.01f64..15.0,
            humidity in 0.0f64..=100.0,
            pm25 in 0.0f64..100.0,
        ) {
            let high = decide(&catalog, &env(uv, humidity, pm25));
            let low = decide(&catalog, &env(0.0, humidity, pm25));
            prop_assert_eq!(high.evening, low.evening);
        }

        #[test]
        fn prop_products_only_in_matching_slots(
            catalog in arb_catalog(),
            uv in 0.0f64..15.0,
            humidity in 0.0f64..=100.0,
            pm25 in 0.0f64..100.0,
        ) {
            let routine = decide(&catalog, &env(uv, humidity, pm25));
            for selection in routine.selections() {
                for name in &selection.products {
                    let product = catalog.get(name.as_str()).unwrap();
                    prop_assert!(product.moment().applies_to(selection.slot));
                }
            }
        }

        #[test]
        fn prop_dry_air_orders_rich_before_light_within_category(
            catalog in arb_catalog(),
            uv in 0.0f64..15.0,
            humidity in 0.0f64..44.99,
            pm25 in 0.0f64..100.0,
        ) {
            let routine = decide(&catalog, &env(uv, humidity, pm25));
            for selection in routine.selections() {
                let products: Vec<&Product> = selection
                    .products
                    .iter()
                    .map(|n| catalog.get(n.as_str()).unwrap())
                    .collect();
                for (i, earlier) in products.iter().enumerate() {
                    for later in &products[i + 1..] {
                        if earlier.category() == later.category() {
                            let earlier_rich = earlier.occlusivity().value() >= HIGH_OCCLUSIVITY;
                            let later_rich = later.occlusivity().value() >= HIGH_OCCLUSIVITY;
                            prop_assert!(earlier_rich || !later_rich);
                        }
                    }
                }
            }
        }

        #[test]
        fn prop_humid_air_excludes_light_non_cleansers(
            catalog in arb_catalog(),
            uv in 0.0f64..15.0,
            humidity in 70.01f64..=100.0,
            pm25 in 0.0f64..100.0,
        ) {
            let routine = decide(&catalog, &env(uv, humidity, pm25));
            for selection in routine.selections() {
                for name in &selection.products {
                    let product = catalog.get(name.as_str()).unwrap();
                    prop_assert!(product.is_cleanser() || product.occlusivity().value() > LOW_OCCLUSIVITY);
                }
            }
        }

        #[test]
        fn prop_polluted_evening_keeps_earliest_strongest_cleanser(
            catalog in arb_catalog(),
            humidity in 0.0f64..=100.0,
            pm25 in 25.01f64..200.0,
        ) {
            let environment = env(0.0, humidity, pm25);
            let routine = decide(&catalog, &environment);

            // Candidates surviving the earlier stages, in catalog order.
            let candidates: Vec<&Product> = catalog
                .iter()
                .filter(|p| p.moment().applies_to(RoutineSlot::Evening))
                .filter(|p| p.is_cleanser())
                .collect();

            let chosen: Vec<&Product> = routine
                .evening
                .products
                .iter()
                .map(|n| catalog.get(n.as_str()).unwrap())
                .filter(|p| p.is_cleanser())
                .collect();

            if candidates.is_empty() {
                prop_assert!(chosen.is_empty());
            } else {
                let max = candidates.iter().map(|p| p.cleansing_power()).max().unwrap();
                let expected = candidates.iter().find(|p| p.cleansing_power() == max).unwrap();
                prop_assert_eq!(chosen.len(), 1);
                prop_assert_eq!(chosen[0].name(), expected.name());
            }
        }
    }
}
