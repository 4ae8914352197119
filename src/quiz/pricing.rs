//! Quiz price band and proposal feature list.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use strum::IntoEnumIterator;

use super::catalog::{PriceRange, QuizCatalog, QuizPricing};
use super::{QuizAnswers, QuizStep};

/// Final `[min, max]` price shown on the proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBand {
    pub min: i64,
    pub max: i64,
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}-{}", self.min, self.max)
    }
}

/// Value ending in 9 within the same ten: 312 → 319, 499 → 499.
/// Saturates at the `i64` limits.
pub fn floor_to_nine(value: i64) -> i64 {
    value.div_euclid(10).saturating_mul(10).saturating_add(9)
}

/// Sum of all price contributions for the given answers.
///
/// The site type falls back to the catalog's default price when unanswered
/// or unknown. Other steps add nothing for unknown ids. Multi-valued answers
/// add every selected option.
pub fn modifier_total(answers: &QuizAnswers, catalog: &QuizCatalog) -> PriceRange {
    let site_price = answers
        .first(QuizStep::SiteType)
        .and_then(|id| catalog.option(QuizStep::SiteType, id))
        .map(|option| option.price)
        .unwrap_or(catalog.default_site_price);

    QuizStep::iter()
        .filter(|step| *step != QuizStep::SiteType)
        .flat_map(|step| {
            answers
                .values(step)
                .iter()
                .filter_map(move |id| catalog.option(step, id))
        })
        .fold(site_price, |total, option| total.add(option.price))
}

/// Price band for the answers under the catalog's pricing model.
pub fn price_band(answers: &QuizAnswers, catalog: &QuizCatalog) -> PriceBand {
    let total = modifier_total(answers, catalog);

    match catalog.pricing {
        QuizPricing::Spread { spread, minimum } => {
            let price = total.min.max(minimum);
            PriceBand {
                min: price.saturating_sub(spread),
                max: price.saturating_add(spread),
            }
        }
        QuizPricing::Banded { floor, ceiling } => {
            let bound = |value: i64| floor_to_nine(value.max(floor).min(ceiling));
            PriceBand {
                min: bound(total.min),
                max: bound(total.max),
            }
        }
    }
}

/// Proposal bullets: base features followed by every answered option's
/// features in step order, first occurrence kept, cut at the catalog limit.
pub fn feature_list(answers: &QuizAnswers, catalog: &QuizCatalog) -> Vec<String> {
    let selected = QuizStep::iter().flat_map(|step| {
        answers
            .values(step)
            .iter()
            .filter_map(move |id| catalog.option(step, id))
            .flat_map(|option| option.features.iter())
    });

    let mut seen = HashSet::new();
    catalog
        .base_features
        .iter()
        .chain(selected)
        .filter(|feature| seen.insert(feature.as_str()))
        .take(catalog.feature_limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Answer;

    fn answers(site: &str, features: &[&str], design: &str, timeline: &str) -> QuizAnswers {
        let mut answers = QuizAnswers::default();
        answers.set(QuizStep::SiteType, Answer::Single(site.into()));
        answers.set(
            QuizStep::SpecialFeatures,
            Answer::Multi(features.iter().map(|f| f.to_string()).collect()),
        );
        answers.set(QuizStep::DesignStyle, Answer::Single(design.into()));
        answers.set(QuizStep::Timeline, Answer::Single(timeline.into()));
        answers
    }

    #[test]
    fn test_floor_to_nine() {
        assert_eq!(floor_to_nine(299), 299);
        assert_eq!(floor_to_nine(300), 309);
        assert_eq!(floor_to_nine(312), 319);
        assert_eq!(floor_to_nine(499), 499);
        assert_eq!(floor_to_nine(0), 9);
        assert_eq!(floor_to_nine(-5), -1);
        assert_eq!(floor_to_nine(i64::MAX), i64::MAX);
        assert!(floor_to_nine(i64::MIN) < 0);
    }

    #[test]
    fn test_spread_band() {
        let catalog = QuizCatalog::dream_site_default();
        let band = price_band(&answers("online-store", &["payment"], "modern", "week"), &catalog);
        // 350 + 150
        assert_eq!(band, PriceBand { min: 450, max: 550 });
        assert_eq!(band.to_string(), "$450-550");
    }

    #[test]
    fn test_spread_minimum_price() {
        let catalog = QuizCatalog::dream_site_default();
        // 200 - 100 = 100, raised to 150
        let band = price_band(&answers("landing", &["basic"], "classic", "no-rush"), &catalog);
        assert_eq!(band, PriceBand { min: 100, max: 200 });
    }

    #[test]
    fn test_spread_extreme_minimum_saturates() {
        let mut catalog = QuizCatalog::dream_site_default();
        catalog.pricing = QuizPricing::Spread {
            spread: 50,
            minimum: i64::MAX,
        };
        assert!(catalog.validate().is_ok());

        let band = price_band(&QuizAnswers::default(), &catalog);
        assert_eq!(band, PriceBand { min: i64::MAX - 50, max: i64::MAX });
    }

    #[test]
    fn test_spread_unknown_site_type_uses_default() {
        let catalog = QuizCatalog::dream_site_default();
        let band = price_band(&answers("spaceship", &[], "modern", "week"), &catalog);
        assert_eq!(band, PriceBand { min: 250, max: 350 });

        let band = price_band(&QuizAnswers::default(), &catalog);
        assert_eq!(band, PriceBand { min: 250, max: 350 });
    }

    #[test]
    fn test_multi_valued_answers_sum() {
        let catalog = QuizCatalog::dream_site_default();
        let band = price_band(
            &answers("corporate", &["online-booking", "payment"], "modern", "asap"),
            &catalog,
        );
        // 300 + 100 + 150 + 150
        assert_eq!(band, PriceBand { min: 650, max: 750 });
    }

    #[test]
    fn test_banded_clamps_and_snaps() {
        let catalog = QuizCatalog::dream_site_banded();

        // landing 199..299 + week: min clamped up to the floor
        let band = price_band(&answers("landing", &["basic"], "minimalist", "week"), &catalog);
        assert_eq!(band, PriceBand { min: 299, max: 299 });

        // webapp 349..449 + advanced 100..200 + creative 40..80: max clamped to ceiling
        let band = price_band(&answers("webapp", &["advanced"], "creative", "week"), &catalog);
        assert_eq!(band, PriceBand { min: 489, max: 499 });
    }

    #[test]
    fn test_banded_same_base_different_modifiers() {
        let mut catalog = QuizCatalog::dream_site_banded();
        let corporate = catalog.option(QuizStep::SiteType, "corporate").unwrap().price;
        catalog
            .options
            .get_mut(&QuizStep::SiteType)
            .unwrap()
            .get_mut("online-store")
            .unwrap()
            .price = corporate;

        let plain = price_band(&answers("corporate", &["basic"], "minimalist", "week"), &catalog);
        let rich = price_band(
            &answers("online-store", &["payment"], "modern", "week"),
            &catalog,
        );

        assert_ne!(plain, rich);
        for band in [plain, rich] {
            assert!(band.min >= 299 && band.max <= 509);
            assert_eq!(band.min % 10, 9);
            assert_eq!(band.max % 10, 9);
        }
        // corporate 249..349 → 299 / 349
        assert_eq!(plain, PriceBand { min: 299, max: 349 });
        // 249 + 50 + 20 = 319, 349 + 90 + 40 = 479
        assert_eq!(rich, PriceBand { min: 319, max: 479 });
    }

    #[test]
    fn test_feature_list_dedup_and_limit() {
        let catalog = QuizCatalog::dream_site_default();
        let features = feature_list(
            &answers("webapp", &["advanced"], "modern", "week"),
            &catalog,
        );

        assert_eq!(features.len(), 8);
        assert_eq!(features[0], "Адаптивний дизайн під всі пристрої");
        assert_eq!(features[4], "Складна логіка");
        // "API інтеграції" and "Складна логіка" appear in both webapp and advanced
        let unique: HashSet<_> = features.iter().collect();
        assert_eq!(unique.len(), features.len());
    }

    #[test]
    fn test_feature_list_short_limit() {
        let catalog = QuizCatalog::dream_site_banded();
        let features = feature_list(&answers("landing", &["payment"], "modern", "week"), &catalog);
        assert_eq!(features.len(), 3);
        assert_eq!(features[2], "SEO-оптимізація");
    }

    #[test]
    fn test_feature_list_without_answers() {
        let catalog = QuizCatalog::dream_site_default();
        let features = feature_list(&QuizAnswers::default(), &catalog);
        assert_eq!(features, catalog.base_features);
    }
}
