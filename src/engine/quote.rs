//! Quote Calculator
//!
//! Combines a [`Selection`] with a [`RuleTable`] into a [`Quote`]: total price,
//! delivery term, complexity score and package tier.
//!
//! # Calculation Order
//!
//! | Step | Price | Term | Complexity |
//! |------|-------|------|------------|
//! | Site type | base price | base term | rank + 1 |
//! | Each module | module price | module term (default 1) | +1 |
//! | Extra pages | pages over included × page price | × per-page term | - |
//! | Unique design | flat + (pages − 1) × page surcharge | design term | +2 |
//! | Multilingual | (pages − 1) × translation surcharge | - | - |
//!
//! The term is rounded up to whole days after all contributions are summed,
//! then the package is classified from the ordered tier rules.
//!
//! # Design
//!
//! - **Total**: every reachable selection yields a quote. Unset fields fall
//!   back to the table's first site type and the template design.
//! - **Pure**: no I/O, callable synchronously from any event handler.
//! - **Saturating**: huge page counts clamp at the integer limit instead of
//!   overflowing.

use serde::{Deserialize, Serialize};

use crate::catalog::{RuleTable, TierRule, MULTILINGUAL_MODULE};
use crate::selection::Selection;
use crate::types::{DesignTier, PackageTier};

/// Result of one calculation. Recomputed wholesale on every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    pub total_price: u64,
    pub total_term_days: u32,
    pub complexity: u32,
    pub package: PackageTier,
}

/// Calculate the quote for a selection against a rule table.
pub fn compute_quote(selection: &Selection, table: &RuleTable) -> Quote {
    let site_type = selection
        .site_type
        .unwrap_or_else(|| table.first_site_type());
    let site = table.site_rule(site_type);
    let pages = u64::from(selection.page_count());

    let mut price: u64 = 0;
    let mut term: f64 = 0.0;
    let mut complexity: u32 = 0;

    // 1. Site type base figures
    price = price.saturating_add(site.base_price);
    term += f64::from(site.base_term_days);
    complexity = complexity.saturating_add(site_type.ordinal_rank() + 1);

    // 2. Modules
    let mut multilingual = false;
    for module_id in &selection.modules {
        let rule = table.module_rule(module_id);
        price = price.saturating_add(rule.price);
        term += rule.term_days;
        complexity = complexity.saturating_add(1);
        multilingual |= module_id == MULTILINGUAL_MODULE;
    }

    // 3. Pages beyond the ones included in the base price
    let extra_pages = pages.saturating_sub(u64::from(site.included_pages));
    if extra_pages > 0 {
        price = price.saturating_add(extra_pages.saturating_mul(table.pricing.per_extra_page_price));
        term += extra_pages as f64 * table.pricing.term_days_per_extra_page;
    }

    // 4. Unique design
    if selection.design_or_default() == DesignTier::Unique {
        let design = &table.unique_design;
        if pages >= 1 {
            price = price.saturating_add(design.flat_surcharge);
        }
        if pages > 1 {
            price = price.saturating_add((pages - 1).saturating_mul(design.page_surcharge));
        }
        term += design.term_days;
        complexity = complexity.saturating_add(design.complexity);
    }

    // 5. Multilingual, stacked on top of the design surcharge
    if multilingual && pages > 1 {
        price = price.saturating_add(
            (pages - 1).saturating_mul(table.pricing.multilingual_page_surcharge),
        );
    }

    let total_price = price.max(table.pricing.minimum_price);
    let total_term_days = round_up_days(term);
    let package = classify_package(&table.tiers, total_price, complexity);

    tracing::debug!(
        %site_type,
        pages,
        modules = selection.modules.len(),
        total_price,
        total_term_days,
        complexity,
        %package,
        "Computed quote"
    );

    Quote {
        total_price,
        total_term_days,
        complexity,
        package,
    }
}

/// First matching rule wins; nothing matching means Econom.
pub fn classify_package(tiers: &[TierRule], price: u64, complexity: u32) -> PackageTier {
    tiers
        .iter()
        .find(|rule| rule.matches(price, complexity))
        .map(|rule| rule.package)
        .unwrap_or(PackageTier::Econom)
}

/// Ceiling of an accumulated term, in whole days.
///
/// Float noise below a millionth of a day is dropped first so that sums like
/// 0.1 + 0.2 + 0.7 land on 1 and not 2.
pub fn round_up_days(term: f64) -> u32 {
    if !term.is_finite() || term <= 0.0 {
        return 0;
    }
    let snapped = (term * 1e6).round() / 1e6;
    snapped.ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ModuleRule;
    use crate::types::SiteType;

    fn table() -> RuleTable {
        RuleTable::builder_default()
    }

    #[test]
    fn test_landing_template_single_page() {
        let selection = Selection::new(SiteType::Landing, 1);
        let quote = compute_quote(&selection, &table());

        assert_eq!(quote.total_price, 100);
        assert_eq!(quote.total_term_days, 3);
        assert_eq!(quote.complexity, 1);
        assert_eq!(quote.package, PackageTier::Econom);
    }

    #[test]
    fn test_landing_unique_three_pages() {
        let selection = Selection::new(SiteType::Landing, 3).with_design(DesignTier::Unique);
        let quote = compute_quote(&selection, &table());

        // 100 base + 2 extra pages × 50 + 100 flat + 2 × 20 per page
        assert_eq!(quote.total_price, 100 + 100 + 100 + 40);
        assert_eq!(quote.total_term_days, 3 + 3);
        assert_eq!(quote.complexity, 3);
        assert_eq!(quote.package, PackageTier::Standard);
    }

    #[test]
    fn test_no_modules_template_prices_at_base() {
        for site_type in [SiteType::Corporate, SiteType::Store, SiteType::Webapp] {
            let t = table();
            let rule = t.site_rule(site_type);
            let selection = Selection::new(site_type, rule.included_pages);
            let quote = compute_quote(&selection, &t);
            assert_eq!(quote.total_price, rule.base_price);
            assert_eq!(quote.total_term_days, rule.base_term_days);
            assert_eq!(quote.complexity, site_type.ordinal_rank() + 1);
        }
    }

    #[test]
    fn test_pages_below_included_are_not_negative() {
        let selection = Selection::new(SiteType::Store, 2);
        let quote = compute_quote(&selection, &table());
        assert_eq!(quote.total_price, 400);
    }

    #[test]
    fn test_ten_modules_force_pro() {
        let t = table();
        let mut selection = Selection::new(SiteType::Landing, 1);
        for id in t.modules.keys().filter(|id| t.modules[*id].price <= 50).take(4) {
            selection.modules.insert(id.clone());
        }
        for i in 0..6 {
            selection.modules.insert(format!("custom_{}", i));
        }
        assert_eq!(selection.modules.len(), 10);

        let quote = compute_quote(&selection, &t);
        assert!(quote.complexity >= 10);
        assert!(quote.total_price <= 2500);
        assert_eq!(quote.package, PackageTier::Pro);
    }

    #[test]
    fn test_multilingual_stacks_with_unique_design() {
        let selection = Selection::new(SiteType::Corporate, 4)
            .with_design(DesignTier::Unique)
            .with_module(MULTILINGUAL_MODULE);
        let quote = compute_quote(&selection, &table());

        // 400 base + 150 module + 1 extra page × 50 + 100 flat + 3 × 20 + 3 × 30
        assert_eq!(quote.total_price, 400 + 150 + 50 + 100 + 60 + 90);
        assert_eq!(quote.total_term_days, 7 + 2 + 3);
        assert_eq!(quote.complexity, 2 + 1 + 2);
        assert_eq!(quote.package, PackageTier::Standard);
    }

    #[test]
    fn test_multilingual_single_page_has_no_surcharge() {
        let selection = Selection::new(SiteType::Landing, 1).with_module(MULTILINGUAL_MODULE);
        let quote = compute_quote(&selection, &table());
        assert_eq!(quote.total_price, 100 + 150);
    }

    #[test]
    fn test_unset_fields_fall_back_to_defaults() {
        let quote = compute_quote(&Selection::default(), &table());
        assert_eq!(quote, compute_quote(&Selection::new(SiteType::Landing, 1), &table()));
    }

    #[test]
    fn test_unknown_module_uses_fallback_rule() {
        let selection = Selection::new(SiteType::Landing, 1).with_module("hologram");
        let quote = compute_quote(&selection, &table());
        assert_eq!(quote.total_price, 150);
        assert_eq!(quote.total_term_days, 4);
        assert_eq!(quote.complexity, 2);
    }

    #[test]
    fn test_fractional_terms_round_up() {
        let selection = Selection::new(SiteType::Landing, 1).with_module("map");
        let quote = compute_quote(&selection, &table());
        assert_eq!(quote.total_term_days, 4); // 3 + 0.5

        let selection = selection.with_module("animations");
        let quote = compute_quote(&selection, &table());
        assert_eq!(quote.total_term_days, 5); // 3 + 0.5 + 1.5
    }

    #[test]
    fn test_half_day_per_page_variant() {
        let mut t = table();
        t.pricing.term_days_per_extra_page = 0.5;
        let quote = compute_quote(&Selection::new(SiteType::Landing, 2), &t);
        assert_eq!(quote.total_term_days, 4); // 3 + 0.5 rounded up

        let quote = compute_quote(&Selection::new(SiteType::Landing, 3), &t);
        assert_eq!(quote.total_term_days, 4); // 3 + 1.0
    }

    #[test]
    fn test_minimum_price_floor() {
        let mut t = table();
        t.pricing.minimum_price = 250;
        let quote = compute_quote(&Selection::new(SiteType::Landing, 1), &t);
        assert_eq!(quote.total_price, 250);
    }

    #[test]
    fn test_huge_page_count_saturates() {
        let selection = Selection::new(SiteType::Webapp, u32::MAX).with_design(DesignTier::Unique);
        let quote = compute_quote(&selection, &table());
        assert!(quote.total_price > 1_000_000);
        assert_eq!(quote.package, PackageTier::Pro);
    }

    #[test]
    fn test_zero_price_module() {
        let mut t = table();
        t.modules.insert("free".into(), ModuleRule::new(0, 0.0, false));
        let selection = Selection::new(SiteType::Landing, 1).with_module("free");
        let quote = compute_quote(&selection, &t);
        assert_eq!(quote.total_price, 100);
        assert_eq!(quote.total_term_days, 3);
        assert_eq!(quote.complexity, 2);
    }

    #[test]
    fn test_classify_pro_checked_first() {
        let tiers = table().tiers;
        // Complexity satisfies Standard and price satisfies Pro
        assert_eq!(classify_package(&tiers, 2600, 3), PackageTier::Pro);
        // Complexity satisfies Pro, price only Standard
        assert_eq!(classify_package(&tiers, 900, 10), PackageTier::Pro);
        assert_eq!(classify_package(&tiers, 1501, 0), PackageTier::Plus);
        assert_eq!(classify_package(&tiers, 801, 0), PackageTier::Standard);
        assert_eq!(classify_package(&tiers, 800, 2), PackageTier::Econom);
    }

    #[test]
    fn test_classify_boundaries_are_strict_for_price() {
        let tiers = table().tiers;
        assert_eq!(classify_package(&tiers, 2500, 0), PackageTier::Plus);
        assert_eq!(classify_package(&tiers, 1500, 0), PackageTier::Standard);
        assert_eq!(classify_package(&tiers, 0, 6), PackageTier::Plus);
    }

    #[test]
    fn test_classify_empty_rules_is_econom() {
        assert_eq!(classify_package(&[], 100_000, 100), PackageTier::Econom);
    }

    #[test]
    fn test_round_up_days() {
        assert_eq!(round_up_days(0.0), 0);
        assert_eq!(round_up_days(-2.0), 0);
        assert_eq!(round_up_days(3.0), 3);
        assert_eq!(round_up_days(3.01), 4);
        assert_eq!(round_up_days(0.1 + 0.2 + 0.7), 1);
        assert_eq!(round_up_days(f64::NAN), 0);
    }

    #[test]
    fn test_deterministic() {
        let selection = Selection::new(SiteType::Store, 9)
            .with_design(DesignTier::Unique)
            .with_module("gallery")
            .with_module("payment_card");
        let t = table();
        assert_eq!(compute_quote(&selection, &t), compute_quote(&selection, &t));
    }
}
