//! Pricing rule table for the site builder.
//!
//! The rule table is plain configuration: site-type base figures, add-on
//! modules, design surcharges, per-page constants and the ordered tier rules.
//! It is always passed explicitly to the calculator so that several tables
//! (builder, quiz, historical revisions under test) can coexist.
//!
//! Tables are stored as JSON and loaded with [`RuleTable::load_from_file`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use strum::IntoEnumIterator;

use crate::error::SiteQuoteError;
use crate::selection::Selection;
use crate::types::{PackageTier, SiteType};

/// Module id whose presence adds a per-page translation surcharge.
pub const MULTILINGUAL_MODULE: &str = "multilingual";

/// Base figures for one site type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteTypeRule {
    pub base_price: u64,
    pub base_term_days: u32,
    /// Pages covered by `base_price`; also the page-count floor after a type switch.
    pub included_pages: u32,
}

impl SiteTypeRule {
    /// Contribution used when a table lacks a rule for the chosen site type.
    pub const EMPTY: SiteTypeRule = SiteTypeRule {
        base_price: 0,
        base_term_days: 0,
        included_pages: 1,
    };
}

/// Add-on module pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRule {
    pub price: u64,
    /// Days added to the term. May be fractional; the total is rounded up.
    #[serde(default = "default_module_term_days")]
    pub term_days: f64,
    /// Whether toggling the module changes the site preview.
    #[serde(default = "default_visual")]
    pub visual: bool,
}

fn default_module_term_days() -> f64 {
    1.0
}

fn default_visual() -> bool {
    true
}

impl ModuleRule {
    pub fn new(price: u64, term_days: f64, visual: bool) -> Self {
        Self {
            price,
            term_days,
            visual,
        }
    }
}

impl Default for ModuleRule {
    /// Defaults for a module with no explicit rule: 50, one day, visual.
    fn default() -> Self {
        Self::new(50, default_module_term_days(), default_visual())
    }
}

/// Surcharges applied when the unique design tier is chosen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSurcharge {
    /// Added once as soon as there is at least one page.
    pub flat_surcharge: u64,
    /// Added for every page after the first.
    pub page_surcharge: u64,
    pub term_days: f64,
    pub complexity: u32,
}

/// Catalog-wide per-page and floor constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConstants {
    /// Price of each page beyond the site type's included pages.
    pub per_extra_page_price: u64,
    /// Per-page surcharge (after the first page) when the multilingual module is on.
    pub multilingual_page_surcharge: u64,
    /// Term added per extra page. Zero in the live table; some revisions use 0.5.
    #[serde(default)]
    pub term_days_per_extra_page: f64,
    /// Lowest total price a quote may show.
    #[serde(default)]
    pub minimum_price: u64,
}

/// One entry of the ordered package classification.
///
/// A rule matches when either threshold is reached; the first matching rule
/// in table order decides the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRule {
    pub package: PackageTier,
    pub min_complexity: u32,
    /// Strict lower bound: the rule matches when the price is above this.
    pub price_above: u64,
}

impl TierRule {
    pub fn matches(&self, price: u64, complexity: u32) -> bool {
        complexity >= self.min_complexity || price > self.price_above
    }
}

/// Complete builder rule table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    /// Free-form label distinguishing table revisions.
    pub version: String,
    pub site_types: BTreeMap<SiteType, SiteTypeRule>,
    pub unique_design: DesignSurcharge,
    pub modules: BTreeMap<String, ModuleRule>,
    /// Rule applied to module ids the table does not list.
    #[serde(default)]
    pub fallback_module: ModuleRule,
    pub pricing: PricingConstants,
    /// Ordered from the highest package down; evaluated top to bottom.
    pub tiers: Vec<TierRule>,
}

impl RuleTable {
    /// The rule table behind the live site-builder page.
    pub fn builder_default() -> Self {
        let site_types = BTreeMap::from([
            (SiteType::Landing, site_rule(100, 3, 1)),
            (SiteType::Corporate, site_rule(400, 7, 3)),
            (SiteType::Store, site_rule(400, 7, 5)),
            (SiteType::Webapp, site_rule(1200, 21, 5)),
        ]);

        let modules = [
            // Functional modules: no effect on the preview
            ("blog", ModuleRule::new(150, 2.0, false)),
            ("portfolio", ModuleRule::new(100, 1.0, false)),
            ("calculator", ModuleRule::new(200, 2.0, false)),
            ("booking", ModuleRule::new(200, 2.0, false)),
            (MULTILINGUAL_MODULE, ModuleRule::new(150, 2.0, false)),
            ("forms_email", ModuleRule::new(50, 1.0, false)),
            ("forms_telegram", ModuleRule::new(50, 1.0, false)),
            ("theme_switcher", ModuleRule::new(50, 1.0, false)),
            ("payment_card", ModuleRule::new(200, 2.0, false)),
            ("payment_apple", ModuleRule::new(150, 1.0, false)),
            ("ai_support", ModuleRule::new(300, 3.0, false)),
            ("integrations", ModuleRule::new(250, 2.0, false)),
            // Visual modules: rebuild the preview
            ("gallery", ModuleRule::new(100, 1.0, true)),
            ("shop_catalog", ModuleRule::new(300, 3.0, true)),
            ("reviews", ModuleRule::new(50, 1.0, true)),
            ("map", ModuleRule::new(30, 0.5, true)),
            ("video", ModuleRule::new(80, 1.0, true)),
            ("animations", ModuleRule::new(150, 1.5, true)),
        ]
        .into_iter()
        .map(|(id, rule)| (id.to_string(), rule))
        .collect();

        Self {
            version: "builder-2024".to_string(),
            site_types,
            unique_design: DesignSurcharge {
                flat_surcharge: 100,
                page_surcharge: 20,
                term_days: 3.0,
                complexity: 2,
            },
            modules,
            fallback_module: ModuleRule::default(),
            pricing: PricingConstants {
                per_extra_page_price: 50,
                multilingual_page_surcharge: 30,
                term_days_per_extra_page: 0.0,
                minimum_price: 0,
            },
            tiers: vec![
                TierRule { package: PackageTier::Pro, min_complexity: 10, price_above: 2500 },
                TierRule { package: PackageTier::Plus, min_complexity: 6, price_above: 1500 },
                TierRule { package: PackageTier::Standard, min_complexity: 3, price_above: 800 },
            ],
        }
    }

    /// First site type of the table, used when nothing is selected yet.
    pub fn first_site_type(&self) -> SiteType {
        self.site_types.keys().next().copied().unwrap_or_default()
    }

    /// Rule for a site type, or [`SiteTypeRule::EMPTY`] if the table has none.
    pub fn site_rule(&self, site_type: SiteType) -> SiteTypeRule {
        self.site_types
            .get(&site_type)
            .copied()
            .unwrap_or(SiteTypeRule::EMPTY)
    }

    pub fn included_pages(&self, site_type: SiteType) -> u32 {
        self.site_rule(site_type).included_pages.max(1)
    }

    /// Rule for a module id, falling back to `fallback_module` for unknown ids.
    pub fn module_rule(&self, module_id: &str) -> &ModuleRule {
        self.modules.get(module_id).unwrap_or(&self.fallback_module)
    }

    pub fn is_visual_module(&self, module_id: &str) -> bool {
        self.module_rule(module_id).visual
    }

    /// Selection shown on first load: first site type, template design,
    /// page count at that type's floor, no modules.
    pub fn default_selection(&self) -> Selection {
        let site_type = self.first_site_type();
        Selection::new(site_type, self.included_pages(site_type))
    }

    /// Save the table to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize rule table to JSON")?;

        fs::write(&path, json)
            .map_err(SiteQuoteError::from)
            .with_context(|| format!("Failed to write rule table to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load a table from a JSON file and validate it
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .map_err(SiteQuoteError::from)
            .with_context(|| format!("Failed to read rule table from {:?}", path.as_ref()))?;

        let table = Self::from_json_str(&content)?;
        tracing::info!(version = %table.version, "Loaded rule table from {:?}", path.as_ref());
        Ok(table)
    }

    /// Parse and validate a table from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        let table: Self =
            serde_json::from_str(content).context("Failed to parse rule table JSON")?;
        table.validate()?;
        Ok(table)
    }

    /// Check the table for internal consistency.
    pub fn validate(&self) -> crate::error::Result<()> {
        for site_type in SiteType::iter() {
            let rule = self.site_types.get(&site_type).ok_or_else(|| {
                SiteQuoteError::catalog(format!("no rule for site type '{}'", site_type))
            })?;
            if rule.base_price == 0 {
                return Err(SiteQuoteError::catalog(format!(
                    "site type '{}' must have a positive base price",
                    site_type
                )));
            }
            if rule.base_term_days == 0 {
                return Err(SiteQuoteError::catalog(format!(
                    "site type '{}' must have a positive base term",
                    site_type
                )));
            }
            if rule.included_pages == 0 {
                return Err(SiteQuoteError::catalog(format!(
                    "site type '{}' must include at least one page",
                    site_type
                )));
            }
        }

        for (id, rule) in &self.modules {
            check_days(&format!("module '{}'", id), rule.term_days)?;
        }
        check_days("fallback module", self.fallback_module.term_days)?;
        check_days("unique design", self.unique_design.term_days)?;
        check_days("extra page", self.pricing.term_days_per_extra_page)?;

        if self.tiers.is_empty() {
            return Err(SiteQuoteError::catalog("tier list must not be empty"));
        }
        if self.tiers.iter().any(|rule| rule.package == PackageTier::Econom) {
            return Err(SiteQuoteError::catalog(
                "Econom is the fallback package and cannot have a tier rule",
            ));
        }
        if self
            .tiers
            .windows(2)
            .any(|pair| pair[0].package <= pair[1].package)
        {
            return Err(SiteQuoteError::catalog(
                "tier rules must be listed from the highest package down",
            ));
        }

        Ok(())
    }
}

fn site_rule(base_price: u64, base_term_days: u32, included_pages: u32) -> SiteTypeRule {
    SiteTypeRule {
        base_price,
        base_term_days,
        included_pages,
    }
}

/// Smallest term step a table may use, in days.
const TERM_RESOLUTION: f64 = 1e-6;

fn check_days(what: &str, days: f64) -> crate::error::Result<()> {
    if !days.is_finite() || days < 0.0 {
        return Err(SiteQuoteError::catalog(format!(
            "{} has an invalid term of {} days",
            what, days
        )));
    }
    // Terms are snapped to whole millionths of a day before rounding up
    let steps = days / TERM_RESOLUTION;
    if (steps - steps.round()).abs() > 1e-3 {
        return Err(SiteQuoteError::catalog(format!(
            "{} has a term of {} days, finer than a millionth of a day",
            what, days
        )));
    }
    Ok(())
}
