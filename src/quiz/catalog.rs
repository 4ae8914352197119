//! Quiz option tables and pricing model.
//!
//! Each wizard step lists its options with a display label, a price
//! contribution and the feature bullets it adds to the proposal. Two pricing
//! models exist side by side:
//!
//! - [`QuizPricing::Spread`]: point prices summed, floored at a minimum, shown
//!   as `total ± spread`.
//! - [`QuizPricing::Banded`]: every option carries a `{min, max}` pair; the two
//!   sums are clamped to a band and snapped to end in 9.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use strum::IntoEnumIterator;

use super::QuizStep;
use crate::error::SiteQuoteError;

/// Additive `{min, max}` price contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

impl PriceRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// A single price, used by the spread model.
    pub const fn point(value: i64) -> Self {
        Self::new(value, value)
    }

    pub fn add(self, other: PriceRange) -> PriceRange {
        PriceRange::new(
            self.min.saturating_add(other.min),
            self.max.saturating_add(other.max),
        )
    }

    pub fn is_point(&self) -> bool {
        self.min == self.max
    }
}

/// One selectable answer of a quiz step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub label: String,
    #[serde(default)]
    pub price: PriceRange,
    /// Bullets added to the proposal when this option is picked.
    #[serde(default)]
    pub features: Vec<String>,
}

impl QuizOption {
    fn new(label: &str, price: PriceRange, features: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            price,
            features: features.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// How summed contributions become the displayed band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum QuizPricing {
    /// `[max(total, minimum) - spread, max(total, minimum) + spread]`
    Spread { spread: i64, minimum: i64 },
    /// Each bound clamped to `[floor, ceiling]`, then snapped to end in 9.
    Banded { floor: i64, ceiling: i64 },
}

/// Complete quiz configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCatalog {
    pub version: String,
    pub options: BTreeMap<QuizStep, BTreeMap<String, QuizOption>>,
    /// Base price when the site type is missing or unknown.
    pub default_site_price: PriceRange,
    /// Bullets every proposal starts with.
    pub base_features: Vec<String>,
    /// Maximum number of bullets in a proposal.
    pub feature_limit: usize,
    pub pricing: QuizPricing,
}

type StepTable = BTreeMap<String, QuizOption>;

fn step_table(entries: Vec<(&str, QuizOption)>) -> StepTable {
    entries
        .into_iter()
        .map(|(id, option)| (id.to_string(), option))
        .collect()
}

fn client_sources(prices: [PriceRange; 5]) -> StepTable {
    let [instagram, tiktok, google, other_ads, no_matter] = prices;
    step_table(vec![
        ("instagram", QuizOption::new("Instagram", instagram, &[])),
        ("tiktok", QuizOption::new("TikTok", tiktok, &[])),
        ("google", QuizOption::new("Google", google, &[])),
        ("other-ads", QuizOption::new("Інша реклама", other_ads, &[])),
        ("no-matter", QuizOption::new("Не має значення", no_matter, &[])),
    ])
}

fn design_styles(prices: [PriceRange; 4]) -> StepTable {
    let [minimalist, modern, classic, creative] = prices;
    step_table(vec![
        (
            "minimalist",
            QuizOption::new("Мінімалістичний", minimalist, &["Чистий дизайн", "Фокус на контенті"]),
        ),
        (
            "modern",
            QuizOption::new("Сучасний", modern, &["Сучасні анімації", "Градієнти та ефекти"]),
        ),
        (
            "classic",
            QuizOption::new("Класичний", classic, &["Професійний вигляд", "Корпоративні кольори"]),
        ),
        (
            "creative",
            QuizOption::new("Креативний", creative, &["Унікальний дизайн", "Нестандартні рішення"]),
        ),
    ])
}

fn base_features() -> Vec<String> {
    [
        "Адаптивний дизайн під всі пристрої",
        "Швидкість завантаження менше 3 секунд",
        "SEO-оптимізація",
        "Інтеграція з соціальними мережами",
    ]
    .iter()
    .map(|f| f.to_string())
    .collect()
}

impl QuizCatalog {
    /// First quiz revision: point prices, ±50 band, minimum 150.
    pub fn dream_site_default() -> Self {
        let p = PriceRange::point;
        let options = BTreeMap::from([
            (
                QuizStep::SiteType,
                step_table(vec![
                    ("landing", QuizOption::new("Landing page", p(200), &["Конверсійний дизайн", "A/B тестування форм"])),
                    ("online-store", QuizOption::new("Інтернет-магазин", p(350), &["Каталог товарів", "Система оплати", "Управління замовленнями"])),
                    ("corporate", QuizOption::new("Корпоративний сайт", p(300), &["Багатосторінкова структура", "Корпоративний блог", "Команда та контакти"])),
                    ("webapp", QuizOption::new("Веб-додаток", p(650), &["Складна логіка", "Особливий функціонал", "API інтеграції"])),
                ]),
            ),
            (QuizStep::ClientSource, client_sources([p(0); 5])),
            (
                QuizStep::SpecialFeatures,
                step_table(vec![
                    ("basic", QuizOption::new("Базовий функціонал", p(0), &["Контактна форма", "Галерея зображень"])),
                    ("online-booking", QuizOption::new("Онлайн-запис", p(100), &["Система бронювання", "Календар записів"])),
                    ("payment", QuizOption::new("Приймання платежів", p(150), &["Онлайн оплата", "Корзина покупок"])),
                    ("automation", QuizOption::new("Автоматизація", p(200), &["CRM інтеграція", "Автоматичні розсилки"])),
                    ("advanced", QuizOption::new("Складний функціонал", p(300), &["Калькулятори", "API інтеграції", "Складна логіка"])),
                ]),
            ),
            (QuizStep::DesignStyle, design_styles([p(0); 4])),
            (
                QuizStep::Timeline,
                step_table(vec![
                    ("asap", QuizOption::new("Якнайшвидше (2-3 дні)", p(150), &[])),
                    ("week", QuizOption::new("Протягом тижня", p(0), &[])),
                    ("month", QuizOption::new("Протягом місяця", p(-50), &[])),
                    ("no-rush", QuizOption::new("Не поспішаю", p(-100), &[])),
                ]),
            ),
        ]);

        Self {
            version: "dream-site-spread".to_string(),
            options,
            default_site_price: p(300),
            base_features: base_features(),
            feature_limit: 8,
            pricing: QuizPricing::Spread {
                spread: 50,
                minimum: 150,
            },
        }
    }

    /// Later quiz revision: `{min, max}` contributions inside a 299–499 band.
    pub fn dream_site_banded() -> Self {
        let r = PriceRange::new;
        let options = BTreeMap::from([
            (
                QuizStep::SiteType,
                step_table(vec![
                    ("landing", QuizOption::new("Landing page", r(199, 299), &["Конверсійний дизайн", "A/B тестування форм"])),
                    ("online-store", QuizOption::new("Інтернет-магазин", r(299, 399), &["Каталог товарів", "Система оплати", "Управління замовленнями"])),
                    ("corporate", QuizOption::new("Корпоративний сайт", r(249, 349), &["Багатосторінкова структура", "Корпоративний блог", "Команда та контакти"])),
                    ("webapp", QuizOption::new("Веб-додаток", r(349, 449), &["Складна логіка", "Особливий функціонал", "API інтеграції"])),
                ]),
            ),
            (
                QuizStep::ClientSource,
                client_sources([r(10, 20), r(10, 20), r(20, 40), r(10, 20), r(0, 0)]),
            ),
            (
                QuizStep::SpecialFeatures,
                step_table(vec![
                    ("basic", QuizOption::new("Базовий функціонал", r(0, 0), &["Контактна форма", "Галерея зображень"])),
                    ("online-booking", QuizOption::new("Онлайн-запис", r(30, 60), &["Система бронювання", "Календар записів"])),
                    ("payment", QuizOption::new("Приймання платежів", r(50, 90), &["Онлайн оплата", "Корзина покупок"])),
                    ("automation", QuizOption::new("Автоматизація", r(60, 120), &["CRM інтеграція", "Автоматичні розсилки"])),
                    ("advanced", QuizOption::new("Складний функціонал", r(100, 200), &["Калькулятори", "API інтеграції", "Складна логіка"])),
                ]),
            ),
            (
                QuizStep::DesignStyle,
                design_styles([r(0, 0), r(20, 40), r(0, 20), r(40, 80)]),
            ),
            (
                QuizStep::Timeline,
                step_table(vec![
                    ("asap", QuizOption::new("Якнайшвидше (2-3 дні)", r(50, 100), &[])),
                    ("week", QuizOption::new("Протягом тижня", r(0, 0), &[])),
                    ("month", QuizOption::new("Протягом місяця", r(-20, -10), &[])),
                    ("no-rush", QuizOption::new("Не поспішаю", r(-40, -20), &[])),
                ]),
            ),
        ]);

        Self {
            version: "dream-site-banded".to_string(),
            options,
            default_site_price: r(249, 349),
            base_features: base_features(),
            feature_limit: 3,
            pricing: QuizPricing::Banded {
                floor: 299,
                ceiling: 499,
            },
        }
    }

    /// Options of one step, empty if the catalog has none.
    pub fn step_options(&self, step: QuizStep) -> impl Iterator<Item = (&String, &QuizOption)> {
        self.options.get(&step).into_iter().flat_map(|table| table.iter())
    }

    pub fn option(&self, step: QuizStep, id: &str) -> Option<&QuizOption> {
        self.options.get(&step).and_then(|table| table.get(id))
    }

    /// Display label of an option, or the raw id when it is unknown.
    pub fn label<'a>(&'a self, step: QuizStep, id: &'a str) -> &'a str {
        self.option(step, id)
            .map(|option| option.label.as_str())
            .unwrap_or(id)
    }

    /// Save the catalog to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize quiz catalog to JSON")?;

        fs::write(&path, json)
            .map_err(SiteQuoteError::from)
            .with_context(|| format!("Failed to write quiz catalog to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load a catalog from a JSON file and validate it
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .map_err(SiteQuoteError::from)
            .with_context(|| format!("Failed to read quiz catalog from {:?}", path.as_ref()))?;

        let catalog: Self =
            serde_json::from_str(&content).context("Failed to parse quiz catalog JSON")?;
        catalog.validate()?;

        tracing::info!(version = %catalog.version, "Loaded quiz catalog from {:?}", path.as_ref());
        Ok(catalog)
    }

    /// Check the catalog for internal consistency.
    pub fn validate(&self) -> crate::error::Result<()> {
        for step in QuizStep::iter() {
            let has_options = self
                .options
                .get(&step)
                .is_some_and(|table| !table.is_empty());
            if !has_options {
                return Err(SiteQuoteError::catalog(format!(
                    "quiz step '{}' has no options",
                    step
                )));
            }
        }

        if self.feature_limit == 0 {
            return Err(SiteQuoteError::catalog("feature limit must be at least 1"));
        }

        let ranges = self
            .options
            .iter()
            .flat_map(|(step, table)| {
                table
                    .iter()
                    .map(move |(id, option)| (format!("{}/{}", step, id), option.price))
            })
            .chain([("default site price".to_string(), self.default_site_price)]);

        for (name, range) in ranges {
            if range.min > range.max {
                return Err(SiteQuoteError::catalog(format!(
                    "{}: min {} is above max {}",
                    name, range.min, range.max
                )));
            }
            if matches!(self.pricing, QuizPricing::Spread { .. }) && !range.is_point() {
                return Err(SiteQuoteError::catalog(format!(
                    "{}: spread pricing needs a single price, got {}..{}",
                    name, range.min, range.max
                )));
            }
        }

        match self.pricing {
            QuizPricing::Spread { spread, .. } if spread < 0 => {
                Err(SiteQuoteError::catalog("spread must not be negative"))
            }
            QuizPricing::Banded { floor, ceiling } if floor > ceiling => Err(
                SiteQuoteError::catalog(format!("band floor {} is above ceiling {}", floor, ceiling)),
            ),
            _ => Ok(()),
        }
    }
}
