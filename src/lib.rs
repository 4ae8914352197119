//! sitequote Library
//!
//! Pricing engine behind a site-builder configurator plus the dream-site
//! lead-qualification quiz. Rule tables are plain values loaded from JSON or
//! taken from the built-in defaults; nothing here keeps global state.

pub mod catalog;
pub mod cli;
pub mod engine;
pub mod error;
pub mod format;
pub mod lead;
pub mod logic;
pub mod quiz;
pub mod selection;
pub mod types;

// Re-export main types for convenience
pub use catalog::{DesignSurcharge, ModuleRule, PricingConstants, RuleTable, SiteTypeRule, TierRule};
pub use error::{Result, SiteQuoteError};
pub use selection::{FieldId, Selection, SelectionChange, SelectionTracker};
pub use types::{DesignTier, Locale, PackageTier, SiteType};

// Pricing core
pub use engine::quote::{classify_package, compute_quote, round_up_days, Quote};
pub use format::{summary_labels, DisplayStrings, SummaryLabels};

// Recalculation controller
pub use logic::recalc::{BuilderSession, Recalculation, Recalculator, SessionUpdate};

// Quiz and leads
pub use lead::{submission_path, BuilderLead, QuizContacts, QuizLead};
pub use quiz::catalog::{PriceRange, QuizCatalog, QuizOption, QuizPricing};
pub use quiz::pricing::PriceBand;
pub use quiz::{Answer, Proposal, QuizAnswers, QuizProgress, QuizSession, QuizStep};
