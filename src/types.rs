//! Type-safe option types for the quote engine
//!
//! Every option a visitor can pick in the builder form is a proper Rust enum,
//! so rule tables can be keyed by them and matches stay exhaustive.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Kind of site being quoted.
///
/// Declaration order is significant: it is the ordinal rank used for
/// complexity scoring, independent of what each type costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SiteType {
    #[default]
    Landing,
    Corporate,
    Store,
    Webapp,
}

impl SiteType {
    /// Zero-based position in the declaration order.
    pub fn ordinal_rank(self) -> u32 {
        SiteType::iter().position(|t| t == self).unwrap_or(0) as u32
    }
}

/// Design tier selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DesignTier {
    #[default]
    Template,
    Unique,
}

/// Coarse package classification of a quote.
///
/// Variants are ordered from cheapest to most involved, so `Ord` can be used
/// to compare tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize, Display, EnumString, EnumIter)]
pub enum PackageTier {
    #[default]
    Econom,
    Standard,
    Plus,
    Pro,
}

impl PackageTier {
    /// Plus and Pro packages show the discount hint next to the price.
    pub fn shows_discount_hint(self) -> bool {
        matches!(self, Self::Plus | Self::Pro)
    }
}

/// Display language for formatted quote strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    #[default]
    Uk,
    En,
}
