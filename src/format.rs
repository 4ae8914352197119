//! Quote presentation strings.
//!
//! Turns a [`Quote`] into the four summary lines shown under the builder
//! form, in Ukrainian or English. The numbers are printed exactly as the
//! calculator produced them; nothing is re-rounded here.

use serde::Serialize;

use crate::engine::quote::Quote;
use crate::types::Locale;

/// Formatted summary of a quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayStrings {
    pub package: String,
    pub pages: String,
    pub term: String,
    pub price: String,
    /// Show the "ask about discounts" hint next to the price.
    pub discount_hint: bool,
}

/// Static labels around the summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLabels {
    pub package: &'static str,
    pub pages: &'static str,
    pub timeline: &'static str,
    pub price: &'static str,
    pub send_request: &'static str,
}

struct Vocabulary {
    one_page: &'static str,
    up_to: &'static str,
    pages: &'static str,
    from: &'static str,
    days: &'static str,
    currency: &'static str,
    labels: SummaryLabels,
}

const UK: Vocabulary = Vocabulary {
    one_page: "1 сторінка",
    up_to: "до",
    pages: "сторінок",
    from: "від",
    days: "днів",
    currency: "$",
    labels: SummaryLabels {
        package: "Пакет:",
        pages: "Сторінок:",
        timeline: "Термін:",
        price: "Ціна:",
        send_request: "Надіслати запит",
    },
};

const EN: Vocabulary = Vocabulary {
    one_page: "1 page",
    up_to: "up to",
    pages: "pages",
    from: "from",
    days: "days",
    currency: "$",
    labels: SummaryLabels {
        package: "Package:",
        pages: "Pages:",
        timeline: "Timeline:",
        price: "Price:",
        send_request: "Send Request",
    },
};

fn vocabulary(locale: Locale) -> &'static Vocabulary {
    match locale {
        Locale::Uk => &UK,
        Locale::En => &EN,
    }
}

/// Format a quote for display.
pub fn format(quote: &Quote, page_count: u32, locale: Locale) -> DisplayStrings {
    let words = vocabulary(locale);

    let pages = if page_count == 1 {
        words.one_page.to_string()
    } else {
        format!("{} {} {}", words.up_to, page_count, words.pages)
    };

    DisplayStrings {
        package: quote.package.to_string(),
        pages,
        term: format!("{} {} {}", words.from, quote.total_term_days, words.days),
        price: format!("{} {} {}", words.from, quote.total_price, words.currency),
        discount_hint: quote.package.shows_discount_hint(),
    }
}

/// Labels for the summary block in the given locale.
pub fn summary_labels(locale: Locale) -> SummaryLabels {
    vocabulary(locale).labels
}
