//! Lead payloads
//!
//! Both the builder and the quiz end in a contact form. This module checks
//! the visitor's contact fields and assembles the JSON body posted to the
//! request endpoint. Sending it is left to the caller.

use serde::Serialize;

use crate::error::{Result, SiteQuoteError};
use crate::logic::recalc::BuilderSession;
use crate::quiz::{QuizSession, QuizStep};
use crate::types::Locale;
use strum::IntoEnumIterator;

/// Header carrying the CSRF token.
pub const CSRF_HEADER: &str = "X-CSRFToken";
/// Header marking the request as an AJAX call.
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";

/// Message used when the builder form's message field is left blank.
pub const DEFAULT_BUILDER_MESSAGE: &str = "Запит з конструктора сайту";

const QUIZ_MESSAGE_HEADING: &str = "Запит з конструктора сайту мрії:";

/// Endpoint path, with the page's language prefix when there is one.
///
/// Only a two-letter lowercase code counts as a language; anything else
/// falls back to the unprefixed path.
///
/// ```
/// use sitequote::lead::submission_path;
///
/// assert_eq!(submission_path(None), "/builder/request/");
/// assert_eq!(submission_path(Some("en")), "/en/builder/request/");
/// ```
pub fn submission_path(lang: Option<&str>) -> String {
    let is_language = |lang: &&str| lang.len() == 2 && lang.bytes().all(|b| b.is_ascii_lowercase());
    match lang.filter(is_language) {
        Some(lang) => format!("/{}/builder/request/", lang),
        None => "/builder/request/".to_string(),
    }
}

fn required(value: &str, field: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SiteQuoteError::validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

/// Request sent from the site builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuilderLead {
    pub name: String,
    pub contact_method: String,
    pub message: String,
    pub builder_site_type: String,
    pub builder_design: String,
    pub builder_pages: u32,
    pub builder_modules: String,
    pub builder_package: String,
    pub builder_price: String,
}

impl BuilderLead {
    /// Build the payload from the current builder state.
    ///
    /// Name and contact are trimmed and must not be empty. Package and price
    /// are the strings the visitor sees in `locale`.
    pub fn from_session(
        session: &BuilderSession,
        locale: Locale,
        name: &str,
        contact: &str,
        message: &str,
    ) -> Result<Self> {
        let name = required(name, "name")?;
        let contact_method = required(contact, "contact")?;
        let message = match message.trim() {
            "" => DEFAULT_BUILDER_MESSAGE.to_string(),
            text => text.to_string(),
        };

        let selection = session.selection();
        let display = session.display(locale);

        let lead = Self {
            name,
            contact_method,
            message,
            builder_site_type: selection
                .site_type
                .map(|site_type| site_type.to_string())
                .unwrap_or_default(),
            builder_design: selection
                .design
                .map(|design| design.to_string())
                .unwrap_or_default(),
            builder_pages: selection.page_count(),
            builder_modules: selection
                .modules
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            builder_package: display.package,
            builder_price: display.price,
        };

        tracing::info!(
            site_type = %lead.builder_site_type,
            package = %lead.builder_package,
            "Builder lead assembled"
        );
        Ok(lead)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Contact channels offered by the quiz form. At least one is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizContacts {
    pub phone: String,
    pub telegram: String,
    pub instagram: String,
}

impl QuizContacts {
    /// Filled channels joined as `Телефон: …, Telegram: …, Instagram: …`.
    pub fn contact_method(&self) -> String {
        [
            ("Телефон", &self.phone),
            ("Telegram", &self.telegram),
            ("Instagram", &self.instagram),
        ]
        .iter()
        .filter_map(|(channel, value)| {
            let value = value.trim();
            (!value.is_empty()).then(|| format!("{}: {}", channel, value))
        })
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Request sent at the end of the quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizLead {
    pub name: String,
    pub contact_method: String,
    pub message: String,
}

impl QuizLead {
    /// Build the payload from a quiz session and the contact form.
    ///
    /// The message lists every step with the label of its answer, then the
    /// visitor's own note if there is one.
    pub fn from_session(
        session: &QuizSession,
        name: &str,
        contacts: &QuizContacts,
        note: &str,
    ) -> Result<Self> {
        let name = required(name, "name")?;
        let contact_method = contacts.contact_method();
        if contact_method.is_empty() {
            return Err(SiteQuoteError::validation(
                "at least one contact channel is required",
            ));
        }

        let catalog = session.catalog();
        let answers = session.answers();
        let mut message = format!("{}\n\n", QUIZ_MESSAGE_HEADING);
        for step in QuizStep::iter() {
            let labels: Vec<&str> = answers
                .values(step)
                .iter()
                .map(|id| catalog.label(step, id))
                .collect();
            message.push_str(&format!("{}: {}\n", step.caption(), labels.join(", ")));
        }

        let note = note.trim();
        if !note.is_empty() {
            message.push_str(&format!("Додаткове повідомлення: {}", note));
        }

        tracing::info!(contact = %contact_method, "Quiz lead assembled");
        Ok(Self {
            name,
            contact_method,
            message,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
