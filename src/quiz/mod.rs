//! Dream-site quiz
//!
//! A linear wizard that qualifies a lead and ends in a priced proposal.
//!
//! # Step Flow
//!
//! ```text
//! SiteType -> ClientSource -> SpecialFeatures -> DesignStyle -> Timeline -> Proposal
//! ```
//!
//! `ClientSource` and `SpecialFeatures` accept several answers; the other
//! steps take exactly one. A step cannot be left without an answer, and going
//! back is possible until the proposal has been produced.
//!
//! The staged "calculating…" animation shown before the proposal is purely
//! cosmetic: [`QuizSession::proposal`] is synchronous. Its captions are in
//! [`LOADING_PHASES`] for the page to play.

pub mod catalog;
pub mod pricing;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumIter, EnumString};

use crate::error::{Result, SiteQuoteError};
use catalog::QuizCatalog;
use pricing::{feature_list, price_band, PriceBand};

/// Captions cycled through while the proposal "is being calculated".
pub const LOADING_PHASES: [&str; 3] = [
    "Шукаємо технології",
    "Прораховуємо кількість роботи",
    "Формуємо пропозицію",
];

/// One screen of the quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum QuizStep {
    SiteType,
    ClientSource,
    SpecialFeatures,
    DesignStyle,
    Timeline,
}

impl QuizStep {
    pub const FIRST: QuizStep = QuizStep::SiteType;

    /// Total number of steps.
    pub const TOTAL_STEPS: usize = 5;

    pub fn next(self) -> Option<Self> {
        match self {
            Self::SiteType => Some(Self::ClientSource),
            Self::ClientSource => Some(Self::SpecialFeatures),
            Self::SpecialFeatures => Some(Self::DesignStyle),
            Self::DesignStyle => Some(Self::Timeline),
            Self::Timeline => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            Self::SiteType => None,
            Self::ClientSource => Some(Self::SiteType),
            Self::SpecialFeatures => Some(Self::ClientSource),
            Self::DesignStyle => Some(Self::SpecialFeatures),
            Self::Timeline => Some(Self::DesignStyle),
        }
    }

    /// Whether the step accepts several answers.
    pub fn is_multi(self) -> bool {
        matches!(self, Self::ClientSource | Self::SpecialFeatures)
    }

    /// Step number (1-indexed for display).
    pub fn step_number(self) -> usize {
        match self {
            Self::SiteType => 1,
            Self::ClientSource => 2,
            Self::SpecialFeatures => 3,
            Self::DesignStyle => 4,
            Self::Timeline => 5,
        }
    }

    /// Caption used when the answers are written into a lead message.
    pub fn caption(self) -> &'static str {
        match self {
            Self::SiteType => "Тип сайту",
            Self::ClientSource => "Джерело клієнтів",
            Self::SpecialFeatures => "Особливі функції",
            Self::DesignStyle => "Стиль дизайну",
            Self::Timeline => "Термін виконання",
        }
    }
}

/// Answer to one step: a single option id or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multi(Vec<String>),
}

impl Answer {
    /// Selected ids, whatever the shape.
    pub fn values(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multi(values) => values,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values().iter().all(|value| value.trim().is_empty())
    }
}

/// Everything answered so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswers(BTreeMap<QuizStep, Answer>);

impl QuizAnswers {
    pub fn get(&self, step: QuizStep) -> Option<&Answer> {
        self.0.get(&step)
    }

    pub fn set(&mut self, step: QuizStep, answer: Answer) {
        self.0.insert(step, answer);
    }

    /// Selected ids of a step, empty if unanswered.
    pub fn values(&self, step: QuizStep) -> &[String] {
        self.0.get(&step).map(Answer::values).unwrap_or(&[])
    }

    pub fn first(&self, step: QuizStep) -> Option<&str> {
        self.values(step).first().map(String::as_str)
    }

    pub fn is_answered(&self, step: QuizStep) -> bool {
        self.0.get(&step).is_some_and(|answer| !answer.is_empty())
    }
}

/// Where the wizard currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizProgress {
    Answering(QuizStep),
    Complete,
}

/// Priced result of a finished quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Proposal {
    pub band: PriceBand,
    /// Band formatted for display, e.g. `$450-550`.
    pub price: String,
    pub features: Vec<String>,
}

/// One visitor going through the quiz.
#[derive(Debug, Clone)]
pub struct QuizSession {
    catalog: QuizCatalog,
    progress: QuizProgress,
    answers: QuizAnswers,
}

impl QuizSession {
    pub fn new(catalog: QuizCatalog) -> Self {
        Self {
            catalog,
            progress: QuizProgress::Answering(QuizStep::FIRST),
            answers: QuizAnswers::default(),
        }
    }

    pub fn catalog(&self) -> &QuizCatalog {
        &self.catalog
    }

    pub fn progress(&self) -> QuizProgress {
        self.progress
    }

    pub fn answers(&self) -> &QuizAnswers {
        &self.answers
    }

    fn current_step(&self) -> Result<QuizStep> {
        match self.progress {
            QuizProgress::Answering(step) => Ok(step),
            QuizProgress::Complete => Err(SiteQuoteError::quiz("the quiz is already complete")),
        }
    }

    /// Pick an option on the current step.
    ///
    /// Single-answer steps replace the previous choice. Multi-answer steps
    /// toggle the option in and out of the list.
    pub fn select(&mut self, option_id: &str) -> Result<()> {
        let step = self.current_step()?;
        if self.catalog.option(step, option_id).is_none() {
            return Err(SiteQuoteError::quiz(format!(
                "'{}' is not an option of step '{}'",
                option_id, step
            )));
        }

        let answer = if step.is_multi() {
            let mut values = self.answers.values(step).to_vec();
            if let Some(pos) = values.iter().position(|v| v == option_id) {
                values.remove(pos);
            } else {
                values.push(option_id.to_string());
            }
            Answer::Multi(values)
        } else {
            Answer::Single(option_id.to_string())
        };

        tracing::debug!(%step, option = option_id, "Quiz answer selected");
        self.answers.set(step, answer);
        Ok(())
    }

    /// Answer the current step with `option_ids` in one go and move on.
    ///
    /// Unlike [`select`](Self::select), repeating an id does not toggle it
    /// off: duplicates collapse to the first occurrence. A single-answer
    /// step keeps the last id given.
    pub fn answer<S: AsRef<str>>(&mut self, option_ids: &[S]) -> Result<QuizProgress> {
        let step = self.current_step()?;
        let mut values: Vec<String> = Vec::new();
        for id in option_ids.iter().map(AsRef::as_ref) {
            if self.catalog.option(step, id).is_none() {
                return Err(SiteQuoteError::quiz(format!(
                    "'{}' is not an option of step '{}'",
                    id, step
                )));
            }
            if !values.iter().any(|v| v == id) {
                values.push(id.to_string());
            }
        }

        if step.is_multi() {
            self.answers.set(step, Answer::Multi(values));
        } else if let Some(last) = option_ids.last() {
            self.answers.set(step, Answer::Single(last.as_ref().to_string()));
        }
        self.advance()
    }

    /// Move to the next step. The current step must be answered.
    pub fn advance(&mut self) -> Result<QuizProgress> {
        let step = self.current_step()?;
        if !self.answers.is_answered(step) {
            return Err(SiteQuoteError::quiz(format!(
                "step '{}' needs an answer before continuing",
                step
            )));
        }

        self.progress = match step.next() {
            Some(next) => QuizProgress::Answering(next),
            None => QuizProgress::Complete,
        };
        Ok(self.progress)
    }

    /// Go back one step. Returns the step now shown, `None` if already at the start.
    pub fn back(&mut self) -> Result<Option<QuizStep>> {
        let step = self.current_step()?;
        let previous = step.previous();
        if let Some(previous) = previous {
            self.progress = QuizProgress::Answering(previous);
        }
        Ok(previous)
    }

    /// Priced proposal for the finished quiz.
    pub fn proposal(&self) -> Result<Proposal> {
        if self.progress != QuizProgress::Complete {
            return Err(SiteQuoteError::quiz("the quiz has unanswered steps"));
        }

        let band = price_band(&self.answers, &self.catalog);
        let features = feature_list(&self.answers, &self.catalog);
        tracing::info!(
            version = %self.catalog.version,
            min = band.min,
            max = band.max,
            "Quiz proposal ready"
        );

        Ok(Proposal {
            band,
            price: band.to_string(),
            features,
        })
    }

    /// Start over with no answers.
    pub fn reset(&mut self) {
        self.progress = QuizProgress::Answering(QuizStep::FIRST);
        self.answers = QuizAnswers::default();
    }
}
