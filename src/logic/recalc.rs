//! Incremental Recalculation Controller
//!
//! Every form event produces two independent answers:
//!
//! - a fresh [`Quote`], always recomputed because it is cheap and must
//!   never be stale, and
//! - whether the decorative site preview has to be rebuilt, which is slow and
//!   skipped whenever the change cannot affect it.
//!
//! | Changed field | Quote | Preview refresh |
//! |---------------|-------|-----------------|
//! | Site type     | yes (page count reset first) | yes |
//! | Design tier   | yes | yes |
//! | Page slider   | yes | no |
//! | Module toggle | yes | only if the module is visual |
//!
//! [`BuilderSession`] bundles the controller with a [`SelectionTracker`] and
//! the latest quote, which is what one open builder page owns.

use crate::catalog::RuleTable;
use crate::engine::quote::{compute_quote, Quote};
use crate::format::{format, DisplayStrings};
use crate::selection::{FieldId, Selection, SelectionChange, SelectionTracker};
use crate::types::Locale;

/// Outcome of one change event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recalculation {
    pub quote: Quote,
    pub visual_refresh_needed: bool,
}

/// Decides the scope of an update and recomputes the quote.
#[derive(Debug, Clone)]
pub struct Recalculator {
    table: RuleTable,
}

impl Recalculator {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// React to a change of `field` in `selection`.
    ///
    /// A site-type change resets the page count to the new type's included
    /// pages before pricing. Any pages the visitor had dialled in are dropped.
    pub fn on_selection_changed(&self, field: &FieldId, selection: &mut Selection) -> Recalculation {
        if *field == FieldId::SiteType {
            let site_type = selection
                .site_type
                .unwrap_or_else(|| self.table.first_site_type());
            selection.set_page_count(self.table.included_pages(site_type));
        }

        let quote = compute_quote(selection, &self.table);
        let visual_refresh_needed = self.needs_visual_refresh(field);

        tracing::debug!(
            %field,
            price = quote.total_price,
            visual_refresh_needed,
            "Recalculated after change"
        );

        Recalculation {
            quote,
            visual_refresh_needed,
        }
    }

    /// Whether a change of `field` can alter the preview.
    pub fn needs_visual_refresh(&self, field: &FieldId) -> bool {
        match field {
            FieldId::PageCount => false,
            FieldId::Module(id) => self.table.is_visual_module(id),
            FieldId::SiteType | FieldId::Design => true,
        }
    }
}

/// What a [`BuilderSession::apply`] call changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUpdate {
    pub field: FieldId,
    pub recalculation: Recalculation,
    /// Set when a preview rebuild should start. A rebuild holding an older
    /// ticket has been superseded and should not be shown.
    pub refresh_ticket: Option<u64>,
}

/// One open builder page: selection, controller and latest quote.
#[derive(Debug, Clone)]
pub struct BuilderSession {
    recalculator: Recalculator,
    tracker: SelectionTracker,
    quote: Quote,
    refresh_generation: u64,
}

impl BuilderSession {
    /// Start a session on the table's default selection, as on page load.
    pub fn new(table: RuleTable) -> Self {
        let selection = table.default_selection();
        Self::with_selection(table, selection)
    }

    /// Start a session on a given selection.
    pub fn with_selection(table: RuleTable, selection: Selection) -> Self {
        let quote = compute_quote(&selection, &table);
        tracing::info!(
            version = %table.version,
            price = quote.total_price,
            "Builder session started"
        );
        Self {
            recalculator: Recalculator::new(table),
            tracker: SelectionTracker::new(selection),
            quote,
            refresh_generation: 0,
        }
    }

    pub fn table(&self) -> &RuleTable {
        self.recalculator.table()
    }

    pub fn selection(&self) -> &Selection {
        self.tracker.selection()
    }

    pub fn quote(&self) -> Quote {
        self.quote
    }

    pub fn last_changed(&self) -> Option<&FieldId> {
        self.tracker.last_changed()
    }

    /// Apply one form edit and bring the quote up to date.
    pub fn apply(&mut self, change: SelectionChange) -> SessionUpdate {
        let field = self.tracker.apply(change);
        let recalculation = self
            .recalculator
            .on_selection_changed(&field, self.tracker.selection_mut());
        self.quote = recalculation.quote;

        let refresh_ticket = if recalculation.visual_refresh_needed {
            self.refresh_generation += 1;
            Some(self.refresh_generation)
        } else {
            None
        };

        SessionUpdate {
            field,
            recalculation,
            refresh_ticket,
        }
    }

    /// True if `ticket` belongs to the most recent preview rebuild.
    ///
    /// Tickets start at 1, so nothing is current before the first rebuild.
    pub fn is_current_refresh(&self, ticket: u64) -> bool {
        ticket != 0 && ticket == self.refresh_generation
    }

    /// Display strings for the current quote.
    pub fn display(&self, locale: Locale) -> DisplayStrings {
        format(&self.quote, self.selection().page_count(), locale)
    }
}
