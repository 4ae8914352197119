//! Selection state for one builder session.
//!
//! `Selection` holds what the visitor has picked so far. `SelectionTracker`
//! applies single-field changes to it and remembers which field changed last,
//! which is what the recalculation controller needs to scope its work.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::types::{DesignTier, SiteType};

/// Current choices of one quote session.
///
/// `site_type` and `design` may be unset; the calculator resolves them to the
/// rule table's first site type and the template design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub site_type: Option<SiteType>,
    pub design: Option<DesignTier>,
    page_count: u32,
    /// Module ids. A sorted set keeps iteration deterministic.
    pub modules: BTreeSet<String>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            site_type: None,
            design: None,
            page_count: 1,
            modules: BTreeSet::new(),
        }
    }
}

impl Selection {
    pub fn new(site_type: SiteType, page_count: u32) -> Self {
        Self {
            site_type: Some(site_type),
            design: Some(DesignTier::Template),
            page_count: page_count.max(1),
            modules: BTreeSet::new(),
        }
    }

    pub fn with_design(mut self, design: DesignTier) -> Self {
        self.design = Some(design);
        self
    }

    pub fn with_module(mut self, module_id: impl Into<String>) -> Self {
        self.modules.insert(module_id.into());
        self
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Set the page count, never going below one page.
    pub fn set_page_count(&mut self, page_count: u32) {
        self.page_count = page_count.max(1);
    }

    /// Design with the unset case resolved to template.
    pub fn design_or_default(&self) -> DesignTier {
        self.design.unwrap_or_default()
    }

    pub fn has_module(&self, module_id: &str) -> bool {
        self.modules.contains(module_id)
    }
}

/// Identifies the form field behind a change event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldId {
    SiteType,
    Design,
    /// The page-count slider
    PageCount,
    /// A module checkbox, by module id
    Module(String),
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SiteType => write!(f, "siteType"),
            Self::Design => write!(f, "design"),
            Self::PageCount => write!(f, "pageCountSlider"),
            Self::Module(id) => write!(f, "modules[{}]", id),
        }
    }
}

/// A single-field edit coming from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    SiteType(SiteType),
    Design(DesignTier),
    PageCount(u32),
    /// Check (`true`) or uncheck (`false`) a module.
    Module(String, bool),
}

impl SelectionChange {
    pub fn field(&self) -> FieldId {
        match self {
            Self::SiteType(_) => FieldId::SiteType,
            Self::Design(_) => FieldId::Design,
            Self::PageCount(_) => FieldId::PageCount,
            Self::Module(id, _) => FieldId::Module(id.clone()),
        }
    }
}

/// Owns a selection and records the most recent change.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    selection: Selection,
    last_changed: Option<FieldId>,
}

impl SelectionTracker {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            last_changed: None,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    /// Field touched by the last [`apply`](Self::apply), `None` before any change.
    pub fn last_changed(&self) -> Option<&FieldId> {
        self.last_changed.as_ref()
    }

    /// Apply one change and return the field it touched.
    ///
    /// Site-type page resets are not done here; they depend on the rule table
    /// and belong to the recalculation controller.
    pub fn apply(&mut self, change: SelectionChange) -> FieldId {
        let field = change.field();
        match change {
            SelectionChange::SiteType(site_type) => self.selection.site_type = Some(site_type),
            SelectionChange::Design(design) => self.selection.design = Some(design),
            SelectionChange::PageCount(count) => self.selection.set_page_count(count),
            SelectionChange::Module(id, true) => {
                self.selection.modules.insert(id);
            }
            SelectionChange::Module(id, false) => {
                self.selection.modules.remove(&id);
            }
        }
        self.last_changed = Some(field.clone());
        field
    }
}
