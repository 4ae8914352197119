//! Logic modules: reacting to user edits.
//!
//! The logic layer sits between the form (what the visitor just changed) and
//! the engine (what the quote is now).
//!
//! # Modules
//!
//! - `recalc`: Incremental recalculation controller and builder session

pub mod recalc;
