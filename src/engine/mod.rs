//! Engine modules: the pricing core.
//!
//! The engine turns a selection plus an injected rule table into a quote.
//! Everything here is pure: no I/O, no clocks, no shared state.

pub mod quote;
