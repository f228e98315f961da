//! # View State Module
//!
//! Plain serializable records describing what the UI should currently show.
//! Workflows own all mutation; frontends observe them through
//! [`crate::reactive::ReactiveState`] signals.

mod search;
mod session;

pub use search::SearchSuggestionState;
pub use session::SessionState;
