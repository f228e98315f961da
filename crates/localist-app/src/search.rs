//! # Debounced Suggest-Search
//!
//! Translates free-text keystrokes into throttled remote lookups and a
//! transient suggestion list.
//!
//! ## Timing
//!
//! Every keystroke cancels the pending lookup task and, for non-empty input,
//! starts a fresh one that sleeps out the quiet window before issuing a
//! single request: only the last keystroke in a burst reaches the network.
//! Hiding on blur is deferred by a short grace period so a pointer click on
//! a suggestion row lands before the list disappears; re-focusing cancels
//! the pending hide.
//!
//! ## Staleness
//!
//! Each lookup carries a request generation. Superseded lookups are aborted
//! at their next suspension point, and a completion whose generation is no
//! longer current is discarded, so an out-of-order response can never
//! overwrite newer results.
//!
//! Lookup failures are logged and collapse to an empty result set; a failed
//! suggestion lookup never surfaces an error.
//!
//! Methods spawn timer tasks and must be called within a tokio runtime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use localist_api::{BusinessSummary, DirectoryApi};
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::config::{AppConfig, BLUR_GRACE, SUGGEST_DEBOUNCE};
use crate::reactive::ReactiveState;
use crate::routes;
use crate::views::SearchSuggestionState;

/// Controller for the landing-page search box and its suggestion dropdown.
pub struct SuggestSearch {
    state: ReactiveState<SearchSuggestionState>,
    api: Arc<dyn DirectoryApi>,
    /// Current request generation; completions from older generations are
    /// dropped.
    generation: Arc<AtomicU64>,
    debounce: Duration,
    blur_grace: Duration,
    pending_lookup: Mutex<Option<JoinHandle<()>>>,
    pending_hide: Mutex<Option<JoinHandle<()>>>,
}

impl SuggestSearch {
    /// Controller with the default quiet window and blur grace.
    #[must_use]
    pub fn new(api: Arc<dyn DirectoryApi>) -> Self {
        Self::with_timing(api, SUGGEST_DEBOUNCE, BLUR_GRACE)
    }

    /// Controller with configured timing.
    #[must_use]
    pub fn from_config(api: Arc<dyn DirectoryApi>, config: &AppConfig) -> Self {
        Self::with_timing(api, config.suggest_debounce, config.blur_grace)
    }

    /// Controller with explicit timing.
    #[must_use]
    pub fn with_timing(
        api: Arc<dyn DirectoryApi>,
        debounce: Duration,
        blur_grace: Duration,
    ) -> Self {
        Self {
            state: ReactiveState::new(SearchSuggestionState::default()),
            api,
            generation: Arc::new(AtomicU64::new(0)),
            debounce,
            blur_grace,
            pending_lookup: Mutex::new(None),
            pending_hide: Mutex::new(None),
        }
    }

    /// The reactive suggestion cell, for frontends to subscribe to.
    #[must_use]
    pub fn state(&self) -> &ReactiveState<SearchSuggestionState> {
        &self.state
    }

    /// Snapshot of the current suggestion state.
    #[must_use]
    pub fn snapshot(&self) -> SearchSuggestionState {
        self.state.get()
    }

    /// Record a keystroke. Whitespace-only input clears results and hides
    /// the list immediately without a network call; anything else (re)starts
    /// the quiet-window timer.
    pub fn set_query(&self, text: &str) {
        self.cancel_pending_lookup();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.state.update(|s| {
                s.query = text.to_string();
                s.clear_results();
            });
            return;
        }
        self.state.update(|s| s.query = text.to_string());

        let query = trimmed.to_string();
        let api = Arc::clone(&self.api);
        let state = self.state.clone();
        let current = Arc::clone(&self.generation);
        let debounce = self.debounce;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let results = match api.search_businesses(&query).await {
                Ok(results) => results,
                Err(e) => {
                    tracing::warn!(query = %query, error = %e, "suggestion lookup failed");
                    Vec::new()
                }
            };
            if current.load(Ordering::SeqCst) != generation {
                tracing::debug!(query = %query, "discarding stale suggestion response");
                return;
            }
            state.update(|s| s.replace_results(results));
        });
        *self.pending_lookup.lock() = Some(handle);
    }

    /// The input regained focus: cancel any deferred hide and re-show the
    /// list if results are present.
    pub fn focus(&self) {
        self.cancel_pending_hide();
        self.state.update(|s| {
            if !s.results.is_empty() {
                s.visible = true;
            }
        });
    }

    /// The input lost focus: hide the list after the grace period, unless
    /// focus returns first.
    pub fn blur(&self) {
        self.cancel_pending_hide();
        let state = self.state.clone();
        let grace = self.blur_grace;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            state.update(|s| s.visible = false);
        });
        *self.pending_hide.lock() = Some(handle);
    }

    /// A suggestion was chosen: dismiss the list, abandon any outstanding
    /// lookup, and return the category route to navigate to.
    #[must_use]
    pub fn select(&self, suggestion: &BusinessSummary) -> String {
        self.cancel_pending_lookup();
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cancel_pending_hide();
        self.state.update(|s| s.visible = false);
        routes::category(&suggestion.category.id)
    }

    fn cancel_pending_lookup(&self) {
        if let Some(handle) = self.pending_lookup.lock().take() {
            handle.abort();
        }
    }

    fn cancel_pending_hide(&self) {
        if let Some(handle) = self.pending_hide.lock().take() {
            handle.abort();
        }
    }
}

impl Drop for SuggestSearch {
    fn drop(&mut self) {
        self.cancel_pending_lookup();
        self.cancel_pending_hide();
    }
}
