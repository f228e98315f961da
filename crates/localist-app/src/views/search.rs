//! # Suggest-Search View State

use localist_api::BusinessSummary;
use serde::{Deserialize, Serialize};

/// The suggestion dropdown under the landing-page search box.
///
/// `results` is replaced wholesale each time a query completes. `visible` is
/// true only while `results` is non-empty and the input retains (or has
/// regained) focus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSuggestionState {
    /// Current text in the search box
    pub query: String,
    /// Suggestions for the last completed query, in server relevance order
    pub results: Vec<BusinessSummary>,
    /// Whether the dropdown is shown
    pub visible: bool,
}

impl SearchSuggestionState {
    /// Empty the results and hide the dropdown.
    pub fn clear_results(&mut self) {
        self.results.clear();
        self.visible = false;
    }

    /// Replace the results wholesale; visibility follows non-emptiness.
    pub fn replace_results(&mut self, results: Vec<BusinessSummary>) {
        self.visible = !results.is_empty();
        self.results = results;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use localist_api::CategorySummary;

    fn suggestion(id: &str) -> BusinessSummary {
        BusinessSummary {
            id: id.into(),
            name: "Pizza Palace".into(),
            category: CategorySummary {
                id: "c1".into(),
                name: "Restaurants".into(),
            },
        }
    }

    #[test]
    fn test_replace_results_shows_when_non_empty() {
        let mut state = SearchSuggestionState::default();
        state.replace_results(vec![suggestion("b1")]);
        assert!(state.visible);
        state.replace_results(Vec::new());
        assert!(!state.visible);
    }

    #[test]
    fn test_clear_results_hides() {
        let mut state = SearchSuggestionState {
            query: "piz".into(),
            results: vec![suggestion("b1")],
            visible: true,
        };
        state.clear_results();
        assert!(state.results.is_empty());
        assert!(!state.visible);
    }
}
