//! # Application Configuration

use std::time::Duration;

use url::Url;

use crate::routes;

/// Quiet window after the last keystroke before a suggestion request fires.
pub const SUGGEST_DEBOUNCE: Duration = Duration::from_millis(300);

/// Grace period between input blur and hiding the suggestion list, so a
/// pointer click on a suggestion lands before the list disappears.
pub const BLUR_GRACE: Duration = Duration::from_millis(150);

/// Static configuration for one client instance.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the directory REST API.
    pub api_base: Url,
    /// Redirect target for unauthenticated access to guarded views.
    pub sign_in_path: String,
    /// Debounce window for the suggest-search input.
    pub suggest_debounce: Duration,
    /// Blur-to-hide grace period for the suggestion list.
    pub blur_grace: Duration,
}

impl AppConfig {
    /// Configuration with defaults for everything except the API base.
    #[must_use]
    pub fn new(api_base: Url) -> Self {
        Self {
            api_base,
            sign_in_path: routes::SIGN_IN.to_string(),
            suggest_debounce: SUGGEST_DEBOUNCE,
            blur_grace: BLUR_GRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new(Url::parse("http://localhost:3000/").unwrap());
        assert_eq!(config.sign_in_path, "/sign-in");
        assert_eq!(config.suggest_debounce, Duration::from_millis(300));
        assert_eq!(config.blur_grace, Duration::from_millis(150));
    }
}
