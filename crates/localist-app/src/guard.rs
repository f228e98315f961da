//! # Route Guard
//!
//! Gates a subtree of views behind an authenticated session. The guard is a
//! pure function of the current [`SessionState`], re-derived on every
//! evaluation: a logout while viewing a guarded page flips the decision from
//! [`RouteDecision::Allow`] to [`RouteDecision::Redirect`] on the next
//! render. It holds no state of its own.
//!
//! `loading` comes only from the hydration check and in-flight auth
//! operations; mid-session token expiry does not re-enter
//! [`RouteDecision::Checking`].

use crate::routes;
use crate::views::SessionState;

/// What the frontend should do with a guarded route right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session still hydrating or an auth operation is in flight: render a
    /// neutral placeholder, take no navigation action.
    Checking,
    /// Not authenticated: navigate to `to`, replacing the current history
    /// entry so the guarded path does not survive in back/forward history.
    Redirect {
        /// Fallback path to navigate to
        to: String,
    },
    /// Authenticated: render the guarded subtree unchanged.
    Allow,
}

/// Configuration for guarding a set of routes.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    fallback_path: String,
}

impl RouteGuard {
    /// Guard redirecting to the default sign-in view.
    #[must_use]
    pub fn new() -> Self {
        Self::with_fallback(routes::SIGN_IN)
    }

    /// Guard redirecting to a custom fallback path.
    #[must_use]
    pub fn with_fallback(path: impl Into<String>) -> Self {
        Self {
            fallback_path: path.into(),
        }
    }

    /// Derive the routing decision from the current session state.
    #[must_use]
    pub fn decide(&self, session: &SessionState) -> RouteDecision {
        if session.loading {
            return RouteDecision::Checking;
        }
        if !session.is_authenticated {
            return RouteDecision::Redirect {
                to: self.fallback_path.clone(),
            };
        }
        RouteDecision::Allow
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use localist_api::UserRecord;

    fn authenticated() -> SessionState {
        let mut state = SessionState::default();
        state.establish(
            UserRecord {
                id: "u1".into(),
                email: "a@b.c".into(),
                name: "Ann".into(),
            },
            "t1".into(),
        );
        state
    }

    #[test]
    fn test_loading_renders_placeholder() {
        let guard = RouteGuard::new();
        let state = SessionState::default(); // hydration pending
        assert_eq!(guard.decide(&state), RouteDecision::Checking);
    }

    #[test]
    fn test_unauthenticated_redirects_to_sign_in() {
        let guard = RouteGuard::new();
        let mut state = SessionState::default();
        state.drop_session();
        assert_eq!(
            guard.decide(&state),
            RouteDecision::Redirect {
                to: "/sign-in".into()
            }
        );
    }

    #[test]
    fn test_custom_fallback_path() {
        let guard = RouteGuard::with_fallback("/login");
        let mut state = SessionState::default();
        state.drop_session();
        assert_eq!(
            guard.decide(&state),
            RouteDecision::Redirect { to: "/login".into() }
        );
    }

    #[test]
    fn test_authenticated_allows() {
        let guard = RouteGuard::new();
        assert_eq!(guard.decide(&authenticated()), RouteDecision::Allow);
    }

    #[test]
    fn test_decision_is_rederived_after_logout() {
        let guard = RouteGuard::new();
        let mut state = authenticated();
        assert_eq!(guard.decide(&state), RouteDecision::Allow);
        state.drop_session();
        assert_eq!(
            guard.decide(&state),
            RouteDecision::Redirect {
                to: "/sign-in".into()
            }
        );
    }
}
