//! # Session View State

use localist_api::UserRecord;
use serde::{Deserialize, Serialize};

/// The client-local record of "who is logged in".
///
/// `user` and `token` are jointly present or jointly absent; every transition
/// helper below maintains that invariant. `loading` is true only during an
/// in-flight auth operation or the initial hydration check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// The authenticated user, if any
    pub user: Option<UserRecord>,
    /// The bearer token paired with `user`
    pub token: Option<String>,
    /// Whether a session is established
    pub is_authenticated: bool,
    /// Whether an auth operation or the hydration check is in flight
    pub loading: bool,
    /// Last operation failure, shown inline near the form
    pub error: Option<String>,
}

impl Default for SessionState {
    /// Startup state: nothing known yet, hydration pending.
    fn default() -> Self {
        Self {
            user: None,
            token: None,
            is_authenticated: false,
            loading: true,
            error: None,
        }
    }
}

impl SessionState {
    /// Establish a session for `user`/`token`, settling the operation.
    pub fn establish(&mut self, user: UserRecord, token: String) {
        self.user = Some(user);
        self.token = Some(token);
        self.is_authenticated = true;
        self.loading = false;
        self.error = None;
    }

    /// Drop the session. Leaves `error` untouched; logout is not a failure.
    pub fn drop_session(&mut self) {
        self.user = None;
        self.token = None;
        self.is_authenticated = false;
        self.loading = false;
    }

    /// Enter the in-flight bracket for a network operation.
    pub fn begin_operation(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Settle a failed operation. Auth fields are untouched: a failed login
    /// leaves the previous (unauthenticated) state intact, and a failed
    /// forgot/reset never disturbs an established session.
    pub fn settle_error(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Settle an operation that finished without touching auth state
    /// (forgot/reset password).
    pub fn settle_ok(&mut self) {
        self.loading = false;
    }
}
