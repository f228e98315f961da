//! # Session Workflow
//!
//! [`SessionManager`] is the single source of truth for "who is logged in",
//! shared for the lifetime of the process. Frontends call its operations from
//! event handlers and observe [`SessionState`] through the reactive cell.
//!
//! ## Bracketing
//!
//! Every network operation follows the same bracket: enter with
//! `loading = true, error = None`, settle with exactly one state transition.
//! An internal drop guard clears `loading` on any exit path that failed to
//! settle, so the UI can never be left spinning.
//!
//! ## Supersession
//!
//! Operations are not deduplicated here; callers disable controls while
//! `loading` is true. As a correctness backstop each auth-mutating operation
//! carries an epoch ticket: a completion whose ticket has been superseded by
//! a later operation (including logout) applies no state, so an abandoned
//! attempt can never win over the last one.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use localist_api::{
    DirectoryApi, ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
};

use crate::errors::AppError;
use crate::reactive::ReactiveState;
use crate::storage::{CredentialStore, Credentials};
use crate::views::SessionState;

const FALLBACK_LOGIN: &str = "Failed to login";
const FALLBACK_REGISTER: &str = "Failed to register";
const FALLBACK_FORGOT: &str = "Failed to process forgot password request";
const FALLBACK_RESET: &str = "Failed to reset password";

/// Owner of the session lifecycle: hydration, login, registration, logout,
/// and password recovery.
pub struct SessionManager {
    state: ReactiveState<SessionState>,
    api: Arc<dyn DirectoryApi>,
    store: Arc<dyn CredentialStore>,
    /// Monotonic operation epoch; completions with a stale ticket are dropped.
    epoch: AtomicU64,
    /// Hydration latch; [`SessionManager::hydrate`] runs at most once.
    hydrated: AtomicBool,
}

impl SessionManager {
    /// Build a manager over the API boundary and credential store.
    ///
    /// The initial state is hydration-pending (`loading = true`); call
    /// [`SessionManager::hydrate`] once at startup.
    #[must_use]
    pub fn new(api: Arc<dyn DirectoryApi>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            state: ReactiveState::new(SessionState::default()),
            api,
            store,
            epoch: AtomicU64::new(0),
            hydrated: AtomicBool::new(false),
        }
    }

    /// The reactive session cell, for frontends to subscribe to.
    #[must_use]
    pub fn state(&self) -> &ReactiveState<SessionState> {
        &self.state
    }

    /// Snapshot of the current session state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.get()
    }

    /// Restore the session from persistent storage, without re-validating
    /// against the server. Runs at most once per process; repeated calls are
    /// no-ops. Always leaves `loading = false`.
    pub fn hydrate(&self) {
        if self.hydrated.swap(true, Ordering::SeqCst) {
            tracing::debug!("hydrate called more than once; ignoring");
            return;
        }
        match self.store.load() {
            Ok(Some(credentials)) => {
                tracing::debug!(user = %credentials.user.email, "session restored from storage");
                self.state
                    .update(|s| s.establish(credentials.user, credentials.token));
            }
            Ok(None) => {
                self.state.update(|s| s.loading = false);
            }
            Err(e) => {
                tracing::warn!(error = %e, "credential load failed; starting logged out");
                self.state.update(|s| s.loading = false);
            }
        }
    }

    /// Exchange credentials for a session. On success the token and user are
    /// persisted and the session is established; on failure `error` records
    /// the server message (or a generic fallback) and the failure is
    /// re-raised to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AppError> {
        let ticket = self.begin_operation();
        let guard = OpGuard::new(self, ticket);
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        match self.api.login(&request).await {
            Ok(payload) => {
                if !self.is_current(ticket) {
                    tracing::debug!("login completion superseded; dropping");
                    guard.abandon();
                    return Ok(());
                }
                let credentials = Credentials {
                    token: payload.access_token,
                    user: payload.user,
                };
                // Persist before flipping state: a failed write is a failed
                // login, never a half-established session.
                if let Err(e) = self.store.save(&credentials) {
                    let err = AppError::Storage {
                        message: format!("Failed to save session: {e}"),
                    };
                    guard.settle(|s| s.settle_error(err.message()));
                    return Err(err);
                }
                guard.settle(move |s| s.establish(credentials.user, credentials.token));
                Ok(())
            }
            Err(api_err) => {
                let err = AppError::from_api(&api_err, FALLBACK_LOGIN);
                guard.settle(|s| s.settle_error(err.message()));
                Err(err)
            }
        }
    }

    /// Create an account, then immediately log in with the same credentials.
    /// A failure at the registration stage never reaches the login endpoint
    /// and never persists a token; a failure at either stage surfaces as a
    /// single failure with `error` set from the stage that failed.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<(), AppError> {
        let ticket = self.begin_operation();
        let guard = OpGuard::new(self, ticket);
        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        };
        match self.api.register(&request).await {
            Ok(()) => {
                // Chained auto-login runs its own bracket and supersedes
                // this ticket.
                guard.abandon();
                self.login(email, password).await
            }
            Err(api_err) => {
                let err = AppError::from_api(&api_err, FALLBACK_REGISTER);
                guard.settle(|s| s.settle_error(err.message()));
                Err(err)
            }
        }
    }

    /// Drop the session: clear persisted credentials and reset state.
    /// Synchronous, no network call, never fails. Also invalidates any
    /// in-flight auth completion so a stale login success cannot resurrect
    /// the session afterwards.
    pub fn logout(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to clear persisted credentials");
        }
        self.state.update(SessionState::drop_session);
    }

    /// Request a password-reset email. Follows the standard bracket; never
    /// mutates `is_authenticated`.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AppError> {
        let ticket = self.begin_operation();
        let guard = OpGuard::new(self, ticket);
        let request = ForgotPasswordRequest {
            email: email.to_string(),
        };
        match self.api.forgot_password(&request).await {
            Ok(()) => {
                guard.settle(SessionState::settle_ok);
                Ok(())
            }
            Err(api_err) => {
                let err = AppError::from_api(&api_err, FALLBACK_FORGOT);
                guard.settle(|s| s.settle_error(err.message()));
                Err(err)
            }
        }
    }

    /// Redeem a reset token for a new password. `token` and `email` come
    /// from the emailed link's query parameters. Never mutates
    /// `is_authenticated`.
    pub async fn reset_password(
        &self,
        token: &str,
        email: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let ticket = self.begin_operation();
        let guard = OpGuard::new(self, ticket);
        let request = ResetPasswordRequest {
            token: token.to_string(),
            email: email.to_string(),
            new_password: new_password.to_string(),
        };
        match self.api.reset_password(&request).await {
            Ok(()) => {
                guard.settle(SessionState::settle_ok);
                Ok(())
            }
            Err(api_err) => {
                let err = AppError::from_api(&api_err, FALLBACK_RESET);
                guard.settle(|s| s.settle_error(err.message()));
                Err(err)
            }
        }
    }

    /// Dismiss the recorded error. No other side effect.
    pub fn clear_error(&self) {
        self.state.update(|s| s.error = None);
    }

    /// Enter the loading/error bracket and take a fresh epoch ticket.
    fn begin_operation(&self) -> u64 {
        let ticket = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.update(SessionState::begin_operation);
        ticket
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == ticket
    }

    fn apply_if_current(&self, ticket: u64, f: impl FnOnce(&mut SessionState)) {
        if self.is_current(ticket) {
            self.state.update(f);
        } else {
            tracing::debug!("stale session transition dropped");
        }
    }
}

/// Scoped cleanup for the loading bracket: if an operation exits without
/// settling, the guard clears `loading` so the UI cannot hang.
struct OpGuard<'a> {
    manager: &'a SessionManager,
    ticket: u64,
    settled: bool,
}

impl<'a> OpGuard<'a> {
    fn new(manager: &'a SessionManager, ticket: u64) -> Self {
        Self {
            manager,
            ticket,
            settled: false,
        }
    }

    /// Apply the operation's single settling transition (if still current).
    fn settle(mut self, f: impl FnOnce(&mut SessionState)) {
        self.settled = true;
        self.manager.apply_if_current(self.ticket, f);
    }

    /// Hand the bracket off (superseded, or continued by a chained step).
    fn abandon(mut self) {
        self.settled = true;
    }
}

impl Drop for OpGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.manager
                .apply_if_current(self.ticket, |s| s.loading = false);
        }
    }
}
