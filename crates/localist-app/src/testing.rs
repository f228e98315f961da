//! # Test Support
//!
//! A scriptable in-memory [`DirectoryApi`] plus small sample-data builders,
//! shared by unit and integration tests. Scripted responses can carry a
//! delay so tests with a paused clock can interleave completions
//! deterministically.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use localist_api::{
    ApiError, AuthPayload, Business, BusinessSummary, Category, CategorySummary, DirectoryApi,
    ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest, UserRecord,
};
use parking_lot::Mutex;

use crate::storage::{CredentialStore, Credentials, StorageError};

// =============================================================================
// Sample data
// =============================================================================

/// The user every sample payload logs in as.
#[must_use]
pub fn sample_user() -> UserRecord {
    UserRecord {
        id: "u1".into(),
        email: "a@b.c".into(),
        name: "Ann".into(),
    }
}

/// A successful login payload carrying `token`.
#[must_use]
pub fn sample_payload(token: &str) -> AuthPayload {
    AuthPayload {
        access_token: token.into(),
        user: sample_user(),
    }
}

/// The credential record a login with `token` would persist.
#[must_use]
pub fn sample_credentials(token: &str) -> Credentials {
    Credentials {
        token: token.into(),
        user: sample_user(),
    }
}

/// A search suggestion in category `category_id`.
#[must_use]
pub fn sample_suggestion(id: &str, name: &str, category_id: &str) -> BusinessSummary {
    BusinessSummary {
        id: id.into(),
        name: name.into(),
        category: CategorySummary {
            id: category_id.into(),
            name: "Restaurants".into(),
        },
    }
}

// =============================================================================
// Scriptable API fake
// =============================================================================

/// One recorded call against the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    /// `POST /auth/register`
    Register {
        /// Email submitted
        email: String,
    },
    /// `POST /auth/login`
    Login {
        /// Email submitted
        email: String,
    },
    /// `POST /auth/forgot-password`
    ForgotPassword {
        /// Email submitted
        email: String,
    },
    /// `POST /auth/reset-password`
    ResetPassword {
        /// Token submitted
        token: String,
    },
    /// `GET /business/search`
    Search {
        /// Query submitted
        query: String,
    },
}

struct Scripted<T> {
    result: Result<T, ApiError>,
    delay: Duration,
}

#[derive(Default)]
struct Inner {
    register: VecDeque<Scripted<()>>,
    login: VecDeque<Scripted<AuthPayload>>,
    forgot: VecDeque<Scripted<()>>,
    reset: VecDeque<Scripted<()>>,
    search: HashMap<String, Scripted<Vec<BusinessSummary>>>,
    calls: Vec<ApiCall>,
}

/// In-memory [`DirectoryApi`] returning scripted responses in order.
///
/// Auth operations consume a queue per endpoint; an unscripted auth call
/// fails loudly with a transport error. Search responds per query text and
/// returns an empty result set for unscripted queries.
#[derive(Default)]
pub struct FakeDirectoryApi {
    inner: Mutex<Inner>,
}

impl FakeDirectoryApi {
    /// An empty fake; script responses before use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a register response.
    pub fn script_register(&self, result: Result<(), ApiError>) {
        self.inner.lock().register.push_back(Scripted {
            result,
            delay: Duration::ZERO,
        });
    }

    /// Queue a login response.
    pub fn script_login(&self, result: Result<AuthPayload, ApiError>) {
        self.script_login_delayed(result, Duration::ZERO);
    }

    /// Queue a login response that resolves after `delay`.
    pub fn script_login_delayed(&self, result: Result<AuthPayload, ApiError>, delay: Duration) {
        self.inner.lock().login.push_back(Scripted { result, delay });
    }

    /// Queue a forgot-password response.
    pub fn script_forgot(&self, result: Result<(), ApiError>) {
        self.inner.lock().forgot.push_back(Scripted {
            result,
            delay: Duration::ZERO,
        });
    }

    /// Queue a reset-password response.
    pub fn script_reset(&self, result: Result<(), ApiError>) {
        self.inner.lock().reset.push_back(Scripted {
            result,
            delay: Duration::ZERO,
        });
    }

    /// Respond to searches for `query` with `results`.
    pub fn script_search(&self, query: &str, results: Vec<BusinessSummary>) {
        self.script_search_delayed(query, Ok(results), Duration::ZERO);
    }

    /// Respond to searches for `query` after `delay`.
    pub fn script_search_delayed(
        &self,
        query: &str,
        result: Result<Vec<BusinessSummary>, ApiError>,
        delay: Duration,
    ) {
        self.inner
            .lock()
            .search
            .insert(query.to_string(), Scripted { result, delay });
    }

    /// Every call made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.inner.lock().calls.clone()
    }

    /// How many search requests have been issued.
    #[must_use]
    pub fn search_count(&self) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, ApiCall::Search { .. }))
            .count()
    }

    fn unscripted(endpoint: &str) -> ApiError {
        ApiError::Transport {
            message: format!("no scripted response for {endpoint}"),
        }
    }

    async fn resolve<T>(scripted: Option<Scripted<T>>, endpoint: &str) -> Result<T, ApiError> {
        match scripted {
            Some(Scripted { result, delay }) => {
                if delay > Duration::ZERO {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => Err(Self::unscripted(endpoint)),
        }
    }
}

#[async_trait]
impl DirectoryApi for FakeDirectoryApi {
    async fn register(&self, req: &RegisterRequest) -> Result<(), ApiError> {
        let scripted = {
            let mut inner = self.inner.lock();
            inner.calls.push(ApiCall::Register {
                email: req.email.clone(),
            });
            inner.register.pop_front()
        };
        Self::resolve(scripted, "register").await
    }

    async fn login(&self, req: &LoginRequest) -> Result<AuthPayload, ApiError> {
        let scripted = {
            let mut inner = self.inner.lock();
            inner.calls.push(ApiCall::Login {
                email: req.email.clone(),
            });
            inner.login.pop_front()
        };
        Self::resolve(scripted, "login").await
    }

    async fn forgot_password(&self, req: &ForgotPasswordRequest) -> Result<(), ApiError> {
        let scripted = {
            let mut inner = self.inner.lock();
            inner.calls.push(ApiCall::ForgotPassword {
                email: req.email.clone(),
            });
            inner.forgot.pop_front()
        };
        Self::resolve(scripted, "forgot-password").await
    }

    async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<(), ApiError> {
        let scripted = {
            let mut inner = self.inner.lock();
            inner.calls.push(ApiCall::ResetPassword {
                token: req.token.clone(),
            });
            inner.reset.pop_front()
        };
        Self::resolve(scripted, "reset-password").await
    }

    async fn search_businesses(&self, query: &str) -> Result<Vec<BusinessSummary>, ApiError> {
        let scripted = {
            let mut inner = self.inner.lock();
            inner.calls.push(ApiCall::Search {
                query: query.to_string(),
            });
            inner.search.remove(query)
        };
        // Unscripted queries read as "no matches" so visibility tests don't
        // have to script every keystroke.
        if scripted.is_none() {
            return Ok(Vec::new());
        }
        Self::resolve(scripted, "business/search").await
    }

    async fn list_businesses(&self) -> Result<Vec<Business>, ApiError> {
        Err(Self::unscripted("business"))
    }

    async fn get_business(&self, _id: &str) -> Result<Business, ApiError> {
        Err(Self::unscripted("business/:id"))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        Err(Self::unscripted("categories"))
    }

    async fn businesses_in_category(&self, _slug: &str) -> Result<Vec<Business>, ApiError> {
        Err(Self::unscripted("business/category/:slug"))
    }
}

// =============================================================================
// Failing credential store
// =============================================================================

/// A [`CredentialStore`] whose writes always fail, for error-path tests.
#[derive(Debug, Default)]
pub struct FailingCredentialStore;

impl CredentialStore for FailingCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, StorageError> {
        Ok(None)
    }

    fn save(&self, _credentials: &Credentials) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("disk full")))
    }

    fn clear(&self) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("disk full")))
    }
}
