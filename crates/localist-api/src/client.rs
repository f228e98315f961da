//! # Directory API Client
//!
//! [`DirectoryApi`] is the seam the app core programs against; tests swap in
//! fakes, production wires up [`HttpDirectoryApi`].
//!
//! Endpoint paths mirror the server exactly:
//!
//! | Operation | Endpoint |
//! |---|---|
//! | register | `POST /auth/register` |
//! | login | `POST /auth/login` |
//! | forgot password | `POST /auth/forgot-password` |
//! | reset password | `POST /auth/reset-password` |
//! | suggest search | `GET /business/search?q=<text>` |
//! | list businesses | `GET /business` |
//! | business detail | `GET /business/:id` |
//! | list categories | `GET /categories` |
//! | category browse | `GET /business/category/:slug` |

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::error::ApiError;
use crate::types::{
    AuthPayload, Business, BusinessSummary, Category, ForgotPasswordRequest, LoginRequest,
    RegisterRequest, ResetPasswordRequest,
};

/// The remote directory service, as seen by the client core.
///
/// All methods are cooperative suspension points; none of them retry. Errors
/// carry the [`ApiError`] taxonomy and the caller decides whether to surface
/// or swallow them.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Create an account. The response body (a user+token payload) is
    /// discarded; callers follow up with [`DirectoryApi::login`].
    async fn register(&self, req: &RegisterRequest) -> Result<(), ApiError>;

    /// Exchange credentials for a bearer token and user record.
    async fn login(&self, req: &LoginRequest) -> Result<AuthPayload, ApiError>;

    /// Request a password-reset email.
    async fn forgot_password(&self, req: &ForgotPasswordRequest) -> Result<(), ApiError>;

    /// Redeem a reset token for a new password.
    async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<(), ApiError>;

    /// Free-text business search, ordered by server-side relevance.
    async fn search_businesses(&self, query: &str) -> Result<Vec<BusinessSummary>, ApiError>;

    /// All businesses, for browse views.
    async fn list_businesses(&self) -> Result<Vec<Business>, ApiError>;

    /// A single business by id.
    async fn get_business(&self, id: &str) -> Result<Business, ApiError>;

    /// All categories.
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;

    /// Businesses within a category, by category slug.
    async fn businesses_in_category(&self, slug: &str) -> Result<Vec<Business>, ApiError>;
}

/// `reqwest`-backed [`DirectoryApi`] implementation.
#[derive(Debug, Clone)]
pub struct HttpDirectoryApi {
    base: Url,
    http: reqwest::Client,
}

/// Failure-status bodies optionally carry `{"message": "..."}`.
#[derive(Deserialize)]
struct ServerMessage {
    message: Option<String>,
}

impl HttpDirectoryApi {
    /// Build a client rooted at `base` (e.g. `https://api.example.com/`).
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self {
            base,
            http: reqwest::Client::new(),
        }
    }

    /// Build a client with a caller-configured `reqwest::Client`.
    #[must_use]
    pub fn with_client(base: Url, http: reqwest::Client) -> Self {
        Self { base, http }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base.join(path).map_err(|e| ApiError::Transport {
            message: format!("invalid endpoint {path}: {e}"),
        })
    }

    /// Map a response to `Ok` on success status, otherwise extract the
    /// server message into [`ApiError::Rejected`].
    async fn expect_success(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp
            .json::<ServerMessage>()
            .await
            .ok()
            .and_then(|m| m.message);
        tracing::debug!(status = status.as_u16(), ?message, "request rejected");
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn post_json<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ApiError> {
        let resp = self
            .http
            .post(self.endpoint(path)?)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        Self::expect_success(resp).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        Self::expect_success(resp)
            .await?
            .json::<T>()
            .await
            .map_err(ApiError::from_reqwest)
    }
}

#[async_trait]
impl DirectoryApi for HttpDirectoryApi {
    async fn register(&self, req: &RegisterRequest) -> Result<(), ApiError> {
        self.post_json("auth/register", req).await.map(|_| ())
    }

    async fn login(&self, req: &LoginRequest) -> Result<AuthPayload, ApiError> {
        self.post_json("auth/login", req)
            .await?
            .json::<AuthPayload>()
            .await
            .map_err(ApiError::from_reqwest)
    }

    async fn forgot_password(&self, req: &ForgotPasswordRequest) -> Result<(), ApiError> {
        self.post_json("auth/forgot-password", req).await.map(|_| ())
    }

    async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<(), ApiError> {
        self.post_json("auth/reset-password", req).await.map(|_| ())
    }

    async fn search_businesses(&self, query: &str) -> Result<Vec<BusinessSummary>, ApiError> {
        let mut url = self.endpoint("business/search")?;
        url.query_pairs_mut().append_pair("q", query);
        self.get_json(url).await
    }

    async fn list_businesses(&self) -> Result<Vec<Business>, ApiError> {
        let url = self.endpoint("business")?;
        self.get_json(url).await
    }

    async fn get_business(&self, id: &str) -> Result<Business, ApiError> {
        let url = self.endpoint(&format!("business/{id}"))?;
        self.get_json(url).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let url = self.endpoint("categories")?;
        self.get_json(url).await
    }

    async fn businesses_in_category(&self, slug: &str) -> Result<Vec<Business>, ApiError> {
        let url = self.endpoint(&format!("business/category/{slug}"))?;
        self.get_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpDirectoryApi {
        let base = Url::parse("https://api.example.test/").unwrap();
        HttpDirectoryApi::new(base)
    }

    #[test]
    fn test_endpoint_joins_relative_paths() {
        let api = client();
        assert_eq!(
            api.endpoint("auth/login").unwrap().as_str(),
            "https://api.example.test/auth/login"
        );
        assert_eq!(
            api.endpoint("business/category/restaurants").unwrap().as_str(),
            "https://api.example.test/business/category/restaurants"
        );
    }

    #[test]
    fn test_search_url_encodes_query() {
        let api = client();
        let mut url = api.endpoint("business/search").unwrap();
        url.query_pairs_mut().append_pair("q", "pizza & pasta");
        assert_eq!(
            url.as_str(),
            "https://api.example.test/business/search?q=pizza+%26+pasta"
        );
    }

    #[test]
    fn test_server_message_body_shape() {
        let parsed: ServerMessage =
            serde_json::from_str(r#"{"message":"Email already registered"}"#).unwrap();
        assert_eq!(parsed.message.as_deref(), Some("Email already registered"));

        // Unknown body shapes degrade to "no message" rather than an error.
        let parsed: ServerMessage = serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        assert_eq!(parsed.message, None);
    }
}
