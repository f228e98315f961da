//! # Wire Types
//!
//! Request and response shapes for the directory API. The server is
//! Mongo-backed and emits `_id` fields; the aliases below accept either
//! spelling so the types also round-trip through local persistence.

use serde::{Deserialize, Serialize};

// =============================================================================
// Users & Auth
// =============================================================================

/// An authenticated user, as returned by the auth endpoints.
///
/// Immutable once fetched; replaced wholesale on re-login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Server-assigned user id
    #[serde(alias = "_id")]
    pub id: String,
    /// Account email
    pub email: String,
    /// Display name
    pub name: String,
}

/// Successful login payload: `{access_token, user}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPayload {
    /// Opaque bearer token
    pub access_token: String,
    /// The authenticated user
    pub user: UserRecord,
}

/// Body for `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Account email
    pub email: String,
    /// Plaintext password (TLS-protected in transit)
    pub password: String,
    /// Display name
    pub name: String,
}

/// Body for `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// Body for `POST /auth/forgot-password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    /// Account email to send the reset link to
    pub email: String,
}

/// Body for `POST /auth/reset-password`.
///
/// The reset page receives `token` and `email` as query parameters of the
/// emailed link and forwards them here together with the new password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    /// One-time reset token from the emailed link
    pub token: String,
    /// Account email from the emailed link
    pub email: String,
    /// Replacement password
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

// =============================================================================
// Businesses & Categories
// =============================================================================

/// Minimal category reference carried on search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Category id
    #[serde(alias = "_id")]
    pub id: String,
    /// Human-readable category name
    pub name: String,
}

/// A search suggestion: just enough of a business to render one dropdown row
/// and navigate to its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessSummary {
    /// Business id
    #[serde(alias = "_id")]
    pub id: String,
    /// Business name
    pub name: String,
    /// Category the business belongs to
    pub category: CategorySummary,
}

/// A full category record, as listed by `GET /categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category id
    #[serde(alias = "_id")]
    pub id: String,
    /// Human-readable category name
    pub name: String,
    /// URL-safe slug used in category routes
    pub slug: String,
    /// Icon identifier
    #[serde(default)]
    pub icon: Option<String>,
    /// Marketing copy
    #[serde(default)]
    pub description: Option<String>,
}

/// A full business record, as returned by the listing and detail endpoints.
///
/// Consumed by detail/browse views outside the session/search core; the core
/// itself only ever sees [`BusinessSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    /// Business id
    #[serde(alias = "_id")]
    pub id: String,
    /// Business name
    pub name: String,
    /// Long-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Street address
    #[serde(default)]
    pub address: Option<String>,
    /// Contact phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Website URL
    #[serde(default)]
    pub website: Option<String>,
    /// Uploaded photo URLs
    #[serde(default)]
    pub photos: Vec<String>,
    /// Category the business belongs to
    pub category: Category,
}

impl Business {
    /// Reduce to the summary shape used by search suggestions.
    #[must_use]
    pub fn summary(&self) -> BusinessSummary {
        BusinessSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            category: CategorySummary {
                id: self.category.id.clone(),
                name: self.category.name.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_record_accepts_mongo_id() {
        let user: UserRecord =
            serde_json::from_str(r#"{"_id":"u1","email":"a@b.c","name":"Ann"}"#).unwrap();
        assert_eq!(user.id, "u1");

        let user: UserRecord =
            serde_json::from_str(r#"{"id":"u2","email":"a@b.c","name":"Ann"}"#).unwrap();
        assert_eq!(user.id, "u2");
    }

    #[test]
    fn test_user_record_round_trip() {
        let user = UserRecord {
            id: "u1".into(),
            email: "a@b.c".into(),
            name: "Ann".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        let back: UserRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_reset_password_wire_field_name() {
        let req = ResetPasswordRequest {
            token: "t".into(),
            email: "a@b.c".into(),
            new_password: "secret".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["newPassword"], "secret");
        assert!(json.get("new_password").is_none());
    }

    #[test]
    fn test_business_summary_ignores_extra_fields() {
        // The search endpoint returns full business records; the summary type
        // only picks what the dropdown needs.
        let json = r#"{
            "_id": "b1",
            "name": "Pizza Palace",
            "description": "wood-fired",
            "photos": ["x.jpg"],
            "category": {"_id": "c1", "name": "Restaurants", "slug": "restaurants"}
        }"#;
        let summary: BusinessSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.id, "b1");
        assert_eq!(summary.category.id, "c1");
    }

    #[test]
    fn test_business_summary_projection() {
        let json = r#"{
            "_id": "b1",
            "name": "Pizza Palace",
            "category": {"_id": "c1", "name": "Restaurants", "slug": "restaurants"}
        }"#;
        let business: Business = serde_json::from_str(json).unwrap();
        let summary = business.summary();
        assert_eq!(summary.name, "Pizza Palace");
        assert_eq!(summary.category.name, "Restaurants");
    }
}
