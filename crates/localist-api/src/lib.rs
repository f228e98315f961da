//! # Localist API Client
//!
//! Typed boundary to the directory REST API. This crate owns:
//!
//! - The wire DTOs ([`types`]): users, businesses, categories, auth payloads
//! - The [`DirectoryApi`] trait that the app core programs against
//! - The [`HttpDirectoryApi`] implementation backed by `reqwest`
//! - The transport-level error taxonomy ([`ApiError`])
//!
//! The app core never constructs URLs or touches HTTP status codes; it sees
//! only `DirectoryApi` and `ApiError`.

pub mod client;
pub mod error;
pub mod types;

pub use client::{DirectoryApi, HttpDirectoryApi};
pub use error::ApiError;
pub use types::{
    AuthPayload, Business, BusinessSummary, Category, CategorySummary, ForgotPasswordRequest,
    LoginRequest, RegisterRequest, ResetPasswordRequest, UserRecord,
};
