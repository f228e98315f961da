//! # Localist App Core
//!
//! Portable headless application core for the Localist directory client.
//! Frontends (web, terminal, mobile shells) render from the reactive view
//! state exposed here and drive it through workflow methods; no UI concerns
//! live in this crate.
//!
//! ## Architecture
//!
//! - **View state** ([`views`]): plain serializable records wrapped in
//!   [`reactive::ReactiveState`], observed via `futures-signals`.
//! - **Workflows** ([`session`], [`search`]): multi-step operations against
//!   the [`localist_api::DirectoryApi`] boundary. They own all state
//!   transitions; frontends never mutate view state directly.
//! - **Gating** ([`guard`]): a pure routing decision derived from session
//!   state on every evaluation.
//! - **Persistence** ([`storage`]): the session credential record, the only
//!   durable state this client owns.

pub mod config;
pub mod errors;
pub mod guard;
pub mod reactive;
pub mod routes;
pub mod search;
pub mod session;
pub mod storage;
pub mod testing;
pub mod validate;
pub mod views;

pub use config::AppConfig;
pub use errors::AppError;
pub use guard::{RouteDecision, RouteGuard};
pub use search::SuggestSearch;
pub use session::SessionManager;
pub use storage::{CredentialStore, Credentials, FileCredentialStore, MemoryCredentialStore};
pub use views::{SearchSuggestionState, SessionState};

// Frontends need the wire types to render results and users.
pub use localist_api as api;
