//! Core functionality for the trel CLI
//!
//! This crate contains the foundational types and functionality used across
//! the trel application: configuration constants, credential resolution,
//! the Trello API client, and dependency injection interfaces.

/// Trello REST API client trait and its reqwest implementation
pub mod api_client;
/// Configuration constants and environment variable names
pub mod config;
/// Credential resolution and authorization URL construction
pub mod credentials;
/// Dependency injection traits and production implementations
pub mod deps;
/// Error taxonomy for Trello interactions
pub mod error;
/// Wire types for the Trello REST API
pub mod types;

// Re-export commonly used types at the crate root
pub use api_client::{TrelloApi, TrelloHttpClient};
pub use config::{
    API_KEY_ENV_VAR, API_URL_ENV_VAR, AUTH_SCOPE_ENV_VAR, DEFAULT_API_BASE_URL,
    DEFAULT_AUTH_SCOPE, TOKEN_ENV_VAR,
};
pub use credentials::{AuthPending, CredentialResolution, Credentials};
pub use deps::{
    BrowserOpener, Environment, MessageStyle, ProgressIndicator, RealBrowserOpener,
    RealEnvironment, UserInterface,
};
pub use error::TrelloError;
