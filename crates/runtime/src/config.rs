//! Centralized configuration for the trel CLI
//!
//! This module provides a single source of truth for all configuration values
//! used throughout the application.
//!
//! # Environment Variables
//!
//! The following environment variables are consumed:
//! - `TRELLO_API_KEY`: the Trello API key (required)
//! - `TRELLO_TOKEN`: the Trello API token (optional at startup; when absent
//!   the CLI prints an authorization link and exits)
//! - `TRELLO_AUTH_SCOPE`: scope requested on the authorization link
//! - `TRELLO_API_BASE_URL`: override for the API base URL

/// Default Trello REST API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.trello.com/1";

/// Trello authorization endpoint used to mint tokens
pub const AUTHORIZATION_BASE_URL: &str = "https://trello.com/1/authorize";

/// Environment variable name for the API key
pub const API_KEY_ENV_VAR: &str = "TRELLO_API_KEY";

/// Environment variable name for the API token
pub const TOKEN_ENV_VAR: &str = "TRELLO_TOKEN";

/// Environment variable name for the authorization scope
pub const AUTH_SCOPE_ENV_VAR: &str = "TRELLO_AUTH_SCOPE";

/// Environment variable name for overriding the API base URL
pub const API_URL_ENV_VAR: &str = "TRELLO_API_BASE_URL";

/// Scope requested when no override is configured
pub const DEFAULT_AUTH_SCOPE: &str = "read,write";

/// Token lifetime requested on the authorization link
pub const AUTH_EXPIRATION: &str = "never";

/// Application name shown on Trello's authorization page
pub const AUTH_APP_NAME: &str = "trel CLI";

/// Request timeout in seconds for every API call
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
