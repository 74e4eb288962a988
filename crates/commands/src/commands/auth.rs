//! Auth command with dependency injection for better testability
//!
//! `auth url` prints (and optionally opens) the one-time authorization link
//! used to mint a token; `auth status` reports the credential configuration.
//! Both are offline: no network call is ever made here.

use std::sync::Arc;

use anyhow::Result;

use trel_runtime::config::{API_KEY_ENV_VAR, AUTH_SCOPE_ENV_VAR, DEFAULT_AUTH_SCOPE};
use trel_runtime::credentials::{self, CredentialResolution};
use trel_runtime::deps::{BrowserOpener, Environment, MessageStyle, UserInterface};
use trel_runtime::error::TrelloError;

use crate::commands::CommandStatus;

/// Auth subcommands
#[derive(Debug, Clone)]
pub enum AuthCommand {
    /// Print the authorization URL; optionally open it in the browser
    Url {
        /// Open the URL in the system browser
        open: bool,
    },
    /// Report the credential configuration
    Status,
}

/// Auth command arguments (matches CLI parser)
#[derive(Debug, Clone)]
pub struct AuthArgs {
    /// The subcommand to run
    pub command: AuthCommand,
}

/// Dependencies for the auth command
pub struct AuthDependencies {
    /// User interface for output
    pub ui: Arc<dyn UserInterface>,
    /// Environment the credentials are resolved from
    pub env: Arc<dyn Environment>,
    /// Browser launcher for `auth url --open`
    pub browser: Arc<dyn BrowserOpener>,
}

/// Execute the auth command with injected dependencies
pub fn execute_with_deps(args: &AuthArgs, deps: &Arc<AuthDependencies>) -> Result<CommandStatus> {
    match args.command {
        AuthCommand::Url { open } => url_with_deps(open, deps),
        AuthCommand::Status => status_with_deps(deps),
    }
}

fn url_with_deps(open: bool, deps: &Arc<AuthDependencies>) -> Result<CommandStatus> {
    let api_key = deps
        .env
        .var(API_KEY_ENV_VAR)
        .ok_or(TrelloError::MissingApiKey)?;
    let scope = deps
        .env
        .var(AUTH_SCOPE_ENV_VAR)
        .unwrap_or_else(|| DEFAULT_AUTH_SCOPE.to_string());
    let auth_url = credentials::authorization_url(&api_key, &scope);

    deps.ui
        .print_styled("Authorize trel with your Trello account", MessageStyle::Cyan);
    deps.ui.print("");
    deps.ui.print(&format!(
        "Open this link while signed in as a board member, approve the access \
         request, and export the token Trello displays as TRELLO_TOKEN:\n\n  {auth_url}"
    ));

    if open {
        deps.browser.open(&auth_url)?;
        deps.ui.print("");
        deps.ui.print("Opened the authorization page in your browser.");
    }

    Ok(CommandStatus::Completed)
}

fn status_with_deps(deps: &Arc<AuthDependencies>) -> Result<CommandStatus> {
    match credentials::resolve(deps.env.as_ref()) {
        Ok(CredentialResolution::Ready(creds)) => {
            deps.ui
                .print_styled("Credentials configured", MessageStyle::Success);
            deps.ui.print("- API key: set");
            deps.ui.print("- Token: set");
            deps.ui.print(&format!("- Scope: {}", creds.auth_scope));
            deps.ui
                .print(&format!("- API base URL: {}", creds.api_base_url));
        }
        Ok(CredentialResolution::Pending(pending)) => {
            deps.ui
                .print_styled("Token not configured", MessageStyle::Warning);
            deps.ui.print("");
            deps.ui.print(&pending.instructions());
        }
        Err(TrelloError::MissingApiKey) => {
            deps.ui
                .print_styled("API key not configured", MessageStyle::Error);
            deps.ui
                .print("Export TRELLO_API_KEY to begin, then run `trel auth url`.");
        }
        Err(other) => return Err(other.into()),
    }
    Ok(CommandStatus::Completed)
}

/// Execute the auth command with default dependencies
#[allow(clippy::unused_async)]
pub async fn execute(args: AuthArgs) -> Result<CommandStatus> {
    use trel_common::RealUserInterface;
    use trel_runtime::deps::{RealBrowserOpener, RealEnvironment};

    let deps = Arc::new(AuthDependencies {
        ui: Arc::new(RealUserInterface),
        env: Arc::new(RealEnvironment),
        browser: Arc::new(RealBrowserOpener),
    });

    execute_with_deps(&args, &deps)
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
