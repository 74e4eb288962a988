//! Fetch command with dependency injection for better testability
//!
//! Fetches a card's details, comments, and attachments in one GET and prints
//! them as markdown or structured JSON.

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use trel_runtime::api_client::TrelloApi;
use trel_runtime::credentials::{self, CredentialResolution};
use trel_runtime::deps::{Environment, UserInterface};

use crate::commands::{CommandStatus, report_auth_pending};
use crate::format;

/// Output format for fetched cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFormat {
    /// Human-readable markdown summary
    Markdown,
    /// Structured JSON pass-through
    Json,
}

/// Fetch command arguments (matches CLI parser)
#[derive(Debug, Clone)]
pub struct FetchArgs {
    /// Card short link, full id, or numeric short id
    pub card: String,
    /// Output format
    pub format: FetchFormat,
    /// Maximum number of comment actions to request
    pub actions_limit: u32,
}

/// Dependencies for the fetch command
pub struct FetchDependencies {
    /// User interface for output
    pub ui: Arc<dyn UserInterface>,
    /// Environment the credentials are resolved from
    pub env: Arc<dyn Environment>,
    /// Trello API client
    pub api: Arc<dyn TrelloApi>,
}

/// Execute the fetch command with injected dependencies
pub async fn execute_with_deps(
    args: FetchArgs,
    deps: &Arc<FetchDependencies>,
) -> Result<CommandStatus> {
    let creds = match credentials::resolve(deps.env.as_ref())? {
        CredentialResolution::Ready(creds) => creds,
        CredentialResolution::Pending(pending) => {
            report_auth_pending(&deps.ui, &pending);
            return Ok(CommandStatus::AuthPending);
        }
    };

    let spinner = deps.ui.create_spinner();
    spinner.set_message(&format!("Fetching card {}", args.card));
    let fetched = deps
        .api
        .get_card(&creds, &args.card, args.actions_limit)
        .await;
    spinner.finish_and_clear();
    let card = fetched?;
    debug!(card = %card.id, comments = card.actions.len(), "card fetched");

    let rendered = match args.format {
        FetchFormat::Markdown => format::markdown_card(&card, args.actions_limit as usize),
        FetchFormat::Json => format::json_payload(&card)?,
    };
    deps.ui.print(&rendered);

    Ok(CommandStatus::Completed)
}

/// Execute the fetch command with default dependencies
pub async fn execute(args: FetchArgs) -> Result<CommandStatus> {
    use trel_common::RealUserInterface;
    use trel_runtime::api_client::TrelloHttpClient;
    use trel_runtime::deps::RealEnvironment;

    let deps = Arc::new(FetchDependencies {
        ui: Arc::new(RealUserInterface),
        env: Arc::new(RealEnvironment),
        api: Arc::new(TrelloHttpClient::new()?),
    });

    execute_with_deps(args, &deps).await
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
