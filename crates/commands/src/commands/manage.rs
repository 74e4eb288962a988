//! Manage command with dependency injection for better testability
//!
//! Leaves comments, uploads attachments, or marks a card complete. Actions
//! run in that order; the first failure aborts the remainder and is surfaced
//! verbatim.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use trel_runtime::api_client::TrelloApi;
use trel_runtime::credentials::{self, CredentialResolution};
use trel_runtime::deps::{Environment, MessageStyle, UserInterface};

use crate::commands::{CommandStatus, report_auth_pending};

/// Manage command arguments (matches CLI parser)
#[derive(Debug, Clone)]
pub struct ManageArgs {
    /// Card short link or full id
    pub card: String,
    /// Text to add as a comment
    pub comment: Option<String>,
    /// Files to upload as attachments
    pub attachments: Vec<PathBuf>,
    /// Mark the card as complete (sets dueComplete)
    pub complete: bool,
}

/// Dependencies for the manage command
pub struct ManageDependencies {
    /// User interface for output
    pub ui: Arc<dyn UserInterface>,
    /// Environment the credentials are resolved from
    pub env: Arc<dyn Environment>,
    /// Trello API client
    pub api: Arc<dyn TrelloApi>,
}

/// Execute the manage command with injected dependencies
pub async fn execute_with_deps(
    args: ManageArgs,
    deps: &Arc<ManageDependencies>,
) -> Result<CommandStatus> {
    if args.comment.is_none() && args.attachments.is_empty() && !args.complete {
        anyhow::bail!("specify at least one action: --comment, --attachment, or --complete");
    }

    // Validate attachment paths before touching the network.
    for path in &args.attachments {
        if !path.is_file() {
            anyhow::bail!("attachment not found or not a file: {}", path.display());
        }
    }

    let creds = match credentials::resolve(deps.env.as_ref())? {
        CredentialResolution::Ready(creds) => creds,
        CredentialResolution::Pending(pending) => {
            report_auth_pending(&deps.ui, &pending);
            return Ok(CommandStatus::AuthPending);
        }
    };

    if let Some(text) = args.comment.as_deref() {
        deps.api.add_comment(&creds, &args.card, text).await?;
        deps.ui.print("- Comment added.");
    }

    for path in &args.attachments {
        let contents = std::fs::read(path)
            .with_context(|| format!("failed to read attachment {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("attachment");
        deps.api
            .upload_attachment(&creds, &args.card, file_name, contents)
            .await?;
        deps.ui.print(&format!("- Uploaded {file_name}."));
    }

    if args.complete {
        deps.api.set_due_complete(&creds, &args.card, true).await?;
        deps.ui.print("- Card marked complete.");
    }

    deps.ui.print_styled("Done.", MessageStyle::Success);
    Ok(CommandStatus::Completed)
}

/// Execute the manage command with default dependencies
pub async fn execute(args: ManageArgs) -> Result<CommandStatus> {
    use trel_common::RealUserInterface;
    use trel_runtime::api_client::TrelloHttpClient;
    use trel_runtime::deps::RealEnvironment;

    let deps = Arc::new(ManageDependencies {
        ui: Arc::new(RealUserInterface),
        env: Arc::new(RealEnvironment),
        api: Arc::new(TrelloHttpClient::new()?),
    });

    execute_with_deps(args, &deps).await
}

#[cfg(test)]
#[path = "manage_tests.rs"]
mod tests;
