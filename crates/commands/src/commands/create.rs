//! Create command with dependency injection for better testability
//!
//! Resolves the destination list (by id or case-insensitive name), then
//! creates the card with a single POST. List resolution is a pure function
//! over the board's fetched list collection so it can be tested without a
//! live API.

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use trel_runtime::api_client::TrelloApi;
use trel_runtime::credentials::{self, CredentialResolution, Credentials};
use trel_runtime::deps::{Environment, UserInterface};
use trel_runtime::error::TrelloError;
use trel_runtime::types::{Board, BoardList, CreateCardRequest};

use crate::commands::{CommandStatus, report_auth_pending};
use crate::format;

/// Output format for the created card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateFormat {
    /// Short human-readable confirmation
    Summary,
    /// Structured JSON pass-through
    Json,
}

/// Create command arguments (matches CLI parser)
#[derive(Debug, Clone)]
pub struct CreateArgs {
    /// Board short link or full id
    pub board: String,
    /// List name (case-insensitive) or list id on the board
    pub list: String,
    /// Title for the new card
    pub name: String,
    /// Card description
    pub desc: Option<String>,
    /// ISO-8601 due date/time
    pub due: Option<String>,
    /// Position in the list: top, bottom, or a fractional value
    pub pos: String,
    /// Label ids to attach
    pub labels: Vec<String>,
    /// Member ids to assign
    pub members: Vec<String>,
    /// URL to attach at creation time
    pub url_source: Option<String>,
    /// Output format
    pub format: CreateFormat,
}

/// Dependencies for the create command
pub struct CreateDependencies {
    /// User interface for output
    pub ui: Arc<dyn UserInterface>,
    /// Environment the credentials are resolved from
    pub env: Arc<dyn Environment>,
    /// Trello API client
    pub api: Arc<dyn TrelloApi>,
}

/// Resolve a list reference against a board's list collection.
///
/// An exact id match wins over name matching; names compare
/// case-insensitively after trimming. When several lists share a name, the
/// first one returned by the board is selected — a deliberate tie-break, not
/// silent ambiguity.
pub fn resolve_list<'a>(lists: &'a [BoardList], reference: &str) -> Option<&'a BoardList> {
    let normalized = reference.trim().to_lowercase();
    lists.iter().find(|candidate| {
        candidate.id == reference || candidate.name.trim().to_lowercase() == normalized
    })
}

/// Execute the create command with injected dependencies
pub async fn execute_with_deps(
    args: CreateArgs,
    deps: &Arc<CreateDependencies>,
) -> Result<CommandStatus> {
    let name = args.name.trim();
    if name.is_empty() {
        anyhow::bail!("card name must not be empty");
    }

    let creds = match credentials::resolve(deps.env.as_ref())? {
        CredentialResolution::Ready(creds) => creds,
        CredentialResolution::Pending(pending) => {
            report_auth_pending(&deps.ui, &pending);
            return Ok(CommandStatus::AuthPending);
        }
    };

    let spinner = deps.ui.create_spinner();
    spinner.set_message(&format!(
        "Resolving list '{}' on board {}",
        args.list, args.board
    ));
    let resolved = resolve_target(&creds, &args, deps).await;
    spinner.finish_and_clear();
    let (board, list) = resolved?;
    debug!(list = %list.id, board = %board.id, "list resolved");

    let request = CreateCardRequest {
        name: name.to_string(),
        id_list: list.id.clone(),
        desc: args.desc.clone(),
        pos: Some(args.pos.clone()),
        due: args.due.clone(),
        id_labels: join_ids(&args.labels),
        id_members: join_ids(&args.members),
        url_source: args.url_source.clone(),
    };

    let spinner = deps.ui.create_spinner();
    spinner.set_message(&format!("Creating card '{name}'"));
    let created = deps.api.create_card(&creds, &request).await;
    spinner.finish_and_clear();
    let card = created?;

    match args.format {
        CreateFormat::Summary => deps
            .ui
            .print(&format::created_card_summary(&card, &board, &list)),
        CreateFormat::Json => deps.ui.print(&format::json_payload(&card)?),
    }

    Ok(CommandStatus::Completed)
}

/// Fetch the board and its lists, then resolve the list reference.
async fn resolve_target(
    creds: &Credentials,
    args: &CreateArgs,
    deps: &Arc<CreateDependencies>,
) -> Result<(Board, BoardList), TrelloError> {
    let board = deps.api.get_board(creds, &args.board).await?;
    let lists = deps.api.get_board_lists(creds, &board.id).await?;
    let list = resolve_list(&lists, &args.list)
        .cloned()
        .ok_or_else(|| TrelloError::ListNotFound {
            list: args.list.clone(),
            board: args.board.clone(),
        })?;
    Ok((board, list))
}

fn join_ids(ids: &[String]) -> Option<String> {
    if ids.is_empty() {
        None
    } else {
        Some(ids.join(","))
    }
}

/// Execute the create command with default dependencies
pub async fn execute(args: CreateArgs) -> Result<CommandStatus> {
    use trel_common::RealUserInterface;
    use trel_runtime::api_client::TrelloHttpClient;
    use trel_runtime::deps::RealEnvironment;

    let deps = Arc::new(CreateDependencies {
        ui: Arc::new(RealUserInterface),
        env: Arc::new(RealEnvironment),
        api: Arc::new(TrelloHttpClient::new()?),
    });

    execute_with_deps(args, &deps).await
}

#[cfg(test)]
#[path = "create_tests.rs"]
mod tests;
