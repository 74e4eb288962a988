//! Command implementations module

/// Authorization helpers (`auth url`, `auth status`)
pub mod auth;
/// Card creation command
pub mod create;
/// Card fetch command
pub mod fetch;
/// Card management command (comments, attachments, completion)
pub mod manage;

use std::sync::Arc;

use trel_runtime::credentials::AuthPending;
use trel_runtime::deps::{MessageStyle, UserInterface};

/// Outcome of a command run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The operation ran to completion.
    Completed,
    /// Credential resolution halted pending authorization. The instructions
    /// were printed; nothing was sent to Trello.
    AuthPending,
}

/// Print the token bootstrap instructions for a pending authorization.
pub(crate) fn report_auth_pending(ui: &Arc<dyn UserInterface>, pending: &AuthPending) {
    ui.print_styled("Trello authorization required", MessageStyle::Warning);
    ui.print("");
    ui.print(&pending.instructions());
}
