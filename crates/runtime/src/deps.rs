//! Dependency injection traits for testability
//!
//! This module provides trait abstractions for the external dependencies of
//! the command layer, allowing for easy mocking and testing.

use anyhow::Result;

/// Read access to process environment values.
///
/// Commands never touch `std::env` directly; credential resolution takes an
/// `Environment` so tests can supply arbitrary configurations without
/// mutating process-global state.
pub trait Environment: Send + Sync {
    /// Look up an environment value. Empty values are treated as unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// Production environment implementation backed by `std::env`.
pub struct RealEnvironment;

impl Environment for RealEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|value| !value.is_empty())
    }
}

/// User interface operations
pub trait UserInterface: Send + Sync {
    /// Create a spinner progress indicator
    fn create_spinner(&self) -> Box<dyn ProgressIndicator>;

    /// Print a message
    fn print(&self, message: &str);

    /// Print a styled message
    fn print_styled(&self, message: &str, style: MessageStyle);

    /// Check if running in interactive mode
    fn is_interactive(&self) -> bool;
}

/// Progress indicator trait
pub trait ProgressIndicator: Send + Sync {
    /// Set the message
    fn set_message(&self, message: &str);

    /// Finish and clear the progress
    fn finish_and_clear(&self);
}

/// Message styling options
#[derive(Debug, Clone, Copy)]
pub enum MessageStyle {
    /// Bold text style
    Bold,
    /// Cyan colored text
    Cyan,
    /// Warning style (yellow)
    Warning,
    /// Error style (red)
    Error,
    /// Success style (green)
    Success,
}

/// Opens URLs in the system browser.
pub trait BrowserOpener: Send + Sync {
    /// Open the given URL in the default browser.
    fn open(&self, url: &str) -> Result<()>;
}

/// Production browser opener backed by the `webbrowser` crate.
pub struct RealBrowserOpener;

impl BrowserOpener for RealBrowserOpener {
    fn open(&self, url: &str) -> Result<()> {
        webbrowser::open(url).map_err(|e| anyhow::anyhow!("failed to open browser: {e}"))
    }
}
