//! User interface implementations
//!
//! [`RealUserInterface`] writes styled output to the terminal via `console`
//! and `indicatif`. [`TestUserInterface`] captures everything printed so
//! command tests can assert on the output.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use indicatif::ProgressBar;

use trel_runtime::deps::{MessageStyle, ProgressIndicator, UserInterface};

/// Production terminal UI.
pub struct RealUserInterface;

impl UserInterface for RealUserInterface {
    fn create_spinner(&self) -> Box<dyn ProgressIndicator> {
        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        Box::new(RealProgressIndicator { bar })
    }

    fn print(&self, message: &str) {
        println!("{message}");
    }

    fn print_styled(&self, message: &str, style: MessageStyle) {
        let styled = match style {
            MessageStyle::Bold => console::style(message).bold(),
            MessageStyle::Cyan => console::style(message).cyan(),
            MessageStyle::Warning => console::style(message).yellow(),
            MessageStyle::Error => console::style(message).red(),
            MessageStyle::Success => console::style(message).green(),
        };
        println!("{styled}");
    }

    fn is_interactive(&self) -> bool {
        console::Term::stdout().is_term()
    }
}

/// Spinner backed by an `indicatif` progress bar.
struct RealProgressIndicator {
    bar: ProgressBar,
}

impl ProgressIndicator for RealProgressIndicator {
    fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

/// Capturing UI for tests. Every printed line (and spinner message) is
/// recorded and retrievable via [`TestUserInterface::get_output`].
pub struct TestUserInterface {
    output: Arc<Mutex<Vec<String>>>,
}

impl Default for TestUserInterface {
    fn default() -> Self {
        Self::new()
    }
}

impl TestUserInterface {
    /// Create an empty capturing UI.
    pub fn new() -> Self {
        Self {
            output: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All lines printed so far, in order.
    pub fn get_output(&self) -> Vec<String> {
        self.output.lock().unwrap().clone()
    }
}

impl UserInterface for TestUserInterface {
    fn create_spinner(&self) -> Box<dyn ProgressIndicator> {
        Box::new(TestProgressIndicator {
            output: Arc::clone(&self.output),
        })
    }

    fn print(&self, message: &str) {
        self.output.lock().unwrap().push(message.to_string());
    }

    fn print_styled(&self, message: &str, _style: MessageStyle) {
        self.output.lock().unwrap().push(message.to_string());
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

struct TestProgressIndicator {
    output: Arc<Mutex<Vec<String>>>,
}

impl ProgressIndicator for TestProgressIndicator {
    fn set_message(&self, message: &str) {
        self.output.lock().unwrap().push(message.to_string());
    }

    fn finish_and_clear(&self) {}
}

#[cfg(test)]
#[path = "ui_tests.rs"]
mod tests;
