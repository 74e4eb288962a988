//! Tests for UI implementations

use super::*;
use trel_runtime::deps::MessageStyle;

#[test]
fn test_real_user_interface_print() {
    let ui = RealUserInterface;

    // These will print to stdout, but we're testing they don't panic
    ui.print("Hello, world!");
    ui.print("");
    ui.print("Multi\nline\ntext");
}

#[test]
fn test_real_user_interface_print_styled() {
    let ui = RealUserInterface;

    ui.print_styled("Bold text", MessageStyle::Bold);
    ui.print_styled("Cyan text", MessageStyle::Cyan);
    ui.print_styled("Warning text", MessageStyle::Warning);
    ui.print_styled("Error text", MessageStyle::Error);
    ui.print_styled("Success text", MessageStyle::Success);
}

#[test]
fn test_real_user_interface_is_interactive() {
    let ui = RealUserInterface;

    // This checks if stdout is a TTY
    let _ = ui.is_interactive();
}

#[test]
fn test_real_progress_indicator() {
    let ui = RealUserInterface;
    let spinner = ui.create_spinner();

    spinner.set_message("Loading...");
    spinner.set_message("Processing...");
    spinner.set_message("");
    spinner.finish_and_clear();
}

#[test]
fn test_test_user_interface_captures_output() {
    let ui = TestUserInterface::new();
    ui.print("first");
    ui.print_styled("second", MessageStyle::Success);

    let output = ui.get_output();
    assert_eq!(output, vec!["first".to_string(), "second".to_string()]);
}

#[test]
fn test_test_user_interface_captures_spinner_messages() {
    let ui = TestUserInterface::new();
    let spinner = ui.create_spinner();
    spinner.set_message("Fetching card");
    spinner.finish_and_clear();

    let output = ui.get_output();
    assert!(output.iter().any(|s| s.contains("Fetching card")));
}

#[test]
fn test_test_user_interface_is_not_interactive() {
    let ui = TestUserInterface::new();
    assert!(!ui.is_interactive());
}
