//! Common utilities for the trel CLI
//!
//! This crate provides the production and test implementations of the
//! [`trel_runtime::deps::UserInterface`] trait.

/// User interface implementations
pub mod ui;

pub use ui::{RealUserInterface, TestUserInterface};
