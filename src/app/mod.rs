//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! Filesystem effects (import/export) run after the pure update, keyed on
//! the message that requested them.

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use effects::{EXPORT_FILE_NAME, ImportError};
pub use model::{Model, Pane, PreviewSelection, PromptState, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::sync::DEBOUNCE_QUIET_MS;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
    lint_enabled: bool,
    debounce_ms: u64,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application, optionally opening a file at startup.
    pub const fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            lint_enabled: true,
            debounce_ms: DEBOUNCE_QUIET_MS,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Enable or disable HTML validation.
    pub const fn with_lint(mut self, enabled: bool) -> Self {
        self.lint_enabled = enabled;
        self
    }

    /// Override the quiet period between the last edit and the preview
    /// update.
    pub const fn with_debounce_ms(mut self, quiet_ms: u64) -> Self {
        self.debounce_ms = quiet_ms;
        self
    }

    /// Set config paths to show in diagnostics.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}

#[cfg(test)]
mod tests;
