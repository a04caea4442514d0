// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. preview::PreviewDocument)
    clippy::module_name_repetitions
)]

//! # Htmlive
//!
//! A terminal live HTML editor with inline preview and validation.
//!
//! Htmlive pairs an editable HTML buffer with a live preview pane:
//! - Debounced buffer-to-preview synchronization
//! - Click/selection in the preview highlights the matching source
//! - HTMLHint-style validation markers in the editor
//! - Import/export of `.html` files
//!
//! ## Architecture
//!
//! Htmlive uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`editor`]: Text buffer, decorations, and markers
//! - [`preview`]: Preview document parsing and layout
//! - [`lint`]: HTML validation rules
//! - [`sync`]: The controller tying buffer, preview, and linter together
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod config;
pub mod editor;
pub mod lint;
pub mod preview;
pub mod sync;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{Buffer, Position};
    pub use crate::preview::PreviewDocument;
    pub use crate::sync::SyncController;
}
