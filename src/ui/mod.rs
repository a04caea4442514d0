//! Terminal UI rendering.
//!
//! Two bordered panes split the screen: the editor on the left, the
//! rendered preview on the right. The bottom rows hold the status bar and,
//! when active, a toast line and the import prompt.

pub mod render;
pub mod status;
pub mod viewport;

pub use render::{editor_pane_area, preview_pane_area, render, split_panes};

/// Editor pane share of the width; the preview takes the rest.
pub const EDITOR_WIDTH_PERCENT: u16 = 50;
pub const PREVIEW_WIDTH_PERCENT: u16 = 100 - EDITOR_WIDTH_PERCENT;

#[cfg(test)]
mod tests;
