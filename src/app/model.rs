use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::editor::Buffer;
use crate::sync::SyncController;
use crate::ui::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Editor,
    Preview,
}

/// Input state of the import prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptState {
    pub input: String,
}

/// A mouse selection in the preview pane, in (row, display column)
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSelection {
    pub anchor: (usize, usize),
    pub active: (usize, usize),
    pub dragging: bool,
}

impl PreviewSelection {
    /// Endpoints in document order.
    pub fn ordered(&self) -> ((usize, usize), (usize, usize)) {
        if self.anchor <= self.active {
            (self.anchor, self.active)
        } else {
            (self.active, self.anchor)
        }
    }

    /// A selection that never left its starting cell is a click.
    pub fn is_click(&self) -> bool {
        self.anchor == self.active
    }
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The HTML source being edited
    pub buffer: Buffer,
    /// Preview, markers, highlight, and the update debouncer
    pub sync: SyncController,
    /// Editor pane scroll state
    pub editor_view: Viewport,
    /// Preview pane scroll state
    pub preview_view: Viewport,
    /// Which pane has keyboard focus
    pub focus: Pane,
    /// Import prompt, when open
    pub prompt: Option<PromptState>,
    /// Active mouse selection in the preview pane
    pub selection: Option<PreviewSelection>,
    /// Path the buffer was imported from, if any
    pub file_path: Option<PathBuf>,
    /// Global config path shown in the status line tooltip
    pub config_global_path: Option<PathBuf>,
    /// Local override path
    pub config_local_path: Option<PathBuf>,
    /// Import path submitted from the prompt, consumed by the effects layer
    pub pending_import: Option<String>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Set after first quit attempt with unsaved changes; second quit proceeds
    pub quit_confirmed: bool,
    /// Last known terminal size, for mouse hit testing
    pub terminal_size: (u16, u16),
    toast: Option<Toast>,
    /// Buffer revision last reported to the debouncer
    noted_revision: u64,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("focus", &self.focus)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a new model sized to the terminal. Both panes get the same
    /// content size.
    pub fn new(buffer: Buffer, sync: SyncController, terminal_size: (u16, u16)) -> Self {
        let pane = crate::ui::editor_pane_area(ratatui::layout::Rect::new(
            0,
            0,
            terminal_size.0,
            terminal_size.1,
        ));
        let buffer_lines = buffer.line_count();
        let preview_lines = sync.preview().line_count();
        let noted_revision = buffer.revision();
        Self {
            buffer,
            sync,
            editor_view: Viewport::new(pane.width, pane.height, buffer_lines),
            preview_view: Viewport::new(pane.width, pane.height, preview_lines),
            focus: Pane::Editor,
            prompt: None,
            selection: None,
            file_path: None,
            config_global_path: None,
            config_local_path: None,
            pending_import: None,
            should_quit: false,
            quit_confirmed: false,
            terminal_size,
            toast: None,
            noted_revision,
        }
    }

    /// Whether the buffer changed since this was last called. The event
    /// loop uses this to feed the update debouncer.
    pub fn take_buffer_changed(&mut self) -> bool {
        let revision = self.buffer.revision();
        if revision != self.noted_revision {
            self.noted_revision = revision;
            true
        } else {
            false
        }
    }

    /// Rendered text covered by the current preview selection, rows
    /// joined with newlines.
    pub fn selection_text(&self) -> String {
        let Some(selection) = self.selection.as_ref() else {
            return String::new();
        };
        let ordered = selection.ordered();
        let preview = self.sync.preview();
        let (start, end) = (ordered.0.0, ordered.1.0);
        let mut parts = Vec::new();
        for row in start..=end {
            let Some(text) = preview.line_text(row) else {
                continue;
            };
            let cols = crate::ui::render::selection_cols_on_row(
                ordered,
                row,
                unicode_width::UnicodeWidthStr::width(text),
            );
            if let Some(range) = cols {
                let (_, inside, _) = crate::ui::render::split_at_display_cols(text, &range);
                parts.push(inside);
            }
        }
        parts.join("\n")
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(
            Buffer::empty(),
            SyncController::new(None, crate::sync::DEBOUNCE_QUIET_MS),
            (80, 24),
        )
    }
}
