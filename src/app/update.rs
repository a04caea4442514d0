use ratatui::layout::Rect;

use crate::app::Model;
use crate::app::model::{Pane, PreviewSelection, PromptState, ToastLevel};
use crate::editor::Direction;

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Delete character before cursor (Backspace)
    DeleteBack,
    /// Delete character at cursor (Delete)
    DeleteForward,
    /// Split line at cursor (Enter)
    SplitLine,
    /// Move cursor in a direction
    MoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    MoveHome,
    /// Move cursor to end of line (End)
    MoveEnd,
    /// Move cursor to start of buffer (Ctrl+Home)
    MoveToStart,
    /// Move cursor to end of buffer (Ctrl+End)
    MoveToEnd,
    /// Move cursor to absolute position (line, col) from a mouse click
    MoveTo(usize, usize),

    // Panes
    /// Switch focus between editor and preview
    SwitchFocus,
    /// Scroll editor pane up by n lines
    EditorScrollUp(usize),
    /// Scroll editor pane down by n lines
    EditorScrollDown(usize),
    /// Scroll preview pane up by n lines
    PreviewScrollUp(usize),
    /// Scroll preview pane down by n lines
    PreviewScrollDown(usize),
    /// Scroll focused pane up one page
    PageUp,
    /// Scroll focused pane down one page
    PageDown,

    // Preview interaction (document coordinates)
    /// Start a selection in the preview (mouse down)
    PreviewDragStart(usize, usize),
    /// Extend the selection (mouse drag)
    PreviewDragMove(usize, usize),
    /// Finish the selection (mouse up); a zero-size selection is a click
    PreviewDragEnd(usize, usize),

    // Sync
    /// Debounce expired: rebuild the preview and revalidate
    UpdateCycle,

    // Import/export
    /// Open the import path prompt
    OpenImportPrompt,
    /// Append a character to the prompt
    PromptInput(char),
    /// Delete the last prompt character
    PromptBackspace,
    /// Close the prompt without importing
    PromptCancel,
    /// Submit the prompt path for import
    PromptSubmit,
    /// Write the buffer to index.html
    Export,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    // A pending quit confirmation survives only an immediate second Quit.
    if !matches!(msg, Message::Quit) {
        model.quit_confirmed = false;
    }

    match msg {
        // Editing
        Message::InsertChar(c) => {
            model.buffer.insert_char(c);
            after_edit(&mut model);
        }
        Message::DeleteBack => {
            model.buffer.delete_back();
            after_edit(&mut model);
        }
        Message::DeleteForward => {
            model.buffer.delete_forward();
            after_edit(&mut model);
        }
        Message::SplitLine => {
            model.buffer.split_line();
            after_edit(&mut model);
        }
        Message::MoveCursor(direction) => {
            model.buffer.move_cursor(direction);
            follow_cursor(&mut model);
        }
        Message::MoveHome => {
            model.buffer.move_home();
            follow_cursor(&mut model);
        }
        Message::MoveEnd => {
            model.buffer.move_end();
            follow_cursor(&mut model);
        }
        Message::MoveToStart => {
            model.buffer.move_to_start();
            follow_cursor(&mut model);
        }
        Message::MoveToEnd => {
            model.buffer.move_to_end();
            follow_cursor(&mut model);
        }
        Message::MoveTo(line, col) => {
            model.buffer.move_to(line, col);
            follow_cursor(&mut model);
        }

        // Panes
        Message::SwitchFocus => {
            model.focus = match model.focus {
                Pane::Editor => Pane::Preview,
                Pane::Preview => Pane::Editor,
            };
        }
        Message::EditorScrollUp(n) => model.editor_view.scroll_up(n),
        Message::EditorScrollDown(n) => model.editor_view.scroll_down(n),
        Message::PreviewScrollUp(n) => model.preview_view.scroll_up(n),
        Message::PreviewScrollDown(n) => model.preview_view.scroll_down(n),
        Message::PageUp => match model.focus {
            Pane::Editor => model.editor_view.page_up(),
            Pane::Preview => model.preview_view.page_up(),
        },
        Message::PageDown => match model.focus {
            Pane::Editor => model.editor_view.page_down(),
            Pane::Preview => model.preview_view.page_down(),
        },

        // Preview interaction
        Message::PreviewDragStart(row, col) => {
            model.selection = Some(PreviewSelection {
                anchor: (row, col),
                active: (row, col),
                dragging: false,
            });
        }
        Message::PreviewDragMove(row, col) => {
            if let Some(selection) = model.selection.as_mut() {
                selection.active = (row, col);
                selection.dragging = true;
            }
        }
        Message::PreviewDragEnd(row, col) => {
            if let Some(mut selection) = model.selection.take() {
                selection.active = (row, col);
                selection.dragging = false;
                if selection.is_click() {
                    let (r, c) = selection.anchor;
                    if model.sync.preview_clicked(&model.buffer, r, c) {
                        reveal_highlight(&mut model);
                    }
                } else {
                    model.selection = Some(selection);
                    let text = model.selection_text();
                    if model.sync.preview_selected(&model.buffer, &text) {
                        reveal_highlight(&mut model);
                    }
                }
            }
        }

        // Sync
        Message::UpdateCycle => {
            let content = model.buffer.text();
            model.sync.run_update_cycle(&content);
            model
                .preview_view
                .set_total_lines(model.sync.preview().line_count());
            // Regions were rebuilt; any selection points at the old ones.
            model.selection = None;
        }

        // Import/export
        Message::OpenImportPrompt => {
            model.prompt = Some(PromptState::default());
        }
        Message::PromptInput(c) => {
            if let Some(prompt) = model.prompt.as_mut() {
                prompt.input.push(c);
            }
        }
        Message::PromptBackspace => {
            if let Some(prompt) = model.prompt.as_mut() {
                prompt.input.pop();
            }
        }
        Message::PromptCancel => {
            model.prompt = None;
        }
        Message::PromptSubmit => {
            if let Some(prompt) = model.prompt.take() {
                model.pending_import = Some(prompt.input);
            }
        }
        // Filesystem write happens in the effects layer.
        Message::Export => {}

        // Window
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            let pane = crate::ui::editor_pane_area(Rect::new(0, 0, width, height));
            model.editor_view.resize(pane.width, pane.height);
            model.preview_view.resize(pane.width, pane.height);
        }

        // Application
        Message::Quit => {
            if model.buffer.is_dirty() && !model.quit_confirmed {
                model.quit_confirmed = true;
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes. Press quit again to discard.",
                );
            } else {
                model.should_quit = true;
            }
        }
    }

    model
}

fn after_edit(model: &mut Model) {
    model.editor_view.set_total_lines(model.buffer.line_count());
    follow_cursor(model);
}

fn follow_cursor(model: &mut Model) {
    let line = model.buffer.cursor().line;
    model.editor_view.ensure_visible(line);
}

fn reveal_highlight(model: &mut Model) {
    if let Some(pos) = model.sync.take_reveal() {
        model.editor_view.reveal_centered(pos.line);
    }
}
