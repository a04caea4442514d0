use crossterm::event::{
    self, Event, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::app::{App, Message, Model};
use crate::app::model::Pane;
use crate::editor::Direction;

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != event::KeyEventKind::Release => {
                Self::handle_key(*key, model)
            }
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: event::KeyEvent, model: &Model) -> Option<Message> {
        // Prompt captures all input while open.
        if model.prompt.is_some() {
            return match key.code {
                KeyCode::Esc => Some(Message::PromptCancel),
                KeyCode::Enter => Some(Message::PromptSubmit),
                KeyCode::Backspace => Some(Message::PromptBackspace),
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    Some(Message::PromptInput(c))
                }
                _ => None,
            };
        }

        // Global chords
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('o') => return Some(Message::OpenImportPrompt),
                KeyCode::Char('s') => return Some(Message::Export),
                KeyCode::Char('q' | 'c') => return Some(Message::Quit),
                KeyCode::Home => return Some(Message::MoveToStart),
                KeyCode::End => return Some(Message::MoveToEnd),
                _ => {}
            }
        }
        if key.code == KeyCode::Tab {
            return Some(Message::SwitchFocus);
        }

        match model.focus {
            Pane::Editor => Self::handle_editor_key(key),
            Pane::Preview => Self::handle_preview_key(key, model),
        }
    }

    fn handle_editor_key(key: event::KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                Some(Message::InsertChar(c))
            }
            KeyCode::Enter => Some(Message::SplitLine),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
            KeyCode::Home => Some(Message::MoveHome),
            KeyCode::End => Some(Message::MoveEnd),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown => Some(Message::PageDown),
            _ => None,
        }
    }

    fn handle_preview_key(key: event::KeyEvent, model: &Model) -> Option<Message> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                model
                    .preview_view
                    .can_scroll_down()
                    .then_some(Message::PreviewScrollDown(1))
            }
            KeyCode::Char('k') | KeyCode::Up => {
                model
                    .preview_view
                    .can_scroll_up()
                    .then_some(Message::PreviewScrollUp(1))
            }
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::Char(' ') | KeyCode::PageDown => Some(Message::PageDown),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.prompt.is_some() {
            return None;
        }

        let area = terminal_area(model);
        let editor = crate::ui::editor_pane_area(area);
        let preview = crate::ui::preview_pane_area(area);

        if let Some((row, col)) = content_position(mouse, preview, &model.preview_view) {
            return match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    Some(Message::PreviewDragStart(row, col))
                }
                MouseEventKind::Drag(MouseButton::Left) if model.selection.is_some() => {
                    Some(Message::PreviewDragMove(row, col))
                }
                MouseEventKind::Up(MouseButton::Left) if model.selection.is_some() => {
                    Some(Message::PreviewDragEnd(row, col))
                }
                MouseEventKind::ScrollDown => Some(Message::PreviewScrollDown(3)),
                MouseEventKind::ScrollUp => Some(Message::PreviewScrollUp(3)),
                _ => None,
            };
        }

        if let Some((line, col)) = content_position(mouse, editor, &model.editor_view) {
            return match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(Message::MoveTo(line, col)),
                MouseEventKind::ScrollDown => Some(Message::EditorScrollDown(3)),
                MouseEventKind::ScrollUp => Some(Message::EditorScrollUp(3)),
                _ => None,
            };
        }

        // A drag that leaves the preview pane still ends the selection.
        if model.selection.is_some()
            && matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left))
        {
            let sel = model.selection.as_ref()?;
            return Some(Message::PreviewDragEnd(sel.active.0, sel.active.1));
        }

        None
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

fn terminal_area(model: &Model) -> Rect {
    Rect::new(0, 0, model.terminal_size.0, model.terminal_size.1)
}

/// Translate a terminal-cell mouse position into pane content
/// coordinates, scroll offset applied.
fn content_position(
    mouse: MouseEvent,
    content: Rect,
    view: &crate::ui::viewport::Viewport,
) -> Option<(usize, usize)> {
    if mouse.column < content.x
        || mouse.column >= content.x + content.width
        || mouse.row < content.y
        || mouse.row >= content.y + content.height
    {
        return None;
    }
    let row = (mouse.row - content.y) as usize + view.offset();
    let col = (mouse.column - content.x) as usize;
    Some((row, col))
}
