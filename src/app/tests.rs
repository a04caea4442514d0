use super::*;
use crate::editor::{Buffer, Direction};
use crate::lint::Linter;
use crate::sync::SyncController;

fn model_with(content: &str) -> Model {
    let mut buffer = Buffer::from_text(content);
    buffer.mark_clean();
    let sync = SyncController::new(Some(Linter::new()), 300);
    let model = Model::new(buffer, sync, (120, 40));
    update(model, Message::UpdateCycle)
}

fn type_str(mut model: Model, text: &str) -> Model {
    for c in text.chars() {
        model = update(model, Message::InsertChar(c));
    }
    model
}

#[test]
fn test_typing_edits_buffer_and_marks_dirty() {
    let model = model_with("");
    let model = type_str(model, "<p>hi</p>");
    assert_eq!(model.buffer.text(), "<p>hi</p>");
    assert!(model.buffer.is_dirty());
}

#[test]
fn test_edits_schedule_exactly_one_cycle() {
    let mut model = model_with("");
    assert_eq!(model.sync.update_count(), 1);

    model = type_str(model, "<p>hello</p>");
    // The event loop notices the revision change once per burst.
    assert!(model.take_buffer_changed());
    assert!(!model.take_buffer_changed());
    model.sync.note_buffer_changed(1_000);

    assert!(!model.sync.take_update_ready(1_200));
    assert!(model.sync.take_update_ready(1_300));
    model = update(model, Message::UpdateCycle);

    assert_eq!(model.sync.update_count(), 2);
    assert_eq!(model.sync.preview().line_text(0), Some("hello"));
}

#[test]
fn test_cursor_moves_keep_buffer_clean() {
    let mut model = model_with("<p>line</p>\n<p>two</p>");
    model = update(model, Message::MoveCursor(Direction::Down));
    model = update(model, Message::MoveEnd);
    assert!(!model.buffer.is_dirty());
    assert!(!model.take_buffer_changed());
}

#[test]
fn test_update_cycle_refreshes_markers() {
    let mut model = model_with("<p>ok</p>");
    assert_eq!(model.sync.marker_count(), 0);

    model = update(model, Message::MoveToEnd);
    model = type_str(model, "<div>");
    model = update(model, Message::UpdateCycle);
    assert_eq!(model.sync.marker_count(), 1);
}

#[test]
fn test_preview_click_highlights_and_reveals() {
    let many_lines = "<p>filler</p>\n".repeat(50) + "<p>target text</p>";
    let mut model = model_with(&many_lines);

    // The target renders on preview row 50.
    model = update(model, Message::PreviewDragStart(50, 2));
    model = update(model, Message::PreviewDragEnd(50, 2));

    let hl = model.sync.active_highlight().expect("highlight applied");
    let text = model.buffer.text();
    assert_eq!(&text[hl.start..hl.end], "target text");
    // The editor scrolled the match into view.
    assert!(model.editor_view.visible_range().contains(&50));
}

#[test]
fn test_preview_drag_selects_rendered_text() {
    let mut model = model_with("<p>alpha beta gamma</p>");

    model = update(model, Message::PreviewDragStart(0, 6));
    model = update(model, Message::PreviewDragMove(0, 10));
    assert!(model.selection.is_some_and(|s| s.dragging));
    model = update(model, Message::PreviewDragEnd(0, 10));

    assert_eq!(model.selection_text(), "beta");
    let hl = model.sync.active_highlight().expect("highlight applied");
    assert_eq!((hl.start, hl.end), (9, 13));
}

#[test]
fn test_update_cycle_clears_selection() {
    let mut model = model_with("<p>text</p>");
    model = update(model, Message::PreviewDragStart(0, 0));
    model = update(model, Message::PreviewDragMove(0, 3));
    model = update(model, Message::PreviewDragEnd(0, 3));
    assert!(model.selection.is_some());

    model = update(model, Message::UpdateCycle);
    assert!(model.selection.is_none());
}

#[test]
fn test_click_on_empty_preview_is_harmless() {
    let mut model = model_with("");
    model = update(model, Message::PreviewDragStart(0, 0));
    model = update(model, Message::PreviewDragEnd(0, 0));
    assert!(model.sync.active_highlight().is_none());
}

#[test]
fn test_prompt_flow_collects_path() {
    let mut model = model_with("");
    model = update(model, Message::OpenImportPrompt);
    assert!(model.prompt.is_some());

    for c in "page.html".chars() {
        model = update(model, Message::PromptInput(c));
    }
    model = update(model, Message::PromptBackspace);
    model = update(model, Message::PromptInput('l'));
    model = update(model, Message::PromptSubmit);

    assert!(model.prompt.is_none());
    assert_eq!(model.pending_import.as_deref(), Some("page.html"));
}

#[test]
fn test_prompt_cancel_discards_input() {
    let mut model = model_with("");
    model = update(model, Message::OpenImportPrompt);
    model = update(model, Message::PromptInput('x'));
    model = update(model, Message::PromptCancel);
    assert!(model.prompt.is_none());
    assert!(model.pending_import.is_none());
}

#[test]
fn test_quit_with_unsaved_changes_requires_confirmation() {
    let mut model = model_with("");
    model = type_str(model, "x");

    model = update(model, Message::Quit);
    assert!(!model.should_quit);
    assert!(model.quit_confirmed);

    model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_other_action_resets_quit_confirmation() {
    let mut model = model_with("");
    model = type_str(model, "x");
    model = update(model, Message::Quit);
    assert!(model.quit_confirmed);

    model = update(model, Message::MoveCursor(Direction::Left));
    assert!(!model.quit_confirmed);
    model = update(model, Message::Quit);
    assert!(!model.should_quit);
}

#[test]
fn test_quit_with_clean_buffer_is_immediate() {
    let model = model_with("<p>saved</p>");
    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_switch_focus_toggles_panes() {
    let model = model_with("");
    assert_eq!(model.focus, Pane::Editor);
    let model = update(model, Message::SwitchFocus);
    assert_eq!(model.focus, Pane::Preview);
    let model = update(model, Message::SwitchFocus);
    assert_eq!(model.focus, Pane::Editor);
}

#[test]
fn test_resize_updates_viewports() {
    let mut model = model_with("");
    model = update(model, Message::Resize(200, 60));
    assert_eq!(model.terminal_size, (200, 60));
    let pane = crate::ui::editor_pane_area(ratatui::layout::Rect::new(0, 0, 200, 60));
    assert_eq!(model.editor_view.width(), pane.width);
    assert_eq!(model.editor_view.height(), pane.height);
}

#[test]
fn test_import_effect_runs_immediate_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("next.html");
    std::fs::write(&path, "<h1>Next</h1>").unwrap();

    let mut model = model_with("<p>old</p>");
    let before = model.sync.update_count();
    model = update(model, Message::OpenImportPrompt);
    for c in path.to_string_lossy().chars() {
        model = update(model, Message::PromptInput(c));
    }
    model = update(model, Message::PromptSubmit);
    App::handle_message_side_effects(&mut model, &Message::PromptSubmit);

    assert_eq!(model.sync.update_count(), before + 1);
    assert_eq!(model.sync.preview().line_text(0), Some("Next"));
    // The revision bump also schedules the normal debounced cycle.
    assert!(model.take_buffer_changed());
}

#[test]
fn test_export_effect_writes_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let cwd = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let mut model = type_str(model_with(""), "<p>out</p>");
    App::handle_message_side_effects(&mut model, &Message::Export);

    let written = std::fs::read_to_string(EXPORT_FILE_NAME).unwrap();
    std::env::set_current_dir(cwd).unwrap();

    assert_eq!(written, "<p>out</p>");
    assert!(!model.buffer.is_dirty());
}
