use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model.file_path.as_ref().map_or_else(
        || "untitled".to_string(),
        |p| {
            p.file_name()
                .map_or_else(|| p.display().to_string(), |n| n.to_string_lossy().to_string())
        },
    );
    let dirty = if model.buffer.is_dirty() { " [+]" } else { "" };

    let cursor = model.buffer.cursor();
    let position = format!("Ln {}, Col {}", cursor.line + 1, cursor.col + 1);

    let issues = if !model.sync.lint_enabled() {
        "lint off".to_string()
    } else {
        match model.sync.marker_count() {
            0 => "no issues".to_string(),
            1 => "1 issue".to_string(),
            n => format!("{n} issues"),
        }
    };
    let pending = if model.sync.is_update_pending() {
        " ~"
    } else {
        ""
    };

    let status = format!(
        " {filename}{dirty}  {position}  {issues}{pending}  Tab:focus ^O:open ^S:export ^Q:quit"
    );
    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        crate::app::ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        crate::app::ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        crate::app::ToastLevel::Error => {
            ("[error]", Style::default().bg(Color::Red).fg(Color::White))
        }
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}

pub fn render_prompt_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(prompt) = model.prompt.as_ref() else {
        return;
    };
    let text = format!("Open file (.html): {}  Enter: open  Esc: cancel", prompt.input);
    let bar = Paragraph::new(text).style(Style::default().bg(Color::Blue).fg(Color::White));
    frame.render_widget(bar, area);
}
