use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::app::{Model, Pane};
use crate::editor::{Decoration, Marker};

use super::{EDITOR_WIDTH_PERCENT, PREVIEW_WIDTH_PERCENT, status};

/// Rows reserved below the panes: one message/prompt line, one status bar.
pub const FOOTER_ROWS: u16 = 2;

/// Split the terminal into the editor and preview pane rectangles.
pub fn split_panes(area: Rect) -> std::rc::Rc<[Rect]> {
    let main = Rect {
        height: area.height.saturating_sub(FOOTER_ROWS),
        ..area
    };
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(EDITOR_WIDTH_PERCENT),
            Constraint::Percentage(PREVIEW_WIDTH_PERCENT),
        ])
        .split(main)
}

/// Content rectangle of the editor pane (inside the border).
pub fn editor_pane_area(area: Rect) -> Rect {
    inner(split_panes(area)[0])
}

/// Content rectangle of the preview pane (inside the border).
pub fn preview_pane_area(area: Rect) -> Rect {
    inner(split_panes(area)[1])
}

fn inner(pane: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(pane)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let panes = split_panes(area);
    render_editor(model, frame, panes[0]);
    render_preview(model, frame, panes[1]);

    let message_area = Rect {
        y: area.y + area.height.saturating_sub(2),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };
    // The prompt takes precedence over a toast on the message line.
    if model.prompt.is_some() {
        status::render_prompt_bar(model, frame, message_area);
    } else {
        status::render_toast_bar(model, frame, message_area);
    }
    status::render_status_bar(model, frame, status_area);
}

fn render_editor(model: &Model, frame: &mut Frame, pane: Rect) {
    let block = Block::default()
        .title("Editor")
        .borders(Borders::ALL)
        .border_style(focus_style(model, Pane::Editor));
    let content = block.inner(pane);

    let highlight = model.sync.active_highlight();
    let markers = model.sync.markers();
    let lines: Vec<Line> = model
        .editor_view
        .visible_range()
        .map(|idx| {
            let text = model.buffer.line_at(idx).unwrap_or_default();
            styled_editor_line(&text, idx, highlight, markers)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), pane);

    // Terminal cursor tracks the buffer cursor while the editor has focus.
    if model.focus == Pane::Editor && model.prompt.is_none() {
        let cursor = model.buffer.cursor();
        if model.editor_view.visible_range().contains(&cursor.line) {
            let text = model.buffer.line_at(cursor.line).unwrap_or_default();
            let col = cursor.col.min(text.len());
            let x = text[..col].width() as u16;
            let y = (cursor.line - model.editor_view.offset()) as u16;
            if x < content.width {
                frame.set_cursor_position((content.x + x, content.y + y));
            }
        }
    }
}

fn render_preview(model: &Model, frame: &mut Frame, pane: Rect) {
    let block = Block::default()
        .title("Preview")
        .borders(Borders::ALL)
        .border_style(focus_style(model, Pane::Preview));

    let preview = model.sync.preview();
    let lines: Vec<Line> = model
        .preview_view
        .visible_range()
        .map(|row| {
            let text = preview.line_text(row).unwrap_or_default();
            match model
                .selection
                .as_ref()
                .and_then(|sel| selection_cols_on_row(sel.ordered(), row, text.width()))
            {
                Some(range) => {
                    let (before, selected, after) = split_at_display_cols(text, &range);
                    Line::from(vec![
                        Span::raw(before),
                        Span::styled(selected, Style::default().reversed()),
                        Span::raw(after),
                    ])
                }
                None => Line::raw(text.to_string()),
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), pane);
}

fn focus_style(model: &Model, pane: Pane) -> Style {
    if model.focus == pane && model.prompt.is_none() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

/// Style one buffer line, layering the validation markers under the
/// reverse-mapping highlight.
pub(crate) fn styled_editor_line(
    text: &str,
    line_idx: usize,
    highlight: Option<&Decoration>,
    markers: &[Marker],
) -> Line<'static> {
    let len = text.len();
    let highlight_range =
        highlight.and_then(|d| cols_on_line(line_idx, len, d.start_pos, d.end_pos));
    let marker_ranges: Vec<_> = markers
        .iter()
        .filter_map(|m| cols_on_line(line_idx, len, m.start_pos, m.end_pos))
        .collect();

    if highlight_range.is_none() && marker_ranges.is_empty() {
        return Line::raw(text.to_string());
    }

    let mut bounds = vec![0, len];
    if let Some(r) = &highlight_range {
        bounds.push(r.start);
        bounds.push(r.end);
    }
    for r in &marker_ranges {
        bounds.push(r.start);
        bounds.push(r.end);
    }
    bounds.sort_unstable();
    bounds.dedup();

    let spans: Vec<Span> = bounds
        .windows(2)
        .filter(|w| w[0] < w[1])
        .map(|w| {
            let segment = text[w[0]..w[1]].to_string();
            if highlight_range.as_ref().is_some_and(|r| r.contains(&w[0])) {
                Span::styled(segment, Style::default().bg(Color::Yellow).fg(Color::Black))
            } else if marker_ranges.iter().any(|r| r.contains(&w[0])) {
                Span::styled(
                    segment,
                    Style::default()
                        .fg(Color::Red)
                        .add_modifier(Modifier::UNDERLINED),
                )
            } else {
                Span::raw(segment)
            }
        })
        .collect();
    Line::from(spans)
}

/// Byte-column range a multi-line span occupies on `line_idx`, or `None`
/// when the span misses the line entirely.
pub(crate) fn cols_on_line(
    line_idx: usize,
    line_len: usize,
    start: crate::editor::Position,
    end: crate::editor::Position,
) -> Option<std::ops::Range<usize>> {
    if line_idx < start.line || line_idx > end.line {
        return None;
    }
    let from = if line_idx == start.line {
        start.column.min(line_len)
    } else {
        0
    };
    let to = if line_idx == end.line {
        end.column.min(line_len)
    } else {
        line_len
    };
    (from < to).then_some(from..to)
}

/// Display-column range of the selection on `row`, or `None` when the row
/// is outside the selection.
pub(crate) fn selection_cols_on_row(
    ordered: ((usize, usize), (usize, usize)),
    row: usize,
    row_width: usize,
) -> Option<std::ops::Range<usize>> {
    let ((start_row, start_col), (end_row, end_col)) = ordered;
    if row < start_row || row > end_row {
        return None;
    }
    let from = if row == start_row {
        start_col.min(row_width)
    } else {
        0
    };
    let to = if row == end_row {
        end_col.min(row_width)
    } else {
        row_width
    };
    (from < to).then_some(from..to)
}

/// Split `text` at display-column boundaries into before/inside/after.
pub(crate) fn split_at_display_cols(
    text: &str,
    range: &std::ops::Range<usize>,
) -> (String, String, String) {
    let mut before = String::new();
    let mut inside = String::new();
    let mut after = String::new();
    let mut col = 0;
    for ch in text.chars() {
        if col < range.start {
            before.push(ch);
        } else if col < range.end {
            inside.push(ch);
        } else {
            after.push(ch);
        }
        col += ch.width().unwrap_or(0);
    }
    (before, inside, after)
}
