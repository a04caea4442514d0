use ratatui::layout::Rect;

use super::render::{
    FOOTER_ROWS, cols_on_line, selection_cols_on_row, split_at_display_cols, split_panes,
    styled_editor_line,
};
use crate::editor::{Decoration, Marker, Position, Severity};

#[test]
fn test_split_panes_reserves_footer_rows() {
    let panes = split_panes(Rect::new(0, 0, 100, 40));
    assert_eq!(panes.len(), 2);
    assert_eq!(panes[0].height, 40 - FOOTER_ROWS);
    assert_eq!(panes[1].height, 40 - FOOTER_ROWS);
}

#[test]
fn test_split_panes_halves_the_width() {
    let panes = split_panes(Rect::new(0, 0, 100, 40));
    assert_eq!(panes[0].width, 50);
    assert_eq!(panes[1].width, 50);
    assert_eq!(panes[1].x, 50);
}

#[test]
fn test_editor_and_preview_areas_sit_inside_borders() {
    let area = Rect::new(0, 0, 100, 40);
    let editor = super::editor_pane_area(area);
    let preview = super::preview_pane_area(area);
    assert_eq!(editor, Rect::new(1, 1, 48, 36));
    assert_eq!(preview, Rect::new(51, 1, 48, 36));
}

#[test]
fn test_cols_on_line_middle_line_spans_fully() {
    let range = cols_on_line(2, 10, Position::new(1, 4), Position::new(3, 2));
    assert_eq!(range, Some(0..10));
}

#[test]
fn test_cols_on_line_edges() {
    let start = Position::new(1, 4);
    let end = Position::new(3, 2);
    assert_eq!(cols_on_line(1, 10, start, end), Some(4..10));
    assert_eq!(cols_on_line(3, 10, start, end), Some(0..2));
    assert_eq!(cols_on_line(0, 10, start, end), None);
    assert_eq!(cols_on_line(4, 10, start, end), None);
}

#[test]
fn test_cols_on_line_clamps_to_line_length() {
    let range = cols_on_line(0, 3, Position::new(0, 1), Position::new(0, 99));
    assert_eq!(range, Some(1..3));
}

#[test]
fn test_selection_cols_single_row() {
    let ordered = ((2, 3), (2, 7));
    assert_eq!(selection_cols_on_row(ordered, 2, 20), Some(3..7));
    assert_eq!(selection_cols_on_row(ordered, 1, 20), None);
}

#[test]
fn test_selection_cols_multi_row() {
    let ordered = ((1, 5), (3, 2));
    assert_eq!(selection_cols_on_row(ordered, 1, 10), Some(5..10));
    assert_eq!(selection_cols_on_row(ordered, 2, 10), Some(0..10));
    assert_eq!(selection_cols_on_row(ordered, 3, 10), Some(0..2));
}

#[test]
fn test_split_at_display_cols_ascii() {
    let (before, inside, after) = split_at_display_cols("hello world", &(6..11));
    assert_eq!(before, "hello ");
    assert_eq!(inside, "world");
    assert_eq!(after, "");
}

#[test]
fn test_split_at_display_cols_wide_chars() {
    // Each CJK character is two columns wide.
    let (before, inside, after) = split_at_display_cols("日本語x", &(2..6));
    assert_eq!(before, "日");
    assert_eq!(inside, "本語");
    assert_eq!(after, "x");
}

#[test]
fn test_styled_line_without_spans_is_single_segment() {
    let line = styled_editor_line("plain text", 0, None, &[]);
    assert_eq!(line.spans.len(), 1);
    assert_eq!(line.spans[0].content, "plain text");
}

#[test]
fn test_styled_line_splits_around_highlight() {
    let deco = Decoration {
        id: 1,
        start: 3,
        end: 8,
        start_pos: Position::new(0, 3),
        end_pos: Position::new(0, 8),
    };
    let line = styled_editor_line("<p>hello</p>", 0, Some(&deco), &[]);
    let texts: Vec<_> = line.spans.iter().map(|s| s.content.as_ref()).collect();
    assert_eq!(texts, vec!["<p>", "hello", "</p>"]);
}

#[test]
fn test_styled_line_marks_marker_range() {
    let marker = Marker {
        start: 0,
        end: 5,
        start_pos: Position::new(0, 0),
        end_pos: Position::new(0, 5),
        message: "unpaired".to_string(),
        rule: "tag-pair",
        severity: Severity::Error,
    };
    let line = styled_editor_line("<div>text", 0, None, &[marker]);
    let texts: Vec<_> = line.spans.iter().map(|s| s.content.as_ref()).collect();
    assert_eq!(texts, vec!["<div>", "text"]);
}

#[test]
fn test_highlight_wins_over_marker() {
    let deco = Decoration {
        id: 1,
        start: 0,
        end: 4,
        start_pos: Position::new(0, 0),
        end_pos: Position::new(0, 4),
    };
    let marker = Marker {
        start: 0,
        end: 4,
        start_pos: Position::new(0, 0),
        end_pos: Position::new(0, 4),
        message: "m".to_string(),
        rule: "tag-pair",
        severity: Severity::Error,
    };
    let line = styled_editor_line("text", 0, Some(&deco), &[marker]);
    assert_eq!(line.spans.len(), 1);
    let style = line.spans[0].style;
    assert_eq!(style.bg, Some(ratatui::style::Color::Yellow));
}
