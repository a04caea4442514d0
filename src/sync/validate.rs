//! Mapping of lint findings onto buffer marker ranges.
//!
//! A finding only carries a line number, so the marker range is a
//! heuristic: underline the first complete tag on that line when one
//! exists, otherwise the whole line.

use crate::editor::{Marker, Position, Severity};
use crate::lint::LintMessage;

/// Build the marker set for one validation pass over `content`.
pub(crate) fn markers_for(content: &str, findings: &[LintMessage]) -> Vec<Marker> {
    findings
        .iter()
        .map(|finding| {
            let (start, end) = marker_range(content, finding.line);
            Marker {
                start,
                end,
                start_pos: position_at(content, start),
                end_pos: position_at(content, end),
                message: finding.message.clone(),
                rule: finding.rule,
                severity: Severity::Error,
            }
        })
        .collect()
}

/// Byte range a finding on 1-based `line` should underline.
///
/// From the first `<` on the line to just past the next `>`; if either
/// bracket is missing the whole line is underlined. Out-of-range lines
/// clamp to the last line.
pub(crate) fn marker_range(content: &str, line: usize) -> (usize, usize) {
    let lines: Vec<&str> = content.split('\n').collect();
    let index = line.saturating_sub(1).min(lines.len().saturating_sub(1));
    // Each preceding line contributes its length plus the newline.
    let line_start: usize = lines[..index].iter().map(|l| l.len() + 1).sum();
    let text = lines[index];

    if let Some(tag_start) = text.find('<') {
        if let Some(rel) = text[tag_start..].find('>') {
            let start = line_start + tag_start;
            return (start, start + rel + 1);
        }
    }
    (line_start, line_start + text.len())
}

/// Line/column of a byte offset in `content`. Offsets past the end clamp.
pub(crate) fn position_at(content: &str, offset: usize) -> Position {
    let offset = offset.min(content.len());
    let before = &content[..offset];
    let line = before.matches('\n').count();
    let column = offset - before.rfind('\n').map_or(0, |i| i + 1);
    Position::new(line, column)
}
