//! The editor-to-preview synchronization pipeline.
//!
//! [`SyncController`] owns everything derived from the buffer: the preview
//! document, the validation markers, and the reverse-mapping highlight. An
//! update cycle always runs its steps in the same order: rebuild the
//! preview first, then validate, so the preview shows malformed content
//! even when validation flags it.

mod debounce;
mod validate;

pub use debounce::{DEBOUNCE_QUIET_MS, UpdateDebouncer};

use crate::editor::{Buffer, Decoration, DecorationId, DecorationSet, Marker, MarkerSet};
use crate::lint::Linter;
use crate::preview::PreviewDocument;

/// Drives update cycles and reverse mapping between the buffer and the
/// preview.
#[derive(Debug)]
pub struct SyncController {
    debounce: UpdateDebouncer,
    linter: Option<Linter>,
    preview: PreviewDocument,
    markers: MarkerSet,
    decorations: DecorationSet,
    highlight: Vec<DecorationId>,
    cycles: u64,
}

impl SyncController {
    /// `linter: None` disables validation; cycles then leave the marker
    /// set empty and the preview still updates.
    pub fn new(linter: Option<Linter>, quiet_ms: u64) -> Self {
        Self {
            debounce: UpdateDebouncer::new(quiet_ms),
            linter,
            preview: PreviewDocument::open(),
            markers: MarkerSet::default(),
            decorations: DecorationSet::new(),
            highlight: Vec::new(),
            cycles: 0,
        }
    }

    /// Note a buffer change at `now_ms`; the update cycle runs after the
    /// quiet period.
    pub const fn note_buffer_changed(&mut self, now_ms: u64) {
        self.debounce.schedule(now_ms);
    }

    /// Whether a scheduled update cycle is due. Consuming.
    pub const fn take_update_ready(&mut self, now_ms: u64) -> bool {
        self.debounce.take_ready(now_ms)
    }

    pub const fn is_update_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Rebuild the preview from `content`, then revalidate. The old
    /// preview document is torn down wholesale.
    pub fn run_update_cycle(&mut self, content: &str) {
        let mut doc = PreviewDocument::open();
        doc.write(content);
        doc.close();
        self.preview = doc;

        self.validate(content);
        self.cycles += 1;
        tracing::debug!(
            cycle = self.cycles,
            lines = self.preview.line_count(),
            markers = self.markers.len(),
            "update cycle"
        );
    }

    fn validate(&mut self, content: &str) {
        let Some(linter) = &self.linter else {
            return;
        };
        let findings = linter.verify(content);
        self.markers.replace(validate::markers_for(content, &findings));
    }

    /// Map a preview click back to the buffer and highlight the match.
    /// Returns whether a highlight was applied.
    pub fn preview_clicked(&mut self, buffer: &Buffer, row: usize, col: usize) -> bool {
        let Some(hit) = self.preview.node_at(row, col) else {
            return false;
        };
        let Some(target) = self.preview.qualifying_text_target(hit) else {
            return false;
        };
        let needle = self.preview.text_content(target);
        self.match_and_highlight(buffer, &needle)
    }

    /// Map selected preview text back to the buffer and highlight the
    /// match. Returns whether a highlight was applied.
    pub fn preview_selected(&mut self, buffer: &Buffer, selected: &str) -> bool {
        self.match_and_highlight(buffer, selected)
    }

    /// Highlight the first occurrence of `needle` in the buffer. Repeated
    /// text resolves to its first occurrence; text that does not appear
    /// verbatim in the source (entity-encoded, or split across markup) is
    /// silently ignored.
    fn match_and_highlight(&mut self, buffer: &Buffer, needle: &str) -> bool {
        // Surrounding whitespace never takes part in the match.
        let needle = needle.trim();
        if needle.is_empty() {
            return false;
        }
        let text = buffer.text();
        let Some(start) = text.find(needle) else {
            return false;
        };
        self.highlight(buffer, start, start + needle.len());
        true
    }

    /// Apply the single reverse-mapping highlight over a byte range,
    /// replacing any previous one.
    pub fn highlight(&mut self, buffer: &Buffer, start: usize, end: usize) {
        let len = buffer.len_bytes();
        let start = start.min(len);
        let end = end.clamp(start, len);

        self.decorations.clear(&self.highlight);
        self.highlight.clear();

        let id = self.decorations.apply(
            start,
            end,
            buffer.offset_to_position(start),
            buffer.offset_to_position(end),
        );
        self.highlight.push(id);
    }

    /// The current reverse-mapping highlight, if one is applied.
    pub fn active_highlight(&self) -> Option<&Decoration> {
        self.decorations.active().last()
    }

    /// Pending scroll target from the last highlight, consumed by the UI.
    pub const fn take_reveal(&mut self) -> Option<crate::editor::Position> {
        self.decorations.take_reveal()
    }

    pub const fn preview(&self) -> &PreviewDocument {
        &self.preview
    }

    pub fn markers(&self) -> &[Marker] {
        self.markers.markers()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub const fn update_count(&self) -> u64 {
        self.cycles
    }

    pub const fn lint_enabled(&self) -> bool {
        self.linter.is_some()
    }
}
