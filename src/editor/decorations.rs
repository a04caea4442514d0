//! Display adornments layered on the buffer: the click/selection highlight
//! and the validation marker set.
//!
//! Decorations are handle-based: applying one returns a [`DecorationId`]
//! the owner must keep to clear it later. The sync controller uses this to
//! enforce the "at most one highlight" rule by always clearing its previous
//! handle before applying a new one.

use crate::editor::Position;

/// Scope name under which validation markers are published. The whole set
/// for this source is replaced on every validation pass.
pub const MARKER_SOURCE: &str = "html-validation";

/// Opaque handle to an applied decoration.
pub type DecorationId = u64;

/// A single styled range in the buffer.
///
/// Stores both byte offsets and their line/column conversions so the UI
/// never has to re-derive positions from a possibly-changed buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub id: DecorationId,
    /// Byte offset range, `start <= end`.
    pub start: usize,
    pub end: usize,
    pub start_pos: Position,
    pub end_pos: Position,
}

/// Holds currently applied decorations and the pending reveal target.
#[derive(Debug, Default)]
pub struct DecorationSet {
    next_id: DecorationId,
    active: Vec<Decoration>,
    reveal: Option<Position>,
}

impl DecorationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a decoration and record its start as the reveal target.
    pub fn apply(
        &mut self,
        start: usize,
        end: usize,
        start_pos: Position,
        end_pos: Position,
    ) -> DecorationId {
        let id = self.next_id;
        self.next_id += 1;
        self.active.push(Decoration {
            id,
            start,
            end,
            start_pos,
            end_pos,
        });
        self.reveal = Some(start_pos);
        id
    }

    /// Remove the decorations with the given handles. Unknown handles are
    /// ignored.
    pub fn clear(&mut self, ids: &[DecorationId]) {
        self.active.retain(|d| !ids.contains(&d.id));
    }

    pub fn active(&self) -> &[Decoration] {
        &self.active
    }

    /// Take the pending reveal target, if any. The UI consumes this to
    /// scroll the decorated range into view.
    pub const fn take_reveal(&mut self) -> Option<Position> {
        self.reveal.take()
    }
}

/// Severity attached to a validation marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
}

/// A validation finding anchored to a buffer offset range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Byte offset range, `start <= end`.
    pub start: usize,
    pub end: usize,
    pub start_pos: Position,
    pub end_pos: Position,
    /// Diagnostic message, carried verbatim from the producer.
    pub message: String,
    /// Stable identifier of the rule that produced this marker.
    pub rule: &'static str,
    pub severity: Severity,
}

/// The full marker set for one source. Replaced atomically on each
/// validation pass, never patched incrementally.
#[derive(Debug)]
pub struct MarkerSet {
    source: &'static str,
    markers: Vec<Marker>,
}

impl MarkerSet {
    pub const fn new(source: &'static str) -> Self {
        Self {
            source,
            markers: Vec::new(),
        }
    }

    pub const fn source(&self) -> &'static str {
        self.source
    }

    /// Replace all markers for this source.
    pub fn replace(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::new(MARKER_SOURCE)
    }
}
