//! Text buffer and its display adornments.
//!
//! [`Buffer`] is the authoritative HTML source: a rope-backed editable
//! string with cursor management and offset/position conversion.
//! [`decorations`] holds the visual state layered on top of it
//! (the single highlight decoration and the validation marker set).

mod buffer;
pub mod decorations;

pub use buffer::{Buffer, Cursor, Direction, Position};
pub use decorations::{
    Decoration, DecorationId, DecorationSet, Marker, MarkerSet, Severity, MARKER_SOURCE,
};
