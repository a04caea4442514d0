//! Viewport management for scrolling.
//!
//! Each pane owns a [`Viewport`] tracking its visible line range. The
//! editor viewport additionally follows the cursor and the reveal target
//! of a reverse-mapping highlight.

use std::ops::Range;

/// Manages the visible portion of a pane's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    pub const fn new(width: u16, height: u16, total_lines: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_lines,
        }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Range of visible lines, clamped to the content bounds.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset;
        let end = (self.offset + self.height as usize).min(self.total_lines);
        start..end
    }

    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    /// Scroll the minimum amount needed to bring `line` into view.
    pub fn ensure_visible(&mut self, line: usize) {
        if line < self.offset {
            self.offset = line;
        } else if line >= self.offset + self.height as usize {
            self.offset = (line + 1).saturating_sub(self.height as usize);
        }
        self.offset = self.offset.min(self.max_offset());
    }

    /// Scroll so `line` sits near the middle of the viewport. Used when
    /// revealing a highlight so the match lands in context, not at an
    /// edge.
    pub fn reveal_centered(&mut self, line: usize) {
        let half = self.height as usize / 2;
        self.offset = line.saturating_sub(half).min(self.max_offset());
    }

    /// Resize the viewport, clamping the offset to the new bounds.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the total line count (e.g. after an update cycle).
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}
