use ropey::Rope;

/// A line/column pair, both zero-based. Columns are byte offsets within
/// the line, matching how the cursor tracks its horizontal position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Cursor position in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    pub const fn origin() -> Self {
        Self {
            line: 0,
            col: 0,
            col_memory: 0,
        }
    }

    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::origin()
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The authoritative in-memory HTML source, backed by a rope.
///
/// Besides editing and cursor movement, the buffer provides the conversion
/// layer the sync controller depends on: byte offsets in `0..=len_bytes()`
/// map to [`Position`]s and back. Every mutation bumps a revision counter,
/// which is how observers notice content changes without callbacks.
pub struct Buffer {
    rope: Rope,
    cursor: Cursor,
    dirty: bool,
    revision: u64,
}

impl Buffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::origin(),
            dirty: false,
            revision: 0,
        }
    }

    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Replace the entire content, resetting the cursor to the origin.
    ///
    /// Counts as a content change (revision bump) but leaves the buffer
    /// clean: it is used for loading, not typing.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = Cursor::origin();
        self.dirty = false;
        self.revision += 1;
    }

    /// Total length of the buffer in bytes.
    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Content of a line, without its trailing newline.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Length of a line in bytes, without its trailing newline.
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Byte offset of the cursor in the full text.
    pub fn cursor_offset(&self) -> usize {
        self.position_to_offset(Position::new(self.cursor.line, self.cursor.col))
    }

    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Monotonic content-change counter. Compare two readings to detect
    /// that the buffer was mutated in between.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Convert a byte offset to a line/column position.
    ///
    /// Offsets past the end of the buffer clamp to the final position.
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.rope.len_bytes());
        let line = self.rope.byte_to_line(offset);
        let column = offset - self.rope.line_to_byte(line);
        Position::new(line, column)
    }

    /// Convert a line/column position back to a byte offset.
    ///
    /// Out-of-range lines clamp to the last line; out-of-range columns
    /// clamp to the line length.
    pub fn position_to_offset(&self, pos: Position) -> usize {
        let line = pos.line.min(self.line_count().saturating_sub(1));
        let line_start = self.rope.line_to_byte(line);
        let max_col = if line + 1 == self.line_count() {
            self.rope.len_bytes() - line_start
        } else {
            self.line_len(line)
        };
        line_start + pos.column.min(max_col)
    }

    // --- Editing ---

    pub fn insert_char(&mut self, ch: char) {
        let idx = self.rope.byte_to_char(self.cursor_offset());
        self.rope.insert_char(idx, ch);
        self.cursor.set_col(self.cursor.col + ch.len_utf8());
        self.touch();
    }

    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let idx = self.rope.byte_to_char(self.cursor_offset());
        self.rope.insert(idx, s);
        match s.rsplit_once('\n') {
            Some((head, tail)) => {
                self.cursor.line += head.matches('\n').count() + 1;
                self.cursor.set_col(tail.len());
            }
            None => self.cursor.set_col(self.cursor.col + s.len()),
        }
        self.touch();
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        let idx = self.rope.byte_to_char(self.cursor_offset());
        self.rope.insert_char(idx, '\n');
        self.cursor.line += 1;
        self.cursor.set_col(0);
        self.touch();
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor.col == 0 && self.cursor.line == 0 {
            return false;
        }
        let idx = self.rope.byte_to_char(self.cursor_offset());
        if self.cursor.col == 0 {
            // Join with the previous line
            let prev_len = self.line_len(self.cursor.line - 1);
            self.rope.remove(idx - 1..idx);
            self.cursor.line -= 1;
            self.cursor.set_col(prev_len);
        } else {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let removed = line[..self.cursor.col]
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
            self.rope.remove(idx - 1..idx);
            self.cursor.set_col(self.cursor.col - removed);
        }
        self.touch();
        true
    }

    /// Delete the character at the cursor (Delete key).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_forward(&mut self) -> bool {
        let at_line_end = self.cursor.col >= self.line_len(self.cursor.line);
        if at_line_end && self.cursor.line + 1 >= self.line_count() {
            return false;
        }
        let idx = self.rope.byte_to_char(self.cursor_offset());
        self.rope.remove(idx..=idx);
        self.touch();
        true
    }

    // --- Cursor movement ---

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_vertical(-1),
            Direction::Down => self.move_vertical(1),
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    pub fn move_end(&mut self) {
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    /// Move to a specific line and column, clamping both.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.cursor.line = line.min(self.line_count().saturating_sub(1));
        self.cursor.set_col(col.min(self.line_len(self.cursor.line)));
    }

    pub const fn move_to_start(&mut self) {
        self.cursor.line = 0;
        self.cursor.set_col(0);
    }

    pub fn move_to_end(&mut self) {
        let last = self.line_count().saturating_sub(1);
        self.cursor.line = last;
        self.cursor.set_col(self.line_len(last));
    }

    // --- Private helpers ---

    const fn touch(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let step = line[..self.cursor.col]
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col - step);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col < line_len {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let step = line[self.cursor.col..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col + step);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_vertical(&mut self, delta: isize) {
        let target = self.cursor.line.saturating_add_signed(delta);
        if delta < 0 && self.cursor.line == 0 || target >= self.line_count() {
            return;
        }
        self.cursor.line = target;
        // Sticky column: clamp to the new line but remember the wider one.
        self.cursor.col = self.cursor.col_memory.min(self.line_len(target));
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("lines", &self.rope.len_lines())
            .field("cursor", &self.cursor)
            .field("dirty", &self.dirty)
            .field("revision", &self.revision)
            .finish()
    }
}
