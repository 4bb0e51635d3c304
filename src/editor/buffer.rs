use ropey::Rope;

/// Line and character totals for a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferStats {
    pub lines: usize,
    pub chars: usize,
    pub modified: bool,
}

impl std::fmt::Display for BufferStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lines: {}, Characters: {}", self.lines, self.chars)?;
        if self.modified {
            f.write_str(" (modified)")?;
        }
        Ok(())
    }
}

/// The in-memory text of the note being edited.
///
/// Rope-backed, with a caret kept as a char offset into the rope and a
/// modified flag that is set by every change and cleared on save. Line
/// breaks are whatever the rope counts as one (`\n`, `\r\n`, a lone `\r`,
/// `\u{2028}` and friends); the caret never needs to know which.
pub struct NoteBuffer {
    rope: Rope,
    caret: usize,
    dirty: bool,
}

impl NoteBuffer {
    /// Load `text` with the caret after its last character.
    pub fn from_text(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let caret = rope.len_chars();
        Self {
            rope,
            caret,
            dirty: false,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Caret position as a char offset.
    pub const fn caret(&self) -> usize {
        self.caret
    }

    /// Move the caret, clamped to the end of the text.
    pub fn set_caret(&mut self, char_idx: usize) {
        self.caret = char_idx.min(self.rope.len_chars());
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total number of characters, line breaks included.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn stats(&self) -> BufferStats {
        BufferStats {
            lines: self.line_count(),
            chars: self.char_count(),
            modified: self.dirty,
        }
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Replace the whole buffer, keeping the caret in bounds.
    pub fn replace_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.caret = self.caret.min(self.rope.len_chars());
        self.dirty = true;
    }

    /// Insert `s` at the caret and move the caret past it.
    ///
    /// Returns `false` (and leaves the buffer clean) when `s` is empty.
    pub fn insert_str(&mut self, s: &str) -> bool {
        if s.is_empty() {
            return false;
        }
        self.rope.insert(self.caret, s);
        self.caret += s.chars().count();
        self.dirty = true;
        true
    }

    /// Delete the character before the caret (Backspace). A `\r\n` pair is
    /// removed as one line break.
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        let mut start = self.caret - 1;
        if start > 0 && self.rope.char(start) == '\n' && self.rope.char(start - 1) == '\r' {
            start -= 1;
        }
        self.rope.remove(start..self.caret);
        self.caret = start;
        self.dirty = true;
        true
    }
}

impl Default for NoteBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for NoteBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("caret", &self.caret)
            .field("dirty", &self.dirty)
            .finish()
    }
}
