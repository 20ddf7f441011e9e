//! Core text buffer implementation using rope data structure.
//!
//! ## Why Rope?
//!
//! Every key press in the notepad ends in a replace somewhere in the
//! document. A rope keeps those replacements O(log n) instead of shifting
//! the whole string, and indexes by character directly.
//!
//! ## Learning: Ownership in Action
//!
//! ```rust,ignore
//! let buffer = TextBuffer::new();  // buffer OWNS the rope
//! let text = buffer.text();        // text BORROWS from buffer
//! // buffer.insert(0, "x");        // ERROR! Can't mutate while borrowed
//! drop(text);                      // Release borrow
//! buffer.insert(0, "x");           // Now OK!
//! ```

use ropey::Rope;
use std::borrow::Cow;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::transform::{self, Edit, KeyOutcome};
use crate::{BufferError, BufferResult, KeyPress, Selection};

/// A text buffer backed by a rope data structure.
///
/// One editing session owns the buffer; the modified flag tracks whether its
/// content still matches `file_path` on disk.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    /// The rope holding our text content
    rope: Rope,

    /// Whether the buffer has unsaved changes
    modified: bool,

    /// Associated file path (if any)
    file_path: Option<PathBuf>,
}

impl TextBuffer {
    /// Creates a new empty buffer.
    ///
    /// # Example
    /// ```
    /// use tidy_buffer::TextBuffer;
    ///
    /// let buffer = TextBuffer::new();
    /// assert!(buffer.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer for content loaded from `path`.
    ///
    /// The buffer starts unmodified.
    pub fn with_path(content: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            rope: Rope::from_str(content),
            modified: false,
            file_path: Some(path.into()),
        }
    }

    // ==================== Text Access ====================

    /// Returns the entire text content as a `Cow<str>`.
    ///
    /// # Learning: Cow (Clone-on-Write)
    ///
    /// For small buffers, this returns a borrowed reference (cheap).
    /// For large buffers spanning multiple rope chunks, it allocates.
    #[inline]
    pub fn text(&self) -> Cow<'_, str> {
        self.rope.slice(..).into()
    }

    /// Returns a slice of text by character range.
    pub fn slice(&self, range: Range<usize>) -> BufferResult<Cow<'_, str>> {
        if range.start > range.end {
            return Err(BufferError::InvalidCharIndex(range.start));
        }
        if range.end > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(range.end));
        }
        Ok(self.rope.slice(range).into())
    }

    /// Returns the selected text.
    pub fn selected(&self, selection: Selection) -> BufferResult<Cow<'_, str>> {
        self.check_selection(selection)?;
        self.slice(selection.range())
    }

    // ==================== Measurements ====================

    /// Returns true if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Returns the number of characters in the buffer.
    #[inline]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns the number of lines in the buffer.
    ///
    /// Only `\n` separates lines, so this is the newline count plus one.
    /// An empty buffer has 1 line.
    #[inline]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    // ==================== Mutations ====================

    /// Inserts text at a character index.
    ///
    /// # Learning: `&mut self`
    ///
    /// This method requires exclusive (mutable) access to the buffer.
    /// Rust's borrow checker ensures no other code can read or write
    /// the buffer while this method executes.
    pub fn insert(&mut self, char_idx: usize, text: &str) -> BufferResult<()> {
        if char_idx > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(char_idx));
        }

        self.rope.insert(char_idx, text);
        self.modified = true;
        Ok(())
    }

    /// Deletes text in a character range, returning what was removed.
    pub fn delete(&mut self, range: Range<usize>) -> BufferResult<String> {
        let deleted = self.slice(range.clone())?.into_owned();

        self.rope.remove(range);
        self.modified = true;
        Ok(deleted)
    }

    /// Replaces text in a range with new text.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> BufferResult<String> {
        let start = range.start;
        let deleted = self.delete(range)?;
        self.insert(start, text)?;
        Ok(deleted)
    }

    /// Replaces the whole content.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.modified = true;
    }

    /// Applies an edit produced by the transform engine.
    ///
    /// No-op edits leave the modified flag alone.
    pub fn apply_edit(&mut self, edit: &Edit) -> BufferResult<()> {
        if edit.is_noop() {
            return Ok(());
        }
        self.replace(edit.range.clone(), &edit.insert)?;
        Ok(())
    }

    /// Runs a key press through the transform engine and applies the result.
    ///
    /// Returns the new selection when the key was handled, or `None` when the
    /// caller should fall back to plain insertion.
    pub fn apply_key(
        &mut self,
        selection: Selection,
        key: &KeyPress,
    ) -> BufferResult<Option<Selection>> {
        self.check_selection(selection)?;

        let outcome = transform::apply_key(&self.text(), selection, key);
        match outcome {
            KeyOutcome::Handled { edit, selection } => {
                self.apply_edit(&edit)?;
                Ok(Some(selection))
            }
            KeyOutcome::Declined => Ok(None),
        }
    }

    /// Replaces the selection with `text` and returns the caret after it.
    pub fn insert_over(&mut self, selection: Selection, text: &str) -> BufferResult<Selection> {
        self.check_selection(selection)?;
        self.replace(selection.range(), text)?;
        Ok(Selection::caret(selection.start + text.chars().count()))
    }

    fn check_selection(&self, selection: Selection) -> BufferResult<()> {
        let len = self.len_chars();
        if selection.fits(len) {
            Ok(())
        } else {
            Err(BufferError::InvalidSelection {
                start: selection.start,
                end: selection.end,
                len,
            })
        }
    }

    // ==================== State Queries ====================

    /// Returns true if the buffer has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Records that the content now matches `path` on disk.
    pub fn mark_saved(&mut self, path: impl Into<PathBuf>) {
        self.file_path = Some(path.into());
        self.modified = false;
    }

    /// Returns the associated file path, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
            modified: false,
            file_path: None,
        }
    }
}

impl From<String> for TextBuffer {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Key, KeyPress};

    #[test]
    fn test_insert_and_delete() {
        let mut buffer = TextBuffer::new();
        buffer.insert(0, "Hello").unwrap();
        buffer.insert(5, ", World!").unwrap();
        assert_eq!(buffer.text(), "Hello, World!");

        let removed = buffer.delete(5..7).unwrap();
        assert_eq!(removed, ", ");
        assert_eq!(buffer.text(), "HelloWorld!");
        assert!(buffer.is_modified());
    }

    #[test]
    fn test_out_of_bounds() {
        let mut buffer = TextBuffer::from("abc");
        assert!(matches!(
            buffer.insert(4, "x"),
            Err(BufferError::InvalidCharIndex(4))
        ));
        assert!(buffer.delete(1..9).is_err());
        assert!(!buffer.is_modified());
    }

    #[test]
    fn test_only_newline_breaks_lines() {
        let buffer = TextBuffer::from("a\r\nb\rc\u{2028}d\n");
        assert_eq!(buffer.len_lines(), 3);
        assert_eq!(TextBuffer::from("one line").len_lines(), 1);
    }

    #[test]
    fn test_declined_key_leaves_buffer() {
        let mut buffer = TextBuffer::from("abc");
        let result = buffer
            .apply_key(Selection::caret(3), &KeyPress::plain(Key::Enter))
            .unwrap();
        assert_eq!(result, None);
        assert!(!buffer.is_modified());
    }

    #[test]
    fn test_noop_outdent_keeps_clean_state() {
        let mut buffer = TextBuffer::from("abc");
        let result = buffer
            .apply_key(Selection::caret(2), &KeyPress::shifted(Key::Tab))
            .unwrap();
        assert_eq!(result, Some(Selection::caret(2)));
        assert!(!buffer.is_modified());
    }

    #[test]
    fn test_insert_over_selection() {
        let mut buffer = TextBuffer::from("hello world");
        let caret = buffer.insert_over(Selection::new(6, 11), "rope").unwrap();
        assert_eq!(buffer.text(), "hello rope");
        assert_eq!(caret, Selection::caret(10));
    }

    #[test]
    fn test_mark_saved() {
        let mut buffer = TextBuffer::from("x");
        buffer.insert(1, "y").unwrap();
        buffer.mark_saved("/tmp/x.txt");
        assert!(!buffer.is_modified());
        assert_eq!(buffer.file_path(), Some(Path::new("/tmp/x.txt")));
    }
}
