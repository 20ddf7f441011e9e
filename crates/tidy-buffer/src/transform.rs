//! Key-driven text transforms.
//!
//! [`apply_key`] looks at a key press together with the buffer text and the
//! current selection and decides whether the editor handles the key itself:
//!
//! | key                 | selection  | effect                                        |
//! |---------------------|------------|-----------------------------------------------|
//! | Tab                 | multi-line | indent every selected line                    |
//! | Tab                 | single     | replace selection with the indent unit        |
//! | Shift+Tab           | multi-line | strip one indent unit from each selected line |
//! | Shift+Tab           | single     | remove an indent unit just before the caret   |
//! | Enter               | any        | newline that repeats the line's indentation   |
//! | `( [ { " '`         | caret      | insert the pair, caret in between             |
//!
//! Everything else is [`KeyOutcome::Declined`] and the caller inserts the
//! character the usual way. A handled key always produces exactly one
//! [`Edit`], so applying it is all-or-nothing.
//!
//! ## Learning: Pure Functions
//!
//! Nothing here mutates. The functions borrow the text (`&str`) and return
//! owned values describing the change, which makes them trivial to test and
//! lets [`TextBuffer`](crate::TextBuffer) apply the result to its rope.

use std::ops::Range;

use crate::{Key, KeyPress, Selection};

/// The indent inserted by Tab and removed by Shift+Tab.
pub const INDENT_UNIT: &str = "  ";

const INDENT_WIDTH: usize = INDENT_UNIT.len();

/// A single replacement: `range` (character offsets) becomes `insert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Character range being replaced
    pub range: Range<usize>,
    /// Replacement text
    pub insert: String,
}

impl Edit {
    /// Creates a replacement edit.
    pub fn replace(range: Range<usize>, insert: impl Into<String>) -> Self {
        Self {
            range,
            insert: insert.into(),
        }
    }

    /// An edit that changes nothing.
    pub fn unchanged(at: usize) -> Self {
        Self::replace(at..at, String::new())
    }

    /// Returns true if applying this edit leaves the text as it was.
    pub fn is_noop(&self) -> bool {
        self.range.is_empty() && self.insert.is_empty()
    }

    /// Applies the edit to `text`, returning the new text.
    pub fn apply(&self, text: &str) -> String {
        let start = byte_offset(text, self.range.start);
        let end = byte_offset(text, self.range.end);

        let mut out = String::with_capacity(text.len() - (end - start) + self.insert.len());
        out.push_str(&text[..start]);
        out.push_str(&self.insert);
        out.push_str(&text[end..]);
        out
    }
}

/// What the editor should do with a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key was consumed: apply `edit`, then set `selection`.
    Handled { edit: Edit, selection: Selection },
    /// Not ours; the caller falls back to ordinary insertion.
    Declined,
}

impl KeyOutcome {
    /// Returns true if the key was consumed.
    pub fn is_handled(&self) -> bool {
        matches!(self, KeyOutcome::Handled { .. })
    }
}

/// Computes the effect of `key` on `text` with the given selection.
///
/// The selection must fit the text; this is checked in debug builds and
/// clamped otherwise.
pub fn apply_key(text: &str, selection: Selection, key: &KeyPress) -> KeyOutcome {
    let len = text.chars().count();
    debug_assert!(
        selection.fits(len),
        "selection {selection} outside a buffer of {len} characters"
    );
    let selection = selection.clamp(len);

    let outcome = match key.key {
        Key::Tab if key.shift_held() => outdent(text, selection),
        Key::Tab => indent(text, selection),
        Key::Enter => newline_with_indent(text, selection),
        Key::Char(open) => auto_pair(open, selection),
        _ => KeyOutcome::Declined,
    };

    tracing::trace!(%key, %selection, handled = outcome.is_handled(), "transform key");
    outcome
}

/// Like [`apply_key`], but returns the resulting text directly.
///
/// Returns `(new_text, new_selection, handled)`. When the key is declined the
/// text and selection come back unchanged.
pub fn apply_key_to_string(
    text: &str,
    selection: Selection,
    key: &KeyPress,
) -> (String, Selection, bool) {
    match apply_key(text, selection, key) {
        KeyOutcome::Handled { edit, selection } => (edit.apply(text), selection, true),
        KeyOutcome::Declined => (text.to_string(), selection, false),
    }
}

fn indent(text: &str, selection: Selection) -> KeyOutcome {
    let selected = slice(text, selection);

    if selected.contains('\n') {
        let block = map_lines(selected, |line| format!("{INDENT_UNIT}{line}"));
        return resized_block(selection, block);
    }

    KeyOutcome::Handled {
        edit: Edit::replace(selection.range(), INDENT_UNIT),
        selection: Selection::caret(selection.start + INDENT_WIDTH),
    }
}

fn outdent(text: &str, selection: Selection) -> KeyOutcome {
    let selected = slice(text, selection);

    if selected.contains('\n') {
        let block = map_lines(selected, |line| {
            line.strip_prefix(INDENT_UNIT).unwrap_or(line).to_string()
        });
        return resized_block(selection, block);
    }

    // Only the indent unit right before the caret goes, not the line's
    // leading whitespace.
    if line_before(text, selection.start).ends_with(INDENT_UNIT) {
        let at = selection.start - INDENT_WIDTH;
        return KeyOutcome::Handled {
            edit: Edit::replace(at..selection.start, ""),
            selection: Selection::caret(at),
        };
    }

    KeyOutcome::Handled {
        edit: Edit::unchanged(selection.start),
        selection,
    }
}

fn newline_with_indent(text: &str, selection: Selection) -> KeyOutcome {
    let indent: String = line_before(text, selection.start)
        .chars()
        .take_while(|c| c.is_whitespace())
        .collect();

    if indent.is_empty() {
        return KeyOutcome::Declined;
    }

    let caret = selection.start + 1 + indent.chars().count();
    KeyOutcome::Handled {
        edit: Edit::replace(selection.range(), format!("\n{indent}")),
        selection: Selection::caret(caret),
    }
}

fn auto_pair(open: char, selection: Selection) -> KeyOutcome {
    let Some(close) = closing_pair(open) else {
        return KeyOutcome::Declined;
    };
    if !selection.is_caret() {
        return KeyOutcome::Declined;
    }

    KeyOutcome::Handled {
        edit: Edit::replace(selection.range(), format!("{open}{close}")),
        selection: Selection::caret(selection.start + 1),
    }
}

/// Returns the character that closes `open`, if it is auto-paired.
pub fn closing_pair(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        '"' => Some('"'),
        '\'' => Some('\''),
        _ => None,
    }
}

/// Replaces the selected block and stretches the selection over the result.
fn resized_block(selection: Selection, block: String) -> KeyOutcome {
    let end = selection.start + block.chars().count();
    KeyOutcome::Handled {
        edit: Edit::replace(selection.range(), block),
        selection: Selection::new(selection.start, end),
    }
}

fn map_lines(block: &str, f: impl Fn(&str) -> String) -> String {
    block.split('\n').map(f).collect::<Vec<_>>().join("\n")
}

/// Text from the start of the line containing `offset` up to `offset`.
fn line_before(text: &str, offset: usize) -> &str {
    let end = byte_offset(text, offset);
    let start = text[..end].rfind('\n').map_or(0, |i| i + 1);
    &text[start..end]
}

fn slice(text: &str, selection: Selection) -> &str {
    &text[byte_offset(text, selection.start)..byte_offset(text, selection.end)]
}

/// Converts a character offset into a byte offset, saturating at the end.
fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(i, _)| i)
}
