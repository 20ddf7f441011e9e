//! # Tidy Buffer
//!
//! The notepad's text buffer and the key-driven transforms applied to it.
//!
//! ## Offsets
//!
//! Every position in this crate is an absolute *character* offset into the
//! whole document. There is no line/column model: a line is whatever sits
//! between two `\n` characters, and `\r` is ordinary text.
//!
//! ## Layout
//! - [`TextBuffer`] owns the document text (a rope) and its file metadata
//! - [`Selection`] is a normalized `start..end` offset pair
//! - [`KeyPress`] describes a key as the editor receives it
//! - [`transform`] computes the edit a key press produces, without mutating anything

mod buffer;
mod key;
mod selection;
pub mod transform;

pub use buffer::TextBuffer;
pub use key::{Key, KeyPress, Modifiers};
pub use selection::Selection;
pub use transform::{Edit, KeyOutcome, INDENT_UNIT};

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Invalid character index: {0}")]
    InvalidCharIndex(usize),

    #[error("Selection {start}..{end} is outside a buffer of {len} characters")]
    InvalidSelection { start: usize, end: usize, len: usize },
}
