//! # Tidy Syntax
//!
//! Language identification for the notepad: which language a buffer is in,
//! and whether it is worth highlighting at all.
//!
//! ## Why Heuristics?
//!
//! The notepad only needs a language id to pick a highlighter grammar. A
//! filename lookup covers almost every saved file, and a handful of cheap
//! content checks cover pasted snippets in untitled buffers:
//! - **Filename first**: suffixes are unambiguous and free
//! - **Content second**: only consulted when the name says nothing
//! - **Never fails**: the answer is always some catalog entry, plain text
//!   at worst
//!
//! ## Learning: Returning References to Statics
//!
//! Every function here returns `&'static LanguageInfo`. Callers can hold on
//! to the result for as long as they like without cloning anything, because
//! the data lives in a `static` table.

mod catalog;
mod detect;

pub use catalog::{lookup, plain_text, LanguageInfo, CATALOG};
pub use detect::{classify, classify_by_content, classify_by_filename};

/// Errors from language lookups.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),
}

/// Finds a catalog entry by id.
///
/// # Example
/// ```
/// let rust = tidy_syntax::find_language("rust").unwrap();
/// assert_eq!(rust.display_name, "Rust");
/// assert!(tidy_syntax::find_language("klingon").is_err());
/// ```
pub fn find_language(id: &str) -> Result<&'static LanguageInfo, SyntaxError> {
    lookup(id).ok_or_else(|| SyntaxError::UnknownLanguage(id.to_string()))
}

/// Returns the languages offered in the picker, in catalog order.
pub fn supported_languages() -> &'static [LanguageInfo] {
    &CATALOG
}

/// Returns true when content in `lang` should go through the highlighter.
///
/// Plain text and blank buffers render as-is.
pub fn should_highlight(lang: &LanguageInfo, content: &str) -> bool {
    !lang.is_plain_text() && !content.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_language() {
        assert_eq!(find_language("tsx").unwrap().display_name, "React TSX");
        assert!(matches!(
            find_language("TypeScript"),
            Err(SyntaxError::UnknownLanguage(id)) if id == "TypeScript"
        ));
    }

    #[test]
    fn test_supported_languages() {
        let langs = supported_languages();
        assert_eq!(langs.len(), 28);
        assert_eq!(langs[0].id, "javascript");
        assert!(langs[langs.len() - 1].is_plain_text());
    }

    #[test]
    fn test_should_highlight() {
        let rust = find_language("rust").unwrap();
        assert!(should_highlight(rust, "fn main() {}"));
        assert!(!should_highlight(rust, "  \n"));
        assert!(!should_highlight(plain_text(), "fn main() {}"));
    }
}
