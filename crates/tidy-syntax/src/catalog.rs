//! The fixed table of languages the notepad knows about.
//!
//! ## Learning: `'static` Data
//!
//! The catalog is a `static` array of plain `&'static str` data. It lives for
//! the whole program, needs no initialization at runtime and no locking, and
//! every lookup hands out `&'static LanguageInfo` references into it.

use serde::Serialize;

/// A language the editor can select and highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LanguageInfo {
    /// Stable identifier, e.g. `"typescript"`
    pub id: &'static str,
    /// Human-readable name for the language picker
    pub display_name: &'static str,
    /// Lowercase filename suffixes, tried in order
    pub extensions: &'static [&'static str],
}

impl LanguageInfo {
    /// Returns true for the plain-text fallback entry.
    pub fn is_plain_text(&self) -> bool {
        self.id == PLAIN_TEXT_ID
    }

    /// Returns the grammar name the highlighter expects for this language.
    pub fn highlighter_name(&self) -> &'static str {
        match self.id {
            "dockerfile" => "docker",
            id => id,
        }
    }
}

impl std::fmt::Display for LanguageInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name)
    }
}

pub(crate) const PLAIN_TEXT_ID: &str = "text";

const fn lang(
    id: &'static str,
    display_name: &'static str,
    extensions: &'static [&'static str],
) -> LanguageInfo {
    LanguageInfo {
        id,
        display_name,
        extensions,
    }
}

/// Every supported language, in match priority order. Plain text is last.
pub static CATALOG: [LanguageInfo; 28] = [
    lang("javascript", "JavaScript", &[".js", ".mjs"]),
    lang("typescript", "TypeScript", &[".ts"]),
    lang("jsx", "React JSX", &[".jsx"]),
    lang("tsx", "React TSX", &[".tsx"]),
    lang("json", "JSON", &[".json"]),
    lang("xml", "XML", &[".xml", ".svg"]),
    lang("html", "HTML", &[".html", ".htm"]),
    lang("css", "CSS", &[".css"]),
    lang("scss", "SCSS", &[".scss"]),
    lang("sass", "Sass", &[".sass"]),
    lang("less", "Less", &[".less"]),
    lang("markdown", "Markdown", &[".md", ".markdown"]),
    lang("python", "Python", &[".py", ".pyw"]),
    lang("java", "Java", &[".java"]),
    lang("c", "C", &[".c", ".h"]),
    lang("cpp", "C++", &[".cpp", ".cxx", ".cc", ".hpp"]),
    lang("csharp", "C#", &[".cs"]),
    lang("php", "PHP", &[".php"]),
    lang("ruby", "Ruby", &[".rb"]),
    lang("go", "Go", &[".go"]),
    lang("rust", "Rust", &[".rs"]),
    lang("bash", "Shell", &[".sh", ".bash", ".zsh"]),
    lang("sql", "SQL", &[".sql"]),
    lang("yaml", "YAML", &[".yaml", ".yml"]),
    lang("toml", "TOML", &[".toml"]),
    lang("ini", "INI", &[".ini", ".cfg"]),
    lang("dockerfile", "Dockerfile", &["dockerfile"]),
    lang(PLAIN_TEXT_ID, "Plain Text", &[".txt"]),
];

/// The plain-text entry, used whenever detection finds nothing better.
pub fn plain_text() -> &'static LanguageInfo {
    &CATALOG[CATALOG.len() - 1]
}

/// Looks up a language by id.
pub fn lookup(id: &str) -> Option<&'static LanguageInfo> {
    CATALOG.iter().find(|lang| lang.id == id)
}

/// Looks up a catalog id that is known to exist.
pub(crate) fn entry(id: &str) -> &'static LanguageInfo {
    lookup(id).unwrap_or_else(plain_text)
}
