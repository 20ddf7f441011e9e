//! Heuristic language detection.
//!
//! There is no lexing here: the filename's suffix is the strong signal, and
//! content sniffing only helps untitled or extensionless buffers. Content
//! detectors run in a fixed priority order and the first hit wins, so a
//! buffer that looks like both TypeScript and JavaScript is TypeScript.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::IgnoredAny;

use crate::catalog::{entry, plain_text, CATALOG};
use crate::LanguageInfo;

static CSS_DECLARATION: Lazy<Regex> = Lazy::new(|| compile(r"[a-zA-Z-]+\s*:\s*[^;]+;"));

// Word boundaries are ASCII-only: `étype` still contains the keyword `type`.
static TS_KEYWORDS: Lazy<Regex> =
    Lazy::new(|| compile(r"(?-u:\b)(?:interface|type|enum|namespace|declare)(?-u:\b)"));

static JS_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?-u:\b)(?:function|const|let|var|class|import|export|require)(?-u:\b)")
});

const PYTHON_MARKERS: [&str; 5] = ["def ", "class ", "import ", "from ", "if __name__"];

const MARKDOWN_MARKERS: [&str; 4] = ["# ", "## ", "```", "**"];

const HTML_MARKERS: [&str; 4] = ["<!DOCTYPE html", "<html", "<head>", "<body>"];

fn compile(pattern: &str) -> Regex {
    // Patterns are literals in this file; a failure is a bug caught by tests.
    Regex::new(pattern).expect("built-in detection pattern")
}

/// Picks a language from the filename alone.
///
/// `Dockerfile` and `Dockerfile.*` are special-cased; otherwise the first
/// catalog entry with a matching suffix wins, in declaration order.
pub fn classify_by_filename(filename: &str) -> &'static LanguageInfo {
    let lower = filename.to_lowercase();

    if lower == "dockerfile" || lower.starts_with("dockerfile.") {
        return entry("dockerfile");
    }

    CATALOG
        .iter()
        .find(|lang| lang.extensions.iter().any(|ext| lower.ends_with(ext)))
        .unwrap_or_else(plain_text)
}

/// Picks a language by sniffing the content.
pub fn classify_by_content(content: &str) -> &'static LanguageInfo {
    let trimmed = content.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');

    if trimmed.is_empty() {
        return plain_text();
    }

    let id = if looks_like_json(trimmed) {
        "json"
    } else if looks_like_xml(trimmed) {
        "xml"
    } else if HTML_MARKERS.iter().any(|m| trimmed.contains(m)) {
        "html"
    } else if looks_like_css(trimmed) {
        "css"
    } else if TS_KEYWORDS.is_match(trimmed) {
        "typescript"
    } else if JS_KEYWORDS.is_match(trimmed) {
        "javascript"
    } else if PYTHON_MARKERS.iter().any(|m| trimmed.contains(m)) {
        "python"
    } else if MARKDOWN_MARKERS.iter().any(|m| trimmed.contains(m)) {
        "markdown"
    } else {
        return plain_text();
    };

    entry(id)
}

/// Filename first, content as the fallback.
pub fn classify(filename: &str, content: &str) -> &'static LanguageInfo {
    let by_name = classify_by_filename(filename);
    let lang = if by_name.is_plain_text() {
        classify_by_content(content)
    } else {
        by_name
    };

    tracing::debug!(filename, language = lang.id, "classified buffer");
    lang
}

fn looks_like_json(text: &str) -> bool {
    let framed = (text.starts_with('{') && text.ends_with('}'))
        || (text.starts_with('[') && text.ends_with(']'));

    // Syntax check only; nothing is built, so huge numbers and deep nesting
    // still count. Invalid JSON falls through to the next detector.
    framed && serde_json::from_str::<IgnoredAny>(text).is_ok()
}

fn looks_like_xml(text: &str) -> bool {
    text.starts_with("<?xml") || (text.starts_with('<') && text.contains('>'))
}

fn looks_like_css(text: &str) -> bool {
    text.contains('{')
        && text.contains('}')
        && (text.contains(':') || text.contains('@'))
        && CSS_DECLARATION.is_match(text)
}
