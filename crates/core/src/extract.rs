use regex::Regex;
use std::sync::LazyLock;

use crate::artifact::{Artifact, Extracted};

static HTML_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```html\n(.*?)\n```").unwrap());
static CSS_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```css\n(.*?)\n```").unwrap());
static JS_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```javascript\n(.*?)\n```").unwrap());

/// Language tag of a fenced code block emitted by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Html,
    Css,
    Javascript,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Html, Language::Css, Language::Javascript];

    /// Tag written right after the opening fence
    pub fn tag(self) -> &'static str {
        match self {
            Language::Html => "html",
            Language::Css => "css",
            Language::Javascript => "javascript",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Language::Html => &HTML_BLOCK,
            Language::Css => &CSS_BLOCK,
            Language::Javascript => &JS_BLOCK,
        }
    }
}

/// Extract the first fenced block tagged `language`, trimmed.
///
/// The block runs from the newline after the opening fence to the first
/// newline followed by a closing fence. Returns `None` if no complete block
/// exists yet.
pub fn extract_block(text: &str, language: Language) -> Option<String> {
    language
        .pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Run all three extractions over `text`
pub fn extract_all(text: &str) -> Extracted {
    Extracted {
        html: extract_block(text, Language::Html),
        css: extract_block(text, Language::Css),
        js: extract_block(text, Language::Javascript),
    }
}

/// Extract a complete artifact, using `fallback` for any block that is missing
pub fn extract_artifact(text: &str, fallback: &Artifact) -> Artifact {
    fallback.merge(&extract_all(text))
}
