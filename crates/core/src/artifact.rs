use serde::{Deserialize, Serialize};

/// Generated website source split by language.
///
/// Represents the current best-known rendering of the site. During a stream,
/// fields are only ever replaced by newer matches; see [`Artifact::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub html: String,
    pub css: String,
    pub js: String,
}

/// Fields found in a single extraction pass. `None` means the block was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub html: Option<String>,
    pub css: Option<String>,
    pub js: Option<String>,
}

impl Artifact {
    pub fn new(html: impl Into<String>, css: impl Into<String>, js: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
            js: js.into(),
        }
    }

    /// Build the next artifact: matched fields replace ours, unmatched ones carry forward.
    pub fn merge(&self, extracted: &Extracted) -> Artifact {
        Artifact {
            html: extracted.html.clone().unwrap_or_else(|| self.html.clone()),
            css: extracted.css.clone().unwrap_or_else(|| self.css.clone()),
            js: extracted.js.clone().unwrap_or_else(|| self.js.clone()),
        }
    }

    /// Render as the three fenced blocks the backend uses
    pub fn to_markdown(&self) -> String {
        format!(
            "```html\n{}\n```\n\n```css\n{}\n```\n\n```javascript\n{}\n```\n",
            self.html, self.css, self.js
        )
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty() && self.css.is_empty() && self.js.is_empty()
    }
}

impl Extracted {
    /// True when at least one of the three blocks was found.
    pub fn any(&self) -> bool {
        self.html.is_some() || self.css.is_some() || self.js.is_some()
    }
}
