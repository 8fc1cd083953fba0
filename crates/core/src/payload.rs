use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Body of a website generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRequest {
    pub description: String,
}

impl GenerateRequest {
    /// The description is forwarded as given; the backend decides what it accepts.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Body of a website modification request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyRequest {
    pub modification_description: String,
    pub current_html: String,
    pub current_css: String,
    pub current_js: String,
}

impl ModifyRequest {
    /// Validate and normalize the inputs of a modification.
    ///
    /// Every field is trimmed. The description and the current HTML are
    /// required; missing CSS or JavaScript become empty strings.
    pub fn new(
        modification_description: &str,
        current_html: &str,
        current_css: Option<&str>,
        current_js: Option<&str>,
    ) -> Result<Self, Error> {
        let modification_description = modification_description.trim();
        if modification_description.is_empty() {
            return Err(Error::Validation(
                "Modification description is required".to_string(),
            ));
        }

        let current_html = current_html.trim();
        if current_html.is_empty() {
            return Err(Error::Validation("Current HTML code is required".to_string()));
        }

        Ok(Self {
            modification_description: modification_description.to_string(),
            current_html: current_html.to_string(),
            current_css: current_css.unwrap_or_default().trim().to_string(),
            current_js: current_js.unwrap_or_default().trim().to_string(),
        })
    }
}

/// Non-streaming backend response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BackendResponse {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub traceback: Option<String>,
}

impl BackendResponse {
    /// Application-level error reported by the backend, if any. Blank errors are ignored.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    /// Generated text, empty when the backend returned none
    pub fn result_text(&self) -> &str {
        self.result.as_deref().unwrap_or_default()
    }
}
