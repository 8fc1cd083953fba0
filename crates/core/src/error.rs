/// Errors raised by the pure transformation functions
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum Error {
    /// A required input was missing or blank. Raised before any I/O happens.
    #[error("{0}")]
    Validation(String),

    /// A `data:` line of an event stream did not carry a valid JSON payload.
    #[error("Error parsing SSE data: {0}")]
    StreamParse(String),
}
