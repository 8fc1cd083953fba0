#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("Server error: {status} - {body}")]
    RequestFailed { status: u16, body: String },

    #[error("{0}")]
    Backend(String),

    #[error("Error parsing SSE data: {0}")]
    StreamParse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No endpoint configured for {0}")]
    NoTargets(String),

    #[error("Failed to generate website: {0}")]
    GenerationFailed(#[source] Box<Error>),
}

impl From<sitegen_core::Error> for Error {
    fn from(err: sitegen_core::Error) -> Self {
        match err {
            sitegen_core::Error::Validation(msg) => Error::Validation(msg),
            sitegen_core::Error::StreamParse(msg) => Error::StreamParse(msg),
        }
    }
}
