use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use sitegen_core::config::{ClientConfig, Operation};
use sitegen_core::extract::extract_artifact;
use sitegen_core::payload::{BackendResponse, GenerateRequest, ModifyRequest};
use sitegen_core::sse::{is_event_stream, EVENT_STREAM};
use sitegen_core::Artifact;

use crate::error::Error;
use crate::stream::{read_event_stream, StreamPolicy};

/// Client for the website generation backend.
///
/// Holds the read-only [`ClientConfig`] built at startup and a shared
/// `reqwest::Client`; every call is independent of the others.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl GenerationClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Generate a website from a description.
    ///
    /// `on_update` receives every new version of the artifact as the backend
    /// produces it. Any failure is wrapped in [`Error::GenerationFailed`].
    pub async fn generate_website<F>(&self, description: &str, mut on_update: F) -> Result<(), Error>
    where
        F: FnMut(&Artifact),
    {
        self.try_generate(description, &mut on_update)
            .await
            .map_err(|err| {
                log::error!("Error calling backend API: {err}");
                Error::GenerationFailed(Box::new(err))
            })
    }

    async fn try_generate<F>(&self, description: &str, on_update: &mut F) -> Result<(), Error>
    where
        F: FnMut(&Artifact),
    {
        let request = GenerateRequest::new(description);
        let response = self.send(Operation::Generate, &request).await?;
        let empty = Artifact::default();

        if is_event_stream(content_type(&response)) {
            return read_event_stream(response.bytes_stream(), empty, StreamPolicy::GENERATE, on_update)
                .await;
        }

        let artifact = read_json(response, &empty).await?;
        log::debug!("Extracted update: {artifact:?}");
        on_update(&artifact);

        Ok(())
    }

    /// Modify an existing website.
    ///
    /// Inputs are validated before any request is made. Blocks the backend does
    /// not return keep their current content. Errors are returned unwrapped.
    pub async fn modify_website<F>(
        &self,
        modification_description: &str,
        current_html: &str,
        current_css: Option<&str>,
        current_js: Option<&str>,
        mut on_update: F,
    ) -> Result<(), Error>
    where
        F: FnMut(&Artifact),
    {
        let request = ModifyRequest::new(modification_description, current_html, current_css, current_js)?;
        log::debug!("Request payload: {request:?}");

        let current = Artifact::new(
            current_html,
            current_css.unwrap_or_default(),
            current_js.unwrap_or_default(),
        );

        let response = self.send(Operation::Modify, &request).await?;
        log::debug!("Response status: {}", response.status());
        log::debug!("Response headers: {:?}", response.headers());

        if is_event_stream(content_type(&response)) {
            return read_event_stream(response.bytes_stream(), current, StreamPolicy::MODIFY, &mut on_update)
                .await;
        }

        let artifact = read_json(response, &current).await?;
        log::debug!("Extracted update: {artifact:?}");
        on_update(&artifact);

        Ok(())
    }

    /// POST `body` to each target of `operation` in order until one succeeds.
    ///
    /// A transport error stops the chain immediately. When every target answers
    /// with a failure status, the last one is reported with its body.
    async fn send<T>(&self, operation: Operation, body: &T) -> Result<reqwest::Response, Error>
    where
        T: Serialize + ?Sized,
    {
        let targets = self.config.targets(operation);
        let mut failed = None;

        for (attempt, target) in targets.iter().enumerate() {
            let url = self.config.url(target);
            if attempt == 0 {
                log::info!("Sending request to: {url}");
            } else {
                log::info!("Falling back to: {url}");
            }

            let mut request = self.http.post(&url).json(body);
            if target.accept_event_stream {
                request = request.header(ACCEPT, EVENT_STREAM);
            }

            let response = request
                .send()
                .await
                .map_err(|e| Error::Network(format!("Failed to reach {url}: {e}")))?;

            if response.status().is_success() {
                return Ok(response);
            }

            log::warn!("{url} returned HTTP {}", response.status());
            failed = Some(response);
        }

        let Some(response) = failed else {
            return Err(Error::NoTargets(format!("{operation:?}")));
        };

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read error response: {e}")))?;
        log::error!("Error response body: {body}");

        Err(Error::RequestFailed { status, body })
    }
}

fn content_type(response: &reqwest::Response) -> Option<&str> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
}

/// Decode a non-streaming response; unmatched blocks take their value from `fallback`.
async fn read_json(response: reqwest::Response, fallback: &Artifact) -> Result<Artifact, Error> {
    let text = response
        .text()
        .await
        .map_err(|e| Error::Network(format!("Failed to read response body: {e}")))?;

    let payload: BackendResponse = serde_json::from_str(&text)
        .map_err(|e| Error::InvalidResponse(format!("Failed to parse backend response: {e}")))?;
    log::debug!("Received JSON response: {payload:?}");

    if let Some(message) = payload.error_message() {
        log::error!("API error: {message}");
        if let Some(traceback) = &payload.traceback {
            log::error!("Traceback: {traceback}");
        }
        return Err(Error::Backend(message.to_string()));
    }

    Ok(extract_artifact(payload.result_text(), fallback))
}
