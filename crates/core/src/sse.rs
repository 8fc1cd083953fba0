//! Server-sent event framing for the streaming backend
//!
//! The backend frames each fragment of its answer as a line of the form
//! `data: {"text": "..."}`. Network chunks do not respect line boundaries, so
//! [`LineBuffer`] keeps the unterminated tail of one chunk until the next one
//! arrives.

use serde::Deserialize;

use crate::error::Error;

/// Prefix of a line that carries an event payload
pub const DATA_PREFIX: &str = "data: ";

/// Content type announced by streaming responses
pub const EVENT_STREAM: &str = "text/event-stream";

#[derive(Debug, Deserialize)]
struct DataPayload {
    #[serde(default)]
    text: Option<String>,
}

/// Splits a byte stream into complete, UTF-8 decoded lines
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return every line it completed, without the line terminator.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            lines.push(decode_line(&line[..pos]));
        }
        lines
    }

    /// Flush the last line if the stream did not end with a newline.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let line = std::mem::take(&mut self.pending);
        Some(decode_line(&line))
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(bytes);
    let line: &str = &decoded;
    line.strip_suffix('\r').unwrap_or(line).to_string()
}

/// Decode the text fragment carried by an SSE line.
///
/// Returns `None` for lines that are not `data:` lines, so comments, event
/// names and keep-alive blanks never reach the accumulator. A payload without
/// a `text` field decodes to an empty fragment.
pub fn parse_data_line(line: &str) -> Option<Result<String, Error>> {
    let payload = line.strip_prefix(DATA_PREFIX)?;

    Some(
        serde_json::from_str::<DataPayload>(payload)
            .map(|data| data.text.unwrap_or_default())
            .map_err(|e| Error::StreamParse(e.to_string())),
    )
}

/// Whether a `Content-Type` header value announces an event stream
pub fn is_event_stream(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|value| value.contains(EVENT_STREAM))
}
