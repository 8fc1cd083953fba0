use futures::{Stream, StreamExt};
use sitegen_core::sse::{parse_data_line, LineBuffer};
use sitegen_core::tracker::StreamTracker;
use sitegen_core::Artifact;

use crate::error::Error;

/// What to do with a `data:` line whose payload is not valid JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// Stop reading and fail the request
    Abort,
    /// Log the line and keep reading
    Skip,
}

/// How an operation consumes an event stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamPolicy {
    pub malformed: Malformed,
    /// Emit one more artifact from the complete text after the stream ends
    pub final_pass: bool,
}

impl StreamPolicy {
    // Generation and modification disagree on malformed lines. Both behaviors
    // are kept as-is until the backend contract settles on one.
    pub const GENERATE: StreamPolicy = StreamPolicy {
        malformed: Malformed::Abort,
        final_pass: true,
    };

    pub const MODIFY: StreamPolicy = StreamPolicy {
        malformed: Malformed::Skip,
        final_pass: false,
    };
}

/// Read an event stream body, calling `on_update` every time the artifact changes.
///
/// `baseline` is the artifact that unmatched fields fall back to until the
/// backend sends their block.
pub async fn read_event_stream<S, B, E, F>(
    chunks: S,
    baseline: Artifact,
    policy: StreamPolicy,
    on_update: &mut F,
) -> Result<(), Error>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
    F: FnMut(&Artifact),
{
    let mut chunks = std::pin::pin!(chunks);
    let mut lines = LineBuffer::new();
    let mut tracker = StreamTracker::new(baseline);

    while let Some(chunk) = chunks.next().await {
        let chunk = chunk.map_err(|e| Error::Network(format!("Failed to read response stream: {e}")))?;

        for line in lines.push(chunk.as_ref()) {
            handle_line(&line, &mut tracker, policy, on_update)?;
        }
    }

    if let Some(line) = lines.finish() {
        handle_line(&line, &mut tracker, policy, on_update)?;
    }

    log::debug!(
        "Stream finished after {} characters",
        tracker.accumulated().len()
    );

    if policy.final_pass {
        if let Some(artifact) = tracker.finish() {
            log::debug!("Final update: {artifact:?}");
            on_update(&artifact);
        }
    }

    Ok(())
}

fn handle_line<F>(
    line: &str,
    tracker: &mut StreamTracker,
    policy: StreamPolicy,
    on_update: &mut F,
) -> Result<(), Error>
where
    F: FnMut(&Artifact),
{
    if line.trim().is_empty() {
        return Ok(());
    }

    let fragment = match parse_data_line(line) {
        None => return Ok(()),
        Some(Ok(fragment)) => fragment,
        Some(Err(err)) => match policy.malformed {
            Malformed::Abort => return Err(err.into()),
            Malformed::Skip => {
                log::error!("{err}");
                return Ok(());
            }
        },
    };

    if let Some(update) = tracker.push(&fragment) {
        log::debug!("New update: {update:?}");
        on_update(&update);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn data(text: &str) -> String {
        format!("data: {}\n", serde_json::json!({ "text": text }))
    }

    async fn collect(
        chunks: Vec<String>,
        baseline: Artifact,
        policy: StreamPolicy,
    ) -> (Result<(), Error>, Vec<Artifact>) {
        let stream = futures::stream::iter(
            chunks
                .into_iter()
                .map(|chunk| Ok::<_, Infallible>(chunk.into_bytes())),
        );

        let mut updates = Vec::new();
        let result = read_event_stream(stream, baseline, policy, &mut |a: &Artifact| {
            updates.push(a.clone())
        })
        .await;

        (result, updates)
    }

    #[tokio::test]
    async fn test_generate_policy_emits_final_update() {
        let chunks = vec![data("```html\n<p>hi</p>"), data("\n```\n")];

        let (result, updates) = collect(chunks, Artifact::default(), StreamPolicy::GENERATE).await;

        assert!(result.is_ok());
        assert_eq!(
            updates,
            vec![Artifact::new("<p>hi</p>", "", ""), Artifact::new("<p>hi</p>", "", "")]
        );
    }

    #[tokio::test]
    async fn test_modify_policy_has_no_final_update() {
        let baseline = Artifact::new("<p>old</p>", "p {}", "old();");
        let chunks = vec![data("```html\n<p>new</p>\n```")];

        let (result, updates) = collect(chunks, baseline, StreamPolicy::MODIFY).await;

        assert!(result.is_ok());
        assert_eq!(updates, vec![Artifact::new("<p>new</p>", "p {}", "old();")]);
    }

    #[tokio::test]
    async fn test_lines_split_across_chunks() {
        let line = data("```css\nbody { margin: 0; }\n```");
        let (head, tail) = line.split_at(10);

        let (result, updates) = collect(
            vec![head.to_string(), tail.to_string()],
            Artifact::default(),
            StreamPolicy::MODIFY,
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(updates, vec![Artifact::new("", "body { margin: 0; }", "")]);
    }

    #[tokio::test]
    async fn test_non_data_lines_are_ignored() {
        let chunks = vec![
            ": keep-alive\n".to_string(),
            "event: message\n\n".to_string(),
            data("```javascript\nrun();\n```"),
            "id: 7\n".to_string(),
        ];

        let (result, updates) = collect(chunks, Artifact::default(), StreamPolicy::MODIFY).await;

        assert!(result.is_ok());
        assert_eq!(updates, vec![Artifact::new("", "", "run();")]);
    }

    #[tokio::test]
    async fn test_malformed_line_aborts_generation() {
        let chunks = vec![data("```html\n<p>a</p>\n```"), "data: {oops\n".to_string()];

        let (result, updates) = collect(chunks, Artifact::default(), StreamPolicy::GENERATE).await;

        assert!(matches!(result, Err(Error::StreamParse(_))));
        // The update sent before the bad line stays delivered.
        assert_eq!(updates, vec![Artifact::new("<p>a</p>", "", "")]);
    }

    #[tokio::test]
    async fn test_malformed_line_is_skipped_for_modification() {
        let chunks = vec![
            "data: {oops\n".to_string(),
            data("```html\n<p>a</p>\n```"),
        ];

        let (result, updates) = collect(chunks, Artifact::default(), StreamPolicy::MODIFY).await;

        assert!(result.is_ok());
        assert_eq!(updates, vec![Artifact::new("<p>a</p>", "", "")]);
    }

    #[tokio::test]
    async fn test_trailing_line_without_newline_is_processed() {
        let line = data("```html\n<p>end</p>\n```");
        let chunks = vec![line.trim_end().to_string()];

        let (result, updates) = collect(chunks, Artifact::default(), StreamPolicy::MODIFY).await;

        assert!(result.is_ok());
        assert_eq!(updates, vec![Artifact::new("<p>end</p>", "", "")]);
    }

    #[tokio::test]
    async fn test_stream_without_blocks_emits_nothing() {
        let (result, updates) = collect(
            vec![data("Sorry, I can't help with that.")],
            Artifact::default(),
            StreamPolicy::GENERATE,
        )
        .await;

        assert!(result.is_ok());
        assert!(updates.is_empty());
    }

    #[tokio::test]
    async fn test_stream_error_is_reported() {
        let stream = futures::stream::iter(vec![
            Ok(data("```html\n<p>a</p>\n```").into_bytes()),
            Err("connection reset"),
        ]);
        let mut updates = Vec::new();

        let result = read_event_stream(stream, Artifact::default(), StreamPolicy::GENERATE, &mut |a: &Artifact| {
            updates.push(a.clone())
        })
        .await;

        assert!(matches!(result, Err(Error::Network(msg)) if msg.contains("connection reset")));
        assert_eq!(updates.len(), 1);
    }
}
