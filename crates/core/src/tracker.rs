//! Incremental extraction over a streamed response
//!
//! The backend streams its answer as small text fragments. After every
//! fragment the full accumulated text is matched against the fenced block
//! grammar of [`crate::extract`], and a new [`Artifact`] is produced only when
//! one of its fields actually changed.
//!
//! The first complete match of a block can not move once it exists: appending
//! text only adds candidate fences after it. A block that has matched is
//! therefore remembered and never scanned again, which keeps long streams
//! from rescanning the whole accumulator three times per fragment.

use crate::artifact::{Artifact, Extracted};
use crate::extract::{extract_block, Language};

#[derive(Debug, Clone)]
pub struct StreamTracker {
    accumulated: String,
    last_emitted: Artifact,
    settled: Extracted,
}

impl StreamTracker {
    /// Start tracking a stream. Unmatched fields carry `baseline` forward.
    pub fn new(baseline: Artifact) -> Self {
        Self {
            accumulated: String::new(),
            last_emitted: baseline,
            settled: Extracted::default(),
        }
    }

    /// Append a fragment and return the new artifact if any field changed.
    pub fn push(&mut self, fragment: &str) -> Option<Artifact> {
        self.accumulated.push_str(fragment);

        let extracted = self.extract();
        let candidate = self.last_emitted.merge(&extracted);

        if candidate == self.last_emitted {
            return None;
        }

        self.last_emitted = candidate.clone();
        Some(candidate)
    }

    /// Final pass over the complete text.
    ///
    /// Returns an artifact whenever at least one block matched, even if it is
    /// identical to the last one returned by [`StreamTracker::push`].
    pub fn finish(&mut self) -> Option<Artifact> {
        let extracted = self.extract();
        extracted.any().then(|| self.last_emitted.merge(&extracted))
    }

    /// Text received so far
    pub fn accumulated(&self) -> &str {
        &self.accumulated
    }

    /// Last artifact returned by [`StreamTracker::push`], or the baseline
    pub fn last_emitted(&self) -> &Artifact {
        &self.last_emitted
    }

    fn extract(&mut self) -> Extracted {
        let text = &self.accumulated;
        let settled = &mut self.settled;

        for language in Language::ALL {
            let slot = match language {
                Language::Html => &mut settled.html,
                Language::Css => &mut settled.css,
                Language::Javascript => &mut settled.js,
            };
            if slot.is_none() {
                *slot = extract_block(text, language);
            }
        }

        settled.clone()
    }
}
