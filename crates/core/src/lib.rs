//! Core library for sitegen
//!
//! This crate implements the **Functional Core** of the sitegen application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The sitegen project uses a two-crate architecture:
//!
//! - **`sitegen_core`** (this crate): Pure transformation functions with zero I/O
//! - **`sitegen`**: HTTP requests, stream reading and the CLI (the Imperative Shell)
//!
//! Everything the shell needs to turn a backend response into `{html, css, js}`
//! lives here and can be tested with plain strings, no mock server required.
//!
//! # Module Organization
//!
//! - [`artifact`]: The `{html, css, js}` triple produced by the backend
//! - [`extract`]: Fenced code block extraction grammar
//! - [`tracker`]: Incremental extraction over a growing stream of text fragments
//! - [`sse`]: Server-sent event line framing and `data:` payload decoding
//! - [`payload`]: Request bodies, input validation and the backend JSON response
//! - [`config`]: Base URL resolution and ordered endpoint target chains
//! - [`error`]: Errors raised by the pure functions above
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use sitegen_core::{artifact::Artifact, tracker::StreamTracker};
//!
//! let mut tracker = StreamTracker::new(Artifact::default());
//! assert!(tracker.push("```html\n<p>hi").is_none());
//! let update = tracker.push("</p>\n```").unwrap();
//! assert_eq!(update.html, "<p>hi</p>");
//! ```

pub mod artifact;
pub mod config;
pub mod error;
pub mod extract;
pub mod payload;
pub mod sse;
pub mod tracker;

pub use artifact::Artifact;
pub use error::Error;
