//! The extraction error taxonomy.
//!
//! One enum covers every failure the pipeline can produce, from local image
//! processing up to mid-stream upstream faults. Variants that reject a
//! request before any upstream call (`InvalidRequest`, `MissingCredential`)
//! are distinct from variants that surface an upstream failure
//! (`Upstream`, `Stream`), because the boundary maps them to different
//! HTTP statuses.

use crate::types::ProviderId;
use thiserror::Error;

/// Errors produced by the extraction pipeline.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The uploaded image could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// Re-encoding the normalized bitmap produced no usable data.
    #[error("failed to encode image: {0}")]
    Encode(String),

    /// The boundary request matched neither the OCR nor the text-task shape.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The selected provider has no credential configured. Checked before
    /// any upstream call is attempted.
    #[error("no API key configured for provider '{0}'")]
    MissingCredential(ProviderId),

    /// The upstream provider answered with a non-success status.
    /// Propagated verbatim, never retried.
    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The upstream connection dropped or became unreadable mid-stream.
    /// Ends the fragment sequence early; partial output is not retracted.
    #[error("stream failed: {0}")]
    Stream(String),

    /// A single corrupt frame inside an otherwise healthy stream. The relay
    /// logs these and skips them; they never abort the stream.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    /// Transport-level failure sending a request.
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization or deserialization failure.
    #[error("JSON error: {0}")]
    Json(String),
}

impl ExtractError {
    /// Whether the relay treats this error as skippable rather than terminal.
    pub fn is_frame_local(&self) -> bool {
        matches!(self, Self::MalformedFrame(_))
    }
}
