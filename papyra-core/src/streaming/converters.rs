//! Frame converter traits.
//!
//! Each provider protocol implements one of these to translate its native
//! frames into text fragments. Converters report per-frame parse failures
//! as [`ExtractError::MalformedFrame`] values; the relay owns the policy of
//! logging and skipping those, so the skip behavior is uniform across
//! protocols.

use crate::error::ExtractError;
use eventsource_stream::Event;

/// Converts one SSE event into zero or more text fragments.
///
/// Used for providers whose stream is newline-delimited `data: <json>`
/// events (the OpenAI-compatible wire shape). Done markers such as
/// `[DONE]` never reach the converter — the relay consumes them as the
/// end-of-stream signal.
pub trait SseFragmentConverter: Send + Sync {
    fn convert_event(&self, event: Event) -> Vec<Result<String, ExtractError>>;
}

/// Converts one self-contained byte chunk into zero or more text fragments.
///
/// Used for providers whose stream has no frame delimiter at all: every
/// read is treated as one complete JSON value (the Gemini wire shape).
/// There is no carry-over between chunks.
pub trait JsonChunkConverter: Send + Sync {
    fn convert_chunk(&self, chunk: &[u8]) -> Vec<Result<String, ExtractError>>;
}
