//! The stream relay.
//!
//! Consumes an upstream byte stream and re-emits an ordered sequence of
//! text fragments, normalizing two incompatible framings:
//!
//! - [`relay_sse`] for newline-delimited `data: <json>` events. Routing the
//!   bytes through `eventsource-stream` gives incremental UTF-8 decoding and
//!   partial-line carry-over across reads, so a multi-byte character split
//!   between two reads cannot corrupt the output.
//! - [`relay_json_chunks`] for streams where every read is one
//!   self-contained JSON value. No carry-over exists for this framing.
//!
//! Both relays share the failure policy: a [`ExtractError::MalformedFrame`]
//! from the converter is logged and skipped; any other error is terminal and
//! ends the sequence after being yielded. Fragments are handed to the caller
//! one at a time, as produced.

use eventsource_stream::Eventsource;
use futures::Stream;
use futures_util::StreamExt;
use tracing::warn;

use crate::error::ExtractError;
use crate::streaming::{FragmentStream, JsonChunkConverter, SseFragmentConverter};

/// Relay configuration for SSE framing.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Label used in log and error messages (e.g. "openai", "deepseek").
    pub label: String,
    /// SSE `data` payloads that signal normal end-of-stream. These are
    /// consumed by the relay and never parsed as JSON.
    pub done_markers: Vec<String>,
}

impl RelayConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            done_markers: vec!["[DONE]".to_string()],
        }
    }
}

/// Relay a byte stream of SSE events into a fragment stream.
pub fn relay_sse<S, B, C>(byte_stream: S, converter: C, cfg: RelayConfig) -> FragmentStream
where
    S: Stream<Item = Result<B, ExtractError>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    C: SseFragmentConverter + 'static,
{
    let out = async_stream::stream! {
        let mut events = Box::pin(byte_stream.eventsource());

        while let Some(item) = events.next().await {
            let event = match item {
                Ok(ev) => ev,
                Err(e) => {
                    yield Err(ExtractError::Stream(format!(
                        "SSE stream error ({}): {e}",
                        cfg.label
                    )));
                    return;
                }
            };

            {
                let data = event.data.trim();
                if data.is_empty() {
                    continue;
                }
                if cfg.done_markers.iter().any(|m| m == data) {
                    return;
                }
            }

            for converted in converter.convert_event(event) {
                match converted {
                    Ok(fragment) => yield Ok(fragment),
                    Err(e) if e.is_frame_local() => {
                        warn!("skipping malformed frame ({}): {e}", cfg.label);
                    }
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }
        }
    };

    Box::pin(out)
}

/// Relay a byte stream of self-contained JSON chunks into a fragment stream.
pub fn relay_json_chunks<S, B, C>(
    byte_stream: S,
    converter: C,
    label: impl Into<String>,
) -> FragmentStream
where
    S: Stream<Item = Result<B, ExtractError>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    C: JsonChunkConverter + 'static,
{
    let label = label.into();
    let out = async_stream::stream! {
        let mut chunks = Box::pin(byte_stream);

        while let Some(item) = chunks.next().await {
            let chunk = match item {
                Ok(c) => c,
                Err(e) => {
                    yield Err(ExtractError::Stream(format!(
                        "stream error ({label}): {e}"
                    )));
                    return;
                }
            };

            for converted in converter.convert_chunk(chunk.as_ref()) {
                match converted {
                    Ok(fragment) => yield Ok(fragment),
                    Err(e) if e.is_frame_local() => {
                        warn!("skipping malformed chunk ({label}): {e}");
                    }
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }
        }
    };

    Box::pin(out)
}
