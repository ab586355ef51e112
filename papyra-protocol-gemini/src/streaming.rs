//! Stream-chunk conversion for `streamGenerateContent` responses.
//!
//! The streaming body is a JSON array of response objects delivered
//! incrementally. Each read chunk is parsed as one self-contained JSON
//! value — an array of response objects, or a bare object. This matches
//! the upstream's observed chunking but is not guaranteed by general
//! stream semantics; a read that splits a JSON value degrades to a
//! malformed frame, which the relay logs and skips.

use papyra_core::error::ExtractError;
use papyra_core::streaming::JsonChunkConverter;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    candidates: Vec<StreamCandidate>,
}

#[derive(Debug, Deserialize)]
struct StreamCandidate {
    content: Option<StreamContent>,
}

#[derive(Debug, Deserialize)]
struct StreamContent {
    #[serde(default)]
    parts: Vec<StreamPart>,
}

#[derive(Debug, Deserialize)]
struct StreamPart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StreamChunk {
    Batch(Vec<StreamResponse>),
    Single(StreamResponse),
}

/// Converter for the Gemini streaming wire shape.
#[derive(Debug, Clone)]
pub struct GeminiChunkConverter;

impl GeminiChunkConverter {
    fn first_text(response: StreamResponse) -> Option<String> {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .filter(|text| !text.is_empty())
    }
}

impl JsonChunkConverter for GeminiChunkConverter {
    fn convert_chunk(&self, chunk: &[u8]) -> Vec<Result<String, ExtractError>> {
        let parsed: StreamChunk = match serde_json::from_slice(chunk) {
            Ok(parsed) => parsed,
            Err(e) => {
                return vec![Err(ExtractError::MalformedFrame(format!("gemini: {e}")))];
            }
        };

        let responses = match parsed {
            StreamChunk::Batch(responses) => responses,
            StreamChunk::Single(response) => vec![response],
        };

        responses
            .into_iter()
            .filter_map(Self::first_text)
            .map(Ok)
            .collect()
    }
}
