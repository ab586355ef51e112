//! SSE frame conversion for Chat Completions streams.
//!
//! Each `data:` event carries one chunk object; the text lives in the first
//! choice's `delta.content`. Frames without a content delta (role openers,
//! finish frames) convert to nothing. The `[DONE]` sentinel never reaches
//! this converter — the relay consumes it as the end signal.

use eventsource_stream::Event;
use papyra_core::error::ExtractError;
use papyra_core::streaming::SseFragmentConverter;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ChatChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    delta: Option<ChunkDelta>,
}

#[derive(Debug, Deserialize)]
struct ChunkDelta {
    content: Option<String>,
}

/// Converter for the OpenAI-compatible streaming wire shape.
#[derive(Debug, Clone)]
pub struct ChatCompletionsEventConverter {
    label: String,
}

impl ChatCompletionsEventConverter {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl SseFragmentConverter for ChatCompletionsEventConverter {
    fn convert_event(&self, event: Event) -> Vec<Result<String, ExtractError>> {
        let chunk: ChatChunk = match serde_json::from_str(&event.data) {
            Ok(chunk) => chunk,
            Err(e) => {
                return vec![Err(ExtractError::MalformedFrame(format!(
                    "{}: {e}",
                    self.label
                )))];
            }
        };

        chunk
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta)
            .and_then(|delta| delta.content)
            .filter(|content| !content.is_empty())
            .map(|content| vec![Ok(content)])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(data: &str) -> Event {
        Event {
            event: String::new(),
            data: data.to_string(),
            id: String::new(),
            retry: None,
        }
    }

    fn convert(data: &str) -> Vec<Result<String, ExtractError>> {
        ChatCompletionsEventConverter::new("openai").convert_event(event(data))
    }

    #[test]
    fn content_delta_becomes_a_fragment() {
        let out = convert(r#"{"choices":[{"delta":{"content":"Hel"}}]}"#);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].as_ref().unwrap(), "Hel");
    }

    #[test]
    fn role_opener_and_finish_frames_convert_to_nothing() {
        assert!(convert(r#"{"choices":[{"delta":{"role":"assistant"}}]}"#).is_empty());
        assert!(convert(r#"{"choices":[{"delta":{},"finish_reason":"stop"}]}"#).is_empty());
        assert!(convert(r#"{"choices":[]}"#).is_empty());
    }

    #[test]
    fn unparseable_frame_reports_malformed() {
        let out = convert("{broken");
        assert_eq!(out.len(), 1);
        assert!(matches!(
            out[0],
            Err(ExtractError::MalformedFrame(_))
        ));
    }

    #[test]
    fn only_the_first_choice_is_read() {
        let out = convert(
            r#"{"choices":[{"delta":{"content":"first"}},{"delta":{"content":"second"}}]}"#,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].as_ref().unwrap(), "first");
    }
}
