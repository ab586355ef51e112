//! Request and response types shared across the pipeline.
//!
//! Wire identifiers are lowercase (`gemini`, `receipt`, `summarize`);
//! unknown provider, context, and quality identifiers fall back to their
//! defaults rather than rejecting the request. Task identifiers are strict:
//! an unknown task has no prompt to select, so the router rejects it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The upstream LLM services a request can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    #[default]
    Gemini,
    DeepSeek,
    OpenAi,
}

impl ProviderId {
    /// Resolve a wire identifier, defaulting to Gemini for unknown or
    /// absent values.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("deepseek") => Self::DeepSeek,
            Some("openai") => Self::OpenAi,
            Some("gemini") => Self::Gemini,
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::DeepSeek => "deepseek",
            Self::OpenAi => "openai",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extraction style hint chosen by the user at capture time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextHint {
    #[default]
    General,
    Book,
    Receipt,
    Handwriting,
    Whiteboard,
    Quiz,
}

impl ContextHint {
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("book") => Self::Book,
            Some("receipt") => Self::Receipt,
            Some("handwriting") => Self::Handwriting,
            Some("whiteboard") => Self::Whiteboard,
            Some("quiz") => Self::Quiz,
            _ => Self::default(),
        }
    }
}

/// Extraction effort level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Standard,
    Enhanced,
}

impl Quality {
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("enhanced") => Self::Enhanced,
            _ => Self::default(),
        }
    }
}

/// Text-mode operations on an already-extracted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTask {
    Summarize,
    Title,
}

impl TextTask {
    /// Strict parse: there is no sensible default task.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "summarize" => Some(Self::Summarize),
            "title" => Some(Self::Title),
            _ => None,
        }
    }
}

/// A normalized, base64-encoded image ready for an OCR request.
///
/// Produced once per upload and discarded when the request completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub data: String,
    pub mime_type: String,
}

/// An OCR extraction request after boundary classification.
#[derive(Debug, Clone)]
pub struct OcrRequest {
    pub image: ImagePayload,
    pub context: ContextHint,
    pub quality: Quality,
}

/// A text-task request after boundary classification.
#[derive(Debug, Clone)]
pub struct TextTaskRequest {
    pub text: String,
    pub task: TextTask,
}

/// Complete non-streaming output of a text task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextTaskResponse {
    pub result: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_wire_names_roundtrip() {
        for id in [ProviderId::Gemini, ProviderId::DeepSeek, ProviderId::OpenAi] {
            assert_eq!(ProviderId::parse_or_default(Some(id.as_str())), id);
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn unknown_provider_falls_back_to_gemini() {
        assert_eq!(ProviderId::parse_or_default(None), ProviderId::Gemini);
        assert_eq!(
            ProviderId::parse_or_default(Some("claude")),
            ProviderId::Gemini
        );
        assert_eq!(ProviderId::parse_or_default(Some("")), ProviderId::Gemini);
    }

    #[test]
    fn unknown_context_and_quality_fall_back() {
        assert_eq!(
            ContextHint::parse_or_default(Some("poster")),
            ContextHint::General
        );
        assert_eq!(Quality::parse_or_default(Some("ultra")), Quality::Standard);
        assert_eq!(
            Quality::parse_or_default(Some("enhanced")),
            Quality::Enhanced
        );
    }

    #[test]
    fn task_parse_is_strict() {
        assert_eq!(TextTask::parse("summarize"), Some(TextTask::Summarize));
        assert_eq!(TextTask::parse("title"), Some(TextTask::Title));
        assert_eq!(TextTask::parse("translate"), None);
    }

    #[test]
    fn image_payload_uses_camel_case_mime_key() {
        let payload = ImagePayload {
            data: "aGk=".into(),
            mime_type: "image/png".into(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["mimeType"], "image/png");
    }
}
