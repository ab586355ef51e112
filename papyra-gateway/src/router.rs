//! Boundary request classification.
//!
//! One endpoint serves both modes; the body shape decides. A `task` +
//! `text` pair selects text-task mode, an `image` field selects OCR mode,
//! anything else is rejected before any upstream work happens.

use papyra_core::error::ExtractError;
use papyra_core::types::{
    ContextHint, ImagePayload, OcrRequest, ProviderId, Quality, TextTask, TextTaskRequest,
};
use serde::Deserialize;

/// The raw boundary body. Every field is optional at the wire level;
/// classification decides what is actually required.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryRequest {
    pub image: Option<String>,
    pub mime_type: Option<String>,
    pub context: Option<String>,
    pub quality: Option<String>,
    pub text: Option<String>,
    pub task: Option<String>,
    pub llm: Option<String>,
}

/// A classified request, ready for dispatch.
#[derive(Debug)]
pub enum RoutedRequest {
    Ocr {
        provider: ProviderId,
        request: OcrRequest,
    },
    Text {
        provider: ProviderId,
        request: TextTaskRequest,
    },
}

impl RoutedRequest {
    pub fn provider(&self) -> ProviderId {
        match self {
            Self::Ocr { provider, .. } | Self::Text { provider, .. } => *provider,
        }
    }
}

/// Classify a boundary body into one of the two request modes.
pub fn classify(body: BoundaryRequest) -> Result<RoutedRequest, ExtractError> {
    let provider = ProviderId::parse_or_default(body.llm.as_deref());

    if let (Some(task), Some(text)) = (body.task.as_deref(), body.text.as_deref()) {
        let task = TextTask::parse(task)
            .ok_or_else(|| ExtractError::InvalidRequest(format!("unknown task '{task}'")))?;
        return Ok(RoutedRequest::Text {
            provider,
            request: TextTaskRequest {
                text: text.to_string(),
                task,
            },
        });
    }

    if let Some(image) = body.image {
        let mime_type = body
            .mime_type
            .filter(|m| !m.is_empty())
            .ok_or_else(|| ExtractError::InvalidRequest("image requests need a mimeType".into()))?;
        return Ok(RoutedRequest::Ocr {
            provider,
            request: OcrRequest {
                image: ImagePayload {
                    data: image,
                    mime_type,
                },
                context: ContextHint::parse_or_default(body.context.as_deref()),
                quality: Quality::parse_or_default(body.quality.as_deref()),
            },
        });
    }

    Err(ExtractError::InvalidRequest(
        "body must carry either task+text or image+mimeType".into(),
    ))
}
