//! generateContent request construction and response extraction.

use papyra_core::error::ExtractError;
use papyra_core::prompts;
use papyra_core::types::{OcrRequest, TextTaskRequest};
use serde_json::{Value, json};

/// Build a streaming OCR request: a text part with the context prompt and
/// an `inlineData` part with the image.
pub fn ocr_request_body(request: &OcrRequest) -> Value {
    let prompt = prompts::ocr_prompt(request.context, request.quality);

    json!({
        "contents": [{
            "parts": [
                { "text": prompt },
                {
                    "inlineData": {
                        "mimeType": request.image.mime_type,
                        "data": request.image.data
                    }
                }
            ]
        }]
    })
}

/// Build a non-streaming text-task request.
pub fn text_request_body(request: &TextTaskRequest) -> Value {
    let prompt = prompts::text_task_prompt(request.task, &request.text);

    json!({
        "contents": [{
            "parts": [{ "text": prompt }]
        }]
    })
}

/// Extract the first candidate's first text part from a non-streaming
/// response, trimmed.
pub fn extract_candidate_text(response: &Value) -> Result<String, ExtractError> {
    response["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(|text| text.trim().to_string())
        .ok_or_else(|| {
            ExtractError::Json("response carried no candidates[0].content.parts[0].text".into())
        })
}
