//! Chat Completions request construction and response extraction.

use papyra_core::error::ExtractError;
use papyra_core::prompts;
use papyra_core::types::{OcrRequest, TextTaskRequest};
use serde_json::{Value, json};

/// Build a streaming OCR request: one user message carrying the context
/// prompt and the image as a data-URL content block.
pub fn ocr_request_body(model: &str, request: &OcrRequest) -> Value {
    let prompt = prompts::ocr_prompt(request.context, request.quality);
    let data_url = format!(
        "data:{};base64,{}",
        request.image.mime_type, request.image.data
    );

    json!({
        "model": model,
        "messages": [{
            "role": "user",
            "content": [
                { "type": "text", "text": prompt },
                { "type": "image_url", "image_url": { "url": data_url } }
            ]
        }],
        "stream": true
    })
}

/// Build a non-streaming text-task request.
pub fn text_request_body(model: &str, request: &TextTaskRequest) -> Value {
    let prompt = prompts::text_task_prompt(request.task, &request.text);

    json!({
        "model": model,
        "messages": [{
            "role": "user",
            "content": prompt
        }],
        "stream": false
    })
}

/// Extract the first choice's message content from a non-streaming
/// response, trimmed.
pub fn extract_message_text(response: &Value) -> Result<String, ExtractError> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .map(|text| text.trim().to_string())
        .ok_or_else(|| {
            ExtractError::Json("response carried no choices[0].message.content".into())
        })
}
