//! Adapter for the Gemini generateContent API.

use async_trait::async_trait;
use futures_util::StreamExt;
use papyra_core::error::ExtractError;
use papyra_core::streaming::{FragmentStream, relay_json_chunks};
use papyra_core::types::{OcrRequest, ProviderId, TextTaskRequest};
use papyra_protocol_gemini::{
    GeminiChunkConverter, extract_candidate_text, ocr_request_body, text_request_body,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::{ProviderAdapter, fail_on_status};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

pub struct GeminiAdapter {
    base_url: String,
    model: String,
}

impl GeminiAdapter {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Point the adapter at a different host (tests use a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, verb: &str) -> String {
        format!(
            "{}/models/{}:{verb}",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl Default for GeminiAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_MODEL)
    }
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::Gemini
    }

    async fn stream_ocr(
        &self,
        http: &reqwest::Client,
        api_key: &SecretString,
        request: &OcrRequest,
    ) -> Result<FragmentStream, ExtractError> {
        let body = ocr_request_body(request);
        debug!(model = %self.model, "sending streaming OCR request");

        let response = http
            .post(self.endpoint("streamGenerateContent"))
            .header("x-goog-api-key", api_key.expose_secret())
            .json(&body)
            .send()
            .await?;
        let response = fail_on_status(response).await?;

        let bytes = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| ExtractError::Stream(e.to_string())));

        Ok(relay_json_chunks(bytes, GeminiChunkConverter, "gemini"))
    }

    async fn text_task(
        &self,
        http: &reqwest::Client,
        api_key: &SecretString,
        request: &TextTaskRequest,
    ) -> Result<String, ExtractError> {
        let body = text_request_body(request);
        debug!(model = %self.model, task = ?request.task, "sending text task");

        let response = http
            .post(self.endpoint("generateContent"))
            .header("x-goog-api-key", api_key.expose_secret())
            .json(&body)
            .send()
            .await?;
        let response = fail_on_status(response).await?;

        let json: serde_json::Value = response.json().await?;
        extract_candidate_text(&json)
    }
}
