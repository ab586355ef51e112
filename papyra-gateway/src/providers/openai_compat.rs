//! Adapter for providers speaking the OpenAI Chat Completions wire shape.
//!
//! OpenAI and DeepSeek differ only in base URL, model, and credential; both
//! run through this one adapter with different construction parameters.

use async_trait::async_trait;
use futures_util::StreamExt;
use papyra_core::error::ExtractError;
use papyra_core::streaming::{FragmentStream, RelayConfig, relay_sse};
use papyra_core::types::{OcrRequest, ProviderId, TextTaskRequest};
use papyra_protocol_openai::{
    ChatCompletionsEventConverter, extract_message_text, ocr_request_body, text_request_body,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::{ProviderAdapter, fail_on_status};

pub struct OpenAiCompatAdapter {
    provider: ProviderId,
    base_url: String,
    model: String,
}

impl OpenAiCompatAdapter {
    pub fn new(
        provider: ProviderId,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    pub fn openai() -> Self {
        Self::new(ProviderId::OpenAi, "https://api.openai.com/v1", "gpt-4o")
    }

    pub fn deepseek() -> Self {
        Self::new(
            ProviderId::DeepSeek,
            "https://api.deepseek.com/v1",
            "deepseek-chat",
        )
    }

    /// Point the adapter at a different host (tests use a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiCompatAdapter {
    fn provider(&self) -> ProviderId {
        self.provider
    }

    async fn stream_ocr(
        &self,
        http: &reqwest::Client,
        api_key: &SecretString,
        request: &OcrRequest,
    ) -> Result<FragmentStream, ExtractError> {
        let body = ocr_request_body(&self.model, request);
        debug!(provider = %self.provider, model = %self.model, "sending streaming OCR request");

        let response = http
            .post(self.chat_url())
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await?;
        let response = fail_on_status(response).await?;

        let label = self.provider.as_str();
        let bytes = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| ExtractError::Stream(e.to_string())));

        Ok(relay_sse(
            bytes,
            ChatCompletionsEventConverter::new(label),
            RelayConfig::new(label),
        ))
    }

    async fn text_task(
        &self,
        http: &reqwest::Client,
        api_key: &SecretString,
        request: &TextTaskRequest,
    ) -> Result<String, ExtractError> {
        let body = text_request_body(&self.model, request);
        debug!(provider = %self.provider, task = ?request.task, "sending text task");

        let response = http
            .post(self.chat_url())
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await?;
        let response = fail_on_status(response).await?;

        let json: serde_json::Value = response.json().await?;
        extract_message_text(&json)
    }
}
