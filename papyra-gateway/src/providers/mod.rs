//! Provider adapters.
//!
//! Each adapter translates a normalized request into its provider's wire
//! protocol, sends it, and hands streaming bodies to the relay. The set of
//! adapters is closed: dispatch goes through [`Adapters::get`], keyed by
//! [`ProviderId`], so provider behavior stays centralized and testable in
//! isolation.

mod gemini;
mod openai_compat;

pub use gemini::GeminiAdapter;
pub use openai_compat::OpenAiCompatAdapter;

use async_trait::async_trait;
use papyra_core::error::ExtractError;
use papyra_core::streaming::FragmentStream;
use papyra_core::types::{OcrRequest, ProviderId, TextTaskRequest};
use secrecy::SecretString;

/// One upstream LLM service.
///
/// `stream_ocr` resolves once the upstream has answered the handshake; the
/// returned stream then yields extracted-text fragments as the provider
/// produces them. `text_task` is fully synchronous from the caller's view.
/// Neither retries, and neither enforces a timeout.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn provider(&self) -> ProviderId;

    async fn stream_ocr(
        &self,
        http: &reqwest::Client,
        api_key: &SecretString,
        request: &OcrRequest,
    ) -> Result<FragmentStream, ExtractError>;

    async fn text_task(
        &self,
        http: &reqwest::Client,
        api_key: &SecretString,
        request: &TextTaskRequest,
    ) -> Result<String, ExtractError>;
}

/// The closed dispatch table.
pub struct Adapters {
    pub gemini: GeminiAdapter,
    pub deepseek: OpenAiCompatAdapter,
    pub openai: OpenAiCompatAdapter,
}

impl Adapters {
    pub fn get(&self, provider: ProviderId) -> &dyn ProviderAdapter {
        match provider {
            ProviderId::Gemini => &self.gemini,
            ProviderId::DeepSeek => &self.deepseek,
            ProviderId::OpenAi => &self.openai,
        }
    }
}

impl Default for Adapters {
    fn default() -> Self {
        Self {
            gemini: GeminiAdapter::default(),
            deepseek: OpenAiCompatAdapter::deepseek(),
            openai: OpenAiCompatAdapter::openai(),
        }
    }
}

/// Turn a non-success upstream status into `Upstream { status, body }`.
pub(crate) async fn fail_on_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ExtractError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "failed to read error body".to_string());
    Err(ExtractError::Upstream {
        status: status.as_u16(),
        body,
    })
}
