//! Environment-derived configuration.
//!
//! Credentials are looked up at request time, one env var per provider, so
//! a key rotated in the environment takes effect without a restart. Keys
//! are wrapped in [`SecretString`] the moment they are read and are never
//! logged or echoed to the client.

use papyra_core::types::ProviderId;
use secrecy::SecretString;
use std::collections::HashMap;

/// Process-level settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Listen address, `PAPYRA_ADDR`, default `0.0.0.0:8787`.
    pub addr: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            addr: std::env::var("PAPYRA_ADDR").unwrap_or_else(|_| "0.0.0.0:8787".to_string()),
        }
    }
}

/// Per-provider API key lookup.
///
/// Production use reads the environment on every lookup; tests inject
/// fixed keys through [`CredentialStore::with_credential`] to stay
/// independent of process-global env state.
#[derive(Clone, Default)]
pub struct CredentialStore {
    overrides: HashMap<ProviderId, SecretString>,
}

impl CredentialStore {
    /// The env var holding a provider's API key.
    pub fn env_var(provider: ProviderId) -> &'static str {
        match provider {
            ProviderId::Gemini => "GEMINI_API_KEY",
            ProviderId::DeepSeek => "DEEPSEEK_API_KEY",
            ProviderId::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Pin a provider's key, bypassing the environment.
    pub fn with_credential(mut self, provider: ProviderId, key: impl Into<String>) -> Self {
        self.overrides.insert(provider, SecretString::from(key.into()));
        self
    }

    /// Fetch the key for a provider, if one is configured.
    pub fn lookup(&self, provider: ProviderId) -> Option<SecretString> {
        if let Some(key) = self.overrides.get(&provider) {
            return Some(key.clone());
        }
        std::env::var(Self::env_var(provider))
            .ok()
            .filter(|value| !value.is_empty())
            .map(SecretString::from)
    }
}
