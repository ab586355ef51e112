//! The papyra gateway: a stateless HTTP boundary in front of the provider
//! adapters.
//!
//! One endpoint, `POST /api/process`, multiplexes the two request modes by
//! body shape. OCR requests answer with a streamed plain-text body whose
//! concatenated bytes are the extracted document; text tasks answer with a
//! single JSON result. The gateway holds no state across requests beyond a
//! shared HTTP client.

pub mod config;
pub mod handlers;
pub mod providers;
pub mod respond;
pub mod router;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::config::CredentialStore;
use crate::providers::Adapters;

/// Shared per-process state. Cloning is cheap; nothing here is mutated by
/// request handling.
#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub credentials: CredentialStore,
    pub adapters: Arc<Adapters>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_parts(CredentialStore::default(), Adapters::default())
    }

    /// Assemble state from explicit parts; tests use this to point the
    /// adapters at a mock upstream.
    pub fn with_parts(credentials: CredentialStore, adapters: Adapters) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            adapters: Arc::new(adapters),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the gateway router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/process", post(handlers::process))
        .route("/api/health", get(|| async { "OK" }))
        .with_state(state)
}
