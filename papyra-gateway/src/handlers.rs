//! The boundary handler.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use papyra_core::error::ExtractError;
use papyra_core::types::TextTaskResponse;
use tracing::{debug, info};

use crate::AppState;
use crate::respond::{ApiError, text_stream_response};
use crate::router::{BoundaryRequest, RoutedRequest, classify};

/// `POST /api/process` — both request modes, multiplexed by body shape.
///
/// The credential gate runs after classification and before the adapter is
/// invoked, so a misconfigured provider is rejected without any upstream
/// traffic.
pub async fn process(
    State(state): State<AppState>,
    Json(body): Json<BoundaryRequest>,
) -> Result<Response, ApiError> {
    let routed = classify(body)?;
    let provider = routed.provider();

    let api_key = state
        .credentials
        .lookup(provider)
        .ok_or(ExtractError::MissingCredential(provider))?;
    let adapter = state.adapters.get(provider);

    match routed {
        RoutedRequest::Ocr { request, .. } => {
            info!(provider = %provider, context = ?request.context, "starting OCR extraction");
            let fragments = adapter.stream_ocr(&state.http, &api_key, &request).await?;
            Ok(text_stream_response(fragments))
        }
        RoutedRequest::Text { request, .. } => {
            debug!(provider = %provider, task = ?request.task, "running text task");
            let result = adapter.text_task(&state.http, &api_key, &request).await?;
            Ok(Json(TextTaskResponse { result }).into_response())
        }
    }
}
