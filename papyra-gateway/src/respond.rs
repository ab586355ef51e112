//! Response adapters: fragment streams to plain-text bodies, errors to the
//! JSON envelope.

use std::convert::Infallible;

use axum::Json;
use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures_util::StreamExt;
use papyra_core::error::ExtractError;
use papyra_core::streaming::FragmentStream;
use serde_json::json;

/// Wrap a fragment stream as a streamed `text/plain` response body.
///
/// Fragments pass through unmodified. A terminal relay error cannot change
/// the already-sent 200 status, so it is rendered into the text stream and
/// the body ends; the client sees a partial result with a trailing error
/// marker rather than a silent truncation.
pub fn text_stream_response(fragments: FragmentStream) -> Response {
    let body = fragments.map(|item| -> Result<Bytes, Infallible> {
        match item {
            Ok(fragment) => Ok(Bytes::from(fragment)),
            Err(e) => Ok(Bytes::from(format!("\n[Error: {e}]\n"))),
        }
    });

    let mut response = Response::new(Body::from_stream(body));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

/// Boundary error wrapper carrying the HTTP mapping.
#[derive(Debug)]
pub struct ApiError(pub ExtractError);

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ExtractError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            // Upstream status passes through verbatim.
            ExtractError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
