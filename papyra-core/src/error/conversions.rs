//! Conversions from common library error types into [`ExtractError`].

use super::types::ExtractError;

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for ExtractError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

impl From<serde_json::Error> for ExtractError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
