//! Google Gemini protocol mapping.
//!
//! Request bodies target `models/{model}:generateContent` (single shot) and
//! `models/{model}:streamGenerateContent` (streaming). The streaming wire
//! shape is not SSE: the response body is a JSON array delivered
//! incrementally, so frame conversion works on whole read chunks. Pure
//! mapping and conversion; no I/O.

pub mod generate;
pub mod streaming;

pub use generate::{extract_candidate_text, ocr_request_body, text_request_body};
pub use streaming::GeminiChunkConverter;
