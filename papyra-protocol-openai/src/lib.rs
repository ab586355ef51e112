//! OpenAI Chat Completions protocol mapping.
//!
//! This wire shape is shared by more than one upstream: OpenAI itself and
//! DeepSeek expose the same chat-completion request body, image content
//! blocks, and `data: <json>` / `data: [DONE]` streaming frames. The crate
//! is pure mapping and frame conversion; it performs no I/O.

pub mod chat;
pub mod streaming;

pub use chat::{extract_message_text, ocr_request_body, text_request_body};
pub use streaming::ChatCompletionsEventConverter;
