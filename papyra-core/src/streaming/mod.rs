//! Streaming module.
//!
//! Normalizes provider byte streams into one uniform sequence of plain-text
//! fragments:
//! - Fragment stream type and relay configuration
//! - Per-protocol frame converter traits
//! - The relay generators for SSE and whole-chunk-JSON framing

mod converters;
mod relay;
mod types;

pub use converters::*;
pub use relay::*;
pub use types::*;
