//! Core streaming types.

use futures::Stream;
use std::pin::Pin;

use crate::error::ExtractError;

/// The uniform output of the relay: an ordered, lazy, finite sequence of
/// plain-text fragments.
///
/// Fragments concatenate in arrival order with no separators. The sequence
/// ends either cleanly (stream end) or with a single terminal `Err` item;
/// fragments already yielded before a terminal error stand — the caller must
/// treat an errored stream as a partial result. Dropping the stream drops
/// the upstream connection.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, ExtractError>> + Send>>;
