//! Protocol error types.

use crate::types::RequestType;
use thiserror::Error;

/// Errors raised while encoding or decoding a request.
///
/// All of these are format or contract violations. None of them is
/// transient, so retrying the same bytes always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("buffer too short: need {needed} bytes, got {available}")]
    TooShort { needed: usize, available: usize },

    #[error("invalid {field} tag: {value:#04x}")]
    InvalidTag { field: &'static str, value: u8 },

    #[error("unexpected request type: expected {expected}, got {actual:#04x}")]
    UnexpectedRequestType { expected: RequestType, actual: u8 },

    #[error("{field} too large: {size} bytes (max {max})")]
    FieldTooLarge {
        field: &'static str,
        size: usize,
        max: usize,
    },
}

impl ProtocolError {
    pub(crate) fn too_short(needed: usize, available: usize) -> Self {
        ProtocolError::TooShort { needed, available }
    }
}

/// Errors raised while mutating a stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("value overflow")]
    Overflow,

    #[error("value underflow")]
    Underflow,

    #[error("entry is not a counter")]
    NotACounter,

    #[error("counter value has {len} bytes, expected {expected}")]
    InvalidCounter { len: usize, expected: usize },
}
