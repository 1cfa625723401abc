use thiserror::Error;

/// Errors returned when decoding an unvalidated byte slice.
///
/// # Examples
/// ```
/// use sensorevent_core::{DecodeError, RecordLayout, decode_bytes};
///
/// let err = decode_bytes(&[0u8; 4], &RecordLayout::COMPACT).unwrap_err();
/// assert!(matches!(err, DecodeError::TooShort { needed: 32, actual: 4 }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("record too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
}
