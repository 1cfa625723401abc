use thiserror::Error;

/// Errors returned by the input adapter.
///
/// # Examples
/// ```
/// use sensorevent_core::{InputError, RawInput, SENSOR_EVENT_SIZE, adapt};
///
/// let err = adapt(RawInput::Bytes(&[0u8; 3])).unwrap_err();
/// assert_eq!(
///     err,
///     InputError::LengthMismatch { expected: SENSOR_EVENT_SIZE, actual: 3 }
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("invalid input shape: expected a string or a byte array, got {found}")]
    InvalidInputShape { found: &'static str },
    #[error("record length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("invalid byte value at index {index}: {value}")]
    InvalidByteValue { index: usize, value: String },
}
