//! Input adapter: turns host input into a fixed-size [`RawRecord`].
//!
//! Two input forms are accepted. Byte sequences must match the layout size
//! exactly. Text is copied byte for byte up to the layout size, and a short
//! string is zero-padded unless [`TextLength::Exact`] is selected.

pub mod error;

use serde_json::Value;
use tracing::debug;

use crate::DecodeConfig;
use crate::decoder::layout::RecordLayout;
pub use error::InputError;

/// Host input before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput<'a> {
    /// String whose raw UTF-8 bytes hold the record.
    Text(&'a str),
    Bytes(&'a [u8]),
}

/// Length rule applied to [`RawInput::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextLength {
    /// Truncate long strings and zero-fill short ones.
    #[default]
    Pad,
    /// Require exactly `layout.size()` bytes, as for byte sequences.
    Exact,
}

/// A record buffer whose length always equals its layout's size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    bytes: Vec<u8>,
    layout: RecordLayout,
}

impl RawRecord {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn layout(&self) -> &RecordLayout {
        &self.layout
    }
}

/// Adapt input against the default layout with lenient text handling.
pub fn adapt(input: RawInput<'_>) -> Result<RawRecord, InputError> {
    adapt_with(input, &RecordLayout::default(), TextLength::default())
}

pub fn adapt_with(
    input: RawInput<'_>,
    layout: &RecordLayout,
    text_length: TextLength,
) -> Result<RawRecord, InputError> {
    match input {
        RawInput::Bytes(bytes) => from_exact(bytes, layout),
        RawInput::Text(text) => match text_length {
            TextLength::Exact => from_exact(text.as_bytes(), layout),
            TextLength::Pad => Ok(from_padded(text, layout)),
        },
    }
}

/// Adapt a generic host value: strings take the text path, arrays of byte
/// values take the byte-sequence path, anything else is rejected.
pub fn adapt_value(value: &Value, config: &DecodeConfig) -> Result<RawRecord, InputError> {
    match value {
        Value::String(text) => {
            adapt_with(RawInput::Text(text.as_str()), &config.layout, config.text_length)
        }
        Value::Array(items) => {
            let bytes = byte_values(items)?;
            adapt_with(RawInput::Bytes(&bytes), &config.layout, config.text_length)
        }
        other => Err(InputError::InvalidInputShape {
            found: value_kind(other),
        }),
    }
}

fn from_exact(bytes: &[u8], layout: &RecordLayout) -> Result<RawRecord, InputError> {
    if bytes.len() != layout.size() {
        debug!(
            expected = layout.size(),
            actual = bytes.len(),
            layout = layout.name(),
            "rejecting record with wrong length"
        );
        return Err(InputError::LengthMismatch {
            expected: layout.size(),
            actual: bytes.len(),
        });
    }
    Ok(RawRecord {
        bytes: bytes.to_vec(),
        layout: *layout,
    })
}

/// Copies whole UTF-8 characters only; a character that would straddle the
/// end of the record is dropped and its bytes stay zero.
fn from_padded(text: &str, layout: &RecordLayout) -> RawRecord {
    let bytes = text.as_bytes();
    let mut buffer = vec![0u8; layout.size()];
    let mut copied = bytes.len().min(layout.size());
    while !text.is_char_boundary(copied) {
        copied -= 1;
    }
    buffer[..copied].copy_from_slice(&bytes[..copied]);
    if copied != bytes.len() || copied != layout.size() {
        debug!(
            source = bytes.len(),
            size = layout.size(),
            "text record truncated or zero-padded"
        );
    }
    RawRecord {
        bytes: buffer,
        layout: *layout,
    }
}

fn byte_values(items: &[Value]) -> Result<Vec<u8>, InputError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_u64()
                .and_then(|value| u8::try_from(value).ok())
                .ok_or_else(|| InputError::InvalidByteValue {
                    index,
                    value: item.to_string(),
                })
        })
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
