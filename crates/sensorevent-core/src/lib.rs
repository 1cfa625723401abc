//! Decoder for fixed-size unified sensor event records.
//!
//! A record is a small binary buffer produced by sensor firmware: a header
//! (version, sensor id, type tag), a 16-byte payload union whose meaning
//! depends on the tag, and a timestamp. The pipeline is
//! input adapter -> decoder -> projection:
//!
//! - [`adapt`] validates host input into a [`RawRecord`];
//! - [`decode`] turns a record into a typed [`SensorEvent`];
//! - [`project`] maps the event onto a generic JSON object.
//!
//! Every stage is pure. Only the adapter can fail, and it fails with an
//! explicit [`InputError`].
//!
//! Invariants:
//! - The payload is read under the variant selected by the type tag only.
//! - Tags sharing a payload shape read the same bytes the same way.
//! - The timestamp is decoded for every tag, including unknown ones.
//!
//! # Examples
//! ```
//! use sensorevent_core::{SENSOR_EVENT_SIZE, get_event};
//! use serde_json::{Value, json};
//!
//! let bytes = Value::Array(vec![json!(0); SENSOR_EVENT_SIZE]);
//! let event = get_event(&bytes)?;
//! assert_eq!(event["type"], "unknown");
//! assert_eq!(event["timestamp"], 0);
//! # Ok::<(), sensorevent_core::InputError>(())
//! ```

use serde_json::Value;

mod decoder;
mod event;
mod input;
mod projection;

pub use decoder::error::DecodeError;
pub use decoder::layout::{ADAFRUIT_SENSOR_EVENT_SIZE, RecordLayout, SENSOR_EVENT_SIZE};
pub use decoder::{decode, decode_bytes};
pub use event::{
    ColorRgb, OrientationWithStatus, PayloadShape, Reading, SensorEvent, SensorType,
    Vector3WithStatus,
};
pub use input::{InputError, RawInput, RawRecord, TextLength, adapt, adapt_value, adapt_with};
pub use projection::{FieldNaming, project, project_with};

/// Options shared by the adapter and the projection.
///
/// # Examples
/// ```
/// use sensorevent_core::{DecodeConfig, FieldNaming, RecordLayout, TextLength};
///
/// let config = DecodeConfig {
///     layout: RecordLayout::ADAFRUIT,
///     text_length: TextLength::Exact,
///     naming: FieldNaming::Semantic,
/// };
/// assert_eq!(config.layout.size(), 36);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeConfig {
    /// Byte layout records are validated and decoded against.
    pub layout: RecordLayout,
    /// Length rule for text input.
    pub text_length: TextLength,
    /// Key naming for nested payloads.
    pub naming: FieldNaming,
}

/// Decode a host value into a projected event with the default config.
pub fn get_event(value: &Value) -> Result<Value, InputError> {
    get_event_with(value, &DecodeConfig::default())
}

pub fn get_event_with(value: &Value, config: &DecodeConfig) -> Result<Value, InputError> {
    let record = adapt_value(value, config)?;
    Ok(project_with(&decode(&record), config.naming))
}

/// Decode raw bytes into a projected event.
///
/// # Examples
/// ```
/// use sensorevent_core::{DecodeConfig, SENSOR_EVENT_SIZE, get_event_from_bytes};
///
/// let mut bytes = [0u8; SENSOR_EVENT_SIZE];
/// bytes[8] = 5; // light
/// bytes[12..16].copy_from_slice(&250.0f32.to_le_bytes());
/// let event = get_event_from_bytes(&bytes, &DecodeConfig::default())?;
/// assert_eq!(event["light"], 250.0);
/// # Ok::<(), sensorevent_core::InputError>(())
/// ```
pub fn get_event_from_bytes(bytes: &[u8], config: &DecodeConfig) -> Result<Value, InputError> {
    let record = adapt_with(RawInput::Bytes(bytes), &config.layout, config.text_length)?;
    Ok(project_with(&decode(&record), config.naming))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn accelerometer_bytes() -> Vec<u8> {
        let layout = RecordLayout::COMPACT;
        let mut bytes = vec![0u8; layout.size()];
        bytes[layout.sensor_type_range()].copy_from_slice(&1i32.to_le_bytes());
        let payload = layout.payload_range().start;
        for (i, value) in [1.0f32, 2.0, 3.0].iter().enumerate() {
            let at = payload + i * 4;
            bytes[at..at + 4].copy_from_slice(&value.to_le_bytes());
        }
        bytes[payload + 12] = 0x01;
        bytes
    }

    #[test]
    fn host_byte_array_round_trips_to_projection() {
        let value = Value::Array(accelerometer_bytes().into_iter().map(Value::from).collect());
        let event = get_event(&value).unwrap();
        assert_eq!(
            event,
            json!({
                "type": "accelerometer",
                "version": 0,
                "sensorId": 0,
                "timestamp": 0,
                "acceleration": {"x": 1.0, "y": 2.0, "z": 3.0, "status": "\u{1}"},
            })
        );
    }

    #[test]
    fn host_string_is_zero_padded() {
        let event = get_event(&json!("")).unwrap();
        assert_eq!(event["type"], "unknown");
        assert_eq!(event["version"], 0);
    }

    #[test]
    fn strict_text_config_rejects_short_string() {
        let config = DecodeConfig {
            text_length: TextLength::Exact,
            ..DecodeConfig::default()
        };
        let err = get_event_with(&json!("short"), &config).unwrap_err();
        assert!(matches!(err, InputError::LengthMismatch { actual: 5, .. }));
    }

    #[test]
    fn bytes_entry_point_honours_naming() {
        let mut bytes = accelerometer_bytes();
        bytes[8] = 4; // gyroscope
        let config = DecodeConfig {
            naming: FieldNaming::Legacy,
            ..DecodeConfig::default()
        };
        let event = get_event_from_bytes(&bytes, &config).unwrap();
        assert_eq!(event["type"], "gyroscope");
        assert_eq!(event["gyro"]["y"], 2.0);
    }

    #[test]
    fn bytes_entry_point_rejects_off_by_one() {
        let bytes = vec![0u8; SENSOR_EVENT_SIZE - 1];
        let err = get_event_from_bytes(&bytes, &DecodeConfig::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "record length mismatch: expected 32 bytes, got 31"
        );
    }
}
