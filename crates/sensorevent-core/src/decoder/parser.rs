use tracing::debug;

use super::error::DecodeError;
use super::layout::RecordLayout;
use super::reader::{EventReader, PayloadReader};
use crate::event::{
    ColorRgb, OrientationWithStatus, Reading, SensorEvent, SensorType, Vector3WithStatus,
};
use crate::input::RawRecord;

/// Decode a validated record.
///
/// Total over [`RawRecord`]: the adapter guarantees the buffer matches its
/// layout, and unknown tags decode to [`Reading::Unknown`].
pub fn decode(record: &RawRecord) -> SensorEvent {
    decode_bytes(record.as_bytes(), record.layout())
        .expect("raw record length always matches its layout")
}

/// Decode a byte slice against `layout`.
///
/// Bytes past `layout.size()` are ignored; a shorter slice is rejected.
pub fn decode_bytes(bytes: &[u8], layout: &RecordLayout) -> Result<SensorEvent, DecodeError> {
    let reader = EventReader::new(bytes);
    reader.require_len(layout.size())?;

    let version = reader.read_i32_le(layout.version_range())?;
    let sensor_id = reader.read_i32_le(layout.sensor_id_range())?;
    let tag = reader.read_i32_le(layout.sensor_type_range())?;
    let payload = reader.payload(layout)?;
    let reading = read_reading(tag, &payload)?;
    let timestamp = reader.read_i32_le(layout.timestamp_range())?;

    Ok(SensorEvent {
        version,
        sensor_id,
        timestamp,
        reading,
    })
}

fn read_reading(tag: i32, payload: &PayloadReader<'_>) -> Result<Reading, DecodeError> {
    let reading = match SensorType::from_tag(tag) {
        SensorType::Accelerometer => Reading::Accelerometer(read_vector(payload)?),
        SensorType::MagneticField => Reading::MagneticField(read_vector(payload)?),
        SensorType::Gyroscope => Reading::Gyroscope(read_vector(payload)?),
        SensorType::Gravity => Reading::Gravity(read_vector(payload)?),
        SensorType::LinearAcceleration => Reading::LinearAcceleration(read_vector(payload)?),
        SensorType::Orientation => Reading::Orientation(read_orientation(payload)?),
        SensorType::RotationVector => Reading::RotationVector(read_orientation(payload)?),
        SensorType::Light => Reading::Light(payload.read_scalar()?),
        SensorType::Pressure => Reading::Pressure(payload.read_scalar()?),
        SensorType::Proximity => Reading::Proximity {
            distance: payload.read_scalar()?,
        },
        SensorType::RelativeHumidity => Reading::RelativeHumidity(payload.read_scalar()?),
        SensorType::AmbientTemperature => Reading::AmbientTemperature {
            temperature: payload.read_scalar()?,
        },
        SensorType::Voltage => Reading::Voltage(payload.read_scalar()?),
        SensorType::Current => Reading::Current(payload.read_scalar()?),
        SensorType::Color => Reading::Color(read_color(payload)?),
        SensorType::Unknown => {
            debug!(tag, "unrecognised sensor type tag");
            Reading::Unknown { tag }
        }
    };
    Ok(reading)
}

fn read_vector(payload: &PayloadReader<'_>) -> Result<Vector3WithStatus, DecodeError> {
    let [x, y, z] = payload.read_triple()?;
    Ok(Vector3WithStatus {
        x,
        y,
        z,
        status: payload.read_status()?,
    })
}

fn read_orientation(payload: &PayloadReader<'_>) -> Result<OrientationWithStatus, DecodeError> {
    let [roll, pitch, heading] = payload.read_triple()?;
    Ok(OrientationWithStatus {
        roll,
        pitch,
        heading,
        status: payload.read_status()?,
    })
}

fn read_color(payload: &PayloadReader<'_>) -> Result<ColorRgb, DecodeError> {
    let [r, g, b] = payload.read_triple()?;
    Ok(ColorRgb {
        r,
        g,
        b,
        rgba: payload.read_rgba()?,
    })
}
