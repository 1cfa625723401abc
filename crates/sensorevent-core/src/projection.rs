//! Projection of decoded events into generic JSON records.
//!
//! Every record has `type`, `version`, `sensorId` and `timestamp`. Known
//! types add their payload: scalars as a top-level number, the other shapes
//! as a nested object under a key chosen by [`FieldNaming`]. Floats widen to
//! `f64` unchanged; non-finite values become `null`.

use serde_json::{Map, Value};

use crate::event::{
    ColorRgb, OrientationWithStatus, PayloadShape, Reading, SensorEvent, SensorType,
    Vector3WithStatus,
};

/// Key used for nested payload objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldNaming {
    /// Key names the physical shape: every vector type nests under
    /// `acceleration`, orientation types under `orientation`.
    #[default]
    Shape,
    /// Keys of the Node.js addon: `acceleration`, `magnetic`, `gyro`,
    /// `orientation`.
    Legacy,
    /// Key is the sensor type name, e.g. `gyroscope`, `rotation_vector`.
    Semantic,
}

/// Project with [`FieldNaming::Shape`].
///
/// # Examples
/// ```
/// use sensorevent_core::{Reading, SensorEvent, project};
///
/// let event = SensorEvent {
///     version: 1,
///     sensor_id: 2,
///     timestamp: 3,
///     reading: Reading::Light(120.0),
/// };
/// let value = project(&event);
/// assert_eq!(value["type"], "light");
/// assert_eq!(value["light"], 120.0);
/// ```
pub fn project(event: &SensorEvent) -> Value {
    project_with(event, FieldNaming::default())
}

pub fn project_with(event: &SensorEvent, naming: FieldNaming) -> Value {
    let sensor_type = event.sensor_type();
    let mut obj = Map::new();
    obj.insert("version".to_string(), Value::from(event.version));
    obj.insert("sensorId".to_string(), Value::from(event.sensor_id));
    obj.insert("type".to_string(), Value::from(sensor_type.name()));

    let payload = match &event.reading {
        Reading::Accelerometer(v)
        | Reading::MagneticField(v)
        | Reading::Gyroscope(v)
        | Reading::Gravity(v)
        | Reading::LinearAcceleration(v) => Some((nested_key(sensor_type, naming), vector(v))),
        Reading::Orientation(o) | Reading::RotationVector(o) => {
            Some((nested_key(sensor_type, naming), orientation(o)))
        }
        Reading::Color(c) => Some((nested_key(sensor_type, naming), color(c))),
        Reading::Light(v) => Some(("light", float(*v))),
        Reading::Pressure(v) => Some(("pressure", float(*v))),
        Reading::Proximity { distance } => Some(("distance", float(*distance))),
        Reading::RelativeHumidity(v) => Some(("relative_humidity", float(*v))),
        Reading::AmbientTemperature { temperature } => Some(("temperature", float(*temperature))),
        Reading::Voltage(v) => Some(("voltage", float(*v))),
        Reading::Current(v) => Some(("current", float(*v))),
        Reading::Unknown { .. } => None,
    };
    if let Some((key, value)) = payload {
        obj.insert(key.to_string(), value);
    }

    obj.insert("timestamp".to_string(), Value::from(event.timestamp));
    Value::Object(obj)
}

fn nested_key(sensor_type: SensorType, naming: FieldNaming) -> &'static str {
    match naming {
        FieldNaming::Semantic => sensor_type.name(),
        FieldNaming::Legacy => match sensor_type {
            SensorType::MagneticField => "magnetic",
            SensorType::Gyroscope => "gyro",
            _ => shape_key(sensor_type),
        },
        FieldNaming::Shape => shape_key(sensor_type),
    }
}

fn shape_key(sensor_type: SensorType) -> &'static str {
    match sensor_type.shape() {
        PayloadShape::Vector3WithStatus => "acceleration",
        PayloadShape::OrientationWithStatus => "orientation",
        PayloadShape::ColorRgb => "color",
        // Scalars sit at the top level under their own key.
        PayloadShape::Scalar | PayloadShape::None => sensor_type.name(),
    }
}

fn float(value: f32) -> Value {
    Value::from(f64::from(value))
}

/// Status bytes are exposed as a one-character string, byte value kept as
/// the code point.
fn status(byte: u8) -> Value {
    Value::from(char::from(byte).to_string())
}

fn vector(v: &Vector3WithStatus) -> Value {
    let mut obj = Map::new();
    obj.insert("x".to_string(), float(v.x));
    obj.insert("y".to_string(), float(v.y));
    obj.insert("z".to_string(), float(v.z));
    obj.insert("status".to_string(), status(v.status));
    Value::Object(obj)
}

fn orientation(o: &OrientationWithStatus) -> Value {
    let mut obj = Map::new();
    obj.insert("roll".to_string(), float(o.roll));
    obj.insert("pitch".to_string(), float(o.pitch));
    obj.insert("heading".to_string(), float(o.heading));
    obj.insert("status".to_string(), status(o.status));
    Value::Object(obj)
}

fn color(c: &ColorRgb) -> Value {
    let mut obj = Map::new();
    obj.insert("r".to_string(), float(c.r));
    obj.insert("g".to_string(), float(c.g));
    obj.insert("b".to_string(), float(c.b));
    obj.insert("rgba".to_string(), Value::from(c.rgba));
    Value::Object(obj)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn event(reading: Reading) -> SensorEvent {
        SensorEvent {
            version: 1,
            sensor_id: 7,
            timestamp: 99,
            reading,
        }
    }

    fn gyro() -> SensorEvent {
        event(Reading::Gyroscope(Vector3WithStatus {
            x: 0.5,
            y: -0.25,
            z: 2.0,
            status: b'3',
        }))
    }

    #[test]
    fn unknown_has_header_only() {
        let value = project(&event(Reading::Unknown { tag: 0 }));
        assert_eq!(
            value,
            json!({"type": "unknown", "version": 1, "sensorId": 7, "timestamp": 99})
        );
    }

    #[test]
    fn vector_nests_under_acceleration_by_shape() {
        let value = project(&gyro());
        assert_eq!(value["type"], "gyroscope");
        assert_eq!(
            value["acceleration"],
            json!({"x": 0.5, "y": -0.25, "z": 2.0, "status": "3"})
        );
    }

    #[test]
    fn legacy_naming_uses_addon_keys() {
        let value = project_with(&gyro(), FieldNaming::Legacy);
        assert!(value.get("acceleration").is_none());
        assert_eq!(value["gyro"]["x"], 0.5);

        let magnetic = event(Reading::MagneticField(Vector3WithStatus::default()));
        let value = project_with(&magnetic, FieldNaming::Legacy);
        assert!(value.get("magnetic").is_some());

        let gravity = event(Reading::Gravity(Vector3WithStatus::default()));
        let value = project_with(&gravity, FieldNaming::Legacy);
        assert!(value.get("acceleration").is_some());
    }

    #[test]
    fn semantic_naming_uses_type_name() {
        let value = project_with(&gyro(), FieldNaming::Semantic);
        assert_eq!(value["gyroscope"]["z"], 2.0);

        let rotation = event(Reading::RotationVector(OrientationWithStatus::default()));
        let value = project_with(&rotation, FieldNaming::Semantic);
        assert!(value.get("rotation_vector").is_some());
        assert!(value.get("orientation").is_none());
    }

    #[test]
    fn nested_keys_follow_payload_shape() {
        let cases = [
            (SensorType::Accelerometer, "acceleration"),
            (SensorType::MagneticField, "acceleration"),
            (SensorType::Gyroscope, "acceleration"),
            (SensorType::Gravity, "acceleration"),
            (SensorType::LinearAcceleration, "acceleration"),
            (SensorType::Orientation, "orientation"),
            (SensorType::RotationVector, "orientation"),
            (SensorType::Color, "color"),
        ];
        for (sensor_type, key) in cases {
            assert_eq!(nested_key(sensor_type, FieldNaming::Shape), key);
        }
        assert_eq!(nested_key(SensorType::Gyroscope, FieldNaming::Legacy), "gyro");
        assert_eq!(
            nested_key(SensorType::Orientation, FieldNaming::Legacy),
            "orientation"
        );
    }

    #[test]
    fn scalar_keys_are_fixed() {
        let cases = [
            (Reading::Proximity { distance: 3.0 }, "distance"),
            (Reading::AmbientTemperature { temperature: 3.0 }, "temperature"),
            (Reading::RelativeHumidity(3.0), "relative_humidity"),
            (Reading::Voltage(3.0), "voltage"),
        ];
        for (reading, key) in cases {
            for naming in [FieldNaming::Shape, FieldNaming::Legacy, FieldNaming::Semantic] {
                let value = project_with(&event(reading), naming);
                assert_eq!(value[key], 3.0, "{key}");
            }
        }
    }

    #[test]
    fn color_keeps_unsigned_rgba() {
        let value = project(&event(Reading::Color(ColorRgb {
            r: 1.0,
            g: 0.0,
            b: 0.5,
            rgba: 0xFF00_FF00,
        })));
        assert_eq!(value["color"]["rgba"], json!(4_278_255_360u32));
        assert_eq!(value["color"]["b"], 0.5);
    }

    #[test]
    fn non_finite_floats_project_to_null() {
        let value = project(&event(Reading::Pressure(f32::NAN)));
        assert!(value["pressure"].is_null());
    }

    #[test]
    fn zero_status_is_a_nul_character() {
        let value = project(&event(Reading::Orientation(OrientationWithStatus::default())));
        assert_eq!(value["orientation"]["status"], "\u{0}");
    }
}
