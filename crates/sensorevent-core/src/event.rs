//! Typed sensor event model.
//!
//! A [`SensorEvent`] carries the common record header plus a [`Reading`]
//! whose variant is the sensor type itself, so a payload can never be paired
//! with the wrong tag.

/// Sensor type discriminant, numbered as in the unified sensor record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorType {
    Accelerometer,
    MagneticField,
    Orientation,
    Gyroscope,
    Light,
    Pressure,
    Proximity,
    Gravity,
    LinearAcceleration,
    RotationVector,
    RelativeHumidity,
    AmbientTemperature,
    Voltage,
    Current,
    Color,
    Unknown,
}

/// Physical layout a sensor type uses for its payload region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    Vector3WithStatus,
    OrientationWithStatus,
    Scalar,
    ColorRgb,
    None,
}

impl SensorType {
    /// Maps a raw tag to its sensor type; unrecognised tags become `Unknown`.
    pub fn from_tag(tag: i32) -> Self {
        match tag {
            1 => Self::Accelerometer,
            2 => Self::MagneticField,
            3 => Self::Orientation,
            4 => Self::Gyroscope,
            5 => Self::Light,
            6 => Self::Pressure,
            8 => Self::Proximity,
            9 => Self::Gravity,
            10 => Self::LinearAcceleration,
            11 => Self::RotationVector,
            12 => Self::RelativeHumidity,
            13 => Self::AmbientTemperature,
            15 => Self::Voltage,
            16 => Self::Current,
            17 => Self::Color,
            _ => Self::Unknown,
        }
    }

    /// Raw tag value, or `None` for `Unknown`.
    pub fn tag(self) -> Option<i32> {
        let tag = match self {
            Self::Accelerometer => 1,
            Self::MagneticField => 2,
            Self::Orientation => 3,
            Self::Gyroscope => 4,
            Self::Light => 5,
            Self::Pressure => 6,
            Self::Proximity => 8,
            Self::Gravity => 9,
            Self::LinearAcceleration => 10,
            Self::RotationVector => 11,
            Self::RelativeHumidity => 12,
            Self::AmbientTemperature => 13,
            Self::Voltage => 15,
            Self::Current => 16,
            Self::Color => 17,
            Self::Unknown => return None,
        };
        Some(tag)
    }

    /// Stable snake_case name used in projected output.
    pub fn name(self) -> &'static str {
        match self {
            Self::Accelerometer => "accelerometer",
            Self::MagneticField => "magnetic_field",
            Self::Orientation => "orientation",
            Self::Gyroscope => "gyroscope",
            Self::Light => "light",
            Self::Pressure => "pressure",
            Self::Proximity => "proximity",
            Self::Gravity => "gravity",
            Self::LinearAcceleration => "linear_acceleration",
            Self::RotationVector => "rotation_vector",
            Self::RelativeHumidity => "relative_humidity",
            Self::AmbientTemperature => "ambient_temperature",
            Self::Voltage => "voltage",
            Self::Current => "current",
            Self::Color => "color",
            Self::Unknown => "unknown",
        }
    }

    pub fn shape(self) -> PayloadShape {
        match self {
            Self::Accelerometer
            | Self::MagneticField
            | Self::Gyroscope
            | Self::Gravity
            | Self::LinearAcceleration => PayloadShape::Vector3WithStatus,
            Self::Orientation | Self::RotationVector => PayloadShape::OrientationWithStatus,
            Self::Light
            | Self::Pressure
            | Self::Proximity
            | Self::RelativeHumidity
            | Self::AmbientTemperature
            | Self::Voltage
            | Self::Current => PayloadShape::Scalar,
            Self::Color => PayloadShape::ColorRgb,
            Self::Unknown => PayloadShape::None,
        }
    }
}

/// Three-axis vector reading with its status byte.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3WithStatus {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub status: u8,
}

/// Roll/pitch/heading reading with its status byte.
///
/// Occupies the same bytes as [`Vector3WithStatus`]: roll is the first
/// float, pitch the second, heading the third.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationWithStatus {
    pub roll: f32,
    pub pitch: f32,
    pub heading: f32,
    pub status: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Packed colour word, exactly as stored.
    pub rgba: u32,
}

/// Type-specific payload; the variant is the sensor type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Accelerometer(Vector3WithStatus),
    MagneticField(Vector3WithStatus),
    Orientation(OrientationWithStatus),
    Gyroscope(Vector3WithStatus),
    Light(f32),
    Pressure(f32),
    Proximity { distance: f32 },
    Gravity(Vector3WithStatus),
    LinearAcceleration(Vector3WithStatus),
    RotationVector(OrientationWithStatus),
    RelativeHumidity(f32),
    AmbientTemperature { temperature: f32 },
    Voltage(f32),
    Current(f32),
    Color(ColorRgb),
    /// Tag outside the known table. The raw value is kept for diagnostics.
    Unknown { tag: i32 },
}

impl Reading {
    pub fn sensor_type(&self) -> SensorType {
        match self {
            Self::Accelerometer(_) => SensorType::Accelerometer,
            Self::MagneticField(_) => SensorType::MagneticField,
            Self::Orientation(_) => SensorType::Orientation,
            Self::Gyroscope(_) => SensorType::Gyroscope,
            Self::Light(_) => SensorType::Light,
            Self::Pressure(_) => SensorType::Pressure,
            Self::Proximity { .. } => SensorType::Proximity,
            Self::Gravity(_) => SensorType::Gravity,
            Self::LinearAcceleration(_) => SensorType::LinearAcceleration,
            Self::RotationVector(_) => SensorType::RotationVector,
            Self::RelativeHumidity(_) => SensorType::RelativeHumidity,
            Self::AmbientTemperature { .. } => SensorType::AmbientTemperature,
            Self::Voltage(_) => SensorType::Voltage,
            Self::Current(_) => SensorType::Current,
            Self::Color(_) => SensorType::Color,
            Self::Unknown { .. } => SensorType::Unknown,
        }
    }

    /// Vector payload, for any of the five tags sharing that layout.
    pub fn vector(&self) -> Option<&Vector3WithStatus> {
        match self {
            Self::Accelerometer(v)
            | Self::MagneticField(v)
            | Self::Gyroscope(v)
            | Self::Gravity(v)
            | Self::LinearAcceleration(v) => Some(v),
            _ => None,
        }
    }

    pub fn orientation(&self) -> Option<&OrientationWithStatus> {
        match self {
            Self::Orientation(o) | Self::RotationVector(o) => Some(o),
            _ => None,
        }
    }

    /// Scalar payload, for any single-float sensor type.
    pub fn scalar(&self) -> Option<f32> {
        match *self {
            Self::Light(v)
            | Self::Pressure(v)
            | Self::Proximity { distance: v }
            | Self::RelativeHumidity(v)
            | Self::AmbientTemperature { temperature: v }
            | Self::Voltage(v)
            | Self::Current(v) => Some(v),
            _ => None,
        }
    }

    pub fn color(&self) -> Option<&ColorRgb> {
        match self {
            Self::Color(c) => Some(c),
            _ => None,
        }
    }
}

/// Decoded sensor record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorEvent {
    /// Record format version, passed through unvalidated.
    pub version: i32,
    pub sensor_id: i32,
    pub timestamp: i32,
    pub reading: Reading,
}

impl SensorEvent {
    pub fn sensor_type(&self) -> SensorType {
        self.reading.sensor_type()
    }
}
