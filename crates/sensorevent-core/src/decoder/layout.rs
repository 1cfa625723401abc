use std::ops::Range;

/// Length of the payload union in every layout.
pub const PAYLOAD_LEN: usize = 16;

// Offsets inside the payload region.
pub const PAYLOAD_X_RANGE: Range<usize> = 0..4;
pub const PAYLOAD_Y_RANGE: Range<usize> = 4..8;
pub const PAYLOAD_Z_RANGE: Range<usize> = 8..12;
pub const PAYLOAD_STATUS_OFFSET: usize = 12;
pub const PAYLOAD_RGBA_RANGE: Range<usize> = 12..16;
pub const PAYLOAD_SCALAR_RANGE: Range<usize> = 0..4;

/// Pinned byte layout of a sensor event record.
///
/// Every field is little-endian. Layouts are only available as presets so
/// that the field ranges always fit inside `size`.
///
/// | preset | size | type | timestamp | payload |
/// |---|---|---|---|---|
/// | [`RecordLayout::COMPACT`] | 32 | 8..12 | 28..32 | 12..28 |
/// | [`RecordLayout::ADAFRUIT`] | 36 | 8..12 | 16..20 | 20..36 |
///
/// `version` (0..4) and `sensor_id` (4..8) are the same in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    name: &'static str,
    size: usize,
    version: usize,
    sensor_id: usize,
    sensor_type: usize,
    payload: usize,
    timestamp: usize,
}

impl RecordLayout {
    /// Header, payload union, then the timestamp in the last four bytes.
    pub const COMPACT: Self = Self {
        name: "compact",
        size: 32,
        version: 0,
        sensor_id: 4,
        sensor_type: 8,
        payload: 12,
        timestamp: 28,
    };

    /// The 32-bit `sensors_event_t` layout: a reserved word after the type,
    /// the timestamp, then the payload union.
    pub const ADAFRUIT: Self = Self {
        name: "adafruit",
        size: 36,
        version: 0,
        sensor_id: 4,
        sensor_type: 8,
        timestamp: 16,
        payload: 20,
    };

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Exact record size in bytes.
    pub const fn size(&self) -> usize {
        self.size
    }

    pub fn version_range(&self) -> Range<usize> {
        self.version..self.version + 4
    }

    pub fn sensor_id_range(&self) -> Range<usize> {
        self.sensor_id..self.sensor_id + 4
    }

    pub fn sensor_type_range(&self) -> Range<usize> {
        self.sensor_type..self.sensor_type + 4
    }

    pub fn timestamp_range(&self) -> Range<usize> {
        self.timestamp..self.timestamp + 4
    }

    pub fn payload_range(&self) -> Range<usize> {
        self.payload..self.payload + PAYLOAD_LEN
    }
}

impl Default for RecordLayout {
    fn default() -> Self {
        Self::COMPACT
    }
}

/// Record size of the default layout.
pub const SENSOR_EVENT_SIZE: usize = RecordLayout::COMPACT.size();
/// Record size of [`RecordLayout::ADAFRUIT`].
pub const ADAFRUIT_SENSOR_EVENT_SIZE: usize = RecordLayout::ADAFRUIT.size();
