use std::ops::Range;

use super::error::DecodeError;
use super::layout::{self, RecordLayout};

/// Bounds-checked little-endian reads over one record.
pub struct EventReader<'a> {
    record: &'a [u8],
}

impl<'a> EventReader<'a> {
    pub fn new(record: &'a [u8]) -> Self {
        Self { record }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), DecodeError> {
        if self.record.len() < needed {
            return Err(DecodeError::TooShort {
                needed,
                actual: self.record.len(),
            });
        }
        Ok(())
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], DecodeError> {
        self.record.get(range.clone()).ok_or(DecodeError::TooShort {
            needed: range.end,
            actual: self.record.len(),
        })
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, DecodeError> {
        self.record
            .get(offset)
            .copied()
            .ok_or(DecodeError::TooShort {
                needed: offset + 1,
                actual: self.record.len(),
            })
    }

    fn read_word(&self, range: Range<usize>) -> Result<[u8; 4], DecodeError> {
        let bytes = self.read_slice(range)?;
        bytes.try_into().map_err(|_| DecodeError::TooShort {
            needed: 4,
            actual: bytes.len(),
        })
    }

    pub fn read_i32_le(&self, range: Range<usize>) -> Result<i32, DecodeError> {
        self.read_word(range).map(i32::from_le_bytes)
    }

    pub fn read_u32_le(&self, range: Range<usize>) -> Result<u32, DecodeError> {
        self.read_word(range).map(u32::from_le_bytes)
    }

    pub fn read_f32_le(&self, range: Range<usize>) -> Result<f32, DecodeError> {
        self.read_word(range).map(f32::from_le_bytes)
    }

    /// Narrows the reader to the payload union of `layout`.
    pub fn payload(&self, layout: &RecordLayout) -> Result<PayloadReader<'a>, DecodeError> {
        self.read_slice(layout.payload_range()).map(|payload| PayloadReader {
            inner: EventReader::new(payload),
        })
    }
}

/// Reads the fixed shapes that alias the payload union.
pub struct PayloadReader<'a> {
    inner: EventReader<'a>,
}

impl PayloadReader<'_> {
    /// The three leading floats.
    pub fn read_triple(&self) -> Result<[f32; 3], DecodeError> {
        Ok([
            self.inner.read_f32_le(layout::PAYLOAD_X_RANGE)?,
            self.inner.read_f32_le(layout::PAYLOAD_Y_RANGE)?,
            self.inner.read_f32_le(layout::PAYLOAD_Z_RANGE)?,
        ])
    }

    pub fn read_status(&self) -> Result<u8, DecodeError> {
        self.inner.read_u8(layout::PAYLOAD_STATUS_OFFSET)
    }

    pub fn read_rgba(&self) -> Result<u32, DecodeError> {
        self.inner.read_u32_le(layout::PAYLOAD_RGBA_RANGE)
    }

    pub fn read_scalar(&self) -> Result<f32, DecodeError> {
        self.inner.read_f32_le(layout::PAYLOAD_SCALAR_RANGE)
    }
}

#[cfg(test)]
mod tests {
    use super::EventReader;
    use crate::decoder::error::DecodeError;
    use crate::decoder::layout::RecordLayout;

    #[test]
    fn reads_little_endian_words() {
        let bytes = [0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80, 0x3f];
        let reader = EventReader::new(&bytes);
        assert_eq!(reader.read_i32_le(0..4).unwrap(), 1);
        assert_eq!(reader.read_f32_le(4..8).unwrap(), 1.0);
    }

    #[test]
    fn negative_words_keep_their_sign() {
        let bytes = (-2i32).to_le_bytes();
        let reader = EventReader::new(&bytes);
        assert_eq!(reader.read_i32_le(0..4).unwrap(), -2);
        assert_eq!(reader.read_u32_le(0..4).unwrap(), 0xFFFF_FFFE);
    }

    #[test]
    fn out_of_range_read_reports_needed_len() {
        let bytes = [0u8; 6];
        let reader = EventReader::new(&bytes);
        let err = reader.read_i32_le(4..8).unwrap_err();
        assert_eq!(err, DecodeError::TooShort { needed: 8, actual: 6 });
        assert!(reader.read_u8(6).is_err());
    }

    #[test]
    fn payload_reader_is_scoped_to_the_union() {
        let layout = RecordLayout::COMPACT;
        let mut bytes = vec![0u8; layout.size()];
        let payload = layout.payload_range().start;
        bytes[payload..payload + 4].copy_from_slice(&2.5f32.to_le_bytes());
        bytes[payload + 12] = 0x7f;

        let reader = EventReader::new(&bytes);
        let payload = reader.payload(&layout).unwrap();
        assert_eq!(payload.read_scalar().unwrap(), 2.5);
        assert_eq!(payload.read_triple().unwrap(), [2.5, 0.0, 0.0]);
        assert_eq!(payload.read_status().unwrap(), 0x7f);
        assert_eq!(payload.read_rgba().unwrap(), 0x7f);
    }
}
