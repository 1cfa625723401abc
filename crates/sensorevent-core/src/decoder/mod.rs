//! Sensor event record decoding.
//!
//! The decoder reads the common header, selects the payload variant from the
//! type tag alone, and reads the timestamp last regardless of type. Vector,
//! orientation and color payloads alias the same 16-byte union; each variant
//! is read through offset reads scoped to that union, never by reinterpreting
//! memory.
//!
//! - `layout`: record presets and payload offsets (source of truth)
//! - `reader`: bounds-checked little-endian reads
//! - `parser`: tag dispatch into typed readings
//! - `error`: errors for unvalidated slices

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{decode, decode_bytes};
