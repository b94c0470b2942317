//! Framing of a single unformatted field record.
//!
//! A record is a 4-byte length marker, the payload, and a second 4-byte
//! length marker. The payload is a flat run of little-endian f32 values.

use crate::error::{FieldError, FieldResult};

/// Size of each record length marker in bytes.
pub const MARKER_BYTES: usize = 4;

/// Size of one stored value in bytes.
pub const VALUE_BYTES: usize = 4;

/// Strip the record markers and decode the payload.
///
/// The payload must hold exactly `expected_values` values. With
/// `verify_markers`, both markers must also equal the payload byte count.
pub fn decode_record(
    bytes: &[u8],
    expected_values: usize,
    verify_markers: bool,
) -> FieldResult<Vec<f32>> {
    if bytes.len() < 2 * MARKER_BYTES {
        return Err(FieldError::format(format!(
            "record is {} bytes, too short for its length markers",
            bytes.len()
        )));
    }

    let payload = &bytes[MARKER_BYTES..bytes.len() - MARKER_BYTES];
    let expected_bytes = expected_values.checked_mul(VALUE_BYTES).ok_or_else(|| {
        FieldError::format(format!(
            "{} values exceed the addressable record size",
            expected_values
        ))
    })?;
    if payload.len() != expected_bytes {
        return Err(FieldError::format(format!(
            "payload is {} bytes, expected {} ({} values)",
            payload.len(),
            expected_bytes,
            expected_values
        )));
    }

    if verify_markers {
        let leading = read_marker(&bytes[..MARKER_BYTES]);
        let trailing = read_marker(&bytes[bytes.len() - MARKER_BYTES..]);
        if leading != expected_bytes as u64 || trailing != expected_bytes as u64 {
            return Err(FieldError::format(format!(
                "record markers ({}, {}) do not match payload length {}",
                leading, trailing, expected_bytes
            )));
        }
    }

    Ok(payload
        .chunks_exact(VALUE_BYTES)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

fn read_marker(b: &[u8]) -> u64 {
    u32::from_le_bytes([b[0], b[1], b[2], b[3]]) as u64
}
