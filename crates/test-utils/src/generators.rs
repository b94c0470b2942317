//! Generators for framed field records with predictable contents.

/// Creates `n` values `0.0, 1.0, 2.0, ...`.
///
/// With the on-disk column-major layout, the value at raw index
/// `(ex, ey, ez, i, j, k)` is its own linear offset, which makes reshape
/// results easy to check by hand.
pub fn sequential_values(n: usize) -> Vec<f32> {
    (0..n).map(|i| i as f32).collect()
}

/// Creates `n` copies of `value`.
pub fn constant_values(n: usize, value: f32) -> Vec<f32> {
    vec![value; n]
}

/// Wrap little-endian f32 values in a record: 4-byte length marker,
/// payload, 4-byte length marker.
pub fn frame_record(values: &[f32]) -> Vec<u8> {
    let payload_len = (values.len() * 4) as u32;
    let mut bytes = Vec::with_capacity(values.len() * 4 + 8);
    bytes.extend_from_slice(&payload_len.to_le_bytes());
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes.extend_from_slice(&payload_len.to_le_bytes());
    bytes
}

/// Like [`frame_record`] but with explicit marker values.
pub fn frame_record_with_markers(values: &[f32], leading: u32, trailing: u32) -> Vec<u8> {
    let mut bytes = frame_record(values);
    let n = bytes.len();
    bytes[..4].copy_from_slice(&leading.to_le_bytes());
    bytes[n - 4..].copy_from_slice(&trailing.to_le_bytes());
    bytes
}
