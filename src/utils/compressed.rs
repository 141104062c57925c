//! ECMA-335 compressed unsigned integers (II.23.2).
//!
//! Lengths and counts in blobs are stored using a variable-length big-endian encoding whose
//! width is signaled by the top bits of the first byte:
//!
//! | Range                         | Width   | First byte |
//! |-------------------------------|---------|------------|
//! | `0x00` ..= `0x7F`             | 1 byte  | `0xxxxxxx` |
//! | `0x80` ..= `0x3FFF`           | 2 bytes | `10xxxxxx` |
//! | `0x4000` ..= `0x1FFF_FFFF`    | 4 bytes | `110xxxxx` |
//!
//! The encoding is minimal: every value is written using the narrowest form that can hold it.

use crate::{file::io::write_bytes_at, Error, Result};

/// The largest value the compressed integer encoding can represent
pub const COMPRESSED_UINT_MAX: u32 = 0x1FFF_FFFF;

fn checked_value(value: usize) -> Result<u32> {
    match u32::try_from(value) {
        Ok(value) if value <= COMPRESSED_UINT_MAX => Ok(value),
        _ => Err(Error::CompressedRange(value as u64)),
    }
}

/// Returns the number of bytes (1, 2 or 4) needed to encode `value`.
///
/// # Errors
/// Returns [`crate::Error::CompressedRange`] if `value` exceeds [`COMPRESSED_UINT_MAX`].
pub fn compressed_uint_size(value: usize) -> Result<usize> {
    let value = checked_value(value)?;
    Ok(if value < 0x80 {
        1
    } else if value < 0x4000 {
        2
    } else {
        4
    })
}

/// Encodes `value` and writes it at `offset`, advancing the offset by the encoded width.
///
/// # Arguments
/// * `data` - The buffer to write into
/// * `offset` - The write cursor
/// * `value` - The value to encode
///
/// # Errors
/// Returns [`crate::Error::CompressedRange`] if `value` exceeds [`COMPRESSED_UINT_MAX`], or
/// [`crate::Error::LayoutFailed`] if the buffer is too small.
#[allow(clippy::cast_possible_truncation)]
pub fn write_compressed_uint_at(data: &mut [u8], offset: &mut usize, value: usize) -> Result<()> {
    let value = checked_value(value)?;

    if value < 0x80 {
        write_bytes_at(data, offset, &[value as u8])
    } else if value < 0x4000 {
        write_bytes_at(data, offset, &[0x80 | (value >> 8) as u8, value as u8])
    } else {
        write_bytes_at(data, offset, &(0xC000_0000 | value).to_be_bytes())
    }
}
