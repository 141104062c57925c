//! Bounds-checked little-endian writing into pre-sized byte buffers.
//!
//! Every ECMA-335 structure emitted by this crate is little-endian and its exact size is
//! known before the first byte is written. The serializers therefore allocate the whole
//! output once and fill it through the helpers in this module, which advance an offset
//! cursor and refuse to write past the end of the buffer.
//!
//! # Key Components
//!
//! - [`crate::file::io::LeBytes`] - Trait converting primitive integers into little-endian byte arrays
//! - [`crate::file::io::write_le_at`] - Write a value at an offset and advance the cursor
//! - [`crate::file::io::write_le_at_dyn`] - Write a heap or table index as 2 or 4 bytes
//! - [`crate::file::io::write_bytes_at`] - Copy a raw byte slice and advance the cursor
//!
//! # Usage Examples
//!
//! ```rust,ignore
//! use configmeta::file::io::{write_le_at, write_le_at_dyn};
//!
//! let mut data = [0u8; 8];
//! let mut offset = 0;
//!
//! write_le_at(&mut data, &mut offset, 1u16)?;          // offset: 0 -> 2
//! write_le_at_dyn(&mut data, &mut offset, 2, false)?;  // offset: 2 -> 4
//! write_le_at_dyn(&mut data, &mut offset, 3, true)?;   // offset: 4 -> 8
//!
//! assert_eq!(data, [0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00]);
//! # Ok::<(), configmeta::Error>(())
//! ```
//!
//! # Error Handling
//!
//! All writers return [`crate::Result`] and fail with [`crate::Error::LayoutFailed`] when the
//! buffer is too small. Running into that error means a size calculation disagrees with the
//! serializer, never that the input was too large.

use crate::Result;

/// Conversion of a primitive integer into its little-endian byte representation.
///
/// Implemented for the unsigned widths that occur in metadata headers, stream directories
/// and table rows.
pub trait LeBytes: Sized + Copy {
    /// Fixed-size byte array for this type
    type Bytes: AsRef<[u8]>;

    /// Convert `self` into little-endian bytes
    fn to_le_bytes(self) -> Self::Bytes;
}

impl LeBytes for u8 {
    type Bytes = [u8; 1];

    fn to_le_bytes(self) -> Self::Bytes {
        u8::to_le_bytes(self)
    }
}

impl LeBytes for u16 {
    type Bytes = [u8; 2];

    fn to_le_bytes(self) -> Self::Bytes {
        u16::to_le_bytes(self)
    }
}

impl LeBytes for u32 {
    type Bytes = [u8; 4];

    fn to_le_bytes(self) -> Self::Bytes {
        u32::to_le_bytes(self)
    }
}

impl LeBytes for u64 {
    type Bytes = [u8; 8];

    fn to_le_bytes(self) -> Self::Bytes {
        u64::to_le_bytes(self)
    }
}

/// Copies `bytes` into `data` at `offset` and advances the offset.
///
/// # Arguments
/// * `data` - The buffer to write into
/// * `offset` - The write cursor, advanced by `bytes.len()` on success
/// * `bytes` - The bytes to copy
///
/// # Errors
/// Returns [`crate::Error::LayoutFailed`] if the bytes do not fit into the buffer.
pub fn write_bytes_at(data: &mut [u8], offset: &mut usize, bytes: &[u8]) -> Result<()> {
    let end = offset
        .checked_add(bytes.len())
        .ok_or_else(|| layout_error!("Write offset overflow - {} + {}", offset, bytes.len()))?;

    if end > data.len() {
        return Err(layout_error!(
            "Write would exceed buffer: offset={}, len={}, buffer={}",
            offset,
            bytes.len(),
            data.len()
        ));
    }

    data[*offset..end].copy_from_slice(bytes);
    *offset = end;
    Ok(())
}

/// Writes `value` in little-endian byte order at `offset` and advances the offset.
///
/// # Arguments
/// * `data` - The buffer to write into
/// * `offset` - The write cursor, advanced by `size_of::<T>()` on success
/// * `value` - The value to write
///
/// # Errors
/// Returns [`crate::Error::LayoutFailed`] if the value does not fit into the buffer.
pub fn write_le_at<T: LeBytes>(data: &mut [u8], offset: &mut usize, value: T) -> Result<()> {
    write_bytes_at(data, offset, value.to_le_bytes().as_ref())
}

/// Writes a heap or table index using the negotiated index width.
///
/// ECMA-335 encodes heap indexes as 2 bytes unless the heap is large, in which case
/// 4 bytes are used. A value that does not fit the narrow width is rejected instead of
/// being truncated.
///
/// # Arguments
/// * `data` - The buffer to write into
/// * `offset` - The write cursor, advanced by 2 or 4
/// * `value` - The index to write
/// * `is_large` - Whether the 4 byte encoding is in effect
///
/// # Errors
/// Returns [`crate::Error::LayoutFailed`] if the value exceeds a 2 byte index or the buffer is
/// too small.
pub fn write_le_at_dyn(
    data: &mut [u8],
    offset: &mut usize,
    value: u32,
    is_large: bool,
) -> Result<()> {
    if is_large {
        write_le_at::<u32>(data, offset, value)
    } else {
        let narrow = u16::try_from(value)
            .map_err(|_| layout_error!("Index {:#x} does not fit a 2 byte column", value))?;
        write_le_at::<u16>(data, offset, narrow)
    }
}
