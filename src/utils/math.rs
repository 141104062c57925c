//! Mathematical utility functions.

use crate::Result;

/// Converts a `usize` to `u32` for metadata serialization, returning an error if the value
/// exceeds `u32::MAX`. Stream offsets and sizes in the metadata root are 32-bit.
///
/// # Errors
///
/// Returns an error if `value` exceeds `u32::MAX`.
pub fn to_u32(value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| layout_error!("Metadata value {value} exceeds u32::MAX"))
}

/// Aligns a value to the next multiple of the given alignment.
///
/// The alignment must be a power of 2.
///
/// # Examples
/// ```ignore
/// assert_eq!(align_to(5, 4), 8);
/// assert_eq!(align_to(8, 4), 8);
/// assert_eq!(align_to(0, 4), 0);
/// ```
pub fn align_to(value: usize, alignment: usize) -> usize {
    (value + alignment - 1) & !(alignment - 1)
}

/// Aligns a value to the next 4-byte boundary, as ECMA-335 II.24.2.2 requires for every
/// metadata stream.
pub fn align_to_4_bytes(value: usize) -> usize {
    align_to(value, 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_to() {
        assert_eq!(align_to(0, 4), 0);
        assert_eq!(align_to(1, 4), 4);
        assert_eq!(align_to(4, 4), 4);
        assert_eq!(align_to(5, 8), 8);
        assert_eq!(align_to_4_bytes(9), 12);
    }

    #[test]
    fn test_to_u32() {
        assert_eq!(to_u32(42).unwrap(), 42);
        #[cfg(target_pointer_width = "64")]
        assert!(to_u32(u32::MAX as usize + 1).is_err());
    }
}
