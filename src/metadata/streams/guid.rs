//! GUID Heap (`#GUID`) builder
//!
//! The `#GUID` heap is a plain sequence of 16-byte GUIDs. Unlike the other heaps it is
//! addressed by a 1-based entry index rather than a byte offset; index 0 means "no GUID".
//!
//! # Reference
//! - [ECMA-335 II.24.2.5](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use crate::{utils::to_u32, Result};

/// Size in bytes of one `#GUID` heap entry
pub const GUID_SIZE: usize = 16;

/// Builder for the `#GUID` heap.
///
/// GUIDs are deduplicated by value, so interning the same GUID repeatedly yields the same
/// index and adds a single entry.
///
/// # Examples
///
/// ```rust
/// use configmeta::metadata::streams::GuidHeapBuilder;
///
/// let mut heap = GuidHeapBuilder::new();
/// assert_eq!(heap.intern(uguid::Guid::ZERO)?, 1);
/// assert_eq!(heap.intern(uguid::Guid::ZERO)?, 1);
/// assert_eq!(heap.serialize(), [0u8; 16]);
/// # Ok::<(), configmeta::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct GuidHeapBuilder {
    guids: Vec<uguid::Guid>,
}

impl GuidHeapBuilder {
    /// Creates an empty heap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the 1-based index of `guid`, appending it if it is not present yet.
    ///
    /// # Errors
    /// Returns [`crate::Error::LayoutFailed`] if the heap outgrows 32-bit indexes.
    pub fn intern(&mut self, guid: uguid::Guid) -> Result<u32> {
        if let Some(position) = self.guids.iter().position(|known| *known == guid) {
            return to_u32(position + 1);
        }

        self.guids.push(guid);
        to_u32(self.guids.len())
    }

    /// Number of GUIDs in the heap.
    #[must_use]
    pub fn count(&self) -> usize {
        self.guids.len()
    }

    /// Size of the serialized heap in bytes, always a multiple of 4.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guids.len() * GUID_SIZE
    }

    /// Returns `true` if no GUID has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guids.is_empty()
    }

    /// Lays out the heap as consecutive 16-byte entries.
    #[must_use]
    pub fn serialize(self) -> Vec<u8> {
        self.guids.iter().flat_map(|guid| guid.to_bytes()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_guid_single_entry() {
        let mut heap = GuidHeapBuilder::new();
        assert!(heap.is_empty());

        for _ in 0..3 {
            assert_eq!(heap.intern(uguid::Guid::ZERO).unwrap(), 1);
        }

        assert_eq!(heap.count(), 1);
        assert_eq!(heap.len(), 16);
        assert_eq!(heap.serialize(), [0u8; 16]);
    }

    #[test]
    fn distinct_guids_are_appended() {
        let mut heap = GuidHeapBuilder::new();
        let other = uguid::guid!("01234567-89ab-cdef-0123-456789abcdef");

        assert_eq!(heap.intern(uguid::Guid::ZERO).unwrap(), 1);
        assert_eq!(heap.intern(other).unwrap(), 2);
        assert_eq!(heap.intern(uguid::Guid::ZERO).unwrap(), 1);

        let data = heap.serialize();
        assert_eq!(data.len(), 32);
        assert_eq!(&data[16..], &other.to_bytes());
    }
}
