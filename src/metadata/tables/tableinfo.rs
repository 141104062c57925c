use bitflags::bitflags;

use crate::utils::align_to_4_bytes;

/// Heaps of this size or larger need 4 byte indexes.
pub const LARGE_HEAP_THRESHOLD: usize = 0x1_0000;

bitflags! {
    /// The `HeapSizes` byte of the tables stream header.
    ///
    /// A set flag means that columns indexing the corresponding heap are 4 bytes wide
    /// instead of 2.
    ///
    /// ## Reference
    /// * ECMA-335 II.24.2.6
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct HeapSizes: u8 {
        /// Indexes into `#Strings` are 4 bytes
        const LARGE_STRINGS = 0x01;
        /// Indexes into `#GUID` are 4 bytes
        const LARGE_GUID = 0x02;
        /// Indexes into `#Blob` are 4 bytes
        const LARGE_BLOB = 0x04;
    }
}

/// `TableInfo` holds the negotiated width of heap index columns.
///
/// The widths follow from the serialized size of each heap: a heap of
/// [`LARGE_HEAP_THRESHOLD`] bytes or more is indexed with 4 bytes, a smaller one with 2.
/// Only the heaps this crate emits are tracked; the absent `#Blob` heap is always small.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableInfo {
    heap_sizes: HeapSizes,
}

impl TableInfo {
    /// Negotiates index widths from heap sizes in bytes.
    ///
    /// ## Arguments
    /// * 'strings' - Size of the `#Strings` heap
    /// * 'guids' - Size of the `#GUID` heap
    /// * 'blobs' - Size of the `#Blob` heap (0 when absent)
    #[must_use]
    pub fn new(strings: usize, guids: usize, blobs: usize) -> Self {
        let mut heap_sizes = HeapSizes::empty();
        heap_sizes.set(
            HeapSizes::LARGE_STRINGS,
            align_to_4_bytes(strings) >= LARGE_HEAP_THRESHOLD,
        );
        // II.24.2.6 keys the flag to the stream size in bytes, not to the entry count the
        // 1-based indexes address; 4096 GUIDs already select 4 byte columns
        heap_sizes.set(
            HeapSizes::LARGE_GUID,
            align_to_4_bytes(guids) >= LARGE_HEAP_THRESHOLD,
        );
        heap_sizes.set(
            HeapSizes::LARGE_BLOB,
            align_to_4_bytes(blobs) >= LARGE_HEAP_THRESHOLD,
        );

        TableInfo { heap_sizes }
    }

    /// The `HeapSizes` flags as written into the tables stream header
    #[must_use]
    pub fn heap_sizes(&self) -> HeapSizes {
        self.heap_sizes
    }

    /// Indicates the size of indexes referring into the '#Strings' heap. True means 4 bytes, False is 2 bytes
    #[must_use]
    pub fn is_large_str(&self) -> bool {
        self.heap_sizes.contains(HeapSizes::LARGE_STRINGS)
    }

    /// Indicates the size of indexes referring into the '#GUID' heap. True means 4 bytes, False is 2 bytes
    #[must_use]
    pub fn is_large_guid(&self) -> bool {
        self.heap_sizes.contains(HeapSizes::LARGE_GUID)
    }

    /// Returns the width of '#Strings' indexes in bytes
    #[must_use]
    pub fn str_bytes(&self) -> u8 {
        if self.is_large_str() {
            4
        } else {
            2
        }
    }

    /// Returns the width of '#GUID' indexes in bytes
    #[must_use]
    pub fn guid_bytes(&self) -> u8 {
        if self.is_large_guid() {
            4
        } else {
            2
        }
    }
}
