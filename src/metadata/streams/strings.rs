//! String Heap (`#Strings`) builder
//!
//! Accumulates the identifier strings referenced by metadata tables. Every string is stored
//! once as UTF-8 followed by a NUL terminator; tables refer to it by the byte offset at which
//! it starts.
//!
//! # Reference
//! - [ECMA-335 II.24.2.3](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use std::collections::HashMap;

use crate::{
    utils::{align_to_4_bytes, to_u32},
    Result,
};

/// Builder for the `#Strings` heap.
///
/// Offset 0 is reserved for the empty string, so a fresh heap already holds a single NUL
/// byte. Strings are deduplicated by exact content: the first [`StringHeapBuilder::intern`]
/// call for a text fixes the offset every later call for the same text returns. Offsets only
/// depend on the order of the calls, which keeps the heap layout reproducible.
///
/// [`StringHeapBuilder::serialize`] consumes the builder, so nothing can be interned after
/// the heap has been laid out.
///
/// # Examples
///
/// ```rust
/// use configmeta::metadata::streams::StringHeapBuilder;
///
/// let mut heap = StringHeapBuilder::new();
/// assert_eq!(heap.intern("")?, 0);
/// assert_eq!(heap.intern("a")?, 1);
/// assert_eq!(heap.intern("b")?, 3);
/// assert_eq!(heap.intern("a")?, 1);
///
/// assert_eq!(heap.serialize(), b"\0a\0b\0\0\0\0");
/// # Ok::<(), configmeta::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct StringHeapBuilder {
    data: Vec<u8>,
    offsets: HashMap<String, u32>,
}

impl Default for StringHeapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StringHeapBuilder {
    /// Creates a heap holding only the reserved empty string.
    #[must_use]
    pub fn new() -> Self {
        StringHeapBuilder {
            data: vec![0],
            offsets: HashMap::new(),
        }
    }

    /// Returns the heap offset of `text`, appending it if it is not present yet.
    ///
    /// ## Arguments
    /// * 'text' - The string to store
    ///
    /// # Errors
    /// Returns [`crate::Error::LayoutFailed`] if `text` contains a NUL character, which would
    /// terminate the entry early, or if the heap outgrows 32-bit offsets.
    pub fn intern(&mut self, text: &str) -> Result<u32> {
        if text.is_empty() {
            return Ok(0);
        }

        if let Some(&offset) = self.offsets.get(text) {
            return Ok(offset);
        }

        if text.as_bytes().contains(&0) {
            return Err(layout_error!(
                "String {:?} contains a NUL character and cannot be stored in #Strings",
                text
            ));
        }

        let offset = to_u32(self.data.len())?;
        to_u32(self.data.len() + text.len() + 1)?;

        self.data.extend_from_slice(text.as_bytes());
        self.data.push(0);
        self.offsets.insert(text.to_string(), offset);

        log::trace!("#Strings[{offset:#x}] = {text:?}");
        Ok(offset)
    }

    /// Returns the offset of an already interned string.
    #[must_use]
    pub fn offset_of(&self, text: &str) -> Option<u32> {
        if text.is_empty() {
            Some(0)
        } else {
            self.offsets.get(text).copied()
        }
    }

    /// Size of the heap content in bytes, without alignment padding.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the heap holds nothing but the reserved empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.len() == 1
    }

    /// Size of the serialized heap, a multiple of 4.
    #[must_use]
    pub fn aligned_len(&self) -> usize {
        align_to_4_bytes(self.data.len())
    }

    /// Lays out the heap, padded with zero bytes to a multiple of 4.
    #[must_use]
    pub fn serialize(self) -> Vec<u8> {
        let mut data = self.data;
        data.resize(align_to_4_bytes(data.len()), 0);
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_heap() {
        let heap = StringHeapBuilder::new();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.serialize(), [0, 0, 0, 0]);
    }

    #[test]
    fn empty_string_is_offset_zero() {
        let mut heap = StringHeapBuilder::new();
        assert_eq!(heap.intern("").unwrap(), 0);
        assert_eq!(heap.intern("x").unwrap(), 1);
        assert_eq!(heap.intern("").unwrap(), 0);
        assert_eq!(heap.len(), 3);
    }

    #[test]
    fn dedup_by_content() {
        let mut heap = StringHeapBuilder::new();
        let first = heap.intern("System.GC.Server").unwrap();
        let other = heap.intern("true").unwrap();
        let again = heap.intern("System.GC.Server").unwrap();

        assert_eq!(first, 1);
        assert_eq!(other, 18);
        assert_eq!(again, first);
        assert_eq!(heap.offset_of("true"), Some(18));
        assert_eq!(heap.offset_of("false"), None);
    }

    #[test]
    fn no_suffix_sharing() {
        let mut heap = StringHeapBuilder::new();
        assert_eq!(heap.intern("Server").unwrap(), 1);
        assert_eq!(heap.intern("GC.Server").unwrap(), 8);
        assert_eq!(heap.intern("Server").unwrap(), 1);
    }

    #[test]
    fn crafted_layout() {
        let mut heap = StringHeapBuilder::new();
        for (text, expected) in [("a", 1), ("1", 3), ("b", 5), ("2", 7)] {
            assert_eq!(heap.intern(text).unwrap(), expected);
        }

        assert_eq!(heap.len(), 9);
        assert_eq!(heap.aligned_len(), 12);
        assert_eq!(heap.serialize(), b"\0a\x001\0b\x002\0\0\0\0");
    }

    #[test]
    fn size_matches_distinct_strings() {
        let strings = ["alpha", "beta", "gamma", "delta", "épsilon"];
        let mut heap = StringHeapBuilder::new();
        for text in strings.iter().chain(strings.iter()) {
            heap.intern(text).unwrap();
        }

        let content: usize = 1 + strings.iter().map(|s| s.len() + 1).sum::<usize>();
        assert_eq!(heap.len(), content);
        assert_eq!(heap.serialize().len(), align_to_4_bytes(content));
    }

    #[test]
    fn multibyte_offsets_are_byte_based() {
        let mut heap = StringHeapBuilder::new();
        assert_eq!(heap.intern("ü").unwrap(), 1);
        assert_eq!(heap.intern("x").unwrap(), 4);
    }

    #[test]
    fn nul_is_rejected() {
        let mut heap = StringHeapBuilder::new();
        assert!(heap.intern("a\0b").is_err());
        assert!(heap.is_empty());
    }
}
