//! Length-prefixed blob encoding.
//!
//! ```text
//! count            compressed uint
//! count x {
//!     key length   compressed uint
//!     key bytes    UTF-8, no terminator
//!     value length compressed uint
//!     value bytes  UTF-8, no terminator
//! }
//! ```
//!
//! There is no header, no heap and no deduplication; repeated values are written every time
//! they occur.

use std::io::Write;

use crate::{
    file::io::write_bytes_at,
    input::ConfigMapping,
    utils::{compressed_uint_size, write_compressed_uint_at},
    Result,
};

/// Writes a [`ConfigMapping`] as a compressed-length-prefixed blob.
///
/// # Examples
///
/// ```rust
/// use configmeta::{encoding::BlobEncoder, ConfigMapping};
///
/// let mapping = ConfigMapping::from_pairs([("a", "1"), ("b", "2")])?;
/// let encoder = BlobEncoder::new(&mapping);
///
/// assert_eq!(encoder.encode()?, [0x02, 0x01, b'a', 0x01, b'1', 0x01, b'b', 0x01, b'2']);
/// # Ok::<(), configmeta::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlobEncoder<'a> {
    mapping: &'a ConfigMapping,
}

impl<'a> BlobEncoder<'a> {
    /// Creates an encoder over `mapping`.
    #[must_use]
    pub fn new(mapping: &'a ConfigMapping) -> Self {
        BlobEncoder { mapping }
    }

    /// Exact number of bytes [`BlobEncoder::encode`] produces.
    ///
    /// # Errors
    /// Returns [`crate::Error::CompressedRange`] if the pair count or a string length exceeds
    /// the compressed integer range.
    pub fn size(&self) -> Result<usize> {
        let mut size = compressed_uint_size(self.mapping.len())?;
        for (key, value) in self.mapping {
            size += compressed_uint_size(key.len())? + key.len();
            size += compressed_uint_size(value.len())? + value.len();
        }
        Ok(size)
    }

    /// Encodes the mapping.
    ///
    /// # Errors
    /// Returns [`crate::Error::CompressedRange`] if the pair count or a string length exceeds
    /// the compressed integer range.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut data = vec![0u8; self.size()?];
        let mut offset = 0;

        write_compressed_uint_at(&mut data, &mut offset, self.mapping.len())?;
        for (key, value) in self.mapping {
            write_string_at(&mut data, &mut offset, key)?;
            write_string_at(&mut data, &mut offset, value)?;
        }

        log::debug!(
            "blob: {} pairs in {} bytes",
            self.mapping.len(),
            data.len()
        );
        Ok(data)
    }

    /// Encodes the mapping and writes it to `sink`.
    ///
    /// Returns the number of bytes written. Nothing is written if encoding fails.
    ///
    /// # Errors
    /// Returns [`crate::Error::CompressedRange`] for out of range lengths and
    /// [`crate::Error::FileError`] if the sink fails.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<usize> {
        let data = self.encode()?;
        sink.write_all(&data)?;
        Ok(data.len())
    }
}

fn write_string_at(data: &mut [u8], offset: &mut usize, text: &str) -> Result<()> {
    write_compressed_uint_at(data, offset, text.len())?;
    write_bytes_at(data, offset, text.as_bytes())
}
