//! Stream Header for .NET Metadata Streams
//!
//! Provides the stream directory entries of the metadata root, which describe the name,
//! offset and size of each stream.
//!
//! # Reference
//! - [ECMA-335 II.24.2.2](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use crate::{
    file::io::{write_bytes_at, write_le_at},
    utils::align_to_4_bytes,
    Result,
};

/// Name of the compressed tables stream
pub const STREAM_TABLES: &str = "#~";
/// Name of the identifier string heap
pub const STREAM_STRINGS: &str = "#Strings";
/// Name of the GUID heap
pub const STREAM_GUID: &str = "#GUID";

/// A stream header provides the name, and the position and length of a particular table or heap. The
/// length of a stream header is not fixed, it depends on the length of its name field (a NUL-terminated
/// string padded to a multiple of 4 bytes).
///
/// ## Reference
/// * '<https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf>' - II.24.2.2
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHeader {
    /// Offset of the stream, relative to the start of the metadata root
    pub offset: u32,
    /// Size of this stream in bytes, a multiple of 4
    pub size: u32,
    /// Name of Stream\0 max 32char
    pub name: String,
}

impl StreamHeader {
    /// Creates a directory entry.
    ///
    /// # Arguments
    /// * 'name' - The stream name, e.g. `#Strings`
    /// * 'offset' - Offset of the stream body from the start of the metadata root
    /// * 'size' - Size of the stream body
    ///
    /// # Errors
    /// Returns [`crate::Error::LayoutFailed`] if the name is not one of the ECMA-335 stream names
    /// or the size is not 4-byte aligned.
    pub fn new(name: &str, offset: u32, size: u32) -> Result<StreamHeader> {
        if ![STREAM_STRINGS, "#US", "#Blob", STREAM_GUID, STREAM_TABLES].contains(&name) {
            return Err(layout_error!("Invalid stream header name - {}", name));
        }

        if size % 4 != 0 {
            return Err(layout_error!("Stream {} has unaligned size {}", name, size));
        }

        Ok(StreamHeader {
            offset,
            size,
            name: name.to_string(),
        })
    }

    /// Number of bytes this entry occupies in the stream directory.
    #[must_use]
    pub fn header_size(name: &str) -> usize {
        8 + align_to_4_bytes(name.len() + 1)
    }

    /// Writes the entry into `data` at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::LayoutFailed`] if the buffer is too small.
    pub fn write_to(&self, data: &mut [u8], offset: &mut usize) -> Result<()> {
        write_le_at(data, offset, self.offset)?;
        write_le_at(data, offset, self.size)?;

        let mut name = self.name.as_bytes().to_vec();
        name.resize(align_to_4_bytes(self.name.len() + 1), 0);
        write_bytes_at(data, offset, &name)
    }
}
