//! Metadata root header, stream directory and stream bodies.
//!
//! This module defines [`MetadataRoot`], the serializer that turns the assembled tables and
//! heaps into the self-contained ECMA-335 metadata root:
//!
//! ```text
//! +---------------------------+  0
//! | Signature "BSJB"          |
//! | Major / Minor / Reserved  |
//! | Version length + string   |  padded to 4
//! | Flags / Stream count      |
//! +---------------------------+
//! | Stream directory          |  #~, #Strings, #GUID
//! +---------------------------+
//! | #~ body                   |
//! | #Strings body             |
//! | #GUID body                |
//! +---------------------------+
//! ```
//!
//! Stream offsets are relative to the start of the root. Every size is computed by
//! [`MetadataRoot::layout`] before the first byte is written, so a failing layout never
//! produces a partial root.
//!
//! # Example
//!
//! ```rust
//! use configmeta::{metadata::MetadataRoot, ConfigMapping};
//!
//! let mapping = ConfigMapping::from_pairs([("a", "1"), ("b", "2")])?;
//! let root = MetadataRoot::from_mapping(&mapping, "", "v4.0.30319")?;
//!
//! let bytes = root.serialize()?;
//! assert_eq!(&bytes[..4], b"BSJB");
//! assert_eq!(bytes.len(), root.size()?);
//! # Ok::<(), configmeta::Error>(())
//! ```
//!
//! # References
//!
//! - [ECMA-335 II.24.2.1: Metadata root](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use std::io::Write;

use crate::{
    file::io::{write_bytes_at, write_le_at},
    input::ConfigMapping,
    metadata::{
        streams::{StreamHeader, STREAM_GUID, STREAM_STRINGS, STREAM_TABLES},
        tables::{MetadataTables, ModuleTableAssembler, TableInfo, TablesStream},
    },
    utils::{align_to_4_bytes, to_u32},
    Result,
};

/// The MAGIC value indicating the CIL header
pub const CIL_HEADER_MAGIC: u32 = 0x424A_5342;

/// Version string written by default, the one used by .NET Framework 4 and later runtimes
pub const DEFAULT_METADATA_VERSION: &str = "v4.0.30319";

/// Longest version string the root header may carry, in bytes, NUL terminator included
/// (ECMA-335 II.24.2.1). The allocated `Length` is this rounded up to 4.
pub const MAX_VERSION_LENGTH: usize = 255;

/// Major version of the metadata root
pub const ROOT_MAJOR_VERSION: u16 = 1;

/// Minor version of the metadata root
pub const ROOT_MINOR_VERSION: u16 = 1;

/// Position and size of every part of a serialized root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootLayout {
    /// Size of the fixed header including the padded version string
    pub header_size: usize,
    /// Size of the stream directory
    pub directory_size: usize,
    /// Directory entries, in the order the bodies follow
    pub streams: Vec<StreamHeader>,
    /// Size of the complete root
    pub total_size: usize,
}

/// The serializer of the metadata root.
///
/// Holds the header fields and the three finished stream bodies. Building it consumes the
/// [`MetadataTables`], so heaps cannot change once their layout is fixed.
#[derive(Debug, Clone)]
pub struct MetadataRoot {
    /// `MajorVersion`
    pub major_version: u16,
    /// `MinorVersion`
    pub minor_version: u16,
    /// 'VersionString' without terminator
    pub version: String,
    /// Reserved, always 0
    pub flags: u16,
    streams: Vec<(&'static str, Vec<u8>)>,
}

impl MetadataRoot {
    /// Serializes the heaps and the tables stream of `tables`.
    ///
    /// # Arguments
    /// * `tables` - The assembled rows and heaps
    /// * `version` - The version string of the root header
    ///
    /// # Errors
    /// Returns [`crate::Error::LayoutFailed`] if the version string is invalid or a heap index
    /// does not fit its column.
    pub fn new(tables: MetadataTables, version: &str) -> Result<Self> {
        if version.len() + 1 > MAX_VERSION_LENGTH {
            return Err(layout_error!(
                "Version string is {} bytes, at most {} including its terminator are allowed",
                version.len(),
                MAX_VERSION_LENGTH
            ));
        }
        if version.as_bytes().contains(&0) {
            return Err(layout_error!("Version string contains a NUL character"));
        }

        let info = TableInfo::new(tables.strings.len(), tables.guids.len(), 0);
        let strings = tables.strings.serialize();
        let guids = tables.guids.serialize();
        let tables = TablesStream::new(tables.module, tables.module_refs, info).serialize()?;

        log::debug!(
            "streams: #~ {} bytes, #Strings {} bytes, #GUID {} bytes, heap sizes {:#04x}",
            tables.len(),
            strings.len(),
            guids.len(),
            info.heap_sizes().bits()
        );

        Ok(MetadataRoot {
            major_version: ROOT_MAJOR_VERSION,
            minor_version: ROOT_MINOR_VERSION,
            version: version.to_string(),
            flags: 0,
            streams: vec![
                (STREAM_TABLES, tables),
                (STREAM_STRINGS, strings),
                (STREAM_GUID, guids),
            ],
        })
    }

    /// Assembles the tables for `mapping` and serializes their streams.
    ///
    /// # Errors
    /// Returns [`crate::Error::LayoutFailed`] if the tables or heaps cannot be laid out.
    pub fn from_mapping(mapping: &ConfigMapping, module_name: &str, version: &str) -> Result<Self> {
        let assembler = ModuleTableAssembler::from_mapping(mapping, module_name)?;
        Self::new(assembler.into_tables()?, version)
    }

    /// Bytes allocated for the version string: terminator included, padded to 4
    fn version_length(&self) -> usize {
        align_to_4_bytes(self.version.len() + 1)
    }

    /// Computes the offset and size of every stream and the size of the whole root.
    ///
    /// # Errors
    /// Returns [`crate::Error::LayoutFailed`] if an offset or size does not fit 32 bits.
    pub fn layout(&self) -> Result<RootLayout> {
        // sig(4) + major(2) + minor(2) + reserved(4) + length(4) + version + flags(2) + count(2)
        let header_size = 16 + self.version_length() + 4;
        let directory_size: usize = self
            .streams
            .iter()
            .map(|(name, _)| StreamHeader::header_size(name))
            .sum();

        let mut position = header_size + directory_size;
        let mut streams = Vec::with_capacity(self.streams.len());
        for (name, body) in &self.streams {
            streams.push(StreamHeader::new(
                name,
                to_u32(position)?,
                to_u32(body.len())?,
            )?);
            position += body.len();
        }
        to_u32(position)?;

        Ok(RootLayout {
            header_size,
            directory_size,
            streams,
            total_size: position,
        })
    }

    /// Size of the serialized root in bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::LayoutFailed`] if the layout cannot be computed.
    pub fn size(&self) -> Result<usize> {
        Ok(self.layout()?.total_size)
    }

    /// Serializes the complete root.
    ///
    /// # Errors
    /// Returns [`crate::Error::LayoutFailed`] if the layout cannot be computed.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let layout = self.layout()?;
        let mut data = vec![0u8; layout.total_size];
        let mut offset = 0;

        let mut version = self.version.as_bytes().to_vec();
        version.resize(self.version_length(), 0);

        write_le_at(&mut data, &mut offset, CIL_HEADER_MAGIC)?;
        write_le_at(&mut data, &mut offset, self.major_version)?;
        write_le_at(&mut data, &mut offset, self.minor_version)?;
        write_le_at(&mut data, &mut offset, 0_u32)?;
        write_le_at(&mut data, &mut offset, to_u32(version.len())?)?;
        write_bytes_at(&mut data, &mut offset, &version)?;
        write_le_at(&mut data, &mut offset, self.flags)?;
        write_le_at(&mut data, &mut offset, layout.streams.len() as u16)?;

        for header in &layout.streams {
            header.write_to(&mut data, &mut offset)?;
        }

        for (_, body) in &self.streams {
            write_bytes_at(&mut data, &mut offset, body)?;
        }

        if offset != layout.total_size {
            return Err(layout_error!(
                "Metadata root is {} bytes, layout expected {}",
                offset,
                layout.total_size
            ));
        }

        Ok(data)
    }

    /// Serializes the root and writes it to `sink` in one call.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    /// Returns [`crate::Error::LayoutFailed`] if the layout cannot be computed, nothing is written
    /// in that case. Sink failures are returned as [`crate::Error::FileError`].
    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<usize> {
        let data = self.serialize()?;
        sink.write_all(&data)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{heap_string, module_ref_names, parse_root};

    fn sample() -> MetadataRoot {
        let mapping = ConfigMapping::from_pairs([("a", "1"), ("b", "2")]).unwrap();
        MetadataRoot::from_mapping(&mapping, "", DEFAULT_METADATA_VERSION).unwrap()
    }

    #[test]
    fn crafted_header() {
        let bytes = sample().serialize().unwrap();

        #[rustfmt::skip]
        let expected_header = [
            0x42, 0x53, 0x4A, 0x42,                         // BSJB
            0x01, 0x00,                                     // major
            0x01, 0x00,                                     // minor
            0x00, 0x00, 0x00, 0x00,                         // reserved
            0x0C, 0x00, 0x00, 0x00,                         // version length
            b'v', b'4', b'.', b'0', b'.', b'3', b'0', b'3', b'1', b'9', 0x00, 0x00,
            0x00, 0x00,                                     // flags
            0x03, 0x00,                                     // streams
            0x50, 0x00, 0x00, 0x00, 0x34, 0x00, 0x00, 0x00, // #~ at 80, 52 bytes
            b'#', b'~', 0x00, 0x00,
            0x84, 0x00, 0x00, 0x00, 0x0C, 0x00, 0x00, 0x00, // #Strings at 132, 12 bytes
            b'#', b'S', b't', b'r', b'i', b'n', b'g', b's', 0x00, 0x00, 0x00, 0x00,
            0x90, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, // #GUID at 144, 16 bytes
            b'#', b'G', b'U', b'I', b'D', 0x00, 0x00, 0x00,
        ];

        assert_eq!(&bytes[..80], &expected_header);
        assert_eq!(bytes.len(), 160);
        assert_eq!(&bytes[132..144], b"\0a\x001\0b\x002\0\0\0\0");
        assert_eq!(&bytes[144..160], &[0u8; 16]);
    }

    #[test]
    fn layout_sums_to_total() {
        let root = sample();
        let layout = root.layout().unwrap();

        let declared: usize = layout.streams.iter().map(|s| s.size as usize).sum();
        assert_eq!(
            layout.header_size + layout.directory_size + declared,
            layout.total_size
        );
        assert_eq!(root.serialize().unwrap().len(), layout.total_size);
    }

    #[test]
    fn parsed_back() {
        let bytes = sample().serialize().unwrap();
        let parsed = parse_root(&bytes).unwrap();

        assert_eq!(parsed.major_version, ROOT_MAJOR_VERSION);
        assert_eq!(parsed.minor_version, ROOT_MINOR_VERSION);
        assert_eq!(parsed.flags, 0);
        assert_eq!(parsed.version, DEFAULT_METADATA_VERSION);
        let names: Vec<&str> = parsed.streams.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, [STREAM_TABLES, STREAM_STRINGS, STREAM_GUID]);
        for stream in &parsed.streams {
            assert_eq!(stream.offset % 4, 0);
            assert_eq!(stream.size % 4, 0);
        }
    }

    #[test]
    fn module_refs_resolve_to_pairs() {
        let bytes = sample().serialize().unwrap();
        let parsed = parse_root(&bytes).unwrap();

        let heap = parsed.body(&bytes, STREAM_STRINGS).unwrap();
        let tables = parsed.body(&bytes, STREAM_TABLES).unwrap();

        let names: Vec<&str> = module_ref_names(tables)
            .unwrap()
            .into_iter()
            .map(|offset| heap_string(heap, offset).unwrap())
            .collect();
        assert_eq!(names, ["a", "1", "b", "2"]);
    }

    #[test]
    fn custom_version() {
        let tables = ModuleTableAssembler::from_mapping(&ConfigMapping::new(), "")
            .unwrap()
            .into_tables()
            .unwrap();
        let root = MetadataRoot::new(tables, "v1.1.4322").unwrap();

        let bytes = root.serialize().unwrap();
        assert_eq!(&bytes[12..16], &[0x0C, 0x00, 0x00, 0x00]);
        assert_eq!(&bytes[16..28], b"v1.1.4322\0\0\0");
    }

    #[test]
    fn version_padding_includes_terminator() {
        let tables = ModuleTableAssembler::from_mapping(&ConfigMapping::new(), "")
            .unwrap()
            .into_tables()
            .unwrap();
        let root = MetadataRoot::new(tables, "v1.2").unwrap();

        // "v1.2" + NUL needs 5 bytes, padded to 8
        assert_eq!(root.layout().unwrap().header_size, 16 + 8 + 4);
    }

    #[test]
    fn invalid_versions() {
        let tables = || {
            ModuleTableAssembler::from_mapping(&ConfigMapping::new(), "")
                .unwrap()
                .into_tables()
                .unwrap()
        };

        assert!(MetadataRoot::new(tables(), &"v".repeat(256)).is_err());
        assert!(MetadataRoot::new(tables(), "v4\0").is_err());

        // 255 bytes plus the terminator exceed the limit
        assert!(matches!(
            MetadataRoot::new(tables(), &"v".repeat(255)),
            Err(crate::Error::LayoutFailed { .. })
        ));
    }

    #[test]
    fn longest_version() {
        let tables = ModuleTableAssembler::from_mapping(&ConfigMapping::new(), "")
            .unwrap()
            .into_tables()
            .unwrap();
        let root = MetadataRoot::new(tables, &"v".repeat(254)).unwrap();
        let bytes = root.serialize().unwrap();

        // 254 bytes + NUL = 255, allocated as 256
        assert_eq!(&bytes[12..16], &[0x00, 0x01, 0x00, 0x00]);
        assert_eq!(bytes[16 + 254], 0);
        assert_eq!(root.layout().unwrap().header_size, 16 + 256 + 4);
    }

    #[test]
    fn write_to_sink() {
        let root = sample();
        let mut sink = Vec::new();
        let written = root.write_to(&mut sink).unwrap();

        assert_eq!(written, sink.len());
        assert_eq!(sink, root.serialize().unwrap());
    }
}
