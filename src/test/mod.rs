//! Readers for the artifacts the encoders produce.
//!
//! The library itself only writes; these helpers parse the output back so tests can assert on
//! decoded structure instead of raw offsets.

use crate::{input::ConfigMapping, metadata::CIL_HEADER_MAGIC, Result};

fn read_bytes<'a>(data: &'a [u8], offset: &mut usize, len: usize) -> Result<&'a [u8]> {
    let end = offset
        .checked_add(len)
        .filter(|&end| end <= data.len())
        .ok_or_else(|| layout_error!("Read of {} bytes at {} is out of bounds", len, offset))?;

    let bytes = &data[*offset..end];
    *offset = end;
    Ok(bytes)
}

pub fn read_u16(data: &[u8], offset: &mut usize) -> Result<u16> {
    let bytes = read_bytes(data, offset, 2)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

pub fn read_u32(data: &[u8], offset: &mut usize) -> Result<u32> {
    let bytes = read_bytes(data, offset, 4)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

pub fn read_compressed_uint(data: &[u8], offset: &mut usize) -> Result<u32> {
    let first = u32::from(read_bytes(data, offset, 1)?[0]);

    // 0xxxxxxx
    if first & 0x80 == 0 {
        return Ok(first);
    }

    // 10xxxxxx xxxxxxxx
    if first & 0xC0 == 0x80 {
        let second = u32::from(read_bytes(data, offset, 1)?[0]);
        return Ok(((first & 0x3F) << 8) | second);
    }

    // 110xxxxx xxxxxxxx xxxxxxxx xxxxxxxx
    if first & 0xE0 == 0xC0 {
        let rest = read_bytes(data, offset, 3)?;
        return Ok(((first & 0x1F) << 24)
            | (u32::from(rest[0]) << 16)
            | (u32::from(rest[1]) << 8)
            | u32::from(rest[2]));
    }

    Err(layout_error!("Invalid compressed uint - {:#x}", first))
}

fn read_blob_string(data: &[u8], offset: &mut usize) -> Result<String> {
    let len = read_compressed_uint(data, offset)? as usize;
    let bytes = read_bytes(data, offset, len)?;
    String::from_utf8(bytes.to_vec()).map_err(|e| layout_error!("Invalid UTF-8 - {}", e))
}

/// Decodes a blob back into the mapping it was encoded from
pub fn decode_blob(data: &[u8]) -> Result<ConfigMapping> {
    let mut offset = 0;
    let count = read_compressed_uint(data, &mut offset)?;

    let mut mapping = ConfigMapping::new();
    for _ in 0..count {
        let key = read_blob_string(data, &mut offset)?;
        let value = read_blob_string(data, &mut offset)?;
        mapping.insert(key, value)?;
    }

    if offset != data.len() {
        return Err(layout_error!(
            "{} trailing bytes after the last pair",
            data.len() - offset
        ));
    }
    Ok(mapping)
}

/// A stream directory entry read back from a metadata root
pub struct ParsedStream {
    pub name: String,
    pub offset: u32,
    pub size: u32,
}

/// The header fields and stream directory of a metadata root
pub struct ParsedRoot {
    pub major_version: u16,
    pub minor_version: u16,
    pub version: String,
    pub flags: u16,
    pub streams: Vec<ParsedStream>,
}

impl ParsedRoot {
    /// Returns the body of the stream called `name`
    pub fn body<'a>(&self, data: &'a [u8], name: &str) -> Option<&'a [u8]> {
        let stream = self.streams.iter().find(|stream| stream.name == name)?;
        let start = stream.offset as usize;
        data.get(start..start + stream.size as usize)
    }
}

/// Parses the root header and stream directory, checking that every stream lies inside `data`
pub fn parse_root(data: &[u8]) -> Result<ParsedRoot> {
    let mut offset = 0;

    let signature = read_u32(data, &mut offset)?;
    if signature != CIL_HEADER_MAGIC {
        return Err(layout_error!("Invalid signature - {:#x}", signature));
    }

    let major_version = read_u16(data, &mut offset)?;
    let minor_version = read_u16(data, &mut offset)?;
    let _reserved = read_u32(data, &mut offset)?;
    let length = read_u32(data, &mut offset)? as usize;
    if length % 4 != 0 {
        return Err(layout_error!("Unaligned version length - {}", length));
    }

    let version_bytes = read_bytes(data, &mut offset, length)?;
    let terminator = version_bytes
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| layout_error!("Version string is not terminated"))?;
    let version = String::from_utf8(version_bytes[..terminator].to_vec())
        .map_err(|e| layout_error!("Invalid version string - {}", e))?;

    let flags = read_u16(data, &mut offset)?;
    let count = read_u16(data, &mut offset)?;

    let mut streams = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let stream_offset = read_u32(data, &mut offset)?;
        let size = read_u32(data, &mut offset)?;

        let name_start = offset;
        let name_len = data[name_start..]
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| layout_error!("Stream name is not terminated"))?;
        let name = String::from_utf8(data[name_start..name_start + name_len].to_vec())
            .map_err(|e| layout_error!("Invalid stream name - {}", e))?;
        offset = name_start + ((name_len + 4) & !3);

        if stream_offset as usize + size as usize > data.len() {
            return Err(layout_error!("Stream {} exceeds the root", name));
        }

        streams.push(ParsedStream {
            name,
            offset: stream_offset,
            size,
        });
    }

    Ok(ParsedRoot {
        major_version,
        minor_version,
        version,
        flags,
        streams,
    })
}

/// Reads the NUL-terminated string at `offset` of a `#Strings` heap
pub fn heap_string(heap: &[u8], offset: u32) -> Option<&str> {
    let start = offset as usize;
    let len = heap.get(start..)?.iter().position(|&b| b == 0)?;
    std::str::from_utf8(&heap[start..start + len]).ok()
}

/// Reads the `ModuleRef` name column of a `#~` stream with small string indexes
pub fn module_ref_names(tables: &[u8]) -> Result<Vec<u32>> {
    let mut offset = 8;
    let valid = u64::from(read_u32(tables, &mut offset)?)
        | (u64::from(read_u32(tables, &mut offset)?) << 32);
    offset = 24;

    let module_rows = read_u32(tables, &mut offset)?;
    let ref_rows = if valid & (1 << 0x1A) != 0 {
        read_u32(tables, &mut offset)?
    } else {
        0
    };

    // generation, name, mvid, encid, encbaseid
    offset += module_rows as usize * 10;

    (0..ref_rows)
        .map(|_| read_u16(tables, &mut offset).map(u32::from))
        .collect()
}
