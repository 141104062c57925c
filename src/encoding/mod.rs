//! Encoder facade.
//!
//! A run takes one [`ConfigMapping`] and one [`EncoderConfig`] and produces the artifact named
//! by [`EncoderConfig::format`]:
//!
//! - [`Format::Blob`] - [`BlobEncoder`], compressed count and length-prefixed pairs
//! - [`Format::MetadataRoot`] - [`crate::metadata::MetadataRoot`], an ECMA-335 metadata root
//!   whose `ModuleRef` names are the keys and values
//!
//! Every encoder computes its full size before writing, so all three entry points either
//! produce the complete artifact or fail without emitting anything.
//!
//! # Examples
//!
//! ```rust
//! use configmeta::{encode, ConfigMapping, EncoderConfig, Format};
//!
//! let mapping = ConfigMapping::from_pairs([("a", "1"), ("b", "2")])?;
//!
//! let blob = encode(&mapping, &EncoderConfig::new())?;
//! assert_eq!(blob.len(), 9);
//!
//! let root = encode(&mapping, &EncoderConfig::new().with_format(Format::MetadataRoot))?;
//! assert_eq!(&root[..4], b"BSJB");
//! # Ok::<(), configmeta::Error>(())
//! ```

mod blob;
mod config;

pub use blob::BlobEncoder;
pub use config::{EncoderConfig, Format};

use std::{io::Write, path::Path};

use crate::{file::Output, input::ConfigMapping, metadata::MetadataRoot, Result};

/// Encodes `mapping` into a byte vector.
///
/// # Errors
/// - [`crate::Error::CompressedRange`] if a blob length exceeds the compressed integer range
/// - [`crate::Error::LayoutFailed`] if the metadata root cannot be laid out
pub fn encode(mapping: &ConfigMapping, config: &EncoderConfig) -> Result<Vec<u8>> {
    log::debug!("encoding {} pairs as {}", mapping.len(), config.format);

    match config.format {
        Format::Blob => BlobEncoder::new(mapping).encode(),
        Format::MetadataRoot => {
            MetadataRoot::from_mapping(mapping, &config.module_name, &config.version)?.serialize()
        }
    }
}

/// Encodes `mapping` and writes the artifact to `sink`.
///
/// Returns the number of bytes written.
///
/// # Errors
/// Same as [`encode`], plus [`crate::Error::FileError`] if the sink fails.
pub fn encode_to<W: Write>(
    mapping: &ConfigMapping,
    config: &EncoderConfig,
    sink: &mut W,
) -> Result<usize> {
    let data = encode(mapping, config)?;
    sink.write_all(&data)?;
    sink.flush()?;
    Ok(data.len())
}

/// Encodes `mapping` and writes the artifact to the file at `path`.
///
/// The file is created only once the artifact is complete in memory, and it is removed again if
/// writing it fails.
///
/// Returns the number of bytes written.
///
/// # Errors
/// Same as [`encode`], plus [`crate::Error::OutputFailed`] if the file cannot be created or
/// written.
pub fn encode_to_file(
    mapping: &ConfigMapping,
    config: &EncoderConfig,
    path: impl AsRef<Path>,
) -> Result<usize> {
    let data = encode(mapping, config)?;

    let mut output = Output::create(path.as_ref(), data.len() as u64)?;
    output.write_at(0, &data)?;
    log::debug!(
        "wrote {} bytes to {}",
        output.size(),
        output.target_path().display()
    );
    output.finalize()?;

    Ok(data.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn sample() -> ConfigMapping {
        ConfigMapping::from_pairs([("a", "1"), ("b", "2")]).unwrap()
    }

    #[test]
    fn default_format_is_blob() {
        let data = encode(&sample(), &EncoderConfig::default()).unwrap();
        assert_eq!(data, [0x02, 0x01, b'a', 0x01, b'1', 0x01, b'b', 0x01, b'2']);
    }

    #[test]
    fn metadata_root_format() {
        let config = EncoderConfig::new().with_format(Format::MetadataRoot);
        let data = encode(&sample(), &config).unwrap();

        assert_eq!(&data[..4], &[0x42, 0x53, 0x4A, 0x42]);
        assert_eq!(data.len(), 160);
    }

    #[test]
    fn deterministic() {
        let config = EncoderConfig::new().with_format(Format::MetadataRoot);
        assert_eq!(
            encode(&sample(), &config).unwrap(),
            encode(&sample(), &config).unwrap()
        );
    }

    #[test]
    fn encode_to_matches_encode() {
        let config = EncoderConfig::new().with_format(Format::MetadataRoot);
        let mut sink = Vec::new();

        let written = encode_to(&sample(), &config, &mut sink).unwrap();
        assert_eq!(written, sink.len());
        assert_eq!(sink, encode(&sample(), &config).unwrap());
    }

    #[test]
    fn invalid_version_writes_nothing() {
        let config = EncoderConfig::new()
            .with_format(Format::MetadataRoot)
            .with_version("v".repeat(300));
        let mut sink = Vec::new();

        assert!(matches!(
            encode_to(&sample(), &config, &mut sink),
            Err(Error::LayoutFailed { .. })
        ));
        assert!(sink.is_empty());
    }
}
