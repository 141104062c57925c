//! Output format selection and encoder options.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

use crate::metadata::DEFAULT_METADATA_VERSION;

/// The artifact an encode run produces.
///
/// Parses from and displays as the names accepted on the command line.
///
/// ```rust
/// use configmeta::Format;
///
/// assert_eq!("metadata".parse::<Format>()?, Format::MetadataRoot);
/// assert_eq!(Format::MetadataRoot.to_string(), "metadata-root");
/// # Ok::<(), strum::ParseError>(())
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// Pair count followed by length-prefixed keys and values
    #[default]
    #[strum(serialize = "blob")]
    Blob,
    /// ECMA-335 metadata root with `Module` and `ModuleRef` tables
    #[strum(to_string = "metadata-root", serialize = "metadata")]
    MetadataRoot,
}

/// Options for an encode run.
///
/// Only [`Format::MetadataRoot`] reads `module_name` and `version`; the blob encoding has no
/// header to put them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    /// The artifact to produce.
    ///
    /// Default: [`Format::Blob`]
    pub format: Format,

    /// Name stored in the single `Module` row.
    ///
    /// Default: empty, the `Module` name column then references the empty string at offset 0
    pub module_name: String,

    /// Version string of the metadata root header.
    ///
    /// Default: [`DEFAULT_METADATA_VERSION`]
    pub version: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            format: Format::default(),
            module_name: String::new(),
            version: DEFAULT_METADATA_VERSION.to_string(),
        }
    }
}

impl EncoderConfig {
    /// Creates a new configuration with default settings.
    ///
    /// # Returns
    ///
    /// A new `EncoderConfig` with:
    /// - `format`: [`Format::Blob`]
    /// - `module_name`: empty
    /// - `version`: `v4.0.30319`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output format.
    ///
    /// # Returns
    ///
    /// The modified configuration for method chaining.
    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Sets the name of the `Module` row.
    ///
    /// # Returns
    ///
    /// The modified configuration for method chaining.
    #[must_use]
    pub fn with_module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = name.into();
        self
    }

    /// Sets the version string of the metadata root header.
    ///
    /// The string is validated when the root is built; more than 254 bytes (255 with its
    /// NUL terminator) is rejected there.
    ///
    /// # Returns
    ///
    /// The modified configuration for method chaining.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}
