// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
//#![deny(unsafe_code)]
// - 'file/output.rs' uses mmap to map the output file into memory

//! # configmeta
//!
//! Encode .NET runtime configuration properties into a compact binary artifact.
//!
//! The input is an ordered mapping of string keys to string values, typically the
//! `configProperties` object of a `runtimeconfig.json`. Two output formats are supported:
//!
//! - **Blob** - a compressed pair count followed by every key and value as a compressed length
//!   and its UTF-8 bytes
//! - **Metadata root** - a minimal ECMA-335 metadata root whose `ModuleRef` table names every
//!   key and value, so the properties can be read back with any standard metadata reader
//!
//! ## Quick Start
//!
//! ### Using the Prelude
//!
//! ```rust
//! use configmeta::prelude::*;
//!
//! let mapping = ConfigMapping::from_pairs([("System.GC.Server", "true")])?;
//! let blob = encode(&mapping, &EncoderConfig::new())?;
//! assert_eq!(blob[0], 0x01);
//! # Ok::<(), configmeta::Error>(())
//! ```
//!
//! ### From a runtimeconfig.json
//!
//! ```rust,no_run
//! use configmeta::{encode_to_file, ConfigMapping, EncoderConfig, Format};
//!
//! let mapping = ConfigMapping::from_path("app.runtimeconfig.json")?;
//! let config = EncoderConfig::new().with_format(Format::MetadataRoot);
//!
//! let written = encode_to_file(&mapping, &config, "runtimeconfig.bin")?;
//! println!("wrote {written} bytes");
//! # Ok::<(), configmeta::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`input`] - [`ConfigMapping`] and the JSON loader
//! - [`encoding`] - The encoder facade, [`EncoderConfig`] and the blob encoder
//! - [`metadata`] - Heaps, tables and the metadata root serializer
//! - [`file`] - Little-endian writers and the memory-mapped output file
//! - [`utils`] - Compressed integers and alignment helpers
//!
//! ## Standards Compliance
//!
//! The metadata root follows ECMA-335 6th edition, Partition II, section 24:
//! root header (II.24.2.1), stream headers (II.24.2.2), `#Strings` (II.24.2.3), `#GUID`
//! (II.24.2.5) and the `#~` stream (II.24.2.6). Compressed integers follow II.23.2.
//!
//! ### References
//!
//! - [ECMA-335 Standard](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Encoding never produces partial output:
//! every size is computed before the first byte is written, and an output file is removed
//! again if writing it fails.
//!
//! ## Development and Testing
//!
//! ### Fuzzing
//!
//! ```bash
//! cargo +nightly fuzz run encode
//! ```
//!
//! ### Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and functions.
///
/// ```rust
/// use configmeta::prelude::*;
///
/// let mapping = ConfigMapping::new();
/// let root = encode(&mapping, &EncoderConfig::new().with_format(Format::MetadataRoot))?;
/// assert_eq!(&root[..4], &CIL_HEADER_MAGIC.to_le_bytes());
/// # Ok::<(), configmeta::Error>(())
/// ```
pub mod prelude;

/// Encoder facade, output format selection and the blob encoder.
pub mod encoding;

/// Little-endian writers and the memory-mapped output file.
pub mod file;

/// The ordered configuration mapping and its JSON loader.
pub mod input;

/// ECMA-335 heaps, tables and the metadata root serializer.
pub mod metadata;

/// Compressed integer encoding and alignment helpers.
pub mod utils;

/// `configmeta` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always
/// [`Error`].
///
/// # Examples
///
/// ```rust
/// use configmeta::{ConfigMapping, Result};
///
/// fn properties(text: &str) -> Result<usize> {
///     Ok(ConfigMapping::from_json_str(text)?.len())
/// }
///
/// assert_eq!(properties(r#"{ "configProperties": { "a": "1" } }"#)?, 1);
/// # Ok::<(), configmeta::Error>(())
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `configmeta` Error type
///
/// The main error type for all operations in this crate.
pub use error::Error;

/// The ordered, duplicate-free input mapping.
pub use input::ConfigMapping;

/// Encoder configuration and entry points.
pub use encoding::{encode, encode_to, encode_to_file, EncoderConfig, Format};

/// The metadata root serializer.
pub use metadata::MetadataRoot;
