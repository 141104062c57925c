//! # configmeta Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and functions
//! from the configmeta library.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all configmeta operations
pub use crate::Error;

/// The result type used throughout configmeta
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// The ordered input mapping
pub use crate::ConfigMapping;

/// Encoder configuration
pub use crate::{EncoderConfig, Format};

/// Encoding functions
pub use crate::{encode, encode_to, encode_to_file};

// ================================================================================================
// Encoders
// ================================================================================================

/// The blob encoder
pub use crate::encoding::BlobEncoder;

/// The metadata root serializer and its constants
pub use crate::metadata::{MetadataRoot, RootLayout, CIL_HEADER_MAGIC, DEFAULT_METADATA_VERSION};

/// Table assembly
pub use crate::metadata::tables::{MetadataTables, ModuleTableAssembler, TableId};
