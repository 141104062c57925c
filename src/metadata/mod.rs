//! ECMA-335 metadata generation.
//!
//! The metadata output format stores every configuration key and value as a `ModuleRef` name
//! inside a minimal, self-contained metadata root. The root carries three streams:
//!
//! - `#~` - the tables stream with one `Module` row and one `ModuleRef` row per string
//! - `#Strings` - the string heap holding the module name, keys and values
//! - `#GUID` - the GUID heap holding the module identifiers
//!
//! # Architecture
//!
//! Generation runs in two phases. [`tables::ModuleTableAssembler`] walks the mapping and
//! accumulates rows while interning their strings; once finished, [`MetadataRoot`] takes the
//! assembled tables, fixes the heap index widths and lays out and serializes all streams.
//!
//! # Key Components
//!
//! - [`streams`] - Heap builders and stream directory entries
//! - [`tables`] - Row types, the assembler and the `#~` serializer
//! - [`MetadataRoot`] - The root header and the final byte layout
//!
//! # References
//!
//! - [ECMA-335 II.24: Metadata physical layout](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

mod root;
pub mod streams;
pub mod tables;

pub use root::{
    MetadataRoot, RootLayout, CIL_HEADER_MAGIC, DEFAULT_METADATA_VERSION, MAX_VERSION_LENGTH,
    ROOT_MAJOR_VERSION, ROOT_MINOR_VERSION,
};
