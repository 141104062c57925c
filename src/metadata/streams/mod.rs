//! Metadata streams emitted into the metadata root.
//!
//! - [`StringHeapBuilder`] - The `#Strings` heap holding keys, values and the module name
//! - [`GuidHeapBuilder`] - The `#GUID` heap holding the module identifiers
//! - [`StreamHeader`] - Stream directory entries
//!
//! The `#~` tables stream lives in [`crate::metadata::tables`].
//!
//! # Reference
//! - [ECMA-335 II.24.2](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

mod guid;
mod streamheader;
mod strings;

pub use guid::{GuidHeapBuilder, GUID_SIZE};
pub use streamheader::{StreamHeader, STREAM_GUID, STREAM_STRINGS, STREAM_TABLES};
pub use strings::StringHeapBuilder;
