//! Metadata tables emitted into the `#~` stream.
//!
//! Only two ECMA-335 tables are produced: `Module` with its single row and `ModuleRef`
//! with one row per configuration key and value. All other tables are absent.
//!
//! # Key Components
//!
//! - [`ModuleTableAssembler`] - Builds both tables from a [`crate::ConfigMapping`]
//! - [`TablesStream`] - Serializes the `#~` stream header and rows
//! - [`TableInfo`] / [`HeapSizes`] - Negotiated heap index widths
//! - [`RowWritable`] - Row serialization shared by [`ModuleRow`] and [`ModuleRefRow`]
//!
//! # Reference
//! - [ECMA-335 II.22, II.24.2.6](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

mod assembler;
mod module;
mod moduleref;
mod stream;
mod tableid;
mod tableinfo;
mod traits;

pub use assembler::{MetadataTables, ModuleTableAssembler, MAX_ROW_ID};
pub use module::ModuleRow;
pub use moduleref::ModuleRefRow;
pub use stream::{TablesStream, TABLES_MAJOR_VERSION, TABLES_MINOR_VERSION};
pub use tableid::{TableId, SORTED_TABLES};
pub use tableinfo::{HeapSizes, TableInfo, LARGE_HEAP_THRESHOLD};
pub use traits::RowWritable;
