//! The `#~` tables stream.
//!
//! Layout (ECMA-335 II.24.2.6):
//!
//! | Field          | Size          | Value                                   |
//! |----------------|---------------|-----------------------------------------|
//! | Reserved       | 4             | 0                                       |
//! | MajorVersion   | 1             | 2                                       |
//! | MinorVersion   | 1             | 0                                       |
//! | HeapSizes      | 1             | [`crate::metadata::tables::HeapSizes`]  |
//! | Reserved       | 1             | 1                                       |
//! | Valid          | 8             | bit per present table                   |
//! | Sorted         | 8             | [`crate::metadata::tables::SORTED_TABLES`] |
//! | Rows           | 4 per table   | row count of each present table         |
//! | Tables         | ...           | rows of each present table, in order    |
//!
//! The stream is padded with zero bytes to a multiple of 4.

use strum::IntoEnumIterator;

use crate::{
    file::io::{write_bytes_at, write_le_at},
    metadata::tables::{
        ModuleRefRow, ModuleRow, RowWritable, TableId, TableInfo, SORTED_TABLES,
    },
    utils::{align_to_4_bytes, to_u32},
    Result,
};

/// Major version of the table schema
pub const TABLES_MAJOR_VERSION: u8 = 2;
/// Minor version of the table schema
pub const TABLES_MINOR_VERSION: u8 = 0;

/// Size of the fixed part of the tables stream header
const FIXED_HEADER_SIZE: usize = 24;

/// The `Module` and `ModuleRef` tables together with their column widths.
#[derive(Debug, Clone)]
pub struct TablesStream {
    info: TableInfo,
    module: ModuleRow,
    module_refs: Vec<ModuleRefRow>,
}

impl TablesStream {
    /// Creates the stream from its rows and the negotiated heap index widths.
    #[must_use]
    pub fn new(module: ModuleRow, module_refs: Vec<ModuleRefRow>, info: TableInfo) -> Self {
        TablesStream {
            info,
            module,
            module_refs,
        }
    }

    /// The negotiated heap index widths
    #[must_use]
    pub fn info(&self) -> &TableInfo {
        &self.info
    }

    /// Number of rows in a table
    #[must_use]
    pub fn row_count(&self, table: TableId) -> usize {
        match table {
            TableId::Module => 1,
            TableId::ModuleRef => self.module_refs.len(),
        }
    }

    /// Bitmask of the tables holding rows. An empty `ModuleRef` table is left out.
    #[must_use]
    pub fn valid(&self) -> u64 {
        TableId::iter()
            .filter(|table| self.row_count(*table) > 0)
            .fold(0, |valid, table| valid | table.mask())
    }

    fn present_tables(&self) -> impl Iterator<Item = TableId> + '_ {
        TableId::iter().filter(move |table| self.valid() & table.mask() != 0)
    }

    fn table_size(&self, table: TableId) -> usize {
        let row_size = match table {
            TableId::Module => ModuleRow::row_size(&self.info),
            TableId::ModuleRef => ModuleRefRow::row_size(&self.info),
        };
        self.row_count(table) * row_size as usize
    }

    /// Size of the stream before alignment padding
    #[must_use]
    pub fn unaligned_size(&self) -> usize {
        self.present_tables()
            .map(|table| 4 + self.table_size(table))
            .sum::<usize>()
            + FIXED_HEADER_SIZE
    }

    /// Size of the serialized stream, a multiple of 4
    #[must_use]
    pub fn size(&self) -> usize {
        align_to_4_bytes(self.unaligned_size())
    }

    /// Serializes header and rows.
    ///
    /// # Errors
    /// Returns [`crate::Error::LayoutFailed`] if a row count does not fit 32 bits or a heap index
    /// does not fit its column.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut data = vec![0u8; self.size()];
        let mut offset = 0;

        write_le_at(&mut data, &mut offset, 0_u32)?;
        write_le_at(&mut data, &mut offset, TABLES_MAJOR_VERSION)?;
        write_le_at(&mut data, &mut offset, TABLES_MINOR_VERSION)?;
        write_le_at(&mut data, &mut offset, self.info.heap_sizes().bits())?;
        write_le_at(&mut data, &mut offset, 1_u8)?;
        write_le_at(&mut data, &mut offset, self.valid())?;
        write_le_at(&mut data, &mut offset, SORTED_TABLES)?;

        for table in self.present_tables() {
            write_le_at(&mut data, &mut offset, to_u32(self.row_count(table))?)?;
        }

        for table in self.present_tables() {
            match table {
                TableId::Module => self.module.row_write(&mut data, &mut offset, &self.info)?,
                TableId::ModuleRef => {
                    for row in &self.module_refs {
                        row.row_write(&mut data, &mut offset, &self.info)?;
                    }
                }
            }
        }

        let padding = data.len() - offset;
        write_bytes_at(&mut data, &mut offset, &vec![0u8; padding])?;

        Ok(data)
    }
}
