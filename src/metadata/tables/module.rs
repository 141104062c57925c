//! # `Module` table row
//!
//! The `Module` table (0x00) holds exactly one row describing the module itself.
//!
//! ## ECMA-335 Reference
//!
//! Corresponds to ECMA-335 §II.22.30 `Module` table structure.

use crate::{
    file::io::{write_le_at, write_le_at_dyn},
    metadata::tables::{RowWritable, TableInfo},
    Result,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Raw `Module` row with heap indexes.
pub struct ModuleRow {
    /// Generation, reserved and always 0
    pub generation: u16,

    /// Offset of the module name in `#Strings`
    pub name: u32,

    /// 1-based `#GUID` index of the module version id
    pub mvid: u32,

    /// 1-based `#GUID` index of the edit-and-continue id
    pub encid: u32,

    /// 1-based `#GUID` index of the edit-and-continue base id
    pub encbaseid: u32,
}

impl RowWritable for ModuleRow {
    /// The row size depends on the heap index widths:
    /// - `generation`: 2 bytes
    /// - `name`: 2 or 4 bytes
    /// - `mvid`, `encid`, `encbaseid`: 2 or 4 bytes each
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfo) -> u32 {
        u32::from(
            /* generation */ 2 +
            /* name */       sizes.str_bytes() +
            /* mvid */       sizes.guid_bytes() +
            /* encid */      sizes.guid_bytes() +
            /* encbaseid */  sizes.guid_bytes()
        )
    }

    fn row_write(&self, data: &mut [u8], offset: &mut usize, sizes: &TableInfo) -> Result<()> {
        write_le_at(data, offset, self.generation)?;
        write_le_at_dyn(data, offset, self.name, sizes.is_large_str())?;
        write_le_at_dyn(data, offset, self.mvid, sizes.is_large_guid())?;
        write_le_at_dyn(data, offset, self.encid, sizes.is_large_guid())?;
        write_le_at_dyn(data, offset, self.encbaseid, sizes.is_large_guid())?;
        Ok(())
    }
}
