//! # `ModuleRef` table row
//!
//! The `ModuleRef` table (0x1A) names external modules. Here every configuration key and
//! every value becomes one row whose only column points at the text in `#Strings`.
//!
//! ## ECMA-335 Reference
//!
//! Corresponds to ECMA-335 §II.22.31 `ModuleRef` table structure.

use crate::{
    file::io::write_le_at_dyn,
    metadata::tables::{RowWritable, TableInfo},
    Result,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Raw `ModuleRef` row with its heap index.
pub struct ModuleRefRow {
    /// Offset of the referenced name in `#Strings`
    pub name: u32,
}

impl RowWritable for ModuleRefRow {
    /// The row size depends on the heap index widths:
    /// - `name`: 2 or 4 bytes
    #[rustfmt::skip]
    fn row_size(sizes: &TableInfo) -> u32 {
        u32::from(
            /* name */ sizes.str_bytes()
        )
    }

    fn row_write(&self, data: &mut [u8], offset: &mut usize, sizes: &TableInfo) -> Result<()> {
        write_le_at_dyn(data, offset, self.name, sizes.is_large_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted_short() {
        let sizes = TableInfo::new(12, 16, 0);
        let mut data = vec![0u8; 2];
        let mut offset = 0;

        ModuleRefRow { name: 0x0101 }
            .row_write(&mut data, &mut offset, &sizes)
            .unwrap();
        assert_eq!(data, [0x01, 0x01]);
    }

    #[test]
    fn crafted_long() {
        let sizes = TableInfo::new(0x2_0000, 16, 0);
        assert_eq!(ModuleRefRow::row_size(&sizes), 4);

        let mut data = vec![0u8; 4];
        let mut offset = 0;
        ModuleRefRow { name: 0x0101_0101 }
            .row_write(&mut data, &mut offset, &sizes)
            .unwrap();
        assert_eq!(data, [0x01, 0x01, 0x01, 0x01]);
    }

    #[test]
    fn short_column_overflow() {
        let sizes = TableInfo::new(12, 16, 0);
        let mut data = vec![0u8; 2];
        let mut offset = 0;

        assert!(ModuleRefRow { name: 0x1_0000 }
            .row_write(&mut data, &mut offset, &sizes)
            .is_err());
    }
}
