use crate::{metadata::tables::TableInfo, Result};

/// Trait defining the interface for serializing metadata table rows.
///
/// The size of a row depends on the negotiated heap index widths, so both methods take the
/// [`TableInfo`] of the stream being written.
pub trait RowWritable: Sized {
    /// Calculates the size in bytes of a single row for this table type.
    ///
    /// ## Arguments
    ///
    /// * `sizes` - The negotiated heap index widths
    fn row_size(sizes: &TableInfo) -> u32;

    /// Serializes a single row into `data` at `offset`, advancing the offset by
    /// [`RowWritable::row_size`] bytes.
    ///
    /// ## Errors
    ///
    /// Returns [`crate::Error::LayoutFailed`] if the buffer is too small or an index does not fit
    /// its column width.
    fn row_write(&self, data: &mut [u8], offset: &mut usize, sizes: &TableInfo) -> Result<()>;
}
