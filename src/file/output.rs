//! Memory-mapped output file with cleanup on failure.
//!
//! This module provides the [`crate::file::output::Output`] type used to persist an encoded
//! artifact. The encoders know the exact size of their output before writing anything, so
//! the file is created at its final size, mapped, filled and flushed. An [`Output`] that is
//! dropped without [`Output::finalize`] removes its file again, which guarantees that an
//! aborted run never leaves a file behind that looks like a valid artifact.
//!
//! # Usage Examples
//!
//! ```rust,ignore
//! use configmeta::file::output::Output;
//!
//! let mut output = Output::create("runtimeconfig.bin", 9)?;
//! output.write_at(0, &[0x02, 0x01, 0x61, 0x01, 0x31, 0x01, 0x62, 0x01, 0x32])?;
//! output.finalize()?;
//! # Ok::<(), configmeta::Error>(())
//! ```
//!
//! # Thread Safety
//!
//! [`Output`] owns the file mapping exclusively; it is meant to be created, written and
//! finalized by a single caller.

use std::path::{Path, PathBuf};

use memmap2::{MmapMut, MmapOptions};

use crate::{Error, Result};

/// A memory-mapped output file that is removed unless it is finalized.
///
/// Zero-sized outputs are supported without a mapping, since an empty file cannot be mapped
/// on every platform.
pub struct Output {
    /// The memory mapping of the target file, `None` for an empty file
    mmap: Option<MmapMut>,

    /// The target path
    target_path: PathBuf,

    /// Whether the file has been finalized
    finalized: bool,
}

impl Output {
    /// Creates the target file with the given size and maps it into memory.
    ///
    /// # Arguments
    ///
    /// * `target_path` - The path where the file should be created
    /// * `size` - The total size of the file to create
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutputFailed`] if the file cannot be created, resized or mapped.
    pub fn create<P: AsRef<Path>>(target_path: P, size: u64) -> Result<Self> {
        let target_path = target_path.as_ref().to_path_buf();

        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&target_path)
            .map_err(|e| Error::OutputFailed {
                message: format!("Failed to create {}: {e}", target_path.display()),
            })?;

        let mut output = Self {
            mmap: None,
            target_path,
            finalized: false,
        };

        file.set_len(size).map_err(|e| Error::OutputFailed {
            message: format!("Failed to set file size: {e}"),
        })?;

        if size > 0 {
            let mmap = unsafe {
                MmapOptions::new()
                    .map_mut(&file)
                    .map_err(|e| Error::OutputFailed {
                        message: format!("Failed to create memory mapping: {e}"),
                    })?
            };
            output.mmap = Some(mmap);
        }

        Ok(output)
    }

    /// Writes data at a specific offset in the file.
    ///
    /// # Arguments
    /// * `offset` - Byte offset where to write the data
    /// * `data` - Byte slice to write to the file
    ///
    /// # Errors
    /// Returns [`crate::Error::OutputFailed`] if the write would exceed the file size.
    pub fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<()> {
        let size = self.size();
        let end = offset.checked_add(data.len() as u64);
        match (end, self.mmap.as_mut()) {
            (Some(end), Some(mmap)) if end <= size => {
                let start = usize::try_from(offset).map_err(|_| Error::OutputFailed {
                    message: format!("Offset {offset} too large for target architecture"),
                })?;
                mmap[start..start + data.len()].copy_from_slice(data);
                Ok(())
            }
            (Some(end), None) if data.is_empty() && end == 0 => Ok(()),
            _ => Err(Error::OutputFailed {
                message: format!(
                    "Write would exceed file size: offset={}, len={}, file_size={}",
                    offset,
                    data.len(),
                    size
                ),
            }),
        }
    }

    /// Gets the total size of the file.
    pub fn size(&self) -> u64 {
        self.mmap.as_ref().map_or(0, |mmap| mmap.len() as u64)
    }

    /// Flushes the mapping and marks the file as complete.
    ///
    /// After this call the file stays at the target path when the [`Output`] is dropped.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutputFailed`] if flushing the mapping fails.
    pub fn finalize(mut self) -> Result<()> {
        if let Some(mmap) = self.mmap.as_ref() {
            mmap.flush().map_err(|e| Error::OutputFailed {
                message: format!("Failed to flush memory mapping: {e}"),
            })?;
        }

        self.finalized = true;
        Ok(())
    }

    /// Gets the path the file is written to.
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }
}

impl Drop for Output {
    fn drop(&mut self) {
        if !self.finalized {
            // Release the mapping before removing the incomplete file
            self.mmap = None;
            let _ = std::fs::remove_file(&self.target_path);
        }
    }
}
