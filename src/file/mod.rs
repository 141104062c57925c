//! Output plumbing shared by both encoders.
//!
//! - [`io`] - Little-endian writers over pre-sized buffers
//! - [`output`] - Memory-mapped output file that cleans up after failed runs

pub mod io;
pub mod output;

pub use output::Output;
