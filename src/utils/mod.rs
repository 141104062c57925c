//! Encoding helpers shared by the blob and metadata writers.

mod compressed;
mod math;

pub use compressed::{compressed_uint_size, write_compressed_uint_at, COMPRESSED_UINT_MAX};
pub use math::{align_to, align_to_4_bytes, to_u32};
