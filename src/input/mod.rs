//! Input side of the encoders: the ordered configuration mapping and its JSON loader.

mod json;
mod mapping;

pub use json::CONFIG_PROPERTIES;
pub use mapping::ConfigMapping;
