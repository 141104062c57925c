use thiserror::Error;

macro_rules! layout_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::LayoutFailed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::LayoutFailed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The variants fall into the three failure classes of an encode run. None of them is
/// retried internally; each one aborts the run and no output file is left behind.
///
/// # Error Categories
///
/// ## Input Shape Errors
/// - [`Error::InvalidInput`] - The source document does not have the expected shape
/// - [`Error::DuplicateKey`] - A key occurs twice in the configuration mapping
/// - [`Error::Json`] - The source document is not valid JSON
///
/// ## Encoding Range Errors
/// - [`Error::CompressedRange`] - A value does not fit the compressed integer encoding
/// - [`Error::LayoutFailed`] - A heap, table or stream exceeds its addressable range
///
/// ## I/O Errors
/// - [`Error::FileError`] - Filesystem or sink I/O errors
/// - [`Error::OutputFailed`] - The output file could not be mapped or finalized
///
/// # Examples
///
/// ```rust
/// use configmeta::{ConfigMapping, Error};
///
/// match ConfigMapping::from_json_str(r#"{ "runtimeOptions": {} }"#) {
///     Ok(mapping) => println!("{} properties", mapping.len()),
///     Err(Error::InvalidInput(message)) => eprintln!("Bad input: {message}"),
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    // Input shape errors
    /// The input document is missing a required key or has the wrong shape.
    ///
    /// Raised by the JSON loader when `configProperties` is absent, is not an object,
    /// or contains a value that is not a string.
    #[error("Invalid input - {0}")]
    InvalidInput(String),

    /// A key was inserted into a [`crate::ConfigMapping`] twice.
    #[error("Duplicate configuration key - {0}")]
    DuplicateKey(String),

    /// The input document could not be parsed as JSON.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    // Encoding range errors
    /// A value exceeds the range of the ECMA-335 compressed unsigned integer encoding.
    ///
    /// Compressed integers can carry at most `0x1FFF_FFFF`. The associated value is the
    /// number that was rejected.
    #[error("Value {0:#x} exceeds the compressed integer range")]
    CompressedRange(u64),

    /// A heap, table or stream could not be laid out within its addressable range.
    ///
    /// The error includes the source location where the overflow was detected.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what overflowed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Layout failed - {file}:{line}: {message}")]
    LayoutFailed {
        /// The message to be printed for the LayoutFailed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    // I/O errors
    /// File I/O error.
    ///
    /// Wraps standard I/O errors from reading the input document or writing to the sink.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// The output file could not be created, mapped or finalized.
    #[error("Output failed - {message}")]
    OutputFailed {
        /// Description of the failing output operation
        message: String,
    },
}
