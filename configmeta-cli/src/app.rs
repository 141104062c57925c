use std::path::PathBuf;

use clap::Parser;
use configmeta::{metadata::DEFAULT_METADATA_VERSION, Format};

/// configmeta - encode runtimeconfig.json properties as a blob or an ECMA-335 metadata root
#[derive(Debug, Parser)]
#[command(name = "configmeta", version, about, long_about = None)]
pub struct Cli {
    /// Path to the runtimeconfig.json document.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Path of the artifact to write.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Output format: blob or metadata-root.
    #[arg(short, long, default_value_t = Format::Blob)]
    pub format: Format,

    /// Name stored in the Module row (metadata-root only).
    #[arg(long, value_name = "NAME", default_value = "")]
    pub module_name: String,

    /// Version string of the metadata root header (metadata-root only).
    #[arg(long, value_name = "VERSION", default_value = DEFAULT_METADATA_VERSION)]
    pub metadata_version: String,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options controlling diagnostics and reporting.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit a JSON summary instead of human-readable text.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long)]
    pub verbose: bool,
}
