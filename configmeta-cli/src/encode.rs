use std::path::Path;

use anyhow::Context;
use configmeta::{encode_to_file, ConfigMapping, EncoderConfig};
use serde::Serialize;

use crate::{
    app::{Cli, GlobalOptions},
    output::print_output,
};

#[derive(Debug, Serialize)]
pub struct EncodeSummary {
    pub input: String,
    pub output: String,
    pub format: configmeta::Format,
    pub properties: usize,
    pub bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_version: Option<String>,
}

/// Load the properties of `input` with context for the error report.
pub fn load_mapping(input: &Path) -> anyhow::Result<ConfigMapping> {
    ConfigMapping::from_path(input)
        .with_context(|| format!("failed to load configuration: {}", input.display()))
}

pub fn config_from_cli(cli: &Cli) -> EncoderConfig {
    EncoderConfig::new()
        .with_format(cli.format)
        .with_module_name(cli.module_name.as_str())
        .with_version(cli.metadata_version.as_str())
}

pub fn run(cli: &Cli, opts: &GlobalOptions) -> anyhow::Result<()> {
    let mapping = load_mapping(&cli.input)?;
    let config = config_from_cli(cli);

    let bytes = encode_to_file(&mapping, &config, &cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    log::info!(
        "encoded {} properties from {}",
        mapping.len(),
        cli.input.display()
    );

    let metadata = config.format == configmeta::Format::MetadataRoot;
    let summary = EncodeSummary {
        input: cli.input.display().to_string(),
        output: cli.output.display().to_string(),
        format: config.format,
        properties: mapping.len(),
        bytes,
        module_name: metadata.then(|| config.module_name.clone()),
        metadata_version: metadata.then(|| config.version.clone()),
    };

    print_output(&summary, opts, |s| {
        println!(
            "{} -> {} ({}, {} properties, {} bytes)",
            s.input, s.output, s.format, s.properties, s.bytes
        );
    })
}
