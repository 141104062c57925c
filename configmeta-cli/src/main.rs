mod app;
mod encode;
mod output;

use clap::Parser;

use crate::app::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Show configmeta info+ on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.global.json {
        let level = if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_module("configmeta", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    encode::run(&cli, &cli.global)
}
