//! untar CLI - Command-line utility for hardened tar.gz extraction.

mod cli;
mod error;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use std::env;
use std::io;
use untar_core::ExtractOptions;
use untar_core::Extractor;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let dest = match &cli.dest {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let mut options = ExtractOptions::new().with_archive_root(cli.archive_root.as_str());
    if let Some(replace) = cli.replace_override() {
        options = options.with_replace_executables(replace);
    }

    let result = if cli.reads_stdin() {
        log::debug!("reading archive from stdin");
        Extractor::new(options).run(io::stdin().lock(), &dest)
    } else {
        untar_core::extract_archive(&cli.archive, &dest, &options)
    };
    result.map_err(|e| error::convert_extraction_error(e, &cli.archive))?;

    if !cli.quiet {
        println!("Extraction complete: {}", dest.display());
    }

    Ok(())
}
