// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Command-line interface parsing and argument validation.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const LONG_ABOUT: &str = "Builds an inverted opcode index from an instruction-set description.

The description is a JSON document whose `instructions` object maps each
mnemonic to its forms and encodings. The index maps every opcode byte to the
encodings that use it, each annotated with its owning mnemonic; many encodings
sharing one byte is the expected case.
Outputs are opt-in: specify at least one of -o/--index, -k/--lookup, or
--serve. A previously written index (--from-index) can answer lookups without
rebuilding from the raw description.";

#[derive(Parser, Debug)]
#[command(
    name = "opIndex",
    version = VERSION,
    about = "Opcode-to-encodings index builder and lookup service",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    #[arg(
        value_name = "DESCRIPTION",
        long_help = "Path to the instruction-set description JSON."
    )]
    pub input: Option<PathBuf>,
    #[arg(
        long = "from-index",
        value_name = "FILE",
        conflicts_with = "input",
        long_help = "Load a previously written inverted index instead of building one from a description."
    )]
    pub from_index: Option<PathBuf>,
    #[arg(
        short = 'o',
        long = "index",
        value_name = "FILE",
        long_help = "Write the inverted index as JSON to FILE."
    )]
    pub index_file: Option<PathBuf>,
    #[arg(
        short = 'k',
        long = "lookup",
        value_name = "BYTE",
        action = ArgAction::Append,
        long_help = "Look up one opcode byte and print its encodings. May be given multiple \
                     times. A miss prints `invalid opcode` and is not an error."
    )]
    pub lookups: Vec<String>,
    #[arg(
        long = "serve",
        action = ArgAction::SetTrue,
        long_help = "Read opcode keys from stdin, one per line, and print the matching encodings \
                     until end-of-input."
    )]
    pub serve: bool,
    #[arg(
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Text,
        long_help = "Select global CLI output format. text is default; json enables machine-readable output where supported."
    )]
    pub format: OutputFormat,
    #[arg(
        short = 'q',
        long = "quiet",
        action = ArgAction::SetTrue,
        long_help = "Suppress status output for successful runs. Errors are still reported."
    )]
    pub quiet: bool,
    #[arg(
        long = "timings",
        action = ArgAction::SetTrue,
        long_help = "Report named durations for the load, build, and write phases to stderr."
    )]
    pub timings: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Where the index comes from: built from a description or reloaded from disk.
#[derive(Debug, Clone)]
pub enum IndexSource {
    Description(PathBuf),
    Prebuilt(PathBuf),
}

/// Resolved run configuration after cross-argument validation.
#[derive(Debug)]
pub struct CliConfig {
    pub source: IndexSource,
    pub index_file: Option<PathBuf>,
    pub lookups: Vec<String>,
    pub serve: bool,
    pub format: OutputFormat,
    pub quiet: bool,
    pub timings: bool,
}

pub fn validate_cli(cli: &Cli) -> Result<CliConfig, String> {
    let source = match (&cli.input, &cli.from_index) {
        (Some(path), None) => IndexSource::Description(path.clone()),
        (None, Some(path)) => IndexSource::Prebuilt(path.clone()),
        (None, None) => {
            return Err("no input: give a description path or --from-index".to_string());
        }
        (Some(_), Some(_)) => {
            return Err("give either a description path or --from-index, not both".to_string());
        }
    };

    if cli.index_file.is_none() && cli.lookups.is_empty() && !cli.serve {
        return Err(
            "no outputs requested: specify at least one of -o/--index, -k/--lookup, or --serve"
                .to_string(),
        );
    }
    if cli.index_file.is_some() && matches!(source, IndexSource::Prebuilt(_)) {
        return Err("-o/--index requires a raw description input".to_string());
    }

    Ok(CliConfig {
        source,
        index_file: cli.index_file.clone(),
        lookups: cli.lookups.clone(),
        serve: cli.serve,
        format: cli.format,
        quiet: cli.quiet,
        timings: cli.timings,
    })
}
