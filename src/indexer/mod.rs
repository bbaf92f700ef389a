// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Run orchestration: load a description, build the index, persist it,
//! answer one-shot lookups, and hand off to the interactive loop.

pub mod cli;
mod output;
#[cfg(test)]
mod tests;

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use serde_json::{json, Value};

use crate::core::description::load_description;
use crate::core::error::{BuildError, LoadError};
use crate::core::index::{load_index, OpcodeIndex};
use crate::core::timing::Timings;
use crate::serve;

use cli::{validate_cli, Cli, IndexSource, OutputFormat};

/// Error surfaced by a run, with enough context to name the failing file.
#[derive(Debug)]
pub enum RunError {
    Usage(String),
    Load { path: PathBuf, source: LoadError },
    Build(BuildError),
    Io(io::Error),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(message) => write!(f, "{message}"),
            Self::Load { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Build(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<BuildError> for RunError {
    fn from(err: BuildError) -> Self {
        Self::Build(err)
    }
}

impl From<io::Error> for RunError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

pub fn run_with_cli(cli: &Cli) -> Result<(), RunError> {
    let config = validate_cli(cli).map_err(RunError::Usage)?;
    let mut timings = if config.timings {
        Timings::stderr()
    } else {
        Timings::disabled()
    };

    let index = match &config.source {
        IndexSource::Description(path) => {
            let description = timings
                .observe("load description", || load_description(path))
                .map_err(|source| RunError::Load {
                    path: path.clone(),
                    source,
                })?;
            timings.observe("build index", || OpcodeIndex::build(&description))?
        }
        IndexSource::Prebuilt(path) => timings
            .observe("load index", || load_index(path))
            .map_err(|source| RunError::Load {
                path: path.clone(),
                source,
            })?,
    };

    if let Some(path) = &config.index_file {
        timings.observe("write index", || output::emit_index_file(path, &index))?;
        if !config.quiet {
            eprintln!(
                "{}: {} opcodes, {} encodings",
                path.display(),
                index.opcode_count(),
                index.encoding_count()
            );
        }
    }

    if !config.lookups.is_empty() {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        for key in &config.lookups {
            report_lookup(&mut writer, &index, key, config.format)?;
        }
    }

    if config.serve {
        serve::run_stdio(&index)?;
    }

    Ok(())
}

/// Print one lookup result. A miss is a normal negative result, not an error.
fn report_lookup(
    writer: &mut impl Write,
    index: &OpcodeIndex,
    key: &str,
    format: OutputFormat,
) -> io::Result<()> {
    match (index.lookup(key), format) {
        (Ok(group), OutputFormat::Json) => writeln!(
            writer,
            "{}",
            json!({ "opcode": key, "encodings": group })
        ),
        (Ok(group), OutputFormat::Text) => {
            writeln!(writer, "{}", Value::Array(group.to_vec()))
        }
        (Err(_), OutputFormat::Json) => writeln!(
            writer,
            "{}",
            json!({ "opcode": key, "error": "invalid opcode" })
        ),
        (Err(_), OutputFormat::Text) => writeln!(writer, "invalid opcode"),
    }
}
