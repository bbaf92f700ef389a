// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// CLI entrypoint for opIndex.

use clap::Parser;
use serde_json::json;

use opindex::indexer::cli::{Cli, OutputFormat};
use opindex::indexer::run_with_cli;

fn main() {
    let cli = Cli::parse();
    let format = cli.format;
    if let Err(err) = run_with_cli(&cli) {
        if format == OutputFormat::Json {
            eprintln!("{}", json!({ "error": err.to_string() }));
        } else {
            eprintln!("{err}");
        }
        std::process::exit(1);
    }
}
