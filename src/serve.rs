// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Interactive opcode lookup over stdin/stdout.
//!
//! One key per line; the reply is the serialized encoding list for a hit or a
//! literal `invalid opcode` line for a miss. The loop holds no state beyond
//! the borrowed index and ends at end-of-input.

use std::io::{self, BufRead, BufReader, Write};

use serde_json::Value;

use crate::core::index::OpcodeIndex;

/// Serve lookups on stdin/stdout until end-of-input.
pub fn run_stdio(index: &OpcodeIndex) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut writer = io::BufWriter::new(stdout.lock());
    serve_loop(index, BufReader::new(stdin.lock()), &mut writer)
}

/// The request/response cycle behind [`run_stdio`], generic for testing.
pub fn serve_loop(
    index: &OpcodeIndex,
    reader: impl BufRead,
    writer: &mut impl Write,
) -> io::Result<()> {
    for line in reader.lines() {
        let line = line?;
        // Surrounding whitespace is line-protocol noise, not part of the key.
        match index.lookup(line.trim()) {
            Ok(group) => writeln!(writer, "{}", Value::Array(group.to_vec()))?,
            Err(_) => writeln!(writer, "invalid opcode")?,
        }
        writer.flush()?;
    }
    Ok(())
}
