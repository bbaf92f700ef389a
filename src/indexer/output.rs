// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Index persistence.

use std::fs;
use std::io;
use std::path::Path;

use crate::core::index::OpcodeIndex;

/// Write the inverted index as pretty-printed JSON with a trailing newline.
pub(super) fn emit_index_file(path: &Path, index: &OpcodeIndex) -> io::Result<()> {
    let mut serialized =
        serde_json::to_string_pretty(&index.to_json()).map_err(io::Error::other)?;
    serialized.push('\n');
    fs::write(path, serialized)
}
