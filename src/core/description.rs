// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Instruction-set description model.
//!
//! A description is a JSON document whose root object carries an
//! `instructions` object mapping mnemonic names to definitions; each
//! definition has a `forms` array and each form an `encodings` array. The
//! wrapper validates the top-level shape once at construction. Per-encoding
//! validation happens during index construction, where errors can name the
//! offending mnemonic and form.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::core::error::{BuildError, LoadError};

/// A validated, read-only instruction-set description.
///
/// Instruction order follows the document, and index construction borrows the
/// description, so it stays re-inspectable by the caller after a build.
#[derive(Debug, Clone)]
pub struct InstructionDescription {
    instructions: Map<String, Value>,
}

impl InstructionDescription {
    /// Wrap a parsed document, checking the top-level shape.
    pub fn from_value(root: Value) -> Result<Self, BuildError> {
        let Value::Object(mut root) = root else {
            return Err(BuildError::RootNotObject);
        };
        match root.remove("instructions") {
            Some(Value::Object(instructions)) => Ok(Self { instructions }),
            _ => Err(BuildError::MissingInstructions),
        }
    }

    /// The mnemonic → definition mapping, in document order.
    pub fn instructions(&self) -> &Map<String, Value> {
        &self.instructions
    }

    /// Number of instructions in the description.
    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }
}

/// Load and parse a description file.
pub fn load_description(path: &Path) -> Result<InstructionDescription, LoadError> {
    let contents = fs::read_to_string(path)?;
    let root: Value = serde_json::from_str(&contents)?;
    Ok(InstructionDescription::from_value(root)?)
}
