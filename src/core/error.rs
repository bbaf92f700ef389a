// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Error types for description loading and index construction.

use std::fmt;
use std::io;

/// Error returned when a description or persisted index does not have the
/// required shape.
///
/// Fatal to the build attempt that raised it; no partial index is produced.
/// Variants carry the owning mnemonic and the form/encoding position so the
/// source document can be debugged from the message alone.
#[derive(Debug, Clone)]
pub enum BuildError {
    /// The document root is not a JSON object.
    RootNotObject,
    /// The document root has no `instructions` object.
    MissingInstructions,
    /// An instruction definition is not an object with a `forms` array.
    MissingForms { mnemonic: String },
    /// A form is not an object with an `encodings` array.
    MissingEncodings { mnemonic: String, form: usize },
    /// An encoding entry is not an object.
    EncodingNotObject {
        mnemonic: String,
        form: usize,
        encoding: usize,
    },
    /// An encoding has no `opcode` object with a string `byte` member.
    MissingOpcodeByte {
        mnemonic: String,
        form: usize,
        encoding: usize,
    },
    /// An encoding's opcode byte is present but empty.
    EmptyOpcodeByte {
        mnemonic: String,
        form: usize,
        encoding: usize,
    },
    /// An encoding already carries a `name` member naming another instruction.
    NameCollision { mnemonic: String, existing: String },
    /// A persisted index entry is not a non-empty array of encoding objects.
    MalformedIndexEntry { key: String },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotObject => write!(f, "description root is not an object"),
            Self::MissingInstructions => {
                write!(f, "description has no 'instructions' object")
            }
            Self::MissingForms { mnemonic } => {
                write!(f, "instruction '{mnemonic}' has no 'forms' array")
            }
            Self::MissingEncodings { mnemonic, form } => {
                write!(
                    f,
                    "instruction '{mnemonic}' form {form} has no 'encodings' array"
                )
            }
            Self::EncodingNotObject {
                mnemonic,
                form,
                encoding,
            } => {
                write!(
                    f,
                    "instruction '{mnemonic}' form {form} encoding {encoding} is not an object"
                )
            }
            Self::MissingOpcodeByte {
                mnemonic,
                form,
                encoding,
            } => {
                write!(
                    f,
                    "instruction '{mnemonic}' form {form} encoding {encoding} \
                     has no 'opcode' object with a string 'byte' member"
                )
            }
            Self::EmptyOpcodeByte {
                mnemonic,
                form,
                encoding,
            } => {
                write!(
                    f,
                    "instruction '{mnemonic}' form {form} encoding {encoding} has an empty opcode byte"
                )
            }
            Self::NameCollision { mnemonic, existing } => {
                write!(
                    f,
                    "instruction '{mnemonic}' has an encoding already named '{existing}'"
                )
            }
            Self::MalformedIndexEntry { key } => {
                write!(
                    f,
                    "index entry '{key}' is not a non-empty array of encoding objects"
                )
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Error returned when reading or parsing a source document fails.
///
/// Read and parse failures are propagated unchanged; callers report the path.
#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Json(serde_json::Error),
    Malformed(BuildError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "read failed: {err}"),
            Self::Json(err) => write!(f, "JSON parse failed: {err}"),
            Self::Malformed(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<BuildError> for LoadError {
    fn from(err: BuildError) -> Self {
        Self::Malformed(err)
    }
}

/// Negative lookup outcome: the key has no entry in the index.
///
/// A normal result, not a failure of the index; every key the builder created
/// has at least one encoding, so absence is never conflated with emptiness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFound {
    pub key: String,
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no encodings indexed under opcode '{}'", self.key)
    }
}

impl std::error::Error for NotFound {}
