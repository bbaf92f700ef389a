// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Inverted opcode index: construction, lookup, and persistence.
//!
//! The builder flattens the instruction → forms → encodings hierarchy into a
//! mapping from opcode byte to every encoding that uses it. One byte shared by
//! many instruction forms is the normal case, not a conflict: each encoding
//! keeps its own slot in its byte's list, in source traversal order.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::core::description::InstructionDescription;
use crate::core::error::{BuildError, LoadError, NotFound};

/// Mapping from opcode byte to the encodings that use it.
///
/// Built once, then immutable. Sharing across readers is by plain reference;
/// nothing mutates a built index.
#[derive(Debug, Clone, PartialEq)]
pub struct OpcodeIndex {
    groups: HashMap<String, Vec<Value>>,
}

impl OpcodeIndex {
    /// Build the inverted index from a description.
    ///
    /// Single linear pass over every encoding, in document order: mnemonic,
    /// then form, then encoding. Each encoding is stamped with a `name`
    /// member holding its owning mnemonic before insertion; the description
    /// itself is left untouched. Byte-identical encodings owned by different
    /// instructions stay distinct entries.
    pub fn build(description: &InstructionDescription) -> Result<Self, BuildError> {
        let mut groups: HashMap<String, Vec<Value>> = HashMap::new();

        for (mnemonic, definition) in description.instructions() {
            let forms = definition
                .as_object()
                .and_then(|def| def.get("forms"))
                .and_then(Value::as_array)
                .ok_or_else(|| BuildError::MissingForms {
                    mnemonic: mnemonic.clone(),
                })?;

            for (form_index, form) in forms.iter().enumerate() {
                let encodings = form
                    .as_object()
                    .and_then(|form| form.get("encodings"))
                    .and_then(Value::as_array)
                    .ok_or_else(|| BuildError::MissingEncodings {
                        mnemonic: mnemonic.clone(),
                        form: form_index,
                    })?;

                for (encoding_index, encoding) in encodings.iter().enumerate() {
                    let fields =
                        encoding
                            .as_object()
                            .ok_or_else(|| BuildError::EncodingNotObject {
                                mnemonic: mnemonic.clone(),
                                form: form_index,
                                encoding: encoding_index,
                            })?;
                    let byte =
                        opcode_byte(fields).ok_or_else(|| BuildError::MissingOpcodeByte {
                            mnemonic: mnemonic.clone(),
                            form: form_index,
                            encoding: encoding_index,
                        })?;
                    if byte.is_empty() {
                        return Err(BuildError::EmptyOpcodeByte {
                            mnemonic: mnemonic.clone(),
                            form: form_index,
                            encoding: encoding_index,
                        });
                    }
                    // A pre-existing equal stamp is tolerated; a differing one
                    // means the upstream shape is not what this builder owns.
                    if let Some(existing) = fields.get("name") {
                        if existing.as_str() != Some(mnemonic.as_str()) {
                            return Err(BuildError::NameCollision {
                                mnemonic: mnemonic.clone(),
                                existing: render_name(existing),
                            });
                        }
                    }

                    let byte = byte.to_string();
                    let mut stamped = fields.clone();
                    stamped.insert("name".to_string(), Value::String(mnemonic.clone()));
                    groups.entry(byte).or_default().push(Value::Object(stamped));
                }
            }
        }

        Ok(Self { groups })
    }

    /// Look up every encoding indexed under `key`.
    ///
    /// Exact match on the byte representation the index was built with. A
    /// miss is a typed [`NotFound`], never an empty list: the builder only
    /// creates a group once it has an encoding for it.
    pub fn lookup(&self, key: &str) -> Result<&[Value], NotFound> {
        match self.groups.get(key) {
            Some(group) => Ok(group.as_slice()),
            None => Err(NotFound {
                key: key.to_string(),
            }),
        }
    }

    /// Number of distinct opcode bytes.
    pub fn opcode_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of indexed encodings across all groups.
    pub fn encoding_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Serialize as an object mapping opcode byte to its encoding list.
    ///
    /// Keys are emitted in sorted order so persisted output is deterministic.
    /// Within-group order is the build order.
    pub fn to_json(&self) -> Value {
        let mut keys: Vec<&String> = self.groups.keys().collect();
        keys.sort();
        let mut object = Map::new();
        for key in keys {
            object.insert(key.clone(), Value::Array(self.groups[key].clone()));
        }
        Value::Object(object)
    }

    /// Reload an index persisted by [`OpcodeIndex::to_json`].
    pub fn from_json(root: Value) -> Result<Self, BuildError> {
        let Value::Object(entries) = root else {
            return Err(BuildError::RootNotObject);
        };
        let mut groups = HashMap::with_capacity(entries.len());
        for (key, value) in entries {
            let Value::Array(group) = value else {
                return Err(BuildError::MalformedIndexEntry { key });
            };
            if group.is_empty() || !group.iter().all(Value::is_object) {
                return Err(BuildError::MalformedIndexEntry { key });
            }
            groups.insert(key, group);
        }
        Ok(Self { groups })
    }
}

/// Load a previously persisted index file.
pub fn load_index(path: &Path) -> Result<OpcodeIndex, LoadError> {
    let contents = fs::read_to_string(path)?;
    let root: Value = serde_json::from_str(&contents)?;
    Ok(OpcodeIndex::from_json(root)?)
}

fn opcode_byte(encoding: &Map<String, Value>) -> Option<&str> {
    encoding.get("opcode")?.as_object()?.get("byte")?.as_str()
}

fn render_name(value: &Value) -> String {
    match value.as_str() {
        Some(name) => name.to_string(),
        None => value.to_string(),
    }
}
