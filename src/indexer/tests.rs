// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use serde_json::{json, Value};

use super::cli::Cli;
use super::{run_with_cli, RunError};
use crate::core::index::load_index;

fn create_temp_dir(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join(format!("test-{label}-{}-{nanos}", process::id()));
    fs::create_dir_all(&dir).expect("Create temp dir");
    dir
}

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).expect("Write test file");
}

fn sample_description_text() -> String {
    json!({
        "instructions": {
            "MOV": {
                "forms": [
                    { "encodings": [
                        { "opcode": { "byte": "89" }, "operands": ["r/m32", "r32"] },
                        { "opcode": { "byte": "8b" }, "operands": ["r32", "r/m32"] },
                    ] }
                ]
            },
            "ADD": {
                "forms": [
                    { "encodings": [{ "opcode": { "byte": "89" } }] }
                ]
            }
        }
    })
    .to_string()
}

fn parse(args: &[&str]) -> Cli {
    Cli::parse_from(std::iter::once("opIndex").chain(args.iter().copied()))
}

#[test]
fn run_writes_the_inverted_index_file() {
    let dir = create_temp_dir("index-write");
    let input = dir.join("x86_64.json");
    let output = dir.join("x86_64_fmt.json");
    write_file(&input, &sample_description_text());

    let cli = parse(&[
        input.to_str().expect("input path"),
        "-o",
        output.to_str().expect("output path"),
        "-q",
    ]);
    run_with_cli(&cli).expect("run");

    let written = fs::read_to_string(&output).expect("Read index file");
    assert!(written.ends_with('\n'));
    let root: Value = serde_json::from_str(&written).expect("index json");
    let keys: Vec<&str> = root
        .as_object()
        .expect("index object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, ["89", "8b"]);
    assert_eq!(root["89"][0]["name"], "MOV");
    assert_eq!(root["89"][1]["name"], "ADD");
    assert_eq!(root["8b"][0]["name"], "MOV");
}

#[test]
fn written_index_reloads_for_serving() {
    let dir = create_temp_dir("index-roundtrip");
    let input = dir.join("x86_64.json");
    let output = dir.join("x86_64_fmt.json");
    write_file(&input, &sample_description_text());

    let cli = parse(&[
        input.to_str().expect("input path"),
        "-o",
        output.to_str().expect("output path"),
        "-q",
    ]);
    run_with_cli(&cli).expect("run");

    let index = load_index(&output).expect("reload index");
    assert_eq!(index.opcode_count(), 2);
    assert_eq!(index.encoding_count(), 3);
    assert_eq!(index.lookup("89").expect("hit").len(), 2);
    assert!(index.lookup("ff").is_err());
}

#[test]
fn run_with_prebuilt_index_skips_the_build() {
    let dir = create_temp_dir("index-prebuilt");
    let prebuilt = dir.join("fmt.json");
    write_file(
        &prebuilt,
        &json!({ "90": [{ "opcode": { "byte": "90" }, "name": "NOP" }] }).to_string(),
    );

    let cli = parse(&[
        "--from-index",
        prebuilt.to_str().expect("prebuilt path"),
        "-k",
        "90",
        "-q",
    ]);
    run_with_cli(&cli).expect("run");
}

#[test]
fn missing_input_file_reports_the_path() {
    let dir = create_temp_dir("index-missing-file");
    let input = dir.join("nonexistent.json");

    let cli = parse(&[input.to_str().expect("input path"), "--serve"]);
    let err = run_with_cli(&cli).expect_err("missing file");
    assert!(matches!(err, RunError::Load { .. }));
    assert!(err.to_string().contains("nonexistent.json"));
}

#[test]
fn malformed_description_names_the_mnemonic() {
    let dir = create_temp_dir("index-malformed");
    let input = dir.join("bad.json");
    write_file(
        &input,
        &json!({
            "instructions": {
                "IMUL": { "forms": [{ "encodings": [{ "opcode": {} }] }] }
            }
        })
        .to_string(),
    );

    let cli = parse(&[input.to_str().expect("input path"), "--serve"]);
    let err = run_with_cli(&cli).expect_err("malformed description");
    assert!(err.to_string().contains("IMUL"));
}

#[test]
fn no_partial_index_is_written_on_build_failure() {
    let dir = create_temp_dir("index-no-partial");
    let input = dir.join("bad.json");
    let output = dir.join("fmt.json");
    write_file(
        &input,
        &json!({
            "instructions": {
                "MOV": { "forms": [{ "encodings": [{ "opcode": { "byte": "89" } }] }] },
                "BAD": { "forms": [{ "encodings": [{ "opcode": {} }] }] }
            }
        })
        .to_string(),
    );

    let cli = parse(&[
        input.to_str().expect("input path"),
        "-o",
        output.to_str().expect("output path"),
    ]);
    run_with_cli(&cli).expect_err("malformed description");
    assert!(!output.exists());
}

#[test]
fn usage_errors_surface_before_any_io() {
    let cli = parse(&["--serve"]);
    let err = run_with_cli(&cli).expect_err("usage error");
    assert!(matches!(err, RunError::Usage(_)));
}
