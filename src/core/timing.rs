// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Opt-in timing instrumentation.
//!
//! A reporter wraps any operation and logs its duration under a caller-chosen
//! label. A disabled reporter runs the operation without measuring, so timing
//! stays out of the core paths unless explicitly requested.

use std::io::{self, Write};
use std::time::Instant;

pub struct Timings {
    writer: Option<Box<dyn Write>>,
}

impl Timings {
    /// A reporter that measures nothing.
    pub fn disabled() -> Self {
        Self { writer: None }
    }

    /// A reporter that logs named durations to stderr.
    pub fn stderr() -> Self {
        Self {
            writer: Some(Box::new(io::stderr())),
        }
    }

    /// A reporter that logs named durations to an arbitrary writer.
    pub fn to_writer(writer: Box<dyn Write>) -> Self {
        Self {
            writer: Some(writer),
        }
    }

    /// Run `operation`, reporting its duration under `label`.
    pub fn observe<T>(&mut self, label: &str, operation: impl FnOnce() -> T) -> T {
        let Some(writer) = &mut self.writer else {
            return operation();
        };
        let start = Instant::now();
        let value = operation();
        let _ = writeln!(writer, "{}", report_line(label, start.elapsed().as_secs_f64()));
        value
    }
}

fn report_line(label: &str, seconds: f64) -> String {
    format!("{label}: {seconds:.4}s")
}
