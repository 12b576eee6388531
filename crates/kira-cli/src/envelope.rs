// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Success/error output envelopes (spec §6 "Error envelope (JSON mode)").
//!
//! JSON mode always prints one of the two envelope shapes below. Human mode
//! prints a `❌`-prefixed one-liner on error, or the command's own formatted
//! output on success.

use serde_json::Value;

use crate::output::OutputFormat;

pub struct Trace {
    pub trace_id: String,
    pub verbose: bool,
}

/// Print a success result. `data` is the JSON-mode payload; `human` is
/// called to print whatever the command shows a person (may be empty for
/// commands that only confirm success).
pub fn success(format: OutputFormat, trace: &Trace, data: Value, human: impl FnOnce()) {
    match format {
        OutputFormat::Json => {
            let envelope = serde_json::json!({
                "status": "success",
                "trace_id": trace.trace_id,
                "data": data,
                "meta": {},
            });
            println!("{}", serde_json::to_string_pretty(&envelope).unwrap_or_default());
        }
        OutputFormat::Text => human(),
    }
}

/// Print an error and return the exit code the caller should terminate with.
pub fn error(format: OutputFormat, trace: &Trace, message: &str, exit_code: i32) -> i32 {
    match format {
        OutputFormat::Json => {
            let envelope = serde_json::json!({
                "status": "error",
                "trace_id": trace.trace_id,
                "error": message,
                "meta": {"exit_code": exit_code},
            });
            println!("{}", serde_json::to_string_pretty(&envelope).unwrap_or_default());
        }
        OutputFormat::Text => {
            eprintln!("\u{274c} {message}");
            if trace.verbose {
                eprintln!("  trace_id: {}", trace.trace_id);
            }
        }
    }
    exit_code
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;
