// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kira diag tail|stats` — read-only views over the structured logs and
//! audit trail written under `<vault>/logs/` and `<vault>/artifacts/audit/`
//! (§4.13 "The audit logger", "Diagnostic queries").

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde_json::Value;

use crate::envelope::{self, Trace};
use crate::exit_error::ExitError;
use crate::output::OutputFormat;

const CATEGORIES: &[&str] = &["core", "adapters", "plugins", "pipelines"];

#[derive(Args)]
pub struct DiagArgs {
    #[command(subcommand)]
    pub command: DiagCommand,
}

#[derive(Subcommand)]
pub enum DiagCommand {
    /// Print the last N log lines, optionally following new ones
    Tail {
        /// Restrict to one category (core, adapters, plugins, pipelines)
        #[arg(long)]
        category: Option<String>,
        /// Only lines whose trace id matches
        #[arg(long)]
        trace_id: Option<String>,
        #[arg(long, default_value_t = 50)]
        lines: usize,
        #[arg(long)]
        follow: bool,
    },
    /// Summarize line counts per category and level
    Stats {
        #[arg(long)]
        category: Option<String>,
    },
}

pub fn handle(command: DiagCommand, vault_path: &Path, format: OutputFormat, trace: &Trace) -> i32 {
    match command {
        DiagCommand::Tail { category, trace_id, lines, follow } => {
            tail(vault_path, category, trace_id, lines, follow, format, trace)
        }
        DiagCommand::Stats { category } => stats(vault_path, category, format, trace),
    }
}

fn log_dirs(vault_path: &Path, category: &Option<String>) -> Vec<(&'static str, PathBuf)> {
    CATEGORIES
        .iter()
        .filter(|c| category.as_deref().is_none_or(|want| want == **c))
        .map(|c| (*c, vault_path.join("logs").join(c).join(format!("{c}.jsonl"))))
        .collect()
}

fn read_lines(path: &Path) -> Vec<Value> {
    let Ok(contents) = fs::read_to_string(path) else {
        return Vec::new();
    };
    contents
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect()
}

fn matches_trace(line: &Value, trace_id: &Option<String>) -> bool {
    let Some(want) = trace_id else { return true };
    line.get("fields")
        .and_then(|f| f.get("trace_id"))
        .and_then(Value::as_str)
        .is_some_and(|got| got == want)
}

fn tail(
    vault_path: &Path,
    category: Option<String>,
    trace_id: Option<String>,
    lines: usize,
    follow: bool,
    format: OutputFormat,
    trace: &Trace,
) -> i32 {
    let dirs = log_dirs(vault_path, &category);
    if dirs.is_empty() {
        return envelope::error(format, trace, "unknown log category", ExitError::VALIDATION);
    }

    let mut entries: Vec<Value> = dirs.iter().flat_map(|(_, path)| read_lines(path)).collect();
    entries.retain(|l| matches_trace(l, &trace_id));
    let start = entries.len().saturating_sub(lines);
    let entries = entries.split_off(start);

    let data = Value::Array(entries.clone());
    envelope::success(format, trace, data, || {
        for entry in &entries {
            println!("{entry}");
        }
    });

    if follow {
        if let Some((_, path)) = dirs.first() {
            let result = tokio::runtime::Runtime::new()
                .map_err(anyhow::Error::from)
                .and_then(|rt| rt.block_on(crate::output::tail_file(path)));
            if let Err(e) = result {
                return envelope::error(format, trace, &e.to_string(), ExitError::IO_OR_LOCK);
            }
        }
    }
    0
}

fn stats(vault_path: &Path, category: Option<String>, format: OutputFormat, trace: &Trace) -> i32 {
    let dirs = log_dirs(vault_path, &category);
    if dirs.is_empty() {
        return envelope::error(format, trace, "unknown log category", ExitError::VALIDATION);
    }

    let mut per_category: BTreeMap<&str, BTreeMap<String, usize>> = BTreeMap::new();
    for (name, path) in &dirs {
        let mut levels: BTreeMap<String, usize> = BTreeMap::new();
        for entry in read_lines(path) {
            let level = entry.get("level").and_then(Value::as_str).unwrap_or("unknown").to_string();
            *levels.entry(level).or_insert(0) += 1;
        }
        per_category.insert(name, levels);
    }

    let data = serde_json::to_value(&per_category).unwrap_or(Value::Null);
    envelope::success(format, trace, data, || {
        for (category, levels) in &per_category {
            let total: usize = levels.values().sum();
            println!("{category}: {total} lines");
            for (level, count) in levels {
                println!("  {level}: {count}");
            }
        }
    });
    0
}

#[cfg(test)]
#[path = "diag_tests.rs"]
mod tests;
