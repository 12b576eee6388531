// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kira validate` — runs §4.8 graph checks over the whole vault and reports.

use clap::Args;
use kira_core::{EntityType, SystemClock, UuidIdGen};
use kira_storage::{EntityFilter, VaultStore};

use crate::envelope::{self, Trace};
use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct ValidateArgs {
    /// Near-duplicate title similarity threshold (0.0-1.0)
    #[arg(long)]
    pub similarity_threshold: Option<f64>,

    /// Exclude entities of this type (task, note, event, project, rollup)
    /// from the orphan and duplicate checks (repeatable, §4.8 ignore lists)
    #[arg(long = "ignore-type")]
    pub ignore_types: Vec<String>,

    /// Exclude entities living under this vault folder (tasks, notes,
    /// events, projects, journal) from the orphan and duplicate checks
    /// (repeatable, §4.8 ignore lists)
    #[arg(long = "ignore-folder")]
    pub ignore_folders: Vec<String>,
}

pub fn handle(
    args: ValidateArgs,
    vault_path: &std::path::Path,
    format: OutputFormat,
    trace: &Trace,
) -> i32 {
    let store = match VaultStore::open(vault_path, SystemClock, UuidIdGen, None) {
        Ok(s) => s,
        Err(e) => return envelope::error(format, trace, &e.to_string(), ExitError::IO_OR_LOCK),
    };

    let mut ignore_types = Vec::with_capacity(args.ignore_types.len());
    for raw in &args.ignore_types {
        match EntityType::parse(raw) {
            Some(t) => ignore_types.push(t),
            None => return envelope::error(format, trace, &format!("invalid --ignore-type: {raw}"), ExitError::VALIDATION),
        }
    }
    for folder in &args.ignore_folders {
        if EntityType::parse_folder(folder).is_none() {
            return envelope::error(format, trace, &format!("invalid --ignore-folder: {folder}"), ExitError::VALIDATION);
        }
    }

    let entities = store.list_entities(None, &EntityFilter::default());
    let links = store.link_index();

    let ignore_ids: Vec<_> = entities
        .iter()
        .filter(|e| {
            ignore_types.contains(&e.entity_type)
                || args.ignore_folders.iter().any(|f| f == e.entity_type.folder())
        })
        .map(|e| e.id.clone())
        .collect();

    let report = kira_graph::validate(&entities, &links, args.similarity_threshold, &ignore_ids);

    let data = serde_json::json!({
        "total_entities": report.total_entities,
        "total_links": report.total_links,
        "orphans": report.orphans.iter().map(|id| id.as_str()).collect::<Vec<_>>(),
        "cycles": report.cycles.iter().map(|c| c.iter().map(|id| id.as_str()).collect::<Vec<_>>()).collect::<Vec<_>>(),
        "broken_links": report.broken_links.iter().map(|l| serde_json::json!({
            "source": l.source.as_str(),
            "target": l.target.as_str(),
            "link_type": l.link_type.as_str(),
        })).collect::<Vec<_>>(),
        "duplicates": report.duplicates.iter().map(|d| serde_json::json!({
            "first": d.first.as_str(),
            "second": d.second.as_str(),
            "similarity": d.similarity,
        })).collect::<Vec<_>>(),
    });

    let has_issues = report.has_issues();
    envelope::success(format, trace, data, || {
        println!("{} entities, {} links checked", report.total_entities, report.total_links);
        if !has_issues {
            println!("no issues found");
            return;
        }
        for id in &report.orphans {
            println!("orphan: {}", id.as_str());
        }
        for cycle in &report.cycles {
            let path: Vec<&str> = cycle.iter().map(|id| id.as_str()).collect();
            println!("cycle: {}", path.join(" -> "));
        }
        for link in &report.broken_links {
            println!("broken link: {} -> {} ({})", link.source.as_str(), link.target.as_str(), link.link_type.as_str());
        }
        for dup in &report.duplicates {
            println!("possible duplicate: {} ~ {} ({:.2})", dup.first.as_str(), dup.second.as_str(), dup.similarity);
        }
    });

    if has_issues { ExitError::VALIDATION } else { 0 }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
