// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rollup pipeline (§4.10).
//!
//! The source publishes `rollup.requested` but never concretely aggregates
//! responses (§9 open question). Resolved here with a registered-aggregator
//! pattern: each [`RollupAggregator`] is handed a collector closure and may
//! call it zero or more times, rather than returning a value the pipeline
//! must somehow gather back off the bus.

use chrono::NaiveDate;
use kira_core::{CorrelationId, Entity, Event, EventPublisher, FrontMatter, RollupType, Value};
use std::sync::Arc;
use thiserror::Error;

use crate::vault_access::VaultAccess;
use kira_core::EntityType;
use kira_storage::VaultError;

#[derive(Debug, Clone)]
pub struct RollupContext {
    pub rollup_type: RollupType,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct RollupSection {
    pub heading: String,
    pub body: String,
}

/// A plugin that contributes zero or more sections to a rollup. Sections
/// are pushed through `collector` rather than returned, matching the
/// "collector object" resolution of the open response-aggregation question.
pub trait RollupAggregator: Send + Sync {
    fn contribute(&self, ctx: &RollupContext, collector: &mut dyn FnMut(RollupSection));
}

#[derive(Debug, Error)]
pub enum RollupError {
    #[error("vault error: {0}")]
    Vault(#[from] VaultError),
}

pub struct RollupPipeline {
    vault: Arc<dyn VaultAccess>,
    publisher: Arc<dyn EventPublisher>,
    aggregators: Vec<Arc<dyn RollupAggregator>>,
}

impl RollupPipeline {
    pub fn new(vault: Arc<dyn VaultAccess>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { vault, publisher, aggregators: Vec::new() }
    }

    pub fn register_aggregator(&mut self, aggregator: Arc<dyn RollupAggregator>) {
        self.aggregators.push(aggregator);
    }

    /// Run one rollup (§4.10): announce the request, collect sections from
    /// every aggregator, and compose a rollup entity. Empty sections still
    /// produce a valid entity with a placeholder body.
    pub fn run(
        &self,
        rollup_type: RollupType,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<Entity, RollupError> {
        let correlation_id = CorrelationId::generate();
        self.publisher.publish(Event::RollupRequested {
            rollup_type,
            period_start,
            period_end,
            correlation_id,
        });

        let ctx = RollupContext { rollup_type, period_start, period_end };
        let mut sections: Vec<RollupSection> = Vec::new();
        for aggregator in &self.aggregators {
            aggregator.contribute(&ctx, &mut |section| sections.push(section));
        }

        let body = if sections.is_empty() {
            "_No contributions for this period._".to_string()
        } else {
            sections
                .iter()
                .map(|s| format!("## {}\n\n{}", s.heading, s.body))
                .collect::<Vec<_>>()
                .join("\n\n")
        };

        let title = format!("{} rollup {} — {}", rollup_type.as_str(), period_start, period_end);

        let mut metadata = FrontMatter::new();
        metadata.insert("rollup_type".to_string(), Value::from(rollup_type.as_str()));
        metadata.insert("period_start".to_string(), Value::from(period_start.to_string()));
        metadata.insert("period_end".to_string(), Value::from(period_end.to_string()));
        metadata.insert("sections_count".to_string(), Value::Int(sections.len() as i64));

        self.vault
            .create_entity(EntityType::Rollup, metadata, body, title)
            .map_err(RollupError::from)
    }
}

#[cfg(test)]
#[path = "rollup_tests.rs"]
mod tests;
