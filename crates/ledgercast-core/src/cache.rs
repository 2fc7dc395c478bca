//! Memoization for forecast results
//!
//! The engine is stateless; callers that re-render on every selector change
//! can wrap it in a `ForecastCache`. Entries are keyed by a SHA-256
//! fingerprint of the serialized history plus the call parameters, so a
//! changed history never hits a stale entry. Invalidation is explicit via
//! `clear()`. Errors are never cached.

use std::collections::HashMap;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::Result;
use crate::forecast::ForecastEngine;
use crate::models::{BudgetLine, History, MonthKey, Projection, Scenario};

/// Content fingerprint of a history (hex SHA-256 of its JSON form)
pub fn fingerprint(history: &History) -> Result<String> {
    let bytes = serde_json::to_vec(history)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// Caller-owned memo table in front of a `ForecastEngine`
#[derive(Debug, Default)]
pub struct ForecastCache {
    engine: ForecastEngine,
    projections: HashMap<String, Vec<Projection>>,
    budget_lines: HashMap<String, BudgetLine>,
    hits: u64,
    misses: u64,
}

impl ForecastCache {
    pub fn new(engine: ForecastEngine) -> Self {
        Self {
            engine,
            ..Default::default()
        }
    }

    pub fn engine(&self) -> &ForecastEngine {
        &self.engine
    }

    /// Memoized `ForecastEngine::project`
    pub fn project(
        &mut self,
        history: &History,
        months_ahead: u32,
        scenario: Scenario,
    ) -> Result<Vec<Projection>> {
        let key = format!("{}:{}:{}", fingerprint(history)?, months_ahead, scenario);

        if let Some(cached) = self.projections.get(&key) {
            self.hits += 1;
            debug!(key = %key, "Projection cache hit");
            return Ok(cached.clone());
        }

        self.misses += 1;
        debug!(key = %key, "Projection cache miss");
        let projections = self.engine.project(history, months_ahead, scenario)?;
        self.projections.insert(key, projections.clone());
        Ok(projections)
    }

    /// Memoized `ForecastEngine::suggest_budget_line`
    pub fn suggest_budget_line(
        &mut self,
        history: &History,
        account_id: &str,
        target_month: MonthKey,
    ) -> Result<BudgetLine> {
        let key = format!(
            "{}:{}:{}",
            fingerprint(history)?,
            account_id,
            target_month
        );

        if let Some(cached) = self.budget_lines.get(&key) {
            self.hits += 1;
            debug!(key = %key, "Budget cache hit");
            return Ok(cached.clone());
        }

        self.misses += 1;
        debug!(key = %key, "Budget cache miss");
        let line = self
            .engine
            .suggest_budget_line(history, account_id, target_month)?;
        self.budget_lines.insert(key, line.clone());
        Ok(line)
    }

    /// Drop every memoized entry
    pub fn clear(&mut self) {
        self.projections.clear();
        self.budget_lines.clear();
    }

    pub fn len(&self) -> usize {
        self.projections.len() + self.budget_lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
