//! Insight Engine - runs every registered insight over one forecast context

use crate::forecast::ForecastEngine;
use crate::models::{History, MonthKey};
use crate::Result;

use super::types::{Finding, InsightType};
use super::{GrowthTrendInsight, ProjectedDeficitInsight, VolatileAccountsInsight};

/// Default forecast horizon for insights
pub const DEFAULT_HORIZON_MONTHS: u32 = 3;

/// Context provided to insight analyzers
pub struct AnalysisContext<'a> {
    /// Engine (and its config) to compute forecasts with
    pub engine: &'a ForecastEngine,
    /// History the insights speak about
    pub history: &'a History,
    /// Forecast horizon
    pub months_ahead: u32,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(engine: &'a ForecastEngine, history: &'a History, months_ahead: u32) -> Self {
        Self {
            engine,
            history,
            months_ahead,
        }
    }

    /// Month after the last history entry, if any
    pub fn next_month(&self) -> Option<MonthKey> {
        self.history.last().and_then(|m| m.month_key.next())
    }
}

/// Trait for insight analyzers
pub trait Insight: Send + Sync {
    /// Unique identifier for this insight type
    fn id(&self) -> InsightType;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Analyze data and produce findings
    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>>;
}

/// The main insight engine that orchestrates analysis
pub struct InsightEngine {
    insights: Vec<Box<dyn Insight>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create a new insight engine with built-in insight types
    pub fn new() -> Self {
        let mut engine = Self { insights: vec![] };

        engine.register(Box::new(ProjectedDeficitInsight::new()));
        engine.register(Box::new(GrowthTrendInsight::new()));
        engine.register(Box::new(VolatileAccountsInsight::new()));

        engine
    }

    /// Create an engine with no registered insights
    pub fn empty() -> Self {
        Self { insights: vec![] }
    }

    /// Register an insight analyzer
    pub fn register(&mut self, insight: Box<dyn Insight>) {
        self.insights.push(insight);
    }

    /// Run all insight analyzers and collect findings
    ///
    /// A failing analyzer is logged and skipped so one bad insight does not
    /// blank the whole dashboard.
    pub fn analyze_all(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let mut all_findings = vec![];

        for insight in &self.insights {
            match insight.analyze(ctx) {
                Ok(findings) => {
                    tracing::debug!(
                        insight = insight.id().as_str(),
                        count = findings.len(),
                        "Insight analysis complete"
                    );
                    all_findings.extend(findings);
                }
                Err(e) => {
                    tracing::warn!(
                        insight = insight.id().as_str(),
                        error = %e,
                        "Insight analysis failed"
                    );
                }
            }
        }

        // Sort by severity (highest first), then by key for a stable order
        all_findings.sort_by(|a, b| {
            b.severity
                .priority()
                .cmp(&a.severity.priority())
                .then_with(|| a.key.cmp(&b.key))
        });

        Ok(all_findings)
    }

    /// Get list of registered insight types
    pub fn insight_types(&self) -> Vec<InsightType> {
        self.insights.iter().map(|i| i.id()).collect()
    }
}
