//! Growth Trend Insight
//!
//! Looks at month-over-month growth of both sides of the ledger:
//! - Inflow shrinking faster than the configured decline threshold
//! - Outflow growing faster than inflow

use crate::error::Result;
use crate::models::Metric;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, GrowthTrendData, InsightType, Severity};

/// Insight that reports worrying growth trends
pub struct GrowthTrendInsight;

impl GrowthTrendInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GrowthTrendInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for GrowthTrendInsight {
    fn id(&self) -> InsightType {
        InsightType::GrowthTrend
    }

    fn name(&self) -> &'static str {
        "Growth Trend"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let inflow = ctx.engine.growth_rate(ctx.history, &Metric::Inflow);
        let outflow = ctx.engine.growth_rate(ctx.history, &Metric::Outflow);

        if inflow.insufficient_data {
            return Ok(vec![]);
        }

        let threshold = ctx.engine.config().decline_threshold;
        let data = serde_json::to_value(GrowthTrendData {
            inflow_growth: inflow.rate_per_month,
            outflow_growth: outflow.rate_per_month,
            threshold,
        })?;

        let mut findings = Vec::new();

        if inflow.rate_per_month < -threshold {
            findings.push(
                Finding::new(
                    InsightType::GrowthTrend,
                    "growth:inflow_decline",
                    Severity::Attention,
                    "Inflow Declining",
                    format!(
                        "Inflow is shrinking {:.1}% per month on average",
                        -inflow.rate_per_month * 100.0
                    ),
                )
                .with_detail(format!(
                    "Measured over {} month-over-month intervals",
                    inflow.intervals_used
                ))
                .with_data(data.clone()),
            );
        }

        if !outflow.insufficient_data
            && outflow.rate_per_month > 0.0
            && outflow.rate_per_month > inflow.rate_per_month
        {
            findings.push(
                Finding::new(
                    InsightType::GrowthTrend,
                    "growth:costs_outpacing",
                    Severity::Info,
                    "Costs Outpacing Revenue",
                    format!(
                        "Outflow grows {:.1}% per month vs {:.1}% for inflow",
                        outflow.rate_per_month * 100.0,
                        inflow.rate_per_month * 100.0
                    ),
                )
                .with_data(data),
            );
        }

        Ok(findings)
    }
}
