//! Projected Deficit Insight
//!
//! Flags forecast months that end below zero:
//! - Realistic scenario goes negative: warning
//! - Only the pessimistic scenario goes negative: attention

use crate::error::Result;
use crate::models::{Projection, Scenario};

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightType, ProjectedDeficitData, Severity};

/// Insight that warns about projected negative balances
pub struct ProjectedDeficitInsight;

impl ProjectedDeficitInsight {
    pub fn new() -> Self {
        Self
    }

    fn deficit_finding(
        scenario: Scenario,
        projections: &[Projection],
        severity: Severity,
    ) -> Result<Option<Finding>> {
        let deficits: Vec<&Projection> = projections
            .iter()
            .filter(|p| p.expected_balance < 0.0)
            .collect();

        let worst = match deficits.iter().copied().min_by(|a, b| {
            a.expected_balance
                .partial_cmp(&b.expected_balance)
                .unwrap_or(std::cmp::Ordering::Equal)
        }) {
            Some(worst) => worst,
            None => return Ok(None),
        };

        let data = ProjectedDeficitData {
            scenario,
            deficit_months: deficits.iter().map(|p| p.month_key).collect(),
            worst_month: worst.month_key,
            worst_balance: worst.expected_balance,
        };

        let first = deficits[0].month_key;
        let mut finding = Finding::new(
            InsightType::ProjectedDeficit,
            format!("deficit:{}:{}", scenario, first),
            severity,
            "Projected Deficit",
            format!(
                "{} projection runs negative in {} of {} months (worst {} at {:.0})",
                capitalize(scenario.as_str()),
                deficits.len(),
                projections.len(),
                worst.month_key,
                worst.expected_balance
            ),
        )
        .with_data(serde_json::to_value(&data)?);

        if let Some(last) = projections.last() {
            finding = finding.valid_through(last.month_key);
        }

        Ok(Some(finding))
    }
}

impl Default for ProjectedDeficitInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for ProjectedDeficitInsight {
    fn id(&self) -> InsightType {
        InsightType::ProjectedDeficit
    }

    fn name(&self) -> &'static str {
        "Projected Deficit"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        if ctx.history.is_empty() {
            return Ok(vec![]);
        }

        let set = ctx
            .engine
            .project_scenarios(ctx.history, ctx.months_ahead)?;

        // A realistic deficit supersedes the pessimistic one
        if let Some(finding) =
            Self::deficit_finding(Scenario::Realistic, &set.realistic, Severity::Warning)?
        {
            return Ok(vec![finding]);
        }

        Ok(
            Self::deficit_finding(Scenario::Pessimistic, &set.pessimistic, Severity::Attention)?
                .into_iter()
                .collect(),
        )
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::ForecastEngine;
    use crate::models::{History, MonthlyAggregate};

    fn history(rows: &[(&str, f64, f64)]) -> History {
        History::new(
            rows.iter()
                .map(|(k, i, o)| MonthlyAggregate::new(k.parse().unwrap(), *i, *o))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_realistic_deficit_is_warning() {
        let engine = ForecastEngine::new();
        let h = history(&[("012024", 10_000.0, 11_000.0), ("022024", 10_000.0, 11_000.0)]);
        let ctx = AnalysisContext::new(&engine, &h, 3);

        let findings = ProjectedDeficitInsight::new().analyze(&ctx).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].key, "deficit:realistic:032024");
        assert_eq!(findings[0].valid_through, Some("052024".parse().unwrap()));

        let data: ProjectedDeficitData = serde_json::from_value(findings[0].data.clone()).unwrap();
        assert_eq!(data.deficit_months.len(), 3);
        assert!(data.worst_balance < 0.0);
    }

    #[test]
    fn test_pessimistic_only_deficit_is_attention() {
        let engine = ForecastEngine::new();
        // Realistic balance +500; pessimistic 9000 - 10450 < 0
        let h = history(&[("012024", 10_000.0, 9_500.0), ("022024", 10_000.0, 9_500.0)]);
        let ctx = AnalysisContext::new(&engine, &h, 1);

        let findings = ProjectedDeficitInsight::new().analyze(&ctx).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Attention);
        assert!(findings[0].key.starts_with("deficit:pessimistic:"));
    }

    #[test]
    fn test_healthy_history_has_no_finding() {
        let engine = ForecastEngine::new();
        let h = history(&[("012024", 10_000.0, 5_000.0), ("022024", 10_000.0, 5_000.0)]);
        let ctx = AnalysisContext::new(&engine, &h, 3);

        assert!(ProjectedDeficitInsight::new().analyze(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("realistic"), "Realistic");
        assert_eq!(capitalize(""), "");
    }
}
