//! Volatile Accounts Insight
//!
//! Surfaces accounts whose next-month budget suggestion came out with low
//! confidence, so whoever sets the budget knows to pad or review them.

use crate::error::Result;
use crate::models::Confidence;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightType, Severity, VolatileAccountData};

/// Insight that lists accounts too erratic to budget confidently
pub struct VolatileAccountsInsight;

impl VolatileAccountsInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VolatileAccountsInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for VolatileAccountsInsight {
    fn id(&self) -> InsightType {
        InsightType::VolatileAccounts
    }

    fn name(&self) -> &'static str {
        "Volatile Accounts"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let target = match ctx.next_month() {
            Some(month) => month,
            None => return Ok(vec![]),
        };

        let mut findings = Vec::new();

        for line in ctx.engine.suggest_all_budget_lines(ctx.history, target)? {
            let suggestion = match line.suggestion() {
                Some(s) if s.confidence == Confidence::Low => s,
                _ => continue,
            };

            let data = VolatileAccountData {
                account_id: suggestion.account_id.clone(),
                coefficient_of_variation: suggestion.coefficient_of_variation,
                mean_amount: suggestion.mean_amount,
                min_amount: suggestion.min_amount,
                max_amount: suggestion.max_amount,
                suggested_amount: suggestion.suggested_amount,
            };

            findings.push(
                Finding::new(
                    InsightType::VolatileAccounts,
                    format!("volatile:{}", suggestion.account_id),
                    Severity::Info,
                    "Volatile Account",
                    format!(
                        "'{}' ranged from {:.0} to {:.0} over {} months",
                        suggestion.account_id,
                        suggestion.min_amount,
                        suggestion.max_amount,
                        suggestion.basis_months
                    ),
                )
                .with_detail(format!(
                    "Coefficient of variation {:.2}; the {} suggestion of {:.0} is low confidence",
                    suggestion.coefficient_of_variation, target, suggestion.suggested_amount
                ))
                .with_data(serde_json::to_value(&data)?)
                .valid_through(target),
            );
        }

        Ok(findings)
    }
}
