//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{MonthKey, Scenario};

/// Types of insights that can be generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// Projected months that end with a negative balance
    ProjectedDeficit,
    /// Inflow declining, or costs outgrowing revenue
    GrowthTrend,
    /// Accounts too erratic to budget confidently
    VolatileAccounts,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::ProjectedDeficit => "projected_deficit",
            InsightType::GrowthTrend => "growth_trend",
            InsightType::VolatileAccounts => "volatile_accounts",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity level of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational - no action needed
    Info,
    /// Worth attention but not urgent
    Attention,
    /// Should be addressed soon
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Attention => "attention",
            Severity::Warning => "warning",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Info => 1,
            Severity::Attention => 2,
            Severity::Warning => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A finding produced by an insight analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Type of insight that generated this finding
    pub insight_type: InsightType,
    /// Unique key for deduplication (e.g., "deficit:realistic:052024")
    pub key: String,
    /// How urgent/important this finding is
    pub severity: Severity,
    /// Short title for the finding (e.g., "Projected Deficit")
    pub title: String,
    /// One-line summary
    pub summary: String,
    /// Optional longer explanation with details
    pub detail: Option<String>,
    /// Insight-specific structured data
    pub data: serde_json::Value,
    /// Last month this finding speaks about (e.g., end of the forecast horizon)
    pub valid_through: Option<MonthKey>,
}

impl Finding {
    pub fn new(
        insight_type: InsightType,
        key: impl Into<String>,
        severity: Severity,
        title: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            insight_type,
            key: key.into(),
            severity,
            title: title.into(),
            summary: summary.into(),
            detail: None,
            data: serde_json::Value::Null,
            valid_through: None,
        }
    }

    /// Add optional detail text
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add structured data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// Set the last month this finding applies to
    pub fn valid_through(mut self, month: MonthKey) -> Self {
        self.valid_through = Some(month);
        self
    }
}

/// Data for projected deficit insight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectedDeficitData {
    pub scenario: Scenario,
    pub deficit_months: Vec<MonthKey>,
    pub worst_month: MonthKey,
    pub worst_balance: f64,
}

/// Data for growth trend insight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthTrendData {
    pub inflow_growth: f64,
    pub outflow_growth: f64,
    pub threshold: f64,
}

/// Data for volatile account insight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolatileAccountData {
    pub account_id: String,
    pub coefficient_of_variation: f64,
    pub mean_amount: f64,
    pub min_amount: f64,
    pub max_amount: f64,
    pub suggested_amount: f64,
}
