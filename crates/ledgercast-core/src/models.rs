//! Data models for Ledgercast
//!
//! Inputs (`MonthlyAggregate`, `History`) come from the external data layer and
//! are never mutated. Everything else in here is derived per computation and
//! handed to presentation code as plain data.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// =============================================================================
// Month keys
// =============================================================================

/// A calendar month, written `MMYYYY` (e.g. `"042024"` for April 2024)
///
/// Field order gives chronological `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidData(format!(
                "Month out of range: {} (expected 1-12)",
                month
            )));
        }
        if !(0..=9999).contains(&year) {
            return Err(Error::InvalidData(format!(
                "Year out of range: {} (expected 0000-9999)",
                year
            )));
        }
        Ok(Self { year, month })
    }

    /// Month containing the given date
    pub fn from_date(date: NaiveDate) -> Result<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Calendar month index, 1..=12
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following calendar month, `None` past December 9999
    pub fn next(&self) -> Option<Self> {
        if self.month == 12 {
            Self::new(self.year + 1, 1).ok()
        } else {
            Some(Self {
                year: self.year,
                month: self.month + 1,
            })
        }
    }

    /// Signed number of months from `self` to `other` (negative if `other` is earlier)
    pub fn months_until(&self, other: MonthKey) -> i64 {
        (other.year as i64 - self.year as i64) * 12 + (other.month as i64 - self.month as i64)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:04}", self.month, self.year)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidData(format!(
                "Invalid month key: '{}' (expected MMYYYY)",
                s
            )));
        }
        let month: u32 = s[..2]
            .parse()
            .map_err(|_| Error::InvalidData(format!("Invalid month in key '{}'", s)))?;
        let year: i32 = s[2..]
            .parse()
            .map_err(|_| Error::InvalidData(format!("Invalid year in key '{}'", s)))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

// =============================================================================
// Input data
// =============================================================================

/// Financial inflows/outflows for one calendar month
///
/// Field aliases accept the camelCase shape produced by the data layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    #[serde(alias = "monthKey")]
    pub month_key: MonthKey,
    #[serde(alias = "totalIn")]
    pub total_in: f64,
    #[serde(alias = "totalOut")]
    pub total_out: f64,
    #[serde(default, alias = "byAccount")]
    pub by_account: BTreeMap<String, f64>,
}

impl MonthlyAggregate {
    pub fn new(month_key: MonthKey, total_in: f64, total_out: f64) -> Self {
        Self {
            month_key,
            total_in,
            total_out,
            by_account: BTreeMap::new(),
        }
    }

    /// Builder-style account amount
    pub fn with_account(mut self, account_id: impl Into<String>, amount: f64) -> Self {
        self.by_account.insert(account_id.into(), amount);
        self
    }

    pub fn net(&self) -> f64 {
        self.total_in - self.total_out
    }

    fn validate(&self) -> Result<()> {
        for (label, value) in [("total_in", self.total_in), ("total_out", self.total_out)] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidData(format!(
                    "{} for {} must be a finite non-negative amount, got {}",
                    label, self.month_key, value
                )));
            }
        }
        for (account, amount) in &self.by_account {
            if account.trim().is_empty() {
                return Err(Error::InvalidData(format!(
                    "Blank account id in {}",
                    self.month_key
                )));
            }
            if !amount.is_finite() {
                return Err(Error::InvalidData(format!(
                    "Amount for account '{}' in {} is not finite",
                    account, self.month_key
                )));
            }
        }
        Ok(())
    }
}

/// Chronologically ordered monthly aggregates with unique month keys
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MonthlyAggregate>", into = "Vec<MonthlyAggregate>")]
pub struct History {
    months: Vec<MonthlyAggregate>,
}

impl History {
    /// Validate and sort aggregates into a history
    ///
    /// Duplicate month keys are rejected rather than merged.
    pub fn new(mut months: Vec<MonthlyAggregate>) -> Result<Self> {
        for aggregate in &months {
            aggregate.validate()?;
        }

        months.sort_by_key(|m| m.month_key);

        if let Some(pair) = months.windows(2).find(|w| w[0].month_key == w[1].month_key) {
            return Err(Error::InvalidArgument(format!(
                "Duplicate month in history: {}",
                pair[0].month_key
            )));
        }

        Ok(Self { months })
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn months(&self) -> &[MonthlyAggregate] {
        &self.months
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MonthlyAggregate> {
        self.months.iter()
    }

    pub fn first(&self) -> Option<&MonthlyAggregate> {
        self.months.first()
    }

    pub fn last(&self) -> Option<&MonthlyAggregate> {
        self.months.last()
    }

    /// Values of `metric` in chronological order, skipping months where it is absent
    pub fn series(&self, metric: &Metric) -> Vec<(MonthKey, f64)> {
        self.months
            .iter()
            .filter_map(|m| metric.value(m).map(|v| (m.month_key, v)))
            .collect()
    }

    /// Months strictly before `month`
    pub fn before(&self, month: MonthKey) -> History {
        History {
            months: self
                .months
                .iter()
                .filter(|m| m.month_key < month)
                .cloned()
                .collect(),
        }
    }

    /// Every account id that appears anywhere in the history
    pub fn account_ids(&self) -> BTreeSet<String> {
        self.months
            .iter()
            .flat_map(|m| m.by_account.keys().cloned())
            .collect()
    }
}

impl TryFrom<Vec<MonthlyAggregate>> for History {
    type Error = Error;

    fn try_from(months: Vec<MonthlyAggregate>) -> Result<Self> {
        History::new(months)
    }
}

impl From<History> for Vec<MonthlyAggregate> {
    fn from(history: History) -> Self {
        history.months
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a MonthlyAggregate;
    type IntoIter = std::slice::Iter<'a, MonthlyAggregate>;

    fn into_iter(self) -> Self::IntoIter {
        self.months.iter()
    }
}

// =============================================================================
// Metrics
// =============================================================================

/// Which series of a history to analyse
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Metric {
    /// `total_in`
    Inflow,
    /// `total_out`
    Outflow,
    /// `total_in - total_out`
    Net,
    /// `by_account[id]`, absent months are skipped
    Account(String),
}

impl Metric {
    /// Extract this metric from one aggregate
    pub fn value(&self, aggregate: &MonthlyAggregate) -> Option<f64> {
        match self {
            Metric::Inflow => Some(aggregate.total_in),
            Metric::Outflow => Some(aggregate.total_out),
            Metric::Net => Some(aggregate.net()),
            Metric::Account(id) => aggregate.by_account.get(id).copied(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Inflow => write!(f, "in"),
            Metric::Outflow => write!(f, "out"),
            Metric::Net => write!(f, "net"),
            Metric::Account(id) => write!(f, "account:{}", id),
        }
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(id) = s.strip_prefix("account:") {
            if id.is_empty() {
                return Err(Error::InvalidArgument(
                    "Account metric needs an id (account:<id>)".into(),
                ));
            }
            return Ok(Metric::Account(id.to_string()));
        }
        match s.to_lowercase().as_str() {
            "in" | "inflow" => Ok(Metric::Inflow),
            "out" | "outflow" => Ok(Metric::Outflow),
            "net" => Ok(Metric::Net),
            _ => Err(Error::InvalidArgument(format!(
                "Unknown metric: {} (valid: in, out, net, account:<id>)",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Metric {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Metric> for String {
    fn from(metric: Metric) -> Self {
        metric.to_string()
    }
}

// =============================================================================
// Scenarios
// =============================================================================

/// Multiplicative adjustment applied to a base projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Pessimistic,
    Realistic,
    Optimistic,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::Pessimistic,
        Scenario::Realistic,
        Scenario::Optimistic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Pessimistic => "pessimistic",
            Scenario::Realistic => "realistic",
            Scenario::Optimistic => "optimistic",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidArgument("Scenario identifier is empty".into()));
        }
        match s.to_lowercase().as_str() {
            "pessimistic" => Ok(Scenario::Pessimistic),
            "realistic" => Ok(Scenario::Realistic),
            "optimistic" => Ok(Scenario::Optimistic),
            _ => Err(Error::InvalidArgument(format!(
                "Unknown scenario: {} (valid: pessimistic, realistic, optimistic)",
                s
            ))),
        }
    }
}

// =============================================================================
// Derived results
// =============================================================================

/// Average month-over-month change of a metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthEstimate {
    pub rate_per_month: f64,
    /// Intervals that contributed (zero-base intervals are skipped)
    pub intervals_used: usize,
    pub insufficient_data: bool,
}

impl GrowthEstimate {
    pub fn insufficient() -> Self {
        Self {
            rate_per_month: 0.0,
            intervals_used: 0,
            insufficient_data: true,
        }
    }
}

/// Growth rate plus seasonality for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendEstimate {
    pub metric: Metric,
    pub growth_rate_per_month: f64,
    pub insufficient_data: bool,
    /// Month index (1..=12) to factor; absent months are 1.0
    pub seasonality_factor: BTreeMap<u32, f64>,
}

/// One projected month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub month_key: MonthKey,
    pub expected_in: f64,
    pub expected_out: f64,
    pub expected_balance: f64,
    pub scenario: Scenario,
}

/// Projections for every scenario over the same horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub pessimistic: Vec<Projection>,
    pub realistic: Vec<Projection>,
    pub optimistic: Vec<Projection>,
}

impl ScenarioSet {
    pub fn get(&self, scenario: Scenario) -> &[Projection] {
        match scenario {
            Scenario::Pessimistic => &self.pessimistic,
            Scenario::Realistic => &self.realistic,
            Scenario::Optimistic => &self.optimistic,
        }
    }
}

/// Confidence in a budget suggestion, from the coefficient of variation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Suggested budget amount for one account in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSuggestion {
    pub account_id: String,
    pub target_month: MonthKey,
    pub suggested_amount: f64,
    pub confidence: Confidence,
    pub basis_months: usize,
    pub mean_amount: f64,
    pub min_amount: f64,
    pub max_amount: f64,
    pub coefficient_of_variation: f64,
}

/// Outcome of a budget-line suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BudgetLine {
    Suggested(BudgetSuggestion),
    Unavailable {
        account_id: String,
        basis_months: usize,
        reason: String,
    },
}

impl BudgetLine {
    pub fn is_available(&self) -> bool {
        matches!(self, BudgetLine::Suggested(_))
    }

    pub fn suggestion(&self) -> Option<&BudgetSuggestion> {
        match self {
            BudgetLine::Suggested(s) => Some(s),
            BudgetLine::Unavailable { .. } => None,
        }
    }

    pub fn account_id(&self) -> &str {
        match self {
            BudgetLine::Suggested(s) => &s.account_id,
            BudgetLine::Unavailable { account_id, .. } => account_id,
        }
    }
}
