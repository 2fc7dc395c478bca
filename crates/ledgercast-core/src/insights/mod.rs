//! Insight Engine - Dashboard Findings
//!
//! Turns forecast output into short, ranked findings that dashboard cards can
//! render directly. Each insight is a small analyzer over an
//! `AnalysisContext`; the engine runs them all and orders the results by
//! severity.
//!
//! ## Core Insight Types
//!
//! - **Projected Deficit** - Forecast months with a negative balance
//! - **Growth Trend** - Declining inflow, or costs outgrowing revenue
//! - **Volatile Accounts** - Accounts with low-confidence budget suggestions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ledgercast_core::insights::{AnalysisContext, InsightEngine};
//!
//! let ctx = AnalysisContext::new(&forecast_engine, &history, 3);
//! let findings = InsightEngine::new().analyze_all(&ctx)?;
//! ```

pub mod engine;
pub mod growth_trend;
pub mod projected_deficit;
pub mod types;
pub mod volatile_accounts;

pub use engine::{AnalysisContext, Insight, InsightEngine, DEFAULT_HORIZON_MONTHS};
pub use growth_trend::GrowthTrendInsight;
pub use projected_deficit::ProjectedDeficitInsight;
pub use types::{
    Finding, GrowthTrendData, InsightType, ProjectedDeficitData, Severity, VolatileAccountData,
};
pub use volatile_accounts::VolatileAccountsInsight;
