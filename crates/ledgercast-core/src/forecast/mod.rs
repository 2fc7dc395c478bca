//! Forecast Engine - trend, seasonality, projections and budget suggestions
//!
//! Every computation here is a pure function over an already-fetched
//! `History`. Nothing performs I/O or keeps state between calls, so the same
//! input always yields bit-identical output.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ledgercast_core::forecast::ForecastEngine;
//! use ledgercast_core::models::Scenario;
//!
//! let engine = ForecastEngine::new();
//! let projections = engine.project(&history, 3, Scenario::Realistic)?;
//! ```

pub mod budget;
pub mod engine;
pub mod projection;
pub mod seasonality;
pub mod stats;
pub mod trend;

pub use budget::{classify_confidence, INSUFFICIENT_HISTORY, MIN_BASIS_MONTHS};
pub use engine::ForecastEngine;
pub use projection::ProjectionModel;
pub use stats::SeriesStats;
