//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (load_engine, open_history, output mode)
//! - `forecast` - Trend and projection commands
//! - `budget` - Budget-line suggestions
//! - `reports` - Summary and insight reports
//! - `config` - Effective configuration display

pub mod budget;
pub mod config;
pub mod core;
pub mod forecast;
pub mod reports;

// Re-export command functions for main.rs
pub use budget::*;
pub use config::*;
pub use core::*;
pub use forecast::*;
pub use reports::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
