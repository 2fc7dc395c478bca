//! Test utilities for ledgercast-core
//!
//! Fixture histories shared by unit tests, integration tests and the CLI
//! test suite.

use crate::models::{History, MonthKey, MonthlyAggregate};

/// Parse a `MMYYYY` key, panicking on malformed fixtures
pub fn month(key: &str) -> MonthKey {
    key.parse()
        .unwrap_or_else(|e| panic!("bad fixture month '{}': {}", key, e))
}

/// Build a history from `(month_key, total_in, total_out)` rows
pub fn history_from_rows(rows: &[(&str, f64, f64)]) -> History {
    History::new(
        rows.iter()
            .map(|(key, total_in, total_out)| MonthlyAggregate::new(month(key), *total_in, *total_out))
            .collect(),
    )
    .unwrap_or_else(|e| panic!("bad fixture history: {}", e))
}

/// Three months of 10% inflow growth: Jan-Mar 2024
pub fn sample_history() -> History {
    history_from_rows(&[
        ("012024", 100_000.0, 60_000.0),
        ("022024", 110_000.0, 61_000.0),
        ("032024", 121_000.0, 62_000.0),
    ])
}

/// Two full years with a December peak and a flat outflow
pub fn seasonal_history() -> History {
    let mut months = Vec::new();
    for year in [2022, 2023] {
        for m in 1..=12 {
            let total_in = if m == 12 { 20_000.0 } else { 10_000.0 };
            let key = MonthKey::new(year, m).unwrap_or_else(|e| panic!("{}", e));
            months.push(MonthlyAggregate::new(key, total_in, 8_000.0));
        }
    }
    History::new(months).unwrap_or_else(|e| panic!("bad fixture history: {}", e))
}

/// Six months with one steady account, one erratic account and one
/// account that only shows up in the last month
pub fn account_history() -> History {
    let rows = [
        ("072024", 2_000.0, 150.0),
        ("082024", 2_000.0, 900.0),
        ("092024", 2_000.0, 60.0),
        ("102024", 2_000.0, 1_100.0),
        ("112024", 2_000.0, 300.0),
        ("122024", 2_000.0, 40.0),
    ];

    let mut months: Vec<MonthlyAggregate> = rows
        .iter()
        .map(|(key, rent, repairs)| {
            MonthlyAggregate::new(month(key), 12_000.0, 9_000.0)
                .with_account("rent", *rent)
                .with_account("repairs", *repairs)
        })
        .collect();

    if let Some(last) = months.last_mut() {
        last.by_account.insert("equipment".to_string(), 4_000.0);
    }

    History::new(months).unwrap_or_else(|e| panic!("bad fixture history: {}", e))
}

/// Shrinking inflow with outflow climbing past it
pub fn declining_history() -> History {
    history_from_rows(&[
        ("012024", 10_000.0, 8_000.0),
        ("022024", 9_000.0, 8_500.0),
        ("032024", 8_100.0, 9_000.0),
        ("042024", 7_290.0, 9_500.0),
    ])
}

/// Render a history as the CSV layout accepted by `import::parse_csv`
pub fn to_csv(history: &History) -> String {
    let accounts: Vec<String> = history.account_ids().into_iter().collect();

    let mut out = String::from("month_key,total_in,total_out");
    for account in &accounts {
        out.push(',');
        out.push_str(account);
    }
    out.push('\n');

    for aggregate in history {
        out.push_str(&format!(
            "{},{},{}",
            aggregate.month_key, aggregate.total_in, aggregate.total_out
        ));
        for account in &accounts {
            out.push(',');
            if let Some(amount) = aggregate.by_account.get(account) {
                out.push_str(&amount.to_string());
            }
        }
        out.push('\n');
    }

    out
}
