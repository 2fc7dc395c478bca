//! Financial ratios over a history
//!
//! Totals, averages and the savings/expense ratios shown on the accounting
//! dashboard header.

use serde::{Deserialize, Serialize};

use crate::models::{History, MonthKey};

/// Net result of one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthNet {
    pub month_key: MonthKey,
    pub net: f64,
}

/// Total magnitude booked against one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountTotal {
    pub account_id: String,
    pub total: f64,
    pub months: usize,
}

/// Ratio summary of a history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub months: usize,
    pub total_in: f64,
    pub total_out: f64,
    pub net: f64,
    pub average_in: f64,
    pub average_out: f64,
    /// `net / total_in`, absent when nothing came in
    pub savings_rate: Option<f64>,
    /// `total_out / total_in`, absent when nothing came in
    pub expense_ratio: Option<f64>,
    pub best_month: Option<MonthNet>,
    pub worst_month: Option<MonthNet>,
    /// Largest first
    pub top_accounts: Vec<AccountTotal>,
}

/// Summarize a history
pub fn summarize(history: &History) -> FinancialSummary {
    let months = history.len();
    let total_in: f64 = history.iter().map(|m| m.total_in).sum();
    let total_out: f64 = history.iter().map(|m| m.total_out).sum();
    let net = total_in - total_out;

    let (average_in, average_out) = if months > 0 {
        (total_in / months as f64, total_out / months as f64)
    } else {
        (0.0, 0.0)
    };

    let (savings_rate, expense_ratio) = if total_in.abs() < f64::EPSILON {
        (None, None)
    } else {
        (Some(net / total_in), Some(total_out / total_in))
    };

    let month_nets: Vec<MonthNet> = history
        .iter()
        .map(|m| MonthNet {
            month_key: m.month_key,
            net: m.net(),
        })
        .collect();

    // Ties go to the earliest month
    let best_month = month_nets.iter().copied().fold(None, |best: Option<MonthNet>, m| {
        match best {
            Some(b) if b.net >= m.net => Some(b),
            _ => Some(m),
        }
    });
    let worst_month = month_nets.iter().copied().fold(None, |worst: Option<MonthNet>, m| {
        match worst {
            Some(w) if w.net <= m.net => Some(w),
            _ => Some(m),
        }
    });

    let mut top_accounts: Vec<AccountTotal> = history
        .account_ids()
        .into_iter()
        .map(|account_id| {
            let amounts: Vec<f64> = history
                .iter()
                .filter_map(|m| m.by_account.get(&account_id).map(|v| v.abs()))
                .collect();
            AccountTotal {
                total: amounts.iter().sum(),
                months: amounts.len(),
                account_id,
            }
        })
        .collect();

    top_accounts.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.account_id.cmp(&b.account_id))
    });

    FinancialSummary {
        months,
        total_in,
        total_out,
        net,
        average_in,
        average_out,
        savings_rate,
        expense_ratio,
        best_month,
        worst_month,
        top_accounts,
    }
}
