//! Budget suggestion command

use anyhow::{Context, Result};
use ledgercast_core::models::{BudgetLine, MonthKey};
use ledgercast_core::{ForecastEngine, History};

use super::core::{print_json, Output};
use super::truncate;

/// Month the budget is for: explicit `MMYYYY`, else the month after the last entry
pub fn resolve_target_month(history: &History, month: Option<&str>) -> Result<MonthKey> {
    match month {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("Invalid --month '{}' (use MMYYYY)", raw)),
        None => history
            .last()
            .and_then(|m| m.month_key.next())
            .context("No month follows the history, pass --month explicitly"),
    }
}

pub fn cmd_budget(
    engine: &ForecastEngine,
    history: &History,
    account: Option<&str>,
    month: Option<&str>,
    output: Output,
) -> Result<()> {
    let target = resolve_target_month(history, month)?;

    let lines = match account {
        Some(account_id) => vec![engine
            .suggest_budget_line(history, account_id, target)
            .context("Budget suggestion failed")?],
        None => engine
            .suggest_all_budget_lines(history, target)
            .context("Budget suggestion failed")?,
    };

    if output == Output::Json {
        return print_json(&lines);
    }

    println!();
    println!("💵 Budget Suggestions for {}", target);
    println!("   ─────────────────────────────────────────────────────────────");

    if lines.is_empty() {
        println!("   No accounts found in history.");
        return Ok(());
    }

    println!(
        "   {:20} │ {:>12} │ {:10} │ {:>6} │ {:>6}",
        "Account", "Suggested", "Confidence", "CV", "Months"
    );
    println!("   ─────────────────────┼──────────────┼────────────┼────────┼────────");

    for line in &lines {
        match line {
            BudgetLine::Suggested(s) => println!(
                "   {:20} │ {:>12.2} │ {:10} │ {:>6.2} │ {:>6}",
                truncate(&s.account_id, 20),
                s.suggested_amount,
                s.confidence.as_str(),
                s.coefficient_of_variation,
                s.basis_months
            ),
            BudgetLine::Unavailable {
                account_id,
                basis_months,
                reason,
            } => println!(
                "   {:20} │ {:>12} │ {:10} │ {:>6} │ {:>6}",
                truncate(account_id, 20),
                "-",
                reason,
                "-",
                basis_months
            ),
        }
    }

    Ok(())
}
