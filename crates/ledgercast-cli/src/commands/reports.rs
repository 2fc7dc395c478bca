//! Report command implementations

use anyhow::{Context, Result};
use ledgercast_core::insights::{AnalysisContext, InsightEngine, Severity};
use ledgercast_core::{summarize, ForecastEngine, History};

use super::core::{print_json, Output};
use super::truncate;

/// Accounts listed in the summary table
const TOP_ACCOUNTS: usize = 10;

pub fn cmd_summary(history: &History, output: Output) -> Result<()> {
    let summary = summarize(history);

    if output == Output::Json {
        return print_json(&summary);
    }

    println!();
    println!("📊 Summary");
    if let (Some(first), Some(last)) = (history.first(), history.last()) {
        println!("   Period: {} to {}", first.month_key, last.month_key);
    }
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Months:          {}", summary.months);
    println!(
        "   Inflow:          {:.2} (avg {:.2}/mo)",
        summary.total_in, summary.average_in
    );
    println!(
        "   Outflow:         {:.2} (avg {:.2}/mo)",
        summary.total_out, summary.average_out
    );
    println!("   Net:             {:.2}", summary.net);

    match (summary.savings_rate, summary.expense_ratio) {
        (Some(savings), Some(expense)) => {
            println!("   Savings rate:    {:.1}%", savings * 100.0);
            println!("   Expense ratio:   {:.1}%", expense * 100.0);
        }
        _ => println!("   Savings rate:    n/a (no inflow)"),
    }

    if let Some(best) = summary.best_month {
        println!("   Best month:      {} ({:+.2})", best.month_key, best.net);
    }
    if let Some(worst) = summary.worst_month {
        println!("   Worst month:     {} ({:+.2})", worst.month_key, worst.net);
    }

    if !summary.top_accounts.is_empty() {
        println!();
        println!("   {:25} │ {:>12} │ {:>6}", "Account", "Total", "Months");
        println!("   ──────────────────────────┼──────────────┼────────");
        for account in summary.top_accounts.iter().take(TOP_ACCOUNTS) {
            println!(
                "   {:25} │ {:>12.2} │ {:>6}",
                truncate(&account.account_id, 25),
                account.total,
                account.months
            );
        }
    }

    Ok(())
}

pub fn cmd_insights(
    engine: &ForecastEngine,
    history: &History,
    months: u32,
    output: Output,
) -> Result<()> {
    if months == 0 {
        anyhow::bail!("--months must be at least 1");
    }

    let ctx = AnalysisContext::new(engine, history, months);
    let findings = InsightEngine::new()
        .analyze_all(&ctx)
        .context("Insight analysis failed")?;

    if output == Output::Json {
        return print_json(&findings);
    }

    if findings.is_empty() {
        println!("✅ Nothing needs attention over the next {} months.", months);
        return Ok(());
    }

    println!();
    println!("💡 Insights ({} findings)", findings.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for finding in &findings {
        let icon = match finding.severity {
            Severity::Warning => "⚠️",
            Severity::Attention => "👀",
            Severity::Info => "ℹ️",
        };
        println!();
        println!("   {} {}", icon, finding.title);
        println!("      {}", finding.summary);
        if let Some(detail) = &finding.detail {
            println!("      \x1b[2m{}\x1b[0m", detail);
        }
    }

    Ok(())
}
