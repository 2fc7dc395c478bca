//! Integration tests for ledgercast-core
//!
//! These tests exercise the full import → forecast → insight workflow.

use ledgercast_core::{
    cache::ForecastCache,
    config::parse_config,
    import::{parse_csv, parse_json},
    insights::{AnalysisContext, InsightEngine, InsightType, Severity},
    models::{BudgetLine, Confidence, Metric, Scenario},
    ratios::summarize,
    test_utils::{
        account_history, declining_history, month, sample_history, seasonal_history, to_csv,
    },
    ForecastEngine,
};

// =============================================================================
// Projection Tests
// =============================================================================

#[test]
fn test_sample_growth_and_projection() {
    let engine = ForecastEngine::new();
    let history = sample_history();

    let growth = engine.growth_rate(&history, &Metric::Inflow);
    assert!((growth.rate_per_month - 0.10).abs() < 1e-9);
    assert!(!growth.insufficient_data);

    let projections = engine.project(&history, 1, Scenario::Realistic).unwrap();
    assert_eq!(projections.len(), 1);
    assert_eq!(projections[0].month_key, month("042024"));
    assert!((projections[0].expected_in - 133_100.0).abs() < 1e-6);
}

#[test]
fn test_projection_count_and_order() {
    let engine = ForecastEngine::new();
    let history = seasonal_history();

    for n in [1, 6, 12, 25] {
        let projections = engine.project(&history, n, Scenario::Realistic).unwrap();
        assert_eq!(projections.len(), n as usize);
        assert_eq!(projections[0].month_key, month("012024"));
        for pair in projections.windows(2) {
            assert!(pair[0].month_key < pair[1].month_key);
            assert_eq!(pair[0].month_key.next(), Some(pair[1].month_key));
        }
    }
}

#[test]
fn test_scenario_ordering_holds_every_month() {
    let engine = ForecastEngine::new();

    for history in [sample_history(), seasonal_history(), declining_history()] {
        let set = engine.project_scenarios(&history, 6).unwrap();
        for i in 0..6 {
            let (p, r, o) = (&set.pessimistic[i], &set.realistic[i], &set.optimistic[i]);
            assert_eq!(p.month_key, r.month_key);
            assert!(p.expected_in <= r.expected_in && r.expected_in <= o.expected_in);
            assert!(p.expected_out >= r.expected_out && r.expected_out >= o.expected_out);
        }
    }
}

#[test]
fn test_invalid_horizon_is_rejected_before_data_checks() {
    let engine = ForecastEngine::new();
    let empty = ledgercast_core::History::default();

    assert!(engine
        .project(&empty, 0, Scenario::Realistic)
        .unwrap_err()
        .is_invalid_argument());
    assert!(engine
        .project(&empty, 1, Scenario::Realistic)
        .unwrap_err()
        .is_insufficient_data());
    assert!("".parse::<Scenario>().unwrap_err().is_invalid_argument());
}

#[test]
fn test_seasonal_peak_carries_into_projection() {
    let engine = ForecastEngine::new();
    let history = seasonal_history();

    let factors = engine.seasonality_factor(&history, &Metric::Inflow);
    assert_eq!(factors.len(), 12);
    let mean: f64 = factors.values().sum::<f64>() / 12.0;
    assert!((mean - 1.0).abs() < 1e-9);
    assert!(factors[&12] > factors[&11]);

    let projections = engine.project(&history, 12, Scenario::Realistic).unwrap();
    let november = &projections[10];
    let december = &projections[11];
    assert_eq!(december.month_key, month("122024"));
    assert!(december.expected_in > november.expected_in);
}

#[test]
fn test_forecasts_are_idempotent() {
    let engine = ForecastEngine::new();
    let history = account_history();

    let a = engine.project_scenarios(&history, 4).unwrap();
    let b = engine.project_scenarios(&history, 4).unwrap();
    assert_eq!(a, b);

    let target = month("012025");
    assert_eq!(
        engine.suggest_all_budget_lines(&history, target).unwrap(),
        engine.suggest_all_budget_lines(&history, target).unwrap()
    );
}

// =============================================================================
// Budget Tests
// =============================================================================

#[test]
fn test_budget_lines_for_all_accounts() {
    let engine = ForecastEngine::new();
    let history = account_history();

    let lines = engine
        .suggest_all_budget_lines(&history, month("012025"))
        .unwrap();
    let ids: Vec<&str> = lines.iter().map(|l| l.account_id()).collect();
    assert_eq!(ids, vec!["equipment", "rent", "repairs"]);

    match &lines[0] {
        BudgetLine::Unavailable {
            basis_months,
            reason,
            ..
        } => {
            assert_eq!(*basis_months, 1);
            assert_eq!(reason, "insufficient history");
        }
        other => panic!("expected unavailable line, got {:?}", other),
    }

    let rent = lines[1].suggestion().unwrap();
    assert_eq!(rent.confidence, Confidence::High);
    assert_eq!(rent.suggested_amount, 2_000.0);
    assert_eq!(rent.basis_months, 6);

    let repairs = lines[2].suggestion().unwrap();
    assert_eq!(repairs.confidence, Confidence::Low);
    assert!(repairs.suggested_amount >= 0.0);
}

#[test]
fn test_budget_ignores_target_and_later_months() {
    let engine = ForecastEngine::new();
    let history = account_history();

    // Only Jul-Sep count as basis for October
    let line = engine
        .suggest_budget_line(&history, "rent", month("102024"))
        .unwrap();
    assert_eq!(line.suggestion().unwrap().basis_months, 3);

    let line = engine
        .suggest_budget_line(&history, "rent", month("092024"))
        .unwrap();
    assert!(!line.is_available());
}

#[test]
fn test_single_month_budget_is_unavailable() {
    let engine = ForecastEngine::new();
    let history = ledgercast_core::History::new(vec![ledgercast_core::MonthlyAggregate::new(
        month("012024"),
        100.0,
        50.0,
    )
    .with_account("food", 20.0)])
    .unwrap();

    let line = engine
        .suggest_budget_line(&history, "food", month("022024"))
        .unwrap();
    let json = serde_json::to_value(&line).unwrap();
    assert_eq!(json["status"], "unavailable");
    assert_eq!(json["reason"], "insufficient history");
}

// =============================================================================
// Import Tests
// =============================================================================

#[test]
fn test_csv_and_json_import_agree() {
    let history = account_history();

    let from_csv = parse_csv(to_csv(&history).as_bytes()).unwrap();
    let from_json = parse_json(serde_json::to_string(&history).unwrap().as_bytes()).unwrap();

    assert_eq!(from_csv, history);
    assert_eq!(from_json, history);
}

#[test]
fn test_import_rejects_duplicate_months() {
    let csv = "month_key,total_in,total_out\n012024,1,1\n012024,2,2\n";
    assert!(parse_csv(csv.as_bytes()).is_err());
}

// =============================================================================
// Insight Tests
// =============================================================================

#[test]
fn test_declining_business_raises_findings() {
    let engine = ForecastEngine::new();
    let history = declining_history();
    let ctx = AnalysisContext::new(&engine, &history, 3);

    let findings = InsightEngine::new().analyze_all(&ctx).unwrap();
    assert!(!findings.is_empty());

    // Highest severity first
    assert_eq!(findings[0].insight_type, InsightType::ProjectedDeficit);
    assert_eq!(findings[0].severity, Severity::Warning);
    assert!(findings
        .iter()
        .any(|f| f.key == "growth:inflow_decline"));

    // Same input, same findings
    assert_eq!(findings, InsightEngine::new().analyze_all(&ctx).unwrap());
}

#[test]
fn test_healthy_business_has_no_deficit() {
    let engine = ForecastEngine::new();
    let history = sample_history();
    let ctx = AnalysisContext::new(&engine, &history, 3);

    let findings = InsightEngine::new().analyze_all(&ctx).unwrap();
    assert!(findings
        .iter()
        .all(|f| f.insight_type != InsightType::ProjectedDeficit));
}

// =============================================================================
// Config, Cache and Summary
// =============================================================================

#[test]
fn test_custom_config_changes_projection() {
    let config = parse_config(
        r#"
[scenarios.inflow]
pessimistic = 0.5
realistic = 1.0
optimistic = 1.5
"#,
    )
    .unwrap();
    let engine = ForecastEngine::with_config(config).unwrap();

    let pess = engine
        .project(&sample_history(), 1, Scenario::Pessimistic)
        .unwrap();
    assert!((pess[0].expected_in - 66_550.0).abs() < 1e-6);
}

#[test]
fn test_cache_matches_engine() {
    let engine = ForecastEngine::new();
    let history = sample_history();
    let mut cache = ForecastCache::new(engine.clone());

    let direct = engine.project(&history, 3, Scenario::Optimistic).unwrap();
    let cached = cache.project(&history, 3, Scenario::Optimistic).unwrap();
    let again = cache.project(&history, 3, Scenario::Optimistic).unwrap();

    assert_eq!(direct, cached);
    assert_eq!(cached, again);
    assert_eq!(cache.hits(), 1);
}

#[test]
fn test_summary_over_sample() {
    let summary = summarize(&sample_history());
    assert_eq!(summary.months, 3);
    assert_eq!(summary.total_in, 331_000.0);
    assert_eq!(summary.total_out, 183_000.0);
    assert_eq!(summary.best_month.unwrap().month_key, month("032024"));
}
