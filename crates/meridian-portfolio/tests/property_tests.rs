//! Property-based tests for portfolio invariants.
//!
//! These tests verify key mathematical properties that should always hold:
//! - Risk contributions sum to one whenever volatility is positive
//! - Normalization removes the scale of the weights
//! - Stress impact is linear in the shock
//! - Noiseless betas are recovered exactly

use approx::assert_relative_eq;
use meridian_core::{Date, Ticker};
use meridian_portfolio::contribution::euler_contributions;
use meridian_portfolio::prelude::*;
use meridian_math::prelude::{covariance_matrix, quadratic_form};
use proptest::prelude::*;

// =============================================================================
// GENERATORS
// =============================================================================

fn returns_table(columns: &[Vec<f64>]) -> ReturnsTable {
    let n = columns[0].len();
    let tickers = (0..columns.len())
        .map(|i| Ticker::new(format!("T{i}")).unwrap())
        .collect();
    let start = Date::from_ymd(2024, 1, 1).unwrap();
    let dates = (0..n).map(|i| start.add_days(i as i64)).collect();
    let rows = (0..n).map(|r| columns.iter().map(|c| c[r]).collect()).collect();
    ReturnsTable::new(tickers, dates, rows).unwrap()
}

fn columns(k: usize, n: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(-0.05f64..0.05, n), k)
}

fn weights(k: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.01f64..10.0, k)
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn risk_contributions_sum_to_one(cols in columns(4, 30), raw in weights(4)) {
        let total: f64 = raw.iter().sum();
        let w: Vec<f64> = raw.iter().map(|x| x / total).collect();

        let result = compute_risk(&returns_table(&cols), &w, &AnalyticsConfig::default()).unwrap();
        prop_assume!(result.annualized_volatility > 0.0);
        prop_assert!((result.total_fraction() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn euler_identity_holds_for_any_covariance(cols in columns(3, 20), w in weights(3)) {
        let refs: Vec<&[f64]> = cols.iter().map(Vec::as_slice).collect();
        let cov = covariance_matrix(&refs).unwrap();
        let vol = quadratic_form(&cov, &w).unwrap().sqrt();
        prop_assume!(vol > 1e-9);

        let tickers: Vec<Ticker> = (0..3).map(|i| Ticker::new(format!("T{i}")).unwrap()).collect();
        let parts = euler_contributions(&tickers, &cov, &w, vol).unwrap();
        let sum: f64 = parts.iter().map(|c| c.fraction).sum();
        prop_assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn normalization_is_scale_free(raw in weights(3), scale in 0.1f64..1000.0) {
        let pairs = |s: f64| -> Vec<(String, f64)> {
            raw.iter().enumerate().map(|(i, w)| (format!("T{i}"), w * s)).collect()
        };
        let a = Portfolio::from_pairs(&pairs(1.0)).unwrap().normalized();
        let b = Portfolio::from_pairs(&pairs(scale)).unwrap().normalized();
        for (x, y) in a.weights().iter().zip(b.weights()) {
            prop_assert!((x - y).abs() < 1e-12);
        }
        prop_assert!(a.is_normalized(1e-12));
    }

    #[test]
    fn stress_impact_is_linear_in_shock(beta in -3.0f64..3.0, shock in -50.0f64..50.0, k in -4.0f64..4.0) {
        let portfolio = Portfolio::from_pairs(&[("AAA", 1.0)]).unwrap();
        let mut table = FactorBetaTable::default();
        table.insert(Ticker::new("AAA").unwrap(), "F", beta);

        let base = compute_stress_impact(&portfolio, &table, &StressScenario::new("s").with_shock("F", shock));
        let scaled = compute_stress_impact(&portfolio, &table, &StressScenario::new("s").with_shock("F", shock * k));
        prop_assert!((scaled - k * base).abs() < 1e-9);
        prop_assert!((base - beta * shock / 100.0).abs() < 1e-12);
    }
}

#[test]
fn zero_variance_single_asset() {
    let table = returns_table(&[vec![0.0; 50]]);
    let result = compute_risk(&table, &[1.0], &AnalyticsConfig::default()).unwrap();
    assert_eq!(result.annualized_volatility, 0.0);
    assert_eq!(result.sharpe_ratio, 0.0);
    assert!(result.annualized_return.is_finite());
}

#[test]
fn single_asset_stress_example() {
    let portfolio = Portfolio::from_pairs(&[("AAA", 1.0)]).unwrap();
    let mut table = FactorBetaTable::default();
    table.insert(Ticker::new("AAA").unwrap(), "F", 1.5);
    let impact = compute_stress_impact(
        &portfolio,
        &table,
        &StressScenario::new("F down").with_shock("F", -10.0),
    );
    assert_relative_eq!(impact, -0.15, epsilon = 1e-9);
}
