//! Stress scenario definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A hypothetical simultaneous move in one or more factors.
///
/// Shocks are percentages keyed by factor name: `-20.0` means the factor
/// falls by 20%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressScenario {
    /// Scenario name.
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Percentage shock per factor name.
    #[serde(default)]
    pub shocks: BTreeMap<String, f64>,
}

impl StressScenario {
    /// Creates a scenario with no shocks.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            shocks: BTreeMap::new(),
        }
    }

    /// Creates a scenario from `(factor, shock %)` pairs.
    #[must_use]
    pub fn from_shocks<S: Into<String>>(
        name: impl Into<String>,
        shocks: impl IntoIterator<Item = (S, f64)>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            shocks: shocks.into_iter().map(|(f, s)| (f.into(), s)).collect(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Adds or replaces the shock for one factor.
    #[must_use]
    pub fn with_shock(mut self, factor: impl Into<String>, shock_pct: f64) -> Self {
        self.shocks.insert(factor.into(), shock_pct);
        self
    }

    /// Shock for a factor in percent, 0 if unshocked.
    #[must_use]
    pub fn shock(&self, factor: &str) -> f64 {
        self.shocks.get(factor).copied().unwrap_or(0.0)
    }

    /// Returns true if no factor is shocked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shocks.is_empty()
    }
}

/// Predefined scenarios over the standard factor set.
///
/// Factor names match [`meridian_config::FactorSet::standard`].
pub mod standard {
    use super::StressScenario;

    /// Standard equity factor name.
    pub const EQUITY_MARKET: &str = "Equity Market";
    /// Standard rates factor name.
    pub const INTEREST_RATES: &str = "Interest Rates";
    /// Standard oil factor name.
    pub const CRUDE_OIL: &str = "Crude Oil";
    /// Standard gold factor name.
    pub const GOLD: &str = "Gold";
    /// Standard dollar factor name.
    pub const US_DOLLAR: &str = "US Dollar";

    /// Equities fall 20%.
    #[must_use]
    pub fn equity_crash() -> StressScenario {
        StressScenario::new("Equity Crash")
            .with_description("Broad equity sell-off: equity market -20%")
            .with_shock(EQUITY_MARKET, -20.0)
    }

    /// Long yields jump by a quarter of their level.
    #[must_use]
    pub fn rate_spike() -> StressScenario {
        StressScenario::new("Rate Spike")
            .with_description("10Y yield +25% of its level, equities -5%")
            .with_shock(INTEREST_RATES, 25.0)
            .with_shock(EQUITY_MARKET, -5.0)
    }

    /// Crude oil rallies 40%.
    #[must_use]
    pub fn oil_shock() -> StressScenario {
        StressScenario::new("Oil Shock")
            .with_description("Supply disruption: crude +40%, equities -7%")
            .with_shock(CRUDE_OIL, 40.0)
            .with_shock(EQUITY_MARKET, -7.0)
    }

    /// The dollar index gains 10%.
    #[must_use]
    pub fn dollar_rally() -> StressScenario {
        StressScenario::new("Dollar Rally")
            .with_description("Dollar +10%, gold -5%")
            .with_shock(US_DOLLAR, 10.0)
            .with_shock(GOLD, -5.0)
    }

    /// Rising prices with falling growth.
    #[must_use]
    pub fn stagflation() -> StressScenario {
        StressScenario::new("Stagflation")
            .with_description("Oil +30%, yields +20%, equities -15%, gold +10%")
            .with_shock(CRUDE_OIL, 30.0)
            .with_shock(INTEREST_RATES, 20.0)
            .with_shock(EQUITY_MARKET, -15.0)
            .with_shock(GOLD, 10.0)
    }

    /// Broad risk appetite.
    #[must_use]
    pub fn risk_on_rally() -> StressScenario {
        StressScenario::new("Risk-On Rally")
            .with_description("Equities +15%, yields +10%, gold -5%, dollar -3%")
            .with_shock(EQUITY_MARKET, 15.0)
            .with_shock(INTEREST_RATES, 10.0)
            .with_shock(GOLD, -5.0)
            .with_shock(US_DOLLAR, -3.0)
    }

    /// Flight to quality.
    #[must_use]
    pub fn flight_to_safety() -> StressScenario {
        StressScenario::new("Flight to Safety")
            .with_description("Equities -10%, yields -15%, gold +8%, dollar +4%")
            .with_shock(EQUITY_MARKET, -10.0)
            .with_shock(INTEREST_RATES, -15.0)
            .with_shock(GOLD, 8.0)
            .with_shock(US_DOLLAR, 4.0)
    }

    /// Returns all standard scenarios.
    #[must_use]
    pub fn all() -> Vec<StressScenario> {
        vec![
            equity_crash(),
            rate_spike(),
            oil_shock(),
            dollar_rally(),
            stagflation(),
            risk_on_rally(),
            flight_to_safety(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let s = StressScenario::new("Test")
            .with_description("desc")
            .with_shock("Gold", 5.0)
            .with_shock("Gold", 7.0);
        assert_eq!(s.shocks.len(), 1);
        assert_eq!(s.shock("Gold"), 7.0);
        assert_eq!(s.shock("Oil"), 0.0);
        assert_eq!(s.description.as_deref(), Some("desc"));
    }

    #[test]
    fn test_from_shocks() {
        let s = StressScenario::from_shocks("Crash", [("Equity Market", -20.0)]);
        assert!(!s.is_empty());
        assert_eq!(s.shock("Equity Market"), -20.0);
    }

    #[test]
    fn test_standard_scenarios_use_standard_factors() {
        let names = meridian_config::FactorSet::standard();
        for scenario in standard::all() {
            assert!(!scenario.is_empty(), "{} has no shocks", scenario.name);
            for factor in scenario.shocks.keys() {
                assert!(names.get(factor).is_some(), "unknown factor {factor}");
            }
        }
    }

    #[test]
    fn test_deserialize_minimal() {
        let s: StressScenario = serde_json::from_str(
            r#"{"name":"Custom","shocks":{"Gold":12.5}}"#,
        )
        .unwrap();
        assert_eq!(s.shock("Gold"), 12.5);
        assert!(s.description.is_none());
    }
}
