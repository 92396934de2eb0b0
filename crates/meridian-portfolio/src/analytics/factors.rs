//! Factor betas by pairwise least squares.
//!
//! Each (asset, factor) pair is regressed on its own overlap of dates, so a
//! short factor history never shrinks the window used for another pair.
//! Pairs that cannot be fitted are omitted from the table and listed in
//! [`FactorBetaReport::omitted`]; absence, not zero, means "not computable".

use std::collections::{BTreeMap, HashSet};

use meridian_config::{AnalyticsConfig, FactorDefinition, FactorSet, Validate};
use meridian_core::{Date, PriceTable, Ticker};
use meridian_math::regression::linear_regression;
use serde::{Deserialize, Serialize};

use super::parallel::maybe_parallel_map;
use crate::error::PortfolioResult;
use crate::returns::{align_on_dates, column_returns};
use crate::types::AnalyticsWarning;

/// Betas keyed by asset and factor name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorBetaTable {
    factors: Vec<String>,
    betas: BTreeMap<Ticker, BTreeMap<String, f64>>,
}

impl FactorBetaTable {
    /// Creates an empty table with the given factor columns.
    #[must_use]
    pub fn new(factors: Vec<String>) -> Self {
        Self {
            factors,
            betas: BTreeMap::new(),
        }
    }

    /// Sets one beta, adding the factor column if it is new.
    pub fn insert(&mut self, asset: Ticker, factor: impl Into<String>, beta: f64) {
        let factor = factor.into();
        if !self.factors.contains(&factor) {
            self.factors.push(factor.clone());
        }
        self.betas.entry(asset).or_default().insert(factor, beta);
    }

    /// Beta of `asset` to `factor`, if it was computed.
    #[must_use]
    pub fn get(&self, asset: &Ticker, factor: &str) -> Option<f64> {
        self.betas.get(asset)?.get(factor).copied()
    }

    /// All betas of one asset.
    #[must_use]
    pub fn row(&self, asset: &Ticker) -> Option<&BTreeMap<String, f64>> {
        self.betas.get(asset)
    }

    /// Assets with at least one beta, in ticker order.
    #[must_use]
    pub fn assets(&self) -> Vec<&Ticker> {
        self.betas.keys().collect()
    }

    /// Factor columns in definition order.
    #[must_use]
    pub fn factors(&self) -> &[String] {
        &self.factors
    }

    /// Returns true if `factor` is a column of the table.
    #[must_use]
    pub fn has_factor(&self, factor: &str) -> bool {
        self.factors.iter().any(|f| f == factor)
    }

    /// Number of asset rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.betas.len()
    }

    /// Returns true if no beta was computed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.betas.is_empty()
    }
}

/// Regression detail behind one beta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorFit {
    /// Regressed asset.
    pub asset: Ticker,
    /// Factor name.
    pub factor: String,
    /// Slope of asset returns on factor returns.
    pub beta: f64,
    /// Intercept of the fit.
    pub alpha: f64,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Overlapping return dates used.
    pub observations: usize,
    /// True when the factor had no variance and beta was set to 0.
    pub degenerate: bool,
}

/// A pair left out of the beta table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OmittedPair {
    /// Asset ticker.
    pub asset: Ticker,
    /// Factor name.
    pub factor: String,
    /// Overlapping return dates that were available.
    pub observations: usize,
}

/// Output of [`compute_factor_betas`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorBetaReport {
    /// Computed betas.
    pub table: FactorBetaTable,
    /// One fit per table entry.
    pub fits: Vec<FactorFit>,
    /// Pairs with too little overlapping data.
    pub omitted: Vec<OmittedPair>,
    /// Degenerate fits.
    pub warnings: Vec<AnalyticsWarning>,
}

impl FactorBetaReport {
    /// Regression detail for one pair.
    #[must_use]
    pub fn fit(&self, asset: &Ticker, factor: &str) -> Option<&FactorFit> {
        self.fits
            .iter()
            .find(|f| &f.asset == asset && f.factor == factor)
    }
}

#[derive(Default)]
struct AssetBetas {
    fits: Vec<FactorFit>,
    omitted: Vec<OmittedPair>,
    warnings: Vec<AnalyticsWarning>,
}

/// Estimates each asset's beta to each factor.
///
/// `prices` must hold the asset and factor tickers over one window. For
/// every pair the asset's returns are regressed on the factor's returns over
/// the dates where both exist. Rules:
///
/// - Fewer than `config.min_regression_observations` shared dates, or an
///   asset/factor with no prices at all: the pair is omitted.
/// - A factor with no variance over the overlap: beta 0, plus an
///   [`AnalyticsWarning::ZeroVarianceFactor`].
///
/// Duplicate assets are estimated once. Assets are processed with
/// [`maybe_parallel_map`].
///
/// # Errors
///
/// Returns an error if the config is invalid.
pub fn compute_factor_betas(
    prices: &PriceTable,
    assets: &[Ticker],
    factors: &FactorSet,
    config: &AnalyticsConfig,
) -> PortfolioResult<FactorBetaReport> {
    config.validate_or_error()?;

    let factor_returns: Vec<(&FactorDefinition, Vec<(Date, f64)>)> = factors
        .factors()
        .iter()
        .map(|f| (f, column_returns(prices, &f.ticker).unwrap_or_default()))
        .collect();

    let mut seen = HashSet::new();
    let assets: Vec<&Ticker> = assets.iter().filter(|a| seen.insert(*a)).collect();

    let per_asset = maybe_parallel_map(&assets, config, |asset| {
        estimate_asset(prices, asset, &factor_returns, config)
    });

    let mut report = FactorBetaReport {
        table: FactorBetaTable::new(factors.names().into_iter().map(String::from).collect()),
        ..FactorBetaReport::default()
    };
    for result in per_asset {
        let result = result?;
        for fit in &result.fits {
            report.table.insert(fit.asset.clone(), fit.factor.clone(), fit.beta);
        }
        report.fits.extend(result.fits);
        report.omitted.extend(result.omitted);
        report.warnings.extend(result.warnings);
    }

    Ok(report)
}

fn estimate_asset(
    prices: &PriceTable,
    asset: &Ticker,
    factor_returns: &[(&FactorDefinition, Vec<(Date, f64)>)],
    config: &AnalyticsConfig,
) -> PortfolioResult<AssetBetas> {
    let asset_returns = column_returns(prices, asset).unwrap_or_default();
    let mut out = AssetBetas::default();

    for (factor, f_returns) in factor_returns {
        let (y, x) = align_on_dates(&asset_returns, f_returns);

        if x.len() < config.min_regression_observations {
            out.omitted.push(OmittedPair {
                asset: asset.clone(),
                factor: factor.name.clone(),
                observations: x.len(),
            });
            continue;
        }

        let fit = linear_regression(&x, &y)?;
        if fit.degenerate {
            out.warnings.push(AnalyticsWarning::ZeroVarianceFactor {
                asset: asset.clone(),
                factor: factor.name.clone(),
            });
        }

        out.fits.push(FactorFit {
            asset: asset.clone(),
            factor: factor.name.clone(),
            beta: fit.slope,
            alpha: fit.intercept,
            r_squared: fit.r_squared,
            observations: fit.observations,
            degenerate: fit.degenerate,
        });
    }

    Ok(out)
}
