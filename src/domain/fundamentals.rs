//! Fundamental quality screens: profitability, profit trajectory, leverage,
//! dividend yield.
//!
//! All provider failures are absorbed here into rejection reasons; a batch
//! scan skips uncertain candidates instead of aborting.

use crate::domain::error::FetchError;
use crate::domain::price::PriceSeries;
use crate::ports::fundamentals_port::FundamentalsPort;
use tracing::debug;

/// Quarters of net-profit history the trajectory check requires.
pub const PROFIT_QUARTERS: usize = 4;

/// Pass thresholds for the fundamental screens.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenThresholds {
    pub min_roe_pct: f64,
    pub max_debt_to_asset_pct: f64,
    pub min_dividend_yield_pct: f64,
}

impl Default for ScreenThresholds {
    fn default() -> Self {
        Self {
            min_roe_pct: 10.0,
            max_debt_to_asset_pct: 20.0,
            min_dividend_yield_pct: 3.0,
        }
    }
}

/// Why a candidate failed a fundamental screen.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScreenReject {
    #[error("missing ROE")]
    MissingRoe,

    #[error("ROE {roe:.1}% below minimum {min:.1}%")]
    LowRoe { roe: f64, min: f64 },

    #[error("only {quarters} quarterly profit figures, need 4")]
    ShortProfitHistory { quarters: usize },

    #[error("profits neither improving quarter over quarter nor turning positive")]
    WeakProfitTrend,

    #[error("missing debt-to-asset ratio")]
    MissingDebtRatio,

    #[error("debt-to-asset ratio {ratio:.1}% above maximum {max:.1}%")]
    HighDebt { ratio: f64, max: f64 },

    #[error("no dividends paid since {min_year}")]
    NoRecentDividends { min_year: i32 },

    #[error("no price available to compute dividend yield")]
    NoPriceForYield,

    #[error("dividend yield {yield_pct:.2}% below minimum {min:.2}%")]
    LowDividendYield { yield_pct: f64, min: f64 },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Profitability and profit-trajectory screen.
///
/// ROE must meet the floor, and the four most-recent quarterly profits
/// (most recent first) must either improve across every adjacent pair or
/// show a loss-to-profit turnaround between the oldest and newest quarter.
pub fn check_growth(
    provider: &dyn FundamentalsPort,
    code: &str,
    thresholds: &ScreenThresholds,
) -> Result<(), ScreenReject> {
    let indicators = provider.financial_indicators(code)?;
    let roe = indicators.roe_pct.ok_or(ScreenReject::MissingRoe)?;
    if roe < thresholds.min_roe_pct {
        return Err(ScreenReject::LowRoe {
            roe,
            min: thresholds.min_roe_pct,
        });
    }

    let profits = provider.quarterly_profits(code)?;
    if profits.len() < PROFIT_QUARTERS {
        return Err(ScreenReject::ShortProfitHistory {
            quarters: profits.len(),
        });
    }
    let profits = &profits[..PROFIT_QUARTERS];

    let improving = profits.windows(2).all(|pair| pair[0] <= pair[1]);
    let turnaround = profits[PROFIT_QUARTERS - 1] < 0.0 && profits[0] > 0.0;
    if !(improving || turnaround) {
        debug!(code, ?profits, "profit trajectory rejected");
        return Err(ScreenReject::WeakProfitTrend);
    }

    Ok(())
}

/// Leverage and dividend-yield screen.
///
/// `min_dividend_year` bounds the payout window: dividends from that year
/// onward count toward the trailing yield. Yield is payouts divided by the
/// live quote, falling back to the last close of `series`.
pub fn check_ratios(
    provider: &dyn FundamentalsPort,
    code: &str,
    series: &PriceSeries,
    min_dividend_year: i32,
    thresholds: &ScreenThresholds,
) -> Result<(), ScreenReject> {
    let indicators = provider.financial_indicators(code)?;
    let ratio = indicators
        .debt_to_asset_pct
        .ok_or(ScreenReject::MissingDebtRatio)?;
    if ratio > thresholds.max_debt_to_asset_pct {
        return Err(ScreenReject::HighDebt {
            ratio,
            max: thresholds.max_debt_to_asset_pct,
        });
    }

    let dividends = provider.dividend_history(code)?;
    let total: f64 = dividends
        .iter()
        .filter(|d| d.year >= min_dividend_year)
        .map(|d| d.amount_paid)
        .sum();
    if dividends.iter().all(|d| d.year < min_dividend_year) {
        return Err(ScreenReject::NoRecentDividends {
            min_year: min_dividend_year,
        });
    }

    let price = provider
        .latest_quote(code)
        .or_else(|| series.last_close())
        .ok_or(ScreenReject::NoPriceForYield)?;
    let yield_pct = total / price * 100.0;
    if yield_pct < thresholds.min_dividend_yield_pct {
        debug!(code, yield_pct, "dividend yield rejected");
        return Err(ScreenReject::LowDividendYield {
            yield_pct,
            min: thresholds.min_dividend_yield_pct,
        });
    }

    Ok(())
}
