//! Composite buy-candidate evaluation.
//!
//! Three sequential gates with strict short-circuiting: trend reversal,
//! profitability/growth, leverage/dividend. The first failing gate ends the
//! evaluation; nothing retries or backtracks.

use crate::domain::fundamentals::{self, ScreenThresholds};
use crate::domain::price::PriceSeries;
use crate::domain::trend_reversal::{self, MIN_BARS};
use crate::ports::fundamentals_port::FundamentalsPort;
use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

/// Outcome of one evaluation: pass/fail plus the rejection trail.
/// `reasons` is empty exactly when `passed` is true.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub passed: bool,
    pub reasons: Vec<String>,
}

impl EvaluationResult {
    fn pass() -> Self {
        Self {
            passed: true,
            reasons: Vec::new(),
        }
    }

    fn fail(reason: String) -> Self {
        Self {
            passed: false,
            reasons: vec![reason],
        }
    }
}

/// Evaluate one candidate against the composite strategy.
///
/// When `as_of` is given the series is truncated to bars dated on or before
/// it, making point-in-time scans reproducible. The dividend window is keyed
/// off `as_of` when present, otherwise off today's date, matching the
/// "current or immediately prior calendar year" rule.
pub fn evaluate(
    provider: &dyn FundamentalsPort,
    code: &str,
    name: &str,
    series: &PriceSeries,
    as_of: Option<NaiveDate>,
    thresholds: &ScreenThresholds,
) -> EvaluationResult {
    let truncated;
    let series = match as_of {
        Some(cutoff) => {
            truncated = series.truncate_to(cutoff);
            &truncated
        }
        None => series,
    };

    if series.len() < MIN_BARS {
        debug!(code, name, bars = series.len(), "insufficient history, skipping");
        return EvaluationResult::fail(format!(
            "only {} bars of history, need {}",
            series.len(),
            MIN_BARS
        ));
    }

    if let Err(reason) = trend_reversal::detect(series) {
        debug!(code, name, %reason, "trend gate rejected");
        return EvaluationResult::fail(reason.to_string());
    }

    if let Err(reason) = fundamentals::check_growth(provider, code, thresholds) {
        debug!(code, name, %reason, "growth gate rejected");
        return EvaluationResult::fail(reason.to_string());
    }

    let reference = as_of.unwrap_or_else(|| chrono::Local::now().date_naive());
    let min_dividend_year = reference.year() - 1;
    if let Err(reason) =
        fundamentals::check_ratios(provider, code, series, min_dividend_year, thresholds)
    {
        debug!(code, name, %reason, "ratio gate rejected");
        return EvaluationResult::fail(reason.to_string());
    }

    info!(code, name, "candidate passed all gates");
    EvaluationResult::pass()
}
