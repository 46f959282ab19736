#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use reversal_screener::domain::error::FetchError;
pub use reversal_screener::domain::price::{PriceBar, PriceSeries};
use reversal_screener::ports::fundamentals_port::{
    DividendRecord, FinancialIndicators, FundamentalsPort,
};
use std::collections::HashMap;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn series_start() -> NaiveDate {
    date(2023, 1, 1)
}

/// Consecutive daily bars from `series_start`, one per (close, volume) pair.
pub fn make_series(code: &str, closes: &[f64], volumes: &[i64]) -> PriceSeries {
    assert_eq!(closes.len(), volumes.len());
    let bars = closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| PriceBar {
            date: series_start().checked_add_days(Days::new(i as u64)).unwrap(),
            open: Some(close),
            high: Some(close),
            low: Some(close),
            close,
            volume,
        })
        .collect();
    PriceSeries::new(code, bars).unwrap()
}

/// 300 bars: flat at 100 for 240 bars, a drop to 60, then a 5-bar breakout
/// to 150 with volume doubling. Passes the trend detector cleanly.
pub fn reversal_series(code: &str) -> PriceSeries {
    let mut closes = vec![100.0; 240];
    closes.extend(vec![60.0; 55]);
    closes.extend(vec![150.0; 5]);
    let mut volumes = vec![1000; 295];
    volumes.extend(vec![2000; 5]);
    make_series(code, &closes, &volumes)
}

pub fn last_bar_date(series: &PriceSeries) -> NaiveDate {
    series.bars().last().unwrap().date
}

#[derive(Default)]
pub struct MockFundamentals {
    pub indicators: HashMap<String, Result<FinancialIndicators, FetchError>>,
    pub profits: HashMap<String, Result<Vec<f64>, FetchError>>,
    pub dividends: HashMap<String, Result<Vec<DividendRecord>, FetchError>>,
    pub quotes: HashMap<String, f64>,
}

impl MockFundamentals {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider whose data passes every fundamental screen for `code`,
    /// assuming a quote near 150 against 6.0 of dividends.
    pub fn healthy(code: &str) -> Self {
        Self::new()
            .with_indicators(code, Some(15.0), Some(10.0))
            .with_profits(code, vec![-10.0, -5.0, 2.0, 8.0])
            .with_dividends(code, vec![(2023, 6.0)])
            .with_quote(code, 150.0)
    }

    pub fn with_indicators(mut self, code: &str, roe: Option<f64>, debt: Option<f64>) -> Self {
        self.indicators.insert(
            code.to_string(),
            Ok(FinancialIndicators {
                roe_pct: roe,
                debt_to_asset_pct: debt,
            }),
        );
        self
    }

    pub fn with_profits(mut self, code: &str, profits: Vec<f64>) -> Self {
        self.profits.insert(code.to_string(), Ok(profits));
        self
    }

    pub fn with_dividends(mut self, code: &str, payouts: Vec<(i32, f64)>) -> Self {
        self.dividends.insert(
            code.to_string(),
            Ok(payouts
                .into_iter()
                .map(|(year, amount_paid)| DividendRecord { year, amount_paid })
                .collect()),
        );
        self
    }

    pub fn with_quote(mut self, code: &str, price: f64) -> Self {
        self.quotes.insert(code.to_string(), price);
        self
    }

    pub fn with_indicator_error(mut self, code: &str, error: FetchError) -> Self {
        self.indicators.insert(code.to_string(), Err(error));
        self
    }

    pub fn with_dividend_error(mut self, code: &str, error: FetchError) -> Self {
        self.dividends.insert(code.to_string(), Err(error));
        self
    }
}

fn lookup<T: Clone>(
    map: &HashMap<String, Result<T, FetchError>>,
    code: &str,
) -> Result<T, FetchError> {
    map.get(code)
        .cloned()
        .unwrap_or_else(|| Err(FetchError::NotFound { code: code.into() }))
}

impl FundamentalsPort for MockFundamentals {
    fn financial_indicators(&self, code: &str) -> Result<FinancialIndicators, FetchError> {
        lookup(&self.indicators, code)
    }

    fn quarterly_profits(&self, code: &str) -> Result<Vec<f64>, FetchError> {
        lookup(&self.profits, code)
    }

    fn dividend_history(&self, code: &str) -> Result<Vec<DividendRecord>, FetchError> {
        lookup(&self.dividends, code)
    }

    fn latest_quote(&self, code: &str) -> Option<f64> {
        self.quotes.get(code).copied()
    }
}
