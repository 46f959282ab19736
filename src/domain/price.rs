//! Daily price bar and validated series representations.

use crate::domain::error::ScreenerError;
use chrono::NaiveDate;

/// One trading-day observation. Only `close` and `volume` feed the trend
/// logic; open/high/low are carried because realistic feeds include them.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: i64,
}

/// Ordered daily price history for one instrument.
///
/// Construction validates the series invariants: strictly increasing dates,
/// positive closes, non-negative volume.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    code: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(code: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self, ScreenerError> {
        let code = code.into();
        for window in bars.windows(2) {
            if window[1].date <= window[0].date {
                return Err(ScreenerError::InvalidSeries {
                    code,
                    reason: format!(
                        "dates not strictly increasing at {} -> {}",
                        window[0].date, window[1].date
                    ),
                });
            }
        }
        for bar in &bars {
            if bar.close <= 0.0 || !bar.close.is_finite() {
                return Err(ScreenerError::InvalidSeries {
                    code,
                    reason: format!("non-positive close {} on {}", bar.close, bar.date),
                });
            }
            if bar.volume < 0 {
                return Err(ScreenerError::InvalidSeries {
                    code,
                    reason: format!("negative volume {} on {}", bar.volume, bar.date),
                });
            }
        }
        Ok(Self { code, bars })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    /// A new series holding only bars dated on or before `as_of`.
    /// Never mutates `self`; derived views keep concurrent evaluations safe.
    pub fn truncate_to(&self, as_of: NaiveDate) -> PriceSeries {
        PriceSeries {
            code: self.code.clone(),
            bars: self
                .bars
                .iter()
                .filter(|b| b.date <= as_of)
                .cloned()
                .collect(),
        }
    }
}
