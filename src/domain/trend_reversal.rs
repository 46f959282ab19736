//! Downtrend-to-breakout detector.
//!
//! Classifies a price series as "sustained downtrend, then breakout above the
//! 250-day moving average, confirmed by volume expansion". Pure function of
//! the series; moving averages are computed as side tables, never attached to
//! the input.

use crate::domain::moving_average::sma;
use crate::domain::price::PriceSeries;

/// Minimum history for evaluation. Shorter series are rejected, not errors.
pub const MIN_BARS: usize = 250;
/// Long-horizon average the breakout must clear.
pub const LONG_MA_WINDOW: usize = 250;
/// Average whose slope defines the prior trend.
pub const TREND_MA_WINDOW: usize = 60;

const RECENT_BARS: usize = 30;
const BREAKOUT_BARS: usize = 5;
const BEFORE_BARS: usize = 10;
const MIN_BELOW_BEFORE: usize = 8;
const MIN_ABOVE_AFTER: usize = 3;

/// Why a series failed the detector. Rendered verbatim into diagnostics.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RejectReason {
    #[error("only {bars} bars of history, need 250")]
    InsufficientHistory { bars: usize },

    #[error("trend lookback window incomplete")]
    ShortTrendWindow,

    #[error("60-day average was not falling ahead of the breakout window")]
    NoPriorDowntrend,

    #[error("only {below} of 10 closes below the 250-day average before the breakout")]
    NotEnoughBelowBefore { below: usize },

    #[error("only {above} of 5 closes above the 250-day average after the breakout")]
    NotEnoughAboveAfter { above: usize },

    #[error("no volume expansion through the breakout ({after:.0} vs {before:.0})")]
    NoVolumeExpansion { before: f64, after: f64 },
}

/// Run the detector. `Ok(())` means the series shows a qualifying reversal.
///
/// Sequence: prior-downtrend slope on the 60-day average over the 30 bars
/// ending 30 bars ago, then an 8-of-10 "below" count ahead of the final 5
/// bars, a 3-of-5 "above" count within them, and strictly expanding volume.
/// An undefined average never satisfies a below/above comparison.
pub fn detect(series: &PriceSeries) -> Result<(), RejectReason> {
    let n = series.len();
    if n < MIN_BARS {
        return Err(RejectReason::InsufficientHistory { bars: n });
    }

    let closes = series.closes();
    let ma_long = sma(&closes, LONG_MA_WINDOW);
    let ma_trend = sma(&closes, TREND_MA_WINDOW);

    // Prior trend: slope of MA60 between the first and last bar of the
    // window [n-60, n-30). Must be strictly negative; flat or rising fails
    // to keep sideways markets from reading as reversals.
    if n < 2 * RECENT_BARS {
        return Err(RejectReason::ShortTrendWindow);
    }
    let (first, last) = (ma_trend[n - 2 * RECENT_BARS], ma_trend[n - RECENT_BARS - 1]);
    match (first, last) {
        (Some(first), Some(last)) if last - first < 0.0 => {}
        _ => return Err(RejectReason::NoPriorDowntrend),
    }

    // Breakout split: the last 30 bars are 25 "before" + 5 "after"; counts
    // use the 10 before-bars immediately preceding the breakout.
    let after_start = n - BREAKOUT_BARS;
    let before_start = after_start - BEFORE_BARS;

    let below_before = (before_start..after_start)
        .filter(|&i| ma_long[i].is_some_and(|ma| closes[i] < ma))
        .count();
    if below_before < MIN_BELOW_BEFORE {
        return Err(RejectReason::NotEnoughBelowBefore {
            below: below_before,
        });
    }

    let above_after = (after_start..n)
        .filter(|&i| ma_long[i].is_some_and(|ma| closes[i] > ma))
        .count();
    if above_after < MIN_ABOVE_AFTER {
        return Err(RejectReason::NotEnoughAboveAfter { above: above_after });
    }

    let bars = series.bars();
    let mean_volume = |range: std::ops::Range<usize>| -> f64 {
        let len = range.len();
        bars[range].iter().map(|b| b.volume as f64).sum::<f64>() / len as f64
    };
    let volume_before = mean_volume(before_start..after_start);
    let volume_after = mean_volume(after_start..n);
    if volume_after <= volume_before {
        return Err(RejectReason::NoVolumeExpansion {
            before: volume_before,
            after: volume_after,
        });
    }

    Ok(())
}
