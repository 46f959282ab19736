//! Simple moving average over a closing-price sequence.
//!
//! O(n) sliding-sum implementation. Warmup: first (window-1) entries are
//! `None`. The output is a side table aligned 1:1 with the input; caller
//! data is never mutated.

/// SMA of `closes` over a trailing `window`. Output length always equals
/// input length; `window > closes.len()` (or `window == 0`) yields all
/// `None`.
pub fn sma(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; closes.len()];
    }

    let mut values = Vec::with_capacity(closes.len());
    let mut sum = 0.0;

    for (i, &close) in closes.iter().enumerate() {
        sum += close;
        if i >= window {
            sum -= closes[i - window];
        }
        if i >= window - 1 {
            values.push(Some(sum / window as f64));
        } else {
            values.push(None);
        }
    }

    values
}
