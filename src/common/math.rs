//! Numeric helpers shared by the indicator calculators

/// Exponentially smoothed series seeded with the first value.
///
/// `out[0] = values[0]`, `out[i] = alpha * values[i] + (1 - alpha) * out[i - 1]`.
pub fn exponential_series(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &value in values {
        let next = match prev {
            Some(p) => alpha * value + (1.0 - alpha) * p,
            None => value,
        };
        out.push(next);
        prev = Some(next);
    }
    out
}

/// EMA series with `alpha = 2 / (period + 1)`.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    exponential_series(values, 2.0 / (period as f64 + 1.0))
}

/// Wilder smoothing, `alpha = 1 / period`.
pub fn wilder_series(values: &[f64], period: usize) -> Vec<f64> {
    exponential_series(values, 1.0 / period as f64)
}

/// Mean of the last `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sample (n - 1) standard deviation of the last `period` values.
pub fn standard_deviation(values: &[f64], period: usize) -> Option<f64> {
    if period < 2 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    let avg = window.iter().sum::<f64>() / period as f64;
    let variance = window.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (period - 1) as f64;
    Some(variance.sqrt())
}

/// True range; without a previous close it is just `high - low`.
pub fn true_range(high: f64, low: f64, prev_close: Option<f64>) -> f64 {
    let range = high - low;
    match prev_close {
        Some(pc) => range.max((high - pc).abs()).max((low - pc).abs()),
        None => range,
    }
}

/// Percentage difference of `value` against `reference`, 0 when the reference is 0.
pub fn pct_change(value: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        0.0
    } else {
        (value - reference) / reference * 100.0
    }
}
