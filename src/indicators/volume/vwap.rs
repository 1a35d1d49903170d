//! Session VWAP (Volume Weighted Average Price)
//!
//! The session is the UTC calendar day. Candles opened before the session start have
//! no value; inside the session the cumulative value is carried forward.

use chrono::DateTime;

use crate::models::indicators::Candle;

/// Start of the UTC day containing `ms`, in epoch milliseconds.
pub fn session_start(ms: i64) -> Option<i64> {
    let day = DateTime::from_timestamp_millis(ms)?.date_naive();
    Some(day.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

pub fn calculate_vwap_series(candles: &[Candle], session_start_ms: i64) -> Vec<Option<f64>> {
    let mut cumulative_pv = 0.0;
    let mut cumulative_volume = 0.0;
    let mut last: Option<f64> = None;

    candles
        .iter()
        .map(|candle| {
            if candle.open_time < session_start_ms {
                return None;
            }
            cumulative_pv += candle.typical_price() * candle.volume;
            cumulative_volume += candle.volume;
            if cumulative_volume > 0.0 {
                last = Some(cumulative_pv / cumulative_volume);
            }
            last
        })
        .collect()
}

/// VWAP of the session the latest candle belongs to.
///
/// `None` when the session has traded no volume yet.
pub fn calculate_session_vwap(candles: &[Candle]) -> Option<f64> {
    let last = candles.last()?;
    let start = session_start(last.open_time)?;
    calculate_vwap_series(candles, start).last().copied().flatten()
}
