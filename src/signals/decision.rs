//! Stop-loss / take-profit levels derived from ATR

use crate::indicators::error::IndicatorError;
use crate::models::signal::{RiskLevels, SlLimit, TradeDirection};

pub struct StopLossTakeProfit;

impl StopLossTakeProfit {
    pub const ATR_MULTIPLIER: f64 = 2.0;
    pub const MIN_SL_PCT: f64 = 1.5;
    pub const MAX_SL_PCT: f64 = 3.0;
    pub const RISK_REWARD_TP1: f64 = 1.5;
    pub const RISK_REWARD_TP2: f64 = 2.25;

    /// Stop distance of two ATRs, clamped to 1.5%-3.0% of price, with take-profits
    /// at 1.5x and 2.25x that distance.
    pub fn calculate(
        price: f64,
        atr: f64,
        direction: TradeDirection,
    ) -> Result<RiskLevels, IndicatorError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(IndicatorError::invalid_params(format!(
                "price must be positive, got {}",
                price
            )));
        }
        if !atr.is_finite() || atr < 0.0 {
            return Err(IndicatorError::invalid_params(format!(
                "atr must be non-negative, got {}",
                atr
            )));
        }

        let sl_base_pct = atr * Self::ATR_MULTIPLIER / price * 100.0;
        let (sl_pct, limit_applied) = Self::clamp_sl_pct(sl_base_pct);
        let tp1_pct = sl_pct * Self::RISK_REWARD_TP1;
        let tp2_pct = sl_pct * Self::RISK_REWARD_TP2;

        let (stop_loss, take_profit_1, take_profit_2) = match direction {
            TradeDirection::Long => (
                price * (1.0 - sl_pct / 100.0),
                price * (1.0 + tp1_pct / 100.0),
                price * (1.0 + tp2_pct / 100.0),
            ),
            TradeDirection::Short => (
                price * (1.0 + sl_pct / 100.0),
                price * (1.0 - tp1_pct / 100.0),
                price * (1.0 - tp2_pct / 100.0),
            ),
        };

        Ok(RiskLevels {
            direction,
            entry_price: price,
            stop_loss,
            take_profit_1,
            take_profit_2,
            sl_pct,
            tp1_pct,
            tp2_pct,
            sl_base_pct,
            limit_applied,
            risk_reward_tp1: Self::RISK_REWARD_TP1,
            risk_reward_tp2: Self::RISK_REWARD_TP2,
            atr_value: atr,
        })
    }

    fn clamp_sl_pct(base: f64) -> (f64, SlLimit) {
        if base > Self::MAX_SL_PCT {
            (Self::MAX_SL_PCT, SlLimit::Max)
        } else if base < Self::MIN_SL_PCT {
            (Self::MIN_SL_PCT, SlLimit::Min)
        } else {
            (base, SlLimit::None)
        }
    }
}
