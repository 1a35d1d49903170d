//! Perpwatch Analyzer
//!
//! Runs one analysis pass for a symbol: the initial multi-timeframe read, an
//! incremental update against the saved state, or an entry timing read.

use std::sync::Arc;

use chrono::Utc;
use dotenvy::dotenv;
use perpwatch::config::{get_environment, AnalysisConfig, AnalysisMode};
use perpwatch::core::runtime::{AnalysisRuntime, RuntimeConfig, TimeframeAnalysis};
use perpwatch::logging;
use perpwatch::services::{JsonFileCandleSource, StateStore};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = AnalysisConfig::from_env()?;
    info!(
        environment = %get_environment(),
        symbol = %config.symbol,
        mode = ?config.mode,
        candle_dir = %config.candle_dir.display(),
        "Starting Perpwatch Analyzer"
    );

    let source = Arc::new(JsonFileCandleSource::new(config.candle_dir.clone()));
    let runtime = AnalysisRuntime::new(RuntimeConfig::from(&config), source);
    let store = StateStore::new(config.state_file.clone());
    let now = Utc::now();

    match config.mode {
        AnalysisMode::Initial => {
            let initial = runtime.run_initial(now).await?;
            for analysis in &initial.analyses {
                log_analysis(analysis);
            }
            store.save(&initial.state)?;
        }
        AnalysisMode::Update => {
            let outcome = runtime.run_update(store.load()?, now).await?;
            if outcome.is_empty() {
                warn!("nothing to update, state left untouched");
                return Ok(());
            }
            for update in &outcome.updated {
                log_analysis(&update.analysis);
                let changes = &update.changes;
                if !changes.has_changes {
                    info!(timeframe = %update.analysis.timeframe, "no significant changes");
                    continue;
                }
                if changes.long_count_changed || changes.short_count_changed {
                    info!(
                        timeframe = %update.analysis.timeframe,
                        long = %format!("{} -> {}", changes.old_long_count, update.analysis.evaluation.long.count),
                        short = %format!("{} -> {}", changes.old_short_count, update.analysis.evaluation.short.count),
                        "condition counts changed"
                    );
                }
                for change in &changes.indicator_changes {
                    info!(
                        timeframe = %update.analysis.timeframe,
                        indicator = %change.name,
                        old = change.old,
                        new = change.new,
                        pct_change = %format!("{:+.2}", change.pct_change),
                        "indicator moved"
                    );
                }
            }
            info!(update_count = outcome.state.update_count, "update complete");
            store.save(&outcome.state)?;
        }
        AnalysisMode::Timing => {
            let timing = runtime.run_entry_timing(now).await?;
            let evaluation = &timing.evaluation;
            info!(
                price = evaluation.snapshot.price,
                bias = ?evaluation.bias(),
                long_count = evaluation.long.count,
                short_count = evaluation.short.count,
                momentum = ?timing.momentum.trend,
                volume_trend = ?timing.momentum.volume_trend,
                rsi_trend = ?timing.rsi_trend,
                histogram = ?timing.histogram_magnitude,
                candle_movement_pct = %format!("{:+.2}", timing.candle_movement_pct),
                completion_pct = timing.completion.percent,
                seconds_remaining = timing.completion.seconds_remaining,
                "entry timing"
            );
        }
    }

    Ok(())
}

fn log_analysis(analysis: &TimeframeAnalysis) {
    let evaluation = &analysis.evaluation;
    let labels = &evaluation.classification;
    info!(
        timeframe = %analysis.timeframe,
        price = evaluation.snapshot.price,
        ema = %labels.ema_position,
        rsi = %labels.rsi_zone,
        bollinger = %labels.bollinger,
        macd = %labels.macd_line,
        histogram = %labels.macd_histogram,
        volume = %labels.volume,
        vwap = %labels.vwap,
        long_count = evaluation.long.count,
        short_count = evaluation.short.count,
        bias = ?evaluation.bias(),
        completion_pct = analysis.completion.percent,
        "timeframe evaluated"
    );
    if let Some(risk) = evaluation.active_risk() {
        info!(
            timeframe = %analysis.timeframe,
            direction = ?risk.direction,
            entry = risk.entry_price,
            stop_loss = risk.stop_loss,
            take_profit_1 = risk.take_profit_1,
            take_profit_2 = risk.take_profit_2,
            sl_pct = risk.sl_pct,
            limit = ?risk.limit_applied,
            "risk levels"
        );
    }
}
