//! Diff between the persisted state of a timeframe and a fresh evaluation

use crate::models::signal::CONDITION_COUNT;
use crate::models::state::{ChangeReport, ConditionFlip, IndicatorChange, PersistedTimeframeState};

/// Relative move, in percent, for an indicator value to count as changed.
pub const SIGNIFICANT_CHANGE_PCT: f64 = 0.5;

/// Compares `new` against `old`.
///
/// No previous state means this is the first evaluation: the report is empty.
/// Indicator values whose old value is exactly 0 are never reported.
pub fn detect_changes(
    old: Option<&PersistedTimeframeState>,
    new: &PersistedTimeframeState,
) -> ChangeReport {
    let Some(old) = old else {
        return ChangeReport::default();
    };

    let mut report = ChangeReport {
        old_long_count: old.long_count,
        old_short_count: old.short_count,
        long_count_changed: old.long_count != new.long_count,
        short_count_changed: old.short_count != new.short_count,
        ..ChangeReport::default()
    };

    report.condition_changes.long = flips(&old.long_conditions, &new.long_conditions);
    report.condition_changes.short = flips(&old.short_conditions, &new.short_conditions);

    for ((name, old_value), (_, new_value)) in old
        .tracked_values()
        .into_iter()
        .zip(new.tracked_values())
    {
        if old_value == 0.0 {
            continue;
        }
        let pct_change = ((new_value - old_value) / old_value).abs() * 100.0;
        if pct_change >= SIGNIFICANT_CHANGE_PCT {
            report.indicator_changes.push(IndicatorChange {
                name: name.to_string(),
                old: old_value,
                new: new_value,
                pct_change,
            });
        }
    }

    report.has_changes = report.long_count_changed
        || report.short_count_changed
        || !report.condition_changes.long.is_empty()
        || !report.condition_changes.short.is_empty()
        || !report.indicator_changes.is_empty();
    report
}

fn flips(old: &[bool; CONDITION_COUNT], new: &[bool; CONDITION_COUNT]) -> Vec<ConditionFlip> {
    old.iter()
        .zip(new.iter())
        .enumerate()
        .filter(|(_, (o, n))| o != n)
        .map(|(index, (&old, &new))| ConditionFlip { index, old, new })
        .collect()
}
