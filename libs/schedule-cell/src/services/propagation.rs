use std::collections::BTreeSet;

use chrono::Weekday;
use tracing::info;

use crate::models::{DateKey, ScheduleError, WeekAnchor};
use crate::services::calendar::{month_dates, week_dates};
use crate::services::slot_store::SlotStore;

/// Overwrites every target's counts and day-off flag with an independent
/// copy of `source`'s. The source itself is skipped and service times are
/// left alone. Returns how many targets were written.
pub fn copy_settings(store: &mut SlotStore, source: DateKey, targets: &BTreeSet<DateKey>) -> usize {
    let source_day = store.day(source).cloned().unwrap_or_default();

    let mut written = 0;
    for target in targets.iter().filter(|t| **t != source) {
        let day = store.day_mut(*target);
        day.slots = source_day.slots.clone();
        day.day_off = source_day.day_off;
        written += 1;
    }

    if written > 0 {
        info!("Copied settings of {} onto {} dates", source, written);
    }
    written
}

/// Dates of the week at `anchor` that fall on one of `weekdays`.
pub fn week_targets(anchor: WeekAnchor, weekdays: &[Weekday]) -> Result<BTreeSet<DateKey>, ScheduleError> {
    Ok(week_dates(anchor)?
        .into_iter()
        .filter(|day| weekdays.contains(&day.weekday))
        .map(|day| DateKey::new(day.date))
        .collect())
}

/// Every other date in `source`'s month that shares its weekday.
pub fn month_targets(source: DateKey) -> Result<BTreeSet<DateKey>, ScheduleError> {
    let weekday = source.weekday();
    Ok(month_dates(source.date())?
        .into_iter()
        .map(DateKey::new)
        .filter(|key| *key != source && key.weekday() == weekday)
        .collect())
}
