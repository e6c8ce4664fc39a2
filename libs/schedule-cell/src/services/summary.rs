use chrono::{Datelike, NaiveDate};

use crate::models::{
    DateKey, DaySummary, MonthTotals, MonthView, ScheduleError, WeekAnchor, WeekTotals, WeekView,
};
use crate::services::calendar::{days_in_month, month_weeks, week_dates};
use crate::services::slot_store::SlotStore;

pub fn day_summary(store: &SlotStore, date: NaiveDate, is_current_month: bool) -> DaySummary {
    let key = DateKey::new(date);
    DaySummary {
        date: key,
        weekday: date.weekday(),
        is_current_month,
        raw_total: store.day_total(key),
        total_slots: store.available_total(key),
        day_off: store.is_day_off(key),
        service_time: store.service_time(key).map(str::to_string),
    }
}

pub fn week_view(store: &SlotStore, anchor: WeekAnchor) -> Result<WeekView, ScheduleError> {
    let days: Vec<DaySummary> = week_dates(anchor)?
        .into_iter()
        .map(|day| day_summary(store, day.date, true))
        .collect();

    let totals = WeekTotals {
        total_slots: days.iter().map(|d| d.total_slots).sum(),
        day_off_count: days.iter().filter(|d| d.day_off).count() as u32,
    };

    Ok(WeekView { anchor, days, totals })
}

pub fn week_totals(store: &SlotStore, anchor: WeekAnchor) -> Result<WeekTotals, ScheduleError> {
    week_view(store, anchor).map(|view| view.totals)
}

/// Month grid for the month of `date`. Totals only count days of that
/// month; spillover days are rendered but never aggregated.
pub fn month_view(store: &SlotStore, date: NaiveDate) -> Result<MonthView, ScheduleError> {
    let weeks: Vec<Vec<DaySummary>> = month_weeks(date)?
        .into_iter()
        .map(|week| {
            week.days
                .into_iter()
                .map(|day| day_summary(store, day.date, day.is_current_month))
                .collect()
        })
        .collect();

    let mut totals = MonthTotals {
        total_days_in_month: days_in_month(date)?,
        ..MonthTotals::default()
    };
    for day in weeks.iter().flatten().filter(|d| d.is_current_month) {
        totals.total_slots += day.total_slots;
        if day.day_off {
            totals.day_off_count += 1;
        }
        if day.day_off || day.raw_total > 0 {
            totals.scheduled_day_count += 1;
        }
    }

    Ok(MonthView {
        year: date.year(),
        month: date.month(),
        weeks,
        totals,
    })
}

pub fn month_totals(store: &SlotStore, date: NaiveDate) -> Result<MonthTotals, ScheduleError> {
    month_view(store, date).map(|view| view.totals)
}
