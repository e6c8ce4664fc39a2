use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::models::{CalendarDay, DateKey, MonthWeek, ScheduleError, WeekAnchor, WeekDay};

/// Weekday names in display order; offset `i` from the anchor is `WEEKDAYS[i]`.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A month grid never needs more than six rows.
pub const MAX_WEEKS_PER_MONTH: usize = 6;

pub fn parse_date(raw: &str) -> Result<NaiveDate, ScheduleError> {
    raw.parse::<DateKey>().map(|key| key.date())
}

/// The seven dates of the week starting at `anchor`, Monday first.
pub fn week_dates(anchor: WeekAnchor) -> Result<Vec<WeekDay>, ScheduleError> {
    WEEKDAYS
        .iter()
        .enumerate()
        .map(|(offset, weekday)| {
            anchor
                .date()
                .checked_add_days(Days::new(offset as u64))
                .map(|date| WeekDay { weekday: *weekday, date })
                .ok_or_else(|| {
                    ScheduleError::InvalidDate(format!(
                        "{} + {} days is out of range",
                        anchor.date(),
                        offset
                    ))
                })
        })
        .collect()
}

/// Every week intersecting the month of `date`, including the partial
/// weeks that spill into the neighbouring months.
pub fn month_weeks(date: NaiveDate) -> Result<Vec<MonthWeek>, ScheduleError> {
    let first = first_of_month(date);
    let last = last_of_month(date)?;

    let mut anchor = WeekAnchor::containing(first)?;
    let mut weeks = Vec::with_capacity(MAX_WEEKS_PER_MONTH);

    while anchor.date() <= last && weeks.len() < MAX_WEEKS_PER_MONTH {
        let days = week_dates(anchor)?
            .into_iter()
            .map(|day| CalendarDay {
                date: day.date,
                weekday: day.weekday,
                is_current_month: same_month(day.date, first),
            })
            .collect();
        weeks.push(MonthWeek { anchor, days });

        if anchor.date() >= last {
            break;
        }
        anchor = anchor.next()?;
    }

    Ok(weeks)
}

/// The dates of the month containing `date`, first to last.
pub fn month_dates(date: NaiveDate) -> Result<Vec<NaiveDate>, ScheduleError> {
    let first = first_of_month(date);
    let last = last_of_month(date)?;
    Ok(first.iter_days().take_while(|d| *d <= last).collect())
}

pub fn days_in_month(date: NaiveDate) -> Result<u32, ScheduleError> {
    last_of_month(date).map(|last| last.day())
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month.
    date - Days::new(u64::from(date.day0()))
}

fn last_of_month(date: NaiveDate) -> Result<NaiveDate, ScheduleError> {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| ScheduleError::InvalidDate(format!("month of {} is out of range", date)))
}
