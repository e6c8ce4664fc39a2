use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;

// ==============================================================================
// CALENDAR TYPES
// ==============================================================================

/// Canonical `YYYY-MM-DD` key used for every per-date lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for DateKey {
    type Err = ScheduleError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(raw.trim(), Self::FORMAT)
            .map(Self)
            .map_err(|_| ScheduleError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date", raw)))
    }
}

impl TryFrom<String> for DateKey {
    type Error = ScheduleError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

/// Monday of a displayed week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WeekAnchor(NaiveDate);

impl WeekAnchor {
    /// Anchor of the week containing `date` (the Monday on or before it).
    pub fn containing(date: NaiveDate) -> Result<Self, ScheduleError> {
        let back = u64::from(date.weekday().num_days_from_monday());
        date.checked_sub_days(Days::new(back))
            .map(Self)
            .ok_or_else(|| ScheduleError::InvalidDate(format!("no Monday on or before {}", date)))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn key(&self) -> DateKey {
        DateKey(self.0)
    }

    pub fn next(&self) -> Result<Self, ScheduleError> {
        self.0
            .checked_add_days(Days::new(7))
            .map(Self)
            .ok_or_else(|| ScheduleError::InvalidDate(format!("week after {} is out of range", self.0)))
    }
}

/// One named day of a week view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekDay {
    pub weekday: Weekday,
    pub date: NaiveDate,
}

/// One cell of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub is_current_month: bool,
}

impl CalendarDay {
    pub fn key(&self) -> DateKey {
        DateKey(self.date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthWeek {
    pub anchor: WeekAnchor,
    pub days: Vec<CalendarDay>,
}

// ==============================================================================
// SLOT TYPES
// ==============================================================================

/// Ordered set of time-of-day labels offered on the slot grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeLabels(Vec<String>);

impl TimeLabels {
    pub fn new(labels: Vec<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(labels.len());
        for label in labels {
            if !unique.contains(&label) {
                unique.push(label);
            }
        }
        Self(unique)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything the clinic configured for one date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    pub(crate) slots: HashMap<String, u32>,
    pub(crate) day_off: bool,
    pub(crate) service_time: Option<String>,
}

impl DaySchedule {
    pub fn count(&self, label: &str) -> u32 {
        self.slots.get(label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.slots.values().map(|c| u64::from(*c)).sum()
    }

    pub fn is_day_off(&self) -> bool {
        self.day_off
    }

    pub fn service_time(&self) -> Option<&str> {
        self.service_time.as_deref()
    }

    /// Nonzero slots or an explicit day off.
    pub fn is_scheduled(&self) -> bool {
        self.day_off || self.total() > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotCount {
    pub time: String,
    pub count: u32,
}

// ==============================================================================
// SUMMARY TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub date: DateKey,
    pub weekday: Weekday,
    pub is_current_month: bool,
    /// Stored counts, regardless of the day-off flag.
    pub raw_total: u64,
    /// Bookable slots: zero while the day is off.
    pub total_slots: u64,
    pub day_off: bool,
    pub service_time: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WeekTotals {
    pub total_slots: u64,
    pub day_off_count: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthTotals {
    pub total_slots: u64,
    pub day_off_count: u32,
    pub scheduled_day_count: u32,
    pub total_days_in_month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekView {
    pub anchor: WeekAnchor,
    pub days: Vec<DaySummary>,
    pub totals: WeekTotals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<DaySummary>>,
    pub totals: MonthTotals,
}

// ==============================================================================
// PROVIDERS
// ==============================================================================

/// A doctor with externally declared availability per date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub available_slots: BTreeMap<DateKey, Vec<String>>,
}

// ==============================================================================
// REQUEST DTOs
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetCountRequest {
    pub time: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustCountRequest {
    pub time: String,
    pub delta: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayOffRequest {
    pub day_off: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceTimeRequest {
    pub label: Option<String>,
}

/// Targets for copying one day's settings. Explicit dates, weekdays of the
/// source's week and the rest of the month are merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CopySettingsRequest {
    #[serde(default)]
    pub targets: Vec<DateKey>,
    #[serde(default)]
    pub weekdays: Vec<Weekday>,
    #[serde(default)]
    pub whole_month: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableTimesQuery {
    pub date: String,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Slots on {0} cannot be edited while the day is off")]
    EditBlocked(DateKey),

    #[error("Unknown time label: {0}")]
    UnknownTimeLabel(String),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("{time} is not available for provider {provider_id} on {date}")]
    TimeNotAvailable {
        provider_id: String,
        date: DateKey,
        time: String,
    },
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::InvalidDate(_) => AppError::BadRequest(err.to_string()),
            ScheduleError::EditBlocked(_) => AppError::Conflict(err.to_string()),
            ScheduleError::UnknownTimeLabel(_) => AppError::ValidationError(err.to_string()),
            ScheduleError::ProviderNotFound(_) => AppError::NotFound(err.to_string()),
            ScheduleError::TimeNotAvailable { .. } => AppError::Conflict(err.to_string()),
        }
    }
}
