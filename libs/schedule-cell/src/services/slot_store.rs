use std::collections::HashMap;

use tracing::{debug, warn};

use crate::models::{DateKey, DaySchedule, ScheduleError, SlotCount, TimeLabels};

/// Per-date slot counts, day-off flags and service-time labels.
#[derive(Debug, Clone)]
pub struct SlotStore {
    time_labels: TimeLabels,
    days: HashMap<DateKey, DaySchedule>,
}

/// An uncommitted slot edit. Nothing reaches the store until
/// [`SlotStore::commit_edit`]; dropping the draft discards it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotDraft {
    date: DateKey,
    time: String,
    original: u32,
    count: u32,
}

impl SlotDraft {
    pub fn date(&self) -> DateKey {
        self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn increment(&mut self) -> u32 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    pub fn decrement(&mut self) -> u32 {
        self.count = self.count.saturating_sub(1);
        self.count
    }

    pub fn set(&mut self, count: i64) -> u32 {
        self.count = clamp_count(count);
        self.count
    }

    pub fn is_dirty(&self) -> bool {
        self.count != self.original
    }
}

/// Negative counts become zero; anything past `u32::MAX` saturates.
pub fn clamp_count(count: i64) -> u32 {
    count.clamp(0, i64::from(u32::MAX)) as u32
}

impl SlotStore {
    pub fn new(time_labels: TimeLabels) -> Self {
        Self {
            time_labels,
            days: HashMap::new(),
        }
    }

    pub fn time_labels(&self) -> &TimeLabels {
        &self.time_labels
    }

    pub fn day(&self, date: DateKey) -> Option<&DaySchedule> {
        self.days.get(&date)
    }

    pub(crate) fn day_mut(&mut self, date: DateKey) -> &mut DaySchedule {
        self.days.entry(date).or_default()
    }

    pub fn get_count(&self, date: DateKey, time: &str) -> u32 {
        self.day(date).map(|day| day.count(time)).unwrap_or(0)
    }

    pub fn is_day_off(&self, date: DateKey) -> bool {
        self.day(date).map(DaySchedule::is_day_off).unwrap_or(false)
    }

    /// Callers check this before offering an edit; the writers below
    /// refuse blocked edits regardless.
    pub fn is_edit_allowed(&self, date: DateKey) -> bool {
        !self.is_day_off(date)
    }

    pub fn set_count(&mut self, date: DateKey, time: &str, count: i64) -> Result<u32, ScheduleError> {
        self.check_editable(date, time)?;

        let count = clamp_count(count);
        let day = self.day_mut(date);
        if count == 0 {
            day.slots.remove(time);
        } else {
            day.slots.insert(time.to_string(), count);
        }

        debug!("Set {} slots at {} on {}", count, time, date);
        Ok(count)
    }

    pub fn adjust_count(&mut self, date: DateKey, time: &str, delta: i64) -> Result<u32, ScheduleError> {
        let current = i64::from(self.get_count(date, time));
        self.set_count(date, time, current.saturating_add(delta))
    }

    /// Flips the day-off flag and returns the new value. Stored counts are
    /// kept so switching back restores them.
    pub fn toggle_day_off(&mut self, date: DateKey) -> bool {
        let day = self.day_mut(date);
        day.day_off = !day.day_off;
        debug!("Day off on {} is now {}", date, day.day_off);
        day.day_off
    }

    pub fn set_day_off(&mut self, date: DateKey, day_off: bool) {
        self.day_mut(date).day_off = day_off;
        debug!("Day off on {} set to {}", date, day_off);
    }

    pub fn set_service_time(&mut self, date: DateKey, label: Option<String>) {
        self.day_mut(date).service_time = label;
    }

    pub fn service_time(&self, date: DateKey) -> Option<&str> {
        self.day(date).and_then(DaySchedule::service_time)
    }

    /// Sum of the stored counts, ignoring the day-off flag.
    pub fn day_total(&self, date: DateKey) -> u64 {
        self.day(date).map(DaySchedule::total).unwrap_or(0)
    }

    /// Bookable slots on `date`; zero while the day is off.
    pub fn available_total(&self, date: DateKey) -> u64 {
        if self.is_day_off(date) {
            0
        } else {
            self.day_total(date)
        }
    }

    /// Labels with at least one bookable slot, in grid order.
    pub fn available_times(&self, date: DateKey) -> Vec<SlotCount> {
        if self.is_day_off(date) {
            return Vec::new();
        }
        self.slot_counts(date)
            .into_iter()
            .filter(|slot| slot.count > 0)
            .collect()
    }

    /// Stored count for every configured label, in grid order.
    pub fn slot_counts(&self, date: DateKey) -> Vec<SlotCount> {
        self.time_labels
            .iter()
            .map(|time| SlotCount {
                time: time.to_string(),
                count: self.get_count(date, time),
            })
            .collect()
    }

    pub fn begin_edit(&self, date: DateKey, time: &str) -> Result<SlotDraft, ScheduleError> {
        self.check_editable(date, time)?;
        let count = self.get_count(date, time);
        Ok(SlotDraft {
            date,
            time: time.to_string(),
            original: count,
            count,
        })
    }

    pub fn commit_edit(&mut self, draft: SlotDraft) -> Result<u32, ScheduleError> {
        self.set_count(draft.date, &draft.time, i64::from(draft.count))
    }

    fn check_editable(&self, date: DateKey, time: &str) -> Result<(), ScheduleError> {
        if !self.time_labels.contains(time) {
            return Err(ScheduleError::UnknownTimeLabel(time.to_string()));
        }
        if !self.is_edit_allowed(date) {
            warn!("Refusing slot edit at {} on {}: day is off", time, date);
            return Err(ScheduleError::EditBlocked(date));
        }
        Ok(())
    }
}
