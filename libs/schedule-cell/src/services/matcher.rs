use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::models::{DateKey, Provider, ScheduleError};

/// Times `provider` declared for `date`. An undeclared date means the
/// provider is not available that day, so the list is simply empty.
pub fn available_times(provider: &Provider, date: DateKey) -> Vec<String> {
    provider
        .available_slots
        .get(&date)
        .cloned()
        .unwrap_or_default()
}

/// Read-only lookup of providers by id.
#[derive(Debug, Clone, Default)]
pub struct ProviderDirectory {
    providers: BTreeMap<String, Provider>,
}

impl ProviderDirectory {
    pub fn new(providers: Vec<Provider>) -> Self {
        Self {
            providers: providers.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let providers: Vec<Provider> =
            serde_json::from_str(raw).context("Provider data must be a JSON array of providers")?;
        Ok(Self::new(providers))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read provider file {}", path.display()))?;
        let directory = Self::from_json_str(&raw)
            .with_context(|| format!("Failed to parse provider file {}", path.display()))?;

        info!("Loaded {} providers from {}", directory.len(), path.display());
        Ok(directory)
    }

    pub fn get(&self, provider_id: &str) -> Result<&Provider, ScheduleError> {
        self.providers
            .get(provider_id)
            .ok_or_else(|| ScheduleError::ProviderNotFound(provider_id.to_string()))
    }

    pub fn list(&self) -> impl Iterator<Item = &Provider> {
        self.providers.values()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn available_times(&self, provider_id: &str, date: DateKey) -> Result<Vec<String>, ScheduleError> {
        let provider = self.get(provider_id)?;
        Ok(available_times(provider, date))
    }
}

/// Provider/date/time choice made on the booking form.
///
/// Changing the provider or the date clears the chosen time, so a time is
/// only ever held while it belongs to the current provider and date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingSelection {
    provider_id: Option<String>,
    date: Option<DateKey>,
    time: Option<String>,
}

impl BookingSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provider_id(&self) -> Option<&str> {
        self.provider_id.as_deref()
    }

    pub fn date(&self) -> Option<DateKey> {
        self.date
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    pub fn select_provider(&mut self, provider_id: impl Into<String>) {
        self.provider_id = Some(provider_id.into());
        self.time = None;
    }

    pub fn select_date(&mut self, date: DateKey) {
        self.date = Some(date);
        self.time = None;
    }

    /// Times offered for the current provider and date; empty until both
    /// are chosen.
    pub fn options(&self, directory: &ProviderDirectory) -> Result<Vec<String>, ScheduleError> {
        match (self.provider_id.as_deref(), self.date) {
            (Some(provider_id), Some(date)) => directory.available_times(provider_id, date),
            _ => Ok(Vec::new()),
        }
    }

    pub fn select_time(&mut self, directory: &ProviderDirectory, time: &str) -> Result<(), ScheduleError> {
        let provider_id = self
            .provider_id
            .clone()
            .ok_or_else(|| ScheduleError::ProviderNotFound("no provider selected".to_string()))?;
        let date = self
            .date
            .ok_or_else(|| ScheduleError::InvalidDate("no date selected".to_string()))?;

        let options = directory.available_times(&provider_id, date)?;
        if !options.iter().any(|t| t == time) {
            return Err(ScheduleError::TimeNotAvailable {
                provider_id,
                date,
                time: time.to_string(),
            });
        }

        debug!("Selected {} for booking", time);
        self.time = Some(time.to_string());
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.provider_id.is_some() && self.date.is_some() && self.time.is_some()
    }
}
