use anyhow::Result;
use tokio::sync::RwLock;
use tracing::warn;

use shared_config::AppConfig;

use crate::models::TimeLabels;
use crate::services::{ProviderDirectory, SlotStore};

/// Shared state behind the schedule routes. The slot store is the only
/// mutable part; provider data is loaded once and never written.
#[derive(Debug)]
pub struct ScheduleState {
    pub config: AppConfig,
    pub store: RwLock<SlotStore>,
    pub providers: ProviderDirectory,
}

impl ScheduleState {
    pub fn new(config: AppConfig, providers: ProviderDirectory) -> Self {
        let store = SlotStore::new(TimeLabels::new(config.time_labels.clone()));
        Self {
            config,
            store: RwLock::new(store),
            providers,
        }
    }

    /// Builds the state from configuration, reading the provider file when
    /// one is configured.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let providers = match config.providers_path.as_deref() {
            Some(path) => ProviderDirectory::from_json_file(path)?,
            None => {
                warn!("No provider file configured, starting with an empty provider directory");
                ProviderDirectory::default()
            }
        };
        Ok(Self::new(config, providers))
    }
}
