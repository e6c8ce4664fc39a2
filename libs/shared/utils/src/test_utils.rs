use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::NamedTempFile;
use tracing::debug;

use shared_config::AppConfig;

pub struct TestConfig {
    pub time_labels: Vec<String>,
    pub providers_path: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            time_labels: ["9:00 AM", "10:00 AM", "11:00 AM", "12:00 PM"]
                .iter()
                .map(|l| l.to_string())
                .collect(),
            providers_path: None,
        }
    }
}

impl TestConfig {
    pub fn with_providers_path(mut self, path: &str) -> Self {
        self.providers_path = Some(path.to_string());
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            time_labels: self.time_labels.clone(),
            providers_path: self.providers_path.clone(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestProviders;

impl TestProviders {
    /// Two providers: "P" declares 2025-05-03 only, "Q" declares the week of
    /// 2025-05-05.
    pub fn sample_json() -> Value {
        json!([
            {
                "id": "P",
                "name": "Dr. Amina Okafor",
                "specialty": "Cardiology",
                "available_slots": {
                    "2025-05-03": ["09:00", "10:30"]
                }
            },
            {
                "id": "Q",
                "name": "Dr. Lars Henrik",
                "specialty": "Dermatology",
                "available_slots": {
                    "2025-05-05": ["14:00"],
                    "2025-05-06": ["09:30", "11:00", "15:30"]
                }
            }
        ])
    }

    /// Writes `providers` to a temporary file that lives as long as the
    /// returned handle.
    pub fn write_file(providers: &Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp provider file");
        file.write_all(providers.to_string().as_bytes())
            .expect("write temp provider file");
        debug!("Wrote test providers to {}", file.path().display());
        file
    }
}
