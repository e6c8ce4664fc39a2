use std::env;
use std::net::SocketAddr;
use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Hourly labels shown on the clinic slot grid when none are configured.
pub const DEFAULT_TIME_LABELS: [&str; 12] = [
    "9:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "1:00 PM", "2:00 PM",
    "3:00 PM", "4:00 PM", "5:00 PM", "6:00 PM", "7:00 PM", "8:00 PM",
];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub time_labels: Vec<String>,
    pub providers_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            time_labels: default_time_labels(),
            providers_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            bind_addr: env::var("SCHEDULE_BIND_ADDR")
                .ok()
                .and_then(|raw| match raw.parse() {
                    Ok(addr) => Some(addr),
                    Err(_) => {
                        warn!("SCHEDULE_BIND_ADDR '{}' is not a socket address, using default", raw);
                        None
                    }
                })
                .unwrap_or_else(default_bind_addr),
            time_labels: env::var("SCHEDULE_TIME_LABELS")
                .map(|raw| parse_time_labels(&raw))
                .ok()
                .filter(|labels| !labels.is_empty())
                .unwrap_or_else(|| {
                    warn!("SCHEDULE_TIME_LABELS not set, using hourly 9:00 AM - 8:00 PM grid");
                    default_time_labels()
                }),
            providers_path: env::var("SCHEDULE_PROVIDERS_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty()),
        };

        if !config.has_provider_source() {
            warn!("SCHEDULE_PROVIDERS_PATH not set - provider availability will be empty");
        }

        config
    }

    pub fn has_provider_source(&self) -> bool {
        self.providers_path.is_some()
    }
}

/// Splits a comma separated label list, dropping blanks and repeats while
/// keeping the first-seen order.
pub fn parse_time_labels(raw: &str) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for label in raw.split(',').map(str::trim).filter(|l| !l.is_empty()) {
        if !labels.iter().any(|existing| existing == label) {
            labels.push(label.to_string());
        }
    }
    labels
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

fn default_time_labels() -> Vec<String> {
    DEFAULT_TIME_LABELS.iter().map(|l| l.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_time_labels_trims_and_dedupes() {
        let labels = parse_time_labels(" 9:00 AM, 10:00 AM,,9:00 AM , 11:00 AM");
        assert_eq!(labels, vec!["9:00 AM", "10:00 AM", "11:00 AM"]);
    }

    #[test]
    fn default_config_uses_hourly_grid() {
        let config = AppConfig::default();
        assert_eq!(config.time_labels.len(), 12);
        assert_eq!(config.time_labels.first().map(String::as_str), Some("9:00 AM"));
        assert_eq!(config.time_labels.last().map(String::as_str), Some("8:00 PM"));
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert!(!config.has_provider_source());
    }
}
