use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::env_or;

fn default_timeout_secs() -> u64 {
    15
}

fn default_user_agent() -> String {
    "TangoDeckBuilder/0.1 (+https://github.com/)".to_string()
}

fn default_workers() -> usize {
    4
}

/// Outbound HTTP settings shared by every source
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NetworkConfig {
    /// Per-request timeout. A timeout counts as "source returned nothing".
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Terms resolved concurrently in batch mode
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            workers: default_workers(),
        }
    }
}

impl NetworkConfig {
    pub fn new() -> Self {
        Self {
            timeout_secs: env_or("TANGO_TIMEOUT_SECS", default_timeout_secs()),
            user_agent: std::env::var("TANGO_USER_AGENT").unwrap_or_else(|_| default_user_agent()),
            workers: env_or("TANGO_WORKERS", default_workers()).max(1),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
