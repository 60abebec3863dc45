//! General application configuration.

use serde::{Deserialize, Serialize};

/// Page size used when a list request omits `limit`.
const fn default_page_size() -> u32 {
    10
}

fn default_log_filter() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default page size for schedule listings (1..=100).
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// `tracing` filter directive used when `EVV_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            log_filter: default_log_filter(),
        }
    }
}
