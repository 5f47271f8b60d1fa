//! Cache synchronization settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Interval between report re-fetches while any report is still being computed.
const fn default_report_poll_interval_ms() -> u64 {
    3000
}

const fn default_page_size() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    #[serde(default = "default_report_poll_interval_ms")]
    pub report_poll_interval_ms: u64,

    /// Page size requested by list commands (backend caps it at 100).
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            report_poll_interval_ms: default_report_poll_interval_ms(),
            default_page_size: default_page_size(),
        }
    }
}

impl SyncConfig {
    /// Poll interval, clamped to at least 100 ms.
    #[must_use]
    pub fn report_poll_interval(&self) -> Duration {
        Duration::from_millis(self.report_poll_interval_ms.max(100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_correct() {
        let config = SyncConfig::default();
        assert_eq!(config.report_poll_interval(), Duration::from_millis(3000));
        assert_eq!(config.default_page_size, 20);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = SyncConfig {
            report_poll_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.report_poll_interval(), Duration::from_millis(100));
    }
}
