//! Timing configuration for the touch recognizers.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default time a touch must be held before a release opens the menu.
pub const DEFAULT_TOUCH_MENU_HOLD_TIME_MS: u64 = 600;

/// Default time a touch must rest before it may become a drag.
pub const DEFAULT_TOUCH_DRAG_DELAY_MS: u64 = 500;

/// Configuration for gesture recognition.
///
/// Built once per [`GestureEngine`](crate::GestureEngine) and never mutated
/// afterwards. Every field is optional when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Hold time for a touch to count as a long-press (milliseconds).
    pub touch_menu_hold_time_ms: u64,
    /// Rest time before a touch may start a drag (milliseconds).
    pub touch_drag_delay_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_menu_hold_time_ms: DEFAULT_TOUCH_MENU_HOLD_TIME_MS,
            touch_drag_delay_ms: DEFAULT_TOUCH_DRAG_DELAY_MS,
        }
    }
}

impl GestureConfig {
    /// Set the long-press hold time.
    pub fn with_touch_menu_hold_time(mut self, hold: Duration) -> Self {
        self.touch_menu_hold_time_ms = duration_to_ms(hold);
        self
    }

    /// Set the touch drag delay.
    pub fn with_touch_drag_delay(mut self, delay: Duration) -> Self {
        self.touch_drag_delay_ms = duration_to_ms(delay);
        self
    }

    /// Get the long-press hold time as Duration
    pub fn touch_menu_hold_time(&self) -> Duration {
        Duration::from_millis(self.touch_menu_hold_time_ms)
    }

    /// Get the touch drag delay as Duration
    pub fn touch_drag_delay(&self) -> Duration {
        Duration::from_millis(self.touch_drag_delay_ms)
    }

    /// Parse from a YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(content)?;
        tracing::debug!(?config, "loaded YAML gesture config");
        Ok(config)
    }

    /// Parse from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        tracing::debug!(?config, "loaded TOML gesture config");
        Ok(config)
    }

    /// Parse from a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        tracing::debug!(?config, "loaded JSON gesture config");
        Ok(config)
    }
}

fn duration_to_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
