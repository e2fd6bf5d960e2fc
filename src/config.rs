//! Tracker configuration.

use crate::error::{Result, TrackerError};
use crate::types::TouchMode;
use crate::{
    DEFAULT_EVENT_RATE_HZ, DEFAULT_HAND_INTERVAL_MS, DEFAULT_HEART_SENSITIVITY,
    STATUS_WRITE_INTERVAL_MS,
};

/// Per-session tracker configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Two-hand heart sensitivity (>1 easier, <1 stricter)
    pub heart_sensitivity: f64,
    /// How the two fingertip clusters must touch
    pub heart_touch: TouchMode,
    /// Hand tracking enabled at all
    pub hand_tracking: bool,
    /// Minimum interval between hand inference results (milliseconds)
    pub hand_interval_ms: f64,
    /// Event emission rate (Hz)
    pub event_rate_hz: f64,
    /// Status file refresh interval (milliseconds)
    pub status_write_interval_ms: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            heart_sensitivity: DEFAULT_HEART_SENSITIVITY,
            heart_touch: TouchMode::RequireBoth,
            hand_tracking: true,
            hand_interval_ms: DEFAULT_HAND_INTERVAL_MS,
            event_rate_hz: DEFAULT_EVENT_RATE_HZ,
            status_write_interval_ms: STATUS_WRITE_INTERVAL_MS,
        }
    }
}

impl TrackerConfig {
    /// Create config from `FACEMOTION_*` environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            heart_sensitivity: env_parse("FACEMOTION_HEART_SENSITIVITY")
                .unwrap_or(defaults.heart_sensitivity),
            heart_touch: match std::env::var("FACEMOTION_HEART_TOUCH") {
                Ok(v) if v.eq_ignore_ascii_case("either") => TouchMode::Either,
                _ => defaults.heart_touch,
            },
            hand_tracking: std::env::var("FACEMOTION_NO_HAND")
                .map(|v| !(v == "1" || v.eq_ignore_ascii_case("true")))
                .unwrap_or(defaults.hand_tracking),
            hand_interval_ms: env_parse("FACEMOTION_HAND_INTERVAL_MS")
                .unwrap_or(defaults.hand_interval_ms),
            event_rate_hz: env_parse("FACEMOTION_EVENT_RATE_HZ").unwrap_or(defaults.event_rate_hz),
            status_write_interval_ms: env_parse("FACEMOTION_STATUS_INTERVAL_MS")
                .unwrap_or(defaults.status_write_interval_ms),
        }
    }

    /// Reject values no session could run with.
    pub fn validate(&self) -> Result<()> {
        if !self.heart_sensitivity.is_finite() || self.heart_sensitivity <= 0.0 {
            return Err(TrackerError::config(format!(
                "heart sensitivity must be a positive number, got {}",
                self.heart_sensitivity
            )));
        }
        if !self.hand_interval_ms.is_finite() || self.hand_interval_ms < 0.0 {
            return Err(TrackerError::config(format!(
                "hand interval must be >= 0 ms, got {}",
                self.hand_interval_ms
            )));
        }
        if !self.event_rate_hz.is_finite() || self.event_rate_hz <= 0.0 {
            return Err(TrackerError::config(format!(
                "event rate must be > 0 Hz, got {}",
                self.event_rate_hz
            )));
        }
        Ok(())
    }

    /// Event tick period in milliseconds (rate floored at 1 Hz)
    pub fn event_interval_ms(&self) -> f64 {
        1000.0 / self.event_rate_hz.max(1.0)
    }
}

fn env_parse(key: &str) -> Option<f64> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TrackerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_sensitivity() {
        let config = TrackerConfig {
            heart_sensitivity: f64::NAN,
            ..TrackerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_event_interval() {
        let config = TrackerConfig::default();
        assert!((config.event_interval_ms() - 80.0).abs() < 1e-9);

        let slow = TrackerConfig {
            event_rate_hz: 0.2,
            ..TrackerConfig::default()
        };
        assert!((slow.event_interval_ms() - 1000.0).abs() < 1e-9);
    }
}
