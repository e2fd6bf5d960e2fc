//! Calibration phase and neutral baseline

use serde::{Deserialize, Serialize};

/// Where the calibration engine is in its one-shot protocol
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalibrationPhase {
    /// No face frame seen since start/reset
    #[default]
    Uncollected,
    /// Warm-up or sample collection in progress
    Collecting,
    /// Baseline frozen
    Ready,
}

impl std::fmt::Display for CalibrationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Uncollected => "UNCOLLECTED",
            Self::Collecting => "COLLECTING",
            Self::Ready => "READY",
        };
        write!(f, "{}", name)
    }
}

/// Per-session neutral reference, subtracted from live metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationBaseline {
    pub eye0: f64,
    pub head0: f64,
    pub mouth_up0: f64,
    pub mouth_down0: f64,
}

/// One calibration sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSample {
    /// Eye-only magnitude (max of both eyes), the value look-away scoring subtracts `eye0` from
    pub eye: f64,
    pub head: f64,
    pub mouth_up: f64,
    pub mouth_down: f64,
}

impl CalibrationSample {
    pub fn is_finite(&self) -> bool {
        self.eye.is_finite()
            && self.head.is_finite()
            && self.mouth_up.is_finite()
            && self.mouth_down.is_finite()
    }
}
