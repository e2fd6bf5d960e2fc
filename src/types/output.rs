//! Per-frame output plus the status/event records written downstream

use colored::Colorize;
use serde::{Deserialize, Serialize};
use crate::types::{CalibrationPhase, DialogLine, Gesture, SmoothedSignals};

/// Round to 4 decimal places (all emitted floats go through this)
pub fn round4(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 10_000.0).round() / 10_000.0
}

/// Intermediate look-away values, for the debug HUD
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringDebug {
    pub eye_raw: f64,
    pub eye_adj: f64,
    pub left_mag: f64,
    pub right_mag: f64,
    pub head_raw: f64,
    pub head_factor: f64,
}

/// Result of one tracker update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    /// Frame timestamp (milliseconds)
    pub timestamp_ms: f64,
    pub face_present: bool,
    pub signals: SmoothedSignals,
    pub gesture: Gesture,
    /// Line currently displayed (after stability rules)
    pub dialog: DialogLine,
    pub calibration: CalibrationPhase,
    pub debug: ScoringDebug,
}

impl FrameOutput {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let s = &self.signals;
        let look = if s.looking_away {
            "YES".red().bold()
        } else {
            "NO".green()
        };
        let gesture = if self.gesture.is_some() {
            self.gesture.as_str().cyan().bold()
        } else {
            self.gesture.as_str().dimmed()
        };
        format!(
            "Smile: {:.2} | Sad: {:.2} | LookAway: {:.2} {} | Gesture: {} | Heart: {:.2} | {}",
            s.smile,
            s.sadness,
            s.look_away_score,
            look,
            gesture,
            s.heart_score,
            self.dialog.text().yellow()
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let s = &self.signals;
        format!(
            "smile={:.2} | sad={:.2} | look_away={:.2} | looking_away={} | gesture={} | heart={:.2} | calib={} | dialog={}",
            s.smile,
            s.sadness,
            s.look_away_score,
            s.looking_away,
            self.gesture,
            s.heart_score,
            self.calibration,
            self.dialog.code()
        )
    }

    /// Extra diagnostic line (eye/head internals)
    pub fn to_debug_string(&self) -> String {
        let d = &self.debug;
        format!(
            "EyeRaw: {:.3}  EyeAdj: {:.3}  L/R: {:.3}/{:.3}  HeadRaw: {:.3}  HeadFactor: {:.2}  Calib: {}",
            d.eye_raw, d.eye_adj, d.left_mag, d.right_mag, d.head_raw, d.head_factor, self.calibration
        )
    }
}

/// Status file contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub smile_count: u32,
    pub heart_detected: bool,
    pub gesture: Gesture,
    pub smile: f64,
    #[serde(rename = "lookAway")]
    pub look_away: f64,
    pub sadness: f64,
}

/// One line of the event stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Seconds
    pub ts: f64,
    pub smile: f64,
    pub sadness: f64,
    pub look_away: f64,
    pub looking_away: bool,
    pub hand_present: bool,
    pub gesture: Gesture,
    pub heart_score: f64,
    pub heart: bool,
    pub dialog: String,
}

impl From<&FrameOutput> for EventRecord {
    fn from(output: &FrameOutput) -> Self {
        let s = &output.signals;
        Self {
            ts: round4(output.timestamp_ms / 1000.0),
            smile: round4(s.smile),
            sadness: round4(s.sadness),
            look_away: round4(s.look_away_score),
            looking_away: s.looking_away,
            hand_present: s.hand_present,
            gesture: output.gesture,
            heart_score: round4(s.heart_score),
            heart: s.heart,
            dialog: output.dialog.text().to_string(),
        }
    }
}
