//! FaceMotion: behavioral signal tracker over face and hand landmarks
//!
//! Per frame: landmarks → geometry → calibration → smoothing/hysteresis →
//! gesture → stable dialog line.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use config::TrackerConfig;
pub use error::{Result, TrackerError};

// =============================================================================
// SMOOTHING
// =============================================================================

/// Time constant of the exponential smoother (milliseconds)
pub const SCORE_TAU_MS: f64 = 120.0;

// =============================================================================
// LOOK-AWAY [C]
// =============================================================================

/// Absolute eye magnitude where look-away scoring starts (uncalibrated)
pub const LOOK_EYE_T: f64 = 0.2;
/// Absolute eye magnitude mapped to score 1.0 (uncalibrated)
pub const LOOK_EYE_MAX: f64 = 0.55;
/// Hysteresis: looking-away turns on above this score
pub const LOOK_ON: f64 = 0.42;
/// Hysteresis: looking-away turns off at or below this score
pub const LOOK_OFF: f64 = 0.28;

/// Baseline-subtracted eye delta where scoring starts (calibrated)
pub const LOOK_EYE_DELTA_T: f64 = 0.03;
/// Baseline-subtracted eye delta mapped to score 1.0 (calibrated)
pub const LOOK_EYE_DELTA_MAX: f64 = 0.22;

/// Head yaw proxy where the head guard starts to engage
pub const HEAD_GUARD_T: f64 = 0.08;
/// Head yaw proxy where the head guard is fully engaged
pub const HEAD_GUARD_MAX: f64 = 0.28;
/// Fraction of the look-away score removed at full head guard
pub const HEAD_DAMP: f64 = 0.85;
/// Extra delta threshold added at full head guard
pub const HEAD_DELTA_T_BOOST: f64 = 0.10;

// =============================================================================
// CALIBRATION [C]
// =============================================================================

/// Settling time ignored at the start of calibration (milliseconds)
pub const CALIBRATION_WARMUP_MS: f64 = 250.0;
/// Sample collection window after warm-up (milliseconds)
pub const CALIBRATION_DURATION_MS: f64 = 1100.0;

// =============================================================================
// SMILE / SADNESS [C]
// =============================================================================

pub const SMILE_MOUTH_UP_T: f64 = 0.035;
pub const SMILE_MOUTH_UP_MAX: f64 = 0.11;
pub const SMILE_DEADZONE: f64 = 0.30;
pub const SMILE_GAMMA: f64 = 2.0;
/// Geometry weight before a baseline exists (geometry is noisier then)
pub const SMILE_GEOM_WEIGHT_PRECALIB: f64 = 0.55;

pub const SAD_MOUTH_DOWN_T: f64 = 0.015;
pub const SAD_MOUTH_DOWN_MAX: f64 = 0.07;
pub const SAD_DEADZONE: f64 = 0.12;
pub const SAD_GAMMA: f64 = 1.15;
pub const SAD_GEOM_WEIGHT_PRECALIB: f64 = 0.7;

/// Smoothed smile that counts as "smiling strongly" for dialog selection
pub const DIALOG_SMILE_T: f64 = 0.55;

/// Smile event counter: rising edge at this smoothed smile
pub const SMILE_EVENT_THRESHOLD: f64 = 0.50;
/// Smile event counter: re-arms below this smoothed smile
pub const SMILE_EVENT_RESET: f64 = 0.35;

// =============================================================================
// DIALOG STABILITY [C]
// =============================================================================

/// A candidate line must be proposed this long before it is shown
pub const DIALOG_HOLD_MS: f64 = 350.0;
/// A shown line may be replaced after this long regardless of hold
pub const DIALOG_MIN_SHOW_MS: f64 = 900.0;

// =============================================================================
// TWO-HAND HEART [C] - base values, scaled by sensitivity
// =============================================================================

pub const HEART_THUMB_TOUCH_T: f64 = 0.24;
pub const HEART_THUMB_FAR_T: f64 = 0.68;
pub const HEART_THUMB_FAR_MAX: f64 = 1.20;
pub const HEART_FOUR_CLUSTER_MAX_SPREAD_T: f64 = 0.55;
pub const HEART_FOUR_GROUP_TOUCH_T: f64 = 0.70;
pub const HEART_FOUR_CROSS_TIP_TOUCH_T: f64 = 0.55;
pub const HEART_ON: f64 = 0.55;
pub const HEART_OFF: f64 = 0.35;
/// Pairs whose wrists are further apart than this (hand-scale units) are skipped
pub const HEART_MAX_WRIST_DISTANCE: f64 = 2.7;
/// Only the first N detected hands take part in pair evaluation
pub const HEART_MAX_HANDS: usize = 4;
/// Default heart sensitivity (>1 easier, <1 stricter)
pub const DEFAULT_HEART_SENSITIVITY: f64 = 1.25;

// =============================================================================
// OUTPUT CADENCE
// =============================================================================

/// Default hand inference interval (milliseconds)
pub const DEFAULT_HAND_INTERVAL_MS: f64 = 80.0;
/// Default event emission rate (Hz)
pub const DEFAULT_EVENT_RATE_HZ: f64 = 12.5;
/// Status file refresh interval (milliseconds)
pub const STATUS_WRITE_INTERVAL_MS: f64 = 500.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
