//! Core types for FaceMotion

mod landmarks;
mod metrics;
mod signals;
mod gesture;
mod dialog;
mod heart;
mod calibration;
mod output;

pub use landmarks::{Point, LandmarkSet, Blendshapes, FaceLandmarks, HandLandmarks, LandmarkFrame};
pub use metrics::{RawMetrics, HandGestures};
pub use signals::SmoothedSignals;
pub use gesture::Gesture;
pub use dialog::{DialogLine, DialogState};
pub use heart::{HeartParams, TouchMode, MIN_HEART_SENSITIVITY, MAX_HEART_SENSITIVITY};
pub use calibration::{CalibrationPhase, CalibrationBaseline, CalibrationSample};
pub use output::{FrameOutput, ScoringDebug, StatusSnapshot, EventRecord, round4};
