//! Core modules for FaceMotion

pub mod geometry;
pub mod gesture;
pub mod heart;
pub mod calibration;
pub mod smoother;
pub mod scoring;
pub mod dialog;
pub mod tracker;
pub mod source;
pub mod status;
pub mod replay;
pub mod api;

pub use geometry::extract_metrics;
pub use gesture::{classify, hand_gestures};
pub use heart::two_hand_heart_score;
pub use calibration::CalibrationEngine;
pub use smoother::{ema_alpha, Ema, Hysteresis};
pub use dialog::{propose_line, DialogEngine};
pub use tracker::Tracker;
pub use source::{HandGate, JsonLinesSource, LandmarkSource};
pub use status::{load_status, save_status, IntervalGate};
pub use replay::{run_replay, ReplayOptions, ReplaySummary};
pub use api::{create_router, run_server};
