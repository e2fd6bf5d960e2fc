//! Tracker: one session, one frame at a time
//!
//! Per frame:
//! 1. optional recalibration
//! 2. hand gate → geometry
//! 3. calibration sampling (face frames only)
//! 4. per-frame scores → EMA → hysteresis
//! 5. gesture priority → dialog stability

use tracing::info;
use crate::config::TrackerConfig;
use crate::core::calibration::CalibrationEngine;
use crate::core::dialog::{propose_line, DialogEngine};
use crate::core::geometry::extract_metrics;
use crate::core::gesture::classify;
use crate::core::scoring::{look_away_score, sadness_score, smile_score, LookAwayScore};
use crate::core::smoother::{ema_alpha, Ema, Hysteresis};
use crate::core::source::HandGate;
use crate::types::{
    CalibrationPhase, CalibrationSample, DialogLine, FrameOutput, Gesture, HeartParams,
    LandmarkFrame, ScoringDebug, SmoothedSignals, StatusSnapshot, round4,
};
use crate::{LOOK_OFF, LOOK_ON, SCORE_TAU_MS, SMILE_EVENT_RESET, SMILE_EVENT_THRESHOLD};

/// Rising-edge counter for strong smiles
#[derive(Debug, Clone, Copy, Default)]
struct SmileCounter {
    count: u32,
    above: bool,
}

impl SmileCounter {
    fn update(&mut self, smile: f64) {
        if self.above && smile < SMILE_EVENT_RESET {
            self.above = false;
        } else if !self.above && smile >= SMILE_EVENT_THRESHOLD {
            self.count += 1;
            self.above = true;
        }
    }
}

/// Tracking session state
#[derive(Debug, Clone)]
pub struct Tracker {
    config: TrackerConfig,
    /// Built once from the configured sensitivity
    heart_params: HeartParams,
    calibration: CalibrationEngine,
    dialog: DialogEngine,
    hand_gate: HandGate,

    smile: Ema,
    sadness: Ema,
    look_away: Ema,
    heart_score: Ema,
    looking_away: Hysteresis,
    heart: Hysteresis,

    signals: SmoothedSignals,
    gesture: Gesture,
    smiles: SmileCounter,
    /// Latched once a heart has been seen
    heart_detected: bool,

    last_frame_ms: Option<f64>,
    last_output: Option<FrameOutput>,
    frame_count: u64,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl Tracker {
    pub fn new(config: TrackerConfig) -> Self {
        let heart_params = HeartParams::from_sensitivity(config.heart_sensitivity);
        Self {
            hand_gate: HandGate::new(config.hand_tracking, config.hand_interval_ms),
            looking_away: Hysteresis::new(LOOK_ON, LOOK_OFF),
            heart: Hysteresis::new(heart_params.on_t, heart_params.off_t),
            heart_params,
            config,
            calibration: CalibrationEngine::new(),
            dialog: DialogEngine::new(),
            smile: Ema::new(),
            sadness: Ema::new(),
            look_away: Ema::new(),
            heart_score: Ema::new(),
            signals: SmoothedSignals::default(),
            gesture: Gesture::None,
            smiles: SmileCounter::default(),
            heart_detected: false,
            last_frame_ms: None,
            last_output: None,
            frame_count: 0,
        }
    }

    /// Process one frame
    pub fn update(&mut self, frame: &LandmarkFrame) -> FrameOutput {
        if frame.recalibrate {
            self.recalibrate();
        }

        let now = frame.timestamp_ms;
        let dt = self.last_frame_ms.map_or(0.0, |prev| now - prev);
        self.last_frame_ms = Some(now);
        self.frame_count += 1;
        let alpha = ema_alpha(dt, SCORE_TAU_MS);

        let hands = self.hand_gate.resolve(now, frame.hands.as_deref());
        let metrics = extract_metrics(
            frame.face.as_ref(),
            hands,
            &self.heart_params,
            self.config.heart_touch,
        );

        // Per-frame raw scores; a missing face scores neutral
        let (raw_smile, raw_sadness, look) = if metrics.face_present {
            self.calibration.update(
                now,
                CalibrationSample {
                    eye: metrics.eye_raw,
                    head: metrics.head_yaw,
                    mouth_up: metrics.mouth_up,
                    mouth_down: metrics.mouth_down,
                },
            );
            let baseline = self.calibration.baseline();
            (
                smile_score(metrics.smile_blendshape, metrics.mouth_up, baseline),
                sadness_score(metrics.sadness_blendshape, metrics.mouth_down, baseline),
                look_away_score(metrics.eye_raw, metrics.head_yaw, baseline),
            )
        } else {
            (0.0, 0.0, LookAwayScore::default())
        };

        let s = &mut self.signals;
        s.smile = self.smile.update(raw_smile, alpha);
        s.sadness = self.sadness.update(raw_sadness, alpha);
        s.look_away_score = self.look_away.update(look.score, alpha);
        s.looking_away = self.looking_away.update(s.look_away_score);

        s.hand_present = metrics.hand_present();
        s.open_palm = s.hand_present && metrics.any_open_palm();
        s.thumbs_up = s.hand_present && metrics.any_thumbs_up();
        s.heart_score = self.heart_score.update(metrics.heart_score, alpha);
        s.heart = if s.hand_present {
            self.heart.update(s.heart_score)
        } else {
            self.heart.reset();
            false
        };

        self.smiles.update(s.smile);
        self.heart_detected |= s.heart;

        self.gesture = classify(s.heart, s.thumbs_up, s.open_palm);
        let dialog = self.dialog.update(now, propose_line(metrics.face_present, s));

        let output = FrameOutput {
            timestamp_ms: now,
            face_present: metrics.face_present,
            signals: self.signals,
            gesture: self.gesture,
            dialog,
            calibration: self.calibration.phase(),
            debug: ScoringDebug {
                eye_raw: metrics.eye_raw,
                eye_adj: look.eye_adj,
                left_mag: metrics.left_eye_mag,
                right_mag: metrics.right_eye_mag,
                head_raw: metrics.head_yaw,
                head_factor: look.head_factor,
            },
        };
        self.last_output = Some(output.clone());
        output
    }

    /// Drop the baseline; the next face frame starts a new calibration window
    pub fn recalibrate(&mut self) {
        info!(frames = self.frame_count, "Recalibration requested");
        self.calibration.reset();
    }

    /// Current status snapshot (floats rounded)
    pub fn status_snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            smile_count: self.smiles.count,
            heart_detected: self.heart_detected,
            gesture: self.gesture,
            smile: round4(self.signals.smile),
            look_away: round4(self.signals.look_away_score),
            sadness: round4(self.signals.sadness),
        }
    }

    pub fn signals(&self) -> &SmoothedSignals {
        &self.signals
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn dialog_line(&self) -> DialogLine {
        self.dialog.current()
    }

    pub fn calibration_phase(&self) -> CalibrationPhase {
        self.calibration.phase()
    }

    pub fn heart_params(&self) -> &HeartParams {
        &self.heart_params
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn smile_count(&self) -> u32 {
        self.smiles.count
    }

    pub fn heart_detected(&self) -> bool {
        self.heart_detected
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Output of the last update, if any
    pub fn current_output(&self) -> Option<&FrameOutput> {
        self.last_output.as_ref()
    }

    /// Reset session to initial state (configuration kept)
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Blendshapes, FaceLandmarks, LandmarkSet, Point};

    fn smiling_face(smile: f64) -> FaceLandmarks {
        let blend: Blendshapes = [("mouthSmileLeft", smile), ("mouthSmileRight", smile)]
            .into_iter()
            .collect();
        FaceLandmarks::new(LandmarkSet::with_len(478)).with_blendshapes(blend)
    }

    #[test]
    fn test_initial_state() {
        let tracker = Tracker::default();
        assert_eq!(tracker.dialog_line(), DialogLine::Apologize);
        assert_eq!(tracker.calibration_phase(), CalibrationPhase::Uncollected);
        assert!(tracker.current_output().is_none());
        assert_eq!(tracker.status_snapshot().smile_count, 0);
    }

    #[test]
    fn test_first_frame_has_no_smoothing_step() {
        let mut tracker = Tracker::default();
        let frame = LandmarkFrame::new(1000.0).with_face(smiling_face(1.0));
        let out = tracker.update(&frame);
        assert_eq!(out.signals.smile, 0.0);
        assert_eq!(out.calibration, CalibrationPhase::Collecting);

        let out = tracker.update(&LandmarkFrame::new(1033.0).with_face(smiling_face(1.0)));
        assert!(out.signals.smile > 0.2);
    }

    #[test]
    fn test_smile_counter_rising_edges() {
        let mut tracker = Tracker::default();
        let mut t = 0.0;
        for smile in [1.0, 0.0, 1.0] {
            for _ in 0..30 {
                tracker.update(&LandmarkFrame::new(t).with_face(smiling_face(smile)));
                t += 33.0;
            }
        }
        assert_eq!(tracker.smile_count(), 2);
    }

    #[test]
    fn test_no_face_scores_neutral_and_skips_calibration() {
        let mut tracker = Tracker::default();
        let out = tracker.update(&LandmarkFrame::new(0.0));
        assert!(!out.face_present);
        assert_eq!(out.calibration, CalibrationPhase::Uncollected);
        assert!(out.signals.is_bounded());
    }

    #[test]
    fn test_recalibrate_flag_resets_baseline() {
        let mut tracker = Tracker::default();
        let face = FaceLandmarks::new(LandmarkSet::with_len(478));
        for i in 0..50 {
            tracker.update(&LandmarkFrame::new(i as f64 * 40.0).with_face(face.clone()));
        }
        assert_eq!(tracker.calibration_phase(), CalibrationPhase::Ready);

        let mut frame = LandmarkFrame::new(2000.0).with_face(face);
        frame.recalibrate = true;
        let out = tracker.update(&frame);
        assert_eq!(out.calibration, CalibrationPhase::Collecting);
    }

    #[test]
    fn test_hand_disappearing_clears_heart_state() {
        let mut tracker = Tracker::new(TrackerConfig {
            hand_interval_ms: 0.0,
            ..TrackerConfig::default()
        });
        let hand = vec![crate::types::HandLandmarks(LandmarkSet::from_points([Point::new(0.5, 0.5)]))];
        let out = tracker.update(&LandmarkFrame::new(0.0).with_hands(hand));
        assert!(out.signals.hand_present);
        let out = tracker.update(&LandmarkFrame::new(33.0).with_hands(vec![]));
        assert!(!out.signals.hand_present);
        assert!(!out.signals.heart);
        assert_eq!(out.gesture, Gesture::None);
    }
}
