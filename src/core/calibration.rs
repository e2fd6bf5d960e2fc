//! Calibration Engine: one-shot neutral baseline per session
//!
//! Phases:
//! - UNCOLLECTED → COLLECTING: first frame with a face
//! - COLLECTING: warm-up ignored, then samples accumulated
//! - COLLECTING → READY: collection window elapsed with at least one sample
//! - any → UNCOLLECTED: explicit reset

use tracing::{debug, info};
use crate::{CALIBRATION_DURATION_MS, CALIBRATION_WARMUP_MS};
use crate::types::{CalibrationBaseline, CalibrationPhase, CalibrationSample};

/// Calibration engine
#[derive(Debug, Clone, Default)]
pub struct CalibrationEngine {
    /// Current phase
    phase: CalibrationPhase,
    /// When collection started (first face frame)
    start_ms: f64,
    /// Running sums over the collection window
    sum: CalibrationSample,
    /// Accepted samples
    count: u32,
    /// Frozen means, present once READY
    baseline: Option<CalibrationBaseline>,
}

impl CalibrationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one face frame's metrics
    pub fn update(&mut self, now_ms: f64, sample: CalibrationSample) -> CalibrationPhase {
        match self.phase {
            CalibrationPhase::Ready => return self.phase,
            CalibrationPhase::Uncollected => self.start(now_ms),
            CalibrationPhase::Collecting => {}
        }

        let elapsed = now_ms - self.start_ms;
        if elapsed < CALIBRATION_WARMUP_MS {
            return self.phase;
        }

        if elapsed > CALIBRATION_WARMUP_MS + CALIBRATION_DURATION_MS {
            if self.count == 0 {
                debug!("Calibration window closed without samples, restarting");
                self.start(now_ms);
            } else {
                self.freeze();
            }
            return self.phase;
        }

        if sample.is_finite() {
            self.sum.eye += sample.eye;
            self.sum.head += sample.head;
            self.sum.mouth_up += sample.mouth_up;
            self.sum.mouth_down += sample.mouth_down;
            self.count += 1;
        }

        self.phase
    }

    fn start(&mut self, now_ms: f64) {
        *self = Self::new();
        self.phase = CalibrationPhase::Collecting;
        self.start_ms = now_ms;
    }

    fn freeze(&mut self) {
        let n = f64::from(self.count);
        let baseline = CalibrationBaseline {
            eye0: self.sum.eye / n,
            head0: self.sum.head / n,
            mouth_up0: self.sum.mouth_up / n,
            mouth_down0: self.sum.mouth_down / n,
        };
        info!(
            samples = self.count,
            eye0 = baseline.eye0,
            mouth_up0 = baseline.mouth_up0,
            mouth_down0 = baseline.mouth_down0,
            "Calibration ready"
        );
        self.baseline = Some(baseline);
        self.phase = CalibrationPhase::Ready;
    }

    /// Baseline, only once READY
    pub fn baseline(&self) -> Option<&CalibrationBaseline> {
        self.baseline.as_ref()
    }

    pub fn phase(&self) -> CalibrationPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == CalibrationPhase::Ready
    }

    /// Samples accepted so far in the current window
    pub fn sample_count(&self) -> u32 {
        self.count
    }

    /// Discard everything; the next face frame starts a new window
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

// =============================================================================
// TESTS
// =============================================================================
