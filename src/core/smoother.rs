//! Time-aware exponential smoothing and two-threshold hysteresis
//!
//! Frame timing is irregular, so the smoothing factor is derived from the
//! actual frame interval rather than fixed per frame.

use crate::core::geometry::clamp01;

/// Smoothing factor for an interval of `dt_ms` with time constant `tau_ms`.
///
/// `dt_ms` is clamped at 0 and `tau_ms` floored at 1 ms, so the result is
/// always in [0, 1).
pub fn ema_alpha(dt_ms: f64, tau_ms: f64) -> f64 {
    let dt = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
    let tau = if tau_ms.is_finite() { tau_ms.max(1.0) } else { 1.0 };
    1.0 - (-dt / tau).exp()
}

/// Bounded exponential moving average in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ema {
    value: f64,
}

impl Ema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move toward `raw` by `alpha`; result clamped to [0, 1]
    pub fn update(&mut self, raw: f64, alpha: f64) -> f64 {
        let raw = if raw.is_finite() { raw } else { 0.0 };
        self.value = clamp01(self.value + alpha * (raw - self.value));
        self.value
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

/// Two-threshold latch: turns on above `on`, stays on while above `off`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hysteresis {
    on: f64,
    off: f64,
    state: bool,
}

impl Hysteresis {
    /// `on` must be above `off`; the pair is swapped otherwise
    pub fn new(on: f64, off: f64) -> Self {
        let (on, off) = if on >= off { (on, off) } else { (off, on) };
        Self { on, off, state: false }
    }

    pub fn update(&mut self, score: f64) -> bool {
        self.state = if self.state { score > self.off } else { score > self.on };
        self.state
    }

    pub fn state(&self) -> bool {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = false;
    }
}
