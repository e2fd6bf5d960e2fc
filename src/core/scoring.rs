//! Raw metrics → per-frame scores in [0, 1]
//!
//! Before calibration everything is scored against absolute thresholds.
//! Once a baseline exists, look-away and mouth geometry are scored as
//! deltas from the user's neutral face.

use crate::core::geometry::{clamp01, ramp, EPS};
use crate::types::CalibrationBaseline;
use crate::{
    HEAD_DAMP, HEAD_DELTA_T_BOOST, HEAD_GUARD_MAX, HEAD_GUARD_T, LOOK_EYE_DELTA_MAX,
    LOOK_EYE_DELTA_T, LOOK_EYE_MAX, LOOK_EYE_T, SAD_DEADZONE, SAD_GAMMA,
    SAD_GEOM_WEIGHT_PRECALIB, SAD_MOUTH_DOWN_MAX, SAD_MOUTH_DOWN_T, SMILE_DEADZONE, SMILE_GAMMA,
    SMILE_GEOM_WEIGHT_PRECALIB, SMILE_MOUTH_UP_MAX, SMILE_MOUTH_UP_T,
};

/// Deadzone then gamma curve. `x ≤ deadzone` → 0.
pub fn shape_score(x: f64, deadzone: f64, gamma: f64) -> f64 {
    let x = clamp01(x);
    let dz = clamp01(deadzone);
    if x <= dz {
        return 0.0;
    }
    let y = (x - dz) / (1.0 - dz).max(EPS);
    clamp01(y.powf(gamma.max(0.1)))
}

/// How far the head guard is engaged, in [0, 1]
pub fn head_guard(head_raw: f64) -> f64 {
    ramp(head_raw, HEAD_GUARD_T, HEAD_GUARD_MAX)
}

/// Look-away score plus the intermediates shown in the debug HUD
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LookAwayScore {
    pub score: f64,
    /// Baseline-subtracted eye magnitude (0 before calibration)
    pub eye_adj: f64,
    pub head_factor: f64,
}

/// Score the eye-only magnitude, dampened when the head is turned
pub fn look_away_score(
    eye_raw: f64,
    head_raw: f64,
    baseline: Option<&CalibrationBaseline>,
) -> LookAwayScore {
    let guard = head_guard(head_raw);

    let (score, eye_adj) = match baseline {
        Some(b) => {
            let adj = (eye_raw - b.eye0).max(0.0);
            let t = LOOK_EYE_DELTA_T + HEAD_DELTA_T_BOOST * guard;
            (ramp(adj, t, LOOK_EYE_DELTA_MAX), adj)
        }
        None => (ramp(eye_raw, LOOK_EYE_T, LOOK_EYE_MAX), 0.0),
    };

    LookAwayScore {
        score: clamp01(score * (1.0 - HEAD_DAMP * guard)),
        eye_adj,
        head_factor: guard,
    }
}

/// Mouth geometry score over `[t, max]` after subtracting `baseline`
fn mouth_geometry(metric: f64, baseline: f64, t: f64, max: f64) -> f64 {
    if metric <= 0.0 {
        return 0.0;
    }
    ramp((metric - baseline).max(0.0), t, max)
}

/// Shaped smile from the blendshape score and the corner-raise metric
pub fn smile_score(blendshape: f64, mouth_up: f64, baseline: Option<&CalibrationBaseline>) -> f64 {
    let (base, weight) = baseline.map_or((0.0, SMILE_GEOM_WEIGHT_PRECALIB), |b| (b.mouth_up0, 1.0));
    let geom = mouth_geometry(mouth_up, base, SMILE_MOUTH_UP_T, SMILE_MOUTH_UP_MAX);
    shape_score(blendshape.max(geom * weight), SMILE_DEADZONE, SMILE_GAMMA)
}

/// Shaped sadness from the blendshape score and the corner-drop metric
pub fn sadness_score(blendshape: f64, mouth_down: f64, baseline: Option<&CalibrationBaseline>) -> f64 {
    let (base, weight) = baseline.map_or((0.0, SAD_GEOM_WEIGHT_PRECALIB), |b| (b.mouth_down0, 1.0));
    let geom = mouth_geometry(mouth_down, base, SAD_MOUTH_DOWN_T, SAD_MOUTH_DOWN_MAX);
    shape_score(blendshape.max(geom * weight), SAD_DEADZONE, SAD_GAMMA)
}
