//! Two-hand heart thresholds

use serde::{Deserialize, Serialize};
use crate::{
    HEART_FOUR_CLUSTER_MAX_SPREAD_T, HEART_FOUR_CROSS_TIP_TOUCH_T, HEART_FOUR_GROUP_TOUCH_T,
    HEART_OFF, HEART_ON, HEART_THUMB_FAR_MAX, HEART_THUMB_FAR_T, HEART_THUMB_TOUCH_T,
};

/// Lowest accepted sensitivity
pub const MIN_HEART_SENSITIVITY: f64 = 0.5;
/// Highest accepted sensitivity
pub const MAX_HEART_SENSITIVITY: f64 = 2.5;

/// How the two fingertip clusters must touch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchMode {
    /// Centroids close AND some cross-hand tips close; sub-score is the min
    #[default]
    RequireBoth,
    /// Centroids close OR some cross-hand tips close; sub-score is the max
    Either,
}

/// Geometric thresholds for the heart gesture, in hand-scale units.
///
/// Built once per session from a single sensitivity scalar and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartParams {
    pub thumb_touch_t: f64,
    pub thumb_far_t: f64,
    pub thumb_far_max: f64,
    pub four_cluster_max_spread_t: f64,
    pub four_group_touch_t: f64,
    pub four_cross_tip_touch_t: f64,
    pub on_t: f64,
    pub off_t: f64,
}

impl Default for HeartParams {
    fn default() -> Self {
        Self::from_sensitivity(1.0)
    }
}

impl HeartParams {
    /// `sensitivity > 1.0` makes the heart easier, `< 1.0` stricter.
    ///
    /// Touch/compactness thresholds scale with it; far/on/off scale inversely.
    pub fn from_sensitivity(sensitivity: f64) -> Self {
        let s = if sensitivity.is_finite() { sensitivity } else { 1.0 };
        let s = s.clamp(MIN_HEART_SENSITIVITY, MAX_HEART_SENSITIVITY);
        let inv = 1.0 / s.max(1e-6);

        Self {
            thumb_touch_t: HEART_THUMB_TOUCH_T * s,
            thumb_far_t: HEART_THUMB_FAR_T * inv,
            thumb_far_max: HEART_THUMB_FAR_MAX,
            four_cluster_max_spread_t: HEART_FOUR_CLUSTER_MAX_SPREAD_T * s,
            four_group_touch_t: HEART_FOUR_GROUP_TOUCH_T * s,
            four_cross_tip_touch_t: HEART_FOUR_CROSS_TIP_TOUCH_T * s,
            on_t: HEART_ON * inv,
            off_t: HEART_OFF * inv,
        }
    }
}
