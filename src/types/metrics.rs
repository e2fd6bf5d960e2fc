//! Per-frame raw metrics derived from one landmark frame

use serde::{Deserialize, Serialize};

/// Gesture booleans for a single hand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandGestures {
    /// Thumb, index, middle, ring, pinky
    pub extended: [bool; 5],
    pub open_palm: bool,
    pub thumbs_up: bool,
}

impl HandGestures {
    pub fn extended_count(&self) -> usize {
        self.extended.iter().filter(|e| **e).count()
    }
}

/// Scalar snapshot of one frame. Recomputed every frame, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMetrics {
    pub face_present: bool,
    /// Left eye iris offset (box half-extent units)
    pub left_eye_mag: f64,
    /// Right eye iris offset (box half-extent units)
    pub right_eye_mag: f64,
    /// Eye-only look-away magnitude: max of both eyes
    pub eye_raw: f64,
    /// Combined look-away magnitude: mean of both eyes
    pub eye_combined: f64,
    /// Head yaw proxy (dampening only)
    pub head_yaw: f64,
    /// Mouth corners raised, normalized by mouth width
    pub mouth_up: f64,
    /// Mouth corners lowered, normalized by mouth width
    pub mouth_down: f64,
    /// Blendshape smile score (0 when unavailable)
    pub smile_blendshape: f64,
    /// Blendshape frown score (0 when unavailable)
    pub sadness_blendshape: f64,
    /// Per-hand gestures, in detection order
    pub hands: Vec<HandGestures>,
    /// Two-hand heart raw score
    pub heart_score: f64,
}

impl RawMetrics {
    pub fn hand_present(&self) -> bool {
        !self.hands.is_empty()
    }

    pub fn any_open_palm(&self) -> bool {
        self.hands.iter().any(|h| h.open_palm)
    }

    pub fn any_thumbs_up(&self) -> bool {
        self.hands.iter().any(|h| h.thumbs_up)
    }
}
