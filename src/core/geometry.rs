//! Landmark Geometry Extractor
//!
//! Pure, total functions: landmark set → scalar metrics. A missing or
//! non-finite point yields a neutral value (0.0 / false) for the affected
//! metric only; nothing here returns an error.

use crate::core::gesture::hand_gestures;
use crate::core::heart::two_hand_heart_score;
use crate::types::{
    FaceLandmarks, HandLandmarks, HeartParams, LandmarkSet, Point, RawMetrics, TouchMode,
};

// =============================================================================
// FACE MESH INDICES (MediaPipe canonical numbering)
// =============================================================================

pub const LEFT_EYE_IDX: [usize; 16] = [
    33, 7, 163, 144, 145, 153, 154, 155, 133, 173, 157, 158, 159, 160, 161, 246,
];
pub const RIGHT_EYE_IDX: [usize; 16] = [
    263, 249, 390, 373, 374, 380, 381, 382, 362, 398, 384, 385, 386, 387, 388, 466,
];
pub const LEFT_IRIS_IDX: [usize; 5] = [473, 474, 475, 476, 477];
pub const RIGHT_IRIS_IDX: [usize; 5] = [468, 469, 470, 471, 472];

pub const NOSE_TIP: usize = 1;
pub const LEFT_EYE_OUTER: usize = 33;
pub const RIGHT_EYE_OUTER: usize = 263;

pub const MOUTH_LEFT: usize = 61;
pub const MOUTH_RIGHT: usize = 291;
pub const LIP_UPPER: usize = 13;
pub const LIP_LOWER: usize = 14;

// =============================================================================
// HAND INDICES (21-point MediaPipe hand)
// =============================================================================

pub const WRIST: usize = 0;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// Index, middle, ring, pinky fingertips
pub const FOUR_TIPS: [usize; 4] = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Smallest denominator used anywhere in normalization
pub const EPS: f64 = 1e-6;

/// Clamp into [0, 1]; non-finite → 0
pub fn clamp01(x: f64) -> f64 {
    if x.is_finite() {
        x.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Non-finite → 0
pub fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}

/// Linear map of `x` from `[t, max]` onto `[0, 1]`, clamped
pub fn ramp(x: f64, t: f64, max: f64) -> f64 {
    clamp01((x - t) / (max - t).max(EPS))
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) * 0.5, (self.min_y + self.max_y) * 0.5)
    }

    /// Half width / half height, each floored at `EPS`
    pub fn half_extents(&self) -> (f64, f64) {
        (
            ((self.max_x - self.min_x) * 0.5).max(EPS),
            ((self.max_y - self.min_y) * 0.5).max(EPS),
        )
    }
}

/// Bounding box of the valid points among `indices`
pub fn bbox(set: &LandmarkSet, indices: &[usize]) -> Option<BBox> {
    set.points_at(indices).fold(None::<BBox>, |acc, p| {
        Some(match acc {
            None => BBox { min_x: p.x, min_y: p.y, max_x: p.x, max_y: p.y },
            Some(b) => BBox {
                min_x: b.min_x.min(p.x),
                min_y: b.min_y.min(p.y),
                max_x: b.max_x.max(p.x),
                max_y: b.max_y.max(p.y),
            },
        })
    })
}

/// Mean of the given points; `None` when empty
pub fn centroid(points: impl IntoIterator<Item = Point>) -> Option<Point> {
    let (sx, sy, n) = points
        .into_iter()
        .fold((0.0, 0.0, 0usize), |(sx, sy, n), p| (sx + p.x, sy + p.y, n + 1));
    (n > 0).then(|| Point::new(sx / n as f64, sy / n as f64))
}

// =============================================================================
// EYES / HEAD
// =============================================================================

/// Iris offset from the eye box centre, in box half-extent units
pub fn eye_look_away_mag(set: &LandmarkSet, eye: &[usize], iris: &[usize]) -> f64 {
    let (Some(eye_box), Some(iris_center)) = (bbox(set, eye), centroid(set.points_at(iris))) else {
        return 0.0;
    };
    let mid = eye_box.center();
    let (half_w, half_h) = eye_box.half_extents();
    let dx = (iris_center.x - mid.x) / half_w;
    let dy = (iris_center.y - mid.y) / half_h;
    finite_or_zero(dx.hypot(dy))
}

/// Look-away magnitudes for both eyes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EyeMagnitudes {
    pub left: f64,
    pub right: f64,
}

impl EyeMagnitudes {
    pub fn measure(set: &LandmarkSet) -> Self {
        Self {
            left: eye_look_away_mag(set, &LEFT_EYE_IDX, &LEFT_IRIS_IDX),
            right: eye_look_away_mag(set, &RIGHT_EYE_IDX, &RIGHT_IRIS_IDX),
        }
    }

    /// Live scoring: more sensitive to single-eye motion
    pub fn eye_only(&self) -> f64 {
        self.left.max(self.right)
    }

    /// Calibration sampling: averaging damps single-eye jitter
    pub fn combined(&self) -> f64 {
        (self.left + self.right) * 0.5
    }
}

/// Head yaw proxy from nose/eye-corner asymmetry, boosted by depth when present
pub fn head_yaw_proxy(set: &LandmarkSet) -> f64 {
    let (Some(nose), Some(left), Some(right)) = (
        set.point(NOSE_TIP),
        set.point(LEFT_EYE_OUTER),
        set.point(RIGHT_EYE_OUTER),
    ) else {
        return 0.0;
    };

    let d_l = nose.distance(&left);
    let d_r = nose.distance(&right);
    let yaw_2d = (d_l - d_r).abs() / (d_l + d_r + EPS);

    let yaw_z = match (left.depth(), right.depth()) {
        (Some(lz), Some(rz)) => (lz - rz).abs() / ((left.x - right.x).abs() + EPS),
        _ => 0.0,
    };

    finite_or_zero(yaw_z.max(yaw_2d * 1.25))
}

// =============================================================================
// MOUTH
// =============================================================================

/// Signed (lip centre − corners) vertical offset over mouth width.
/// Positive: corners raised. Negative: corners lowered.
fn mouth_corner_offset(set: &LandmarkSet) -> Option<f64> {
    let left = set.point(MOUTH_LEFT)?;
    let right = set.point(MOUTH_RIGHT)?;
    let upper = set.point(LIP_UPPER)?;
    let lower = set.point(LIP_LOWER)?;

    let width = left.distance(&right);
    if !width.is_finite() {
        return None;
    }
    let center_y = (upper.y + lower.y) * 0.5;
    let corners_y = (left.y + right.y) * 0.5;
    let offset = (center_y - corners_y) / width.max(EPS);
    offset.is_finite().then_some(offset)
}

/// Corner raise (smile direction), ≥ 0
pub fn mouth_up_metric(set: &LandmarkSet) -> f64 {
    mouth_corner_offset(set).map_or(0.0, |o| o.max(0.0))
}

/// Corner drop (frown direction), ≥ 0
pub fn mouth_down_metric(set: &LandmarkSet) -> f64 {
    mouth_corner_offset(set).map_or(0.0, |o| (-o).max(0.0))
}

// =============================================================================
// HANDS
// =============================================================================

/// Tip further from the wrist than the PIP joint by ratio `k` (> 1)
pub fn is_finger_extended(hand: &HandLandmarks, tip: usize, pip: usize, k: f64) -> bool {
    match (hand.point(WRIST), hand.point(tip), hand.point(pip)) {
        (Some(w), Some(t), Some(p)) => w.distance(&t) > w.distance(&p) * k,
        _ => false,
    }
}

/// Tip closer to the wrist than the PIP joint scaled by `k`
pub fn is_finger_folded(hand: &HandLandmarks, tip: usize, pip: usize, k: f64) -> bool {
    match (hand.point(WRIST), hand.point(tip), hand.point(pip)) {
        (Some(w), Some(t), Some(p)) => w.distance(&t) < w.distance(&p) * k,
        _ => false,
    }
}

/// Mean of wrist and index/middle/pinky MCPs
pub fn palm_center(hand: &HandLandmarks) -> Option<Point> {
    let pts = [
        hand.point(WRIST)?,
        hand.point(INDEX_MCP)?,
        hand.point(MIDDLE_MCP)?,
        hand.point(PINKY_MCP)?,
    ];
    centroid(pts)
}

/// Wrist to middle-finger MCP distance, if both points exist
pub fn hand_scale(hand: &HandLandmarks) -> Option<f64> {
    let s = hand.point(WRIST)?.distance(&hand.point(MIDDLE_MCP)?);
    s.is_finite().then_some(s)
}

/// Largest distance between any two valid points among `indices`
pub fn max_pairwise_spread(hand: &HandLandmarks, indices: &[usize]) -> f64 {
    let pts: Vec<Point> = hand.0.points_at(indices).collect();
    let mut spread: f64 = 0.0;
    for (i, a) in pts.iter().enumerate() {
        for b in &pts[i + 1..] {
            spread = spread.max(a.distance(b));
        }
    }
    spread
}

// =============================================================================
// EXTRACTION
// =============================================================================

/// Blendshape smile: mean of left/right mouth smile
pub fn blendshape_smile(face: &FaceLandmarks) -> f64 {
    face.blendshapes.as_ref().map_or(0.0, |b| {
        clamp01((b.score("mouthSmileLeft") + b.score("mouthSmileRight")) * 0.5)
    })
}

/// Blendshape sadness: mean of left/right mouth frown
pub fn blendshape_sadness(face: &FaceLandmarks) -> f64 {
    face.blendshapes.as_ref().map_or(0.0, |b| {
        clamp01((b.score("mouthFrownLeft") + b.score("mouthFrownRight")) * 0.5)
    })
}

/// Everything the later stages need from one frame
pub fn extract_metrics(
    face: Option<&FaceLandmarks>,
    hands: &[HandLandmarks],
    heart: &HeartParams,
    touch: TouchMode,
) -> RawMetrics {
    let mut metrics = RawMetrics {
        hands: hands.iter().map(hand_gestures).collect(),
        heart_score: two_hand_heart_score(hands, heart, touch),
        ..RawMetrics::default()
    };

    if let Some(face) = face {
        let lm = &face.landmarks;
        let eyes = EyeMagnitudes::measure(lm);
        metrics.face_present = true;
        metrics.left_eye_mag = eyes.left;
        metrics.right_eye_mag = eyes.right;
        metrics.eye_raw = eyes.eye_only();
        metrics.eye_combined = eyes.combined();
        metrics.head_yaw = head_yaw_proxy(lm);
        metrics.mouth_up = mouth_up_metric(lm);
        metrics.mouth_down = mouth_down_metric(lm);
        metrics.smile_blendshape = blendshape_smile(face);
        metrics.sadness_blendshape = blendshape_sadness(face);
    }

    metrics
}
