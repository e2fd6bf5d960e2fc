//! Synthetic landmark fixtures shared by the integration tests

#![allow(dead_code)]

use facemotion::core::geometry::{
    LEFT_EYE_IDX, LEFT_IRIS_IDX, LIP_LOWER, LIP_UPPER, MOUTH_LEFT, MOUTH_RIGHT, NOSE_TIP,
    RIGHT_EYE_IDX, RIGHT_IRIS_IDX,
};
use facemotion::types::{Blendshapes, FaceLandmarks, HandLandmarks, LandmarkFrame, LandmarkSet, Point};

/// Frontal face. `iris_offset` shifts both irises right (eye half width is 0.05);
/// `corner_y` sets the mouth corners (lip centre sits at 0.70).
pub fn face(iris_offset: f64, corner_y: f64) -> FaceLandmarks {
    let mut set = LandmarkSet::with_len(478);
    for (eye, iris, cx) in [
        (&LEFT_EYE_IDX[..], &LEFT_IRIS_IDX[..], 0.60),
        (&RIGHT_EYE_IDX[..], &RIGHT_IRIS_IDX[..], 0.30),
    ] {
        for (i, &idx) in eye.iter().enumerate() {
            let p = match i {
                0 => Point::new(cx - 0.05, 0.38),
                1 => Point::new(cx + 0.05, 0.42),
                _ => Point::new(cx, 0.40),
            };
            set.set(idx, p);
        }
        for &idx in iris {
            set.set(idx, Point::new(cx + iris_offset, 0.40));
        }
    }
    // equidistant from both outer eye corners (0.55 and 0.25)
    set.set(NOSE_TIP, Point::new(0.40, 0.50));

    set.set(MOUTH_LEFT, Point::new(0.45, corner_y));
    set.set(MOUTH_RIGHT, Point::new(0.55, corner_y));
    set.set(LIP_UPPER, Point::new(0.50, 0.69));
    set.set(LIP_LOWER, Point::new(0.50, 0.71));
    FaceLandmarks::new(set)
}

pub fn neutral_face() -> FaceLandmarks {
    face(0.0, 0.70)
}

/// Face with no geometry, only a blendshape smile
pub fn blendshape_smile(score: f64) -> FaceLandmarks {
    let blend: Blendshapes = [("mouthSmileLeft", score), ("mouthSmileRight", score)]
        .into_iter()
        .collect();
    FaceLandmarks::new(LandmarkSet::with_len(478)).with_blendshapes(blend)
}

/// Single hand. `fingers_up` false gives a fist with the thumb up.
pub fn hand(fingers_up: bool) -> HandLandmarks {
    let mut set = LandmarkSet::with_len(21);
    set.set(0, Point::new(0.5, 0.7));
    set.set(5, Point::new(0.45, 0.55));
    set.set(9, Point::new(0.5, 0.55));
    set.set(13, Point::new(0.55, 0.55));
    set.set(17, Point::new(0.6, 0.56));
    set.set(1, Point::new(0.42, 0.65));
    set.set(2, Point::new(0.38, 0.58));
    set.set(3, Point::new(0.37, 0.50));
    set.set(4, Point::new(0.37, 0.40));

    let (pip_y, tip_y) = if fingers_up { (0.45, 0.30) } else { (0.48, 0.60) };
    for ((pip, tip), x) in [(6, 8), (10, 12), (14, 16), (18, 20)]
        .into_iter()
        .zip([0.45, 0.5, 0.55, 0.6])
    {
        set.set(pip, Point::new(x, pip_y));
        set.set(tip, Point::new(x, tip_y));
    }
    HandLandmarks(set)
}

pub fn thumbs_up_hand() -> HandLandmarks {
    hand(false)
}

pub fn open_palm_hand() -> HandLandmarks {
    hand(true)
}

/// Hand laid out in hand-scale units (scale 0.2 in image space)
fn heart_hand(wrist: (f64, f64), thumb: (f64, f64), tips: [(f64, f64); 4]) -> HandLandmarks {
    let map = |(x, y): (f64, f64)| Point::new(0.5 + x * 0.2, 0.4 + y * 0.2);
    let mut set = LandmarkSet::from_points(std::iter::repeat(map(wrist)).take(21));
    set.set(9, map((wrist.0, wrist.1 - 1.0)));
    set.set(4, map(thumb));
    for (idx, tip) in [8, 12, 16, 20].into_iter().zip(tips) {
        set.set(idx, map(tip));
    }
    HandLandmarks(set)
}

/// Thumbs 0.10 apart, clusters 0.05 wide and 0.05 apart (hand-scale units)
pub fn heart_hands() -> Vec<HandLandmarks> {
    vec![
        heart_hand(
            (-0.6, 0.8),
            (-0.05, 1.0),
            [(-0.05, -0.2), (0.0, -0.2), (-0.025, -0.225), (-0.025, -0.175)],
        ),
        heart_hand(
            (0.6, 0.8),
            (0.05, 1.0),
            [(0.0, -0.2), (0.05, -0.2), (0.025, -0.225), (0.025, -0.175)],
        ),
    ]
}

/// `count` frames every `step_ms` starting at `start_ms`
pub fn frames(
    start_ms: f64,
    step_ms: f64,
    count: usize,
    make: impl Fn(f64) -> LandmarkFrame,
) -> Vec<LandmarkFrame> {
    (0..count).map(|i| make(start_ms + i as f64 * step_ms)).collect()
}
