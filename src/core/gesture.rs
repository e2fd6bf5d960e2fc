//! Single-hand gestures and frame-level gesture priority

use crate::core::geometry::{
    hand_scale, is_finger_extended, is_finger_folded, palm_center, INDEX_PIP, INDEX_TIP,
    MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP, RING_PIP, RING_TIP, THUMB_IP, THUMB_MCP,
    THUMB_TIP,
};
use crate::types::{Gesture, HandGestures, HandLandmarks};

/// Tip/PIP ratio for an extended finger
const FINGER_EXTENDED_K: f64 = 1.12;
/// Tip/IP ratio for an extended thumb (thumb geometry is shorter)
const THUMB_EXTENDED_K: f64 = 1.18;
/// Tip/PIP ratio under which a finger counts as folded
const FINGER_FOLDED_K: f64 = 1.05;
/// Fingers (of five) that must be extended for an open palm
const OPEN_PALM_MIN_EXTENDED: usize = 4;

/// Thumb tip must sit this far above the thumb MCP
const THUMB_ABOVE_MCP: f64 = 0.035;
/// Thumb tip must sit this far above the palm centre
const THUMB_ABOVE_PALM: f64 = 0.02;
/// Thumb tip distance from palm centre, in hand-scale units
const THUMB_FROM_PALM_MIN: f64 = 0.75;

/// (tip, pip) for index, middle, ring, pinky
const FINGERS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

/// Classify one hand
pub fn hand_gestures(hand: &HandLandmarks) -> HandGestures {
    let mut extended = [false; 5];
    extended[0] = is_finger_extended(hand, THUMB_TIP, THUMB_IP, THUMB_EXTENDED_K);
    for (slot, &(tip, pip)) in extended[1..].iter_mut().zip(FINGERS.iter()) {
        *slot = is_finger_extended(hand, tip, pip, FINGER_EXTENDED_K);
    }

    let open_palm = extended.iter().filter(|e| **e).count() >= OPEN_PALM_MIN_EXTENDED;
    let thumbs_up = extended[0] && is_thumbs_up(hand);

    HandGestures { extended, open_palm, thumbs_up }
}

/// Thumb pointing up over a closed fist. Image y grows downward.
fn is_thumbs_up(hand: &HandLandmarks) -> bool {
    let all_folded = FINGERS
        .iter()
        .all(|&(tip, pip)| is_finger_folded(hand, tip, pip, FINGER_FOLDED_K));
    if !all_folded {
        return false;
    }

    let (Some(tip), Some(mcp), Some(palm)) =
        (hand.point(THUMB_TIP), hand.point(THUMB_MCP), palm_center(hand))
    else {
        return false;
    };

    if tip.y >= mcp.y - THUMB_ABOVE_MCP || tip.y >= palm.y - THUMB_ABOVE_PALM {
        return false;
    }

    let scale = hand_scale(hand).unwrap_or(1.0).max(1e-6);
    tip.distance(&palm) / scale > THUMB_FROM_PALM_MIN
}

/// Frame gesture label. Priority: heart > thumbs-up > open palm.
pub fn classify(heart: bool, thumbs_up: bool, open_palm: bool) -> Gesture {
    if heart {
        Gesture::TwoHandHeart
    } else if thumbs_up {
        Gesture::ThumbsUp
    } else if open_palm {
        Gesture::OpenPalm
    } else {
        Gesture::None
    }
}
