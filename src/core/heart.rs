//! Two-hand heart scoring
//!
//! Both thumb tips touch, each hand's other four fingertips form a tight
//! cluster away from its own thumb, and the two clusters touch across hands.
//! All distances are normalized by the pair's mean hand scale.

use crate::core::geometry::{
    centroid, clamp01, hand_scale, max_pairwise_spread, EPS, FOUR_TIPS, THUMB_TIP, WRIST,
};
use crate::types::{HandLandmarks, HeartParams, Point, TouchMode};
use crate::{HEART_MAX_HANDS, HEART_MAX_WRIST_DISTANCE};

/// Normalized distances for one hand pair
#[derive(Debug, Clone, Copy, PartialEq)]
struct PairGeometry {
    thumbs: f64,
    thumb_far: [f64; 2],
    spread: [f64; 2],
    centers: f64,
    min_cross_tip: f64,
}

/// Best heart score over all pairs among the first few hands, in [0, 1]
pub fn two_hand_heart_score(hands: &[HandLandmarks], params: &HeartParams, touch: TouchMode) -> f64 {
    let n = hands.len().min(HEART_MAX_HANDS);
    let mut best: f64 = 0.0;

    for i in 0..n {
        for j in (i + 1)..n {
            if let Some(score) = pair_geometry(&hands[i], &hands[j]).and_then(|g| score_pair(&g, params, touch)) {
                best = best.max(score);
            }
        }
    }

    clamp01(best)
}

fn pair_geometry(h1: &HandLandmarks, h2: &HandLandmarks) -> Option<PairGeometry> {
    let t1 = h1.point(THUMB_TIP)?;
    let t2 = h2.point(THUMB_TIP)?;
    let w1 = h1.point(WRIST)?;
    let w2 = h2.point(WRIST)?;

    let scale_of = |h: &HandLandmarks| hand_scale(h).unwrap_or(0.0).max(EPS);
    let scale = (scale_of(h1) + scale_of(h2)) * 0.5;

    if w1.distance(&w2) / scale > HEART_MAX_WRIST_DISTANCE {
        return None;
    }

    let c1 = centroid(h1.0.points_at(&FOUR_TIPS))?;
    let c2 = centroid(h2.0.points_at(&FOUR_TIPS))?;

    let tips2: Vec<Point> = h2.0.points_at(&FOUR_TIPS).collect();
    let min_cross_tip = h1
        .0
        .points_at(&FOUR_TIPS)
        .flat_map(|a| tips2.iter().map(move |b| a.distance(b)))
        .fold(f64::INFINITY, f64::min)
        / scale;
    if !min_cross_tip.is_finite() {
        return None;
    }

    Some(PairGeometry {
        thumbs: t1.distance(&t2) / scale,
        thumb_far: [t1.distance(&c1) / scale, t2.distance(&c2) / scale],
        spread: [
            max_pairwise_spread(h1, &FOUR_TIPS) / scale,
            max_pairwise_spread(h2, &FOUR_TIPS) / scale,
        ],
        centers: c1.distance(&c2) / scale,
        min_cross_tip,
    })
}

/// `None` when a hard requirement fails; otherwise the weakest sub-score
fn score_pair(g: &PairGeometry, p: &HeartParams, touch: TouchMode) -> Option<f64> {
    if g.thumbs > p.thumb_touch_t {
        return None;
    }
    if g.thumb_far.iter().any(|&d| d < p.thumb_far_t) {
        return None;
    }
    if g.spread.iter().any(|&s| s > p.four_cluster_max_spread_t) {
        return None;
    }
    let centers_touch = g.centers <= p.four_group_touch_t;
    let tips_touch = g.min_cross_tip <= p.four_cross_tip_touch_t;
    let touching = match touch {
        TouchMode::RequireBoth => centers_touch && tips_touch,
        TouchMode::Either => centers_touch || tips_touch,
    };
    if !touching {
        return None;
    }

    let s_thumb_touch = clamp01(1.0 - g.thumbs / p.thumb_touch_t);
    let far_range = (p.thumb_far_max - p.thumb_far_t).max(EPS);
    let s_thumb_far = clamp01(
        g.thumb_far
            .iter()
            .map(|&d| (d - p.thumb_far_t) / far_range)
            .fold(f64::INFINITY, f64::min),
    );
    let s_cluster = clamp01(1.0 - g.spread[0].max(g.spread[1]) / p.four_cluster_max_spread_t);
    let s_centers = clamp01(1.0 - g.centers / p.four_group_touch_t);
    let s_tips = clamp01(1.0 - g.min_cross_tip / p.four_cross_tip_touch_t);
    let s_touch = match touch {
        TouchMode::RequireBoth => s_centers.min(s_tips),
        TouchMode::Either => s_centers.max(s_tips),
    };

    Some(s_thumb_touch.min(s_thumb_far).min(s_cluster).min(s_touch))
}
