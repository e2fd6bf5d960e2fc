//! Integration tests for hand gestures through a tracking session

mod common;

use common::{frames, heart_hands, neutral_face, open_palm_hand, thumbs_up_hand};
use facemotion::core::Tracker;
use facemotion::types::{DialogLine, Gesture, LandmarkFrame, TouchMode};
use facemotion::TrackerConfig;
use pretty_assertions::assert_eq;

#[test]
fn test_two_hand_heart_turns_on() {
    let mut tracker = Tracker::default();
    assert!((tracker.heart_params().on_t - 0.44).abs() < 1e-12);

    let outputs: Vec<_> = frames(0.0, 33.0, 30, |t| {
        LandmarkFrame::new(t).with_face(neutral_face()).with_hands(heart_hands())
    })
    .iter()
    .map(|f| tracker.update(f))
    .collect();

    // EMA needs a few frames before crossing the on threshold
    assert!(!outputs[1].signals.heart);
    let first_on = outputs.iter().position(|o| o.signals.heart).unwrap();
    assert!(first_on >= 4, "heart on too early at frame {}", first_on);

    let last = outputs.last().unwrap();
    assert!(last.signals.heart_score > 0.6);
    assert_eq!(last.gesture, Gesture::TwoHandHeart);
    assert_eq!(last.dialog, DialogLine::Heart);
    assert!(tracker.status_snapshot().heart_detected);
}

#[test]
fn test_heart_latch_survives_hands_leaving() {
    let mut tracker = Tracker::default();
    for frame in frames(0.0, 33.0, 30, |t| LandmarkFrame::new(t).with_hands(heart_hands())) {
        tracker.update(&frame);
    }
    assert!(tracker.signals().heart);

    let out = tracker.update(&LandmarkFrame::new(1000.0).with_hands(vec![]));
    assert!(!out.signals.hand_present);
    assert!(!out.signals.heart);
    assert_eq!(out.gesture, Gesture::None);
    assert!(tracker.heart_detected());
}

#[test]
fn test_thumbs_up_dialog() {
    let mut tracker = Tracker::default();
    let mut last = None;
    for frame in frames(0.0, 33.0, 20, |t| {
        LandmarkFrame::new(t).with_face(neutral_face()).with_hands(vec![thumbs_up_hand()])
    }) {
        last = Some(tracker.update(&frame));
    }
    let last = last.unwrap();
    assert!(last.signals.thumbs_up);
    assert!(!last.signals.open_palm);
    assert_eq!(last.gesture, Gesture::ThumbsUp);
    assert_eq!(last.dialog, DialogLine::ThumbsUp);
}

#[test]
fn test_thumbs_up_beats_open_palm() {
    let mut tracker = Tracker::default();
    let out = tracker.update(
        &LandmarkFrame::new(0.0).with_hands(vec![open_palm_hand(), thumbs_up_hand()]),
    );
    assert!(out.signals.open_palm);
    assert!(out.signals.thumbs_up);
    assert_eq!(out.gesture, Gesture::ThumbsUp);
}

#[test]
fn test_open_palm_follows_current_frame() {
    let mut tracker = Tracker::new(TrackerConfig {
        hand_interval_ms: 0.0,
        ..TrackerConfig::default()
    });
    let out = tracker.update(&LandmarkFrame::new(0.0).with_hands(vec![open_palm_hand()]));
    assert_eq!(out.gesture, Gesture::OpenPalm);
    let out = tracker.update(&LandmarkFrame::new(33.0).with_hands(vec![thumbs_up_hand()]));
    assert_eq!(out.gesture, Gesture::ThumbsUp);
}

#[test]
fn test_looking_away_outranks_gesture_dialog() {
    let mut tracker = Tracker::default();
    let away = common::face(0.05, 0.70);
    let mut last = None;
    for frame in frames(0.0, 33.0, 30, |t| {
        LandmarkFrame::new(t).with_face(away.clone()).with_hands(vec![open_palm_hand()])
    }) {
        last = Some(tracker.update(&frame));
    }
    let last = last.unwrap();
    assert_eq!(last.gesture, Gesture::OpenPalm);
    assert_eq!(last.dialog, DialogLine::LookingAway);
}

#[test]
fn test_no_hand_config_ignores_hands() {
    let mut tracker = Tracker::new(TrackerConfig {
        hand_tracking: false,
        ..TrackerConfig::default()
    });
    let out = tracker.update(&LandmarkFrame::new(0.0).with_hands(vec![thumbs_up_hand()]));
    assert!(!out.signals.hand_present);
    assert_eq!(out.gesture, Gesture::None);
}

#[test]
fn test_touch_either_config() {
    let tracker = Tracker::new(TrackerConfig {
        heart_touch: TouchMode::Either,
        heart_sensitivity: 1.0,
        ..TrackerConfig::default()
    });
    assert_eq!(tracker.config().heart_touch, TouchMode::Either);
    assert!((tracker.heart_params().on_t - 0.55).abs() < 1e-12);
}
