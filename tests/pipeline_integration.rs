//! Integration tests for the per-frame pipeline
//!
//! landmarks → geometry → calibration → smoothing → dialog

mod common;

use common::{blendshape_smile, face, frames, neutral_face};
use facemotion::core::Tracker;
use facemotion::core::geometry::RIGHT_IRIS_IDX;
use facemotion::types::{CalibrationPhase, DialogLine, LandmarkFrame, Point};
use facemotion::{DIALOG_HOLD_MS, LOOK_ON};
use pretty_assertions::assert_eq;

/// Neutral face until the baseline is frozen
fn calibrate(tracker: &mut Tracker) -> f64 {
    let mut t = 0.0;
    while tracker.calibration_phase() != CalibrationPhase::Ready {
        tracker.update(&LandmarkFrame::new(t).with_face(neutral_face()));
        t += 40.0;
        assert!(t < 5000.0, "calibration never finished");
    }
    t
}

#[test]
fn test_face_absent_shows_cant_see_face() {
    let mut tracker = Tracker::default();

    // smile first so there is something to decay
    let mut t = 0.0;
    for _ in 0..30 {
        tracker.update(&LandmarkFrame::new(t).with_face(blendshape_smile(1.0)));
        t += 40.0;
    }
    let mut prev_smile = tracker.signals().smile;
    assert!(prev_smile > 0.9);

    let mut last = None;
    for frame in frames(t, 40.0, 10, LandmarkFrame::new) {
        let out = tracker.update(&frame);
        assert!(out.signals.is_bounded());
        assert!(out.signals.smile <= prev_smile);
        prev_smile = out.signals.smile;
        last = Some(out);
    }

    let last = last.unwrap();
    assert_eq!(last.dialog, DialogLine::CantSeeFace);
    assert!(!last.face_present);
    assert!(last.signals.smile < 0.1);
    assert_eq!(last.signals.sadness, 0.0);
}

#[test]
fn test_smile_oscillation_stays_in_band() {
    let mut tracker = Tracker::default();
    for i in 0..300 {
        let raw = if i % 2 == 0 { 1.0 } else { 0.0 };
        let out = tracker.update(&LandmarkFrame::new(i as f64 * 33.0).with_face(blendshape_smile(raw)));
        if i >= 20 {
            assert!(
                (0.05..=0.95).contains(&out.signals.smile),
                "frame {}: smile {}",
                i,
                out.signals.smile
            );
        }
    }
}

#[test]
fn test_calibration_reaches_ready_once() {
    let mut tracker = Tracker::default();
    let mut transitions = 0;
    let mut prev = tracker.calibration_phase();
    for frame in frames(0.0, 40.0, 100, |t| LandmarkFrame::new(t).with_face(neutral_face())) {
        let phase = tracker.update(&frame).calibration;
        if phase == CalibrationPhase::Ready && prev != CalibrationPhase::Ready {
            transitions += 1;
        }
        prev = phase;
    }
    assert_eq!(transitions, 1);
    assert_eq!(tracker.calibration_phase(), CalibrationPhase::Ready);
}

#[test]
fn test_gaze_shift_turns_looking_away_on() {
    let mut tracker = Tracker::default();
    let t0 = calibrate(&mut tracker);

    // 0.35 half-extents off centre, against a zero baseline
    let mut out = None;
    for frame in frames(t0, 40.0, 40, |t| LandmarkFrame::new(t).with_face(face(0.0175, 0.70))) {
        out = Some(tracker.update(&frame));
    }
    let mut out = out.unwrap();
    assert!(out.signals.look_away_score > LOOK_ON);
    assert!(out.signals.looking_away);
    assert_eq!(out.dialog, DialogLine::LookingAway);
    assert!(out.debug.eye_adj > 0.3);

    // looking back: score decays, flag clears
    for frame in frames(t0 + 1600.0, 40.0, 40, |t| LandmarkFrame::new(t).with_face(neutral_face())) {
        out = tracker.update(&frame);
    }
    assert!(!out.signals.looking_away);
    assert_eq!(out.dialog, DialogLine::Apologize);
}

#[test]
fn test_head_turn_dampens_look_away() {
    let mut tracker = Tracker::default();
    let t0 = calibrate(&mut tracker);

    let turned = || {
        let mut f = face(0.0175, 0.70);
        // nose far toward the left eye corner
        f.landmarks.set(1, facemotion::types::Point::new(0.52, 0.50));
        f
    };
    let mut last = None;
    for frame in frames(t0, 40.0, 40, |t| LandmarkFrame::new(t).with_face(turned())) {
        last = Some(tracker.update(&frame));
    }
    let last = last.unwrap();
    assert_eq!(last.debug.head_factor, 1.0);
    assert!(!last.signals.looking_away);
}

#[test]
fn test_calibrated_mouth_geometry_smile() {
    let mut tracker = Tracker::default();
    let t0 = calibrate(&mut tracker);

    // corners raised 0.015 over a 0.1 wide mouth: metric 0.15
    let mut last = None;
    for frame in frames(t0, 40.0, 40, |t| LandmarkFrame::new(t).with_face(face(0.0, 0.685))) {
        last = Some(tracker.update(&frame));
    }
    let last = last.unwrap();
    assert!(last.signals.smile > 0.9);
    assert_eq!(last.dialog, DialogLine::Smiling);
    assert_eq!(tracker.smile_count(), 1);
}

#[test]
fn test_dialog_changes_are_rate_limited() {
    let mut tracker = Tracker::default();
    let mut last_line = tracker.dialog_line();
    let mut last_change = 0.0;
    for i in 0..200 {
        let t = i as f64 * 33.0;
        // alternate face / no face every 5 frames
        let frame = if (i / 5) % 2 == 0 {
            LandmarkFrame::new(t).with_face(neutral_face())
        } else {
            LandmarkFrame::new(t)
        };
        let line = tracker.update(&frame).dialog;
        if line != last_line {
            assert!(t - last_change >= DIALOG_HOLD_MS || last_change == 0.0);
            last_line = line;
            last_change = t;
        }
    }
}

#[test]
fn test_asymmetric_resting_gaze_is_cancelled_by_calibration() {
    let mut tracker = Tracker::default();

    // left iris centred, right iris resting half an eye-width off centre
    let resting = || {
        let mut f = neutral_face();
        for &idx in &RIGHT_IRIS_IDX {
            f.landmarks.set(idx, Point::new(0.30 + 0.025, 0.40));
        }
        f
    };

    let mut last = None;
    for frame in frames(0.0, 40.0, 150, |t| LandmarkFrame::new(t).with_face(resting())) {
        last = Some(tracker.update(&frame));
    }
    let last = last.unwrap();
    assert_eq!(last.calibration, CalibrationPhase::Ready);
    assert!((last.debug.eye_raw - 0.5).abs() < 1e-6);
    assert!(last.debug.eye_adj.abs() < 1e-9, "eye_adj = {}", last.debug.eye_adj);
    assert!(!last.signals.looking_away);
    assert_eq!(last.dialog, DialogLine::Apologize);
}
