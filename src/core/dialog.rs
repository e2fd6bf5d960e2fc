//! Dialog Engine: proposed line + stability timing
//!
//! A proposed line replaces the shown one only when:
//! - it has been proposed continuously for ≥ 350 ms, or
//! - the shown line has been up for ≥ 900 ms (and the proposal repeats)
//!
//! Proposing the shown line again drops any pending candidate.

use tracing::debug;
use crate::{DIALOG_HOLD_MS, DIALOG_MIN_SHOW_MS, DIALOG_SMILE_T};
use crate::types::{DialogLine, DialogState, SmoothedSignals};

/// Line the current signals ask for, before stability rules
pub fn propose_line(face_present: bool, signals: &SmoothedSignals) -> DialogLine {
    if !face_present {
        DialogLine::CantSeeFace
    } else if signals.looking_away {
        DialogLine::LookingAway
    } else if signals.smile > DIALOG_SMILE_T {
        DialogLine::Smiling
    } else if signals.heart {
        DialogLine::Heart
    } else if signals.thumbs_up {
        DialogLine::ThumbsUp
    } else if signals.open_palm {
        DialogLine::OpenPalm
    } else {
        DialogLine::Apologize
    }
}

/// Dialog stability engine
#[derive(Debug, Clone)]
pub struct DialogEngine {
    /// Shown line, its start time, pending candidate
    state: DialogState,
    /// Clock has been anchored to the first frame
    started: bool,
    /// Number of line changes
    change_count: u64,
}

impl Default for DialogEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogEngine {
    /// Create new engine showing the default line
    pub fn new() -> Self {
        Self {
            state: DialogState::new(DialogLine::default(), 0.0),
            started: false,
            change_count: 0,
        }
    }

    /// Apply the stability rules to `next`; returns the line to show
    pub fn update(&mut self, now_ms: f64, next: DialogLine) -> DialogLine {
        if !self.started {
            self.started = true;
            self.state.since_ms = now_ms;
        }

        if next == self.state.current {
            self.state.candidate = None;
            return self.state.current;
        }

        let candidate_since = match self.state.candidate {
            Some((line, since)) if line == next => since,
            _ => {
                self.state.candidate = Some((next, now_ms));
                return self.state.current;
            }
        };

        let held = now_ms - candidate_since;
        let shown = now_ms - self.state.since_ms;
        if held >= DIALOG_HOLD_MS || shown >= DIALOG_MIN_SHOW_MS {
            debug!(
                from = self.state.current.code(),
                to = next.code(),
                held_ms = held,
                shown_ms = shown,
                "Dialog line changed"
            );
            self.state = DialogState::new(next, now_ms);
            self.change_count += 1;
        }

        self.state.current
    }

    /// Currently shown line
    pub fn current(&self) -> DialogLine {
        self.state.current
    }

    /// Pending candidate, if any
    pub fn candidate(&self) -> Option<DialogLine> {
        self.state.candidate.map(|(line, _)| line)
    }

    pub fn state(&self) -> &DialogState {
        &self.state
    }

    pub fn change_count(&self) -> u64 {
        self.change_count
    }

    /// Reset engine to initial state
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_line_is_apologize() {
        let engine = DialogEngine::new();
        assert_eq!(engine.current(), DialogLine::Apologize);
        assert!(engine.candidate().is_none());
    }

    #[test]
    fn test_proposal_priority() {
        let mut s = SmoothedSignals {
            looking_away: true,
            smile: 0.9,
            heart: true,
            ..SmoothedSignals::default()
        };
        assert_eq!(propose_line(false, &s), DialogLine::CantSeeFace);
        assert_eq!(propose_line(true, &s), DialogLine::LookingAway);
        s.looking_away = false;
        assert_eq!(propose_line(true, &s), DialogLine::Smiling);
        s.smile = 0.55;
        assert_eq!(propose_line(true, &s), DialogLine::Heart);
        s.heart = false;
        s.thumbs_up = true;
        s.open_palm = true;
        assert_eq!(propose_line(true, &s), DialogLine::ThumbsUp);
        s.thumbs_up = false;
        assert_eq!(propose_line(true, &s), DialogLine::OpenPalm);
        s.open_palm = false;
        assert_eq!(propose_line(true, &s), DialogLine::Apologize);
    }

    #[test]
    fn test_candidate_needs_hold() {
        let mut engine = DialogEngine::new();
        engine.update(0.0, DialogLine::Apologize);

        assert_eq!(engine.update(100.0, DialogLine::Smiling), DialogLine::Apologize);
        assert_eq!(engine.candidate(), Some(DialogLine::Smiling));
        assert_eq!(engine.update(300.0, DialogLine::Smiling), DialogLine::Apologize);
        assert_eq!(engine.update(450.0, DialogLine::Smiling), DialogLine::Smiling);
        assert!(engine.candidate().is_none());
    }

    #[test]
    fn test_returning_to_current_drops_candidate() {
        let mut engine = DialogEngine::new();
        engine.update(0.0, DialogLine::Apologize);
        engine.update(100.0, DialogLine::Smiling);
        engine.update(200.0, DialogLine::Apologize);
        assert!(engine.candidate().is_none());

        // hold timer restarts from the next proposal
        engine.update(300.0, DialogLine::Smiling);
        assert_eq!(engine.update(500.0, DialogLine::Smiling), DialogLine::Apologize);
    }

    #[test]
    fn test_new_candidate_restarts_hold() {
        let mut engine = DialogEngine::new();
        engine.update(0.0, DialogLine::Apologize);
        engine.update(100.0, DialogLine::Smiling);
        engine.update(400.0, DialogLine::LookingAway);
        assert_eq!(engine.candidate(), Some(DialogLine::LookingAway));
        assert_eq!(engine.update(600.0, DialogLine::LookingAway), DialogLine::Apologize);
        assert_eq!(engine.update(750.0, DialogLine::LookingAway), DialogLine::LookingAway);
    }

    #[test]
    fn test_long_shown_line_yields_on_second_proposal() {
        let mut engine = DialogEngine::new();
        engine.update(0.0, DialogLine::Apologize);
        // first proposal only registers the candidate
        assert_eq!(engine.update(1000.0, DialogLine::OpenPalm), DialogLine::Apologize);
        assert_eq!(engine.update(1010.0, DialogLine::OpenPalm), DialogLine::OpenPalm);
        assert_eq!(engine.change_count(), 1);
    }

    #[test]
    fn test_first_frame_anchors_clock() {
        let mut engine = DialogEngine::new();
        engine.update(50_000.0, DialogLine::Smiling);
        // shown-time measured from the first frame, not from zero
        assert_eq!(engine.update(50_100.0, DialogLine::Smiling), DialogLine::Apologize);
    }
}
