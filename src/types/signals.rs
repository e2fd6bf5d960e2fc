//! Live smoothed signal state

use serde::{Deserialize, Serialize};

/// Continuous scores (all in [0, 1]) and the booleans derived from them.
///
/// Written once per frame by the tracker; read by dialog selection and output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SmoothedSignals {
    pub smile: f64,
    pub sadness: f64,
    pub look_away_score: f64,
    pub heart_score: f64,
    pub looking_away: bool,
    pub hand_present: bool,
    pub open_palm: bool,
    pub thumbs_up: bool,
    pub heart: bool,
}

impl SmoothedSignals {
    /// Every continuous score lies in [0, 1]
    pub fn is_bounded(&self) -> bool {
        [self.smile, self.sadness, self.look_away_score, self.heart_score]
            .iter()
            .all(|v| (0.0..=1.0).contains(v))
    }
}
