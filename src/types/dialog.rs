//! Dialog lines and the stability state behind them

use serde::{Deserialize, Serialize};

/// Narrative lines the dialog machine can show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DialogLine {
    /// No face in frame
    CantSeeFace,
    /// Subject is looking away
    LookingAway,
    /// Subject smiles strongly
    Smiling,
    /// Two-hand heart shown
    Heart,
    /// Thumbs-up shown
    ThumbsUp,
    /// Open palm shown
    OpenPalm,
    /// Nothing notable
    #[default]
    Apologize,
}

impl DialogLine {
    /// Line shown to the player
    pub fn text(&self) -> &'static str {
        match self {
            Self::CantSeeFace => "I can't see your face…",
            Self::LookingAway => "Why are you looking away? Are you ignoring me?",
            Self::Smiling => "You're smiling? I'm angry right now.",
            Self::Heart => "A heart… Okay. Keep your eyes on me.",
            Self::ThumbsUp => "A thumbs up? You think that's enough?",
            Self::OpenPalm => "Okay… I hear you. Keep your eyes on me.",
            Self::Apologize => "Apologize properly.",
        }
    }

    /// Stable identifier (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::CantSeeFace => "CANT_SEE_FACE",
            Self::LookingAway => "LOOKING_AWAY",
            Self::Smiling => "SMILING",
            Self::Heart => "HEART",
            Self::ThumbsUp => "THUMBS_UP",
            Self::OpenPalm => "OPEN_PALM",
            Self::Apologize => "APOLOGIZE",
        }
    }
}

impl std::fmt::Display for DialogLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// Displayed line plus the candidate waiting to replace it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DialogState {
    pub current: DialogLine,
    /// When `current` was last changed (milliseconds)
    pub since_ms: f64,
    /// Pending candidate and when it was first proposed
    pub candidate: Option<(DialogLine, f64)>,
}

impl DialogState {
    pub fn new(current: DialogLine, since_ms: f64) -> Self {
        Self {
            current,
            since_ms,
            candidate: None,
        }
    }
}
