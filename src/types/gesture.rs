//! Discrete gesture identity

use serde::{Deserialize, Serialize};

/// The single gesture reported for a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gesture {
    #[default]
    #[serde(rename = "—")]
    None,
    #[serde(rename = "OPEN_PALM")]
    OpenPalm,
    #[serde(rename = "THUMBS_UP")]
    ThumbsUp,
    #[serde(rename = "TWO_HAND_HEART")]
    TwoHandHeart,
}

impl Gesture {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::None => "—",
            Gesture::OpenPalm => "OPEN_PALM",
            Gesture::ThumbsUp => "THUMBS_UP",
            Gesture::TwoHandHeart => "TWO_HAND_HEART",
        }
    }

    pub fn is_some(&self) -> bool {
        *self != Gesture::None
    }
}

impl std::fmt::Display for Gesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&Gesture::None).unwrap(), "\"—\"");
        assert_eq!(serde_json::to_string(&Gesture::TwoHandHeart).unwrap(), "\"TWO_HAND_HEART\"");
        for g in [Gesture::None, Gesture::OpenPalm, Gesture::ThumbsUp, Gesture::TwoHandHeart] {
            assert_eq!(serde_json::to_string(&g).unwrap(), format!("\"{}\"", g.as_str()));
        }
    }
}
