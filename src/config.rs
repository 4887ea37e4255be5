use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::special::PromotionChoice;

/// Session options. Every field has a default, so a partial JSON object
/// (or `{}`) is a valid configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Resolve promotions immediately with this piece instead of pausing for
    /// a choice. `None` keeps the two-phase promotion flow.
    pub auto_promote: Option<PromotionChoice>,
    /// End the game when the side to move has no legal move and is not in check.
    pub detect_stalemate: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    pub fn new() -> Self {
        GameConfig {
            auto_promote: None,
            detect_stalemate: true,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Like [`GameConfig::from_json`], but logs a bad config and falls back
    /// to the defaults.
    pub fn from_json_or_default(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| {
            warn!("ignoring game config: {e}");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let config = GameConfig::from_json("{}").ok();
        assert_eq!(config, Some(GameConfig::new()));
    }

    #[test]
    fn reads_auto_promote() {
        let config = GameConfig::from_json(r#"{"auto_promote":"Queen","detect_stalemate":false}"#).ok();
        assert_eq!(
            config,
            Some(GameConfig { auto_promote: Some(PromotionChoice::Queen), detect_stalemate: false })
        );
    }

    #[test]
    fn rejects_unknown_piece() {
        let err = GameConfig::from_json(r#"{"auto_promote":"King"}"#);
        assert!(matches!(err, Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn bad_config_falls_back_to_default() {
        assert_eq!(GameConfig::from_json_or_default("{not json"), GameConfig::new());
        assert_eq!(GameConfig::from_json_or_default(r#"{"auto_promote":"Pawn"}"#), GameConfig::new());
        let config = GameConfig::from_json_or_default(r#"{"detect_stalemate":false}"#);
        assert!(!config.detect_stalemate);
    }
}
