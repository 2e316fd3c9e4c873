//! Session configuration.
//!
//! A configuration is fixed for the lifetime of a session; changing it means
//! building a new [`GameSession`](crate::game::GameSession).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::MoveCatalog;
use crate::types::ActorKind;

/// Construction-time configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("move catalog must not be empty")]
    EmptyCatalog,
    #[error("move catalog values must be positive")]
    NonPositiveSubtrahend,
    #[error("move catalog contains {value} more than once")]
    DuplicateSubtrahend { value: u32 },
    #[error("a session needs at least one pile")]
    NoPiles,
    #[error("max coins per pile must be positive")]
    NoCoins,
    #[error("expected {expected} pile values, got {actual}")]
    PileCount { expected: usize, actual: usize },
    #[error("restored position has no coins left")]
    FinishedPosition,
    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Root configuration of a game session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameConfig {
    /// Number of piles on the table.
    #[serde(default = "default_piles")]
    pub piles: usize,
    /// Upper bound for a freshly dealt pile. Every pile starts with at least one coin.
    #[serde(default = "default_max_coins_per_pile")]
    pub max_coins_per_pile: u32,
    /// Legal subtrahends, in display order.
    #[serde(default = "default_subtrahends")]
    pub subtrahends: Vec<u32>,
    /// Who sits in seat A and seat B.
    #[serde(default = "default_players")]
    pub players: [ActorKind; 2],
}

fn default_piles() -> usize {
    3
}

fn default_max_coins_per_pile() -> u32 {
    20
}

fn default_subtrahends() -> Vec<u32> {
    MoveCatalog::PRIMES.to_vec()
}

fn default_players() -> [ActorKind; 2] {
    [ActorKind::Human, ActorKind::Automated]
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            piles: default_piles(),
            max_coins_per_pile: default_max_coins_per_pile(),
            subtrahends: default_subtrahends(),
            players: default_players(),
        }
    }
}

impl GameConfig {
    /// Parses a TOML document. Missing keys fall back to their defaults.
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        toml::from_str(src).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Checks the numeric parameters and builds the move catalog.
    pub fn validate(&self) -> Result<MoveCatalog, ConfigError> {
        if self.piles == 0 {
            return Err(ConfigError::NoPiles);
        }
        if self.max_coins_per_pile == 0 {
            return Err(ConfigError::NoCoins);
        }
        MoveCatalog::new(self.subtrahends.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        let catalog = config.validate().unwrap();

        assert_eq!(catalog.values(), &[2, 3, 5, 7]);
        assert_eq!(config.players, [ActorKind::Human, ActorKind::Automated]);
    }

    #[test]
    fn zero_piles_or_coins_are_rejected() {
        let no_piles = GameConfig {
            piles: 0,
            ..GameConfig::default()
        };
        let no_coins = GameConfig {
            max_coins_per_pile: 0,
            ..GameConfig::default()
        };

        assert_eq!(no_piles.validate(), Err(ConfigError::NoPiles));
        assert_eq!(no_coins.validate(), Err(ConfigError::NoCoins));
    }

    #[test]
    fn toml_fills_missing_keys_with_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            piles = 4
            subtrahends = [2, 3, 5]
            players = ["automated", "automated"]
            "#,
        )
        .unwrap();

        assert_eq!(config.piles, 4);
        assert_eq!(config.max_coins_per_pile, 20);
        assert_eq!(config.subtrahends, vec![2, 3, 5]);
        assert_eq!(config.players, [ActorKind::Automated; 2]);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = GameConfig::from_toml_str("piles = \"three\"").unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn duplicate_subtrahends_fail_validation() {
        let config = GameConfig {
            subtrahends: vec![2, 3, 2],
            ..GameConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateSubtrahend { value: 2 })
        );
    }
}
