//! Engine configuration
//!
//! # Environment Variables
//!
//! - `THUD_BOARD_HEIGHT`: playable rows (default: 20, range 8..=40)
//! - `THUD_FALL_SPEED_MS`: auto-fall interval (default: 1000, range 50..=5000)
//! - `THUD_SEED`: piece sequence seed (default: 1)

use std::env;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::types::{
    DEFAULT_BOARD_HEIGHT, DEFAULT_FALL_SPEED_MS, MAX_BOARD_HEIGHT, MAX_FALL_SPEED_MS,
    MIN_BOARD_HEIGHT, MIN_FALL_SPEED_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub board_height: u8,
    pub fall_speed_ms: u32,
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_height: DEFAULT_BOARD_HEIGHT,
            fall_speed_ms: DEFAULT_FALL_SPEED_MS,
            seed: 1,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            board_height: env_or("THUD_BOARD_HEIGHT", defaults.board_height)?,
            fall_speed_ms: env_or("THUD_FALL_SPEED_MS", defaults.fall_speed_ms)?,
            seed: env_or("THUD_SEED", defaults.seed)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_HEIGHT..=MAX_BOARD_HEIGHT).contains(&self.board_height) {
            return Err(ConfigError::InvalidBoardHeight {
                height: self.board_height,
                min: MIN_BOARD_HEIGHT,
                max: MAX_BOARD_HEIGHT,
            });
        }
        validate_fall_speed(self.fall_speed_ms)
    }
}

pub fn validate_fall_speed(ms: u32) -> Result<(), ConfigError> {
    if (MIN_FALL_SPEED_MS..=MAX_FALL_SPEED_MS).contains(&ms) {
        Ok(())
    } else {
        Err(ConfigError::InvalidFallSpeed {
            ms,
            min: MIN_FALL_SPEED_MS,
            max: MAX_FALL_SPEED_MS,
        })
    }
}

fn env_or<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(raw) => parse_value(var, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnvValue {
            var,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let config = EngineConfig {
            board_height: 4,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBoardHeight { height: 4, .. })
        ));

        let config = EngineConfig {
            fall_speed_ms: 10,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFallSpeed { ms: 10, .. })
        ));
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value::<u8>("THUD_BOARD_HEIGHT", " 24 "), Ok(24));
        assert_eq!(
            parse_value::<u32>("THUD_SEED", "abc"),
            Err(ConfigError::InvalidEnvValue {
                var: "THUD_SEED",
                value: "abc".to_string(),
            })
        );
    }
}
