//! Rules configuration.
//!
//! The numeric constants of the rules live in `RulesConfig` rather than
//! being scattered through the engine. The defaults are the standard game;
//! variants can be loaded from JSON or built with the builder methods.
//!
//! ```
//! use tussle_engine::core::RulesConfig;
//!
//! let config = RulesConfig::default().with_tussle_cost(3);
//! assert_eq!(config.cc_cap, 7);
//! assert_eq!(config.tussle_cost, 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Numeric rule constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Maximum CC a player can hold.
    pub cc_cap: u8,

    /// CC granted to the starting player on the game's first turn.
    pub first_turn_grant: u8,

    /// CC granted to the active player at the start of every other turn.
    pub turn_grant: u8,

    /// Tussle cost before modifiers.
    pub tussle_cost: u8,

    /// Direct attacks allowed per turn.
    pub direct_attack_limit: u8,

    /// Cards each player brings to the game (all start in hand).
    pub starting_hand_size: usize,

    /// Speed bonus for Toys controlled by the active player.
    pub active_speed_bonus: i32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            cc_cap: 7,
            first_turn_grant: 2,
            turn_grant: 4,
            tussle_cost: 2,
            direct_attack_limit: 2,
            starting_hand_size: 6,
            active_speed_bonus: 1,
        }
    }
}

impl RulesConfig {
    /// Parse and validate a configuration from JSON. Missing fields take
    /// their default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RulesConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cc_cap == 0 {
            return Err(ConfigError::Invalid("cc_cap must be positive".into()));
        }
        if self.first_turn_grant > self.cc_cap || self.turn_grant > self.cc_cap {
            return Err(ConfigError::Invalid(format!(
                "turn grants ({}, {}) exceed cc_cap {}",
                self.first_turn_grant, self.turn_grant, self.cc_cap
            )));
        }
        if self.starting_hand_size == 0 {
            return Err(ConfigError::Invalid(
                "starting_hand_size must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Set the base tussle cost.
    #[must_use]
    pub fn with_tussle_cost(mut self, cost: u8) -> Self {
        self.tussle_cost = cost;
        self
    }

    /// Set the per-turn grant.
    #[must_use]
    pub fn with_turn_grant(mut self, grant: u8) -> Self {
        self.turn_grant = grant;
        self
    }

    /// Set the number of cards per player.
    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Set the per-turn direct attack limit.
    #[must_use]
    pub fn with_direct_attack_limit(mut self, limit: u8) -> Self {
        self.direct_attack_limit = limit;
        self
    }
}
