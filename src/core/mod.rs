//! Core engine types: instance ids, players, state, actions, RNG, configuration.
//!
//! These are the passive building blocks. Rule logic that mutates them lives
//! in `zones`, `effects`, `tussle` and `rules`.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use entity::InstanceId;
pub use player::{Player, PlayerId, PlayerMap, ZoneList, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use config::RulesConfig;
pub use action::{Action, ActionRecord, Payment, Targets};
pub use state::{GameState, PendingTussle, Phase, Priority};
