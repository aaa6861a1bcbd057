//! Zones and card movement.
//!
//! A card is always in exactly one of three zones: hand, in play, or its
//! owner's sleep zone. Every move into a different zone goes through
//! `GameState::move_card`, which applies the zone change reset.
//!
//! ## Key Types
//!
//! - `Zone`: the three card locations
//! - `ZoneMove`: what a move changed, captured before the reset

pub mod manager;

pub use manager::ZoneMove;

use serde::{Deserialize, Serialize};

/// Card location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Held by the owner. Not visible to the opponent.
    Hand,
    /// Awake on the table under its controller.
    InPlay,
    /// The owner's sleep zone. Face up.
    Sleep,
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Hand => "hand",
            Zone::InPlay => "in play",
            Zone::Sleep => "sleep zone",
        };
        f.write_str(name)
    }
}
