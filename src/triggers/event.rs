//! Game events.
//!
//! Everything observable that happens in a game is appended to the state's
//! event log as a `GameEvent`: CC movement, plays, zone changes, reveals,
//! strikes, cancellations, skipped clauses and the win. The log is the
//! replay and debugging record; it is serialized with the state.

use serde::{Deserialize, Serialize};

use crate::core::{InstanceId, PlayerId};
use crate::zones::Zone;

/// One observable occurrence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    TurnStarted {
        turn: u32,
        player: PlayerId,
    },
    CcGained {
        player: PlayerId,
        amount: u8,
    },
    CcSpent {
        player: PlayerId,
        amount: u8,
    },
    CardPlayed {
        player: PlayerId,
        card: InstanceId,
    },
    ZoneChanged {
        card: InstanceId,
        owner: PlayerId,
        from: Zone,
        to: Zone,
    },
    ControlChanged {
        card: InstanceId,
        from: PlayerId,
        to: PlayerId,
    },
    /// A card shown to both players (the direct-attack pick).
    Revealed {
        card: InstanceId,
        owner: PlayerId,
    },
    TussleDeclared {
        attacker: InstanceId,
        defender: Option<InstanceId>,
    },
    InterruptWindowOpened {
        defender: PlayerId,
    },
    TussleCancelled {
        attacker: InstanceId,
        by: InstanceId,
    },
    /// The tussle no longer had legal participants when it resolved.
    TussleFizzled {
        attacker: InstanceId,
    },
    AutoWin {
        winner: InstanceId,
        loser: InstanceId,
    },
    Strike {
        striker: InstanceId,
        target: InstanceId,
        amount: i32,
    },
    AbilityActivated {
        source: InstanceId,
        ability: u8,
        repeat: u32,
    },
    TriggerResolved {
        source: InstanceId,
        accepted: bool,
    },
    /// A declared target was illegal at resolution; only that clause was
    /// skipped for it.
    ClauseSkipped {
        source: InstanceId,
        target: InstanceId,
    },
    TurnEnded {
        turn: u32,
        player: PlayerId,
    },
    GameWon {
        winner: PlayerId,
    },
}

impl GameEvent {
    /// The card moved, if this is a zone change into `zone`.
    #[must_use]
    pub fn moved_to(&self, zone: Zone) -> Option<(InstanceId, PlayerId)> {
        match self {
            GameEvent::ZoneChanged { card, owner, to, .. } if *to == zone => Some((*card, *owner)),
            _ => None,
        }
    }
}
