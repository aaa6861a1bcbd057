//! Player actions.
//!
//! An `Action` is one external decision. Every decision point in the game
//! (main-phase play, the interrupt window, an optional trigger) is answered
//! with exactly one of these variants, so human interfaces and automated
//! planners share the same vocabulary.
//!
//! ```
//! use tussle_engine::core::{Action, InstanceId, Payment};
//! use smallvec::smallvec;
//!
//! let play = Action::PlayCard {
//!     card: InstanceId(3),
//!     targets: smallvec![InstanceId(8)],
//!     payment: Payment::Cc,
//! };
//! assert!(!play.is_pass());
//! assert!(Action::EndTurn.is_pass());
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::InstanceId;
use super::player::PlayerId;

/// Declared targets for a card or ability. Most effects take one or two.
pub type Targets = SmallVec<[InstanceId; 2]>;

/// How a played card's cost is paid. Exactly one path per play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Payment {
    /// Pay the computed cost in CC.
    Cc,

    /// Sleep one of your own Toys in play instead of paying CC. Only for
    /// cards that offer this alternative.
    SleepOwnToy(InstanceId),
}

/// A complete player decision.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play a card from hand.
    PlayCard {
        card: InstanceId,
        targets: Targets,
        payment: Payment,
    },

    /// Declare a tussle. `defender: None` is a direct attack.
    Tussle {
        attacker: InstanceId,
        defender: Option<InstanceId>,
    },

    /// Use an activated ability `repeat` times, paying for all repetitions
    /// up front. `ability` indexes the card's activated abilities.
    Activate {
        source: InstanceId,
        ability: u8,
        targets: Targets,
        repeat: u32,
    },

    /// Cancel the pending tussle with an interrupt card (defender only).
    PlayInterrupt { card: InstanceId },

    /// Let the pending tussle resolve (defender only).
    DeclineInterrupt,

    /// Accept or decline the optional trigger at the front of the queue.
    ResolveTrigger { accept: bool, targets: Targets },

    /// Pass priority and end the turn.
    EndTurn,
}

impl Action {
    /// Whether this action passes priority.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Action::EndTurn)
    }

    /// Targets declared by this action, if any.
    #[must_use]
    pub fn targets(&self) -> &[InstanceId] {
        match self {
            Action::PlayCard { targets, .. }
            | Action::Activate { targets, .. }
            | Action::ResolveTrigger { targets, .. } => targets,
            _ => &[],
        }
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the game (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
