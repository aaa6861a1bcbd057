//! Card instances - runtime card state.
//!
//! `CardInstance` represents one physical card in a game. It tracks the
//! mutable state: zone, controller, temporary modifications, damage, and
//! which definition it is currently copying.
//!
//! Current stats are not stored. They are computed on demand from the
//! definition, this instance's modifications, and the continuous effects
//! in play (see `effects::continuous`).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{CardId, Stat};
use crate::core::{InstanceId, PlayerId};
use crate::zones::Zone;

/// A stat change applied directly to one instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modification {
    pub stat: Stat,
    pub delta: i32,
    /// Card whose effect applied this modification.
    pub source: InstanceId,
    /// Removed during the End phase.
    pub until_end_of_turn: bool,
}

/// A card instance in a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    pub(crate) id: InstanceId,
    pub(crate) card: CardId,
    pub(crate) owner: PlayerId,
    pub(crate) controller: PlayerId,
    pub(crate) zone: Zone,
    pub(crate) modifications: SmallVec<[Modification; 2]>,
    /// Stamina lost while in play.
    pub(crate) damage: i32,
    /// Definition this card is copying while in play.
    pub(crate) copy_of: Option<CardId>,
}

impl CardInstance {
    /// Create a card in its owner's hand.
    #[must_use]
    pub fn new(id: InstanceId, card: CardId, owner: PlayerId) -> Self {
        Self {
            id,
            card,
            owner,
            controller: owner,
            zone: Zone::Hand,
            modifications: SmallVec::new(),
            damage: 0,
            copy_of: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// The printed card this instance was created from.
    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.card
    }

    /// The definition rules currently read: the copied one while copying,
    /// otherwise the printed one.
    #[must_use]
    pub fn definition_id(&self) -> CardId {
        self.copy_of.unwrap_or(self.card)
    }

    /// The player who started with this card. Never changes.
    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    #[must_use]
    pub fn controller(&self) -> PlayerId {
        self.controller
    }

    #[must_use]
    pub fn zone(&self) -> Zone {
        self.zone
    }

    #[must_use]
    pub fn modifications(&self) -> &[Modification] {
        &self.modifications
    }

    #[must_use]
    pub fn damage(&self) -> i32 {
        self.damage
    }

    #[must_use]
    pub fn copy_of(&self) -> Option<CardId> {
        self.copy_of
    }

    /// Sum of direct modifications to one stat.
    #[must_use]
    pub fn modification_total(&self, stat: Stat) -> i32 {
        self.modifications
            .iter()
            .filter(|m| m.stat == stat)
            .map(|m| m.delta)
            .sum()
    }

    /// Whether the instance carries no leftover in-play state.
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        self.modifications.is_empty()
            && self.damage == 0
            && self.copy_of.is_none()
            && self.controller == self.owner
    }

    pub(crate) fn reset_for_zone_change(&mut self) {
        self.modifications.clear();
        self.damage = 0;
        self.copy_of = None;
        self.controller = self.owner;
    }

    /// Drop end-of-turn modifications. Returns how many were removed.
    pub(crate) fn expire_end_of_turn(&mut self) -> usize {
        let before = self.modifications.len();
        self.modifications.retain(|m| !m.until_end_of_turn);
        before - self.modifications.len()
    }
}
