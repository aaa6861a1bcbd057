//! Card movement and control changes.
//!
//! Zone lists live on the players: hand and sleep zone on the owner, in
//! play on the controller. These methods keep the lists and each instance's
//! `zone`/`controller` fields in agreement, and panic if they ever disagree.

use log::debug;

use super::Zone;
use crate::cards::{CardId, CardInstance};
use crate::core::{GameState, InstanceId, PlayerId};

/// Result of moving a card, captured before the zone change reset.
///
/// Triggers that care about how a card left play (its controller and its
/// copied definition at that instant) read them from here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoneMove {
    pub card: InstanceId,
    pub owner: PlayerId,
    pub from: Zone,
    pub to: Zone,
    pub controller_before: PlayerId,
    pub definition_before: CardId,
}

impl ZoneMove {
    /// Whether this move took an awake card out of play into sleep.
    #[must_use]
    pub fn slept_from_play(&self) -> bool {
        self.from == Zone::InPlay && self.to == Zone::Sleep
    }
}

impl GameState {
    /// Player whose list holds a card in the given zone.
    fn list_holder(card: &CardInstance, zone: Zone) -> PlayerId {
        match zone {
            Zone::InPlay => card.controller,
            Zone::Hand | Zone::Sleep => card.owner,
        }
    }

    pub(crate) fn card_mut(&mut self, id: InstanceId) -> &mut CardInstance {
        let index = id.raw() as usize;
        assert!(index < self.cards.len(), "unknown card {id}");
        &mut self.cards[index]
    }

    /// Create a card in its owner's hand. Ids must be allocated densely.
    pub(crate) fn add_card(&mut self, card: CardInstance) {
        assert_eq!(
            card.id.raw() as usize,
            self.cards.len(),
            "card ids must be allocated sequentially"
        );
        assert_eq!(card.zone, Zone::Hand, "cards are created in hand");
        self.players[card.owner].hand.push(card.id);
        self.cards.push_back(card);
    }

    /// Move a card to a different zone, applying the zone change reset:
    /// modifications, damage and copy status are cleared and control
    /// reverts to the owner.
    pub(crate) fn move_card(&mut self, id: InstanceId, to: Zone) -> ZoneMove {
        let card = self.card_mut(id);
        let from = card.zone;
        assert_ne!(from, to, "{id} is already in {to}");

        let movement = ZoneMove {
            card: id,
            owner: card.owner,
            from,
            to,
            controller_before: card.controller,
            definition_before: card.definition_id(),
        };
        let holder = Self::list_holder(card, from);
        card.reset_for_zone_change();
        card.zone = to;
        let owner = card.owner;

        let list = self.players[holder].zone_mut(from);
        let position = list.iter().position(|c| *c == id);
        match position {
            Some(i) => {
                list.remove(i);
            }
            None => panic!("{id} missing from {holder}'s {from} list"),
        }
        self.players[owner].zone_mut(to).push(id);

        debug!("{id} moved from {from} to {to}");
        movement
    }

    /// Give control of an in-play card to another player. Not a zone
    /// change, so modifications and damage persist.
    pub(crate) fn transfer_control(&mut self, id: InstanceId, to: PlayerId) -> PlayerId {
        let card = self.card_mut(id);
        assert_eq!(card.zone, Zone::InPlay, "only cards in play change control");
        let from = card.controller;
        if from == to {
            return from;
        }
        card.controller = to;

        let list = self.players[from].zone_mut(Zone::InPlay);
        match list.iter().position(|c| *c == id) {
            Some(i) => {
                list.remove(i);
            }
            None => panic!("{id} missing from {from}'s in-play list"),
        }
        self.players[to].in_play.push(id);

        debug!("{id} control {from} -> {to}");
        from
    }

    /// Panic if any zone list disagrees with the card instances.
    pub(crate) fn assert_zone_consistency(&self) {
        let mut seen = 0usize;
        for (player_id, player) in self.players.iter() {
            for zone in [Zone::Hand, Zone::InPlay, Zone::Sleep] {
                for id in player.zone(zone) {
                    seen += 1;
                    let card = self
                        .card(*id)
                        .unwrap_or_else(|| panic!("{player_id} lists unknown card {id}"));
                    assert_eq!(card.zone, zone, "{id} listed in {zone} but is in {}", card.zone);
                    assert_eq!(
                        Self::list_holder(card, zone),
                        player_id,
                        "{id} listed under the wrong player"
                    );
                }
            }
        }
        assert_eq!(seen, self.cards.len(), "a card is listed in zero or two zones");
    }
}
