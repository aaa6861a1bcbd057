//! Mutation context for applying rules.
//!
//! `RulesContext` bundles the catalog, the configuration and the state being
//! mutated. Every rules-level mutation goes through it, so CC clamping,
//! the event log and "when slept" trigger collection happen in one place.

use log::{debug, trace};

use crate::cards::{CardCatalog, Modification};
use crate::core::{GameState, InstanceId, PlayerId, RulesConfig};
use crate::triggers::{collect_when_slept, GameEvent};
use crate::zones::{Zone, ZoneMove};

pub(crate) struct RulesContext<'a> {
    pub catalog: &'a CardCatalog,
    pub config: &'a RulesConfig,
    pub state: &'a mut GameState,
}

impl<'a> RulesContext<'a> {
    pub fn new(catalog: &'a CardCatalog, config: &'a RulesConfig, state: &'a mut GameState) -> Self {
        Self {
            catalog,
            config,
            state,
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        trace!("event: {event:?}");
        self.state.events.push_back(event);
    }

    /// Add CC, clamped at the cap.
    pub fn grant_cc(&mut self, player: PlayerId, amount: u8) {
        let cap = self.config.cc_cap;
        let gained = self.state.players[player].gain_cc(amount, cap);
        let cc = self.state.players[player].cc();
        assert!(cc <= cap, "{player} holds {cc} CC, above the cap of {cap}");
        if gained > 0 {
            debug!("{player} gains {gained} CC (now {cc})");
            self.emit(GameEvent::CcGained {
                player,
                amount: gained,
            });
        }
    }

    pub fn spend_cc(&mut self, player: PlayerId, amount: u8) {
        if amount == 0 {
            return;
        }
        self.state.players[player].spend_cc(amount);
        self.emit(GameEvent::CcSpent { player, amount });
    }

    /// Move a card and queue any "when slept" triggers the move fires.
    pub fn move_card(&mut self, card: InstanceId, to: Zone) -> ZoneMove {
        let movement = self.state.move_card(card, to);
        self.emit(GameEvent::ZoneChanged {
            card,
            owner: movement.owner,
            from: movement.from,
            to,
        });
        for trigger in collect_when_slept(self.catalog, &movement) {
            self.state.pending_triggers.push_back(trigger);
        }
        movement
    }

    pub fn transfer_control(&mut self, card: InstanceId, to: PlayerId) {
        let from = self.state.transfer_control(card, to);
        if from != to {
            self.emit(GameEvent::ControlChanged { card, from, to });
        }
    }

    pub fn add_modification(&mut self, card: InstanceId, modification: Modification) {
        self.state.card_mut(card).modifications.push(modification);
    }

    pub fn add_damage(&mut self, card: InstanceId, amount: i32) {
        self.state.card_mut(card).damage += amount;
    }
}
