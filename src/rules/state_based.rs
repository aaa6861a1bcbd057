//! State-based actions and invariant checks.
//!
//! Run after every step of resolution:
//!
//! - any Toy in play with stamina at or below zero goes to its owner's
//!   sleep zone (firing "when slept")
//! - a player with an empty hand who controls nothing in play loses
//!
//! If both players lose at the same check, the active player wins: their
//! action produced the state.

use log::{debug, info};

use super::context::RulesContext;
use crate::core::{GameState, PlayerId, RulesConfig};
use crate::effects::continuous::current_stamina;
use crate::triggers::GameEvent;
use crate::zones::Zone;

/// Apply state-based actions until nothing changes. Returns true once the
/// game is over.
pub(crate) fn settle(ctx: &mut RulesContext<'_>) -> bool {
    if ctx.state.winner.is_some() {
        return true;
    }

    loop {
        let exhausted: Vec<_> = {
            let state: &GameState = ctx.state;
            state
                .in_play()
                .filter(|id| current_stamina(state, ctx.catalog, *id) <= 0)
                .collect()
        };
        if exhausted.is_empty() {
            break;
        }
        for id in exhausted {
            debug!("{id} is out of stamina");
            ctx.move_card(id, Zone::Sleep);
        }
    }

    let Some(winner) = decide_winner(ctx.state) else {
        return false;
    };
    info!("game over on turn {}: {winner} wins", ctx.state.turn);
    ctx.state.winner = Some(winner);
    ctx.state.interrupt_window = None;
    ctx.state.pending_triggers.clear();
    ctx.emit(GameEvent::GameWon { winner });
    true
}

/// Whether `player` has run out of cards: their hand is empty and they
/// control nothing in play. Toys taken by the opponent do not count.
#[must_use]
pub fn has_lost(state: &GameState, player: PlayerId) -> bool {
    state.cards_in_zone(player, Zone::Hand).is_empty()
        && state.cards_in_zone(player, Zone::InPlay).is_empty()
}

fn decide_winner(state: &GameState) -> Option<PlayerId> {
    let active = state.active_player();
    let other = active.opponent();
    match (has_lost(state, active), has_lost(state, other)) {
        (_, true) => Some(active),
        (true, false) => Some(other),
        (false, false) => None,
    }
}

/// Panic if the state breaks an invariant. Only an engine defect can
/// trigger this.
pub(crate) fn assert_invariants(state: &GameState, config: &RulesConfig) {
    for (id, player) in state.players().iter() {
        assert!(
            player.cc() <= config.cc_cap,
            "{id} holds {} CC, above the cap",
            player.cc()
        );
        assert!(
            player.direct_attacks() <= config.direct_attack_limit,
            "{id} exceeded the direct attack limit"
        );
    }
    for card in state.cards() {
        if card.zone() != Zone::InPlay {
            assert!(card.is_pristine(), "{} kept in-play state outside play", card.id());
        }
    }
    state.assert_zone_consistency();
}
