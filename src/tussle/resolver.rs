//! Tussle declaration and resolution.

use log::debug;

use super::predict::{simulate_strikes, Combatant};
use crate::core::{InstanceId, PendingTussle, PlayerId};
use crate::effects::continuous::{has_auto_win, immune_to_auto_win};
use crate::effects::cost::play_cost;
use crate::rules::context::RulesContext;
use crate::triggers::GameEvent;
use crate::zones::Zone;

/// Declare a validated tussle: pay `cost`, count a direct attack, then
/// either open the interrupt window or resolve at once.
pub(crate) fn declare(
    ctx: &mut RulesContext<'_>,
    player: PlayerId,
    attacker: InstanceId,
    defender: Option<InstanceId>,
    cost: u8,
) {
    ctx.spend_cc(player, cost);
    if defender.is_none() {
        ctx.state.players[player].direct_attacks += 1;
    }
    ctx.emit(GameEvent::TussleDeclared { attacker, defender });

    let pending = PendingTussle {
        attacker,
        defender,
        attacking_player: player,
    };
    let opponent = player.opponent();
    if can_interrupt(ctx, opponent) {
        debug!("{opponent} may interrupt the tussle by {attacker}");
        ctx.state.interrupt_window = Some(pending);
        ctx.emit(GameEvent::InterruptWindowOpened { defender: opponent });
    } else {
        resolve(ctx, pending);
    }
}

/// Whether `player` holds an interrupt card they can afford right now.
fn can_interrupt(ctx: &RulesContext<'_>, player: PlayerId) -> bool {
    let state = &*ctx.state;
    let cc = state.player(player).cc();
    state.cards_in_zone(player, Zone::Hand).iter().any(|id| {
        let Some(card) = state.card(*id) else {
            return false;
        };
        let def = ctx.catalog.definition(card.card_id());
        def.interrupt
            && play_cost(state, ctx.catalog, player, def, &[]).is_ok_and(|cost| cost <= cc)
    })
}

/// Resolve a declared tussle. Participants are re-checked first; if either
/// left play or changed sides the tussle fizzles.
pub(crate) fn resolve(ctx: &mut RulesContext<'_>, pending: PendingTussle) {
    let PendingTussle {
        attacker,
        defender,
        attacking_player,
    } = pending;
    let opponent = attacking_player.opponent();

    if !in_play_under(ctx, attacker, attacking_player) {
        ctx.emit(GameEvent::TussleFizzled { attacker });
        return;
    }

    let Some(defender) = defender else {
        direct_attack(ctx, attacker, opponent);
        return;
    };
    if !in_play_under(ctx, defender, opponent) {
        ctx.emit(GameEvent::TussleFizzled { attacker });
        return;
    }

    let state = &*ctx.state;
    if has_auto_win(state, ctx.catalog, attacker)
        && !immune_to_auto_win(state, ctx.catalog, defender, attacker)
    {
        auto_win(ctx, attacker, defender);
        return;
    }

    let a = Combatant::of(ctx.state, ctx.catalog, ctx.config, attacker);
    let d = Combatant::of(ctx.state, ctx.catalog, ctx.config, defender);
    let exchange = simulate_strikes(a, d);
    debug!("tussle {attacker} ({a:?}) vs {defender} ({d:?}): {exchange:?}");

    let mut strikes = Vec::with_capacity(2);
    if exchange.attacker_strikes {
        strikes.push((attacker, defender, a.strength));
    }
    if exchange.defender_strikes {
        strikes.push((defender, attacker, d.strength));
    }
    if !exchange.attacker_first {
        strikes.reverse();
    }
    for (striker, target, amount) in strikes {
        ctx.add_damage(target, amount);
        ctx.emit(GameEvent::Strike {
            striker,
            target,
            amount,
        });
    }
    // Exhausted Toys are slept by the state-based check that follows.
}

fn in_play_under(ctx: &RulesContext<'_>, card: InstanceId, player: PlayerId) -> bool {
    ctx.state
        .card(card)
        .is_some_and(|c| c.zone() == Zone::InPlay && c.controller() == player)
}

fn auto_win(ctx: &mut RulesContext<'_>, winner: InstanceId, loser: InstanceId) {
    debug!("{winner} wins its tussle outright against {loser}");
    ctx.emit(GameEvent::AutoWin { winner, loser });
    ctx.move_card(loser, Zone::Sleep);
}

/// Sleep a uniformly random card from the opponent's hand. It never was in
/// play, so no "when slept" trigger fires.
fn direct_attack(ctx: &mut RulesContext<'_>, attacker: InstanceId, opponent: PlayerId) {
    let len = ctx.state.cards_in_zone(opponent, Zone::Hand).len();
    if len == 0 {
        ctx.emit(GameEvent::TussleFizzled { attacker });
        return;
    }
    let pick = ctx.state.rng.gen_index(len);
    let card = ctx.state.cards_in_zone(opponent, Zone::Hand)[pick];
    debug!("{attacker} attacks directly, revealing {card}");
    ctx.move_card(card, Zone::Sleep);
    ctx.emit(GameEvent::Revealed {
        card,
        owner: opponent,
    });
}
