//! Applying validated actions.
//!
//! `perform` assumes `validator::check` accepted the action and receives
//! the CC cost it computed. Every path ends by draining the trigger queue,
//! which also runs the state-based checks.

use log::debug;

use super::context::RulesContext;
use super::state_based::settle;
use super::turn::{end_turn, enter_main};
use crate::core::{Action, InstanceId, Payment, PlayerId};
use crate::effects::continuous::definition_of;
use crate::effects::resolver::{drain_triggers, resolve_clause, resolve_trigger};
use crate::effects::targeting::EffectSource;
use crate::triggers::{collect_on_play_other, GameEvent};
use crate::tussle::resolver as tussle;
use crate::zones::Zone;

pub(crate) fn perform(ctx: &mut RulesContext<'_>, player: PlayerId, action: &Action, cost: u8) {
    debug!("{player} performs {action:?}");
    match action {
        Action::PlayCard {
            card,
            targets,
            payment,
        } => {
            match payment {
                Payment::Cc => ctx.spend_cc(player, cost),
                Payment::SleepOwnToy(toy) => {
                    ctx.move_card(*toy, Zone::Sleep);
                }
            }
            play_from_hand(ctx, player, *card, targets);
        }
        Action::Tussle { attacker, defender } => {
            tussle::declare(ctx, player, *attacker, *defender, cost);
        }
        Action::Activate {
            source,
            ability,
            targets,
            repeat,
        } => activate(ctx, player, *source, *ability, targets, *repeat, cost),
        Action::PlayInterrupt { card } => {
            ctx.spend_cc(player, cost);
            play_from_hand(ctx, player, *card, &[]);
            // An interrupt that did not cancel leaves the tussle to resolve.
            if let Some(pending) = ctx.state.interrupt_window.take() {
                tussle::resolve(ctx, pending);
            }
        }
        Action::DeclineInterrupt => {
            if let Some(pending) = ctx.state.interrupt_window.take() {
                tussle::resolve(ctx, pending);
            }
        }
        Action::ResolveTrigger { accept, targets } => {
            if let Some(trigger) = ctx.state.pending_triggers.pop_front() {
                if *accept {
                    resolve_trigger(ctx, &trigger, targets);
                } else {
                    ctx.emit(GameEvent::TriggerResolved {
                        source: trigger.source,
                        accepted: false,
                    });
                }
            }
        }
        Action::EndTurn => {
            end_turn(ctx);
            return;
        }
    }

    drain_triggers(ctx);
    enter_main(ctx);
    let active = ctx.state.active_player;
    ctx.state.priority.reset(active);
}

/// Play a card from hand after payment. Toys enter play, then the play
/// clauses resolve; Actions resolve, then go to the sleep zone without
/// firing "when slept".
fn play_from_hand(
    ctx: &mut RulesContext<'_>,
    player: PlayerId,
    card: InstanceId,
    targets: &[InstanceId],
) {
    let catalog = ctx.catalog;
    let Some(instance) = ctx.state.card(card) else {
        return;
    };
    let def = catalog.definition(instance.card_id());
    ctx.emit(GameEvent::CardPlayed { player, card });

    if def.is_toy() {
        ctx.move_card(card, Zone::InPlay);
    }
    let source = EffectSource {
        card,
        controller: player,
        definition: def.id,
    };
    for clause in def.play_clauses() {
        let declared: &[InstanceId] = if clause.target.is_some() { targets } else { &[] };
        resolve_clause(ctx, &source, clause, declared);
    }
    if !def.is_toy() {
        ctx.move_card(card, Zone::Sleep);
    }

    let triggers = collect_on_play_other(ctx.state, catalog, player, card);
    ctx.state.pending_triggers.extend(triggers);
}

/// Use an activated ability `repeat` times. The whole cost was paid up
/// front; state-based checks run between repetitions so later ones see
/// the results of earlier ones.
fn activate(
    ctx: &mut RulesContext<'_>,
    player: PlayerId,
    source: InstanceId,
    ability: u8,
    targets: &[InstanceId],
    repeat: u32,
    cost: u8,
) {
    let catalog = ctx.catalog;
    let Some(card) = ctx.state.card(source) else {
        return;
    };
    let Some(activated) = definition_of(catalog, card).activated(ability) else {
        return;
    };
    let effect_source = EffectSource {
        card: source,
        controller: player,
        definition: card.definition_id(),
    };

    ctx.spend_cc(player, cost);
    ctx.emit(GameEvent::AbilityActivated {
        source,
        ability,
        repeat,
    });
    for _ in 0..repeat {
        resolve_clause(ctx, &effect_source, &activated.clause, targets);
        if settle(ctx) {
            break;
        }
    }
}
