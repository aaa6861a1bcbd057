//! Effect resolution.
//!
//! Applies clauses to the state and works through the trigger queue.
//! Declared targets are re-checked here: a target that became illegal
//! since declaration skips the clause for that target only, and the rest
//! of the resolution carries on.

use log::trace;

use super::continuous::is_protected_from;
use super::effect::{Clause, Effect, EffectDef};
use super::targeting::{is_legal_target, EffectSource};
use crate::cards::Modification;
use crate::core::InstanceId;
use crate::rules::context::RulesContext;
use crate::rules::state_based::settle;
use crate::triggers::{GameEvent, PendingTrigger};
use crate::zones::Zone;

/// Resolve one clause from `source` against the declared targets.
pub(crate) fn resolve_clause(
    ctx: &mut RulesContext<'_>,
    source: &EffectSource,
    clause: &Clause,
    targets: &[InstanceId],
) {
    let Some(spec) = &clause.target else {
        apply_untargeted(ctx, source, &clause.effect);
        return;
    };

    for target in targets {
        if !is_legal_target(ctx.state, ctx.catalog, source, spec, *target) {
            trace!("{} skips illegal target {target}", source.card);
            ctx.emit(GameEvent::ClauseSkipped {
                source: source.card,
                target: *target,
            });
            continue;
        }
        apply_to_target(ctx, source, &clause.effect, *target);
    }
}

fn apply_untargeted(ctx: &mut RulesContext<'_>, source: &EffectSource, effect: &Effect) {
    match effect {
        Effect::GainCc(amount) => ctx.grant_cc(source.controller, *amount),
        Effect::ReturnAll => move_all_in_play(ctx, source, Zone::Hand),
        Effect::SleepAll => move_all_in_play(ctx, source, Zone::Sleep),
        Effect::CancelTussle => {
            if let Some(window) = ctx.state.interrupt_window.take() {
                ctx.emit(GameEvent::TussleCancelled {
                    attacker: window.attacker,
                    by: source.card,
                });
            }
        }
        // Targeted effects always carry a target spec.
        Effect::SleepTarget
        | Effect::ReturnTarget
        | Effect::TakeControl
        | Effect::BuffTarget { .. }
        | Effect::DamageTarget(_)
        | Effect::WakeTarget
        | Effect::CopyTarget => {}
    }
}

fn move_all_in_play(ctx: &mut RulesContext<'_>, source: &EffectSource, to: Zone) {
    let name = source.name(ctx.catalog);
    let affected: Vec<_> = ctx
        .state
        .in_play()
        .filter(|id| !is_protected_from(ctx.state, ctx.catalog, *id, source.controller, name))
        .collect();
    for id in affected {
        ctx.move_card(id, to);
    }
}

fn apply_to_target(
    ctx: &mut RulesContext<'_>,
    source: &EffectSource,
    effect: &Effect,
    target: InstanceId,
) {
    match effect {
        Effect::SleepTarget => {
            ctx.move_card(target, Zone::Sleep);
        }
        Effect::ReturnTarget | Effect::WakeTarget => {
            ctx.move_card(target, Zone::Hand);
        }
        Effect::TakeControl => ctx.transfer_control(target, source.controller),
        Effect::BuffTarget { stat, amount } => ctx.add_modification(
            target,
            Modification {
                stat: *stat,
                delta: *amount,
                source: source.card,
                until_end_of_turn: true,
            },
        ),
        Effect::DamageTarget(amount) => ctx.add_damage(target, *amount),
        Effect::CopyTarget => {
            let copied = ctx.state.card(target).map(|c| c.definition_id());
            let in_play = ctx
                .state
                .card(source.card)
                .is_some_and(|c| c.zone() == Zone::InPlay);
            if let (Some(definition), true) = (copied, in_play) {
                ctx.state.card_mut(source.card).copy_of = Some(definition);
            }
        }
        Effect::GainCc(_) | Effect::ReturnAll | Effect::SleepAll | Effect::CancelTussle => {
            apply_untargeted(ctx, source, effect);
        }
    }
}

/// Resolve a fired trigger, optionally with chosen targets.
pub(crate) fn resolve_trigger(
    ctx: &mut RulesContext<'_>,
    trigger: &PendingTrigger,
    targets: &[InstanceId],
) {
    let catalog = ctx.catalog;
    let def = catalog.definition(trigger.definition);
    if let Some(EffectDef::Triggered(ability)) = def.effects.get(trigger.index) {
        let source = EffectSource {
            card: trigger.source,
            controller: trigger.controller,
            definition: trigger.definition,
        };
        resolve_clause(ctx, &source, &ability.clause, targets);
    }
    ctx.emit(GameEvent::TriggerResolved {
        source: trigger.source,
        accepted: true,
    });
}

/// Settle state-based actions and resolve mandatory triggers until the
/// queue is empty or an optional trigger waits for its controller.
pub(crate) fn drain_triggers(ctx: &mut RulesContext<'_>) {
    loop {
        if settle(ctx) {
            return;
        }
        let Some(front) = ctx.state.pending_triggers.front().copied() else {
            return;
        };
        if front.optional {
            return;
        }
        ctx.state.pending_triggers.pop_front();
        resolve_trigger(ctx, &front, &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Stat;
    use crate::core::PlayerId;
    use crate::effects::continuous::stat;
    use crate::rules::testing::{place, Table};
    use smallvec::smallvec;

    fn play_source(table: &Table, owner: usize, name: &str) -> EffectSource {
        EffectSource::current(&table.state, table.card(owner, name)).unwrap()
    }

    fn first_play_clause(table: &Table, name: &str) -> Clause {
        table
            .catalog
            .by_name(name)
            .unwrap()
            .play_clauses()
            .next()
            .unwrap()
            .clone()
    }

    #[test]
    fn test_sleep_target_fires_when_slept() {
        let mut table = Table::new(&["Lullaby"], &["Umbruh", "Ka"]);
        place(&mut table, &[(1, "Umbruh")]);
        let umbruh = table.card(1, "Umbruh");
        let source = play_source(&table, 0, "Lullaby");
        let clause = first_play_clause(&table, "Lullaby");

        table.with_context(|ctx| {
            resolve_clause(ctx, &source, &clause, &[umbruh]);
            drain_triggers(ctx);
        });

        assert_eq!(table.state.card(umbruh).unwrap().zone(), Zone::Sleep);
        // Umbruh's controller gains 1 CC from its trigger.
        assert_eq!(table.state.player(PlayerId::new(1)).cc(), 1);
    }

    #[test]
    fn test_illegal_target_skips_only_that_target() {
        let mut table = Table::new(&["Sun", "Knight", "Ka"], &[]);
        place(&mut table, &[(0, "Knight"), (0, "Ka")]);
        let knight = table.card(0, "Knight");
        let ka = table.card(0, "Ka");
        table.state.move_card(knight, Zone::Sleep);
        let source = play_source(&table, 0, "Sun");
        let clause = first_play_clause(&table, "Sun");

        // Ka is still in play, so waking it is illegal.
        table.with_context(|ctx| resolve_clause(ctx, &source, &clause, &[ka, knight]));

        assert_eq!(table.state.card(knight).unwrap().zone(), Zone::Hand);
        assert_eq!(table.state.card(ka).unwrap().zone(), Zone::InPlay);
        assert!(table.state.events().iter().any(|e| matches!(
            e,
            GameEvent::ClauseSkipped { target, .. } if *target == ka
        )));
    }

    #[test]
    fn test_return_all_respects_protection_exceptions() {
        let mut table = Table::new(&["Toynado", "Clean", "Knight"], &["Beary", "Ka"]);
        place(&mut table, &[(0, "Knight"), (1, "Beary"), (1, "Ka")]);
        let beary = table.card(1, "Beary");
        let clean = play_source(&table, 0, "Clean");
        let clean_clause = first_play_clause(&table, "Clean");

        // Clean is not excepted: Beary stays, everything else sleeps.
        table.with_context(|ctx| resolve_clause(ctx, &clean, &clean_clause, &[]));
        assert_eq!(table.state.card(beary).unwrap().zone(), Zone::InPlay);
        assert_eq!(table.state.card(table.card(1, "Ka")).unwrap().zone(), Zone::Sleep);
        assert_eq!(table.state.card(table.card(0, "Knight")).unwrap().zone(), Zone::Sleep);

        // Toynado is excepted: Beary returns to hand.
        let toynado = play_source(&table, 0, "Toynado");
        let toynado_clause = first_play_clause(&table, "Toynado");
        table.with_context(|ctx| resolve_clause(ctx, &toynado, &toynado_clause, &[]));
        assert_eq!(table.state.card(beary).unwrap().zone(), Zone::Hand);
    }

    #[test]
    fn test_return_to_hand_fires_nothing() {
        let mut table = Table::new(&["Toynado"], &["Umbruh", "Ka"]);
        place(&mut table, &[(1, "Umbruh")]);
        let source = play_source(&table, 0, "Toynado");
        let clause = first_play_clause(&table, "Toynado");

        table.with_context(|ctx| resolve_clause(ctx, &source, &clause, &[]));

        assert!(table.state.pending_triggers().is_empty());
    }

    #[test]
    fn test_take_control_keeps_owner() {
        let mut table = Table::new(&["Twist"], &["Ka", "Knight"]);
        place(&mut table, &[(1, "Ka")]);
        let ka = table.card(1, "Ka");
        let source = play_source(&table, 0, "Twist");
        let clause = first_play_clause(&table, "Twist");

        table.with_context(|ctx| resolve_clause(ctx, &source, &clause, &[ka]));

        let card = table.state.card(ka).unwrap();
        assert_eq!(card.controller(), PlayerId::new(0));
        assert_eq!(card.owner(), PlayerId::new(1));
    }

    #[test]
    fn test_buff_target_is_end_of_turn() {
        let mut table = Table::new(&["Sugar", "Knight"], &[]);
        place(&mut table, &[(0, "Knight")]);
        let knight = table.card(0, "Knight");
        let source = play_source(&table, 0, "Sugar");
        let clause = first_play_clause(&table, "Sugar");

        table.with_context(|ctx| resolve_clause(ctx, &source, &clause, &[knight]));

        assert_eq!(stat(&table.state, &table.catalog, knight, Stat::Speed), 6);
        assert!(table.state.card(knight).unwrap().modifications()[0].until_end_of_turn);
    }

    #[test]
    fn test_copy_target_takes_definition() {
        let mut table = Table::new(&["Copy", "Knight"], &[]);
        place(&mut table, &[(0, "Knight"), (0, "Copy")]);
        let knight = table.card(0, "Knight");
        let copy = table.card(0, "Copy");
        let source = play_source(&table, 0, "Copy");
        let clause = first_play_clause(&table, "Copy");

        table.with_context(|ctx| resolve_clause(ctx, &source, &clause, &[knight]));

        let card = table.state.card(copy).unwrap();
        assert_eq!(card.copy_of(), Some(table.catalog.id_of("Knight").unwrap()));
        assert_eq!(stat(&table.state, &table.catalog, copy, Stat::Strength), 4);
    }

    #[test]
    fn test_mandatory_triggers_drain_optional_wait() {
        let mut table = Table::new(&["Clean", "Ka"], &["Umbruh", "Snuggles", "Knight"]);
        place(&mut table, &[(1, "Umbruh"), (1, "Snuggles")]);
        let source = play_source(&table, 0, "Clean");
        let clause = first_play_clause(&table, "Clean");

        table.with_context(|ctx| {
            resolve_clause(ctx, &source, &clause, &[]);
            drain_triggers(ctx);
        });

        // Umbruh's must-trigger resolved; Snuggles' may-trigger waits.
        assert_eq!(table.state.player(PlayerId::new(1)).cc(), 1);
        let pending = table.state.pending_triggers();
        assert_eq!(pending.len(), 1);
        assert!(pending[0].optional);
        assert_eq!(table.state.decision_player(), Some(PlayerId::new(1)));
    }

    #[test]
    fn test_damage_then_settle() {
        let mut table = Table::new(&["Archer", "Ka"], &["Hind Leg Kicker", "Knight"]);
        place(&mut table, &[(0, "Archer"), (1, "Hind Leg Kicker")]);
        let archer = table.card(0, "Archer");
        let kicker = table.card(1, "Hind Leg Kicker");
        let source = EffectSource::current(&table.state, archer).unwrap();
        let clause = match table.catalog.by_name("Archer").unwrap().activated(0) {
            Some(a) => a.clause.clone(),
            None => panic!("Archer has an activated ability"),
        };
        let targets: crate::core::Targets = smallvec![kicker];

        table.with_context(|ctx| {
            resolve_clause(ctx, &source, &clause, &targets);
            drain_triggers(ctx);
        });

        assert_eq!(table.state.card(kicker).unwrap().zone(), Zone::Sleep);
    }
}
