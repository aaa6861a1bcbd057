//! Action validation and legal-action enumeration.
//!
//! `check` is the single gate for every action: it is a pure function of
//! the catalog, the configuration, the state and the proposed action, and
//! returns the CC the action will cost. `legal_actions` enumerates
//! candidates and keeps those `check` accepts, so the two can never
//! disagree.
//!
//! ## Decision order
//!
//! 1. A finished game accepts nothing.
//! 2. A pending trigger accepts only its controller's decision on it.
//! 3. An open interrupt window accepts only the defender's interrupt or
//!    decline.
//! 4. Otherwise the active player acts in Main.

use crate::cards::{AltPayment, CardCatalog, CardDefinition};
use crate::core::{Action, GameState, InstanceId, Payment, Phase, PlayerId, RulesConfig, Targets};
use crate::effects::continuous::{can_tussle, definition_of, tussle_cost};
use crate::effects::cost::play_cost;
use crate::effects::targeting::{candidates, target_combinations, validate_targets, EffectSource};
use crate::effects::{EffectDef, TargetSpec};
use crate::error::RejectReason;
use crate::triggers::PendingTrigger;
use crate::zones::Zone;

/// Validate `action` by `player` and return the CC it costs.
pub fn check(
    catalog: &CardCatalog,
    config: &RulesConfig,
    state: &GameState,
    player: PlayerId,
    action: &Action,
) -> Result<u8, RejectReason> {
    if state.is_game_over() {
        return Err(RejectReason::GameOver);
    }

    if let Some(trigger) = state.pending_triggers().front() {
        if player != trigger.controller {
            return Err(RejectReason::NotYourDecision(player));
        }
        return match action {
            Action::ResolveTrigger { accept, targets } => {
                check_trigger_choice(catalog, state, trigger, *accept, targets).map(|()| 0)
            }
            _ => Err(RejectReason::DecisionPending),
        };
    }

    if let Some(window) = state.interrupt_window() {
        if player != window.attacking_player.opponent() {
            return Err(RejectReason::NotYourDecision(player));
        }
        return match action {
            Action::PlayInterrupt { card } => check_interrupt(catalog, state, player, *card),
            Action::DeclineInterrupt => Ok(0),
            _ => Err(RejectReason::DecisionPending),
        };
    }

    if matches!(
        action,
        Action::ResolveTrigger { .. } | Action::PlayInterrupt { .. } | Action::DeclineInterrupt
    ) {
        return Err(RejectReason::NoPendingDecision);
    }
    if player != state.active_player() {
        return Err(RejectReason::NotYourDecision(player));
    }
    if state.phase() != Phase::Main {
        return Err(RejectReason::WrongPhase);
    }

    match action {
        Action::PlayCard {
            card,
            targets,
            payment,
        } => check_play(catalog, state, player, *card, targets, *payment),
        Action::Tussle { attacker, defender } => {
            check_tussle(catalog, config, state, player, *attacker, *defender)
        }
        Action::Activate {
            source,
            ability,
            targets,
            repeat,
        } => check_activate(catalog, state, player, *source, *ability, targets, *repeat),
        Action::EndTurn => Ok(0),
        Action::ResolveTrigger { .. } | Action::PlayInterrupt { .. } | Action::DeclineInterrupt => {
            Err(RejectReason::NoPendingDecision)
        }
    }
}

fn trigger_spec<'c>(catalog: &'c CardCatalog, trigger: &PendingTrigger) -> Option<&'c TargetSpec> {
    match catalog.definition(trigger.definition).effects.get(trigger.index) {
        Some(EffectDef::Triggered(ability)) => ability.clause.target.as_ref(),
        _ => None,
    }
}

fn trigger_source(trigger: &PendingTrigger) -> EffectSource {
    EffectSource {
        card: trigger.source,
        controller: trigger.controller,
        definition: trigger.definition,
    }
}

fn check_trigger_choice(
    catalog: &CardCatalog,
    state: &GameState,
    trigger: &PendingTrigger,
    accept: bool,
    targets: &[InstanceId],
) -> Result<(), RejectReason> {
    if !accept {
        if targets.is_empty() {
            return Ok(());
        }
        return Err(RejectReason::WrongTargetCount {
            min: 0,
            max: 0,
            got: targets.len(),
        });
    }
    let source = trigger_source(trigger);
    validate_targets(state, catalog, &source, trigger_spec(catalog, trigger), targets)
}

/// A card in `player`'s hand and its definition.
fn card_in_hand<'c>(
    catalog: &'c CardCatalog,
    state: &GameState,
    player: PlayerId,
    card: InstanceId,
) -> Result<&'c CardDefinition, RejectReason> {
    let instance = state.card(card).ok_or(RejectReason::CardNotFound(card))?;
    if instance.owner() != player || instance.zone() != Zone::Hand {
        return Err(RejectReason::NotInHand(card));
    }
    Ok(catalog.definition(instance.card_id()))
}

fn afford(state: &GameState, player: PlayerId, needed: u32) -> Result<(), RejectReason> {
    let available = state.player(player).cc();
    if needed > u32::from(available) {
        return Err(RejectReason::InsufficientCc { needed, available });
    }
    Ok(())
}

fn check_interrupt(
    catalog: &CardCatalog,
    state: &GameState,
    player: PlayerId,
    card: InstanceId,
) -> Result<u8, RejectReason> {
    let def = card_in_hand(catalog, state, player, card)?;
    if !def.interrupt {
        return Err(RejectReason::NotAnInterrupt(card));
    }
    let cost = play_cost(state, catalog, player, def, &[])?;
    afford(state, player, u32::from(cost))?;
    Ok(cost)
}

fn check_play(
    catalog: &CardCatalog,
    state: &GameState,
    player: PlayerId,
    card: InstanceId,
    targets: &[InstanceId],
    payment: Payment,
) -> Result<u8, RejectReason> {
    let def = card_in_hand(catalog, state, player, card)?;
    // Interrupt cards are only played into an open window.
    if def.interrupt {
        return Err(RejectReason::WrongPhase);
    }

    let source = EffectSource {
        card,
        controller: player,
        definition: def.id,
    };
    let spec = def.targeted_play_clause().and_then(|c| c.target.as_ref());
    validate_targets(state, catalog, &source, spec, targets)?;

    match payment {
        Payment::Cc => {
            let cost = play_cost(state, catalog, player, def, targets)?;
            afford(state, player, u32::from(cost))?;
            Ok(cost)
        }
        Payment::SleepOwnToy(toy) => {
            if def.alternative != Some(AltPayment::SleepOwnToy) {
                return Err(RejectReason::InvalidPayment);
            }
            let paid_with = state.card(toy).ok_or(RejectReason::CardNotFound(toy))?;
            let usable = paid_with.zone() == Zone::InPlay
                && paid_with.controller() == player
                && definition_of(catalog, paid_with).is_toy();
            if !usable || targets.contains(&toy) {
                return Err(RejectReason::InvalidPayment);
            }
            Ok(0)
        }
    }
}

fn check_tussle(
    catalog: &CardCatalog,
    config: &RulesConfig,
    state: &GameState,
    player: PlayerId,
    attacker: InstanceId,
    defender: Option<InstanceId>,
) -> Result<u8, RejectReason> {
    let card = state.card(attacker).ok_or(RejectReason::CardNotFound(attacker))?;
    if card.zone() != Zone::InPlay || card.controller() != player {
        return Err(RejectReason::NotInPlay(attacker));
    }
    if !definition_of(catalog, card).is_toy() {
        return Err(RejectReason::NotAToy(attacker));
    }
    if !can_tussle(state, catalog, attacker) {
        return Err(RejectReason::CannotTussle(attacker));
    }

    let opponent = player.opponent();
    match defender {
        Some(defender) => {
            let target = state.card(defender).ok_or(RejectReason::CardNotFound(defender))?;
            let valid = target.zone() == Zone::InPlay
                && target.controller() == opponent
                && definition_of(catalog, target).is_toy();
            if !valid {
                return Err(RejectReason::InvalidTarget(defender));
            }
        }
        None => {
            if !state.cards_in_zone(opponent, Zone::InPlay).is_empty() {
                return Err(RejectReason::DirectAttackNotAllowed);
            }
            if state.player(player).direct_attacks() >= config.direct_attack_limit {
                return Err(RejectReason::DirectAttackLimit);
            }
            if state.cards_in_zone(opponent, Zone::Hand).is_empty() {
                return Err(RejectReason::OpponentHandEmpty);
            }
        }
    }

    let cost = tussle_cost(state, catalog, config, attacker);
    afford(state, player, u32::from(cost))?;
    Ok(cost)
}

fn check_activate(
    catalog: &CardCatalog,
    state: &GameState,
    player: PlayerId,
    source: InstanceId,
    ability: u8,
    targets: &[InstanceId],
    repeat: u32,
) -> Result<u8, RejectReason> {
    let card = state.card(source).ok_or(RejectReason::CardNotFound(source))?;
    if card.zone() != Zone::InPlay || card.controller() != player {
        return Err(RejectReason::NotInPlay(source));
    }
    let activated = definition_of(catalog, card)
        .activated(ability)
        .ok_or(RejectReason::NoSuchAbility {
            source_card: source,
            index: ability,
        })?;
    if repeat == 0 {
        return Err(RejectReason::ZeroRepeat);
    }

    let effect_source = EffectSource {
        card: source,
        controller: player,
        definition: card.definition_id(),
    };
    validate_targets(
        state,
        catalog,
        &effect_source,
        activated.clause.target.as_ref(),
        targets,
    )?;

    let total = u32::from(activated.cost).saturating_mul(repeat);
    afford(state, player, total)?;
    // Affordable, so bounded by the player's CC.
    Ok(u8::try_from(total).unwrap_or(u8::MAX))
}

/// Target choices for an optional spec: every combination of legal
/// candidates, or a single empty choice when nothing is targeted.
fn target_options(
    state: &GameState,
    catalog: &CardCatalog,
    source: &EffectSource,
    spec: Option<&TargetSpec>,
) -> Vec<Targets> {
    match spec {
        Some(spec) => {
            let pool = candidates(state, catalog, source, spec);
            target_combinations(&pool, spec.count)
        }
        None => vec![Targets::new()],
    }
}

/// Every action `player` may legally take right now. Activated abilities
/// are offered once each (`repeat: 1`); callers choose larger repeats
/// themselves.
#[must_use]
pub fn legal_actions(
    catalog: &CardCatalog,
    config: &RulesConfig,
    state: &GameState,
    player: PlayerId,
) -> Vec<Action> {
    if state.decision_player() != Some(player) {
        return Vec::new();
    }

    let mut proposals = Vec::new();

    if let Some(trigger) = state.pending_triggers().front() {
        proposals.push(Action::ResolveTrigger {
            accept: false,
            targets: Targets::new(),
        });
        let source = trigger_source(trigger);
        for targets in target_options(state, catalog, &source, trigger_spec(catalog, trigger)) {
            proposals.push(Action::ResolveTrigger {
                accept: true,
                targets,
            });
        }
    } else if state.interrupt_window().is_some() {
        proposals.push(Action::DeclineInterrupt);
        for card in state.cards_in_zone(player, Zone::Hand) {
            proposals.push(Action::PlayInterrupt { card: *card });
        }
    } else {
        propose_plays(catalog, state, player, &mut proposals);
        propose_tussles(state, player, &mut proposals);
        propose_activations(catalog, state, player, &mut proposals);
        proposals.push(Action::EndTurn);
    }

    proposals.retain(|action| check(catalog, config, state, player, action).is_ok());
    proposals
}

fn propose_plays(catalog: &CardCatalog, state: &GameState, player: PlayerId, out: &mut Vec<Action>) {
    let own_toys = state.cards_in_zone(player, Zone::InPlay);
    for card in state.cards_in_zone(player, Zone::Hand) {
        let Some(instance) = state.card(*card) else {
            continue;
        };
        let def = catalog.definition(instance.card_id());
        let source = EffectSource {
            card: *card,
            controller: player,
            definition: def.id,
        };
        let spec = def.targeted_play_clause().and_then(|c| c.target.as_ref());
        for targets in target_options(state, catalog, &source, spec) {
            out.push(Action::PlayCard {
                card: *card,
                targets: targets.clone(),
                payment: Payment::Cc,
            });
            if def.alternative == Some(AltPayment::SleepOwnToy) {
                for toy in own_toys {
                    out.push(Action::PlayCard {
                        card: *card,
                        targets: targets.clone(),
                        payment: Payment::SleepOwnToy(*toy),
                    });
                }
            }
        }
    }
}

fn propose_tussles(state: &GameState, player: PlayerId, out: &mut Vec<Action>) {
    let defenders = state.cards_in_zone(player.opponent(), Zone::InPlay);
    for attacker in state.cards_in_zone(player, Zone::InPlay) {
        out.push(Action::Tussle {
            attacker: *attacker,
            defender: None,
        });
        for defender in defenders {
            out.push(Action::Tussle {
                attacker: *attacker,
                defender: Some(*defender),
            });
        }
    }
}

fn propose_activations(
    catalog: &CardCatalog,
    state: &GameState,
    player: PlayerId,
    out: &mut Vec<Action>,
) {
    for source in state.cards_in_zone(player, Zone::InPlay) {
        let Some(card) = state.card(*source) else {
            continue;
        };
        let def = definition_of(catalog, card);
        let effect_source = EffectSource {
            card: *source,
            controller: player,
            definition: def.id,
        };
        for index in 0..def.activated_count() {
            let Ok(ability) = u8::try_from(index) else {
                break;
            };
            let spec = def.activated(ability).and_then(|a| a.clause.target.as_ref());
            for targets in target_options(state, catalog, &effect_source, spec) {
                out.push(Action::Activate {
                    source: *source,
                    ability,
                    targets,
                    repeat: 1,
                });
            }
        }
    }
}
