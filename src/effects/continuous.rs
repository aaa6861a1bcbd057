//! Continuous effects, recomputed on demand.
//!
//! Nothing here is cached. Every query walks the cards currently in play
//! and sums what applies, so a source entering or leaving play is reflected
//! by the very next query.

use super::effect::{ContinuousEffect, Scope};
use crate::cards::{CardCatalog, CardDefinition, CardInstance, Stat};
use crate::core::{GameState, InstanceId, PlayerId, RulesConfig};
use crate::zones::Zone;

/// The definition a card currently uses (the copied one while copying).
#[must_use]
pub fn definition_of<'c>(catalog: &'c CardCatalog, card: &CardInstance) -> &'c CardDefinition {
    catalog.definition(card.definition_id())
}

/// Continuous effects of every card in play, paired with their source.
fn sources<'a>(
    state: &'a GameState,
    catalog: &'a CardCatalog,
) -> impl Iterator<Item = (&'a CardInstance, &'a ContinuousEffect)> + 'a {
    state
        .in_play()
        .filter_map(move |id| state.card(id))
        .flat_map(move |card| definition_of(catalog, card).continuous().map(move |e| (card, e)))
}

fn covers(scope: Scope, source: &CardInstance, target: &CardInstance) -> bool {
    match scope {
        Scope::Itself => source.id() == target.id(),
        Scope::Own => source.controller() == target.controller(),
        Scope::Opponent => source.controller() != target.controller(),
    }
}

/// Whether `target` ignores effects from a source controlled by
/// `source_controller` and named `source_name`.
///
/// Protection only guards against the opponent and only while the
/// protected card is in play. Each exception names one source card.
#[must_use]
pub fn is_protected_from(
    state: &GameState,
    catalog: &CardCatalog,
    target: InstanceId,
    source_controller: PlayerId,
    source_name: &str,
) -> bool {
    let Some(card) = state.card(target) else {
        return false;
    };
    if card.zone() != Zone::InPlay || card.controller() == source_controller {
        return false;
    }
    definition_of(catalog, card).continuous().any(|e| match e {
        ContinuousEffect::Protection { exceptions } => !exceptions.iter().any(|n| n == source_name),
        _ => false,
    })
}

/// Current value of a stat: printed value, plus this card's modifications,
/// plus every continuous buff in play that covers it.
#[must_use]
pub fn stat(state: &GameState, catalog: &CardCatalog, id: InstanceId, stat: Stat) -> i32 {
    let Some(card) = state.card(id) else {
        return 0;
    };
    let def = definition_of(catalog, card);
    let base = def.base_stat(stat);
    if card.zone() != Zone::InPlay {
        return base;
    }

    let mut total = base + card.modification_total(stat);
    for (source, effect) in sources(state, catalog) {
        if let ContinuousEffect::StatBuff {
            stat: buffed,
            amount,
            scope,
        } = effect
        {
            if *buffed != stat || !covers(*scope, source, card) {
                continue;
            }
            let source_name = &definition_of(catalog, source).name;
            if is_protected_from(state, catalog, id, source.controller(), source_name) {
                continue;
            }
            total += amount;
        }
    }
    total
}

/// Stamina left: current stamina stat minus damage taken in play.
#[must_use]
pub fn current_stamina(state: &GameState, catalog: &CardCatalog, id: InstanceId) -> i32 {
    let damage = state.card(id).map_or(0, CardInstance::damage);
    stat(state, catalog, id, Stat::Stamina) - damage
}

/// Speed in a tussle: Toys of the active player get the turn bonus.
#[must_use]
pub fn effective_speed(
    state: &GameState,
    catalog: &CardCatalog,
    config: &RulesConfig,
    id: InstanceId,
) -> i32 {
    let bonus = match state.card(id) {
        Some(card) if card.controller() == state.active_player() => config.active_speed_bonus,
        _ => 0,
    };
    stat(state, catalog, id, Stat::Speed) + bonus
}

/// Damage dealt per strike. Never negative.
#[must_use]
pub fn effective_strength(state: &GameState, catalog: &CardCatalog, id: InstanceId) -> i32 {
    stat(state, catalog, id, Stat::Strength).max(0)
}

/// Cost for `attacker` to tussle: the default, or the single lowest
/// tussle-cost modifier covering it. Modifiers never stack.
#[must_use]
pub fn tussle_cost(
    state: &GameState,
    catalog: &CardCatalog,
    config: &RulesConfig,
    attacker: InstanceId,
) -> u8 {
    let Some(card) = state.card(attacker) else {
        return config.tussle_cost;
    };
    sources(state, catalog)
        .filter_map(|(source, effect)| match effect {
            ContinuousEffect::TussleCost { cost, scope } if covers(*scope, source, card) => {
                Some(*cost)
            }
            _ => None,
        })
        .fold(config.tussle_cost, u8::min)
}

/// Whether a Toy may declare tussles at all.
#[must_use]
pub fn can_tussle(state: &GameState, catalog: &CardCatalog, id: InstanceId) -> bool {
    state.card(id).is_some_and(|card| {
        definition_of(catalog, card)
            .continuous()
            .all(|e| *e != ContinuousEffect::NoTussle)
    })
}

/// Whether `id` wins its tussles outright right now.
#[must_use]
pub fn has_auto_win(state: &GameState, catalog: &CardCatalog, id: InstanceId) -> bool {
    state.card(id).is_some_and(|card| {
        card.controller() == state.active_player()
            && definition_of(catalog, card)
                .continuous()
                .any(|e| *e == ContinuousEffect::AutoWinOnOwnTurn)
    })
}

/// Whether `id` is immune to auto-win granted by the card `source`.
#[must_use]
pub fn immune_to_auto_win(
    state: &GameState,
    catalog: &CardCatalog,
    id: InstanceId,
    source: InstanceId,
) -> bool {
    let (Some(card), Some(source)) = (state.card(id), state.card(source)) else {
        return false;
    };
    let source_name = &definition_of(catalog, source).name;
    definition_of(catalog, card).continuous().any(|e| {
        matches!(e, ContinuousEffect::AutoWinImmunity { source } if source == source_name)
    })
}

/// Net card-cost change for cards `player` plays.
#[must_use]
pub fn cost_modifier_total(state: &GameState, catalog: &CardCatalog, player: PlayerId) -> i32 {
    sources(state, catalog)
        .filter_map(|(source, effect)| match effect {
            ContinuousEffect::CostModifier { delta, scope } => {
                let applies = match scope {
                    Scope::Own => source.controller() == player,
                    Scope::Opponent => source.controller() != player,
                    Scope::Itself => false,
                };
                applies.then_some(*delta)
            }
            _ => None,
        })
        .sum()
}
