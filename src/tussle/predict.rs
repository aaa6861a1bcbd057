//! Strike arithmetic and outcome prediction.
//!
//! `simulate_strikes` is the single source of truth for who hits whom. The
//! resolver applies its result to the state; the predictor only reads it,
//! so a prediction always agrees with what resolution would do from the
//! same state.

use serde::{Deserialize, Serialize};

use crate::cards::CardCatalog;
use crate::core::{GameState, InstanceId, RulesConfig};
use crate::effects::continuous::{
    current_stamina, effective_speed, effective_strength, has_auto_win, immune_to_auto_win,
};
use crate::error::RejectReason;
use crate::zones::Zone;

/// One side of a Toy-vs-Toy tussle, as it stands at resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Combatant {
    pub speed: i32,
    pub strength: i32,
    pub stamina: i32,
}

impl Combatant {
    pub(crate) fn of(
        state: &GameState,
        catalog: &CardCatalog,
        config: &RulesConfig,
        id: InstanceId,
    ) -> Self {
        Self {
            speed: effective_speed(state, catalog, config, id),
            strength: effective_strength(state, catalog, id),
            stamina: current_stamina(state, catalog, id),
        }
    }
}

/// Which strikes land in an exchange. Each strike deals the striker's
/// strength.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exchange {
    pub attacker_strikes: bool,
    pub defender_strikes: bool,
    /// The attacker's strike happens first (or both at once on a speed tie).
    pub attacker_first: bool,
}

/// Work out the strikes of a tussle.
///
/// The faster Toy strikes first and the slower one strikes back only if it
/// is still above zero stamina. Equal speed means both strike at once.
#[must_use]
pub fn simulate_strikes(attacker: Combatant, defender: Combatant) -> Exchange {
    use std::cmp::Ordering;

    match attacker.speed.cmp(&defender.speed) {
        Ordering::Equal => Exchange {
            attacker_strikes: true,
            defender_strikes: true,
            attacker_first: true,
        },
        Ordering::Greater => Exchange {
            attacker_strikes: true,
            defender_strikes: defender.stamina - attacker.strength > 0,
            attacker_first: true,
        },
        Ordering::Less => Exchange {
            attacker_strikes: attacker.stamina - defender.strength > 0,
            defender_strikes: true,
            attacker_first: false,
        },
    }
}

/// Expected result of a tussle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TussleOutcome {
    /// Only the defender ends asleep.
    AttackerWins,
    /// Only the attacker ends asleep.
    DefenderWins,
    /// Both survive or both sleep.
    Tie,
}

/// Predict a Toy-vs-Toy tussle without touching the state.
///
/// The attacker's auto-win is taken into account. Both cards must be Toys
/// in play on opposite sides.
pub fn predict_tussle_outcome(
    state: &GameState,
    catalog: &CardCatalog,
    config: &RulesConfig,
    attacker: InstanceId,
    defender: InstanceId,
) -> Result<TussleOutcome, RejectReason> {
    let attacking = state.card(attacker).ok_or(RejectReason::CardNotFound(attacker))?;
    let defending = state.card(defender).ok_or(RejectReason::CardNotFound(defender))?;
    if attacking.zone() != Zone::InPlay {
        return Err(RejectReason::NotInPlay(attacker));
    }
    if defending.zone() != Zone::InPlay || defending.controller() == attacking.controller() {
        return Err(RejectReason::InvalidTarget(defender));
    }

    if has_auto_win(state, catalog, attacker)
        && !immune_to_auto_win(state, catalog, defender, attacker)
    {
        return Ok(TussleOutcome::AttackerWins);
    }

    let a = Combatant::of(state, catalog, config, attacker);
    let d = Combatant::of(state, catalog, config, defender);
    let exchange = simulate_strikes(a, d);
    let attacker_left = a.stamina - if exchange.defender_strikes { d.strength } else { 0 };
    let defender_left = d.stamina - if exchange.attacker_strikes { a.strength } else { 0 };

    Ok(match (attacker_left > 0, defender_left > 0) {
        (true, false) => TussleOutcome::AttackerWins,
        (false, true) => TussleOutcome::DefenderWins,
        _ => TussleOutcome::Tie,
    })
}
