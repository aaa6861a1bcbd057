//! Target selection and validation.
//!
//! Targets are declared when a card or ability is announced and checked
//! again when each clause resolves. Protection is applied before anything
//! else: a protected card is never a legal target for its opponent's
//! effects.

use super::continuous::{definition_of, is_protected_from};
use super::effect::{TargetFilter, TargetSpec};
use crate::cards::{CardCatalog, CardId};
use crate::core::{GameState, InstanceId, PlayerId, Targets};
use crate::error::RejectReason;
use crate::zones::Zone;

/// The card an effect comes from, as seen when the effect was created.
///
/// Triggers keep resolving after their source has left play, so the
/// controller and definition are captured rather than read back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectSource {
    pub card: InstanceId,
    pub controller: PlayerId,
    pub definition: CardId,
}

impl EffectSource {
    /// Source for a card as it is right now.
    #[must_use]
    pub fn current(state: &GameState, card: InstanceId) -> Option<Self> {
        state.card(card).map(|c| Self {
            card,
            controller: c.controller(),
            definition: c.definition_id(),
        })
    }

    #[must_use]
    pub fn name<'c>(&self, catalog: &'c CardCatalog) -> &'c str {
        &catalog.definition(self.definition).name
    }
}

/// Whether `target` is a legal choice for `spec` from `source`.
#[must_use]
pub fn is_legal_target(
    state: &GameState,
    catalog: &CardCatalog,
    source: &EffectSource,
    spec: &TargetSpec,
    target: InstanceId,
) -> bool {
    if target == source.card {
        return false;
    }
    let Some(card) = state.card(target) else {
        return false;
    };

    let fits = match spec.filter {
        TargetFilter::OwnSleep => {
            card.zone() == Zone::Sleep && card.owner() == source.controller
        }
        filter => {
            card.zone() == Zone::InPlay
                && definition_of(catalog, card).is_toy()
                && match filter {
                    TargetFilter::OpponentToy => card.controller() != source.controller,
                    TargetFilter::OwnToy => card.controller() == source.controller,
                    _ => true,
                }
        }
    };

    fits && !is_protected_from(state, catalog, target, source.controller, source.name(catalog))
}

/// Every legal target for `spec`, in zone-list order.
#[must_use]
pub fn candidates(
    state: &GameState,
    catalog: &CardCatalog,
    source: &EffectSource,
    spec: &TargetSpec,
) -> Vec<InstanceId> {
    let pool: Vec<InstanceId> = match spec.filter {
        TargetFilter::OwnSleep => state
            .cards_in_zone(source.controller, Zone::Sleep)
            .to_vec(),
        _ => state.in_play().collect(),
    };
    pool.into_iter()
        .filter(|id| is_legal_target(state, catalog, source, spec, *id))
        .collect()
}

/// Check declared targets: between one and `spec.count` distinct legal
/// cards. Without a spec no targets may be declared.
pub fn validate_targets(
    state: &GameState,
    catalog: &CardCatalog,
    source: &EffectSource,
    spec: Option<&TargetSpec>,
    targets: &[InstanceId],
) -> Result<(), RejectReason> {
    let Some(spec) = spec else {
        if targets.is_empty() {
            return Ok(());
        }
        return Err(RejectReason::WrongTargetCount {
            min: 0,
            max: 0,
            got: targets.len(),
        });
    };

    let max = usize::from(spec.count);
    if targets.is_empty() || targets.len() > max {
        return Err(RejectReason::WrongTargetCount {
            min: 1,
            max,
            got: targets.len(),
        });
    }
    for (i, target) in targets.iter().enumerate() {
        if targets[..i].contains(target) {
            return Err(RejectReason::InvalidTarget(*target));
        }
        if !is_legal_target(state, catalog, source, spec, *target) {
            return Err(RejectReason::InvalidTarget(*target));
        }
    }
    Ok(())
}

/// Every way to choose between one and `count` of `candidates`, keeping
/// candidate order within each choice.
#[must_use]
pub fn target_combinations(candidates: &[InstanceId], count: u8) -> Vec<Targets> {
    let mut out = Vec::new();
    let mut current = Targets::new();
    combine(candidates, usize::from(count), &mut current, &mut out);
    out
}

fn combine(rest: &[InstanceId], room: usize, current: &mut Targets, out: &mut Vec<Targets>) {
    if room == 0 {
        return;
    }
    for (i, id) in rest.iter().enumerate() {
        current.push(*id);
        out.push(current.clone());
        combine(&rest[i + 1..], room - 1, current, out);
        current.pop();
    }
}
