//! Trigger conditions and pending triggers.
//!
//! Conditions are checked at the moment something happens, against the
//! definition the source had at that instant. A card that copies another
//! and then leaves play fires the copied card's "when slept" ability,
//! because the copy is only cleared by the move itself.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardId};
use crate::core::{GameState, InstanceId, PlayerId};
use crate::zones::{Zone, ZoneMove};

/// When a triggered ability fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerCondition {
    /// The source moved from play to its owner's sleep zone.
    WhenSlept,
    /// Its controller's turn starts while the source is in play.
    StartOfTurn,
    /// Its controller plays another card while the source is in play.
    OnPlayOther,
}

/// A fired trigger waiting to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTrigger {
    pub source: InstanceId,
    pub controller: PlayerId,
    /// Definition holding the ability, captured when it fired.
    pub definition: CardId,
    /// Index into that definition's effects.
    pub index: usize,
    pub optional: bool,
}

fn fire(
    catalog: &CardCatalog,
    source: InstanceId,
    controller: PlayerId,
    definition: CardId,
    condition: TriggerCondition,
) -> impl Iterator<Item = PendingTrigger> + '_ {
    catalog
        .definition(definition)
        .triggered()
        .filter(move |(_, t)| t.condition == condition)
        .map(move |(index, t)| PendingTrigger {
            source,
            controller,
            definition,
            index,
            optional: t.optional,
        })
}

/// Triggers fired by a zone move. Only moves from play to sleep fire
/// "when slept"; a card slept from hand or returned to hand fires nothing.
#[must_use]
pub fn collect_when_slept(catalog: &CardCatalog, movement: &ZoneMove) -> Vec<PendingTrigger> {
    if !movement.slept_from_play() {
        return Vec::new();
    }
    fire(
        catalog,
        movement.card,
        movement.controller_before,
        movement.definition_before,
        TriggerCondition::WhenSlept,
    )
    .collect()
}

/// Start-of-turn triggers for the cards `player` controls.
#[must_use]
pub fn collect_start_of_turn(
    state: &GameState,
    catalog: &CardCatalog,
    player: PlayerId,
) -> Vec<PendingTrigger> {
    collect_in_play(state, catalog, player, None, TriggerCondition::StartOfTurn)
}

/// Triggers fired when `player` plays `played`.
#[must_use]
pub fn collect_on_play_other(
    state: &GameState,
    catalog: &CardCatalog,
    player: PlayerId,
    played: InstanceId,
) -> Vec<PendingTrigger> {
    collect_in_play(state, catalog, player, Some(played), TriggerCondition::OnPlayOther)
}

fn collect_in_play(
    state: &GameState,
    catalog: &CardCatalog,
    player: PlayerId,
    exclude: Option<InstanceId>,
    condition: TriggerCondition,
) -> Vec<PendingTrigger> {
    let mut out = Vec::new();
    for id in state.cards_in_zone(player, Zone::InPlay) {
        if Some(*id) == exclude {
            continue;
        }
        if let Some(card) = state.card(*id) {
            out.extend(fire(catalog, *id, player, card.definition_id(), condition));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardCatalog;

    fn catalog() -> CardCatalog {
        CardCatalog::standard().unwrap()
    }

    fn movement(catalog: &CardCatalog, name: &str, from: Zone, to: Zone) -> ZoneMove {
        ZoneMove {
            card: InstanceId(0),
            owner: PlayerId::new(0),
            from,
            to,
            controller_before: PlayerId::new(1),
            definition_before: catalog.id_of(name).unwrap(),
        }
    }

    #[test]
    fn test_when_slept_from_play_fires() {
        let catalog = catalog();
        let fired = collect_when_slept(&catalog, &movement(&catalog, "Umbruh", Zone::InPlay, Zone::Sleep));

        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].controller, PlayerId::new(1));
        assert!(!fired[0].optional);
    }

    #[test]
    fn test_when_slept_from_hand_does_not_fire() {
        let catalog = catalog();
        let fired = collect_when_slept(&catalog, &movement(&catalog, "Umbruh", Zone::Hand, Zone::Sleep));
        assert!(fired.is_empty());

        let fired = collect_when_slept(&catalog, &movement(&catalog, "Umbruh", Zone::InPlay, Zone::Hand));
        assert!(fired.is_empty());
    }

    #[test]
    fn test_optional_trigger_flag() {
        let catalog = catalog();
        let fired = collect_when_slept(&catalog, &movement(&catalog, "Snuggles", Zone::InPlay, Zone::Sleep));
        assert_eq!(fired.len(), 1);
        assert!(fired[0].optional);
    }

    #[test]
    fn test_cards_without_triggers() {
        let catalog = catalog();
        let fired = collect_when_slept(&catalog, &movement(&catalog, "Knight", Zone::InPlay, Zone::Sleep));
        assert!(fired.is_empty());
    }
}
