//! Card cost computation.
//!
//! Steps, in order:
//!
//! 1. base cost: the fixed cost, or the sleep-discounted base
//! 2. cost modifiers in play, summed, floored at zero
//! 3. cost copy: a copy card costs its target's printed cost
//!
//! An alternative payment is not a step. It replaces paying the final
//! number and is handled by the caller.

use super::continuous::{cost_modifier_total, definition_of};
use crate::cards::{CardCatalog, CardDefinition, CostPolicy, VariableCost};
use crate::core::{GameState, InstanceId, PlayerId};
use crate::error::RejectReason;
use crate::zones::Zone;

/// CC `player` must pay to play `def` with the given targets.
pub fn play_cost(
    state: &GameState,
    catalog: &CardCatalog,
    player: PlayerId,
    def: &CardDefinition,
    targets: &[InstanceId],
) -> Result<u8, RejectReason> {
    let base = match def.cost {
        CostPolicy::Fixed(n) => i32::from(n),
        CostPolicy::Variable(VariableCost::SleepDiscount { base }) => {
            let asleep = state.cards_in_zone(player, Zone::Sleep).len();
            i32::from(base) - i32::try_from(asleep).unwrap_or(i32::MAX)
        }
        CostPolicy::Variable(VariableCost::CopyTarget) => 0,
    };

    let modified = (base.max(0) + cost_modifier_total(state, catalog, player)).max(0);

    let cost = match def.cost {
        CostPolicy::Variable(VariableCost::CopyTarget) => {
            let target = targets.first().ok_or(RejectReason::WrongTargetCount {
                min: 1,
                max: 1,
                got: 0,
            })?;
            let card = state
                .card(*target)
                .ok_or(RejectReason::CardNotFound(*target))?;
            i32::from(definition_of(catalog, card).printed_cost())
        }
        _ => modified,
    };

    Ok(u8::try_from(cost).unwrap_or(u8::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{place, Table};

    fn cost_of(table: &Table, player: usize, name: &str, targets: &[InstanceId]) -> u8 {
        let def = table.catalog.by_name(name).unwrap();
        play_cost(&table.state, &table.catalog, PlayerId::new(player as u8), def, targets).unwrap()
    }

    #[test]
    fn test_fixed_cost() {
        let table = Table::new(&["Clean"], &[]);
        assert_eq!(cost_of(&table, 0, "Clean", &[]), 3);
    }

    #[test]
    fn test_sleep_discount_floors_at_zero() {
        let mut table = Table::new(&["Dream", "Knight", "Ka", "Umbruh", "Snuggles", "Gloom"], &[]);
        assert_eq!(cost_of(&table, 0, "Dream", &[]), 4);

        for name in ["Knight", "Ka"] {
            let id = table.card(0, name);
            table.state.move_card(id, Zone::Sleep);
        }
        assert_eq!(cost_of(&table, 0, "Dream", &[]), 2);

        for name in ["Umbruh", "Snuggles", "Gloom"] {
            let id = table.card(0, name);
            table.state.move_card(id, Zone::Sleep);
        }
        assert_eq!(cost_of(&table, 0, "Dream", &[]), 0);
    }

    #[test]
    fn test_opponent_cost_modifier() {
        let mut table = Table::new(&["Clean"], &["Gibbers"]);
        place(&mut table, &[(1, "Gibbers")]);
        assert_eq!(cost_of(&table, 0, "Clean", &[]), 4);
    }

    #[test]
    fn test_copy_uses_printed_cost_after_modifiers() {
        let mut table = Table::new(&["Copy", "Raggy"], &["Gibbers"]);
        place(&mut table, &[(0, "Raggy"), (1, "Gibbers")]);
        let raggy = table.card(0, "Raggy");

        assert_eq!(cost_of(&table, 0, "Copy", &[raggy]), 3);
        let def = table.catalog.by_name("Copy").unwrap();
        assert!(play_cost(&table.state, &table.catalog, PlayerId::new(0), def, &[]).is_err());
    }
}
