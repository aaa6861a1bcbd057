//! Turn structure: Start → Main → End → the next player's Start.
//!
//! Start grants CC, resets the direct-attack counter and resolves
//! start-of-turn triggers, then moves to Main on its own. An optional
//! start-of-turn trigger holds the game in Start until its controller
//! decides. Main ends when both players pass priority in a row. The
//! non-active player has no general response, so the active player's pass
//! is answered at once. End expires end-of-turn modifications and runs the
//! state-based checks before the turn passes. Unspent CC carries over.

use log::debug;

use super::context::RulesContext;
use super::state_based::settle;
use crate::core::{InstanceId, Phase};
use crate::effects::resolver::drain_triggers;
use crate::triggers::{collect_start_of_turn, GameEvent};

/// Run the active player's Start phase and enter Main.
pub(crate) fn begin_turn(ctx: &mut RulesContext<'_>) {
    let player = ctx.state.active_player;
    let turn = ctx.state.turn;
    debug!("turn {turn} begins for {player}");

    ctx.state.phase = Phase::Start;
    ctx.state.players[player].direct_attacks = 0;
    ctx.emit(GameEvent::TurnStarted { turn, player });

    let grant = if turn == 1 {
        ctx.config.first_turn_grant
    } else {
        ctx.config.turn_grant
    };
    ctx.grant_cc(player, grant);

    let triggers = collect_start_of_turn(ctx.state, ctx.catalog, player);
    ctx.state.pending_triggers.extend(triggers);

    ctx.state.priority.reset(player);
    drain_triggers(ctx);
    enter_main(ctx);
}

/// Move from Start to Main once no start-of-turn trigger is waiting.
pub(crate) fn enter_main(ctx: &mut RulesContext<'_>) {
    if ctx.state.phase == Phase::Start
        && ctx.state.pending_triggers.is_empty()
        && ctx.state.winner.is_none()
    {
        ctx.state.phase = Phase::Main;
    }
}

/// The active player passes. Both passes complete, so the turn ends and
/// the next one begins.
pub(crate) fn end_turn(ctx: &mut RulesContext<'_>) {
    let player = ctx.state.active_player;
    let turn = ctx.state.turn;

    ctx.state.priority.pass();
    let both_passed = ctx.state.priority.pass();
    assert!(both_passed, "turn ended without both players passing");

    ctx.state.phase = Phase::End;
    let mut expired = 0;
    for index in 0..ctx.state.cards.len() {
        let id = InstanceId(index as u32);
        if ctx.state.card(id).is_some_and(|c| !c.modifications().is_empty()) {
            expired += ctx.state.card_mut(id).expire_end_of_turn();
        }
    }
    debug!("turn {turn} ends for {player}, {expired} modifications expired");
    // When-slept triggers queued here resolve during the next Start.
    if settle(ctx) {
        return;
    }
    ctx.emit(GameEvent::TurnEnded { turn, player });

    ctx.state.active_player = player.opponent();
    ctx.state.turn += 1;
    begin_turn(ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Modification;
    use crate::cards::Stat;
    use crate::core::PlayerId;
    use crate::rules::testing::{place, Table};
    use crate::zones::Zone;

    #[test]
    fn test_first_turn_grants_two() {
        let mut table = Table::new(&["Knight"], &["Ka"]);
        table.with_context(begin_turn);

        assert_eq!(table.state.player(PlayerId::new(0)).cc(), 2);
        assert_eq!(table.state.phase(), Phase::Main);
    }

    #[test]
    fn test_later_turn_grant_clamps_at_cap() {
        let mut table = Table::new(&["Knight"], &["Ka"]);
        table.set_cc(1, 5);

        table.with_context(end_turn);

        assert_eq!(table.state.active_player(), PlayerId::new(1));
        assert_eq!(table.state.turn(), 2);
        assert_eq!(table.state.player(PlayerId::new(1)).cc(), 7);
        assert!(table.state.events().iter().any(|e| matches!(
            e,
            GameEvent::CcGained { player, amount: 2 } if *player == PlayerId::new(1)
        )));
    }

    #[test]
    fn test_unspent_cc_carries_over() {
        let mut table = Table::new(&["Knight"], &["Ka"]);
        table.set_cc(0, 3);

        table.with_context(end_turn);

        assert_eq!(table.state.player(PlayerId::new(0)).cc(), 3);
    }

    #[test]
    fn test_direct_attack_counter_resets_on_own_turn() {
        let mut table = Table::new(&["Knight"], &["Ka"]);
        table.state.players[PlayerId::new(1)].direct_attacks = 2;

        table.with_context(end_turn);

        assert_eq!(table.state.player(PlayerId::new(1)).direct_attacks(), 0);
    }

    #[test]
    fn test_end_of_turn_buffs_expire() {
        let mut table = Table::new(&["Knight"], &["Ka"]);
        place(&mut table, &[(0, "Knight")]);
        let knight = table.card(0, "Knight");
        table.with_context(|ctx| {
            ctx.add_modification(
                knight,
                Modification {
                    stat: Stat::Speed,
                    delta: 2,
                    source: knight,
                    until_end_of_turn: true,
                },
            );
            ctx.add_damage(knight, 1);
            end_turn(ctx);
        });

        let card = table.state.card(knight).unwrap();
        assert!(card.modifications().is_empty());
        assert_eq!(card.damage(), 1);
    }

    fn stamina_buff(knight: InstanceId) -> Modification {
        Modification {
            stat: Stat::Stamina,
            delta: 2,
            source: knight,
            until_end_of_turn: true,
        }
    }

    #[test]
    fn test_expiry_sleeps_before_the_turn_passes() {
        let mut table = Table::new(&["Knight", "Ka"], &["Umbruh"]);
        place(&mut table, &[(0, "Knight")]);
        let knight = table.card(0, "Knight");
        table.with_context(|ctx| {
            ctx.add_modification(knight, stamina_buff(knight));
            ctx.add_damage(knight, 3);
            end_turn(ctx);
        });

        assert_eq!(table.state.card(knight).unwrap().zone(), Zone::Sleep);
        assert_eq!(table.state.turn(), 2);
        let slept = table
            .state
            .events()
            .iter()
            .position(|e| e.moved_to(Zone::Sleep).is_some())
            .unwrap();
        let next_turn = table
            .state
            .events()
            .iter()
            .position(|e| matches!(e, GameEvent::TurnStarted { turn: 2, .. }))
            .unwrap();
        assert!(slept < next_turn);
    }

    #[test]
    fn test_win_at_end_of_turn_stops_the_turn_change() {
        let mut table = Table::new(&["Knight"], &["Umbruh"]);
        place(&mut table, &[(0, "Knight")]);
        let knight = table.card(0, "Knight");
        table.with_context(|ctx| {
            ctx.add_modification(knight, stamina_buff(knight));
            ctx.add_damage(knight, 3);
            end_turn(ctx);
        });

        assert_eq!(table.state.winner(), Some(PlayerId::new(1)));
        assert_eq!(table.state.turn(), 1);
        assert_eq!(table.state.active_player(), PlayerId::new(0));
        assert_eq!(table.state.player(PlayerId::new(1)).cc(), 0);
        assert!(!table
            .state
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::TurnStarted { turn: 2, .. })));
    }

    #[test]
    fn test_start_of_turn_trigger_resolves() {
        let mut table = Table::new(&["Knight"], &["Belchaletta"]);
        place(&mut table, &[(1, "Belchaletta")]);

        table.with_context(end_turn);

        // 4 from the turn grant, 2 from Belchaletta.
        assert_eq!(table.state.player(PlayerId::new(1)).cc(), 6);
        assert!(table.state.pending_triggers().is_empty());
    }
}
