//! Turn flow integration tests.
//!
//! CC grants and carry-over, decision ownership, and win detection driven
//! entirely through the public engine interface.

use tussle_engine::cards::CardCatalog;
use tussle_engine::core::{Action, GameState, InstanceId, Phase, PlayerId, RulesConfig};
use tussle_engine::rules::{Engine, GameSetup, PlayerSetup, RulesEngine};
use tussle_engine::triggers::GameEvent;
use tussle_engine::zones::Zone;
use tussle_engine::RejectReason;

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

fn start(first: [&str; 6], second: [&str; 6]) -> (Engine, GameState) {
    let engine = Engine::standard().unwrap();
    let setup = GameSetup::new(
        PlayerSetup::new("Ada", &first),
        PlayerSetup::new("Bo", &second),
        17,
    )
    .with_first_player(P0);
    let state = engine.new_game(&setup).unwrap();
    (engine, state)
}

fn find(engine: &Engine, state: &GameState, owner: PlayerId, name: &str) -> InstanceId {
    let wanted = engine.catalog().id_of(name).unwrap();
    state
        .cards()
        .find(|c| c.owner() == owner && c.card_id() == wanted && c.zone() == Zone::Hand)
        .map(|c| c.id())
        .unwrap()
}

fn apply(engine: &Engine, state: &GameState, player: PlayerId, action: Action) -> GameState {
    engine
        .apply_action(state, player, &action)
        .unwrap_or_else(|e| panic!("{action:?} by {player} rejected: {e}"))
}

fn play(engine: &Engine, state: &GameState, player: PlayerId, name: &str) -> GameState {
    let card = find(engine, state, player, name);
    apply(
        engine,
        state,
        player,
        Action::PlayCard {
            card,
            targets: Default::default(),
            payment: tussle_engine::core::Payment::Cc,
        },
    )
}

fn end_turn(engine: &Engine, state: &GameState) -> GameState {
    apply(engine, state, state.active_player(), Action::EndTurn)
}

const TOYS: [&str; 6] = ["Knight", "Ka", "Umbruh", "Snuggles", "Gloom", "Wizard"];

/// The first player gets 2 CC on turn 1; every later turn grants 4.
#[test]
fn test_cc_grants_and_carry_over() {
    let (engine, state) = start(TOYS, TOYS);
    assert_eq!(state.turn(), 1);
    assert_eq!(state.phase(), Phase::Main);
    assert_eq!(state.player(P0).cc(), 2);
    assert_eq!(state.player(P1).cc(), 0);

    let state = end_turn(&engine, &state);
    assert_eq!(state.active_player(), P1);
    assert_eq!(state.player(P1).cc(), 4);
    assert_eq!(state.player(P0).cc(), 2, "unspent CC is kept");

    let state = end_turn(&engine, &state);
    assert_eq!(state.player(P0).cc(), 6);

    // 4 + 4 clamps at 7.
    let state = end_turn(&engine, &state);
    assert_eq!(state.player(P1).cc(), 7);

    // Holding 6, the grant only adds 1.
    let state = end_turn(&engine, &state);
    assert_eq!(state.player(P0).cc(), 7);
    let gained: Vec<u8> = state
        .events()
        .iter()
        .filter_map(|e| match e {
            GameEvent::CcGained { player, amount } if *player == P0 => Some(*amount),
            _ => None,
        })
        .collect();
    assert_eq!(gained, vec![2, 4, 1]);
}

/// Only the active player acts in Main; rejections change nothing.
#[test]
fn test_non_active_player_is_rejected() {
    let (engine, state) = start(TOYS, TOYS);
    let before = state.clone();

    let result = engine.apply_action(&state, P1, &Action::EndTurn);

    assert_eq!(result, Err(RejectReason::NotYourDecision(P1)));
    assert_eq!(state, before);
    assert!(engine.legal_actions(&state, P1).is_empty());
    assert!(engine.legal_actions(&state, P0).contains(&Action::EndTurn));
}

/// Spending CC on turn 1 carries the remainder into turn 3.
#[test]
fn test_spent_cc_reduces_banked_amount() {
    let (engine, state) = start(TOYS, TOYS);

    let state = play(&engine, &state, P0, "Knight");
    assert_eq!(state.player(P0).cc(), 1);

    let state = end_turn(&engine, &end_turn(&engine, &state));
    assert_eq!(state.turn(), 3);
    assert_eq!(state.player(P0).cc(), 5);
}

/// Raggy tussles for free, so it can direct attack twice a turn. Six
/// attacks empty the opponent's hand, and the win lands on the attack
/// that sleeps the last card, not at the end of the turn.
#[test]
fn test_win_by_direct_attacks() {
    let (engine, mut state) = start(
        ["Raggy", "Knight", "Ka", "Umbruh", "Gloom", "Wizard"],
        TOYS,
    );

    // Turn 1: 2 CC is not enough for Raggy.
    state = end_turn(&engine, &end_turn(&engine, &state));
    // Turn 3: 6 CC.
    state = play(&engine, &state, P0, "Raggy");
    let raggy = state.cards_in_zone(P0, Zone::InPlay)[0];
    let direct = Action::Tussle {
        attacker: raggy,
        defender: None,
    };

    let mut attacks = 0;
    while engine.is_terminal(&state).is_none() {
        if state.active_player() == P1 || state.player(P0).direct_attacks() == 2 {
            state = end_turn(&engine, &state);
            continue;
        }
        state = apply(&engine, &state, P0, direct.clone());
        attacks += 1;
    }

    assert_eq!(attacks, 6);
    let result = engine.is_terminal(&state).unwrap();
    assert_eq!(result.winner, P0);
    assert_eq!(state.active_player(), P0, "won during the attacking turn");
    assert!(state.cards_in_zone(P1, Zone::Hand).is_empty());
    assert_eq!(state.cards_in_zone(P1, Zone::Sleep).len(), 6);
    assert_eq!(
        engine.apply_action(&state, P0, &Action::EndTurn),
        Err(RejectReason::GameOver)
    );
    assert!(engine.legal_actions(&state, P0).is_empty());
}

/// The turn counter and phase advance through End into the next Start.
#[test]
fn test_turn_events_are_logged_in_order() {
    let (engine, state) = start(TOYS, TOYS);

    let state = end_turn(&engine, &state);

    let turns: Vec<(u32, PlayerId, bool)> = state
        .events()
        .iter()
        .filter_map(|e| match e {
            GameEvent::TurnStarted { turn, player } => Some((*turn, *player, true)),
            GameEvent::TurnEnded { turn, player } => Some((*turn, *player, false)),
            _ => None,
        })
        .collect();
    assert_eq!(turns, vec![(1, P0, true), (1, P0, false), (2, P1, true)]);
    assert_eq!(state.phase(), Phase::Main);
}

const GARDEN: &str = r#"[
  {"id": 1, "name": "Sprout", "kind": "toy", "cost": 0, "speed": 1, "strength": 1, "stamina": 2,
   "effects": ["start_of_turn:may:gain_cc:1"]},
  {"id": 2, "name": "Pebble", "kind": "toy", "cost": 0, "speed": 1, "strength": 1, "stamina": 2}
]"#;

/// An optional start-of-turn trigger keeps the game in Start until its
/// controller decides, and only then does Main begin.
#[test]
fn test_optional_start_trigger_holds_start_phase() {
    let engine = Engine::new(
        CardCatalog::from_json(GARDEN).unwrap(),
        RulesConfig::default().with_starting_hand_size(2),
    );
    let setup = GameSetup::new(
        PlayerSetup::new("Ada", &["Sprout", "Pebble"]),
        PlayerSetup::new("Bo", &["Pebble", "Pebble"]),
        5,
    )
    .with_first_player(P0);
    let state = engine.new_game(&setup).unwrap();
    let state = play(&engine, &state, P0, "Sprout");
    let state = end_turn(&engine, &state);
    let state = end_turn(&engine, &state);

    assert_eq!(state.turn(), 3);
    assert_eq!(state.phase(), Phase::Start);
    assert_eq!(state.pending_triggers().len(), 1);
    assert_eq!(engine.current_player(&state), Some(P0));
    assert_eq!(
        engine.apply_action(&state, P0, &Action::EndTurn),
        Err(RejectReason::DecisionPending)
    );

    let before = state.player(P0).cc();
    let accept = Action::ResolveTrigger {
        accept: true,
        targets: Default::default(),
    };
    let state = apply(&engine, &state, P0, accept);

    assert_eq!(state.phase(), Phase::Main);
    assert!(state.pending_triggers().is_empty());
    assert_eq!(state.player(P0).cc(), before + 1);
    let state = end_turn(&engine, &state);
    assert_eq!(state.active_player(), P1);
}
