//! Game setup.
//!
//! Each player brings `starting_hand_size` cards by name. Every card
//! becomes one instance in its owner's hand; instance ids are allocated
//! in order, seat 0's cards first. Turn 1 Start then runs.

use serde::{Deserialize, Serialize};

use super::context::RulesContext;
use super::turn::begin_turn;
use crate::cards::{CardCatalog, CardInstance};
use crate::core::{GameRng, GameState, InstanceId, PlayerId, RulesConfig, PLAYER_COUNT};
use crate::error::SetupError;

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub name: String,
    pub cards: Vec<String>,
}

impl PlayerSetup {
    #[must_use]
    pub fn new(name: impl Into<String>, cards: &[&str]) -> Self {
        Self {
            name: name.into(),
            cards: cards.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

/// Everything needed to start a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSetup {
    pub players: [PlayerSetup; PLAYER_COUNT],
    pub seed: u64,
    /// Who takes turn 1. Drawn from the game RNG when unset.
    pub first_player: Option<PlayerId>,
}

impl GameSetup {
    #[must_use]
    pub fn new(first: PlayerSetup, second: PlayerSetup, seed: u64) -> Self {
        Self {
            players: [first, second],
            seed,
            first_player: None,
        }
    }

    /// Builder: fix the starting player.
    #[must_use]
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        self.first_player = Some(player);
        self
    }
}

/// Build the initial state and run turn 1 Start.
pub(crate) fn build(
    catalog: &CardCatalog,
    config: &RulesConfig,
    setup: &GameSetup,
) -> Result<GameState, SetupError> {
    let mut decks = Vec::with_capacity(PLAYER_COUNT);
    for (player, seat) in PlayerId::all().zip(&setup.players) {
        if seat.cards.len() != config.starting_hand_size {
            return Err(SetupError::WrongDeckSize {
                player,
                expected: config.starting_hand_size,
                found: seat.cards.len(),
            });
        }
        let ids = seat
            .cards
            .iter()
            .map(|name| {
                catalog
                    .id_of(name)
                    .ok_or_else(|| SetupError::UnknownCard(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        decks.push((player, ids));
    }

    let mut rng = GameRng::new(setup.seed);
    let first = match setup.first_player {
        Some(player) => player,
        None => {
            let pick = rng.gen_index(PLAYER_COUNT);
            PlayerId::all().nth(pick).unwrap_or(PlayerId::new(0))
        }
    };
    let names = [setup.players[0].name.clone(), setup.players[1].name.clone()];
    let mut state = GameState::new(names, first, rng);

    let mut next = 0u32;
    for (owner, ids) in decks {
        for card in ids {
            state.add_card(CardInstance::new(InstanceId(next), card, owner));
            next += 1;
        }
    }

    let mut ctx = RulesContext::new(catalog, config, &mut state);
    begin_turn(&mut ctx);
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Phase;
    use crate::zones::Zone;

    const DECK: [&str; 6] = ["Knight", "Ka", "Umbruh", "Rush", "Clean", "Beary"];

    fn setup(seed: u64) -> GameSetup {
        GameSetup::new(PlayerSetup::new("Ada", &DECK), PlayerSetup::new("Bo", &DECK), seed)
    }

    #[test]
    fn test_build_deals_hands_and_starts_turn_one() {
        let catalog = CardCatalog::standard().unwrap();
        let config = RulesConfig::default();
        let state = build(&catalog, &config, &setup(3).with_first_player(PlayerId::new(1))).unwrap();

        assert_eq!(state.turn(), 1);
        assert_eq!(state.phase(), Phase::Main);
        assert_eq!(state.active_player(), PlayerId::new(1));
        assert_eq!(state.player(PlayerId::new(1)).cc(), 2);
        assert_eq!(state.player(PlayerId::new(0)).cc(), 0);
        for player in PlayerId::all() {
            assert_eq!(state.cards_in_zone(player, Zone::Hand).len(), 6);
        }
        assert_eq!(state.card(InstanceId(6)).unwrap().owner(), PlayerId::new(1));
    }

    #[test]
    fn test_first_player_from_seed_is_deterministic() {
        let catalog = CardCatalog::standard().unwrap();
        let config = RulesConfig::default();
        let a = build(&catalog, &config, &setup(11)).unwrap();
        let b = build(&catalog, &config, &setup(11)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_bad_decks() {
        let catalog = CardCatalog::standard().unwrap();
        let config = RulesConfig::default();

        let mut short = setup(1);
        short.players[1].cards.pop();
        assert_eq!(
            build(&catalog, &config, &short),
            Err(SetupError::WrongDeckSize {
                player: PlayerId::new(1),
                expected: 6,
                found: 5
            })
        );

        let mut unknown = setup(1);
        unknown.players[0].cards[0] = "Nobody".to_string();
        assert_eq!(
            build(&catalog, &config, &unknown),
            Err(SetupError::UnknownCard("Nobody".to_string()))
        );
    }
}
