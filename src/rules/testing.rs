//! Test fixtures: a hand-built table with named cards.

use super::context::RulesContext;
use crate::cards::{CardCatalog, CardInstance};
use crate::core::{GameRng, GameState, InstanceId, Phase, PlayerId, RulesConfig};
use crate::zones::Zone;

/// A game in player 0's main phase on turn 1, with no CC and the given
/// cards in each hand. Ids are allocated in order, player 0 first.
pub(crate) struct Table {
    pub catalog: CardCatalog,
    pub config: RulesConfig,
    pub state: GameState,
}

impl Table {
    pub fn new(first: &[&str], second: &[&str]) -> Self {
        let catalog = CardCatalog::standard().unwrap();
        let mut state = GameState::new(
            ["Ada".to_string(), "Bo".to_string()],
            PlayerId::new(0),
            GameRng::new(7),
        );
        let mut next = 0;
        for (owner, names) in [(0u8, first), (1u8, second)] {
            for name in names {
                let card = catalog
                    .id_of(name)
                    .unwrap_or_else(|| panic!("no card named {name}"));
                state.add_card(CardInstance::new(InstanceId(next), card, PlayerId::new(owner)));
                next += 1;
            }
        }
        state.phase = Phase::Main;
        Self {
            catalog,
            config: RulesConfig::default(),
            state,
        }
    }

    /// First card named `name` owned by player `owner`.
    pub fn card(&self, owner: usize, name: &str) -> InstanceId {
        let wanted = self.catalog.id_of(name).unwrap();
        self.state
            .cards()
            .find(|c| c.owner().index() == owner && c.card_id() == wanted)
            .map(CardInstance::id)
            .unwrap_or_else(|| panic!("player {owner} owns no {name}"))
    }

    pub fn set_cc(&mut self, owner: usize, cc: u8) {
        self.state.players[PlayerId::new(owner as u8)].cc = cc;
    }

    pub fn with_context<R>(&mut self, f: impl FnOnce(&mut RulesContext<'_>) -> R) -> R {
        let mut ctx = RulesContext::new(&self.catalog, &self.config, &mut self.state);
        f(&mut ctx)
    }
}

/// Put named cards from hand into play, each under its owner's control.
pub(crate) fn place(table: &mut Table, cards: &[(usize, &str)]) {
    for (owner, name) in cards {
        let wanted = table.catalog.id_of(name).unwrap();
        let id = table
            .state
            .cards()
            .find(|c| c.owner().index() == *owner && c.card_id() == wanted && c.zone() == Zone::Hand)
            .map(CardInstance::id)
            .unwrap_or_else(|| panic!("player {owner} holds no {name}"));
        table.state.move_card(id, Zone::InPlay);
    }
}
