//! Rules engine trait and the standard engine.
//!
//! `RulesEngine` is the interface every caller uses: human-facing layers,
//! automated planners and the sequence evaluator. It is a pure interface
//! over `GameState`:
//! - `legal_actions` never mutates
//! - `apply_action` validates, then applies to a copy, and returns the copy;
//!   a rejected action leaves the input untouched
//! - `is_terminal` reports the winner once there is one
//!
//! `Engine` implements it with a card catalog and a rules configuration.

use log::{debug, warn};

use super::apply::perform;
use super::context::RulesContext;
use super::setup::{build, GameSetup};
use super::state_based::assert_invariants;
use super::validator;
use crate::cards::CardCatalog;
use crate::core::{Action, ActionRecord, GameState, InstanceId, PlayerId, RulesConfig};
use crate::error::{CatalogError, RejectReason, SetupError};
use crate::tussle::{predict_tussle_outcome, TussleOutcome};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub winner: PlayerId,
    /// Turn on which the game ended.
    pub turn: u32,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: empty when `player` holds no decision
/// - `apply_action`: deterministic; same state and action give the same
///   result, including the random direct-attack pick
/// - `is_terminal`: `None` while the game continues
pub trait RulesEngine {
    fn config(&self) -> &RulesConfig;

    fn catalog(&self) -> &CardCatalog;

    /// Every action `player` may legally take right now.
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action>;

    /// Validate and apply an action, returning the resulting state.
    fn apply_action(
        &self,
        state: &GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<GameState, RejectReason>;

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.winner().map(|winner| GameResult {
            winner,
            turn: state.turn(),
        })
    }

    // === Convenience Methods ===

    /// The player who must decide next, if the game is still running.
    fn current_player(&self, state: &GameState) -> Option<PlayerId> {
        state.decision_player()
    }
}

/// The standard rules engine.
///
/// ```
/// use tussle_engine::rules::{Engine, GameSetup, PlayerSetup, RulesEngine};
/// use tussle_engine::core::{Action, PlayerId};
///
/// let engine = Engine::standard().unwrap();
/// let deck = ["Knight", "Ka", "Umbruh", "Rush", "Clean", "Beary"];
/// let setup = GameSetup::new(PlayerSetup::new("Ada", &deck), PlayerSetup::new("Bo", &deck), 42)
///     .with_first_player(PlayerId::new(0));
/// let state = engine.new_game(&setup).unwrap();
///
/// let next = engine.apply_action(&state, PlayerId::new(0), &Action::EndTurn).unwrap();
/// assert_eq!(next.active_player(), PlayerId::new(1));
/// assert_eq!(next.player(PlayerId::new(1)).cc(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct Engine {
    catalog: CardCatalog,
    config: RulesConfig,
}

impl Engine {
    #[must_use]
    pub fn new(catalog: CardCatalog, config: RulesConfig) -> Self {
        Self { catalog, config }
    }

    /// Engine with the built-in card set and default rules.
    pub fn standard() -> Result<Self, CatalogError> {
        Ok(Self::new(CardCatalog::standard()?, RulesConfig::default()))
    }

    /// Create a game and run its first Start phase.
    pub fn new_game(&self, setup: &GameSetup) -> Result<GameState, SetupError> {
        build(&self.catalog, &self.config, setup)
    }

    /// Validate without applying. Returns the CC the action would cost.
    pub fn check(
        &self,
        state: &GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<u8, RejectReason> {
        validator::check(&self.catalog, &self.config, state, player, action)
    }

    /// Predict a Toy-vs-Toy tussle from the current state.
    pub fn predict_tussle_outcome(
        &self,
        state: &GameState,
        attacker: InstanceId,
        defender: InstanceId,
    ) -> Result<TussleOutcome, RejectReason> {
        predict_tussle_outcome(state, &self.catalog, &self.config, attacker, defender)
    }
}

impl RulesEngine for Engine {
    fn config(&self) -> &RulesConfig {
        &self.config
    }

    fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        validator::legal_actions(&self.catalog, &self.config, state, player)
    }

    fn apply_action(
        &self,
        state: &GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<GameState, RejectReason> {
        let cost = match self.check(state, player, action) {
            Ok(cost) => cost,
            Err(reason) => {
                warn!("rejected {action:?} from {player}: {reason}");
                return Err(reason);
            }
        };

        let mut next = state.clone();
        let sequence = u32::try_from(next.history.len()).unwrap_or(u32::MAX);
        next.history
            .push_back(ActionRecord::new(player, action.clone(), state.turn(), sequence));
        let mut ctx = RulesContext::new(&self.catalog, &self.config, &mut next);
        perform(&mut ctx, player, action, cost);

        assert_invariants(&next, &self.config);
        debug!("applied {action:?} from {player}");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Payment, Targets};
    use crate::rules::setup::PlayerSetup;

    fn game() -> (Engine, GameState) {
        let engine = Engine::standard().unwrap();
        let deck = ["Knight", "Ka", "Umbruh", "Rush", "Clean", "Beary"];
        let setup = GameSetup::new(PlayerSetup::new("Ada", &deck), PlayerSetup::new("Bo", &deck), 9)
            .with_first_player(PlayerId::new(0));
        let state = engine.new_game(&setup).unwrap();
        (engine, state)
    }

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult {
            winner: PlayerId::new(1),
            turn: 4,
        };
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));
    }

    #[test]
    fn test_rejection_leaves_state_untouched() {
        let (engine, state) = game();
        let clean = state.cards_in_zone(PlayerId::new(0), crate::zones::Zone::Hand)[4];
        let action = Action::PlayCard {
            card: clean,
            targets: Targets::new(),
            payment: Payment::Cc,
        };

        let before = state.clone();
        let result = engine.apply_action(&state, PlayerId::new(0), &action);

        assert!(matches!(result, Err(RejectReason::InsufficientCc { .. })));
        assert_eq!(state, before);
    }

    #[test]
    fn test_apply_records_history() {
        let (engine, state) = game();

        let next = engine
            .apply_action(&state, PlayerId::new(0), &Action::EndTurn)
            .unwrap();

        assert_eq!(next.history().len(), 1);
        assert_eq!(next.history()[0].turn, 1);
        assert!(state.history().is_empty());
        assert!(engine.is_terminal(&next).is_none());
        assert_eq!(engine.current_player(&next), Some(PlayerId::new(1)));
    }
}
