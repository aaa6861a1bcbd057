//! Game state.
//!
//! `GameState` is a passive container: players, card instances, turn
//! counters, pending decisions, the RNG and the event log. It exposes read
//! accessors only. Every mutation lives in `zones` and `rules`, so rule logic
//! stays in one place and the state can be inspected freely by callers.
//!
//! Card instances and logs use `im` persistent structures, so the clone
//! taken by validate-then-apply is cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::entity::InstanceId;
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::CardInstance;
use crate::triggers::{GameEvent, PendingTrigger};
use crate::zones::Zone;

/// Turn phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Start,
    Main,
    End,
}

/// Priority tracking within the main phase.
///
/// The active player holds priority by default. The turn ends only when both
/// players pass consecutively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    pub holder: PlayerId,
    pub consecutive_passes: u8,
}

impl Priority {
    #[must_use]
    pub fn new(holder: PlayerId) -> Self {
        Self {
            holder,
            consecutive_passes: 0,
        }
    }

    /// Record a pass by the holder and hand priority to the other player.
    /// Returns true once both players have passed in a row.
    pub fn pass(&mut self) -> bool {
        self.consecutive_passes += 1;
        self.holder = self.holder.opponent();
        self.consecutive_passes >= 2
    }

    /// Give priority to `player` after an action resolved.
    pub fn reset(&mut self, player: PlayerId) {
        self.holder = player;
        self.consecutive_passes = 0;
    }
}

/// A declared tussle waiting on the defender's interrupt decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTussle {
    pub attacker: InstanceId,
    pub defender: Option<InstanceId>,
    pub attacking_player: PlayerId,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) players: PlayerMap<Player>,
    /// Indexed by `InstanceId`; ids are allocated densely from zero.
    pub(crate) cards: Vector<CardInstance>,
    pub(crate) turn: u32,
    pub(crate) active_player: PlayerId,
    pub(crate) first_player: PlayerId,
    pub(crate) phase: Phase,
    pub(crate) winner: Option<PlayerId>,
    pub(crate) interrupt_window: Option<PendingTussle>,
    pub(crate) pending_triggers: Vector<PendingTrigger>,
    pub(crate) priority: Priority,
    pub(crate) rng: GameRng,
    pub(crate) events: Vector<GameEvent>,
    pub(crate) history: Vector<ActionRecord>,
}

impl GameState {
    /// Empty state before any card is created. Used by game setup.
    pub(crate) fn new(names: [String; 2], first_player: PlayerId, rng: GameRng) -> Self {
        let [first_name, second_name] = names;
        Self {
            players: PlayerMap::new(|p| {
                let name = if p.index() == 0 { &first_name } else { &second_name };
                Player::new(p, name.clone())
            }),
            cards: Vector::new(),
            turn: 1,
            active_player: first_player,
            first_player,
            phase: Phase::Start,
            winner: None,
            interrupt_window: None,
            pending_triggers: Vector::new(),
            priority: Priority::new(first_player),
            rng,
            events: Vector::new(),
            history: Vector::new(),
        }
    }

    // === Players ===

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active_player
    }

    /// Player whose turn it is not.
    #[must_use]
    pub fn other_player(&self) -> PlayerId {
        self.active_player.opponent()
    }

    /// Player who took the game's first turn.
    #[must_use]
    pub fn first_player(&self) -> PlayerId {
        self.first_player
    }

    // === Cards ===

    /// Find a card instance by id.
    #[must_use]
    pub fn card(&self, id: InstanceId) -> Option<&CardInstance> {
        self.cards.get(id.raw() as usize)
    }

    /// All card instances in id order.
    pub fn cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.iter()
    }

    /// Cards in one of a player's zones. Hand and sleep zone list cards the
    /// player owns; in play lists cards the player controls.
    #[must_use]
    pub fn cards_in_zone(&self, player: PlayerId, zone: Zone) -> &[InstanceId] {
        self.players[player].zone(zone)
    }

    /// Every card in play, both sides, first player's side first.
    pub fn in_play(&self) -> impl Iterator<Item = InstanceId> + '_ {
        PlayerId::all().flat_map(move |p| self.players[p].in_play().iter().copied())
    }

    // === Progression ===

    /// Turn number, starting at 1.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    /// The tussle awaiting an interrupt decision, if the window is open.
    #[must_use]
    pub fn interrupt_window(&self) -> Option<&PendingTussle> {
        self.interrupt_window.as_ref()
    }

    /// Triggers waiting for resolution, front first.
    #[must_use]
    pub fn pending_triggers(&self) -> &Vector<PendingTrigger> {
        &self.pending_triggers
    }

    /// The player who must act next, or `None` once the game is over.
    ///
    /// An optional trigger's controller decides first, then the defender of
    /// an open interrupt window, then the priority holder.
    #[must_use]
    pub fn decision_player(&self) -> Option<PlayerId> {
        if self.winner.is_some() {
            return None;
        }
        if let Some(trigger) = self.pending_triggers.front() {
            return Some(trigger.controller);
        }
        if let Some(window) = &self.interrupt_window {
            return Some(window.attacking_player.opponent());
        }
        Some(self.priority.holder)
    }

    // === Logs ===

    /// Everything observable that happened, in order.
    #[must_use]
    pub fn events(&self) -> &Vector<GameEvent> {
        &self.events
    }

    /// Every applied action, in order.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Read-only view of the RNG position, for replay checks.
    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }
}
