//! Sequence scoring.

use serde::{Deserialize, Serialize};

use crate::core::{Action, GameState, PlayerId};
use crate::error::RejectReason;
use crate::rules::RulesEngine;
use crate::triggers::GameEvent;
use crate::zones::Zone;

const WIN_SCORE: i32 = 1000;
const SLEPT_WEIGHT: i32 = 10;

/// What happened when a proposed sequence was replayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceReport {
    /// Actions applied before the first rejection (or all of them).
    pub applied: usize,
    /// Index and reason of the first rejected action.
    pub rejection: Option<(usize, RejectReason)>,
    /// CC the evaluating player spent.
    pub cc_spent: u32,
    /// Cards of the evaluating player sent to sleep from play or hand.
    pub own_slept: u32,
    pub opponent_slept: u32,
    pub winner: Option<PlayerId>,
    /// Higher is better for the evaluating player.
    pub score: i32,
    pub final_state: GameState,
}

impl SequenceReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rejection.is_none()
    }
}

/// Replay `actions` for `player` on a copy of `state`, stopping at the
/// first rejection. The input state is never modified.
///
/// Cards played as Actions going to the sleep zone are not counted as
/// slept; only Toys leaving play and cards taken by direct attacks are.
pub fn evaluate_sequence<E: RulesEngine + ?Sized>(
    engine: &E,
    state: &GameState,
    player: PlayerId,
    actions: &[Action],
) -> SequenceReport {
    let start = state.events().len();
    let mut current = state.clone();
    let mut applied = 0;
    let mut rejection = None;

    for (index, action) in actions.iter().enumerate() {
        match engine.apply_action(&current, player, action) {
            Ok(next) => {
                current = next;
                applied += 1;
            }
            Err(reason) => {
                rejection = Some((index, reason));
                break;
            }
        }
    }

    let mut cc_spent = 0u32;
    let mut own_slept = 0u32;
    let mut opponent_slept = 0u32;
    for event in current.events().iter().skip(start) {
        let slept_owner = match event {
            GameEvent::CcSpent { player: spender, amount } if *spender == player => {
                cc_spent += u32::from(*amount);
                None
            }
            GameEvent::ZoneChanged {
                owner,
                from: Zone::InPlay,
                to: Zone::Sleep,
                ..
            } => Some(*owner),
            GameEvent::Revealed { owner, .. } => Some(*owner),
            _ => None,
        };
        match slept_owner {
            Some(owner) if owner == player => own_slept += 1,
            Some(_) => opponent_slept += 1,
            None => {}
        }
    }

    let winner = current.winner();
    let outcome = match winner {
        Some(w) if w == player => WIN_SCORE,
        Some(_) => -WIN_SCORE,
        None => 0,
    };
    let slept_balance = i32::try_from(opponent_slept).unwrap_or(i32::MAX)
        - i32::try_from(own_slept).unwrap_or(i32::MAX);
    let score = outcome + SLEPT_WEIGHT * slept_balance
        + i32::from(current.player(player).cc())
        - i32::try_from(cc_spent).unwrap_or(i32::MAX) / 2;

    SequenceReport {
        applied,
        rejection,
        cc_spent,
        own_slept,
        opponent_slept,
        winner,
        score,
        final_state: current,
    }
}

/// Running totals over many evaluated sequences, kept by the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub evaluated: u32,
    pub rejected: u32,
    pub wins: u32,
    pub total_score: i64,
    pub best_score: Option<i32>,
}

impl EvaluationSummary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one report into the totals. `player` is the evaluating player.
    pub fn record(&mut self, report: &SequenceReport, player: PlayerId) {
        self.evaluated += 1;
        if report.rejection.is_some() {
            self.rejected += 1;
        }
        if report.winner == Some(player) {
            self.wins += 1;
        }
        self.total_score += i64::from(report.score);
        self.best_score = Some(self.best_score.map_or(report.score, |b| b.max(report.score)));
    }

    #[must_use]
    pub fn mean_score(&self) -> Option<f64> {
        if self.evaluated == 0 {
            return None;
        }
        Some(self.total_score as f64 / f64::from(self.evaluated))
    }
}
