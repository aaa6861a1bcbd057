//! Tussles: combat between two Toys, or a direct attack.
//!
//! ## Flow
//!
//! 1. Declare: the tussle cost is paid and a direct attack is counted.
//!    Neither is refunded if the tussle is later cancelled.
//! 2. Interrupt window: opened only if the defender holds an interrupt card
//!    they can afford. The defender plays it or declines.
//! 3. Resolve: a direct attack sleeps a random card from the defender's
//!    hand; an auto-win sleeps the loser outright; otherwise strikes are
//!    exchanged by speed and the state-based check sleeps exhausted Toys.
//!
//! `predict_tussle_outcome` runs the same strike arithmetic without
//! touching the state.

mod predict;
pub(crate) mod resolver;

pub use predict::{predict_tussle_outcome, simulate_strikes, Combatant, Exchange, TussleOutcome};
