//! The rules: validation, application, turn structure and state-based
//! actions.
//!
//! - `engine`: the `RulesEngine` trait and the standard `Engine`
//! - `validator`: the pure legality gate and legal-action enumeration
//! - `setup`: game creation
//!
//! Mutation goes through a `RulesContext` and only ever touches a copy of
//! the caller's state, which is returned on success.

pub mod engine;
pub mod validator;
pub mod setup;
pub mod state_based;
pub(crate) mod context;
mod apply;
mod turn;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::{Engine, GameResult, RulesEngine};
pub use setup::{GameSetup, PlayerSetup};
pub use state_based::has_lost;
