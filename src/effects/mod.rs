//! Card abilities: definitions, parsing, queries and resolution.
//!
//! - `effect`: the closed set of effect definitions
//! - `token`: the effect-token grammar used by card data
//! - `continuous`: stat, cost and flag queries, recomputed on every call
//! - `targeting`: target legality, candidates and combinations
//! - `cost`: the card cost pipeline
//! - `resolver`: applying clauses and draining the trigger queue
//!
//! Queries take `&GameState` and never mutate. Resolution goes through the
//! rules context so that every change is logged and fires its triggers.

pub mod effect;
pub mod token;
pub mod continuous;
pub mod targeting;
pub mod cost;
pub(crate) mod resolver;

pub use effect::{
    ActivatedAbility, Clause, ContinuousEffect, Effect, EffectDef, Scope, TargetFilter,
    TargetSpec, TriggeredAbility,
};
pub use targeting::EffectSource;
pub use cost::play_cost;
