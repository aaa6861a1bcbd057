//! # tussle-engine
//!
//! A deterministic rules engine for a two-player tactical card game of Toys
//! and Actions.
//!
//! ## Design Principles
//!
//! 1. **Validate, then apply**: every action is checked by a pure function
//!    first. Accepted actions are applied to a copy of the state, so a
//!    rejection never leaves a half-applied state behind.
//!
//! 2. **One legality gate**: `legal_actions` is built from the same check
//!    `apply_action` uses, and serves human interfaces and automated
//!    planners identically.
//!
//! 3. **No hidden state**: continuous effects are recomputed from the cards
//!    in play on every query; the RNG and the event log live in the state.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: cheap state copies via `im-rs`.
//!
//! - **Closed effect set**: card abilities are parsed once from effect
//!   tokens into `EffectDef` variants and matched exhaustively.
//!
//! - **Owner vs controller**: ownership is fixed at setup; control moves
//!   with control-transfer effects and reverts on any zone change.
//!
//! ## Modules
//!
//! - `core`: instance ids, players, state, actions, RNG, configuration
//! - `zones`: hand, in play and sleep zone; card movement
//! - `cards`: card definitions, instances and the catalog
//! - `effects`: effect definitions, token parsing, continuous queries,
//!   targeting, costs and resolution
//! - `triggers`: the event log and triggered abilities
//! - `tussle`: combat declaration, resolution and prediction
//! - `rules`: the `RulesEngine` trait, validation, turns and setup
//! - `eval`: scoring of proposed action sequences
//! - `codec`: JSON and binary encodings of the state

pub mod core;
pub mod zones;
pub mod cards;
pub mod effects;
pub mod triggers;
pub mod tussle;
pub mod rules;
pub mod eval;
pub mod codec;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, GameRng, GameRngState, GameState, InstanceId, Payment, PendingTussle,
    Phase, Player, PlayerId, PlayerMap, RulesConfig, Targets,
};

pub use crate::zones::{Zone, ZoneMove};

pub use crate::cards::{
    AltPayment, CardCatalog, CardDefinition, CardId, CardInstance, CardKind, CostPolicy,
    Modification, Stat, Stats, VariableCost,
};

pub use crate::effects::{
    ActivatedAbility, Clause, ContinuousEffect, Effect, EffectDef, EffectSource, Scope,
    TargetFilter, TargetSpec, TriggeredAbility,
};

pub use crate::triggers::{GameEvent, PendingTrigger, TriggerCondition};

pub use crate::tussle::{predict_tussle_outcome, TussleOutcome};

pub use crate::rules::{Engine, GameResult, GameSetup, PlayerSetup, RulesEngine};

pub use crate::eval::{evaluate_sequence, EvaluationSummary, SequenceReport};

pub use crate::error::{CatalogError, CodecError, ConfigError, RejectReason, SetupError};
