//! Event log and triggered abilities.
//!
//! ## Key Types
//!
//! - `GameEvent`: one entry in the state's event log
//! - `TriggerCondition`: when a triggered ability fires
//! - `PendingTrigger`: a fired ability waiting in the state's queue
//!
//! Mandatory triggers resolve as soon as they reach the front of the queue.
//! Optional ones stop the queue until their controller decides.

pub mod event;
pub mod condition;

pub use event::GameEvent;
pub use condition::{
    collect_on_play_other, collect_start_of_turn, collect_when_slept, PendingTrigger,
    TriggerCondition,
};
