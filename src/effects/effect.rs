//! Effect definitions.
//!
//! Every parsed effect token becomes one `EffectDef`, a closed set of four
//! categories with their own payloads:
//!
//! - `Continuous`: applies while the source is in play, recomputed on demand
//! - `Triggered`: resolves when its condition fires
//! - `Activated`: costed, used by the controller during their turn
//! - `Play`: resolves once when the card is played
//!
//! The last three carry a `Clause`: one atomic `Effect` plus an optional
//! target specification.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Stat;
use crate::triggers::TriggerCondition;

/// Which Toys a continuous effect covers, relative to its source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// The source card only.
    Itself,
    /// Every Toy the source's controller controls, the source included.
    Own,
    /// Every Toy the source controller's opponent controls.
    Opponent,
}

/// An effect that holds while its source is in play.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContinuousEffect {
    /// Add `amount` to a stat. Stacks additively across sources.
    StatBuff { stat: Stat, amount: i32, scope: Scope },

    /// Tussles by covered Toys cost `cost`. Only the lowest applicable
    /// value counts.
    TussleCost { cost: u8, scope: Scope },

    /// Cards played by the covered player cost `delta` more (or less).
    CostModifier { delta: i32, scope: Scope },

    /// Ignore effects from cards the opponent controls, except sources
    /// named here.
    Protection { exceptions: SmallVec<[String; 2]> },

    /// Wins every tussle it takes part in on its controller's turn.
    AutoWinOnOwnTurn,

    /// Not subject to auto-win from the named card.
    AutoWinImmunity { source: String },

    /// This Toy cannot declare tussles.
    NoTussle,
}

/// An atomic one-shot effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// Source's controller gains CC (clamped at the cap).
    GainCc(u8),
    /// Move target Toys to their owners' sleep zones.
    SleepTarget,
    /// Move target Toys to their owners' hands.
    ReturnTarget,
    /// Move every Toy in play to its owner's hand.
    ReturnAll,
    /// Move every Toy in play to its owner's sleep zone.
    SleepAll,
    /// Source's controller takes control of target Toys.
    TakeControl,
    /// Target Toys get `amount` to `stat` until end of turn.
    BuffTarget { stat: Stat, amount: i32 },
    /// Target Toys lose stamina.
    DamageTarget(i32),
    /// Move target cards from the sleep zone back to hand.
    WakeTarget,
    /// The source becomes a copy of the target while in play.
    CopyTarget,
    /// Cancel the tussle waiting on an interrupt decision.
    CancelTussle,
}

impl Effect {
    /// Whether the effect needs declared targets.
    #[must_use]
    pub fn is_targeted(&self) -> bool {
        matches!(
            self,
            Effect::SleepTarget
                | Effect::ReturnTarget
                | Effect::TakeControl
                | Effect::BuffTarget { .. }
                | Effect::DamageTarget(_)
                | Effect::WakeTarget
                | Effect::CopyTarget
        )
    }
}

/// Which cards a targeted clause may choose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetFilter {
    /// A Toy in play controlled by the source controller's opponent.
    OpponentToy,
    /// Another Toy in play controlled by the source's controller.
    OwnToy,
    /// Any other Toy in play.
    AnyToy,
    /// A card in the source controller's sleep zone.
    OwnSleep,
}

/// Target requirement: between one and `count` distinct cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetSpec {
    pub filter: TargetFilter,
    pub count: u8,
}

impl TargetSpec {
    #[must_use]
    pub const fn new(filter: TargetFilter, count: u8) -> Self {
        Self { filter, count }
    }
}

/// One effect with its optional targeting.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clause {
    pub effect: Effect,
    pub target: Option<TargetSpec>,
}

impl Clause {
    #[must_use]
    pub fn untargeted(effect: Effect) -> Self {
        Self {
            effect,
            target: None,
        }
    }

    #[must_use]
    pub fn targeted(effect: Effect, target: TargetSpec) -> Self {
        Self {
            effect,
            target: Some(target),
        }
    }
}

/// A triggered ability.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggeredAbility {
    pub condition: TriggerCondition,
    /// "May" abilities wait for the controller's decision; "must" abilities
    /// resolve automatically.
    pub optional: bool,
    pub clause: Clause,
}

/// An activated ability.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivatedAbility {
    /// CC per activation.
    pub cost: u8,
    pub clause: Clause,
}

/// A parsed effect in one of the four categories.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectDef {
    Continuous(ContinuousEffect),
    Triggered(TriggeredAbility),
    Activated(ActivatedAbility),
    Play(Clause),
}
