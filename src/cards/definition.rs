//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: kind, cost
//! policy, printed stats and parsed effects. Instance data (zone, damage,
//! modifications, controller) lives in `CardInstance`.

use serde::{Deserialize, Serialize};

use crate::effects::{ActivatedAbility, Clause, ContinuousEffect, EffectDef, TriggeredAbility};

/// Unique identifier for a card definition.
///
/// This identifies the kind of card (e.g., "Knight"), not a specific copy
/// in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    /// Persistent, combat-capable.
    Toy,
    /// One-shot effect, slept after resolving.
    Action,
}

/// A Toy statistic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Speed,
    Strength,
    Stamina,
}

/// Printed Toy stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stats {
    pub speed: i32,
    pub strength: i32,
    pub stamina: i32,
}

impl Stats {
    #[must_use]
    pub const fn new(speed: i32, strength: i32, stamina: i32) -> Self {
        Self {
            speed,
            strength,
            stamina,
        }
    }

    #[must_use]
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Speed => self.speed,
            Stat::Strength => self.strength,
            Stat::Stamina => self.stamina,
        }
    }
}

/// Cost computed at play time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableCost {
    /// `base` minus the number of cards in the player's sleep zone.
    SleepDiscount { base: u8 },
    /// The printed cost of the card this one copies.
    CopyTarget,
}

/// How a card's cost is determined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostPolicy {
    Fixed(u8),
    Variable(VariableCost),
}

/// Alternative to paying a card's cost in CC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AltPayment {
    /// Sleep one of your own Toys in play.
    SleepOwnToy,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use tussle_engine::cards::{CardDefinition, CardId, CardKind, CostPolicy, Stats};
///
/// let knight = CardDefinition::new(CardId::new(2), "Knight", CardKind::Toy)
///     .with_cost(CostPolicy::Fixed(1))
///     .with_stats(Stats::new(4, 4, 3));
///
/// assert_eq!(knight.printed_cost(), 1);
/// assert!(knight.is_toy());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Display name. Unique within a catalog.
    pub name: String,

    pub kind: CardKind,

    pub cost: CostPolicy,

    /// Printed stats, present for Toys only.
    pub stats: Option<Stats>,

    /// Effect tokens as written in the catalog, in order.
    pub tokens: Vec<String>,

    /// Parsed effects, in token order.
    pub effects: Vec<EffectDef>,

    /// Interrupt-class: playable by the defender to cancel a tussle.
    pub interrupt: bool,

    pub alternative: Option<AltPayment>,
}

impl CardDefinition {
    /// Create a new card definition with zero cost and no effects.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            cost: CostPolicy::Fixed(0),
            stats: None,
            tokens: Vec::new(),
            effects: Vec::new(),
            interrupt: false,
            alternative: None,
        }
    }

    /// Builder: set the cost policy.
    #[must_use]
    pub fn with_cost(mut self, cost: CostPolicy) -> Self {
        self.cost = cost;
        self
    }

    /// Builder: set printed stats.
    #[must_use]
    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Builder: append a parsed effect.
    #[must_use]
    pub fn with_effect(mut self, effect: EffectDef) -> Self {
        self.effects.push(effect);
        self
    }

    /// Builder: mark as interrupt-class.
    #[must_use]
    pub fn with_interrupt(mut self) -> Self {
        self.interrupt = true;
        self
    }

    /// Builder: offer an alternative payment.
    #[must_use]
    pub fn with_alternative(mut self, alt: AltPayment) -> Self {
        self.alternative = Some(alt);
        self
    }

    #[must_use]
    pub fn is_toy(&self) -> bool {
        self.kind == CardKind::Toy
    }

    /// Cost as printed on the card. Variable costs print their base; a
    /// copy card prints zero.
    #[must_use]
    pub fn printed_cost(&self) -> u8 {
        match self.cost {
            CostPolicy::Fixed(n) => n,
            CostPolicy::Variable(VariableCost::SleepDiscount { base }) => base,
            CostPolicy::Variable(VariableCost::CopyTarget) => 0,
        }
    }

    /// Printed stat value; zero for Actions.
    #[must_use]
    pub fn base_stat(&self, stat: Stat) -> i32 {
        self.stats.map_or(0, |s| s.get(stat))
    }

    pub fn continuous(&self) -> impl Iterator<Item = &ContinuousEffect> {
        self.effects.iter().filter_map(|e| match e {
            EffectDef::Continuous(c) => Some(c),
            _ => None,
        })
    }

    /// Triggered abilities with their index into `effects`.
    pub fn triggered(&self) -> impl Iterator<Item = (usize, &TriggeredAbility)> {
        self.effects.iter().enumerate().filter_map(|(i, e)| match e {
            EffectDef::Triggered(t) => Some((i, t)),
            _ => None,
        })
    }

    /// The `index`-th activated ability.
    #[must_use]
    pub fn activated(&self, index: u8) -> Option<&ActivatedAbility> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                EffectDef::Activated(a) => Some(a),
                _ => None,
            })
            .nth(index as usize)
    }

    #[must_use]
    pub fn activated_count(&self) -> usize {
        self.effects
            .iter()
            .filter(|e| matches!(e, EffectDef::Activated(_)))
            .count()
    }

    pub fn play_clauses(&self) -> impl Iterator<Item = &Clause> {
        self.effects.iter().filter_map(|e| match e {
            EffectDef::Play(c) => Some(c),
            _ => None,
        })
    }

    /// The play clause whose targets are declared when the card is played.
    #[must_use]
    pub fn targeted_play_clause(&self) -> Option<&Clause> {
        self.play_clauses().find(|c| c.target.is_some())
    }
}
