//! Card catalog for definition lookup.
//!
//! The `CardCatalog` stores every card definition available to a game. It is
//! built once, before any game starts, and is read-only afterwards. Lookup
//! is by `CardId`; names are indexed separately for deck building.
//!
//! ## JSON records
//!
//! ```json
//! [
//!   {"id": 1, "name": "Ka", "kind": "toy", "cost": 2,
//!    "speed": 4, "strength": 3, "stamina": 3,
//!    "effects": ["stat:strength:+2:own"]},
//!   {"id": 14, "name": "Dream", "kind": "toy", "cost": "variable:sleep_discount:4",
//!    "speed": 4, "strength": 5, "stamina": 4}
//! ]
//! ```

use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::definition::{
    AltPayment, CardDefinition, CardId, CardKind, CostPolicy, Stats, VariableCost,
};
use crate::effects::token::{parse_token, ParsedToken};
use crate::error::CatalogError;

const STANDARD_SET: &str = include_str!("standard.json");

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use tussle_engine::cards::{CardCatalog, CardDefinition, CardId, CardKind, CostPolicy, Stats};
///
/// let mut catalog = CardCatalog::new();
/// catalog
///     .register(
///         CardDefinition::new(CardId::new(1), "Knight", CardKind::Toy)
///             .with_cost(CostPolicy::Fixed(1))
///             .with_stats(Stats::new(4, 4, 3)),
///     )
///     .unwrap();
///
/// let found = catalog.by_name("Knight").unwrap();
/// assert_eq!(found.id, CardId::new(1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, CardDefinition>,
    names: FxHashMap<String, CardId>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CostField {
    Fixed(u8),
    Policy(String),
}

#[derive(Deserialize)]
struct CardRecord {
    id: u32,
    name: String,
    kind: CardKind,
    cost: CostField,
    speed: Option<i32>,
    strength: Option<i32>,
    stamina: Option<i32>,
    #[serde(default)]
    effects: Vec<String>,
    #[serde(default)]
    interrupt: bool,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The reference card set shipped with the crate.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::from_json(STANDARD_SET)
    }

    /// Load a catalog from a JSON array of card records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<CardRecord> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for record in records {
            catalog.register(record.into_definition()?)?;
        }
        Ok(catalog)
    }

    /// Register a card definition. Ids and names must be unique, and Toys
    /// must have stats.
    pub fn register(&mut self, card: CardDefinition) -> Result<(), CatalogError> {
        if self.cards.contains_key(&card.id) || self.names.contains_key(&card.name) {
            return Err(CatalogError::DuplicateCard(card.name));
        }
        if card.is_toy() && card.stats.is_none() {
            return Err(CatalogError::MissingStats(card.name));
        }
        let targeted_plays = card.play_clauses().filter(|c| c.target.is_some()).count();
        if targeted_plays > 1 {
            return Err(CatalogError::BadToken {
                card: card.name,
                token: String::new(),
                reason: "at most one targeted play effect per card".to_string(),
            });
        }
        self.names.insert(card.name.clone(), card.id);
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Get a card definition that is known to exist.
    ///
    /// Every card in a game state was created from this catalog, so rules
    /// code looks definitions up through here. Panics on an unknown id.
    #[must_use]
    pub fn definition(&self, id: CardId) -> &CardDefinition {
        match self.cards.get(&id) {
            Some(def) => def,
            None => panic!("{id} is not in the catalog"),
        }
    }

    /// Find a card definition by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&CardDefinition> {
        self.names.get(name).and_then(|id| self.cards.get(id))
    }

    /// Look up a card's id by name.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<CardId> {
        self.names.get(name).copied()
    }

    /// Check if a card is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        let mut cards: Vec<_> = self.cards.values().collect();
        cards.sort_by_key(|c| c.id);
        cards.into_iter()
    }
}

impl CardRecord {
    fn into_definition(self) -> Result<CardDefinition, CatalogError> {
        let bad = |token: &str, reason: String| CatalogError::BadToken {
            card: self.name.clone(),
            token: token.to_string(),
            reason,
        };

        let cost = match &self.cost {
            CostField::Fixed(n) => CostPolicy::Fixed(*n),
            CostField::Policy(text) => parse_cost_policy(text).map_err(|r| bad(text, r))?,
        };

        let mut card = CardDefinition::new(CardId::new(self.id), self.name.clone(), self.kind)
            .with_cost(cost);
        card.interrupt = self.interrupt;

        match (self.kind, self.speed, self.strength, self.stamina) {
            (CardKind::Toy, Some(speed), Some(strength), Some(stamina)) => {
                card.stats = Some(Stats::new(speed, strength, stamina));
            }
            (CardKind::Toy, ..) => return Err(CatalogError::MissingStats(self.name.clone())),
            (CardKind::Action, ..) => {}
        }

        for token in &self.effects {
            match parse_token(token, self.kind).map_err(|r| bad(token, r))? {
                ParsedToken::Effect(effect) => card.effects.push(effect),
                ParsedToken::Interrupt => card.interrupt = true,
                ParsedToken::Alternative(alt) => card.alternative = Some(alt),
            }
        }
        if card.interrupt && card.kind != CardKind::Action {
            return Err(bad("meta:interrupt", "only Actions can be interrupts".to_string()));
        }
        if card.alternative == Some(AltPayment::SleepOwnToy)
            && matches!(card.cost, CostPolicy::Variable(VariableCost::CopyTarget))
        {
            return Err(bad(
                "meta:alt:sleep_own_toy",
                "copy cards cannot take an alternative payment".to_string(),
            ));
        }
        card.tokens = self.effects;
        Ok(card)
    }
}

fn parse_cost_policy(text: &str) -> Result<CostPolicy, String> {
    let parts: Vec<&str> = text.split(':').collect();
    match parts.as_slice() {
        ["variable", "sleep_discount", base] => base
            .parse::<u8>()
            .map(|base| CostPolicy::Variable(VariableCost::SleepDiscount { base }))
            .map_err(|_| format!("bad discount base {base:?}")),
        ["variable", "copy"] => Ok(CostPolicy::Variable(VariableCost::CopyTarget)),
        _ => Err(format!("unknown cost policy {text:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{ContinuousEffect, EffectDef};

    #[test]
    fn test_standard_set_loads() {
        let catalog = CardCatalog::standard().unwrap();
        assert!(catalog.len() >= 20);

        let knight = catalog.by_name("Knight").unwrap();
        assert_eq!(knight.stats, Some(Stats::new(4, 4, 3)));
        assert!(knight
            .continuous()
            .any(|c| *c == ContinuousEffect::AutoWinOnOwnTurn));

        let stall = catalog.by_name("Stall").unwrap();
        assert!(stall.interrupt);

        let ballaber = catalog.by_name("Ballaber").unwrap();
        assert_eq!(ballaber.alternative, Some(AltPayment::SleepOwnToy));

        let dream = catalog.by_name("Dream").unwrap();
        assert_eq!(
            dream.cost,
            CostPolicy::Variable(VariableCost::SleepDiscount { base: 4 })
        );
    }

    #[test]
    fn test_tokens_are_kept_verbatim() {
        let catalog = CardCatalog::standard().unwrap();
        let archer = catalog.by_name("Archer").unwrap();
        assert_eq!(archer.tokens.len(), archer.effects.len());
        assert!(matches!(archer.effects[1], EffectDef::Activated(_)));
    }

    #[test]
    fn test_iter_in_id_order() {
        let catalog = CardCatalog::standard().unwrap();
        let ids: Vec<_> = catalog.iter().map(|c| c.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_duplicate_rejected() {
        let json = r#"[
            {"id": 1, "name": "Rush", "kind": "action", "cost": 0, "effects": ["gain_cc:2"]},
            {"id": 2, "name": "Rush", "kind": "action", "cost": 0, "effects": ["gain_cc:2"]}
        ]"#;
        let err = CardCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCard(name) if name == "Rush"));
    }

    #[test]
    fn test_toy_without_stats_rejected() {
        let json = r#"[{"id": 1, "name": "Blob", "kind": "toy", "cost": 1}]"#;
        let err = CardCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::MissingStats(_)));
    }

    #[test]
    fn test_bad_token_reports_card() {
        let json = r#"[{"id": 1, "name": "Odd", "kind": "toy", "cost": 1,
            "speed": 1, "strength": 1, "stamina": 1, "effects": ["fly:away"]}]"#;
        match CardCatalog::from_json(json).unwrap_err() {
            CatalogError::BadToken { card, token, .. } => {
                assert_eq!(card, "Odd");
                assert_eq!(token, "fly:away");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_bad_cost_policy() {
        let json = r#"[{"id": 1, "name": "Odd", "kind": "action", "cost": "variable:free"}]"#;
        assert!(matches!(
            CardCatalog::from_json(json).unwrap_err(),
            CatalogError::BadToken { .. }
        ));
    }

    #[test]
    fn test_unknown_lookup() {
        let catalog = CardCatalog::standard().unwrap();
        assert!(catalog.by_name("Nobody").is_none());
        assert!(catalog.get(CardId::new(9999)).is_none());
        assert!(!catalog.contains(CardId::new(9999)));
    }
}
