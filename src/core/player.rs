//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe identifier for one of the two seats.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access, indexable by `PlayerId`.
//!
//! ## Player
//!
//! A seat's resources and zone collections: CC, hand, in-play, sleep zone
//! and the per-turn direct-attack counter.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

use super::entity::InstanceId;
use crate::zones::Zone;

/// Number of seats in a game.
pub const PLAYER_COUNT: usize = 2;

/// Player identifier. The engine is strictly two-player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    ///
    /// ```
    /// use tussle_engine::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).opponent(), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(1).opponent(), PlayerId::new(0));
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Iterate over both player IDs.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use tussle_engine::core::{PlayerId, PlayerMap};
///
/// let mut cc: PlayerMap<u8> = PlayerMap::new(|_| 0);
/// cc[PlayerId::new(1)] = 4;
/// assert_eq!(cc[PlayerId::new(0)], 0);
/// assert_eq!(cc[PlayerId::new(1)], 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: PlayerId::all().map(factory).collect(),
        }
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Card id list for one zone. Six cards per player fit inline.
pub type ZoneList = SmallVec<[InstanceId; 8]>;

/// One seat's resources and zone collections.
///
/// Hand and sleep zone list the cards this player owns; the in-play list
/// holds the cards this player currently controls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) name: String,
    pub(crate) cc: u8,
    pub(crate) hand: ZoneList,
    pub(crate) in_play: ZoneList,
    pub(crate) sleep: ZoneList,
    pub(crate) direct_attacks: u8,
}

impl Player {
    pub(crate) fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            cc: 0,
            hand: ZoneList::new(),
            in_play: ZoneList::new(),
            sleep: ZoneList::new(),
            direct_attacks: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current command counters.
    #[must_use]
    pub fn cc(&self) -> u8 {
        self.cc
    }

    #[must_use]
    pub fn hand(&self) -> &[InstanceId] {
        &self.hand
    }

    #[must_use]
    pub fn in_play(&self) -> &[InstanceId] {
        &self.in_play
    }

    /// Sleep zone contents, oldest first.
    #[must_use]
    pub fn sleep_zone(&self) -> &[InstanceId] {
        &self.sleep
    }

    /// Direct attacks declared during the current turn.
    #[must_use]
    pub fn direct_attacks(&self) -> u8 {
        self.direct_attacks
    }

    /// Cards listed in a zone of this player.
    #[must_use]
    pub fn zone(&self, zone: Zone) -> &[InstanceId] {
        match zone {
            Zone::Hand => &self.hand,
            Zone::InPlay => &self.in_play,
            Zone::Sleep => &self.sleep,
        }
    }

    pub(crate) fn zone_mut(&mut self, zone: Zone) -> &mut ZoneList {
        match zone {
            Zone::Hand => &mut self.hand,
            Zone::InPlay => &mut self.in_play,
            Zone::Sleep => &mut self.sleep,
        }
    }

    /// Add CC, clamped to `cap`. Returns the amount actually gained.
    pub(crate) fn gain_cc(&mut self, amount: u8, cap: u8) -> u8 {
        let before = self.cc;
        self.cc = self.cc.saturating_add(amount).min(cap);
        self.cc - before
    }

    /// Remove CC. Callers validate affordability first.
    pub(crate) fn spend_cc(&mut self, amount: u8) {
        assert!(
            amount <= self.cc,
            "{} spending {} CC with only {} available",
            self.id,
            amount,
            self.cc
        );
        self.cc -= amount;
    }
}
