//! Card instance identification.
//!
//! Every physical card in a game gets a unique `InstanceId` at setup.
//! Instances are never created or destroyed afterwards, so ids are stable
//! for the whole game and are the only way rules code refers to a card.
//!
//! ## ID Layout
//!
//! Ids are allocated sequentially at setup: the first player's six cards,
//! then the second player's. Two copies of the same card definition always
//! get distinct ids.
//!
//! ```
//! use tussle_engine::core::InstanceId;
//!
//! let a = InstanceId::new(3);
//! let b = InstanceId::new(4);
//! assert_ne!(a, b);
//! assert_eq!(a.raw(), 3);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create an instance ID.
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

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}
