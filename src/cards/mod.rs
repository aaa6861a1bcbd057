//! Card system: definitions, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Static card data with parsed effects
//! - `CardInstance`: Runtime card state (zone, owner, controller, damage)
//! - `CardCatalog`: Card definition lookup, loaded from JSON
//!
//! Owner and controller are separate: the owner is fixed when the instance
//! is created, the controller changes with control-transfer effects and
//! reverts to the owner whenever the card changes zone.

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{
    AltPayment, CardDefinition, CardId, CardKind, CostPolicy, Stat, Stats, VariableCost,
};
pub use instance::{CardInstance, Modification};
pub use registry::CardCatalog;
