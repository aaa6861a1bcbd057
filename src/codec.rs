//! Lossless encodings of `GameState`.
//!
//! JSON (`serde_json`) for inspection and interchange, `bincode` for
//! compact snapshots. Both include the RNG stream position, so a decoded
//! state continues exactly where the original would have.
//!
//! ```
//! use tussle_engine::codec;
//! use tussle_engine::rules::{Engine, GameSetup, PlayerSetup};
//!
//! let engine = Engine::standard().unwrap();
//! let deck = ["Knight", "Ka", "Umbruh", "Rush", "Clean", "Beary"];
//! let state = engine
//!     .new_game(&GameSetup::new(PlayerSetup::new("Ada", &deck), PlayerSetup::new("Bo", &deck), 1))
//!     .unwrap();
//!
//! let json = codec::to_json(&state).unwrap();
//! assert_eq!(codec::from_json(&json).unwrap(), state);
//! ```

use crate::core::GameState;
use crate::error::CodecError;

pub fn to_json(state: &GameState) -> Result<String, CodecError> {
    Ok(serde_json::to_string(state)?)
}

pub fn from_json(json: &str) -> Result<GameState, CodecError> {
    Ok(serde_json::from_str(json)?)
}

pub fn to_bytes(state: &GameState) -> Result<Vec<u8>, CodecError> {
    Ok(bincode::serialize(state)?)
}

pub fn from_bytes(bytes: &[u8]) -> Result<GameState, CodecError> {
    Ok(bincode::deserialize(bytes)?)
}
