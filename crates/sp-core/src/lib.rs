pub mod error;
pub mod fixtures;
pub mod map;
pub mod player;
pub mod types;

pub use error::{ErrorCategory, FormatError, MapReadError};
pub use fixtures::*;
pub use map::{Map, Tile};
pub use player::{Player, PlayerCollection, INDEPENDENT_PLAYER_NAME};
pub use types::*;
