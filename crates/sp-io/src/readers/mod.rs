mod explorable;
mod mobile;
mod player;
mod resource;
mod river;
mod terrain;
mod tile;
mod town;
mod unit;

pub use explorable::ExplorableReader;
pub use mobile::MobileReader;
pub use player::PlayerReader;
pub use resource::ResourceReader;
pub use river::RiverReader;
pub use terrain::TerrainReader;
pub use tile::{read_tile, write_tile};
pub use town::TownReader;
pub use unit::{EquipmentReader, UnitReader, WorkerReader};
