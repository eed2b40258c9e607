pub mod attrs;
pub mod dispatch;
mod ids;
mod map_io;
mod reader;
pub mod readers;
mod warning;
mod writer;

pub use ids::IdRegistry;
pub use map_io::{
    read_fixture, read_map, read_map_from_events, write_fixture, write_map, MapReadOutcome,
    ReadOutcome, CURRENT_VERSION,
};
pub use reader::{ElementReader, ReadSession};
pub use warning::{WarningPolicy, Warnings};
pub use writer::XmlWriter;
