use sp_core::{FortressMember, Player, River, TileFixture, UnitMember};

use crate::reader::ElementReader;
use crate::readers::{
    EquipmentReader, ExplorableReader, MobileReader, PlayerReader, ResourceReader, RiverReader,
    TerrainReader, TownReader, UnitReader, WorkerReader,
};
use crate::writer::XmlWriter;

pub type ReaderTable<T> = &'static [&'static dyn ElementReader<T>];

pub static TILE_FIXTURE_READERS: ReaderTable<TileFixture> = &[
    &TerrainReader,
    &ExplorableReader,
    &MobileReader,
    &UnitReader,
    &TownReader,
    &ResourceReader,
];

pub static UNIT_MEMBER_READERS: ReaderTable<UnitMember> =
    &[&WorkerReader, &MobileReader, &EquipmentReader];

pub static FORTRESS_MEMBER_READERS: ReaderTable<FortressMember> =
    &[&UnitReader, &EquipmentReader];

pub static PLAYER_READERS: ReaderTable<Player> = &[&PlayerReader];

pub static RIVER_READERS: ReaderTable<River> = &[&RiverReader];

/// First reader in `table` that handles `tag`.
pub fn resolve<T: 'static>(
    table: ReaderTable<T>,
    tag: &str,
) -> Option<&'static dyn ElementReader<T>> {
    table.iter().copied().find(|reader| reader.supports(tag))
}

/// First reader in `table` that can write `obj`.
pub fn writer_for<T: 'static>(
    table: ReaderTable<T>,
    obj: &T,
) -> Option<&'static dyn ElementReader<T>> {
    table.iter().copied().find(|reader| reader.can_write(obj))
}

pub fn write_with<T: 'static>(
    table: ReaderTable<T>,
    out: &mut XmlWriter,
    obj: &T,
    indent: usize,
) {
    match writer_for(table, obj) {
        Some(writer) => writer.write(out, obj, indent),
        None => tracing::error!(
            type_name = std::any::type_name::<T>(),
            "no registered writer for object"
        ),
    }
}

/// Every tag some reader in `table` accepts, in dispatch order.
pub fn all_supported_tags<T: 'static>(table: ReaderTable<T>) -> Vec<&'static str> {
    table
        .iter()
        .flat_map(|reader| reader.supported_tags().iter().copied())
        .collect()
}
