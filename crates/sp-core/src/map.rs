use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::fixtures::TileFixture;
use crate::player::PlayerCollection;
use crate::types::{MapDimensions, Point, River, TileType};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub terrain: TileType,
    pub rivers: BTreeSet<River>,
    pub fixtures: Vec<TileFixture>,
}

impl Tile {
    pub fn new(terrain: TileType) -> Self {
        Self {
            terrain,
            ..Self::default()
        }
    }

    /// Not visible and holding nothing; such tiles are never stored.
    pub fn is_empty(&self) -> bool {
        self.terrain == TileType::NotVisible && self.rivers.is_empty() && self.fixtures.is_empty()
    }
}

/// A sparse grid of tiles plus the player roster.
#[derive(Debug, Clone)]
pub struct Map {
    pub dimensions: MapDimensions,
    pub players: PlayerCollection,
    pub current_turn: i32,
    tiles: BTreeMap<Point, Tile>,
}

impl Map {
    pub fn new(dimensions: MapDimensions, players: PlayerCollection, current_turn: i32) -> Self {
        Self {
            dimensions,
            players,
            current_turn,
            tiles: BTreeMap::new(),
        }
    }

    pub fn tile(&self, point: Point) -> Option<&Tile> {
        self.tiles.get(&point)
    }

    /// Returns the tile at `point`, creating an empty one if needed.
    pub fn tile_mut(&mut self, point: Point) -> &mut Tile {
        self.tiles.entry(point).or_default()
    }

    pub fn terrain(&self, point: Point) -> TileType {
        self.tile(point)
            .map(|tile| tile.terrain)
            .unwrap_or(TileType::NotVisible)
    }

    pub fn fixtures(&self, point: Point) -> &[TileFixture] {
        self.tile(point)
            .map(|tile| tile.fixtures.as_slice())
            .unwrap_or(&[])
    }

    pub fn set_terrain(&mut self, point: Point, terrain: TileType) {
        self.tile_mut(point).terrain = terrain;
        self.prune(point);
    }

    pub fn add_river(&mut self, point: Point, river: River) {
        self.tile_mut(point).rivers.insert(river);
    }

    pub fn add_fixture(&mut self, point: Point, fixture: TileFixture) {
        self.tile_mut(point).fixtures.push(fixture);
    }

    /// Merges `tile` into whatever is already stored at `point`. Visible
    /// terrain replaces the stored terrain; rivers and fixtures accumulate.
    pub fn merge_tile(&mut self, point: Point, tile: Tile) {
        let stored = self.tile_mut(point);
        if tile.terrain != TileType::NotVisible {
            stored.terrain = tile.terrain;
        }
        stored.rivers.extend(tile.rivers);
        stored.fixtures.extend(tile.fixtures);
        self.prune(point);
    }

    /// Every point of the grid in row-major order.
    pub fn locations(&self) -> impl Iterator<Item = Point> {
        let columns = self.dimensions.columns.max(0);
        (0..self.dimensions.rows.max(0))
            .flat_map(move |row| (0..columns).map(move |column| Point::new(row, column)))
    }

    /// Stored tiles with content, in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (Point, &Tile)> {
        self.tiles
            .iter()
            .filter(|(_, tile)| !tile.is_empty())
            .map(|(point, tile)| (*point, tile))
    }

    /// Every identifier in the map, including unit and fortress members.
    pub fn all_ids(&self) -> Vec<i32> {
        let mut ids = Vec::new();
        for (_, tile) in self.tiles() {
            for fixture in &tile.fixtures {
                fixture.collect_ids(&mut ids);
            }
        }
        ids
    }

    fn prune(&mut self, point: Point) {
        if self.tiles.get(&point).is_some_and(Tile::is_empty) {
            self.tiles.remove(&point);
        }
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions == other.dimensions
            && self.players == other.players
            && self.current_turn == other.current_turn
            && self.tiles().eq(other.tiles())
    }
}

impl Eq for Map {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Landmark;

    fn empty_map() -> Map {
        Map::new(MapDimensions::new(2, 2, 2), PlayerCollection::new(), -1)
    }

    #[test]
    fn unknown_tiles_read_as_not_visible() {
        let map = empty_map();
        assert_eq!(map.terrain(Point::new(1, 1)), TileType::NotVisible);
        assert!(map.fixtures(Point::new(1, 1)).is_empty());
        assert_eq!(map.locations().count(), 4);
    }

    #[test]
    fn empty_tiles_do_not_affect_equality() {
        let mut touched = empty_map();
        let _ = touched.tile_mut(Point::new(0, 0));
        assert_eq!(touched, empty_map());
        assert_eq!(touched.tiles().count(), 0);
    }

    #[test]
    fn merge_tile_keeps_terrain_when_incoming_is_not_visible() {
        let mut map = empty_map();
        map.set_terrain(Point::new(0, 1), TileType::Plains);
        let mut incoming = Tile::default();
        incoming.fixtures.push(TileFixture::Hill(Landmark::new(7)));
        map.merge_tile(Point::new(0, 1), incoming);

        assert_eq!(map.terrain(Point::new(0, 1)), TileType::Plains);
        assert_eq!(map.all_ids(), vec![7]);
    }

    #[test]
    fn tiles_iterate_row_major() {
        let mut map = empty_map();
        map.set_terrain(Point::new(1, 0), TileType::Desert);
        map.set_terrain(Point::new(0, 1), TileType::Ocean);
        let points = map.tiles().map(|(point, _)| point).collect::<Vec<_>>();
        assert_eq!(points, vec![Point::new(0, 1), Point::new(1, 0)]);
    }
}
