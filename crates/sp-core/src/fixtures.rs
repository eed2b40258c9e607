use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{FieldStatus, ImmortalKind, Point, StoneKind, TownKind, TownSize, TownStatus};

pub const DEFAULT_RACE: &str = "human";
pub const DEFAULT_ANIMAL_STATUS: &str = "wild";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forest {
    pub id: i32,
    pub kind: String,
    pub rows: bool,
    pub acres: i32,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ground {
    pub id: i32,
    pub kind: String,
    pub exposed: bool,
    pub image: String,
}

/// Terrain features that carry nothing but an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: i32,
    pub image: String,
}

impl Landmark {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            image: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battlefield {
    pub id: i32,
    pub dc: i32,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cave {
    pub id: i32,
    pub dc: i32,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portal {
    pub id: i32,
    pub destination_world: String,
    pub destination: Point,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adventure {
    pub id: i32,
    pub owner: i32,
    pub brief: String,
    pub full: String,
    pub image: String,
}

/// Free-form notes attached to a tile, optionally dated by turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextNote {
    pub turn: i32,
    pub text: String,
    pub image: String,
}

impl TextNote {
    pub fn new(turn: i32, text: impl Into<String>) -> Self {
        Self {
            turn,
            text: text.into(),
            image: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    pub id: i32,
    pub kind: String,
    pub talking: bool,
    pub status: String,
    pub born: i32,
    pub population: i32,
    pub image: String,
}

impl Animal {
    pub fn new(id: i32, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
            talking: false,
            status: DEFAULT_ANIMAL_STATUS.to_string(),
            born: -1,
            population: 1,
            image: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalTracks {
    pub kind: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Immortal {
    pub id: i32,
    pub kind: ImmortalKind,
    /// Only meaningful when `kind.has_kind()`; empty otherwise.
    pub subkind: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: i32,
    pub owner: i32,
    pub kind: String,
    pub name: String,
    pub image: String,
    pub portrait: String,
    pub orders: BTreeMap<i32, String>,
    pub results: BTreeMap<i32, String>,
    pub members: Vec<UnitMember>,
}

impl Unit {
    pub fn new(id: i32, owner: i32, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            owner,
            kind: kind.into(),
            name: name.into(),
            image: String::new(),
            portrait: String::new(),
            orders: BTreeMap::new(),
            results: BTreeMap::new(),
            members: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerStats {
    pub hit_points: i32,
    pub max_hit_points: i32,
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: i32,
    pub hours: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    pub level: i32,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: i32,
    pub name: String,
    pub race: String,
    pub image: String,
    pub portrait: String,
    pub stats: Option<WorkerStats>,
    pub jobs: Vec<Job>,
}

impl Worker {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            race: DEFAULT_RACE.to_string(),
            image: String::new(),
            portrait: String::new(),
            stats: None,
            jobs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Implement {
    pub id: i32,
    pub kind: String,
    pub count: i32,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePile {
    pub id: i32,
    pub kind: String,
    pub contents: String,
    pub quantity: i32,
    pub units: String,
    pub created: i32,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Town {
    pub id: i32,
    pub kind: TownKind,
    pub status: TownStatus,
    pub size: TownSize,
    pub name: String,
    pub owner: i32,
    pub dc: i32,
    pub image: String,
    pub portrait: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Village {
    pub id: i32,
    pub status: TownStatus,
    pub name: String,
    pub owner: i32,
    pub race: String,
    pub image: String,
    pub portrait: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fortress {
    pub id: i32,
    pub owner: i32,
    pub name: String,
    pub size: TownSize,
    pub image: String,
    pub portrait: String,
    pub members: Vec<FortressMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheFixture {
    pub id: i32,
    pub kind: String,
    pub contents: String,
    pub image: String,
}

/// A grove, or an orchard when `orchard` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grove {
    pub id: i32,
    pub orchard: bool,
    pub cultivated: bool,
    pub kind: String,
    pub count: i32,
    pub image: String,
}

/// A meadow, or a field when `field` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meadow {
    pub id: i32,
    pub field: bool,
    pub kind: String,
    pub cultivated: bool,
    pub status: FieldStatus,
    pub acres: i32,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mine {
    pub id: i32,
    pub kind: String,
    pub status: TownStatus,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineralVein {
    pub id: i32,
    pub kind: String,
    pub exposed: bool,
    pub dc: i32,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shrub {
    pub id: i32,
    pub kind: String,
    pub count: i32,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoneDeposit {
    pub id: i32,
    pub kind: StoneKind,
    pub dc: i32,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UnitMember {
    Worker(Worker),
    Animal(Animal),
    Implement(Implement),
    Resource(ResourcePile),
}

impl UnitMember {
    pub fn id(&self) -> i32 {
        match self {
            Self::Worker(worker) => worker.id,
            Self::Animal(animal) => animal.id,
            Self::Implement(implement) => implement.id,
            Self::Resource(pile) => pile.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FortressMember {
    Unit(Unit),
    Implement(Implement),
    Resource(ResourcePile),
}

impl FortressMember {
    pub fn id(&self) -> i32 {
        match self {
            Self::Unit(unit) => unit.id,
            Self::Implement(implement) => implement.id,
            Self::Resource(pile) => pile.id,
        }
    }
}

/// Anything that can sit on a tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TileFixture {
    Forest(Forest),
    Ground(Ground),
    Mountain(Landmark),
    Hill(Landmark),
    Oasis(Landmark),
    Sandbar(Landmark),
    Battlefield(Battlefield),
    Cave(Cave),
    Portal(Portal),
    Adventure(Adventure),
    Text(TextNote),
    Animal(Animal),
    AnimalTracks(AnimalTracks),
    Immortal(Immortal),
    Unit(Unit),
    Town(Town),
    Village(Village),
    Fortress(Fortress),
    Cache(CacheFixture),
    Grove(Grove),
    Meadow(Meadow),
    Mine(Mine),
    MineralVein(MineralVein),
    Shrub(Shrub),
    StoneDeposit(StoneDeposit),
}

impl TileFixture {
    /// `None` for the kinds that carry no identifier (notes and tracks).
    pub fn id(&self) -> Option<i32> {
        let id = match self {
            Self::Forest(forest) => forest.id,
            Self::Ground(ground) => ground.id,
            Self::Mountain(landmark)
            | Self::Hill(landmark)
            | Self::Oasis(landmark)
            | Self::Sandbar(landmark) => landmark.id,
            Self::Battlefield(battlefield) => battlefield.id,
            Self::Cave(cave) => cave.id,
            Self::Portal(portal) => portal.id,
            Self::Adventure(adventure) => adventure.id,
            Self::Text(_) | Self::AnimalTracks(_) => return None,
            Self::Animal(animal) => animal.id,
            Self::Immortal(immortal) => immortal.id,
            Self::Unit(unit) => unit.id,
            Self::Town(town) => town.id,
            Self::Village(village) => village.id,
            Self::Fortress(fortress) => fortress.id,
            Self::Cache(cache) => cache.id,
            Self::Grove(grove) => grove.id,
            Self::Meadow(meadow) => meadow.id,
            Self::Mine(mine) => mine.id,
            Self::MineralVein(vein) => vein.id,
            Self::Shrub(shrub) => shrub.id,
            Self::StoneDeposit(stone) => stone.id,
        };
        Some(id)
    }

    /// Appends this fixture's id and the ids of everything it contains.
    pub fn collect_ids(&self, out: &mut Vec<i32>) {
        out.extend(self.id());
        match self {
            Self::Unit(unit) => collect_unit_ids(unit, out),
            Self::Fortress(fortress) => {
                for member in &fortress.members {
                    out.push(member.id());
                    if let FortressMember::Unit(unit) = member {
                        collect_unit_ids(unit, out);
                    }
                }
            }
            _ => {}
        }
    }
}

fn collect_unit_ids(unit: &Unit, out: &mut Vec<i32>) {
    out.extend(unit.members.iter().map(UnitMember::id));
}
