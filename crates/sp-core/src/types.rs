use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn synthetic() -> Self {
        Self { line: 1, column: 1 }
    }
}

/// A tile coordinate. Ordering is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub row: i32,
    pub column: i32,
}

impl Point {
    pub const INVALID: Point = Point {
        row: -1,
        column: -1,
    };

    pub fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    pub fn is_valid(&self) -> bool {
        self.row >= 0 && self.column >= 0
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDimensions {
    pub rows: i32,
    pub columns: i32,
    pub version: i32,
}

impl MapDimensions {
    pub fn new(rows: i32, columns: i32, version: i32) -> Self {
        Self {
            rows,
            columns,
            version,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.is_valid() && point.row < self.rows && point.column < self.columns
    }
}

/// Declares a closed set of wire-named values with `parse` and `as_str`.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn parse(raw: &str) -> Option<Self> {
                match raw.trim() {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum!(
    /// Base terrain of a tile. `NotVisible` is never written to a document.
    TileType {
        NotVisible => "not_visible",
        Tundra => "tundra",
        Desert => "desert",
        Ocean => "ocean",
        Plains => "plains",
        Jungle => "jungle",
        Steppe => "steppe",
        Swamp => "swamp",
    }
);

impl Default for TileType {
    fn default() -> Self {
        Self::NotVisible
    }
}

wire_enum!(River {
    Lake => "lake",
    North => "north",
    East => "east",
    South => "south",
    West => "west",
});

wire_enum!(TownStatus {
    Active => "active",
    Abandoned => "abandoned",
    Burned => "burned",
    Ruined => "ruined",
});

wire_enum!(TownSize {
    Small => "small",
    Medium => "medium",
    Large => "large",
});

impl Default for TownSize {
    fn default() -> Self {
        Self::Small
    }
}

wire_enum!(FieldStatus {
    Fallow => "fallow",
    Seeding => "seeding",
    Growing => "growing",
    Bearing => "bearing",
});

wire_enum!(StoneKind {
    Limestone => "limestone",
    Marble => "marble",
    Slate => "slate",
    Pumice => "pumice",
    Conglomerate => "conglomerate",
    Sandstone => "sandstone",
    Laterite => "laterite",
    Shale => "shale",
});

wire_enum!(
    /// Kinds of the settlement element family sharing one schema.
    TownKind {
        Town => "town",
        City => "city",
        Fortification => "fortification",
    }
);

wire_enum!(
    /// Immortal creatures. The last four also carry a free-form kind.
    ImmortalKind {
        Sphinx => "sphinx",
        Djinn => "djinn",
        Griffin => "griffin",
        Minotaur => "minotaur",
        Ogre => "ogre",
        Phoenix => "phoenix",
        Simurgh => "simurgh",
        Troll => "troll",
        Centaur => "centaur",
        Dragon => "dragon",
        Fairy => "fairy",
        Giant => "giant",
    }
);

impl ImmortalKind {
    pub fn has_kind(&self) -> bool {
        matches!(
            self,
            Self::Centaur | Self::Dragon | Self::Fairy | Self::Giant
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_ordering_is_row_major() {
        let mut points = vec![Point::new(1, 0), Point::new(0, 2), Point::new(0, 1)];
        points.sort();
        assert_eq!(
            points,
            vec![Point::new(0, 1), Point::new(0, 2), Point::new(1, 0)]
        );
    }

    #[test]
    fn dimensions_contain_only_in_bounds_points() {
        let dimensions = MapDimensions::new(2, 3, 2);
        assert!(dimensions.contains(Point::new(1, 2)));
        assert!(!dimensions.contains(Point::new(2, 0)));
        assert!(!dimensions.contains(Point::new(0, 3)));
        assert!(!dimensions.contains(Point::INVALID));
    }

    #[test]
    fn wire_enums_parse_their_own_names() {
        for kind in TileType::ALL {
            assert_eq!(TileType::parse(kind.as_str()), Some(*kind));
        }
        assert_eq!(TownSize::parse(" medium "), Some(TownSize::Medium));
        assert_eq!(StoneKind::parse("granite"), None);
    }

    #[test]
    fn only_four_immortals_carry_a_kind() {
        let kinded = ImmortalKind::ALL
            .iter()
            .filter(|kind| kind.has_kind())
            .count();
        assert_eq!(kinded, 4);
    }
}
