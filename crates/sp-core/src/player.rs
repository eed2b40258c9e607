use serde::{Deserialize, Serialize};

pub const INDEPENDENT_PLAYER_NAME: &str = "independent";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub number: i32,
    pub name: String,
    pub country: Option<String>,
    pub portrait: String,
    pub current: bool,
}

impl Player {
    pub fn new(number: i32, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            country: None,
            portrait: String::new(),
            current: false,
        }
    }

    pub fn is_independent(&self) -> bool {
        self.name.eq_ignore_ascii_case(INDEPENDENT_PLAYER_NAME)
    }
}

/// Players in declaration order, keyed by number.
///
/// The collection does not enforce a single current player on insertion; the
/// map reader does that through [`PlayerCollection::set_current`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCollection {
    players: Vec<Player>,
}

impl PlayerCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a player, replacing one with the same number in place.
    pub fn add(&mut self, player: Player) {
        match self
            .players
            .iter_mut()
            .find(|existing| existing.number == player.number)
        {
            Some(existing) => *existing = player,
            None => self.players.push(player),
        }
    }

    pub fn get(&self, number: i32) -> Option<&Player> {
        self.players.iter().find(|player| player.number == number)
    }

    pub fn contains(&self, number: i32) -> bool {
        self.get(number).is_some()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn current(&self) -> Option<&Player> {
        self.players.iter().find(|player| player.current)
    }

    pub fn independent(&self) -> Option<&Player> {
        self.players.iter().find(|player| player.is_independent())
    }

    /// Marks `number` as the only current player. Returns false when no such
    /// player exists, in which case nothing changes.
    pub fn set_current(&mut self, number: i32) -> bool {
        if !self.contains(number) {
            return false;
        }
        for player in &mut self.players {
            player.current = player.number == number;
        }
        true
    }
}

impl<'a> IntoIterator for &'a PlayerCollection {
    type Item = &'a Player;
    type IntoIter = std::slice::Iter<'a, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.iter()
    }
}
