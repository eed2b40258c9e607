use std::fs;
use std::path::Path;

use proptest::prelude::*;
use sp_core::{
    Animal, Forest, Landmark, Map, MapDimensions, Player, PlayerCollection, Point, River,
    TextNote, TileFixture, TileType,
};
use sp_io::{read_map, write_map, WarningPolicy, CURRENT_VERSION};
use sp_test_example::{invalid_maps, lenient_maps, valid_maps};

fn read_file(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|error| panic!("read {}: {error}", path.display()))
}

fn assert_round_trips(path: &Path) {
    let source = read_file(path);
    let first = read_map(&source, WarningPolicy::Warn)
        .unwrap_or_else(|error| panic!("{} should read: {error}", path.display()))
        .value;
    let written = write_map(&first);
    let second = read_map(&written, WarningPolicy::Die)
        .unwrap_or_else(|error| panic!("rewritten {} should read strictly: {error}", path.display()))
        .value;
    assert_eq!(first, second, "{} changed on round trip", path.display());
    assert_eq!(written, write_map(&second), "{} output unstable", path.display());
}

#[test]
fn valid_samples_read_strictly_without_advisories() {
    for path in valid_maps() {
        let outcome = read_map(&read_file(&path), WarningPolicy::Die)
            .unwrap_or_else(|error| panic!("{}: {error}", path.display()));
        assert!(outcome.advisories.is_empty(), "{}", path.display());
    }
}

#[test]
fn valid_and_lenient_samples_round_trip() {
    for path in valid_maps().into_iter().chain(lenient_maps()) {
        assert_round_trips(&path);
    }
}

#[test]
fn lenient_samples_warn_and_fail_strictly() {
    for path in lenient_maps() {
        let source = read_file(&path);
        let outcome = read_map(&source, WarningPolicy::Warn)
            .unwrap_or_else(|error| panic!("{}: {error}", path.display()));
        assert!(!outcome.advisories.is_empty(), "{}", path.display());
        let ignored = read_map(&source, WarningPolicy::Ignore).expect("ignore policy reads");
        assert!(ignored.advisories.is_empty());
        assert_eq!(ignored.value, outcome.value);
        let error = read_map(&source, WarningPolicy::Die).expect_err("strict read fails");
        assert!(error.is_escalated(), "{}: {error}", path.display());
    }
}

#[test]
fn invalid_samples_fail_under_every_policy() {
    for path in invalid_maps() {
        let source = read_file(&path);
        for policy in [WarningPolicy::Ignore, WarningPolicy::Warn, WarningPolicy::Die] {
            let error = read_map(&source, policy).expect_err("invalid sample");
            assert!(!error.is_escalated(), "{}: {error}", path.display());
        }
    }
}

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn fixture_strategy() -> impl Strategy<Value = TileFixture> {
    prop_oneof![
        Just(TileFixture::Hill(Landmark::new(0))),
        Just(TileFixture::Oasis(Landmark::new(0))),
        (word(), any::<bool>(), -1i32..200).prop_map(|(kind, rows, acres)| {
            TileFixture::Forest(Forest {
                id: 0,
                kind,
                rows,
                acres,
                image: String::new(),
            })
        }),
        (
            word(),
            any::<bool>(),
            prop_oneof![Just("wild"), Just("domesticated")],
            -1i32..30,
            1i32..50,
        )
            .prop_map(|(kind, talking, status, born, population)| {
                let mut animal = Animal::new(0, kind);
                animal.talking = talking;
                animal.status = status.to_string();
                animal.born = born;
                animal.population = population;
                TileFixture::Animal(animal)
            }),
        (-1i32..20, "[a-z]{1,6}( [a-z&<]{1,6}){0,3}")
            .prop_map(|(turn, text)| TileFixture::Text(TextNote::new(turn, text))),
    ]
}

fn tile_strategy() -> impl Strategy<Value = (Point, TileType, Vec<River>, Vec<TileFixture>)> {
    (
        (0i32..6, 0i32..6).prop_map(|(row, column)| Point::new(row, column)),
        proptest::sample::select(TileType::ALL),
        proptest::collection::vec(proptest::sample::select(River::ALL), 0..3),
        proptest::collection::vec(fixture_strategy(), 0..4),
    )
}

fn map_strategy() -> impl Strategy<Value = Map> {
    (
        proptest::collection::vec(tile_strategy(), 0..8),
        -1i32..40,
        proptest::collection::vec(word(), 0..4),
        proptest::option::of(0usize..4),
    )
        .prop_map(|(tiles, turn, names, current)| {
            // Numbers start at -1 so negative player numbers are covered.
            let mut players = PlayerCollection::new();
            for (index, name) in names.into_iter().enumerate() {
                players.add(Player::new(index as i32 - 1, name));
            }
            if let Some(index) = current {
                players.set_current(index as i32 - 1);
            }
            let mut map = Map::new(MapDimensions::new(6, 6, CURRENT_VERSION), players, turn);
            let mut next_id = 0;
            for (point, terrain, rivers, fixtures) in tiles {
                if terrain != TileType::NotVisible {
                    map.set_terrain(point, terrain);
                }
                for river in rivers {
                    map.add_river(point, river);
                }
                for mut fixture in fixtures {
                    match &mut fixture {
                        TileFixture::Hill(landmark) | TileFixture::Oasis(landmark) => {
                            landmark.id = next_id
                        }
                        TileFixture::Forest(forest) => forest.id = next_id,
                        TileFixture::Animal(animal) => animal.id = next_id,
                        _ => {}
                    }
                    next_id += 1;
                    map.add_fixture(point, fixture);
                }
            }
            map
        })
}

proptest! {
    #[test]
    fn written_maps_read_back_equal(map in map_strategy()) {
        let written = write_map(&map);
        let read = read_map(&written, WarningPolicy::Die)
            .map_err(|error| TestCaseError::fail(format!("{error}\n{written}")))?;
        prop_assert_eq!(&read.value, &map);
        prop_assert_eq!(write_map(&read.value), written);
    }
}
