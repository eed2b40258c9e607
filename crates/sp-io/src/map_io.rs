use sp_core::{
    FormatError, Map, MapDimensions, MapReadError, Player, PlayerCollection, TextNote, TileFixture,
};
use sp_parser::{parse_event_stream, EventStream, StartElement, TagEvent, SP_NAMESPACE};
use tracing::debug;

use crate::attrs::{
    expect_tag, get_attribute, get_integer, get_integer_or, get_required, is_skippable,
    malformed, parse_integer, report_stray_text, skip_unsupported, unexpected_child,
    unexpected_eof,
};
use crate::dispatch::{resolve, write_with, PLAYER_READERS, TILE_FIXTURE_READERS};
use crate::reader::ReadSession;
use crate::readers::{read_tile, write_tile};
use crate::warning::WarningPolicy;
use crate::writer::XmlWriter;

/// The only schema version this reader understands.
pub const CURRENT_VERSION: i32 = 2;

/// A successfully read value plus the advisories the policy let through.
#[derive(Debug, Clone)]
pub struct ReadOutcome<T> {
    pub value: T,
    pub advisories: Vec<FormatError>,
    /// Free text found where no tile could hold it, in document order.
    pub notes: Vec<TextNote>,
}

pub type MapReadOutcome = ReadOutcome<Map>;

/// Reads a whole map document, optionally wrapped in `view`.
pub fn read_map(source: &str, policy: WarningPolicy) -> Result<MapReadOutcome, MapReadError> {
    let stream = parse_event_stream(source)?;
    read_map_from_events(stream, policy)
}

pub fn read_map_from_events(
    mut stream: EventStream,
    policy: WarningPolicy,
) -> Result<MapReadOutcome, MapReadError> {
    let mut session = ReadSession::new(policy);
    reserve_declared_ids(&stream, &mut session);

    let root = next_start(&mut stream)?;
    expect_tag(&root, "document", &["map", "view"])?;
    let map = if root.tag() == "view" {
        read_view(&root, &mut stream, &mut session)?
    } else {
        read_map_element(&root, &mut stream, &mut session)?
    };
    Ok(ReadOutcome {
        value: map,
        notes: session.take_loose_notes(),
        advisories: session.warnings.into_advisories(),
    })
}

/// Reads a document whose root is a single tile fixture.
pub fn read_fixture(
    source: &str,
    policy: WarningPolicy,
) -> Result<ReadOutcome<TileFixture>, MapReadError> {
    let mut stream = parse_event_stream(source)?;
    let mut session = ReadSession::new(policy);
    reserve_declared_ids(&stream, &mut session);

    let root = next_start(&mut stream)?;
    let reader =
        resolve(TILE_FIXTURE_READERS, root.tag()).ok_or_else(|| unexpected_child("tile", &root))?;
    let fixture = reader.read(&root, "tile", &mut stream, &mut session)?;
    Ok(ReadOutcome {
        value: fixture,
        notes: session.take_loose_notes(),
        advisories: session.warnings.into_advisories(),
    })
}

/// Marks every explicit id in the document so ids generated for elements
/// without one never collide with an id declared further on.
fn reserve_declared_ids(stream: &EventStream, session: &mut ReadSession) {
    for event in stream.remaining() {
        let TagEvent::Start(start) = event else {
            continue;
        };
        if let Some(id) = get_attribute(start, "id").and_then(|raw| raw.trim().parse::<i32>().ok())
        {
            if id >= 0 {
                session.ids.reserve(id);
            }
        }
    }
}

fn next_start(stream: &mut EventStream) -> Result<StartElement, MapReadError> {
    for event in stream.by_ref() {
        if let TagEvent::Start(start) = event {
            return Ok(start);
        }
    }
    Err(MapReadError::Syntax {
        message: "XML document must contain a root element.".to_string(),
        location: sp_core::SourceLocation::synthetic(),
    })
}

fn read_optional_player(element: &StartElement) -> Result<Option<i32>, MapReadError> {
    get_attribute(element, "current_player")
        .map(|raw| parse_integer(element, "current_player", raw))
        .transpose()
}

/// Makes `number` the only current player. An unknown non-negative number
/// gets a nameless placeholder; an unknown negative one changes nothing.
fn select_current(players: &mut PlayerCollection, number: i32) {
    if players.set_current(number) || number < 0 {
        return;
    }
    players.add(Player::new(number, ""));
    players.set_current(number);
}

fn keep_loose_text(
    element: &StartElement,
    value: &str,
    line: usize,
    session: &mut ReadSession,
) -> Result<(), MapReadError> {
    report_stray_text(element, value, line, session)?;
    session.keep_loose_text();
    Ok(())
}

fn read_view(
    element: &StartElement,
    stream: &mut EventStream,
    session: &mut ReadSession,
) -> Result<Map, MapReadError> {
    let current_player = read_optional_player(element)?;
    let current_turn = get_integer_or(element, "current_turn", -1)?;
    let mut map = None;

    while let Some(event) = stream.next() {
        match event {
            TagEvent::Start(child) => {
                if is_skippable(&child) {
                    skip_unsupported(&child, stream, &mut session.warnings)?;
                    continue;
                }
                if child.tag() != "map" || map.is_some() {
                    return Err(unexpected_child("view", &child).into());
                }
                map = Some(read_map_element(&child, stream, session)?);
            }
            TagEvent::Text { value, location } => {
                keep_loose_text(element, &value, location.line, session)?;
            }
            TagEvent::End { .. } => {
                let Some(mut map) = map else {
                    return Err(FormatError::MissingRequiredChild {
                        parent: "view".to_string(),
                        line: element.line(),
                    }
                    .into());
                };
                if current_turn != -1 {
                    map.current_turn = current_turn;
                }
                if let Some(number) = current_player {
                    select_current(&mut map.players, number);
                }
                return Ok(map);
            }
        }
    }
    Err(unexpected_eof(element))
}

fn read_map_element(
    element: &StartElement,
    stream: &mut EventStream,
    session: &mut ReadSession,
) -> Result<Map, MapReadError> {
    // Refuse other schema revisions before looking at anything else.
    let version = get_required(element, "version")?;
    match version.trim().parse::<i32>() {
        Ok(CURRENT_VERSION) => {}
        _ => {
            return Err(FormatError::UnsupportedSchemaVersion {
                version,
                line: element.line(),
            }
            .into())
        }
    }
    let rows = get_integer(element, "rows")?;
    if rows < 0 {
        return Err(malformed(element, "rows", &rows.to_string()).into());
    }
    let columns = get_integer(element, "columns")?;
    if columns < 0 {
        return Err(malformed(element, "columns", &columns.to_string()).into());
    }
    let current_player = read_optional_player(element)?;
    let current_turn = get_integer_or(element, "current_turn", -1)?;
    debug!(rows, columns, line = element.line(), "reading map");

    let dimensions = MapDimensions::new(rows, columns, CURRENT_VERSION);
    let mut map = Map::new(dimensions, PlayerCollection::new(), current_turn);

    while let Some(event) = stream.next() {
        match event {
            TagEvent::Start(child) => {
                if is_skippable(&child) {
                    skip_unsupported(&child, stream, &mut session.warnings)?;
                    continue;
                }
                match child.tag() {
                    "player" => {
                        let reader = resolve(PLAYER_READERS, child.tag())
                            .ok_or_else(|| unexpected_child("map", &child))?;
                        let player = reader.read(&child, "map", stream, session)?;
                        session.players.add(player);
                        session.keep_loose_text();
                    }
                    "row" => read_row(&child, stream, session, &mut map)?,
                    "tile" => {
                        let (point, tile) = read_tile(&child, "map", stream, session, dimensions)?;
                        map.merge_tile(point, tile);
                    }
                    _ => return Err(unexpected_child("map", &child).into()),
                }
            }
            TagEvent::Text { value, location } => {
                keep_loose_text(element, &value, location.line, session)?;
            }
            TagEvent::End { .. } => {
                map.players = std::mem::take(&mut session.players);
                if let Some(number) = map.players.current().map(|player| player.number) {
                    map.players.set_current(number);
                }
                if let Some(number) = current_player {
                    select_current(&mut map.players, number);
                }
                debug!(
                    tiles = map.tiles().count(),
                    players = map.players.len(),
                    "finished reading map"
                );
                return Ok(map);
            }
        }
    }
    Err(unexpected_eof(element))
}

fn read_row(
    element: &StartElement,
    stream: &mut EventStream,
    session: &mut ReadSession,
    map: &mut Map,
) -> Result<(), MapReadError> {
    get_integer_or(element, "index", -1)?;
    while let Some(event) = stream.next() {
        match event {
            TagEvent::Start(child) => {
                if is_skippable(&child) {
                    skip_unsupported(&child, stream, &mut session.warnings)?;
                    continue;
                }
                let (point, tile) = read_tile(&child, "row", stream, session, map.dimensions)?;
                map.merge_tile(point, tile);
            }
            TagEvent::Text { value, location } => {
                keep_loose_text(element, &value, location.line, session)?;
            }
            TagEvent::End { .. } => return Ok(()),
        }
    }
    Err(unexpected_eof(element))
}

/// Serializes `map`. Output is byte-identical for equal maps.
pub fn write_map(map: &Map) -> String {
    let mut out = XmlWriter::new();
    out.declaration();
    let current_player = map.players.current().map(|player| player.number);
    let with_view = map.current_turn != -1;

    let mut indent = 0;
    if with_view {
        out.open(0, "view").attr("xmlns", SP_NAMESPACE);
        if let Some(number) = current_player {
            out.attr("current_player", number);
        }
        out.attr("current_turn", map.current_turn).close_start();
        indent = 1;
    }

    out.open(indent, "map");
    if !with_view {
        out.attr("xmlns", SP_NAMESPACE);
    }
    out.attr("version", map.dimensions.version)
        .attr("rows", map.dimensions.rows)
        .attr("columns", map.dimensions.columns);
    if let Some(number) = current_player.filter(|_| !with_view) {
        out.attr("current_player", number);
    }
    if map.players.is_empty() && map.tiles().next().is_none() {
        out.close_empty();
    } else {
        out.close_start();
        for player in &map.players {
            write_with(PLAYER_READERS, &mut out, player, indent + 1);
        }
        write_rows(&mut out, map, indent + 1);
        out.end(indent, "map");
    }

    if with_view {
        out.end(0, "view");
    }
    out.into_string()
}

fn write_rows(out: &mut XmlWriter, map: &Map, indent: usize) {
    let mut open_row = None;
    for (point, tile) in map.tiles() {
        if open_row != Some(point.row) {
            if open_row.is_some() {
                out.end(indent, "row");
            }
            out.open(indent, "row").attr("index", point.row).close_start();
            open_row = Some(point.row);
        }
        write_tile(out, point, tile, indent + 1);
    }
    if open_row.is_some() {
        out.end(indent, "row");
    }
}

/// Serializes a single fixture as a standalone element.
pub fn write_fixture(fixture: &TileFixture) -> String {
    let mut out = XmlWriter::new();
    write_with(TILE_FIXTURE_READERS, &mut out, fixture, 0);
    out.into_string()
}
