use sp_core::{
    FormatError, MapDimensions, MapReadError, Point, TextNote, Tile, TileFixture, TileType,
};
use sp_parser::{EventStream, StartElement, TagEvent};

use crate::attrs::{
    expect_tag, get_integer, get_optional_with_deprecated, is_skippable, malformed,
    parse_wire, skip_unsupported, unexpected_child, unexpected_eof,
};
use crate::dispatch::{resolve, write_with, RIVER_READERS, TILE_FIXTURE_READERS};
use crate::reader::ReadSession;
use crate::writer::XmlWriter;

/// Reads one `tile` element: its position, terrain, rivers and fixtures.
///
/// Text that turns up where no text belongs, whether directly in the tile or
/// inside one of its fixtures, is kept as a `text` note with an unknown turn.
pub fn read_tile(
    element: &StartElement,
    parent: &str,
    stream: &mut EventStream,
    session: &mut ReadSession,
    dimensions: MapDimensions,
) -> Result<(Point, Tile), MapReadError> {
    expect_tag(element, parent, &["tile"])?;
    let row = get_integer(element, "row")?;
    let column = get_integer(element, "column")?;
    let point = Point::new(row, column);
    if !dimensions.contains(point) {
        let (property, value) = if row < 0 || row >= dimensions.rows {
            ("row", row)
        } else {
            ("column", column)
        };
        return Err(malformed(element, property, &value.to_string()).into());
    }
    let terrain =
        match get_optional_with_deprecated(element, "kind", "type", &mut session.warnings)? {
            Some(raw) => parse_wire(element, "kind", &raw, TileType::parse)?,
            None => TileType::NotVisible,
        };
    let mut tile = Tile::new(terrain);

    while let Some(event) = stream.next() {
        match event {
            TagEvent::Start(child) => {
                if is_skippable(&child) {
                    skip_unsupported(&child, stream, &mut session.warnings)?;
                    continue;
                }
                if let Some(reader) = resolve(RIVER_READERS, child.tag()) {
                    let river = reader.read(&child, "tile", stream, session)?;
                    tile.rivers.insert(river);
                    continue;
                }
                let reader = resolve(TILE_FIXTURE_READERS, child.tag())
                    .ok_or_else(|| unexpected_child("tile", &child))?;
                let fixture = reader.read(&child, "tile", stream, session)?;
                tile.fixtures.push(fixture);
                attach_stray_text(&mut tile, session);
            }
            TagEvent::Text { value, location } => {
                let text = value.trim();
                if text.is_empty() {
                    continue;
                }
                session.warnings.report(FormatError::UnwantedText {
                    tag: "tile".to_string(),
                    text: text.to_string(),
                    line: location.line,
                })?;
                tile.fixtures.push(TileFixture::Text(TextNote::new(-1, text)));
            }
            TagEvent::End { .. } => {
                attach_stray_text(&mut tile, session);
                return Ok((point, tile));
            }
        }
    }
    Err(unexpected_eof(element))
}

fn attach_stray_text(tile: &mut Tile, session: &mut ReadSession) {
    for text in session.take_stray_text() {
        tile.fixtures.push(TileFixture::Text(TextNote::new(-1, text)));
    }
}

pub fn write_tile(out: &mut XmlWriter, point: Point, tile: &Tile, indent: usize) {
    out.open(indent, "tile")
        .attr("row", point.row)
        .attr("column", point.column)
        .attr_if(tile.terrain != TileType::NotVisible, "kind", tile.terrain);
    if tile.rivers.is_empty() && tile.fixtures.is_empty() {
        out.close_empty();
        return;
    }
    out.close_start();
    for river in &tile.rivers {
        write_with(RIVER_READERS, out, river, indent + 1);
    }
    for fixture in &tile.fixtures {
        write_with(TILE_FIXTURE_READERS, out, fixture, indent + 1);
    }
    out.end(indent, "tile");
}
