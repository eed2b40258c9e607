use sp_core::{Adventure, Battlefield, Cave, MapReadError, Point, Portal, TextNote, TileFixture};
use sp_parser::{EventStream, StartElement};

use crate::attrs::{
    expect_tag, get_image, get_integer, get_integer_or, get_optional, get_required,
    read_text_content, spin_to_end,
};
use crate::reader::{ElementReader, ReadSession};
use crate::writer::XmlWriter;

const EXPLORABLE_TAGS: &[&str] = &["battlefield", "cave", "portal", "adventure", "text"];

/// Things a unit can explore, plus free-text notes.
pub struct ExplorableReader;

impl ElementReader<TileFixture> for ExplorableReader {
    fn supported_tags(&self) -> &'static [&'static str] {
        EXPLORABLE_TAGS
    }

    fn can_write(&self, obj: &TileFixture) -> bool {
        matches!(
            obj,
            TileFixture::Battlefield(_)
                | TileFixture::Cave(_)
                | TileFixture::Portal(_)
                | TileFixture::Adventure(_)
                | TileFixture::Text(_)
        )
    }

    fn read(
        &self,
        element: &StartElement,
        parent: &str,
        stream: &mut EventStream,
        session: &mut ReadSession,
    ) -> Result<TileFixture, MapReadError> {
        expect_tag(element, parent, EXPLORABLE_TAGS)?;
        // Notes are the only explorable whose body is meaningful.
        if element.tag() == "text" {
            let turn = get_integer_or(element, "turn", -1)?;
            let image = get_image(element);
            let text = read_text_content(element, stream)?;
            return Ok(TileFixture::Text(TextNote { turn, text, image }));
        }

        let fixture = match element.tag() {
            "battlefield" => TileFixture::Battlefield(Battlefield {
                dc: get_integer(element, "dc")?,
                id: session.next_id(element)?,
                image: get_image(element),
            }),
            "cave" => TileFixture::Cave(Cave {
                dc: get_integer(element, "dc")?,
                id: session.next_id(element)?,
                image: get_image(element),
            }),
            "portal" => TileFixture::Portal(Portal {
                destination_world: get_required(element, "world")?,
                destination: Point::new(
                    get_integer_or(element, "row", -1)?,
                    get_integer_or(element, "column", -1)?,
                ),
                id: session.next_id(element)?,
                image: get_image(element),
            }),
            _ => TileFixture::Adventure(Adventure {
                owner: get_integer_or(element, "owner", -1)?,
                brief: get_optional(element, "brief", ""),
                full: get_optional(element, "full", ""),
                id: session.next_id(element)?,
                image: get_image(element),
            }),
        };
        spin_to_end(element, stream, session)?;
        Ok(fixture)
    }

    fn write(&self, out: &mut XmlWriter, obj: &TileFixture, indent: usize) {
        match obj {
            TileFixture::Battlefield(battlefield) => out
                .open(indent, "battlefield")
                .attr("dc", battlefield.dc)
                .attr("id", battlefield.id)
                .attr_nonempty("image", &battlefield.image)
                .close_empty(),
            TileFixture::Cave(cave) => out
                .open(indent, "cave")
                .attr("dc", cave.dc)
                .attr("id", cave.id)
                .attr_nonempty("image", &cave.image)
                .close_empty(),
            TileFixture::Portal(portal) => out
                .open(indent, "portal")
                .attr("world", &portal.destination_world)
                .attr_if(portal.destination.row != -1, "row", portal.destination.row)
                .attr_if(
                    portal.destination.column != -1,
                    "column",
                    portal.destination.column,
                )
                .attr("id", portal.id)
                .attr_nonempty("image", &portal.image)
                .close_empty(),
            TileFixture::Adventure(adventure) => out
                .open(indent, "adventure")
                .attr_if(adventure.owner != -1, "owner", adventure.owner)
                .attr_nonempty("brief", &adventure.brief)
                .attr_nonempty("full", &adventure.full)
                .attr("id", adventure.id)
                .attr_nonempty("image", &adventure.image)
                .close_empty(),
            TileFixture::Text(note) => out
                .open(indent, "text")
                .attr_if(note.turn != -1, "turn", note.turn)
                .attr_nonempty("image", &note.image)
                .close_with_text("text", &note.text),
            _ => {}
        }
    }
}
