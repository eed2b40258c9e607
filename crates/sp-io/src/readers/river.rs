use sp_core::{MapReadError, River};
use sp_parser::{EventStream, StartElement};

use crate::attrs::{expect_tag, get_required, parse_wire, spin_to_end};
use crate::reader::{ElementReader, ReadSession};
use crate::writer::XmlWriter;

const RIVER_TAGS: &[&str] = &["river", "lake"];

/// `<lake/>` and `<river direction="..."/>` inside a tile.
pub struct RiverReader;

impl ElementReader<River> for RiverReader {
    fn supported_tags(&self) -> &'static [&'static str] {
        RIVER_TAGS
    }

    fn can_write(&self, _obj: &River) -> bool {
        true
    }

    fn read(
        &self,
        element: &StartElement,
        parent: &str,
        stream: &mut EventStream,
        session: &mut ReadSession,
    ) -> Result<River, MapReadError> {
        expect_tag(element, parent, RIVER_TAGS)?;
        let river = if element.tag() == "lake" {
            River::Lake
        } else {
            let raw = get_required(element, "direction")?;
            parse_wire(element, "direction", &raw, River::parse)?
        };
        spin_to_end(element, stream, session)?;
        Ok(river)
    }

    fn write(&self, out: &mut XmlWriter, obj: &River, indent: usize) {
        match obj {
            River::Lake => out.open(indent, "lake").close_empty(),
            direction => out
                .open(indent, "river")
                .attr("direction", direction)
                .close_empty(),
        }
    }
}
