use sp_core::{Forest, Ground, Landmark, MapReadError, TileFixture};
use sp_parser::{EventStream, StartElement};

use crate::attrs::{
    expect_tag, get_bool, get_bool_or, get_image, get_integer_or, get_required,
    get_with_deprecated, spin_to_end,
};
use crate::reader::{ElementReader, ReadSession};
use crate::writer::XmlWriter;

const TERRAIN_TAGS: &[&str] = &["forest", "ground", "mountain", "hill", "oasis", "sandbar"];

/// Forests, exposed ground and the id-only landforms.
pub struct TerrainReader;

impl ElementReader<TileFixture> for TerrainReader {
    fn supported_tags(&self) -> &'static [&'static str] {
        TERRAIN_TAGS
    }

    fn can_write(&self, obj: &TileFixture) -> bool {
        matches!(
            obj,
            TileFixture::Forest(_)
                | TileFixture::Ground(_)
                | TileFixture::Mountain(_)
                | TileFixture::Hill(_)
                | TileFixture::Oasis(_)
                | TileFixture::Sandbar(_)
        )
    }

    fn read(
        &self,
        element: &StartElement,
        parent: &str,
        stream: &mut EventStream,
        session: &mut ReadSession,
    ) -> Result<TileFixture, MapReadError> {
        expect_tag(element, parent, TERRAIN_TAGS)?;
        let fixture = match element.tag() {
            "forest" => TileFixture::Forest(Forest {
                kind: get_required(element, "kind")?,
                rows: get_bool_or(element, "rows", false)?,
                acres: get_integer_or(element, "acres", -1)?,
                id: session.next_id(element)?,
                image: get_image(element),
            }),
            "ground" => TileFixture::Ground(Ground {
                kind: get_with_deprecated(element, "kind", "ground", &mut session.warnings)?,
                exposed: get_bool(element, "exposed")?,
                id: session.next_id(element)?,
                image: get_image(element),
            }),
            tag => {
                let landmark = Landmark {
                    id: session.next_id(element)?,
                    image: get_image(element),
                };
                match tag {
                    "mountain" => TileFixture::Mountain(landmark),
                    "hill" => TileFixture::Hill(landmark),
                    "oasis" => TileFixture::Oasis(landmark),
                    _ => TileFixture::Sandbar(landmark),
                }
            }
        };
        spin_to_end(element, stream, session)?;
        Ok(fixture)
    }

    fn write(&self, out: &mut XmlWriter, obj: &TileFixture, indent: usize) {
        match obj {
            TileFixture::Forest(forest) => out
                .open(indent, "forest")
                .attr("kind", &forest.kind)
                .attr_if(forest.rows, "rows", true)
                .attr_if(forest.acres != -1, "acres", forest.acres)
                .attr("id", forest.id)
                .attr_nonempty("image", &forest.image)
                .close_empty(),
            TileFixture::Ground(ground) => out
                .open(indent, "ground")
                .attr("kind", &ground.kind)
                .attr("exposed", ground.exposed)
                .attr("id", ground.id)
                .attr_nonempty("image", &ground.image)
                .close_empty(),
            TileFixture::Mountain(landmark) => write_landmark(out, "mountain", landmark, indent),
            TileFixture::Hill(landmark) => write_landmark(out, "hill", landmark, indent),
            TileFixture::Oasis(landmark) => write_landmark(out, "oasis", landmark, indent),
            TileFixture::Sandbar(landmark) => write_landmark(out, "sandbar", landmark, indent),
            _ => {}
        }
    }
}

fn write_landmark(out: &mut XmlWriter, tag: &str, landmark: &Landmark, indent: usize) {
    out.open(indent, tag)
        .attr("id", landmark.id)
        .attr_nonempty("image", &landmark.image)
        .close_empty();
}
