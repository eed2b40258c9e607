use sp_core::{
    Animal, AnimalTracks, Immortal, ImmortalKind, MapReadError, TileFixture, UnitMember,
    DEFAULT_ANIMAL_STATUS,
};
use sp_parser::{EventStream, StartElement};

use crate::attrs::{
    expect_tag, get_bool_or, get_image, get_integer_or, get_optional, get_required, spin_to_end,
    unexpected_child,
};
use crate::reader::{ElementReader, ReadSession};
use crate::writer::XmlWriter;

const MOBILE_TAGS: &[&str] = &[
    "animal", "sphinx", "djinn", "griffin", "minotaur", "ogre", "phoenix", "simurgh", "troll",
    "centaur", "dragon", "fairy", "giant",
];

const ANIMAL_TAGS: &[&str] = &["animal"];

/// Animals (and their tracks) and immortals. Inside a unit only animals are
/// accepted.
pub struct MobileReader;

enum AnimalOrTracks {
    Animal(Animal),
    Tracks(AnimalTracks),
}

fn read_animal(
    element: &StartElement,
    stream: &mut EventStream,
    session: &mut ReadSession,
) -> Result<AnimalOrTracks, MapReadError> {
    let kind = get_required(element, "kind")?;
    let read = if get_bool_or(element, "traces", false)? {
        AnimalOrTracks::Tracks(AnimalTracks {
            kind,
            image: get_image(element),
        })
    } else {
        AnimalOrTracks::Animal(Animal {
            kind,
            talking: get_bool_or(element, "talking", false)?,
            status: get_optional(element, "status", DEFAULT_ANIMAL_STATUS),
            born: get_integer_or(element, "born", -1)?,
            population: get_integer_or(element, "count", 1)?,
            id: session.next_id(element)?,
            image: get_image(element),
        })
    };
    spin_to_end(element, stream, session)?;
    Ok(read)
}

fn write_animal(out: &mut XmlWriter, animal: &Animal, indent: usize) {
    out.open(indent, "animal")
        .attr("kind", &animal.kind)
        .attr_if(animal.talking, "talking", true)
        .attr_if(
            animal.status != DEFAULT_ANIMAL_STATUS,
            "status",
            &animal.status,
        )
        .attr_if(animal.born != -1, "born", animal.born)
        .attr_if(animal.population != 1, "count", animal.population)
        .attr("id", animal.id)
        .attr_nonempty("image", &animal.image)
        .close_empty();
}

fn read_immortal(
    element: &StartElement,
    parent: &str,
    stream: &mut EventStream,
    session: &mut ReadSession,
) -> Result<Immortal, MapReadError> {
    let kind = ImmortalKind::parse(element.tag())
        .ok_or_else(|| unexpected_child(parent, element))?;
    let subkind = if kind.has_kind() {
        get_required(element, "kind")?
    } else {
        String::new()
    };
    let immortal = Immortal {
        kind,
        subkind,
        id: session.next_id(element)?,
        image: get_image(element),
    };
    spin_to_end(element, stream, session)?;
    Ok(immortal)
}

impl ElementReader<TileFixture> for MobileReader {
    fn supported_tags(&self) -> &'static [&'static str] {
        MOBILE_TAGS
    }

    fn can_write(&self, obj: &TileFixture) -> bool {
        matches!(
            obj,
            TileFixture::Animal(_) | TileFixture::AnimalTracks(_) | TileFixture::Immortal(_)
        )
    }

    fn read(
        &self,
        element: &StartElement,
        parent: &str,
        stream: &mut EventStream,
        session: &mut ReadSession,
    ) -> Result<TileFixture, MapReadError> {
        expect_tag(element, parent, MOBILE_TAGS)?;
        if element.tag() == "animal" {
            return Ok(match read_animal(element, stream, session)? {
                AnimalOrTracks::Animal(animal) => TileFixture::Animal(animal),
                AnimalOrTracks::Tracks(tracks) => TileFixture::AnimalTracks(tracks),
            });
        }
        Ok(TileFixture::Immortal(read_immortal(element, parent, stream, session)?))
    }

    fn write(&self, out: &mut XmlWriter, obj: &TileFixture, indent: usize) {
        match obj {
            TileFixture::Animal(animal) => write_animal(out, animal, indent),
            TileFixture::AnimalTracks(tracks) => out
                .open(indent, "animal")
                .attr("kind", &tracks.kind)
                .attr("traces", true)
                .attr_nonempty("image", &tracks.image)
                .close_empty(),
            TileFixture::Immortal(immortal) => out
                .open(indent, immortal.kind.as_str())
                .attr_if(immortal.kind.has_kind(), "kind", &immortal.subkind)
                .attr("id", immortal.id)
                .attr_nonempty("image", &immortal.image)
                .close_empty(),
            _ => {}
        }
    }
}

impl ElementReader<UnitMember> for MobileReader {
    fn supported_tags(&self) -> &'static [&'static str] {
        ANIMAL_TAGS
    }

    fn can_write(&self, obj: &UnitMember) -> bool {
        matches!(obj, UnitMember::Animal(_))
    }

    fn read(
        &self,
        element: &StartElement,
        parent: &str,
        stream: &mut EventStream,
        session: &mut ReadSession,
    ) -> Result<UnitMember, MapReadError> {
        expect_tag(element, parent, ANIMAL_TAGS)?;
        match read_animal(element, stream, session)? {
            AnimalOrTracks::Animal(animal) => Ok(UnitMember::Animal(animal)),
            AnimalOrTracks::Tracks(_) => Err(unexpected_child(parent, element).into()),
        }
    }

    fn write(&self, out: &mut XmlWriter, obj: &UnitMember, indent: usize) {
        if let UnitMember::Animal(animal) = obj {
            write_animal(out, animal, indent);
        }
    }
}
