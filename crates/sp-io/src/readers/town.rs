use sp_core::{
    Fortress, MapReadError, TileFixture, Town, TownKind, TownSize, TownStatus, Village,
    DEFAULT_RACE,
};
use sp_parser::{EventStream, StartElement, TagEvent};

use crate::attrs::{
    expect_tag, get_attribute, get_image, get_integer_or, get_optional, get_portrait,
    get_recommended, get_required, is_skippable, missing_recommended, parse_integer, parse_wire,
    report_stray_text, skip_unsupported, spin_to_end, unexpected_child, unexpected_eof,
};
use crate::dispatch::{resolve, write_with, FORTRESS_MEMBER_READERS};
use crate::reader::{ElementReader, ReadSession};
use crate::warning::Warnings;
use crate::writer::XmlWriter;

const TOWN_TAGS: &[&str] = &["town", "city", "fortification", "village", "fortress"];

/// Settlements: the town family, villages, and fortresses with their
/// contents.
pub struct TownReader;

fn read_owner(element: &StartElement, warnings: &mut Warnings) -> Result<i32, MapReadError> {
    match get_attribute(element, "owner") {
        Some(raw) => parse_integer(element, "owner", raw),
        None => {
            warnings.report(missing_recommended(element, "owner"))?;
            Ok(-1)
        }
    }
}

fn read_status(element: &StartElement) -> Result<TownStatus, MapReadError> {
    let raw = get_required(element, "status")?;
    parse_wire(element, "status", &raw, TownStatus::parse)
}

fn read_size(element: &StartElement) -> Result<TownSize, MapReadError> {
    match get_attribute(element, "size") {
        Some(raw) => parse_wire(element, "size", raw, TownSize::parse),
        None => Ok(TownSize::default()),
    }
}

fn read_town(
    element: &StartElement,
    kind: TownKind,
    stream: &mut EventStream,
    session: &mut ReadSession,
) -> Result<Town, MapReadError> {
    let town = Town {
        kind,
        status: read_status(element)?,
        size: read_size(element)?,
        name: get_recommended(element, "name", "", &mut session.warnings)?,
        owner: read_owner(element, &mut session.warnings)?,
        dc: get_integer_or(element, "dc", 0)?,
        id: session.next_id(element)?,
        image: get_image(element),
        portrait: get_portrait(element),
    };
    spin_to_end(element, stream, session)?;
    Ok(town)
}

fn read_village(
    element: &StartElement,
    stream: &mut EventStream,
    session: &mut ReadSession,
) -> Result<Village, MapReadError> {
    let village = Village {
        status: read_status(element)?,
        name: get_recommended(element, "name", "", &mut session.warnings)?,
        owner: read_owner(element, &mut session.warnings)?,
        race: get_optional(element, "race", DEFAULT_RACE),
        id: session.next_id(element)?,
        image: get_image(element),
        portrait: get_portrait(element),
    };
    spin_to_end(element, stream, session)?;
    Ok(village)
}

fn read_fortress(
    element: &StartElement,
    stream: &mut EventStream,
    session: &mut ReadSession,
) -> Result<Fortress, MapReadError> {
    let mut fortress = Fortress {
        owner: read_owner(element, &mut session.warnings)?,
        name: get_recommended(element, "name", "", &mut session.warnings)?,
        size: read_size(element)?,
        id: session.next_id(element)?,
        image: get_image(element),
        portrait: get_portrait(element),
        members: Vec::new(),
    };
    while let Some(event) = stream.next() {
        match event {
            TagEvent::Start(child) => {
                if is_skippable(&child) {
                    skip_unsupported(&child, stream, &mut session.warnings)?;
                    continue;
                }
                let reader = resolve(FORTRESS_MEMBER_READERS, child.tag())
                    .ok_or_else(|| unexpected_child("fortress", &child))?;
                let member = reader.read(&child, "fortress", stream, session)?;
                fortress.members.push(member);
            }
            TagEvent::Text { value, location } => {
                report_stray_text(element, &value, location.line, session)?;
            }
            TagEvent::End { .. } => return Ok(fortress),
        }
    }
    Err(unexpected_eof(element))
}

impl ElementReader<TileFixture> for TownReader {
    fn supported_tags(&self) -> &'static [&'static str] {
        TOWN_TAGS
    }

    fn can_write(&self, obj: &TileFixture) -> bool {
        matches!(
            obj,
            TileFixture::Town(_) | TileFixture::Village(_) | TileFixture::Fortress(_)
        )
    }

    fn read(
        &self,
        element: &StartElement,
        parent: &str,
        stream: &mut EventStream,
        session: &mut ReadSession,
    ) -> Result<TileFixture, MapReadError> {
        expect_tag(element, parent, TOWN_TAGS)?;
        match element.tag() {
            "village" => read_village(element, stream, session).map(TileFixture::Village),
            "fortress" => read_fortress(element, stream, session).map(TileFixture::Fortress),
            tag => {
                let kind = TownKind::parse(tag).ok_or_else(|| unexpected_child(parent, element))?;
                read_town(element, kind, stream, session).map(TileFixture::Town)
            }
        }
    }

    fn write(&self, out: &mut XmlWriter, obj: &TileFixture, indent: usize) {
        match obj {
            TileFixture::Town(town) => out
                .open(indent, town.kind.as_str())
                .attr("status", town.status)
                .attr_if(town.size != TownSize::Small, "size", town.size)
                .attr("name", &town.name)
                .attr("owner", town.owner)
                .attr_if(town.dc != 0, "dc", town.dc)
                .attr("id", town.id)
                .attr_nonempty("image", &town.image)
                .attr_nonempty("portrait", &town.portrait)
                .close_empty(),
            TileFixture::Village(village) => out
                .open(indent, "village")
                .attr("status", village.status)
                .attr("name", &village.name)
                .attr("owner", village.owner)
                .attr_if(village.race != DEFAULT_RACE, "race", &village.race)
                .attr("id", village.id)
                .attr_nonempty("image", &village.image)
                .attr_nonempty("portrait", &village.portrait)
                .close_empty(),
            TileFixture::Fortress(fortress) => write_fortress(out, fortress, indent),
            _ => {}
        }
    }
}

fn write_fortress(out: &mut XmlWriter, fortress: &Fortress, indent: usize) {
    out.open(indent, "fortress")
        .attr("owner", fortress.owner)
        .attr("name", &fortress.name)
        .attr_if(fortress.size != TownSize::Small, "size", fortress.size)
        .attr("id", fortress.id)
        .attr_nonempty("image", &fortress.image)
        .attr_nonempty("portrait", &fortress.portrait);
    if fortress.members.is_empty() {
        out.close_empty();
        return;
    }
    out.close_start();
    for member in &fortress.members {
        write_with(FORTRESS_MEMBER_READERS, out, member, indent + 1);
    }
    out.end(indent, "fortress");
}
