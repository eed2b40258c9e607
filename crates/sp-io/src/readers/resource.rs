use sp_core::{
    CacheFixture, FieldStatus, FormatError, Grove, MapReadError, Meadow, Mine, MineralVein,
    Shrub, StoneDeposit, StoneKind, TileFixture, TownStatus,
};
use sp_parser::{EventStream, StartElement};

use crate::attrs::{
    expect_tag, get_attribute, get_bool, get_image, get_integer, get_integer_or,
    get_optional_with_deprecated, get_required, get_with_deprecated, missing_recommended,
    missing_required, parse_bool, parse_wire, spin_to_end,
};
use crate::reader::{ElementReader, ReadSession};
use crate::writer::XmlWriter;

const RESOURCE_TAGS: &[&str] = &[
    "cache", "grove", "orchard", "meadow", "field", "mine", "mineral", "shrub", "stone",
];

/// Harvestable and mineable things.
pub struct ResourceReader;

/// `cultivated`, or the old negated `wild` flag.
fn read_cultivated(
    element: &StartElement,
    session: &mut ReadSession,
) -> Result<bool, MapReadError> {
    if let Some(raw) = get_attribute(element, "cultivated") {
        return parse_bool(element, "cultivated", raw);
    }
    let Some(raw) = get_attribute(element, "wild") else {
        return Err(missing_required(element, "cultivated").into());
    };
    session.warnings.report(FormatError::DeprecatedProperty {
        tag: element.tag().to_string(),
        old: "wild".to_string(),
        new: "cultivated".to_string(),
        line: element.line(),
    })?;
    Ok(!parse_bool(element, "wild", raw)?)
}

fn read_field_status(
    element: &StartElement,
    session: &mut ReadSession,
) -> Result<FieldStatus, MapReadError> {
    match get_attribute(element, "status") {
        Some(raw) => parse_wire(element, "status", raw, FieldStatus::parse),
        None => {
            session
                .warnings
                .report(missing_recommended(element, "status"))?;
            Ok(FieldStatus::Fallow)
        }
    }
}

fn read_stone_kind(
    element: &StartElement,
    session: &mut ReadSession,
) -> Result<StoneKind, MapReadError> {
    match get_optional_with_deprecated(element, "kind", "stone", &mut session.warnings)? {
        Some(raw) => parse_wire(element, "kind", &raw, StoneKind::parse),
        None => Err(missing_required(element, "kind").into()),
    }
}

impl ElementReader<TileFixture> for ResourceReader {
    fn supported_tags(&self) -> &'static [&'static str] {
        RESOURCE_TAGS
    }

    fn can_write(&self, obj: &TileFixture) -> bool {
        matches!(
            obj,
            TileFixture::Cache(_)
                | TileFixture::Grove(_)
                | TileFixture::Meadow(_)
                | TileFixture::Mine(_)
                | TileFixture::MineralVein(_)
                | TileFixture::Shrub(_)
                | TileFixture::StoneDeposit(_)
        )
    }

    fn read(
        &self,
        element: &StartElement,
        parent: &str,
        stream: &mut EventStream,
        session: &mut ReadSession,
    ) -> Result<TileFixture, MapReadError> {
        expect_tag(element, parent, RESOURCE_TAGS)?;
        let fixture = match element.tag() {
            "cache" => TileFixture::Cache(CacheFixture {
                kind: get_required(element, "kind")?,
                contents: get_required(element, "contents")?,
                id: session.next_id(element)?,
                image: get_image(element),
            }),
            tag @ ("grove" | "orchard") => TileFixture::Grove(Grove {
                orchard: tag == "orchard",
                cultivated: read_cultivated(element, session)?,
                kind: get_with_deprecated(element, "kind", "tree", &mut session.warnings)?,
                count: get_integer_or(element, "count", -1)?,
                id: session.next_id(element)?,
                image: get_image(element),
            }),
            tag @ ("meadow" | "field") => TileFixture::Meadow(Meadow {
                field: tag == "field",
                kind: get_required(element, "kind")?,
                cultivated: get_bool(element, "cultivated")?,
                status: read_field_status(element, session)?,
                acres: get_integer_or(element, "acres", -1)?,
                id: session.next_id(element)?,
                image: get_image(element),
            }),
            "mine" => TileFixture::Mine(Mine {
                kind: get_with_deprecated(element, "kind", "product", &mut session.warnings)?,
                status: {
                    let raw = get_required(element, "status")?;
                    parse_wire(element, "status", &raw, TownStatus::parse)?
                },
                id: session.next_id(element)?,
                image: get_image(element),
            }),
            "mineral" => TileFixture::MineralVein(MineralVein {
                kind: get_with_deprecated(element, "kind", "mineral", &mut session.warnings)?,
                exposed: get_bool(element, "exposed")?,
                dc: get_integer(element, "dc")?,
                id: session.next_id(element)?,
                image: get_image(element),
            }),
            "shrub" => TileFixture::Shrub(Shrub {
                kind: get_with_deprecated(element, "kind", "shrub", &mut session.warnings)?,
                count: get_integer_or(element, "count", -1)?,
                id: session.next_id(element)?,
                image: get_image(element),
            }),
            _ => TileFixture::StoneDeposit(StoneDeposit {
                kind: read_stone_kind(element, session)?,
                dc: get_integer(element, "dc")?,
                id: session.next_id(element)?,
                image: get_image(element),
            }),
        };
        spin_to_end(element, stream, session)?;
        Ok(fixture)
    }

    fn write(&self, out: &mut XmlWriter, obj: &TileFixture, indent: usize) {
        match obj {
            TileFixture::Cache(cache) => out
                .open(indent, "cache")
                .attr("kind", &cache.kind)
                .attr("contents", &cache.contents)
                .attr("id", cache.id)
                .attr_nonempty("image", &cache.image)
                .close_empty(),
            TileFixture::Grove(grove) => out
                .open(indent, if grove.orchard { "orchard" } else { "grove" })
                .attr("cultivated", grove.cultivated)
                .attr("kind", &grove.kind)
                .attr_if(grove.count != -1, "count", grove.count)
                .attr("id", grove.id)
                .attr_nonempty("image", &grove.image)
                .close_empty(),
            TileFixture::Meadow(meadow) => out
                .open(indent, if meadow.field { "field" } else { "meadow" })
                .attr("kind", &meadow.kind)
                .attr("cultivated", meadow.cultivated)
                .attr("status", meadow.status)
                .attr_if(meadow.acres != -1, "acres", meadow.acres)
                .attr("id", meadow.id)
                .attr_nonempty("image", &meadow.image)
                .close_empty(),
            TileFixture::Mine(mine) => out
                .open(indent, "mine")
                .attr("kind", &mine.kind)
                .attr("status", mine.status)
                .attr("id", mine.id)
                .attr_nonempty("image", &mine.image)
                .close_empty(),
            TileFixture::MineralVein(vein) => out
                .open(indent, "mineral")
                .attr("kind", &vein.kind)
                .attr("exposed", vein.exposed)
                .attr("dc", vein.dc)
                .attr("id", vein.id)
                .attr_nonempty("image", &vein.image)
                .close_empty(),
            TileFixture::Shrub(shrub) => out
                .open(indent, "shrub")
                .attr("kind", &shrub.kind)
                .attr_if(shrub.count != -1, "count", shrub.count)
                .attr("id", shrub.id)
                .attr_nonempty("image", &shrub.image)
                .close_empty(),
            TileFixture::StoneDeposit(stone) => out
                .open(indent, "stone")
                .attr("kind", stone.kind)
                .attr("dc", stone.dc)
                .attr("id", stone.id)
                .attr_nonempty("image", &stone.image)
                .close_empty(),
            _ => {}
        }
    }
}
