use std::collections::BTreeMap;

use sp_core::{
    FortressMember, Implement, Job, MapReadError, ResourcePile, Skill, TileFixture, Unit,
    UnitMember, Worker, WorkerStats, DEFAULT_RACE,
};
use sp_parser::{EventStream, StartElement, TagEvent};

use crate::attrs::{
    expect_tag, get_attribute, get_image, get_integer, get_integer_or, get_optional,
    get_optional_with_deprecated, get_portrait, get_recommended, get_required, is_skippable,
    missing_recommended, parse_integer, read_text_content, report_stray_text, skip_unsupported,
    spin_to_end, unexpected_child, unexpected_eof,
};
use crate::dispatch::{resolve, write_with, UNIT_MEMBER_READERS};
use crate::reader::{ElementReader, ReadSession};
use crate::writer::XmlWriter;

const UNIT_TAGS: &[&str] = &["unit"];
const WORKER_TAGS: &[&str] = &["worker"];
const EQUIPMENT_TAGS: &[&str] = &["implement", "resource"];

pub struct UnitReader;

pub struct WorkerReader;

/// Implements and resource piles, which units and fortresses both hold.
pub struct EquipmentReader;

fn read_unit(
    element: &StartElement,
    parent: &str,
    stream: &mut EventStream,
    session: &mut ReadSession,
) -> Result<Unit, MapReadError> {
    expect_tag(element, parent, UNIT_TAGS)?;
    let owner = match get_attribute(element, "owner") {
        Some(raw) => parse_integer(element, "owner", raw)?,
        None => {
            session
                .warnings
                .report(missing_recommended(element, "owner"))?;
            -1
        }
    };
    let kind =
        match get_optional_with_deprecated(element, "kind", "type", &mut session.warnings)? {
            Some(kind) => kind,
            None => {
                session
                    .warnings
                    .report(missing_recommended(element, "kind"))?;
                String::new()
            }
        };
    let name = get_recommended(element, "name", "", &mut session.warnings)?;
    let mut unit = Unit::new(session.next_id(element)?, owner, kind, name);
    unit.image = get_image(element);
    unit.portrait = get_portrait(element);

    while let Some(event) = stream.next() {
        match event {
            TagEvent::Start(child) => {
                if is_skippable(&child) {
                    skip_unsupported(&child, stream, &mut session.warnings)?;
                    continue;
                }
                match child.tag() {
                    "orders" => read_dated_text(&child, stream, &mut unit.orders)?,
                    "results" => read_dated_text(&child, stream, &mut unit.results)?,
                    tag => {
                        let reader = resolve(UNIT_MEMBER_READERS, tag)
                            .ok_or_else(|| unexpected_child("unit", &child))?;
                        let member = reader.read(&child, "unit", stream, session)?;
                        unit.members.push(member);
                    }
                }
            }
            // Bare text in a unit is how orders were stored before they
            // were dated.
            TagEvent::Text { value, .. } => {
                let text = value.trim();
                if !text.is_empty() {
                    append_dated_text(&mut unit.orders, -1, text);
                }
            }
            TagEvent::End { .. } => return Ok(unit),
        }
    }
    Err(unexpected_eof(element))
}

fn read_dated_text(
    element: &StartElement,
    stream: &mut EventStream,
    target: &mut BTreeMap<i32, String>,
) -> Result<(), MapReadError> {
    let turn = get_integer_or(element, "turn", -1)?;
    let text = read_text_content(element, stream)?;
    append_dated_text(target, turn, &text);
    Ok(())
}

fn append_dated_text(target: &mut BTreeMap<i32, String>, turn: i32, text: &str) {
    let entry = target.entry(turn).or_default();
    if !entry.is_empty() && !text.is_empty() {
        entry.push('\n');
    }
    entry.push_str(text);
}

fn write_unit(out: &mut XmlWriter, unit: &Unit, indent: usize) {
    out.open(indent, "unit")
        .attr("owner", unit.owner)
        .attr("kind", &unit.kind)
        .attr("name", &unit.name)
        .attr("id", unit.id)
        .attr_nonempty("image", &unit.image)
        .attr_nonempty("portrait", &unit.portrait);
    if unit.orders.is_empty() && unit.results.is_empty() && unit.members.is_empty() {
        out.close_empty();
        return;
    }
    out.close_start();
    write_dated_text(out, "orders", &unit.orders, indent + 1);
    write_dated_text(out, "results", &unit.results, indent + 1);
    for member in &unit.members {
        write_with(UNIT_MEMBER_READERS, out, member, indent + 1);
    }
    out.end(indent, "unit");
}

fn write_dated_text(
    out: &mut XmlWriter,
    tag: &str,
    entries: &BTreeMap<i32, String>,
    indent: usize,
) {
    for (turn, text) in entries {
        out.open(indent, tag)
            .attr_if(*turn != -1, "turn", turn)
            .close_with_text(tag, text);
    }
}

impl ElementReader<TileFixture> for UnitReader {
    fn supported_tags(&self) -> &'static [&'static str] {
        UNIT_TAGS
    }

    fn can_write(&self, obj: &TileFixture) -> bool {
        matches!(obj, TileFixture::Unit(_))
    }

    fn read(
        &self,
        element: &StartElement,
        parent: &str,
        stream: &mut EventStream,
        session: &mut ReadSession,
    ) -> Result<TileFixture, MapReadError> {
        read_unit(element, parent, stream, session).map(TileFixture::Unit)
    }

    fn write(&self, out: &mut XmlWriter, obj: &TileFixture, indent: usize) {
        if let TileFixture::Unit(unit) = obj {
            write_unit(out, unit, indent);
        }
    }
}

impl ElementReader<FortressMember> for UnitReader {
    fn supported_tags(&self) -> &'static [&'static str] {
        UNIT_TAGS
    }

    fn can_write(&self, obj: &FortressMember) -> bool {
        matches!(obj, FortressMember::Unit(_))
    }

    fn read(
        &self,
        element: &StartElement,
        parent: &str,
        stream: &mut EventStream,
        session: &mut ReadSession,
    ) -> Result<FortressMember, MapReadError> {
        read_unit(element, parent, stream, session).map(FortressMember::Unit)
    }

    fn write(&self, out: &mut XmlWriter, obj: &FortressMember, indent: usize) {
        if let FortressMember::Unit(unit) = obj {
            write_unit(out, unit, indent);
        }
    }
}

fn read_worker(
    element: &StartElement,
    stream: &mut EventStream,
    session: &mut ReadSession,
) -> Result<Worker, MapReadError> {
    let mut worker = Worker::new(session.next_id(element)?, get_required(element, "name")?);
    worker.race = get_optional(element, "race", DEFAULT_RACE);
    worker.image = get_image(element);
    worker.portrait = get_portrait(element);

    while let Some(event) = stream.next() {
        match event {
            TagEvent::Start(child) => {
                if is_skippable(&child) {
                    skip_unsupported(&child, stream, &mut session.warnings)?;
                    continue;
                }
                match child.tag() {
                    "stats" => {
                        worker.stats = Some(read_stats(&child)?);
                        spin_to_end(&child, stream, session)?;
                    }
                    "job" => worker.jobs.push(read_job(&child, stream, session)?),
                    _ => return Err(unexpected_child("worker", &child).into()),
                }
            }
            TagEvent::Text { value, location } => {
                report_stray_text(element, &value, location.line, session)?;
            }
            TagEvent::End { .. } => return Ok(worker),
        }
    }
    Err(unexpected_eof(element))
}

fn read_stats(element: &StartElement) -> Result<WorkerStats, MapReadError> {
    Ok(WorkerStats {
        hit_points: get_integer(element, "hp")?,
        max_hit_points: get_integer(element, "max")?,
        strength: get_integer(element, "str")?,
        dexterity: get_integer(element, "dex")?,
        constitution: get_integer(element, "con")?,
        intelligence: get_integer(element, "int")?,
        wisdom: get_integer(element, "wis")?,
        charisma: get_integer(element, "cha")?,
    })
}

fn read_job(
    element: &StartElement,
    stream: &mut EventStream,
    session: &mut ReadSession,
) -> Result<Job, MapReadError> {
    let mut job = Job {
        name: get_required(element, "name")?,
        level: get_integer(element, "level")?,
        skills: Vec::new(),
    };
    while let Some(event) = stream.next() {
        match event {
            TagEvent::Start(child) => {
                if is_skippable(&child) {
                    skip_unsupported(&child, stream, &mut session.warnings)?;
                    continue;
                }
                if child.tag() != "skill" {
                    return Err(unexpected_child("job", &child).into());
                }
                job.skills.push(Skill {
                    name: get_required(&child, "name")?,
                    level: get_integer(&child, "level")?,
                    hours: get_integer(&child, "hours")?,
                });
                spin_to_end(&child, stream, session)?;
            }
            TagEvent::Text { value, location } => {
                report_stray_text(element, &value, location.line, session)?;
            }
            TagEvent::End { .. } => return Ok(job),
        }
    }
    Err(unexpected_eof(element))
}

fn write_worker(out: &mut XmlWriter, worker: &Worker, indent: usize) {
    out.open(indent, "worker")
        .attr("name", &worker.name)
        .attr_if(worker.race != DEFAULT_RACE, "race", &worker.race)
        .attr("id", worker.id)
        .attr_nonempty("image", &worker.image)
        .attr_nonempty("portrait", &worker.portrait);
    if worker.stats.is_none() && worker.jobs.is_empty() {
        out.close_empty();
        return;
    }
    out.close_start();
    if let Some(stats) = &worker.stats {
        out.open(indent + 1, "stats")
            .attr("hp", stats.hit_points)
            .attr("max", stats.max_hit_points)
            .attr("str", stats.strength)
            .attr("dex", stats.dexterity)
            .attr("con", stats.constitution)
            .attr("int", stats.intelligence)
            .attr("wis", stats.wisdom)
            .attr("cha", stats.charisma)
            .close_empty();
    }
    for job in &worker.jobs {
        out.open(indent + 1, "job")
            .attr("name", &job.name)
            .attr("level", job.level);
        if job.skills.is_empty() {
            out.close_empty();
            continue;
        }
        out.close_start();
        for skill in &job.skills {
            out.open(indent + 2, "skill")
                .attr("name", &skill.name)
                .attr("level", skill.level)
                .attr("hours", skill.hours)
                .close_empty();
        }
        out.end(indent + 1, "job");
    }
    out.end(indent, "worker");
}

impl ElementReader<UnitMember> for WorkerReader {
    fn supported_tags(&self) -> &'static [&'static str] {
        WORKER_TAGS
    }

    fn can_write(&self, obj: &UnitMember) -> bool {
        matches!(obj, UnitMember::Worker(_))
    }

    fn read(
        &self,
        element: &StartElement,
        parent: &str,
        stream: &mut EventStream,
        session: &mut ReadSession,
    ) -> Result<UnitMember, MapReadError> {
        expect_tag(element, parent, WORKER_TAGS)?;
        read_worker(element, stream, session).map(UnitMember::Worker)
    }

    fn write(&self, out: &mut XmlWriter, obj: &UnitMember, indent: usize) {
        if let UnitMember::Worker(worker) = obj {
            write_worker(out, worker, indent);
        }
    }
}

enum Equipment {
    Implement(Implement),
    Resource(ResourcePile),
}

fn read_equipment(
    element: &StartElement,
    parent: &str,
    stream: &mut EventStream,
    session: &mut ReadSession,
) -> Result<Equipment, MapReadError> {
    expect_tag(element, parent, EQUIPMENT_TAGS)?;
    let equipment = if element.tag() == "implement" {
        Equipment::Implement(Implement {
            kind: get_required(element, "kind")?,
            count: get_integer_or(element, "count", 1)?,
            id: session.next_id(element)?,
            image: get_image(element),
        })
    } else {
        Equipment::Resource(ResourcePile {
            kind: get_required(element, "kind")?,
            contents: get_required(element, "contents")?,
            quantity: get_integer(element, "quantity")?,
            units: get_optional(element, "unit", ""),
            created: get_integer_or(element, "created", -1)?,
            id: session.next_id(element)?,
            image: get_image(element),
        })
    };
    spin_to_end(element, stream, session)?;
    Ok(equipment)
}

fn write_implement(out: &mut XmlWriter, implement: &Implement, indent: usize) {
    out.open(indent, "implement")
        .attr("kind", &implement.kind)
        .attr_if(implement.count != 1, "count", implement.count)
        .attr("id", implement.id)
        .attr_nonempty("image", &implement.image)
        .close_empty();
}

fn write_resource(out: &mut XmlWriter, pile: &ResourcePile, indent: usize) {
    out.open(indent, "resource")
        .attr("kind", &pile.kind)
        .attr("contents", &pile.contents)
        .attr("quantity", pile.quantity)
        .attr_nonempty("unit", &pile.units)
        .attr_if(pile.created != -1, "created", pile.created)
        .attr("id", pile.id)
        .attr_nonempty("image", &pile.image)
        .close_empty();
}

impl ElementReader<UnitMember> for EquipmentReader {
    fn supported_tags(&self) -> &'static [&'static str] {
        EQUIPMENT_TAGS
    }

    fn can_write(&self, obj: &UnitMember) -> bool {
        matches!(obj, UnitMember::Implement(_) | UnitMember::Resource(_))
    }

    fn read(
        &self,
        element: &StartElement,
        parent: &str,
        stream: &mut EventStream,
        session: &mut ReadSession,
    ) -> Result<UnitMember, MapReadError> {
        Ok(match read_equipment(element, parent, stream, session)? {
            Equipment::Implement(implement) => UnitMember::Implement(implement),
            Equipment::Resource(pile) => UnitMember::Resource(pile),
        })
    }

    fn write(&self, out: &mut XmlWriter, obj: &UnitMember, indent: usize) {
        match obj {
            UnitMember::Implement(implement) => write_implement(out, implement, indent),
            UnitMember::Resource(pile) => write_resource(out, pile, indent),
            _ => {}
        }
    }
}

impl ElementReader<FortressMember> for EquipmentReader {
    fn supported_tags(&self) -> &'static [&'static str] {
        EQUIPMENT_TAGS
    }

    fn can_write(&self, obj: &FortressMember) -> bool {
        matches!(
            obj,
            FortressMember::Implement(_) | FortressMember::Resource(_)
        )
    }

    fn read(
        &self,
        element: &StartElement,
        parent: &str,
        stream: &mut EventStream,
        session: &mut ReadSession,
    ) -> Result<FortressMember, MapReadError> {
        Ok(match read_equipment(element, parent, stream, session)? {
            Equipment::Implement(implement) => FortressMember::Implement(implement),
            Equipment::Resource(pile) => FortressMember::Resource(pile),
        })
    }

    fn write(&self, out: &mut XmlWriter, obj: &FortressMember, indent: usize) {
        match obj {
            FortressMember::Implement(implement) => write_implement(out, implement, indent),
            FortressMember::Resource(pile) => write_resource(out, pile, indent),
            _ => {}
        }
    }
}
