use sp_core::{MapReadError, Player};
use sp_parser::{EventStream, StartElement};

use crate::attrs::{
    expect_tag, get_attribute, get_bool_or, get_integer, get_portrait, get_recommended,
    spin_to_end,
};
use crate::reader::{ElementReader, ReadSession};
use crate::writer::XmlWriter;

const PLAYER_TAGS: &[&str] = &["player"];

pub struct PlayerReader;

impl ElementReader<Player> for PlayerReader {
    fn supported_tags(&self) -> &'static [&'static str] {
        PLAYER_TAGS
    }

    fn can_write(&self, _obj: &Player) -> bool {
        true
    }

    fn read(
        &self,
        element: &StartElement,
        parent: &str,
        stream: &mut EventStream,
        session: &mut ReadSession,
    ) -> Result<Player, MapReadError> {
        expect_tag(element, parent, PLAYER_TAGS)?;
        let mut player = Player::new(
            get_integer(element, "number")?,
            get_recommended(element, "code_name", "", &mut session.warnings)?,
        );
        player.country = get_attribute(element, "country").map(str::to_string);
        player.portrait = get_portrait(element);
        player.current = get_bool_or(element, "current", false)?;
        spin_to_end(element, stream, session)?;
        Ok(player)
    }

    // The current player is recorded on the map element, not here.
    fn write(&self, out: &mut XmlWriter, obj: &Player, indent: usize) {
        let writer = out
            .open(indent, "player")
            .attr("number", obj.number)
            .attr("code_name", &obj.name);
        if let Some(country) = &obj.country {
            writer.attr("country", country);
        }
        writer.attr_nonempty("portrait", &obj.portrait).close_empty();
    }
}
