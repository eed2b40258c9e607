use sp_core::{MapReadError, PlayerCollection, TextNote};
use sp_parser::{EventStream, StartElement};

use crate::ids::IdRegistry;
use crate::warning::{WarningPolicy, Warnings};
use crate::writer::XmlWriter;

/// Per-document state shared by every element reader during one read.
#[derive(Debug, Default)]
pub struct ReadSession {
    pub warnings: Warnings,
    pub ids: IdRegistry,
    pub players: PlayerCollection,
    stray_text: Vec<String>,
    loose_notes: Vec<TextNote>,
}

impl ReadSession {
    pub fn new(policy: WarningPolicy) -> Self {
        Self {
            warnings: Warnings::new(policy),
            ..Self::default()
        }
    }

    pub fn queue_stray_text(&mut self, text: impl Into<String>) {
        self.stray_text.push(text.into());
    }

    /// Drains text found inside elements that do not take text, for the
    /// enclosing tile to keep as notes.
    pub fn take_stray_text(&mut self) -> Vec<String> {
        std::mem::take(&mut self.stray_text)
    }

    /// Moves queued text that no tile will take into the document's loose
    /// notes.
    pub fn keep_loose_text(&mut self) {
        let texts = self.take_stray_text();
        self.loose_notes
            .extend(texts.into_iter().map(|text| TextNote::new(-1, text)));
    }

    pub fn take_loose_notes(&mut self) -> Vec<TextNote> {
        self.keep_loose_text();
        std::mem::take(&mut self.loose_notes)
    }

    pub fn next_id(&mut self, element: &StartElement) -> Result<i32, MapReadError> {
        self.ids.get_or_generate(&mut self.warnings, element)
    }
}

/// Reads and writes one family of elements producing or consuming `T`.
///
/// `read` is handed the start event of an element it supports and must
/// consume everything up to and including the matching end event.
pub trait ElementReader<T>: Sync {
    fn supported_tags(&self) -> &'static [&'static str];

    fn supports(&self, tag: &str) -> bool {
        self.supported_tags().contains(&tag)
    }

    fn can_write(&self, obj: &T) -> bool;

    fn read(
        &self,
        element: &StartElement,
        parent: &str,
        stream: &mut EventStream,
        session: &mut ReadSession,
    ) -> Result<T, MapReadError>;

    fn write(&self, out: &mut XmlWriter, obj: &T, indent: usize);
}
