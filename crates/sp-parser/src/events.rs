use roxmltree::{Document, Node, NodeType};
use sp_core::{MapReadError, SourceLocation};

/// Namespace the map dialect's elements and attributes may be declared in.
pub const SP_NAMESPACE: &str = "https://github.com/kingjon3377/strategicprimer-viewer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QName {
    pub namespace: Option<String>,
    pub local: String,
}

impl QName {
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local: local.into(),
        }
    }

    /// True for unqualified names and names in [`SP_NAMESPACE`].
    pub fn is_map_namespace(&self) -> bool {
        match self.namespace.as_deref() {
            None | Some("") => true,
            Some(namespace) => namespace == SP_NAMESPACE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    pub namespace: Option<String>,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartElement {
    pub name: QName,
    pub attributes: Vec<XmlAttribute>,
    pub location: SourceLocation,
}

impl StartElement {
    pub fn tag(&self) -> &str {
        &self.name.local
    }

    pub fn line(&self) -> usize {
        self.location.line
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    Start(StartElement),
    End {
        name: QName,
        location: SourceLocation,
    },
    Text {
        value: String,
        location: SourceLocation,
    },
}

/// Forward-only sequence of tag events over an already buffered document.
#[derive(Debug)]
pub struct EventStream {
    events: std::vec::IntoIter<TagEvent>,
}

impl EventStream {
    pub fn from_events(events: Vec<TagEvent>) -> Self {
        Self {
            events: events.into_iter(),
        }
    }

    /// Events not yet consumed, without consuming them.
    pub fn remaining(&self) -> &[TagEvent] {
        self.events.as_slice()
    }
}

impl Iterator for EventStream {
    type Item = TagEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.events.next()
    }
}

pub fn parse_event_stream(source: &str) -> Result<EventStream, MapReadError> {
    let document = Document::parse(source).map_err(|error| {
        let pos = error.pos();
        MapReadError::Syntax {
            message: error.to_string(),
            location: SourceLocation {
                line: pos.row as usize,
                column: pos.col as usize,
            },
        }
    })?;

    let Some(root) = document.root().children().find(|node| node.is_element()) else {
        return Err(MapReadError::Syntax {
            message: "XML document must contain a root element.".to_string(),
            location: SourceLocation::synthetic(),
        });
    };

    let mut events = Vec::new();
    flatten_element(&document, root, &mut events);
    Ok(EventStream::from_events(events))
}

fn flatten_element(document: &Document<'_>, node: Node<'_, '_>, out: &mut Vec<TagEvent>) {
    let name = qualified_name(node);
    let attributes = node
        .attributes()
        .map(|attribute| XmlAttribute {
            namespace: attribute.namespace().map(str::to_string),
            name: attribute.name().to_string(),
            value: attribute.value().to_string(),
        })
        .collect();

    out.push(TagEvent::Start(StartElement {
        name: name.clone(),
        attributes,
        location: location_at(document, node.range().start),
    }));

    for child in node.children() {
        match child.node_type() {
            NodeType::Element => flatten_element(document, child, out),
            NodeType::Text => {
                let value = child.text().unwrap_or_default();
                if value.is_empty() {
                    continue;
                }
                out.push(TagEvent::Text {
                    value: value.to_string(),
                    location: location_at(document, child.range().start),
                });
            }
            _ => {}
        }
    }

    out.push(TagEvent::End {
        name,
        location: location_at(document, node.range().end),
    });
}

fn qualified_name(node: Node<'_, '_>) -> QName {
    let tag = node.tag_name();
    QName {
        namespace: tag.namespace().map(str::to_string),
        local: tag.name().to_string(),
    }
}

fn location_at(document: &Document<'_>, offset: usize) -> SourceLocation {
    let pos = document.text_pos_at(offset);
    SourceLocation {
        line: pos.row as usize,
        column: pos.col as usize,
    }
}
