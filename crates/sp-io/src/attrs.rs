use sp_core::{FormatError, MapReadError};
use sp_parser::{EventStream, StartElement, TagEvent, SP_NAMESPACE};

use crate::reader::ReadSession;
use crate::warning::Warnings;

/// Tags reserved for features that later schema revisions will add. They are
/// skipped with a warning instead of failing the read.
pub const FUTURE_TAGS: &[&str] = &["future", "explorer", "building", "road"];

pub fn is_future_tag(tag: &str) -> bool {
    FUTURE_TAGS.contains(&tag)
}

/// Looks `name` up in the map namespace first, then among unprefixed
/// attributes. Attributes in any other namespace are invisible.
pub fn get_attribute<'a>(element: &'a StartElement, name: &str) -> Option<&'a str> {
    let mut unprefixed = None;
    for attribute in &element.attributes {
        if attribute.name != name {
            continue;
        }
        match attribute.namespace.as_deref() {
            Some(SP_NAMESPACE) => return Some(attribute.value.as_str()),
            None | Some("") if unprefixed.is_none() => unprefixed = Some(attribute.value.as_str()),
            _ => {}
        }
    }
    unprefixed
}

pub fn has_attribute(element: &StartElement, name: &str) -> bool {
    get_attribute(element, name).is_some()
}

pub fn get_required(element: &StartElement, name: &str) -> Result<String, MapReadError> {
    match get_attribute(element, name) {
        Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
        _ => Err(missing_required(element, name).into()),
    }
}

pub fn get_optional(element: &StartElement, name: &str, default: &str) -> String {
    get_attribute(element, name).unwrap_or(default).to_string()
}

/// Like [`get_optional`], but a missing value is reported first.
pub fn get_recommended(
    element: &StartElement,
    name: &str,
    default: &str,
    warnings: &mut Warnings,
) -> Result<String, MapReadError> {
    if let Some(value) = get_attribute(element, name) {
        return Ok(value.to_string());
    }
    warnings.report(missing_recommended(element, name))?;
    Ok(default.to_string())
}

/// Reads `preferred`, accepting `deprecated` with a warning when only the old
/// spelling is present. `Ok(None)` when neither is there.
pub fn get_optional_with_deprecated(
    element: &StartElement,
    preferred: &str,
    deprecated: &str,
    warnings: &mut Warnings,
) -> Result<Option<String>, MapReadError> {
    if let Some(value) = get_attribute(element, preferred) {
        return Ok(Some(value.to_string()));
    }
    let Some(value) = get_attribute(element, deprecated) else {
        return Ok(None);
    };
    warnings.report(FormatError::DeprecatedProperty {
        tag: element.tag().to_string(),
        old: deprecated.to_string(),
        new: preferred.to_string(),
        line: element.line(),
    })?;
    Ok(Some(value.to_string()))
}

pub fn get_with_deprecated(
    element: &StartElement,
    preferred: &str,
    deprecated: &str,
    warnings: &mut Warnings,
) -> Result<String, MapReadError> {
    match get_optional_with_deprecated(element, preferred, deprecated, warnings)? {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(missing_required(element, preferred).into()),
    }
}

pub fn parse_integer(element: &StartElement, name: &str, raw: &str) -> Result<i32, MapReadError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| malformed(element, name, raw).into())
}

pub fn get_integer(element: &StartElement, name: &str) -> Result<i32, MapReadError> {
    let raw = get_required(element, name)?;
    parse_integer(element, name, &raw)
}

pub fn get_integer_or(
    element: &StartElement,
    name: &str,
    default: i32,
) -> Result<i32, MapReadError> {
    match get_attribute(element, name) {
        Some(raw) => parse_integer(element, name, raw),
        None => Ok(default),
    }
}

pub fn parse_bool(element: &StartElement, name: &str, raw: &str) -> Result<bool, MapReadError> {
    match raw.trim() {
        value if value.eq_ignore_ascii_case("true") => Ok(true),
        value if value.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(malformed(element, name, raw).into()),
    }
}

pub fn get_bool(element: &StartElement, name: &str) -> Result<bool, MapReadError> {
    let raw = get_required(element, name)?;
    parse_bool(element, name, &raw)
}

pub fn get_bool_or(element: &StartElement, name: &str, default: bool) -> Result<bool, MapReadError> {
    match get_attribute(element, name) {
        Some(raw) => parse_bool(element, name, raw),
        None => Ok(default),
    }
}

/// Parses one of the closed wire vocabularies (`TownSize::parse`, ...).
pub fn parse_wire<T>(
    element: &StartElement,
    name: &str,
    raw: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, MapReadError> {
    parse(raw).ok_or_else(|| malformed(element, name, raw).into())
}

pub fn get_image(element: &StartElement) -> String {
    get_optional(element, "image", "")
}

pub fn get_portrait(element: &StartElement) -> String {
    get_optional(element, "portrait", "")
}

pub fn missing_required(element: &StartElement, property: &str) -> FormatError {
    FormatError::MissingRequiredProperty {
        tag: element.tag().to_string(),
        property: property.to_string(),
        line: element.line(),
    }
}

pub fn missing_recommended(element: &StartElement, property: &str) -> FormatError {
    FormatError::MissingRecommendedProperty {
        tag: element.tag().to_string(),
        property: property.to_string(),
        line: element.line(),
    }
}

pub fn malformed(element: &StartElement, property: &str, raw: &str) -> FormatError {
    FormatError::MalformedValue {
        tag: element.tag().to_string(),
        property: property.to_string(),
        value: raw.to_string(),
        line: element.line(),
    }
}

pub fn unexpected_child(parent: &str, child: &StartElement) -> FormatError {
    FormatError::UnexpectedChild {
        parent: parent.to_string(),
        child: child.tag().to_string(),
        line: child.line(),
    }
}

pub fn unexpected_eof(element: &StartElement) -> MapReadError {
    MapReadError::Syntax {
        message: format!("document ended inside <{}>", element.tag()),
        location: element.location,
    }
}

/// Fails with UnexpectedChild unless `element` is in the map namespace and
/// named by `supported`.
pub fn expect_tag(
    element: &StartElement,
    parent: &str,
    supported: &[&str],
) -> Result<(), MapReadError> {
    if element.name.is_map_namespace() && supported.contains(&element.tag()) {
        return Ok(());
    }
    Err(unexpected_child(parent, element).into())
}

/// Consumes the rest of a leaf element. Nested elements are errors; stray
/// text is reported and queued on the session as free text.
pub fn spin_to_end(
    element: &StartElement,
    stream: &mut EventStream,
    session: &mut ReadSession,
) -> Result<(), MapReadError> {
    for event in stream.by_ref() {
        match event {
            TagEvent::Start(child) => return Err(unexpected_child(element.tag(), &child).into()),
            TagEvent::End { .. } => return Ok(()),
            TagEvent::Text { value, location } => {
                report_stray_text(element, &value, location.line, session)?;
            }
        }
    }
    Err(unexpected_eof(element))
}

/// Reports non-blank text found where only elements belong and queues it for
/// the enclosing tile.
pub fn report_stray_text(
    element: &StartElement,
    value: &str,
    line: usize,
    session: &mut ReadSession,
) -> Result<(), MapReadError> {
    let text = value.trim();
    if text.is_empty() {
        return Ok(());
    }
    session.warnings.report(FormatError::UnwantedText {
        tag: element.tag().to_string(),
        text: text.to_string(),
        line,
    })?;
    session.queue_stray_text(text);
    Ok(())
}

/// Collects the text of an element that may contain nothing but text.
pub fn read_text_content(
    element: &StartElement,
    stream: &mut EventStream,
) -> Result<String, MapReadError> {
    let mut content = String::new();
    for event in stream.by_ref() {
        match event {
            TagEvent::Start(child) => return Err(unexpected_child(element.tag(), &child).into()),
            TagEvent::End { .. } => return Ok(content.trim().to_string()),
            TagEvent::Text { value, .. } => content.push_str(&value),
        }
    }
    Err(unexpected_eof(element))
}

/// Discards an element and everything inside it.
pub fn skip_element(element: &StartElement, stream: &mut EventStream) -> Result<(), MapReadError> {
    let mut depth = 0usize;
    for event in stream.by_ref() {
        match event {
            TagEvent::Start(_) => depth += 1,
            TagEvent::End { .. } if depth == 0 => return Ok(()),
            TagEvent::End { .. } => depth -= 1,
            TagEvent::Text { .. } => {}
        }
    }
    Err(unexpected_eof(element))
}

/// Skips a future or foreign element after routing the problem through the
/// policy.
pub fn skip_unsupported(
    element: &StartElement,
    stream: &mut EventStream,
    warnings: &mut Warnings,
) -> Result<(), MapReadError> {
    warnings.report(FormatError::UnsupportedTag {
        tag: element.tag().to_string(),
        line: element.line(),
    })?;
    skip_element(element, stream)
}

/// True for elements the dispatcher should skip rather than reject.
pub fn is_skippable(element: &StartElement) -> bool {
    !element.name.is_map_namespace() || is_future_tag(element.tag())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warning::WarningPolicy;
    use sp_core::SourceLocation;
    use sp_parser::{parse_event_stream, QName, XmlAttribute};

    fn element(tag: &str, attributes: &[(Option<&str>, &str, &str)]) -> StartElement {
        StartElement {
            name: QName::local(tag),
            attributes: attributes
                .iter()
                .map(|(namespace, name, value)| XmlAttribute {
                    namespace: namespace.map(str::to_string),
                    name: (*name).to_string(),
                    value: (*value).to_string(),
                })
                .collect(),
            location: SourceLocation { line: 4, column: 1 },
        }
    }

    fn open(source: &str) -> (StartElement, EventStream) {
        let mut stream = parse_event_stream(source).expect("xml should parse");
        match stream.next() {
            Some(TagEvent::Start(start)) => (start, stream),
            other => panic!("expected start event, got {other:?}"),
        }
    }

    #[test]
    fn namespace_match_wins_over_unprefixed() {
        let tag = element(
            "tile",
            &[
                (None, "kind", "plains"),
                (Some(SP_NAMESPACE), "kind", "desert"),
                (Some("urn:other"), "row", "9"),
            ],
        );
        assert_eq!(get_attribute(&tag, "kind"), Some("desert"));
        assert_eq!(get_attribute(&tag, "row"), None);
    }

    #[test]
    fn required_rejects_absent_and_blank_values() {
        let tag = element("map", &[(None, "rows", "  ")]);
        let error = get_required(&tag, "rows").expect_err("blank");
        assert_eq!(
            error.format_error(),
            Some(&FormatError::MissingRequiredProperty {
                tag: "map".to_string(),
                property: "rows".to_string(),
                line: 4,
            })
        );
        assert!(get_required(&tag, "columns").is_err());
    }

    #[test]
    fn recommended_falls_back_with_advisory() {
        let tag = element("unit", &[]);
        let mut warnings = Warnings::new(WarningPolicy::Warn);
        let name = get_recommended(&tag, "name", "", &mut warnings).expect("lenient");
        assert_eq!(name, "");
        assert_eq!(warnings.advisories()[0].code(), "SP_MISSING_RECOMMENDED_ATTR");

        let mut strict = Warnings::new(WarningPolicy::Die);
        assert!(get_recommended(&tag, "name", "", &mut strict).is_err());
    }

    #[test]
    fn deprecated_alias_is_used_with_warning() {
        let tag = element("mine", &[(None, "product", "gold")]);
        let mut warnings = Warnings::new(WarningPolicy::Warn);
        let kind = get_with_deprecated(&tag, "kind", "product", &mut warnings).expect("alias");
        assert_eq!(kind, "gold");
        assert!(matches!(
            warnings.advisories(),
            [FormatError::DeprecatedProperty { old, new, .. }] if old == "product" && new == "kind"
        ));
    }

    #[test]
    fn preferred_name_needs_no_warning() {
        let tag = element("mine", &[(None, "kind", "gold"), (None, "product", "iron")]);
        let mut warnings = Warnings::new(WarningPolicy::Die);
        let kind = get_with_deprecated(&tag, "kind", "product", &mut warnings).expect("preferred");
        assert_eq!(kind, "gold");
    }

    #[test]
    fn neither_spelling_is_missing_required() {
        let tag = element("mine", &[]);
        let mut warnings = Warnings::new(WarningPolicy::Ignore);
        let error = get_with_deprecated(&tag, "kind", "product", &mut warnings).expect_err("none");
        assert_eq!(error.code(), "SP_MISSING_ATTR");
    }

    #[test]
    fn numbers_and_booleans_report_malformed_values() {
        let tag = element("tile", &[(None, "row", "two"), (None, "rows", "maybe")]);
        assert_eq!(get_integer(&tag, "row").expect_err("nan").code(), "SP_MALFORMED_VALUE");
        assert_eq!(get_integer_or(&tag, "column", 7).expect("default"), 7);
        assert_eq!(get_bool_or(&tag, "rows", false).expect_err("bad").code(), "SP_MALFORMED_VALUE");
        let good = element("forest", &[(None, "rows", "TRUE")]);
        assert!(get_bool(&good, "rows").expect("bool"));
    }

    #[test]
    fn spin_to_end_rejects_nested_elements() {
        let (start, mut stream) = open("<hill id=\"1\"><hill/></hill>");
        let mut session = ReadSession::new(WarningPolicy::Warn);
        let error = spin_to_end(&start, &mut stream, &mut session).expect_err("nested");
        assert_eq!(error.code(), "SP_UNEXPECTED_CHILD");
    }

    #[test]
    fn spin_to_end_queues_stray_text() {
        let (start, mut stream) = open("<hill id=\"1\">  a note </hill>");
        let mut session = ReadSession::new(WarningPolicy::Warn);
        spin_to_end(&start, &mut stream, &mut session).expect("lenient");
        assert_eq!(session.take_stray_text(), vec!["a note".to_string()]);
        assert_eq!(session.warnings.advisories()[0].code(), "SP_UNWANTED_TEXT");
    }

    #[test]
    fn skip_element_consumes_nested_content() {
        let (start, mut stream) = open("<future><a><b/></a>text</future>");
        skip_element(&start, &mut stream).expect("skip");
        assert!(stream.next().is_none());
    }

    #[test]
    fn expect_tag_checks_namespace_and_name() {
        let tile = element("tile", &[]);
        expect_tag(&tile, "row", &["tile"]).expect("supported");
        assert!(expect_tag(&tile, "row", &["player"]).is_err());
        let foreign = StartElement {
            name: QName {
                namespace: Some("urn:other".to_string()),
                local: "tile".to_string(),
            },
            ..tile
        };
        assert!(expect_tag(&foreign, "row", &["tile"]).is_err());
        assert!(is_skippable(&foreign));
    }
}
