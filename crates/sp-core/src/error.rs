use serde::Serialize;
use thiserror::Error;

use crate::types::SourceLocation;

/// Every way a map document can be invalid or suspect.
///
/// Kinds for which [`FormatError::is_recoverable`] is true are routed through
/// the warning policy of the read; all others abort the read.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FormatError {
    #[error("<{tag}> at line {line} is missing required attribute \"{property}\"")]
    MissingRequiredProperty {
        tag: String,
        property: String,
        line: usize,
    },
    #[error("<{tag}> at line {line} is missing recommended attribute \"{property}\"")]
    MissingRecommendedProperty {
        tag: String,
        property: String,
        line: usize,
    },
    #[error("<{tag}> at line {line} uses deprecated attribute \"{old}\"; use \"{new}\" instead")]
    DeprecatedProperty {
        tag: String,
        old: String,
        new: String,
        line: usize,
    },
    #[error("<{child}> is not allowed inside <{parent}> (line {line})")]
    UnexpectedChild {
        parent: String,
        child: String,
        line: usize,
    },
    #[error("<{tag}> at line {line} is not supported yet")]
    UnsupportedTag { tag: String, line: usize },
    #[error("<{parent}> at line {line} requires at least one child element")]
    MissingRequiredChild { parent: String, line: usize },
    #[error("<{tag}> at line {line} has malformed value \"{value}\" for \"{property}\"")]
    MalformedValue {
        tag: String,
        property: String,
        value: String,
        line: usize,
    },
    #[error("map schema version {version} at line {line} is not supported")]
    UnsupportedSchemaVersion { version: String, line: usize },
    #[error("<{tag}> at line {line} reuses id {id}")]
    DuplicateId { tag: String, id: i32, line: usize },
    #[error("<{tag}> at line {line} contains unexpected text \"{text}\"")]
    UnwantedText {
        tag: String,
        text: String,
        line: usize,
    },
}

impl FormatError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequiredProperty { .. } => "SP_MISSING_ATTR",
            Self::MissingRecommendedProperty { .. } => "SP_MISSING_RECOMMENDED_ATTR",
            Self::DeprecatedProperty { .. } => "SP_DEPRECATED_ATTR",
            Self::UnexpectedChild { .. } => "SP_UNEXPECTED_CHILD",
            Self::UnsupportedTag { .. } => "SP_UNSUPPORTED_TAG",
            Self::MissingRequiredChild { .. } => "SP_MISSING_CHILD",
            Self::MalformedValue { .. } => "SP_MALFORMED_VALUE",
            Self::UnsupportedSchemaVersion { .. } => "SP_UNSUPPORTED_VERSION",
            Self::DuplicateId { .. } => "SP_DUPLICATE_ID",
            Self::UnwantedText { .. } => "SP_UNWANTED_TEXT",
        }
    }

    pub fn line(&self) -> usize {
        match self {
            Self::MissingRequiredProperty { line, .. }
            | Self::MissingRecommendedProperty { line, .. }
            | Self::DeprecatedProperty { line, .. }
            | Self::UnexpectedChild { line, .. }
            | Self::UnsupportedTag { line, .. }
            | Self::MissingRequiredChild { line, .. }
            | Self::MalformedValue { line, .. }
            | Self::UnsupportedSchemaVersion { line, .. }
            | Self::DuplicateId { line, .. }
            | Self::UnwantedText { line, .. } => *line,
        }
    }

    /// The element the problem was found on (the parent for child errors).
    pub fn tag(&self) -> &str {
        match self {
            Self::MissingRequiredProperty { tag, .. }
            | Self::MissingRecommendedProperty { tag, .. }
            | Self::DeprecatedProperty { tag, .. }
            | Self::UnsupportedTag { tag, .. }
            | Self::MalformedValue { tag, .. }
            | Self::DuplicateId { tag, .. }
            | Self::UnwantedText { tag, .. } => tag,
            Self::UnexpectedChild { parent, .. } | Self::MissingRequiredChild { parent, .. } => {
                parent
            }
            Self::UnsupportedSchemaVersion { .. } => "map",
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MissingRecommendedProperty { .. }
                | Self::DeprecatedProperty { .. }
                | Self::UnsupportedTag { .. }
                | Self::DuplicateId { .. }
                | Self::UnwantedText { .. }
        )
    }
}

/// The three disjoint ways a read can fail, as seen by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCategory {
    Malformed,
    Io,
    UnsupportedVersion,
}

#[derive(Debug, Error)]
pub enum MapReadError {
    #[error("{0}")]
    Format(FormatError),
    #[error("warning treated as error: {0}")]
    Escalated(FormatError),
    #[error("XML syntax error at line {}: {message}", location.line)]
    Syntax {
        message: String,
        location: SourceLocation,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MapReadError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Format(error) | Self::Escalated(error) => error.code(),
            Self::Syntax { .. } => "SP_XML_SYNTAX",
            Self::Io(_) => "SP_IO",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Format(FormatError::UnsupportedSchemaVersion { .. }) => {
                ErrorCategory::UnsupportedVersion
            }
            Self::Format(_) | Self::Escalated(_) | Self::Syntax { .. } => ErrorCategory::Malformed,
            Self::Io(_) => ErrorCategory::Io,
        }
    }

    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            Self::Format(error) | Self::Escalated(error) => Some(error),
            Self::Syntax { .. } | Self::Io(_) => None,
        }
    }

    pub fn is_escalated(&self) -> bool {
        matches!(self, Self::Escalated(_))
    }
}

impl From<FormatError> for MapReadError {
    fn from(error: FormatError) -> Self {
        Self::Format(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_rows() -> FormatError {
        FormatError::MissingRequiredProperty {
            tag: "map".to_string(),
            property: "rows".to_string(),
            line: 1,
        }
    }

    #[test]
    fn only_warning_kinds_are_recoverable() {
        assert!(!missing_rows().is_recoverable());
        assert!(FormatError::UnsupportedTag {
            tag: "future".to_string(),
            line: 3,
        }
        .is_recoverable());
        assert!(!FormatError::UnsupportedSchemaVersion {
            version: "1".to_string(),
            line: 1,
        }
        .is_recoverable());
    }

    #[test]
    fn child_errors_report_the_parent_tag() {
        let error = FormatError::UnexpectedChild {
            parent: "tile".to_string(),
            child: "map".to_string(),
            line: 4,
        };
        assert_eq!(error.tag(), "tile");
        assert_eq!(error.line(), 4);
        assert_eq!(error.code(), "SP_UNEXPECTED_CHILD");
    }

    #[test]
    fn categories_are_disjoint() {
        let version = MapReadError::Format(FormatError::UnsupportedSchemaVersion {
            version: "7".to_string(),
            line: 1,
        });
        assert_eq!(version.category(), ErrorCategory::UnsupportedVersion);
        assert_eq!(
            MapReadError::Format(missing_rows()).category(),
            ErrorCategory::Malformed
        );
        assert_eq!(
            MapReadError::Escalated(missing_rows()).category(),
            ErrorCategory::Malformed
        );
        assert_eq!(
            MapReadError::from(std::io::Error::other("disk")).category(),
            ErrorCategory::Io
        );
    }

    #[test]
    fn escalated_errors_keep_the_original_code() {
        let error = MapReadError::Escalated(FormatError::DuplicateId {
            tag: "animal".to_string(),
            id: 5,
            line: 9,
        });
        assert!(error.is_escalated());
        assert_eq!(error.code(), "SP_DUPLICATE_ID");
        assert!(error.to_string().starts_with("warning treated as error"));
    }

    #[test]
    fn format_errors_serialize_with_kind_tag() {
        let json = serde_json::to_value(missing_rows()).expect("serialize");
        assert_eq!(json["kind"], "missingRequiredProperty");
        assert_eq!(json["property"], "rows");
    }
}
