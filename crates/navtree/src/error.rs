//! Error types for building and querying navigation trees

use thiserror::Error;

use crate::path::NavPath;

/// Main error type for navigation tree construction.
///
/// Every variant is raised while a declaration is being parsed or
/// validated. A tree that produced one of these must not be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// Node object carries a `type` other than `category` or `link`
    #[error("unknown node kind `{kind}` at {path}")]
    UnknownNodeKind {
        /// The offending discriminator
        kind: String,
        /// Location of the node
        path: NavPath,
    },

    /// Category link carries a `type` other than `doc` or `generated-index`
    #[error("unknown link kind `{kind}` at {path}")]
    UnknownLinkKind {
        /// The offending discriminator
        kind: String,
        /// Location of the owning category
        path: NavPath,
    },

    /// A required field is absent
    #[error("missing field `{field}` at {path}")]
    MissingField {
        /// Field name as written in the declaration
        field: &'static str,
        /// Location of the object missing it
        path: NavPath,
    },

    /// A value has the wrong JSON shape
    #[error("expected {expected} at {path}, found {found}")]
    InvalidShape {
        /// What the declaration format requires here
        expected: &'static str,
        /// What was actually found
        found: &'static str,
        /// Location of the value
        path: NavPath,
    },

    /// An object of the right shape holds a field of the wrong kind or an
    /// unknown field
    #[error("invalid entry at {path}: {reason}")]
    InvalidEntry {
        /// What the deserializer rejected
        reason: String,
        /// Location of the entry
        path: NavPath,
    },

    /// Category label is empty or whitespace-only
    #[error("empty category label at {path}")]
    EmptyLabel {
        /// Location of the category
        path: NavPath,
    },

    /// A document identifier appears more than once among document references
    #[error(
        "document `{id}` declared twice: first at {first} {first_position:?}, \
         again at {second} {second_position:?}"
    )]
    DuplicateDocumentId {
        /// The repeated identifier
        id: String,
        /// Where it was first declared
        first: NavPath,
        /// Child indices of the first declaration
        first_position: Vec<usize>,
        /// Where it was declared again
        second: NavPath,
        /// Child indices of the second declaration
        second_position: Vec<usize>,
    },

    /// A category's doc link points at no known document
    #[error("link target `{id}` of category at {path} does not resolve to any document")]
    DanglingLinkTarget {
        /// The unresolved identifier
        id: String,
        /// Location of the linking category
        path: NavPath,
    },

    /// Cross-sidebar uniqueness was requested and a document appears in two sidebars
    #[error("document `{id}` appears in sidebar `{first}` and again in sidebar `{second}`")]
    DuplicateAcrossSidebars {
        /// The repeated identifier
        id: String,
        /// Sidebar that declared it first
        first: String,
        /// Sidebar that declared it again
        second: String,
    },

    /// An error raised inside one named sidebar of a set
    #[error("in sidebar `{name}`: {source}")]
    InSidebar {
        /// Sidebar name
        name: String,
        /// The underlying error
        source: Box<NavError>,
    },

    /// Declaration text is not valid JSON
    #[error("invalid declaration JSON: {0}")]
    Json(String),
}

/// Fieldless discriminant of [`NavError`], for matching without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`NavError::UnknownNodeKind`]
    UnknownNodeKind,
    /// See [`NavError::UnknownLinkKind`]
    UnknownLinkKind,
    /// See [`NavError::MissingField`]
    MissingField,
    /// See [`NavError::InvalidShape`]
    InvalidShape,
    /// See [`NavError::InvalidEntry`]
    InvalidEntry,
    /// See [`NavError::EmptyLabel`]
    EmptyLabel,
    /// See [`NavError::DuplicateDocumentId`]
    DuplicateDocumentId,
    /// See [`NavError::DanglingLinkTarget`]
    DanglingLinkTarget,
    /// See [`NavError::DuplicateAcrossSidebars`]
    DuplicateAcrossSidebars,
    /// See [`NavError::Json`]
    Json,
}

impl NavError {
    /// The kind of failure. Errors wrapped by [`NavError::InSidebar`]
    /// report the kind of the inner error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NavError::UnknownNodeKind { .. } => ErrorKind::UnknownNodeKind,
            NavError::UnknownLinkKind { .. } => ErrorKind::UnknownLinkKind,
            NavError::MissingField { .. } => ErrorKind::MissingField,
            NavError::InvalidShape { .. } => ErrorKind::InvalidShape,
            NavError::InvalidEntry { .. } => ErrorKind::InvalidEntry,
            NavError::EmptyLabel { .. } => ErrorKind::EmptyLabel,
            NavError::DuplicateDocumentId { .. } => ErrorKind::DuplicateDocumentId,
            NavError::DanglingLinkTarget { .. } => ErrorKind::DanglingLinkTarget,
            NavError::DuplicateAcrossSidebars { .. } => ErrorKind::DuplicateAcrossSidebars,
            NavError::InSidebar { source, .. } => source.kind(),
            NavError::Json(_) => ErrorKind::Json,
        }
    }

    /// Structural path of the offending node, when the error has one.
    ///
    /// For a duplicate this is the second (conflicting) declaration.
    pub fn path(&self) -> Option<&NavPath> {
        match self {
            NavError::UnknownNodeKind { path, .. }
            | NavError::UnknownLinkKind { path, .. }
            | NavError::MissingField { path, .. }
            | NavError::InvalidShape { path, .. }
            | NavError::InvalidEntry { path, .. }
            | NavError::EmptyLabel { path }
            | NavError::DanglingLinkTarget { path, .. } => Some(path),
            NavError::DuplicateDocumentId { second, .. } => Some(second),
            NavError::InSidebar { source, .. } => source.path(),
            NavError::DuplicateAcrossSidebars { .. } | NavError::Json(_) => None,
        }
    }

    pub(crate) fn in_sidebar(self, name: &str) -> Self {
        NavError::InSidebar {
            name: name.to_string(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for NavError {
    fn from(err: serde_json::Error) -> Self {
        NavError::Json(err.to_string())
    }
}

/// A lookup found nothing.
///
/// This is an ordinary outcome, kept apart from [`NavError`] so callers
/// never confuse a miss with a broken declaration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no document `{id}` in navigation")]
pub struct NotFound {
    /// The identifier that was looked up
    pub id: String,
}

impl NotFound {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Result type alias for navigation tree operations
pub type Result<T> = std::result::Result<T, NavError>;

/// JSON type name of a value, used in shape errors.
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
