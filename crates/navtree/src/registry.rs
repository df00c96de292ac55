//! Well-known type names and their documentation metadata

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::error::{json_type_name, NavError, Result};
use crate::path::{NavPath, Segment};

/// Documentation metadata for a type name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeMeta {
    /// Anchor link to the type's documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Display class for rendering the type name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl TypeMeta {
    /// Metadata with a documentation link.
    pub fn linked(link: impl Into<String>) -> Self {
        Self {
            link: Some(link.into()),
            class: None,
        }
    }

    /// Set the display class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

/// One type name out of a comma-joined type list, with its metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeLabel<'a> {
    /// The trimmed type name
    pub name: &'a str,
    /// Registered metadata, if any
    pub meta: Option<&'a TypeMeta>,
}

/// Flat mapping from type names to [`TypeMeta`].
///
/// Lookups are exact-key only. Registering a key again replaces the
/// earlier metadata (last write wins). Registration takes `&mut self`,
/// so concurrent population must go through a single owner, which keeps
/// the outcome deterministic.
///
/// # Example
///
/// ```
/// use navtree::{LabelRegistry, TypeMeta};
///
/// let mut registry = LabelRegistry::new();
/// registry.register("vector", TypeMeta::linked("/docs/basics#vector"));
/// registry.register("vector", TypeMeta::linked("/docs/advanced#vector"));
///
/// assert_eq!(
///     registry.lookup("vector").and_then(|m| m.link.as_deref()),
///     Some("/docs/advanced#vector")
/// );
/// assert!(registry.lookup("Vector").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelRegistry {
    entries: IndexMap<String, TypeMeta>,
}

impl LabelRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a declaration object `{name: {link?, class?}}`, registering
    /// entries in declaration order.
    pub fn from_declaration(raw: &Value) -> Result<Self> {
        let obj = raw.as_object().ok_or_else(|| NavError::InvalidShape {
            expected: "object of type names",
            found: json_type_name(raw),
            path: NavPath::root(),
        })?;

        let mut registry = Self::new();
        for (key, value) in obj {
            let path = NavPath::root().child(Segment::Key(key.clone()));
            if !value.is_object() {
                return Err(NavError::InvalidShape {
                    expected: "object with optional string `link` and `class`",
                    found: json_type_name(value),
                    path,
                });
            }
            let meta = TypeMeta::deserialize(value).map_err(|err| NavError::InvalidEntry {
                reason: err.to_string(),
                path,
            })?;
            registry.register(key.clone(), meta);
        }
        Ok(registry)
    }

    /// Load a declaration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(text)?;
        Self::from_declaration(&raw)
    }

    /// Insert or overwrite; returns the metadata that was replaced.
    pub fn register(&mut self, key: impl Into<String>, meta: TypeMeta) -> Option<TypeMeta> {
        let key = key.into();
        let previous = self.entries.insert(key.clone(), meta);
        if previous.is_some() {
            trace!(key = %key, "type metadata overwritten");
        }
        previous
    }

    /// Exact-match lookup. A miss is `None`, not an error.
    pub fn lookup(&self, key: &str) -> Option<&TypeMeta> {
        self.entries.get(key)
    }

    /// Apply every entry of `other` in its order; later entries win.
    pub fn extend(&mut self, other: LabelRegistry) {
        for (key, meta) in other.entries {
            self.register(key, meta);
        }
    }

    /// Split a comma-joined type list (`"number,vector"`) and attach
    /// metadata to each name, in order. Blank names are dropped.
    pub fn annotate<'a>(&'a self, types: &'a str) -> Vec<TypeLabel<'a>> {
        types
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| TypeLabel {
                name,
                meta: self.lookup(name),
            })
            .collect()
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeMeta)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, TypeMeta)> for LabelRegistry {
    fn from_iter<I: IntoIterator<Item = (K, TypeMeta)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (key, meta) in iter {
            registry.register(key, meta);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_register_returns_previous() {
        let mut registry = LabelRegistry::new();
        assert_eq!(registry.register("number", TypeMeta::linked("/a")), None);
        assert_eq!(
            registry.register("number", TypeMeta::linked("/b")),
            Some(TypeMeta::linked("/a"))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_empty_metadata_object_is_valid() {
        let registry = LabelRegistry::from_declaration(&json!({"element": {}})).unwrap();
        assert_eq!(registry.lookup("element"), Some(&TypeMeta::default()));
    }

    #[test]
    fn test_bad_entry_names_key() {
        let err = LabelRegistry::from_declaration(&json!({"number": "/n"})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidShape);
        assert_eq!(err.path().map(ToString::to_string), Some("number".into()));
        assert!(err.to_string().ends_with("found string"), "{err}");
    }

    #[test]
    fn test_mistyped_field_keeps_reason() {
        let err = LabelRegistry::from_declaration(&json!({"number": {"link": 3}})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEntry);
        assert_eq!(err.path().map(ToString::to_string), Some("number".into()));

        let message = err.to_string();
        assert!(message.contains("invalid type"), "{message}");
        assert!(!message.contains("found object"), "{message}");
    }

    #[test]
    fn test_unknown_field_is_named() {
        let err = LabelRegistry::from_declaration(&json!({"number": {"klass": "x"}})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEntry);
        assert!(err.to_string().contains("`klass`"), "{err}");
    }

    #[test]
    fn test_annotate_keeps_order_and_misses() {
        let registry: LabelRegistry = vec![
            ("number", TypeMeta::linked("/n").with_class("num")),
            ("vector", TypeMeta::linked("/v")),
        ]
        .into_iter()
        .collect();

        let labels = registry.annotate("vector, none ,number,");
        let names: Vec<_> = labels.iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["vector", "none", "number"]);
        assert!(labels[1].meta.is_none());
        assert_eq!(labels[2].meta.and_then(|m| m.class.as_deref()), Some("num"));
    }

    #[test]
    fn test_extend_applies_in_order() {
        let mut base: LabelRegistry = vec![("vector", TypeMeta::linked("/old"))]
            .into_iter()
            .collect();
        let refinements: LabelRegistry = vec![
            ("vector", TypeMeta::linked("/mid")),
            ("vector", TypeMeta::linked("/new")),
        ]
        .into_iter()
        .collect();

        base.extend(refinements);
        assert_eq!(base.lookup("vector"), Some(&TypeMeta::linked("/new")));
    }
}
