//! Build configuration

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Options controlling how declarations are validated.
///
/// Every field has a default, so an empty JSON object is a valid
/// configuration.
///
/// # Example
///
/// ```
/// use navtree::BuildOptions;
///
/// let opts = BuildOptions::from_json_str(r#"{"known-ids": ["basics/basics"]}"#).unwrap();
/// assert!(opts.is_known_id("basics/basics"));
/// assert!(!opts.unique_across_sidebars);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct BuildOptions {
    /// Identifiers a category doc link may target without a matching
    /// document reference in the tree
    pub known_ids: IndexSet<String>,

    /// Reject a document that appears in more than one sidebar of a set
    pub unique_across_sidebars: bool,
}

impl BuildOptions {
    /// Default options: no reserved identifiers, sidebars independent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reserve one identifier.
    pub fn with_known_id(mut self, id: impl Into<String>) -> Self {
        self.known_ids.insert(id.into());
        self
    }

    /// Reserve several identifiers.
    pub fn with_known_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Require document identifiers to be unique across a sidebar set.
    pub fn unique_across_sidebars(mut self, on: bool) -> Self {
        self.unique_across_sidebars = on;
        self
    }

    /// Whether `id` is reserved.
    pub fn is_known_id(&self, id: &str) -> bool {
        self.known_ids.contains(id)
    }
}
