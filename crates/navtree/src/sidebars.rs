//! Several named navigation trees loaded together

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::error::{json_type_name, NavError, NotFound, Result};
use crate::options::BuildOptions;
use crate::path::NavPath;
use crate::tree::NavigationTree;

/// A set of named sidebars, e.g. a guide sidebar and an API sidebar.
///
/// Each sidebar is its own validation unit: the same document may appear
/// in two sidebars unless [`BuildOptions::unique_across_sidebars`] is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sidebars {
    trees: IndexMap<String, NavigationTree>,
}

impl Sidebars {
    /// Build from an object mapping sidebar names to node arrays.
    ///
    /// Sidebars are built in declaration order and the first failure
    /// aborts, wrapped in [`NavError::InSidebar`].
    pub fn build(raw: &Value, opts: &BuildOptions) -> Result<Self> {
        let obj = raw.as_object().ok_or_else(|| NavError::InvalidShape {
            expected: "object of named sidebars",
            found: json_type_name(raw),
            path: NavPath::root(),
        })?;

        let mut sidebars = Self::default();
        for (name, decl) in obj {
            let tree =
                NavigationTree::build_with(decl, opts).map_err(|err| err.in_sidebar(name))?;
            sidebars.insert(name.clone(), tree, opts)?;
        }

        debug!(sidebars = sidebars.len(), "built sidebar set");
        Ok(sidebars)
    }

    /// Build from JSON text.
    pub fn from_json_str(text: &str, opts: &BuildOptions) -> Result<Self> {
        let raw: Value = serde_json::from_str(text)?;
        Self::build(&raw, opts)
    }

    /// Add an already-built tree. A repeated name replaces the earlier
    /// tree in place.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        tree: NavigationTree,
        opts: &BuildOptions,
    ) -> Result<()> {
        let name = name.into();
        if opts.unique_across_sidebars {
            for (other, existing) in &self.trees {
                if *other == name {
                    continue;
                }
                if let Some(id) = tree.document_ids().find(|id| existing.contains_doc(id)) {
                    return Err(NavError::DuplicateAcrossSidebars {
                        id: id.to_string(),
                        first: other.clone(),
                        second: name,
                    });
                }
            }
        }
        self.trees.insert(name, tree);
        Ok(())
    }

    /// A sidebar by name.
    pub fn get(&self, name: &str) -> Option<&NavigationTree> {
        self.trees.get(name)
    }

    /// Sidebar names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.trees.keys().map(String::as_str)
    }

    /// Sidebars in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NavigationTree)> + '_ {
        self.trees.iter().map(|(name, tree)| (name.as_str(), tree))
    }

    /// Number of sidebars.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// True when no sidebar is loaded.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// First sidebar (in declaration order) referencing `id`, with the
    /// document's path inside it.
    pub fn find_by_doc_id(&self, id: &str) -> std::result::Result<(&str, &NavPath), NotFound> {
        self.trees
            .iter()
            .find_map(|(name, tree)| tree.find_by_doc_id(id).ok().map(|p| (name.as_str(), p)))
            .ok_or_else(|| NotFound::new(id))
    }
}
