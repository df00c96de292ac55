//! The validated, immutable navigation tree

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{NotFound, Result};
use crate::flatten::Flatten;
use crate::node::{Category, CategoryLink, NavNode};
use crate::options::BuildOptions;
use crate::parse::{parse, parse_str};
use crate::path::NavPath;
use crate::validate::{validate, DocIndex};

/// What a category's own label points at, as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ResolvedTarget<'a> {
    /// A document referenced somewhere in this tree
    Document {
        /// Document identifier
        id: &'a str,
        /// Where the document reference sits
        path: &'a NavPath,
    },

    /// A reserved identifier with no reference in this tree
    Reserved {
        /// Document identifier
        id: &'a str,
    },

    /// A synthetic listing page; no document backs it
    GeneratedIndex {
        /// Explicit title, or the category label
        title: &'a str,
        /// Explicit slug, or one derived from the label
        slug: String,
        /// Optional description
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<&'a str>,
    },

    /// The category has no link
    Unlinked,
}

/// An entry of the linear page list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Page {
    /// An authored document, either referenced directly or as a
    /// category's landing page
    Doc {
        /// Document identifier
        id: String,
        /// Path of the node that introduced the page
        path: NavPath,
    },

    /// A generated listing page for a category
    GeneratedIndex {
        /// Page title
        title: String,
        /// Page slug
        slug: String,
        /// Path of the category
        path: NavPath,
    },
}

impl Page {
    /// Path of the node that introduced this page.
    pub fn path(&self) -> &NavPath {
        match self {
            Page::Doc { path, .. } | Page::GeneratedIndex { path, .. } => path,
        }
    }
}

/// The pages on either side of a document in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors<'a> {
    /// Page before, if any
    pub previous: Option<&'a Page>,
    /// Page after, if any
    pub next: Option<&'a Page>,
}

/// A navigation tree that passed validation.
///
/// Only obtainable through the validating constructors, so holding one
/// means the declaration is sound. There is no mutation API; share it
/// freely between readers.
///
/// # Example
///
/// ```
/// use navtree::NavigationTree;
/// use serde_json::json;
///
/// let tree = NavigationTree::build(&json!([
///     "a",
///     {"type": "category", "label": "Shapes", "items": ["b", "c"]},
/// ]))
/// .unwrap();
///
/// assert_eq!(tree.flatten().count(), 4);
/// assert_eq!(tree.find_by_doc_id("b").unwrap().names(), vec!["Shapes", "b"]);
/// assert!(tree.find_by_doc_id("zzz").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTree {
    roots: Vec<NavNode>,
    index: DocIndex,
    known_ids: IndexSet<String>,
    pages: Vec<Page>,
    /// Document id to position in `pages`
    page_index: IndexMap<String, usize>,
    node_count: usize,
}

impl NavigationTree {
    // ═══════════════════════════════════════════════════════════════════
    // Construction
    // ═══════════════════════════════════════════════════════════════════

    /// Parse and validate a raw declaration with default options.
    pub fn build(raw: &Value) -> Result<Self> {
        Self::build_with(raw, &BuildOptions::default())
    }

    /// Parse and validate a raw declaration.
    pub fn build_with(raw: &Value, opts: &BuildOptions) -> Result<Self> {
        Self::from_nodes(parse(raw)?, opts)
    }

    /// Parse and validate a declaration given as JSON text.
    pub fn from_json_str(text: &str, opts: &BuildOptions) -> Result<Self> {
        Self::from_nodes(parse_str(text)?, opts)
    }

    /// Validate nodes constructed in code.
    pub fn from_nodes(roots: Vec<NavNode>, opts: &BuildOptions) -> Result<Self> {
        let index = validate(&roots, opts).map_err(|err| {
            debug!(error = %err, "navigation declaration rejected");
            err
        })?;

        let mut tree = Self {
            roots,
            index,
            known_ids: opts.known_ids.clone(),
            pages: Vec::new(),
            page_index: IndexMap::new(),
            node_count: 0,
        };
        tree.index_pages();

        debug!(
            nodes = tree.node_count,
            documents = tree.index.len(),
            pages = tree.pages.len(),
            "built navigation tree"
        );
        Ok(tree)
    }

    fn index_pages(&mut self) {
        let mut pages = Vec::new();
        let mut page_index = IndexMap::new();
        let mut count = 0;

        for entry in Flatten::new(&self.roots) {
            count += 1;
            let page = match entry.node {
                NavNode::DocRef(id) => Page::Doc {
                    id: id.clone(),
                    path: entry.path,
                },
                NavNode::Category(category) => match &category.link {
                    Some(CategoryLink::Doc { id }) => Page::Doc {
                        id: id.clone(),
                        path: entry.path,
                    },
                    Some(CategoryLink::GeneratedIndex { title, slug, .. }) => {
                        Page::GeneratedIndex {
                            title: title.clone().unwrap_or_else(|| category.label.clone()),
                            slug: slug.clone().unwrap_or_else(|| category_slug(&category.label)),
                            path: entry.path,
                        }
                    }
                    None => continue,
                },
                NavNode::ExternalLink(_) => continue,
            };

            // A category landing on a doc it also lists yields one page
            if let Page::Doc { id, .. } = &page {
                if page_index.contains_key(id) {
                    continue;
                }
                page_index.insert(id.clone(), pages.len());
            }
            pages.push(page);
        }

        self.pages = pages;
        self.page_index = page_index;
        self.node_count = count;
    }

    // ═══════════════════════════════════════════════════════════════════
    // Structure
    // ═══════════════════════════════════════════════════════════════════

    /// Top-level nodes in declared order.
    pub fn roots(&self) -> &[NavNode] {
        &self.roots
    }

    /// Total number of nodes at every depth.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of document references.
    pub fn document_count(&self) -> usize {
        self.index.len()
    }

    /// Document identifiers in declaration order.
    pub fn document_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.ids()
    }

    /// The identifier index built during validation.
    pub fn doc_index(&self) -> &DocIndex {
        &self.index
    }

    /// Identifiers reserved when the tree was built.
    pub fn known_ids(&self) -> &IndexSet<String> {
        &self.known_ids
    }

    /// Node at a chain of child indices, root first.
    pub fn node_at(&self, position: &[usize]) -> Option<&NavNode> {
        let (first, rest) = position.split_first()?;
        let mut node = self.roots.get(*first)?;
        for &i in rest {
            node = node.children().get(i)?;
        }
        Some(node)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Traversal & Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Every node in pre-order, paired with its path.
    ///
    /// Lazy; call again to restart.
    pub fn flatten(&self) -> Flatten<'_> {
        Flatten::new(&self.roots)
    }

    /// Path of a document reference.
    pub fn find_by_doc_id(&self, id: &str) -> std::result::Result<&NavPath, NotFound> {
        self.index
            .get(id)
            .map(|entry| &entry.path)
            .ok_or_else(|| NotFound::new(id))
    }

    /// Whether the tree references `id`.
    pub fn contains_doc(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    /// Resolve where a category's label points.
    ///
    /// Categories from this tree always resolve; a foreign category whose
    /// doc link names an identifier unknown here yields [`NotFound`].
    pub fn resolve_link<'a>(
        &'a self,
        category: &'a Category,
    ) -> std::result::Result<ResolvedTarget<'a>, NotFound> {
        match &category.link {
            None => Ok(ResolvedTarget::Unlinked),
            Some(CategoryLink::Doc { id }) => {
                if let Some(entry) = self.index.get(id) {
                    Ok(ResolvedTarget::Document {
                        id: id.as_str(),
                        path: &entry.path,
                    })
                } else if self.known_ids.contains(id.as_str()) {
                    Ok(ResolvedTarget::Reserved { id: id.as_str() })
                } else {
                    Err(NotFound::new(id.as_str()))
                }
            }
            Some(CategoryLink::GeneratedIndex {
                title,
                slug,
                description,
            }) => Ok(ResolvedTarget::GeneratedIndex {
                title: title.as_deref().unwrap_or(category.label.as_str()),
                slug: slug
                    .clone()
                    .unwrap_or_else(|| category_slug(&category.label)),
                description: description.as_deref(),
            }),
        }
    }

    /// Enclosing categories of a document, outermost first.
    pub fn breadcrumbs(&self, id: &str) -> std::result::Result<Vec<&Category>, NotFound> {
        let entry = self.index.get(id).ok_or_else(|| NotFound::new(id))?;
        let ancestors = entry.position.len().saturating_sub(1);

        let mut crumbs = Vec::with_capacity(ancestors);
        let mut nodes = self.roots.as_slice();
        for &i in &entry.position[..ancestors] {
            let Some(NavNode::Category(category)) = nodes.get(i) else {
                break;
            };
            crumbs.push(category);
            nodes = &category.items;
        }
        Ok(crumbs)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Pagination
    // ═══════════════════════════════════════════════════════════════════

    /// Linear reading order: documents, doc-linked categories and
    /// generated indexes, in pre-order. External links are skipped.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Previous and next page around a document.
    pub fn neighbors(&self, id: &str) -> std::result::Result<Neighbors<'_>, NotFound> {
        let at = *self.page_index.get(id).ok_or_else(|| NotFound::new(id))?;
        Ok(Neighbors {
            previous: at.checked_sub(1).and_then(|i| self.pages.get(i)),
            next: self.pages.get(at + 1),
        })
    }
}

impl<'a> IntoIterator for &'a NavigationTree {
    type Item = crate::flatten::FlatEntry<'a>;
    type IntoIter = Flatten<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.flatten()
    }
}

/// Default slug of a generated index page.
///
/// Lowercases and keeps alphanumerics. Each run of spaces and hyphens
/// becomes a single hyphen; other characters are dropped.
pub fn category_slug(label: &str) -> String {
    let mut slug = String::with_capacity(label.len() + 10);
    slug.push_str("/category/");
    for c in label.trim().to_lowercase().chars() {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if (c == ' ' || c == '-') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_category_slug() {
        assert_eq!(category_slug("Tutorials"), "/category/tutorials");
        assert_eq!(category_slug("Draw Functions"), "/category/draw-functions");
        assert_eq!(category_slug(" C++ & Rust "), "/category/c-rust");
        assert_eq!(category_slug("a - b"), "/category/a-b");
        assert_eq!(category_slug("Pre--Release"), "/category/pre-release");
    }

    #[test]
    fn test_node_at() {
        let tree = NavigationTree::from_nodes(
            vec!["a".into(), NavNode::category("S", vec!["b".into()])],
            &BuildOptions::default(),
        )
        .unwrap();

        assert_eq!(tree.node_at(&[1, 0]), Some(&NavNode::doc("b")));
        assert_eq!(tree.node_at(&[0, 0]), None);
        assert_eq!(tree.node_at(&[]), None);
    }

    #[test]
    fn test_self_listing_category_yields_one_page() {
        let nodes = vec![Category::new("A")
            .with_link(CategoryLink::doc("a"))
            .with_items(vec!["a".into(), "b".into()])
            .into()];
        let tree = NavigationTree::from_nodes(nodes, &BuildOptions::default()).unwrap();

        let ids: Vec<_> = tree
            .pages()
            .iter()
            .map(|p| match p {
                Page::Doc { id, .. } => id.as_str(),
                Page::GeneratedIndex { .. } => "<index>",
            })
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(tree.pages()[0].path().names(), vec!["A"]);
    }
}
