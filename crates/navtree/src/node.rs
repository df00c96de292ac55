//! Uniform node model for navigation declarations

use serde::Serialize;

use crate::path::Segment;

/// A node in a navigation tree.
///
/// All declaration forms (bare string shorthand, category objects, link
/// objects) are resolved into one of these variants by the parser.
/// Serializes back to the declaration shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavNode {
    /// Reference to a single documentation page by identifier
    DocRef(String),

    /// A labeled group of child nodes
    Category(Category),

    /// A labeled link to an opaque external target
    ExternalLink(ExternalLink),
}

/// A navigation grouping node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "category")]
pub struct Category {
    /// Display label (must not be blank)
    pub label: String,

    /// Optional landing target for the category itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<CategoryLink>,

    /// Children in declared order
    pub items: Vec<NavNode>,
}

/// Where a category's own label points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CategoryLink {
    /// An authored document, by identifier
    Doc {
        /// Target document identifier
        id: String,
    },

    /// An auto-produced listing page with no backing document
    GeneratedIndex {
        /// Page title; defaults to the category label
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// URL slug; derived from the label when absent
        #[serde(skip_serializing_if = "Option::is_none")]
        slug: Option<String>,
        /// Short description shown on the listing page
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

/// A link leaving the documentation set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "link")]
pub struct ExternalLink {
    /// Display label
    pub label: String,
    /// Opaque target URL, passed through untouched
    pub href: String,
}

impl NavNode {
    /// A document reference.
    pub fn doc(id: impl Into<String>) -> Self {
        NavNode::DocRef(id.into())
    }

    /// A category with no link.
    pub fn category(label: impl Into<String>, items: Vec<NavNode>) -> Self {
        NavNode::Category(Category::new(label).with_items(items))
    }

    /// An external link.
    pub fn external(label: impl Into<String>, href: impl Into<String>) -> Self {
        NavNode::ExternalLink(ExternalLink {
            label: label.into(),
            href: href.into(),
        })
    }

    /// Children of this node; empty for leaves.
    pub fn children(&self) -> &[NavNode] {
        match self {
            NavNode::Category(category) => &category.items,
            NavNode::DocRef(_) | NavNode::ExternalLink(_) => &[],
        }
    }

    /// The category, if this node is one.
    pub fn as_category(&self) -> Option<&Category> {
        match self {
            NavNode::Category(category) => Some(category),
            _ => None,
        }
    }

    /// The document identifier, if this node is a document reference.
    pub fn doc_id(&self) -> Option<&str> {
        match self {
            NavNode::DocRef(id) => Some(id),
            _ => None,
        }
    }

    /// The path segment naming this node under its parent.
    pub fn segment(&self) -> Segment {
        match self {
            NavNode::DocRef(id) => Segment::Doc(id.clone()),
            NavNode::Category(category) => Segment::Category(category.label.clone()),
            NavNode::ExternalLink(link) => Segment::Link(link.label.clone()),
        }
    }

    /// Number of nodes in this subtree, counting this one.
    pub fn subtree_size(&self) -> usize {
        1 + self.children().iter().map(NavNode::subtree_size).sum::<usize>()
    }
}

impl From<&str> for NavNode {
    fn from(id: &str) -> Self {
        NavNode::doc(id)
    }
}

impl From<Category> for NavNode {
    fn from(category: Category) -> Self {
        NavNode::Category(category)
    }
}

impl Category {
    /// An empty, unlinked category.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            link: None,
            items: Vec::new(),
        }
    }

    /// Set the link.
    pub fn with_link(mut self, link: CategoryLink) -> Self {
        self.link = Some(link);
        self
    }

    /// Replace the children.
    pub fn with_items(mut self, items: Vec<NavNode>) -> Self {
        self.items = items;
        self
    }
}

impl CategoryLink {
    /// A link to an authored document.
    pub fn doc(id: impl Into<String>) -> Self {
        CategoryLink::Doc { id: id.into() }
    }

    /// A generated index, optionally titled.
    pub fn generated_index(title: Option<&str>) -> Self {
        CategoryLink::GeneratedIndex {
            title: title.map(str::to_string),
            slug: None,
            description: None,
        }
    }
}
