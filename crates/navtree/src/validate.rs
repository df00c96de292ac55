//! Referential and structural validation
//!
//! One depth-first pass collects every document reference (in visitation
//! order) and every category doc-link target. Blank labels and repeated
//! identifiers fail as soon as they are met; link targets are checked once
//! the pass is complete, since a target may be declared after the link.

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::error::{NavError, Result};
use crate::node::{CategoryLink, NavNode};
use crate::options::BuildOptions;
use crate::path::{NavPath, Segment};

/// Where a document reference lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocEntry {
    /// Labels and identifiers from the root down to the document
    pub path: NavPath,

    /// Child indices from the root down to the document
    pub position: Vec<usize>,
}

/// Identifier index produced by a successful validation pass.
///
/// Iterates in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocIndex {
    entries: IndexMap<String, DocEntry>,
}

impl DocIndex {
    /// Look up a document identifier.
    pub fn get(&self, id: &str) -> Option<&DocEntry> {
        self.entries.get(id)
    }

    /// Whether the identifier was declared.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of distinct documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the tree references no documents.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifiers in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DocEntry)> + '_ {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }
}

/// Validate a parsed declaration.
///
/// Fails fast with the first error met; on success returns the index of
/// every document reference.
pub fn validate(nodes: &[NavNode], opts: &BuildOptions) -> Result<DocIndex> {
    let mut validator = Validator::default();
    validator.walk(nodes, &NavPath::root(), &[])?;
    validator.check_links(opts)?;
    Ok(DocIndex {
        entries: validator.docs,
    })
}

#[derive(Default)]
struct Validator {
    docs: IndexMap<String, DocEntry>,
    /// Doc-link targets with the path of the linking category
    links: Vec<(String, NavPath)>,
}

impl Validator {
    fn walk(&mut self, nodes: &[NavNode], parent: &NavPath, parent_pos: &[usize]) -> Result<()> {
        for (i, node) in nodes.iter().enumerate() {
            let mut position = parent_pos.to_vec();
            position.push(i);

            match node {
                NavNode::DocRef(id) => {
                    let path = parent.child(node.segment());
                    match self.docs.entry(id.clone()) {
                        Entry::Occupied(first) => {
                            return Err(NavError::DuplicateDocumentId {
                                id: id.clone(),
                                first: first.get().path.clone(),
                                first_position: first.get().position.clone(),
                                second: path,
                                second_position: position,
                            });
                        }
                        Entry::Vacant(slot) => {
                            slot.insert(DocEntry { path, position });
                        }
                    }
                }
                NavNode::Category(category) => {
                    if category.label.trim().is_empty() {
                        return Err(NavError::EmptyLabel {
                            path: parent.child(Segment::Index(i)),
                        });
                    }
                    let path = parent.child(node.segment());
                    if let Some(CategoryLink::Doc { id }) = &category.link {
                        self.links.push((id.clone(), path.clone()));
                    }
                    self.walk(&category.items, &path, &position)?;
                }
                NavNode::ExternalLink(_) => {}
            }
        }
        Ok(())
    }

    fn check_links(&self, opts: &BuildOptions) -> Result<()> {
        for (id, path) in &self.links {
            if !self.docs.contains_key(id) && !opts.is_known_id(id) {
                return Err(NavError::DanglingLinkTarget {
                    id: id.clone(),
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }
}
