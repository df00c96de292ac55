//! Structural paths locating nodes within a navigation tree

use std::fmt;

use serde::Serialize;

/// One step from a parent to a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Segment {
    /// A category, named by its label
    Category(String),

    /// A document reference, named by its identifier
    Doc(String),

    /// An external link, named by its label
    Link(String),

    /// A named entry of a declaration object
    Key(String),

    /// A position among siblings, used when a node has no usable name yet
    Index(usize),
}

impl Segment {
    /// The label, identifier, or rendered index of this segment.
    pub fn name(&self) -> String {
        match self {
            Segment::Category(s)
            | Segment::Doc(s)
            | Segment::Link(s)
            | Segment::Key(s) => s.clone(),
            Segment::Index(i) => format!("#{}", i),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Category(s)
            | Segment::Doc(s)
            | Segment::Link(s)
            | Segment::Key(s) => f.write_str(s),
            Segment::Index(i) => write!(f, "#{}", i),
        }
    }
}

/// Sequence of segments from a root to a node.
///
/// The empty path denotes the top level of the declaration itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NavPath(Vec<Segment>);

impl NavPath {
    /// The empty (top-level) path.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// A new path extending this one by `segment`.
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend(self.0.iter().cloned());
        segments.push(segment);
        Self(segments)
    }

    /// Borrow the segments.
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Number of segments (the node's depth, counting top level as 1).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the top-level path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The final segment, naming the node itself.
    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }

    /// Segment names, root first. Handy for breadcrumbs and assertions.
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(Segment::name).collect()
    }
}

impl From<Vec<Segment>> for NavPath {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for NavPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" / ")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
