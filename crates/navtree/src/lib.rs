//! # Navtree
//!
//! A navigation tree model for documentation sidebars.
//!
//! Navtree takes the nested declarations a documentation site uses to
//! group and order its pages, resolves every declaration form into one
//! uniform [`NavNode`] model, validates referential integrity, and hands a
//! rendering layer the traversals it needs.
//!
//! ## Architecture
//!
//! - **Parse**: raw JSON declaration to [`NavNode`]s (purely structural)
//! - **Validate**: unique document identifiers, resolvable category links
//! - **Query**: pre-order flattening, identifier lookup, link resolution,
//!   breadcrumbs and pagination on an immutable [`NavigationTree`]
//! - **Registry**: exact-match metadata for well-known type names
//!
//! Rendering, styling and site generation are left to the consumer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod flatten;
pub mod node;
pub mod options;
pub mod parse;
pub mod path;
pub mod registry;
pub mod sidebars;
pub mod tree;
pub mod validate;

// Re-export main types
pub use error::{ErrorKind, NavError, NotFound, Result};
pub use flatten::{FlatEntry, Flatten};
pub use node::{Category, CategoryLink, ExternalLink, NavNode};
pub use options::BuildOptions;
pub use parse::{parse, parse_node, parse_str};
pub use path::{NavPath, Segment};
pub use registry::{LabelRegistry, TypeLabel, TypeMeta};
pub use sidebars::Sidebars;
pub use tree::{category_slug, NavigationTree, Neighbors, Page, ResolvedTarget};
pub use validate::{validate, DocEntry, DocIndex};

/// Navtree version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
