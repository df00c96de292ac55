//! Raw declaration parsing
//!
//! Turns a JSON-shaped declaration into [`NavNode`]s. Parsing is purely
//! structural: it never checks whether identifiers exist, only that every
//! element has a recognizable form. Error paths use positional
//! ([`Segment::Index`]) segments because a malformed node may have no
//! label to name it by.

use serde_json::{Map, Value};

use crate::error::{json_type_name, NavError, Result};
use crate::node::{Category, CategoryLink, ExternalLink, NavNode};
use crate::path::{NavPath, Segment};

/// Parse a top-level declaration (an ordered array of nodes).
///
/// # Example
///
/// ```
/// use navtree::{parse, NavNode};
/// use serde_json::json;
///
/// let nodes = parse(&json!([
///     "a",
///     {"type": "category", "label": "Shapes", "items": ["b"]},
/// ]))
/// .unwrap();
/// assert_eq!(nodes[0], NavNode::doc("a"));
/// assert_eq!(nodes[1].children(), &[NavNode::doc("b")]);
/// ```
pub fn parse(raw: &Value) -> Result<Vec<NavNode>> {
    let items = raw.as_array().ok_or_else(|| NavError::InvalidShape {
        expected: "array of nodes",
        found: json_type_name(raw),
        path: NavPath::root(),
    })?;
    parse_items(items, &NavPath::root())
}

/// Parse a declaration from JSON text.
pub fn parse_str(text: &str) -> Result<Vec<NavNode>> {
    let raw: Value = serde_json::from_str(text)?;
    parse(&raw)
}

/// Parse a single node at `path`.
pub fn parse_node(raw: &Value, path: &NavPath) -> Result<NavNode> {
    match raw {
        Value::String(id) => Ok(NavNode::DocRef(id.clone())),
        Value::Object(obj) => {
            let kind = required_str(obj, "type", path)?;
            match kind {
                "category" => parse_category(obj, path).map(NavNode::Category),
                "link" => parse_external(obj, path).map(NavNode::ExternalLink),
                // Longhand for the bare-string shorthand
                "doc" => Ok(NavNode::DocRef(required_str(obj, "id", path)?.to_string())),
                other => Err(NavError::UnknownNodeKind {
                    kind: other.to_string(),
                    path: path.clone(),
                }),
            }
        }
        other => Err(NavError::InvalidShape {
            expected: "string or object",
            found: json_type_name(other),
            path: path.clone(),
        }),
    }
}

fn parse_items(items: &[Value], parent: &NavPath) -> Result<Vec<NavNode>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_node(item, &parent.child(Segment::Index(i))))
        .collect()
}

fn parse_category(obj: &Map<String, Value>, path: &NavPath) -> Result<Category> {
    let label = required_str(obj, "label", path)?.to_string();

    let link = match obj.get("link") {
        None | Some(Value::Null) => None,
        Some(raw) => Some(parse_link(raw, path)?),
    };

    let items = match obj.get("items") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => parse_items(items, path)?,
        Some(other) => {
            return Err(NavError::InvalidShape {
                expected: "array of nodes",
                found: json_type_name(other),
                path: path.clone(),
            })
        }
    };

    Ok(Category { label, link, items })
}

fn parse_link(raw: &Value, path: &NavPath) -> Result<CategoryLink> {
    let obj = raw.as_object().ok_or_else(|| NavError::InvalidShape {
        expected: "link object",
        found: json_type_name(raw),
        path: path.clone(),
    })?;

    match required_str(obj, "type", path)? {
        "doc" => Ok(CategoryLink::Doc {
            id: required_str(obj, "id", path)?.to_string(),
        }),
        "generated-index" => Ok(CategoryLink::GeneratedIndex {
            title: optional_str(obj, "title", path)?,
            slug: optional_str(obj, "slug", path)?,
            description: optional_str(obj, "description", path)?,
        }),
        other => Err(NavError::UnknownLinkKind {
            kind: other.to_string(),
            path: path.clone(),
        }),
    }
}

fn parse_external(obj: &Map<String, Value>, path: &NavPath) -> Result<ExternalLink> {
    Ok(ExternalLink {
        label: required_str(obj, "label", path)?.to_string(),
        href: required_str(obj, "href", path)?.to_string(),
    })
}

fn required_str<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
    path: &NavPath,
) -> Result<&'a str> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s),
        None | Some(Value::Null) => Err(NavError::MissingField {
            field,
            path: path.clone(),
        }),
        Some(other) => Err(NavError::InvalidShape {
            expected: "string",
            found: json_type_name(other),
            path: path.clone(),
        }),
    }
}

fn optional_str(
    obj: &Map<String, Value>,
    field: &'static str,
    path: &NavPath,
) -> Result<Option<String>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(NavError::InvalidShape {
            expected: "string",
            found: json_type_name(other),
            path: path.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_bare_string_is_doc_ref() {
        let nodes = parse(&json!(["overview", "getting-started"])).unwrap();
        assert_eq!(nodes, vec![NavNode::doc("overview"), NavNode::doc("getting-started")]);
    }

    #[test]
    fn test_longhand_doc_matches_shorthand() {
        let nodes = parse(&json!([{"type": "doc", "id": "a"}, "a"])).unwrap();
        assert_eq!(nodes[0], nodes[1]);
    }

    #[test]
    fn test_category_items_default_to_empty() {
        let nodes = parse(&json!([{"type": "category", "label": "Empty"}])).unwrap();
        assert_eq!(nodes, vec![NavNode::category("Empty", vec![])]);
    }

    #[test]
    fn test_category_with_doc_link() {
        let nodes = parse(&json!([{
            "type": "category",
            "label": "Basics",
            "link": {"type": "doc", "id": "basics/basics"},
            "items": ["basics/canvas"],
        }]))
        .unwrap();

        let expected = Category::new("Basics")
            .with_link(CategoryLink::doc("basics/basics"))
            .with_items(vec!["basics/canvas".into()]);
        assert_eq!(nodes, vec![NavNode::Category(expected)]);
    }

    #[test]
    fn test_generated_index_fields() {
        let nodes = parse(&json!([{
            "type": "category",
            "label": "Tutorials",
            "link": {"type": "generated-index", "slug": "/learn", "description": "All of them"},
        }]))
        .unwrap();

        let link = nodes[0].as_category().and_then(|c| c.link.clone());
        assert_eq!(
            link,
            Some(CategoryLink::GeneratedIndex {
                title: None,
                slug: Some("/learn".into()),
                description: Some("All of them".into()),
            })
        );
    }

    #[test]
    fn test_unknown_link_kind() {
        let err = parse(&json!([
            "a",
            {"type": "category", "label": "X", "link": {"type": "autogenerated"}},
        ]))
        .unwrap_err();

        assert_eq!(
            err,
            NavError::UnknownLinkKind {
                kind: "autogenerated".into(),
                path: NavPath::from(vec![Segment::Index(1)]),
            }
        );
    }

    #[test]
    fn test_unknown_node_kind() {
        let err = parse(&json!([{"type": "html", "value": "<hr/>"}])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownNodeKind);
    }

    #[test]
    fn test_missing_label_is_parse_error() {
        let err = parse(&json!([{"type": "category", "items": []}])).unwrap_err();
        assert_eq!(
            err,
            NavError::MissingField {
                field: "label",
                path: NavPath::from(vec![Segment::Index(0)]),
            }
        );
    }

    #[test]
    fn test_nested_error_path_uses_positions() {
        let err = parse(&json!([
            {"type": "category", "label": "A", "items": [
                "a",
                {"type": "category", "label": "B", "items": [7]},
            ]},
        ]))
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidShape);
        assert_eq!(err.path().map(ToString::to_string), Some("#0 / #1 / #0".into()));
    }

    #[test]
    fn test_items_must_be_array() {
        let err = parse(&json!([{"type": "category", "label": "A", "items": "a"}])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidShape);
    }

    #[test]
    fn test_top_level_must_be_array() {
        let err = parse(&json!({"sidebar": []})).unwrap_err();
        assert_eq!(
            err,
            NavError::InvalidShape {
                expected: "array of nodes",
                found: "object",
                path: NavPath::root(),
            }
        );
    }

    #[test]
    fn test_external_link_requires_href() {
        let ok = parse(&json!([{"type": "link", "label": "Repo", "href": "https://e.org"}]))
            .unwrap();
        assert_eq!(ok, vec![NavNode::external("Repo", "https://e.org")]);

        let err = parse(&json!([{"type": "link", "label": "Repo"}])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
    }

    #[test]
    fn test_parse_str_reports_bad_json() {
        let err = parse_str("[\"a\",").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Json);
    }
}
