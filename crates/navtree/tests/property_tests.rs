//! Structural properties of build, validate and flatten

use std::collections::HashSet;

use navtree::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

/// A deterministic declaration `depth` levels deep, `width` items per level.
fn generated(depth: usize, width: usize, prefix: &str) -> Value {
    let items: Vec<Value> = (0..width)
        .map(|i| {
            if depth == 0 || i % 2 == 0 {
                json!(format!("{}/{}", prefix, i))
            } else {
                let label = format!("{} {}", prefix, i);
                json!({
                    "type": "category",
                    "label": label,
                    "items": generated(depth - 1, width, &format!("{}/{}", prefix, i)),
                })
            }
        })
        .collect();
    Value::Array(items)
}

fn count_nodes(raw: &Value) -> usize {
    raw.as_array()
        .map(|items| {
            items
                .iter()
                .map(|item| 1 + item.get("items").map(count_nodes).unwrap_or(0))
                .sum()
        })
        .unwrap_or(0)
}

#[test]
fn test_flatten_visits_every_node_once() {
    for (depth, width) in [(0, 3), (1, 4), (3, 3), (4, 5)] {
        let raw = generated(depth, width, "doc");
        let tree = NavigationTree::build(&raw).unwrap();

        let entries: Vec<_> = tree.flatten().collect();
        assert_eq!(entries.len(), count_nodes(&raw));
        assert_eq!(entries.len(), tree.node_count());

        let distinct: HashSet<_> = entries
            .iter()
            .map(|e| e.node as *const NavNode)
            .collect();
        assert_eq!(distinct.len(), entries.len());
    }
}

#[test]
fn test_flatten_is_pre_order() {
    let tree = NavigationTree::build(&generated(3, 4, "p")).unwrap();
    let entries: Vec<_> = tree.flatten().collect();

    for (i, entry) in entries.iter().enumerate() {
        for child in entry.node.children() {
            let at = entries
                .iter()
                .position(|e| std::ptr::eq(e.node, child))
                .unwrap();
            assert!(at > i, "child at {at} visited before parent at {i}");
        }
        if let Some(next) = entries.get(i + 1) {
            assert!(next.depth() <= entry.depth() + 1);
        }
    }
}

#[test]
fn test_flatten_is_restartable() {
    let tree = NavigationTree::build(&generated(2, 3, "r")).unwrap();
    let first: Vec<_> = tree.flatten().map(|e| e.path).collect();
    let second: Vec<_> = tree.flatten().map(|e| e.path).collect();
    assert_eq!(first, second);
}

#[test]
fn test_build_is_pure() {
    let raw = generated(3, 3, "same");
    assert_eq!(NavigationTree::build(&raw), NavigationTree::build(&raw));
}

#[test]
fn test_duplicate_report_is_deterministic() {
    let raw = json!([
        "a",
        {"type": "category", "label": "One", "items": ["b", "a"]},
        {"type": "category", "label": "Two", "items": ["b", "a"]},
    ]);

    let errors: Vec<_> = (0..10)
        .map(|_| NavigationTree::build(&raw).unwrap_err())
        .collect();
    assert!(errors.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(
        errors[0].to_string(),
        "document `a` declared twice: first at a [0], again at One / a [1, 1]"
    );
}

fn linked(target: &str) -> Value {
    json!({"type": "category", "label": "L", "link": {"type": "doc", "id": target}})
}

#[test]
fn test_valid_iff_unique_and_resolved() {
    let cases = [
        (json!(["a", "b"]), true),
        (json!(["a", "a"]), false),
        (json!([linked("a"), "a"]), true),
        (json!([linked("z"), "a"]), false),
        (json!([{"type": "category", "label": "L", "link": {"type": "generated-index"}}]), true),
    ];

    for (raw, valid) in cases {
        assert_eq!(NavigationTree::build(&raw).is_ok(), valid, "declaration {raw}");
    }
}

#[test]
fn test_sibling_order_preserved() {
    let tree = NavigationTree::build(&json!(["z", "a", "m"])).unwrap();
    assert_eq!(tree.document_ids().collect::<Vec<_>>(), vec!["z", "a", "m"]);
}
