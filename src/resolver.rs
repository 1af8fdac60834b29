//! In-document `$ref` resolution.
//!
//! A local pointer is `#` followed by `/`-separated segments. The first
//! segment rebinds the cursor to the document root; each following segment
//! steps into an indexed entry, a field, a map key or a list position.
//! Segments are matched literally: `~0` and `~1` are not unescaped.
//!
//! Resolution never fails loudly. Unresolved and external pointers come back
//! as values for rules to report.

use serde::Serialize;
use std::collections::HashSet;

use crate::model::{AnyNode, Child, Document, NodeId};

/// Outcome of resolving one pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "node", rename_all = "snake_case")]
pub enum Resolution {
    Found(NodeId),
    NotFound,
    /// Not an in-document pointer; assumed valid and not followed.
    External,
}

impl Resolution {
    pub fn node(self) -> Option<NodeId> {
        match self {
            Resolution::Found(id) => Some(id),
            _ => None,
        }
    }
}

/// Outcome of following a chain of references.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Chain {
    /// The first node in the chain that is not itself a reference.
    Resolved(NodeId),
    /// The pointer of the hop that could not be resolved.
    Unresolved(String),
    /// The first external pointer met along the chain.
    External(String),
    /// The pointer that led back to a node already on the chain.
    Circular(String),
}

impl Chain {
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Chain::Resolved(id) => Some(*id),
            _ => None,
        }
    }
}

pub fn is_local(pointer: &str) -> bool {
    pointer.starts_with('#')
}

/// Resolves `pointer` against the document that owns `from`.
pub fn resolve(pointer: &str, from: AnyNode<'_>) -> Resolution {
    resolve_in(from.document(), pointer)
}

/// Resolves `pointer` against the root of `doc`.
pub fn resolve_in(doc: &Document, pointer: &str) -> Resolution {
    if !is_local(pointer) {
        return Resolution::External;
    }
    let mut segments = pointer.split('/');
    segments.next();

    let mut node = doc.root();
    let mut slot: Option<Child<'_>> = None;
    for segment in segments {
        let next = match slot.take() {
            None => step(doc, node, segment),
            Some(Child::Map(map)) => map.get(segment).copied().map(Child::Node),
            Some(Child::List(list)) => segment
                .parse::<usize>()
                .ok()
                .and_then(|i| list.get(i).copied())
                .map(Child::Node),
            Some(Child::Node(_)) => None,
        };
        match next {
            Some(Child::Node(id)) => node = id,
            Some(other) => slot = Some(other),
            None => return Resolution::NotFound,
        }
    }
    match slot {
        None if doc.node(node).is_some() => Resolution::Found(node),
        _ => Resolution::NotFound,
    }
}

fn step<'a>(doc: &'a Document, cursor: NodeId, segment: &str) -> Option<Child<'a>> {
    let data = doc.node(cursor)?.data();
    if let Some(indexed) = data.as_indexed()
        && let Some(id) = indexed.get(segment)
    {
        return Some(Child::Node(id));
    }
    data.children()
        .into_iter()
        .find(|(name, _)| *name == segment)
        .map(|(_, child)| child)
}

/// True for external pointers and for local pointers that reach a node.
pub fn can_resolve(pointer: &str, from: AnyNode<'_>) -> bool {
    !matches!(resolve(pointer, from), Resolution::NotFound)
}

/// Follows references from `node` until reaching a node without one.
pub fn resolve_recursive(node: AnyNode<'_>) -> Chain {
    let doc = node.document();
    let mut current = node.id();
    let mut seen = HashSet::from([current]);
    loop {
        let Some(pointer) = doc.node(current).and_then(|n| n.reference()) else {
            return Chain::Resolved(current);
        };
        match resolve_in(doc, pointer) {
            Resolution::Found(target) => {
                if !seen.insert(target) {
                    return Chain::Circular(pointer.to_string());
                }
                current = target;
            }
            Resolution::NotFound => return Chain::Unresolved(pointer.to_string()),
            Resolution::External => return Chain::External(pointer.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Generation;
    use crate::model::{Definitions, Schema};

    fn definitions(names: &[(&str, Option<&str>)]) -> (Document, Vec<NodeId>) {
        let mut doc = Document::new(Generation::Oas20);
        let root = doc.root();
        let defs = doc.create(root, Definitions::default()).unwrap();
        doc.root_mut().definitions = Some(defs);
        let mut ids = Vec::new();
        for (name, reference) in names {
            let schema = Schema {
                reference: reference.map(str::to_string),
                ..Default::default()
            };
            let id = doc.create(defs, schema).unwrap();
            doc.add_entry(defs, *name, id).unwrap();
            ids.push(id);
        }
        (doc, ids)
    }

    #[test]
    fn hash_alone_is_the_root() {
        let (doc, _) = definitions(&[]);
        assert_eq!(resolve_in(&doc, "#"), Resolution::Found(doc.root()));
    }

    #[test]
    fn pointer_ending_on_a_list_is_not_found() {
        let (mut doc, _) = definitions(&[]);
        doc.root_mut().tags = Some(Vec::new());
        assert_eq!(resolve_in(&doc, "#/tags"), Resolution::NotFound);
    }

    #[test]
    fn escaped_segments_are_matched_literally() {
        let (doc, _) = definitions(&[("a/b", None)]);
        assert_eq!(resolve_in(&doc, "#/definitions/a~1b"), Resolution::NotFound);
    }

    #[test]
    fn cycle_ends_the_chain() {
        let (doc, ids) = definitions(&[
            ("A", Some("#/definitions/B")),
            ("B", Some("#/definitions/A")),
        ]);
        let a = doc.any(ids[0]).unwrap();
        assert_eq!(
            resolve_recursive(a),
            Chain::Circular("#/definitions/A".to_string())
        );
    }

    #[test]
    fn external_hop_is_reported_as_external() {
        let (doc, ids) = definitions(&[("A", Some("other.json#/Pet"))]);
        let a = doc.any(ids[0]).unwrap();
        assert!(can_resolve("other.json#/Pet", a));
        assert_eq!(
            resolve_recursive(a),
            Chain::External("other.json#/Pet".to_string())
        );
    }
}
