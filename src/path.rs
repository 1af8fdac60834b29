//! Node addressing.
//!
//! A [`NodePath`] locates a node relative to the document root. Field names
//! render as `/name`; map keys and array positions render bracketed, as in
//! `/paths[/pets/{id}]/get/parameters[0]`. The root is the empty path.
//! Inside a key, `]` and `\` are escaped with a backslash; field names escape
//! `/` and `[` the same way.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::error::PathParseError;
use crate::model::{AnyNode, Child, Document, NodeData, NodeId};
use crate::visitor::{Oas20Visitor, Oas30Visitor, Visitor};

/// Escapes the next character inside a segment: `]` in keys, `/` and `[` in
/// field names, and itself.
const ESCAPE: char = '\\';

/// One step of a [`NodePath`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathSegment {
    pub value: String,
    /// `true` for a key or position inside a collection, `false` for a field.
    pub index: bool,
}

impl PathSegment {
    pub fn named(value: impl Into<String>) -> Self {
        PathSegment {
            value: value.into(),
            index: false,
        }
    }

    pub fn indexed(value: impl Into<String>) -> Self {
        PathSegment {
            value: value.into(),
            index: true,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close, special): (&str, &str, &[char]) = if self.index {
            ("[", "]", &[ESCAPE, ']'])
        } else {
            ("/", "", &[ESCAPE, '/', '['])
        };
        f.write_str(open)?;
        for c in self.value.chars() {
            if special.contains(&c) {
                write!(f, "{ESCAPE}")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str(close)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    pub segments: Vec<PathSegment>,
}

impl NodePath {
    pub fn root() -> Self {
        NodePath::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// Parses the rendered form back into segments.
    pub fn parse(input: &str) -> Result<Self, PathParseError> {
        let error = |position| PathParseError {
            path: input.to_string(),
            position,
        };
        let mut segments = Vec::new();
        let mut chars = input.char_indices().peekable();
        while let Some((pos, c)) = chars.next() {
            let index = match c {
                '/' => false,
                '[' => true,
                _ => return Err(error(pos)),
            };
            let mut value = String::new();
            let mut closed = false;
            while let Some(&(at, c)) = chars.peek() {
                if !index && (c == '/' || c == '[') {
                    break;
                }
                chars.next();
                match c {
                    ESCAPE => match chars.next() {
                        Some((_, escaped)) => value.push(escaped),
                        None => return Err(error(at)),
                    },
                    ']' if index => {
                        closed = true;
                        break;
                    }
                    _ => value.push(c),
                }
            }
            if index && !closed {
                return Err(error(pos));
            }
            if !index && value.is_empty() {
                return Err(error(pos));
            }
            segments.push(PathSegment { value, index });
        }
        Ok(NodePath { segments })
    }

    /// Walks the path from the root of `doc`.
    pub fn resolve(&self, doc: &Document) -> Option<NodeId> {
        enum Cursor<'a> {
            Node(NodeId),
            Slot(Child<'a>),
        }

        let mut cursor = Cursor::Node(doc.root());
        for segment in &self.segments {
            cursor = match cursor {
                Cursor::Node(id) => {
                    let data = doc.node(id)?.data();
                    if segment.index {
                        Cursor::Node(data.as_indexed()?.get(&segment.value)?)
                    } else {
                        match field(data, &segment.value)? {
                            Child::Node(child) => Cursor::Node(child),
                            slot => Cursor::Slot(slot),
                        }
                    }
                }
                Cursor::Slot(slot) => {
                    if !segment.index {
                        return None;
                    }
                    match slot {
                        Child::Map(map) => Cursor::Node(*map.get(&segment.value)?),
                        Child::List(list) => {
                            let i: usize = segment.value.parse().ok()?;
                            Cursor::Node(*list.get(i)?)
                        }
                        Child::Node(_) => return None,
                    }
                }
            };
        }
        match cursor {
            Cursor::Node(id) => Some(id),
            Cursor::Slot(_) => None,
        }
    }
}

fn field<'a>(data: &'a NodeData, name: &str) -> Option<Child<'a>> {
    data.children()
        .into_iter()
        .find(|(field, _)| *field == name)
        .map(|(_, child)| child)
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodePath::parse(s)
    }
}

impl Serialize for NodePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        NodePath::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Builds a path by visiting a node and then each of its ancestors.
///
/// Each visit prepends the segments that locate the visited node inside its
/// parent, found by scanning the parent's children for the node's id.
#[derive(Debug, Default)]
pub struct NodePathVisitor {
    segments: VecDeque<PathSegment>,
}

impl NodePathVisitor {
    pub fn into_path(self) -> NodePath {
        NodePath {
            segments: self.segments.into(),
        }
    }
}

impl Visitor for NodePathVisitor {
    fn visit_node(&mut self, node: AnyNode<'_>) {
        let Some(parent) = node.parent() else {
            return;
        };
        for segment in locate(parent.get().data(), node.id()).into_iter().rev() {
            self.segments.push_front(segment);
        }
    }
}

impl Oas20Visitor for NodePathVisitor {}
impl Oas30Visitor for NodePathVisitor {}

fn locate(parent: &NodeData, child: NodeId) -> Vec<PathSegment> {
    for (name, slot) in parent.children() {
        match slot {
            Child::Node(id) if id == child => return vec![PathSegment::named(name)],
            Child::Map(map) => {
                if let Some((key, _)) = map.iter().find(|(_, id)| **id == child) {
                    return vec![PathSegment::named(name), PathSegment::indexed(key.as_str())];
                }
            }
            Child::List(list) => {
                if let Some(i) = list.iter().position(|id| *id == child) {
                    return vec![PathSegment::named(name), PathSegment::indexed(i.to_string())];
                }
            }
            Child::Node(_) => {}
        }
    }
    if let Some(indexed) = parent.as_indexed()
        && let Some((key, _)) = indexed.entries().iter().find(|(_, id)| **id == child)
    {
        return vec![PathSegment::indexed(key.as_str())];
    }
    Vec::new()
}

/// Computes the path of `id`. Unknown ids and detached nodes yield partial paths.
pub fn path_of(doc: &Document, id: NodeId) -> NodePath {
    let mut visitor = NodePathVisitor::default();
    let mut cursor = doc.any(id);
    let mut remaining = doc.len();
    while let Some(node) = cursor
        && remaining > 0
    {
        node.accept_rule(&mut visitor);
        cursor = node.parent();
        remaining -= 1;
    }
    visitor.into_path()
}
