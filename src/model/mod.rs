//! The in-memory node graph.
//!
//! A [`Document`] owns every node in an arena; nodes refer to their parent
//! and children by [`NodeId`]. Ownership is strictly tree-shaped: `$ref`
//! pointers stay strings and are followed on demand by the
//! [`resolver`](crate::resolver), and parent links are plain ids.

pub mod known;
mod kind;
mod nodes;

pub use kind::{NodeData, NodeKind, NodeType};
pub use nodes::*;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::Deref;

use crate::enums::{Generation, Severity};
use crate::error::ModelError;
use crate::path::NodePath;
use crate::problem::Problem;

/// Index of a node in its document's arena.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document root is always the first node.
    pub const ROOT: NodeId = NodeId(0);
}

/// An `x-` extension property.
#[derive(Clone, Debug, PartialEq)]
pub struct Extension {
    pub name: String,
    pub value: Value,
}

/// Arena record for one node.
#[derive(Clone, Debug)]
pub struct Node {
    id: NodeId,
    parent: Option<NodeId>,
    data: NodeData,
    extensions: Vec<Extension>,
    extra: IndexMap<String, Value>,
    problems: Vec<Problem>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn reference(&self) -> Option<&str> {
        self.data.reference()
    }

    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    pub fn add_extension(&mut self, name: impl Into<String>, value: Value) {
        self.extensions.push(Extension {
            name: name.into(),
            value,
        });
    }

    /// Properties present on the source object that no typed field holds.
    pub fn extra(&self) -> &IndexMap<String, Value> {
        &self.extra
    }

    pub fn extra_names(&self) -> impl Iterator<Item = &str> {
        self.extra.keys().map(String::as_str)
    }

    pub fn add_extra(&mut self, name: impl Into<String>, value: Value) {
        self.extra.insert(name.into(), value);
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn add_problem(
        &mut self,
        code: &str,
        path: NodePath,
        property: Option<&str>,
        message: String,
        severity: Severity,
    ) -> &Problem {
        self.problems.push(Problem {
            code: code.to_string(),
            path,
            property: property.map(str::to_string),
            message,
            severity,
            node: self.id,
        });
        &self.problems[self.problems.len() - 1]
    }

    pub fn clear_problems(&mut self) {
        self.problems.clear();
    }
}

/// A parsed API description: the owner of every node.
#[derive(Clone, Debug)]
pub struct Document {
    generation: Generation,
    nodes: Vec<Node>,
}

impl Document {
    /// Creates an empty document whose root carries no properties.
    pub fn new(generation: Generation) -> Self {
        Document {
            generation,
            nodes: vec![Node {
                id: NodeId::ROOT,
                parent: None,
                data: NodeData::Document(DocumentRoot::default()),
                extensions: Vec::new(),
                extra: IndexMap::new(),
                problems: Vec::new(),
            }],
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes in the arena, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn get<T: NodeType>(&self, id: NodeId) -> Option<&T> {
        self.node(id).and_then(|n| T::from_data(&n.data))
    }

    pub fn get_mut<T: NodeType>(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_mut(id).and_then(|n| T::from_data_mut(&mut n.data))
    }

    /// Typed access that reports why it failed.
    pub fn try_get_mut<T: NodeType>(&mut self, id: NodeId) -> Result<&mut T, ModelError> {
        let node = self.node_mut(id).ok_or(ModelError::UnknownNode(id))?;
        let actual = node.kind();
        T::from_data_mut(&mut node.data).ok_or(ModelError::WrongKind {
            id,
            expected: T::KIND,
            actual,
        })
    }

    pub fn root_node(&self) -> &DocumentRoot {
        match &self.nodes[0].data {
            NodeData::Document(root) => root,
            _ => unreachable!("node 0 is always the document root"),
        }
    }

    pub fn root_mut(&mut self) -> &mut DocumentRoot {
        match &mut self.nodes[0].data {
            NodeData::Document(root) => root,
            _ => unreachable!("node 0 is always the document root"),
        }
    }

    /// A borrowed, typed view of a node.
    pub fn view<T: NodeType>(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        let node = self.get::<T>(id)?;
        Some(NodeRef { doc: self, id, node })
    }

    /// A borrowed, untyped view of a node.
    pub fn any(&self, id: NodeId) -> Option<AnyNode<'_>> {
        let node = self.node(id)?;
        Some(NodeRef { doc: self, id, node })
    }

    /// Creates a node as a child of `parent`.
    ///
    /// The new node has its parent link set but is not yet reachable: attach
    /// it through a typed setter or [`Document::add_entry`].
    pub fn create(
        &mut self,
        parent: NodeId,
        data: impl Into<NodeData>,
    ) -> Result<NodeId, ModelError> {
        let data = data.into();
        let kind = data.kind();
        if !kind.exists_in(self.generation) {
            return Err(ModelError::KindNotInGeneration {
                kind,
                generation: self.generation,
            });
        }
        if self.node(parent).is_none() {
            return Err(ModelError::UnknownNode(parent));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            parent: Some(parent),
            data,
            extensions: Vec::new(),
            extra: IndexMap::new(),
            problems: Vec::new(),
        });
        Ok(id)
    }

    /// Adds `item` under `name` in an indexed collection, returning the entry
    /// it replaced (which is detached).
    pub fn add_entry(
        &mut self,
        collection: NodeId,
        name: impl Into<String>,
        item: NodeId,
    ) -> Result<Option<NodeId>, ModelError> {
        if self.node(item).is_none() {
            return Err(ModelError::UnknownNode(item));
        }
        let node = self
            .node_mut(collection)
            .ok_or(ModelError::UnknownNode(collection))?;
        let entries = node
            .data
            .as_indexed_mut()
            .ok_or(ModelError::NotIndexed(collection))?;
        let replaced = entries.add(name.into(), item);
        self.nodes[item.0].parent = Some(collection);
        if let Some(old) = replaced
            && old != item
        {
            self.detach(old);
        }
        Ok(replaced)
    }

    /// Removes the entry `name` from an indexed collection and detaches it.
    pub fn remove_entry(
        &mut self,
        collection: NodeId,
        name: &str,
    ) -> Result<Option<NodeId>, ModelError> {
        let node = self
            .node_mut(collection)
            .ok_or(ModelError::UnknownNode(collection))?;
        let entries = node
            .data
            .as_indexed_mut()
            .ok_or(ModelError::NotIndexed(collection))?;
        let removed = entries.remove(name);
        if let Some(id) = removed {
            self.detach(id);
        }
        Ok(removed)
    }

    /// Clears the parent link of a node the caller has unlinked from its
    /// parent's fields.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.parent = None;
        }
    }

    /// Every structural child of `id` in walk order: fields first, then
    /// indexed entries.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.node(id) else {
            return Vec::new();
        };
        let mut out: Vec<NodeId> = node
            .data
            .children()
            .into_iter()
            .flat_map(|(_, child)| child.ids())
            .collect();
        if let Some(indexed) = node.data.as_indexed() {
            out.extend(indexed.all());
        }
        out
    }

    /// Ids of every node reachable from the root, in walk order.
    pub fn reachable(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            out.push(id);
            let children = self.children(id);
            stack.extend(children.into_iter().rev());
        }
        out
    }

    pub fn clear_problems(&mut self) {
        for node in &mut self.nodes {
            node.clear_problems();
        }
    }

    /// Every attached problem, in arena order.
    pub fn problems(&self) -> impl Iterator<Item = &Problem> {
        self.nodes.iter().flat_map(|n| n.problems.iter())
    }
}

/// A node borrowed from its document, typed as `T`.
///
/// Dereferences to the payload; the document stays reachable for navigation.
pub struct NodeRef<'a, T> {
    doc: &'a Document,
    id: NodeId,
    node: &'a T,
}

/// A node borrowed from its document without a static kind.
pub type AnyNode<'a> = NodeRef<'a, Node>;

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<'a, T> Deref for NodeRef<'a, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.node
    }
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(doc: &'a Document, id: NodeId, node: &'a T) -> Self {
        NodeRef { doc, id, node }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn get(&self) -> &'a T {
        self.node
    }

    pub fn generation(&self) -> Generation {
        self.doc.generation
    }

    /// The arena record of this node.
    pub fn record(&self) -> &'a Node {
        &self.doc.nodes[self.id.0]
    }

    pub fn parent(&self) -> Option<AnyNode<'a>> {
        self.record().parent.and_then(|p| self.doc.any(p))
    }

    pub fn erase(&self) -> AnyNode<'a> {
        NodeRef {
            doc: self.doc,
            id: self.id,
            node: self.record(),
        }
    }

    /// Typed view of another node in the same document.
    pub fn view<U: NodeType>(&self, id: NodeId) -> Option<NodeRef<'a, U>> {
        self.doc.view(id)
    }
}

impl<'a> NodeRef<'a, Node> {
    pub fn downcast<U: NodeType>(&self) -> Option<NodeRef<'a, U>> {
        self.doc.view(self.id)
    }
}
