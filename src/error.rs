use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::Generation;
use crate::model::{NodeId, NodeKind};

/// Produced by graph mutation when an operation violates the tree structure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("node kind {kind:?} does not exist in OpenAPI {generation}")]
    KindNotInGeneration { kind: NodeKind, generation: Generation },

    #[error("node {0:?} does not exist in this document")]
    UnknownNode(NodeId),

    #[error("node {id:?} is a {actual:?}, expected {expected:?}")]
    WrongKind {
        id: NodeId,
        expected: NodeKind,
        actual: NodeKind,
    },

    #[error("node {0:?} is not an indexed collection")]
    NotIndexed(NodeId),
}

/// Error kind for read failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadErrorKind {
    NotAnObject,
    UnknownGeneration,
    TypeMismatch,
}

/// Produced by [`crate::reader::read`] when a value cannot be mapped onto the node graph.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{path}: {message}")]
pub struct ReadError {
    pub kind: ReadErrorKind,
    /// Pointer-style location of the offending value (`#/info/title`).
    pub path: String,
    pub message: String,
}

impl ReadError {
    pub(crate) fn type_mismatch(path: &str, expected: &str) -> Self {
        ReadError {
            kind: ReadErrorKind::TypeMismatch,
            path: path.to_string(),
            message: format!("expected {}", expected),
        }
    }
}

/// Integrity violations detected while constructing a [`crate::catalog::RuleCatalog`].
///
/// These are programming errors in the catalog, never data errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate rule code: {0}")]
    DuplicateCode(String),

    #[error("duplicate rule name: {0}")]
    DuplicateName(String),

    #[error("rule {0} applies to no generation")]
    EmptyGenerations(String),
}

/// Produced when a severity configuration cannot be loaded.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid severity configuration: {0}")]
    Syntax(String),

    #[error("invalid severity configuration: {0}")]
    Shape(String),
}

/// Produced by [`crate::path::NodePath::parse`] for text that is not a rendered path.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("malformed node path {path:?} at byte {position}")]
pub struct PathParseError {
    pub path: String,
    pub position: usize,
}

/// Produced when a problem list cannot be rendered.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ReportError {
    pub message: String,
}
