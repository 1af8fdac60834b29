//! Document model and validation engine for OpenAPI descriptions.
//!
//! `oasdoc` reads an OpenAPI 2.0 or 3.0 description into a typed node graph,
//! lets hosts inspect and mutate it, and validates it against a catalog of
//! rules covering both generations:
//!
//! ```text
//! read(value) → Document → validate(doc) → Vec<Problem>
//!                        → resolve(pointer) / path_of(node)
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//!
//! let value = json!({
//!     "openapi": "3.0.3",
//!     "info": { "title": "Pets", "version": "1.0" },
//!     "paths": {
//!         "/pets": {
//!             "get": { "responses": { "200": { "description": "All pets" } } }
//!         }
//!     }
//! });
//!
//! let result = oasdoc::load(&value).expect("readable document");
//! assert!(result.problems.is_empty());
//! ```
//!
//! Parsing text is left to the host: anything that produces a
//! [`serde_json::Value`] (JSON or YAML) can feed [`read`].
//!
//! # Rules and severity
//!
//! Every rule has a stable code (`PAR-016`, `SS-003`, ...). Rules the
//! OpenAPI specification mandates report at `medium` by default; best-practice
//! rules are off until a [`SeverityPolicy`] turns them on. See
//! [`SeverityConfig`] for the configuration format.

pub mod catalog;
pub mod engine;
pub mod enums;
pub mod error;
pub mod formats;
pub mod model;
pub mod path;
pub mod policy;
pub mod problem;
pub mod reader;
pub mod report;
pub mod resolver;
pub mod visitor;

mod rules;

pub use catalog::{RuleCatalog, RuleDescriptor};
pub use engine::{Reporter, ValidationEngine, validate};
pub use enums::{Generation, RuleFamily, Severity};
pub use error::*;
pub use model::{AnyNode, Document, Node, NodeId, NodeKind, NodeRef};
pub use path::{NodePath, PathSegment, path_of};
pub use policy::{DefaultSeverityPolicy, SeverityConfig, SeverityPolicy};
pub use problem::Problem;
pub use reader::{read, read_as};
pub use resolver::{Chain, Resolution, can_resolve, resolve, resolve_recursive};

/// Result of the [`load`] convenience entry point.
pub struct LoadResult {
    /// The document, with problems attached to their nodes.
    pub document: Document,
    /// Every problem found, in traversal order.
    pub problems: Vec<Problem>,
}

/// Convenience entry point composing read → validate.
///
/// # Errors
///
/// Returns a [`ReadError`] if the value cannot be mapped onto a document.
/// Validation problems are never errors; they come back in
/// [`LoadResult::problems`].
pub fn load(value: &serde_json::Value) -> Result<LoadResult, ReadError> {
    let mut document = reader::read(value)?;
    let problems = engine::validate(&mut document);
    Ok(LoadResult { document, problems })
}
