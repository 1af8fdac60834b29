use serde::Serialize;
use std::fmt;

use crate::enums::Severity;
use crate::model::NodeId;
use crate::path::NodePath;

/// One reported violation, attached to the node that triggered it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub code: String,
    pub path: NodePath,
    /// Offending property, or `None` for node-level violations.
    pub property: Option<String>,
    pub message: String,
    pub severity: Severity,
    #[serde(skip)]
    pub node: NodeId,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.to_string();
        let at = if path.is_empty() { "/" } else { path.as_str() };
        match &self.property {
            Some(property) => write!(
                f,
                "[{}] {} ({}.{}): {}",
                self.severity, self.code, at, property, self.message
            ),
            None => write!(f, "[{}] {} ({}): {}", self.severity, self.code, at, self.message),
        }
    }
}
