//! Problem lists rendered for hosts.
//!
//! Problems serialize with their rendered path; the node id is an arena
//! index and stays out of the output.

use crate::error::ReportError;
use crate::problem::Problem;

/// Renders problems as a pretty-printed JSON array.
pub fn to_json(problems: &[Problem]) -> Result<String, ReportError> {
    serde_json::to_string_pretty(problems).map_err(|e| ReportError {
        message: format!("failed to render problems as JSON: {}", e),
    })
}

/// Renders problems as a YAML sequence.
pub fn to_yaml(problems: &[Problem]) -> Result<String, ReportError> {
    // Through a JSON value so key order follows the struct.
    let value = serde_json::to_value(problems).map_err(|e| ReportError {
        message: format!("failed to convert problems to JSON: {}", e),
    })?;
    serde_saphyr::to_string(&value).map_err(|e| ReportError {
        message: format!("failed to render problems as YAML: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Severity;
    use crate::model::NodeId;
    use crate::path::NodePath;

    fn problem() -> Problem {
        Problem {
            code: "INF-001".to_string(),
            path: NodePath::parse("/info").unwrap(),
            property: Some("title".to_string()),
            message: "The info object is missing `title`.".to_string(),
            severity: Severity::Medium,
            node: NodeId(1),
        }
    }

    #[test]
    fn json_carries_rendered_path_and_no_node_id() {
        let json = to_json(&[problem()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["code"], "INF-001");
        assert_eq!(value[0]["path"], "/info");
        assert_eq!(value[0]["severity"], "medium");
        assert!(value[0].get("node").is_none());
    }

    #[test]
    fn yaml_lists_each_problem() {
        let yaml = to_yaml(&[problem(), problem()]).unwrap();
        assert_eq!(yaml.matches("INF-001").count(), 2);
        assert!(yaml.contains("/info"));
    }

    #[test]
    fn empty_list_renders_as_empty_array() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }
}
