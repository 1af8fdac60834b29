use super::common::{load_cases, read_input};
use oasdoc::{NodePath, path_of};
use serde_json::Value;

#[derive(Debug, serde::Deserialize)]
struct TestCase {
    id: String,
    name: String,
    #[serde(default)]
    generation: Option<String>,
    input: Value,
    nodes: Vec<ExpectedNode>,
}

#[derive(Debug, serde::Deserialize)]
struct ExpectedNode {
    path: String,
    kind: String,
}

#[test]
fn node_path_fixture_suite() {
    let cases: Vec<TestCase> = load_cases("paths.yaml");
    assert!(!cases.is_empty());

    let mut failed = 0;
    for case in &cases {
        let doc = read_input(&case.input, case.generation.as_deref());
        for expected in &case.nodes {
            let found = NodePath::parse(&expected.path)
                .ok()
                .and_then(|path| path.resolve(&doc));
            let Some(id) = found else {
                eprintln!("  FAIL [{}] {}: {:?} does not resolve", case.id, case.name, expected.path);
                failed += 1;
                continue;
            };
            let kind = doc.node(id).map(|n| n.kind().name()).unwrap_or_default();
            let rendered = path_of(&doc, id).to_string();
            if kind != expected.kind || rendered != expected.path {
                eprintln!(
                    "  FAIL [{}] {}: {:?} is a {} rendered as {:?}, expected a {}",
                    case.id, case.name, expected.path, kind, rendered, expected.kind
                );
                failed += 1;
            }
        }
    }

    assert_eq!(failed, 0, "{} node path fixture(s) failed", failed);
}
