use super::common::{load_cases, read_input};
use oasdoc::Problem;
use serde_json::Value;

/// A single validation case from the fixture suite.
#[derive(Debug, serde::Deserialize)]
struct TestCase {
    id: String,
    name: String,
    #[serde(default)]
    generation: Option<String>,
    input: Value,
    expected: Expected,
}

#[derive(Debug, serde::Deserialize)]
struct Expected {
    #[serde(default)]
    valid: Option<bool>,
    #[serde(default)]
    problems: Vec<ExpectedProblem>,
}

#[derive(Debug, serde::Deserialize)]
struct ExpectedProblem {
    code: String,
    path: String,
    #[serde(default)]
    property: Option<String>,
}

impl ExpectedProblem {
    fn matches(&self, problem: &Problem) -> bool {
        problem.code == self.code
            && problem.path.to_string() == self.path
            && match &self.property {
                Some(property) => problem.property.as_deref() == Some(property.as_str()),
                None => true,
            }
    }
}

#[test]
fn validate_fixture_suite() {
    let cases: Vec<TestCase> = load_cases("validate.yaml");
    assert!(!cases.is_empty());

    let mut failed = 0;
    for case in &cases {
        let mut doc = read_input(&case.input, case.generation.as_deref());
        let problems = oasdoc::validate(&mut doc);
        let mut case_ok = true;

        if case.expected.valid == Some(true) && !problems.is_empty() {
            eprintln!(
                "  FAIL [{}] {}: expected valid but got {} problems",
                case.id,
                case.name,
                problems.len()
            );
            case_ok = false;
        }
        for expected in &case.expected.problems {
            if !problems.iter().any(|p| expected.matches(p)) {
                eprintln!(
                    "  FAIL [{}] {}: expected {} at {:?} ({:?}) not found",
                    case.id, case.name, expected.code, expected.path, expected.property
                );
                case_ok = false;
            }
        }
        if !case_ok {
            eprintln!("    Actual problems:");
            for p in &problems {
                eprintln!("      - {} at {:?} ({:?}): {}", p.code, p.path.to_string(), p.property, p.message);
            }
            failed += 1;
        }
    }

    eprintln!("Validation fixtures: {} cases, {} failed", cases.len(), failed);
    assert_eq!(failed, 0, "{} validation fixture(s) failed", failed);
}
