use oasdoc::{Document, Generation, read, read_as};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::PathBuf;

pub fn fixtures_dir() -> PathBuf {
    std::env::var("OASDOC_FIXTURES_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

/// Loads every case from a fixture file.
pub fn load_cases<T: DeserializeOwned>(name: &str) -> Vec<T> {
    let path = fixtures_dir().join(name);
    assert!(path.exists(), "Fixture not found: {:?}", path);
    let content = std::fs::read_to_string(&path).unwrap();
    serde_saphyr::from_str(&content).unwrap()
}

/// Reads a fixture input, forcing the generation when one is given.
pub fn read_input(input: &Value, generation: Option<&str>) -> Document {
    match generation {
        Some("2.0") => read_as(input, Generation::Oas20).unwrap(),
        Some("3.0") => read_as(input, Generation::Oas30).unwrap(),
        Some(other) => panic!("unknown generation {other:?}"),
        None => read(input).unwrap(),
    }
}
