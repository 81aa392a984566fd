//! Fixture loading from YAML files

use rvjson_core::ErrorKind;
use serde::Deserialize;
use std::path::Path;

/// A single test case from a fixture file.
///
/// Exactly one of `events` (the input parses) or `error` (it fails) is
/// expected to be set.
#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub desc: String,
    pub json: String,
    #[serde(default)]
    pub events: Vec<ExpectedEvent>,
    #[serde(default)]
    pub error: Option<ExpectedError>,
}

/// Expected event - either a bare name or [name, content]
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExpectedEvent {
    /// Structure or keyword event (BeginObject, Null, ...)
    Bare(String),
    /// Event with a payload [Name, "raw"], [Number, "1.5"], [Bool, "true"]
    WithContent(String, String),
}

/// Expected failure, written as [Kind, offset]
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedError(pub String, pub usize);

impl ExpectedError {
    pub fn kind(&self) -> ErrorKind {
        self.0
            .parse()
            .unwrap_or_else(|e| panic!("Bad error kind in fixture: {}", e))
    }

    pub fn offset(&self) -> usize {
        self.1
    }
}

/// Load all test cases from a YAML fixture file
pub fn load_fixtures(path: &Path) -> Vec<TestCase> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read fixture file {:?}: {}", path, e));
    serde_yaml::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture file {:?}: {}", path, e))
}

/// Load fixtures from the standard fixtures directory
pub fn load_fixtures_by_name(name: &str) -> Vec<TestCase> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.yaml", name));
    load_fixtures(&path)
}
