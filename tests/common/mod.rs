pub mod fixtures;

use jjq::{JjqError, JsonConfig};
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Run a filter against single-quoted JSON text, the way the fixtures are written.
pub fn query(json: &str, filter: &str) -> Result<Vec<Value>, JjqError> {
    let config = JsonConfig {
        single_quotes: true,
        ..JsonConfig::default()
    };
    jjq::of_with(&config, json, filter)
}

/// Render every output compactly, preserving object key order.
pub fn render_all(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .map(|v| serde_json::to_string(v).expect("values always serialize"))
        .collect()
}
