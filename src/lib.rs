//! JJQ: a small `jq`-style filter language for JSON.
//!
//! A filter such as `.a , { "new-value": .b.c.[1] }` is compiled once into a
//! [`Filter`] and applied to any number of JSON values, producing an ordered
//! sequence of output values for each input.
//!
//! ```
//! use serde_json::json;
//!
//! let outputs = jjq::run(r#"{"aa": (1,2), "bb": ("a","b")}"#, &json!(null)).unwrap();
//! assert_eq!(outputs.len(), 4);
//! assert_eq!(outputs[1], json!({ "aa": 1, "bb": "b" }));
//! ```

pub mod codec;
pub mod config;
mod error;
mod filter;

// --- Public API ---
pub use codec::{JsonCodec, SerdeJsonCodec};
pub use config::{JsonConfig, OutputStyle};
pub use error::JjqError;
pub use filter::Filter;
pub use jjq_engine::{BuildError, FilterNode, Values};
pub use jjq_syntax::{MAX_NESTING_DEPTH, ParseTree, SyntaxError, parse_filter};

use serde_json::Value;

/// Compiles `filter_text` and runs it once against `input`.
pub fn run(filter_text: &str, input: &Value) -> Result<Vec<Value>, JjqError> {
    let filter = Filter::compile(filter_text)?;
    Ok(filter.apply(input).map(|v| v.into_owned()).collect())
}

/// Runs a prebuilt filter against a sequence of inputs.
pub fn run_filter<'a, I>(node: &'a FilterNode, inputs: I) -> Vec<Value>
where
    I: IntoIterator<Item = Value>,
    I::IntoIter: 'a,
{
    let inputs: Values<'a> = Box::new(inputs.into_iter().map(std::borrow::Cow::Owned));
    jjq_engine::evaluate(node, inputs)
        .map(|v| v.into_owned())
        .collect()
}

/// Parses `json` text and runs `filter_text` against it.
pub fn of(json: &str, filter_text: &str) -> Result<Vec<Value>, JjqError> {
    of_with(&JsonConfig::default(), json, filter_text)
}

/// Like [`of`], with explicit JSON parsing options.
pub fn of_with(config: &JsonConfig, json: &str, filter_text: &str) -> Result<Vec<Value>, JjqError> {
    let input = SerdeJsonCodec::new(*config).parse(json)?;
    run(filter_text, &input)
}
