use crate::error::JjqError;
use jjq_engine::{FilterNode, Values, build, evaluate_value};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A compiled filter, ready to be applied to any number of inputs.
///
/// Compiling is the only step that can fail; applying a filter never does.
/// A `Filter` is immutable and can be shared freely between threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    node: FilterNode,
}

impl Filter {
    /// Parses and builds a filter from its textual form.
    pub fn compile(text: &str) -> Result<Self, JjqError> {
        let tree = jjq_syntax::parse_filter(text)?;
        Ok(Self { node: build(&tree)? })
    }

    pub fn node(&self) -> &FilterNode {
        &self.node
    }

    /// Lazily evaluates the filter against one input.
    pub fn apply<'a>(&'a self, input: &'a Value) -> Values<'a> {
        evaluate_value(&self.node, input)
    }

    /// Evaluates the filter against every input in turn and collects all outputs.
    pub fn apply_all<'a, I>(&'a self, inputs: I) -> Vec<Value>
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'a,
    {
        crate::run_filter(&self.node, inputs)
    }
}

impl FromStr for Filter {
    type Err = JjqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::compile(s)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node)
    }
}
