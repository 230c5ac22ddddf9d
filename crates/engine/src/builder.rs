//! Builds a [`FilterNode`] tree out of a [`ParseTree`].
//!
//! The builder is pure and single pass. It strips and decodes string tokens,
//! narrows integral number literals, validates index tokens, collapses
//! single-operand pipes and commas, merges repeated object keys, and desugars
//! access chains into pipes.
use crate::ast::FilterNode;
use crate::error::BuildError;
use jjq_syntax::{AccessStep, Pair, ParseTree};
use serde_json::Number;

/// Builds an evaluable filter from a parse tree.
pub fn build(tree: &ParseTree) -> Result<FilterNode, BuildError> {
    let node = build_node(tree)?;
    log::debug!("Built filter `{}`", node);
    Ok(node)
}

fn build_node(tree: &ParseTree) -> Result<FilterNode, BuildError> {
    match tree {
        ParseTree::Pipe(operands) => {
            FilterNode::pipe(build_all(operands)?).ok_or(BuildError::EmptyProduction("pipe"))
        }
        ParseTree::Comma(operands) => {
            FilterNode::comma(build_all(operands)?).ok_or(BuildError::EmptyProduction("comma"))
        }
        ParseTree::Paren(inner) => build_node(inner),
        ParseTree::Identity => Ok(FilterNode::Identity),
        ParseTree::Access(steps) => {
            let steps = steps.iter().map(build_access).collect::<Result<Vec<_>, _>>()?;
            FilterNode::pipe(steps).ok_or(BuildError::EmptyProduction("access"))
        }
        ParseTree::StringLiteral(token) => decode_string(token).map(FilterNode::StringLiteral),
        ParseTree::NumberLiteral(token) => parse_number(token).map(FilterNode::NumberLiteral),
        ParseTree::ArrayLiteral(None) => Ok(FilterNode::EmptyArray),
        ParseTree::ArrayLiteral(Some(contents)) => {
            Ok(FilterNode::ArrayConstruct(Box::new(build_node(contents)?)))
        }
        ParseTree::ObjectLiteral(pairs) => pairs
            .iter()
            .map(build_pair)
            .collect::<Result<Vec<_>, _>>()
            .map(FilterNode::object),
    }
}

fn build_all(trees: &[ParseTree]) -> Result<Vec<FilterNode>, BuildError> {
    trees.iter().map(build_node).collect()
}

fn build_pair(pair: &Pair) -> Result<(String, FilterNode), BuildError> {
    Ok((decode_string(&pair.key)?, build_node(&pair.value)?))
}

fn build_access(step: &AccessStep) -> Result<FilterNode, BuildError> {
    match step {
        AccessStep::Field(name) => Ok(FilterNode::FieldAccess(name.clone())),
        AccessStep::QuotedField(token) => decode_string(token).map(FilterNode::FieldAccess),
        AccessStep::Index(token) => parse_index(token).map(FilterNode::IndexAccess),
    }
}

// --- Token Interpretation ---

/// Strips the quotes off a string token and decodes its JSON escapes.
fn decode_string(token: &str) -> Result<String, BuildError> {
    serde_json::from_str(token).map_err(|e| BuildError::MalformedString {
        token: token.to_string(),
        message: e.to_string(),
    })
}

/// Parses a number token as a float, narrowing whole values to integers so
/// that `12345` and `-123.456e5` render without a fractional part.
fn parse_number(token: &str) -> Result<Number, BuildError> {
    let malformed = || BuildError::MalformedNumber(token.to_string());
    let value: f64 = token.parse().map_err(|_| malformed())?;
    if !value.is_finite() {
        return Err(malformed());
    }
    // `i64::MAX as f64` rounds up to 2^63, hence the strict upper bound.
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        return Ok(Number::from(value as i64));
    }
    Number::from_f64(value).ok_or_else(malformed)
}

/// Only plain non-negative base-10 integers are valid indices: no rounding,
/// no truncation, no negative indexing.
fn parse_index(token: &str) -> Result<usize, BuildError> {
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BuildError::MalformedIndex(token.to_string()));
    }
    token
        .parse()
        .map_err(|_| BuildError::MalformedIndex(token.to_string()))
}
