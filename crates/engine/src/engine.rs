//! The lazy evaluation engine for executing a [`FilterNode`] against a stream of JSON values.
//!
//! Values flow through the engine as `Cow`s: inputs and anything selected out
//! of them are borrowed, freshly constructed values are owned. Nothing is
//! ever mutated in place.

use crate::ast::FilterNode;
use itertools::Itertools;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::iter;

/// A lazily computed sequence of JSON values.
pub type Values<'a> = Box<dyn Iterator<Item = Cow<'a, Value>> + 'a>;

/// Evaluates a filter against a single borrowed input value.
pub fn evaluate_value<'a>(node: &'a FilterNode, input: &'a Value) -> Values<'a> {
    evaluate(node, single(Cow::Borrowed(input)))
}

/// Evaluates a filter against a sequence of inputs, returning the outputs for
/// every input in order.
pub fn evaluate<'a>(node: &'a FilterNode, inputs: Values<'a>) -> Values<'a> {
    match node {
        FilterNode::Identity => inputs,
        FilterNode::Pipe(stages) => stages
            .iter()
            .fold(inputs, |values, stage| evaluate(stage, values)),
        FilterNode::Comma(branches) => Box::new(inputs.flat_map(move |input| {
            branches
                .iter()
                .flat_map(move |branch| evaluate(branch, single(input.clone())))
        })),
        FilterNode::FieldAccess(name) => Box::new(inputs.map(move |input| field(input, name))),
        FilterNode::IndexAccess(index) => {
            let index = *index;
            Box::new(inputs.map(move |input| element(input, index)))
        }
        FilterNode::StringLiteral(s) => {
            Box::new(inputs.map(move |_| Cow::Owned(Value::String(s.clone()))))
        }
        FilterNode::NumberLiteral(n) => {
            Box::new(inputs.map(move |_| Cow::Owned(Value::Number(n.clone()))))
        }
        FilterNode::EmptyArray => Box::new(inputs.map(|_| Cow::Owned(Value::Array(Vec::new())))),
        FilterNode::ArrayConstruct(contents) => Box::new(inputs.map(move |input| {
            let items = evaluate(contents, single(input)).map(Cow::into_owned).collect();
            Cow::Owned(Value::Array(items))
        })),
        FilterNode::EmptyObject => Box::new(inputs.map(|_| Cow::Owned(Value::Object(Map::new())))),
        FilterNode::ObjectConstruct(pairs) => {
            Box::new(inputs.flat_map(move |input| construct_objects(pairs, input)))
        }
    }
}

fn single(value: Cow<'_, Value>) -> Values<'_> {
    Box::new(iter::once(value))
}

// --- Access ---

fn field<'a>(input: Cow<'a, Value>, name: &str) -> Cow<'a, Value> {
    match input {
        Cow::Borrowed(value) => value
            .as_object()
            .and_then(|object| object.get(name))
            .map_or(Cow::Owned(Value::Null), Cow::Borrowed),
        Cow::Owned(Value::Object(mut object)) => {
            Cow::Owned(object.remove(name).unwrap_or(Value::Null))
        }
        Cow::Owned(_) => Cow::Owned(Value::Null),
    }
}

fn element(input: Cow<'_, Value>, index: usize) -> Cow<'_, Value> {
    match input {
        Cow::Borrowed(value) => value
            .as_array()
            .and_then(|items| items.get(index))
            .map_or(Cow::Owned(Value::Null), Cow::Borrowed),
        Cow::Owned(Value::Array(mut items)) if index < items.len() => {
            Cow::Owned(items.swap_remove(index))
        }
        Cow::Owned(_) => Cow::Owned(Value::Null),
    }
}

// --- Object Construction ---

/// Expands `{"k1": f1, ..., "kn": fn}` for one input into the cross product
/// of the outputs of every `fi`.
///
/// The first-declared key varies slowest. Keys are expected to be distinct,
/// as [`FilterNode::object`] guarantees.
fn construct_objects<'a>(
    pairs: &'a [(String, FilterNode)],
    input: Cow<'a, Value>,
) -> impl Iterator<Item = Cow<'a, Value>> + 'a {
    let columns: Vec<Vec<Cow<'a, Value>>> = pairs
        .iter()
        .map(|(_, filter)| evaluate(filter, single(input.clone())).collect())
        .collect();
    log::trace!(
        "Constructing objects from {} columns of sizes {:?}",
        columns.len(),
        columns.iter().map(Vec::len).collect::<Vec<_>>()
    );

    cross_product(pairs, columns)
}

/// Enumerates one object per combination of one value from each column,
/// iterating the last column fastest. Any empty column empties the product.
fn cross_product<'a>(
    pairs: &'a [(String, FilterNode)],
    columns: Vec<Vec<Cow<'a, Value>>>,
) -> impl Iterator<Item = Cow<'a, Value>> + 'a {
    columns
        .into_iter()
        .map(Vec::into_iter)
        .multi_cartesian_product()
        .map(move |row| {
            let object: Map<String, Value> = pairs
                .iter()
                .map(|(key, _)| key.clone())
                .zip(row.into_iter().map(Cow::into_owned))
                .collect();
            Cow::Owned(Value::Object(object))
        })
}
