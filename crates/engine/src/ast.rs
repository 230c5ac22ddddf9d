//! Defines the filter AST evaluated by the engine.
use serde_json::Number;
use std::fmt;

/// An immutable, evaluable filter. One variant per operator of the language.
///
/// `Pipe` and `Comma` always hold at least two children; use
/// [`FilterNode::pipe`] and [`FilterNode::comma`] to collapse singletons.
/// `ObjectConstruct` keys are distinct; [`FilterNode::object`] merges repeats.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    /// `.`
    Identity,
    /// Threads the outputs of each stage into the next one.
    Pipe(Vec<FilterNode>),
    /// Runs every branch against the same input and concatenates the outputs.
    Comma(Vec<FilterNode>),
    /// `.name`, `null` when absent or when the input is not an object.
    FieldAccess(String),
    /// `.[i]`, `null` when out of range or when the input is not an array.
    IndexAccess(usize),
    StringLiteral(String),
    NumberLiteral(Number),
    /// `[]`
    EmptyArray,
    /// `[f]`, collecting every output of `f` into one array.
    ArrayConstruct(Box<FilterNode>),
    /// `{}`
    EmptyObject,
    /// `{"k1": f1, "k2": f2, ...}`, expanded as a cross product over the outputs of each `fi`.
    ObjectConstruct(Vec<(String, FilterNode)>),
}

impl FilterNode {
    /// Builds a pipe, collapsing a single stage into the stage itself.
    ///
    /// Returns `None` when there are no stages at all.
    pub fn pipe(mut stages: Vec<FilterNode>) -> Option<FilterNode> {
        match stages.len() {
            0 => None,
            1 => stages.pop(),
            _ => Some(FilterNode::Pipe(stages)),
        }
    }

    /// Builds a comma, collapsing a single branch into the branch itself.
    ///
    /// Returns `None` when there are no branches at all.
    pub fn comma(mut branches: Vec<FilterNode>) -> Option<FilterNode> {
        match branches.len() {
            0 => None,
            1 => branches.pop(),
            _ => Some(FilterNode::Comma(branches)),
        }
    }

    /// Builds an object constructor. A repeated key keeps the position of its
    /// first declaration and the filter of its last one.
    ///
    /// Returns `EmptyObject` when there are no pairs at all.
    pub fn object(pairs: Vec<(String, FilterNode)>) -> FilterNode {
        if pairs.is_empty() {
            return FilterNode::EmptyObject;
        }
        let mut merged: Vec<(String, FilterNode)> = Vec::with_capacity(pairs.len());
        for (key, filter) in pairs {
            match merged.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = filter,
                None => merged.push((key, filter)),
            }
        }
        FilterNode::ObjectConstruct(merged)
    }

    /// Checks if the node is a `Pipe` or `Comma`, which need parentheses
    /// wherever a single term is expected.
    pub fn is_composite(&self) -> bool {
        matches!(self, FilterNode::Pipe(_) | FilterNode::Comma(_))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
    f.write_str(&quoted)
}

fn write_term(f: &mut fmt::Formatter<'_>, node: &FilterNode, needs_parens: bool) -> fmt::Result {
    if needs_parens {
        write!(f, "({})", node)
    } else {
        write!(f, "{}", node)
    }
}

impl fmt::Display for FilterNode {
    /// Renders the canonical filter text. Re-parsing and building it yields an equal node.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterNode::Identity => f.write_str("."),
            FilterNode::Pipe(stages) => {
                for (i, stage) in stages.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write_term(f, stage, matches!(stage, FilterNode::Pipe(_)))?;
                }
                Ok(())
            }
            FilterNode::Comma(branches) => {
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_term(f, branch, branch.is_composite())?;
                }
                Ok(())
            }
            FilterNode::FieldAccess(name) if is_identifier(name) => write!(f, ".{}", name),
            FilterNode::FieldAccess(name) => {
                f.write_str(".[")?;
                write_quoted(f, name)?;
                f.write_str("]")
            }
            FilterNode::IndexAccess(index) => write!(f, ".[{}]", index),
            FilterNode::StringLiteral(s) => write_quoted(f, s),
            FilterNode::NumberLiteral(n) => write!(f, "{}", n),
            FilterNode::EmptyArray => f.write_str("[]"),
            FilterNode::ArrayConstruct(contents) => write!(f, "[{}]", contents),
            FilterNode::EmptyObject => f.write_str("{}"),
            FilterNode::ObjectConstruct(pairs) => {
                f.write_str("{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_quoted(f, key)?;
                    f.write_str(": ")?;
                    write_term(f, value, value.is_composite())?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str) -> FilterNode {
        FilterNode::FieldAccess(name.to_string())
    }

    #[test]
    fn test_singleton_collapse() {
        assert_eq!(FilterNode::pipe(vec![field("a")]), Some(field("a")));
        assert_eq!(FilterNode::comma(vec![field("a")]), Some(field("a")));
        assert_eq!(FilterNode::pipe(vec![]), None);
        assert_eq!(
            FilterNode::comma(vec![field("a"), field("b")]),
            Some(FilterNode::Comma(vec![field("a"), field("b")]))
        );
    }

    #[test]
    fn test_object_merges_repeated_keys() {
        assert_eq!(FilterNode::object(vec![]), FilterNode::EmptyObject);
        let merged = FilterNode::object(vec![
            ("k".into(), field("a")),
            ("other".into(), field("b")),
            ("k".into(), field("c")),
        ]);
        assert_eq!(
            merged,
            FilterNode::ObjectConstruct(vec![("k".into(), field("c")), ("other".into(), field("b"))])
        );
    }

    #[test]
    fn test_display_access() {
        assert_eq!(field("aA123").to_string(), ".aA123");
        assert_eq!(field("aBLAH123-foo::$$").to_string(), r#".["aBLAH123-foo::$$"]"#);
        assert_eq!(field("").to_string(), r#".[""]"#);
        assert_eq!(FilterNode::IndexAccess(3).to_string(), ".[3]");
    }

    #[test]
    fn test_display_parenthesizes_nested_composites() {
        let node = FilterNode::Pipe(vec![
            FilterNode::Pipe(vec![field("a"), field("b")]),
            FilterNode::Comma(vec![field("c"), FilterNode::Identity]),
        ]);
        assert_eq!(node.to_string(), "(.a | .b) | .c, .");

        let node = FilterNode::ObjectConstruct(vec![
            (
                "aa".into(),
                FilterNode::Comma(vec![
                    FilterNode::NumberLiteral(1.into()),
                    FilterNode::NumberLiteral(2.into()),
                ]),
            ),
            ("b\"b".into(), FilterNode::StringLiteral("x".into())),
        ]);
        assert_eq!(node.to_string(), r#"{"aa": (1, 2), "b\"b": "x"}"#);
    }

    #[test]
    fn test_display_constructors() {
        assert_eq!(FilterNode::EmptyArray.to_string(), "[]");
        assert_eq!(FilterNode::EmptyObject.to_string(), "{}");
        let node = FilterNode::ArrayConstruct(Box::new(FilterNode::Pipe(vec![
            field("g"),
            FilterNode::IndexAccess(2),
        ])));
        assert_eq!(node.to_string(), "[.g | .[2]]");
    }

    #[test]
    fn test_filter_node_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FilterNode>();
    }
}
