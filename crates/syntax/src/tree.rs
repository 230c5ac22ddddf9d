//! Defines the parse tree produced by the JJQ front end.
//!
//! The tree mirrors the grammar productions one-to-one. Tokens are kept as
//! they appeared in the source text: string tokens still carry their quotes
//! and escape sequences, number tokens are the raw digits. Interpreting them
//! is left to whoever consumes the tree.

/// A single production of the filter grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseTree {
    /// `a | b | ...`, one or more operands.
    Pipe(Vec<ParseTree>),
    /// `a , b , ...`, one or more operands.
    Comma(Vec<ParseTree>),
    /// `( ... )`
    Paren(Box<ParseTree>),
    /// `.`
    Identity,
    /// One or more chained access steps, e.g. `.a.["b"].[0]`.
    Access(Vec<AccessStep>),
    /// A raw JSON string token, quotes included.
    StringLiteral(String),
    /// A raw JSON number token.
    NumberLiteral(String),
    /// `[ ... ]`, with optional contents.
    ArrayLiteral(Option<Box<ParseTree>>),
    /// `{ "k": v, ... }`, possibly empty.
    ObjectLiteral(Vec<Pair>),
}

/// One step of an access chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessStep {
    /// `.name`
    Field(String),
    /// `.["name"]`, holding the raw string token.
    QuotedField(String),
    /// `.[0]`, holding the raw number token.
    Index(String),
}

/// A `"key": value` entry of an object literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    /// The raw string token of the key, quotes included.
    pub key: String,
    pub value: ParseTree,
}
