//! Front end for the JJQ filter language.
//!
//! Turns filter text such as `.a | {"b": (.c, .d)}` into a [`ParseTree`].
//! The tree is purely syntactic; building an evaluable filter out of it is
//! the job of `jjq-engine`.

pub mod error;
mod parser;
pub mod tree;

pub use error::SyntaxError;
pub use parser::{MAX_NESTING_DEPTH, parse_filter};
pub use tree::{AccessStep, Pair, ParseTree};
