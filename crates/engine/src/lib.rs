//! Filter AST and evaluation engine for the JJQ language.
//!
//! A filter is built once from a [`jjq_syntax::ParseTree`] with [`build`] and
//! can then be evaluated any number of times, from any number of threads,
//! with [`evaluate`]. Evaluation is lazy: outputs are produced on demand.

pub mod ast;
pub mod builder;
pub mod engine;
pub mod error;

// --- Public API ---
pub use ast::FilterNode;
pub use builder::build;
pub use engine::{Values, evaluate, evaluate_value};
pub use error::BuildError;
