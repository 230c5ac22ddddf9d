use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Malformed expression '{input}': {message}")]
    MalformedExpression { input: String, message: String },
}
