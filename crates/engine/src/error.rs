use thiserror::Error;

/// Failures raised while turning a parse tree into a [`crate::FilterNode`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Malformed index '{0}': expected a non-negative base-10 integer")]
    MalformedIndex(String),

    #[error("Malformed number literal '{0}'")]
    MalformedNumber(String),

    #[error("Malformed string literal {token}: {message}")]
    MalformedString { token: String, message: String },

    #[error("Empty {0} production")]
    EmptyProduction(&'static str),
}
