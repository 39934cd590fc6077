//! Errors raised when a scalar field does not fit its typed representation

use thiserror::Error;

/// Model construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid cardinality '{0}' (expected ALL, N, N+ or N-M)")]
    InvalidCardinality(String),

    #[error("invalid cardinality range '{0}': lower bound exceeds upper bound")]
    InvertedCardinality(String),

    #[error("unknown component category '{0}' (expected MASTER, SLAVE or CLIENT)")]
    UnknownCategory(String),

    #[error("unknown script type '{0}' (expected PYTHON)")]
    UnknownScriptType(String),

    #[error("unknown dependency scope '{0}' (expected host or cluster)")]
    UnknownScope(String),

    #[error("invalid component reference '{0}' (expected COMPONENT or SERVICE/COMPONENT)")]
    InvalidComponentRef(String),

    #[error("invalid OS family tag '{0}'")]
    InvalidOsFamily(String),
}

/// Result type for model construction
pub type Result<T> = std::result::Result<T, ModelError>;
