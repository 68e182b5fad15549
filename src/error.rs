//! Structured compile/evaluation error types.
//!
//! Compile errors abort the whole query and point at the offending key path
//! (the sequence of object keys and array indices walked from the query
//! root). Evaluation errors are narrower: per the engine's contract, only a
//! bad regex pattern is surfaced as an error — every other evaluation-time
//! problem degrades to a plain no-match so the engine stays robust against
//! heterogeneous data.

use thiserror::Error;

/// The sequence of object keys / array indices from the query root down to
/// the key that failed to compile.
pub type KeyPath = Vec<String>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompileError {
    #[error("invalid key syntax at {path:?}: {message}")]
    InvalidKeySyntax { path: KeyPath, message: String },

    #[error("unknown operator {operator:?} at {path:?}")]
    UnknownOperator { path: KeyPath, operator: String },

    #[error("invalid value for directive {directive:?} at {path:?}: {message}")]
    InvalidDirectiveValue {
        path: KeyPath,
        directive: String,
        message: String,
    },

    #[error("query nesting exceeds the maximum supported depth ({max}) at {path:?}")]
    DepthExceeded { path: KeyPath, max: usize },
}

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("invalid regex {pattern:?}: {source}")]
    BadRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
