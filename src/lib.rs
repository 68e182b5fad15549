//! # MQLite
//!
//! A declarative pattern-matching engine for JSON. A *query* is a JSON
//! document whose object keys may carry an extra constraint sub-grammar
//! (`"age >": 25`, `"hobbies contain any": [...]`, `"__sort__": "-age"`);
//! a *data* document is plain JSON. [`compile`] turns a query into a
//! [`Matcher`] tree once; [`evaluate`] interprets that tree against any
//! number of data documents, each call producing either a JSON *projection*
//! (the parts of the data that satisfied the pattern, in query key order)
//! or a no-match verdict.
//!
//! ```
//! use mqlite::{compile, evaluate, Rng};
//! use serde_json::json;
//!
//! let query = compile(&json!({ "name": null, "age >": 25 })).unwrap();
//! let data = json!({ "name": "John", "age": 30, "hobbies": ["chess"] });
//!
//! let mut rng = Rng::from_seed(0);
//! let projection = evaluate(&query, &data, &mut rng).unwrap();
//! assert_eq!(projection, Some(json!({ "name": "John" })));
//! ```
//!
//! ## Scope
//!
//! This crate is the compile/evaluate engine only. JSON parsing and
//! serialization, a CLI front-end, an interactive shell, and output
//! formatting (indentation, newline style, `--strict` exit codes) are
//! collaborator concerns layered on top of this crate's contract and are
//! not implemented here.

pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod key;
pub mod matcher;
pub mod operators;
pub mod rng;
pub mod value;

pub use compiler::compile;
pub use error::{CompileError, EvaluationError};
pub use evaluator::evaluate;
pub use matcher::Matcher;
pub use rng::Rng;

use serde_json::Value;

/// Compiles `query` and evaluates it against `data` in one call — the
/// single synchronous entry point a host (CLI, shell, service) needs for a
/// one-shot match. Equivalent to `compile(query)` followed by
/// `evaluate(&matcher, data, rng)`, for callers that don't need to reuse a
/// compiled matcher across multiple data documents.
pub fn run(query: &Value, data: &Value, rng: &mut Rng) -> Result<Option<Value>, MatchError> {
    let matcher = compile(query)?;
    let projection = evaluate(&matcher, data, rng)?;
    Ok(projection)
}

/// Either stage of [`run`] can fail; this unifies both error taxonomies for
/// callers that don't need to distinguish a malformed query from a bad
/// regex encountered mid-evaluation.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}
