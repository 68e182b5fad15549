//! The matcher intermediate representation the compiler produces and the
//! evaluator interprets.
//!
//! Matcher nodes are plain tagged variants rather than a trait-object
//! hierarchy: the engine is small and closed (the operator set and matcher
//! kinds are fixed by the query language), so a tree of enums is both
//! simpler and faster than dynamic dispatch.

use crate::key::{OpTag, Quantifier};
use serde_json::Value;

/// A compiled query, ready to be evaluated against a data document.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Compiled from a literal JSON `null`. Matches any data value.
    Any,
    /// Compiled from a literal bool/number/string. Matches iff the data
    /// value deep-equals this one.
    Equal(Value),
    /// Compiled from a query array. Each element matcher must find at least
    /// one satisfying data element (see the evaluator for the special
    /// list-of-records replication rule).
    Array(Vec<Matcher>),
    /// Compiled from a query object.
    Object(ObjectMatcher),
}

#[derive(Debug, Clone, Default)]
pub struct ObjectMatcher {
    /// Projecting/constraining/wildcard fields, in query declaration order.
    /// Order matters three ways: it drives output key order (projecting
    /// fields), AND-combination order (constraining fields), and the
    /// not-already-present check for the wildcard field.
    pub fields: Vec<ObjectField>,
    pub directives: DirectiveSet,
}

#[derive(Debug, Clone)]
pub struct ObjectField {
    pub name: String,
    pub handler: FieldHandler,
}

/// What a single object field contributes to matching/projection.
#[derive(Debug, Clone)]
pub enum FieldHandler {
    /// Projects this field's matched value into the output under `name`.
    /// Missing in data is a hard failure unless `optional` is set.
    Project { matcher: Box<Matcher>, optional: bool },
    /// Gates the match without contributing to the output.
    Constrain(ConstraintSpec),
    /// The `"*"` directive: copies data keys into the output at this
    /// position in field-declaration order. `name` on the enclosing
    /// `ObjectField` is `"*"` and otherwise unused.
    Wildcard(WildcardSpec),
}

/// A single `"name <op>"` constraint, with its right-hand side resolved at
/// compile time: a literal value for every operator except `match`, which
/// recursively holds a compiled `Matcher` so it never needs to re-compile
/// its argument on every evaluation.
#[derive(Debug, Clone)]
pub struct ConstraintSpec {
    pub op: OpTag,
    pub negate: bool,
    pub quantifier: Quantifier,
    pub arg: ConstraintArg,
}

#[derive(Debug, Clone)]
pub enum ConstraintArg {
    Literal(Value),
    Matcher(Box<Matcher>),
}

/// The `"*"` field: copies data keys into the output either wholesale or by
/// an explicit name list.
#[derive(Debug, Clone)]
pub enum WildcardSpec {
    AllKeys,
    NamedKeys(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Reverse,
    Random,
}

/// `__limit__` / `__sort__` / `__order__`, applied (at the list-of-records
/// evaluation boundary) in the exact order their directive keys were
/// declared in the query object — not a fixed order. `ops` is the only
/// state this carries: each compiled directive, including the implicit
/// `Order::Reverse` a `"-key"` sort prefix triggers, pushes one entry here
/// in declaration order, and the evaluator just replays the list.
#[derive(Debug, Clone, Default)]
pub struct DirectiveSet {
    pub(crate) ops: Vec<DirectiveOp>,
}

#[derive(Debug, Clone)]
pub(crate) enum DirectiveOp {
    Limit(u64),
    Sort(String),
    Order(Order),
}

impl DirectiveSet {
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
