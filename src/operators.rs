//! Built-in comparison/membership operators and quantifier lifting.
//!
//! A flat `match op { ... }` dispatch table over the full operator set
//! (`>`, `>=`, `<`, `<=`, `==`, `!=`, `regex`, `in`, `contain`, `is`,
//! `match`), plus the `all`/`any`/`one` quantifier that lifts a scalar
//! predicate over array elements.

use crate::error::EvaluationError;
use crate::evaluator;
use crate::key::{OpTag, Quantifier};
use crate::matcher::{ConstraintArg, ConstraintSpec};
use crate::rng::Rng;
use crate::value;
use serde_json::Value;
use std::cmp::Ordering;

/// Evaluates one compiled `"name <op>"` constraint. `data` is the value
/// found at the constraint's field name, or `Value::Null` if the field was
/// absent from the document — the same behavior plain JSON object indexing
/// gives a missing key.
pub fn evaluate_constraint(
    spec: &ConstraintSpec,
    data: &Value,
    rng: &mut Rng,
) -> Result<bool, EvaluationError> {
    let result = match spec.quantifier {
        Quantifier::Single => apply(spec.op, data, &spec.arg, rng)?,
        quantifier => quantified(spec.op, quantifier, data, &spec.arg, rng)?,
    };
    Ok(if spec.negate { !result } else { result })
}

/// Lifts a scalar predicate over elements for the `all`/`any`/`one`
/// quantifiers. `contain` is the one operator where the elements to lift
/// over come from the *argument*, not the field value: the field stays the
/// whole haystack (an array or string) and each argument element is
/// checked against it individually, e.g. `"hobbies contain any":
/// ["reading", "painting"]` asks whether *either* value is present
/// somewhere in the whole `hobbies` list, not whether some single hobby
/// contains the whole list.
fn quantified(
    op: OpTag,
    quantifier: Quantifier,
    data: &Value,
    arg: &ConstraintArg,
    rng: &mut Rng,
) -> Result<bool, EvaluationError> {
    if op == OpTag::Contain {
        let ConstraintArg::Literal(target) = arg else {
            unreachable!("`contain` never carries a Matcher arg")
        };
        let Some(candidates) = target.as_array() else {
            return Ok(false);
        };
        let matches = candidates.iter().filter(|candidate| contain(data, candidate)).count();
        return Ok(lift(quantifier, matches, candidates.len()));
    }

    let Some(items) = data.as_array() else {
        // Quantified constraints only make sense against an array.
        return Ok(false);
    };
    let mut matches = 0usize;
    for item in items {
        if apply(op, item, arg, rng)? {
            matches += 1;
        }
    }
    Ok(lift(quantifier, matches, items.len()))
}

/// Folds a per-element match count into the quantifier's verdict.
fn lift(quantifier: Quantifier, matches: usize, total: usize) -> bool {
    match quantifier {
        Quantifier::All => matches == total,
        Quantifier::Any => matches > 0,
        Quantifier::One => matches == 1,
        Quantifier::Single => unreachable!("handled by the caller"),
    }
}

fn apply(
    op: OpTag,
    data: &Value,
    arg: &ConstraintArg,
    rng: &mut Rng,
) -> Result<bool, EvaluationError> {
    if op == OpTag::Match {
        let ConstraintArg::Matcher(matcher) = arg else {
            unreachable!("the compiler only attaches a Matcher arg to `match`")
        };
        return Ok(evaluator::evaluate(matcher, data, rng)?.is_some());
    }

    let ConstraintArg::Literal(target) = arg else {
        unreachable!("every operator except `match` carries a literal arg")
    };

    Ok(match op {
        OpTag::Eq => value::deep_eq(data, target),
        OpTag::Ne => !value::deep_eq(data, target),
        OpTag::Gt => compare_order(data, target) == Some(Ordering::Greater),
        OpTag::Ge => {
            matches!(compare_order(data, target), Some(Ordering::Greater | Ordering::Equal))
        }
        OpTag::Lt => compare_order(data, target) == Some(Ordering::Less),
        OpTag::Le => matches!(compare_order(data, target), Some(Ordering::Less | Ordering::Equal)),
        OpTag::In => target.as_array().is_some_and(|items| value::contains(items, data)),
        OpTag::Contain => contain(data, target),
        OpTag::Is => is_type(data, target),
        OpTag::Regex => return apply_regex(data, target),
        OpTag::Match => unreachable!("handled above"),
    })
}

/// `target` found in array `data`, or `target` a substring of string `data`.
fn contain(data: &Value, target: &Value) -> bool {
    match data {
        Value::Array(items) => value::contains(items, target),
        Value::String(haystack) => target.as_str().is_some_and(|needle| haystack.contains(needle)),
        _ => false,
    }
}

/// Numeric comparison if both sides are numbers, else lexicographic string
/// comparison if both sides are strings. Any other type pairing can't
/// satisfy an order comparison (not an error — just never true).
fn compare_order(data: &Value, target: &Value) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (data.as_f64(), target.as_f64()) {
        return a.partial_cmp(&b);
    }
    if let (Some(a), Some(b)) = (data.as_str(), target.as_str()) {
        return Some(a.cmp(b));
    }
    None
}

fn is_type(data: &Value, target: &Value) -> bool {
    let Some(type_name) = target.as_str() else {
        return false;
    };
    match (type_name, data) {
        ("null", Value::Null) => true,
        ("bool", Value::Bool(_)) => true,
        ("number", Value::Number(_)) => true,
        ("string", Value::String(_)) => true,
        ("array", Value::Array(_)) => true,
        ("object", Value::Object(_)) => true,
        ("integer", Value::Number(n)) => value::is_whole_number(n),
        ("float", Value::Number(n)) => value::is_fractional_number(n),
        _ => false,
    }
}

fn apply_regex(data: &Value, target: &Value) -> Result<bool, EvaluationError> {
    let (Some(haystack), Some(pattern)) = (data.as_str(), target.as_str()) else {
        return Ok(false);
    };
    let re = regex::Regex::new(pattern).map_err(|source| EvaluationError::BadRegex {
        pattern: pattern.to_string(),
        source,
    })?;
    Ok(re.is_match(haystack))
}
