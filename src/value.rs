//! Helpers over `serde_json::Value` that the rest of the engine is built on.
//!
//! The engine uses `serde_json::Value` as its JSON value model rather than a
//! hand-rolled tagged variant; with the `preserve_order` feature enabled,
//! `serde_json::Map` is backed by an insertion-ordered map, which is the only
//! property the engine actually needs from its representation (query and
//! projection key order is semantically significant — see the evaluator).
//!
//! Two behaviors `serde_json::Value`'s own `PartialEq`/`Ord` don't give us
//! for free live here: deep equality where `1` and `1.0` compare equal, and
//! a total "natural" ordering over arbitrary JSON used by the `__sort__`
//! directive.

use serde_json::{Number, Value};
use std::cmp::Ordering;

/// Deep-equality used by `Equal` matchers and the `==`/`!=`/`in`/`contain`
/// operators. Differs from `serde_json::Value`'s derived `PartialEq` only in
/// how numbers compare: `1` and `1.0` are equal here, matching the query
/// language's "numbers compare by value" rule. Booleans and numbers are
/// never equal to each other, matching `Value`'s own cross-variant behavior.
pub fn deep_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_eq(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_eq(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, v)| ys.get(k).is_some_and(|other| deep_eq(v, other)))
        }
        _ => a == b,
    }
}

fn numbers_eq(x: &Number, y: &Number) -> bool {
    if x == y {
        return true;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(fx), Some(fy)) => fx == fy,
        _ => false,
    }
}

/// True if `needle` deep-equals some element of `haystack`.
pub fn contains(haystack: &[Value], needle: &Value) -> bool {
    haystack.iter().any(|v| deep_eq(v, needle))
}

/// Stable type-tag ordering used to keep `natural_cmp` a total order even
/// when comparing values of different JSON types: `Null < Bool < Number <
/// String < Array < Object`.
fn type_tag(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total ordering over arbitrary JSON values, used to implement the
/// `__sort__` directive. Same-type values compare structurally; values of
/// different types fall back to `type_tag`, so the comparator never needs to
/// return `Equal` for genuinely different values and a sort is always
/// well-defined.
pub fn natural_cmp(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let fx = x.as_f64().unwrap_or(f64::NAN);
            let fy = y.as_f64().unwrap_or(f64::NAN);
            fx.partial_cmp(&fy).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(xs), Value::Array(ys)) => {
            for (x, y) in xs.iter().zip(ys.iter()) {
                let ord = natural_cmp(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            xs.len().cmp(&ys.len())
        }
        (Value::Object(xs), Value::Object(ys)) => {
            for ((xk, xv), (yk, yv)) in xs.iter().zip(ys.iter()) {
                let ord = xk.cmp(yk);
                if ord != Ordering::Equal {
                    return ord;
                }
                let ord = natural_cmp(xv, yv);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            xs.len().cmp(&ys.len())
        }
        _ => type_tag(a).cmp(&type_tag(b)),
    }
}

/// `is integer`: a JSON number with no fractional part.
pub fn is_whole_number(n: &Number) -> bool {
    n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
}

/// `is float`: a JSON number with a fractional part.
pub fn is_fractional_number(n: &Number) -> bool {
    !is_whole_number(n)
}
