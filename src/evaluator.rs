//! Interprets a compiled matcher tree against a data document, producing a
//! projection and a match verdict.
//!
//! The filter/sort/paginate/project pipeline runs as a recursive tree walk
//! instead of a single pass over a flat document array: every `Object`
//! matcher runs its own filter/project step, and the sort/order/limit
//! directives apply locally, at whichever `Object` matcher sits directly
//! under a "list of records" array.

use crate::matcher::{FieldHandler, Matcher, ObjectMatcher, WildcardSpec};
use crate::operators;
use crate::rng::Rng;
use crate::{error::EvaluationError, matcher::DirectiveOp, matcher::Order, value};
use serde_json::Value;

/// Evaluates `matcher` against `data`. Returns `Ok(Some(projection))` on a
/// match, `Ok(None)` on no-match. The only evaluation failure that surfaces
/// as an `Err` rather than degrading to `Ok(None)` is an invalid regex
/// pattern — every other mismatch (wrong type, missing field, and so on) is
/// treated as ordinary no-match so the engine stays robust against
/// heterogeneous data.
pub fn evaluate(
    matcher: &Matcher,
    data: &Value,
    rng: &mut Rng,
) -> Result<Option<Value>, EvaluationError> {
    match matcher {
        Matcher::Any => Ok(Some(data.clone())),
        Matcher::Equal(expected) => Ok(value::deep_eq(data, expected).then(|| data.clone())),
        Matcher::Array(elements) => evaluate_array(elements, data, rng),
        Matcher::Object(object) => evaluate_object(object, data, rng),
    }
}

fn evaluate_array(
    elements: &[Matcher],
    data: &Value,
    rng: &mut Rng,
) -> Result<Option<Value>, EvaluationError> {
    let Some(items) = data.as_array() else {
        return Ok(None);
    };

    // A single object-shaped element matcher means "list of records": every
    // matching data element contributes one projection, instead of the
    // element matcher needing to find just one satisfying element.
    if let [Matcher::Object(object)] = elements {
        return evaluate_list_of_records(object, items, rng).map(Some);
    }

    let mut projections = Vec::with_capacity(elements.len());
    for element in elements {
        let mut found = None;
        for item in items {
            if let Some(projection) = evaluate(element, item, rng)? {
                found = Some(projection);
                break;
            }
        }
        match found {
            Some(projection) => projections.push(projection),
            None => return Ok(None),
        }
    }
    Ok(Some(Value::Array(projections)))
}

fn evaluate_list_of_records(
    object: &ObjectMatcher,
    items: &[Value],
    rng: &mut Rng,
) -> Result<Value, EvaluationError> {
    let mut projections = Vec::new();
    for item in items {
        if let Some(projection) = evaluate_object(object, item, rng)? {
            projections.push(projection);
        }
    }
    apply_directives(object, &mut projections, rng);
    tracing::debug!(count = projections.len(), "collected list-of-records projection");
    Ok(Value::Array(projections))
}

/// Directives apply in the exact order their keys were declared in the
/// query object (`object.directives.ops`), not a fixed order — this is what
/// makes `__limit__` before `__sort__` yield limit-then-sort, per the query
/// language's documented caveat.
fn apply_directives(object: &ObjectMatcher, projections: &mut Vec<Value>, rng: &mut Rng) {
    for op in &object.directives.ops {
        match op {
            DirectiveOp::Sort(key) => {
                projections.sort_by(|a, b| {
                    let left = a.get(key).unwrap_or(&Value::Null);
                    let right = b.get(key).unwrap_or(&Value::Null);
                    value::natural_cmp(left, right)
                });
            }
            DirectiveOp::Order(Order::Ascending) => {}
            DirectiveOp::Order(Order::Reverse) => projections.reverse(),
            DirectiveOp::Order(Order::Random) => rng.shuffle(projections),
            DirectiveOp::Limit(limit) => {
                let limit = *limit as usize;
                if projections.len() > limit {
                    projections.truncate(limit);
                }
            }
        }
    }
}

fn evaluate_object(
    object: &ObjectMatcher,
    data: &Value,
    rng: &mut Rng,
) -> Result<Option<Value>, EvaluationError> {
    let Some(data_obj) = data.as_object() else {
        return Ok(None);
    };

    let mut output = serde_json::Map::new();
    for field in &object.fields {
        match &field.handler {
            FieldHandler::Project { matcher, optional } => match data_obj.get(&field.name) {
                Some(value) => match evaluate(matcher, value, rng)? {
                    Some(projection) => {
                        output.insert(field.name.clone(), projection);
                    }
                    None => return Ok(None),
                },
                None if *optional => {}
                None => return Ok(None),
            },
            FieldHandler::Constrain(spec) => {
                let value = data_obj.get(&field.name).unwrap_or(&Value::Null);
                if !operators::evaluate_constraint(spec, value, rng)? {
                    return Ok(None);
                }
            }
            FieldHandler::Wildcard(WildcardSpec::AllKeys) => {
                for (key, value) in data_obj {
                    output.entry(key.clone()).or_insert_with(|| value.clone());
                }
            }
            FieldHandler::Wildcard(WildcardSpec::NamedKeys(names)) => {
                for name in names {
                    if let Some(value) = data_obj.get(name) {
                        output.entry(name.clone()).or_insert_with(|| value.clone());
                    }
                }
            }
        }
    }
    Ok(Some(Value::Object(output)))
}
