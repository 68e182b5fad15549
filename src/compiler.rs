//! Compiles a query JSON tree into a matcher tree.
//!
//! Rather than re-walking the raw query `Value` against every document, the
//! query is compiled once into a `Matcher` tree that the evaluator
//! interprets repeatedly. Directive keys (`__limit__`, `__sort__`,
//! `__order__`) and the wildcard key (`*`) are recognized here, by exact
//! raw-key match, before any key ever reaches the key-suffix grammar in
//! `key`.

use crate::error::CompileError;
use crate::key::{self, OpTag, ParsedKey};
use crate::matcher::{
    ConstraintArg, ConstraintSpec, DirectiveOp, FieldHandler, Matcher, ObjectField, ObjectMatcher,
    Order, WildcardSpec,
};
use serde_json::Value;

/// Recursion depth is bounded by the minimum of query and data depth, but we
/// still need a hard ceiling on the query side alone so a pathologically
/// nested query can't blow the stack during compilation.
const MAX_DEPTH: usize = 100;

/// Compiles a query document into a matcher tree.
#[tracing::instrument(level = "debug", skip(query))]
pub fn compile(query: &Value) -> Result<Matcher, CompileError> {
    let result = compile_at(query, &mut Vec::new(), 0);
    match &result {
        Ok(_) => tracing::debug!("query compiled"),
        Err(error) => tracing::debug!(%error, "query failed to compile"),
    }
    result
}

fn compile_at(query: &Value, path: &mut Vec<String>, depth: usize) -> Result<Matcher, CompileError> {
    if depth > MAX_DEPTH {
        return Err(CompileError::DepthExceeded {
            path: path.clone(),
            max: MAX_DEPTH,
        });
    }

    match query {
        Value::Null => Ok(Matcher::Any),
        Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(Matcher::Equal(query.clone())),
        Value::Array(items) => {
            let mut compiled = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                path.push(index.to_string());
                let result = compile_at(item, path, depth + 1);
                path.pop();
                compiled.push(result?);
            }
            Ok(Matcher::Array(compiled))
        }
        Value::Object(entries) => {
            let mut object = ObjectMatcher::default();
            for (raw_key, sub_value) in entries {
                path.push(raw_key.clone());
                let result = compile_object_entry(&mut object, raw_key, sub_value, path, depth);
                path.pop();
                result?;
            }
            Ok(Matcher::Object(object))
        }
    }
}

fn compile_object_entry(
    object: &mut ObjectMatcher,
    raw_key: &str,
    sub_value: &Value,
    path: &mut Vec<String>,
    depth: usize,
) -> Result<(), CompileError> {
    match raw_key {
        "__limit__" => {
            let limit = match sub_value.as_i64() {
                Some(n) if n >= 0 => n as u64,
                _ => {
                    return Err(CompileError::InvalidDirectiveValue {
                        path: path.clone(),
                        directive: "__limit__".to_string(),
                        message: "expected a non-negative integer".to_string(),
                    });
                }
            };
            object.directives.ops.push(DirectiveOp::Limit(limit));
            tracing::debug!(limit, "compiled __limit__ directive");
            Ok(())
        }
        "__sort__" => {
            let raw = sub_value.as_str().ok_or_else(|| CompileError::InvalidDirectiveValue {
                path: path.clone(),
                directive: "__sort__".to_string(),
                message: "expected a string".to_string(),
            })?;
            let (sort_key, reversed) = match raw.strip_prefix('-') {
                Some(stripped) => (stripped.to_string(), true),
                None => (raw.to_string(), false),
            };
            object.directives.ops.push(DirectiveOp::Sort(sort_key));
            let already_ordered =
                object.directives.ops.iter().any(|op| matches!(op, DirectiveOp::Order(_)));
            if reversed && !already_ordered {
                object.directives.ops.push(DirectiveOp::Order(Order::Reverse));
            }
            tracing::debug!(sort = raw, "compiled __sort__ directive");
            Ok(())
        }
        "__order__" => {
            let raw = sub_value.as_str().ok_or_else(|| CompileError::InvalidDirectiveValue {
                path: path.clone(),
                directive: "__order__".to_string(),
                message: "expected a string".to_string(),
            })?;
            let order = match raw {
                "ascending" => Order::Ascending,
                "reverse" => Order::Reverse,
                "random" => Order::Random,
                other => {
                    return Err(CompileError::InvalidDirectiveValue {
                        path: path.clone(),
                        directive: "__order__".to_string(),
                        message: format!(
                            "expected one of \"ascending\", \"reverse\", \"random\", got {other:?}"
                        ),
                    });
                }
            };
            object.directives.ops.push(DirectiveOp::Order(order));
            tracing::debug!(order = raw, "compiled __order__ directive");
            Ok(())
        }
        "*" => {
            let wildcard = match sub_value {
                Value::String(s) if s == "*" => WildcardSpec::AllKeys,
                Value::Array(items) => {
                    let mut names = Vec::with_capacity(items.len());
                    for item in items {
                        let name = item.as_str().ok_or_else(|| CompileError::InvalidDirectiveValue {
                            path: path.clone(),
                            directive: "*".to_string(),
                            message: "named-key wildcard expects an array of strings".to_string(),
                        })?;
                        names.push(name.to_string());
                    }
                    WildcardSpec::NamedKeys(names)
                }
                _ => {
                    return Err(CompileError::InvalidDirectiveValue {
                        path: path.clone(),
                        directive: "*".to_string(),
                        message: "expected \"*\" or an array of field names".to_string(),
                    });
                }
            };
            object.fields.push(ObjectField {
                name: "*".to_string(),
                handler: FieldHandler::Wildcard(wildcard),
            });
            Ok(())
        }
        _ => compile_field(object, raw_key, sub_value, path, depth),
    }
}

fn compile_field(
    object: &mut ObjectMatcher,
    raw_key: &str,
    sub_value: &Value,
    path: &mut Vec<String>,
    depth: usize,
) -> Result<(), CompileError> {
    let ParsedKey {
        name,
        optional,
        constraint,
    } = key::parse_key(raw_key, path)?;

    let handler = match constraint {
        None => {
            let matcher = compile_at(sub_value, path, depth + 1)?;
            FieldHandler::Project {
                matcher: Box::new(matcher),
                optional,
            }
        }
        Some(shape) => {
            let arg = if shape.op == OpTag::Match {
                ConstraintArg::Matcher(Box::new(compile_at(sub_value, path, depth + 1)?))
            } else {
                ConstraintArg::Literal(sub_value.clone())
            };
            FieldHandler::Constrain(ConstraintSpec {
                op: shape.op,
                negate: shape.negate,
                quantifier: shape.quantifier,
                arg,
            })
        }
    };

    object.fields.push(ObjectField { name, handler });
    Ok(())
}
