//! Parses the constraint sub-grammar embedded in object keys.
//!
//! Directive keys (`__limit__`, `__sort__`, `__order__`) and the wildcard key
//! (`*`) are matched verbatim by the compiler before a key ever reaches this
//! module — this module only handles the generic `"name"`, `"name?"`, and
//! `"name [not] <op> [all|any|one]"` shapes.

use crate::error::CompileError;

/// Comparison/membership operators recognized after a key name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpTag {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
    Regex,
    In,
    Contain,
    Is,
    Match,
}

impl OpTag {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            ">" => OpTag::Gt,
            ">=" => OpTag::Ge,
            "<" => OpTag::Lt,
            "<=" => OpTag::Le,
            "==" => OpTag::Eq,
            "!=" => OpTag::Ne,
            "regex" => OpTag::Regex,
            "in" => OpTag::In,
            "contain" => OpTag::Contain,
            "is" => OpTag::Is,
            "match" => OpTag::Match,
            _ => return None,
        })
    }
}

/// Suffix that lifts a scalar predicate over the elements of an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quantifier {
    #[default]
    Single,
    All,
    Any,
    One,
}

impl Quantifier {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "all" => Quantifier::All,
            "any" => Quantifier::Any,
            "one" => Quantifier::One,
            _ => return None,
        })
    }
}

/// The constraint half of a parsed key, before the compiler attaches the
/// right-hand side (a literal value, or — for `match` — a recursively
/// compiled matcher).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintShape {
    pub op: OpTag,
    pub negate: bool,
    pub quantifier: Quantifier,
}

/// A parsed non-directive, non-wildcard object key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    pub name: String,
    pub optional: bool,
    pub constraint: Option<ConstraintShape>,
}

/// Parses one raw object key. `path` is the key path of the *enclosing*
/// object, used only to annotate errors.
pub fn parse_key(raw: &str, path: &[String]) -> Result<ParsedKey, CompileError> {
    let mut tokens = raw.split_ascii_whitespace();
    let name = tokens.next().unwrap_or("").to_string();
    let rest: Vec<&str> = tokens.collect();

    if rest.is_empty() {
        return Ok(parse_plain_or_optional(name));
    }

    let mut idx = 0;
    let negate = rest[idx] == "not";
    if negate {
        idx += 1;
    }

    let op_token = rest.get(idx).copied().ok_or_else(|| CompileError::InvalidKeySyntax {
        path: path.to_vec(),
        message: format!("key {raw:?} has a `not` prefix but no operator"),
    })?;
    let op = OpTag::from_token(op_token).ok_or_else(|| CompileError::UnknownOperator {
        path: path.to_vec(),
        operator: op_token.to_string(),
    })?;
    idx += 1;

    let quantifier = match rest.get(idx) {
        None => Quantifier::Single,
        Some(token) => {
            let quantifier = Quantifier::from_token(token).ok_or_else(|| {
                CompileError::InvalidKeySyntax {
                    path: path.to_vec(),
                    message: format!("key {raw:?} has an unrecognized quantifier {token:?}"),
                }
            })?;
            idx += 1;
            quantifier
        }
    };

    if idx != rest.len() {
        return Err(CompileError::InvalidKeySyntax {
            path: path.to_vec(),
            message: format!("key {raw:?} has trailing tokens after its constraint expression"),
        });
    }

    Ok(ParsedKey {
        name,
        optional: false,
        constraint: Some(ConstraintShape {
            op,
            negate,
            quantifier,
        }),
    })
}

/// A bare name with no constraint tokens: either a plain projecting key, or
/// (if it ends in a non-stripped-to-empty `?`) an optional projecting key.
fn parse_plain_or_optional(name: String) -> ParsedKey {
    if let Some(stripped) = name.strip_suffix('?') {
        if !stripped.is_empty() {
            return ParsedKey {
                name: stripped.to_string(),
                optional: true,
                constraint: None,
            };
        }
    }
    ParsedKey {
        name,
        optional: false,
        constraint: None,
    }
}
