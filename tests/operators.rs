//! Coverage of the built-in comparison/membership operators and the
//! `all`/`any`/`one` quantifier, exercised through `compile` + `evaluate`
//! rather than calling `operators::apply` directly (it's a private dispatch
//! function, reached only through a compiled constraint).

use mqlite::{compile, evaluate, CompileError, Rng};
use serde_json::{json, Value};

fn matches(query: Value, data: &Value) -> bool {
    let matcher = compile(&query).unwrap();
    let mut rng = Rng::from_seed(0);
    evaluate(&matcher, data, &mut rng).unwrap().is_some()
}

#[test]
fn numeric_comparisons() {
    let data = json!({ "age": 25 });
    assert!(matches(json!({ "age >": 20 }), &data));
    assert!(!matches(json!({ "age >": 25 }), &data));
    assert!(matches(json!({ "age >=": 25 }), &data));
    assert!(matches(json!({ "age <": 30 }), &data));
    assert!(matches(json!({ "age <=": 25 }), &data));
}

#[test]
fn string_comparisons_are_lexicographic() {
    let data = json!({ "name": "banana" });
    assert!(matches(json!({ "name >": "apple" }), &data));
    assert!(!matches(json!({ "name <": "apple" }), &data));
}

#[test]
fn numeric_equality_is_by_value() {
    let data = json!({ "score": 1 });
    assert!(matches(json!({ "score ==": 1.0 }), &data));
    assert!(!matches(json!({ "score !=": 1.0 }), &data));
}

#[test]
fn type_mismatched_order_comparison_never_matches() {
    let data = json!({ "age": "thirty" });
    assert!(!matches(json!({ "age >": 10 }), &data));
}

#[test]
fn regex_operator() {
    let data = json!({ "email": "a@example.com" });
    assert!(matches(json!({ "email regex": r"^[\w.]+@example\.com$" }), &data));
    assert!(!matches(json!({ "email regex": r"^[\w.]+@other\.com$" }), &data));
}

#[test]
fn bad_regex_surfaces_as_an_error_not_a_no_match() {
    let matcher = compile(&json!({ "email regex": "(unterminated" })).unwrap();
    let mut rng = Rng::from_seed(0);
    let result = evaluate(&matcher, &json!({ "email": "a@example.com" }), &mut rng);
    assert!(matches!(result, Err(mqlite::EvaluationError::BadRegex { .. })));
}

#[test]
fn in_operator() {
    let data = json!({ "status": "active" });
    assert!(matches(json!({ "status in": ["active", "pending"] }), &data));
    assert!(!matches(json!({ "status in": ["closed"] }), &data));
}

#[test]
fn contain_operator_array_and_string() {
    let array_data = json!({ "tags": ["rust", "json"] });
    assert!(matches(json!({ "tags contain": "rust" }), &array_data));
    assert!(!matches(json!({ "tags contain": "python" }), &array_data));

    let string_data = json!({ "bio": "loves rust programming" });
    assert!(matches(json!({ "bio contain": "rust" }), &string_data));
}

#[test]
fn is_operator_covers_every_json_type_plus_integer_and_float() {
    assert!(matches(json!({ "v is": "null" }), &json!({ "v": null })));
    assert!(matches(json!({ "v is": "bool" }), &json!({ "v": true })));
    assert!(matches(json!({ "v is": "number" }), &json!({ "v": 1 })));
    assert!(matches(json!({ "v is": "string" }), &json!({ "v": "s" })));
    assert!(matches(json!({ "v is": "array" }), &json!({ "v": [] })));
    assert!(matches(json!({ "v is": "object" }), &json!({ "v": {} })));
    assert!(matches(json!({ "v is": "integer" }), &json!({ "v": 4 })));
    assert!(!matches(json!({ "v is": "integer" }), &json!({ "v": 4.5 })));
    assert!(matches(json!({ "v is": "float" }), &json!({ "v": 4.5 })));
    assert!(!matches(json!({ "v is": "float" }), &json!({ "v": 4 })));
}

#[test]
fn match_operator_is_not_a_projecting_field() {
    let data = json!({ "grades": { "chemistry": "A", "math": "C" } });
    assert!(matches(json!({ "grades match": { "chemistry": "A" } }), &data));
    assert!(!matches(json!({ "grades match": { "chemistry": "B" } }), &data));

    let matcher = compile(&json!({ "grades match": { "chemistry": "A" } })).unwrap();
    let mut rng = Rng::from_seed(0);
    let projection = evaluate(&matcher, &data, &mut rng).unwrap().unwrap();
    assert_eq!(projection, json!({}));
}

#[test]
fn quantifier_all_any_one() {
    let data = json!({ "scores": [10, 20, 30] });
    assert!(matches(json!({ "scores > all": 5 }), &data));
    assert!(!matches(json!({ "scores > all": 15 }), &data));
    assert!(matches(json!({ "scores > any": 25 }), &data));
    assert!(!matches(json!({ "scores > any": 100 }), &data));
    assert!(matches(json!({ "scores > one": 25 }), &data));
    assert!(!matches(json!({ "scores > one": 5 }), &data));
}

#[test]
fn quantifier_against_non_array_never_matches() {
    let data = json!({ "scores": 10 });
    assert!(!matches(json!({ "scores > all": 5 }), &data));
}

#[test]
fn negation_duality() {
    let data = json!({ "age": 30 });
    let positive = matches(json!({ "age >": 25 }), &data);
    let negated = matches(json!({ "age not >": 25 }), &data);
    assert_ne!(positive, negated);
}

#[test]
fn constraint_only_object_projects_empty_object() {
    let query = json!({ "age >": 25 });
    let matcher = compile(&query).unwrap();
    let mut rng = Rng::from_seed(0);
    let projection = evaluate(&matcher, &json!({ "age": 30 }), &mut rng).unwrap();
    assert_eq!(projection, Some(json!({})));

    let no_match = evaluate(&matcher, &json!({ "age": 10 }), &mut rng).unwrap();
    assert_eq!(no_match, None);
}

#[test]
fn unknown_operator_token_aborts_compilation() {
    let err = compile(&json!({ "age sorta": 1 })).unwrap_err();
    assert!(matches!(err, CompileError::UnknownOperator { .. }));
}
