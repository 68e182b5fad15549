//! The crate's documented invariants, as example-based checks rather than
//! a property-testing harness (the corpus this engine is grounded on has no
//! proptest/quickcheck dependency anywhere).

use mqlite::{compile, evaluate, Rng};
use serde_json::{json, Value};

fn run(query: &Value, data: &Value) -> Option<Value> {
    let matcher = compile(query).unwrap();
    let mut rng = Rng::from_seed(0);
    evaluate(&matcher, data, &mut rng).unwrap()
}

#[test]
fn any_projects_data_unchanged() {
    let data = json!({ "a": 1, "b": [1, 2, 3], "c": { "d": "e" } });
    let projection = run(&json!(null), &data).unwrap();
    assert_eq!(projection, data);
}

#[test]
fn projection_subset_only_includes_declared_or_wildcarded_keys() {
    let data = json!({ "a": 1, "b": 2, "c": 3 });
    let projection = run(&json!({ "a": null, "b >": 0 }), &data).unwrap();
    let object = projection.as_object().unwrap();
    assert!(object.contains_key("a"));
    assert!(!object.contains_key("b"), "constraint-only field must not be projected");
    assert!(!object.contains_key("c"), "undeclared field must not be projected");
}

#[test]
fn key_order_preservation() {
    let data = json!({ "z": 1, "a": 2, "m": 3 });
    let projection = run(&json!({ "z": null, "a": null, "m": null }), &data).unwrap();
    let keys: Vec<&String> = projection.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn constraint_only_query_projects_empty_object_on_match() {
    let data = json!({ "age": 30 });
    let projection = run(&json!({ "age >": 18 }), &data);
    assert_eq!(projection, Some(json!({})));

    let no_match = run(&json!({ "age >": 40 }), &data);
    assert_eq!(no_match, None);
}

#[test]
fn negation_duality_holds_across_every_operator() {
    let data = json!({ "v": 10 });
    for (op, rhs) in [
        (">", json!(5)),
        (">=", json!(10)),
        ("<", json!(20)),
        ("<=", json!(10)),
        ("==", json!(10)),
        ("!=", json!(5)),
    ] {
        let positive_query = json!({ format!("v {op}"): rhs.clone() });
        let negated_query = json!({ format!("v not {op}"): rhs });
        let positive = run(&positive_query, &data).is_some();
        let negated = run(&negated_query, &data).is_some();
        assert_ne!(positive, negated, "operator {op} failed negation duality");
    }
}

#[test]
fn match_equivalent_to_plain_key_but_not_projecting() {
    let data = json!({ "grades": { "chemistry": "A" } });
    let subquery = json!({ "chemistry": "A" });

    let via_match = run(&json!({ "grades match": subquery.clone() }), &data).unwrap();
    let via_plain = run(&json!({ "grades": subquery }), &data).unwrap();

    assert_eq!(via_match, json!({}));
    assert_eq!(via_plain, json!({ "grades": { "chemistry": "A" } }));
}

#[test]
fn list_of_records_returns_empty_array_rather_than_no_match() {
    let data = json!([{ "age": 10 }, { "age": 12 }]);
    let projection = run(&json!([{ "name": null, "age >": 100 }]), &data);
    assert_eq!(projection, Some(json!([])));
}
