use serde_json::json;

use survey_spec::spec::logic::{Combinator, ConditionOperator, SkipCondition};
use survey_spec::{AnswerMap, combine, evaluate};

fn answers(value: serde_json::Value) -> AnswerMap {
    serde_json::from_value(value).expect("fixture should deserialize")
}

fn condition(question_id: &str, operator: ConditionOperator, value: &str) -> SkipCondition {
    SkipCondition {
        question_id: question_id.into(),
        operator,
        value: value.into(),
    }
}

#[test]
fn positive_operators_are_false_without_an_answer() {
    let empty = AnswerMap::new();
    for operator in [
        ConditionOperator::Equals,
        ConditionOperator::NotEquals,
        ConditionOperator::Contains,
        ConditionOperator::GreaterThan,
        ConditionOperator::LessThan,
    ] {
        assert!(
            !evaluate(&condition("q1", operator, "anything"), &empty),
            "{operator:?} must not be satisfied by a missing answer"
        );
    }
}

#[test]
fn emptiness_operators_ignore_the_comparison_value() {
    let empty = AnswerMap::new();
    assert!(evaluate(
        &condition("q1", ConditionOperator::IsEmpty, "ignored"),
        &empty
    ));
    assert!(!evaluate(
        &condition("q1", ConditionOperator::IsNotEmpty, "ignored"),
        &empty
    ));

    let blank = answers(json!({ "q1": "" }));
    assert!(evaluate(
        &condition("q1", ConditionOperator::IsEmpty, ""),
        &blank
    ));

    let filled = answers(json!({ "q1": ["a"] }));
    assert!(evaluate(
        &condition("q1", ConditionOperator::IsNotEmpty, ""),
        &filled
    ));
}

#[test]
fn is_empty_negates_is_not_empty() {
    let cases = [
        json!({ "q1": "" }),
        json!({ "q1": "text" }),
        json!({ "q1": [] }),
        json!({ "q1": ["a", "b"] }),
        json!({ "q1": 0 }),
        json!({ "q1": false }),
        json!({ "q1": { "street": "1 Main St" } }),
    ];
    for case in cases {
        let map = answers(case.clone());
        let empty = evaluate(&condition("q1", ConditionOperator::IsEmpty, ""), &map);
        let not_empty = evaluate(&condition("q1", ConditionOperator::IsNotEmpty, ""), &map);
        assert_ne!(empty, not_empty, "disagreement on {case}");
    }
}

#[test]
fn equals_tests_membership_on_list_answers() {
    let map = answers(json!({ "picks": ["Red", "Blue"] }));
    assert!(evaluate(
        &condition("picks", ConditionOperator::Equals, "Blue"),
        &map
    ));
    assert!(!evaluate(
        &condition("picks", ConditionOperator::Equals, "Green"),
        &map
    ));
    assert!(evaluate(
        &condition("picks", ConditionOperator::NotEquals, "Green"),
        &map
    ));
}

#[test]
fn equals_coerces_scalars_to_strings() {
    let map = answers(json!({ "rating": 7, "agreed": true }));
    assert!(evaluate(
        &condition("rating", ConditionOperator::Equals, "7"),
        &map
    ));
    assert!(evaluate(
        &condition("agreed", ConditionOperator::Equals, "true"),
        &map
    ));
}

#[test]
fn contains_is_case_insensitive_and_joins_lists() {
    let map = answers(json!({ "name": "Jane Doe", "picks": ["Red", "Blue"] }));
    assert!(evaluate(
        &condition("name", ConditionOperator::Contains, "jane"),
        &map
    ));
    assert!(evaluate(
        &condition("picks", ConditionOperator::Contains, "red,blue"),
        &map
    ));
    assert!(!evaluate(
        &condition("name", ConditionOperator::Contains, "smith"),
        &map
    ));
}

#[test]
fn numeric_operators_parse_both_sides() {
    let map = answers(json!({ "age": "42", "score": 3.5 }));
    assert!(evaluate(
        &condition("age", ConditionOperator::GreaterThan, "40"),
        &map
    ));
    assert!(evaluate(
        &condition("score", ConditionOperator::LessThan, "4"),
        &map
    ));
    assert!(!evaluate(
        &condition("age", ConditionOperator::LessThan, "40"),
        &map
    ));
}

#[test]
fn numeric_operators_degrade_to_false_on_unparseable_input() {
    let map = answers(json!({ "age": "not a number" }));
    assert!(!evaluate(
        &condition("age", ConditionOperator::GreaterThan, "1"),
        &map
    ));
    let map = answers(json!({ "age": 10 }));
    assert!(!evaluate(
        &condition("age", ConditionOperator::GreaterThan, "ten"),
        &map
    ));
}

#[test]
fn combine_is_vacuously_true_for_all_and_false_for_any() {
    assert!(combine(&[], Combinator::All));
    assert!(!combine(&[], Combinator::Any));
    assert!(combine(&[true, true], Combinator::All));
    assert!(!combine(&[true, false], Combinator::All));
    assert!(combine(&[false, true], Combinator::Any));
    assert!(!combine(&[false, false], Combinator::Any));
}
