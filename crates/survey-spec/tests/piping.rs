use serde_json::json;

use survey_spec::{AnswerMap, QuestionSpec, pipe};

fn questions(value: serde_json::Value) -> Vec<QuestionSpec> {
    serde_json::from_value(value).expect("fixture should deserialize")
}

fn answers(value: serde_json::Value) -> AnswerMap {
    serde_json::from_value(value).expect("fixture should deserialize")
}

#[test]
fn substitutes_a_prior_answer() {
    let qs = questions(json!([
        { "id": "q1", "type": "short_text", "title": "Your name" }
    ]));
    let map = answers(json!({ "q1": "Jane" }));
    assert_eq!(pipe("Hi {{q1}}!", &qs, &map), "Hi Jane!");
}

#[test]
fn absent_answers_render_a_truncated_title_placeholder() {
    let qs = questions(json!([
        { "id": "q1", "type": "short_text", "title": "Your name is very very long indeed" }
    ]));
    assert_eq!(
        pipe("Hi {{q1}}!", &qs, &AnswerMap::new()),
        "Hi [Your name is very very long in...]!"
    );
}

#[test]
fn empty_answers_use_the_placeholder_too() {
    let qs = questions(json!([
        { "id": "q1", "type": "short_text", "title": "Name" }
    ]));
    let map = answers(json!({ "q1": "" }));
    assert_eq!(pipe("Hi {{q1}}!", &qs, &map), "Hi [Name...]!");
}

#[test]
fn unknown_question_ids_fall_back_to_the_raw_id() {
    let qs = questions(json!([]));
    assert_eq!(pipe("Hi {{mystery}}!", &qs, &AnswerMap::new()), "Hi [mystery...]!");
}

#[test]
fn list_answers_are_comma_joined() {
    let qs = questions(json!([
        { "id": "picks", "type": "checkboxes", "title": "Picks", "options": ["A", "B"] }
    ]));
    let map = answers(json!({ "picks": ["A", "B"] }));
    assert_eq!(pipe("You chose {{picks}}.", &qs, &map), "You chose A, B.");
}

#[test]
fn address_answers_join_known_fields_in_order() {
    let qs = questions(json!([
        { "id": "home", "type": "address", "title": "Home" }
    ]));
    let map = answers(json!({
        "home": { "street": "1 Main St", "zip": "90210", "city": "Springfield", "state": " " }
    }));
    assert_eq!(
        pipe("Shipping to {{home}}.", &qs, &map),
        "Shipping to 1 Main St, Springfield, 90210."
    );
}

#[test]
fn map_answers_render_key_value_pairs() {
    let qs = questions(json!([
        { "id": "grid", "type": "matrix", "title": "Ratings", "options": ["1", "2", "3"] }
    ]));
    let map = answers(json!({ "grid": { "Price": 2, "Speed": 3 } }));
    assert_eq!(
        pipe("You rated: {{grid}}", &qs, &map),
        "You rated: Price: 2, Speed: 3"
    );
}

#[test]
fn numbers_drop_the_trailing_zero_and_multiple_tokens_resolve() {
    let qs = questions(json!([
        { "id": "age", "type": "number", "title": "Age" },
        { "id": "name", "type": "short_text", "title": "Name" }
    ]));
    let map = answers(json!({ "age": 42.0, "name": "Jane" }));
    assert_eq!(
        pipe("{{name}} is {{age}} years old.", &qs, &map),
        "Jane is 42 years old."
    );
}

#[test]
fn text_without_tokens_is_untouched() {
    let qs = questions(json!([]));
    assert_eq!(
        pipe("No tokens here, just {braces}.", &qs, &AnswerMap::new()),
        "No tokens here, just {braces}."
    );
}
