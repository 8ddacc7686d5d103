use serde_json::json;

use survey_spec::{AnswerMap, BranchOutcome, QuestionSpec, resolve_branch};

fn question(value: serde_json::Value) -> QuestionSpec {
    serde_json::from_value(value).expect("fixture should deserialize")
}

fn answers(value: serde_json::Value) -> AnswerMap {
    serde_json::from_value(value).expect("fixture should deserialize")
}

#[test]
fn no_branch_logic_means_next() {
    let plain = question(json!({ "id": "q1", "type": "short_text", "title": "Name" }));
    assert_eq!(resolve_branch(&plain, &AnswerMap::new()), BranchOutcome::Next);

    let disabled = question(json!({
        "id": "q1", "type": "short_text", "title": "Name",
        "branch_logic": {
            "enabled": false,
            "rules": [
                { "conditions": [], "action": { "type": "end" } }
            ]
        }
    }));
    assert_eq!(
        resolve_branch(&disabled, &AnswerMap::new()),
        BranchOutcome::Next
    );

    let empty = question(json!({
        "id": "q1", "type": "short_text", "title": "Name",
        "branch_logic": { "enabled": true, "rules": [] }
    }));
    assert_eq!(resolve_branch(&empty, &AnswerMap::new()), BranchOutcome::Next);
}

#[test]
fn first_matching_rule_wins() {
    // Both rules match; authored order must decide, so the jump beats the end.
    let q = question(json!({
        "id": "gate", "type": "multiple_choice", "title": "Plan",
        "options": ["Free", "Pro"],
        "branch_logic": {
            "enabled": true,
            "rules": [
                {
                    "conditions": [
                        { "question_id": "gate", "operator": "equals", "value": "Pro" }
                    ],
                    "action": { "type": "jump", "target": "q5" }
                },
                {
                    "conditions": [
                        { "question_id": "gate", "operator": "is_not_empty", "value": "" }
                    ],
                    "action": { "type": "end" }
                }
            ]
        }
    }));

    assert_eq!(
        resolve_branch(&q, &answers(json!({ "gate": "Pro" }))),
        BranchOutcome::Jump("q5".into())
    );
}

#[test]
fn unmatched_rules_fall_back_to_the_default_action() {
    let base = json!({
        "id": "gate", "type": "yes_no", "title": "Continue?",
        "branch_logic": {
            "enabled": true,
            "rules": [
                {
                    "conditions": [
                        { "question_id": "gate", "operator": "equals", "value": "false" }
                    ],
                    "action": { "type": "end" }
                }
            ],
            "default_action": "end"
        }
    });

    let ends = question(base.clone());
    assert_eq!(
        resolve_branch(&ends, &answers(json!({ "gate": true }))),
        BranchOutcome::End
    );

    let mut with_next = base;
    with_next["branch_logic"]["default_action"] = json!("next");
    let continues = question(with_next);
    assert_eq!(
        resolve_branch(&continues, &answers(json!({ "gate": true }))),
        BranchOutcome::Next
    );
}

#[test]
fn a_rule_without_conditions_always_fires() {
    let q = question(json!({
        "id": "q1", "type": "statement", "title": "Thanks",
        "branch_logic": {
            "enabled": true,
            "rules": [
                { "conditions": [], "action": { "type": "jump", "target": "q9" } }
            ]
        }
    }));
    assert_eq!(
        resolve_branch(&q, &AnswerMap::new()),
        BranchOutcome::Jump("q9".into())
    );
}

#[test]
fn any_combinator_applies_inside_a_rule() {
    let q = question(json!({
        "id": "q1", "type": "multiple_choice", "title": "Color",
        "options": ["Red", "Green", "Blue"],
        "branch_logic": {
            "enabled": true,
            "rules": [
                {
                    "combinator": "any",
                    "conditions": [
                        { "question_id": "q1", "operator": "equals", "value": "Red" },
                        { "question_id": "q1", "operator": "equals", "value": "Blue" }
                    ],
                    "action": { "type": "end" }
                }
            ]
        }
    }));

    assert_eq!(
        resolve_branch(&q, &answers(json!({ "q1": "Blue" }))),
        BranchOutcome::End
    );
    assert_eq!(
        resolve_branch(&q, &answers(json!({ "q1": "Green" }))),
        BranchOutcome::Next
    );
}
