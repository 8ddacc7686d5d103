use serde_json::json;

use survey_spec::{
    AnswerMap, Position, RenderStatus, SurveySpec, build_render_payload, render_json_ui,
    render_text,
};

fn survey_fixture() -> SurveySpec {
    serde_json::from_value(json!({
        "id": "feedback",
        "title": "Feedback",
        "version": "2.1",
        "anonymous": true,
        "presentation": { "intro": "Two minutes of your time." },
        "questions": [
            { "id": "name", "type": "short_text", "title": "Your name", "required": true },
            { "id": "greeting", "type": "statement", "title": "Nice to meet you, {{name}}!" },
            {
                "id": "followup", "type": "long_text", "title": "Why?",
                "skip_logic": {
                    "enabled": true,
                    "conditions": [
                        { "question_id": "score", "operator": "less_than", "value": "5" }
                    ]
                }
            },
            { "id": "score", "type": "rating", "title": "Score", "settings": { "min": 1.0, "max": 10.0 } }
        ]
    }))
    .expect("fixture should deserialize")
}

fn answers(value: serde_json::Value) -> AnswerMap {
    serde_json::from_value(value).expect("fixture should deserialize")
}

#[test]
fn payload_reflects_position_progress_and_piping() {
    let spec = survey_fixture();
    let map = answers(json!({ "name": "Jane" }));
    let payload = build_render_payload(&spec, &Position::Question(1), &map);

    assert_eq!(payload.survey_id, "feedback");
    assert_eq!(payload.status, RenderStatus::NeedInput);
    assert_eq!(payload.current_question_id.as_deref(), Some("greeting"));
    assert_eq!(payload.help.as_deref(), Some("Two minutes of your time."));

    // name + score are answerable and visible; followup is hidden, the
    // statement never counts.
    assert_eq!(payload.progress.total, 2);
    assert_eq!(payload.progress.answered, 1);

    let greeting = payload
        .questions
        .iter()
        .find(|question| question.id == "greeting")
        .unwrap();
    assert_eq!(greeting.title, "Nice to meet you, Jane!");

    let followup = payload
        .questions
        .iter()
        .find(|question| question.id == "followup")
        .unwrap();
    assert!(!followup.visible);
}

#[test]
fn terminal_positions_map_to_their_statuses() {
    let spec = survey_fixture();
    let map = AnswerMap::new();
    let submitted = build_render_payload(&spec, &Position::Submitted, &map);
    assert_eq!(submitted.status, RenderStatus::Complete);
    assert_eq!(submitted.current_question_id, None);

    let ended = build_render_payload(&spec, &Position::Ended, &map);
    assert_eq!(ended.status, RenderStatus::EndedEarly);
    assert!(render_text(&ended).contains("ended early"));
}

#[test]
fn json_ui_exposes_the_payload_shape() {
    let spec = survey_fixture();
    let map = answers(json!({ "name": "Jane" }));
    let payload = build_render_payload(&spec, &Position::Question(0), &map);
    let ui = render_json_ui(&payload);

    assert_eq!(ui["survey_id"], "feedback");
    assert_eq!(ui["status"], "need_input");
    assert_eq!(ui["current_question_id"], "name");
    assert_eq!(ui["progress"]["answered"], 1);
    assert_eq!(ui["questions"][0]["id"], "name");
    assert_eq!(ui["questions"][0]["type"], "short_text");
    assert_eq!(ui["questions"][0]["current_value"], "Jane");
    assert!(ui["schema"]["properties"].get("name").is_some());
}

#[test]
fn text_rendering_lists_the_current_question_and_visible_entries() {
    let spec = survey_fixture();
    let map = answers(json!({ "name": "Jane", "score": 9.0 }));
    let payload = build_render_payload(&spec, &Position::Question(3), &map);
    let text = render_text(&payload);

    assert!(text.contains("Survey: Feedback (feedback)"));
    assert!(text.contains("Current question: score"));
    assert!(text.contains(" - name (Your name) [required] = Jane"));
    assert!(text.contains(" - score (Score) = 9"));
    assert!(!text.contains(" - followup"));
}
