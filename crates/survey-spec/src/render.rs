use serde_json::{Map, Value, json};

use crate::answers::{AnswerMap, AnswerValue};
use crate::navigator::Position;
use crate::options::resolve_options;
use crate::piping::{display_answer, pipe};
use crate::schema;
use crate::spec::question::QuestionType;
use crate::spec::survey::SurveySpec;
use crate::visibility::resolve_visibility;

/// Status labels returned by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// More input is required.
    NeedInput,
    /// The visible sequence was exhausted.
    Complete,
    /// A branch rule terminated the survey early.
    EndedEarly,
}

impl RenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStatus::NeedInput => "need_input",
            RenderStatus::Complete => "complete",
            RenderStatus::EndedEarly => "ended",
        }
    }
}

/// Progress counters exposed to renderers.
#[derive(Debug, Clone)]
pub struct RenderProgress {
    pub answered: usize,
    pub total: usize,
}

/// Describes a single question for render outputs.
///
/// `title` and `description` already have piping tokens substituted and
/// `options` is the resolved (carry-forward-aware) list.
#[derive(Debug, Clone)]
pub struct RenderQuestion {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub kind: QuestionType,
    pub required: bool,
    pub options: Vec<String>,
    pub visible: bool,
    pub current_value: Option<AnswerValue>,
}

/// Collected payload used by both text and JSON renderers.
#[derive(Debug, Clone)]
pub struct RenderPayload {
    pub survey_id: String,
    pub survey_title: String,
    pub survey_version: String,
    pub status: RenderStatus,
    pub current_question_id: Option<String>,
    pub progress: RenderProgress,
    pub help: Option<String>,
    pub questions: Vec<RenderQuestion>,
    pub schema: Value,
}

/// Build the renderer payload for the given traversal position.
pub fn build_render_payload(
    spec: &SurveySpec,
    position: &Position,
    answers: &AnswerMap,
) -> RenderPayload {
    let visibility = resolve_visibility(spec, answers);

    let current_question_id = match position {
        Position::Question(index) => spec.questions.get(*index).map(|question| question.id.clone()),
        _ => None,
    };

    let mut answered = 0;
    let mut total = 0;
    for question in &spec.questions {
        if question.kind.is_display() {
            continue;
        }
        if !visibility.get(&question.id).copied().unwrap_or(true) {
            continue;
        }
        total += 1;
        if answers
            .get(&question.id)
            .is_some_and(|value| !value.is_empty())
        {
            answered += 1;
        }
    }

    let questions = spec
        .questions
        .iter()
        .map(|question| RenderQuestion {
            id: question.id.clone(),
            title: pipe(&question.title, &spec.questions, answers),
            description: question
                .description
                .as_ref()
                .map(|text| pipe(text, &spec.questions, answers)),
            kind: question.kind,
            required: question.required,
            options: resolve_options(question, &spec.questions, answers),
            visible: visibility.get(&question.id).copied().unwrap_or(true),
            current_value: answers.get(&question.id).cloned(),
        })
        .collect::<Vec<_>>();

    let help = spec
        .presentation
        .as_ref()
        .and_then(|presentation| presentation.intro.clone())
        .or_else(|| spec.description.clone());

    let status = match position {
        Position::Submitted => RenderStatus::Complete,
        Position::Ended => RenderStatus::EndedEarly,
        _ => RenderStatus::NeedInput,
    };

    let schema = schema::generate(spec, &visibility, answers);

    RenderPayload {
        survey_id: spec.id.clone(),
        survey_title: spec.title.clone(),
        survey_version: spec.version.clone(),
        status,
        current_question_id,
        progress: RenderProgress { answered, total },
        help,
        questions,
        schema,
    }
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &RenderPayload) -> Value {
    let questions = payload
        .questions
        .iter()
        .map(|question| {
            let mut map = Map::new();
            map.insert("id".into(), Value::String(question.id.clone()));
            map.insert("title".into(), Value::String(question.title.clone()));
            map.insert(
                "description".into(),
                question
                    .description
                    .clone()
                    .map(Value::String)
                    .unwrap_or(Value::Null),
            );
            map.insert(
                "type".into(),
                serde_json::to_value(question.kind).unwrap_or(Value::Null),
            );
            map.insert("required".into(), Value::Bool(question.required));
            if !question.options.is_empty() {
                map.insert(
                    "options".into(),
                    Value::Array(
                        question
                            .options
                            .iter()
                            .map(|option| Value::String(option.clone()))
                            .collect(),
                    ),
                );
            }
            if let Some(current_value) = &question.current_value {
                map.insert(
                    "current_value".into(),
                    serde_json::to_value(current_value).unwrap_or(Value::Null),
                );
            }
            map.insert("visible".into(), Value::Bool(question.visible));
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "survey_id": payload.survey_id,
        "survey_title": payload.survey_title,
        "survey_version": payload.survey_version,
        "status": payload.status.as_str(),
        "current_question_id": payload.current_question_id,
        "progress": {
            "answered": payload.progress.answered,
            "total": payload.progress.total,
        },
        "help": payload.help,
        "questions": questions,
        "schema": payload.schema,
    })
}

/// Render the payload as human-friendly text.
pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Survey: {} ({})",
        payload.survey_title, payload.survey_id
    ));
    lines.push(format!(
        "Status: {} ({}/{})",
        payload.status.as_str(),
        payload.progress.answered,
        payload.progress.total
    ));
    if let Some(help) = &payload.help {
        lines.push(format!("Help: {}", help));
    }

    if let Some(current) = &payload.current_question_id {
        lines.push(format!("Current question: {}", current));
        if let Some(question) = payload
            .questions
            .iter()
            .find(|question| &question.id == current)
        {
            lines.push(format!("  Title: {}", question.title));
            if let Some(description) = &question.description {
                lines.push(format!("  Description: {}", description));
            }
            if question.required {
                lines.push("  Required: yes".to_string());
            }
            if !question.options.is_empty() {
                lines.push(format!("  Options: {}", question.options.join(", ")));
            }
            if let Some(value) = &question.current_value {
                lines.push(format!("  Current value: {}", display_answer(value)));
            }
        }
    } else {
        lines.push(match payload.status {
            RenderStatus::EndedEarly => "The survey ended early.".to_string(),
            _ => "All visible questions are answered.".to_string(),
        });
    }

    lines.push("Visible questions:".to_string());
    for question in payload.questions.iter().filter(|question| question.visible) {
        let mut entry = format!(" - {} ({})", question.id, question.title);
        if question.required {
            entry.push_str(" [required]");
        }
        if let Some(current_value) = &question.current_value {
            entry.push_str(&format!(" = {}", display_answer(current_value)));
        }
        lines.push(entry);
    }

    lines.join("\n")
}
