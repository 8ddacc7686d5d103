use crate::answers::{AnswerMap, AnswerValue, ValidationError, ValidationResult};
use crate::options::resolve_options;
use crate::spec::question::{QuestionSpec, QuestionType};
use crate::spec::survey::SurveySpec;
use crate::visibility::resolve_visibility;

/// Whether a forward transition away from this question is permitted.
///
/// Display kinds and non-required questions always permit proceeding;
/// a required question blocks until its answer is complete for its kind.
pub fn can_proceed(question: &QuestionSpec, answer: Option<&AnswerValue>) -> bool {
    if question.kind.is_display() || !question.required {
        return true;
    }
    let Some(answer) = answer else {
        return false;
    };
    is_complete(question, answer)
}

/// Kind-specific completeness check for a present answer.
pub fn is_complete(question: &QuestionSpec, answer: &AnswerValue) -> bool {
    match question.kind {
        // Consent needs an explicit affirmative, not merely an answer.
        QuestionType::Legal => matches!(answer, AnswerValue::Bool(true)),
        QuestionType::Address => match answer {
            AnswerValue::TextMap(fields) => fields
                .get("street")
                .is_some_and(|street| !street.trim().is_empty()),
            _ => false,
        },
        QuestionType::Matrix => match answer {
            AnswerValue::NumberMap(ratings) => {
                let rows = question.matrix_rows();
                if rows.is_empty() {
                    !ratings.is_empty()
                } else {
                    rows.iter().all(|row| ratings.contains_key(row))
                }
            }
            _ => false,
        },
        QuestionType::Ranking => match answer {
            AnswerValue::List(ranked) => {
                let options = question.static_options();
                if options.is_empty() {
                    !ranked.is_empty()
                } else {
                    ranked.len() == options.len()
                }
            }
            _ => false,
        },
        QuestionType::ConstantSum => match answer {
            AnswerValue::NumberMap(allocation) => {
                match question.settings.as_ref().and_then(|settings| settings.total) {
                    // The allocated total must match the configured total exactly.
                    Some(total) => allocation.values().sum::<f64>() == total,
                    None => !allocation.is_empty(),
                }
            }
            _ => false,
        },
        _ => !answer.is_empty(),
    }
}

/// Validates the current answers against the survey.
///
/// Only visible questions are checked; hidden questions contribute neither
/// errors nor missing-required entries. Answer keys with no matching
/// question are reported as unknown fields.
pub fn validate(spec: &SurveySpec, answers: &AnswerMap) -> ValidationResult {
    let visibility = resolve_visibility(spec, answers);

    let mut errors = Vec::new();
    let mut missing_required = Vec::new();

    for question in &spec.questions {
        if question.kind.is_display() {
            continue;
        }
        if !visibility.get(&question.id).copied().unwrap_or(true) {
            continue;
        }

        match answers.get(&question.id) {
            None => {
                if question.required {
                    missing_required.push(question.id.clone());
                }
            }
            Some(value) => {
                if let Some(error) = validate_value(question, value, spec, answers) {
                    errors.push(error);
                }
            }
        }
    }

    let all_ids: std::collections::BTreeSet<_> = spec
        .questions
        .iter()
        .map(|question| question.id.as_str())
        .collect();
    let unknown_fields: Vec<String> = answers
        .keys()
        .filter(|key| !all_ids.contains(key.as_str()))
        .cloned()
        .collect();

    ValidationResult {
        valid: errors.is_empty() && missing_required.is_empty() && unknown_fields.is_empty(),
        errors,
        missing_required,
        unknown_fields,
    }
}

fn validate_value(
    question: &QuestionSpec,
    value: &AnswerValue,
    spec: &SurveySpec,
    answers: &AnswerMap,
) -> Option<ValidationError> {
    if !matches_shape(question.kind, value) {
        return Some(base_error(question, "answer shape mismatch", "type_mismatch"));
    }

    if question.kind.uses_options() {
        let allowed = resolve_options(question, &spec.questions, answers);
        if !allowed.is_empty() {
            let chosen = match value {
                AnswerValue::Text(text) => vec![text.clone()],
                AnswerValue::List(items) => items.clone(),
                AnswerValue::NumberMap(map) => map.keys().cloned().collect(),
                _ => Vec::new(),
            };
            if chosen.iter().any(|choice| !allowed.contains(choice)) {
                return Some(base_error(
                    question,
                    "answer outside the offered options",
                    "option_mismatch",
                ));
            }
        }
    }

    if question.required && !is_complete(question, value) {
        return Some(base_error(question, "answer is incomplete", "incomplete"));
    }

    None
}

fn matches_shape(kind: QuestionType, value: &AnswerValue) -> bool {
    match kind {
        QuestionType::ShortText
        | QuestionType::LongText
        | QuestionType::Email
        | QuestionType::Phone
        | QuestionType::Website
        | QuestionType::Date
        | QuestionType::Time
        | QuestionType::FileUpload
        | QuestionType::MultipleChoice
        | QuestionType::Dropdown
        | QuestionType::PictureChoice => matches!(value, AnswerValue::Text(_)),
        QuestionType::Number
        | QuestionType::Rating
        | QuestionType::OpinionScale
        | QuestionType::Nps
        | QuestionType::Slider => matches!(value, AnswerValue::Number(_)),
        QuestionType::YesNo | QuestionType::Legal => matches!(value, AnswerValue::Bool(_)),
        QuestionType::Checkboxes | QuestionType::Ranking => matches!(value, AnswerValue::List(_)),
        QuestionType::Matrix | QuestionType::ConstantSum => {
            matches!(value, AnswerValue::NumberMap(_))
        }
        QuestionType::Address => matches!(value, AnswerValue::TextMap(_)),
        QuestionType::WelcomeScreen
        | QuestionType::EndScreen
        | QuestionType::Section
        | QuestionType::Statement => true,
    }
}

fn base_error(question: &QuestionSpec, message: &str, code: &str) -> ValidationError {
    ValidationError {
        question_id: Some(question.id.clone()),
        message: message.into(),
        code: Some(code.into()),
    }
}
