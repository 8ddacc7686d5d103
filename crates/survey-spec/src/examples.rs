use std::collections::BTreeMap;

use crate::answers::{AnswerMap, AnswerValue};
use crate::options::resolve_options;
use crate::spec::question::{QuestionSpec, QuestionType};
use crate::spec::survey::SurveySpec;
use crate::visibility::VisibilityMap;

/// Generates deterministic example answers for the visible questions.
///
/// Answers are folded in sequence order so that carry-forward sources are
/// already populated when their consumers are reached.
pub fn generate(spec: &SurveySpec, visibility: &VisibilityMap) -> AnswerMap {
    let mut output = AnswerMap::new();

    for question in &spec.questions {
        if question.kind.is_display() {
            continue;
        }
        if !visibility.get(&question.id).copied().unwrap_or(true) {
            continue;
        }
        let example = example_for(question, spec, &output);
        output.insert(question.id.clone(), example);
    }

    output
}

fn example_for(question: &QuestionSpec, spec: &SurveySpec, so_far: &AnswerMap) -> AnswerValue {
    let options = resolve_options(question, &spec.questions, so_far);
    let first_option = || {
        options
            .first()
            .cloned()
            .unwrap_or_else(|| format!("example-{}", question.id))
    };

    match question.kind {
        QuestionType::Email => AnswerValue::Text(format!("{}@example.com", question.id)),
        QuestionType::Website => AnswerValue::Text("https://example.com".into()),
        QuestionType::Date => AnswerValue::Text("2024-01-01".into()),
        QuestionType::Time => AnswerValue::Text("09:00".into()),
        QuestionType::Number
        | QuestionType::Rating
        | QuestionType::OpinionScale
        | QuestionType::Nps
        | QuestionType::Slider => {
            let min = question
                .settings
                .as_ref()
                .and_then(|settings| settings.min)
                .unwrap_or(1.0);
            AnswerValue::Number(min)
        }
        QuestionType::YesNo => AnswerValue::Bool(false),
        QuestionType::Legal => AnswerValue::Bool(true),
        QuestionType::MultipleChoice | QuestionType::Dropdown | QuestionType::PictureChoice => {
            AnswerValue::Text(first_option())
        }
        QuestionType::Checkboxes => AnswerValue::List(vec![first_option()]),
        QuestionType::Ranking => AnswerValue::List(options),
        QuestionType::Matrix => {
            let columns = question.static_options();
            let rating = columns.len().max(1) as f64;
            AnswerValue::NumberMap(
                question
                    .matrix_rows()
                    .iter()
                    .map(|row| (row.clone(), rating))
                    .collect(),
            )
        }
        QuestionType::ConstantSum => {
            let total = question
                .settings
                .as_ref()
                .and_then(|settings| settings.total)
                .unwrap_or(100.0);
            let mut allocation = BTreeMap::new();
            allocation.insert(first_option(), total);
            AnswerValue::NumberMap(allocation)
        }
        QuestionType::Address => {
            let mut fields = BTreeMap::new();
            fields.insert("street".to_string(), "1 Example Street".to_string());
            fields.insert("city".to_string(), "Exampleville".to_string());
            AnswerValue::TextMap(fields)
        }
        _ => AnswerValue::Text(format!("example-{}", question.id)),
    }
}
