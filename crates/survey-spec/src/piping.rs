use regex::Regex;

use crate::answers::{AnswerMap, AnswerValue, format_number};
use crate::spec::question::QuestionSpec;

/// Address fields rendered in display order.
const ADDRESS_FIELDS: [&str; 5] = ["street", "city", "state", "zip", "country"];

/// Replaces `{{questionId}}` tokens with the referenced answers.
///
/// Tokens are non-greedy and non-nested. An absent or empty answer renders a
/// visible placeholder built from the question title (or the raw id when the
/// question is unknown); substitution never fails.
pub fn pipe(text: &str, questions: &[QuestionSpec], answers: &AnswerMap) -> String {
    let Ok(token) = Regex::new(r"\{\{([^{}]+?)\}\}") else {
        return text.to_string();
    };
    token
        .replace_all(text, |caps: &regex::Captures| {
            let id = caps[1].trim();
            match answers.get(id) {
                Some(value) if !value.is_empty() => display_answer(value),
                _ => placeholder(id, questions),
            }
        })
        .into_owned()
}

fn placeholder(id: &str, questions: &[QuestionSpec]) -> String {
    let label = questions
        .iter()
        .find(|question| question.id == id)
        .map(|question| question.title.chars().take(30).collect::<String>())
        .unwrap_or_else(|| id.to_string());
    format!("[{label}...]")
}

/// Renders an answer for inline display.
pub fn display_answer(value: &AnswerValue) -> String {
    match value {
        AnswerValue::Bool(flag) => flag.to_string(),
        AnswerValue::Number(num) => format_number(*num),
        AnswerValue::Text(text) => text.clone(),
        AnswerValue::List(items) => items.join(", "),
        AnswerValue::NumberMap(map) => map
            .iter()
            .map(|(key, num)| format!("{key}: {}", format_number(*num)))
            .collect::<Vec<_>>()
            .join(", "),
        AnswerValue::TextMap(fields) => {
            if fields.contains_key("street") {
                ADDRESS_FIELDS
                    .iter()
                    .filter_map(|field| fields.get(*field))
                    .filter(|part| !part.trim().is_empty())
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            } else {
                fields
                    .iter()
                    .map(|(key, part)| format!("{key}: {part}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }
    }
}
