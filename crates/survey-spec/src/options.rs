use crate::answers::{AnswerMap, AnswerValue};
use crate::spec::logic::CarryMode;
use crate::spec::question::QuestionSpec;

/// Computes the option list a question currently offers.
///
/// Questions without an enabled carry-forward keep their static options.
/// A dangling source falls back to the static list rather than failing the
/// session. `selected` keeps the respondent's selection order and drops
/// values the source no longer offers.
pub fn resolve_options(
    question: &QuestionSpec,
    questions: &[QuestionSpec],
    answers: &AnswerMap,
) -> Vec<String> {
    let Some(config) = &question.option_source else {
        return question.static_options().to_vec();
    };
    if !config.enabled {
        return question.static_options().to_vec();
    }
    let Some(source) = questions
        .iter()
        .find(|candidate| candidate.id == config.source_question_id)
    else {
        return question.static_options().to_vec();
    };

    let source_options = source.static_options();
    let selected = answers
        .get(&source.id)
        .map(AnswerValue::selections)
        .unwrap_or_default();

    match config.mode {
        CarryMode::Selected => selected
            .into_iter()
            .filter(|value| source_options.contains(value))
            .collect(),
        CarryMode::NotSelected => source_options
            .iter()
            .filter(|option| !selected.contains(option))
            .cloned()
            .collect(),
        CarryMode::All => source_options.to_vec(),
    }
}
