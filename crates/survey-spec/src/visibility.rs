use crate::answers::AnswerMap;
use crate::condition::evaluate_all;
use crate::spec::question::QuestionSpec;
use crate::spec::survey::SurveySpec;

pub type VisibilityMap = std::collections::BTreeMap<String, bool>;

/// Decides whether a single question is shown.
///
/// Disabled skip logic and zero-condition skip logic both show the question
/// unconditionally. The check is pure and order-independent across questions.
pub fn should_show(question: &QuestionSpec, answers: &AnswerMap) -> bool {
    match &question.skip_logic {
        Some(logic) if logic.enabled && !logic.conditions.is_empty() => {
            evaluate_all(&logic.conditions, logic.combinator, answers)
        }
        _ => true,
    }
}

/// Resolves visibility for every question in the survey at once.
pub fn resolve_visibility(spec: &SurveySpec, answers: &AnswerMap) -> VisibilityMap {
    let mut map = VisibilityMap::new();
    for question in &spec.questions {
        map.insert(question.id.clone(), should_show(question, answers));
    }
    map
}
