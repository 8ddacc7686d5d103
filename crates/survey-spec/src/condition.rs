use crate::answers::{AnswerMap, AnswerValue};
use crate::spec::logic::{Combinator, ConditionOperator, SkipCondition};

/// Evaluates one atomic condition against the answers collected so far.
///
/// A missing prior answer never satisfies a positive condition; only the
/// emptiness operators treat absence as meaningful. Malformed input degrades
/// to `false` rather than erroring.
pub fn evaluate(condition: &SkipCondition, answers: &AnswerMap) -> bool {
    let answer = answers.get(&condition.question_id);

    match condition.operator {
        ConditionOperator::IsEmpty => answer.is_none_or(AnswerValue::is_empty),
        ConditionOperator::IsNotEmpty => answer.is_some_and(|value| !value.is_empty()),
        ConditionOperator::Equals => answer.is_some_and(|value| equals(value, &condition.value)),
        ConditionOperator::NotEquals => {
            answer.is_some_and(|value| !equals(value, &condition.value))
        }
        ConditionOperator::Contains => answer.is_some_and(|value| {
            value
                .to_compare_string()
                .to_lowercase()
                .contains(&condition.value.to_lowercase())
        }),
        ConditionOperator::GreaterThan => {
            answer.is_some_and(|value| compare_numeric(value, &condition.value, |a, b| a > b))
        }
        ConditionOperator::LessThan => {
            answer.is_some_and(|value| compare_numeric(value, &condition.value, |a, b| a < b))
        }
    }
}

/// Combines evaluated condition results. An empty list combined with `all`
/// is vacuously true: no conditions configured means the logic always applies.
pub fn combine(results: &[bool], combinator: Combinator) -> bool {
    match combinator {
        Combinator::All => results.iter().all(|result| *result),
        Combinator::Any => results.iter().any(|result| *result),
    }
}

/// Evaluates a condition list and combines the results in one pass.
pub fn evaluate_all(
    conditions: &[SkipCondition],
    combinator: Combinator,
    answers: &AnswerMap,
) -> bool {
    let results = conditions
        .iter()
        .map(|condition| evaluate(condition, answers))
        .collect::<Vec<_>>();
    combine(&results, combinator)
}

fn equals(answer: &AnswerValue, value: &str) -> bool {
    match answer {
        // Multi-select and ranking answers test membership, not identity.
        AnswerValue::List(items) => items.iter().any(|item| item == value),
        other => other.to_compare_string() == value,
    }
}

fn compare_numeric(answer: &AnswerValue, value: &str, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (answer.to_number(), value.trim().parse::<f64>().ok()) {
        (Some(left), Some(right)) => cmp(left, right),
        _ => false,
    }
}
