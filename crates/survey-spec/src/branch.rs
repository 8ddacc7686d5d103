use crate::answers::AnswerMap;
use crate::condition::evaluate_all;
use crate::spec::logic::{BranchAction, DefaultAction};
use crate::spec::question::QuestionSpec;

/// Where the flow goes after the owning question is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchOutcome {
    /// Continue to the next visible question in sequence order.
    Next,
    /// Terminate the survey early.
    End,
    /// Move to the named question.
    Jump(String),
}

/// Resolves the branch outcome for a single question.
///
/// Rules are scanned in authored order and the first satisfied rule wins;
/// a rule with no conditions always fires. Only the current question's own
/// branch logic is consulted.
pub fn resolve_branch(question: &QuestionSpec, answers: &AnswerMap) -> BranchOutcome {
    let Some(logic) = &question.branch_logic else {
        return BranchOutcome::Next;
    };
    if !logic.enabled || logic.rules.is_empty() {
        return BranchOutcome::Next;
    }

    for rule in &logic.rules {
        if evaluate_all(&rule.conditions, rule.combinator, answers) {
            return match &rule.action {
                BranchAction::Jump { target } => BranchOutcome::Jump(target.clone()),
                BranchAction::End => BranchOutcome::End,
            };
        }
    }

    match logic.default_action {
        DefaultAction::Next => BranchOutcome::Next,
        DefaultAction::End => BranchOutcome::End,
    }
}
