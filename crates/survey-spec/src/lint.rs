use std::collections::BTreeSet;

use thiserror::Error;

use crate::spec::logic::BranchAction;
use crate::spec::survey::SurveySpec;

/// Authoring-time configuration finding. `Display` is the report message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    #[error("question '{question_id}': branch condition references unknown question '{source_id}'")]
    UnknownBranchConditionSource {
        question_id: String,
        source_id: String,
    },
    #[error("question '{question_id}': branch rule jumps to unknown question '{target_id}'")]
    UnknownJumpTarget {
        question_id: String,
        target_id: String,
    },
    #[error("question '{question_id}': carry-forward source '{source_id}' does not exist")]
    UnknownCarrySource {
        question_id: String,
        source_id: String,
    },
    #[error("question '{question_id}': carry-forward source '{source_id}' has no options")]
    CarrySourceWithoutOptions {
        question_id: String,
        source_id: String,
    },
    #[error(
        "question '{question_id}': carry-forward source '{source_id}' must come before the question that uses it"
    )]
    CarrySourceAfterUse {
        question_id: String,
        source_id: String,
    },
}

/// Static checks over a full question list, run at authoring time.
///
/// Findings are reported, never thrown; the respondent-time resolvers
/// tolerate every condition checked here by degrading. Branch jump targets
/// may legally point in either direction, so ordering is only enforced for
/// carry-forward sources. Skip-logic source references are not checked.
pub fn lint(spec: &SurveySpec) -> Vec<ConfigIssue> {
    let ids: BTreeSet<&str> = spec
        .questions
        .iter()
        .map(|question| question.id.as_str())
        .collect();

    let mut issues = Vec::new();

    for (position, question) in spec.questions.iter().enumerate() {
        if let Some(branch) = &question.branch_logic {
            for rule in &branch.rules {
                for condition in &rule.conditions {
                    if !ids.contains(condition.question_id.as_str()) {
                        issues.push(ConfigIssue::UnknownBranchConditionSource {
                            question_id: question.id.clone(),
                            source_id: condition.question_id.clone(),
                        });
                    }
                }
                if let BranchAction::Jump { target } = &rule.action
                    && !ids.contains(target.as_str())
                {
                    issues.push(ConfigIssue::UnknownJumpTarget {
                        question_id: question.id.clone(),
                        target_id: target.clone(),
                    });
                }
            }
        }

        if let Some(source_config) = &question.option_source {
            let source_id = source_config.source_question_id.as_str();
            let Some(source_position) = spec.position_of(source_id) else {
                // A missing source makes the remaining carry checks moot.
                issues.push(ConfigIssue::UnknownCarrySource {
                    question_id: question.id.clone(),
                    source_id: source_id.to_string(),
                });
                continue;
            };
            if spec.questions[source_position].static_options().is_empty() {
                issues.push(ConfigIssue::CarrySourceWithoutOptions {
                    question_id: question.id.clone(),
                    source_id: source_id.to_string(),
                });
            }
            if source_position >= position {
                issues.push(ConfigIssue::CarrySourceAfterUse {
                    question_id: question.id.clone(),
                    source_id: source_id.to_string(),
                });
            }
        }
    }

    issues
}
