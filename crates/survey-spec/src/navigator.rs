use std::collections::BTreeMap;

use crate::answers::AnswerMap;
use crate::branch::{BranchOutcome, resolve_branch};
use crate::spec::question::QuestionSpec;
use crate::spec::survey::SurveySpec;
use crate::validate::can_proceed;
use crate::visibility::should_show;

/// The respondent's position in the survey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    Welcome,
    /// Only present when the survey is non-anonymous.
    RespondentInfo,
    /// Index into the question sequence.
    Question(usize),
    /// The visible sequence was exhausted; ready to finalize.
    Submitted,
    /// A branch rule ended the survey early; also ready to finalize.
    Ended,
}

impl Position {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Position::Submitted | Position::Ended)
    }
}

/// Drives the respondent's traversal through the question sequence.
///
/// The navigator is a pure function of (spec, position, answers): it caches
/// nothing across steps except the id→index map built once from the
/// immutable spec, so editing an earlier answer is picked up by the next
/// forward evaluation. Jump targets resolve through that map instead of a
/// per-step search.
pub struct Navigator<'a> {
    spec: &'a SurveySpec,
    index: BTreeMap<&'a str, usize>,
    position: Position,
    forward_steps: usize,
    step_cap: usize,
}

impl<'a> Navigator<'a> {
    pub fn new(spec: &'a SurveySpec) -> Self {
        let index = spec
            .questions
            .iter()
            .enumerate()
            .map(|(position, question)| (question.id.as_str(), position))
            .collect();
        Self {
            spec,
            index,
            position: Position::Welcome,
            forward_steps: 0,
            // Branch jumps are not cycle-checked statically; bounding the
            // forward step count keeps a jump loop from running forever.
            step_cap: spec.questions.len().saturating_mul(4).saturating_add(8),
        }
    }

    /// Replays forward from the start past answered and display-only
    /// questions, landing on the first position that still needs input.
    pub fn resume(spec: &'a SurveySpec, answers: &AnswerMap) -> Self {
        let mut navigator = Self::new(spec);
        loop {
            match navigator.position {
                Position::Welcome | Position::RespondentInfo => {
                    navigator.advance(answers);
                }
                Position::Question(index) => {
                    let question = &spec.questions[index];
                    let answered = answers
                        .get(&question.id)
                        .is_some_and(|value| !value.is_empty());
                    if !question.kind.is_display() && !answered {
                        break;
                    }
                    if !navigator.can_proceed(answers) {
                        break;
                    }
                    let before = navigator.position.clone();
                    navigator.advance(answers);
                    if navigator.position == before {
                        break;
                    }
                }
                _ => break,
            }
        }
        navigator
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn current_question(&self) -> Option<&'a QuestionSpec> {
        match self.position {
            Position::Question(index) => self.spec.questions.get(index),
            _ => None,
        }
    }

    /// Whether a forward transition is currently permitted.
    pub fn can_proceed(&self, answers: &AnswerMap) -> bool {
        match &self.position {
            Position::Question(index) => {
                let question = &self.spec.questions[*index];
                can_proceed(question, answers.get(&question.id))
            }
            Position::Welcome | Position::RespondentInfo => true,
            Position::Submitted | Position::Ended => false,
        }
    }

    /// Moves forward. Blocked (a no-op) while `can_proceed` is false;
    /// terminal positions never move.
    pub fn advance(&mut self, answers: &AnswerMap) -> &Position {
        if self.position.is_terminal() || !self.can_proceed(answers) {
            return &self.position;
        }

        self.position = match &self.position {
            Position::Welcome => {
                if self.spec.collects_respondent_info() {
                    Position::RespondentInfo
                } else {
                    self.first_question_or_submit(0, answers)
                }
            }
            Position::RespondentInfo => self.first_question_or_submit(0, answers),
            Position::Question(index) => {
                let index = *index;
                self.forward_steps += 1;
                if self.forward_steps > self.step_cap {
                    Position::Ended
                } else {
                    match resolve_branch(&self.spec.questions[index], answers) {
                        BranchOutcome::End => Position::Ended,
                        BranchOutcome::Jump(target) => {
                            match self.index.get(target.as_str()).copied() {
                                // A hidden target does not cancel the jump:
                                // scan forward from the target for the next
                                // visible question.
                                Some(target_index) => {
                                    self.first_question_or_submit(target_index, answers)
                                }
                                // Dangling target: fall through to the
                                // default forward scan.
                                None => self.first_question_or_submit(index + 1, answers),
                            }
                        }
                        BranchOutcome::Next => self.first_question_or_submit(index + 1, answers),
                    }
                }
            }
            terminal => terminal.clone(),
        };
        &self.position
    }

    /// Moves backward. Only skip logic is consulted going backward; branch
    /// logic governs forward flow exclusively. Never blocked by validation.
    pub fn back(&mut self, answers: &AnswerMap) -> &Position {
        self.position = match &self.position {
            Position::Question(index) => match self.last_visible_before(*index, answers) {
                Some(previous) => Position::Question(previous),
                None => {
                    if self.spec.collects_respondent_info() {
                        Position::RespondentInfo
                    } else {
                        Position::Welcome
                    }
                }
            },
            Position::RespondentInfo => Position::Welcome,
            other => other.clone(),
        };
        &self.position
    }

    fn first_question_or_submit(&self, start: usize, answers: &AnswerMap) -> Position {
        self.spec
            .questions
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, question)| should_show(question, answers))
            .map(|(index, _)| Position::Question(index))
            .unwrap_or(Position::Submitted)
    }

    fn last_visible_before(&self, end: usize, answers: &AnswerMap) -> Option<usize> {
        self.spec.questions[..end]
            .iter()
            .enumerate()
            .rev()
            .find(|(_, question)| should_show(question, answers))
            .map(|(index, _)| index)
    }
}
