#![allow(missing_docs)]

pub mod answers;
pub mod branch;
pub mod condition;
pub mod examples;
pub mod lint;
pub mod navigator;
pub mod options;
pub mod piping;
pub mod render;
pub mod schema;
pub mod spec;
pub mod validate;
pub mod visibility;

pub use answers::{AnswerMap, AnswerSet, AnswerValue, Meta, ValidationError, ValidationResult};
pub use branch::{BranchOutcome, resolve_branch};
pub use condition::{combine, evaluate, evaluate_all};
pub use examples::generate as example_answers;
pub use lint::{ConfigIssue, lint};
pub use navigator::{Navigator, Position};
pub use options::resolve_options;
pub use piping::{display_answer, pipe};
pub use render::{
    RenderPayload, RenderProgress, RenderQuestion, RenderStatus, build_render_payload,
    render_json_ui, render_text,
};
pub use schema::generate as answers_schema;
pub use spec::{
    BranchAction, BranchLogic, BranchRule, CarryMode, Combinator, ConditionOperator, DefaultAction,
    OptionSource, QuestionSpec, QuestionType, SkipCondition, SkipLogic, SurveyPresentation,
    SurveySpec, TypeSettings,
};
pub use validate::{can_proceed, is_complete, validate};
pub use visibility::{VisibilityMap, resolve_visibility, should_show};
