pub mod logic;
pub mod question;
pub mod survey;

pub use logic::{
    BranchAction, BranchLogic, BranchRule, CarryMode, Combinator, ConditionOperator, DefaultAction,
    OptionSource, SkipCondition, SkipLogic,
};
pub use question::{QuestionSpec, QuestionType, TypeSettings};
pub use survey::{SurveyPresentation, SurveySpec};
