use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::logic::{BranchLogic, OptionSource, SkipLogic};

/// Supported question kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    ShortText,
    LongText,
    Email,
    Phone,
    Website,
    Date,
    Time,
    Number,
    Address,
    FileUpload,
    MultipleChoice,
    Checkboxes,
    Dropdown,
    PictureChoice,
    YesNo,
    Rating,
    OpinionScale,
    Nps,
    Slider,
    Matrix,
    Ranking,
    ConstantSum,
    Legal,
    WelcomeScreen,
    EndScreen,
    Section,
    Statement,
}

impl QuestionType {
    /// Display-only kinds never collect an answer and never block navigation.
    pub fn is_display(&self) -> bool {
        matches!(
            self,
            QuestionType::WelcomeScreen
                | QuestionType::EndScreen
                | QuestionType::Section
                | QuestionType::Statement
        )
    }

    /// Kinds whose answer is constrained to the question's option list.
    pub fn uses_options(&self) -> bool {
        matches!(
            self,
            QuestionType::MultipleChoice
                | QuestionType::Checkboxes
                | QuestionType::Dropdown
                | QuestionType::PictureChoice
                | QuestionType::Ranking
                | QuestionType::ConstantSum
        )
    }
}

/// Kind-specific numeric and label settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct TypeSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_label: Option<String>,
    /// Target total for constant-sum distributions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    /// Row labels for matrix questions; columns come from `options`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<String>>,
}

/// Definition of a single question inside a survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Static option labels, unique within the question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Controls whether this question is shown at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_logic: Option<SkipLogic>,
    /// Controls where the flow goes after this question is answered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_logic: Option<BranchLogic>,
    /// Derives the option list from a prior question's answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_source: Option<OptionSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<TypeSettings>,
}

impl QuestionSpec {
    pub fn static_options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }

    pub fn matrix_rows(&self) -> &[String] {
        self.settings
            .as_ref()
            .and_then(|settings| settings.rows.as_deref())
            .unwrap_or_default()
    }
}
