use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a list of evaluated conditions is combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Combinator {
    #[default]
    All,
    Any,
}

/// Comparison operators available to skip and branch conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
    IsEmpty,
    IsNotEmpty,
}

/// Atomic condition against a prior answer.
///
/// `value` is compared as a string; the numeric operators parse it as a
/// number. The emptiness operators never consult it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SkipCondition {
    pub question_id: String,
    pub operator: ConditionOperator,
    #[serde(default)]
    pub value: String,
}

/// Per-question visibility configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct SkipLogic {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub conditions: Vec<SkipCondition>,
    #[serde(default)]
    pub combinator: Combinator,
}

/// What a satisfied branch rule does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BranchAction {
    Jump { target: String },
    End,
}

/// One branch rule; rules are evaluated in authored order, first match wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BranchRule {
    #[serde(default)]
    pub conditions: Vec<SkipCondition>,
    #[serde(default)]
    pub combinator: Combinator,
    pub action: BranchAction,
}

/// Fallback when no branch rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum DefaultAction {
    #[default]
    Next,
    End,
}

/// Per-question forward-flow configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct BranchLogic {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub rules: Vec<BranchRule>,
    #[serde(default)]
    pub default_action: DefaultAction,
}

/// Which of the source question's options a carry-forward exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum CarryMode {
    #[default]
    Selected,
    NotSelected,
    All,
}

/// Configuration for options derived from a prior question's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OptionSource {
    #[serde(default)]
    pub enabled: bool,
    pub source_question_id: String,
    #[serde(default)]
    pub mode: CarryMode,
}
