use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_cbor::{to_vec, value::to_value};

/// Answers collected so far, keyed by question id.
pub type AnswerMap = BTreeMap<String, AnswerValue>;

/// Answer payload; the shape depends on the question kind.
///
/// Scalars cover the simple inputs, `List` covers multi-select and ranking,
/// `NumberMap` covers matrix ratings and constant-sum distributions, and
/// `TextMap` covers address-style composites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
    NumberMap(BTreeMap<String, f64>),
    TextMap(BTreeMap<String, String>),
}

impl AnswerValue {
    /// Empty string, empty list, or empty map. Scalars are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Bool(_) | AnswerValue::Number(_) => false,
            AnswerValue::Text(text) => text.is_empty(),
            AnswerValue::List(items) => items.is_empty(),
            AnswerValue::NumberMap(map) => map.is_empty(),
            AnswerValue::TextMap(map) => map.is_empty(),
        }
    }

    /// String coercion used for `equals`/`contains` comparisons.
    ///
    /// Lists join their items with `,`; maps join their values in key order.
    pub fn to_compare_string(&self) -> String {
        match self {
            AnswerValue::Bool(flag) => flag.to_string(),
            AnswerValue::Number(num) => format_number(*num),
            AnswerValue::Text(text) => text.clone(),
            AnswerValue::List(items) => items.join(","),
            AnswerValue::NumberMap(map) => map
                .values()
                .map(|value| format_number(*value))
                .collect::<Vec<_>>()
                .join(","),
            AnswerValue::TextMap(map) => map.values().cloned().collect::<Vec<_>>().join(","),
        }
    }

    /// Numeric coercion used for `greater_than`/`less_than`.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(num) => Some(*num),
            AnswerValue::Text(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    /// Normalizes the value to a selection list for carry-forward filtering:
    /// a list as-is, a bare string as a singleton, anything else as empty.
    pub fn selections(&self) -> Vec<String> {
        match self {
            AnswerValue::List(items) => items.clone(),
            AnswerValue::Text(text) => vec![text.clone()],
            _ => Vec::new(),
        }
    }
}

/// Renders a number without a trailing `.0` when it is integral.
pub(crate) fn format_number(num: f64) -> String {
    if num.fract() == 0.0 && num.is_finite() && num.abs() < 1e15 {
        format!("{}", num as i64)
    } else {
        num.to_string()
    }
}

/// Optional metadata paired with an `AnswerSet`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// In-progress answers for a given survey spec version.
///
/// The engine holds no persistent state; this snapshot is what the calling
/// system stores or finalizes when the session ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnswerSet {
    pub survey_id: String,
    pub spec_version: String,
    pub answers: AnswerMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl AnswerSet {
    /// Creates a fresh empty answer set for a survey.
    pub fn new(survey_id: impl Into<String>, spec_version: impl Into<String>) -> Self {
        Self {
            survey_id: survey_id.into(),
            spec_version: spec_version.into(),
            answers: AnswerMap::new(),
            meta: None,
        }
    }

    /// Serializes the answer set as canonical CBOR bytes.
    pub fn to_cbor(&self) -> Result<Vec<u8>, serde_cbor::Error> {
        let canonical = to_value(self)?;
        to_vec(&canonical)
    }

    /// Serializes the answer set as indented JSON for debugging.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Validation error metadata reported by the answer validation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Result returned from `validate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_required: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown_fields: Vec<String>,
}
