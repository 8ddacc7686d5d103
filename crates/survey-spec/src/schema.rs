use serde_json::{Map, Value};

use crate::answers::AnswerMap;
use crate::options::resolve_options;
use crate::spec::question::{QuestionSpec, QuestionType};
use crate::spec::survey::SurveySpec;
use crate::visibility::VisibilityMap;

/// Generates an answer JSON schema restricted to the visible, answerable
/// questions. Choice enums use the resolved (carry-forward-aware) options.
pub fn generate(spec: &SurveySpec, visibility: &VisibilityMap, answers: &AnswerMap) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for question in &spec.questions {
        if question.kind.is_display() {
            continue;
        }
        if !visibility.get(&question.id).copied().unwrap_or(true) {
            continue;
        }
        let options = resolve_options(question, &spec.questions, answers);
        properties.insert(question.id.clone(), question_schema(question, &options));
        if question.required {
            required.push(Value::String(question.id.clone()));
        }
    }

    let mut root = Map::new();
    root.insert("type".into(), Value::String("object".into()));
    root.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        root.insert("required".into(), Value::Array(required));
    }

    Value::Object(root)
}

fn question_schema(question: &QuestionSpec, options: &[String]) -> Value {
    let mut schema = Map::new();
    match question.kind {
        QuestionType::ShortText
        | QuestionType::LongText
        | QuestionType::Phone
        | QuestionType::FileUpload => {
            schema.insert("type".into(), Value::String("string".into()));
        }
        QuestionType::Email => {
            schema.insert("type".into(), Value::String("string".into()));
            schema.insert("format".into(), Value::String("email".into()));
        }
        QuestionType::Website => {
            schema.insert("type".into(), Value::String("string".into()));
            schema.insert("format".into(), Value::String("uri".into()));
        }
        QuestionType::Date => {
            schema.insert("type".into(), Value::String("string".into()));
            schema.insert("format".into(), Value::String("date".into()));
        }
        QuestionType::Time => {
            schema.insert("type".into(), Value::String("string".into()));
            schema.insert("format".into(), Value::String("time".into()));
        }
        QuestionType::Number
        | QuestionType::Rating
        | QuestionType::OpinionScale
        | QuestionType::Nps
        | QuestionType::Slider => {
            schema.insert("type".into(), Value::String("number".into()));
            if let Some(settings) = &question.settings {
                if let Some(min) = settings.min
                    && let Some(num) = number_from_f64(min)
                {
                    schema.insert("minimum".into(), num);
                }
                if let Some(max) = settings.max
                    && let Some(num) = number_from_f64(max)
                {
                    schema.insert("maximum".into(), num);
                }
            }
        }
        QuestionType::YesNo | QuestionType::Legal => {
            schema.insert("type".into(), Value::String("boolean".into()));
        }
        QuestionType::MultipleChoice | QuestionType::Dropdown | QuestionType::PictureChoice => {
            schema.insert("type".into(), Value::String("string".into()));
            if !options.is_empty() {
                schema.insert("enum".into(), string_array(options));
            }
        }
        QuestionType::Checkboxes | QuestionType::Ranking => {
            schema.insert("type".into(), Value::String("array".into()));
            let mut items = Map::new();
            items.insert("type".into(), Value::String("string".into()));
            if !options.is_empty() {
                items.insert("enum".into(), string_array(options));
            }
            schema.insert("items".into(), Value::Object(items));
        }
        QuestionType::Matrix => {
            schema.insert("type".into(), Value::String("object".into()));
            schema.insert(
                "additionalProperties".into(),
                Value::Object(number_schema()),
            );
            let rows = question.matrix_rows();
            if !rows.is_empty() {
                schema.insert("required".into(), string_array(rows));
            }
        }
        QuestionType::ConstantSum => {
            schema.insert("type".into(), Value::String("object".into()));
            schema.insert(
                "additionalProperties".into(),
                Value::Object(number_schema()),
            );
        }
        QuestionType::Address => {
            schema.insert("type".into(), Value::String("object".into()));
            let mut fields = Map::new();
            for field in ["street", "city", "state", "zip", "country"] {
                let mut field_schema = Map::new();
                field_schema.insert("type".into(), Value::String("string".into()));
                fields.insert(field.into(), Value::Object(field_schema));
            }
            schema.insert("properties".into(), Value::Object(fields));
        }
        QuestionType::WelcomeScreen
        | QuestionType::EndScreen
        | QuestionType::Section
        | QuestionType::Statement => {}
    }

    Value::Object(schema)
}

fn number_schema() -> Map<String, Value> {
    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("number".into()));
    schema
}

fn string_array(values: &[String]) -> Value {
    Value::Array(
        values
            .iter()
            .map(|value| Value::String(value.clone()))
            .collect(),
    )
}

fn number_from_f64(value: f64) -> Option<Value> {
    serde_json::Number::from_f64(value).map(Value::Number)
}
