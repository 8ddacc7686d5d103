use std::collections::BTreeMap;
use std::fmt::Write;

use survey_spec::{AnswerSet, AnswerValue, QuestionType, RenderProgress};

/// Controls which bits of state the wizard prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: question prompts only.
    Clean,
    /// Verbose output: progress, option lists, parse expectations.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// Prints prompts once the navigator yields a position.
pub struct WizardPresenter {
    verbosity: Verbosity,
    header_printed: bool,
    show_answers_json: bool,
}

impl WizardPresenter {
    pub fn new(verbosity: Verbosity, show_answers_json: bool) -> Self {
        Self {
            verbosity,
            header_printed: false,
            show_answers_json,
        }
    }

    pub fn show_header(&mut self, title: &str, intro: Option<&str>) {
        if self.header_printed {
            return;
        }
        println!("Survey: {}", title);
        if let Some(intro) = intro {
            println!("{}", intro);
        }
        self.header_printed = true;
    }

    pub fn show_respondent_info(&self) {
        println!("(Respondent details are collected by the hosting system; press Enter.)");
    }

    pub fn show_display(&self, title: &str, description: Option<&str>) {
        println!("{}", title);
        if let Some(description) = description {
            println!("{}", description);
        }
    }

    pub fn show_prompt(&self, prompt: &PromptContext) {
        let mut line = if prompt.total > 0 {
            format!("{}/{} {}", prompt.index, prompt.total, prompt.title)
        } else {
            format!("{} {}", prompt.index, prompt.title)
        };
        if prompt.required {
            line.push_str(" *");
        }
        if let Some(hint) = &prompt.hint {
            line.push(' ');
            line.push_str(hint);
        }
        println!("{}", line);
        if let Some(description) = &prompt.description {
            println!("{}", description);
        }
        if !prompt.options.is_empty() {
            for (index, option) in prompt.options.iter().enumerate() {
                println!("  {}. {}", index + 1, option);
            }
        }
    }

    pub fn show_parse_error(&self, error: &AnswerParseError) {
        eprintln!("Invalid answer: {}", error.user_message);
        if self.verbosity.is_verbose()
            && let Some(expected) = &error.expected
        {
            eprintln!("  Expected: {}", expected);
        }
    }

    pub fn show_required(&self) {
        eprintln!("This question is required.");
    }

    pub fn show_completion(&self, answer_set: &AnswerSet, ended_early: bool) {
        if ended_early {
            println!("Survey ended.");
        } else {
            println!("Done ✅");
        }
        match answer_set.to_cbor() {
            Ok(bytes) => println!("Answers (CBOR hex): {}", encode_hex(&bytes)),
            Err(err) => eprintln!("Failed to serialize answers to CBOR: {}", err),
        }
        if self.show_answers_json {
            match answer_set.to_json_pretty() {
                Ok(pretty) => println!("{}", pretty),
                Err(err) => eprintln!("Failed to serialize answers to JSON: {}", err),
            }
        }
    }
}

/// Context used to format a single prompt.
pub struct PromptContext {
    pub index: usize,
    pub total: usize,
    pub title: String,
    pub description: Option<String>,
    pub required: bool,
    pub hint: Option<String>,
    pub options: Vec<String>,
}

impl PromptContext {
    pub fn new(
        title: String,
        description: Option<String>,
        required: bool,
        kind: QuestionType,
        options: Vec<String>,
        progress: &RenderProgress,
    ) -> Self {
        Self {
            index: (progress.answered + 1).max(1),
            total: progress.total,
            title,
            description,
            required,
            hint: kind_hint(kind, &options),
            options,
        }
    }
}

fn kind_hint(kind: QuestionType, options: &[String]) -> Option<String> {
    match kind {
        QuestionType::YesNo | QuestionType::Legal => Some("(yes/no, y/n, true/false)".to_string()),
        QuestionType::Number
        | QuestionType::Rating
        | QuestionType::OpinionScale
        | QuestionType::Nps
        | QuestionType::Slider => Some("(number)".to_string()),
        QuestionType::Checkboxes => Some("(comma-separated options)".to_string()),
        QuestionType::Ranking => Some("(comma-separated, best first)".to_string()),
        QuestionType::Matrix | QuestionType::ConstantSum => {
            Some("(label=number, comma-separated)".to_string())
        }
        QuestionType::Address => Some("(street; city; state; zip; country)".to_string()),
        QuestionType::MultipleChoice | QuestionType::Dropdown | QuestionType::PictureChoice
            if !options.is_empty() =>
        {
            Some("(pick one by number or label)".to_string())
        }
        _ => None,
    }
}

/// Error produced when parsing answers typed by the respondent.
#[derive(Debug)]
pub struct AnswerParseError {
    pub user_message: String,
    pub expected: Option<String>,
}

impl AnswerParseError {
    fn new(user_message: impl Into<String>, expected: Option<String>) -> Self {
        Self {
            user_message: user_message.into(),
            expected,
        }
    }
}

/// Parses one line of input into an answer value for the question kind.
///
/// An empty line yields `None` (no answer recorded); required questions are
/// gated by the navigator, not here.
pub fn parse_answer(
    kind: QuestionType,
    input: &str,
    options: &[String],
) -> Result<Option<AnswerValue>, AnswerParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let value = match kind {
        QuestionType::YesNo | QuestionType::Legal => AnswerValue::Bool(parse_bool(input)?),
        QuestionType::Number
        | QuestionType::Rating
        | QuestionType::OpinionScale
        | QuestionType::Nps
        | QuestionType::Slider => AnswerValue::Number(input.parse().map_err(|_| {
            AnswerParseError::new(
                format!("'{input}' is not a number"),
                Some("a numeric value, e.g. 7".into()),
            )
        })?),
        QuestionType::MultipleChoice | QuestionType::Dropdown | QuestionType::PictureChoice => {
            AnswerValue::Text(pick_option(input, options)?)
        }
        QuestionType::Checkboxes | QuestionType::Ranking => AnswerValue::List(
            input
                .split(',')
                .map(|item| pick_option(item.trim(), options))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        QuestionType::Matrix | QuestionType::ConstantSum => {
            AnswerValue::NumberMap(parse_number_map(input)?)
        }
        QuestionType::Address => {
            let mut fields = BTreeMap::new();
            let names = ["street", "city", "state", "zip", "country"];
            for (name, part) in names.iter().zip(input.split(';')) {
                let part = part.trim();
                if !part.is_empty() {
                    fields.insert((*name).to_string(), part.to_string());
                }
            }
            AnswerValue::TextMap(fields)
        }
        _ => AnswerValue::Text(input.to_string()),
    };

    Ok(Some(value))
}

fn parse_bool(input: &str) -> Result<bool, AnswerParseError> {
    match input.to_lowercase().as_str() {
        "yes" | "y" | "true" => Ok(true),
        "no" | "n" | "false" => Ok(false),
        other => Err(AnswerParseError::new(
            format!("'{other}' is not a yes/no answer"),
            Some("yes, no, y, n, true or false".into()),
        )),
    }
}

fn pick_option(input: &str, options: &[String]) -> Result<String, AnswerParseError> {
    if options.is_empty() {
        return Ok(input.to_string());
    }
    if let Ok(number) = input.parse::<usize>()
        && (1..=options.len()).contains(&number)
    {
        return Ok(options[number - 1].clone());
    }
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(input))
        .cloned()
        .ok_or_else(|| {
            AnswerParseError::new(
                format!("'{input}' is not one of the offered options"),
                Some(options.join(", ")),
            )
        })
}

fn parse_number_map(input: &str) -> Result<BTreeMap<String, f64>, AnswerParseError> {
    let mut map = BTreeMap::new();
    for pair in input.split(',') {
        let Some((label, number)) = pair.split_once('=') else {
            return Err(AnswerParseError::new(
                format!("'{}' is not a label=number pair", pair.trim()),
                Some("e.g. Price=40, Quality=60".into()),
            ));
        };
        let value = number.trim().parse().map_err(|_| {
            AnswerParseError::new(
                format!("'{}' is not a number", number.trim()),
                Some("e.g. Price=40".into()),
            )
        })?;
        map.insert(label.trim().to_string(), value);
    }
    Ok(map)
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        write!(&mut encoded, "{:02x}", byte).expect("writing to string cannot fail");
    }
    encoded
}
