mod wizard;

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use survey_spec::{
    AnswerMap, AnswerSet, Navigator, Position, answers_schema, build_render_payload,
    example_answers, lint, pipe, render_json_ui, render_text, resolve_options,
    resolve_visibility, validate, SurveySpec,
};
use wizard::{parse_answer, PromptContext, Verbosity, WizardPresenter};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Text-based survey wizard CLI",
    long_about = "Walks respondents through a survey spec and provides authoring checks (lint, schema, render) backed by the survey flow engine."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderMode {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Walk through a survey flow in a text shell.
    Wizard {
        /// Path to the SurveySpec JSON describing the survey.
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        /// Optional JSON file containing initial answers.
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        /// Show verbose output (progress, parse expectations).
        #[arg(long, alias = "debug")]
        verbose: bool,
        /// Also emit answer JSON on completion.
        #[arg(long)]
        answers_json: bool,
    },
    /// Check a survey configuration for dangling references and ordering.
    Lint {
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
    },
    /// Render the survey state for a set of answers.
    Render {
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
    /// Validate answers against a survey and report problems.
    Check {
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
    },
    /// Print the answers JSON schema for the currently visible questions.
    Schema {
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
    },
    /// Generate example answers for a survey.
    Example {
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    match Cli::parse().command {
        Command::Wizard {
            spec,
            answers,
            verbose,
            answers_json,
        } => {
            let spec = load_spec(&spec)?;
            let answers = load_answers(answers.as_deref())?;
            run_wizard(&spec, answers, verbose, answers_json)
        }
        Command::Lint { spec } => run_lint(&load_spec(&spec)?),
        Command::Render {
            spec,
            answers,
            format,
        } => {
            let spec = load_spec(&spec)?;
            let answers = load_answers(answers.as_deref())?;
            let navigator = Navigator::resume(&spec, &answers);
            let payload = build_render_payload(&spec, navigator.position(), &answers);
            match format {
                RenderMode::Text => println!("{}", render_text(&payload)),
                RenderMode::Json => println!("{}", serde_json::to_string_pretty(&render_json_ui(&payload))?),
            }
            Ok(())
        }
        Command::Check { spec, answers } => {
            let spec = load_spec(&spec)?;
            let answers = load_answers(Some(&answers))?;
            let result = validate(&spec, &answers);
            if result.valid {
                println!("Answers are valid.");
                return Ok(());
            }
            for error in &result.errors {
                println!(
                    "{}: {}",
                    error.question_id.as_deref().unwrap_or("?"),
                    error.message
                );
            }
            for missing in &result.missing_required {
                println!("missing required: {}", missing);
            }
            for unknown in &result.unknown_fields {
                println!("unknown field: {}", unknown);
            }
            Err("answers failed validation".into())
        }
        Command::Schema { spec, answers } => {
            let spec = load_spec(&spec)?;
            let answers = load_answers(answers.as_deref())?;
            let visibility = resolve_visibility(&spec, &answers);
            let schema = answers_schema(&spec, &visibility, &answers);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
        Command::Example { spec } => {
            let spec = load_spec(&spec)?;
            let visibility = resolve_visibility(&spec, &AnswerMap::new());
            let examples = example_answers(&spec, &visibility);
            println!("{}", serde_json::to_string_pretty(&examples)?);
            Ok(())
        }
    }
}

fn load_spec(path: &Path) -> CliResult<SurveySpec> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("cannot read spec {}: {err}", path.display()))?;
    let spec = serde_json::from_str(&raw)
        .map_err(|err| format!("cannot parse spec {}: {err}", path.display()))?;
    Ok(spec)
}

fn load_answers(path: Option<&Path>) -> CliResult<AnswerMap> {
    let Some(path) = path else {
        return Ok(AnswerMap::new());
    };
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("cannot read answers {}: {err}", path.display()))?;
    let answers = serde_json::from_str(&raw)
        .map_err(|err| format!("cannot parse answers {}: {err}", path.display()))?;
    Ok(answers)
}

fn run_lint(spec: &SurveySpec) -> CliResult<()> {
    let issues = lint(spec);
    if issues.is_empty() {
        println!("No configuration issues found.");
        return Ok(());
    }
    for issue in &issues {
        println!("{issue}");
    }
    Err(format!("{} configuration issue(s) found", issues.len()).into())
}

fn run_wizard(
    spec: &SurveySpec,
    mut answers: AnswerMap,
    verbose: bool,
    answers_json: bool,
) -> CliResult<()> {
    let mut presenter = WizardPresenter::new(Verbosity::from_verbose(verbose), answers_json);
    let mut navigator = if answers.is_empty() {
        Navigator::new(spec)
    } else {
        Navigator::resume(spec, &answers)
    };
    presenter.show_header(
        &spec.title,
        spec.presentation
            .as_ref()
            .and_then(|presentation| presentation.intro.as_deref()),
    );

    loop {
        match navigator.position().clone() {
            Position::Welcome => {
                navigator.advance(&answers);
            }
            Position::RespondentInfo => {
                presenter.show_respondent_info();
                if read_line()?.is_none() {
                    return Err("input ended before the survey finished".into());
                }
                navigator.advance(&answers);
            }
            Position::Question(_) => {
                let Some(question) = navigator.current_question() else {
                    break;
                };
                let title = pipe(&question.title, &spec.questions, &answers);
                let description = question
                    .description
                    .as_ref()
                    .map(|text| pipe(text, &spec.questions, &answers));

                if question.kind.is_display() {
                    presenter.show_display(&title, description.as_deref());
                    navigator.advance(&answers);
                    continue;
                }

                let options = resolve_options(question, &spec.questions, &answers);
                let payload = build_render_payload(spec, navigator.position(), &answers);
                presenter.show_prompt(&PromptContext::new(
                    title,
                    description,
                    question.required,
                    question.kind,
                    options.clone(),
                    &payload.progress,
                ));

                let Some(input) = read_line()? else {
                    return Err("input ended before the survey finished".into());
                };
                let trimmed = input.trim();
                if trimmed == ":back" {
                    navigator.back(&answers);
                    continue;
                }
                match parse_answer(question.kind, trimmed, &options) {
                    Ok(Some(value)) => {
                        answers.insert(question.id.clone(), value);
                    }
                    Ok(None) => {}
                    Err(error) => {
                        presenter.show_parse_error(&error);
                        continue;
                    }
                }
                if navigator.can_proceed(&answers) {
                    navigator.advance(&answers);
                } else {
                    presenter.show_required();
                }
            }
            position @ (Position::Submitted | Position::Ended) => {
                let ended_early = position == Position::Ended;
                let mut answer_set = AnswerSet::new(spec.id.clone(), spec.version.clone());
                answer_set.answers = answers;
                presenter.show_completion(&answer_set, ended_early);
                break;
            }
        }
    }

    io::stdout().flush()?;
    Ok(())
}

fn read_line() -> CliResult<Option<String>> {
    let mut line = String::new();
    let bytes = io::stdin().read_line(&mut line)?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
