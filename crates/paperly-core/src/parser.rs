//! TOML params-file parser.
//!
//! Loads generation requests from files like:
//!
//! ```toml
//! [paper]
//! title = "Mid-Term Examination"
//! subject = "Mathematics"
//! grade = "Grade 10"
//! questions = 10
//! marks_per_question = 5
//!
//! [distribution]
//! easy = 40
//! medium = 40
//! hard = 20
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Distribution, PaperParams};

#[derive(Debug, Deserialize)]
struct TomlParamsFile {
    paper: TomlPaper,
    #[serde(default)]
    distribution: Option<Distribution>,
}

#[derive(Debug, Deserialize)]
struct TomlPaper {
    title: String,
    subject: String,
    grade: String,
    #[serde(default = "default_questions")]
    questions: u32,
    #[serde(default = "default_marks")]
    marks_per_question: u32,
}

fn default_questions() -> u32 {
    10
}

fn default_marks() -> u32 {
    5
}

/// The distribution a new request starts with.
pub fn default_distribution() -> Distribution {
    Distribution::new(40, 40, 20)
}

/// Parse a params file.
pub fn parse_params(path: &Path) -> Result<PaperParams> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read params file: {}", path.display()))?;

    parse_params_str(&content, path)
}

/// Parse params from a TOML string (useful for testing).
pub fn parse_params_str(content: &str, source_path: &Path) -> Result<PaperParams> {
    let parsed: TomlParamsFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    Ok(PaperParams {
        title: parsed.paper.title,
        subject: parsed.paper.subject,
        grade: parsed.paper.grade,
        question_count: parsed.paper.questions,
        marks_per_question: parsed.paper.marks_per_question,
        distribution: parsed.distribution.unwrap_or_else(default_distribution),
    })
}

/// A warning from params validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamsWarning {
    pub field: &'static str,
    pub message: String,
}

/// Check a request for the problems a form would normally catch.
///
/// Generation still runs on a request with warnings; these are advisory.
pub fn validate_params(params: &PaperParams) -> Vec<ParamsWarning> {
    let mut warnings = Vec::new();

    for (field, value) in [
        ("title", &params.title),
        ("subject", &params.subject),
        ("grade", &params.grade),
    ] {
        if value.trim().is_empty() {
            warnings.push(ParamsWarning {
                field,
                message: format!("{field} is empty"),
            });
        }
    }

    if params.question_count == 0 {
        warnings.push(ParamsWarning {
            field: "questions",
            message: "question count must be at least 1".into(),
        });
    }

    if params.marks_per_question == 0 {
        warnings.push(ParamsWarning {
            field: "marks_per_question",
            message: "marks per question must be at least 1".into(),
        });
    }

    let total = params.distribution.total();
    if total != 0 && total != 100 {
        warnings.push(ParamsWarning {
            field: "distribution",
            message: format!("distribution totals {total}% (should equal 100%)"),
        });
    }

    warnings
}
