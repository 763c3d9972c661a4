//! Subcommand implementations and the helpers they share.

pub mod edit;
pub mod generate;
pub mod init;
pub mod merge;
pub mod papers;
pub mod practice;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Table};

use paperly_core::model::{Distribution, Identity, Paper, PaperParams, Question, Role};
use paperly_core::parser;
use paperly_core::traits::PaperStore;
use paperly_store::{load_config_from, open_store, PaperlyConfig};

/// Generation parameters, from flags or a params file.
#[derive(Args, Debug, Clone)]
pub struct ParamsArgs {
    /// TOML params file (overrides the other paper flags)
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Paper title
    #[arg(long, default_value = "")]
    pub title: String,

    /// Subject
    #[arg(long, default_value = "")]
    pub subject: String,

    /// Grade
    #[arg(long, default_value = "")]
    pub grade: String,

    /// Number of questions (default: from config)
    #[arg(long)]
    pub questions: Option<u32>,

    /// Marks per question (default: from config)
    #[arg(long)]
    pub marks: Option<u32>,

    /// Percentage of easy questions
    #[arg(long, default_value = "40")]
    pub easy: u32,

    /// Percentage of medium questions
    #[arg(long, default_value = "40")]
    pub medium: u32,

    /// Percentage of hard questions
    #[arg(long, default_value = "20")]
    pub hard: u32,
}

impl ParamsArgs {
    /// Build the request, printing advisory warnings to stderr.
    ///
    /// Zero questions or zero marks are rejected here, before generation.
    pub fn resolve(&self, config: &PaperlyConfig) -> Result<PaperParams> {
        let params = match &self.params {
            Some(path) => parser::parse_params(path)?,
            None => PaperParams {
                title: self.title.clone(),
                subject: self.subject.clone(),
                grade: self.grade.clone(),
                question_count: self.questions.unwrap_or(config.default_question_count),
                marks_per_question: self.marks.unwrap_or(config.default_marks_per_question),
                distribution: Distribution::new(self.easy, self.medium, self.hard),
            },
        };

        anyhow::ensure!(
            params.question_count >= 1,
            "question count must be at least 1"
        );
        anyhow::ensure!(
            params.marks_per_question >= 1,
            "marks per question must be at least 1"
        );

        for w in parser::validate_params(&params) {
            eprintln!("Warning: {}", w.message);
        }
        Ok(params)
    }
}

/// Load the config and open its store.
pub fn open_configured(config_path: Option<PathBuf>) -> Result<(PaperlyConfig, Box<dyn PaperStore>)> {
    let config = load_config_from(config_path.as_deref())?;
    let store = open_store(&config.store);
    tracing::debug!(backend = store.name(), "store opened");
    Ok((config, store))
}

/// Saving is reserved for teachers.
pub fn ensure_teacher(identity: &Identity) -> Result<()> {
    anyhow::ensure!(
        identity.role == Role::Teacher,
        "only teachers can save papers (current role: {})",
        identity.role
    );
    Ok(())
}

/// Table of questions with their answers.
pub fn questions_table(questions: &[Question]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Difficulty", "Marks", "Question", "Answer"]);
    for (i, q) in questions.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(q.difficulty),
            Cell::new(q.marks),
            Cell::new(&q.text),
            Cell::new(q.correct_option().unwrap_or("?")),
        ]);
    }
    table
}

/// Table of papers, one row each.
pub fn papers_table(papers: &[Paper]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "ID",
        "Title",
        "Subject",
        "Grade",
        "Questions",
        "Total Marks",
        "Created",
    ]);
    for p in papers {
        let meta = p.metadata();
        table.add_row(vec![
            Cell::new(p.id().map(|id| id.to_string()).unwrap_or_default()),
            Cell::new(&meta.title),
            Cell::new(&meta.subject),
            Cell::new(&meta.grade),
            Cell::new(p.questions().len()),
            Cell::new(p.total_marks()),
            Cell::new(
                p.created_at()
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default(),
            ),
        ]);
    }
    table
}
