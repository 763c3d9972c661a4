//! The `paperly validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use paperly_core::model::{validate_questions, Paper};

pub fn execute(path: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read paper: {}", path.display()))?;
    let paper: Paper = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse paper: {}", path.display()))?;

    println!(
        "Paper: {} ({} questions, {} total marks)",
        paper.metadata().title,
        paper.questions().len(),
        paper.total_marks()
    );

    let warnings = validate_questions(paper.questions());
    for w in &warnings {
        let prefix = w
            .question
            .map(|i| format!("  [Q{}]", i + 1))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Paper valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
