//! The `paperly edit` command.
//!
//! Reads a JSON array of edits, e.g.
//!
//! ```json
//! [
//!   { "op": "set_text", "index": 0, "text": "What is 6 x 7?" },
//!   { "op": "set_marks", "index": 0, "marks": 2 },
//!   { "op": "move_down", "index": 0 }
//! ]
//! ```
//!
//! and applies them to a copy of a stored paper. The stored paper is never
//! changed; `--save` stores the result as a new paper.

use std::path::PathBuf;

use anyhow::{Context, Result};

use paperly_core::draft::prepare_save;
use paperly_core::edit::Edit;
use paperly_core::model::{validate_questions, PaperId};

use super::{ensure_teacher, open_configured, questions_table};

pub async fn execute(
    id: PaperId,
    edits_path: PathBuf,
    output: Option<PathBuf>,
    save: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (config, store) = open_configured(config_path)?;

    let content = std::fs::read_to_string(&edits_path)
        .with_context(|| format!("failed to read edits: {}", edits_path.display()))?;
    let edits: Vec<Edit> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse edits: {}", edits_path.display()))?;

    let source = store.get(id).await?;
    let revised = source
        .revise(edits.iter().cloned())
        .with_context(|| format!("failed to edit paper {id}"))?;
    tracing::debug!(%id, edits = edits.len(), "paper revised");

    println!(
        "Applied {} edit(s) to paper {id}: {} questions, {} total marks",
        edits.len(),
        revised.questions().len(),
        revised.total_marks()
    );
    println!("{}", questions_table(revised.questions()));

    for w in validate_questions(revised.questions()) {
        let prefix = w.question.map(|i| format!("[Q{}] ", i + 1)).unwrap_or_default();
        eprintln!("Warning: {prefix}{}", w.message);
    }

    if let Some(path) = &output {
        std::fs::write(path, serde_json::to_string_pretty(&revised)?)
            .with_context(|| format!("failed to write paper to {}", path.display()))?;
        println!("Candidate written to: {}", path.display());
    }

    if save {
        let identity = config.identity.identity();
        ensure_teacher(&identity)?;
        let meta = revised.metadata();
        let (metadata, summary) = prepare_save(
            &meta.title,
            &meta.subject,
            &meta.grade,
            identity.creator,
            revised.questions(),
        )?;
        let paper = store
            .create(metadata, summary, revised.into_questions())
            .await?;
        println!(
            "Saved paper {}",
            paper.id().map(|id| id.to_string()).unwrap_or_default()
        );
    }

    Ok(())
}
