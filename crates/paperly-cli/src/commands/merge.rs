//! The `paperly merge` command.

use std::path::PathBuf;

use anyhow::Result;

use paperly_core::merge::{merge, MetadataOverrides};
use paperly_core::model::{total_marks, PaperId};
use paperly_core::traits::merge_stored;

use super::{ensure_teacher, open_configured, papers_table};

pub async fn execute(
    ids: Vec<PaperId>,
    title: Option<String>,
    subject: Option<String>,
    grade: Option<String>,
    save: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (config, store) = open_configured(config_path)?;

    if save {
        let identity = config.identity.identity();
        ensure_teacher(&identity)?;
        let overrides = MetadataOverrides {
            title,
            subject,
            grade,
        };
        let paper = merge_stored(store.as_ref(), &ids, overrides, identity.creator).await?;
        println!("Saved merged paper:");
        println!("{}", papers_table(std::slice::from_ref(&paper)));
        return Ok(());
    }

    let mut sources = Vec::with_capacity(ids.len());
    for id in &ids {
        sources.push(store.get(*id).await?);
    }
    if sources.len() < 2 {
        eprintln!("Warning: merging a single paper just copies it");
    }

    println!("Sources:");
    println!("{}", papers_table(&sources));

    let merged = merge(&sources);
    println!("Suggested title:   {}", title.unwrap_or(merged.suggested_title));
    println!(
        "Suggested subject: {}",
        subject.unwrap_or(merged.suggested_subject)
    );
    println!("Suggested grade:   {}", grade.unwrap_or(merged.suggested_grade));
    println!(
        "Merged paper: {} questions, {} total marks",
        merged.questions.len(),
        total_marks(&merged.questions)
    );
    println!("\nRe-run with --save to store it.");

    Ok(())
}
