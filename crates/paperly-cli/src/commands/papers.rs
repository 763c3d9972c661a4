//! The `paperly list`, `paperly search`, and `paperly show` commands.

use std::path::PathBuf;

use anyhow::Result;

use paperly_core::model::PaperId;

use super::{open_configured, papers_table, questions_table};

pub async fn list(mine: bool, config_path: Option<PathBuf>) -> Result<()> {
    let (config, store) = open_configured(config_path)?;

    let papers = if mine {
        store
            .list_by_creator(&config.identity.identity().creator)
            .await?
    } else {
        store.list_all().await?
    };

    if papers.is_empty() {
        println!("No papers yet. Run `paperly generate --save` to create one.");
    } else {
        println!("{}", papers_table(&papers));
    }
    Ok(())
}

pub async fn search(term: String, config_path: Option<PathBuf>) -> Result<()> {
    let (_, store) = open_configured(config_path)?;

    let papers = store.search_by_title(&term).await?;
    if papers.is_empty() {
        println!("No papers match '{term}'.");
    } else {
        println!("{}", papers_table(&papers));
    }
    Ok(())
}

pub async fn show(id: PaperId, json: bool, config_path: Option<PathBuf>) -> Result<()> {
    let (_, store) = open_configured(config_path)?;
    let paper = store.get(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&paper)?);
        return Ok(());
    }

    let meta = paper.metadata();
    println!("{} ({} / {})", meta.title, meta.subject, meta.grade);
    println!(
        "Created by {} | {} questions | {} total marks",
        meta.creator,
        paper.questions().len(),
        paper.total_marks()
    );
    println!("{}", questions_table(paper.questions()));
    Ok(())
}
