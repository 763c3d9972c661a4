//! The `paperly generate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use paperly_core::draft::prepare_save;
use paperly_core::generate;
use paperly_core::model::{Paper, PaperMetadata, ParamsSummary};

use super::{ensure_teacher, open_configured, questions_table, ParamsArgs};

pub async fn execute(
    params_args: ParamsArgs,
    output: Option<PathBuf>,
    save: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (config, store) = open_configured(config_path)?;
    let params = params_args.resolve(&config)?;
    let counts = params.resolve_counts();
    let questions = generate(&params);

    println!(
        "Generated {} questions ({} easy, {} medium, {} hard) for '{}'",
        questions.len(),
        counts.easy,
        counts.medium,
        counts.hard,
        params.title
    );
    println!("{}", questions_table(&questions));

    let identity = config.identity.identity();

    if let Some(path) = &output {
        let candidate = Paper::candidate(
            PaperMetadata {
                title: params.title.clone(),
                subject: params.subject.clone(),
                grade: params.grade.clone(),
                creator: identity.creator.clone(),
            },
            questions.clone(),
        );
        let json = serde_json::to_string_pretty(&candidate)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write paper to {}", path.display()))?;
        println!("Candidate written to: {}", path.display());
    }

    if save {
        ensure_teacher(&identity)?;
        let (metadata, _) = prepare_save(
            &params.title,
            &params.subject,
            &params.grade,
            identity.creator,
            &questions,
        )?;
        let summary = ParamsSummary {
            title: metadata.title.clone(),
            subject: metadata.subject.clone(),
            grade: metadata.grade.clone(),
            ..ParamsSummary::from(&params)
        };
        let paper = store.create(metadata, summary, questions).await?;
        println!(
            "Saved paper {} ({} total marks)",
            paper.id().map(|id| id.to_string()).unwrap_or_default(),
            paper.total_marks()
        );
    }

    Ok(())
}
