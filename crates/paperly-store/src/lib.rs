//! paperly-store — Paper store backends.
//!
//! Implements the `PaperStore` trait from `paperly-core` for an in-memory
//! map and for a directory of JSON files, and loads the configuration
//! that picks between them.

pub mod config;
pub mod json;
pub mod memory;

use serde::{Deserialize, Serialize};

use paperly_core::error::StoreError;
use paperly_core::model::{validate_questions, Paper, PaperMetadata, ParamsSummary, Question};

pub use config::{load_config, load_config_from, open_store, PaperlyConfig, StoreConfig};
pub use json::JsonStore;
pub use memory::MemoryStore;

/// What a backend keeps per paper: the paper plus how it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPaper {
    pub paper: Paper,
    pub params: ParamsSummary,
}

/// Reject papers the store should never hold.
pub(crate) fn check_new_paper(
    metadata: &PaperMetadata,
    questions: &[Question],
) -> Result<(), StoreError> {
    for (field, value) in [
        ("title", &metadata.title),
        ("subject", &metadata.subject),
        ("grade", &metadata.grade),
    ] {
        if value.trim().is_empty() {
            return Err(StoreError::Validation(format!("{field} is required")));
        }
    }
    if questions.is_empty() {
        return Err(StoreError::Validation(
            "a paper needs at least one question".into(),
        ));
    }
    if let Some(w) = validate_questions(questions).first() {
        let index = w.question.map(|i| i + 1).unwrap_or_default();
        return Err(StoreError::Validation(format!(
            "question {index}: {}",
            w.message
        )));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use paperly_core::generate;
    use paperly_core::model::{
        CreatorId, Distribution, PaperMetadata, PaperParams, ParamsSummary, Question,
    };

    pub fn metadata(title: &str, creator: &str) -> PaperMetadata {
        PaperMetadata {
            title: title.into(),
            subject: "Science".into(),
            grade: "Grade 6".into(),
            creator: CreatorId::new(creator),
        }
    }

    pub fn questions(count: u32) -> Vec<Question> {
        generate(&PaperParams {
            title: "t".into(),
            subject: "s".into(),
            grade: "g".into(),
            question_count: count,
            marks_per_question: 5,
            distribution: Distribution::new(40, 40, 20),
        })
    }

    pub fn params(metadata: &PaperMetadata, questions: &[Question]) -> ParamsSummary {
        ParamsSummary::from_questions(metadata, questions)
    }
}
