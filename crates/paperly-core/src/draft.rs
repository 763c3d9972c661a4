//! Save-time checks for candidate papers.

use crate::error::DraftError;
use crate::model::{CreatorId, PaperMetadata, ParamsSummary, Question};

/// Validate a candidate and build the arguments for the store's `create`.
///
/// Title, subject, and grade are trimmed and must be non-empty, and there
/// must be at least one question.
pub fn prepare_save(
    title: &str,
    subject: &str,
    grade: &str,
    creator: CreatorId,
    questions: &[Question],
) -> Result<(PaperMetadata, ParamsSummary), DraftError> {
    let title = required("title", title)?;
    let subject = required("subject", subject)?;
    let grade = required("grade", grade)?;
    if questions.is_empty() {
        return Err(DraftError::NoQuestions);
    }

    let metadata = PaperMetadata {
        title,
        subject,
        grade,
        creator,
    };
    let summary = ParamsSummary::from_questions(&metadata, questions);
    Ok((metadata, summary))
}

fn required(field: &'static str, value: &str) -> Result<String, DraftError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DraftError::MissingField(field));
    }
    Ok(value.to_string())
}
