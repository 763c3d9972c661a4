//! Error types for the paperly core.
//!
//! The engines themselves are total functions; these errors cover the
//! handful of conditions that indicate a caller bug (bad indices, terminal
//! session state) and the failures of the external paper store.

use thiserror::Error;

use crate::model::PaperId;

/// Violations of the question/paper data invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// `correct_answer` does not index into `options`.
    #[error("correct answer {correct_answer} is out of range for {option_count} options")]
    CorrectAnswerOutOfRange {
        correct_answer: usize,
        option_count: usize,
    },

    /// A supplied `total_marks` disagrees with the sum of question marks.
    #[error("total marks {supplied} does not match the sum of question marks {computed}")]
    TotalMarksMismatch { supplied: u64, computed: u64 },
}

/// Failures raised by a practice session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The question index is outside the session's question sequence.
    #[error("question index {index} is out of range (session has {len} questions)")]
    InvalidIndex { index: usize, len: usize },

    /// The option index is outside the question's options.
    #[error("option {option} is out of range for question {question} ({option_count} options)")]
    InvalidOption {
        question: usize,
        option: usize,
        option_count: usize,
    },

    /// The session was already submitted; answers are frozen.
    #[error("session already submitted")]
    AlreadySubmitted,

    /// The operation needs a submitted session.
    #[error("session has not been submitted yet")]
    NotSubmitted,
}

/// Failures raised while editing a question list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("question index {index} is out of range ({len} questions)")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("option index {option} is out of range for question {question} ({option_count} options)")]
    OptionOutOfRange {
        question: usize,
        option: usize,
        option_count: usize,
    },
}

/// Reasons a candidate paper cannot be handed to the store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("a paper needs at least one question")]
    NoQuestions,
}

/// Errors reported by a [`PaperStore`](crate::traits::PaperStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No paper exists with the given id.
    #[error("paper {0} not found")]
    NotFound(PaperId),

    /// The backend rejected the paper.
    #[error("invalid paper: {0}")]
    Validation(String),

    /// Reading or writing the backing storage failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_error_messages() {
        let err = SessionError::InvalidIndex { index: 7, len: 3 };
        assert_eq!(
            err.to_string(),
            "question index 7 is out of range (session has 3 questions)"
        );
        assert_eq!(
            SessionError::AlreadySubmitted.to_string(),
            "session already submitted"
        );
    }
}
