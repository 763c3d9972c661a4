//! Question list editing.
//!
//! Edits apply to an owned question list. Papers are never edited in
//! place: [`Paper::revise`] copies the questions, applies the edits, and
//! returns a new candidate.

use serde::{Deserialize, Serialize};

use crate::error::EditError;
use crate::model::{Difficulty, Paper, Question};

/// Options given to a freshly added question.
const BLANK_OPTION_COUNT: usize = 4;

/// A single change to a question list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    SetText { index: usize, text: String },
    SetOption { index: usize, option: usize, text: String },
    SetCorrectAnswer { index: usize, option: usize },
    /// Marks below 1 are raised to 1.
    SetMarks { index: usize, marks: u32 },
    SetDifficulty { index: usize, difficulty: Difficulty },
    Remove { index: usize },
    /// Swap with the previous question; no-op for the first.
    MoveUp { index: usize },
    /// Swap with the next question; no-op for the last.
    MoveDown { index: usize },
    /// Append an empty easy question.
    Add { marks: u32 },
}

/// Apply one edit.
pub fn apply(questions: &mut Vec<Question>, edit: Edit) -> Result<(), EditError> {
    match edit {
        Edit::SetText { index, text } => question_mut(questions, index)?.text = text,
        Edit::SetOption {
            index,
            option,
            text,
        } => {
            let q = question_mut(questions, index)?;
            let option_count = q.options.len();
            let slot = q.options.get_mut(option).ok_or(EditError::OptionOutOfRange {
                question: index,
                option,
                option_count,
            })?;
            *slot = text;
        }
        Edit::SetCorrectAnswer { index, option } => {
            let q = question_mut(questions, index)?;
            if option >= q.options.len() {
                return Err(EditError::OptionOutOfRange {
                    question: index,
                    option,
                    option_count: q.options.len(),
                });
            }
            q.correct_answer = option;
        }
        Edit::SetMarks { index, marks } => question_mut(questions, index)?.marks = marks.max(1),
        Edit::SetDifficulty { index, difficulty } => {
            question_mut(questions, index)?.difficulty = difficulty
        }
        Edit::Remove { index } => {
            check_index(questions, index)?;
            questions.remove(index);
        }
        Edit::MoveUp { index } => {
            check_index(questions, index)?;
            if index > 0 {
                questions.swap(index, index - 1);
            }
        }
        Edit::MoveDown { index } => {
            check_index(questions, index)?;
            if index + 1 < questions.len() {
                questions.swap(index, index + 1);
            }
        }
        Edit::Add { marks } => questions.push(blank_question(marks)),
    }
    Ok(())
}

/// Apply edits in order, stopping at the first failure.
pub fn apply_all(
    questions: &mut Vec<Question>,
    edits: impl IntoIterator<Item = Edit>,
) -> Result<(), EditError> {
    edits.into_iter().try_for_each(|e| apply(questions, e))
}

/// An empty question ready to be filled in.
pub fn blank_question(marks: u32) -> Question {
    Question {
        text: String::new(),
        options: vec![String::new(); BLANK_OPTION_COUNT],
        correct_answer: 0,
        marks: marks.max(1),
        difficulty: Difficulty::Easy,
    }
}

impl Paper {
    /// Copy this paper's questions, apply `edits`, and return the result as a
    /// new candidate with the same metadata. `self` is left untouched.
    pub fn revise(&self, edits: impl IntoIterator<Item = Edit>) -> Result<Paper, EditError> {
        let mut questions = self.questions().to_vec();
        apply_all(&mut questions, edits)?;
        Ok(Paper::candidate(self.metadata().clone(), questions))
    }
}

fn check_index(questions: &[Question], index: usize) -> Result<(), EditError> {
    if index >= questions.len() {
        return Err(EditError::QuestionOutOfRange {
            index,
            len: questions.len(),
        });
    }
    Ok(())
}

fn question_mut(questions: &mut [Question], index: usize) -> Result<&mut Question, EditError> {
    let len = questions.len();
    questions
        .get_mut(index)
        .ok_or(EditError::QuestionOutOfRange { index, len })
}
