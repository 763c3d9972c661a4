//! Practice sessions.
//!
//! A [`PracticeSession`] tracks one attempt at a question sequence: where
//! the user is, which option they picked for each question, and whether
//! they have submitted. Sessions live only in memory and are owned by the
//! caller that created them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::model::Question;

/// Lifecycle of a session. `Submitted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    InProgress,
    Submitted,
}

/// Marks earned against marks available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub earned_marks: u64,
    pub total_marks: u64,
}

impl Score {
    /// Score for a question sequence and answer map.
    ///
    /// Every question counts toward the total. Unanswered questions earn
    /// nothing, the same as a wrong answer.
    pub fn compute(questions: &[Question], answers: &BTreeMap<usize, usize>) -> Self {
        questions
            .iter()
            .enumerate()
            .fold(Score::default(), |mut score, (i, q)| {
                let marks = u64::from(q.marks);
                score.total_marks += marks;
                if q.is_answered_correctly(answers.get(&i).copied()) {
                    score.earned_marks += marks;
                }
                score
            })
    }

    /// Whole-number percentage, halves rounding up; 0 when nothing is available.
    pub fn percentage(&self) -> u32 {
        if self.total_marks == 0 {
            return 0;
        }
        ((self.earned_marks * 200 + self.total_marks) / (self.total_marks * 2)) as u32
    }
}

/// Coarse verdict shown with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Performance {
    Outstanding,
    GreatJob,
    GoodEffort,
    KeepPracticing,
}

impl Performance {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Performance::Outstanding,
            75..=89 => Performance::GreatJob,
            60..=74 => Performance::GoodEffort,
            _ => Performance::KeepPracticing,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Performance::Outstanding => "Outstanding!",
            Performance::GreatJob => "Great Job!",
            Performance::GoodEffort => "Good Effort!",
            Performance::KeepPracticing => "Keep Practicing!",
        }
    }
}

/// Review line for one question of a submitted session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionReview {
    pub index: usize,
    pub selected: Option<usize>,
    pub correct_answer: usize,
    pub is_correct: bool,
    pub marks: u32,
}

impl QuestionReview {
    pub fn is_unanswered(&self) -> bool {
        self.selected.is_none()
    }
}

/// Result of a submitted session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeSummary {
    pub score: Score,
    pub percentage: u32,
    pub correct_count: usize,
    pub answered_count: usize,
    pub performance: Performance,
    pub reviews: Vec<QuestionReview>,
}

/// One user's in-memory attempt at a question sequence.
#[derive(Debug, Clone)]
pub struct PracticeSession {
    id: Uuid,
    questions: Vec<Question>,
    current: usize,
    answers: BTreeMap<usize, usize>,
    state: SessionState,
}

impl PracticeSession {
    pub fn new(questions: Vec<Question>) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, questions = questions.len(), "practice session started");
        Self {
            id,
            questions,
            current: 0,
            answers: BTreeMap::new(),
            state: SessionState::InProgress,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_submitted(&self) -> bool {
        self.state == SessionState::Submitted
    }

    /// Current 0-based position.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    /// Option recorded for a question, if any.
    pub fn selected(&self, index: usize) -> Option<usize> {
        self.answers.get(&index).copied()
    }

    pub fn answers(&self) -> &BTreeMap<usize, usize> {
        &self.answers
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Move to any question, forwards or backwards.
    pub fn seek(&mut self, index: usize) -> Result<(), SessionError> {
        self.check_index(index)?;
        self.current = index;
        Ok(())
    }

    /// Step forward; returns `false` at the last question.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Step back; returns `false` at the first question.
    pub fn previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Record (or overwrite) the answer for a question.
    pub fn select_answer(&mut self, index: usize, option: usize) -> Result<(), SessionError> {
        if self.is_submitted() {
            return Err(SessionError::AlreadySubmitted);
        }
        self.check_index(index)?;
        let option_count = self.questions[index].options.len();
        if option >= option_count {
            return Err(SessionError::InvalidOption {
                question: index,
                option,
                option_count,
            });
        }
        self.answers.insert(index, option);
        Ok(())
    }

    /// Record an answer for the question at the current position.
    pub fn select_current(&mut self, option: usize) -> Result<(), SessionError> {
        self.select_answer(self.current, option)
    }

    /// Freeze the answers. Unanswered questions are allowed; submitting twice
    /// does nothing.
    pub fn submit(&mut self) {
        if self.is_submitted() {
            return;
        }
        self.state = SessionState::Submitted;
        tracing::debug!(
            session = %self.id,
            answered = self.answers.len(),
            total = self.questions.len(),
            "practice session submitted"
        );
    }

    /// Score of the current answers. Final once the session is submitted.
    pub fn score(&self) -> Score {
        Score::compute(&self.questions, &self.answers)
    }

    /// Per-question review and overall result of a submitted session.
    pub fn summary(&self) -> Result<PracticeSummary, SessionError> {
        if !self.is_submitted() {
            return Err(SessionError::NotSubmitted);
        }

        let reviews: Vec<QuestionReview> = self
            .questions
            .iter()
            .enumerate()
            .map(|(index, q)| {
                let selected = self.selected(index);
                QuestionReview {
                    index,
                    selected,
                    correct_answer: q.correct_answer,
                    is_correct: q.is_answered_correctly(selected),
                    marks: q.marks,
                }
            })
            .collect();

        let score = self.score();
        let percentage = score.percentage();
        Ok(PracticeSummary {
            score,
            percentage,
            correct_count: reviews.iter().filter(|r| r.is_correct).count(),
            answered_count: self.answered_count(),
            performance: Performance::from_percentage(percentage),
            reviews,
        })
    }

    fn check_index(&self, index: usize) -> Result<(), SessionError> {
        if index >= self.questions.len() {
            return Err(SessionError::InvalidIndex {
                index,
                len: self.questions.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;

    fn question(correct_answer: usize, marks: u32) -> Question {
        Question {
            text: format!("question worth {marks}"),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer,
            marks,
            difficulty: Difficulty::Easy,
        }
    }

    fn session() -> PracticeSession {
        PracticeSession::new(vec![question(0, 5), question(1, 5), question(2, 10)])
    }

    #[test]
    fn mixed_answers_scenario() {
        let mut s = session();
        s.select_answer(0, 0).unwrap();
        s.select_answer(1, 3).unwrap();
        s.submit();

        let score = s.score();
        assert_eq!(score.earned_marks, 5);
        assert_eq!(score.total_marks, 20);
        assert_eq!(score.percentage(), 25);
    }

    #[test]
    fn submit_with_no_answers() {
        let mut s = session();
        s.submit();
        assert_eq!(
            s.score(),
            Score {
                earned_marks: 0,
                total_marks: 20
            }
        );
        assert!(s.is_submitted());
    }

    #[test]
    fn answers_are_frozen_after_submit() {
        let mut s = session();
        s.select_answer(2, 1).unwrap();
        s.submit();

        assert_eq!(s.select_answer(2, 2), Err(SessionError::AlreadySubmitted));
        assert_eq!(s.select_answer(0, 0), Err(SessionError::AlreadySubmitted));
        assert_eq!(s.selected(2), Some(1));
        assert_eq!(s.answered_count(), 1);
    }

    #[test]
    fn last_write_wins() {
        let mut s = session();
        s.select_answer(1, 0).unwrap();
        s.select_answer(1, 1).unwrap();
        assert_eq!(s.selected(1), Some(1));
        assert_eq!(s.answered_count(), 1);
    }

    #[test]
    fn seek_moves_both_ways_and_rejects_out_of_range() {
        let mut s = session();
        s.seek(2).unwrap();
        assert_eq!(s.position(), 2);
        s.seek(0).unwrap();
        assert_eq!(s.position(), 0);
        assert_eq!(s.seek(3), Err(SessionError::InvalidIndex { index: 3, len: 3 }));
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn out_of_range_selections_are_rejected() {
        let mut s = session();
        assert_eq!(
            s.select_answer(5, 0),
            Err(SessionError::InvalidIndex { index: 5, len: 3 })
        );
        assert_eq!(
            s.select_answer(0, 4),
            Err(SessionError::InvalidOption {
                question: 0,
                option: 4,
                option_count: 4
            })
        );
        assert!(s.answers().is_empty());
    }

    #[test]
    fn next_and_previous_are_bounded() {
        let mut s = session();
        assert!(!s.previous());
        assert!(s.next());
        assert!(s.next());
        assert!(s.is_last());
        assert!(!s.next());
        assert_eq!(s.position(), 2);
        assert!(s.previous());
        assert_eq!(s.position(), 1);
    }

    #[test]
    fn select_current_uses_position() {
        let mut s = session();
        s.seek(1).unwrap();
        s.select_current(1).unwrap();
        assert_eq!(s.selected(1), Some(1));
        assert_eq!(s.selected(0), None);
    }

    #[test]
    fn summary_requires_submission() {
        let s = session();
        assert_eq!(s.summary(), Err(SessionError::NotSubmitted));
    }

    #[test]
    fn summary_agrees_with_score() {
        let mut s = session();
        s.select_answer(0, 0).unwrap();
        s.select_answer(1, 3).unwrap();
        s.submit();

        let summary = s.summary().unwrap();
        assert_eq!(summary.score, s.score());
        assert_eq!(summary.correct_count, 1);
        assert_eq!(summary.answered_count, 2);
        assert_eq!(summary.percentage, 25);
        assert_eq!(summary.performance, Performance::KeepPracticing);

        let earned: u64 = summary
            .reviews
            .iter()
            .filter(|r| r.is_correct)
            .map(|r| u64::from(r.marks))
            .sum();
        assert_eq!(earned, summary.score.earned_marks);
        assert!(summary.reviews[2].is_unanswered());
        assert!(!summary.reviews[1].is_correct);
    }

    #[test]
    fn percentage_rounding_and_empty() {
        assert_eq!(Score::default().percentage(), 0);
        let s = Score {
            earned_marks: 1,
            total_marks: 3,
        };
        assert_eq!(s.percentage(), 33);
        let s = Score {
            earned_marks: 2,
            total_marks: 3,
        };
        assert_eq!(s.percentage(), 67);
        let s = Score {
            earned_marks: 1,
            total_marks: 8,
        };
        // 12.5 rounds up
        assert_eq!(s.percentage(), 13);
    }

    #[test]
    fn performance_bands() {
        assert_eq!(Performance::from_percentage(100), Performance::Outstanding);
        assert_eq!(Performance::from_percentage(90), Performance::Outstanding);
        assert_eq!(Performance::from_percentage(89), Performance::GreatJob);
        assert_eq!(Performance::from_percentage(60), Performance::GoodEffort);
        assert_eq!(Performance::from_percentage(59), Performance::KeepPracticing);
        assert_eq!(Performance::GreatJob.message(), "Great Job!");
    }

    #[test]
    fn submit_twice_is_harmless() {
        let mut s = session();
        s.select_answer(2, 2).unwrap();
        s.submit();
        s.submit();
        assert_eq!(s.score().earned_marks, 10);
    }
}
