//! Core data model types for paperly.
//!
//! Questions, papers, generation parameters, and the identity values the
//! rest of the system passes around.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Marks per question assumed when a summary is built from an empty list.
pub const DEFAULT_MARKS_PER_QUESTION: u32 = 5;

/// Difficulty bucket of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All buckets in generation order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// One multiple-choice item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question prose.
    pub text: String,
    /// Answer options; referenced by index.
    pub options: Vec<String>,
    /// Index of the correct option.
    pub correct_answer: usize,
    /// Points awarded for a correct answer.
    pub marks: u32,
    pub difficulty: Difficulty,
}

impl Question {
    /// Build a question, checking that `correct_answer` indexes into `options`.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_answer: usize,
        marks: u32,
        difficulty: Difficulty,
    ) -> Result<Self, ModelError> {
        if correct_answer >= options.len() {
            return Err(ModelError::CorrectAnswerOutOfRange {
                correct_answer,
                option_count: options.len(),
            });
        }
        Ok(Self {
            text: text.into(),
            options,
            correct_answer,
            marks,
            difficulty,
        })
    }

    /// Whether a (possibly missing) selected option is the correct one.
    ///
    /// Scoring and result review both go through this predicate.
    pub fn is_answered_correctly(&self, selected: Option<usize>) -> bool {
        selected == Some(self.correct_answer)
    }

    /// Text of the correct option, if the index is in range.
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer).map(String::as_str)
    }
}

/// Store-assigned paper identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaperId(pub u64);

impl fmt::Display for PaperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PaperId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(PaperId)
            .map_err(|_| format!("invalid paper id: {s}"))
    }
}

/// Opaque identity of a paper's creator, as handed out by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatorId(pub String);

impl CreatorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CreatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role of the acting user, already resolved by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Teacher,
    Student,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Teacher => write!(f, "teacher"),
            Role::Student => write!(f, "student"),
        }
    }
}

/// The acting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub creator: CreatorId,
    pub role: Role,
}

/// Descriptive metadata of a paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperMetadata {
    pub title: String,
    pub subject: String,
    pub grade: String,
    pub creator: CreatorId,
}

/// A titled, ordered collection of questions.
///
/// `total_marks` is never stored; it is recomputed from the questions every
/// time it is read or serialized. Papers with an id came from the store and
/// are treated as immutable: edits go through [`Paper::revise`] and yield a
/// new candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "PaperRecord", try_from = "PaperRecord")]
pub struct Paper {
    id: Option<PaperId>,
    metadata: PaperMetadata,
    questions: Vec<Question>,
    created_at: Option<DateTime<Utc>>,
}

impl Paper {
    /// An in-memory paper that has not been persisted.
    pub fn candidate(metadata: PaperMetadata, questions: Vec<Question>) -> Self {
        Self {
            id: None,
            metadata,
            questions,
            created_at: None,
        }
    }

    /// Stamp a candidate with its store identity.
    pub fn persisted(self, id: PaperId, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Some(id),
            created_at: Some(created_at),
            ..self
        }
    }

    pub fn id(&self) -> Option<PaperId> {
        self.id
    }

    pub fn metadata(&self) -> &PaperMetadata {
        &self.metadata
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn is_candidate(&self) -> bool {
        self.id.is_none()
    }

    /// Sum of every question's marks.
    pub fn total_marks(&self) -> u64 {
        total_marks(&self.questions)
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}

/// Sum of the marks of a question sequence.
pub fn total_marks(questions: &[Question]) -> u64 {
    questions.iter().map(|q| u64::from(q.marks)).sum()
}

/// Serialized shape of a [`Paper`], carrying the derived total.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PaperRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<PaperId>,
    metadata: PaperMetadata,
    questions: Vec<Question>,
    total_marks: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl From<Paper> for PaperRecord {
    fn from(paper: Paper) -> Self {
        let total_marks = paper.total_marks();
        Self {
            id: paper.id,
            metadata: paper.metadata,
            questions: paper.questions,
            total_marks,
            created_at: paper.created_at,
        }
    }
}

impl TryFrom<PaperRecord> for Paper {
    type Error = ModelError;

    fn try_from(record: PaperRecord) -> Result<Self, Self::Error> {
        let computed = total_marks(&record.questions);
        if record.total_marks != computed {
            return Err(ModelError::TotalMarksMismatch {
                supplied: record.total_marks,
                computed,
            });
        }
        Ok(Self {
            id: record.id,
            metadata: record.metadata,
            questions: record.questions,
            created_at: record.created_at,
        })
    }
}

/// Requested share of each difficulty bucket, in percent.
///
/// The three values are not required to sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Distribution {
    #[serde(default)]
    pub easy: u32,
    #[serde(default)]
    pub medium: u32,
    #[serde(default)]
    pub hard: u32,
}

impl Distribution {
    pub fn new(easy: u32, medium: u32, hard: u32) -> Self {
        Self { easy, medium, hard }
    }

    /// Sum of the three shares. Widened so any inputs fit.
    pub fn total(&self) -> u64 {
        u64::from(self.easy) + u64::from(self.medium) + u64::from(self.hard)
    }

    pub fn is_unset(&self) -> bool {
        self.easy == 0 && self.medium == 0 && self.hard == 0
    }
}

/// A question generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperParams {
    pub title: String,
    pub subject: String,
    pub grade: String,
    pub question_count: u32,
    pub marks_per_question: u32,
    #[serde(default)]
    pub distribution: Distribution,
}

/// Description of how a paper was produced, passed to the store on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamsSummary {
    pub title: String,
    pub subject: String,
    pub grade: String,
    pub question_count: u32,
    pub marks_per_question: u32,
    pub distribution: Distribution,
}

impl ParamsSummary {
    /// Summary for a hand-finished question list.
    ///
    /// The marks of the first question stand in for marks per question, and
    /// the distribution is left at zero since edits may have changed it.
    pub fn from_questions(metadata: &PaperMetadata, questions: &[Question]) -> Self {
        Self {
            title: metadata.title.clone(),
            subject: metadata.subject.clone(),
            grade: metadata.grade.clone(),
            question_count: questions.len() as u32,
            marks_per_question: questions
                .first()
                .map(|q| q.marks)
                .unwrap_or(DEFAULT_MARKS_PER_QUESTION),
            distribution: Distribution::default(),
        }
    }
}

impl From<&PaperParams> for ParamsSummary {
    fn from(params: &PaperParams) -> Self {
        Self {
            title: params.title.clone(),
            subject: params.subject.clone(),
            grade: params.grade.clone(),
            question_count: params.question_count,
            marks_per_question: params.marks_per_question,
            distribution: params.distribution,
        }
    }
}

/// A problem found while checking a question list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Index of the offending question, if the warning is about one.
    pub question: Option<usize>,
    pub message: String,
}

/// Check a question list for problems that would make it unusable.
pub fn validate_questions(questions: &[Question]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut warn = |index: usize, message: String| {
        warnings.push(ValidationWarning {
            question: Some(index),
            message,
        });
    };

    for (i, q) in questions.iter().enumerate() {
        if q.text.trim().is_empty() {
            warn(i, "question text is empty".into());
        }
        if q.options.len() < 2 {
            warn(i, format!("only {} option(s); need at least 2", q.options.len()));
        }
        if let Some(blank) = q.options.iter().position(|o| o.trim().is_empty()) {
            warn(i, format!("option {} is blank", blank + 1));
        }
        if q.correct_answer >= q.options.len() {
            warn(
                i,
                format!(
                    "correct answer {} is out of range for {} options",
                    q.correct_answer,
                    q.options.len()
                ),
            );
        }
        if q.marks == 0 {
            warn(i, "marks must be at least 1".into());
        }
    }

    warnings
}
