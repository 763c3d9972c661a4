//! Question generation.
//!
//! Turns a [`PaperParams`] request into a deterministic question sequence:
//! an easy block, then a medium block, then a hard block. Question content
//! comes from fixed per-difficulty pools indexed cyclically, so the same
//! `(difficulty, index)` pair always produces the same question.

use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, PaperParams, Question};

/// Split used when every requested percentage is zero.
const FALLBACK_EASY_PERCENT: u64 = 40;
const FALLBACK_MEDIUM_PERCENT: u64 = 40;

const EASY_POOL: &[&str] = &[
    "What is the sum of 5 and 7?",
    "Define the term \"photosynthesis\".",
    "Name the capital city of France.",
    "What is 10 multiplied by 3?",
    "Identify the primary colors.",
    "What is the boiling point of water in Celsius?",
    "Name the largest planet in our solar system.",
    "What is the square root of 16?",
    "Define a noun.",
    "What is the chemical symbol for water?",
];

const MEDIUM_POOL: &[&str] = &[
    "Explain the process of mitosis.",
    "Calculate the area of a circle with radius 5 cm.",
    "Describe the water cycle in detail.",
    "Solve for x: 2x + 5 = 15",
    "What are the three states of matter?",
    "Explain Newton's first law of motion.",
    "What is the difference between weather and climate?",
    "Calculate 15% of 200.",
    "Describe the structure of an atom.",
    "What is the Pythagorean theorem?",
];

const HARD_POOL: &[&str] = &[
    "Derive the quadratic formula from first principles.",
    "Analyze the causes and effects of the Industrial Revolution.",
    "Prove that the sum of angles in a triangle equals 180 degrees.",
    "Explain the theory of relativity in simple terms.",
    "Discuss the impact of climate change on biodiversity.",
    "Solve the differential equation: dy/dx = 2x",
    "Compare and contrast mitosis and meiosis.",
    "Evaluate the integral of x² from 0 to 5.",
    "Explain the concept of natural selection.",
    "Analyze the themes in Shakespeare's Hamlet.",
];

const OPTION_SETS: &[[&str; 4]] = &[
    ["Option A", "Option B", "Option C", "Option D"],
    ["First choice", "Second choice", "Third choice", "Fourth choice"],
    ["Answer 1", "Answer 2", "Answer 3", "Answer 4"],
    ["Choice A", "Choice B", "Choice C", "Choice D"],
];

/// Number of questions emitted per difficulty bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DifficultyCounts {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl DifficultyCounts {
    pub fn total(&self) -> u32 {
        self.easy + self.medium + self.hard
    }

    pub fn get(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl PaperParams {
    /// Resolve the requested distribution into block sizes.
    ///
    /// Easy and medium are rounded to the nearest whole question; hard takes
    /// the residual so the three always sum to `question_count`. An all-zero
    /// distribution falls back to a floored 40/40 split with the remainder in
    /// hard. If easy and medium together overshoot the count, hard is floored
    /// at zero and the overshoot is taken back from medium, then easy.
    pub fn resolve_counts(&self) -> DifficultyCounts {
        let count = u64::from(self.question_count);
        let dist = self.distribution;

        let (mut easy, mut medium) = if dist.is_unset() {
            (
                count * FALLBACK_EASY_PERCENT / 100,
                count * FALLBACK_MEDIUM_PERCENT / 100,
            )
        } else {
            (
                round_percent(count, u64::from(dist.easy)),
                round_percent(count, u64::from(dist.medium)),
            )
        };

        if easy + medium > count {
            let overshoot = easy + medium - count;
            tracing::warn!(
                easy,
                medium,
                count,
                "easy and medium shares exceed the question count; trimming {overshoot}"
            );
            let from_medium = overshoot.min(medium);
            medium -= from_medium;
            easy -= overshoot - from_medium;
        }

        let hard = count - easy - medium;
        DifficultyCounts {
            easy: easy as u32,
            medium: medium as u32,
            hard: hard as u32,
        }
    }
}

/// `round(count * percent / 100)`, halves rounding up.
fn round_percent(count: u64, percent: u64) -> u64 {
    (count * percent + 50) / 100
}

/// Generate the question sequence for a request.
///
/// The output is a pure function of `params`: identical requests produce
/// identical sequences.
pub fn generate(params: &PaperParams) -> Vec<Question> {
    let counts = params.resolve_counts();
    tracing::debug!(
        easy = counts.easy,
        medium = counts.medium,
        hard = counts.hard,
        "generating questions for '{}'",
        params.title
    );

    let mut questions = Vec::with_capacity(counts.total() as usize);
    for difficulty in Difficulty::ALL {
        questions.extend(
            (0..counts.get(difficulty) as usize)
                .map(|i| synthesize(difficulty, i, params.marks_per_question)),
        );
    }
    questions
}

/// Build the `index`-th question of a difficulty block.
pub fn synthesize(difficulty: Difficulty, index: usize, marks: u32) -> Question {
    let pool = match difficulty {
        Difficulty::Easy => EASY_POOL,
        Difficulty::Medium => MEDIUM_POOL,
        Difficulty::Hard => HARD_POOL,
    };
    let options: Vec<String> = OPTION_SETS[index % OPTION_SETS.len()]
        .iter()
        .map(|o| o.to_string())
        .collect();
    let correct_answer = index % options.len();

    Question {
        text: pool[index % pool.len()].to_string(),
        options,
        correct_answer,
        marks,
        difficulty,
    }
}
