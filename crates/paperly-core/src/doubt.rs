//! Template-based help for a single question.
//!
//! No language understanding happens here: the response depends only on
//! the question's difficulty, text, and correct option.

use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, Question};

/// Answer to a user's doubt about a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoubtResponse {
    pub correct_answer: String,
    pub explanation: String,
}

/// Explain the correct answer to `question`.
///
/// Returns `None` for a blank doubt.
pub fn explain(question: &Question, doubt: &str) -> Option<DoubtResponse> {
    if doubt.trim().is_empty() {
        return None;
    }
    let correct = question.correct_option().unwrap_or_default();

    let opening = match question.difficulty {
        Difficulty::Easy => "This is a fundamental question that tests basic understanding.",
        Difficulty::Medium => "This question requires a good understanding of the concept.",
        Difficulty::Hard => "This is a challenging question that tests deeper understanding.",
    };
    let tip = match question.difficulty {
        Difficulty::Hard => {
            "For complex questions like this, break the problem into smaller parts \
             and eliminate obviously incorrect options first."
        }
        _ => "Read the question carefully and consider which concept or principle it is testing.",
    };

    let explanation = format!(
        "{opening} The correct answer is \"{correct}\". \
         Looking at the question \"{text}\", consider each option in turn. \
         \"{correct}\" is correct because it directly addresses what the question asks; \
         the other options may seem plausible but do not fully satisfy it. {tip}",
        text = question.text,
    );

    Some(DoubtResponse {
        correct_answer: correct.to_string(),
        explanation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::synthesize;

    #[test]
    fn blank_doubt_gets_no_response() {
        let q = synthesize(Difficulty::Easy, 0, 1);
        assert!(explain(&q, "   ").is_none());
    }

    #[test]
    fn response_names_the_correct_option() {
        let q = synthesize(Difficulty::Medium, 2, 1);
        let response = explain(&q, "why?").unwrap();
        assert_eq!(response.correct_answer, "Answer 3");
        assert!(response.explanation.contains(&q.text));
        assert!(response.explanation.contains("good understanding"));
    }

    #[test]
    fn hard_questions_get_the_breakdown_tip() {
        let q = synthesize(Difficulty::Hard, 0, 1);
        let response = explain(&q, "stuck").unwrap();
        assert!(response.explanation.contains("smaller parts"));
        assert!(response.explanation.starts_with("This is a challenging"));
    }
}
