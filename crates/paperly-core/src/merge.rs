//! Paper merging.
//!
//! Flattens several papers into one question sequence and proposes
//! metadata for the result. Sources are only read, never modified.

use serde::{Deserialize, Serialize};

use crate::model::{CreatorId, Paper, PaperMetadata, Question};

/// Output of [`merge`]: the combined questions and suggested metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MergedPaper {
    pub questions: Vec<Question>,
    pub suggested_title: String,
    pub suggested_subject: String,
    pub suggested_grade: String,
}

/// Caller-supplied replacements for the suggested metadata.
#[derive(Debug, Clone, Default)]
pub struct MetadataOverrides {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub grade: Option<String>,
}

impl MergedPaper {
    /// Build a candidate paper, preferring overrides over suggestions.
    pub fn into_candidate(self, overrides: MetadataOverrides, creator: CreatorId) -> Paper {
        let metadata = PaperMetadata {
            title: overrides.title.unwrap_or(self.suggested_title),
            subject: overrides.subject.unwrap_or(self.suggested_subject),
            grade: overrides.grade.unwrap_or(self.suggested_grade),
            creator,
        };
        Paper::candidate(metadata, self.questions)
    }
}

/// Merge papers in order.
///
/// Questions are concatenated paper by paper, keeping each paper's internal
/// order. Subject and grade are chosen by plurality vote, ties going to the
/// value seen first. An empty input yields an empty result.
pub fn merge(papers: &[Paper]) -> MergedPaper {
    let Some(first) = papers.first() else {
        return MergedPaper::default();
    };

    let questions: Vec<Question> = papers
        .iter()
        .flat_map(|p| p.questions().iter().cloned())
        .collect();

    let suggested_title = match papers {
        [only] => only.metadata().title.clone(),
        [a, b] => format!("{} + {}", a.metadata().title, b.metadata().title),
        _ => format!("Combined Paper ({} papers)", papers.len()),
    };

    let suggested_subject = plurality(papers.iter().map(|p| p.metadata().subject.as_str()))
        .unwrap_or(&first.metadata().subject)
        .to_string();
    let suggested_grade = plurality(papers.iter().map(|p| p.metadata().grade.as_str()))
        .unwrap_or(&first.metadata().grade)
        .to_string();

    tracing::debug!(
        papers = papers.len(),
        questions = questions.len(),
        "merged papers into '{suggested_title}'"
    );

    MergedPaper {
        questions,
        suggested_title,
        suggested_subject,
        suggested_grade,
    }
}

/// Most frequent value; ties go to the value encountered first.
pub fn plurality<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    // Insertion-ordered tally so the tie-break is stable.
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for value in values {
        match tally.iter_mut().find(|(v, _)| *v == value) {
            Some((_, n)) => *n += 1,
            None => tally.push((value, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, n) in tally {
        if best.map_or(true, |(_, top)| n > top) {
            best = Some((value, n));
        }
    }
    best.map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;

    fn question(text: &str, marks: u32) -> Question {
        Question {
            text: text.into(),
            options: vec!["yes".into(), "no".into()],
            correct_answer: 0,
            marks,
            difficulty: Difficulty::Medium,
        }
    }

    fn paper(title: &str, subject: &str, grade: &str, texts: &[&str]) -> Paper {
        Paper::candidate(
            PaperMetadata {
                title: title.into(),
                subject: subject.into(),
                grade: grade.into(),
                creator: CreatorId::new("t"),
            },
            texts.iter().map(|t| question(t, 2)).collect(),
        )
    }

    #[test]
    fn empty_input() {
        let merged = merge(&[]);
        assert!(merged.questions.is_empty());
        assert_eq!(merged.suggested_title, "");
        assert_eq!(merged.suggested_subject, "");
        assert_eq!(merged.suggested_grade, "");
    }

    #[test]
    fn two_papers_title_and_order() {
        let a = paper("Midterm A", "Physics", "Grade 9", &["a1", "a2"]);
        let b = paper("Midterm B", "Physics", "Grade 9", &["b1"]);
        let merged = merge(&[a, b]);

        assert_eq!(merged.suggested_title, "Midterm A + Midterm B");
        let texts: Vec<&str> = merged.questions.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, ["a1", "a2", "b1"]);
    }

    #[test]
    fn many_papers_title_and_vote() {
        let papers = [
            paper("One", "Maths", "Grade 7", &["1"]),
            paper("Two", "Physics", "Grade 8", &["2"]),
            paper("Three", "Physics", "Grade 7", &["3", "4"]),
        ];
        let merged = merge(&papers);

        assert_eq!(merged.suggested_title, "Combined Paper (3 papers)");
        assert_eq!(merged.suggested_subject, "Physics");
        assert_eq!(merged.suggested_grade, "Grade 7");
        assert_eq!(merged.questions.len(), 4);
    }

    #[test]
    fn single_paper_keeps_its_title() {
        let merged = merge(&[paper("Solo", "Art", "Grade 1", &["x"])]);
        assert_eq!(merged.suggested_title, "Solo");
        assert_eq!(merged.suggested_subject, "Art");
    }

    #[test]
    fn sources_are_untouched() {
        let a = paper("A", "S", "G", &["q"]);
        let b = paper("B", "S", "G", &["r"]);
        let before = (a.clone(), b.clone());
        let candidate = merge(&[a.clone(), b.clone()])
            .into_candidate(MetadataOverrides::default(), CreatorId::new("me"));

        assert_eq!((a, b), before);
        assert!(candidate.is_candidate());
        assert_eq!(candidate.total_marks(), 4);
        assert_eq!(candidate.metadata().title, "A + B");
        assert_eq!(candidate.metadata().creator.as_str(), "me");
    }

    #[test]
    fn overrides_replace_suggestions() {
        let merged = merge(&[paper("A", "S", "G", &["q"]), paper("B", "S", "G", &[])]);
        let candidate = merged.into_candidate(
            MetadataOverrides {
                title: Some("Finals".into()),
                ..Default::default()
            },
            CreatorId::new("me"),
        );
        assert_eq!(candidate.metadata().title, "Finals");
        assert_eq!(candidate.metadata().subject, "S");
    }

    #[test]
    fn plurality_tie_goes_to_first_seen() {
        assert_eq!(plurality(["b", "a", "a", "b"]), Some("b"));
        assert_eq!(plurality(["x", "y", "z"]), Some("x"));
        assert_eq!(plurality(["x", "y", "y"]), Some("y"));
        assert_eq!(plurality(Vec::<&str>::new()), None);
    }
}
