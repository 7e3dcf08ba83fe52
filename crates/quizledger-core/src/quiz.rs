//! Quiz banks: TOML parsing, validation, and grading.
//!
//! A quiz bank file holds one subject's questions:
//!
//! ```toml
//! [quiz]
//! subject = "Python"
//! time_limit_minutes = 10
//!
//! [[questions]]
//! id = 1
//! text = "Which keyword defines a function?"
//! options = ["function", "def", "define", "func"]
//! correct_index = 1
//! explanation = "Functions are defined with `def`."
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{QuizAttempt, TimestampMs};
use crate::scoring::points_for;

/// One subject's multiple-choice quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSet {
    pub subject: String,
    #[serde(default)]
    pub description: String,
    /// Countdown length shown to the quiz taker.
    #[serde(default = "default_time_limit")]
    pub time_limit_minutes: u32,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub options: Vec<String>,
    /// Index into `options` of the right answer.
    pub correct_index: usize,
    #[serde(default)]
    pub explanation: String,
}

fn default_time_limit() -> u32 {
    10
}

/// Intermediate TOML structure for quiz bank files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    subject: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_time_limit")]
    time_limit_minutes: u32,
}

/// Parse a single TOML quiz bank file.
pub fn parse_quiz_set(path: &Path) -> Result<QuizSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_set_str(&content, path)
}

/// Parse a TOML string into a `QuizSet`.
pub fn parse_quiz_set_str(content: &str, source_path: &Path) -> Result<QuizSet> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    anyhow::ensure!(
        !parsed.quiz.subject.trim().is_empty(),
        "quiz subject is empty: {}",
        source_path.display()
    );

    Ok(QuizSet {
        subject: parsed.quiz.subject,
        description: parsed.quiz.description,
        time_limit_minutes: parsed.quiz.time_limit_minutes,
        questions: parsed.questions,
    })
}

/// Recursively load all `.toml` quiz banks under `dir`, sorted by subject.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<QuizSet>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut sets = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();

        if path.is_dir() {
            sets.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {e:#}", path.display());
                }
            }
        }
    }

    sets.sort_by(|a, b| a.subject.cmp(&b.subject));
    Ok(sets)
}

/// A warning from quiz bank validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<u32>,
    pub message: String,
}

/// Check a quiz bank for common mistakes.
pub fn validate_quiz_set(set: &QuizSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "quiz has no questions".into(),
        });
    }

    if set.time_limit_minutes == 0 {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "time limit is zero".into(),
        });
    }

    let mut seen_ids = HashSet::new();
    for q in &set.questions {
        let mut warn = |message: String| {
            warnings.push(ValidationWarning {
                question_id: Some(q.id),
                message,
            })
        };

        if !seen_ids.insert(q.id) {
            warn(format!("duplicate question ID: {}", q.id));
        }
        if q.text.trim().is_empty() {
            warn("question text is empty".into());
        }
        if q.options.len() < 2 {
            warn(format!("only {} option(s)", q.options.len()));
        }
        if q.correct_index >= q.options.len() {
            warn(format!(
                "correct_index {} is out of range for {} option(s)",
                q.correct_index,
                q.options.len()
            ));
        }
    }

    warnings
}

/// Per-question grading detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionReview {
    pub index: usize,
    pub selected: Option<usize>,
    pub correct_index: usize,
    pub is_correct: bool,
}

/// A graded submission, ready to be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedQuiz {
    pub subject: String,
    pub correct: u32,
    pub total: u32,
    /// Whole-number percentage, rounded half up.
    pub percentage: u32,
    /// Points this submission is worth.
    pub points: u32,
    pub answers: BTreeMap<usize, usize>,
    pub review: Vec<QuestionReview>,
}

impl GradedQuiz {
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }

    /// The history record for this submission.
    pub fn into_attempt(self, completed_at: TimestampMs) -> QuizAttempt {
        QuizAttempt {
            subject: self.subject,
            score: self.correct,
            total_questions: self.total,
            answers: self.answers,
            completed_at,
        }
    }
}

/// Grade `answers` (question index -> selected option index) against `set`.
///
/// Unanswered questions count as wrong. Answers for question indices outside
/// the set are dropped.
pub fn grade(set: &QuizSet, answers: &BTreeMap<usize, usize>, max_points: u32) -> GradedQuiz {
    let total = set.questions.len();

    let review: Vec<QuestionReview> = set
        .questions
        .iter()
        .enumerate()
        .map(|(index, q)| {
            let selected = answers.get(&index).copied();
            QuestionReview {
                index,
                selected,
                correct_index: q.correct_index,
                is_correct: selected == Some(q.correct_index),
            }
        })
        .collect();

    let correct = review.iter().filter(|r| r.is_correct).count() as u32;
    let total = total as u32;
    let percentage = if total == 0 {
        0
    } else {
        (f64::from(correct) / f64::from(total) * 100.0).round() as u32
    };

    let answers = answers
        .iter()
        .filter(|(index, _)| **index < set.questions.len())
        .map(|(&index, &option)| (index, option))
        .collect();

    GradedQuiz {
        subject: set.subject.clone(),
        correct,
        total,
        percentage,
        points: points_for(correct, total, max_points),
        answers,
        review,
    }
}
