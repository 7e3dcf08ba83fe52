//! Core data model types for quizledger.
//!
//! These are the records persisted by the ledger. Field names serialize in
//! camelCase so the stored JSON keeps the layout existing data was written in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::week::WeekBucket;

/// Milliseconds since the Unix epoch.
pub type TimestampMs = i64;

/// The logged-in person. At most one is resident at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque identifier generated at login.
    pub id: String,
    pub email: String,
    /// Display name.
    pub name: String,
    /// When the user logged in.
    pub login_time: TimestampMs,
}

/// One completed quiz submission. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    /// Subject name as shown to the user (e.g. "Python").
    pub subject: String,
    /// Number of correct answers.
    pub score: u32,
    pub total_questions: u32,
    /// Question index -> selected option index. Unanswered questions are absent.
    #[serde(default)]
    pub answers: BTreeMap<usize, usize>,
    pub completed_at: TimestampMs,
}

/// Per-(week, year) accumulator of points and completed subjects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPointsRecord {
    pub week: u32,
    pub year: i32,
    pub points: u32,
    /// Lower-cased subject names; each appears at most once.
    #[serde(default)]
    pub completed_subjects: Vec<String>,
    pub last_updated: TimestampMs,
}

impl WeeklyPointsRecord {
    /// A fresh record for `bucket` with no points and nothing completed.
    pub fn new(bucket: WeekBucket, now_ms: TimestampMs) -> Self {
        Self {
            week: bucket.week,
            year: bucket.year,
            points: 0,
            completed_subjects: Vec::new(),
            last_updated: now_ms,
        }
    }

    pub fn bucket(&self) -> WeekBucket {
        WeekBucket {
            week: self.week,
            year: self.year,
        }
    }

    pub fn has_completed(&self, subject: &str) -> bool {
        self.completed_subjects.iter().any(|s| s == subject)
    }

    /// Mark `subject` complete. Returns `false` if it was already marked.
    pub fn mark_completed(&mut self, subject: &str) -> bool {
        if self.has_completed(subject) {
            return false;
        }
        self.completed_subjects.push(subject.to_string());
        true
    }
}

/// Aggregate statistics, updated on every scoring event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// Number of scoring events ever recorded.
    #[serde(default)]
    pub total_attempts: u32,
    /// Carried for layout compatibility; the ledger keeps weekly records
    /// under their own key and leaves this list as it finds it.
    #[serde(default)]
    pub weekly_points: Vec<WeeklyPointsRecord>,
    /// Sum of every point value ever awarded. Never decreases.
    #[serde(default)]
    pub all_time_score: u64,
    /// Points of the most recently updated week.
    #[serde(default)]
    pub current_week_points: u32,
}
