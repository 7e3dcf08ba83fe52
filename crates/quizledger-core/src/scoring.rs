//! Points computation and the scoring operations of the ledger.
//!
//! Every scoring event goes through [`Ledger::record_weekly_points`], which is
//! the only path that mutates weekly records and stats. It keeps three
//! invariants: one record per week bucket, `all_time_score` equal to the sum
//! of every awarded point value, and `total_attempts` equal to the number of
//! scoring events.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::StoreError;
use crate::ledger::Ledger;
use crate::model::{QuizAttempt, WeeklyPointsRecord};
use crate::store::KeyValueStore;
use crate::week::{week_bucket, WeekBucket};

/// Points for `correct` out of `total`, scaled to `max_points`.
///
/// Rounds half up (`f64::round`, which rounds half away from zero and is
/// therefore half-up for these non-negative inputs). A quiz with no
/// questions earns nothing; `correct` is clamped to `total`.
pub fn points_for(correct: u32, total: u32, max_points: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total);
    let percentage = f64::from(correct) / f64::from(total) * 100.0;
    (percentage / 100.0 * f64::from(max_points)).round() as u32
}

/// How a repeat completion of the same subject within one week is scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatPolicy {
    /// Every completion earns its points; only the completion marker is
    /// deduplicated.
    #[default]
    #[serde(alias = "always")]
    AlwaysAward,
    /// Only the first completion of a subject in a week earns points.
    /// Repeats still count as attempts.
    #[serde(alias = "first_completion")]
    FirstCompletionOnly,
}

impl std::str::FromStr for RepeatPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" | "always_award" => Ok(RepeatPolicy::AlwaysAward),
            "first" | "first_completion" | "first_completion_only" => {
                Ok(RepeatPolicy::FirstCompletionOnly)
            }
            other => Err(format!("unknown repeat policy: {other}")),
        }
    }
}

/// What one scoring event did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringOutcome {
    /// The week the points were booked into.
    pub bucket: WeekBucket,
    /// Points actually added. Less than offered under
    /// [`RepeatPolicy::FirstCompletionOnly`] or once the week's total is full.
    pub awarded: u32,
    /// The week's total after this event.
    pub week_points: u32,
    /// Whether this event added the subject to the week's completed set.
    pub newly_completed: bool,
}

impl<S: KeyValueStore, C: Clock> Ledger<S, C> {
    /// Book `points` for a completed quiz in `subject` into the current week.
    ///
    /// The subject is lower-cased before it is recorded. Creates the week's
    /// record on first use, then updates and persists the weekly records
    /// followed by the stats.
    pub fn record_weekly_points(
        &mut self,
        points: u32,
        subject: &str,
    ) -> Result<ScoringOutcome, StoreError> {
        let now = self.clock().now();
        let now_ms = now.timestamp_millis();
        let bucket = week_bucket(&now);
        let subject = subject.to_lowercase();
        let repeat_policy = self.policy().repeat_policy;

        let mut records = self.get_weekly_records();
        let index = match records.iter().position(|r| r.bucket() == bucket) {
            Some(index) => index,
            None => {
                tracing::debug!("opening week {bucket}");
                records.push(WeeklyPointsRecord::new(bucket, now_ms));
                records.len() - 1
            }
        };
        let record = &mut records[index];

        let repeat = record.has_completed(&subject);
        let offered = match repeat_policy {
            RepeatPolicy::FirstCompletionOnly if repeat => 0,
            _ => points,
        };
        // Award only what fits in the week's total.
        let awarded = offered.min(u32::MAX - record.points);

        record.points += awarded;
        record.last_updated = now_ms;
        let newly_completed = record.mark_completed(&subject);
        let week_points = record.points;

        self.set_weekly_records(&records)?;

        let mut stats = self.get_stats();
        stats.current_week_points = week_points;
        stats.all_time_score = stats.all_time_score.saturating_add(u64::from(awarded));
        stats.total_attempts = stats.total_attempts.saturating_add(1);
        self.set_stats(&stats)?;

        tracing::debug!(
            "{bucket}: {subject} +{awarded} (offered {points}), week total {week_points}"
        );

        Ok(ScoringOutcome {
            bucket,
            awarded,
            week_points,
            newly_completed,
        })
    }

    /// Record a submitted quiz: append it to the history and book its points.
    pub fn submit_attempt(&mut self, attempt: QuizAttempt) -> Result<ScoringOutcome, StoreError> {
        let points = points_for(
            attempt.score,
            attempt.total_questions,
            self.policy().max_points_per_quiz,
        );
        let subject = attempt.subject.clone();
        self.add_attempt(attempt)?;
        self.record_weekly_points(points, &subject)
    }
}
