//! The ledger: typed access to the four persisted entries.
//!
//! A [`Ledger`] is constructed once per session around a key-value medium and
//! a clock, and passed to whatever needs it. Reads never fail: an entry that
//! was never written, or that no longer deserializes, reads as its default.
//! The scoring operations that mutate weekly records and stats live in
//! [`crate::scoring`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::error::{EntryError, StoreError};
use crate::model::{QuizAttempt, TimestampMs, User, UserStats, WeeklyPointsRecord};
use crate::scoring::RepeatPolicy;
use crate::store::{KeyValueStore, StorageKey};
use crate::week::{week_bucket, WeekBucket};

/// Application policy the ledger applies when scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerPolicy {
    /// Points for a perfect quiz; partial scores are proportional.
    pub max_points_per_quiz: u32,
    /// Distinct subjects that make a week "fully completed".
    pub subjects_per_week: usize,
    /// What a repeat completion of a subject within one week earns.
    pub repeat_policy: RepeatPolicy,
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        Self {
            max_points_per_quiz: 10,
            subjects_per_week: 4,
            repeat_policy: RepeatPolicy::default(),
        }
    }
}

/// Persistent single-user scoring ledger.
pub struct Ledger<S, C = SystemClock> {
    store: S,
    clock: C,
    policy: LedgerPolicy,
}

impl<S: KeyValueStore> Ledger<S, SystemClock> {
    /// A ledger on the system clock with the default policy.
    pub fn open(store: S) -> Self {
        Self::new(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> Ledger<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            policy: LedgerPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: LedgerPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &LedgerPolicy {
        &self.policy
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // -----------------------------------------------------------------------
    // Storage boundary
    // -----------------------------------------------------------------------

    /// Load and deserialize one entry.
    ///
    /// `Ok(None)` means the key was never written. Unlike the typed getters
    /// below, this surfaces malformed values and medium failures.
    pub fn load_entry<T: DeserializeOwned>(
        &self,
        key: StorageKey,
    ) -> Result<Option<T>, EntryError> {
        let Some(raw) = self.store.get(key.as_str())? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| EntryError::Malformed {
                key: key.as_str().to_string(),
                source,
            })
    }

    /// Like [`Ledger::load_entry`], but anything unreadable is logged and
    /// treated as absent.
    pub(crate) fn read<T: DeserializeOwned>(&self, key: StorageKey) -> Option<T> {
        match self.load_entry(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("ignoring unreadable ledger entry: {e}");
                None
            }
        }
    }

    pub(crate) fn write<T: Serialize + ?Sized>(
        &mut self,
        key: StorageKey,
        value: &T,
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
            key: key.as_str().to_string(),
            source,
        })?;
        self.store.set(key.as_str(), &json)
    }

    pub(crate) fn now_ms(&self) -> TimestampMs {
        self.clock.now().timestamp_millis()
    }

    // -----------------------------------------------------------------------
    // User
    // -----------------------------------------------------------------------

    /// Store `user` as the logged-in user, replacing any previous one.
    pub fn set_user(&mut self, user: &User) -> Result<(), StoreError> {
        self.write(StorageKey::User, user)
    }

    pub fn get_user(&self) -> Option<User> {
        self.read(StorageKey::User)
    }

    pub fn clear_user(&mut self) -> Result<(), StoreError> {
        self.store.remove(StorageKey::User.as_str())
    }

    pub fn is_logged_in(&self) -> bool {
        self.get_user().is_some()
    }

    /// Log out. Quiz history, weekly records and stats are kept.
    pub fn clear_all_data(&mut self) -> Result<(), StoreError> {
        self.clear_user()
    }

    /// Remove every ledger entry, history included.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        for key in StorageKey::ALL {
            self.store.remove(key.as_str())?;
        }
        tracing::info!("ledger reset");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Attempts
    // -----------------------------------------------------------------------

    /// Append `attempt` to the history. No deduplication.
    pub fn add_attempt(&mut self, attempt: QuizAttempt) -> Result<(), StoreError> {
        let mut attempts = self.get_attempts();
        attempts.push(attempt);
        self.write(StorageKey::QuizAttempts, &attempts)
    }

    /// All attempts in the order they were added.
    pub fn get_attempts(&self) -> Vec<QuizAttempt> {
        self.read(StorageKey::QuizAttempts).unwrap_or_default()
    }

    /// Attempts whose subject matches `subject` exactly.
    pub fn get_attempts_for_subject(&self, subject: &str) -> Vec<QuizAttempt> {
        self.get_attempts()
            .into_iter()
            .filter(|a| a.subject == subject)
            .collect()
    }

    // -----------------------------------------------------------------------
    // Stats and weekly records
    // -----------------------------------------------------------------------

    pub fn get_stats(&self) -> UserStats {
        self.read(StorageKey::UserStats).unwrap_or_default()
    }

    /// Overwrite the stored stats.
    pub fn set_stats(&mut self, stats: &UserStats) -> Result<(), StoreError> {
        self.write(StorageKey::UserStats, stats)
    }

    pub fn get_weekly_records(&self) -> Vec<WeeklyPointsRecord> {
        self.read(StorageKey::WeeklyPoints).unwrap_or_default()
    }

    pub(crate) fn set_weekly_records(
        &mut self,
        records: &[WeeklyPointsRecord],
    ) -> Result<(), StoreError> {
        self.write(StorageKey::WeeklyPoints, records)
    }

    /// The bucket the clock currently falls into.
    pub fn current_bucket(&self) -> WeekBucket {
        week_bucket(&self.clock.now())
    }

    /// This week's record, if anything has been scored this week.
    pub fn current_week_record(&self) -> Option<WeeklyPointsRecord> {
        let bucket = self.current_bucket();
        self.get_weekly_records()
            .into_iter()
            .find(|r| r.bucket() == bucket)
    }

    pub fn current_week_points(&self) -> u32 {
        self.current_week_record().map(|r| r.points).unwrap_or(0)
    }

    /// `true` once this week's record holds exactly the configured number of
    /// distinct subjects. `false` if nothing has been scored this week.
    pub fn week_fully_completed(&self) -> bool {
        self.current_week_record()
            .map(|r| r.completed_subjects.len() == self.policy.subjects_per_week)
            .unwrap_or(false)
    }
}
