//! quizledger-core: weekly scoring ledger for a local quiz application.
//!
//! This crate defines the persisted data model, the week bucketing rule, the
//! ledger over a key-value medium, the scoring engine, reward evaluation, and
//! quiz bank grading that the quizledger CLI builds on.

pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod model;
pub mod quiz;
pub mod rewards;
pub mod scoring;
pub mod store;
pub mod user;
pub mod week;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{EntryError, LoginError, StoreError};
pub use ledger::{Ledger, LedgerPolicy};
pub use model::{QuizAttempt, User, UserStats, WeeklyPointsRecord};
pub use rewards::{evaluate, Reward, RewardStatus};
pub use scoring::{points_for, RepeatPolicy, ScoringOutcome};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StorageKey};
pub use week::{week_bucket, WeekBucket};
