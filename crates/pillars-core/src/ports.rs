//! **Ports**: the two narrow interfaces the engine consumes.
//!
//! - [`PersistencePort`]: named JSON blobs keyed by user (`progress`, `dailyTasks`, `assessment`).
//!   An absent blob is treated exactly like a fresh default.
//! - [`Clock`]: the current instant plus the UTC offset that defines "day" boundaries
//!   for streaks.
//!
//! Both are injected, so tests can drive streak logic across simulated days and swap the
//! store for one that fails on demand.

use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, Utc};
use std::sync::Mutex;

// -----------------------------------------------------------------------------
// Persistence
// -----------------------------------------------------------------------------

/// Durable key-value storage for named JSON aggregates.
///
/// `save` is the engine's only suspend point; callers await it before treating a
/// mutation as complete. Retries, if any, belong to the adapter.
#[async_trait]
pub trait PersistencePort: Send + Sync {
    /// Loads the blob stored under `key` for `user_id`, or `None` when absent.
    async fn load(&self, user_id: &str, key: &str) -> Result<Option<serde_json::Value>, StoreError>;

    /// Replaces the blob stored under `key` for `user_id`.
    async fn save(&self, user_id: &str, key: &str, value: serde_json::Value) -> Result<(), StoreError>;
}

// -----------------------------------------------------------------------------
// Clock
// -----------------------------------------------------------------------------

/// A captured instant together with the offset used to cut it into calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    pub now: DateTime<Utc>,
    pub offset: FixedOffset,
}

impl Moment {
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self {
            now,
            offset: utc_offset(),
        }
    }

    /// Local calendar date of `now`.
    pub fn today(&self) -> NaiveDate {
        self.date_of(self.now)
    }

    /// Local calendar date of an arbitrary timestamp.
    pub fn date_of(&self, ts: DateTime<Utc>) -> NaiveDate {
        ts.with_timezone(&self.offset).date_naive()
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

/// Time source for the engine.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Offset defining local day boundaries. UTC unless overridden.
    fn offset(&self) -> FixedOffset {
        utc_offset()
    }

    fn moment(&self) -> Moment {
        Moment {
            now: self.now(),
            offset: self.offset(),
        }
    }

    fn today(&self) -> NaiveDate {
        self.moment().today()
    }
}

/// Wall clock with a fixed local offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn utc() -> Self {
        Self { offset: utc_offset() }
    }

    /// Offset in minutes east of UTC. Out-of-range values fall back to UTC.
    pub fn with_offset_minutes(minutes: i32) -> Self {
        let offset = FixedOffset::east_opt(minutes.saturating_mul(60)).unwrap_or_else(utc_offset);
        Self { offset }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Manually driven clock for deterministic tests and simulations.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
            offset: utc_offset(),
        }
    }

    pub fn with_offset(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            now: Mutex::new(now),
            offset,
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        match self.now.lock() {
            Ok(mut guard) => *guard = now,
            Err(poisoned) => *poisoned.into_inner() = now,
        }
    }

    pub fn advance(&self, by: Duration) {
        let next = self.now() + by;
        self.set(next);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}
