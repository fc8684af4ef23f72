//! Deadline tracking for recursive searches.
//!
//! Every recursive helper polls the same [`TimeBudget`] on entry. Reading the
//! clock on each poll would dominate the cost of small recursion steps, so the
//! clock is only consulted on every 1024th poll; the remaining polls are a
//! counter increment. Once the deadline has been observed the budget stays
//! expired.

use std::cell::Cell;
use std::time::{Duration, Instant};

use thiserror::Error;

/// Polls between two clock reads, minus one (power-of-two mask).
const POLL_MASK: u32 = 1023;

/// Stand-in horizon for budgets too large to represent as an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Unwind signal raised when a search runs out of time.
///
/// It travels through `Result<_, Expired>` and `?` and is converted into a
/// best-so-far result at the public operation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search budget exhausted")]
pub struct Expired;

/// A wall-clock deadline shared by reference through one search.
#[derive(Debug)]
pub struct TimeBudget {
    deadline: Instant,
    polls: Cell<u32>,
    expired: Cell<bool>,
}

impl TimeBudget {
    /// A budget expiring `ms` milliseconds from now.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        let now = Instant::now();
        let deadline = now
            .checked_add(Duration::from_millis(ms))
            .unwrap_or(now + FAR_FUTURE);
        Self::with_deadline(deadline)
    }

    /// A budget expiring at a fixed instant.
    #[must_use]
    pub const fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline,
            polls: Cell::new(0),
            expired: Cell::new(false),
        }
    }

    /// A budget bounded by both this budget's deadline and `local_ms` from now.
    #[must_use]
    pub fn child(&self, local_ms: u64) -> Self {
        let local = Self::from_millis(local_ms);
        let child = Self::with_deadline(local.deadline.min(self.deadline));
        child.expired.set(self.expired.get());
        child
    }

    /// Poll the budget. Cheap except on every 1024th call.
    pub fn expired(&self) -> bool {
        if self.expired.get() {
            return true;
        }
        let polls = self.polls.get();
        self.polls.set(polls.wrapping_add(1));
        if polls & POLL_MASK == 0 && Instant::now() >= self.deadline {
            tracing::debug!("time budget expired after {} polls", polls);
            self.expired.set(true);
        }
        self.expired.get()
    }

    /// Poll the budget, turning expiry into the [`Expired`] unwind signal.
    ///
    /// # Errors
    ///
    /// Returns [`Expired`] once the deadline has passed.
    pub fn check(&self) -> Result<(), Expired> {
        if self.expired() { Err(Expired) } else { Ok(()) }
    }

    /// Whether expiry has already been observed, without polling.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.expired.get()
    }

    /// The instant after which polls report expiry.
    #[must_use]
    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left until the deadline, zero once it has passed.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }
}

/// Result of a bounded search: the best value found and whether the
/// deadline cut the search short.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct SearchOutcome<T> {
    /// Best value found, complete or not.
    pub value: T,
    /// Set when the shared deadline stopped the search early.
    pub timed_out: bool,
}

impl<T> SearchOutcome<T> {
    /// A search that ran to completion.
    pub const fn complete(value: T) -> Self {
        Self {
            value,
            timed_out: false,
        }
    }

    /// A search stopped by its deadline.
    pub const fn cut_short(value: T) -> Self {
        Self {
            value,
            timed_out: true,
        }
    }

    /// Transform the value, keeping the timeout flag.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SearchOutcome<U> {
        SearchOutcome {
            value: f(self.value),
            timed_out: self.timed_out,
        }
    }

    /// Drop the timeout flag.
    pub fn into_value(self) -> T {
        self.value
    }
}
