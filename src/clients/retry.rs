//! Retry policy for transient request failures.
//!
//! A [`RetryPolicy`] is purely advisory: it answers "should this attempt be
//! retried, and after how long?" for a transport that owns the attempt loop.
//! The three knobs (budget, delay, predicate) are independent of each other.
//!
//! # Defaults
//!
//! - 9 retries after the initial attempt (10 tries in total)
//! - Exponential backoff: `min(2^attempt * 1s, 40s)`
//! - Retry on network failure or a `500`, `502`, `503` or `504` response
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use gql_request::{RetryDelay, RetryOn, RetryPolicy};
//!
//! let policy = RetryPolicy::default()
//!     .with_retries(2)
//!     .with_retry_delay(RetryDelay::Fixed(Duration::from_millis(250)))
//!     .with_retry_on(RetryOn::Statuses(vec![502, 503]));
//!
//! assert_eq!(policy.retries(), 2);
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::errors::HttpError;
use crate::clients::http_response::HttpResponse;

/// Default number of retries after the initial attempt.
pub const DEFAULT_RETRIES: u32 = 9;

/// Initial backoff delay in milliseconds.
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 1_000;

/// Upper bound for the backoff delay in milliseconds.
pub const DEFAULT_MAX_DELAY_MS: u64 = 40_000;

/// Response status codes retried by default.
pub const DEFAULT_RETRY_STATUSES: [u16; 4] = [500, 502, 503, 504];

/// Callback deciding whether to retry, given the 0-based attempt index and
/// the outcome of that attempt.
pub type RetryPredicate =
    Arc<dyn Fn(u32, Option<&HttpError>, Option<&HttpResponse>) -> bool + Send + Sync>;

/// Callback computing the wait before the next attempt.
pub type RetryDelayFn =
    Arc<dyn Fn(u32, Option<&HttpError>, Option<&HttpResponse>) -> Duration + Send + Sync>;

/// How long to wait before the next attempt.
#[derive(Clone)]
pub enum RetryDelay {
    /// Exponential backoff: `min(initial * 2^attempt, max)`.
    Backoff {
        /// Delay before the first retry.
        initial: Duration,
        /// Cap applied to every delay.
        max: Duration,
    },
    /// The same delay before every retry.
    Fixed(Duration),
    /// A caller-supplied delay function.
    Custom(RetryDelayFn),
}

impl RetryDelay {
    /// Builds a [`RetryDelay::Custom`] from a closure.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(u32, Option<&HttpError>, Option<&HttpResponse>) -> Duration + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Returns the delay to wait after the given 0-based attempt.
    #[must_use]
    pub fn delay_for(
        &self,
        attempt: u32,
        error: Option<&HttpError>,
        response: Option<&HttpResponse>,
    ) -> Duration {
        match self {
            Self::Backoff { initial, max } => initial
                .saturating_mul(2_u32.saturating_pow(attempt))
                .min(*max),
            Self::Fixed(delay) => *delay,
            Self::Custom(f) => f(attempt, error, response),
        }
    }
}

impl Default for RetryDelay {
    fn default() -> Self {
        Self::Backoff {
            initial: Duration::from_millis(DEFAULT_INITIAL_DELAY_MS),
            max: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
        }
    }
}

impl fmt::Debug for RetryDelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backoff { initial, max } => f
                .debug_struct("Backoff")
                .field("initial", initial)
                .field("max", max)
                .finish(),
            Self::Fixed(delay) => f.debug_tuple("Fixed").field(delay).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Which outcomes are worth another attempt.
#[derive(Clone)]
pub enum RetryOn {
    /// Retry network failures and responses with one of these status codes.
    Statuses(Vec<u16>),
    /// A caller-supplied predicate.
    Custom(RetryPredicate),
}

impl RetryOn {
    /// Builds a [`RetryOn::Custom`] from a closure.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(u32, Option<&HttpError>, Option<&HttpResponse>) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    fn matches(
        &self,
        attempt: u32,
        error: Option<&HttpError>,
        response: Option<&HttpResponse>,
    ) -> bool {
        match self {
            Self::Statuses(statuses) => {
                response.map_or(true, |response| statuses.contains(&response.status))
            }
            Self::Custom(f) => f(attempt, error, response),
        }
    }
}

impl Default for RetryOn {
    fn default() -> Self {
        Self::Statuses(DEFAULT_RETRY_STATUSES.to_vec())
    }
}

impl fmt::Debug for RetryOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Statuses(statuses) => f.debug_tuple("Statuses").field(statuses).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Retry budget, delay and predicate for one request.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    retries: u32,
    retry_delay: RetryDelay,
    retry_on: RetryOn,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            retry_delay: RetryDelay::default(),
            retry_on: RetryOn::default(),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self::default().with_retries(0)
    }

    /// Sets the number of retries after the initial attempt. `0` disables retry.
    #[must_use]
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Sets the delay strategy.
    #[must_use]
    pub fn with_retry_delay(mut self, retry_delay: RetryDelay) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Sets the retry predicate.
    #[must_use]
    pub fn with_retry_on(mut self, retry_on: RetryOn) -> Self {
        self.retry_on = retry_on;
        self
    }

    /// Returns the retry budget.
    #[must_use]
    pub const fn retries(&self) -> u32 {
        self.retries
    }

    /// Returns the delay strategy.
    #[must_use]
    pub const fn retry_delay(&self) -> &RetryDelay {
        &self.retry_delay
    }

    /// Returns the retry predicate.
    #[must_use]
    pub const fn retry_on(&self) -> &RetryOn {
        &self.retry_on
    }

    /// Decides whether the given 0-based attempt should be followed by another.
    ///
    /// The budget caps retries even when a custom predicate would keep going.
    #[must_use]
    pub fn should_retry(
        &self,
        attempt: u32,
        error: Option<&HttpError>,
        response: Option<&HttpResponse>,
    ) -> bool {
        attempt < self.retries && self.retry_on.matches(attempt, error, response)
    }

    /// Returns the delay before the next attempt, or `None` when the
    /// outcome of `attempt` is final.
    #[must_use]
    pub fn next_delay(
        &self,
        attempt: u32,
        error: Option<&HttpError>,
        response: Option<&HttpResponse>,
    ) -> Option<Duration> {
        self.should_retry(attempt, error, response)
            .then(|| self.retry_delay.delay_for(attempt, error, response))
    }
}
