//! Request-scoped deadline threaded through every provider call.

use std::time::{Duration, Instant};

/// An absolute point in time after which work should stop. `None` = unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    pub fn none() -> Self {
        Self { at: None }
    }

    pub fn after(timeout: Duration) -> Self {
        Self {
            at: Some(Instant::now() + timeout),
        }
    }

    pub fn at(instant: Instant) -> Self {
        Self { at: Some(instant) }
    }

    /// Time left, `None` when unbounded. Saturates at zero.
    pub fn remaining(&self) -> Option<Duration> {
        self.at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_some_and(|r| r.is_zero())
    }

    /// Whether waiting `wait` would run past the deadline.
    pub fn would_exceed(&self, wait: Duration) -> bool {
        self.remaining().is_some_and(|r| wait >= r)
    }
}

/// Per-request call context: the overall deadline plus the per-call timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub deadline: Deadline,
    pub call_timeout: Duration,
}

impl CallContext {
    pub fn new(deadline: Deadline, call_timeout: Duration) -> Self {
        Self {
            deadline,
            call_timeout,
        }
    }

    /// Unbounded request with the given per-call timeout.
    pub fn unbounded(call_timeout: Duration) -> Self {
        Self::new(Deadline::none(), call_timeout)
    }

    /// Timeout for the next provider call: the per-call timeout, shortened to
    /// whatever is left of the request deadline.
    pub fn effective_timeout(&self) -> Duration {
        match self.deadline.remaining() {
            Some(remaining) => remaining.min(self.call_timeout),
            None => self.call_timeout,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_expired()
    }
}
