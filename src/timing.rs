//! Helper types around controlling the timing of the countdown.

use core::fmt;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

#[cfg(test)]
use mock_instant::Instant;
#[cfg(not(test))]
use std::time::Instant;

/// A shared "stop now" flag for a scheduled task.
///
/// Every clone refers to the same flag. Cancelling is one-way and can be done as many times as you like.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a new, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the task this token guards.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Check whether [`Self::cancel`] has been called on this token (or any clone) yet.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl PartialEq for CancelToken {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for CancelToken {}
impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CancelToken({})", self.is_cancelled())
    }
}

/// Keeps track of time between steady pulses.
///
/// The first pulse is one period after creation. Pulses stay lined up with that first one no matter how irregularly
/// the timer is checked: checking late reports every pulse that was missed, rather than skipping ahead.
#[derive(Debug)]
pub struct Timer {
    next: Instant,
    period: Duration,
}

impl Timer {
    /// Create a new timer with the given period.
    pub fn new(period: Duration) -> Self {
        Self {
            next: Instant::now() + period,
            period,
        }
    }

    /// How long one pulse is.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// How much time is left before the next pulse. Minimum zero.
    pub fn remaining(&self) -> Duration {
        let now = Instant::now();
        if self.next > now {
            self.next.duration_since(now)
        } else {
            Duration::ZERO
        }
    }

    /// Count the pulses that have come due since the last call, and move on past them.
    ///
    /// A zero-length period never pulses.
    pub fn due(&mut self) -> u32 {
        if self.period.is_zero() {
            return 0;
        }
        let now = Instant::now();
        let mut count = 0;
        while now >= self.next {
            self.next = self.next + self.period;
            count += 1;
        }
        count
    }
}

/// A periodic task that can be cancelled: a [`Timer`] guarded by a [`CancelToken`].
///
/// Nothing runs in the background. Whoever owns the ticker polls it, and it reports how many ticks are owed. Once the
/// token is cancelled, from here or from any clone, it never reports another tick.
#[derive(Debug)]
pub struct Ticker {
    timer: Timer,
    token: CancelToken,
}

impl Ticker {
    /// Schedule a new ticker, first firing one `period` from now.
    pub fn start(period: Duration) -> Self {
        Self {
            timer: Timer::new(period),
            token: CancelToken::new(),
        }
    }

    /// How many ticks have come due since the last poll. Always 0 once cancelled.
    pub fn poll(&mut self) -> u32 {
        if self.token.is_cancelled() {
            0
        } else {
            self.timer.due()
        }
    }

    /// Time until the next tick, or `None` if it'll never tick again.
    pub fn remaining(&self) -> Option<Duration> {
        if self.token.is_cancelled() {
            None
        } else {
            Some(self.timer.remaining())
        }
    }

    /// Stop ticking. Safe to call repeatedly.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A handle which can cancel this ticker from elsewhere.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }
}
