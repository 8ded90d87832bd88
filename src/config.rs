//! How a round is paced.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    constants::gameplay::{COUNTDOWN_SECS, TICK_SECS},
    util::setters,
    Error, Result,
};

/// The pacing of a single round: how long it lasts, and how often the countdown ticks.
///
/// Both are whole seconds, and the countdown has to be a whole number of ticks, so the remaining time always lands
/// exactly on zero.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Total length of the round, in seconds.
    pub countdown_secs: u64,
    /// Length of one tick, in seconds.
    pub tick_secs: u64,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            countdown_secs: COUNTDOWN_SECS,
            tick_secs: TICK_SECS,
        }
    }
}

impl RoundConfig {
    setters! {
        /// Set the round length, in seconds.
        countdown(secs: u64) => countdown_secs,
        /// Set the tick length, in seconds.
        tick(secs: u64) => tick_secs,
    }

    /// Check that this config describes a round that can actually count down to zero.
    pub fn validate(&self) -> Result<()> {
        if self.tick_secs == 0 {
            return Err(Error::InvalidConfig("tick length must be non-zero".into()));
        }
        if self.countdown_secs == 0 {
            return Err(Error::InvalidConfig("countdown must be non-zero".into()));
        }
        if self.countdown_secs % self.tick_secs != 0 {
            return Err(Error::InvalidConfig(format!(
                "countdown of {}s is not a whole number of {}s ticks",
                self.countdown_secs, self.tick_secs
            )));
        }
        Ok(())
    }

    /// The tick period as a [`Duration`], for scheduling.
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.tick_secs)
    }

    /// How many ticks it takes to run the whole countdown.
    pub fn ticks(&self) -> u64 {
        self.countdown_secs / self.tick_secs
    }
}
