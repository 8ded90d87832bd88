//! Various constants, for use in various places. Mostly gameplay tuning.

/// Constants with gameplay implications.
pub mod gameplay {
    /// How long a round lasts by default, in seconds.
    pub const COUNTDOWN_SECS: u64 = 10;

    /// How often the countdown ticks by default, in seconds.
    pub const TICK_SECS: u64 = 1;

    /// Every word a default deck can deal. The deck reshuffles this whole list each time it runs dry.
    pub const WORDS: [&str; 21] = [
        "queen",
        "hospital",
        "basketball",
        "cat",
        "change",
        "snail",
        "soup",
        "calendar",
        "sad",
        "desk",
        "guitar",
        "home",
        "railway",
        "zebra",
        "jelly",
        "car",
        "crow",
        "trade",
        "bag",
        "roll",
        "bubble",
    ];
}

/// The `tracing` target everything in this crate logs under.
pub const LOG_TARGET: &str = "guessword";
