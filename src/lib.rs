//! guessword is the core of a timed word-guessing game.
//!
//! A round shows the player a word; they either get it ([`RoundController::mark_correct`], +1) or pass
//! ([`RoundController::skip`], -1), and either way a new word is dealt from a [`WordDeck`]. A countdown runs the whole
//! time. When it hits zero the round's `finished` flag goes up, and the UI hands the score over to a [`ScoreSummary`],
//! which can ask for another round.
//!
//! There's no UI in here. Everything the UI cares about is an observable field, with `on_*` methods to subscribe, and
//! the edge-triggered flags (`finished`, `play_again`) have to be acknowledged by the UI after it reacts.
//!
//! # Time
//!
//! Nothing runs in the background. Each round owns a cancellable [`Ticker`]; the host calls
//! [`RoundController::update`] from its own loop, and all the ticks that have come due are applied right there, one
//! at a time. Hosts with their own clock can call [`RoundController::tick`] directly instead.
//!
//! # Logging
//!
//! Components take an `Arc<dyn `[`Sink`]`>` rather than logging globally. [`TracingSink`] forwards to `tracing`.

pub mod config;
pub mod constants;
pub mod deck;
mod error;
pub mod observe;
pub mod round;
pub mod sink;
pub mod summary;
pub mod timing;
mod util;

pub use {
    config::RoundConfig,
    deck::WordDeck,
    error::{Error, Result},
    observe::{Observable, ObserverId},
    round::{format_elapsed, RoundController, RoundState},
    sink::{MemorySink, Sink, TracingSink},
    summary::ScoreSummary,
    timing::{CancelToken, Ticker, Timer},
};
