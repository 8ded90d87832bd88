use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// A [`RoundConfig`](crate::RoundConfig) describes a countdown that can't be run.
    #[error("invalid round config: {0}")]
    InvalidConfig(String),
    /// A [`WordDeck`](crate::WordDeck) was given no words to deal.
    #[error("a word deck needs at least one word")]
    EmptyWordList,
    /// An `io::Error` occurred, e.g. while driving the terminal.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
