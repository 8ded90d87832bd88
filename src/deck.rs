//! The deck of words a round deals from.

use core::fmt;
use std::collections::VecDeque;

use rand::{prelude::*, rngs::SmallRng};

use crate::{constants::gameplay::WORDS, util::abbrev_debug, Error, Result};

/// A reshufflable source of words.
///
/// Words are dealt off the front of a shuffled copy of the master list. When that runs dry, the whole list is
/// reshuffled and dealing carries on, so drawing can never fail. Each reshuffle is independent of the last one, so a
/// word can come up twice in a row across the boundary.
pub struct WordDeck {
    words: Vec<String>,
    remaining: VecDeque<String>,
    rng: SmallRng,
}

abbrev_debug! {
    WordDeck;
    write remaining,
    ignore words,
    ignore rng,
}

impl WordDeck {
    /// A deck over the default word list, seeded from system entropy.
    pub fn new() -> Self {
        Self::default_words(SmallRng::from_entropy())
    }

    /// A deck over the default word list that always deals in the same order for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self::default_words(SmallRng::seed_from_u64(seed))
    }

    fn default_words(rng: SmallRng) -> Self {
        Self {
            words: WORDS.iter().map(|&w| w.to_owned()).collect(),
            remaining: VecDeque::new(),
            rng,
        }
    }

    /// A deck over a custom word list.
    pub fn from_words(words: impl IntoIterator<Item = impl Into<String>>, rng: SmallRng) -> Result<Self> {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return Err(Error::EmptyWordList);
        }
        Ok(Self {
            words,
            remaining: VecDeque::new(),
            rng,
        })
    }

    /// Throw out whatever's left and start over from a freshly shuffled copy of the full list.
    pub fn reset(&mut self) {
        let mut words = self.words.clone();
        words.shuffle(&mut self.rng);
        self.remaining = words.into();
    }

    /// Deal the next word, reshuffling first if the deck is empty.
    pub fn draw(&mut self) -> String {
        if self.remaining.is_empty() {
            self.reset();
        }
        self.remaining
            .pop_front()
            .expect("deck was just refilled from a non-empty list")
    }

    /// How many words are left before the next reshuffle.
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// The full list this deck deals from.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl Default for WordDeck {
    fn default() -> Self {
        Self::new()
    }
}

/// Endless: every call deals a word.
impl Iterator for WordDeck {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        Some(self.draw())
    }
}
