//! The end-of-round screen's state: the final score and whether the player wants another go.

use core::fmt;
use std::sync::Arc;

use crate::{
    observe::{Observable, ObserverId},
    sink::Sink,
    util::abbrev_debug,
};

/// The result of a finished round.
///
/// The final score is fixed at construction. The `play_again` flag is edge-triggered like
/// [`RoundController`](crate::RoundController)'s `finished` flag: the player raises it, and the UI lowers it with
/// [`Self::acknowledge_play_again`] once it has started the next round.
pub struct ScoreSummary {
    final_score: i64,
    play_again: Observable<bool>,
    sink: Arc<dyn Sink>,
}

abbrev_debug! {
    ScoreSummary;
    write final_score,
    write play_again,
    ignore sink,
}

impl ScoreSummary {
    pub fn new(final_score: i64, sink: Arc<dyn Sink>) -> Self {
        sink.info(&format!("final score is {}", final_score));
        Self {
            final_score,
            play_again: Observable::new(false),
            sink,
        }
    }

    pub fn final_score(&self) -> i64 {
        self.final_score
    }

    pub fn play_again_requested(&self) -> bool {
        *self.play_again.get()
    }

    /// The player asked for another round.
    pub fn request_play_again(&mut self) {
        self.sink.debug("play again requested");
        self.play_again.set(true);
    }

    /// Lower the `play_again` flag once the UI has acted on it.
    pub fn acknowledge_play_again(&mut self) {
        self.play_again.set(false);
    }

    pub fn on_play_again(&mut self, mut f: impl FnMut(bool) + Send + 'static) -> ObserverId {
        self.play_again.subscribe(move |&again| f(again))
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.play_again.unsubscribe(id)
    }
}
