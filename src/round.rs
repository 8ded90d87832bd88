//! A single timed round: the current word, the score, and the countdown.

use core::fmt;
use std::{sync::Arc, time::Duration};

use crate::{
    observe::{Observable, ObserverId},
    sink::Sink,
    timing::{CancelToken, Ticker},
    util::abbrev_debug,
    RoundConfig, Result, ScoreSummary, WordDeck,
};

/// Where a round is in its lifecycle. `Finished` is terminal.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum RoundState {
    /// The countdown is running and the player can act.
    Running,
    /// Time's up. Nothing changes the score or the word anymore.
    Finished,
}

/// Render a number of seconds as `MM:SS`, or `H:MM:SS` once it reaches an hour.
pub fn format_elapsed(secs: u64) -> String {
    let (hours, minutes, seconds) = (secs / 3600, secs / 60 % 60, secs % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Runs one round of the game.
///
/// On creation the deck is reshuffled, the first word is dealt, and the countdown starts. From then on:
///
/// - [`Self::mark_correct`] and [`Self::skip`] move the score up or down by one and deal a new word.
/// - Each countdown tick, delivered through [`Self::update`] or [`Self::tick`], takes one tick's worth of seconds off
///   the remaining time. When it hits zero the round finishes and the `finished` flag goes up.
///
/// The `finished` flag is edge-triggered: it stays up until the UI calls [`Self::acknowledge_finished`], so it can
/// react exactly once.
///
/// The countdown belongs to the controller. [`Self::dispose`] cancels it, and so does dropping the controller, so a
/// stale countdown can never tick a round that's gone.
pub struct RoundController {
    config: RoundConfig,
    deck: WordDeck,
    state: RoundState,
    word: Observable<String>,
    score: Observable<i64>,
    remaining: Observable<u64>,
    finished: Observable<bool>,
    ticker: Ticker,
    disposed: bool,
    sink: Arc<dyn Sink>,
}

abbrev_debug! {
    RoundController;
    write state,
    write word,
    write score,
    write remaining,
    write finished,
    write disposed,
    ignore deck,
    ignore ticker,
    ignore sink,
}

impl RoundController {
    /// Start a default round: 10 seconds, ticking every second, over the default word list.
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self::start(RoundConfig::default(), WordDeck::new(), sink)
    }

    /// Start a round with custom pacing and a deck of your choice.
    pub fn with_config(config: RoundConfig, deck: WordDeck, sink: Arc<dyn Sink>) -> Result<Self> {
        config.validate()?;
        Ok(Self::start(config, deck, sink))
    }

    fn start(config: RoundConfig, mut deck: WordDeck, sink: Arc<dyn Sink>) -> Self {
        sink.info("round created");
        deck.reset();
        let word = deck.draw();
        Self {
            config,
            deck,
            state: RoundState::Running,
            word: Observable::new(word),
            score: Observable::new(0),
            remaining: Observable::new(config.countdown_secs),
            finished: Observable::new(false),
            ticker: Ticker::start(config.period()),
            disposed: false,
            sink,
        }
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    /// The word the player is currently guessing.
    pub fn word(&self) -> &str {
        self.word.get()
    }

    pub fn score(&self) -> i64 {
        *self.score.get()
    }

    /// Seconds left on the countdown.
    pub fn remaining_time(&self) -> u64 {
        *self.remaining.get()
    }

    /// Seconds left on the countdown, as `MM:SS`.
    pub fn remaining_time_text(&self) -> String {
        format_elapsed(self.remaining_time())
    }

    /// Whether the `finished` flag is currently up. See [`Self::acknowledge_finished`].
    pub fn is_finished(&self) -> bool {
        *self.finished.get()
    }

    fn is_live(&self) -> bool {
        self.state == RoundState::Running && !self.disposed
    }

    /// Apply one countdown tick. Does nothing once the round has finished or been disposed.
    ///
    /// This is for hosts that run their own clock. Hosts that don't should call [`Self::update`] instead; doing both
    /// will count down twice as fast.
    pub fn tick(&mut self) {
        if !self.is_live() {
            return;
        }
        let left = self.remaining_time().saturating_sub(self.config.tick_secs);
        self.remaining.set(left);
        if left == 0 {
            self.state = RoundState::Finished;
            self.ticker.cancel();
            self.sink
                .info(&format!("round finished with score {}", self.score()));
            self.finished.set(true);
        }
    }

    /// Apply every tick that has come due on the round's own countdown since the last update.
    ///
    /// Returns how many ticks were applied. Ticks are applied one at a time, in order, and stop as soon as the round
    /// finishes.
    pub fn update(&mut self) -> u32 {
        let due = self.ticker.poll();
        let mut applied = 0;
        for _ in 0..due {
            if !self.is_live() {
                break;
            }
            self.tick();
            applied += 1;
        }
        applied
    }

    /// How long until the round's own countdown ticks next, or `None` if it never will.
    pub fn next_tick_in(&self) -> Option<Duration> {
        self.ticker.remaining()
    }

    /// A handle that can stop the countdown from elsewhere.
    pub fn clock_token(&self) -> CancelToken {
        self.ticker.token()
    }

    fn deal(&mut self) {
        if self.deck.remaining() == 0 {
            self.sink.debug("deck ran out, reshuffling");
        }
        let word = self.deck.draw();
        self.word.set(word);
    }

    fn score_and_deal(&mut self, delta: i64, action: &str) -> bool {
        if !self.is_live() {
            self.sink
                .debug(&format!("{} ignored: round is no longer running", action));
            return false;
        }
        self.score.set(self.score().saturating_add(delta));
        self.deal();
        true
    }

    /// The player skipped the word: lose a point and move on.
    ///
    /// Returns whether it took effect, i.e. false once the round has finished or been disposed.
    pub fn skip(&mut self) -> bool {
        self.score_and_deal(-1, "skip")
    }

    /// The player got the word: gain a point and move on.
    ///
    /// Returns whether it took effect, i.e. false once the round has finished or been disposed.
    pub fn mark_correct(&mut self) -> bool {
        self.score_and_deal(1, "correct")
    }

    /// Lower the `finished` flag once the UI has reacted to it.
    pub fn acknowledge_finished(&mut self) {
        self.finished.set(false);
    }

    /// Cancel the countdown for good. Safe to call any number of times, including after the round has finished.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.ticker.cancel();
        self.sink.debug("countdown disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Wrap a finished round up, handing its score to a new summary. The countdown is disposed along the way.
    ///
    /// A round that's still running is handed back untouched.
    pub fn into_summary(self) -> core::result::Result<ScoreSummary, Self> {
        if self.state != RoundState::Finished {
            return Err(self);
        }
        Ok(ScoreSummary::new(self.score(), Arc::clone(&self.sink)))
    }

    pub fn on_word(&mut self, mut f: impl FnMut(&str) + Send + 'static) -> ObserverId {
        self.word.subscribe(move |w: &String| f(w))
    }

    pub fn on_score(&mut self, mut f: impl FnMut(i64) + Send + 'static) -> ObserverId {
        self.score.subscribe(move |&s| f(s))
    }

    pub fn on_remaining_time(&mut self, mut f: impl FnMut(u64) + Send + 'static) -> ObserverId {
        self.remaining.subscribe(move |&t| f(t))
    }

    /// Like [`Self::on_remaining_time`], but pre-formatted with [`format_elapsed`].
    pub fn on_remaining_time_text(&mut self, mut f: impl FnMut(&str) + Send + 'static) -> ObserverId {
        self.remaining.subscribe(move |&t| f(&format_elapsed(t)))
    }

    /// Observe the edge-triggered `finished` flag.
    pub fn on_finished(&mut self, mut f: impl FnMut(bool) + Send + 'static) -> ObserverId {
        self.finished.subscribe(move |&done| f(done))
    }

    /// Remove an observer added by any of the `on_*` methods. Returns whether it was found.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.word.unsubscribe(id)
            || self.score.unsubscribe(id)
            || self.remaining.unsubscribe(id)
            || self.finished.unsubscribe(id)
    }
}

impl Drop for RoundController {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod round_test {
    use std::sync::Mutex;

    use mock_instant::MockClock;
    use tracing::Level;

    use super::*;
    use crate::{constants::gameplay::WORDS, sink::MemorySink, Error};

    fn round() -> (RoundController, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let round = RoundController::with_config(RoundConfig::default(), WordDeck::seeded(11), sink.clone())
            .expect("default config is valid");
        (round, sink)
    }

    fn collect<T: Send + 'static>() -> (Arc<Mutex<Vec<T>>>, Arc<Mutex<Vec<T>>>) {
        let seen = Arc::new(Mutex::new(vec![]));
        (Arc::clone(&seen), seen)
    }

    #[test]
    fn format_elapsed_minutes_and_hours() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(10), "00:10");
        assert_eq!(format_elapsed(75), "01:15");
        assert_eq!(format_elapsed(3599), "59:59");
        assert_eq!(format_elapsed(3600), "1:00:00");
        assert_eq!(format_elapsed(3725), "1:02:05");
    }

    #[test]
    fn starts_running_with_fresh_state() {
        let (round, sink) = round();
        assert_eq!(round.state(), RoundState::Running);
        assert_eq!(round.score(), 0);
        assert!(!round.is_finished());
        assert_eq!(round.remaining_time(), 10);
        assert_eq!(round.remaining_time_text(), "00:10");
        assert!(!round.word().is_empty());
        assert!(WORDS.contains(&round.word()));
        assert_eq!(sink.messages(Level::INFO), vec!["round created".to_owned()]);
    }

    #[test]
    fn ten_ticks_count_down_and_finish_on_the_last() {
        let (mut round, _sink) = round();
        for expected in (0..10).rev() {
            assert!(!round.is_finished());
            round.tick();
            assert_eq!(round.remaining_time(), expected);
        }
        assert!(round.is_finished());
        assert_eq!(round.state(), RoundState::Finished);
        round.tick();
        assert_eq!(round.remaining_time(), 0);
        assert!(round.is_finished());
        round.acknowledge_finished();
        assert!(!round.is_finished());
        assert_eq!(round.state(), RoundState::Finished);
    }

    #[test]
    fn finished_flag_is_edge_triggered() {
        let (mut round, _sink) = round();
        let (seen, inner) = collect();
        round.on_finished(move |done| inner.lock().unwrap().push(done));
        for _ in 0..15 {
            round.tick();
        }
        round.acknowledge_finished();
        assert_eq!(*seen.lock().unwrap(), vec![false, true, false]);
    }

    #[test]
    fn remaining_reaches_zero_before_finish_is_announced() {
        let (mut round, _sink) = round();
        let (seen, inner) = collect();
        let times = Arc::clone(&inner);
        round.on_remaining_time(move |t| times.lock().unwrap().push(format!("t{}", t)));
        round.on_finished(move |done| inner.lock().unwrap().push(format!("f{}", done)));
        seen.lock().unwrap().clear();
        for _ in 0..10 {
            round.tick();
        }
        let seen = seen.lock().unwrap();
        assert_eq!(&seen[seen.len() - 2..], &["t0".to_owned(), "ftrue".to_owned()]);
    }

    #[test]
    fn remaining_text_observer_gets_formatted_time() {
        let (mut round, _sink) = round();
        let (seen, inner) = collect();
        round.on_remaining_time_text(move |t| inner.lock().unwrap().push(t.to_owned()));
        round.tick();
        round.tick();
        assert_eq!(*seen.lock().unwrap(), vec!["00:10", "00:09", "00:08"]);
    }

    #[test]
    fn correct_scores_up_and_deals() {
        let (mut round, _sink) = round();
        let first = round.word().to_owned();
        assert!(round.mark_correct());
        assert_eq!(round.score(), 1);
        assert_ne!(round.word(), first);
        assert!(WORDS.contains(&round.word()));
    }

    #[test]
    fn skip_scores_down_below_zero() {
        let (mut round, _sink) = round();
        let first = round.word().to_owned();
        assert!(round.skip());
        assert_ne!(round.word(), first);
        round.skip();
        round.skip();
        assert_eq!(round.score(), -3);
    }

    #[test]
    fn word_and_score_observers_follow_actions() {
        let (mut round, _sink) = round();
        let (words, word_inner) = collect();
        let (scores, score_inner) = collect();
        round.on_word(move |w| word_inner.lock().unwrap().push(w.to_owned()));
        round.on_score(move |s| score_inner.lock().unwrap().push(s));
        round.mark_correct();
        round.skip();
        round.skip();
        assert_eq!(*scores.lock().unwrap(), vec![0, 1, 0, -1]);
        let words = words.lock().unwrap();
        assert_eq!(words.len(), 4);
        assert_eq!(words.last().map(String::as_str), Some(round.word()));
    }

    #[test]
    fn deck_reshuffles_mid_round() {
        let (mut round, sink) = round();
        for _ in 0..25 {
            round.mark_correct();
            assert!(WORDS.contains(&round.word()));
        }
        assert_eq!(round.score(), 25);
        assert_eq!(sink.messages(Level::DEBUG), vec!["deck ran out, reshuffling".to_owned()]);
    }

    #[test]
    fn actions_after_finish_are_ignored() {
        let (mut round, _sink) = round();
        round.mark_correct();
        for _ in 0..10 {
            round.tick();
        }
        let word = round.word().to_owned();
        assert!(!round.mark_correct());
        assert!(!round.skip());
        assert_eq!(round.score(), 1);
        assert_eq!(round.word(), word);
    }

    #[test]
    fn dispose_twice_is_fine_and_stops_ticks() {
        let (mut round, sink) = round();
        round.dispose();
        round.dispose();
        assert!(round.is_disposed());
        assert!(round.clock_token().is_cancelled());
        round.tick();
        assert_eq!(round.remaining_time(), 10);
        MockClock::advance(Duration::from_secs(5));
        assert_eq!(round.update(), 0);
        assert_eq!(round.remaining_time(), 10);
        assert_eq!(round.next_tick_in(), None);
        assert_eq!(sink.messages(Level::DEBUG), vec!["countdown disposed".to_owned()]);
    }

    #[test]
    fn dispose_after_finish_is_fine() {
        let (mut round, _sink) = round();
        for _ in 0..10 {
            round.tick();
        }
        round.dispose();
        round.dispose();
        assert!(round.is_finished());
    }

    #[test]
    fn drop_cancels_countdown() {
        let (round, _sink) = round();
        let token = round.clock_token();
        assert!(!token.is_cancelled());
        drop(round);
        assert!(token.is_cancelled());
    }

    #[test]
    fn update_applies_due_ticks() {
        let (mut round, sink) = round();
        assert_eq!(round.update(), 0);
        assert_eq!(round.next_tick_in(), Some(Duration::from_secs(1)));
        MockClock::advance(Duration::from_secs(3));
        assert_eq!(round.update(), 3);
        assert_eq!(round.remaining_time(), 7);
        MockClock::advance(Duration::from_secs(20));
        assert_eq!(round.update(), 7);
        assert!(round.is_finished());
        assert_eq!(round.next_tick_in(), None);
        MockClock::advance(Duration::from_secs(5));
        assert_eq!(round.update(), 0);
        assert!(sink
            .messages(Level::INFO)
            .contains(&"round finished with score 0".to_owned()));
    }

    #[test]
    fn custom_pacing_counts_down_by_tick() {
        let cfg = RoundConfig::default().countdown(6).tick(2);
        let mut round =
            RoundController::with_config(cfg, WordDeck::seeded(12), Arc::new(MemorySink::new())).unwrap();
        assert_eq!(round.remaining_time(), 6);
        round.tick();
        assert_eq!(round.remaining_time(), 4);
        round.tick();
        assert!(!round.is_finished());
        round.tick();
        assert_eq!(round.remaining_time(), 0);
        assert!(round.is_finished());
    }

    #[test]
    fn invalid_pacing_rejected() {
        let cfg = RoundConfig::default().tick(0);
        let res = RoundController::with_config(cfg, WordDeck::seeded(13), Arc::new(MemorySink::new()));
        assert!(matches!(res, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn unsubscribe_finds_any_field() {
        let (mut round, _sink) = round();
        let (seen, inner) = collect();
        let id = round.on_finished(move |done| inner.lock().unwrap().push(done));
        assert!(round.unsubscribe(id));
        assert!(!round.unsubscribe(id));
        for _ in 0..10 {
            round.tick();
        }
        assert_eq!(*seen.lock().unwrap(), vec![false]);
    }

    #[test]
    fn into_summary_hands_over_score() {
        let (mut round, sink) = round();
        round.mark_correct();
        round.mark_correct();
        round.skip();
        for _ in 0..10 {
            round.tick();
        }
        let token = round.clock_token();
        let summary = round.into_summary().expect("round is finished");
        assert_eq!(summary.final_score(), 1);
        assert!(token.is_cancelled());
        assert!(sink.messages(Level::INFO).contains(&"final score is 1".to_owned()));
    }

    #[test]
    fn into_summary_refuses_running_round() {
        let (mut round, sink) = round();
        round.mark_correct();
        let mut round = round.into_summary().expect_err("round is still running");
        assert_eq!(round.state(), RoundState::Running);
        assert!(!round.is_disposed());
        assert!(round.mark_correct());
        assert_eq!(round.score(), 2);
        assert!(!sink.messages(Level::INFO).iter().any(|m| m.starts_with("final score")));
    }
}
