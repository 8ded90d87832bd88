//! Plays the game in a terminal.
//!
//! `c`/Enter when you get the word, `s`/Space to skip it, `q`/Esc to quit. When time's up, `r` plays again.

use std::{
    fs::OpenOptions,
    io::Write,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing_subscriber::EnvFilter;

use guessword::{RoundController, ScoreSummary, Sink, TracingSink};

/// How long to wait for input when there's no countdown to wake up for.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Sets up raw mode and the alternate screen, and puts everything back when dropped.
struct Terminal;

impl Terminal {
    fn init_term() -> guessword::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(std::io::stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(())
    }

    fn clean_term() -> guessword::Result<()> {
        execute!(std::io::stdout(), Clear(ClearType::All), Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn new() -> guessword::Result<Self> {
        Self::init_term()?;
        std::panic::set_hook(Box::new(|i| {
            let _ = Self::clean_term();
            println!("{}", i);
        }));
        Ok(Self)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = Self::clean_term();
    }
}

enum Screen {
    Round(RoundController),
    Summary(ScoreSummary),
}

fn draw(screen: &Screen) -> guessword::Result<()> {
    let mut out = std::io::stdout();
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    match screen {
        Screen::Round(round) => {
            queue!(
                out,
                Print(format!("time {}    score {}", round.remaining_time_text(), round.score())),
                MoveTo(0, 2),
                Print(format!("    {}", round.word())),
                MoveTo(0, 4),
                Print("[c] got it   [s] skip   [q] quit"),
            )?;
        }
        Screen::Summary(summary) => {
            queue!(
                out,
                Print("time's up!"),
                MoveTo(0, 2),
                Print(format!("final score: {}", summary.final_score())),
                MoveTo(0, 4),
                Print("[r] play again   [q] quit"),
            )?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Apply one keypress. Returns whether the player asked to quit.
fn press(screen: &mut Screen, key: KeyCode) -> bool {
    match (screen, key) {
        (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => return true,
        (Screen::Round(round), KeyCode::Char('c')) | (Screen::Round(round), KeyCode::Enter) => {
            round.mark_correct();
        }
        (Screen::Round(round), KeyCode::Char('s')) | (Screen::Round(round), KeyCode::Char(' ')) => {
            round.skip();
        }
        (Screen::Summary(summary), KeyCode::Char('r')) => summary.request_play_again(),
        _ => (),
    }
    false
}

/// Move between screens when the current one's flag has gone up.
fn advance(screen: Screen, sink: &Arc<dyn Sink>) -> Screen {
    match screen {
        Screen::Round(mut round) => {
            round.update();
            if !round.is_finished() {
                return Screen::Round(round);
            }
            round.acknowledge_finished();
            match round.into_summary() {
                Ok(summary) => Screen::Summary(summary),
                Err(round) => Screen::Round(round),
            }
        }
        Screen::Summary(mut summary) => {
            if summary.play_again_requested() {
                summary.acknowledge_play_again();
                Screen::Round(RoundController::new(Arc::clone(sink)))
            } else {
                Screen::Summary(summary)
            }
        }
    }
}

fn run() -> guessword::Result<()> {
    let sink: Arc<dyn Sink> = Arc::new(TracingSink);
    let _term = Terminal::new()?;
    let mut screen = Screen::Round(RoundController::new(Arc::clone(&sink)));
    loop {
        draw(&screen)?;
        let wait = match &screen {
            Screen::Round(round) => round.next_tick_in().unwrap_or(IDLE_POLL),
            Screen::Summary(_) => IDLE_POLL,
        };
        if event::poll(wait)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && press(&mut screen, key.code) {
                    return Ok(());
                }
            }
        }
        screen = advance(screen, &sink);
    }
}

/// Where logs go. Not stderr: that's the same terminal the game is drawing on.
fn log_path() -> PathBuf {
    std::env::temp_dir().join("guessword.log")
}

fn init_logging() -> guessword::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_path())?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() {
    if let Err(e) = init_logging().and_then(|()| run()) {
        eprintln!("guessword: {}", e);
        std::process::exit(1);
    }
}
