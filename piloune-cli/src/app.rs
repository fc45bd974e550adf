//! The single-threaded event loop. Key presses and the decay/autosave
//! timers share one dispatch thread, so state mutation never interleaves.

use anyhow::Result;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use piloune_game::{PilouneEngine, SaveStorage, SystemClock};
use std::io::stdout;
use std::time::{Duration, Instant};

use crate::input::{self, Command, KonamiTracker};
use crate::render;

const POLL_TIMEOUT: Duration = Duration::from_millis(200);

/// A fixed-period task. The loop owns one per recurring side effect and
/// asks each whether its period elapsed.
pub struct Ticker {
    period: Duration,
    next: Instant,
}

impl Ticker {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next: now + period,
        }
    }

    /// True when the deadline passed; advances to the next one.
    pub fn due(&mut self, now: Instant) -> bool {
        if now >= self.next {
            self.next += self.period;
            true
        } else {
            false
        }
    }
}

pub fn run<S: SaveStorage>(
    mut engine: PilouneEngine<S, SystemClock>,
    decay_secs: u64,
    autosave_secs: u64,
) -> Result<()> {
    terminal::enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, Hide)?;

    let result = event_loop(&mut engine, decay_secs, autosave_secs);

    execute!(stdout(), Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    // Last chance to persist, mirroring the page-unload save.
    engine.save();
    result
}

fn event_loop<S: SaveStorage>(
    engine: &mut PilouneEngine<S, SystemClock>,
    decay_secs: u64,
    autosave_secs: u64,
) -> Result<()> {
    let mut out = stdout();
    let started = Instant::now();
    let mut decay = Ticker::new(Duration::from_secs(decay_secs.max(1)), started);
    let mut autosave = Ticker::new(Duration::from_secs(autosave_secs.max(1)), started);
    let mut konami = KonamiTracker::default();
    let mut dirty = true;

    loop {
        if dirty {
            render::draw(&mut out, engine.state())?;
            dirty = false;
        }

        if event::poll(POLL_TIMEOUT)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if konami.advance(key.code) {
                    engine.secret_code();
                    engine.save();
                    dirty = true;
                    continue;
                }
                match input::map_key(key.code) {
                    Some(Command::Do(action)) => {
                        engine.perform(action);
                        engine.save();
                        dirty = true;
                    }
                    Some(Command::Reset) => {
                        engine.reset_stats();
                        engine.save();
                        dirty = true;
                    }
                    Some(Command::MaxStats) => {
                        engine.max_stats();
                        engine.save();
                        dirty = true;
                    }
                    Some(Command::Quit) => break,
                    None => {}
                }
            }
        }

        let now = Instant::now();
        if decay.due(now) {
            engine.decay_tick();
            engine.save();
            dirty = true;
        }
        if autosave.due(now) {
            engine.save();
        }
    }
    Ok(())
}
