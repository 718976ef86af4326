//! Terminal runner (default binary).
//!
//! Wires crossterm input, the fixed-cadence driver and the framebuffer
//! renderer around one game session.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use gridfall::core::{GameConfig, GameSession, GameSnapshot, UniformPieces};
use gridfall::driver::{FrameClock, GameDriver};
use gridfall::input::{handle_key_event, should_quit};
use gridfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use gridfall::types::{BOARD_HEIGHT, BOARD_WIDTH, TICK_INTERVAL_MS};

/// Upper bound on how long we wait for input before redrawing.
const FRAME_MS: u64 = 16;

#[derive(Parser, Debug)]
#[command(name = "gridfall", about = "Falling-block puzzle in the terminal")]
struct Args {
    /// Board width in columns.
    #[arg(long, default_value_t = BOARD_WIDTH)]
    width: u16,

    /// Board height in rows.
    #[arg(long, default_value_t = BOARD_HEIGHT)]
    height: u16,

    /// Gravity interval in milliseconds.
    #[arg(long, default_value_t = TICK_INTERVAL_MS)]
    interval_ms: u32,

    /// Piece RNG seed. If omitted, the system clock is used.
    #[arg(long)]
    seed: Option<u32>,
}

/// Final scores of every game that ended during the run.
struct Outcome {
    finished: Vec<u32>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = GameConfig {
        tick_interval_ms: args.interval_ms,
        ..GameConfig::with_board(args.width, args.height)
    };
    let seed = args.seed.unwrap_or_else(clock_seed);
    let session = GameSession::with_source(config, UniformPieces::new(seed))
        .context("invalid game configuration")?;
    let mut driver = GameDriver::new(session);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut driver);

    // Always try to restore terminal state.
    if let Err(e) = term.exit() {
        eprintln!("[gridfall] failed to restore terminal: {e:#}");
    }

    let outcome = result?;
    for (i, score) in outcome.finished.iter().enumerate() {
        println!("Game {} over! Score: {score}", i + 1);
    }
    if driver.session().is_falling() {
        println!("Unfinished game. Score: {}", driver.session().score());
    }
    Ok(())
}

fn run(term: &mut TerminalRenderer, driver: &mut GameDriver<UniformPieces>) -> Result<Outcome> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut finished = Vec::new();

    let mut clock = FrameClock::new(Instant::now());
    let frame = Duration::from_millis(FRAME_MS);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        driver.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until the next frame or gravity step.
        let until_tick = driver
            .time_to_next_tick()
            .map_or(frame, |ms| Duration::from_millis(ms as u64).min(frame));
        let timeout = until_tick
            .checked_sub(clock.since_last(Instant::now()))
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(Outcome { finished });
                    }
                    if let Some(action) = handle_key_event(key) {
                        driver.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity.
        driver.advance(clock.take_elapsed_ms(Instant::now()));

        // Game-over notification fires once per game.
        if let Some(event) = driver.session_mut().take_last_event() {
            if event.game_over {
                finished.push(event.score);
            }
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
