mod audio;
mod clock;
mod config;
mod constants;
mod end_screen;
mod entities;
mod game;
mod rendering;
mod terminal_io;
mod types;

use std::collections::HashMap;
use std::io;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    style::ResetColor,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use log::{error, info};

use crate::audio::Mixer;
use crate::clock::FrameClock;
use crate::config::LaunchOptions;
use crate::game::Game;
use crate::rendering::{OutputTarget, ScreenBuffer};
use crate::terminal_io::{close_key, mouse_down, SimulatedInput, TerminalInput};

const DEMO_CLOSE_FRAME: u64 = 600;

/// Raw mode, mouse reporting and the alternate screen, undone on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> io::Result<Self> {
        // Built first so a half-finished setup is still rolled back.
        let guard = TerminalGuard;
        terminal::enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)
            .map_err(|e| { error!("Failed to prepare terminal: {}", e); e })?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, ResetColor, DisableMouseCapture, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

// Sweeps the spawn band where the first meteor appears, then closes.
fn demo_script(width: u16) -> SimulatedInput {
    let mut input = SimulatedInput::new(HashMap::new());
    for col in width / 4..=width - width / 4 {
        input.push(1, mouse_down(col, 0));
    }
    input.push(DEMO_CLOSE_FRAME, close_key());
    input
}

fn main() -> Result<()> {
    let options = LaunchOptions::parse();
    simple_logging::log_to_file(&options.log_file, options.log_level)
        .with_context(|| format!("failed to open log file {}", options.log_file))?;
    info!("Starting Meteor Game.");

    let rng = StdRng::from_entropy();

    if options.debug {
        info!("Debug mode enabled, {}x{} grid", options.width, options.height);
        let mut game = Game::new(
            OutputTarget::ScreenBuffer(ScreenBuffer::new(options.width, options.height)),
            Box::new(demo_script(options.width)),
            Mixer::muted(),
            FrameClock::unlimited(),
            (options.width, options.height),
            rng,
            options.max_frames,
        );
        game.run()?;
        if let Some(sb) = game.stdout_target.screen_buffer() {
            sb.print_to_log();
        }
        info!(
            "Debug run finished: {} frames, best score {}, {} cues, last cue {:?}",
            game.frame_count(),
            game.session().best_score(),
            game.mixer().played(),
            game.mixer().now_playing()
        );
        return Ok(());
    }

    let _guard = TerminalGuard::new().context("failed to set up the terminal")?;
    let (cols, rows) = terminal::size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
    info!("Terminal size: {}x{}", cols, rows);

    let mixer = if options.mute { Mixer::muted() } else { Mixer::new(true) };
    let mut game = Game::new(
        OutputTarget::Stdout(io::stdout()),
        Box::new(TerminalInput),
        mixer,
        FrameClock::new(options.fps),
        (cols, rows),
        rng,
        options.max_frames,
    );
    game.run()?;
    info!("Exiting application.");
    Ok(())
}
