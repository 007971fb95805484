use anyhow::{Context, Result};
use crossterm::terminal::{Clear, ClearType};
use rand::Rng;
use log::{debug, info};

use crate::audio::{Cue, Mixer};
use crate::clock::FrameClock;
use crate::constants::*;
use crate::end_screen::{Banner, EndChoice, EndScreen, Session};
use crate::entities::{spawn_meteor, spawn_player};
use crate::rendering::{draw_end_screen, draw_frame, present, GameGrid, OutputTarget};
use crate::terminal_io::{translate, EventSource, GameInput};
use crate::types::Rect;

/// Everything that belongs to a single run. A restart builds a fresh one.
#[derive(Debug, Clone)]
pub struct RunState {
    pub points: u32,
    pub meteor_speed: u32,
    pub spawn_interval: u32,
    pub spawn_countdown: i32,
    pub player: Rect,
    pub meteors: Vec<Rect>, // Spawn order.
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub destroyed: bool,
    pub defeated: bool,
}

impl RunState {
    pub fn new() -> Self {
        RunState {
            points: 0,
            meteor_speed: INITIAL_METEOR_SPEED,
            spawn_interval: INITIAL_SPAWN_INTERVAL,
            spawn_countdown: 0,
            player: spawn_player(),
            meteors: Vec::new(),
        }
    }

    /// Destroys the oldest meteor overlapping the pressed area, if any, and scores it.
    pub fn click(&mut self, area: Rect) -> bool {
        let Some(index) = self.meteors.iter().position(|meteor| meteor.intersects(&area)) else {
            return false;
        };
        self.meteors.remove(index);
        self.points += 1;
        if self.points % POINTS_PER_LEVEL == 0 {
            self.level_up();
        }
        true
    }

    fn level_up(&mut self) {
        self.meteor_speed = (self.meteor_speed + 1).min(MAX_METEOR_SPEED);
        self.spawn_interval = self.spawn_interval.saturating_sub(SPAWN_INTERVAL_STEP).max(MIN_SPAWN_INTERVAL);
        info!(
            "Difficulty up at {} points: speed {}, spawn interval {}",
            self.points, self.meteor_speed, self.spawn_interval
        );
    }

    pub fn spawn_check(&mut self, rng: &mut impl Rng) {
        if self.spawn_countdown <= 0 {
            self.meteors.push(spawn_meteor(rng, WIDTH));
            self.spawn_countdown = self.spawn_interval as i32;
        } else {
            self.spawn_countdown -= 1;
        }
    }

    /// Moves every meteor down one step. Returns true if any of them now overlaps the player.
    pub fn advance(&mut self) -> bool {
        let mut hit = false;
        for meteor in &mut self.meteors {
            meteor.y += self.meteor_speed as i32;
            if meteor.intersects(&self.player) {
                hit = true;
            }
        }
        hit
    }

    pub fn cull(&mut self) {
        let before = self.meteors.len();
        self.meteors.retain(|meteor| meteor.y < HEIGHT);
        if self.meteors.len() != before {
            debug!("Culled {} meteor(s)", before - self.meteors.len());
        }
    }

    /// One simulation step. Presses are tried in order until one scores; the rest are dropped.
    pub fn tick(&mut self, presses: &[Rect], rng: &mut impl Rng) -> TickReport {
        let destroyed = presses.iter().any(|&area| self.click(area));
        self.spawn_check(rng);
        let defeated = self.advance();
        self.cull();
        TickReport { destroyed, defeated }
    }
}

impl Default for RunState {
    fn default() -> Self {
        RunState::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver(u32),
    Quit,
}

pub fn window_title(points: u32) -> String {
    format!("{} | Points: {}", TITLE_PREFIX, points)
}

pub struct Game<R: Rng> {
    pub stdout_target: OutputTarget,
    input: Box<dyn EventSource>,
    mixer: Mixer,
    clock: FrameClock,
    game_grid: GameGrid,
    session: Session,
    rng: R,
    frame_count: u64,
    max_frames: Option<u64>,
}

impl<R: Rng> Game<R> {
    pub fn new(
        stdout_target: OutputTarget,
        input: Box<dyn EventSource>,
        mixer: Mixer,
        clock: FrameClock,
        grid_size: (u16, u16),
        rng: R,
        max_frames: Option<u64>,
    ) -> Self {
        Game {
            stdout_target,
            input,
            mixer,
            clock,
            game_grid: GameGrid::new(grid_size.0, grid_size.1),
            session: Session::new(),
            rng,
            frame_count: 0,
            max_frames,
        }
    }

    /// Alternates between runs and end-of-run screens until the player quits.
    pub fn run(&mut self) -> Result<()> {
        let mut phase = Phase::Playing;
        loop {
            phase = match phase {
                Phase::Playing => self.play()?,
                Phase::GameOver(points) => self.end_of_run(points)?,
                Phase::Quit => break,
            };
        }
        info!("Leaving after {} frames, best score {}", self.frame_count, self.session.best_score());
        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn mixer(&self) -> &Mixer {
        &self.mixer
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn play(&mut self) -> Result<Phase> {
        let mut run = RunState::new();
        info!("Run started");
        self.stdout_target.set_title(&window_title(run.points)).context("failed to set window title")?;

        loop {
            let mut presses = Vec::new();
            for input in self.poll_inputs()? {
                match input {
                    GameInput::Close => {
                        info!("Closed during a run with {} points", run.points);
                        return Ok(Phase::Quit);
                    }
                    GameInput::Press(area) => presses.push(area),
                    GameInput::Resize(..) => {}
                }
            }

            let report = run.tick(&presses, &mut self.rng);
            if report.destroyed {
                self.mixer.play(Cue::MeteorDestroyed, &mut self.stdout_target)?;
                self.stdout_target.set_title(&window_title(run.points)).context("failed to set window title")?;
            }

            draw_frame(&mut self.game_grid, &run.player, &run.meteors);
            present(&self.game_grid, &mut self.stdout_target).context("failed to draw frame")?;
            self.next_frame();

            if report.defeated {
                info!("Player hit with {} points", run.points);
                return Ok(Phase::GameOver(run.points));
            }
        }
    }

    fn end_of_run(&mut self, points: u32) -> Result<Phase> {
        let banner = self.session.settle(points);
        let cue = match banner {
            Banner::NewHighScore => Cue::Victory,
            Banner::GameOver => Cue::Defeat,
        };
        self.mixer.play(cue, &mut self.stdout_target)?;

        let screen = EndScreen::new(banner, points);
        info!("End of run: {:?} with {} points", screen.banner, screen.points);
        self.show_end_screen(&screen)?;
        if let Some(sb) = self.stdout_target.screen_buffer() {
            sb.print_to_log();
        }

        loop {
            for input in self.poll_inputs()? {
                match input {
                    GameInput::Close => return Ok(Phase::Quit),
                    GameInput::Press(area) => match screen.choose(&area) {
                        Some(EndChoice::Restart) => {
                            info!("Restarting, best score {}", self.session.best_score());
                            return Ok(Phase::Playing);
                        }
                        Some(EndChoice::Quit) => return Ok(Phase::Quit),
                        None => {}
                    },
                    GameInput::Resize(..) => self.show_end_screen(&screen)?,
                }
            }
            self.next_frame();
        }
    }

    fn show_end_screen(&mut self, screen: &EndScreen) -> Result<()> {
        draw_end_screen(&mut self.game_grid, screen);
        present(&self.game_grid, &mut self.stdout_target).context("failed to draw end screen")
    }

    /// Input for the current frame. Reaching the frame limit counts as a close signal.
    fn poll_inputs(&mut self) -> Result<Vec<GameInput>> {
        if self.max_frames.is_some_and(|max| self.frame_count >= max) {
            info!("Frame limit reached");
            return Ok(vec![GameInput::Close]);
        }

        let events = self.input.drain(self.frame_count).context("failed to read terminal events")?;
        let mut inputs = Vec::with_capacity(events.len());
        for event in &events {
            let Some(input) = translate(event, &self.game_grid.viewport()) else {
                continue;
            };
            if let GameInput::Resize(cols, rows) = input {
                debug!("Terminal resized to {}x{}", cols, rows);
                self.game_grid.resize(cols, rows);
                self.stdout_target.execute_other_command(Clear(ClearType::All))?;
            }
            inputs.push(input);
        }
        Ok(inputs)
    }

    fn next_frame(&mut self) {
        self.clock.tick();
        self.frame_count += 1;
    }
}
