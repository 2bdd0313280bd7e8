//! Fixed-timestep game loop
//!
//! Updates and renders run off two independent accumulators, so simulation
//! speed depends neither on how fast frames are drawn nor on scheduling
//! jitter. Everything happens on the calling thread; when neither clock is
//! due the loop sleeps until the nearer deadline.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::compute;
use crate::entities::{Bounds, Command, GameState, GameStatus};
use crate::highscores::ScoreEntry;
use crate::ports::{InputSource, OutputSink, ScoreStore};
use crate::settings::Settings;

/// Wall-clock deltas above this are clamped (debugger pauses, suspended terminals).
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Accumulator for one fixed-rate cadence.
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    accumulator: Duration,
}

impl FixedStep {
    pub fn from_rate(hz: u32) -> Self {
        Self {
            step: ONE_SECOND / hz.max(1),
            accumulator: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn accumulate(&mut self, dt: Duration) {
        self.accumulator += dt;
    }

    /// Take one step from the accumulator if a whole one is available.
    pub fn consume(&mut self) -> bool {
        if self.accumulator >= self.step {
            self.accumulator -= self.step;
            true
        } else {
            false
        }
    }

    pub fn until_due(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }

    /// Forget whole steps still owed, keeping the fractional remainder.
    pub fn drop_backlog(&mut self) {
        let rem = self.accumulator.as_nanos() % self.step.as_nanos();
        self.accumulator = Duration::from_nanos(rem as u64);
    }
}

/// Monotonic clock the loop schedules against.
pub trait TimeSource {
    /// Time since an arbitrary fixed origin.
    fn now(&mut self) -> Duration;

    fn sleep(&mut self, duration: Duration);
}

/// Real time via `Instant` and `thread::sleep`.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Outcome of a finished run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub score: u64,
    pub level: u32,
    pub ticks: u64,
    pub frames: u64,
    /// Run ended by a quit command rather than by losing the last life.
    pub quit: bool,
    pub high_scores: Vec<ScoreEntry>,
    /// 1-based rank of this run in `high_scores`.
    pub rank: Option<usize>,
}

pub struct GameLoop<R> {
    state: GameState,
    rng: R,
    update_clock: FixedStep,
    render_clock: FixedStep,
    max_catch_up: u32,
    player_name: String,
    frames: u64,
}

impl<R: Rng> GameLoop<R> {
    pub fn new(settings: &Settings, rng: R) -> Self {
        let mut state = GameState::new(Bounds::default());
        state.level_up_banner_frames = settings.level_up_banner_frames();

        Self {
            state,
            rng,
            update_clock: FixedStep::from_rate(settings.ups),
            render_clock: FixedStep::from_rate(settings.fps),
            max_catch_up: settings.max_catch_up_ticks.max(1),
            player_name: settings.player_name.clone(),
            frames: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Play until the player dies or quits, then show the end-of-run screens.
    pub fn run(
        &mut self,
        input: &mut impl InputSource,
        output: &mut impl OutputSink,
        store: &mut impl ScoreStore,
        clock: &mut impl TimeSource,
    ) -> RunSummary {
        let mut last = clock.now();
        let mut second_start = last;
        let mut ticks_this_second = 0u32;
        let mut frames_this_second = 0u32;
        let mut quit = false;

        while self.state.status == GameStatus::Running {
            if !self.state.player.is_alive {
                self.state.status = GameStatus::GameOver;
                break;
            }

            let now = clock.now();
            let dt = now.saturating_sub(last).min(MAX_FRAME_DELTA);
            last = now;
            self.update_clock.accumulate(dt);
            self.render_clock.accumulate(dt);

            let mut updates = 0u32;
            while self.state.player.is_alive && self.update_clock.consume() {
                let command = input.poll();
                if command == Some(Command::Quit) {
                    quit = true;
                    break;
                }
                compute::step(&mut self.state, command, &mut self.rng);
                updates += 1;
                ticks_this_second += 1;

                if updates >= self.max_catch_up {
                    log::trace!("update backlog dropped after {} ticks", updates);
                    self.update_clock.drop_backlog();
                    break;
                }
            }

            if quit {
                log::info!("run abandoned at tick {}", self.state.tick);
                self.state.status = GameStatus::GameOver;
                break;
            }
            if !self.state.player.is_alive {
                continue;
            }

            let mut rendered = false;
            if self.render_clock.consume() {
                self.render_frame(output);
                self.render_clock.drop_backlog();
                frames_this_second += 1;
                rendered = true;
            }

            if now.saturating_sub(second_start) >= ONE_SECOND {
                self.state.ups = ticks_this_second;
                self.state.fps = frames_this_second;
                log::debug!(
                    "UPS: {}, FPS: {}, score: {}, life: {}",
                    ticks_this_second,
                    frames_this_second,
                    self.state.player.score,
                    self.state.player.life
                );
                ticks_this_second = 0;
                frames_this_second = 0;
                second_start += ONE_SECOND;
                if now.saturating_sub(second_start) >= ONE_SECOND {
                    // more than a second behind after a stall: restart the window
                    second_start = now;
                }
            }

            if updates == 0 && !rendered {
                clock.sleep(self.update_clock.until_due().min(self.render_clock.until_due()));
            }
        }

        self.end_of_run(output, store, quit)
    }

    fn render_frame(&mut self, output: &mut impl OutputSink) {
        if let Err(e) = output.render(&self.state.snapshot()) {
            log::warn!("render failed, frame skipped: {}", e);
            return;
        }
        self.frames += 1;
        if self.state.level_up_timer > 0 {
            if let Err(e) = output.render_level_up_banner(self.state.player.level) {
                log::warn!("level-up banner failed: {}", e);
            }
            self.state.level_up_timer -= 1;
        }
    }

    fn end_of_run(
        &mut self,
        output: &mut impl OutputSink,
        store: &mut impl ScoreStore,
        quit: bool,
    ) -> RunSummary {
        let player = &self.state.player;
        log::info!(
            "game over: score {} at level {} after {} ticks",
            player.score,
            player.level,
            self.state.tick
        );

        if let Err(e) = output.render_game_over(&self.state.snapshot()) {
            log::warn!("game-over screen failed: {}", e);
        }

        let entry = ScoreEntry::new(self.player_name.clone(), player.score, player.level);
        let (high_scores, rank) = match store.record_if_qualifies(entry) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("could not record high score: {}", e);
                let scores = store.load().unwrap_or_else(|e| {
                    log::warn!("could not load high scores: {}", e);
                    Vec::new()
                });
                (scores, None)
            }
        };

        if let Err(e) = output.render_high_scores(&high_scores, rank) {
            log::warn!("high-score screen failed: {}", e);
        }

        RunSummary {
            score: self.state.player.score,
            level: self.state.player.level,
            ticks: self.state.tick,
            frames: self.frames,
            quit,
            high_scores,
            rank,
        }
    }
}
