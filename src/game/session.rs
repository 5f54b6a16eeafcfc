use std::time::Duration;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::audio::{AudioSink, Cue};
use super::clock::{self, COUNTDOWN_TOTAL, TickRate};
use super::direction::Direction;
use super::food::Food;
use super::grid::Grid;
use super::render::Canvas;
use super::snake::Snake;
use super::special_food::SpecialFoodSlot;
use crate::error::GameError;
use crate::persistence::Settings;

/// Player input the session understands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Turn(Direction),
    TogglePause,
    /// Pointer press at a screen position
    Pointer { x: f32, y: f32 },
}

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Built but `begin` not called yet
    Ready,
    Countdown { started: Duration },
    Running,
    Paused,
    Ended,
}

/// What killed the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Wall,
    SelfCollision,
}

/// Final result of a session that ended in a collision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOver {
    pub player: String,
    pub score: u32,
    pub cause: DeathCause,
}

/// One game from countdown to collision. Single-threaded: the caller drives
/// it with `frame` (or `tick` directly) and feeds input through `handle`.
pub struct Session {
    grid: Grid,
    snake: Snake,
    food: Food,
    special: SpecialFoodSlot,
    score: u32,
    ticks: u64,
    tick_rate: TickRate,
    phase: Phase,
    pause_requested: bool,
    last_tick: Duration,
    cooldown_armed: bool,
    player: String,
    outcome: Option<GameOver>,
    rng: StdRng,
}

impl Session {
    /// Fresh session: snake at the centre heading right, food placed, tick
    /// rate fixed from `settings.game_speed` for the whole game.
    pub fn new(grid: Grid, settings: &Settings, player: impl Into<String>, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(grid, settings, player, StdRng::seed_from_u64(seed))
    }

    /// Same as `new`, drawing food placement and motion from `rng`
    pub fn with_rng(
        grid: Grid,
        settings: &Settings,
        player: impl Into<String>,
        mut rng: StdRng,
    ) -> Result<Self, GameError> {
        let snake = Snake::new(grid.center(), Direction::Right, grid.cell_size());
        let food = Food::spawn(&grid, &mut rng, |cell| snake.occupies(cell))?;

        Ok(Self {
            grid,
            snake,
            food,
            special: SpecialFoodSlot::new(Duration::ZERO),
            score: 0,
            ticks: 0,
            tick_rate: TickRate::from_speed(settings.game_speed),
            phase: Phase::Ready,
            pause_requested: false,
            last_tick: Duration::ZERO,
            cooldown_armed: false,
            player: player.into(),
            outcome: None,
            rng,
        })
    }

    /// Start the opening countdown
    pub fn begin(&mut self, now: Duration, audio: &mut impl AudioSink) {
        info!(
            "session started: player={} fps={}",
            self.player,
            self.tick_rate.fps()
        );
        self.enter_countdown(now, audio);
    }

    fn enter_countdown(&mut self, now: Duration, audio: &mut impl AudioSink) {
        self.phase = Phase::Countdown { started: now };
        audio.play(Cue::Countdown);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn special(&self) -> &SpecialFoodSlot {
        &self.special
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick_rate(&self) -> TickRate {
        self.tick_rate
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    /// Set once the snake has died; `None` while alive or after `abandon`
    pub fn outcome(&self) -> Option<&GameOver> {
        self.outcome.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// Countdown text for `now`, if counting down
    pub fn countdown_label(&self, now: Duration) -> Option<String> {
        match self.phase {
            Phase::Countdown { started } => Some(clock::countdown_label(now.saturating_sub(started))),
            _ => None,
        }
    }

    /// Buffer one input. Turns are dropped while paused or ended; a pointer
    /// press on the pause control counts as the pause key.
    pub fn handle(&mut self, intent: Intent, now: Duration, audio: &mut impl AudioSink) {
        let intent = match intent {
            Intent::Pointer { x, y } if self.grid.pause_rect().contains_point(x, y) => Intent::TogglePause,
            other => other,
        };

        match (self.phase, intent) {
            (Phase::Running | Phase::Countdown { .. }, Intent::Turn(direction)) => {
                self.snake.buffer_direction(direction);
            }
            (Phase::Running, Intent::TogglePause) => self.pause_requested = true,
            (Phase::Paused, Intent::TogglePause) => self.resume(now, audio),
            _ => {}
        }
    }

    /// Leave the pause overlay through a fresh countdown
    pub fn resume(&mut self, now: Duration, audio: &mut impl AudioSink) {
        if self.phase == Phase::Paused {
            debug!("session resumed at tick {}", self.ticks);
            self.enter_countdown(now, audio);
        }
    }

    /// End without a result (back to the main menu from the pause overlay)
    pub fn abandon(&mut self) {
        if self.phase != Phase::Ended {
            info!("session abandoned: player={} score={}", self.player, self.score);
        }
        self.phase = Phase::Ended;
    }

    /// Advance time: finish the countdown, then tick whenever a full tick
    /// interval has passed since the previous tick.
    pub fn frame(&mut self, now: Duration, audio: &mut impl AudioSink) -> Result<(), GameError> {
        match self.phase {
            Phase::Countdown { started } => {
                if now.saturating_sub(started) >= COUNTDOWN_TOTAL {
                    self.phase = Phase::Running;
                    self.last_tick = now;
                    if !self.cooldown_armed {
                        self.special.reset_cooldown(now);
                        self.cooldown_armed = true;
                    }
                }
                Ok(())
            }
            Phase::Running => {
                if now.saturating_sub(self.last_tick) < self.tick_rate.interval() {
                    return Ok(());
                }
                self.last_tick = now;
                self.tick(now, audio)
            }
            Phase::Ready | Phase::Paused | Phase::Ended => Ok(()),
        }
    }

    /// Run one game tick. Does nothing unless running.
    pub fn tick(&mut self, now: Duration, audio: &mut impl AudioSink) -> Result<(), GameError> {
        if self.phase != Phase::Running {
            return Ok(());
        }

        self.special.maybe_spawn(now, &self.grid, &mut self.rng)?;

        if std::mem::take(&mut self.pause_requested) {
            debug!("session paused at tick {}", self.ticks);
            self.phase = Phase::Paused;
            return Ok(());
        }

        self.snake.advance();
        self.ticks += 1;
        let head = self.snake.head();

        if head == self.food.position() {
            self.snake.mark_grow();
            self.score += self.food.consume(&self.grid, &mut self.rng);
            let snake = &self.snake;
            self.food.respawn(&self.grid, &mut self.rng, |cell| snake.occupies(cell))?;
            audio.play(Cue::Eat);
        }

        let head_rect = self.grid.cell_rect(head);
        if let Some(points) = self.special.try_consume(&head_rect, now, &self.grid, &mut self.rng) {
            self.snake.mark_grow();
            self.score += points;
            audio.play(Cue::Eat);
        }

        self.food.update_particles();
        self.special.update(&self.grid);

        self.check_terminal(audio);
        Ok(())
    }

    /// Detect a wall or self collision and end the session. The fail cue
    /// plays only the first time a death is detected.
    pub fn check_terminal(&mut self, audio: &mut impl AudioSink) -> bool {
        let head = self.snake.head();
        let cause = if !self.grid.in_bounds(head) {
            DeathCause::Wall
        } else if self.snake.collides_with_body(head) {
            DeathCause::SelfCollision
        } else {
            return false;
        };

        if self.outcome.is_none() {
            info!(
                "game over: player={} score={} cause={:?}",
                self.player, self.score, cause
            );
            audio.play(Cue::Fail);
            self.outcome = Some(GameOver {
                player: self.player.clone(),
                score: self.score,
                cause,
            });
        }
        self.phase = Phase::Ended;
        true
    }

    /// Emit this frame's draw calls
    pub fn render(&self, canvas: &mut impl Canvas) {
        canvas.background();
        canvas.food(self.food.position());
        if let Some(special) = self.special.active() {
            canvas.special_food(special.footprint(&self.grid));
        }
        for particle in self
            .food
            .burst()
            .particles()
            .iter()
            .chain(self.special.burst().particles())
        {
            canvas.particle(particle);
        }
        canvas.snake_head(self.snake.head(), self.snake.direction());
        for segment in self.snake.body() {
            canvas.snake_segment(*segment);
        }
        canvas.score(self.score, self.grid.score_rect());
        canvas.pause_icon(self.grid.pause_rect());
    }
}
