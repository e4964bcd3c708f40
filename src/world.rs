use std::io;
use std::time::Instant;

use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use crate::apples::AppleManager;
use crate::config::WorldConfig;
use crate::grid::{Bounds, Grid, Position};
use crate::render::{Frame, Renderer};
use crate::snake::{Direction, Snake};

/// What a call to `World::tick` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Another tick was already running; nothing changed.
    Skipped,
    Moved,
    /// At least one apple was eaten this tick.
    Ate,
    /// The head left the grid and the world was reset.
    HitWall,
    /// The head ran into the body; the world was reset and stepped once.
    HitSelf,
}

/// Owns the snake, the apples and the grid cache, and advances them one
/// tick at a time.
pub struct World {
    config: WorldConfig,
    bounds: Bounds,
    grid: Grid,
    snake: Snake,
    apples: AppleManager,
    rng: StdRng,
    ticking: bool,
    last_tick: Instant,
}

impl World {
    pub fn new(config: WorldConfig, bounds: Bounds) -> Self {
        Self::build(config, bounds, StdRng::from_entropy())
    }

    pub fn with_seed(config: WorldConfig, bounds: Bounds, seed: u64) -> Self {
        Self::build(config, bounds, StdRng::seed_from_u64(seed))
    }

    /// Assembles a world from an explicit snake and apple layout, without
    /// resetting it.
    pub fn from_parts(
        config: WorldConfig,
        bounds: Bounds,
        snake: Snake,
        apples: AppleManager,
        seed: u64,
    ) -> Self {
        let mut world = World {
            config,
            bounds,
            grid: Grid::new(bounds),
            snake,
            apples,
            rng: StdRng::seed_from_u64(seed),
            ticking: false,
            last_tick: Instant::now(),
        };
        world.rebuild_grid();
        world
    }

    fn build(config: WorldConfig, bounds: Bounds, rng: StdRng) -> Self {
        let snake = Snake::new(bounds, config.initial_snake_length);
        let apples = AppleManager::new(bounds, config.apple_density);
        let mut world = World {
            config,
            bounds,
            grid: Grid::new(bounds),
            snake,
            apples,
            rng,
            ticking: false,
            last_tick: Instant::now(),
        };
        world.reset();
        world
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apples(&self) -> &AppleManager {
        &self.apples
    }

    pub fn last_tick(&self) -> Instant {
        self.last_tick
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    pub fn carry_high_score(&mut self, high_score: u32) {
        self.snake.carry_high_score(high_score);
    }

    pub fn request_direction(&mut self, direction: Direction) -> bool {
        let changed = self.snake.request_direction(direction);
        if changed {
            debug!("snake turned {:?}", direction);
        }
        changed
    }

    /// Starts a fresh run: new snake, new apples, high score kept.
    pub fn reset(&mut self) {
        info!("new run (high score {})", self.snake.high_score());

        self.snake.reset(self.bounds, self.config.initial_snake_length);
        self.apples.reset(&mut self.rng, self.bounds, &self.snake, self.config.apple_spacing);
        self.last_tick = Instant::now();
        self.rebuild_grid();
    }

    /// Adopts new grid dimensions and starts over.
    pub fn resize(&mut self, bounds: Bounds) {
        debug!("resized to {}x{}", bounds.width(), bounds.height());

        self.bounds = bounds;
        self.grid = Grid::new(bounds);
        self.apples = AppleManager::new(bounds, self.config.apple_density);
        self.reset();
    }

    /// Runs one simulation step and hands the result to `renderer`. A call
    /// made while another tick is in progress does nothing.
    pub fn tick(&mut self, renderer: &mut dyn Renderer) -> io::Result<TickOutcome> {
        if self.ticking {
            return Ok(TickOutcome::Skipped);
        }
        self.ticking = true;

        let outcome = self.step();
        if outcome == TickOutcome::HitSelf {
            // step the fresh world once so the collision is never drawn
            self.step();
        }
        self.rebuild_grid();

        let rendered = renderer.render(&self.frame());

        self.ticking = false;
        self.last_tick = Instant::now();
        rendered.map(|_| outcome)
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame { grid: &self.grid, score: self.snake.score(), high_score: self.snake.high_score() }
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Move, check the walls, eat, grow, check the body. Collisions reset
    /// the world before returning.
    fn step(&mut self) -> TickOutcome {
        let vacated = self.snake.advance();

        if !self.bounds.contains(self.snake.head()) {
            self.reset();
            return TickOutcome::HitWall;
        }

        let eaten: Vec<Position> =
            self.snake.segments().copied().filter(|&pos| self.apples.contains(pos)).collect();

        for apple in &eaten {
            self.apples.remove_at(*apple);
            self.snake.feed(self.config.snake_growth_rate, vacated);
        }

        self.snake.apply_growth();

        if self.snake.head_collides() {
            self.reset();
            return TickOutcome::HitSelf;
        }

        // replacements go down once the new tail segment is in place
        for _ in &eaten {
            self.apples.place_one(&mut self.rng, self.bounds, &self.snake, self.config.apple_spacing);
        }

        if eaten.is_empty() { TickOutcome::Moved } else { TickOutcome::Ate }
    }

    fn rebuild_grid(&mut self) {
        self.grid.rebuild(self.snake.segments(), self.apples.positions());
    }
}
