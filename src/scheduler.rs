use std::io;
use std::thread::sleep;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;

use crate::render::{bounds_for_terminal, Renderer};
use crate::snake::Direction;
use crate::world::World;

/// Pause between loop iterations, so the loop does not spin a core.
const LOOP_INTERVAL_MS: u64 = 5;

/// Non-blocking source of terminal events.
pub trait InputSource {
    /// Returns the next pending event, or `None` straight away if there is
    /// none.
    fn poll_event(&mut self) -> io::Result<Option<Event>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Cooperative single-threaded driver: ticks the world every `move_delay`
/// and ticks it early whenever a key press turns the snake.
pub struct Scheduler {
    world: World,
}

impl Scheduler {
    pub fn new(world: World) -> Self {
        Scheduler { world }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn into_world(self) -> World {
        self.world
    }

    /// Draws the current state, then loops until a quit key arrives.
    pub fn run<T: InputSource + Renderer>(&mut self, term: &mut T) -> io::Result<()> {
        term.render(&self.world.frame())?;

        while self.run_once(term, Instant::now())? == LoopControl::Continue {
            sleep(Duration::from_millis(LOOP_INTERVAL_MS));
        }

        Ok(())
    }

    /// One loop iteration: a timed tick if one is due, then at most one
    /// pending input event.
    pub fn run_once<T: InputSource + Renderer>(
        &mut self,
        term: &mut T,
        now: Instant,
    ) -> io::Result<LoopControl> {
        let elapsed = now.saturating_duration_since(self.world.last_tick());
        if elapsed > self.world.config().move_delay {
            self.world.tick(term)?;
        }

        match term.poll_event()? {
            Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if is_quit(&key) {
                    return Ok(LoopControl::Quit);
                }

                let turned = Direction::from_key(&key)
                    .map_or(false, |dir| self.world.request_direction(dir));
                if turned {
                    self.world.tick(term)?;
                }
            }
            Some(Event::Resize(cols, rows)) => {
                debug!("terminal resized to {}x{}", cols, rows);
                self.world.resize(bounds_for_terminal(cols, rows));
                term.render(&self.world.frame())?;
            }
            _ => {}
        }

        Ok(LoopControl::Continue)
    }
}

pub fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
