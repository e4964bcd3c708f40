//! Snek: a terminal snake game.
//!
//! The world model (`grid`, `snake`, `apples`, `world`) and its driver
//! (`scheduler`) have no terminal dependencies beyond key event types and
//! can be exercised headless. `term`, `menu` and `game` wire them to a real
//! terminal through crossterm.

pub mod apples;
pub mod config;
pub mod game;
pub mod grid;
pub mod menu;
pub mod render;
pub mod scheduler;
pub mod snake;
pub mod term;
pub mod world;

pub use config::WorldConfig;
pub use grid::{Bounds, Cell, Grid, Position};
pub use render::{Frame, Renderer};
pub use scheduler::{InputSource, LoopControl, Scheduler};
pub use snake::{Direction, Snake};
pub use world::{TickOutcome, World};
