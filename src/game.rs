use anyhow::{Context, Result};
use log::{error, info};

use crate::config::WorldConfig;
use crate::menu::run_menu;
use crate::render::Theme;
use crate::scheduler::Scheduler;
use crate::snake::INITIAL_HIGH_SCORE;
use crate::term::TermManager;
use crate::world::World;

/// One process-long session: alternates between the configuration menu and
/// play until the player exits from the menu.
pub struct SnakeGame {
    term: TermManager,
    config: WorldConfig,
    show_menu: bool,
    high_score: u32,
}

impl SnakeGame {
    pub fn new(config: WorldConfig, show_menu: bool) -> Result<Self> {
        let term = TermManager::new().context("Failed to read terminal size")?;
        Ok(SnakeGame { term, config, show_menu, high_score: INITIAL_HIGH_SCORE })
    }

    /// Sets up the terminal, runs the session and restores the terminal on
    /// every exit path.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup().context("Failed to set up terminal")?;

        let result = self.session();
        let restored = self.term.restore().context("Failed to restore terminal");
        session_outcome(result, restored)
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    ///////////////////////////////////////////////////////////////////////////

    fn session(&mut self) -> Result<()> {
        loop {
            if self.show_menu {
                match run_menu(&mut self.term, self.config.clone()).context("Menu failed")? {
                    Some(config) => self.config = config,
                    None => return Ok(()),
                }
            }

            self.play()?;

            if !self.show_menu {
                return Ok(());
            }
        }
    }

    fn play(&mut self) -> Result<()> {
        let bounds = self.term.grid_bounds().context("Failed to read terminal size")?;
        info!("starting {}x{} world with {:?}", bounds.width(), bounds.height(), self.config);

        let mut world = World::new(self.config.clone(), bounds);
        world.carry_high_score(self.high_score);

        self.term.set_theme(Theme::from_flag(self.config.pride_theme));
        self.term.clear().context("Failed to clear terminal")?;

        let mut scheduler = Scheduler::new(world);
        scheduler.run(&mut self.term).context("Game loop failed")?;

        self.high_score = scheduler.world().snake().high_score();
        info!("run over, high score {}", self.high_score);
        Ok(())
    }
}

/// The session's own error wins; a restore failure behind it is logged.
fn session_outcome(result: Result<()>, restored: Result<()>) -> Result<()> {
    if let (Err(_), Err(e)) = (&result, &restored) {
        error!("{:#}", e);
    }
    result.and(restored)
}
