use std::io;

use crossterm::event::{KeyCode, KeyEvent};
use log::{info, warn};

use crate::config::{Setting, WorldConfig};
use crate::scheduler::is_quit;
use crate::term::TermManager;

const TITLE: &str = "Snek Configuration Menu";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    Exit,
    Edit(Setting),
    Invalid,
}

impl MenuChoice {
    pub fn from_key(key: &KeyEvent) -> Self {
        if is_quit(key) {
            return MenuChoice::Exit;
        }

        match key.code {
            KeyCode::Enter => MenuChoice::Start,
            KeyCode::Char(c) => Setting::from_key(c).map_or(MenuChoice::Invalid, MenuChoice::Edit),
            _ => MenuChoice::Invalid,
        }
    }
}

/// Text typed at a setting prompt.
#[derive(Debug, Default)]
pub struct Prompt {
    value: String,
}

impl Prompt {
    /// Feeds one key press. Returns true once the value is complete; Enter
    /// and Esc both finish the prompt.
    pub fn push(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => return true,
            KeyCode::Backspace => {
                self.value.pop();
            }
            KeyCode::Char(c) => self.value.push(c),
            _ => {}
        }
        false
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Box-drawn menu listing every setting with its current value.
pub fn menu_lines(config: &WorldConfig, width: u16) -> Vec<String> {
    let inner = (width as usize).saturating_sub(2).max(TITLE.len());
    let rule = "═".repeat(inner);
    let option = |text: String| format!("║{:<inner$}║", format!(" {text}"));

    let mut lines = vec![
        format!("╔{rule}╗"),
        format!("║{:^inner$}║", TITLE),
        format!("╠{rule}╣"),
    ];
    lines.extend(Setting::ALL.iter().map(|s| {
        option(format!("{}: {} (current: {})", s.key(), s.name(), s.current_value(config)))
    }));
    lines.push(format!("╠{rule}╣"));
    lines.push(option("Enter: Start Game".to_string()));
    lines.push(option("Esc: Exit (available while in game)".to_string()));
    lines.push(format!("╚{rule}╝"));
    lines
}

/// Shows the menu until the player starts a game (`Some`) or exits (`None`).
pub fn run_menu(term: &mut TermManager, mut config: WorldConfig) -> io::Result<Option<WorldConfig>> {
    loop {
        term.show_lines(&menu_lines(&config, term.width()))?;

        let setting = match MenuChoice::from_key(&term.read_key_blocking()?) {
            MenuChoice::Start => return Ok(Some(config)),
            MenuChoice::Exit => return Ok(None),
            MenuChoice::Invalid => continue,
            MenuChoice::Edit(setting) => setting,
        };

        if setting.is_toggle() {
            setting.toggle(&mut config);
            continue;
        }

        term.show_lines(&[setting.prompt()])?;
        let mut prompt = Prompt::default();
        loop {
            let key = term.read_key_blocking()?;
            if prompt.push(&key) {
                break;
            }
            term.show_lines(&[format!("{}{}", setting.prompt(), prompt.value())])?;
        }

        match setting.apply(&mut config, prompt.value()) {
            Ok(()) => info!("{} set to {}", setting.name(), setting.current_value(&config)),
            Err(e) => warn!("ignoring {}: {}", setting.name(), e),
        }
    }
}
