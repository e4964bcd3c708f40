use std::time::Duration;

use thiserror::Error;

pub const APPLE_DENSITY: u32 = 100;
pub const INITIAL_SNAKE_LENGTH: u32 = 1;
pub const SNAKE_GROWTH_RATE: u32 = 1;
pub const MOVE_DELAY_SECS: f64 = 0.25;
pub const APPLE_SPACING: u32 = 3;

/// Settings for one run of the world. Read-only while a run is in progress;
/// the menu edits it between runs.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldConfig {
    /// Grid cells per apple (`area / density`, at least one apple).
    pub apple_density: u32,
    pub initial_snake_length: u32,
    /// Segments and points gained per apple.
    pub snake_growth_rate: u32,
    pub move_delay: Duration,
    /// Minimum per-axis distance between a new apple and any occupied cell.
    pub apple_spacing: u32,
    pub pride_theme: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            apple_density: APPLE_DENSITY,
            initial_snake_length: INITIAL_SNAKE_LENGTH,
            snake_growth_rate: SNAKE_GROWTH_RATE,
            move_delay: Duration::from_secs_f64(MOVE_DELAY_SECS),
            apple_spacing: APPLE_SPACING,
            pride_theme: false,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("{setting} must be {expected}")]
    OutOfRange { setting: &'static str, expected: &'static str },
}

/// Entries of the configuration menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    AppleDensity,
    InitialSnakeLength,
    SnakeGrowthRate,
    SnakeMoveDelay,
    AppleSpacing,
    PrideTheme,
}

impl Setting {
    pub const ALL: [Setting; 6] = [
        Setting::AppleDensity,
        Setting::InitialSnakeLength,
        Setting::SnakeGrowthRate,
        Setting::SnakeMoveDelay,
        Setting::AppleSpacing,
        Setting::PrideTheme,
    ];

    /// Menu key for this entry, '1' through '6'.
    pub fn key(&self) -> char {
        let index = Setting::ALL.iter().position(|s| s == self).unwrap_or(0);
        char::from(b'1' + index as u8)
    }

    pub fn from_key(key: char) -> Option<Setting> {
        Setting::ALL.iter().copied().find(|s| s.key() == key)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Setting::AppleDensity => "Apple Density",
            Setting::InitialSnakeLength => "Initial Snake Length",
            Setting::SnakeGrowthRate => "Snake Growth Rate",
            Setting::SnakeMoveDelay => "Snake Move Delay",
            Setting::AppleSpacing => "Apple Spacing",
            Setting::PrideTheme => "Pride Theme",
        }
    }

    /// Toggles take effect on selection and have no prompt.
    pub fn is_toggle(&self) -> bool {
        matches!(self, Setting::PrideTheme)
    }

    pub fn prompt(&self) -> String {
        format!("Enter new {}: ", self.name())
    }

    pub fn current_value(&self, config: &WorldConfig) -> String {
        match self {
            Setting::AppleDensity => config.apple_density.to_string(),
            Setting::InitialSnakeLength => config.initial_snake_length.to_string(),
            Setting::SnakeGrowthRate => config.snake_growth_rate.to_string(),
            Setting::SnakeMoveDelay => config.move_delay.as_secs_f64().to_string(),
            Setting::AppleSpacing => config.apple_spacing.to_string(),
            Setting::PrideTheme => config.pride_theme.to_string(),
        }
    }

    pub fn toggle(&self, config: &mut WorldConfig) {
        if let Setting::PrideTheme = self {
            config.pride_theme = !config.pride_theme;
        }
    }

    /// Parses `input` for this setting and stores it. On error the config
    /// is left untouched.
    pub fn apply(&self, config: &mut WorldConfig, input: &str) -> Result<(), ConfigError> {
        let input = input.trim();
        match self {
            Setting::AppleDensity => config.apple_density = parse_positive(input, self.name())?,
            Setting::InitialSnakeLength => {
                config.initial_snake_length = parse_positive(input, self.name())?
            }
            Setting::SnakeGrowthRate => {
                config.snake_growth_rate = parse_positive(input, self.name())?
            }
            Setting::SnakeMoveDelay => config.move_delay = parse_delay(input, self.name())?,
            Setting::AppleSpacing => {
                config.apple_spacing = input
                    .parse()
                    .map_err(|_| ConfigError::NotANumber(input.to_string()))?
            }
            Setting::PrideTheme => self.toggle(config),
        }

        Ok(())
    }
}

fn parse_positive(input: &str, setting: &'static str) -> Result<u32, ConfigError> {
    let value: u32 = input.parse().map_err(|_| ConfigError::NotANumber(input.to_string()))?;
    if value == 0 {
        return Err(ConfigError::OutOfRange { setting, expected: "at least 1" });
    }
    Ok(value)
}

fn parse_delay(input: &str, setting: &'static str) -> Result<Duration, ConfigError> {
    let secs: f64 = input.parse().map_err(|_| ConfigError::NotANumber(input.to_string()))?;
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::OutOfRange {
        setting,
        expected: "a non-negative number of seconds",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WorldConfig::default();
        assert_eq!(config.apple_density, 100);
        assert_eq!(config.initial_snake_length, 1);
        assert_eq!(config.snake_growth_rate, 1);
        assert_eq!(config.move_delay, Duration::from_millis(250));
        assert_eq!(config.apple_spacing, 3);
        assert!(!config.pride_theme);
    }

    #[test]
    fn test_setting_keys() {
        assert_eq!(Setting::AppleDensity.key(), '1');
        assert_eq!(Setting::PrideTheme.key(), '6');
        assert_eq!(Setting::from_key('4'), Some(Setting::SnakeMoveDelay));
        assert_eq!(Setting::from_key('7'), None);
        assert_eq!(Setting::from_key('x'), None);
    }

    #[test]
    fn test_apply_valid_values() {
        let mut config = WorldConfig::default();

        Setting::AppleDensity.apply(&mut config, "50").unwrap();
        Setting::InitialSnakeLength.apply(&mut config, " 4 ").unwrap();
        Setting::SnakeGrowthRate.apply(&mut config, "2").unwrap();
        Setting::SnakeMoveDelay.apply(&mut config, "0.1").unwrap();
        Setting::AppleSpacing.apply(&mut config, "0").unwrap();

        assert_eq!(config.apple_density, 50);
        assert_eq!(config.initial_snake_length, 4);
        assert_eq!(config.snake_growth_rate, 2);
        assert_eq!(config.move_delay, Duration::from_secs_f64(0.1));
        assert_eq!(config.apple_spacing, 0);
    }

    #[test]
    fn test_invalid_input_keeps_previous_value() {
        let mut config = WorldConfig::default();

        let err = Setting::AppleDensity.apply(&mut config, "lots").unwrap_err();
        assert_eq!(err, ConfigError::NotANumber("lots".to_string()));
        assert!(Setting::SnakeGrowthRate.apply(&mut config, "0").is_err());
        assert!(Setting::SnakeMoveDelay.apply(&mut config, "-1").is_err());
        assert!(Setting::InitialSnakeLength.apply(&mut config, "").is_err());

        assert_eq!(config, WorldConfig::default());
    }

    #[test]
    fn test_pride_theme_toggles() {
        let mut config = WorldConfig::default();
        assert!(Setting::PrideTheme.is_toggle());

        Setting::PrideTheme.toggle(&mut config);
        assert!(config.pride_theme);
        Setting::PrideTheme.toggle(&mut config);
        assert!(!config.pride_theme);
    }

    #[test]
    fn test_current_value_display() {
        let config = WorldConfig::default();
        assert_eq!(Setting::SnakeMoveDelay.current_value(&config), "0.25");
        assert_eq!(Setting::AppleSpacing.current_value(&config), "3");
    }
}
