use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{action::Direction, error::ConfigError, state::Position};

/// How a new piece of food picks its cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodPlacement {
    /// Any cell in the grid, including ones under the snake
    #[default]
    Anywhere,
    /// Only cells the snake does not occupy
    AvoidSnake,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Body of the snake at the start of every game, head first
    pub initial_snake: Vec<Position>,
    /// Direction the snake moves in at the start of every game
    pub initial_direction: Direction,
    /// Delay between two ticks, in milliseconds
    pub tick_interval_ms: u64,
    pub food_placement: FoodPlacement,
    /// Seed for food placement; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake: vec![
                Position::new(8, 10),
                Position::new(7, 10),
                Position::new(6, 10),
            ],
            initial_direction: Direction::Right,
            tick_interval_ms: 100,
            food_placement: FoodPlacement::Anywhere,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Check that the initial snake fits the grid and the loop can run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if i32::try_from(self.grid_width).is_err() || i32::try_from(self.grid_height).is_err() {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.initial_snake.is_empty() {
            return Err(ConfigError::EmptySnake);
        }

        let mut seen = HashSet::with_capacity(self.initial_snake.len());
        for (index, &position) in self.initial_snake.iter().enumerate() {
            if !self.contains(position) {
                return Err(ConfigError::SegmentOutOfBounds { index, position });
            }
            if !seen.insert(position) {
                return Err(ConfigError::OverlappingSegment { index, position });
            }
        }

        Ok(())
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0
            && (pos.x as usize) < self.grid_width
            && pos.y >= 0
            && (pos.y as usize) < self.grid_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.initial_direction, Direction::Right);
        assert_eq!(
            config.initial_snake,
            vec![
                Position::new(8, 10),
                Position::new(7, 10),
                Position::new(6, 10)
            ]
        );
        assert_eq!(config.food_placement, FoodPlacement::Anywhere);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.initial_snake.len(), 3);
    }

    #[test]
    fn test_rejects_empty_grid() {
        let config = GameConfig::new(0, 20);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyGrid {
                width: 0,
                height: 20
            })
        );
    }

    #[test]
    fn test_rejects_zero_tick() {
        let config = GameConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickInterval));
    }

    #[test]
    fn test_rejects_snake_outside_small_grid() {
        // Default snake reaches x = 8, so a 5 wide grid cannot hold it
        let config = GameConfig::new(5, 20);
        assert_eq!(
            config.validate(),
            Err(ConfigError::SegmentOutOfBounds {
                index: 0,
                position: Position::new(8, 10)
            })
        );
    }

    #[test]
    fn test_rejects_overlapping_snake() {
        let config = GameConfig {
            initial_snake: vec![
                Position::new(2, 2),
                Position::new(1, 2),
                Position::new(2, 2),
            ],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::OverlappingSegment {
                index: 2,
                position: Position::new(2, 2)
            })
        );
    }

    #[test]
    fn test_rejects_empty_snake() {
        let config = GameConfig {
            initial_snake: Vec::new(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptySnake));
    }

    #[test]
    fn test_load_partial_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "grid_width": 30, "food_placement": "avoid_snake", "seed": 7 }}"#
        )
        .unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.food_placement, FoodPlacement::AvoidSnake);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.initial_snake.len(), 3);
    }

    #[test]
    fn test_load_invalid_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = GameConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = GameConfig::from_file(dir.path().join("missing.json"));
        assert!(result.is_err());
    }
}
