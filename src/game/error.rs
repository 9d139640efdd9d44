use thiserror::Error;

use super::state::Position;

/// Errors raised when validating a [`GameConfig`](super::GameConfig).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("grid dimensions {width}x{height} exceed the addressable range")]
    GridTooLarge { width: usize, height: usize },
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
    #[error("initial snake has no segments")]
    EmptySnake,
    #[error("initial snake segment {index} at ({}, {}) lies outside the grid", position.x, position.y)]
    SegmentOutOfBounds { index: usize, position: Position },
    #[error("initial snake segment {index} at ({}, {}) overlaps an earlier segment", position.x, position.y)]
    OverlappingSegment { index: usize, position: Position },
}
