//! Grid Snake - the classic snake game in a terminal
//!
//! This library provides:
//! - Core game logic (game module), free of any I/O
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Sound cues (audio module)
//! - The event loop tying them together (shell module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod render;
pub mod shell;
