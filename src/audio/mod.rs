//! One-shot sound cues for game events.
//!
//! Sinks never fail the game: a cue that cannot be played is logged and dropped.
//! [`Speaker`] plays synthesized tones; [`TerminalBell`] stands in when no
//! output device is available.

pub mod speaker;
pub mod synth;

use std::io::{self, Write};

use tracing::warn;

pub use speaker::Speaker;

/// A sound the shell asks to hear once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// The snake ate a piece of food
    Eat,
    /// The game went from running to over
    GameOver,
}

pub trait AudioSink {
    fn play(&mut self, sound: Sound);
}

/// Rings the terminal bell. Game over rings twice so the two cues differ.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stderr> {
    pub fn stderr() -> Self {
        Self { out: io::stderr() }
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn ring(&mut self, times: usize) -> io::Result<()> {
        for _ in 0..times {
            self.out.write_all(b"\x07")?;
        }
        self.out.flush()
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, sound: Sound) {
        let times = match sound {
            Sound::Eat => 1,
            Sound::GameOver => 2,
        };

        if let Err(err) = self.ring(times) {
            warn!(?err, ?sound, "failed to ring terminal bell");
        }
    }
}

/// Drops every cue
#[derive(Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _sound: Sound) {}
}
