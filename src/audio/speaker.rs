use rodio::{buffer::SamplesBuffer, OutputStream, OutputStreamHandle, Sink};
use tracing::warn;

use super::synth::{eat_samples, game_over_samples, SAMPLE_RATE};
use super::{AudioSink, Sound};

/// Plays cues on the default output device.
///
/// Samples are rendered once up front; each cue gets its own detached sink so
/// a new cue never cuts off the previous one.
pub struct Speaker {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    eat: Vec<f32>,
    game_over: Vec<f32>,
}

impl Speaker {
    /// Fails when there is no usable output device
    pub fn new() -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            eat: eat_samples(SAMPLE_RATE),
            game_over: game_over_samples(SAMPLE_RATE),
        })
    }
}

impl AudioSink for Speaker {
    fn play(&mut self, sound: Sound) {
        let samples = match sound {
            Sound::Eat => self.eat.clone(),
            Sound::GameOver => self.game_over.clone(),
        };

        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
                sink.detach();
            }
            Err(err) => warn!(?err, ?sound, "failed to open audio sink"),
        }
    }
}
