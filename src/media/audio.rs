//! Audio playback for fetched observation clips.

use std::io::Cursor;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use thiserror::Error;

/// Errors raised while opening the output stream or decoding a clip.
#[derive(Debug, Error)]
pub enum AudioPlaybackError {
    #[error("Audio output unavailable: {0}")]
    Output(#[from] rodio::StreamError),
    #[error("Failed to decode audio clip: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}

/// Plays one fetched clip at a time through the default output device.
///
/// The output stream is opened on construction and shared by every record
/// card; starting a new clip stops the previous one.
pub struct ReviewAudioPlayer {
    stream: OutputStream,
    sink: Option<Sink>,
}

impl ReviewAudioPlayer {
    /// Open the default audio output.
    pub fn new() -> Result<Self, AudioPlaybackError> {
        let stream = OutputStreamBuilder::open_default_stream()?;
        Ok(Self { stream, sink: None })
    }

    /// Decode and play a clip from fetched bytes, replacing any current clip.
    pub fn play(&mut self, bytes: Vec<u8>) -> Result<(), AudioPlaybackError> {
        self.stop();
        let source = Decoder::new(Cursor::new(bytes))?;
        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        self.sink = Some(sink);
        Ok(())
    }

    /// Stop any active playback.
    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    /// True while the current clip is still audible.
    pub fn is_playing(&self) -> bool {
        self.sink.as_ref().map(|sink| !sink.empty()).unwrap_or(false)
    }
}
