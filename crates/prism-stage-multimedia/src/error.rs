//! Error types for the audio sprite engine.

use thiserror::Error;

/// Audio-specific errors.
///
/// Configuration errors (`UnknownRegion`, `VolumeOutOfRange`,
/// `InvalidRegion`, `NoRegionSelected`) surface synchronously at the call
/// that detects them. Playback-state races (double stop, stop racing a
/// natural end) are resolved by idempotency and never produce an error.
#[derive(Debug, Clone, Error)]
pub enum AudioError {
    /// The named region is absent from the sprite's spritemap.
    #[error("region `{name}` not found on audio sprite `{sprite}`")]
    UnknownRegion { sprite: String, name: String },

    /// Volume outside the accepted `[0, 1]` range.
    #[error("volume must be within [0, 1], got {0}")]
    VolumeOutOfRange(f32),

    /// A region whose bounds do not describe a forward time slice.
    #[error("invalid region: start {start}s must be >= 0 and < end {end}s")]
    InvalidRegion { start: f64, end: f64 },

    /// `play()` was called before any region was selected.
    #[error("no region selected on audio sprite `{0}`")]
    NoRegionSelected(String),

    /// `play()` was called before the source buffer finished loading.
    #[error("audio sprite `{0}` is not ready: source buffer not loaded")]
    NotReady(String),

    /// Audio device error.
    #[error("audio device error: {0}")]
    Device(String),

    /// Failed to decode the audio source.
    #[error("failed to decode audio: {0}")]
    Decode(String),

    /// Playback error from the output backend.
    #[error("playback error: {0}")]
    Playback(String),

    /// I/O error.
    #[error("i/o error: {0}")]
    Io(String),
}

impl From<std::io::Error> for AudioError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<rodio::StreamError> for AudioError {
    fn from(err: rodio::StreamError) -> Self {
        Self::Device(err.to_string())
    }
}

impl From<rodio::PlayError> for AudioError {
    fn from(err: rodio::PlayError) -> Self {
        Self::Playback(err.to_string())
    }
}

impl From<rodio::decoder::DecoderError> for AudioError {
    fn from(err: rodio::decoder::DecoderError) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A specialized Result type for audio operations.
pub type Result<T> = std::result::Result<T, AudioError>;
