//! Fire-and-forget sound effects.
//!
//! An [`SfxSprite`] plays a single one-shot region with no lifecycle to
//! manage: every `play()` spawns an independent detached sink that cleans
//! itself up when the region runs dry, so overlapping triggers (rapid
//! button clicks) just layer. `stop()` and `pause()` are intentional
//! no-ops.

use parking_lot::Mutex;
use rodio::{OutputStreamHandle, Sink};

use crate::buffer::{RegionSource, SampleBuffer};
use crate::error::Result;
use crate::sound_sprite::{validate_volume, Region};

/// Configuration for creating an [`SfxSprite`].
///
/// There is no default: the region is mandatory and must describe a valid
/// slice of the source. Volume defaults are the caller's business; `1.0`
/// is the usual choice.
#[derive(Debug, Clone)]
pub struct SfxConfig {
    /// Identifier used in errors and logs.
    pub id: String,
    /// The slice to play. The loop flag is ignored; effects never loop.
    pub region: Region,
    /// Initial gain, `[0, 1]`.
    pub volume: f32,
}

/// A one-shot sound-effect sprite.
///
/// Created through [`AudioOutput`](crate::AudioOutput). Unlike
/// [`SoundSprite`](crate::SoundSprite) there are no playback instances to
/// track: triggered effects are detached and forgotten.
pub struct SfxSprite {
    id: String,
    buffer: SampleBuffer,
    region: Region,
    volume: Mutex<f32>,
    handle: OutputStreamHandle,
}

impl SfxSprite {
    pub(crate) fn new(
        handle: OutputStreamHandle,
        config: SfxConfig,
        buffer: SampleBuffer,
    ) -> Result<Self> {
        validate_volume(config.volume)?;
        // Re-validate through the constructor so a hand-built region with
        // inverted bounds is rejected here, not at the first play().
        let region = Region::new(config.region.start, config.region.end, false)?;
        Ok(Self {
            id: config.id,
            buffer,
            region,
            volume: Mutex::new(config.volume),
            handle,
        })
    }

    /// The sprite identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Trigger the effect.
    ///
    /// Each call spawns an independent sounding instance; concurrent
    /// triggers overlap freely.
    pub fn play(&self) -> Result<()> {
        let sink = Sink::try_new(&self.handle)?;
        sink.set_volume(*self.volume.lock());
        sink.append(RegionSource::new(self.buffer.clone(), self.region, 0.0));
        sink.play();
        sink.detach();
        tracing::trace!(target: "prism_stage_multimedia", sprite = %self.id, "sfx triggered");
        Ok(())
    }

    /// No-op. Effects cannot be stopped once triggered.
    pub fn stop(&self) {}

    /// No-op. Effects cannot be paused.
    pub fn pause(&self) {}

    /// Set the gain for future triggers.
    ///
    /// Fails with [`AudioError::VolumeOutOfRange`](crate::AudioError) for
    /// values outside `[0, 1]`. Already-sounding triggers are unaffected.
    pub fn set_volume(&self, volume: f32) -> Result<()> {
        validate_volume(volume)?;
        *self.volume.lock() = volume;
        Ok(())
    }

    /// The gain applied to future triggers.
    pub fn volume(&self) -> f32 {
        *self.volume.lock()
    }
}

unsafe impl Send for SfxSprite {}
