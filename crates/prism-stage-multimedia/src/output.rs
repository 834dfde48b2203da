//! Audio output and instance reaping.
//!
//! [`AudioOutput`] owns the physical output stream and is the factory for
//! every audio sprite. It also runs the reaper: a background thread that
//! watches live playback instances and finalizes the ones whose sinks have
//! reached their natural end, through the same cleanup path as an explicit
//! `stop()`: disconnect, instance removal, `stopped` signal.
//!
//! Construct one `AudioOutput` at startup and pass it by reference to
//! whatever creates sounds; there is no ambient global.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use rodio::{OutputStream, OutputStreamHandle};

use crate::buffer::SampleBuffer;
use crate::error::{AudioError, Result};
use crate::sfx::{SfxConfig, SfxSprite};
use crate::sound_sprite::{
    PlayState, SoundSprite, SoundSpriteConfig, SpriteSignals, SpriteState,
};

/// Reaper cadence.
const REAP_INTERVAL_MS: u64 = 50;

type RegistryEntry = (Weak<Mutex<SpriteState>>, Arc<SpriteSignals>);

/// The audio device connection, sprite factory, and instance reaper.
///
/// Keep the `AudioOutput` alive for as long as anything should sound;
/// dropping it stops the reaper thread and releases the output device.
///
/// # Example
///
/// ```ignore
/// let output = AudioOutput::new()?;
/// let sprite = output.create_sprite(config, std::fs::read("ui.ogg")?)?;
/// sprite.set_texture("confirm")?;
/// sprite.play()?;
/// ```
pub struct AudioOutput {
    /// Must be kept alive for audio to play.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    registry: Arc<Mutex<Vec<RegistryEntry>>>,
    stop_reaper: Arc<AtomicBool>,
    reaper_handle: Option<std::thread::JoinHandle<()>>,
}

impl AudioOutput {
    /// Connect to the default audio output device.
    ///
    /// Returns [`AudioError::Device`] if no output device is available.
    pub fn new() -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::Device(e.to_string()))?;

        let mut output = Self {
            _stream: stream,
            handle,
            registry: Arc::new(Mutex::new(Vec::new())),
            stop_reaper: Arc::new(AtomicBool::new(false)),
            reaper_handle: None,
        };
        output.start_reaper();
        Ok(output)
    }

    fn start_reaper(&mut self) {
        let registry = self.registry.clone();
        let stop_flag = self.stop_reaper.clone();

        let handle = std::thread::spawn(move || {
            while !stop_flag.load(Ordering::SeqCst) {
                std::thread::sleep(Duration::from_millis(REAP_INTERVAL_MS));

                let entries: Vec<RegistryEntry> = {
                    let mut registry = registry.lock();
                    registry.retain(|(state, _)| state.strong_count() > 0);
                    registry.clone()
                };

                for (state, signals) in entries {
                    let Some(state) = state.upgrade() else {
                        continue;
                    };
                    let finished = reap_finished(&state);
                    for name in finished {
                        signals.stopped.emit(name);
                    }
                }
            }
        });

        self.reaper_handle = Some(handle);
    }

    /// Create a ready-to-play sound sprite from encoded audio bytes.
    ///
    /// The bytes are decoded once into the sprite's shared buffer.
    pub fn create_sprite(&self, config: SoundSpriteConfig, data: Vec<u8>) -> Result<SoundSprite> {
        let buffer = SampleBuffer::decode(data)?;
        self.create_sprite_from_buffer(config, buffer)
    }

    /// Create a sound sprite over an already-decoded buffer.
    ///
    /// Lets several sprites share one decode.
    pub fn create_sprite_from_buffer(
        &self,
        config: SoundSpriteConfig,
        buffer: SampleBuffer,
    ) -> Result<SoundSprite> {
        let sprite = SoundSprite::new(self.handle.clone(), config, Some(buffer))?;
        self.register(&sprite);
        Ok(sprite)
    }

    /// Create a sprite whose source bytes are still in flight.
    ///
    /// The sprite is registered and controllable, but `play()` fails with
    /// [`AudioError::NotReady`] until
    /// [`finish_loading`](SoundSprite::finish_loading) succeeds.
    pub fn create_sprite_pending(&self, config: SoundSpriteConfig) -> Result<SoundSprite> {
        let sprite = SoundSprite::new(self.handle.clone(), config, None)?;
        self.register(&sprite);
        Ok(sprite)
    }

    /// Create a fire-and-forget sound effect from encoded audio bytes.
    pub fn create_sfx(&self, config: SfxConfig, data: Vec<u8>) -> Result<SfxSprite> {
        let buffer = SampleBuffer::decode(data)?;
        SfxSprite::new(self.handle.clone(), config, buffer)
    }

    /// Create a sound effect over an already-decoded buffer.
    pub fn create_sfx_from_buffer(
        &self,
        config: SfxConfig,
        buffer: SampleBuffer,
    ) -> Result<SfxSprite> {
        SfxSprite::new(self.handle.clone(), config, buffer)
    }

    fn register(&self, sprite: &SoundSprite) {
        self.registry.lock().push(sprite.registry_entry());
    }
}

/// Remove naturally-ended instances from a sprite, returning their region
/// names. The instance-map removal is the linearization point: an explicit
/// `stop()` racing this path finds the instance already gone and does
/// nothing, so cleanup happens exactly once.
fn reap_finished(state: &Arc<Mutex<SpriteState>>) -> Vec<String> {
    let mut guard = state.lock();
    let finished: Vec<String> = guard
        .instances
        .iter()
        .filter(|(_, instance)| {
            instance.state == PlayState::Playing
                && instance.sink.as_ref().map_or(true, |sink| sink.empty())
        })
        .map(|(name, _)| name.clone())
        .collect();

    for name in &finished {
        if let Some(instance) = guard.instances.remove(name) {
            tracing::debug!(
                target: "prism_stage_multimedia",
                sprite = %guard.id,
                region = %name,
                serial = instance.serial,
                "instance reached natural end"
            );
            if let Some(sink) = instance.sink {
                sink.stop();
            }
        }
    }
    finished
}

impl Drop for AudioOutput {
    fn drop(&mut self) {
        self.stop_reaper.store(true, Ordering::SeqCst);
        if let Some(handle) = self.reaper_handle.take() {
            let _ = handle.join();
        }
    }
}

// The output stream is pinned to this struct; access from other threads
// goes through the registry mutex only.
unsafe impl Send for AudioOutput {}
