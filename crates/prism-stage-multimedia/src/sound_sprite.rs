//! Audio sprites: named time regions played out of a shared buffer.
//!
//! A [`SoundSprite`] wraps one decoded [`SampleBuffer`] and a spritemap of
//! named [`Region`]s. `set_texture` selects the region that subsequent
//! `play()` calls operate on; each region has at most one live
//! [playback instance](PlayState) at a time, and instances for different
//! regions play concurrently against the same buffer and the same gain
//! value.
//!
//! State transitions follow play/pause/stop semantics:
//!
//! - `play()` spawns a new instance, resumes a paused one at
//!   `start + (elapsed % length)`, and is a no-op on one already playing.
//! - `pause()` stops the underlying sink and records the offset within the
//!   region so resume is seamless. No-op unless playing.
//! - `stop()` discards the instance entirely. Idempotent.
//! - A one-shot instance that reaches its natural end is finalized by the
//!   output reaper through the same cleanup path as `stop()`.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use rodio::{OutputStreamHandle, Sink};

use prism_stage_core::signal::{ConnectionId, Signal};

use crate::buffer::{RegionSource, SampleBuffer};
use crate::error::{AudioError, Result};

/// A named `[start, end)` time slice of a shared audio buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    /// Slice start, seconds into the buffer.
    pub start: f64,
    /// Slice end, seconds into the buffer.
    pub end: f64,
    /// Whether playback wraps back to `start` at `end`.
    pub looping: bool,
}

impl Region {
    /// Create a region, validating that it describes a forward time slice.
    pub fn new(start: f64, end: f64, looping: bool) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() || start < 0.0 || end <= start {
            return Err(AudioError::InvalidRegion { start, end });
        }
        Ok(Self { start, end, looping })
    }

    /// Length of the slice in seconds.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// The playback state of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    /// An instance is sounding.
    Playing,
    /// An instance exists but its sink was stopped; resumable.
    Paused,
    /// No live instance.
    Stopped,
}

/// One live realization of a region.
///
/// Owns its sink exclusively while playing; a paused instance keeps only
/// the bookkeeping needed to resume. Removed from the sprite's instance map
/// on every exit path.
pub(crate) struct PlaybackInstance {
    /// Distinguishes instances across the sprite's lifetime.
    pub(crate) serial: u64,
    /// Region bounds copied at spawn time.
    pub(crate) region: Region,
    /// Wall-clock start, rebased on resume so elapsed arithmetic holds.
    pub(crate) started: Instant,
    /// Offset within the region recorded at pause.
    pub(crate) resume_at: f64,
    pub(crate) state: PlayState,
    pub(crate) sink: Option<Sink>,
}

/// Offset within a region after `elapsed` seconds of playback.
pub(crate) fn wrapped_offset(elapsed: f64, length: f64) -> f64 {
    if length > 0.0 {
        elapsed % length
    } else {
        0.0
    }
}

pub(crate) struct SpriteState {
    pub(crate) id: String,
    pub(crate) buffer: Option<SampleBuffer>,
    pub(crate) spritemap: HashMap<String, Region>,
    pub(crate) selected: Option<String>,
    pub(crate) volume: f32,
    pub(crate) next_serial: u64,
    pub(crate) instances: HashMap<String, PlaybackInstance>,
}

/// Lifecycle signals shared with the output reaper.
pub(crate) struct SpriteSignals {
    /// Emitted when a region starts or resumes. Argument: region name.
    pub(crate) playing: Signal<String>,
    /// Emitted when a region is paused. Argument: region name.
    pub(crate) paused: Signal<String>,
    /// Emitted when an instance is discarded, by stop or by reaching its
    /// natural end. Argument: region name.
    pub(crate) stopped: Signal<String>,
}

impl SpriteSignals {
    pub(crate) fn new() -> Self {
        Self {
            playing: Signal::new(),
            paused: Signal::new(),
            stopped: Signal::new(),
        }
    }
}

/// Configuration for creating a [`SoundSprite`].
///
/// Defaults: empty spritemap, volume `1.0`, no region pre-selected.
#[derive(Debug, Clone)]
pub struct SoundSpriteConfig {
    /// Identifier used in errors and logs.
    pub id: String,
    /// Named regions of the source buffer.
    pub spritemap: HashMap<String, Region>,
    /// Initial gain, `[0, 1]`.
    pub volume: f32,
    /// Region to pre-select, as if `set_texture` had been called.
    pub texture: Option<String>,
}

impl Default for SoundSpriteConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            spritemap: HashMap::new(),
            volume: 1.0,
            texture: None,
        }
    }
}

pub(crate) fn validate_volume(volume: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&volume) {
        return Err(AudioError::VolumeOutOfRange(volume));
    }
    Ok(())
}

/// An audio sprite: one shared buffer, a spritemap of regions, one gain.
///
/// Created through [`AudioOutput`](crate::AudioOutput), which also runs the
/// reaper that finalizes naturally-ended instances. The handle is cheap to
/// clone; clones control the same underlying sprite.
///
/// # Example
///
/// ```ignore
/// let output = AudioOutput::new()?;
/// let sprite = output.create_sprite(config, bytes)?;
/// sprite.set_texture("beep")?;
/// sprite.play()?;
/// sprite.set_volume(0.5)?;
/// sprite.stop();
/// ```
#[derive(Clone)]
pub struct SoundSprite {
    state: Arc<Mutex<SpriteState>>,
    signals: Arc<SpriteSignals>,
    handle: OutputStreamHandle,
}

impl SoundSprite {
    pub(crate) fn new(
        handle: OutputStreamHandle,
        config: SoundSpriteConfig,
        buffer: Option<SampleBuffer>,
    ) -> Result<Self> {
        validate_volume(config.volume)?;
        if let Some(texture) = &config.texture {
            if !config.spritemap.contains_key(texture) {
                return Err(AudioError::UnknownRegion {
                    sprite: config.id,
                    name: texture.clone(),
                });
            }
        }

        Ok(Self {
            state: Arc::new(Mutex::new(SpriteState {
                id: config.id,
                buffer,
                spritemap: config.spritemap,
                selected: config.texture,
                volume: config.volume,
                next_serial: 0,
                instances: HashMap::new(),
            })),
            signals: Arc::new(SpriteSignals::new()),
            handle,
        })
    }

    pub(crate) fn registry_entry(&self) -> (Weak<Mutex<SpriteState>>, Arc<SpriteSignals>) {
        (Arc::downgrade(&self.state), self.signals.clone())
    }

    /// The sprite identifier.
    pub fn id(&self) -> String {
        self.state.lock().id.clone()
    }

    /// Whether the source buffer has been decoded.
    ///
    /// A sprite created pending is not ready until
    /// [`finish_loading`](Self::finish_loading) succeeds; `play()` on a
    /// sprite that is not ready fails with [`AudioError::NotReady`].
    pub fn is_ready(&self) -> bool {
        self.state.lock().buffer.is_some()
    }

    /// Supply and decode the source bytes of a pending sprite.
    ///
    /// The buffer is loaded at most once; a second call on an already-ready
    /// sprite is a no-op.
    pub fn finish_loading(&self, data: Vec<u8>) -> Result<()> {
        let buffer = SampleBuffer::decode(data)?;
        let mut state = self.state.lock();
        if state.buffer.is_some() {
            tracing::debug!(
                target: "prism_stage_multimedia",
                sprite = %state.id,
                "buffer already loaded, ignoring"
            );
            return Ok(());
        }
        state.buffer = Some(buffer);
        Ok(())
    }

    /// Select the region that subsequent `play()` calls will use.
    ///
    /// Fails with [`AudioError::UnknownRegion`] if `name` is absent from
    /// the spritemap; the check happens here, before playback is attempted.
    pub fn set_texture(&self, name: &str) -> Result<()> {
        let mut state = self.state.lock();
        if !state.spritemap.contains_key(name) {
            return Err(AudioError::UnknownRegion {
                sprite: state.id.clone(),
                name: name.to_string(),
            });
        }
        state.selected = Some(name.to_string());
        Ok(())
    }

    /// Start or resume playback of the selected region.
    ///
    /// - No live instance: spawns one at the region start, honoring the
    ///   region's loop flag.
    /// - Paused instance: resumes at `start + (elapsed % length)` with a
    ///   fresh source.
    /// - Playing instance: no-op; a second `play()` never spawns a
    ///   duplicate sounding instance.
    pub fn play(&self) -> Result<()> {
        let emit_name;
        {
            let mut guard = self.state.lock();
            let state = &mut *guard;

            let name = state
                .selected
                .clone()
                .ok_or_else(|| AudioError::NoRegionSelected(state.id.clone()))?;
            let buffer = state
                .buffer
                .clone()
                .ok_or_else(|| AudioError::NotReady(state.id.clone()))?;
            let region = *state
                .spritemap
                .get(&name)
                .ok_or_else(|| AudioError::UnknownRegion {
                    sprite: state.id.clone(),
                    name: name.clone(),
                })?;
            let volume = state.volume;

            match state.instances.get_mut(&name) {
                Some(instance) if instance.state == PlayState::Playing => {
                    tracing::trace!(
                        target: "prism_stage_multimedia",
                        sprite = %state.id,
                        region = %name,
                        "play() on a playing region is a no-op"
                    );
                    return Ok(());
                }
                Some(instance) => {
                    // Paused: fresh source, resumed inside the region.
                    let offset = instance.resume_at;
                    let sink = Sink::try_new(&self.handle)?;
                    sink.set_volume(volume);
                    sink.append(RegionSource::new(buffer, region, offset));
                    sink.play();
                    instance.sink = Some(sink);
                    instance.started = Instant::now() - Duration::from_secs_f64(offset);
                    instance.state = PlayState::Playing;
                    tracing::debug!(
                        target: "prism_stage_multimedia",
                        sprite = %state.id,
                        region = %name,
                        serial = instance.serial,
                        offset,
                        "resumed instance"
                    );
                }
                None => {
                    let sink = Sink::try_new(&self.handle)?;
                    sink.set_volume(volume);
                    sink.append(RegionSource::new(buffer, region, 0.0));
                    sink.play();
                    let serial = state.next_serial;
                    state.next_serial += 1;
                    state.instances.insert(
                        name.clone(),
                        PlaybackInstance {
                            serial,
                            region,
                            started: Instant::now(),
                            resume_at: 0.0,
                            state: PlayState::Playing,
                            sink: Some(sink),
                        },
                    );
                    tracing::debug!(
                        target: "prism_stage_multimedia",
                        sprite = %state.id,
                        region = %name,
                        serial,
                        looping = region.looping,
                        "spawned instance"
                    );
                }
            }
            emit_name = name;
        }
        self.signals.playing.emit(emit_name);
        Ok(())
    }

    /// Pause the selected region's instance.
    ///
    /// Stops the underlying sink immediately and records the offset within
    /// the region so `play()` resumes seamlessly. No-op if the region is
    /// already paused or stopped; never an error.
    pub fn pause(&self) {
        let mut emit_name = None;
        {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            let Some(name) = state.selected.clone() else {
                return;
            };
            if let Some(instance) = state.instances.get_mut(&name) {
                if instance.state == PlayState::Playing {
                    let elapsed = instance.started.elapsed().as_secs_f64();
                    instance.resume_at = wrapped_offset(elapsed, instance.region.length());
                    if let Some(sink) = instance.sink.take() {
                        sink.stop();
                    }
                    instance.state = PlayState::Paused;
                    emit_name = Some(name);
                }
            }
        }
        if let Some(name) = emit_name {
            self.signals.paused.emit(name);
        }
    }

    /// Stop and discard the selected region's instance.
    ///
    /// Safe to call from any state; double-stop is a no-op.
    pub fn stop(&self) {
        let mut emit_name = None;
        {
            let mut state = self.state.lock();
            let Some(name) = state.selected.clone() else {
                return;
            };
            if let Some(instance) = state.instances.remove(&name) {
                if let Some(sink) = instance.sink {
                    sink.stop();
                }
                emit_name = Some(name);
            }
        }
        if let Some(name) = emit_name {
            self.signals.stopped.emit(name);
        }
    }

    /// Stop and discard every live instance on this sprite.
    pub fn stop_all(&self) {
        let mut emitted = Vec::new();
        {
            let mut state = self.state.lock();
            for (name, instance) in state.instances.drain() {
                if let Some(sink) = instance.sink {
                    sink.stop();
                }
                emitted.push(name);
            }
        }
        for name in emitted {
            self.signals.stopped.emit(name);
        }
    }

    /// Set the shared gain, applied to all current and future instances.
    ///
    /// Fails with [`AudioError::VolumeOutOfRange`] for values outside
    /// `[0, 1]`.
    pub fn set_volume(&self, volume: f32) -> Result<()> {
        validate_volume(volume)?;
        let mut state = self.state.lock();
        state.volume = volume;
        for instance in state.instances.values() {
            if let Some(sink) = &instance.sink {
                sink.set_volume(volume);
            }
        }
        Ok(())
    }

    /// The shared gain value.
    pub fn volume(&self) -> f32 {
        self.state.lock().volume
    }

    /// Playback state of the selected region.
    ///
    /// `Stopped` when no region is selected or no instance is live.
    pub fn playback_state(&self) -> PlayState {
        let state = self.state.lock();
        state
            .selected
            .as_ref()
            .and_then(|name| state.instances.get(name))
            .map_or(PlayState::Stopped, |instance| instance.state)
    }

    /// Number of live (playing or paused) instances across all regions.
    pub fn live_instances(&self) -> usize {
        self.state.lock().instances.len()
    }

    /// Connect a callback to the `playing` signal (argument: region name).
    pub fn on_playing<F>(&self, callback: F) -> ConnectionId
    where
        F: Fn(&String) + Send + Sync + 'static,
    {
        self.signals.playing.connect(callback)
    }

    /// Disconnect a `playing` callback.
    pub fn disconnect_playing(&self, id: ConnectionId) -> bool {
        self.signals.playing.disconnect(id)
    }

    /// Connect a callback to the `paused` signal (argument: region name).
    pub fn on_paused<F>(&self, callback: F) -> ConnectionId
    where
        F: Fn(&String) + Send + Sync + 'static,
    {
        self.signals.paused.connect(callback)
    }

    /// Disconnect a `paused` callback.
    pub fn disconnect_paused(&self, id: ConnectionId) -> bool {
        self.signals.paused.disconnect(id)
    }

    /// Connect a callback to the `stopped` signal (argument: region name).
    ///
    /// Fires for explicit `stop()` and for natural end of a one-shot
    /// instance alike.
    pub fn on_stopped<F>(&self, callback: F) -> ConnectionId
    where
        F: Fn(&String) + Send + Sync + 'static,
    {
        self.signals.stopped.connect(callback)
    }

    /// Disconnect a `stopped` callback.
    pub fn disconnect_stopped(&self, id: ConnectionId) -> bool {
        self.signals.stopped.disconnect(id)
    }
}

// The stream handle is only used behind the state mutex.
unsafe impl Send for SoundSprite {}
