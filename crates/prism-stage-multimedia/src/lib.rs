//! Audio sprite engine for Prism Stage.
//!
//! This crate plays named time regions ("sound sprites") out of shared
//! decoded audio buffers:
//!
//! - **[`AudioOutput`]**: device connection, sprite factory, and the reaper
//!   that finalizes naturally-ended playback instances
//! - **[`SoundSprite`]**: region selection, play/pause/stop with seamless
//!   resume, one shared gain stage, lifecycle signals
//! - **[`SfxSprite`]**: fire-and-forget one-shot effects
//! - **[`SampleBuffer`]/[`RegionSource`]**: the shared immutable sample
//!   storage and the per-instance region playback source
//!
//! # Example
//!
//! ```ignore
//! use prism_stage_multimedia::{AudioOutput, Region, SoundSpriteConfig};
//! use std::collections::HashMap;
//!
//! let output = AudioOutput::new()?;
//!
//! let mut spritemap = HashMap::new();
//! spritemap.insert("beep".into(), Region::new(0.0, 0.5, false)?);
//! spritemap.insert("loop".into(), Region::new(0.5, 2.0, true)?);
//!
//! let sprite = output.create_sprite(
//!     SoundSpriteConfig { id: "ui".into(), spritemap, ..Default::default() },
//!     std::fs::read("assets/ui.ogg")?,
//! )?;
//!
//! sprite.set_texture("beep")?;
//! sprite.play()?;
//! sprite.set_volume(0.8)?;
//! ```

mod buffer;
mod error;
mod output;
mod sfx;
pub mod sound_sprite;

#[cfg(test)]
mod test_support;

pub use buffer::{RegionSource, SampleBuffer};
pub use error::{AudioError, Result};
pub use output::AudioOutput;
pub use sfx::{SfxConfig, SfxSprite};
pub use sound_sprite::{PlayState, Region, SoundSprite, SoundSpriteConfig};
