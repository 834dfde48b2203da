//! Prism Stage: a canvas sprite-stage toolkit.
//!
//! This crate places interactive sprites on a 2D surface, routes
//! pointer/touch input to them, and (with the `multimedia` feature,
//! enabled by default) couples their events to a sound-sprite audio
//! engine.
//!
//! The interaction model in one paragraph: every frame, each live
//! [interaction point](scene::InteractionPoint) is resolved against the
//! sprite set topmost-first through a broad-phase/narrow-phase pipeline.
//! The sprite under an idle point is *hovered*; pressing captures the
//! sprite, and while captured it keeps receiving
//! [`point_collision`](scene::Sprite::point_collision) updates even when
//! the point leaves its geometry, which is what makes dragging a slider
//! feel right. Releasing on the same sprite is a *click*.
//!
//! # Quick start
//!
//! ```ignore
//! use prism_stage::prelude::*;
//!
//! let mut stage = StageManager::new();
//! stage.register_atlas("slider", &SpriteSheet::from_json(SLIDER_JSON)?)?;
//!
//! let volume = stage.create_slider("slider", SliderConfig {
//!     id: "volume".into(),
//!     width: 160.0,
//!     max: 10.0,
//!     ..SliderConfig::default()
//! })?;
//!
//! // wire a sound to the widget
//! let output = AudioOutput::new()?;
//! let ui_sounds = stage.create_sound_sprite(
//!     &output, "ui", &SoundSheet::from_json(SOUND_JSON)?, bytes,
//! )?;
//! ui_sounds.set_texture("tick")?;
//!
//! // in the winit handler: feed events to stage.tracker_mut()
//! // once per frame:
//! stage.frame();
//! ```
//!
//! Rendering stays with the host: widgets expose which texture to draw
//! (`slider.pill_texture()`, `button.texture()`), and the
//! [`sheet::TextureRegion`]s say where in the packed image it lives.

pub mod error;
pub mod input;
pub mod manager;
pub mod prelude;
pub mod scene;
pub mod sheet;
pub mod widget;

pub use error::{Result, StageError};
pub use input::PointerTracker;
pub use manager::StageManager;
pub use scene::{InteractionPoint, PointId, PointerKind, Scene, Sprite, SpriteBase, SpriteId};
pub use sheet::{SoundSheet, SpriteSheet, TextureMap, TextureRegion};

#[cfg(feature = "multimedia")]
pub use prism_stage_multimedia as multimedia;
