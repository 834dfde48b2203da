//! Convenience re-exports for application code.
//!
//! ```ignore
//! use prism_stage::prelude::*;
//! ```

pub use crate::error::{Result, StageError};
pub use crate::input::PointerTracker;
pub use crate::manager::StageManager;
pub use crate::scene::{
    InteractionPoint, PointId, PointerKind, Scene, Sprite, SpriteBase, SpriteConfig, SpriteId,
};
pub use crate::sheet::{SoundSheet, SpriteSheet, TextureMap, TextureRegion};
pub use crate::widget::{Button, ButtonConfig, Checkbox, CheckboxConfig, Slider, SliderConfig};

pub use prism_stage_core::{ConnectionId, Signal};

#[cfg(feature = "multimedia")]
pub use prism_stage_multimedia::{
    AudioError, AudioOutput, PlayState, Region, SfxConfig, SfxSprite, SoundSprite,
    SoundSpriteConfig,
};
