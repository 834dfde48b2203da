//! A draggable slider sprite.

use glam::Affine2;

use prism_stage_core::Signal;

use crate::error::{Result, StageError};
use crate::scene::{InteractionPoint, Sprite, SpriteBase, SpriteConfig};
use crate::sheet::{require_textures, TextureMap, TextureRegion};

const REQUIRED_TEXTURES: [&str; 6] = [
    "Line_Cap_Left",
    "Line_Cap_Right",
    "Line",
    "Pill",
    "Pill_Active",
    "Pill_Hover",
];

/// Configuration for a [`Slider`].
///
/// Defaults: empty id, identity placement, `z = 0`, `width = 100`,
/// range `0..=1`, `value = 0`.
#[derive(Debug, Clone)]
pub struct SliderConfig {
    pub id: String,
    pub placement: Affine2,
    pub z: f32,
    /// Track width in local units. Must exceed the pill width.
    pub width: f32,
    pub min: f32,
    pub max: f32,
    /// Initial value; clamped into `[min, max]`.
    pub value: f32,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            placement: Affine2::IDENTITY,
            z: 0.0,
            width: 100.0,
            min: 0.0,
            max: 1.0,
            value: 0.0,
        }
    }
}

/// A horizontal slider: a track with a draggable pill.
///
/// The narrow phase hits only the pill at its current position; once
/// pressed, the slider holds capture and recomputes its value from the
/// point's local x on every pass, so the drag keeps working when the point
/// leaves the pill. `value_changed` fires only when the computed value
/// actually differs from the previous one.
#[derive(Debug)]
pub struct Slider {
    base: SpriteBase,
    value: f32,
    min: f32,
    max: f32,
    width: f32,
    /// Texture the renderer should use for the pill this frame.
    pill_texture: &'static str,
    /// Emitted with the new value whenever it changes.
    pub value_changed: Signal<f32>,
}

impl Slider {
    /// Build a slider, validating textures and ranges up front.
    pub fn new(config: SliderConfig, textures: TextureMap) -> Result<Self> {
        require_textures(&textures, &REQUIRED_TEXTURES, &config.id)?;

        let Some(&pill) = textures.get("Pill_Hover") else {
            return Err(StageError::MissingTexture {
                owner: config.id,
                name: "Pill_Hover".to_string(),
            });
        };
        if config.max <= config.min {
            return Err(StageError::InvalidConfig {
                owner: config.id,
                reason: format!("max ({}) must exceed min ({})", config.max, config.min),
            });
        }
        if config.width <= pill.w {
            return Err(StageError::InvalidConfig {
                owner: config.id,
                reason: format!(
                    "width ({}) must exceed the pill width ({})",
                    config.width, pill.w
                ),
            });
        }

        let mut base = SpriteBase::new(
            SpriteConfig {
                id: config.id,
                placement: config.placement,
                z: config.z,
            },
            textures,
        );
        base.set_size(config.width, pill.h);

        Ok(Self {
            base,
            value: config.value.clamp(config.min, config.max),
            min: config.min,
            max: config.max,
            width: config.width,
            pill_texture: "Pill",
            value_changed: Signal::new(),
        })
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Set the value programmatically; clamped, emits on actual change.
    pub fn set_value(&mut self, value: f32) {
        let clamped = value.clamp(self.min, self.max);
        if clamped != self.value {
            self.value = clamped;
            self.value_changed.emit(clamped);
        }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// The pill texture the renderer should draw this frame.
    pub fn pill_texture(&self) -> &str {
        self.pill_texture
    }

    fn pill(&self) -> TextureRegion {
        self.base
            .texture("Pill_Hover")
            .copied()
            .unwrap_or_default()
    }

    /// The pill's left edge for the current value, in local units.
    fn value_x(&self) -> f32 {
        let slider_distance = self.width - self.pill().w;
        let percent = (self.value - self.min) / (self.max - self.min);
        slider_distance * percent
    }
}

impl Sprite for Slider {
    fn base(&self) -> &SpriteBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SpriteBase {
        &mut self.base
    }

    fn narrow_phase(&self, point: &InteractionPoint) -> bool {
        if self.base.captured_by(point) {
            return true;
        }
        let pill = self.pill();
        let value_x = self.value_x();
        point.local.y >= 0.0
            && point.local.y <= pill.h
            && point.local.x >= value_x
            && point.local.x <= value_x + pill.w
    }

    fn point_collision(&mut self, point: &InteractionPoint) -> bool {
        if self.base.captured_by(point) {
            let previous = self.value;
            let pill_width = self.pill().w;
            let slider_distance = self.width - pill_width;
            let true_tx = point.local.x - pill_width * 0.5;
            let clamped_tx = true_tx.clamp(0.0, slider_distance);
            let range = self.max - self.min;
            self.value = self.min + range * clamped_tx / slider_distance;
            if self.value != previous {
                self.value_changed.emit(self.value);
            }
        }
        true
    }

    fn update(&mut self) {
        self.pill_texture = if self.base.active {
            "Pill_Active"
        } else if self.base.hover {
            "Pill_Hover"
        } else {
            "Pill"
        };
    }
}
