//! A toggling checkbox sprite.

use glam::Affine2;

use prism_stage_core::Signal;

use crate::error::Result;
use crate::scene::{Sprite, SpriteBase, SpriteConfig};
use crate::sheet::{require_textures, TextureMap};

const REQUIRED_TEXTURES: [&str; 4] = [
    "Checked",
    "Checked_Hover",
    "Unchecked",
    "Unchecked_Hover",
];

/// Configuration for a [`Checkbox`].
///
/// Defaults: empty id, identity placement, `z = 0`, unchecked.
#[derive(Debug, Clone)]
pub struct CheckboxConfig {
    pub id: String,
    pub placement: Affine2,
    pub z: f32,
    pub checked: bool,
}

impl Default for CheckboxConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            placement: Affine2::IDENTITY,
            z: 0.0,
            checked: false,
        }
    }
}

/// A checkbox that toggles on click.
///
/// Each resolved click flips `checked` and emits `toggled` with the new
/// state. Size comes from the `Unchecked` texture.
pub struct Checkbox {
    base: SpriteBase,
    checked: bool,
    texture: &'static str,
    /// Emitted with the new checked state on every toggle.
    pub toggled: Signal<bool>,
}

impl Checkbox {
    pub fn new(config: CheckboxConfig, textures: TextureMap) -> Result<Self> {
        require_textures(&textures, &REQUIRED_TEXTURES, &config.id)?;
        let size = textures.get("Unchecked").copied().unwrap_or_default();

        let mut base = SpriteBase::new(
            SpriteConfig {
                id: config.id,
                placement: config.placement,
                z: config.z,
            },
            textures,
        );
        base.set_size(size.w, size.h);

        Ok(Self {
            base,
            checked: config.checked,
            texture: "Unchecked",
            toggled: Signal::new(),
        })
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Set the state programmatically; emits `toggled` on actual change.
    pub fn set_checked(&mut self, checked: bool) {
        if self.checked != checked {
            self.checked = checked;
            self.toggled.emit(checked);
        }
    }

    /// The texture the renderer should draw this frame.
    pub fn texture(&self) -> &str {
        self.texture
    }
}

impl Sprite for Checkbox {
    fn base(&self) -> &SpriteBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SpriteBase {
        &mut self.base
    }

    fn on_click(&mut self) {
        self.checked = !self.checked;
        self.toggled.emit(self.checked);
    }

    fn update(&mut self) {
        self.texture = match (self.checked, self.base.hover) {
            (true, true) => "Checked_Hover",
            (true, false) => "Checked",
            (false, true) => "Unchecked_Hover",
            (false, false) => "Unchecked",
        };
    }
}
