//! A push-button sprite.

use glam::Affine2;

use crate::error::Result;
use crate::scene::{Sprite, SpriteBase, SpriteConfig};
use crate::sheet::{require_textures, TextureMap};

const REQUIRED_TEXTURES: [&str; 4] = ["Active", "Active_Hover", "Inactive", "Inactive_Hover"];

/// Configuration for a [`Button`].
///
/// Defaults: empty id, identity placement, `z = 0`, not selected.
#[derive(Debug, Clone)]
pub struct ButtonConfig {
    pub id: String,
    pub placement: Affine2,
    pub z: f32,
    /// Whether the button starts in its selected (active art) state.
    pub selected: bool,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            placement: Affine2::IDENTITY,
            z: 0.0,
            selected: false,
        }
    }
}

/// A box-shaped button.
///
/// Clicks arrive through the base `clicked` signal; the `selected` flag
/// only drives which texture family `update` picks. Size comes from the
/// `Active` texture.
pub struct Button {
    base: SpriteBase,
    selected: bool,
    texture: &'static str,
}

impl Button {
    pub fn new(config: ButtonConfig, textures: TextureMap) -> Result<Self> {
        require_textures(&textures, &REQUIRED_TEXTURES, &config.id)?;
        let size = textures.get("Active").copied().unwrap_or_default();

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
            selected: config.selected,
            texture: "Inactive",
        })
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// The texture the renderer should draw this frame.
    pub fn texture(&self) -> &str {
        self.texture
    }
}

impl Sprite for Button {
    fn base(&self) -> &SpriteBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SpriteBase {
        &mut self.base
    }

    fn update(&mut self) {
        self.texture = match (self.selected, self.base.hover) {
            (true, true) => "Active_Hover",
            (true, false) => "Active",
            (false, true) => "Inactive_Hover",
            (false, false) => "Inactive",
        };
    }
}
