//! The stage manager: atlas registry, widget factories, frame protocol.
//!
//! A [`StageManager`] bundles the scene, the pointer tracker and the
//! registered texture atlases behind one owner. Construct it once and pass
//! it by reference to whatever owns the frame loop; there is no ambient
//! global to look it up through.

use std::collections::HashMap;

use crate::error::{Result, StageError};
use crate::input::PointerTracker;
use crate::scene::{Scene, SpriteId};
use crate::sheet::{build_texture_map, SpriteSheet, TextureMap};
use crate::widget::{Button, ButtonConfig, Checkbox, CheckboxConfig, Slider, SliderConfig};

#[cfg(feature = "multimedia")]
use crate::sheet::SoundSheet;
#[cfg(feature = "multimedia")]
use prism_stage_multimedia::{AudioOutput, SoundSprite, SoundSpriteConfig};

/// Owns the scene, the tracker, and the atlas registry.
///
/// # Example
///
/// ```ignore
/// let mut stage = StageManager::new();
/// stage.register_atlas("slider", &SpriteSheet::from_json(sheet_json)?)?;
/// let volume = stage.create_slider("slider", SliderConfig {
///     id: "volume".into(),
///     width: 160.0,
///     ..SliderConfig::default()
/// })?;
///
/// // per frame, after feeding winit events to stage.tracker_mut():
/// stage.frame();
/// ```
#[derive(Default)]
pub struct StageManager {
    scene: Scene,
    tracker: PointerTracker,
    atlases: HashMap<String, TextureMap>,
}

impl StageManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named atlas built from a sprite sheet.
    ///
    /// Fails if the name is already taken; re-registering an atlas under a
    /// live name would silently re-skin existing widgets.
    pub fn register_atlas(&mut self, name: &str, sheet: &SpriteSheet) -> Result<()> {
        if self.atlases.contains_key(name) {
            return Err(StageError::InvalidConfig {
                owner: name.to_string(),
                reason: "atlas name already registered".to_string(),
            });
        }
        self.atlases.insert(name.to_string(), build_texture_map(sheet));
        tracing::debug!(target: "prism_stage::scene", atlas = name, "atlas registered");
        Ok(())
    }

    /// Look up a registered atlas.
    pub fn atlas(&self, name: &str) -> Result<&TextureMap> {
        self.atlases
            .get(name)
            .ok_or_else(|| StageError::UnknownAtlas(name.to_string()))
    }

    /// Build a slider from a registered atlas and add it to the scene.
    pub fn create_slider(&mut self, atlas: &str, config: SliderConfig) -> Result<SpriteId> {
        let textures = self.atlas(atlas)?.clone();
        let slider = Slider::new(config, textures)?;
        Ok(self.scene.add(Box::new(slider)))
    }

    /// Build a button from a registered atlas and add it to the scene.
    pub fn create_button(&mut self, atlas: &str, config: ButtonConfig) -> Result<SpriteId> {
        let textures = self.atlas(atlas)?.clone();
        let button = Button::new(config, textures)?;
        Ok(self.scene.add(Box::new(button)))
    }

    /// Build a checkbox from a registered atlas and add it to the scene.
    pub fn create_checkbox(&mut self, atlas: &str, config: CheckboxConfig) -> Result<SpriteId> {
        let textures = self.atlas(atlas)?.clone();
        let checkbox = Checkbox::new(config, textures)?;
        Ok(self.scene.add(Box::new(checkbox)))
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    /// Feed winit events here between frames.
    pub fn tracker_mut(&mut self) -> &mut PointerTracker {
        &mut self.tracker
    }

    /// Run one frame: dispatch the tracked points, update sprites, retire
    /// edge flags.
    pub fn frame(&mut self) {
        let Self { scene, tracker, .. } = self;
        scene.dispatch(tracker.points_mut());
        scene.update();
        tracker.end_frame();
    }

    /// Create a ready audio sprite from a sound sheet.
    ///
    /// The sheet's spritemap is validated and handed to the injected
    /// [`AudioOutput`], which decodes `data` into the sprite's shared
    /// buffer.
    #[cfg(feature = "multimedia")]
    pub fn create_sound_sprite(
        &self,
        output: &AudioOutput,
        id: &str,
        sheet: &SoundSheet,
        data: Vec<u8>,
    ) -> prism_stage_multimedia::Result<SoundSprite> {
        let spritemap = sheet.regions()?;
        output.create_sprite(
            SoundSpriteConfig {
                id: id.to_string(),
                spritemap,
                ..SoundSpriteConfig::default()
            },
            data,
        )
    }

    /// Create a pending audio sprite whose bytes are still loading.
    ///
    /// `play()` fails with a not-ready error until the caller finishes the
    /// load with [`SoundSprite::finish_loading`].
    #[cfg(feature = "multimedia")]
    pub fn create_sound_sprite_pending(
        &self,
        output: &AudioOutput,
        id: &str,
        sheet: &SoundSheet,
    ) -> prism_stage_multimedia::Result<SoundSprite> {
        let spritemap = sheet.regions()?;
        output.create_sprite_pending(SoundSpriteConfig {
            id: id.to_string(),
            spritemap,
            ..SoundSpriteConfig::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::SpriteSheet;

    const CHECKBOX_SHEET: &str = r#"{
        "frames": {
            "Checked": { "frame": { "x": 0, "y": 0, "w": 16, "h": 16 } },
            "Checked_Hover": { "frame": { "x": 16, "y": 0, "w": 16, "h": 16 } },
            "Unchecked": { "frame": { "x": 32, "y": 0, "w": 16, "h": 16 } },
            "Unchecked_Hover": { "frame": { "x": 48, "y": 0, "w": 16, "h": 16 } }
        }
    }"#;

    #[test]
    fn atlas_registration_and_lookup() {
        let mut stage = StageManager::new();
        let sheet = SpriteSheet::from_json(CHECKBOX_SHEET).unwrap();

        stage.register_atlas("checkbox", &sheet).unwrap();
        assert!(stage.atlas("checkbox").is_ok());
        assert!(matches!(
            stage.atlas("slider"),
            Err(StageError::UnknownAtlas(_))
        ));

        // duplicate names are a configuration error
        assert!(matches!(
            stage.register_atlas("checkbox", &sheet),
            Err(StageError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn widgets_build_from_registered_atlases() {
        let mut stage = StageManager::new();
        let sheet = SpriteSheet::from_json(CHECKBOX_SHEET).unwrap();
        stage.register_atlas("checkbox", &sheet).unwrap();

        let key = stage
            .create_checkbox("checkbox", CheckboxConfig::default())
            .unwrap();
        assert_eq!(stage.scene().len(), 1);
        assert!(stage.scene().get(key).is_some());

        // the checkbox atlas cannot back a slider
        assert!(matches!(
            stage.create_slider("checkbox", SliderConfig::default()),
            Err(StageError::MissingTexture { .. })
        ));
    }

    #[test]
    fn frame_runs_the_dispatch_protocol() {
        use glam::Vec2;
        use winit::event::{ElementState, MouseButton};

        let mut stage = StageManager::new();
        let sheet = SpriteSheet::from_json(CHECKBOX_SHEET).unwrap();
        stage.register_atlas("checkbox", &sheet).unwrap();
        let key = stage
            .create_checkbox("checkbox", CheckboxConfig::default())
            .unwrap();

        stage.tracker_mut().handle_cursor_moved(Vec2::new(8.0, 8.0));
        stage
            .tracker_mut()
            .handle_mouse_input(ElementState::Pressed, MouseButton::Left);
        stage.frame();
        assert!(stage.scene().get(key).unwrap().base().active);

        stage
            .tracker_mut()
            .handle_mouse_input(ElementState::Released, MouseButton::Left);
        stage.frame();
        assert!(!stage.scene().get(key).unwrap().base().active);
        assert!(stage.scene().get(key).unwrap().base().hover);
    }
}
