//! Sheet descriptors: sprite sheets and sound sheets.
//!
//! A sprite sheet maps frame names to rectangles inside a packed image
//! (the TexturePacker JSON layout); a sound sheet maps region names to
//! time slices of an audio file (the audiosprite JSON layout). The toolkit
//! never decodes images or audio here; it only carries the geometry and
//! timing so widgets can validate what they need up front.
//!
//! Unknown JSON fields are ignored, so descriptors produced by newer
//! packer versions keep parsing.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{Result, StageError};

/// A rectangle inside the packed sheet image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct FrameRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// One named frame of a sprite sheet.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetFrame {
    /// Where the frame sits in the packed image.
    pub frame: FrameRect,
    #[serde(default)]
    pub rotated: bool,
    #[serde(default)]
    pub trimmed: bool,
}

/// Sheet-level metadata. Informational only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetMeta {
    #[serde(default)]
    pub app: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A sprite-sheet descriptor: named frames in a packed image.
#[derive(Debug, Clone, Deserialize)]
pub struct SpriteSheet {
    pub frames: HashMap<String, SheetFrame>,
    #[serde(default)]
    pub meta: Option<SheetMeta>,
}

impl SpriteSheet {
    /// Parse a descriptor from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| StageError::InvalidSheet(e.to_string()))
    }
}

/// A drawable rectangle handed to whatever renders the sprite.
///
/// The toolkit only hit-tests against these; slicing the actual pixels out
/// of the packed image is the renderer's job.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextureRegion {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Frame name to texture region, as consumed by widgets.
pub type TextureMap = HashMap<String, TextureRegion>;

/// Flatten a sprite sheet into the name-to-region map widgets consume.
pub fn build_texture_map(sheet: &SpriteSheet) -> TextureMap {
    sheet
        .frames
        .iter()
        .map(|(name, frame)| {
            (
                name.clone(),
                TextureRegion {
                    x: frame.frame.x,
                    y: frame.frame.y,
                    w: frame.frame.w,
                    h: frame.frame.h,
                },
            )
        })
        .collect()
}

/// Check that every named texture is present, failing fast otherwise.
///
/// Widgets call this at construction so a missing texture is a
/// [`StageError::MissingTexture`] up front, not a surprise at render time.
pub fn require_textures(map: &TextureMap, names: &[&str], owner: &str) -> Result<()> {
    for name in names {
        if !map.contains_key(*name) {
            return Err(StageError::MissingTexture {
                owner: owner.to_string(),
                name: (*name).to_string(),
            });
        }
    }
    Ok(())
}

/// One named time region of a sound sheet, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SoundRegionDef {
    pub start: f64,
    pub end: f64,
    #[serde(rename = "loop", default)]
    pub looping: bool,
}

/// A sound-sheet descriptor: named time slices of one audio file.
#[derive(Debug, Clone, Deserialize)]
pub struct SoundSheet {
    /// Source file candidates, in preference order.
    #[serde(default)]
    pub resources: Vec<String>,
    pub spritemap: HashMap<String, SoundRegionDef>,
}

impl SoundSheet {
    /// Parse a descriptor from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| StageError::InvalidSheet(e.to_string()))
    }
}

#[cfg(feature = "multimedia")]
impl SoundSheet {
    /// Convert the spritemap into validated audio regions.
    ///
    /// Fails if any region does not describe a forward time slice.
    pub fn regions(
        &self,
    ) -> prism_stage_multimedia::Result<HashMap<String, prism_stage_multimedia::Region>> {
        self.spritemap
            .iter()
            .map(|(name, def)| {
                let region = prism_stage_multimedia::Region::new(def.start, def.end, def.looping)?;
                Ok((name.clone(), region))
            })
            .collect()
    }
}
