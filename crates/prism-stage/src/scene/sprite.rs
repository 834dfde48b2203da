//! The sprite capability set and the shared per-sprite state.

use glam::{Affine2, Vec2};
use slotmap::new_key_type;

use prism_stage_core::Signal;

use crate::sheet::{TextureMap, TextureRegion};

use super::interaction::InteractionPoint;

new_key_type! {
    /// Scene-assigned sprite key.
    pub struct SpriteId;
}

/// Interaction signals every sprite carries.
pub struct SpriteSignals {
    /// Press and release both resolved to this sprite.
    pub clicked: Signal<()>,
    /// The sprite gained hover from some interaction point.
    pub hover_entered: Signal<()>,
    /// The sprite lost hover from every interaction point.
    pub hover_exited: Signal<()>,
}

impl SpriteSignals {
    fn new() -> Self {
        Self {
            clicked: Signal::new(),
            hover_entered: Signal::new(),
            hover_exited: Signal::new(),
        }
    }
}

/// Placement configuration shared by all sprite kinds.
///
/// Defaults: empty id, identity placement, `z = 0.0`.
#[derive(Debug, Clone)]
pub struct SpriteConfig {
    /// Identifier used in errors and logs.
    pub id: String,
    /// Local-to-surface affine transform.
    pub placement: Affine2,
    /// Stacking order; higher z is tested (and drawn) on top.
    pub z: f32,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            placement: Affine2::IDENTITY,
            z: 0.0,
        }
    }
}

/// State common to every sprite: placement, size, interaction flags,
/// textures and signals.
///
/// Widgets embed a `SpriteBase` and expose it through the [`Sprite`]
/// trait's `base`/`base_mut` accessors; the scene drives the flags.
pub struct SpriteBase {
    key: SpriteId,
    id: String,
    placement: Affine2,
    /// Cached inverse of `placement`; surface-to-local.
    inverse: Affine2,
    z: f32,
    width: f32,
    height: f32,
    /// Some interaction point is over this sprite.
    pub hover: bool,
    /// Some interaction point holds capture on this sprite.
    pub active: bool,
    textures: TextureMap,
    pub signals: SpriteSignals,
}

impl SpriteBase {
    /// Build a base from placement config and the widget's texture map.
    ///
    /// Size starts at zero; widgets set it once they know their texture
    /// dimensions.
    pub fn new(config: SpriteConfig, textures: TextureMap) -> Self {
        Self {
            key: SpriteId::default(),
            id: config.id,
            placement: config.placement,
            inverse: config.placement.inverse(),
            z: config.z,
            width: 0.0,
            height: 0.0,
            hover: false,
            active: false,
            textures,
            signals: SpriteSignals::new(),
        }
    }

    /// The sprite's string identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The scene key, valid once the sprite has been added to a scene.
    pub fn key(&self) -> SpriteId {
        self.key
    }

    pub(crate) fn set_key(&mut self, key: SpriteId) {
        self.key = key;
    }

    /// Stacking order.
    pub fn z(&self) -> f32 {
        self.z
    }

    pub(crate) fn set_z(&mut self, z: f32) {
        self.z = z;
    }

    /// The local-to-surface placement transform.
    pub fn placement(&self) -> Affine2 {
        self.placement
    }

    /// Move the sprite; the surface-to-local inverse is recomputed.
    pub fn set_placement(&mut self, placement: Affine2) {
        self.placement = placement;
        self.inverse = placement.inverse();
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// A surface-space point expressed in this sprite's local space.
    pub fn to_local(&self, point: Vec2) -> Vec2 {
        self.inverse.transform_point2(point)
    }

    /// Whether a local-space point falls inside the sprite's bounding box.
    pub fn in_bounds(&self, local: Vec2) -> bool {
        local.x >= 0.0 && local.x <= self.width && local.y >= 0.0 && local.y <= self.height
    }

    /// Whether this sprite holds capture for the given point.
    ///
    /// Capture overrides geometry: phase checks short-circuit to true for
    /// the capturing point, and only for it.
    pub fn captured_by(&self, point: &InteractionPoint) -> bool {
        self.active && point.active == Some(self.key)
    }

    /// Look up a texture region by frame name.
    pub fn texture(&self, name: &str) -> Option<&TextureRegion> {
        self.textures.get(name)
    }

    /// The sprite's full texture map.
    pub fn textures(&self) -> &TextureMap {
        &self.textures
    }
}

/// The capability set the hit-test pipeline consumes.
///
/// `broad_phase` must be a conservative superset of `narrow_phase`: the
/// narrow phase is only evaluated for broad-phase survivors. The defaults
/// give box-shaped sprites for free; widgets with finer shapes override
/// `narrow_phase` only.
pub trait Sprite {
    fn base(&self) -> &SpriteBase;
    fn base_mut(&mut self) -> &mut SpriteBase;

    /// Cheap conservative test against `point.local`.
    fn broad_phase(&self, point: &InteractionPoint) -> bool {
        let base = self.base();
        base.captured_by(point) || base.in_bounds(point.local)
    }

    /// Precise test against `point.local`, evaluated only when
    /// [`broad_phase`](Self::broad_phase) passed.
    fn narrow_phase(&self, point: &InteractionPoint) -> bool {
        self.broad_phase(point)
    }

    /// Invoked on the winning sprite every pass while it holds capture,
    /// including when the point has left its geometry. This is where
    /// continuous widgets (a dragged slider) react to movement.
    fn point_collision(&mut self, _point: &InteractionPoint) -> bool {
        true
    }

    /// Invoked when a press-release pair resolved to this sprite, just
    /// before the `clicked` signal is emitted.
    fn on_click(&mut self) {}

    /// Per-frame hook for state-driven texture/cursor selection.
    fn update(&mut self) {}
}
