//! Interaction points: normalized pointer/touch contacts.

use glam::Vec2;

use super::sprite::SpriteId;

/// Stable identifier for one pointer/touch contact.
///
/// The mouse pointer keeps one id for its whole life; each touch contact
/// gets a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointId(pub u64);

/// What kind of contact a point represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// One pointer/touch contact as seen by the scene.
///
/// A point carries both its surface-space position and, transiently, its
/// position in the local space of whichever sprite is currently being
/// tested (`local` is rewritten by the hit-test walk before each phase
/// check). `first_down` and `clicked` are edge flags: the tracker raises
/// `first_down` on the press event and dispatch consumes it; dispatch
/// raises `clicked` on a press-release pair that resolved to the same
/// sprite and the tracker clears it at frame end.
///
/// Invariants: at most one `active` sprite (capture) and at most one
/// `hover` sprite per point; while captured, `hover` is `None`.
#[derive(Debug, Clone)]
pub struct InteractionPoint {
    pub id: PointId,
    pub kind: PointerKind,
    /// Position in surface space.
    pub pos: Vec2,
    /// Position in the local space of the sprite currently being tested.
    pub local: Vec2,
    /// Whether the contact is currently pressed.
    pub down: bool,
    /// Edge flag: press and release resolved to the same sprite.
    pub clicked: bool,
    /// Whether the point is pinned to its `active` sprite.
    pub captured: bool,
    /// Edge flag: the press happened since the last dispatch.
    pub first_down: bool,
    /// The sprite holding capture, if any.
    pub active: Option<SpriteId>,
    /// The sprite under the point, when no capture is held.
    pub hover: Option<SpriteId>,
}

impl InteractionPoint {
    /// Create a fresh, un-pressed point at `pos`.
    pub fn new(id: PointId, kind: PointerKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            local: Vec2::ZERO,
            down: false,
            clicked: false,
            captured: false,
            first_down: false,
            active: None,
            hover: None,
        }
    }

    /// Mark the point pressed, raising the `first_down` edge.
    pub fn press(&mut self) {
        if !self.down {
            self.down = true;
            self.first_down = true;
        }
    }

    /// Mark the point released.
    pub fn release(&mut self) {
        self.down = false;
        self.first_down = false;
    }
}
