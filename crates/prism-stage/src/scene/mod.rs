//! The scene: sprite storage, hit testing, and input dispatch.
//!
//! A [`Scene`] owns the sprite set and resolves, once per frame, which
//! sprite each interaction point belongs to. Resolution is a two-phase
//! pipeline (a cheap broad-phase bounding check, then a precise
//! narrow-phase test) walked over the sprites topmost-first. A pressed
//! point *captures* its sprite: until release, every pass routes to that
//! sprite regardless of geometry, which is what lets a slider keep
//! tracking a drag that wanders off the pill.
//!
//! # Frame protocol
//!
//! ```ignore
//! scene.dispatch(tracker.points_mut());
//! scene.update();
//! tracker.end_frame();
//! ```

pub mod interaction;
pub mod sprite;


use std::collections::HashSet;

use slotmap::SlotMap;

pub use interaction::{InteractionPoint, PointId, PointerKind};
pub use sprite::{Sprite, SpriteBase, SpriteConfig, SpriteId, SpriteSignals};

/// The sprite set and its dispatch state machine.
///
/// Sprites are stored behind stable [`SpriteId`] keys and walked in
/// z-descending order; ties keep insertion order, so dispatch is
/// deterministic for equal z.
#[derive(Default)]
pub struct Scene {
    sprites: SlotMap<SpriteId, Box<dyn Sprite>>,
    /// Walk order, topmost first. Stable across equal z.
    order: Vec<SpriteId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sprite, returning its scene key.
    pub fn add(&mut self, sprite: Box<dyn Sprite>) -> SpriteId {
        let key = self.sprites.insert(sprite);
        if let Some(sprite) = self.sprites.get_mut(key) {
            sprite.base_mut().set_key(key);
            tracing::debug!(
                target: "prism_stage::scene",
                sprite = %sprite.base().id(),
                z = sprite.base().z(),
                "sprite added"
            );
        }
        self.order.push(key);
        self.resort();
        key
    }

    /// Remove a sprite. Points referencing it forget it on the next
    /// dispatch pass.
    pub fn remove(&mut self, key: SpriteId) -> Option<Box<dyn Sprite>> {
        self.order.retain(|&k| k != key);
        self.sprites.remove(key)
    }

    pub fn get(&self, key: SpriteId) -> Option<&dyn Sprite> {
        self.sprites.get(key).map(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, key: SpriteId) -> Option<&mut (dyn Sprite + '_)> {
        match self.sprites.get_mut(key) {
            Some(s) => Some(s.as_mut()),
            None => None,
        }
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// The current walk order, topmost first.
    pub fn order(&self) -> &[SpriteId] {
        &self.order
    }

    /// Change a sprite's stacking order.
    pub fn set_z(&mut self, key: SpriteId, z: f32) {
        if let Some(sprite) = self.sprites.get_mut(key) {
            sprite.base_mut().set_z(z);
            self.resort();
        }
    }

    fn resort(&mut self) {
        let sprites = &self.sprites;
        // Stable sort: equal z keeps insertion order.
        self.order.sort_by(|&a, &b| {
            sprites[b]
                .base()
                .z()
                .partial_cmp(&sprites[a].base().z())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// Resolve which sprite owns `point` this pass, topmost-first.
    ///
    /// Sets `point.local` for each sprite before testing it; broad-phase
    /// failures skip to the next sprite, the first narrow-phase pass wins
    /// and stops the walk. Returns `None` when nothing claims the point.
    pub fn hit_test(&self, point: &mut InteractionPoint) -> Option<SpriteId> {
        for &key in &self.order {
            let Some(sprite) = self.sprites.get(key) else {
                continue;
            };
            point.local = sprite.base().to_local(point.pos);
            if !sprite.broad_phase(point) {
                continue;
            }
            if sprite.narrow_phase(point) {
                return Some(key);
            }
        }
        None
    }

    /// Run one dispatch pass over all interaction points.
    ///
    /// Points are processed independently; per point, capture is honored
    /// before any geometry. Sprite-level hover flags are reconciled
    /// against the whole point set at the end of the pass, firing
    /// `hover_entered`/`hover_exited` on transitions.
    pub fn dispatch(&mut self, points: &mut [InteractionPoint]) {
        for point in points.iter_mut() {
            self.dispatch_point(point);
        }
        self.reconcile_hover(points);
    }

    fn dispatch_point(&mut self, point: &mut InteractionPoint) {
        if let Some(active) = point.active {
            if self.sprites.contains_key(active) {
                self.route_captured(point, active);
                point.first_down = false;
                return;
            }
            // The captured sprite was removed from the scene.
            point.active = None;
            point.captured = false;
        }

        let winner = self.hit_test(point);

        if point.first_down && point.down {
            point.hover = None;
            if let Some(key) = winner {
                point.active = Some(key);
                point.captured = true;
                if let Some(sprite) = self.sprites.get_mut(key) {
                    sprite.base_mut().active = true;
                    sprite.point_collision(&*point);
                    tracing::trace!(
                        target: "prism_stage::scene",
                        sprite = %sprite.base().id(),
                        point = point.id.0,
                        "capture acquired"
                    );
                }
            }
        } else if !point.down {
            point.hover = winner;
        } else {
            // Held down without capture: the press began over nothing.
            point.hover = None;
        }
        point.first_down = false;
    }

    fn route_captured(&mut self, point: &mut InteractionPoint, key: SpriteId) {
        let local = {
            let Some(sprite) = self.sprites.get(key) else {
                return;
            };
            sprite.base().to_local(point.pos)
        };
        point.local = local;
        point.hover = None;

        if point.down {
            if let Some(sprite) = self.sprites.get_mut(key) {
                sprite.point_collision(&*point);
            }
            return;
        }

        // Release: capture clears first so the click test is geometric.
        point.active = None;
        point.captured = false;
        let clicked = {
            let Some(sprite) = self.sprites.get_mut(key) else {
                return;
            };
            sprite.base_mut().active = false;
            sprite.narrow_phase(&*point)
        };

        if clicked {
            point.clicked = true;
            if let Some(sprite) = self.sprites.get_mut(key) {
                sprite.on_click();
                tracing::debug!(
                    target: "prism_stage::scene",
                    sprite = %sprite.base().id(),
                    point = point.id.0,
                    "click"
                );
                sprite.base().signals.clicked.emit(());
            }
        }

        // The rest of the pass behaves like an idle pass.
        point.hover = self.hit_test(point);
    }

    fn reconcile_hover(&mut self, points: &[InteractionPoint]) {
        let hovered: HashSet<SpriteId> = points.iter().filter_map(|p| p.hover).collect();
        for (key, sprite) in self.sprites.iter_mut() {
            let now = hovered.contains(&key);
            let base = sprite.base_mut();
            if base.hover != now {
                base.hover = now;
                if now {
                    base.signals.hover_entered.emit(());
                } else {
                    base.signals.hover_exited.emit(());
                }
            }
        }
    }

    /// Run every sprite's per-frame `update` hook.
    pub fn update(&mut self) {
        for (_, sprite) in self.sprites.iter_mut() {
            sprite.update();
        }
    }
}
