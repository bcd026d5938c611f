//! Position, velocity and extent shared by every actor.

use glam::DVec2;

use alien_core::constants::CONTACT_STRIP_HEIGHT;
use alien_core::types::Aabb;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: DVec2,
    pub vel: DVec2,
    pub size: DVec2,
    /// Where `reset()` puts the actor back.
    pub spawn: DVec2,
    /// Extent restored by `reset()`.
    pub spawn_size: DVec2,
}

impl Body {
    pub fn new(spawn: DVec2, size: DVec2) -> Self {
        Self {
            pos: spawn,
            vel: DVec2::ZERO,
            size,
            spawn,
            spawn_size: size,
        }
    }

    pub fn reset(&mut self) {
        self.pos = self.spawn;
        self.vel = DVec2::ZERO;
        self.size = self.spawn_size;
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Thin strip along the top edge, used for push and press contacts.
    pub fn contact_strip(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.size.x, CONTACT_STRIP_HEIGHT)
    }
}
