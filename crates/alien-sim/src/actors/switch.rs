//! Group sensors: lever switches cycled with the action key, and hit
//! switches that latch on first contact.

use glam::DVec2;

use alien_core::collision::collision_check;
use alien_core::constants::*;
use alien_core::input::Key;
use alien_core::types::Aabb;

use super::body::Body;
use super::physics::{fall, ProbeOrigin};
use crate::engine::SimError;
use crate::frame::{find_player, Frame};

#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    pub body: Body,
    pub control_group: u32,
    /// Sprite for which the switch counts as active.
    pub active_state: u32,
    /// Position in `SWITCH_STATES` at reset.
    base_index: usize,
    index: usize,
    /// Action key still held since the last toggle.
    key_latched: bool,
}

impl Switch {
    pub fn new(spawn: DVec2, sprite: u32, control_group: u32, active_state: u32) -> Self {
        let base_index = SWITCH_STATES
            .iter()
            .rposition(|&state| state == sprite)
            .unwrap_or(0);
        Self {
            body: Body::new(spawn, DVec2::splat(ACTOR_SIZE)),
            control_group,
            active_state,
            base_index,
            index: base_index,
            key_latched: false,
        }
    }

    pub fn reset(&mut self) {
        self.body.reset();
        self.index = self.base_index;
        self.key_latched = false;
    }

    pub fn sprite(&self) -> u32 {
        SWITCH_STATES[self.index]
    }

    /// Sprite the switch starts from.
    pub fn base_sprite(&self) -> u32 {
        SWITCH_STATES[self.base_index]
    }

    pub fn is_active(&self) -> bool {
        self.sprite() == self.active_state
    }

    pub fn update(&mut self, frame: &mut Frame<'_>) -> Result<(), SimError> {
        fall(&mut self.body, frame.grid, ProbeOrigin::Base, ACTOR_WATER_SINK)?;

        let pushing = frame.input.is_down(Key::P);
        if !pushing {
            self.key_latched = false;
        }

        let player = find_player(frame.others, &frame.config.player_name)?;
        let touching = collision_check(&self.body.contact_strip(), &player.body.aabb()).is_some();
        if touching && pushing && !self.key_latched {
            self.index = (self.index + 1) % SWITCH_STATES.len();
            self.key_latched = true;
            log::debug!("{} -> {:#06x}", frame.name, self.sprite());
            frame.request_recompute();
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HitSwitch {
    pub body: Body,
    pub sprite: u32,
    pub control_group: u32,
    pub state: bool,
}

impl HitSwitch {
    pub fn new(spawn: DVec2, sprite: u32, control_group: u32) -> Self {
        Self {
            body: Body::new(spawn, DVec2::splat(ACTOR_SIZE)),
            sprite,
            control_group,
            state: false,
        }
    }

    pub fn reset(&mut self) {
        self.body.reset();
        self.state = false;
    }

    pub fn is_active(&self) -> bool {
        self.state
    }

    pub fn collider(&self) -> Aabb {
        let aabb = self.body.aabb();
        let inset = HITSWITCH_COLLIDER_INSET;
        Aabb::new(aabb.x + inset, aabb.y + inset, aabb.w - 2.0 * inset, aabb.h - 2.0 * inset)
    }

    pub fn update(&mut self, frame: &mut Frame<'_>) -> Result<(), SimError> {
        if self.state {
            return Ok(());
        }
        let player = find_player(frame.others, &frame.config.player_name)?;
        if collision_check(&self.body.aabb(), &player.body.aabb()).is_some() {
            log::debug!("{} latched", frame.name);
            self.state = true;
            frame.request_recompute();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_index_is_last_match() {
        let switch = Switch::new(DVec2::ZERO, 0x0705, 1, 0x0706);
        assert_eq!(switch.base_index, 3);
        assert_eq!(switch.base_sprite(), 0x0705);
        assert!(!switch.is_active());
    }

    #[test]
    fn test_unknown_sprite_starts_at_first_state() {
        let switch = Switch::new(DVec2::ZERO, 0x1234, 1, 0x0704);
        assert_eq!(switch.sprite(), 0x0704);
        assert!(switch.is_active());
    }

    #[test]
    fn test_hitswitch_collider_is_inset() {
        let hit = HitSwitch::new(DVec2::new(32.0, 32.0), 0, 1);
        assert_eq!(hit.collider(), Aabb::new(36.0, 36.0, 24.0, 24.0));
    }
}
