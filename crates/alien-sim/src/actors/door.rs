//! Doors teleport the player from a source door to the target door of the
//! same control group.

use glam::DVec2;

use alien_core::collision::collision_check;
use alien_core::constants::ACTOR_SIZE;
use alien_core::enums::DoorRole;

use super::body::Body;
use super::Actor;
use crate::engine::SimError;
use crate::frame::{find_player, Frame};

#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    pub body: Body,
    pub sprite: u32,
    pub role: DoorRole,
    pub control_group: u32,
    /// Open/closed as last set by the control group.
    pub state: bool,
}

impl Door {
    pub fn new(spawn: DVec2, sprite: u32, role: DoorRole, control_group: u32) -> Self {
        Self {
            body: Body::new(spawn, DVec2::splat(ACTOR_SIZE)),
            sprite,
            role,
            control_group,
            state: false,
        }
    }

    pub fn reset(&mut self) {
        self.body.reset();
        self.state = false;
    }

    pub fn set_state(&mut self, state: bool) {
        self.state = state;
    }

    pub fn update(&mut self, frame: &mut Frame<'_>) -> Result<(), SimError> {
        if self.role != DoorRole::Source {
            return Ok(());
        }

        let targets: Vec<DVec2> = frame
            .others
            .values()
            .filter_map(|actor| match actor {
                Actor::Door(door)
                    if door.control_group == self.control_group
                        && door.role == DoorRole::Target =>
                {
                    Some(door.body.pos)
                }
                _ => None,
            })
            .collect();

        let player = find_player(frame.others, &frame.config.player_name)?;
        if collision_check(&self.body.contact_strip(), &player.body.aabb()).is_none() {
            return Ok(());
        }
        for target in targets {
            log::debug!("{} sends the player to {target}", frame.name);
            player.body.pos = target;
        }
        Ok(())
    }
}
