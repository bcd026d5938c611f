//! Platforms extend sideways while their control group is active.

use glam::DVec2;

use alien_core::constants::{ACTOR_SIZE, TILE_SIZE};
use alien_core::enums::Direction;

use super::body::Body;

#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub body: Body,
    pub sprite: u32,
    pub direction: Direction,
    /// Tiles covered when extended, beyond the base tile.
    pub distance: u32,
    pub control_group: u32,
    pub state: bool,
}

impl Platform {
    pub fn new(
        spawn: DVec2,
        sprite: u32,
        direction: Direction,
        distance: u32,
        control_group: u32,
    ) -> Self {
        Self {
            body: Body::new(spawn, DVec2::splat(ACTOR_SIZE)),
            sprite,
            direction,
            distance,
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
        self.body.pos = self.body.spawn;
        self.body.size = DVec2::splat(ACTOR_SIZE);

        if state {
            let reach = f64::from(self.distance) * TILE_SIZE;
            if self.direction == Direction::Left {
                self.body.pos.x -= reach;
            }
            self.body.size.x = reach + ACTOR_SIZE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extends_right_from_spawn() {
        let mut platform = Platform::new(DVec2::new(64.0, 96.0), 0, Direction::Right, 2, 1);
        platform.set_state(true);
        assert_eq!(platform.body.pos, DVec2::new(64.0, 96.0));
        assert_eq!(platform.body.size, DVec2::new(96.0, 32.0));
    }

    #[test]
    fn test_extends_left_over_the_gap() {
        let mut platform = Platform::new(DVec2::new(128.0, 96.0), 0, Direction::Left, 3, 1);
        platform.set_state(true);
        assert_eq!(platform.body.pos.x, 32.0);
        assert_eq!(platform.body.size.x, 128.0);

        platform.set_state(false);
        assert_eq!(platform.body.pos, DVec2::new(128.0, 96.0));
        assert_eq!(platform.body.size, DVec2::splat(32.0));
    }
}
