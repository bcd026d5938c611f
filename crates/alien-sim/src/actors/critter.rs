//! Gravity-only actors: snails and bombs.

use glam::DVec2;

use alien_core::constants::ACTOR_WATER_SINK;
use alien_tiles::SensorError;

use super::body::Body;
use super::physics::{fall, ProbeOrigin};
use crate::frame::Frame;

#[derive(Debug, Clone, PartialEq)]
pub struct Critter {
    pub body: Body,
    pub sprite: u32,
}

impl Critter {
    pub fn new(spawn: DVec2, size: DVec2, sprite: u32) -> Self {
        Self {
            body: Body::new(spawn, size),
            sprite,
        }
    }

    pub fn reset(&mut self) {
        self.body.reset();
    }

    pub fn update(&mut self, frame: &mut Frame<'_>) -> Result<(), SensorError> {
        fall(&mut self.body, frame.grid, ProbeOrigin::Inset, ACTOR_WATER_SINK)
    }
}
