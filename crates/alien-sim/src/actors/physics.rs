//! Downward ground probe and gravity shared by the non-player actors.

use glam::DVec2;

use alien_core::constants::{GRAVITY, GROUND_SNAP, PROBE_INSET, SENSOR_LENGTH};
use alien_core::enums::CollisionType;
use alien_tiles::{SensorError, SensorHit, SensorVerdict, TileGrid};

use super::body::Body;

/// Where the ground probe starts relative to the actor's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOrigin {
    /// `PROBE_INSET` above the bottom edge, as for creatures.
    Inset,
    /// Just above the bottom edge, as for rocks and switches.
    Base,
}

impl ProbeOrigin {
    fn y(self, body: &Body) -> f64 {
        match self {
            ProbeOrigin::Inset => body.pos.y + PROBE_INSET + (body.size.y - 2.0 * PROBE_INSET),
            ProbeOrigin::Base => body.pos.y - PROBE_INSET + body.size.y,
        }
    }
}

/// Cast straight down from the middle of the body.
pub fn probe_ground<F>(
    body: &Body,
    grid: &TileGrid,
    origin: ProbeOrigin,
    decide: F,
) -> Result<Option<SensorHit>, SensorError>
where
    F: FnMut(SensorHit) -> SensorVerdict,
{
    let start = DVec2::new(body.pos.x + body.size.x / 2.0, origin.y(body));
    let outcome = grid.sensor(start, DVec2::Y, SENSOR_LENGTH, decide)?;
    Ok(outcome.hit().copied())
}

/// Accept every hit, letting the actor sink `depth` pixels into water.
pub fn sink_into_water(depth: f64) -> impl FnMut(SensorHit) -> SensorVerdict {
    move |mut hit| {
        if hit.kind == CollisionType::Water {
            hit.y += depth;
            hit.dy += depth;
        }
        SensorVerdict::Stop(hit)
    }
}

/// Snap onto `ground` when close enough, then integrate gravity.
pub fn settle_and_fall(body: &mut Body, ground: Option<SensorHit>) {
    if let Some(hit) = ground {
        if hit.dy < GROUND_SNAP {
            body.pos.y = hit.y - body.size.y;
            body.vel.y = 0.0;
        }
    }
    body.vel.y += GRAVITY;
    body.pos.y += body.vel.y;
}

/// Probe, snap and fall in one step.
pub fn fall(
    body: &mut Body,
    grid: &TileGrid,
    origin: ProbeOrigin,
    water_sink: f64,
) -> Result<(), SensorError> {
    let ground = probe_ground(body, grid, origin, sink_into_water(water_sink))?;
    settle_and_fall(body, ground);
    Ok(())
}
