//! Events emitted by actors for the telemetry sink.

use serde::{Deserialize, Serialize};

/// Structured event appended to an actor's queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorEvent {
    Restart,
    /// Death with a free-form reason such as `water` or `worm/worm_1`.
    Died(String),
    GravityInverted,
    GravityNormal,
    Exit,
    KilledEnemy,
}

impl ActorEvent {
    /// Name used on the wire, e.g. `DIED_WATER`.
    pub fn wire_name(&self) -> String {
        match self {
            ActorEvent::Restart => "RESTART".to_string(),
            ActorEvent::Died(reason) => format!("DIED_{}", reason.to_uppercase()),
            ActorEvent::GravityInverted => "GRAVITY_INVERTED".to_string(),
            ActorEvent::GravityNormal => "GRAVITY_NORMAL".to_string(),
            ActorEvent::Exit => "EXIT".to_string(),
            ActorEvent::KilledEnemy => "KILLED_ENEMY".to_string(),
        }
    }
}

/// Position sample handed to the telemetry collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionReport {
    /// Simulation clock in seconds.
    pub timestamp: f64,
    /// Position in tiles.
    pub x: f64,
    pub y: f64,
    /// Events queued since the previous report, by wire name.
    pub events: Vec<String>,
}

/// Outbound message for the game shell and telemetry collaborators,
/// drained once per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Notification {
    /// The player died; presentation and restart are up to the shell.
    Died { reason: String, sprite: Option<u32> },
    /// The player reached the exit.
    Finished,
    Position(PositionReport),
}
