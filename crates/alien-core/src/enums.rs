//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// How a tile or object resists motion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollisionType {
    /// Full tile, blocks from every side.
    #[default]
    Solid,
    /// Upper half of a tile.
    TopHalf,
    /// Ramp rising toward the left edge of the tile.
    HillUp,
    /// Ramp rising toward the right edge of the tile.
    HillDown,
    /// Water surface, spikes and quicksand.
    Water,
    /// Submerged water.
    WaterBody,
    /// Level exit marker.
    Exit,
    /// Registered sprite that never stops a probe.
    None,
}

impl CollisionType {
    /// Whether a probe may stop on this type.
    pub fn is_blocking(self) -> bool {
        self != CollisionType::None
    }

    pub fn is_hill(self) -> bool {
        matches!(self, CollisionType::HillUp | CollisionType::HillDown)
    }
}

/// Closed set of actor types that may appear in a level document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Player,
    Enemy,
    Worm,
    Rock,
    Frog,
    Snail,
    Bomb,
    Door,
    Switch,
    HitSwitch,
    Platform,
}

impl ActorKind {
    /// Whether the player resolves collisions against this actor's collider.
    pub fn collides_with_player(self) -> bool {
        matches!(
            self,
            ActorKind::Rock | ActorKind::Platform | ActorKind::HitSwitch
        )
    }

    /// Whether the actor feeds a control group (as opposed to obeying one).
    pub fn is_group_sensor(self) -> bool {
        matches!(self, ActorKind::Switch | ActorKind::HitSwitch)
    }

    /// Whether the actor obeys a control group.
    pub fn is_group_actor(self) -> bool {
        matches!(self, ActorKind::Door | ActorKind::Platform)
    }
}

/// Role of a door within its control group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorRole {
    /// Entering this door teleports the player.
    #[default]
    #[serde(rename = "S")]
    Source,
    /// Destination of a teleport.
    #[serde(rename = "T")]
    Target,
}

/// Horizontal direction a platform extends in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "L")]
    Left,
    #[default]
    #[serde(rename = "R")]
    Right,
}

/// Axis selected by the minimum-translation heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Rock lifecycle; `Ground` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RockMode {
    #[default]
    Rock,
    Ground,
}
