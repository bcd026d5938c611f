//! Level documents: the tile grid plus one record per actor.
//!
//! Version 2 documents are objects `{version, level, objects}`. Version 1
//! documents are a bare grid with players and enemies painted in as tiles;
//! they are upgraded on load.

use std::collections::HashSet;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::{ActorKind, Direction, DoorRole};

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("invalid level document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level grid is empty")]
    EmptyGrid,
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("duplicate object name {0:?}")]
    DuplicateName(String),
    #[error("unsupported level version {0}")]
    UnsupportedVersion(u32),
}

/// A complete level as stored by the level database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Sprite codes, row-major, top row first.
    pub level: Vec<Vec<u32>>,
    #[serde(default)]
    pub objects: Vec<ObjectRecord>,
}

/// One actor in a level document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub x: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub y: f64,
    #[serde(flatten)]
    pub actor: ActorRecord,
}

/// Type-specific fields, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActorRecord {
    Player {},
    Enemy {
        #[serde(default, deserialize_with = "lenient_u32")]
        sprite: u32,
        #[serde(rename = "aggressionLevel", default, deserialize_with = "lenient_u32")]
        aggression_level: u32,
        #[serde(default = "default_true")]
        killable: bool,
    },
    Worm {
        #[serde(default, deserialize_with = "lenient_u32")]
        sprite: u32,
        #[serde(
            rename = "maxHeight",
            default = "default_worm_height",
            deserialize_with = "lenient_f64"
        )]
        max_height: f64,
    },
    Rock {
        #[serde(default, deserialize_with = "lenient_u32")]
        sprite: u32,
    },
    Frog {
        #[serde(default, deserialize_with = "lenient_u32")]
        sprite: u32,
    },
    Snail {
        #[serde(default, deserialize_with = "lenient_u32")]
        sprite: u32,
    },
    Bomb {
        #[serde(default, deserialize_with = "lenient_u32")]
        sprite: u32,
    },
    Door {
        #[serde(default)]
        direction: DoorRole,
        #[serde(rename = "controlGroup", default, deserialize_with = "lenient_u32")]
        control_group: u32,
        #[serde(default, deserialize_with = "lenient_u32")]
        sprite: u32,
    },
    Switch {
        #[serde(default = "default_switch_sprite", deserialize_with = "lenient_u32")]
        sprite: u32,
        #[serde(rename = "controlGroup", default, deserialize_with = "lenient_u32")]
        control_group: u32,
        #[serde(
            rename = "activeState",
            default = "default_switch_sprite",
            deserialize_with = "lenient_u32"
        )]
        active_state: u32,
    },
    HitSwitch {
        #[serde(rename = "controlGroup", default, deserialize_with = "lenient_u32")]
        control_group: u32,
        #[serde(default, deserialize_with = "lenient_u32")]
        sprite: u32,
    },
    Platform {
        #[serde(default)]
        direction: Direction,
        #[serde(default = "default_distance", deserialize_with = "lenient_u32")]
        distance: u32,
        #[serde(rename = "controlGroup", default, deserialize_with = "lenient_u32")]
        control_group: u32,
        #[serde(default, deserialize_with = "lenient_u32")]
        sprite: u32,
    },
}

impl ActorRecord {
    pub fn kind(&self) -> ActorKind {
        match self {
            ActorRecord::Player {} => ActorKind::Player,
            ActorRecord::Enemy { .. } => ActorKind::Enemy,
            ActorRecord::Worm { .. } => ActorKind::Worm,
            ActorRecord::Rock { .. } => ActorKind::Rock,
            ActorRecord::Frog { .. } => ActorKind::Frog,
            ActorRecord::Snail { .. } => ActorKind::Snail,
            ActorRecord::Bomb { .. } => ActorKind::Bomb,
            ActorRecord::Door { .. } => ActorKind::Door,
            ActorRecord::Switch { .. } => ActorKind::Switch,
            ActorRecord::HitSwitch { .. } => ActorKind::HitSwitch,
            ActorRecord::Platform { .. } => ActorKind::Platform,
        }
    }

    /// Control group id for group members.
    pub fn control_group(&self) -> Option<u32> {
        match self {
            ActorRecord::Door { control_group, .. }
            | ActorRecord::Switch { control_group, .. }
            | ActorRecord::HitSwitch { control_group, .. }
            | ActorRecord::Platform { control_group, .. } => Some(*control_group),
            _ => None,
        }
    }
}

fn default_version() -> u32 {
    LEVEL_VERSION
}

fn default_true() -> bool {
    true
}

fn default_worm_height() -> f64 {
    WORM_DEFAULT_MAX_HEIGHT
}

fn default_switch_sprite() -> u32 {
    SWITCH_STATES[0]
}

fn default_distance() -> u32 {
    1
}

/// Numbers saved by older editors may be strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Number(f64),
    Text(String),
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match LenientNumber::deserialize(deserializer)? {
        LenientNumber::Number(n) => Ok(n),
        LenientNumber::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected a number, got {s:?}"))),
    }
}

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let n = lenient_f64(deserializer)?;
    if n.fract() != 0.0 || n < 0.0 || n > f64::from(u32::MAX) {
        return Err(D::Error::custom(format!(
            "expected a non-negative integer, got {n}"
        )));
    }
    Ok(n as u32)
}

impl LevelDocument {
    /// Parse a version 1 or version 2 document and validate it.
    pub fn from_json(text: &str) -> Result<Self, LevelError> {
        let value: serde_json::Value = serde_json::from_str(text)?;

        let document = if value.is_array() {
            let grid: Vec<Vec<u32>> = serde_json::from_value(value)?;
            Self::upgrade_v1(grid)
        } else {
            serde_json::from_value(value)?
        };

        document.validate()?;
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Lift players and enemies out of a version 1 grid into object records.
    /// Scans column by column so names follow the level left to right.
    pub fn upgrade_v1(mut grid: Vec<Vec<u32>>) -> Self {
        let mut objects = Vec::new();
        let mut players = 0;
        let mut enemies = 0;

        let width = grid.first().map_or(0, Vec::len);
        for x in 0..width {
            for y in 0..grid.len() {
                let Some(&sprite) = grid[y].get(x) else {
                    continue;
                };
                let (wx, wy) = (x as f64 * TILE_SIZE, y as f64 * TILE_SIZE);

                if sprite == SPRITE_PLAYER {
                    players += 1;
                    objects.push(ObjectRecord {
                        name: format!("player_{players}"),
                        x: wx,
                        y: wy - UPGRADE_PLAYER_RAISE,
                        actor: ActorRecord::Player {},
                    });
                    grid[y][x] = SPRITE_EMPTY;
                } else if is_enemy_sprite(sprite) {
                    enemies += 1;
                    objects.push(ObjectRecord {
                        name: format!("enemy_{enemies}"),
                        x: wx,
                        y: wy,
                        actor: ActorRecord::Enemy {
                            sprite,
                            aggression_level: u32::from(sprite != SPRITE_ENEMY_BEE),
                            killable: true,
                        },
                    });
                    grid[y][x] = SPRITE_EMPTY;
                }
            }
        }

        if players == 0 {
            let (x, y) = DEFAULT_PLAYER_SPAWN;
            objects.push(ObjectRecord {
                name: DEFAULT_PLAYER_NAME.to_string(),
                x,
                y,
                actor: ActorRecord::Player {},
            });
        }

        Self {
            version: LEVEL_VERSION,
            level: grid,
            objects,
        }
    }

    /// Grid must be non-empty and rectangular, names unique.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.version > LEVEL_VERSION {
            return Err(LevelError::UnsupportedVersion(self.version));
        }

        let expected = self.level.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(LevelError::EmptyGrid);
        }
        for (row, tiles) in self.level.iter().enumerate() {
            if tiles.len() != expected {
                return Err(LevelError::RaggedRow {
                    row,
                    expected,
                    found: tiles.len(),
                });
            }
        }

        let mut seen = HashSet::new();
        for object in &self.objects {
            if !seen.insert(object.name.as_str()) {
                return Err(LevelError::DuplicateName(object.name.clone()));
            }
        }
        Ok(())
    }
}

pub fn is_enemy_sprite(sprite: u32) -> bool {
    (ENEMY_SPRITE_MIN..=ENEMY_SPRITE_MAX).contains(&sprite)
}
