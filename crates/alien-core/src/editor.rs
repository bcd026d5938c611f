//! Editor property metadata.
//!
//! The core only describes which record fields are editable and what
//! values they accept. Rendering and writing values back into a
//! `LevelDocument` belong to the editor.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::constants::{SWITCH_STATES, TILE_SIZE};
use crate::enums::ActorKind;

/// Control group ids offered by the editor.
const EDITOR_CONTROL_GROUPS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: Value,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PropertyKind {
    Boolean,
    Select { options: Vec<SelectOption> },
}

/// One editable field of an actor record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySpec {
    /// Key of the field in the level document record.
    pub field: String,
    pub caption: String,
    #[serde(flatten)]
    pub kind: PropertyKind,
}

impl PropertySpec {
    fn boolean(field: &str, caption: &str) -> Self {
        Self {
            field: field.to_string(),
            caption: caption.to_string(),
            kind: PropertyKind::Boolean,
        }
    }

    fn select(field: &str, caption: &str, options: Vec<(Value, String)>) -> Self {
        Self {
            field: field.to_string(),
            caption: caption.to_string(),
            kind: PropertyKind::Select {
                options: options
                    .into_iter()
                    .map(|(value, caption)| SelectOption { value, caption })
                    .collect(),
            },
        }
    }
}

fn control_group() -> PropertySpec {
    let options = (0..EDITOR_CONTROL_GROUPS)
        .map(|id| (json!(id), id.to_string()))
        .collect();
    PropertySpec::select("controlGroup", "ControlGroup", options)
}

fn blocks(caption: &str, count: u32) -> String {
    if count == 1 {
        format!("1 {caption}")
    } else {
        format!("{count} {caption}s")
    }
}

impl ActorKind {
    /// Editable fields for this kind, in display order.
    pub fn editable_properties(self) -> Vec<PropertySpec> {
        match self {
            ActorKind::Enemy => vec![
                PropertySpec::boolean("killable", "Killable"),
                PropertySpec::select(
                    "aggressionLevel",
                    "Aggression",
                    vec![
                        (json!(0), "Not aggressive".to_string()),
                        (json!(1), "Aggressive".to_string()),
                    ],
                ),
            ],
            ActorKind::Worm => {
                let options = (1..=9)
                    .map(|n| (json!(f64::from(n) * TILE_SIZE), blocks("block", n)))
                    .collect();
                vec![PropertySpec::select("maxHeight", "MaxHeight", options)]
            }
            ActorKind::Door => vec![
                PropertySpec::select(
                    "direction",
                    "Direction",
                    vec![
                        (json!("S"), "Source".to_string()),
                        (json!("T"), "Target".to_string()),
                    ],
                ),
                control_group(),
            ],
            ActorKind::Platform => {
                let distances = (1..=9).map(|n| (json!(n), blocks("Block", n))).collect();
                vec![
                    PropertySpec::select(
                        "direction",
                        "Direction",
                        vec![
                            (json!("L"), "Left".to_string()),
                            (json!("R"), "Right".to_string()),
                        ],
                    ),
                    control_group(),
                    PropertySpec::select("distance", "Distance", distances),
                ]
            }
            ActorKind::Switch => {
                let states = ["Left", "Middle", "Right"]
                    .iter()
                    .zip(SWITCH_STATES)
                    .map(|(caption, sprite)| (json!(sprite), caption.to_string()))
                    .collect();
                vec![
                    PropertySpec::select("activeState", "ActiveState", states),
                    control_group(),
                ]
            }
            ActorKind::HitSwitch => vec![control_group()],
            ActorKind::Player
            | ActorKind::Rock
            | ActorKind::Frog
            | ActorKind::Snail
            | ActorKind::Bomb => Vec::new(),
        }
    }
}
