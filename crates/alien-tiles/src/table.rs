//! Sprite code → collision type lookup.

use std::collections::HashMap;

use alien_core::constants::SLIPPERY_RANGES;
use alien_core::enums::CollisionType;

/// Collision column of the sprite registry. Sprites missing from the
/// table are invisible to sensors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionTable {
    types: HashMap<u32, CollisionType>,
}

impl CollisionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sprite: u32, kind: CollisionType) {
        self.types.insert(sprite, kind);
    }

    pub fn get(&self, sprite: u32) -> Option<CollisionType> {
        self.types.get(&sprite).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The stock sprite registry shipped with the game.
    pub fn standard() -> Self {
        use CollisionType::*;

        let mut table = Self::new();
        let mut range = |from: u32, to: u32, kind: CollisionType| {
            for sprite in from..=to {
                table.insert(sprite, kind);
            }
        };

        range(0x0001, 0x0001, Solid);
        // Player sprites.
        range(0x0002, 0x0002, None);
        range(0x0010, 0x0015, None);

        // Grass.
        range(0x0101, 0x010A, Solid);
        range(0x010B, 0x010B, HillUp);
        range(0x010C, 0x010C, HillDown);
        range(0x010D, 0x0110, TopHalf);

        // Snow, planet and sand share one layout: ten solids, hill up,
        // hill down, four half blocks.
        for base in [0x0120, 0x0130, 0x0140] {
            range(base, base + 0x09, Solid);
            range(base + 0x0A, base + 0x0A, HillUp);
            range(base + 0x0B, base + 0x0B, HillDown);
            range(base + 0x0C, base + 0x0F, TopHalf);
        }

        range(0x0151, 0x0154, Solid);
        range(0x0159, 0x015C, Solid);
        range(0x0161, 0x0161, Solid);

        range(0x0114, 0x0114, Solid);
        range(0x0115, 0x0115, Water); // quicksand
        range(0x0116, 0x0116, Solid);

        range(0x0201, 0x0201, Water);
        range(0x0203, 0x0203, Water);
        range(0x0204, 0x0204, Water);
        range(0x0202, 0x0202, WaterBody);
        range(0x0205, 0x0205, WaterBody);
        range(0x0206, 0x0206, WaterBody);

        range(0x0301, 0x0304, None);
        range(0x0401, 0x0401, Water); // spikes
        range(0x0402, 0x0405, None);
        range(0x0410, 0x0411, Solid); // springboards
        range(0x0504, 0x0504, None);
        range(0x0505, 0x0505, Exit);
        range(0x0601, 0x0602, Solid);
        range(0x0701, 0x0703, Solid);
        range(0x0704, 0x0706, None);
        range(0x0901, 0x0905, Solid);

        // Creatures painted into the grid block like walls.
        for sprite in [
            0x0A00, 0x0A01, 0x0A03, 0x0A04, 0x0A06, 0x0A07, 0x0A08, 0x0A0A, 0x0A0B, 0x0A0C,
            0x0A0E, 0x0A0F, 0x0A13, 0x0A14, 0x0A1A, 0x0A1B, 0x0A1C, 0x0A20,
        ] {
            range(sprite, sprite, Solid);
        }
        range(0x0A10, 0x0A12, Solid);
        range(0x0A15, 0x0A17, Solid);
        range(0x0A22, 0x0A26, Solid);

        range(0x110F, 0x110F, TopHalf);
        range(0x2161, 0x2161, Solid);

        table
    }
}

impl FromIterator<(u32, CollisionType)> for CollisionTable {
    fn from_iter<I: IntoIterator<Item = (u32, CollisionType)>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

/// Ice-like surfaces: faster, low friction, ramps slide.
pub fn is_slippery(sprite: u32) -> bool {
    SLIPPERY_RANGES
        .iter()
        .any(|&(from, to)| (from..=to).contains(&sprite))
}
