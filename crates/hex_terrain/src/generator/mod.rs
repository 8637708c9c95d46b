//! Terrain generation pipeline: rule compilation, climate estimation, tile selection,
//! and the wave-by-wave scheduler that drives them.
use rand::RngCore;

pub mod climate;
pub mod config;
pub mod events;
pub mod rules;
pub mod scheduler;
pub mod selection;

/// Probability added when two neighbors contribute the same rule to one cell.
pub const DEFAULT_STACKING_BONUS: f32 = 0.1;

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    // 24 bits fit the f32 mantissa exactly, so the result never rounds up to 1.0.
    ((rng.next_u32() >> 8) as f32) / ((1u32 << 24) as f32)
}

/// Generate a random index in `0..len`. `len` must be non-zero.
#[inline]
pub(crate) fn rand_index(rng: &mut dyn RngCore, len: usize) -> usize {
    debug_assert!(len > 0, "len must be > 0");
    (((rng.next_u32() as u64) * (len as u64)) >> 32) as usize
}

#[cfg(test)]
pub(crate) mod testing {
    use rand::RngCore;

    use crate::catalog::{Climate, GenerationRule, TerrainType, TileCatalog, TileType};

    /// RNG returning the same word forever.
    pub struct FixedRng {
        pub value: u32,
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.value
        }

        fn next_u64(&mut self) -> u64 {
            self.value as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 4];
            }
        }
    }

    /// RNG whose uniform draws are always 0.0, so every probability gate passes.
    pub fn always_accept() -> FixedRng {
        FixedRng { value: 0 }
    }

    /// RNG whose uniform draws are as close to 1.0 as possible, so only certain rules pass.
    pub fn never_accept() -> FixedRng {
        FixedRng { value: u32::MAX }
    }

    /// Small catalog with at least one tile per climate and mixed rules.
    pub fn world_catalog() -> TileCatalog {
        TileCatalog::from_types([
            TileType::new("glacier", Climate::Snowy, TerrainType::Ice).with_rules([
                GenerationRule::climate(Climate::Snowy, 0.6),
                GenerationRule::exact(Climate::Snowy, TerrainType::Drifts, 0.3),
                GenerationRule::climate(Climate::Arid, 0.0),
            ]),
            TileType::new("snowfield", Climate::Snowy, TerrainType::Drifts).with_rules([
                GenerationRule::climate(Climate::Snowy, 0.5),
                GenerationRule::climate(Climate::Temperate, 0.3),
            ]),
            TileType::new("woods", Climate::Temperate, TerrainType::Forest).with_rules([
                GenerationRule::terrain(TerrainType::Forest, 0.5),
                GenerationRule::climate(Climate::Temperate, 0.4),
            ]),
            TileType::new("meadow", Climate::Temperate, TerrainType::Plains).with_rules([
                GenerationRule::exact(Climate::Temperate, TerrainType::Plains, 0.5),
                GenerationRule::terrain(TerrainType::Water, 0.1),
            ]),
            TileType::new("lake", Climate::Temperate, TerrainType::Water)
                .with_rule(GenerationRule::terrain(TerrainType::Water, 0.3)),
            TileType::new("jungle", Climate::Tropical, TerrainType::Forest).with_rules([
                GenerationRule::climate(Climate::Tropical, 0.5),
                GenerationRule::exact(Climate::Tropical, TerrainType::Mud, 0.2),
            ]),
            TileType::new("swamp", Climate::Tropical, TerrainType::Mud)
                .with_rule(GenerationRule::climate(Climate::Tropical, 0.4)),
            TileType::new("erg", Climate::Arid, TerrainType::Dunes).with_rules([
                GenerationRule::climate(Climate::Arid, 0.6),
                GenerationRule::climate(Climate::Snowy, 0.0),
            ]),
            TileType::new("mesa", Climate::Arid, TerrainType::Canyons)
                .with_rule(GenerationRule::terrain(TerrainType::Canyons, 0.3)),
        ])
    }
}
