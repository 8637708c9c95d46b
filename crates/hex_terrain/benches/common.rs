#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use hex_terrain::prelude::{Climate, GenerationRule, TerrainType, TileCatalog, TileType};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(3);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn cells_throughput(cells: usize) -> Throughput {
    Throughput::Elements(cells.max(1) as u64)
}

/// Two tile types per climate, each pulling its neighbors towards its own climate and terrain.
pub fn bench_catalog() -> TileCatalog {
    let pairs = [
        ("glacier", Climate::Snowy, TerrainType::Ice),
        ("snowfield", Climate::Snowy, TerrainType::Drifts),
        ("woods", Climate::Temperate, TerrainType::Forest),
        ("meadow", Climate::Temperate, TerrainType::Plains),
        ("jungle", Climate::Tropical, TerrainType::Forest),
        ("swamp", Climate::Tropical, TerrainType::Mud),
        ("erg", Climate::Arid, TerrainType::Dunes),
        ("mesa", Climate::Arid, TerrainType::Canyons),
    ];
    pairs
        .into_iter()
        .map(|(name, climate, terrain)| {
            TileType::new(name, climate, terrain).with_rules([
                GenerationRule::climate(climate, 0.5),
                GenerationRule::terrain(terrain, 0.3),
                GenerationRule::exact(climate, terrain, 0.2),
            ])
        })
        .collect()
}
