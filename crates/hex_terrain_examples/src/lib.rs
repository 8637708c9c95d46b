#![forbid(unsafe_code)]

mod ascii;

pub use ascii::{climate_histogram, render_ascii, MapLayer};

use hex_terrain::prelude::*;

/// A small world: every climate has a few terrains, and rules keep climates drifting slowly.
pub fn demo_catalog() -> TileCatalog {
    use hex_terrain::catalog::Climate::*;
    use hex_terrain::catalog::TerrainType::*;

    TileCatalog::from_types([
        TileType::new("glacier", Snowy, Ice).with_rules([
            GenerationRule::climate(Snowy, 0.6),
            GenerationRule::exact(Snowy, Drifts, 0.3),
            GenerationRule::climate(Arid, 0.0),
        ]),
        TileType::new("snowdrift", Snowy, Drifts)
            .with_visuals(["snowdrift_a", "snowdrift_b"])
            .with_rules([
                GenerationRule::climate(Snowy, 0.5),
                GenerationRule::exact(Temperate, Mountains, 0.2),
            ]),
        TileType::new("alpine peak", Snowy, Mountains).with_rules([
            GenerationRule::terrain(Mountains, 0.5),
            GenerationRule::climate(Snowy, 0.3),
        ]),
        TileType::new("woods", Temperate, Forest)
            .with_visuals(["oak", "birch", "pine"])
            .with_rules([
                GenerationRule::terrain(Forest, 0.5),
                GenerationRule::climate(Temperate, 0.4),
            ]),
        TileType::new("meadow", Temperate, Plains).with_rules([
            GenerationRule::exact(Temperate, Plains, 0.5),
            GenerationRule::terrain(Water, 0.1),
            GenerationRule::terrain(Roads, 0.05),
        ]),
        TileType::new("lake", Temperate, Water).with_rules([
            GenerationRule::terrain(Water, 0.35),
            GenerationRule::exact(Temperate, Mud, 0.2),
        ]),
        TileType::new("village", Temperate, Buildings).with_rules([
            GenerationRule::terrain(Roads, 0.4),
            GenerationRule::terrain(Buildings, 0.0),
        ]),
        TileType::new("road", Temperate, Roads).with_rules([
            GenerationRule::terrain(Roads, 0.3),
            GenerationRule::terrain(Buildings, 0.1),
        ]),
        TileType::new("marsh", Temperate, Mud).with_rule(GenerationRule::terrain(Water, 0.2)),
        TileType::new("jungle", Tropical, Forest).with_rules([
            GenerationRule::climate(Tropical, 0.5),
            GenerationRule::exact(Tropical, Mud, 0.2),
        ]),
        TileType::new("swamp", Tropical, Mud).with_rules([
            GenerationRule::climate(Tropical, 0.4),
            GenerationRule::exact(Tropical, Water, 0.2),
        ]),
        TileType::new("lagoon", Tropical, Water).with_rule(GenerationRule::terrain(Water, 0.3)),
        TileType::new("erg", Arid, Dunes).with_rules([
            GenerationRule::climate(Arid, 0.6),
            GenerationRule::climate(Snowy, 0.0),
        ]),
        TileType::new("badlands", Arid, Canyons).with_rules([
            GenerationRule::terrain(Canyons, 0.4),
            GenerationRule::exact(Arid, Mountains, 0.1),
        ]),
        TileType::new("mesa", Arid, Mountains).with_rule(GenerationRule::terrain(Mountains, 0.3)),
    ])
}

/// Event sink that prints warnings to stderr.
pub fn warning_printer() -> FnSink<impl FnMut(GenerationEvent)> {
    FnSink::new(|event| {
        if let GenerationEvent::Warning { context, message } = event {
            eprintln!("warning [{context}]: {message}");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_covers_every_climate() {
        let catalog = demo_catalog();
        assert!(catalog.covers_all_climates());
        assert!(catalog.find_by_name("village").is_some());
    }
}
