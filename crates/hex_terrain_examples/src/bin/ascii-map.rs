use hex_terrain::prelude::*;
use hex_terrain_examples::{
    climate_histogram, demo_catalog, render_ascii, warning_printer, MapLayer,
};

fn main() -> anyhow::Result<()> {
    let catalog = demo_catalog();

    // 41 x 21 pointy-top map grown from a random first tile at the center.
    let config = GeneratorConfig::new(GridShape::centered(41, 21))
        .with_orientation(Orientation::PointyTop)
        .with_seed(7)
        .with_first_tile_type(Some(FirstTileType::Random));

    let mut generator = TerrainGenerator::try_new(config, &catalog)?;
    let mut sink = warning_printer();
    let result = generator.run_with_events(&mut sink)?;

    println!("Climate:");
    print!("{}", render_ascii(&result.grid, &catalog, MapLayer::Climate));
    println!();
    println!("Terrain:");
    print!("{}", render_ascii(&result.grid, &catalog, MapLayer::Terrain));
    println!();

    let summary = result.summary();
    println!(
        "seed {:?} | first tile '{}' at {} | {} tiles in {} waves | {} fallbacks",
        result.seed,
        catalog.by_index(result.seed_tile)?.name,
        result.seed_position,
        summary.tiles,
        summary.waves,
        summary.fallbacks,
    );
    for (climate, count) in climate_histogram(&result.grid, &catalog) {
        println!("  {:>9}: {count}", climate.to_string());
    }

    Ok(())
}
