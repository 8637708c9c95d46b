use hex_terrain::prelude::*;
use hex_terrain_examples::{climate_histogram, demo_catalog, render_ascii, MapLayer};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    let catalog = demo_catalog();
    let glacier = catalog
        .find_by_name("glacier")
        .ok_or_else(|| anyhow::anyhow!("demo catalog has no glacier"))?;

    // Same seed and first tile; only the baseline used between mixed neighbors differs.
    for baseline in [ClimateBaseline::Temperate, ClimateBaseline::Midpoint] {
        let config = GeneratorConfig::new(GridShape::centered(31, 15))
            .with_first_tile_type(Some(FirstTileType::Fixed(glacier)))
            .with_climate_baseline(baseline);

        let mut rng = StdRng::seed_from_u64(2024);
        let result = generate(&config, &catalog, &mut rng)?;

        println!("{baseline:?} baseline:");
        print!("{}", render_ascii(&result.grid, &catalog, MapLayer::Climate));
        let histogram: Vec<String> = climate_histogram(&result.grid, &catalog)
            .into_iter()
            .map(|(climate, count)| format!("{climate}={count}"))
            .collect();
        println!("{}\n", histogram.join(" "));
    }

    Ok(())
}
