//! Wave-by-wave generation of a hex grid from a single seeded tile.
//!
//! A run moves through [`GenerationState::Idle`], [`GenerationState::Seeding`],
//! [`GenerationState::Expanding`] and ends in [`GenerationState::Done`]. Each wave expands the
//! previous wave's tiles into their ungenerated in-bounds neighbors. Tiles placed earlier in a
//! wave are visible to later cells of the same wave, so the result depends on frontier order,
//! which is fixed (insertion order, neighbors clockwise) and therefore reproducible.
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info};

use crate::catalog::{TileCatalog, TileTypeId};
use crate::error::{Error, Result};
use crate::generator::climate::estimate;
use crate::generator::config::{FirstTilePosition, FirstTileType, GeneratorConfig};
use crate::generator::events::{EventSink, GenerationEvent, GenerationEventKind, RunSummary};
use crate::generator::rand_index;
use crate::generator::rules::RuleCompiler;
use crate::generator::selection::select_tile;
use crate::grid::HexGrid;
use crate::hex::Position;

/// Lifecycle of a [`TerrainGenerator`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GenerationState {
    #[default]
    Idle,
    /// Validating the configuration and placing the first tile.
    Seeding,
    /// Expanding the frontier wave by wave.
    Expanding,
    /// Frontier exhausted; every reachable cell is generated.
    Done,
}

/// Result of a generation run.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// The populated grid.
    pub grid: HexGrid,
    /// Where the first tile was placed.
    pub seed_position: Position,
    /// Type of the first tile.
    pub seed_tile: TileTypeId,
    /// Expansion waves that placed at least one tile.
    pub waves: usize,
    /// Tiles that used the climate fallback.
    pub fallbacks: usize,
    /// Seed the RNG was created from, when the generator created it.
    pub seed: Option<u64>,
}

impl GenerationResult {
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            tiles: self.grid.len(),
            waves: self.waves,
            fallbacks: self.fallbacks,
            unreached: self.grid.shape().cell_count().saturating_sub(self.grid.len()),
        }
    }
}

pub struct TerrainGenerator<'a> {
    /// Configuration applied to every run.
    pub config: GeneratorConfig,
    /// Tile types available to the generator, read-only during a run.
    pub catalog: &'a TileCatalog,
    state: GenerationState,
}

impl<'a> TerrainGenerator<'a> {
    pub fn try_new(config: GeneratorConfig, catalog: &'a TileCatalog) -> Result<Self> {
        validate_against_catalog(&config, catalog)?;
        Ok(Self {
            config,
            catalog,
            state: GenerationState::Idle,
        })
    }

    pub fn new(config: GeneratorConfig, catalog: &'a TileCatalog) -> Self {
        debug_assert!(!config.shape.is_empty(), "grid shape must have cells");
        debug_assert!(
            config.stacking_bonus > 0.0 && config.stacking_bonus < 1.0,
            "stacking_bonus must be in (0, 1)"
        );

        Self {
            config,
            catalog,
            state: GenerationState::Idle,
        }
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    /// Runs with an RNG created from the configured seed.
    pub fn run(&mut self) -> Result<GenerationResult> {
        self.run_with_events(&mut ())
    }

    pub fn run_with_events(&mut self, sink: &mut dyn EventSink) -> Result<GenerationResult> {
        let seed = self.config.seed.resolve();
        let mut rng = StdRng::seed_from_u64(seed);
        self.execute(&mut rng, Some(seed), sink)
    }

    /// Runs with a caller-provided RNG; the configured seed is ignored.
    pub fn run_with_rng(&mut self, rng: &mut impl RngCore) -> Result<GenerationResult> {
        self.execute(rng, None, &mut ())
    }

    pub fn run_with_rng_and_events(
        &mut self,
        rng: &mut impl RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<GenerationResult> {
        self.execute(rng, None, sink)
    }

    fn execute<R: RngCore>(
        &mut self,
        rng: &mut R,
        seed: Option<u64>,
        sink: &mut dyn EventSink,
    ) -> Result<GenerationResult> {
        let result = expand(&self.config, self.catalog, &mut self.state, rng, seed, sink);
        if result.is_err() {
            self.state = GenerationState::Idle;
        }
        result
    }
}

fn expand<R: RngCore>(
    config: &GeneratorConfig,
    catalog: &TileCatalog,
    state: &mut GenerationState,
    rng: &mut R,
    seed: Option<u64>,
    sink: &mut dyn EventSink,
) -> Result<GenerationResult> {
    *state = GenerationState::Seeding;
    validate_against_catalog(config, catalog)?;

    let cell_count = config.shape.cell_count();
    info!(
        "Generating {} cells | tile types: {} | orientation: {:?} | seed: {:?}.",
        cell_count,
        catalog.len(),
        config.orientation,
        seed
    );
    if sink.wants(GenerationEventKind::RunStarted) {
        sink.send(GenerationEvent::RunStarted {
            config: config.clone(),
            seed,
            cell_count,
        });
    }

    let mut grid = HexGrid::new(config.shape.clone(), config.orientation);
    let seed_position = first_position(config, rng);
    let seed_tile = first_tile(config, catalog, rng)?;
    grid.set(seed_position, seed_tile);
    debug!("Seeded {} with tile type {}.", seed_position, seed_tile);
    if sink.wants(GenerationEventKind::TileSeeded) {
        sink.send(GenerationEvent::TileSeeded {
            position: seed_position,
            tile: seed_tile,
        });
    }

    *state = GenerationState::Expanding;
    let compiler = RuleCompiler::new(config.stacking_bonus);
    let mut frontier = vec![seed_position];
    let mut wave = 0;
    let mut waves = 0;
    let mut fallbacks = 0;

    while !frontier.is_empty() {
        let current = std::mem::take(&mut frontier);
        if sink.wants(GenerationEventKind::WaveStarted) {
            sink.send(GenerationEvent::WaveStarted {
                index: wave,
                frontier: current.len(),
            });
        }

        for origin in &current {
            for position in grid.ungenerated_neighbors(*origin) {
                let compiled = compiler.compile(&grid, catalog, position, sink);
                let climate = estimate(compiled.range, config.climate_baseline, rng);
                let selection = select_tile(
                    &compiled.candidates,
                    &climate,
                    catalog,
                    config.selection,
                    rng,
                    sink,
                )?;

                let previous = grid.set(position, selection.tile);
                debug_assert!(previous.is_none(), "cell {position} generated twice");
                if selection.is_fallback() {
                    fallbacks += 1;
                }

                debug!(
                    "Wave {}: {} <- tile type {} ({} candidates, {:?}).",
                    wave,
                    position,
                    selection.tile,
                    compiled.candidates.len(),
                    selection.outcome
                );
                if sink.wants(GenerationEventKind::TileGenerated) {
                    sink.send(GenerationEvent::TileGenerated {
                        wave,
                        position,
                        tile: selection.tile,
                        candidates: compiled.candidates.len(),
                        outcome: selection.outcome,
                    });
                }
                frontier.push(position);
            }
        }

        if !frontier.is_empty() {
            waves += 1;
            info!("Wave {}: generated {} tiles.", wave, frontier.len());
        }
        if sink.wants(GenerationEventKind::WaveFinished) {
            sink.send(GenerationEvent::WaveFinished {
                index: wave,
                generated: frontier.len(),
            });
        }
        wave += 1;
    }

    *state = GenerationState::Done;
    let result = GenerationResult {
        grid,
        seed_position,
        seed_tile,
        waves,
        fallbacks,
        seed,
    };
    let summary = result.summary();
    info!(
        "Generation finished | tiles: {} | waves: {} | fallbacks: {} | unreached: {}.",
        summary.tiles, summary.waves, summary.fallbacks, summary.unreached
    );
    if sink.wants(GenerationEventKind::RunFinished) {
        sink.send(GenerationEvent::RunFinished { summary });
    }

    Ok(result)
}

/// Checks the configuration and that the catalog can seed a run with it.
fn validate_against_catalog(config: &GeneratorConfig, catalog: &TileCatalog) -> Result<()> {
    config.validate()?;
    if catalog.is_empty() {
        return Err(Error::EmptyCatalog);
    }
    if let Some(FirstTileType::Fixed(id)) = config.first_tile_type {
        catalog.by_index(id)?;
    }
    Ok(())
}

/// Generates a grid with a caller-provided RNG.
pub fn generate<R: RngCore>(
    config: &GeneratorConfig,
    catalog: &TileCatalog,
    rng: &mut R,
) -> Result<GenerationResult> {
    TerrainGenerator::try_new(config.clone(), catalog)?.run_with_rng(rng)
}

fn first_position<R: RngCore>(config: &GeneratorConfig, rng: &mut R) -> Position {
    match config.first_tile_position {
        FirstTilePosition::Fixed(position) => position,
        FirstTilePosition::Random => {
            let positions = config.shape.positions();
            positions[rand_index(rng, positions.len())]
        }
    }
}

fn first_tile<R: RngCore>(
    config: &GeneratorConfig,
    catalog: &TileCatalog,
    rng: &mut R,
) -> Result<TileTypeId> {
    match config.first_tile_type {
        None => Err(Error::MissingFirstTileType),
        Some(FirstTileType::Fixed(id)) => catalog.by_index(id).map(|_| id),
        Some(FirstTileType::Random) => catalog.random(rng).ok_or(Error::EmptyCatalog),
    }
}
