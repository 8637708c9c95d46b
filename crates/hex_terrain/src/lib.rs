#![forbid(unsafe_code)]
//! hex_terrain: Procedural hex-grid terrain generation driven by neighbor rules.
//!
//! Modules:
//! - hex: offset-coordinate adjacency for flat-top and pointy-top layouts
//! - grid: grid bounds and the write-once cell store
//! - catalog: tile types, climates, terrains, and generation rules
//! - generator: rule compilation, climate estimation, tile selection, the wave scheduler, events
//!
//! For a runnable walkthrough, see the `hex_terrain_examples` crate.
pub mod catalog;
pub mod error;
pub mod generator;
pub mod grid;
pub mod hex;

/// Convenient re-exports for common types. Import with `use hex_terrain::prelude::*;`.
pub mod prelude {
    pub use crate::catalog::{
        Climate, GenerationRule, TerrainType, TileCatalog, TileType, TileTypeId,
    };
    pub use crate::error::{Error, Result};
    pub use crate::generator::climate::{ClimateBaseline, ClimateEstimate, ClimateRange};
    pub use crate::generator::config::{
        FirstTilePosition, FirstTileType, GeneratorConfig, SeedSource,
    };
    pub use crate::generator::events::{
        AsEventSink, EventSink, FnSink, GenerationEvent, GenerationEventKind, MultiSink,
        RunSummary, VecSink,
    };
    pub use crate::generator::rules::{Candidate, CompiledRules, RuleCompiler};
    pub use crate::generator::scheduler::{
        generate, GenerationResult, GenerationState, TerrainGenerator,
    };
    pub use crate::generator::selection::{
        select_tile, Selection, SelectionOutcome, SelectionStrategy,
    };
    pub use crate::generator::DEFAULT_STACKING_BONUS;
    pub use crate::grid::{GridShape, HexGrid};
    pub use crate::hex::{neighbor, neighbors, Orientation, Position};
}
