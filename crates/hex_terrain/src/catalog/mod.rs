//! Read-only registry of tile types.
//!
//! A [`TileCatalog`] is built once before a generation run and borrowed immutably for
//! its duration. Lookups by climate, terrain, or both return random members of the
//! matching group, drawn from the caller's RNG so runs stay reproducible.
use std::collections::HashMap;

use rand::RngCore;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::generator::rand_index;

pub mod climate;
pub mod tile;

pub use climate::{Climate, TerrainType};
pub use tile::{GenerationRule, TileType};

/// Index of a tile type inside its catalog.
pub type TileTypeId = usize;

/// Registry of tile types with lookup tables by climate and terrain.
#[derive(Clone, Debug, Default)]
pub struct TileCatalog {
    types: Vec<TileType>,
    by_climate: HashMap<Climate, Vec<TileTypeId>>,
    by_terrain: HashMap<TerrainType, Vec<TileTypeId>>,
    by_pair: HashMap<(Climate, TerrainType), Vec<TileTypeId>>,
}

impl TileCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from tile types; ids are assigned in iteration order.
    pub fn from_types<I: IntoIterator<Item = TileType>>(types: I) -> Self {
        let mut catalog = Self::new();
        for tile in types {
            catalog.insert(tile);
        }
        debug!(
            "Tile catalog built: {} types, climates {:?}.",
            catalog.len(),
            catalog.climate_counts()
        );
        catalog
    }

    /// Adds a tile type and returns its id.
    pub fn insert(&mut self, tile: TileType) -> TileTypeId {
        let id = self.types.len();
        if tile.visuals.is_empty() {
            warn!("Tile type '{}' has no visuals.", tile.name);
        }
        self.by_climate.entry(tile.climate).or_default().push(id);
        self.by_terrain.entry(tile.terrain).or_default().push(id);
        self.by_pair
            .entry((tile.climate, tile.terrain))
            .or_default()
            .push(id);
        self.types.push(tile);
        id
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn get(&self, id: TileTypeId) -> Option<&TileType> {
        self.types.get(id)
    }

    /// Like [`TileCatalog::get`], but an unknown id is an error.
    pub fn by_index(&self, id: TileTypeId) -> Result<&TileType> {
        self.types.get(id).ok_or(Error::UnknownTileType { id })
    }

    pub fn iter(&self) -> impl Iterator<Item = (TileTypeId, &TileType)> {
        self.types.iter().enumerate()
    }

    pub fn find_by_name(&self, name: &str) -> Option<TileTypeId> {
        self.types.iter().position(|t| t.name == name)
    }

    pub fn of_climate(&self, climate: Climate) -> &[TileTypeId] {
        self.by_climate
            .get(&climate)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn of_terrain(&self, terrain: TerrainType) -> &[TileTypeId] {
        self.by_terrain
            .get(&terrain)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn of_climate_and_terrain(&self, climate: Climate, terrain: TerrainType) -> &[TileTypeId] {
        self.by_pair
            .get(&(climate, terrain))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of tile types per climate, coldest first.
    pub fn climate_counts(&self) -> Vec<(Climate, usize)> {
        Climate::ALL
            .iter()
            .map(|c| (*c, self.of_climate(*c).len()))
            .collect()
    }

    /// Whether every climate has at least one tile type, so climate-only fallbacks cannot fail.
    pub fn covers_all_climates(&self) -> bool {
        Climate::ALL.iter().all(|c| !self.of_climate(*c).is_empty())
    }

    /// Uniformly random tile type from the whole catalog.
    pub fn random<R: RngCore>(&self, rng: &mut R) -> Option<TileTypeId> {
        if self.types.is_empty() {
            None
        } else {
            Some(rand_index(rng, self.types.len()))
        }
    }

    /// Random tile type of the given climate.
    pub fn random_of_climate<R: RngCore>(
        &self,
        climate: Climate,
        rng: &mut R,
    ) -> Option<TileTypeId> {
        pick(self.of_climate(climate), rng)
    }

    /// Random tile type matching the given climate and/or terrain.
    ///
    /// Querying with neither is a contract violation and fails with
    /// [`Error::InvalidCatalogQuery`].
    pub fn random_of_climate_and_terrain<R: RngCore>(
        &self,
        climate: Option<Climate>,
        terrain: Option<TerrainType>,
        rng: &mut R,
    ) -> Result<Option<TileTypeId>> {
        let group = match (climate, terrain) {
            (None, None) => return Err(Error::InvalidCatalogQuery),
            (Some(c), None) => self.of_climate(c),
            (None, Some(t)) => self.of_terrain(t),
            (Some(c), Some(t)) => self.of_climate_and_terrain(c, t),
        };
        Ok(pick(group, rng))
    }
}

impl FromIterator<TileType> for TileCatalog {
    fn from_iter<I: IntoIterator<Item = TileType>>(iter: I) -> Self {
        Self::from_types(iter)
    }
}

fn pick<R: RngCore>(ids: &[TileTypeId], rng: &mut R) -> Option<TileTypeId> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[rand_index(rng, ids.len())])
    }
}
