//! Configuration for a generation run.
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::catalog::TileTypeId;
use crate::error::{Error, Result};
use crate::generator::climate::ClimateBaseline;
use crate::generator::selection::SelectionStrategy;
use crate::generator::DEFAULT_STACKING_BONUS;
use crate::grid::GridShape;
use crate::hex::{Orientation, Position};

/// Where the RNG seed comes from.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedSource {
    Fixed(u64),
    /// Derived from the system clock when the run starts.
    Time,
}

impl SeedSource {
    pub fn resolve(self) -> u64 {
        match self {
            SeedSource::Fixed(seed) => seed,
            SeedSource::Time => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0),
        }
    }
}

/// Position of the first tile.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FirstTilePosition {
    Fixed(Position),
    /// Uniformly random cell inside the grid bounds.
    Random,
}

/// Type of the first tile.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FirstTileType {
    Fixed(TileTypeId),
    /// Uniformly random tile type from the whole catalog.
    Random,
}

/// Configuration for generating a grid.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Valid cells of the grid.
    pub shape: GridShape,
    /// Hex layout, fixed for the run.
    pub orientation: Orientation,
    /// RNG seed used by [`crate::generator::scheduler::TerrainGenerator::run`].
    pub seed: SeedSource,
    /// Where the first tile is placed.
    pub first_tile_position: FirstTilePosition,
    /// First tile type; `None` is an unset configuration and fails validation.
    pub first_tile_type: Option<FirstTileType>,
    /// Probability added when neighbors contribute the same rule, in (0, 1).
    pub stacking_bonus: f32,
    /// How compiled candidates are drawn.
    pub selection: SelectionStrategy,
    /// How the baseline climate is chosen when neighbors disagree.
    pub climate_baseline: ClimateBaseline,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            shape: GridShape::centered(1, 1),
            orientation: Orientation::FlatTop,
            seed: SeedSource::Time,
            first_tile_position: FirstTilePosition::Fixed(Position::ZERO),
            first_tile_type: Some(FirstTileType::Random),
            stacking_bonus: DEFAULT_STACKING_BONUS,
            selection: SelectionStrategy::Sequential,
            climate_baseline: ClimateBaseline::Temperate,
        }
    }
}

impl GeneratorConfig {
    /// Creates a new [`GeneratorConfig`] for the given grid shape.
    pub fn new(shape: GridShape) -> Self {
        Self {
            shape,
            ..Default::default()
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = SeedSource::Fixed(seed);
        self
    }

    pub fn with_time_seed(mut self) -> Self {
        self.seed = SeedSource::Time;
        self
    }

    pub fn with_first_tile_position(mut self, position: FirstTilePosition) -> Self {
        self.first_tile_position = position;
        self
    }

    /// Sets the first tile type; `None` leaves it unset.
    pub fn with_first_tile_type(mut self, tile: Option<FirstTileType>) -> Self {
        self.first_tile_type = tile;
        self
    }

    pub fn with_stacking_bonus(mut self, bonus: f32) -> Self {
        self.stacking_bonus = bonus;
        self
    }

    pub fn with_selection(mut self, strategy: SelectionStrategy) -> Self {
        self.selection = strategy;
        self
    }

    pub fn with_climate_baseline(mut self, baseline: ClimateBaseline) -> Self {
        self.climate_baseline = baseline;
        self
    }

    /// Validates the configuration values that do not depend on the catalog.
    pub fn validate(&self) -> Result<()> {
        if self.shape.is_empty() {
            return Err(Error::InvalidConfig("grid shape has no cells".into()));
        }
        if !(self.stacking_bonus > 0.0 && self.stacking_bonus < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "stacking_bonus must be in (0, 1), got {}",
                self.stacking_bonus
            )));
        }
        if self.first_tile_type.is_none() {
            return Err(Error::MissingFirstTileType);
        }
        if let FirstTilePosition::Fixed(position) = self.first_tile_position {
            if !self.shape.contains(position) {
                return Err(Error::FirstTileOutOfBounds { position });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::IVec2;

    use super::*;

    #[test]
    fn builder_sets_fields() {
        let config = GeneratorConfig::new(GridShape::centered(5, 5))
            .with_orientation(Orientation::PointyTop)
            .with_seed(7)
            .with_first_tile_position(FirstTilePosition::Random)
            .with_first_tile_type(Some(FirstTileType::Fixed(2)))
            .with_stacking_bonus(0.05)
            .with_selection(SelectionStrategy::HighestProbability)
            .with_climate_baseline(ClimateBaseline::Midpoint);

        assert_eq!(config.orientation, Orientation::PointyTop);
        assert_eq!(config.seed, SeedSource::Fixed(7));
        assert_eq!(config.first_tile_type, Some(FirstTileType::Fixed(2)));
        assert_eq!(config.stacking_bonus, 0.05);
        assert_eq!(config.selection, SelectionStrategy::HighestProbability);
        assert_eq!(config.climate_baseline, ClimateBaseline::Midpoint);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unset_first_tile_type_is_fatal() {
        let config = GeneratorConfig::new(GridShape::centered(3, 3)).with_first_tile_type(None);
        assert!(matches!(config.validate(), Err(Error::MissingFirstTileType)));
    }

    #[test]
    fn out_of_bounds_first_tile_is_fatal() {
        let config = GeneratorConfig::new(GridShape::centered(3, 3))
            .with_first_tile_position(FirstTilePosition::Fixed(IVec2::new(2, 0)));
        assert!(matches!(
            config.validate(),
            Err(Error::FirstTileOutOfBounds { position }) if position == IVec2::new(2, 0)
        ));
    }

    #[test]
    fn stacking_bonus_must_be_open_unit_interval() {
        for bonus in [0.0, 1.0, -0.1, f32::NAN] {
            let config = GeneratorConfig::new(GridShape::centered(3, 3)).with_stacking_bonus(bonus);
            assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn empty_shape_is_rejected() {
        let config = GeneratorConfig::new(GridShape::from_cells(std::iter::empty()));
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn fixed_seed_resolves_to_itself() {
        assert_eq!(SeedSource::Fixed(99).resolve(), 99);
    }
}
