//! Climate estimation from already generated neighbors.
//!
//! The estimate is a local, single-step heuristic: the coldest and warmest neighbor climates
//! bound the cell, and a biased climate is drawn around a baseline so climates drift gradually
//! across the map instead of jumping between extremes.
use rand::RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::catalog::{Climate, TileCatalog};
use crate::generator::rand_index;
use crate::grid::HexGrid;
use crate::hex::Position;

/// How the baseline climate is chosen when neighbors disagree.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClimateBaseline {
    /// Mixed neighbors fall back to [`Climate::Temperate`].
    #[default]
    Temperate,
    /// Mixed neighbors use the rank halfway between coldest and warmest, rounded down.
    Midpoint,
}

/// Coldest and warmest climate among a cell's generated neighbors.
///
/// Both are `None` when no neighbor has been generated, meaning "no constraint".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClimateRange {
    pub coldest: Option<Climate>,
    pub warmest: Option<Climate>,
}

impl ClimateRange {
    /// Range spanned by the given climates.
    pub fn from_climates<I: IntoIterator<Item = Climate>>(climates: I) -> Self {
        climates.into_iter().fold(Self::default(), |range, c| Self {
            coldest: Some(range.coldest.map_or(c, |cur| cur.min(c))),
            warmest: Some(range.warmest.map_or(c, |cur| cur.max(c))),
        })
    }

    pub fn is_unconstrained(&self) -> bool {
        self.coldest.is_none() && self.warmest.is_none()
    }

    /// Snow on one side and desert on the other.
    pub fn spans_snow_to_desert(&self) -> bool {
        self.coldest == Some(Climate::Snowy) && self.warmest == Some(Climate::Arid)
    }

    /// Climate the biased draw is centered on.
    pub fn baseline(&self, mode: ClimateBaseline) -> Climate {
        match (self.coldest, self.warmest) {
            (Some(cold), Some(warm)) if cold == warm => cold,
            (Some(cold), Some(warm)) if mode == ClimateBaseline::Midpoint => {
                Climate::from_rank((cold.rank() + warm.rank()) / 2).unwrap_or(Climate::Temperate)
            }
            _ => Climate::Temperate,
        }
    }
}

/// Result of estimating a cell's climate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClimateEstimate {
    pub range: ClimateRange,
    /// Climate used when a rule leaves the climate open and for fallbacks.
    pub biased: Climate,
}

/// Climate range over the generated neighbors of `position`.
pub fn climate_range(grid: &HexGrid, catalog: &TileCatalog, position: Position) -> ClimateRange {
    neighbor_range(grid, catalog, &grid.generated_neighbors(position))
}

/// Climate range over the given generated positions. Unknown tile ids are ignored.
pub fn neighbor_range(
    grid: &HexGrid,
    catalog: &TileCatalog,
    neighbors: &[Position],
) -> ClimateRange {
    ClimateRange::from_climates(
        neighbors
            .iter()
            .filter_map(|p| grid.get(*p))
            .filter_map(|id| catalog.get(id))
            .map(|t| t.climate),
    )
}

/// Draws a climate uniformly from one step below to one step above the baseline.
///
/// A cell that sits between snow and desert is always temperate. The draw is made in
/// every case so the RNG stream does not depend on the override.
pub fn biased_climate<R: RngCore>(
    range: &ClimateRange,
    mode: ClimateBaseline,
    rng: &mut R,
) -> Climate {
    let baseline = range.baseline(mode).rank();
    let low = baseline.saturating_sub(1).max(Climate::COLDEST_RANK);
    let high = (baseline + 1).min(Climate::HOTTEST_RANK);
    let span = (high - low + 1) as usize;
    let rank = low + rand_index(rng, span) as u8;
    let drawn = Climate::from_rank(rank).unwrap_or(Climate::Temperate);

    if range.spans_snow_to_desert() {
        Climate::Temperate
    } else {
        drawn
    }
}

/// Full estimate for a known range.
pub fn estimate<R: RngCore>(
    range: ClimateRange,
    mode: ClimateBaseline,
    rng: &mut R,
) -> ClimateEstimate {
    let biased = biased_climate(&range, mode, rng);
    ClimateEstimate { range, biased }
}
