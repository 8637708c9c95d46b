//! Drawing a tile type from compiled candidates.
//!
//! Candidates come from [`crate::generator::rules::RuleCompiler`] sorted by descending
//! probability. A candidate that leaves the climate open resolves against the biased climate
//! of the [`ClimateEstimate`]. When no candidate yields a tile the selector falls back to a
//! random tile of the biased climate, then to any tile in the catalog.
use rand::RngCore;
use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::catalog::{TileCatalog, TileTypeId};
use crate::error::{Error, Result};
use crate::generator::climate::ClimateEstimate;
use crate::generator::events::{emit_warning, EventSink};
use crate::generator::rand01;
use crate::generator::rules::Candidate;

/// Strategy used to draw from compiled candidates.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionStrategy {
    /// Walk candidates in order with an independent probability gate per candidate.
    #[default]
    Sequential,
    /// One roulette draw proportional to probability among candidates that resolve.
    WeightedRandom,
    /// The resolvable candidate with the highest probability.
    HighestProbability,
}

/// How a tile was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Index into the compiled candidate list.
    Accepted { candidate: usize },
    /// No candidate produced a tile.
    Fallback,
}

/// A chosen tile type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub tile: TileTypeId,
    pub outcome: SelectionOutcome,
}

impl Selection {
    pub fn is_fallback(&self) -> bool {
        self.outcome == SelectionOutcome::Fallback
    }
}

/// A candidate resolved against the catalog.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Resolved {
    candidate: usize,
    tile: TileTypeId,
    probability: f32,
}

/// Picks a tile type for one cell.
///
/// Fails only if the catalog is empty, since the fallback chain ends in a uniform draw.
pub fn select_tile<R: RngCore>(
    candidates: &[Candidate],
    estimate: &ClimateEstimate,
    catalog: &TileCatalog,
    strategy: SelectionStrategy,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<Selection> {
    let accepted = match strategy {
        SelectionStrategy::Sequential => draw_sequential(candidates, estimate, catalog, rng)?,
        SelectionStrategy::WeightedRandom => {
            let resolved = resolve_all(candidates, estimate, catalog, rng)?;
            pick_weighted_random(&resolved, rng)
        }
        SelectionStrategy::HighestProbability => {
            let resolved = resolve_all(candidates, estimate, catalog, rng)?;
            pick_highest_probability(&resolved)
        }
    };

    if let Some(r) = accepted {
        return Ok(Selection {
            tile: r.tile,
            outcome: SelectionOutcome::Accepted {
                candidate: r.candidate,
            },
        });
    }

    fallback(candidates.len(), estimate, catalog, rng, sink).map(|tile| Selection {
        tile,
        outcome: SelectionOutcome::Fallback,
    })
}

fn resolve<R: RngCore>(
    candidate: &Candidate,
    estimate: &ClimateEstimate,
    catalog: &TileCatalog,
    rng: &mut R,
) -> Result<Option<TileTypeId>> {
    let climate = candidate.climate.unwrap_or(estimate.biased);
    catalog.random_of_climate_and_terrain(Some(climate), candidate.terrain, rng)
}

fn draw_sequential<R: RngCore>(
    candidates: &[Candidate],
    estimate: &ClimateEstimate,
    catalog: &TileCatalog,
    rng: &mut R,
) -> Result<Option<Resolved>> {
    for (index, candidate) in candidates.iter().enumerate() {
        if rand01(rng) > candidate.probability {
            continue;
        }
        if let Some(tile) = resolve(candidate, estimate, catalog, rng)? {
            return Ok(Some(Resolved {
                candidate: index,
                tile,
                probability: candidate.probability,
            }));
        }
    }
    Ok(None)
}

fn resolve_all<R: RngCore>(
    candidates: &[Candidate],
    estimate: &ClimateEstimate,
    catalog: &TileCatalog,
    rng: &mut R,
) -> Result<Vec<Resolved>> {
    let mut resolved = Vec::with_capacity(candidates.len());
    for (index, candidate) in candidates.iter().enumerate() {
        if let Some(tile) = resolve(candidate, estimate, catalog, rng)? {
            resolved.push(Resolved {
                candidate: index,
                tile,
                probability: candidate.probability,
            });
        }
    }
    Ok(resolved)
}

fn pick_weighted_random<R: RngCore>(resolved: &[Resolved], rng: &mut R) -> Option<Resolved> {
    let total_weight: f32 = resolved.iter().map(|r| r.probability).sum();
    if total_weight <= 0.0 {
        return None;
    }

    let mut roll = rand01(rng) * total_weight;
    for r in resolved {
        roll -= r.probability;
        if roll <= 0.0 {
            return Some(*r);
        }
    }

    resolved.first().copied()
}

/// Highest probability wins; ties go to the earlier candidate.
fn pick_highest_probability(resolved: &[Resolved]) -> Option<Resolved> {
    resolved
        .iter()
        .filter(|r| r.probability > 0.0)
        .fold(None, |best: Option<&Resolved>, r| match best {
            Some(b) if b.probability >= r.probability => Some(b),
            _ => Some(r),
        })
        .copied()
}

fn fallback<R: RngCore>(
    candidate_count: usize,
    estimate: &ClimateEstimate,
    catalog: &TileCatalog,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<TileTypeId> {
    let biased = estimate.biased;
    if let Some(tile) = catalog.random_of_climate(biased, rng) {
        warn!(
            "No candidate accepted out of {}; falling back to a random {} tile.",
            candidate_count, biased
        );
        emit_warning(
            sink,
            || format!("climate:{biased}"),
            || format!("No candidate accepted out of {candidate_count}; using climate fallback"),
        );
        return Ok(tile);
    }

    warn!(
        "Catalog has no {} tile; falling back to a random tile of any climate.",
        biased
    );
    emit_warning(
        sink,
        || format!("climate:{biased}"),
        || "Catalog has no tile of this climate; using any tile".into(),
    );
    catalog.random(rng).ok_or(Error::EmptyCatalog)
}
