//! Compilation of neighbor generation rules into a per-cell candidate list.
//!
//! Every generated neighbor contributes the rules of its tile type. Rules targeting the same
//! (climate, terrain) pair are merged: each additional positive contribution adds the stacking
//! bonus, and any zero-probability contribution vetoes the pair for good. The result is sorted
//! by descending probability and stripped of candidates that can never be drawn.
use tracing::{trace, warn};

use crate::catalog::tile::clamp_probability;
use crate::catalog::{Climate, GenerationRule, TerrainType, TileCatalog};
use crate::generator::climate::{neighbor_range, ClimateRange};
use crate::generator::events::{emit_warning, EventSink};
use crate::generator::DEFAULT_STACKING_BONUS;
use crate::grid::HexGrid;
use crate::hex::Position;

/// A run-local copy of a rule, updated in place while rules are merged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub climate: Option<Climate>,
    pub terrain: Option<TerrainType>,
    /// Merged probability in [0, 1].
    pub probability: f32,
    /// Set once any neighbor contributed this pair with probability zero.
    pub vetoed: bool,
    /// Number of neighbor rules merged into this candidate.
    pub contributions: u32,
}

impl Candidate {
    fn from_rule(rule: &GenerationRule) -> Self {
        let probability = clamp_probability(rule.probability);
        let vetoed = probability <= 0.0;
        Self {
            climate: rule.climate,
            terrain: rule.terrain,
            probability,
            vetoed,
            contributions: 1,
        }
    }

    pub fn matches(&self, rule: &GenerationRule) -> bool {
        self.climate == rule.climate && self.terrain == rule.terrain
    }

    /// Merges another contribution of the same pair.
    fn stack(&mut self, rule: &GenerationRule, bonus: f32) {
        self.contributions += 1;
        if self.vetoed {
            return;
        }
        if clamp_probability(rule.probability) > 0.0 {
            self.probability = (self.probability + bonus).clamp(0.0, 1.0);
        } else {
            self.probability = 0.0;
            self.vetoed = true;
        }
    }
}

/// Candidates for one cell together with the neighborhood they were compiled from.
#[derive(Clone, Debug, Default)]
pub struct CompiledRules {
    /// Generated neighbors, clockwise.
    pub neighbors: Vec<Position>,
    /// Climate range over those neighbors.
    pub range: ClimateRange,
    /// Drawable candidates, highest probability first.
    pub candidates: Vec<Candidate>,
    /// Rules skipped because they constrain neither climate nor terrain.
    pub malformed: usize,
    /// New candidates dropped to keep snow from touching desert.
    pub blocked: usize,
}

impl CompiledRules {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Compiles neighbor rules into candidate lists.
#[derive(Clone, Copy, Debug)]
pub struct RuleCompiler {
    pub stacking_bonus: f32,
}

impl Default for RuleCompiler {
    fn default() -> Self {
        Self {
            stacking_bonus: DEFAULT_STACKING_BONUS,
        }
    }
}

impl RuleCompiler {
    pub fn new(stacking_bonus: f32) -> Self {
        Self { stacking_bonus }
    }

    /// Compiles the candidates for `position` from its generated neighbors.
    ///
    /// Ties in probability keep the order in which the pair was first contributed
    /// (neighbors clockwise, rules in catalog order). The grid is not modified.
    pub fn compile(
        &self,
        grid: &HexGrid,
        catalog: &TileCatalog,
        position: Position,
        sink: &mut dyn EventSink,
    ) -> CompiledRules {
        let neighbors = grid.generated_neighbors(position);
        let range = neighbor_range(grid, catalog, &neighbors);

        let mut candidates: Vec<Candidate> = Vec::new();
        let mut malformed = 0;
        let mut blocked = 0;

        for neighbor in &neighbors {
            let Some(tile) = grid.get(*neighbor).and_then(|id| catalog.get(id)) else {
                continue;
            };
            if tile.rules.is_empty() {
                trace!("Neighbor {} ('{}') has no generation rules.", neighbor, tile.name);
            }

            for rule in &tile.rules {
                if rule.is_malformed() {
                    malformed += 1;
                    warn!(
                        "Tile type '{}' has a rule without climate or terrain; skipping.",
                        tile.name
                    );
                    emit_warning(
                        sink,
                        || format!("tile:{} position:{}", tile.name, position),
                        || "Rule constrains neither climate nor terrain; skipping".into(),
                    );
                    continue;
                }

                if let Some(existing) = candidates.iter().position(|c| c.matches(rule)) {
                    candidates[existing].stack(rule, self.stacking_bonus);
                } else if juxtaposes_extremes(rule.climate, &range) {
                    blocked += 1;
                    trace!(
                        "Skipping {:?} candidate at {} next to opposite climate extreme.",
                        rule.climate,
                        position
                    );
                } else {
                    candidates.push(Candidate::from_rule(rule));
                }
            }
        }

        candidates.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        candidates.retain(|c| c.probability > 0.0);

        CompiledRules {
            neighbors,
            range,
            candidates,
            malformed,
            blocked,
        }
    }
}

/// Whether a candidate of `climate` would put desert next to snow.
fn juxtaposes_extremes(climate: Option<Climate>, range: &ClimateRange) -> bool {
    let Some(climate) = climate else {
        return false;
    };
    [range.coldest, range.warmest]
        .into_iter()
        .flatten()
        .any(|neighbor| !climate.can_border(neighbor))
}

#[cfg(test)]
mod tests {
    use glam::IVec2;

    use super::*;
    use crate::catalog::{TileType, TileTypeId};
    use crate::generator::events::{GenerationEventKind, VecSink};
    use crate::grid::GridShape;
    use crate::hex::Orientation;

    const BONUS: f32 = 0.05;

    /// Grid with the center cell at the origin and its six pointy-top neighbors.
    fn grid() -> HexGrid {
        HexGrid::new(GridShape::centered(3, 3), Orientation::PointyTop)
    }

    // Pointy-top neighbors of the origin: NE, E, SE, SW, W, NW.
    const NE: IVec2 = IVec2::new(0, 1);
    const E: IVec2 = IVec2::new(1, 0);
    const SE: IVec2 = IVec2::new(0, -1);
    const W: IVec2 = IVec2::new(-1, 0);

    fn place(grid: &mut HexGrid, at: IVec2, id: TileTypeId) {
        grid.set(at, id);
    }

    fn compile(grid: &HexGrid, catalog: &TileCatalog) -> CompiledRules {
        RuleCompiler::new(BONUS).compile(grid, catalog, IVec2::ZERO, &mut ())
    }

    #[test]
    fn no_generated_neighbors_yields_nothing() {
        let catalog = TileCatalog::from_types([TileType::new(
            "woods",
            Climate::Temperate,
            TerrainType::Forest,
        )
        .with_rule(GenerationRule::climate(Climate::Temperate, 0.5))]);
        let compiled = compile(&grid(), &catalog);
        assert!(compiled.is_empty());
        assert!(compiled.range.is_unconstrained());
        assert!(compiled.neighbors.is_empty());
    }

    #[test]
    fn identical_rules_stack_by_one_bonus_per_extra_neighbor() {
        let catalog = TileCatalog::from_types([TileType::new(
            "woods",
            Climate::Temperate,
            TerrainType::Forest,
        )
        .with_rule(GenerationRule::terrain(TerrainType::Forest, 0.5))]);
        let mut g = grid();

        place(&mut g, NE, 0);
        assert_eq!(compile(&g, &catalog).candidates[0].probability, 0.5);

        place(&mut g, E, 0);
        let two = compile(&g, &catalog);
        assert_eq!(two.candidates.len(), 1);
        assert!((two.candidates[0].probability - (0.5 + BONUS)).abs() < 1e-6);
        assert_eq!(two.candidates[0].contributions, 2);

        place(&mut g, SE, 0);
        let three = compile(&g, &catalog);
        assert!((three.candidates[0].probability - (0.5 + 2.0 * BONUS)).abs() < 1e-6);
    }

    #[test]
    fn stacking_clamps_at_one() {
        let catalog = TileCatalog::from_types([TileType::new(
            "erg",
            Climate::Arid,
            TerrainType::Dunes,
        )
        .with_rule(GenerationRule::climate(Climate::Arid, 0.98))]);
        let mut g = grid();
        for at in [NE, E, SE, W] {
            place(&mut g, at, 0);
        }
        let compiled = compile(&g, &catalog);
        assert_eq!(compiled.candidates[0].probability, 1.0);
        assert_eq!(compiled.candidates[0].contributions, 4);
    }

    #[test]
    fn zero_probability_vetoes_pair_for_good() {
        let catalog = TileCatalog::from_types([
            TileType::new("meadow", Climate::Temperate, TerrainType::Plains)
                .with_rule(GenerationRule::terrain(TerrainType::Water, 0.7)),
            TileType::new("mesa", Climate::Temperate, TerrainType::Canyons)
                .with_rule(GenerationRule::never(None, Some(TerrainType::Water))),
        ]);
        let mut g = grid();
        place(&mut g, NE, 0);
        place(&mut g, E, 1);
        place(&mut g, SE, 0);
        let compiled = compile(&g, &catalog);
        assert!(compiled.candidates.is_empty());
    }

    #[test]
    fn veto_added_first_cannot_be_revived() {
        let catalog = TileCatalog::from_types([
            TileType::new("mesa", Climate::Temperate, TerrainType::Canyons)
                .with_rule(GenerationRule::never(None, Some(TerrainType::Water))),
            TileType::new("meadow", Climate::Temperate, TerrainType::Plains)
                .with_rule(GenerationRule::terrain(TerrainType::Water, 0.7)),
        ]);
        let mut g = grid();
        place(&mut g, NE, 0);
        place(&mut g, E, 1);
        assert!(compile(&g, &catalog).candidates.is_empty());
    }

    #[test]
    fn candidates_sorted_descending_with_stable_ties() {
        let catalog = TileCatalog::from_types([TileType::new(
            "meadow",
            Climate::Temperate,
            TerrainType::Plains,
        )
        .with_rules([
            GenerationRule::terrain(TerrainType::Mud, 0.2),
            GenerationRule::terrain(TerrainType::Forest, 0.6),
            GenerationRule::terrain(TerrainType::Plains, 0.2),
            GenerationRule::climate(Climate::Tropical, 0.4),
        ])]);
        let mut g = grid();
        place(&mut g, NE, 0);
        let terrains: Vec<_> = compile(&g, &catalog)
            .candidates
            .iter()
            .map(|c| (c.climate, c.terrain))
            .collect();
        assert_eq!(
            terrains,
            vec![
                (None, Some(TerrainType::Forest)),
                (Some(Climate::Tropical), None),
                (None, Some(TerrainType::Mud)),
                (None, Some(TerrainType::Plains)),
            ]
        );
    }

    #[test]
    fn desert_rule_is_blocked_next_to_snow() {
        let catalog = TileCatalog::from_types([
            TileType::new("glacier", Climate::Snowy, TerrainType::Ice),
            TileType::new("oasis", Climate::Tropical, TerrainType::Water).with_rules([
                GenerationRule::climate(Climate::Arid, 0.9),
                GenerationRule::terrain(TerrainType::Water, 0.4),
            ]),
        ]);
        let mut g = grid();
        place(&mut g, NE, 0);
        place(&mut g, E, 1);
        let compiled = compile(&g, &catalog);
        assert_eq!(compiled.range.coldest, Some(Climate::Snowy));
        assert_eq!(compiled.blocked, 1);
        assert_eq!(compiled.candidates.len(), 1);
        assert_eq!(compiled.candidates[0].terrain, Some(TerrainType::Water));
        assert!(compiled
            .candidates
            .iter()
            .all(|c| c.climate != Some(Climate::Arid)));
    }

    #[test]
    fn snow_rule_is_blocked_next_to_desert() {
        let catalog = TileCatalog::from_types([
            TileType::new("erg", Climate::Arid, TerrainType::Dunes),
            TileType::new("taiga", Climate::Temperate, TerrainType::Forest)
                .with_rule(GenerationRule::exact(Climate::Snowy, TerrainType::Forest, 0.8)),
        ]);
        let mut g = grid();
        place(&mut g, W, 0);
        place(&mut g, E, 1);
        let compiled = compile(&g, &catalog);
        assert!(compiled.candidates.is_empty());
        assert_eq!(compiled.blocked, 1);
    }

    #[test]
    fn malformed_rule_is_reported_and_skipped() {
        let catalog = TileCatalog::from_types([TileType::new(
            "meadow",
            Climate::Temperate,
            TerrainType::Plains,
        )
        .with_rules([
            GenerationRule::new(None, None, 0.9),
            GenerationRule::climate(Climate::Temperate, 0.3),
        ])]);
        let mut g = grid();
        place(&mut g, NE, 0);
        let mut sink = VecSink::filtered([GenerationEventKind::Warning]);
        let compiled = RuleCompiler::new(BONUS).compile(&g, &catalog, IVec2::ZERO, &mut sink);
        assert_eq!(compiled.malformed, 1);
        assert_eq!(compiled.candidates.len(), 1);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn out_of_range_rule_literals_are_clamped() {
        let catalog = TileCatalog::from_types([
            TileType::new("meadow", Climate::Temperate, TerrainType::Plains).with_rules([
                GenerationRule {
                    climate: Some(Climate::Temperate),
                    terrain: None,
                    probability: 1.5,
                },
                GenerationRule {
                    climate: None,
                    terrain: Some(TerrainType::Water),
                    probability: f32::NAN,
                },
                GenerationRule {
                    climate: None,
                    terrain: Some(TerrainType::Mud),
                    probability: -0.4,
                },
            ]),
        ]);
        let mut g = grid();
        place(&mut g, NE, 0);
        let single = compile(&g, &catalog);
        assert_eq!(single.candidates.len(), 1);
        assert_eq!(single.candidates[0].probability, 1.0);

        place(&mut g, E, 0);
        let stacked = compile(&g, &catalog);
        assert_eq!(stacked.candidates.len(), 1);
        assert!(stacked
            .candidates
            .iter()
            .all(|c| (0.0..=1.0).contains(&c.probability)));
    }

    #[test]
    fn compiling_does_not_touch_catalog_or_grid() {
        let catalog = TileCatalog::from_types([TileType::new(
            "woods",
            Climate::Temperate,
            TerrainType::Forest,
        )
        .with_rule(GenerationRule::terrain(TerrainType::Forest, 0.5))]);
        let mut g = grid();
        place(&mut g, NE, 0);
        place(&mut g, E, 0);
        let before = g.clone();
        let first = compile(&g, &catalog);
        let second = compile(&g, &catalog);
        assert_eq!(first.candidates, second.candidates);
        assert_eq!(g, before);
        assert_eq!(catalog.get(0).map(|t| t.rules[0].probability), Some(0.5));
    }
}
