//! Tile type definitions and the generation rules they contribute to their neighbors.
use rand::RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::catalog::{Climate, TerrainType};
use crate::generator::rand_index;

/// Influence a placed tile has on its ungenerated neighbors.
///
/// `None` for climate or terrain means "any". A rule with both set to `None` constrains
/// nothing and is skipped with a warning when rules are compiled.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationRule {
    pub climate: Option<Climate>,
    pub terrain: Option<TerrainType>,
    /// Chance in [0, 1]. Zero means the neighbor may never be of this kind.
    /// Out-of-range values are clamped when deserialized and when rules are compiled.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "deserialize_probability"))]
    pub probability: f32,
}

impl GenerationRule {
    /// Creates a rule; `probability` is clamped into [0, 1].
    pub fn new(climate: Option<Climate>, terrain: Option<TerrainType>, probability: f32) -> Self {
        Self {
            climate,
            terrain,
            probability: clamp_probability(probability),
        }
    }

    pub fn climate(climate: Climate, probability: f32) -> Self {
        Self::new(Some(climate), None, probability)
    }

    pub fn terrain(terrain: TerrainType, probability: f32) -> Self {
        Self::new(None, Some(terrain), probability)
    }

    pub fn exact(climate: Climate, terrain: TerrainType, probability: f32) -> Self {
        Self::new(Some(climate), Some(terrain), probability)
    }

    /// A rule that forbids the given kind next to the owning tile.
    pub fn never(climate: Option<Climate>, terrain: Option<TerrainType>) -> Self {
        Self::new(climate, terrain, 0.0)
    }

    /// Whether two rules target the same (climate, terrain) pair.
    pub fn same_target(&self, other: &GenerationRule) -> bool {
        self.climate == other.climate && self.terrain == other.terrain
    }

    pub fn is_malformed(&self) -> bool {
        self.climate.is_none() && self.terrain.is_none()
    }
}

#[inline]
pub(crate) fn clamp_probability(p: f32) -> f32 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

#[cfg(feature = "serde")]
fn deserialize_probability<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    f32::deserialize(deserializer).map(clamp_probability)
}

/// A catalog entry combining a climate, a terrain type, visuals, and neighbor rules.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct TileType {
    pub name: String,
    pub climate: Climate,
    pub terrain: TerrainType,
    /// Opaque visual identifiers handed to the renderer.
    pub visuals: Vec<String>,
    /// Fixed visual to use; `None` picks one at random per tile.
    pub visual_index: Option<usize>,
    /// Rules applied to ungenerated neighbors once this tile is placed, in priority order.
    pub rules: Vec<GenerationRule>,
}

impl TileType {
    /// Creates a tile type whose only visual is its name.
    pub fn new(name: impl Into<String>, climate: Climate, terrain: TerrainType) -> Self {
        let name = name.into();
        Self {
            visuals: vec![name.clone()],
            name,
            climate,
            terrain,
            visual_index: None,
            rules: Vec::new(),
        }
    }

    /// Replaces the visuals. An empty list keeps the current visuals.
    pub fn with_visuals<I, S>(mut self, visuals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let visuals: Vec<String> = visuals.into_iter().map(Into::into).collect();
        if !visuals.is_empty() {
            self.visuals = visuals;
        }
        self
    }

    pub fn with_visual_index(mut self, index: usize) -> Self {
        self.visual_index = Some(index);
        self
    }

    pub fn with_rule(mut self, rule: GenerationRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_rules(mut self, rules: impl IntoIterator<Item = GenerationRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Picks the visual for one placed tile.
    pub fn visual<R: RngCore>(&self, rng: &mut R) -> Option<&str> {
        if self.visuals.is_empty() {
            return None;
        }
        let index = match self.visual_index {
            Some(i) if i < self.visuals.len() => i,
            _ => rand_index(rng, self.visuals.len()),
        };
        self.visuals.get(index).map(String::as_str)
    }
}
