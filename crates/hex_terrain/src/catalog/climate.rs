//! Climate and terrain classifications.
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Climate of a tile, ordered from coldest to hottest by [`Climate::rank`].
///
/// The ordering is defined by `rank`, not by declaration order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Climate {
    Snowy,
    Temperate,
    Tropical,
    Arid,
}

impl Climate {
    /// All climates, coldest first.
    pub const ALL: [Climate; 4] = [
        Climate::Snowy,
        Climate::Temperate,
        Climate::Tropical,
        Climate::Arid,
    ];

    pub const COLDEST_RANK: u8 = 1;
    pub const HOTTEST_RANK: u8 = 4;

    /// Position on the cold-to-hot scale, `1` (coldest) to `4` (hottest).
    pub const fn rank(self) -> u8 {
        match self {
            Climate::Snowy => 1,
            Climate::Temperate => 2,
            Climate::Tropical => 3,
            Climate::Arid => 4,
        }
    }

    pub const fn from_rank(rank: u8) -> Option<Climate> {
        match rank {
            1 => Some(Climate::Snowy),
            2 => Some(Climate::Temperate),
            3 => Some(Climate::Tropical),
            4 => Some(Climate::Arid),
            _ => None,
        }
    }

    /// Number of steps between two climates on the cold-to-hot scale.
    pub fn distance(self, other: Climate) -> u8 {
        self.rank().abs_diff(other.rank())
    }

    /// Whether two climates may touch: at most two steps apart, i.e. not snow next to desert.
    pub fn can_border(self, other: Climate) -> bool {
        self.distance(other) < 3
    }
}

impl PartialOrd for Climate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Climate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Climate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Climate::Snowy => "snowy",
            Climate::Temperate => "temperate",
            Climate::Tropical => "tropical",
            Climate::Arid => "arid",
        };
        f.write_str(name)
    }
}

/// Physical terrain of a tile. Unordered.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerrainType {
    Canyons,
    Drifts,
    Dunes,
    Forest,
    Ice,
    Buildings,
    Roads,
    Mountains,
    Mud,
    Plains,
    Water,
}

impl TerrainType {
    pub const ALL: [TerrainType; 11] = [
        TerrainType::Canyons,
        TerrainType::Drifts,
        TerrainType::Dunes,
        TerrainType::Forest,
        TerrainType::Ice,
        TerrainType::Buildings,
        TerrainType::Roads,
        TerrainType::Mountains,
        TerrainType::Mud,
        TerrainType::Plains,
        TerrainType::Water,
    ];
}

impl fmt::Display for TerrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TerrainType::Canyons => "canyons",
            TerrainType::Drifts => "drifts",
            TerrainType::Dunes => "dunes",
            TerrainType::Forest => "forest",
            TerrainType::Ice => "ice",
            TerrainType::Buildings => "buildings",
            TerrainType::Roads => "roads",
            TerrainType::Mountains => "mountains",
            TerrainType::Mud => "mud",
            TerrainType::Plains => "plains",
            TerrainType::Water => "water",
        };
        f.write_str(name)
    }
}
