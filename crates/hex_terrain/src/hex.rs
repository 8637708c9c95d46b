//! Hex grid adjacency in offset coordinates.
//!
//! Positions are offset coordinates with `y` growing to the north. Flat-top grids offset
//! every odd column half a cell to the north; pointy-top grids offset every odd row half a
//! cell to the east. Neighbors are always returned clockwise, starting at north for flat-top
//! and at north-east for pointy-top layouts.
use glam::IVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cell coordinate on the hex grid.
pub type Position = IVec2;

/// Layout of the hexagons in the grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Flat edge on top; columns are offset.
    #[default]
    FlatTop,
    /// Corner on top; rows are offset.
    PointyTop,
}

// N, NE, SE, S, SW, NW
const FLAT_TOP_EVEN_COLUMN: [IVec2; 6] = [
    IVec2::new(0, 1),
    IVec2::new(1, 0),
    IVec2::new(1, -1),
    IVec2::new(0, -1),
    IVec2::new(-1, -1),
    IVec2::new(-1, 0),
];

const FLAT_TOP_ODD_COLUMN: [IVec2; 6] = [
    IVec2::new(0, 1),
    IVec2::new(1, 1),
    IVec2::new(1, 0),
    IVec2::new(0, -1),
    IVec2::new(-1, 0),
    IVec2::new(-1, 1),
];

// NE, E, SE, SW, W, NW
const POINTY_TOP_EVEN_ROW: [IVec2; 6] = [
    IVec2::new(0, 1),
    IVec2::new(1, 0),
    IVec2::new(0, -1),
    IVec2::new(-1, -1),
    IVec2::new(-1, 0),
    IVec2::new(-1, 1),
];

const POINTY_TOP_ODD_ROW: [IVec2; 6] = [
    IVec2::new(1, 1),
    IVec2::new(1, 0),
    IVec2::new(1, -1),
    IVec2::new(0, -1),
    IVec2::new(-1, 0),
    IVec2::new(0, 1),
];

impl Orientation {
    /// Neighbor offsets that apply to `position`, in clockwise order.
    pub fn offsets(self, position: Position) -> &'static [IVec2; 6] {
        match self {
            Orientation::FlatTop => {
                if is_odd(position.x) {
                    &FLAT_TOP_ODD_COLUMN
                } else {
                    &FLAT_TOP_EVEN_COLUMN
                }
            }
            Orientation::PointyTop => {
                if is_odd(position.y) {
                    &POINTY_TOP_ODD_ROW
                } else {
                    &POINTY_TOP_EVEN_ROW
                }
            }
        }
    }

    /// Compass labels matching the order returned by [`neighbors`].
    pub fn direction_labels(self) -> [&'static str; 6] {
        match self {
            Orientation::FlatTop => ["N", "NE", "SE", "S", "SW", "NW"],
            Orientation::PointyTop => ["NE", "E", "SE", "SW", "W", "NW"],
        }
    }
}

#[inline]
fn is_odd(v: i32) -> bool {
    v.rem_euclid(2) == 1
}

/// Returns the six neighbor positions of `position`, clockwise. Bounds are not checked.
pub fn neighbors(position: Position, orientation: Orientation) -> [Position; 6] {
    (*orientation.offsets(position)).map(|offset| position + offset)
}

/// Returns the neighbor of `position` in the given clockwise direction index (0..6).
pub fn neighbor(position: Position, orientation: Orientation, direction: usize) -> Position {
    position + orientation.offsets(position)[direction % 6]
}
