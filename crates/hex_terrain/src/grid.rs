//! Bounded grid store holding the tile type assigned to each generated cell.
use std::collections::{HashMap, HashSet};

use glam::IVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::catalog::TileTypeId;
use crate::hex::{neighbors, Orientation, Position};

/// The set of valid positions of a grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridShape {
    /// Inclusive rectangle `min..=max`.
    Rect { min: IVec2, max: IVec2 },
    /// Arbitrary set of cells.
    Cells(HashSet<Position>),
}

impl GridShape {
    /// Rectangle of `width` x `height` cells whose lower-left cell is `min`.
    pub fn rect(min: IVec2, width: u32, height: u32) -> Self {
        let size = IVec2::new(width as i32, height as i32);
        Self::Rect {
            min,
            max: min + size - IVec2::ONE,
        }
    }

    /// Rectangle centered on the origin. Even sizes are reduced by one so that the origin
    /// has as many cells on each side.
    pub fn centered(width: u32, height: u32) -> Self {
        let w = if width % 2 == 0 { width.saturating_sub(1) } else { width };
        let h = if height % 2 == 0 { height.saturating_sub(1) } else { height };
        let half = IVec2::new((w / 2) as i32, (h / 2) as i32);
        Self::rect(-half, w, h)
    }

    /// Irregular shape made of exactly the given cells.
    pub fn from_cells<I: IntoIterator<Item = Position>>(cells: I) -> Self {
        Self::Cells(cells.into_iter().collect())
    }

    pub fn contains(&self, position: Position) -> bool {
        match self {
            GridShape::Rect { min, max } => {
                position.x >= min.x
                    && position.y >= min.y
                    && position.x <= max.x
                    && position.y <= max.y
            }
            GridShape::Cells(cells) => cells.contains(&position),
        }
    }

    /// Number of cells in the shape.
    pub fn cell_count(&self) -> usize {
        match self {
            GridShape::Rect { min, max } => {
                if max.x < min.x || max.y < min.y {
                    0
                } else {
                    ((max.x - min.x + 1) as usize) * ((max.y - min.y + 1) as usize)
                }
            }
            GridShape::Cells(cells) => cells.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// All cells of the shape in row-major order (by `y`, then `x`).
    pub fn positions(&self) -> Vec<Position> {
        match self {
            GridShape::Rect { min, max } => {
                let mut out = Vec::with_capacity(self.cell_count());
                for y in min.y..=max.y {
                    for x in min.x..=max.x {
                        out.push(IVec2::new(x, y));
                    }
                }
                out
            }
            GridShape::Cells(cells) => {
                let mut out: Vec<Position> = cells.iter().copied().collect();
                out.sort_by_key(|p| (p.y, p.x));
                out
            }
        }
    }
}

/// Grid store mapping positions to tile types.
///
/// The store itself does not forbid overwriting a cell; the generator only writes each cell once.
#[derive(Clone, Debug)]
pub struct HexGrid {
    shape: GridShape,
    orientation: Orientation,
    cells: HashMap<Position, TileTypeId>,
    order: Vec<Position>,
}

impl HexGrid {
    pub fn new(shape: GridShape, orientation: Orientation) -> Self {
        Self {
            cells: HashMap::with_capacity(shape.cell_count()),
            order: Vec::with_capacity(shape.cell_count()),
            shape,
            orientation,
        }
    }

    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        self.shape.contains(position)
    }

    pub fn get(&self, position: Position) -> Option<TileTypeId> {
        self.cells.get(&position).copied()
    }

    pub fn is_generated(&self, position: Position) -> bool {
        self.cells.contains_key(&position)
    }

    /// Assigns a tile type, returning the previous one if the cell was already set.
    pub fn set(&mut self, position: Position, tile: TileTypeId) -> Option<TileTypeId> {
        let previous = self.cells.insert(position, tile);
        if previous.is_none() {
            self.order.push(position);
        }
        previous
    }

    /// Number of generated cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Generated cells in the order they were first assigned.
    pub fn iter(&self) -> impl Iterator<Item = (Position, TileTypeId)> + '_ {
        self.order.iter().map(|p| (*p, self.cells[p]))
    }

    /// Positions in the order they were first assigned.
    pub fn generation_order(&self) -> &[Position] {
        &self.order
    }

    /// In-bounds neighbors of `position`, clockwise.
    pub fn neighbors_in_bounds(&self, position: Position) -> Vec<Position> {
        neighbors(position, self.orientation)
            .into_iter()
            .filter(|n| self.in_bounds(*n))
            .collect()
    }

    /// In-bounds neighbors of `position` that already hold a tile type, clockwise.
    pub fn generated_neighbors(&self, position: Position) -> Vec<Position> {
        neighbors(position, self.orientation)
            .into_iter()
            .filter(|n| self.in_bounds(*n) && self.is_generated(*n))
            .collect()
    }

    /// In-bounds neighbors of `position` that are still unset, clockwise.
    pub fn ungenerated_neighbors(&self, position: Position) -> Vec<Position> {
        neighbors(position, self.orientation)
            .into_iter()
            .filter(|n| self.in_bounds(*n) && !self.is_generated(*n))
            .collect()
    }
}

/// Two grids are equal when they have the same bounds, orientation and assignments.
/// Generation order is not compared.
impl PartialEq for HexGrid {
    fn eq(&self, other: &Self) -> bool {
        self.orientation == other.orientation
            && self.shape == other.shape
            && self.cells == other.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_shape_is_odd_and_symmetric() {
        let shape = GridShape::centered(4, 5);
        assert_eq!(
            shape,
            GridShape::Rect {
                min: IVec2::new(-1, -2),
                max: IVec2::new(1, 2),
            }
        );
        assert_eq!(shape.cell_count(), 15);
        assert!(shape.contains(IVec2::ZERO));
    }

    #[test]
    fn rect_contains_edges() {
        let shape = GridShape::rect(IVec2::new(0, 0), 3, 1);
        assert!(shape.contains(IVec2::new(0, 0)));
        assert!(shape.contains(IVec2::new(2, 0)));
        assert!(!shape.contains(IVec2::new(3, 0)));
        assert!(!shape.contains(IVec2::new(0, 1)));
        assert_eq!(shape.positions().len(), 3);
    }

    #[test]
    fn custom_cells_positions_are_row_major() {
        let shape = GridShape::from_cells([
            IVec2::new(1, 1),
            IVec2::new(0, 1),
            IVec2::new(5, 0),
        ]);
        assert_eq!(
            shape.positions(),
            vec![IVec2::new(5, 0), IVec2::new(0, 1), IVec2::new(1, 1)]
        );
    }

    #[test]
    fn set_tracks_first_assignment_order() {
        let mut grid = HexGrid::new(GridShape::rect(IVec2::ZERO, 2, 2), Orientation::FlatTop);
        assert_eq!(grid.set(IVec2::new(1, 1), 3), None);
        assert_eq!(grid.set(IVec2::new(0, 0), 1), None);
        assert_eq!(grid.set(IVec2::new(1, 1), 2), Some(3));
        assert_eq!(grid.len(), 2);
        assert_eq!(
            grid.generation_order(),
            &[IVec2::new(1, 1), IVec2::new(0, 0)]
        );
        assert_eq!(grid.get(IVec2::new(1, 1)), Some(2));
    }

    #[test]
    fn neighbor_queries_respect_bounds_and_state() {
        let mut grid = HexGrid::new(GridShape::rect(IVec2::ZERO, 3, 1), Orientation::FlatTop);
        grid.set(IVec2::new(0, 0), 0);
        let middle = IVec2::new(1, 0);
        assert_eq!(
            grid.neighbors_in_bounds(middle),
            vec![IVec2::new(2, 0), IVec2::new(0, 0)]
        );
        assert_eq!(grid.generated_neighbors(middle), vec![IVec2::new(0, 0)]);
        assert_eq!(grid.ungenerated_neighbors(middle), vec![IVec2::new(2, 0)]);
    }
}
