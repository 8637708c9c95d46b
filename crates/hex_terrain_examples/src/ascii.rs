use std::fmt::Write;

use hex_terrain::prelude::*;

/// Which property of a tile to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapLayer {
    Climate,
    Terrain,
}

fn climate_glyph(climate: Climate) -> char {
    match climate {
        Climate::Snowy => '*',
        Climate::Temperate => '"',
        Climate::Tropical => '%',
        Climate::Arid => '~',
    }
}

fn terrain_glyph(terrain: TerrainType) -> char {
    match terrain {
        TerrainType::Canyons => 'v',
        TerrainType::Drifts => 's',
        TerrainType::Dunes => 'd',
        TerrainType::Forest => 'f',
        TerrainType::Ice => 'i',
        TerrainType::Buildings => 'B',
        TerrainType::Roads => '=',
        TerrainType::Mountains => '^',
        TerrainType::Mud => 'm',
        TerrainType::Plains => '.',
        TerrainType::Water => 'w',
    }
}

/// Renders the grid north-up, one character per cell.
///
/// Ungenerated cells inside the bounds are drawn as `?`. Pointy-top odd rows and flat-top odd
/// columns are shifted by half a cell so the hex layout stays readable.
pub fn render_ascii(grid: &HexGrid, catalog: &TileCatalog, layer: MapLayer) -> String {
    let positions = grid.shape().positions();
    let (Some(first), Some(last)) = (positions.first(), positions.last()) else {
        return String::new();
    };
    let min_x = positions.iter().map(|p| p.x).min().unwrap_or(first.x);
    let max_x = positions.iter().map(|p| p.x).max().unwrap_or(last.x);
    let flat_top = grid.orientation() == Orientation::FlatTop;

    let glyph = |position: Position| -> char {
        if !grid.in_bounds(position) {
            return ' ';
        }
        match grid.get(position).and_then(|id| catalog.get(id)) {
            Some(tile) => match layer {
                MapLayer::Climate => climate_glyph(tile.climate),
                MapLayer::Terrain => terrain_glyph(tile.terrain),
            },
            None => '?',
        }
    };

    let mut out = String::new();
    for y in (first.y..=last.y).rev() {
        let mut line = String::new();
        if flat_top {
            // Odd columns sit half a row north; draw them on a half line above.
            let mut upper = String::new();
            for x in min_x..=max_x {
                let odd = x.rem_euclid(2) == 1;
                upper.push(if odd { glyph(Position::new(x, y)) } else { ' ' });
                line.push(if odd { ' ' } else { glyph(Position::new(x, y)) });
            }
            let _ = writeln!(out, "{}", upper.trim_end());
        } else {
            if y.rem_euclid(2) == 1 {
                line.push(' ');
            }
            for x in min_x..=max_x {
                line.push(glyph(Position::new(x, y)));
                line.push(' ');
            }
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

/// Counts of placed tiles per climate, coldest first.
pub fn climate_histogram(grid: &HexGrid, catalog: &TileCatalog) -> Vec<(Climate, usize)> {
    Climate::ALL
        .iter()
        .map(|climate| {
            let count = grid
                .iter()
                .filter_map(|(_, id)| catalog.get(id))
                .filter(|tile| tile.climate == *climate)
                .count();
            (*climate, count)
        })
        .collect()
}
