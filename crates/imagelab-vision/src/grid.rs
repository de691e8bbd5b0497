// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Composite grids — four views tiled 2x2 into one preview image.

use image::imageops::{self, FilterType};
use image::RgbImage;
use tracing::debug;

/// Tile dimensions for a grid built from a `width` x `height` working raster.
pub fn tile_size(width: u32, height: u32) -> (u32, u32) {
    (width / 2, height / 2)
}

/// Tile four rasters as `[a | b]` over `[c | d]`.
///
/// Every tile is resampled to exactly `tile_width` x `tile_height` before
/// placement, so the grid is `2 * tile_width` x `2 * tile_height` with no
/// gaps or overlap.
pub fn compose_grid(tiles: [&RgbImage; 4], tile_width: u32, tile_height: u32) -> RgbImage {
    let mut grid = RgbImage::new(tile_width * 2, tile_height * 2);

    for (index, tile) in tiles.into_iter().enumerate() {
        let column = index as u32 % 2;
        let row = index as u32 / 2;

        let placed = if tile.dimensions() == (tile_width, tile_height) {
            tile.clone()
        } else {
            imageops::resize(tile, tile_width, tile_height, FilterType::Triangle)
        };
        imageops::replace(
            &mut grid,
            &placed,
            (column * tile_width) as i64,
            (row * tile_height) as i64,
        );
    }

    debug!(width = grid.width(), height = grid.height(), "Grid composed");
    grid
}
