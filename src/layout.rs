//! Screen-to-grid mapping for the canvas.
//!
//! The map is drawn with square tiles, letterboxed and centred inside the
//! canvas. Everything here is pure arithmetic so it can be recomputed on
//! every pointer event or cached per resize with identical results.

use crate::grid::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn shifted(self, dx: u32, dy: u32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x as f64
            && py >= self.y as f64
            && px < (self.x + self.width) as f64
            && py < (self.y + self.height) as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileLayout {
    pub tile_size: f64,
    pub offset_x: u32,
    pub offset_y: u32,
    grid_width: u32,
    grid_height: u32,
}

impl TileLayout {
    /// Returns `None` when either the canvas or the grid has no area.
    pub fn compute(canvas_width: u32, canvas_height: u32, grid_width: u32, grid_height: u32) -> Option<Self> {
        if canvas_width == 0 || canvas_height == 0 || grid_width == 0 || grid_height == 0 {
            return None;
        }

        let cw = canvas_width as f64;
        let ch = canvas_height as f64;
        let tile_size = (cw / grid_width as f64).min(ch / grid_height as f64);

        let offset_x = ((cw - grid_width as f64 * tile_size) / 2.0).floor().max(0.0) as u32;
        let offset_y = ((ch - grid_height as f64 * tile_size) / 2.0).floor().max(0.0) as u32;

        Some(Self {
            tile_size,
            offset_x,
            offset_y,
            grid_width,
            grid_height,
        })
    }

    /// Maps a canvas-relative pointer position to the cell under it.
    pub fn cell_at(&self, px: f64, py: f64) -> Option<Cell> {
        let gx = ((px - self.offset_x as f64) / self.tile_size).floor();
        let gy = ((py - self.offset_y as f64) / self.tile_size).floor();

        if gx < 0.0 || gy < 0.0 || gx >= self.grid_width as f64 || gy >= self.grid_height as f64 {
            return None;
        }
        Some(Cell::new(gx as u32, gy as u32))
    }

    /// Pixel area covered by `cell`. Every integer pixel inside the rect
    /// maps back to `cell` through [`TileLayout::cell_at`].
    pub fn cell_rect(&self, cell: Cell) -> PixelRect {
        let x0 = self.edge(cell.x);
        let x1 = self.edge(cell.x + 1);
        let y0 = self.edge(cell.y);
        let y1 = self.edge(cell.y + 1);

        PixelRect::new(self.offset_x + x0, self.offset_y + y0, x1 - x0, y1 - y0)
    }

    // Smallest pixel distance from the offset whose mapped index reaches
    // `index`. Nudged by one pixel where float rounding disagrees with the
    // floor in `cell_at`.
    fn edge(&self, index: u32) -> u32 {
        let maps_to = |k: u32| (k as f64 / self.tile_size).floor();
        let target = index as f64;

        let mut k = (target * self.tile_size).ceil().max(0.0) as u32;
        while k > 0 && maps_to(k - 1) >= target {
            k -= 1;
        }
        while maps_to(k) < target {
            k += 1;
        }
        k
    }
}
