use crate::grid::{Cell, TileMap};
use crate::layout::TileLayout;
use crate::material::MaterialId;

/// Editing state for one tile map: the map itself plus everything the
/// pointer handlers read and write.
#[derive(Debug, Clone)]
pub struct Editor {
    map: TileMap,
    selected: Option<MaterialId>,
    hover: Option<Cell>,
    drag_origin: Option<Cell>,
    dirty: bool,
}

impl Editor {
    pub fn new(map: TileMap) -> Self {
        Self {
            map,
            selected: None,
            hover: None,
            drag_origin: None,
            dirty: true, // first frame
        }
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn selected(&self) -> Option<MaterialId> {
        self.selected
    }

    pub fn hover_cell(&self) -> Option<Cell> {
        self.hover
    }

    pub fn drag_origin(&self) -> Option<Cell> {
        self.drag_origin
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn select(&mut self, material: MaterialId) {
        if self.selected != Some(material) {
            log::debug!("Selected material {}", material.material().label());
            self.selected = Some(material);
            // The hover preview is drawn in the selected colour.
            self.dirty = true;
        }
    }

    /// Paints `cell` and starts a drag gesture there. No-op without a
    /// selected material.
    pub fn press(&mut self, cell: Cell) -> bool {
        let Some(material) = self.selected else {
            return false;
        };
        if !self.map.set(cell.x, cell.y, material) {
            return false;
        }
        self.drag_origin = Some(cell);
        self.dirty = true;
        true
    }

    /// Fills the straight line from the drag origin to `cell` when the two
    /// share a column or a row. Off-axis drags paint nothing.
    pub fn drag(&mut self, cell: Cell) -> bool {
        let (Some(origin), Some(material)) = (self.drag_origin, self.selected) else {
            return false;
        };
        if !self.map.contains(cell.x, cell.y) {
            return false;
        }

        let written = if cell.x == origin.x {
            self.map.fill_column(cell.x, origin.y, cell.y, material)
        } else if cell.y == origin.y {
            self.map.fill_row(cell.y, origin.x, cell.x, material)
        } else {
            0
        };

        if written > 0 {
            log::trace!("Drag fill from {:?} to {:?}: {} cells", origin, cell, written);
            self.dirty = true;
        }
        written > 0
    }

    pub fn release(&mut self) {
        self.drag_origin = None;
    }

    /// Updates the hovered cell. Only a change marks the view dirty.
    pub fn hover(&mut self, cell: Option<Cell>) -> bool {
        if self.hover == cell {
            return false;
        }
        self.hover = cell;
        self.dirty = true;
        true
    }

    /// Press at a canvas-relative pointer position.
    pub fn press_at(&mut self, layout: &TileLayout, px: f64, py: f64) -> bool {
        match layout.cell_at(px, py) {
            Some(cell) => self.press(cell),
            None => false,
        }
    }

    /// Drag to a canvas-relative pointer position. Positions off the map
    /// are ignored and keep the drag origin.
    pub fn drag_to(&mut self, layout: &TileLayout, px: f64, py: f64) -> bool {
        match layout.cell_at(px, py) {
            Some(cell) => self.drag(cell),
            None => false,
        }
    }

    pub fn hover_at(&mut self, layout: &TileLayout, px: f64, py: f64) -> bool {
        self.hover(layout.cell_at(px, py))
    }
}
