use crate::material::MaterialId;

/// Grid coordinate of one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone)]
pub struct TileMap {
    width: u32,
    height: u32,
    cells: Vec<Vec<MaterialId>>, // indexed [y][x]
}

impl TileMap {
    pub fn new(width: u32, height: u32) -> Self {
        let cells = vec![vec![MaterialId::default(); width as usize]; height as usize];

        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Option<MaterialId> {
        if !self.contains(x, y) {
            return None;
        }
        Some(self.cells[y as usize][x as usize])
    }

    pub fn set(&mut self, x: u32, y: u32, material: MaterialId) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        self.cells[y as usize][x as usize] = material;
        true
    }

    /// Paints column `x` between two rows, inclusive, in either order.
    /// Returns the number of cells written.
    pub fn fill_column(&mut self, x: u32, y_from: u32, y_to: u32, material: MaterialId) -> usize {
        if !self.contains(x, y_from) || !self.contains(x, y_to) {
            return 0;
        }
        let (start, end) = (y_from.min(y_to), y_from.max(y_to));
        for y in start..=end {
            self.cells[y as usize][x as usize] = material;
        }
        (end - start + 1) as usize
    }

    /// Paints row `y` between two columns, inclusive, in either order.
    /// Returns the number of cells written.
    pub fn fill_row(&mut self, y: u32, x_from: u32, x_to: u32, material: MaterialId) -> usize {
        if !self.contains(x_from, y) || !self.contains(x_to, y) {
            return 0;
        }
        let (start, end) = (x_from.min(x_to), x_from.max(x_to));
        let row = &mut self.cells[y as usize];
        for cell in &mut row[start as usize..=end as usize] {
            *cell = material;
        }
        (end - start + 1) as usize
    }

    pub fn rows(&self) -> impl Iterator<Item = &[MaterialId]> {
        self.cells.iter().map(|row| row.as_slice())
    }
}
