use crate::{Cell, GridInt};

/// Square playfield, measured in whole cells. The dimension is derived once
/// from the drawing surface and the cell size, flooring the division.
#[derive(Copy, Clone)]
pub struct Board {
    n: GridInt,
}

impl Board {
    pub fn new(surface: u16, cell_size: u16) -> Self {
        Board { n: (surface / cell_size) as GridInt }
    }

    pub fn dimension(&self) -> GridInt {
        self.n
    }

    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.0 >= 0 && cell.0 < self.n && cell.1 >= 0 && cell.1 < self.n
    }

    pub fn center(&self) -> Cell {
        (self.n / 2, self.n / 2)
    }
}
