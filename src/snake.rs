use std::collections::VecDeque;

use crate::{Cell, Vector};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn vector(self) -> Vector {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// The snake body, ordered head first.
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// A fresh snake is a single segment.
    pub fn new(head: Cell) -> Self {
        let mut body = VecDeque::new();
        body.push_back(head);
        Snake { body }
    }

    #[cfg(test)]
    pub fn from_body(cells: Vec<Cell>) -> Self {
        assert!(!cells.is_empty());
        Snake { body: cells.into_iter().collect() }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    pub fn pop_tail(&mut self) {
        self.body.pop_back();
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}
