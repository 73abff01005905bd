use std::collections::HashSet;
use std::fmt;

use itertools::Itertools;
use tracing::{debug, info};

use crate::error::Error;
use crate::walk::{Bounds, Position, Walk};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Boundary,
    Empty,
    Filled,
}

impl Cell {
    pub fn as_char(self) -> char {
        use Cell::*;
        match self {
            Boundary | Filled => '#',
            Empty => '.',
        }
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    bounds: Bounds,
    width: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn rasterize(walk: &Walk, limit: u64) -> Result<Self, Error> {
        let bounds = walk.bounds();
        let size = bounds.ensure_within(limit)?;

        let mut cells = vec![Cell::Empty; size as usize];
        let width = bounds.width() as usize;
        for position in walk.boundary() {
            if let Some((column, row)) = bounds.offset(position) {
                cells[row * width + column] = Cell::Boundary;
            }
        }

        info!(width, height = bounds.height(), "rasterized outline");

        Ok(Grid {
            bounds,
            width,
            cells,
        })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.bounds
            .offset(position)
            .map(|(column, row)| row * self.width + column)
    }

    pub fn get(&self, position: Position) -> Option<Cell> {
        self.index(position).map(|index| self.cells[index])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    pub fn positions(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let bounds = self.bounds;
        let width = self.width;
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let position = Position::new(
                bounds.min_x + (index % width) as i64,
                bounds.min_y + (index / width) as i64,
            );
            (position, *cell)
        })
    }

    pub fn boundary(&self) -> HashSet<Position> {
        self.positions()
            .filter(|(_, cell)| *cell == Cell::Boundary)
            .map(|(position, _)| position)
            .collect()
    }

    // Boundary and filled.
    pub fn area(&self) -> usize {
        self.cells.iter().filter(|cell| **cell != Cell::Empty).count()
    }

    /// Finds a cell inside the outline, just right of the left wall of the first
    /// row that crosses the outline exactly twice.
    pub fn interior_seed(&self) -> Result<Position, Error> {
        for (row, cells) in self.rows().enumerate() {
            let walls: Vec<_> = cells.iter().positions(|cell| *cell == Cell::Boundary).collect();
            if walls.len() == 2 {
                let seed = Position::new(
                    self.bounds.min_x + walls[0] as i64 + 1,
                    self.bounds.min_y + row as i64,
                );
                debug!(%seed, "found interior seed");
                return Ok(seed);
            }
        }

        Err(Error::SeedNotFound)
    }

    /// Fills every empty cell reachable from `seed` without crossing the
    /// outline, calling `on_fill` as each cell is filled.  Returns the number
    /// of cells filled.
    pub fn flood_fill(&mut self, seed: Position, mut on_fill: impl FnMut(Position)) -> usize {
        let mut stack = vec![seed];
        let mut filled = 0;

        while let Some(position) = stack.pop() {
            let index = match self.index(position) {
                Some(index) => index,
                None => continue,
            };

            if self.cells[index] != Cell::Empty {
                continue;
            }

            self.cells[index] = Cell::Filled;
            filled += 1;
            on_fill(position);

            stack.extend(position.adjacent());
        }

        info!(filled, %seed, "flood fill complete");

        filled
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = self
            .rows()
            .map(|row| row.iter().cloned().map(Cell::as_char).collect::<String>())
            .join("\n");
        write!(f, "{}", text)
    }
}
