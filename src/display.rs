use std::fmt;
use std::io::Write;

use termion::{clear, color, cursor};

use crate::grid::Cell;

/// How a cell is drawn while the lagoon is being dug out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Trench,
    Ground,
    Dug,
}

impl From<Cell> for Tile {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Boundary => Tile::Trench,
            Cell::Empty => Tile::Ground,
            Cell::Filled => Tile::Dug,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Tile::*;
        match self {
            Trench => write!(f, "\u{2588}"),
            Ground => write!(f, "."),
            Dug => write!(f, "{}#{}", color::Fg(color::LightBlue), color::Fg(color::Reset)),
        }
    }
}

pub trait Screen {
    fn clear(&mut self);
    fn set_tile<T: fmt::Display + fmt::Debug>(&mut self, position: [u16; 2], tile: T);
    fn goto(&mut self, position: [u16; 2]);
}

impl<W: Write> Screen for W {
    fn clear(&mut self) {
        let _ = write!(self, "{}", clear::All);
    }

    fn set_tile<T: fmt::Display + fmt::Debug>(&mut self, [x, y]: [u16; 2], tile: T) {
        let _ = write!(self, "{}{}", cursor::Goto(x + 1, y + 1), tile);
        let _ = self.flush();
    }

    fn goto(&mut self, [x, y]: [u16; 2]) {
        let _ = write!(self, "{}", cursor::Goto(x + 1, y + 1));
        let _ = self.flush();
    }
}

/// Prints each tile change as a line of text.
#[derive(Debug)]
pub struct ScreenBuffer {}

impl Screen for ScreenBuffer {
    fn clear(&mut self) {}

    fn set_tile<T: fmt::Display + fmt::Debug>(&mut self, [x, y]: [u16; 2], tile: T) {
        println!("Output: ({}, {}): {:?}", x, y, tile);
    }

    fn goto(&mut self, _: [u16; 2]) {}
}

#[derive(Debug)]
pub struct Silent {}

impl Screen for Silent {
    fn clear(&mut self) {}

    fn set_tile<T: fmt::Display + fmt::Debug>(&mut self, _: [u16; 2], _: T) {}

    fn goto(&mut self, _: [u16; 2]) {}
}
