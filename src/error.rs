use std::io;

use thiserror::Error;

use crate::walk::Position;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid instruction '{line}': {reason}")]
    Parse { line: String, reason: String },

    #[error("No row of the outline crosses the boundary exactly twice")]
    SeedNotFound,

    #[error("Dig plan does not return to the origin, it ends at {end}")]
    UnclosedPath { end: Position },

    #[error("Grid of {width}x{height} cells exceeds the limit of {limit} cells")]
    GridTooLarge { width: u64, height: u64, limit: u64 },

    #[error("Failed to read dig plan: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub fn parse(line: &str, reason: impl ToString) -> Self {
        Error::Parse {
            line: line.to_string(),
            reason: reason.to_string(),
        }
    }
}
