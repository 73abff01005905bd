use std::convert::TryFrom;
use std::io::BufRead;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;

lazy_static! {
    static ref INSTRUCTION: Regex = Regex::new(r"^(\S) ([0-9]+) \(#([0-9a-f]{6})\)$").unwrap();
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn all() -> impl Iterator<Item = Direction> {
        use Direction::*;
        [Up, Down, Left, Right].iter().cloned()
    }
}

impl TryFrom<char> for Direction {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        use Direction::*;
        match c {
            'U' => Ok(Up),
            'D' => Ok(Down),
            'L' => Ok(Left),
            'R' => Ok(Right),
            _ => Err(format!("Invalid direction '{}'", c)),
        }
    }
}

/// Direction table used by the encoded form, keyed by the last hex digit.
impl TryFrom<u8> for Direction {
    type Error = String;

    fn try_from(digit: u8) -> Result<Self, Self::Error> {
        use Direction::*;
        match digit {
            0 => Ok(Right),
            1 => Ok(Down),
            2 => Ok(Left),
            3 => Ok(Up),
            _ => Err(format!("Invalid encoded direction {:x}", digit)),
        }
    }
}

/// Which fields of an instruction line carry the movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decoding {
    Direct,
    Encoded,
}

impl From<bool> for Decoding {
    fn from(encoded: bool) -> Self {
        if encoded {
            Decoding::Encoded
        } else {
            Decoding::Direct
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub direction: Direction,
    pub distance: u64,
}

impl Instruction {
    pub fn parse(line: &str, decoding: Decoding) -> Result<Self, Error> {
        let captures = INSTRUCTION
            .captures(line)
            .ok_or_else(|| Error::parse(line, "expected '<DIR> <COUNT> (#<hex code>)'"))?;

        match decoding {
            Decoding::Direct => {
                let direction = captures[1]
                    .chars()
                    .next()
                    .ok_or_else(|| Error::parse(line, "Empty direction"))
                    .and_then(|c| Direction::try_from(c).map_err(|err| Error::parse(line, err)))?;
                let distance = captures[2]
                    .parse()
                    .map_err(|err| Error::parse(line, format!("Invalid distance: {}", err)))?;
                Ok(Instruction {
                    direction,
                    distance,
                })
            }
            Decoding::Encoded => {
                let code = &captures[3];
                let distance = u64::from_str_radix(&code[..5], 16)
                    .map_err(|err| Error::parse(line, format!("Invalid distance: {}", err)))?;
                let direction = u8::from_str_radix(&code[5..], 16)
                    .map_err(|err| err.to_string())
                    .and_then(Direction::try_from)
                    .map_err(|err| Error::parse(line, err))?;
                Ok(Instruction {
                    direction,
                    distance,
                })
            }
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DigPlan {
    lines: Vec<String>,
}

impl DigPlan {
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        DigPlan {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn read(input: impl BufRead) -> Result<Self, Error> {
        let mut lines = vec![];
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if !line.is_empty() {
                lines.push(line.to_string());
            }
        }
        Ok(DigPlan { lines })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn instructions(&self, decoding: Decoding) -> impl Iterator<Item = Result<Instruction, Error>> + '_ {
        self.lines
            .iter()
            .map(move |line| Instruction::parse(line, decoding))
    }
}
