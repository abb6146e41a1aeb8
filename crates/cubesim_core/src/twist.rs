//! Moves and move notation.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use nom::Parser;
use nom::character::complete::{anychar, char};
use nom::combinator::{all_consuming, map_opt, opt, verify};
use nom::error::Error;
use nom::number::complete::float;
use serde::{Deserialize, Serialize};

use crate::{Axis, CubeError, Sign};

/// Quarter turn of every cubelet whose coordinate along `axis` equals `slice`.
///
/// In notation, a move is written as the axis letter followed by the slice
/// coordinate and an optional `'` for a negative direction: `x1`, `y-0.5'`,
/// `z0`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Move {
    /// Rotation axis.
    pub axis: Axis,
    /// Coordinate of the slice along the axis, in grid units.
    #[serde(rename = "slice_index")]
    pub slice: f32,
    /// Direction of rotation: counterclockwise when viewed from the positive
    /// end of the axis for [`Sign::Pos`].
    pub direction: Sign,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Move {
            axis,
            slice,
            direction,
        } = self;
        write!(f, "{axis}{slice}")?;
        if *direction == Sign::Neg {
            write!(f, "'")?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_remaining_input, (axis, slice, prime)) = all_consuming((
            map_opt(anychar, Axis::from_char),
            verify(float::<&str, Error<&str>>, |x: &f32| x.is_finite()),
            opt(char('\'')),
        ))
        .parse_complete(s)
        .map_err(|_| CubeError::InvalidNotation(s.to_string()))?;

        Ok(Move {
            axis,
            slice,
            direction: match prime {
                Some(_) => Sign::Neg,
                None => Sign::Pos,
            },
        })
    }
}

impl Move {
    /// Constructs a move.
    pub fn new(axis: Axis, slice: f32, direction: Sign) -> Self {
        Self {
            axis,
            slice,
            direction,
        }
    }

    /// Returns the move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self {
            direction: -self.direction,
            ..self
        }
    }

    /// Returns the signed angle of the move, in radians.
    pub fn angle(self) -> f32 {
        crate::QUARTER_TURN * self.direction.float()
    }
}

/// Parses a whitespace-separated sequence of moves.
pub fn parse_moves(s: &str) -> Result<Vec<Move>, CubeError> {
    s.split_whitespace().map(str::parse).try_collect()
}

/// Formats a sequence of moves separated by spaces.
pub fn format_moves(moves: &[Move]) -> String {
    moves.iter().join(" ")
}
