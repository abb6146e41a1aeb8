//! Simple `Sign` type.

use std::fmt;
use std::ops::{Mul, Neg};

use serde::{Deserialize, Serialize};

use crate::CubeError;

/// Positive or negative.
///
/// As a rotation direction, [`Sign::Pos`] is counterclockwise when viewed from
/// the positive end of the rotation axis (right-hand rule).
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(into = "i8", try_from = "i8")]
pub enum Sign {
    /// Positive
    #[default]
    Pos,
    /// Negative
    Neg,
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Pos => write!(f, "+"),
            Sign::Neg => write!(f, "-"),
        }
    }
}

impl Neg for Sign {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Sign::Pos => Sign::Neg,
            Sign::Neg => Sign::Pos,
        }
    }
}

impl Mul for Sign {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match rhs {
            Sign::Pos => self,
            Sign::Neg => -self,
        }
    }
}

impl From<Sign> for i8 {
    fn from(sign: Sign) -> Self {
        sign.int() as i8
    }
}
impl TryFrom<i8> for Sign {
    type Error = CubeError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Sign::Pos),
            -1 => Ok(Sign::Neg),
            _ => Err(CubeError::InvalidDirection(value)),
        }
    }
}

impl Sign {
    /// Returns `1` or `-1`.
    pub const fn int(self) -> i32 {
        match self {
            Sign::Pos => 1,
            Sign::Neg => -1,
        }
    }
    /// Returns `1.0` or `-1.0`.
    pub const fn float(self) -> f32 {
        match self {
            Sign::Pos => 1.0,
            Sign::Neg => -1.0,
        }
    }
    /// Returns the sign of a number, treating zero as positive.
    pub fn of(x: f32) -> Self {
        if x < 0.0 { Sign::Neg } else { Sign::Pos }
    }
    /// Returns an iterator over both signs.
    pub fn iter() -> impl Clone + Iterator<Item = Sign> {
        [Sign::Pos, Sign::Neg].into_iter()
    }
}
