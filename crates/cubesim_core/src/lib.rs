//! Logical state engine for an N×N×N cube: cubelets, slice rotations, win
//! detection, and scramble generation.
//!
//! All logical state is exact. Positions are stored as doubled integers and
//! orientations as elements of the 24-element rotation group of the cube, so
//! no floating-point error can accumulate no matter how many rotations are
//! applied. Floating-point math only appears in the presentation layer (the
//! angle of a slice mid-animation) and in the rounding check that runs when a
//! rotation is finalized.

mod axis;
mod color;
mod cubelet;
mod error;
mod grid;
mod orientation;
mod registry;
mod rotation;
mod scramble;
mod sign;
mod solved;
mod twist;

#[cfg(test)]
mod tests;

pub use axis::{Axis, Face};
pub use color::Color;
pub use cubelet::{Cubelet, Piece};
pub use error::CubeError;
pub use grid::{GridPos, doubled_coord};
pub use orientation::Orientation;
pub use registry::CubeletRegistry;
pub use rotation::{RotationComplete, RotationEngine, SliceRotation, execute_instant};
pub use scramble::{Scramble, ScrambleParams, scramble};
pub use sign::Sign;
pub use solved::is_solved;
pub use twist::{Move, format_moves, parse_moves};

/// Smallest supported cube size.
pub const MIN_SIZE: usize = 2;
/// Largest supported cube size. This bounds allocation to
/// `MAX_SIZE³` cubelets.
pub const MAX_SIZE: usize = 32;

/// Tolerance used to match a slice index against cubelet coordinates.
pub const SLICE_EPSILON: f32 = 0.1;

/// Angle of one quarter turn, in radians.
pub const QUARTER_TURN: f32 = std::f32::consts::FRAC_PI_2;
