//! Exact grid coordinates.

use std::fmt;
use std::ops::Index;

use cgmath::Point3;

use crate::{Axis, Face, Sign};

/// Position of a cubelet on the grid centered at the origin.
///
/// Coordinates are integers for odd cube sizes and half-integers for even cube
/// sizes, so they are stored doubled. This keeps the logical state exact no
/// matter how many rotations are applied.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GridPos([i32; 3]);
impl Index<Axis> for GridPos {
    type Output = i32;

    fn index(&self, axis: Axis) -> &Self::Output {
        &self.0[axis as usize]
    }
}
impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.0.map(|d| d as f32 / 2.0);
        write!(f, "({x}, {y}, {z})")
    }
}
impl GridPos {
    /// Constructs a position from doubled coordinates.
    pub const fn from_doubled(doubled: [i32; 3]) -> Self {
        Self(doubled)
    }
    /// Constructs a position from layer indices in `0..size` along each axis.
    pub fn from_layers(size: usize, layers: [usize; 3]) -> Self {
        Self(layers.map(|i| 2 * i as i32 - (size as i32 - 1)))
    }
    /// Rounds a point to the nearest half-unit grid point.
    pub fn snap(p: Point3<f32>) -> Self {
        Self([p.x, p.y, p.z].map(|x| (x * 2.0).round() as i32))
    }

    /// Returns the doubled coordinates.
    pub fn doubled(self) -> [i32; 3] {
        self.0
    }
    /// Returns the coordinate along `axis` in grid units.
    pub fn coord(self, axis: Axis) -> f32 {
        self[axis] as f32 / 2.0
    }
    /// Returns the position as a floating-point point in grid units.
    pub fn to_point(self) -> Point3<f32> {
        let [x, y, z] = self.0.map(|d| d as f32 / 2.0);
        Point3::new(x, y, z)
    }

    /// Returns whether this is one of the grid points of a cube of the given
    /// size.
    pub fn is_valid(self, size: usize) -> bool {
        let max = size as i32 - 1;
        self.0
            .iter()
            .all(|&d| d.abs() <= max && (d - max).rem_euclid(2) == 0)
    }
    /// Returns whether the position lies on the outer layer under `face` of a
    /// cube of the given size.
    pub fn is_on_face(self, face: Face, size: usize) -> bool {
        self[face.axis()] * face.sign().int() == size as i32 - 1
    }

    /// Returns the position after a quarter turn around `axis` in `direction`.
    ///
    /// For right-handed perpendiculars `(b, c)`: `c' = s·b`, `b' = -s·c`.
    #[must_use]
    pub fn rotated(self, axis: Axis, direction: Sign) -> Self {
        let [b, c] = axis.perpendiculars();
        let s = direction.int();
        let mut ret = self;
        ret.0[c as usize] = s * self[b];
        ret.0[b as usize] = -s * self[c];
        ret
    }
}

/// Converts a slice coordinate in grid units to doubled form, if it lies
/// within `epsilon` of a half-unit.
pub fn doubled_coord(index: f32, epsilon: f32) -> Option<i32> {
    let doubled = (index * 2.0).round();
    (index.is_finite() && (doubled / 2.0 - index).abs() < epsilon).then_some(doubled as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_layers_are_centered() {
        assert_eq!(GridPos::from_layers(3, [0, 1, 2]).to_point(), Point3::new(-1.0, 0.0, 1.0));
        assert_eq!(GridPos::from_layers(2, [0, 1, 0]).to_point(), Point3::new(-0.5, 0.5, -0.5));
        assert!(GridPos::from_layers(4, [3, 0, 2]).is_valid(4));
        assert!(!GridPos::from_doubled([0, 0, 0]).is_valid(4));
        assert!(!GridPos::from_doubled([4, 0, 0]).is_valid(3));
    }

    #[test]
    fn test_grid_rotation_is_exact() {
        let p = GridPos::from_doubled([2, 0, -2]);
        // +X quarter turn: (x, y, z) -> (x, -z, y)
        assert_eq!(p.rotated(Axis::X, Sign::Pos), GridPos::from_doubled([2, 2, 0]));
        // +Y quarter turn: (x, y, z) -> (z, y, -x)
        assert_eq!(p.rotated(Axis::Y, Sign::Pos), GridPos::from_doubled([-2, 0, -2]));
        // +Z quarter turn: (x, y, z) -> (-y, x, z)
        assert_eq!(p.rotated(Axis::Z, Sign::Pos), GridPos::from_doubled([0, 2, -2]));
        for axis in Axis::iter() {
            assert_eq!(p.rotated(axis, Sign::Pos).rotated(axis, Sign::Neg), p);
        }
    }

    #[test]
    fn test_doubled_coord() {
        assert_eq!(doubled_coord(1.0, 0.1), Some(2));
        assert_eq!(doubled_coord(-0.5, 0.1), Some(-1));
        assert_eq!(doubled_coord(0.52, 0.1), Some(1));
        assert_eq!(doubled_coord(0.3, 0.1), None);
        assert_eq!(doubled_coord(f32::NAN, 0.1), None);
    }
}
