//! Axes and faces of the cube.

use std::fmt;

use cgmath::Vector3;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::{Color, Sign};

/// 3-dimensional axis.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// X axis (right).
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (towards the camera).
    Z = 2,
}
impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
impl Axis {
    /// Returns the perpendicular axes `[b, c]` from this one, using the
    /// right-hand rule. A positive quarter turn moves `+b` to `+c`.
    pub fn perpendiculars(self) -> [Axis; 2] {
        use Axis::*;
        match self {
            X => [Y, Z], // X+ => rotate from Y+ to Z+.
            Y => [Z, X], // Y+ => rotate from Z+ to X+.
            Z => [X, Y], // Z+ => rotate from X+ to Y+.
        }
    }

    /// Returns the lowercase name of the axis.
    pub fn symbol(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }
    /// Returns the axis for a character, ignoring case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'x' => Some(Axis::X),
            'y' => Some(Axis::Y),
            'z' => Some(Axis::Z),
            _ => None,
        }
    }

    /// Returns an iterator over all axes.
    pub fn iter() -> impl Clone + Iterator<Item = Axis> {
        [Axis::X, Axis::Y, Axis::Z].into_iter()
    }

    /// Returns the unit vector along this axis.
    pub fn unit_vec3(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::unit_x(),
            Axis::Y => Vector3::unit_y(),
            Axis::Z => Vector3::unit_z(),
        }
    }
}

/// Face of the cube, or equivalently a signed axis direction.
#[derive(EnumIter, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Face {
    /// Right (+X).
    #[default]
    R = 0,
    /// Left (-X).
    L = 1,
    /// Up (+Y).
    U = 2,
    /// Down (-Y).
    D = 3,
    /// Front (+Z).
    F = 4,
    /// Back (-Z).
    B = 5,
}
impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
impl Face {
    /// All faces, in the order of the local face slots of a cubelet.
    pub const ALL: [Face; 6] = [Face::R, Face::L, Face::U, Face::D, Face::F, Face::B];

    /// Returns the face along `axis` on the `sign` side.
    pub fn new(axis: Axis, sign: Sign) -> Self {
        use Face::*;

        match (axis, sign) {
            (Axis::X, Sign::Pos) => R,
            (Axis::X, Sign::Neg) => L,
            (Axis::Y, Sign::Pos) => U,
            (Axis::Y, Sign::Neg) => D,
            (Axis::Z, Sign::Pos) => F,
            (Axis::Z, Sign::Neg) => B,
        }
    }

    /// Returns the axis perpendicular to the face.
    pub fn axis(self) -> Axis {
        use Face::*;

        match self {
            R | L => Axis::X,
            U | D => Axis::Y,
            F | B => Axis::Z,
        }
    }
    /// Returns which end of the axis the face is on.
    pub fn sign(self) -> Sign {
        use Face::*;

        match self {
            R | U | F => Sign::Pos,
            L | D | B => Sign::Neg,
        }
    }
    /// Returns the face on the other side of the cube.
    #[must_use]
    pub fn opposite(self) -> Self {
        Face::new(self.axis(), -self.sign())
    }

    /// Returns the direction this face points after a quarter turn around
    /// `axis` in `direction`.
    #[must_use]
    pub fn rotated(self, axis: Axis, direction: Sign) -> Self {
        let [b, c] = axis.perpendiculars();
        if self.axis() == axis {
            self
        } else if self.axis() == b {
            // +b -> +c for a positive turn
            Face::new(c, self.sign() * direction)
        } else {
            // +c -> -b for a positive turn
            Face::new(b, -self.sign() * direction)
        }
    }

    /// Returns the slot index of the face, used to index per-face arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the one-letter symbol for the face.
    pub fn symbol(self) -> char {
        use Face::*;

        match self {
            R => 'R',
            L => 'L',
            U => 'U',
            D => 'D',
            F => 'F',
            B => 'B',
        }
    }
    /// Returns the human-friendly name of the face.
    pub fn name(self) -> &'static str {
        use Face::*;

        match self {
            R => "Right",
            L => "Left",
            U => "Up",
            D => "Down",
            F => "Front",
            B => "Back",
        }
    }

    /// Returns the sticker color of this face on a solved cube.
    pub fn color(self) -> Color {
        use Face::*;

        match self {
            R => Color::Red,
            L => Color::Orange,
            U => Color::White,
            D => Color::Yellow,
            F => Color::Green,
            B => Color::Blue,
        }
    }

    /// Returns the outward unit normal of the face.
    pub fn vector(self) -> Vector3<f32> {
        self.axis().unit_vec3() * self.sign().float()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_face_quarter_turn_matches_right_hand_rule() {
        use Face::*;

        // Counterclockwise around +X viewed from +X: up goes to front.
        assert_eq!(U.rotated(Axis::X, Sign::Pos), F);
        assert_eq!(F.rotated(Axis::X, Sign::Pos), D);
        // Around +Y: front goes to right.
        assert_eq!(F.rotated(Axis::Y, Sign::Pos), R);
        // Around +Z: right goes to up.
        assert_eq!(R.rotated(Axis::Z, Sign::Pos), U);
        assert_eq!(R.rotated(Axis::Z, Sign::Neg), D);
    }

    #[test]
    fn test_face_rotation_has_period_four() {
        for face in Face::iter() {
            for axis in Axis::iter() {
                for dir in Sign::iter() {
                    let mut f = face;
                    for _ in 0..4 {
                        f = f.rotated(axis, dir);
                    }
                    assert_eq!(f, face);
                    assert_eq!(face.rotated(axis, dir).rotated(axis, -dir), face);
                }
            }
        }
    }

    #[test]
    fn test_face_rotation_matches_vector_cross_product() {
        for face in Face::iter() {
            for axis in Axis::iter() {
                // A positive quarter turn maps v to axis × v (for v ⟂ axis).
                let v = face.vector();
                let expected = if face.axis() == axis {
                    v
                } else {
                    axis.unit_vec3().cross(v)
                };
                assert_eq!(face.rotated(axis, Sign::Pos).vector(), expected);
            }
        }
    }
}
