//! Discrete orientation of a cubelet.

use std::fmt;
use std::ops::Index;

use cgmath::Matrix3;
use itertools::Itertools;

use crate::{Axis, Face, Sign};

/// Orientation of a cubelet: one of the 24 elements of the rotation group of
/// the cube.
///
/// Stored as the world directions of the local X+, Y+, and Z+ faces. Because
/// only quarter turns are ever applied, this is always a proper rotation and
/// never needs to be re-snapped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Orientation([Face; 3]);
impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}
impl Index<Axis> for Orientation {
    type Output = Face;

    fn index(&self, axis: Axis) -> &Self::Output {
        &self.0[axis as usize]
    }
}
impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.0;
        write!(f, "{x}{y}{z}")
    }
}
impl Orientation {
    /// Orientation of an untouched cubelet.
    pub const IDENTITY: Self = Self([Face::R, Face::U, Face::F]);

    /// Constructs an orientation from the world directions of the local X+,
    /// Y+, and Z+ faces, or returns `None` if they do not form a proper
    /// rotation.
    pub fn from_faces(faces: [Face; 3]) -> Option<Self> {
        let ret = Self(faces);
        ret.is_proper().then_some(ret)
    }

    /// Returns the orientation of a quarter turn around `axis` in
    /// `direction`.
    pub fn quarter_turn(axis: Axis, direction: Sign) -> Self {
        Self(Self::IDENTITY.0.map(|f| f.rotated(axis, direction)))
    }

    /// Returns an iterator over all 24 orientations.
    pub fn iter_all() -> impl Iterator<Item = Self> {
        let face_triples = Face::ALL
            .into_iter()
            .cartesian_product(Face::ALL)
            .cartesian_product(Face::ALL);
        face_triples.filter_map(|((x, y), z)| Self::from_faces([x, y, z]))
    }

    /// Returns the world direction that the local face `local` points toward.
    pub fn world_face(self, local: Face) -> Face {
        let f = self[local.axis()];
        Face::new(f.axis(), f.sign() * local.sign())
    }
    /// Returns the local face that points toward the world direction `world`.
    pub fn local_face(self, world: Face) -> Face {
        Axis::iter()
            .find_map(|local_axis| {
                let f = self[local_axis];
                (f.axis() == world.axis())
                    .then(|| Face::new(local_axis, f.sign() * world.sign()))
            })
            .unwrap_or_else(|| unreachable!("orientation {self} is not a permutation"))
    }

    /// Returns the composition that first applies `self` and then `then`.
    #[must_use]
    pub fn then(self, then: Self) -> Self {
        Self(self.0.map(|f| then.world_face(f)))
    }
    /// Returns the orientation after a quarter turn around `axis` in
    /// `direction`.
    #[must_use]
    pub fn rotated(self, axis: Axis, direction: Sign) -> Self {
        self.then(Self::quarter_turn(axis, direction))
    }
    /// Returns the inverse orientation.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self(Self::IDENTITY.0.map(|world| self.local_face(world)))
    }

    /// Returns the rotation matrix whose columns are the world directions of
    /// the local axes.
    pub fn matrix(self) -> Matrix3<f32> {
        let [x, y, z] = self.0.map(Face::vector);
        Matrix3::from_cols(x, y, z)
    }

    /// Returns whether the three faces are perpendicular and right-handed.
    fn is_proper(self) -> bool {
        let [x, y, z] = self.0;
        let axes_distinct = x.axis() != y.axis() && y.axis() != z.axis() && x.axis() != z.axis();
        axes_distinct && x.vector().cross(y.vector()) == z.vector()
    }
}
