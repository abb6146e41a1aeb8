use std::fmt;

use cgmath::{Matrix4, Point3};

use crate::{Axis, Color, Face, GridPos, Orientation, Sign};

/// Index of a cubelet in a [`crate::CubeletRegistry`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece(pub u32);
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One small cube piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cubelet {
    /// Position at creation.
    home: GridPos,
    /// Current position.
    position: GridPos,
    /// Current orientation.
    orientation: Orientation,
    /// Color of each local face, indexed by [`Face::index()`]. Never changes.
    face_colors: [Color; 6],
}
impl Cubelet {
    /// Constructs a cubelet at its home position in a cube of the given size.
    /// A local face is colored iff the position is on that boundary.
    pub(crate) fn new(home: GridPos, size: usize) -> Self {
        Self {
            home,
            position: home,
            orientation: Orientation::IDENTITY,
            face_colors: Face::ALL.map(|face| match home.is_on_face(face, size) {
                true => face.color(),
                false => Color::Core,
            }),
        }
    }

    /// Returns the position that the cubelet was created at.
    pub fn home(&self) -> GridPos {
        self.home
    }
    /// Returns the current position.
    pub fn position(&self) -> GridPos {
        self.position
    }
    /// Returns the current orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
    /// Returns the colors of the local faces, indexed by [`Face::index()`].
    pub fn face_colors(&self) -> [Color; 6] {
        self.face_colors
    }
    /// Returns the color of a local face.
    pub fn local_color(&self, local: Face) -> Color {
        self.face_colors[local.index()]
    }
    /// Returns the color currently facing the world direction `world`.
    pub fn color_toward(&self, world: Face) -> Color {
        self.local_color(self.orientation.local_face(world))
    }
    /// Returns whether the cubelet has at least one sticker.
    pub fn is_visible(&self) -> bool {
        self.face_colors.iter().any(|c| c.is_sticker())
    }

    /// Returns the model matrix of the cubelet in grid units, for renderers.
    pub fn transform(&self) -> Matrix4<f32> {
        let Point3 { x, y, z } = self.position.to_point();
        Matrix4::from_translation(cgmath::vec3(x, y, z)) * Matrix4::from(self.orientation.matrix())
    }

    /// Applies a quarter turn to both the position and the orientation. These
    /// always change together.
    pub(crate) fn rotate(&mut self, axis: Axis, direction: Sign) {
        self.position = self.position.rotated(axis, direction);
        self.orientation = self.orientation.rotated(axis, direction);
    }
}
