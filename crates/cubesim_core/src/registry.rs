//! Storage for all the cubelets of one cube.

use std::fmt;

use itertools::Itertools;

use crate::{
    Axis, Color, CubeError, Cubelet, Face, GridPos, MAX_SIZE, MIN_SIZE, Piece, doubled_coord,
};

/// Owner of every cubelet of an N×N×N cube.
///
/// Pieces are created in x-major order (then y, then z) and never reordered,
/// so a [`Piece`] stays valid for the lifetime of the registry. Only the
/// rotation engine in this crate can move pieces.
#[derive(Debug, Clone)]
pub struct CubeletRegistry {
    size: usize,
    cubelets: Vec<Cubelet>,
}

impl PartialEq for CubeletRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self.cubelets.len() == other.cubelets.len()
            && std::iter::zip(&self.cubelets, &other.cubelets).all(|(a, b)| {
                a.position() == b.position() && a.orientation() == b.orientation()
            })
    }
}
impl Eq for CubeletRegistry {}

impl fmt::Display for CubeletRegistry {
    /// Prints an unfolded net of the cube's face colors.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for face in Face::ALL {
            let colors = self.face_colors(face);
            writeln!(f, "{}:", face.name())?;
            for row in colors.chunks(self.size) {
                writeln!(f, "  {}", row.iter().join(" "))?;
            }
        }
        Ok(())
    }
}

impl CubeletRegistry {
    /// Constructs a solved cube of the given size.
    pub fn new(size: usize) -> Result<Self, CubeError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(CubeError::InvalidSize { size });
        }

        let cubelets = itertools::iproduct!(0..size, 0..size, 0..size)
            .map(|(x, y, z)| Cubelet::new(GridPos::from_layers(size, [x, y, z]), size))
            .collect_vec();

        log::trace!("created {size}x{size}x{size} cube with {} cubelets", cubelets.len());

        Ok(Self { size, cubelets })
    }

    /// Returns the number of layers along each axis.
    pub fn size(&self) -> usize {
        self.size
    }
    /// Returns the largest coordinate of any cubelet along any axis, which is
    /// `(size - 1) / 2`.
    pub fn limit(&self) -> f32 {
        (self.size as f32 - 1.0) / 2.0
    }
    /// Returns the number of cubelets, which is always `size³`.
    pub fn len(&self) -> usize {
        self.cubelets.len()
    }
    /// Returns whether there are no cubelets. This is never true.
    pub fn is_empty(&self) -> bool {
        self.cubelets.is_empty()
    }

    /// Returns an iterator over all pieces.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> {
        (0..self.cubelets.len() as u32).map(Piece)
    }
    /// Returns an iterator over all cubelets along with their IDs.
    pub fn iter(&self) -> impl Iterator<Item = (Piece, &Cubelet)> {
        self.pieces().zip(&self.cubelets)
    }
    /// Returns a cubelet, or `None` if the ID is out of range.
    pub fn get(&self, piece: Piece) -> Option<&Cubelet> {
        self.cubelets.get(piece.0 as usize)
    }
    pub(crate) fn get_mut(&mut self, piece: Piece) -> Option<&mut Cubelet> {
        self.cubelets.get_mut(piece.0 as usize)
    }

    /// Returns whether some layer of the cube has the coordinate `index` along
    /// every axis.
    pub fn is_valid_index(&self, index: f32) -> bool {
        doubled_coord(index, crate::SLICE_EPSILON).is_some_and(|d| {
            let max = self.size as i32 - 1;
            d.abs() <= max && (d - max).rem_euclid(2) == 0
        })
    }

    /// Returns the pieces whose coordinate along `axis` is within `epsilon` of
    /// `index`, ordered by ID.
    pub fn slice(&self, axis: Axis, index: f32, epsilon: f32) -> Vec<Piece> {
        if !index.is_finite() {
            return vec![];
        }
        self.iter()
            .filter(|(_, cubelet)| (cubelet.position().coord(axis) - index).abs() < epsilon)
            .map(|(piece, _)| piece)
            .collect()
    }

    /// Returns the pieces that currently lie on the outer layer under `face`,
    /// ordered by ID.
    pub fn face_pieces(&self, face: Face) -> Vec<Piece> {
        self.iter()
            .filter(|(_, cubelet)| cubelet.position().is_on_face(face, self.size))
            .map(|(piece, _)| piece)
            .collect()
    }

    /// Returns the `size²` colors visible on `face`, in row-major order as
    /// seen from outside the cube looking at the face with the standard "up"
    /// direction at the top.
    pub fn face_colors(&self, face: Face) -> Vec<Color> {
        let (right, up) = face_frame(face);
        let mut ret = vec![Color::Core; self.size * self.size];
        let max = self.size as i32 - 1;
        for cubelet in &self.cubelets {
            let pos = cubelet.position();
            if !pos.is_on_face(face, self.size) {
                continue;
            }
            let col = (pos[right.axis()] * right.sign().int() + max) / 2;
            let row = (max - pos[up.axis()] * up.sign().int()) / 2;
            ret[row as usize * self.size + col as usize] = cubelet.color_toward(face);
        }
        ret
    }

    /// Returns the number of visible stickers of each color, in the order of
    /// [`Face::ALL`].
    pub fn sticker_counts(&self) -> [usize; 6] {
        Face::ALL.map(|face| {
            let color = face.color();
            self.cubelets
                .iter()
                .flat_map(|cubelet| cubelet.face_colors())
                .filter(|&c| c == color)
                .count()
        })
    }
}

/// Returns the world directions that point right and up when looking at
/// `face` from outside the cube.
fn face_frame(face: Face) -> (Face, Face) {
    match face {
        Face::R => (Face::B, Face::U),
        Face::L => (Face::F, Face::U),
        Face::U => (Face::R, Face::B),
        Face::D => (Face::R, Face::F),
        Face::F => (Face::R, Face::U),
        Face::B => (Face::L, Face::U),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_registry_rejects_invalid_sizes() {
        assert_eq!(CubeletRegistry::new(1), Err(CubeError::InvalidSize { size: 1 }));
        assert_eq!(CubeletRegistry::new(0), Err(CubeError::InvalidSize { size: 0 }));
        assert_eq!(
            CubeletRegistry::new(MAX_SIZE + 1),
            Err(CubeError::InvalidSize { size: MAX_SIZE + 1 }),
        );
        assert!(CubeletRegistry::new(MIN_SIZE).is_ok());
    }

    #[test]
    fn test_registry_is_x_major() {
        let reg = CubeletRegistry::new(3).expect("valid size");
        let first = reg.get(Piece(0)).expect("piece 0").position();
        let second = reg.get(Piece(1)).expect("piece 1").position();
        let ninth = reg.get(Piece(9)).expect("piece 9").position();
        assert_eq!(first, GridPos::from_doubled([-2, -2, -2]));
        assert_eq!(second, GridPos::from_doubled([-2, -2, 0]));
        assert_eq!(ninth, GridPos::from_doubled([0, -2, -2]));
        assert_eq!(reg.limit(), 1.0);
    }

    #[test]
    fn test_slice_selection() {
        let reg = CubeletRegistry::new(4).expect("valid size");
        assert_eq!(reg.slice(Axis::X, 1.5, crate::SLICE_EPSILON).len(), 16);
        assert_eq!(reg.slice(Axis::Y, -0.5, crate::SLICE_EPSILON).len(), 16);
        assert!(reg.slice(Axis::Z, 0.0, crate::SLICE_EPSILON).is_empty());
        assert!(reg.slice(Axis::Z, f32::NAN, crate::SLICE_EPSILON).is_empty());
        assert!(reg.is_valid_index(-1.5));
        assert!(!reg.is_valid_index(1.0));
        assert!(!reg.is_valid_index(2.5));
    }

    #[test]
    fn test_face_colors_on_solved_cube() {
        let reg = CubeletRegistry::new(3).expect("valid size");
        for face in Face::ALL {
            assert_eq!(reg.face_colors(face), vec![face.color(); 9]);
            assert_eq!(reg.face_pieces(face).len(), 9);
        }
    }

    #[test]
    fn test_face_frames_are_right_handed() {
        for face in Face::ALL {
            // Right × up must point out of the face, toward the viewer.
            let (right, up) = face_frame(face);
            assert_eq!(right.vector().cross(up.vector()), face.vector(), "bad frame for {face}");
        }
    }
}
