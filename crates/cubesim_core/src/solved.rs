//! Win detection.

use crate::{Color, CubeletRegistry, Face};

/// Returns whether every face of the cube shows a single sticker color.
///
/// This looks only at the cubelets; it never consults the move history.
pub fn is_solved(registry: &CubeletRegistry) -> bool {
    Face::ALL.into_iter().all(|face| {
        let mut expected: Option<Color> = None;
        registry.face_pieces(face).into_iter().all(|piece| {
            let Some(color) = registry.get(piece).map(|c| c.color_toward(face)) else {
                return false;
            };
            color.is_sticker() && *expected.get_or_insert(color) == color
        })
    })
}
