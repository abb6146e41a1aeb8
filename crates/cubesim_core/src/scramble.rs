//! Random scramble generation.

use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{Axis, CubeletRegistry, Move, Piece, Sign, execute_instant};

/// Parameters to deterministically generate a scramble.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ScrambleParams {
    /// Number of random moves.
    pub move_count: usize,
    /// Random seed. If `None`, a seed is drawn from the OS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}
impl ScrambleParams {
    /// Returns parameters for `move_count` moves with a fresh random seed.
    pub fn new(move_count: usize) -> Self {
        Self {
            move_count,
            seed: None,
        }
    }
    /// Returns parameters for `move_count` moves with a fixed seed.
    pub fn with_seed(move_count: usize, seed: u64) -> Self {
        Self {
            move_count,
            seed: Some(seed),
        }
    }
}

/// Scramble that was applied to a cube.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Scramble {
    /// Seed that reproduces the scramble, or `None` if the moves were given
    /// explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Moves that were applied, in order.
    pub moves: Vec<Move>,
}

/// Applies random moves to `registry` and returns them.
///
/// Each move picks an axis uniformly, then a slice by sampling a random
/// existing piece and taking its coordinate along that axis, then a direction
/// uniformly. Moves are applied as they are generated.
pub fn scramble(registry: &mut CubeletRegistry, params: ScrambleParams) -> Scramble {
    let seed = params.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("scrambling with {} moves from seed {seed}", params.move_count);

    let mut rng = rand_chacha::ChaCha12Rng::seed_from_u64(seed);

    let mut moves = Vec::with_capacity(params.move_count);
    for _ in 0..params.move_count {
        let axis = match rng.random_range(0..3) {
            0 => Axis::X,
            1 => Axis::Y,
            _ => Axis::Z,
        };
        let piece = Piece(rng.random_range(0..registry.len() as u32));
        let Some(cubelet) = registry.get(piece) else {
            continue;
        };
        let slice = cubelet.position().coord(axis);
        let direction = if rng.random_bool(0.5) {
            Sign::Pos
        } else {
            Sign::Neg
        };

        let mv = Move::new(axis, slice, direction);
        if execute_instant(registry, mv).is_ok() {
            moves.push(mv);
        }
    }

    Scramble {
        seed: Some(seed),
        moves,
    }
}
