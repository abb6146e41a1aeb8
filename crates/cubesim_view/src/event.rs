use cubesim_core::{CubeError, RotationComplete};

/// Notification produced by [`crate::CubeSimulation::tick()`].
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// A rotation finished. Fired exactly once per finalized rotation.
    RotationComplete(RotationComplete),
    /// The player solved the cube.
    Solved,
    /// The auto-solver ran out of moves. `verified` is whether the cube was
    /// actually solved at that point.
    SolveFinished {
        /// Whether the win detector confirmed the solved state.
        verified: bool,
    },
    /// Logical state disagreed with itself.
    ConsistencyFault(CubeError),
}
