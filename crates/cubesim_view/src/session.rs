use serde::Serialize;
use web_time::Duration;

/// What the session controller is currently doing.
#[derive(Serialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No rotation in flight.
    #[default]
    Idle,
    /// A single requested rotation is animating.
    UserRotating,
    /// Replaying the history backwards.
    Solving,
}

/// Counters and flags for one play session. Rebuilt whenever the cube is
/// created, reset, resized, or scrambled.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Session {
    /// Current state.
    pub state: SessionState,
    /// Whether moves are being recorded and timed. Set when the session
    /// starts and cleared when the cube is solved or the auto-solver starts.
    pub is_playing: bool,
    /// Whether the cube reached the solved state in this session. Stays set
    /// if the cube is turned afterwards.
    pub was_solved: bool,
    /// Number of moves made in this session.
    pub move_count: usize,
    /// Time spent playing or solving.
    pub elapsed: Duration,
}
impl Session {
    /// Returns a fresh session that is recording and timing moves.
    pub fn new() -> Self {
        Self {
            is_playing: true,
            ..Self::default()
        }
    }

    /// Returns whether the clock is running.
    pub fn is_timing(&self) -> bool {
        self.is_playing || self.state == SessionState::Solving
    }
}
