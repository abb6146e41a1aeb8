use cgmath::Matrix3;
use cubesim_core::{
    CubeError, CubeletRegistry, Move, RotationComplete, RotationEngine, Scramble,
    ScrambleParams, SliceRotation, execute_instant,
};
use cubesim_prefs::AnimationPreferences;
use web_time::Duration;

use crate::{MoveHistory, SimEvent, Session, SessionState};

/// Cube simulation, which manages the cube state, the rotation in flight, the
/// undo and redo stacks, and the auto-solver.
///
/// Nothing happens on its own; call [`Self::tick()`] once per frame.
#[derive(Debug)]
pub struct CubeSimulation {
    /// Logical cube state, not including the rotation in flight.
    registry: CubeletRegistry,
    /// Rotation in flight.
    engine: RotationEngine,
    /// Undo and redo stacks.
    history: MoveHistory,
    /// Counters and flags for the current session.
    session: Session,
    /// Most recent scramble.
    scramble: Option<Scramble>,

    /// Time remaining before the next solve step may start.
    solve_wait: Duration,
    /// Events produced outside of [`Self::tick()`], returned by the next tick.
    pending_events: Vec<SimEvent>,

    prefs: AnimationPreferences,
}

impl CubeSimulation {
    /// Constructs a simulation with a solved cube of the given size.
    pub fn new(size: usize, prefs: AnimationPreferences) -> Result<Self, CubeError> {
        Ok(Self {
            registry: CubeletRegistry::new(size)?,
            engine: RotationEngine::new(),
            history: MoveHistory::new(),
            session: Session::new(),
            scramble: None,

            solve_wait: Duration::ZERO,
            pending_events: vec![],

            prefs,
        })
    }

    /// Returns the latest cube state, not including the rotation in flight.
    pub fn registry(&self) -> &CubeletRegistry {
        &self.registry
    }
    /// Returns the cube size.
    pub fn size(&self) -> usize {
        self.registry.size()
    }
    /// Returns the animation preferences.
    pub fn prefs(&self) -> &AnimationPreferences {
        &self.prefs
    }
    /// Replaces the animation preferences. Takes effect at the next rotation.
    pub fn set_prefs(&mut self, prefs: AnimationPreferences) {
        self.prefs = prefs;
    }

    /// Returns the current session.
    pub fn session(&self) -> &Session {
        &self.session
    }
    /// Returns the state of the session.
    pub fn state(&self) -> SessionState {
        self.session.state
    }
    /// Returns whether moves are being recorded.
    pub fn is_playing(&self) -> bool {
        self.session.is_playing
    }
    /// Returns whether every face of the cube currently shows a single
    /// color. A rotation in flight is not included.
    pub fn is_solved(&self) -> bool {
        cubesim_core::is_solved(&self.registry)
    }
    /// Returns whether the cube reached the solved state in this session,
    /// even if it has been turned since.
    pub fn was_solved(&self) -> bool {
        self.session.was_solved
    }
    /// Returns the number of moves made in this session.
    pub fn move_count(&self) -> usize {
        self.session.move_count
    }
    /// Returns the time spent playing or solving in this session.
    pub fn elapsed(&self) -> Duration {
        self.session.elapsed
    }
    /// Returns the most recent scramble, if the cube has been scrambled since
    /// it was last reset.
    pub fn last_scramble(&self) -> Option<&Scramble> {
        self.scramble.as_ref()
    }

    /// Returns the recorded moves, oldest first.
    pub fn history(&self) -> &[Move] {
        self.history.moves()
    }
    /// Returns the number of recorded moves.
    pub fn history_depth(&self) -> usize {
        self.history.len()
    }
    /// Returns whether [`Self::undo()`] would do anything.
    pub fn has_undo(&self) -> bool {
        self.can_replay() && !self.history.is_empty()
    }
    /// Returns whether [`Self::redo()`] would do anything.
    pub fn has_redo(&self) -> bool {
        self.can_replay() && self.history.has_redo()
    }

    /// Returns whether a rotation is in flight.
    pub fn is_animating(&self) -> bool {
        self.engine.is_animating()
    }
    /// Returns the rotation in flight, if any.
    pub fn current_rotation(&self) -> Option<&SliceRotation> {
        self.engine.current()
    }
    /// Returns the transform of the pieces in the rotation in flight, with
    /// the preferred easing applied.
    pub fn current_slice_transform(&self) -> Option<Matrix3<f32>> {
        let rot = self.engine.current()?;
        let t = self.prefs.twist_interpolation.interpolate(rot.progress());
        Some(rot.transform_at(t))
    }

    /// Rebuilds the cube at the same size and starts a new session. Rejected
    /// while a rotation is in flight.
    pub fn reset(&mut self) -> Result<(), CubeError> {
        self.resize(self.size())
    }
    /// Tears down the cube, rebuilds it at a new size, and starts a new
    /// session. Rejected while a rotation is in flight. On error, nothing
    /// changes.
    pub fn resize(&mut self, size: usize) -> Result<(), CubeError> {
        if self.engine.is_animating() {
            log::debug!("rejecting resize: rotation already in progress");
            return Err(CubeError::RotationInProgress);
        }
        self.registry = CubeletRegistry::new(size)?;
        self.history.clear();
        self.session = Session::new();
        self.scramble = None;
        self.solve_wait = Duration::ZERO;
        self.pending_events.clear();
        log::debug!("reset cube to size {size}");
        Ok(())
    }

    /// Requests an animated rotation.
    ///
    /// Rejected if a rotation is in flight, or if the auto-solver is running
    /// and the rotation is not `scripted`. Scripted rotations use the replay
    /// speed and are never recorded; other rotations use the user speed and
    /// are recorded while playing.
    pub fn request_rotation(&mut self, mv: Move, scripted: bool) -> Result<(), CubeError> {
        if self.engine.is_animating() {
            log::debug!("rejecting {mv}: rotation already in progress");
            return Err(CubeError::RotationInProgress);
        }
        if self.session.state == SessionState::Solving && !scripted {
            log::debug!("rejecting {mv}: solving");
            return Err(CubeError::RotationInProgress);
        }

        let speed = match scripted {
            true => self.prefs.replay_twist_speed,
            false => self.prefs.user_twist_speed,
        };
        self.engine.begin_animated(&self.registry, mv, speed)?;

        if self.session.state == SessionState::Idle {
            self.session.state = SessionState::UserRotating;
        }
        if self.session.is_playing && !scripted {
            self.history.push(mv);
            self.session.move_count += 1;
        }
        Ok(())
    }

    /// Resets the cube to solved and applies a random scramble, then starts a
    /// new session. Rejected while a rotation is in flight.
    pub fn scramble(&mut self, params: ScrambleParams) -> Result<Scramble, CubeError> {
        if self.engine.is_animating() {
            log::debug!("rejecting scramble: rotation already in progress");
            return Err(CubeError::RotationInProgress);
        }
        let mut registry = CubeletRegistry::new(self.size())?;
        let scramble = cubesim_core::scramble(&mut registry, params);
        self.start_session(registry, scramble.clone());
        Ok(scramble)
    }
    /// Resets the cube to solved and applies a known scramble, then starts a
    /// new session. If any move selects an empty slice, nothing changes.
    pub fn scramble_with_moves(&mut self, moves: &[Move]) -> Result<(), CubeError> {
        if self.engine.is_animating() {
            log::debug!("rejecting scramble: rotation already in progress");
            return Err(CubeError::RotationInProgress);
        }
        let mut registry = CubeletRegistry::new(self.size())?;
        for &mv in moves {
            execute_instant(&mut registry, mv)?;
        }
        let scramble = Scramble {
            seed: None,
            moves: moves.to_vec(),
        };
        self.start_session(registry, scramble);
        Ok(())
    }
    fn start_session(&mut self, registry: CubeletRegistry, scramble: Scramble) {
        self.registry = registry;
        self.history = MoveHistory::from_moves(scramble.moves.clone());
        self.session = Session::new();
        self.scramble = Some(scramble);
        self.solve_wait = Duration::ZERO;
    }

    /// Animates the inverse of the most recent move. Does nothing if there is
    /// nothing to undo, the session is not playing, or a rotation is in
    /// flight. Returns whether a rotation started.
    pub fn undo(&mut self) -> bool {
        if !self.can_replay() {
            return false;
        }
        let Some(mv) = self.history.last() else {
            return false;
        };
        if self.request_rotation(mv.inverse(), true).is_err() {
            return false;
        }
        self.history.undo();
        self.session.move_count = self.session.move_count.saturating_sub(1);
        true
    }
    /// Animates the most recently undone move. Does nothing under the same
    /// conditions as [`Self::undo()`]. Returns whether a rotation started.
    pub fn redo(&mut self) -> bool {
        if !self.can_replay() {
            return false;
        }
        let Some(mv) = self.history.next_redo() else {
            return false;
        };
        if self.request_rotation(mv, true).is_err() {
            return false;
        }
        self.history.redo();
        self.session.move_count += 1;
        true
    }
    fn can_replay(&self) -> bool {
        self.session.is_playing
            && !self.engine.is_animating()
            && self.session.state != SessionState::Solving
    }

    /// Starts replaying the history backwards until it is empty. Does nothing
    /// if the history is empty or already solving. Returns whether solving
    /// started.
    ///
    /// If a rotation is in flight, the first step waits for it to finish.
    pub fn solve(&mut self) -> bool {
        if self.history.is_empty() || self.session.state == SessionState::Solving {
            return false;
        }
        log::info!("solving {} moves", self.history.len());
        self.session.state = SessionState::Solving;
        self.session.is_playing = false;
        self.history.clear_redo();
        self.solve_wait = Duration::ZERO;
        if !self.engine.is_animating() {
            let mut events = std::mem::take(&mut self.pending_events);
            self.start_solve_step(&mut events);
            self.pending_events = events;
        }
        true
    }

    /// Advances time by `delta` and returns what happened.
    pub fn tick(&mut self, delta: Duration) -> Vec<SimEvent> {
        let mut events = std::mem::take(&mut self.pending_events);

        if self.session.is_timing() {
            self.session.elapsed += delta;
        }

        let completed = self.engine.advance(&mut self.registry, delta.as_secs_f32());
        let just_completed = completed.is_some();
        if let Some(done) = completed {
            self.on_rotation_complete(done, &mut events);
        }

        if self.session.state == SessionState::Solving && !self.engine.is_animating() {
            if !just_completed {
                self.solve_wait = self.solve_wait.saturating_sub(delta);
            }
            if self.solve_wait.is_zero() {
                self.start_solve_step(&mut events);
            }
        }

        events
    }

    /// Skips the animation of the rotation in flight.
    pub fn finish_rotation(&mut self) -> Vec<SimEvent> {
        let mut events = std::mem::take(&mut self.pending_events);
        if let Some(done) = self.engine.finish(&mut self.registry) {
            self.on_rotation_complete(done, &mut events);
        }
        events
    }

    fn on_rotation_complete(&mut self, done: RotationComplete, events: &mut Vec<SimEvent>) {
        let fault = done.fault.clone();
        events.push(SimEvent::RotationComplete(done));
        if let Some(e) = fault {
            events.push(SimEvent::ConsistencyFault(e));
        }

        match self.session.state {
            SessionState::UserRotating => self.session.state = SessionState::Idle,
            SessionState::Solving => {
                self.solve_wait =
                    Duration::try_from_secs_f32(self.prefs.solve_step_delay).unwrap_or_default();
            }
            SessionState::Idle => (),
        }

        if self.session.is_playing && cubesim_core::is_solved(&self.registry) {
            log::info!("solved in {} moves", self.session.move_count);
            self.session.was_solved = true;
            self.session.is_playing = false;
            events.push(SimEvent::Solved);
        }
    }

    /// Pops the next move off the history and animates its inverse, or ends
    /// the solve if there is nothing left.
    fn start_solve_step(&mut self, events: &mut Vec<SimEvent>) {
        let Some(mv) = self.history.pop() else {
            self.finish_solve(events);
            return;
        };
        match self.request_rotation(mv.inverse(), true) {
            Ok(()) => self.session.move_count += 1,
            Err(e) => {
                log::error!("error replaying {mv} during solve: {e}");
                events.push(SimEvent::ConsistencyFault(CubeError::ConsistencyFault(
                    format!("could not replay {mv}: {e}"),
                )));
            }
        }
    }

    fn finish_solve(&mut self, events: &mut Vec<SimEvent>) {
        self.session.state = SessionState::Idle;
        let verified = cubesim_core::is_solved(&self.registry);
        if verified {
            log::info!("solve finished after {} moves", self.session.move_count);
            self.session.was_solved = true;
        } else {
            let msg = "history is empty but the cube is not solved".to_string();
            log::error!("{msg}");
            events.push(SimEvent::ConsistencyFault(CubeError::ConsistencyFault(msg)));
        }
        events.push(SimEvent::SolveFinished { verified });
    }
}
