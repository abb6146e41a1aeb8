//! Slice rotations, both animated and instant.
//!
//! Both paths end in the same quarter-turn update, which updates
//! the logical state with exact integer arithmetic. The presentation angle is
//! only used to double-check the result.

use cgmath::{EuclideanSpace, Matrix3, Point3, Rad};

use crate::{Axis, CubeError, CubeletRegistry, GridPos, Move, Piece, QUARTER_TURN, SLICE_EPSILON};

/// Slice rotation that has started but not yet finished.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceRotation {
    mv: Move,
    pieces: Vec<Piece>,
    /// Presentation angle in radians, from `0` toward `mv.angle()`.
    angle: f32,
    /// Angular speed in radians per second.
    speed: f32,
}
impl SliceRotation {
    /// Returns the move being animated.
    pub fn mv(&self) -> Move {
        self.mv
    }
    /// Returns the pieces captured at the start of the rotation.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }
    /// Returns the current presentation angle in radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }
    /// Returns the angular speed in radians per second.
    pub fn speed(&self) -> f32 {
        self.speed
    }
    /// Returns the progress of the rotation from `0.0` to `1.0`.
    pub fn progress(&self) -> f32 {
        (self.angle.abs() / QUARTER_TURN).clamp(0.0, 1.0)
    }
    /// Returns the rotation of the captured pieces at the current progress.
    pub fn transform(&self) -> Matrix3<f32> {
        self.transform_at(self.progress())
    }
    /// Returns the rotation of the captured pieces at progress `t`. A renderer
    /// may pass an eased progress value here.
    pub fn transform_at(&self, t: f32) -> Matrix3<f32> {
        rotation_matrix(self.mv.axis, self.mv.angle() * t)
    }
}

/// Record of a finished rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationComplete {
    /// Move that was applied.
    pub mv: Move,
    /// Pieces that moved.
    pub pieces: Vec<Piece>,
    /// Rounding check failure, if any. The state is left as computed.
    pub fault: Option<CubeError>,
}

/// Holder for at most one in-flight rotation.
///
/// The engine never owns the registry; it is passed in by reference so that
/// the caller keeps exclusive ownership of the cubelets.
#[derive(Debug, Default, Clone)]
pub struct RotationEngine {
    in_flight: Option<SliceRotation>,
}
impl RotationEngine {
    /// Constructs an engine with nothing in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a rotation is in flight.
    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }
    /// Returns the rotation in flight, if any.
    pub fn current(&self) -> Option<&SliceRotation> {
        self.in_flight.as_ref()
    }

    /// Captures the slice selected by `mv` and starts animating it at `speed`
    /// radians per second.
    ///
    /// Nothing changes if a rotation is already in flight or if the slice is
    /// empty. A speed that is not positive and finite completes on the next
    /// call to [`Self::advance()`].
    pub fn begin_animated(
        &mut self,
        registry: &CubeletRegistry,
        mv: Move,
        speed: f32,
    ) -> Result<(), CubeError> {
        if self.is_animating() {
            log::debug!("rejecting {mv}: rotation already in progress");
            return Err(CubeError::RotationInProgress);
        }
        let pieces = capture_slice(registry, mv)?;
        let speed = if speed.is_finite() && speed > 0.0 {
            speed
        } else {
            f32::INFINITY
        };
        log::trace!("begin {mv} with {} pieces at {speed} rad/s", pieces.len());
        self.in_flight = Some(SliceRotation {
            mv,
            pieces,
            angle: 0.0,
            speed,
        });
        Ok(())
    }

    /// Advances the rotation in flight by `delta_secs`. If it reaches its
    /// target, finalizes it and returns the completion record.
    ///
    /// Non-finite and negative deltas are ignored.
    pub fn advance(
        &mut self,
        registry: &mut CubeletRegistry,
        delta_secs: f32,
    ) -> Option<RotationComplete> {
        if !delta_secs.is_finite() || delta_secs < 0.0 {
            log::debug!("ignoring time step {delta_secs}");
            return None;
        }
        let rot = self.in_flight.as_mut()?;
        rot.angle += rot.speed * delta_secs * rot.mv.direction.float();
        if !rot.speed.is_finite() || rot.angle.is_nan() || rot.angle.abs() >= QUARTER_TURN {
            self.finalize(registry)
        } else {
            None
        }
    }

    /// Jumps the rotation in flight to its target and finalizes it.
    pub fn finish(&mut self, registry: &mut CubeletRegistry) -> Option<RotationComplete> {
        self.finalize(registry)
    }

    /// Applies `mv` without animating. Rejected while a rotation is in flight.
    pub fn execute_instant(
        &mut self,
        registry: &mut CubeletRegistry,
        mv: Move,
    ) -> Result<RotationComplete, CubeError> {
        if self.is_animating() {
            log::debug!("rejecting {mv}: rotation already in progress");
            return Err(CubeError::RotationInProgress);
        }
        execute_instant(registry, mv)
    }

    fn finalize(&mut self, registry: &mut CubeletRegistry) -> Option<RotationComplete> {
        let SliceRotation { mv, pieces, .. } = self.in_flight.take()?;
        // The presentation angle is clamped exactly to the target.
        let fault = apply_quarter_turn(registry, mv, &pieces);
        Some(RotationComplete { mv, pieces, fault })
    }
}

/// Applies `mv` to the registry without animating.
pub fn execute_instant(
    registry: &mut CubeletRegistry,
    mv: Move,
) -> Result<RotationComplete, CubeError> {
    let pieces = capture_slice(registry, mv)?;
    let fault = apply_quarter_turn(registry, mv, &pieces);
    Ok(RotationComplete { mv, pieces, fault })
}

fn capture_slice(registry: &CubeletRegistry, mv: Move) -> Result<Vec<Piece>, CubeError> {
    let pieces = registry.slice(mv.axis, mv.slice, SLICE_EPSILON);
    if pieces.is_empty() {
        log::warn!("ignoring {mv}: no pieces at {} = {}", mv.axis, mv.slice);
        return Err(CubeError::InvalidSlice {
            axis: mv.axis,
            index: mv.slice,
        });
    }
    Ok(pieces)
}

/// Rotates every piece in `pieces` by a quarter turn, updating position and
/// orientation together.
///
/// Each new position is cross-checked against the float position rotated
/// through the full presentation angle and rounded to the grid. Returns the
/// first disagreement, if any.
fn apply_quarter_turn(
    registry: &mut CubeletRegistry,
    mv: Move,
    pieces: &[Piece],
) -> Option<CubeError> {
    let size = registry.size();
    let presentation = rotation_matrix(mv.axis, mv.angle());
    let mut fault = None;

    for &piece in pieces {
        let Some(cubelet) = registry.get_mut(piece) else {
            let msg = format!("{mv}: piece {piece} does not exist");
            log::error!("{msg}");
            fault.get_or_insert(CubeError::ConsistencyFault(msg));
            continue;
        };

        let old = cubelet.position();
        cubelet.rotate(mv.axis, mv.direction);
        let new = cubelet.position();

        let rounded = GridPos::snap(Point3::from_vec(presentation * old.to_point().to_vec()));
        if rounded != new || !new.is_valid(size) {
            let msg =
                format!("{mv}: piece {piece} moved from {old} to {new} but rounds to {rounded}");
            log::error!("{msg}");
            fault.get_or_insert(CubeError::ConsistencyFault(msg));
        }
    }

    log::trace!("applied {mv} to {} pieces", pieces.len());
    fault
}

/// Returns the matrix for a rotation of `angle` radians around `axis`,
/// counterclockwise when viewed from the positive end.
fn rotation_matrix(axis: Axis, angle: f32) -> Matrix3<f32> {
    match axis {
        Axis::X => Matrix3::from_angle_x(Rad(angle)),
        Axis::Y => Matrix3::from_angle_y(Rad(angle)),
        Axis::Z => Matrix3::from_angle_z(Rad(angle)),
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, SquareMatrix};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Face, Sign};

    fn cube(size: usize) -> CubeletRegistry {
        CubeletRegistry::new(size).expect("valid size")
    }

    #[test]
    fn test_rotation_matrix_matches_face_rotation() {
        for axis in Axis::iter() {
            for dir in Sign::iter() {
                let m = rotation_matrix(axis, QUARTER_TURN * dir.float());
                for face in Face::ALL {
                    let v = m * face.vector();
                    let expected = face.rotated(axis, dir).vector();
                    assert!((v - expected).magnitude2() < 1e-10, "{axis}{dir} on {face}");
                }
            }
        }
    }

    #[test]
    fn test_animated_rotation_completes_once() {
        let mut reg = cube(3);
        let mut engine = RotationEngine::new();
        let mv = Move::new(Axis::Y, 1.0, Sign::Pos);
        engine.begin_animated(&reg, mv, 5.0).expect("slice exists");
        assert!(engine.is_animating());
        assert_eq!(engine.current().map(|r| r.pieces().len()), Some(9));

        assert_eq!(engine.advance(&mut reg, 0.1), None);
        let progress = engine.current().map(|r| r.progress()).unwrap_or_default();
        assert!(progress > 0.0 && progress < 1.0);
        assert_eq!(reg, cube(3), "logical state changes only on completion");

        let done = engine.advance(&mut reg, 1.0).expect("rotation finished");
        assert_eq!(done.mv, mv);
        assert_eq!(done.fault, None);
        assert!(!engine.is_animating());
        assert_eq!(engine.advance(&mut reg, 1.0), None);
    }

    #[test]
    fn test_busy_engine_rejects_rotations() {
        let mut reg = cube(3);
        let mut engine = RotationEngine::new();
        let mv = Move::new(Axis::X, 0.0, Sign::Neg);
        engine.begin_animated(&reg, mv, 5.0).expect("slice exists");
        let before = engine.current().cloned();

        assert_eq!(engine.begin_animated(&reg, mv, 5.0), Err(CubeError::RotationInProgress));
        assert_eq!(
            engine.execute_instant(&mut reg, mv),
            Err(CubeError::RotationInProgress),
        );
        assert_eq!(engine.current().cloned(), before);
        assert_eq!(reg, cube(3));
    }

    #[test]
    fn test_empty_slice_is_noop() {
        let mut reg = cube(2);
        let mut engine = RotationEngine::new();
        let mv = Move::new(Axis::Z, 0.0, Sign::Pos);
        assert_eq!(
            engine.begin_animated(&reg, mv, 5.0),
            Err(CubeError::InvalidSlice { axis: Axis::Z, index: 0.0 }),
        );
        assert!(!engine.is_animating());
        assert!(execute_instant(&mut reg, mv).is_err());
        assert_eq!(reg, cube(2));
    }

    #[test]
    fn test_bad_time_steps_are_ignored() {
        let mut reg = cube(3);
        let mut engine = RotationEngine::new();
        let mv = Move::new(Axis::Z, -1.0, Sign::Pos);
        engine.begin_animated(&reg, mv, 5.0).expect("slice exists");
        for dt in [f32::NAN, f32::INFINITY, -1.0] {
            assert_eq!(engine.advance(&mut reg, dt), None);
            assert_eq!(engine.current().map(|r| r.angle()), Some(0.0));
        }
        assert!(engine.finish(&mut reg).is_some());
    }

    #[test]
    fn test_transform_at_endpoints() {
        let reg = cube(3);
        let mut engine = RotationEngine::new();
        let mv = Move::new(Axis::X, 1.0, Sign::Pos);
        engine.begin_animated(&reg, mv, 5.0).expect("slice exists");
        let rot = engine.current().expect("in flight");
        assert_eq!(rot.transform_at(0.0), Matrix3::identity());
        assert_eq!(rot.transform(), Matrix3::identity());
    }
}
