use serde::{Deserialize, Serialize};

pub use interpolation::InterpolateFn;

/// Speeds and easing for slice rotations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Angular speed of rotations requested by the user, in radians per
    /// second.
    pub user_twist_speed: f32,
    /// Angular speed of undo, redo, and solve replay, in radians per second.
    pub replay_twist_speed: f32,
    /// Pause between consecutive solve steps, in seconds.
    pub solve_step_delay: f32,
    /// Easing applied to the presentation angle.
    pub twist_interpolation: InterpolateFn,
}
impl Default for AnimationPreferences {
    fn default() -> Self {
        Self {
            user_twist_speed: 5.0,
            replay_twist_speed: 25.0,
            solve_step_delay: 0.01,
            twist_interpolation: InterpolateFn::Lerp,
        }
    }
}
impl AnimationPreferences {
    /// Replaces out-of-range values with their defaults.
    pub(crate) fn sanitize(&mut self) {
        let defaults = Self::default();
        if !(self.user_twist_speed.is_finite() && self.user_twist_speed > 0.0) {
            log::warn!("invalid user_twist_speed {}; using default", self.user_twist_speed);
            self.user_twist_speed = defaults.user_twist_speed;
        }
        if !(self.replay_twist_speed.is_finite() && self.replay_twist_speed > 0.0) {
            log::warn!("invalid replay_twist_speed {}; using default", self.replay_twist_speed);
            self.replay_twist_speed = defaults.replay_twist_speed;
        }
        if !(self.solve_step_delay.is_finite() && self.solve_step_delay >= 0.0) {
            log::warn!("invalid solve_step_delay {}; using default", self.solve_step_delay);
            self.solve_step_delay = defaults.solve_step_delay;
        }
    }
}

pub mod interpolation {
    //! Easing curves for the presentation angle of a slice rotation.

    use std::f32::consts::PI;

    use serde::{Deserialize, Serialize};
    use strum::VariantArray;

    /// Monotonic map from rotation progress in `[0, 1]` to eased progress in
    /// `[0, 1]`, fixing both endpoints.
    #[derive(
        Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, VariantArray,
    )]
    #[serde(rename_all = "snake_case")]
    pub enum InterpolateFn {
        /// Constant angular speed.
        #[default]
        Lerp,
        /// Accelerates and decelerates along half a cosine wave.
        Cosine,
        /// Smoothstep polynomial.
        Cubic,
    }

    impl InterpolateFn {
        /// Returns eased progress for `t`. Values outside `[0, 1]` are
        /// clamped.
        pub fn interpolate(self, t: f32) -> f32 {
            let t = t.clamp(0.0, 1.0);
            match self {
                Self::Lerp => t,
                Self::Cosine => 0.5 - 0.5 * (PI * t).cos(),
                Self::Cubic => t * t * (3.0 - 2.0 * t),
            }
        }
    }

}
