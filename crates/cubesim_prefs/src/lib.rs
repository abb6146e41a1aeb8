//! User preferences.
//!
//! Preferences are layered with the `config` crate: the embedded defaults in
//! `default.yaml` come first, then the user's `prefs.yaml`.

#[macro_use]
extern crate lazy_static;

use std::path::Path;

use cubesim_core::{MAX_SIZE, MIN_SIZE};
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

mod animations;
pub mod persist;

pub use animations::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

/// All user preferences.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    /// Cube size used when none is given.
    pub default_size: usize,
    /// Rotation speeds and easing.
    pub animation: AnimationPreferences,
    /// Scramble generation.
    pub scramble: ScramblePreferences,
}
impl Default for Preferences {
    fn default() -> Self {
        Self {
            default_size: 3,
            animation: AnimationPreferences::default(),
            scramble: ScramblePreferences::default(),
        }
    }
}

/// Scramble preferences.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ScramblePreferences {
    /// Number of random moves per layer of the cube.
    pub moves_per_layer: usize,
}
impl Default for ScramblePreferences {
    fn default() -> Self {
        Self { moves_per_layer: 20 }
    }
}
impl ScramblePreferences {
    /// Returns the number of moves in a full scramble of a cube of the given
    /// size.
    pub fn scramble_length(&self, size: usize) -> usize {
        self.moves_per_layer.saturating_mul(size)
    }
}

impl Preferences {
    /// Loads preferences from `path`, or from the user preferences file if
    /// `path` is `None`. If loading fails, logs a warning and returns the
    /// defaults.
    pub fn load(path: Option<&Path>) -> Self {
        Self::try_load(path).unwrap_or_else(|e| {
            log::warn!("Error loading preferences: {e:#}");
            Self::default()
        })
    }

    /// Loads preferences from `path`, or from the user preferences file if
    /// `path` is `None`. Out-of-range values are replaced by their defaults.
    pub fn try_load(path: Option<&Path>) -> Result<Self> {
        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));

        match persist::user_config_source(path) {
            Ok(config_source) => config = config.add_source(config_source),
            Err(e) => log::warn!("Error locating user preferences: {e}"),
        }

        let mut prefs: Self = config
            .build()
            .and_then(|c| c.try_deserialize())
            .wrap_err("error reading preferences")?;
        prefs.sanitize();
        Ok(prefs)
    }

    /// Saves preferences to `path`, or to the user preferences file if `path`
    /// is `None`.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        persist::save(self, path)
    }

    /// Returns the preferences as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_norway::to_string(self).wrap_err("error serializing preferences")
    }

    /// Replaces out-of-range values with their defaults.
    pub fn sanitize(&mut self) {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.default_size) {
            log::warn!("invalid default_size {}; using default", self.default_size);
            self.default_size = Self::default().default_size;
        }
        self.animation.sanitize();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_prefs(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_yaml_matches_default_impl() {
        let parsed: Preferences = serde_norway::from_str(DEFAULT_PREFS_STR).unwrap();
        assert_eq!(parsed, Preferences::default());
    }

    #[test]
    fn test_partial_user_prefs_override_only_given_keys() {
        let file = write_prefs("animation:\n  replay_twist_speed: 10.0\ndefault_size: 4\n");
        let prefs = Preferences::try_load(Some(file.path())).unwrap();

        let mut expected = Preferences::default();
        expected.animation.replay_twist_speed = 10.0;
        expected.default_size = 4;
        assert_eq!(prefs, expected);
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let file = write_prefs(
            "default_size: 1\nanimation:\n  user_twist_speed: -3.0\n  solve_step_delay: 0.5\n",
        );
        let prefs = Preferences::try_load(Some(file.path())).unwrap();
        assert_eq!(prefs.default_size, 3);
        assert_eq!(prefs.animation.user_twist_speed, 5.0);
        assert_eq!(prefs.animation.solve_step_delay, 0.5);
    }

    #[test]
    fn test_missing_explicit_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.yaml");
        assert!(Preferences::try_load(Some(&path)).is_err());
        assert_eq!(Preferences::load(Some(&path)), Preferences::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.yaml");

        let mut prefs = Preferences::default();
        prefs.animation.twist_interpolation = InterpolateFn::Cosine;
        prefs.scramble.moves_per_layer = 7;
        prefs.save(Some(&path)).unwrap();

        assert_eq!(Preferences::try_load(Some(&path)).unwrap(), prefs);
    }

    #[test]
    fn test_scramble_length() {
        let prefs = Preferences::default();
        assert_eq!(prefs.scramble.scramble_length(3), 60);
        assert_eq!(prefs.scramble.scramble_length(5), 100);
    }
}
