use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use cubesim_core::{
    CubeError, CubeletRegistry, Face, Move, Scramble, ScrambleParams, format_moves,
};
use cubesim_prefs::Preferences;
use cubesim_view::{CubeSimulation, SessionState, SimEvent};
use eyre::{Result, WrapErr, bail};
use itertools::Itertools;
use serde::Serialize;
use web_time::Duration;

const DEFAULT_FPS: f64 = 60.0;

/// N×N×N cube simulator
///
/// Output is written to stdout as JSON. Set `RUST_LOG` to see log messages.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Preferences file to use instead of the default one.
    #[arg(long, global = true, value_name = "FILE")]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Scramble a solved cube and print the scramble and the resulting faces.
    Scramble {
        #[command(flatten)]
        cube: CubeArgs,
    },
    /// Scramble a cube, then let the auto-solver undo every move.
    Solve {
        #[command(flatten)]
        cube: CubeArgs,
        /// Simulated frames per second.
        #[arg(long, default_value_t = DEFAULT_FPS)]
        fps: f64,
    },
    /// Apply moves and commands in order, waiting for each to finish.
    ///
    /// Moves are written like `x1`, `y-0.5'`, or `z0`. Commands are `undo`,
    /// `redo`, `solve`, `scramble`, and `reset`.
    Play {
        #[command(flatten)]
        cube: CubeArgs,
        /// Simulated frames per second.
        #[arg(long, default_value_t = DEFAULT_FPS)]
        fps: f64,
        /// Moves and commands.
        #[arg(required = true)]
        tokens: Vec<Token>,
    },
    /// Print the effective preferences as YAML.
    Prefs,
}

#[derive(clap::Args, Debug, Clone)]
pub(crate) struct CubeArgs {
    /// Number of layers along each axis.
    #[arg(short, long)]
    pub size: Option<usize>,
    /// Number of scramble moves.
    #[arg(short, long)]
    pub moves: Option<usize>,
    /// Scramble seed.
    #[arg(long)]
    pub seed: Option<u64>,
}
impl CubeArgs {
    fn size(&self, prefs: &Preferences) -> usize {
        self.size.unwrap_or(prefs.default_size)
    }
    fn scramble_params(&self, prefs: &Preferences, size: usize) -> ScrambleParams {
        ScrambleParams {
            move_count: self
                .moves
                .unwrap_or_else(|| prefs.scramble.scramble_length(size)),
            seed: self.seed,
        }
    }
}

/// Move or command given to `play`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum Token {
    Move(Move),
    Undo,
    Redo,
    Solve,
    Scramble,
    Reset,
}
impl FromStr for Token {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "undo" => Ok(Token::Undo),
            "redo" => Ok(Token::Redo),
            "solve" => Ok(Token::Solve),
            "scramble" => Ok(Token::Scramble),
            "reset" => Ok(Token::Reset),
            _ => s.parse().map(Token::Move),
        }
    }
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let prefs = match &args.prefs {
        Some(path) => Preferences::try_load(Some(path.as_path()))
            .wrap_err_with(|| format!("error loading preferences from {}", path.display()))?,
        None => Preferences::load(None),
    };

    match args.subcommand {
        Subcommand::Scramble { cube } => {
            let size = cube.size(&prefs);
            let mut registry = CubeletRegistry::new(size)?;
            let scramble = cubesim_core::scramble(&mut registry, cube.scramble_params(&prefs, size));
            write_json_output(&ScrambleOutput {
                size,
                notation: format_moves(&scramble.moves),
                scramble,
                faces: face_rows(&registry),
            })
        }

        Subcommand::Solve { cube, fps } => {
            let size = cube.size(&prefs);
            let mut driver = Driver::new(&prefs, size, fps)?;
            driver.sim.scramble(cube.scramble_params(&prefs, size))?;
            if driver.sim.solve() {
                driver.run_until_idle();
            }
            write_json_output(&driver.summary())
        }

        Subcommand::Play { cube, fps, tokens } => {
            let size = cube.size(&prefs);
            let mut driver = Driver::new(&prefs, size, fps)?;
            let scramble_params = cube.scramble_params(&prefs, size);
            for token in tokens {
                driver.apply(token, scramble_params)?;
            }
            write_json_output(&driver.summary())
        }

        Subcommand::Prefs => {
            print!("{}", prefs.to_yaml()?);
            Ok(())
        }
    }
}

/// Runs a [`CubeSimulation`] at a fixed frame rate and tallies its events.
struct Driver {
    sim: CubeSimulation,
    frame: Duration,
    rotations: usize,
    solve_verified: Option<bool>,
    faults: Vec<String>,
}
impl Driver {
    fn new(prefs: &Preferences, size: usize, fps: f64) -> Result<Self> {
        if !(fps.is_finite() && fps > 0.0) {
            bail!("frame rate must be positive, got {fps}");
        }
        let frame = Duration::try_from_secs_f64(fps.recip()).wrap_err("bad frame rate")?;
        let sim = CubeSimulation::new(size, prefs.animation.clone())?;
        Ok(Self {
            sim,
            frame,
            rotations: 0,
            solve_verified: None,
            faults: vec![],
        })
    }

    fn apply(&mut self, token: Token, scramble_params: ScrambleParams) -> Result<()> {
        log::debug!("applying {token:?}");
        match token {
            Token::Move(mv) => match self.sim.request_rotation(mv, false) {
                Ok(()) => (),
                Err(e @ CubeError::InvalidSlice { .. }) => log::warn!("skipping {mv}: {e}"),
                Err(e) => return Err(e).wrap_err_with(|| format!("error applying {mv}")),
            },
            Token::Undo => {
                if !self.sim.undo() {
                    log::warn!("nothing to undo");
                }
            }
            Token::Redo => {
                if !self.sim.redo() {
                    log::warn!("nothing to redo");
                }
            }
            Token::Solve => {
                if !self.sim.solve() {
                    log::warn!("nothing to solve");
                }
            }
            Token::Scramble => {
                self.sim.scramble(scramble_params)?;
            }
            Token::Reset => self.sim.reset()?,
        }
        self.run_until_idle();
        Ok(())
    }

    fn run_until_idle(&mut self) {
        while self.sim.is_animating() || self.sim.state() == SessionState::Solving {
            let events = self.sim.tick(self.frame);
            self.record(events);
        }
    }

    fn record(&mut self, events: Vec<SimEvent>) {
        for event in events {
            match event {
                SimEvent::RotationComplete(_) => self.rotations += 1,
                SimEvent::Solved => log::info!(
                    "solved in {} moves ({:.2}s)",
                    self.sim.move_count(),
                    self.sim.elapsed().as_secs_f64(),
                ),
                SimEvent::SolveFinished { verified } => self.solve_verified = Some(verified),
                SimEvent::ConsistencyFault(e) => self.faults.push(e.to_string()),
            }
        }
    }

    fn summary(&self) -> SessionSummary<'_> {
        let session = self.sim.session();
        SessionSummary {
            size: self.sim.size(),
            state: session.state,
            is_playing: session.is_playing,
            is_solved: self.sim.is_solved(),
            was_solved: session.was_solved,
            move_count: session.move_count,
            history_depth: self.sim.history_depth(),
            has_redo: self.sim.has_redo(),
            elapsed_secs: session.elapsed.as_secs_f64(),
            scramble: self.sim.last_scramble(),
            rotations: self.rotations,
            solve_verified: self.solve_verified,
            faults: self.faults.clone(),
            faces: face_rows(self.sim.registry()),
        }
    }
}

#[derive(Serialize, Debug)]
struct ScrambleOutput {
    size: usize,
    #[serde(flatten)]
    scramble: Scramble,
    notation: String,
    faces: BTreeMap<char, Vec<String>>,
}

#[derive(Serialize, Debug)]
struct SessionSummary<'a> {
    size: usize,
    state: SessionState,
    is_playing: bool,
    is_solved: bool,
    was_solved: bool,
    move_count: usize,
    history_depth: usize,
    has_redo: bool,
    elapsed_secs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    scramble: Option<&'a Scramble>,
    rotations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    solve_verified: Option<bool>,
    faults: Vec<String>,
    faces: BTreeMap<char, Vec<String>>,
}

/// Returns the colors on each face as rows of color symbols.
fn face_rows(registry: &CubeletRegistry) -> BTreeMap<char, Vec<String>> {
    Face::ALL
        .into_iter()
        .map(|face| {
            let rows = registry
                .face_colors(face)
                .chunks(registry.size())
                .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
                .collect_vec();
            (face.symbol(), rows)
        })
        .collect()
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use cubesim_core::{Axis, Sign};
    use pretty_assertions::assert_eq;

    use super::*;

    fn driver(size: usize) -> Driver {
        Driver::new(&Preferences::default(), size, DEFAULT_FPS).unwrap()
    }

    fn play(driver: &mut Driver, tokens: &str) {
        let params = ScrambleParams::with_seed(12, 34);
        for token in tokens.split_whitespace() {
            driver.apply(token.parse().unwrap(), params).unwrap();
        }
    }

    #[test]
    fn test_cli_args() {
        use clap::CommandFactory;

        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!("undo".parse::<Token>(), Ok(Token::Undo));
        assert_eq!("reset".parse::<Token>(), Ok(Token::Reset));
        assert_eq!(
            "y-1'".parse::<Token>(),
            Ok(Token::Move(Move::new(Axis::Y, -1.0, Sign::Neg))),
        );
        assert!("undoo".parse::<Token>().is_err());
    }

    #[test]
    fn test_bad_frame_rate() {
        let prefs = Preferences::default();
        assert!(Driver::new(&prefs, 3, 0.0).is_err());
        assert!(Driver::new(&prefs, 3, f64::NAN).is_err());
        assert!(Driver::new(&prefs, 1, DEFAULT_FPS).is_err());
    }

    #[test]
    fn test_play_four_quarter_turns() {
        let mut d = driver(3);
        play(&mut d, "y0 y0 y0 y0");
        let summary = d.summary();
        assert_eq!(summary.rotations, 4);
        assert!(summary.is_solved);
        assert!(summary.was_solved);
        assert!(!summary.is_playing);
        assert_eq!(summary.history_depth, 4);
        assert_eq!(summary.move_count, 4);
    }

    #[test]
    fn test_play_scramble_then_solve() {
        let mut d = driver(4);
        play(&mut d, "scramble x0.5 undo redo solve");
        let summary = d.summary();
        assert!(summary.is_solved);
        assert_eq!(summary.history_depth, 0);
        assert_eq!(summary.solve_verified, Some(true));
        assert!(summary.faults.is_empty());
        assert_eq!(summary.state, SessionState::Idle);
        assert_eq!(summary.scramble.map(|s| s.moves.len()), Some(12));
    }

    #[test]
    fn test_play_skips_invalid_slice() {
        let mut d = driver(2);
        play(&mut d, "x0 x0.5");
        assert_eq!(d.rotations, 1);
    }

    #[test]
    fn test_play_without_scramble_records_moves() {
        let mut d = driver(3);
        play(&mut d, "x1 z-1' undo reset x0");
        let summary = d.summary();
        assert_eq!(summary.rotations, 4);
        assert_eq!(summary.history_depth, 1);
        assert_eq!(summary.move_count, 1);
        assert!(!summary.is_solved);
        assert!(summary.scramble.is_none());
    }

    #[test]
    fn test_face_rows() {
        let registry = CubeletRegistry::new(2).unwrap();
        let faces = face_rows(&registry);
        assert_eq!(faces.len(), 6);
        assert_eq!(faces[&'U'], vec!["WW".to_string(), "WW".to_string()]);
    }
}
