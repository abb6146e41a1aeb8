//! Session controller for cubesim: move history, undo and redo, auto-solve,
//! and the tick loop that drives slice animations.

mod event;
mod history;
mod session;
mod simulation;


pub use event::SimEvent;
pub use history::MoveHistory;
pub use session::{Session, SessionState};
pub use simulation::CubeSimulation;
