//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod catch;
pub mod difficulty;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use catch::{CatchResolver, GroundCatch, LaneCatch, next_lane};
pub use difficulty::Difficulty;
pub use spawn::spawn_ball;
pub use state::{Ball, Flight, GameEvent, GamePhase, GameState, Juggler, Mood, Variant, World};
pub use tick::{TickInput, tick};
pub use trajectory::{FreeFallModel, LaneArcModel, Trajectory};
