//! Session state and core simulation types
//!
//! Everything the per-tick update mutates is owned by `GameState`; nothing
//! else in the crate writes to it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::difficulty::Difficulty;
use crate::consts::*;
use crate::lane_x;

/// Which ruleset a session runs under, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Balls travel lane-to-lane along a fixed arc
    #[default]
    LaneArc,
    /// Balls are tossed straight up and fall back under gravity
    FreeFall,
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Idle attract screen, waiting for the begin signal
    Start,
    /// Active gameplay
    Playing,
    /// A ball hit the floor; waiting for restart
    GameOver,
}

/// Rendering hint for the juggler's face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Sad,
}

/// Immutable stage geometry, set once per session
#[derive(Debug, Clone)]
pub struct World {
    pub width: f32,
    pub height: f32,
    /// y-coordinate of the floor line balls must be caught at
    pub ground_y: f32,
    /// Per-frame² gravity, used only by the free-fall variant
    pub gravity: f32,
}

impl Default for World {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            ground_y: GROUND_Y,
            gravity: GRAVITY,
        }
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq)]
pub struct Juggler {
    /// Continuous x position (always the lane center in the lane variant)
    pub x: f32,
    /// Lane column, meaningful in the lane variant
    pub lane: usize,
    /// -1.0 or 1.0, last walking direction (continuous variant)
    pub facing: f32,
    pub mood: Mood,
}

impl Default for Juggler {
    fn default() -> Self {
        Self {
            x: lane_x(CENTER_LANE),
            lane: CENTER_LANE,
            facing: 1.0,
            mood: Mood::Happy,
        }
    }
}

/// Motion state of a ball in flight
#[derive(Debug, Clone, PartialEq)]
pub enum Flight {
    /// Normalized progress along a lane-to-lane arc
    Arc {
        from_lane: usize,
        to_lane: usize,
        /// Elapsed fraction of the flight, 0..1
        t: f32,
        duration_ms: f32,
    },
    /// Explicit position and velocity under gravity
    Ballistic { pos: Vec2, vel: Vec2 },
}

/// A ball entity
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub id: u32,
    /// Palette index, assigned round-robin at spawn
    pub color: u8,
    pub flight: Flight,
}

/// One-shot cues emitted by the simulation, drained by the host each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new ball entered play (spawn cue)
    BallThrown,
    Caught,
    /// A ball hit the floor and ended the session
    Dropped,
    /// The target ball count went up
    LevelUp,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub variant: Variant,
    pub world: World,
    pub phase: GamePhase,
    pub juggler: Juggler,
    /// Active balls in spawn order; arrivals resolve in this order
    pub balls: Vec<Ball>,
    pub difficulty: Difficulty,
    /// Milliseconds accumulated since the last throw
    pub throw_timer_ms: f32,
    /// Balls thrown this session; drives color and source-lane cycling
    pub balls_thrown: u32,
    /// Cues emitted since the last drain
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a session in the idle `Start` phase
    pub fn new(seed: u64, variant: Variant) -> Self {
        Self {
            seed,
            variant,
            world: World::default(),
            phase: GamePhase::Start,
            juggler: Juggler::default(),
            balls: Vec::new(),
            difficulty: Difficulty::default(),
            throw_timer_ms: 0.0,
            balls_thrown: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new ball ID
    pub fn next_ball_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reinitialize everything and enter `Playing`.
    ///
    /// Used for both the initial begin and the post-game-over restart; the
    /// two are the same transition.
    pub fn reset(&mut self) {
        self.balls.clear();
        self.throw_timer_ms = 0.0;
        self.balls_thrown = 0;
        self.difficulty = Difficulty::default();
        self.juggler = Juggler::default();
        self.events.clear();
        self.phase = GamePhase::Playing;
    }

    /// Current stage position of a ball, per the session's trajectory model
    pub fn ball_position(&self, ball: &Ball) -> Vec2 {
        self.variant.trajectory().position(&self.world, &ball.flight)
    }

    /// Take the cues accumulated since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
