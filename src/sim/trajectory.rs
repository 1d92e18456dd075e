//! Ball trajectory strategies
//!
//! Two interchangeable motion models share one capability: given a flight,
//! where is the ball, how does it move, and has it arrived. The session's
//! `Variant` picks the model once at construction; the update loop never
//! branches on the variant itself.
//!
//! All motion is frame-rate independent: state changes scale by `dt`, a
//! dimensionless multiple of the nominal 16 ms frame.

use glam::Vec2;

use super::state::{Flight, Variant, World};
use crate::consts::*;
use crate::lane_x;

/// Motion model for balls in flight
pub trait Trajectory {
    /// Advance a flight by `dt` frame units
    fn advance(&self, world: &World, flight: &mut Flight, dt: f32);
    /// Current stage position of the flight
    fn position(&self, world: &World, flight: &Flight) -> Vec2;
    /// True once the ball has reached its destination
    fn arrived(&self, world: &World, flight: &Flight) -> bool;
}

/// Lane-to-lane interpolation with a parabolic arc peaking mid-flight
pub struct LaneArcModel;

/// Explicit velocity integration; arrival is the downward ground crossing
pub struct FreeFallModel;

impl Variant {
    /// The trajectory model this variant plays under
    pub fn trajectory(self) -> &'static dyn Trajectory {
        match self {
            Variant::LaneArc => &LaneArcModel,
            Variant::FreeFall => &FreeFallModel,
        }
    }
}

/// Arc position: linear x between lane centers, parabolic lift peaking at
/// progress 0.5
fn arc_position(world: &World, from_lane: usize, to_lane: usize, t: f32) -> Vec2 {
    let start = lane_x(from_lane);
    let end = lane_x(to_lane);
    let t = t.clamp(0.0, 1.0);
    let x = start + (end - start) * t;
    let lift = ARC_PEAK * (1.0 - (2.0 * t - 1.0).powi(2));
    Vec2::new(x, world.ground_y - ARC_LIFT - lift)
}

impl Trajectory for LaneArcModel {
    fn advance(&self, _world: &World, flight: &mut Flight, dt: f32) {
        if let Flight::Arc { t, duration_ms, .. } = flight {
            *t += dt * FRAME_MS / *duration_ms;
        }
    }

    fn position(&self, world: &World, flight: &Flight) -> Vec2 {
        match flight {
            Flight::Arc {
                from_lane, to_lane, t, ..
            } => arc_position(world, *from_lane, *to_lane, *t),
            Flight::Ballistic { pos, .. } => *pos,
        }
    }

    fn arrived(&self, _world: &World, flight: &Flight) -> bool {
        matches!(flight, Flight::Arc { t, .. } if *t >= 1.0)
    }
}

impl Trajectory for FreeFallModel {
    fn advance(&self, world: &World, flight: &mut Flight, dt: f32) {
        if let Flight::Ballistic { pos, vel } = flight {
            vel.y += world.gravity * dt;
            *pos += *vel * dt;
        }
    }

    fn position(&self, world: &World, flight: &Flight) -> Vec2 {
        match flight {
            Flight::Ballistic { pos, .. } => *pos,
            Flight::Arc {
                from_lane, to_lane, t, ..
            } => arc_position(world, *from_lane, *to_lane, *t),
        }
    }

    fn arrived(&self, world: &World, flight: &Flight) -> bool {
        matches!(flight, Flight::Ballistic { pos, vel } if vel.y > 0.0 && pos.y >= world.ground_y)
    }
}
