//! Catch resolution and the next-throw lane rule

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Ball, Flight, Juggler, Variant, World};
use crate::consts::*;

/// Decides whether an arriving ball is caught, and what its next flight is
pub trait CatchResolver {
    /// Whether the juggler catches `ball` at the instant it arrives
    fn caught(&self, world: &World, juggler: &Juggler, ball: &Ball) -> bool;
    /// Flight for the next throw of a caught ball; `None` retires the ball
    fn rethrow(&self, world: &World, ball: &Ball, rng: &mut Pcg32) -> Option<Flight>;
}

/// Lane variant: catch on lane equality, recycle along the lane rule
pub struct LaneCatch;

/// Free-fall variant: catch within the juggler's width, ball retired
pub struct GroundCatch;

impl Variant {
    /// The catch rule this variant plays under
    pub fn catch_resolver(self) -> &'static dyn CatchResolver {
        match self {
            Variant::LaneArc => &LaneCatch,
            Variant::FreeFall => &GroundCatch,
        }
    }
}

/// Destination for a throw leaving `from_lane`: the outer lanes always feed
/// the center; the center picks an outer lane at random. Never routes
/// center→center or outer→outer.
pub fn next_lane(from_lane: usize, rng: &mut Pcg32) -> usize {
    if from_lane == CENTER_LANE {
        if rng.random_bool(0.5) { 0 } else { LANE_COUNT - 1 }
    } else {
        CENTER_LANE
    }
}

/// Flight duration for a throw, with the per-spawn jitter band
pub fn jittered_duration(rng: &mut Pcg32) -> f32 {
    FLIGHT_DURATION_MS + rng.random_range(0.0..FLIGHT_JITTER_MS)
}

impl CatchResolver for LaneCatch {
    fn caught(&self, _world: &World, juggler: &Juggler, ball: &Ball) -> bool {
        matches!(ball.flight, Flight::Arc { to_lane, .. } if juggler.lane == to_lane)
    }

    fn rethrow(&self, _world: &World, ball: &Ball, rng: &mut Pcg32) -> Option<Flight> {
        let Flight::Arc { to_lane, .. } = &ball.flight else {
            return None;
        };
        let from_lane = *to_lane;
        Some(Flight::Arc {
            from_lane,
            to_lane: next_lane(from_lane, rng),
            t: 0.0,
            duration_ms: jittered_duration(rng),
        })
    }
}

impl CatchResolver for GroundCatch {
    fn caught(&self, _world: &World, juggler: &Juggler, ball: &Ball) -> bool {
        matches!(&ball.flight, Flight::Ballistic { pos, .. }
            if (pos.x - juggler.x).abs() <= JUGGLER_WIDTH)
    }

    fn rethrow(&self, _world: &World, _ball: &Ball, _rng: &mut Pcg32) -> Option<Flight> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use rand::SeedableRng;

    #[test]
    fn test_outer_lanes_always_feed_center() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(next_lane(0, &mut rng), CENTER_LANE);
            assert_eq!(next_lane(LANE_COUNT - 1, &mut rng), CENTER_LANE);
        }
    }

    #[test]
    fn test_center_reaches_both_outer_lanes() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; LANE_COUNT];
        for _ in 0..200 {
            let lane = next_lane(CENTER_LANE, &mut rng);
            assert_ne!(lane, CENTER_LANE);
            seen[lane] = true;
        }
        assert!(seen[0] && seen[LANE_COUNT - 1]);
    }

    #[test]
    fn test_duration_jitter_stays_in_band() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..100 {
            let d = jittered_duration(&mut rng);
            assert!(d >= FLIGHT_DURATION_MS);
            assert!(d < FLIGHT_DURATION_MS + FLIGHT_JITTER_MS);
        }
    }

    #[test]
    fn test_lane_catch_requires_matching_lane() {
        let world = World::default();
        let ball = Ball {
            id: 1,
            color: 0,
            flight: Flight::Arc {
                from_lane: 0,
                to_lane: CENTER_LANE,
                t: 1.0,
                duration_ms: 2100.0,
            },
        };
        let mut juggler = Juggler::default();
        assert!(LaneCatch.caught(&world, &juggler, &ball));
        juggler.lane = 0;
        assert!(!LaneCatch.caught(&world, &juggler, &ball));
    }

    #[test]
    fn test_lane_rethrow_starts_where_it_landed() {
        let world = World::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let ball = Ball {
            id: 1,
            color: 0,
            flight: Flight::Arc {
                from_lane: 0,
                to_lane: CENTER_LANE,
                t: 1.2,
                duration_ms: 2100.0,
            },
        };
        let Some(Flight::Arc {
            from_lane, to_lane, t, ..
        }) = LaneCatch.rethrow(&world, &ball, &mut rng)
        else {
            panic!("lane catch must recycle the ball");
        };
        assert_eq!(from_lane, CENTER_LANE);
        assert_ne!(to_lane, CENTER_LANE);
        assert_eq!(t, 0.0);
    }

    #[test]
    fn test_ground_catch_window() {
        let world = World::default();
        let juggler = Juggler::default();
        let at = |x: f32| Ball {
            id: 1,
            color: 0,
            flight: Flight::Ballistic {
                pos: Vec2::new(x, world.ground_y),
                vel: Vec2::new(0.0, 1.0),
            },
        };
        assert!(GroundCatch.caught(&world, &juggler, &at(juggler.x)));
        assert!(GroundCatch.caught(&world, &juggler, &at(juggler.x + JUGGLER_WIDTH)));
        assert!(!GroundCatch.caught(&world, &juggler, &at(juggler.x + JUGGLER_WIDTH + 0.5)));
        // Caught balls are retired, not rethrown
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(GroundCatch.rethrow(&world, &at(juggler.x), &mut rng).is_none());
    }
}
