//! Ball spawning

use glam::Vec2;
use rand::Rng;

use super::catch::jittered_duration;
use super::state::{Ball, Flight, GameEvent, GameState, Variant};
use crate::consts::*;

/// Throw a new ball into play.
///
/// Colors cycle round-robin over the palette by total-thrown count. The lane
/// variant alternates the source between the two outer lanes and always
/// targets the center; the free-fall variant launches from the juggler's
/// position with jittered velocity. Emits the spawn cue as a `BallThrown`
/// event; the simulation never waits on audio.
pub fn spawn_ball(state: &mut GameState) {
    let color = (state.balls_thrown % BALL_PALETTE_LEN) as u8;
    let flight = match state.variant {
        Variant::LaneArc => {
            let from_lane = if state.balls_thrown % 2 == 0 {
                0
            } else {
                LANE_COUNT - 1
            };
            Flight::Arc {
                from_lane,
                to_lane: CENTER_LANE,
                t: 0.0,
                duration_ms: jittered_duration(&mut state.rng),
            }
        }
        Variant::FreeFall => {
            let vx = state.rng.random_range(-LAUNCH_DRIFT..LAUNCH_DRIFT);
            let vy = -(LAUNCH_SPEED + state.rng.random_range(0.0..LAUNCH_JITTER));
            Flight::Ballistic {
                pos: Vec2::new(state.juggler.x, state.world.ground_y),
                vel: Vec2::new(vx, vy),
            }
        }
    };
    let id = state.next_ball_id();
    state.balls.push(Ball { id, color, flight });
    state.balls_thrown += 1;
    state.events.push(GameEvent::BallThrown);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_cycle_through_palette() {
        let mut state = GameState::new(5, Variant::LaneArc);
        state.reset();
        for _ in 0..BALL_PALETTE_LEN + 1 {
            spawn_ball(&mut state);
        }
        let colors: Vec<u8> = state.balls.iter().map(|b| b.color).collect();
        assert_eq!(colors[0], 0);
        assert_eq!(colors[BALL_PALETTE_LEN as usize], 0);
        for pair in colors.windows(2).take(BALL_PALETTE_LEN as usize - 1) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_lane_spawns_alternate_outer_sources() {
        let mut state = GameState::new(5, Variant::LaneArc);
        state.reset();
        for _ in 0..4 {
            spawn_ball(&mut state);
        }
        let sources: Vec<usize> = state
            .balls
            .iter()
            .map(|b| match b.flight {
                Flight::Arc { from_lane, to_lane, .. } => {
                    assert_eq!(to_lane, CENTER_LANE);
                    from_lane
                }
                _ => panic!("lane variant spawned a ballistic ball"),
            })
            .collect();
        assert_eq!(sources, vec![0, LANE_COUNT - 1, 0, LANE_COUNT - 1]);
    }

    #[test]
    fn test_free_fall_launches_upward_from_juggler() {
        let mut state = GameState::new(5, Variant::FreeFall);
        state.reset();
        state.juggler.x = 101.0;
        spawn_ball(&mut state);
        let Flight::Ballistic { pos, vel } = &state.balls[0].flight else {
            panic!("free-fall variant spawned an arc ball");
        };
        assert_eq!(pos.x, 101.0);
        assert_eq!(pos.y, state.world.ground_y);
        assert!(vel.y <= -LAUNCH_SPEED);
        assert!(vel.x.abs() < LAUNCH_DRIFT);
    }

    #[test]
    fn test_spawn_emits_throw_cue() {
        let mut state = GameState::new(5, Variant::LaneArc);
        state.reset();
        spawn_ball(&mut state);
        assert_eq!(state.take_events(), vec![GameEvent::BallThrown]);
    }
}
