//! Per-frame session update
//!
//! `tick` is the whole game: movement, spawning, flight advancement, and
//! catch/drop resolution, composed from the variant's trajectory and catch
//! models. The caller supplies the per-frame delta in frame units (multiples
//! of the nominal 16 ms frame); `tick` bounds it itself, so a stalled tab
//! cannot let balls skip through the catch window.

use super::spawn::spawn_ball;
use super::state::{GameEvent, GamePhase, GameState, Mood, Variant};
use crate::consts::*;
use crate::lane_x;

/// Input commands for a single tick
///
/// In the lane variant `move_left`/`move_right` are one-shot lane shifts and
/// the host clears them after the tick; in the free-fall variant they are
/// held walking directions. `target_lane` comes from pointer/touch input.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Jump straight to a lane (clamped to the lane range)
    pub target_lane: Option<usize>,
    /// Begin or restart the session
    pub begin: bool,
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        // Start and GameOver are idle; begin is the only signal honored,
        // and it is the same transition from either phase.
        if input.begin {
            state.reset();
        }
        return;
    }

    let dt = if dt > 0.0 { dt.min(MAX_TICK_DELTA) } else { 1.0 };

    move_juggler(state, input, dt);

    state.throw_timer_ms += dt * FRAME_MS;
    if (state.balls.len() as u32) < state.difficulty.target_balls
        && state.throw_timer_ms > THROW_INTERVAL_MS
    {
        spawn_ball(state);
        state.throw_timer_ms = 0.0;
    }

    let trajectory = state.variant.trajectory();
    for ball in &mut state.balls {
        trajectory.advance(&state.world, &mut ball.flight, dt);
    }

    resolve_arrivals(state);
}

/// Apply buffered movement input, clamped to the lane range or world bounds
fn move_juggler(state: &mut GameState, input: &TickInput, dt: f32) {
    let juggler = &mut state.juggler;
    match state.variant {
        Variant::LaneArc => {
            if let Some(lane) = input.target_lane {
                juggler.lane = lane.min(LANE_COUNT - 1);
            }
            if input.move_left {
                juggler.lane = juggler.lane.saturating_sub(1);
            }
            if input.move_right {
                juggler.lane = (juggler.lane + 1).min(LANE_COUNT - 1);
            }
            juggler.x = lane_x(juggler.lane);
        }
        Variant::FreeFall => {
            let mut dir = 0.0;
            if input.move_left {
                dir -= 1.0;
            }
            if input.move_right {
                dir += 1.0;
            }
            if dir != 0.0 {
                juggler.facing = dir;
                juggler.x = (juggler.x + dir * JUGGLER_WALK_SPEED * dt)
                    .clamp(JUGGLER_WIDTH / 2.0, state.world.width - JUGGLER_WIDTH / 2.0);
            }
        }
    }
}

/// Resolve balls that reached their destination this tick.
///
/// Arrivals resolve in spawn order (the vec is pushed at spawn and recycled
/// in place, so vec order is spawn order). The first drop ends the session
/// at once; later arrivals in the same tick are abandoned, and the remaining
/// balls are left untouched for the renderer to show frozen mid-flight.
fn resolve_arrivals(state: &mut GameState) {
    let trajectory = state.variant.trajectory();
    let resolver = state.variant.catch_resolver();

    let mut idx = 0;
    while idx < state.balls.len() {
        if !trajectory.arrived(&state.world, &state.balls[idx].flight) {
            idx += 1;
            continue;
        }

        if !resolver.caught(&state.world, &state.juggler, &state.balls[idx]) {
            state.juggler.mood = Mood::Sad;
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::Dropped);
            return;
        }

        if state.difficulty.record_catch() {
            state.events.push(GameEvent::LevelUp);
        }
        state.events.push(GameEvent::Caught);

        match resolver.rethrow(&state.world, &state.balls[idx], &mut state.rng) {
            Some(flight) => {
                state.balls[idx].flight = flight;
                idx += 1;
            }
            None => {
                state.balls.remove(idx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lane_for_x;
    use crate::sim::state::{Ball, Flight};
    use glam::Vec2;
    use proptest::prelude::*;

    fn playing(seed: u64, variant: Variant) -> GameState {
        let mut state = GameState::new(seed, variant);
        state.reset();
        state
    }

    fn arc_ball(state: &mut GameState, to_lane: usize, t: f32) {
        let id = state.next_ball_id();
        state.balls.push(Ball {
            id,
            color: 0,
            flight: Flight::Arc {
                from_lane: 0,
                to_lane,
                t,
                duration_ms: 2000.0,
            },
        });
    }

    fn destination(state: &GameState) -> Option<usize> {
        state.balls.first().and_then(|b| match b.flight {
            Flight::Arc { to_lane, .. } => Some(to_lane),
            _ => None,
        })
    }

    #[test]
    fn test_begin_starts_session() {
        let mut state = GameState::new(1, Variant::LaneArc);
        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.phase, GamePhase::Start);

        let begin = TickInput {
            begin: true,
            ..Default::default()
        };
        tick(&mut state, &begin, 1.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_game_over_tick_is_noop() {
        let mut state = playing(1, Variant::LaneArc);
        arc_ball(&mut state, 0, 0.5);
        state.phase = GamePhase::GameOver;
        state.juggler.mood = Mood::Sad;

        let before_balls = state.balls.clone();
        let before_juggler = state.juggler.clone();
        let before_difficulty = state.difficulty.clone();
        let input = TickInput {
            move_left: true,
            target_lane: Some(0),
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &input, 2.0);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.balls, before_balls);
        assert_eq!(state.juggler, before_juggler);
        assert_eq!(state.difficulty, before_difficulty);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_spawn_after_throw_interval() {
        let mut state = playing(1, Variant::LaneArc);
        // 156 ticks at 32 ms stay under the 5000 ms interval
        for _ in 0..156 {
            tick(&mut state, &TickInput::default(), 2.0);
            assert!(state.balls.is_empty());
        }
        tick(&mut state, &TickInput::default(), 2.0);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.throw_timer_ms, 0.0);
        assert_eq!(state.take_events(), vec![GameEvent::BallThrown]);
    }

    #[test]
    fn test_spawner_respects_target_count() {
        let mut state = playing(1, Variant::LaneArc);
        arc_ball(&mut state, CENTER_LANE, 0.0);
        // One ball active at target 1: the timer may run over, no spawn
        state.throw_timer_ms = THROW_INTERVAL_MS + 1.0;
        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.balls.len(), 1);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_two_catches_raise_target() {
        let mut state = playing(42, Variant::LaneArc);
        let mut caught = 0;
        let mut ticks = 0;
        while caught < 2 {
            // Hold the correct lane on every arrival
            let input = TickInput {
                target_lane: destination(&state),
                ..Default::default()
            };
            tick(&mut state, &input, 2.0);
            caught += state
                .take_events()
                .iter()
                .filter(|e| **e == GameEvent::Caught)
                .count();
            assert_eq!(state.phase, GamePhase::Playing);
            ticks += 1;
            assert!(ticks < 10_000, "session made no progress");
        }
        assert_eq!(state.difficulty.target_balls, 2);
        assert_eq!(state.difficulty.catch_streak, 0);
    }

    #[test]
    fn test_drop_ends_session_immediately() {
        let mut state = playing(1, Variant::LaneArc);
        state.juggler.lane = CENTER_LANE;
        // First arrival is in the wrong lane, the second would be caught
        arc_ball(&mut state, 0, 1.0);
        arc_ball(&mut state, CENTER_LANE, 1.0);

        tick(&mut state, &TickInput::default(), 0.5);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.juggler.mood, Mood::Sad);
        // The drop is fatal before the second arrival is looked at
        assert_eq!(state.take_events(), vec![GameEvent::Dropped]);
        assert_eq!(state.balls.len(), 2);
        assert_eq!(state.difficulty.catch_streak, 0);
        let Flight::Arc { t, .. } = state.balls[1].flight else {
            unreachable!()
        };
        assert!(t >= 1.0, "abandoned ball was recycled");
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = playing(1, Variant::LaneArc);
        arc_ball(&mut state, 0, 1.0);
        state.juggler.lane = CENTER_LANE;
        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.phase, GamePhase::GameOver);

        let begin = TickInput {
            begin: true,
            ..Default::default()
        };
        tick(&mut state, &begin, 1.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.balls.is_empty());
        assert_eq!(state.difficulty.target_balls, 1);
        assert_eq!(state.difficulty.catch_streak, 0);
        assert_eq!(state.juggler.mood, Mood::Happy);
    }

    #[test]
    fn test_recycling_keeps_ball_count() {
        let mut state = playing(9, Variant::LaneArc);
        state.juggler.lane = CENTER_LANE;
        for _ in 0..3 {
            arc_ball(&mut state, CENTER_LANE, 0.995);
        }
        let ids: Vec<u32> = state.balls.iter().map(|b| b.id).collect();

        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.balls.len(), 3);
        // Same balls by identity, each on a fresh flight
        assert_eq!(state.balls.iter().map(|b| b.id).collect::<Vec<_>>(), ids);
        for ball in &state.balls {
            let Flight::Arc { t, from_lane, .. } = ball.flight else {
                unreachable!()
            };
            assert_eq!(t, 0.0);
            assert_eq!(from_lane, CENTER_LANE);
        }
    }

    #[test]
    fn test_stall_is_clamped_to_max_delta() {
        let mut state = playing(1, Variant::LaneArc);
        arc_ball(&mut state, CENTER_LANE, 0.0);
        // A 10 second stall: 625 nominal frames' worth of delta
        tick(&mut state, &TickInput::default(), 625.0);
        let Flight::Arc { t, .. } = state.balls[0].flight else {
            unreachable!()
        };
        let expected = MAX_TICK_DELTA * FRAME_MS / 2000.0;
        assert!((t - expected).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_delta_uses_nominal_frame() {
        for bad_dt in [0.0, -5.0] {
            let mut state = playing(1, Variant::LaneArc);
            arc_ball(&mut state, CENTER_LANE, 0.0);
            tick(&mut state, &TickInput::default(), bad_dt);
            let Flight::Arc { t, .. } = state.balls[0].flight else {
                unreachable!()
            };
            assert!((t - FRAME_MS / 2000.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_lane_shifts_clamp_to_range() {
        let mut state = playing(1, Variant::LaneArc);
        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        tick(&mut state, &left, 1.0);
        assert_eq!(state.juggler.lane, 0);
        tick(&mut state, &left, 1.0);
        assert_eq!(state.juggler.lane, 0);

        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        for _ in 0..4 {
            tick(&mut state, &right, 1.0);
        }
        assert_eq!(state.juggler.lane, LANE_COUNT - 1);
        assert_eq!(state.juggler.x, lane_x(LANE_COUNT - 1));

        // Out-of-range pointer lanes clamp rather than reject
        let pointer = TickInput {
            target_lane: Some(99),
            ..Default::default()
        };
        tick(&mut state, &pointer, 1.0);
        assert_eq!(state.juggler.lane, LANE_COUNT - 1);
    }

    #[test]
    fn test_pointer_lane_mapping() {
        assert_eq!(lane_for_x(0.0), 0);
        assert_eq!(lane_for_x(106.0), 0);
        assert_eq!(lane_for_x(107.0), 1);
        assert_eq!(lane_for_x(160.0), 1);
        assert_eq!(lane_for_x(214.0), 2);
        assert_eq!(lane_for_x(WORLD_WIDTH), 2);
        assert_eq!(lane_for_x(-10.0), 0);
        assert_eq!(lane_for_x(10_000.0), 2);
    }

    #[test]
    fn test_free_fall_walk_clamps_to_world() {
        let mut state = playing(1, Variant::FreeFall);
        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &left, 2.0);
        }
        assert_eq!(state.juggler.x, JUGGLER_WIDTH / 2.0);
        assert_eq!(state.juggler.facing, -1.0);

        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        tick(&mut state, &right, 1.0);
        assert_eq!(state.juggler.facing, 1.0);
        assert!(state.juggler.x > JUGGLER_WIDTH / 2.0);
    }

    #[test]
    fn test_free_fall_catch_retires_ball() {
        let mut state = playing(1, Variant::FreeFall);
        let id = state.next_ball_id();
        state.balls.push(Ball {
            id,
            color: 0,
            flight: Flight::Ballistic {
                pos: Vec2::new(state.juggler.x + 2.0, state.world.ground_y + 0.5),
                vel: Vec2::new(0.0, 1.0),
            },
        });
        tick(&mut state, &TickInput::default(), 0.25);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.balls.is_empty());
        let events = state.take_events();
        assert!(events.contains(&GameEvent::Caught));
    }

    #[test]
    fn test_free_fall_miss_ends_session() {
        let mut state = playing(1, Variant::FreeFall);
        let id = state.next_ball_id();
        state.balls.push(Ball {
            id,
            color: 0,
            flight: Flight::Ballistic {
                pos: Vec2::new(state.juggler.x + JUGGLER_WIDTH * 3.0, state.world.ground_y + 0.5),
                vel: Vec2::new(0.0, 1.0),
            },
        });
        tick(&mut state, &TickInput::default(), 0.25);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.juggler.mood, Mood::Sad);
        assert_eq!(state.balls.len(), 1);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and input script stay identical
        let mut a = playing(99_999, Variant::LaneArc);
        let mut b = playing(99_999, Variant::LaneArc);
        for step in 0..2_000u32 {
            let input = TickInput {
                move_left: step % 11 == 0,
                move_right: step % 7 == 0,
                target_lane: (step % 200 == 0).then_some(1),
                begin: false,
            };
            tick(&mut a, &input, 1.0 + (step % 3) as f32 * 0.5);
            tick(&mut b, &input, 1.0 + (step % 3) as f32 * 0.5);
        }
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.balls, b.balls);
        assert_eq!(a.juggler, b.juggler);
        assert_eq!(a.difficulty, b.difficulty);
    }

    proptest! {
        #[test]
        fn streak_invariant_holds(
            seed in any::<u64>(),
            free_fall in any::<bool>(),
            steps in prop::collection::vec((0u8..5, 0.0f32..700.0), 1..300),
        ) {
            let variant = if free_fall { Variant::FreeFall } else { Variant::LaneArc };
            let mut state = GameState::new(seed, variant);
            state.reset();
            let mut last_target = state.difficulty.target_balls;
            for (cmd, dt) in steps {
                let input = TickInput {
                    move_left: cmd == 1,
                    move_right: cmd == 2,
                    target_lane: (cmd == 3).then_some(0),
                    begin: cmd == 4,
                };
                tick(&mut state, &input, dt);
                state.take_events();
                if state.phase == GamePhase::Playing {
                    prop_assert!(state.difficulty.catch_streak < 2 * state.difficulty.target_balls);
                }
                // The target only moves down through an explicit restart
                if state.difficulty.target_balls < last_target {
                    prop_assert!(cmd == 4);
                    prop_assert_eq!(state.difficulty.target_balls, 1);
                }
                last_target = state.difficulty.target_balls;
            }
        }
    }
}
