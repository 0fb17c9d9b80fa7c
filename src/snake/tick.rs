//! Snake step function

use super::state::{
    MIN_TICK_MS, POINTS_PER_FOOD, SCORE_PULSE_SECS, SPEED_UP_PER_FOOD_MS, SnakeFlag, SnakePhase,
    SnakeState, in_bounds,
};
use super::Direction;
use crate::driver::Simulation;

/// Input sampled for one frame
#[derive(Debug, Clone, Default)]
pub struct SnakeInput {
    /// Arrow key pressed since the last frame
    pub direction: Option<Direction>,
    /// Restart button
    pub restart: bool,
}

/// Advance the game by `dt` seconds of wall time
pub fn tick(state: &mut SnakeState, input: &SnakeInput, dt: f32) {
    if input.restart {
        state.reset();
        return;
    }

    if let Some(dir) = input.direction {
        state.steer(dir);
    }

    state.clock += dt;
    state.flags.expire(state.clock);

    if state.phase != SnakePhase::Running {
        return;
    }

    state.step_accumulator_ms += dt * 1000.0;
    while state.phase == SnakePhase::Running
        && state.step_accumulator_ms >= state.tick_ms as f32
    {
        state.step_accumulator_ms -= state.tick_ms as f32;
        step(state);
    }
}

/// Move the snake one cell in the buffered direction
pub fn step(state: &mut SnakeState) {
    if state.phase != SnakePhase::Running {
        return;
    }

    let dir = state.buffered;
    state.heading = dir;
    let next = state.head() + dir.offset();

    if !in_bounds(next) || state.occupies(next) {
        state.phase = SnakePhase::GameOver;
        log::info!(
            "Snake crashed at ({}, {}) - score {}, length {}",
            next.x,
            next.y,
            state.score,
            state.len()
        );
        return;
    }

    state.body.push_front(next);

    if next == state.food {
        state.score += POINTS_PER_FOOD;
        state.tick_ms = state
            .tick_ms
            .saturating_sub(SPEED_UP_PER_FOOD_MS)
            .max(MIN_TICK_MS);
        state
            .flags
            .trigger(SnakeFlag::ScorePulse, state.clock, SCORE_PULSE_SECS);

        if !state.respawn_food() {
            log::warn!("Snake filled the board - no free cell for food");
            state.phase = SnakePhase::GameOver;
        }
    } else {
        state.body.pop_back();
    }
}

impl Simulation for SnakeState {
    type Input = SnakeInput;

    fn tick(&mut self, input: &SnakeInput, dt: f32) {
        tick(self, input, dt);
    }

    fn clear_one_shot(input: &mut SnakeInput) {
        input.direction = None;
        input.restart = false;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use glam::IVec2;
    use proptest::prelude::*;

    use super::*;
    use crate::snake::{COLS, INITIAL_TICK_MS, ROWS};

    /// Running snake at the centre heading right, food parked in a corner
    fn running_state() -> SnakeState {
        let mut state = SnakeState::new(12345);
        state.food = IVec2::new(0, 0);
        state.steer(Direction::Right);
        state
    }

    #[test]
    fn test_initial_state() {
        let state = SnakeState::new(1);
        assert_eq!(state.phase, SnakePhase::Idle);
        assert_eq!(state.head(), IVec2::new(8, 7));
        assert_eq!(state.len(), 1);
        assert_ne!(state.food, state.head());
        assert_eq!(state.tick_ms, INITIAL_TICK_MS);
    }

    #[test]
    fn test_idle_until_arrow_key() {
        let mut state = SnakeState::new(7);
        tick(&mut state, &SnakeInput::default(), 1.0);
        assert_eq!(state.phase, SnakePhase::Idle);
        assert_eq!(state.head(), SnakeState::start_cell());

        let input = SnakeInput {
            direction: Some(Direction::Up),
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        assert_eq!(state.phase, SnakePhase::Running);
        assert_eq!(state.buffered, Direction::Up);
    }

    #[test]
    fn test_three_ticks_move_right() {
        let mut state = running_state();
        for _ in 0..3 {
            step(&mut state);
        }
        assert_eq!(state.head(), IVec2::new(11, 7));
        assert_eq!(state.len(), 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, SnakePhase::Running);
    }

    #[test]
    fn test_tick_waits_for_interval() {
        let mut state = running_state();
        tick(&mut state, &SnakeInput::default(), 0.1);
        assert_eq!(state.head(), IVec2::new(8, 7));

        // 0.1 + 0.15 = 250ms > 220ms
        tick(&mut state, &SnakeInput::default(), 0.15);
        assert_eq!(state.head(), IVec2::new(9, 7));
    }

    #[test]
    fn test_reversal_rejected() {
        let mut state = running_state();
        state.body = VecDeque::from([IVec2::new(8, 7), IVec2::new(7, 7), IVec2::new(6, 7)]);

        state.steer(Direction::Left);
        assert_eq!(state.buffered, Direction::Right);

        // Up then Down before the step: neither reverses the
        // committed heading, so the latest press wins
        state.steer(Direction::Up);
        state.steer(Direction::Down);
        assert_eq!(state.buffered, Direction::Down);
        step(&mut state);
        assert_eq!(state.head(), IVec2::new(8, 8));
        assert_eq!(state.phase, SnakePhase::Running);

        // Now heading down: Up is the reverse
        state.steer(Direction::Up);
        assert_eq!(state.buffered, Direction::Down);
    }

    #[test]
    fn test_eat_food_grows_and_speeds_up() {
        let mut state = running_state();
        state.food = IVec2::new(9, 7);
        step(&mut state);

        assert_eq!(state.len(), 2);
        assert_eq!(state.score, 10);
        assert_eq!(state.tick_ms, INITIAL_TICK_MS - 12);
        assert!(!state.occupies(state.food));
        assert!(state.show_score_pulse());

        // Pulse clears after half a second
        tick(&mut state, &SnakeInput::default(), 0.1);
        assert!(state.show_score_pulse());
        tick(&mut state, &SnakeInput::default(), 0.45);
        assert!(!state.show_score_pulse());
    }

    #[test]
    fn test_tick_interval_floor() {
        let mut state = running_state();
        state.tick_ms = 70;
        state.food = IVec2::new(9, 7);
        step(&mut state);
        assert_eq!(state.tick_ms, 65);

        state.food = state.head() + IVec2::new(1, 0);
        step(&mut state);
        assert_eq!(state.tick_ms, 65);
    }

    #[test]
    fn test_wall_collision_is_terminal() {
        let mut state = running_state();
        state.body = VecDeque::from([IVec2::new(COLS - 1, 3)]);
        step(&mut state);
        assert_eq!(state.phase, SnakePhase::GameOver);
        // Body untouched by the failed move
        assert_eq!(state.head(), IVec2::new(COLS - 1, 3));

        // Input and time are ignored after game over
        let input = SnakeInput {
            direction: Some(Direction::Down),
            ..Default::default()
        };
        tick(&mut state, &input, 1.0);
        assert_eq!(state.phase, SnakePhase::GameOver);
        assert_eq!(state.head(), IVec2::new(COLS - 1, 3));
    }

    #[test]
    fn test_self_collision() {
        let mut state = running_state();
        // A hook: head at (5,5) moving down into (5,6) which is body
        state.body = VecDeque::from([
            IVec2::new(5, 5),
            IVec2::new(6, 5),
            IVec2::new(6, 6),
            IVec2::new(5, 6),
            IVec2::new(4, 6),
        ]);
        state.heading = Direction::Left;
        state.buffered = Direction::Down;
        step(&mut state);
        assert_eq!(state.phase, SnakePhase::GameOver);
    }

    #[test]
    fn test_restart_returns_to_idle() {
        let mut state = running_state();
        state.food = IVec2::new(9, 7);
        step(&mut state);
        let input = SnakeInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);

        assert_eq!(state.phase, SnakePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.len(), 1);
        assert_eq!(state.tick_ms, INITIAL_TICK_MS);
        assert!(!state.show_score_pulse());
    }

    #[test]
    fn test_determinism() {
        let mut a = SnakeState::new(99999);
        let mut b = SnakeState::new(99999);
        assert_eq!(a.food, b.food);

        let dirs = [Direction::Up, Direction::Left, Direction::Down, Direction::Left];
        for dir in dirs {
            let input = SnakeInput {
                direction: Some(dir),
                ..Default::default()
            };
            tick(&mut a, &input, 0.25);
            tick(&mut b, &input, 0.25);
        }
        assert_eq!(a.body, b.body);
        assert_eq!(a.food, b.food);
    }

    fn dir_strategy() -> impl Strategy<Value = Option<Direction>> {
        prop_oneof![
            Just(None),
            Just(Some(Direction::Up)),
            Just(Some(Direction::Down)),
            Just(Some(Direction::Left)),
            Just(Some(Direction::Right)),
        ]
    }

    proptest! {
        #[test]
        fn prop_snake_invariants(seed in any::<u64>(), inputs in prop::collection::vec(dir_strategy(), 1..300)) {
            let mut state = SnakeState::new(seed);
            state.steer(Direction::Right);
            let mut last_score = 0;

            for dir in inputs {
                if let Some(dir) = dir {
                    state.steer(dir);
                }
                let before = state.head();
                let before_heading = state.heading;
                step(&mut state);

                if state.phase == SnakePhase::GameOver {
                    break;
                }

                // Moved exactly one cell in the committed direction
                let head = state.head();
                prop_assert_eq!(head - before, state.heading.offset());
                prop_assert_ne!(state.heading, before_heading.opposite());

                // No duplicate cells, food never under the body
                for (i, cell) in state.body.iter().enumerate() {
                    prop_assert!(cell.x >= 0 && cell.x < COLS && cell.y >= 0 && cell.y < ROWS);
                    prop_assert!(!state.body.iter().skip(i + 1).any(|other| other == cell));
                }
                prop_assert!(!state.occupies(state.food));

                prop_assert_eq!(state.score % 10, 0);
                prop_assert!(state.score >= last_score);
                last_score = state.score;
            }
        }
    }
}
