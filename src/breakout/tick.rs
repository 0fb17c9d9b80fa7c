//! Breakout step function

use super::collision::{ball_rect_collision, paddle_hit_offset};
use super::state::{
    ARENA_H, ARENA_W, BALL_RADIUS, BALL_SPEED, BreakoutEvent, BreakoutFlag, BreakoutPhase,
    BreakoutState, PADDLE_AIM_FACTOR, POINTS_PER_BRICK, SCORE_PULSE_SECS,
};
use crate::driver::Simulation;

/// Input sampled for one frame
#[derive(Debug, Clone, Default)]
pub struct BreakoutInput {
    /// Pointer x in arena coordinates, if the pointer moved
    pub pointer_x: Option<f32>,
    /// Arrow key steps since the last frame (negative = left)
    pub key_steps: i32,
    /// Space pressed
    pub launch: bool,
    pub restart: bool,
}

/// Advance the game by `dt` seconds
pub fn tick(state: &mut BreakoutState, input: &BreakoutInput, dt: f32) {
    if input.restart {
        state.reset();
        return;
    }

    state.clock += dt;
    state.flags.expire(state.clock);

    if let Some(x) = input.pointer_x {
        state.paddle.follow_pointer(x);
    }
    if input.key_steps != 0 && !state.phase.is_finished() {
        state.paddle.nudge(input.key_steps);
    }

    if input.launch && state.phase == BreakoutPhase::Idle {
        state.phase = BreakoutPhase::Playing;
        state.events.push(BreakoutEvent::Launched);
        log::debug!("Breakout launched");
    }

    if state.phase == BreakoutPhase::Playing {
        step_ball(state, dt);
    }
}

/// Move the ball and resolve wall, paddle and brick contacts
fn step_ball(state: &mut BreakoutState, dt: f32) {
    let ball = &mut state.ball;
    let old_vel = ball.vel;
    ball.pos += ball.vel * dt;

    // Walls force the sign so a ball caught past the edge cannot jitter
    if ball.pos.x - BALL_RADIUS <= 0.0 {
        ball.vel.x = old_vel.x.abs();
        state.events.push(BreakoutEvent::WallBounce);
    } else if ball.pos.x + BALL_RADIUS >= ARENA_W {
        ball.vel.x = -old_vel.x.abs();
        state.events.push(BreakoutEvent::WallBounce);
    }
    if ball.pos.y - BALL_RADIUS <= 0.0 {
        ball.vel.y = old_vel.y.abs();
        state.events.push(BreakoutEvent::WallBounce);
    }

    let paddle = state.paddle.rect();
    if ball_rect_collision(ball.pos, BALL_RADIUS, &paddle) {
        let offset = paddle_hit_offset(ball.pos.x, &paddle);
        ball.vel.y = -old_vel.y.abs();
        ball.vel.x = BALL_SPEED * PADDLE_AIM_FACTOR * offset;
        state.events.push(BreakoutEvent::PaddleHit { offset });
    }

    let pos = ball.pos;
    if let Some(index) = state
        .bricks
        .iter()
        .position(|brick| ball_rect_collision(pos, BALL_RADIUS, &brick.rect()))
    {
        let brick = state.bricks.remove(index);
        state.ball.vel.y = -old_vel.y;
        state.score += POINTS_PER_BRICK;
        state
            .flags
            .trigger(BreakoutFlag::ScorePulse, state.clock, SCORE_PULSE_SECS);
        state.events.push(BreakoutEvent::BrickBroken {
            id: brick.id,
            points: POINTS_PER_BRICK,
        });
    }

    // Clearing the last brick wins even if the ball is also falling out
    if state.bricks.is_empty() {
        state.phase = BreakoutPhase::Won;
        state.events.push(BreakoutEvent::Won);
        log::info!("Breakout won - score {}", state.score);
    } else if state.ball.pos.y + BALL_RADIUS > ARENA_H {
        state.phase = BreakoutPhase::Lost;
        state.events.push(BreakoutEvent::Lost);
        log::info!(
            "Breakout lost - score {}, {} bricks left",
            state.score,
            state.bricks.len()
        );
    }
}

impl Simulation for BreakoutState {
    type Input = BreakoutInput;

    fn tick(&mut self, input: &BreakoutInput, dt: f32) {
        tick(self, input, dt);
    }

    fn clear_one_shot(input: &mut BreakoutInput) {
        input.pointer_x = None;
        input.key_steps = 0;
        input.launch = false;
        input.restart = false;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::breakout::state::{
        BRICK_COLS, BRICK_ROWS, Brick, PADDLE_KEY_STEP, PADDLE_W, PADDLE_Y,
    };
    use crate::consts::SIM_DT;
    use crate::driver::FrameLoop;

    fn playing_state() -> BreakoutState {
        let mut state = BreakoutState::new();
        tick(
            &mut state,
            &BreakoutInput {
                launch: true,
                ..Default::default()
            },
            0.0,
        );
        state
    }

    #[test]
    fn test_initial_layout() {
        let state = BreakoutState::new();
        assert_eq!(state.phase, BreakoutPhase::Idle);
        assert_eq!(state.bricks.len(), (BRICK_COLS * BRICK_ROWS) as usize);
        assert_eq!(ARENA_W, 564.0);
        assert_eq!(state.bricks[0].x, 4.0);
        assert_eq!(state.bricks[11].x, 60.0);
        assert_eq!(state.bricks[11].y, 30.0);
        assert_eq!(state.bricks[11].row(), 1);
        assert_eq!(state.paddle.x, (ARENA_W - PADDLE_W) / 2.0);
        assert!((state.ball.vel - Vec2::new(168.0, -240.0)).length() < 1e-3);
    }

    #[test]
    fn test_ball_waits_for_launch() {
        let mut state = BreakoutState::new();
        let start = state.ball.pos;
        tick(&mut state, &BreakoutInput::default(), SIM_DT);
        assert_eq!(state.ball.pos, start);

        tick(
            &mut state,
            &BreakoutInput {
                launch: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(state.phase, BreakoutPhase::Playing);
        assert_eq!(state.drain_events()[0], BreakoutEvent::Launched);
        assert_ne!(state.ball.pos, start);
    }

    #[test]
    fn test_paddle_clamped_to_arena() {
        let mut state = BreakoutState::new();
        let input = BreakoutInput {
            pointer_x: Some(-500.0),
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        assert_eq!(state.paddle.x, 0.0);

        let input = BreakoutInput {
            pointer_x: Some(10_000.0),
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        assert_eq!(state.paddle.x, ARENA_W - PADDLE_W);

        let input = BreakoutInput {
            key_steps: -1,
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        assert_eq!(state.paddle.x, ARENA_W - PADDLE_W - PADDLE_KEY_STEP);
    }

    #[test]
    fn test_keys_ignored_after_finish() {
        let mut state = playing_state();
        state.phase = BreakoutPhase::Lost;
        let before = state.paddle.x;
        let input = BreakoutInput {
            key_steps: 1,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.paddle.x, before);
    }

    #[test]
    fn test_left_wall_reflects() {
        let mut state = playing_state();
        state.bricks.truncate(1);
        state.ball.pos = Vec2::new(BALL_RADIUS + 1.0, 200.0);
        state.ball.vel = Vec2::new(-240.0, -240.0);
        tick(&mut state, &BreakoutInput::default(), SIM_DT);
        assert!(state.ball.vel.x > 0.0);
        assert!(state.ball.vel.y < 0.0);
    }

    #[test]
    fn test_top_wall_reflects() {
        let mut state = playing_state();
        state.bricks.clear();
        state.bricks.push(Brick {
            id: 99,
            x: 0.0,
            y: 300.0,
        });
        state.ball.pos = Vec2::new(ARENA_W - 20.0, BALL_RADIUS + 1.0);
        state.ball.vel = Vec2::new(0.0, -240.0);
        tick(&mut state, &BreakoutInput::default(), SIM_DT);
        assert_eq!(state.ball.vel.y, 240.0);
    }

    #[test]
    fn test_paddle_aims_return() {
        let mut state = playing_state();
        let paddle_x = state.paddle.x;
        // Ball about to land on the right quarter of the paddle
        state.ball.pos = Vec2::new(paddle_x + 60.0, PADDLE_Y - BALL_RADIUS - 1.0);
        state.ball.vel = Vec2::new(0.0, 240.0);
        tick(&mut state, &BreakoutInput::default(), SIM_DT);

        assert!(state.ball.vel.y < 0.0);
        let expected = BALL_SPEED * PADDLE_AIM_FACTOR * 0.5;
        assert!((state.ball.vel.x - expected).abs() < 1.0);
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, BreakoutEvent::PaddleHit { .. }))
        );
    }

    #[test]
    fn test_brick_hit_scores_and_reflects() {
        let mut state = playing_state();
        let target = state.bricks[BRICK_COLS as usize * 5 + 3];
        let centre = target.rect().center();
        state.ball.pos = Vec2::new(centre.x, centre.y + 11.0 + BALL_RADIUS + 2.0);
        state.ball.vel = Vec2::new(0.0, -240.0);
        tick(&mut state, &BreakoutInput::default(), SIM_DT);

        assert_eq!(state.score, POINTS_PER_BRICK);
        assert_eq!(state.bricks.len(), 59);
        assert!(state.bricks.iter().all(|b| b.id != target.id));
        assert_eq!(state.ball.vel.y, 240.0);
        assert!(state.show_score_pulse());

        // Pulse clears after 0.4 s
        for _ in 0..30 {
            tick(&mut state, &BreakoutInput::default(), SIM_DT);
        }
        assert!(!state.show_score_pulse());
    }

    #[test]
    fn test_first_brick_in_order_wins_tie() {
        let mut state = playing_state();
        // Ball straddling the gutter between bricks 0 and 1
        state.ball.pos = Vec2::new(58.0, 30.0);
        state.ball.vel = Vec2::new(0.0, -240.0);
        tick(&mut state, &BreakoutInput::default(), SIM_DT);
        assert_eq!(state.bricks.len(), 59);
        assert!(state.bricks.iter().all(|b| b.id != 0));
        assert!(state.bricks.iter().any(|b| b.id == 1));
    }

    #[test]
    fn test_lose_below_bottom() {
        let mut state = playing_state();
        state.paddle.x = 0.0;
        state.ball.pos = Vec2::new(400.0, ARENA_H - BALL_RADIUS);
        state.ball.vel = Vec2::new(0.0, 240.0);
        tick(&mut state, &BreakoutInput::default(), SIM_DT);
        assert_eq!(state.phase, BreakoutPhase::Lost);

        // Terminal until restart
        let pos = state.ball.pos;
        tick(&mut state, &BreakoutInput::default(), SIM_DT);
        assert_eq!(state.ball.pos, pos);

        tick(
            &mut state,
            &BreakoutInput {
                restart: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(state.phase, BreakoutPhase::Idle);
        assert_eq!(state.bricks.len(), 60);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_win_checked_before_lose() {
        let mut state = playing_state();
        state.paddle.x = 0.0;
        state.bricks.clear();
        state.bricks.push(Brick {
            id: 7,
            x: 380.0,
            y: ARENA_H - 10.0,
        });
        state.ball.pos = Vec2::new(400.0, ARENA_H - BALL_RADIUS);
        state.ball.vel = Vec2::new(0.0, 240.0);
        tick(&mut state, &BreakoutInput::default(), SIM_DT);
        assert_eq!(state.phase, BreakoutPhase::Won);
        assert_eq!(state.score, POINTS_PER_BRICK);
    }

    #[test]
    fn test_drain_empties_event_queue() {
        let mut game = FrameLoop::new(BreakoutState::new());
        game.input.launch = true;
        for _ in 0..60 * 60 {
            game.input.pointer_x = Some(game.sim.ball.pos.x);
            game.frame(SIM_DT);
        }

        let events = game.sim.drain_events();
        assert_eq!(events.first(), Some(&BreakoutEvent::Launched));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, BreakoutEvent::PaddleHit { .. }))
        );
        assert!(game.sim.events.is_empty());
        assert!(game.sim.drain_events().is_empty());

        // Only what happened since the last drain
        game.input.pointer_x = Some(game.sim.ball.pos.x);
        game.frame(SIM_DT);
        assert!(game.sim.drain_events().len() <= 4);
    }

    proptest! {
        #[test]
        fn test_bricks_shrink_and_speed_bounded(
            pointers in prop::collection::vec(0.0f32..ARENA_W, 1..600)
        ) {
            let mut state = playing_state();
            let max_speed = BALL_SPEED * std::f32::consts::SQRT_2;
            let mut bricks = state.bricks.len();

            for x in pointers {
                let input = BreakoutInput {
                    pointer_x: Some(x),
                    ..Default::default()
                };
                tick(&mut state, &input, SIM_DT);

                prop_assert!(state.bricks.len() <= bricks);
                bricks = state.bricks.len();

                let speed = state.ball.vel.length();
                prop_assert!(speed > 0.0);
                prop_assert!(speed <= max_speed + 1e-3);
                prop_assert!(state.paddle.x >= 0.0);
                prop_assert!(state.paddle.x <= ARENA_W - PADDLE_W);

                if state.phase.is_finished() {
                    break;
                }
            }
        }
    }
}
