//! Breakout
//!
//! Continuous ball physics against a brick grid with a single life. The
//! paddle follows the pointer or steps with the arrow keys.

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, ball_rect_collision, paddle_hit_offset};
pub use state::{
    ARENA_H, ARENA_W, BALL_RADIUS, BALL_SPEED, Ball, Brick, BreakoutEvent, BreakoutFlag,
    BreakoutPhase, BreakoutState, POINTS_PER_BRICK, Paddle,
};
pub use tick::{BreakoutInput, tick};
