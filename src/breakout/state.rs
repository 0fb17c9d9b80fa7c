//! Breakout state and arena constants

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::timers::TransientFlags;

pub const BRICK_COLS: u32 = 10;
pub const BRICK_ROWS: u32 = 6;
pub const BRICK_W: f32 = 52.0;
pub const BRICK_H: f32 = 22.0;
/// Gutter between bricks and around the grid
pub const BRICK_GAP: f32 = 4.0;

pub const PADDLE_W: f32 = 80.0;
pub const PADDLE_H: f32 = 14.0;
/// Pixels the paddle moves per arrow key press
pub const PADDLE_KEY_STEP: f32 = 24.0;

pub const ARENA_W: f32 = BRICK_COLS as f32 * BRICK_W + (BRICK_COLS + 1) as f32 * BRICK_GAP;
pub const ARENA_H: f32 = 320.0;
pub const PADDLE_Y: f32 = ARENA_H - 40.0;

pub const BALL_RADIUS: f32 = 8.0;
/// Ball speed (pixels/s): 4 px per frame at 60 Hz
pub const BALL_SPEED: f32 = 4.0 * 60.0;
/// Horizontal share of the launch velocity
pub const LAUNCH_ANGLE_X: f32 = 0.7;
/// Max horizontal speed after a paddle hit, relative to BALL_SPEED
pub const PADDLE_AIM_FACTOR: f32 = 0.9;

pub const POINTS_PER_BRICK: u32 = 10;
/// How long the "+10" pulse stays up
pub const SCORE_PULSE_SECS: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakoutPhase {
    /// Waiting for Space
    Idle,
    Playing,
    Won,
    Lost,
}

impl BreakoutPhase {
    pub fn is_finished(&self) -> bool {
        matches!(self, BreakoutPhase::Won | BreakoutPhase::Lost)
    }
}

/// Things the host may want to react to (sound, overlays)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BreakoutEvent {
    Launched,
    WallBounce,
    PaddleHit { offset: f32 },
    BrickBroken { id: u32, points: u32 },
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakoutFlag {
    ScorePulse,
}

/// A brick, positioned by its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

impl Brick {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BRICK_W, BRICK_H)
    }

    /// Grid row, used by the host for colouring
    pub fn row(&self) -> u32 {
        ((self.y - BRICK_GAP) / (BRICK_H + BRICK_GAP)).round() as u32
    }
}

/// The full brick grid in id order
pub fn create_bricks() -> Vec<Brick> {
    (0..BRICK_ROWS)
        .flat_map(|row| (0..BRICK_COLS).map(move |col| (row, col)))
        .map(|(row, col)| Brick {
            id: row * BRICK_COLS + col,
            x: BRICK_GAP + col as f32 * (BRICK_W + BRICK_GAP),
            y: BRICK_GAP + row as f32 * (BRICK_H + BRICK_GAP),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Centre position
    pub pos: Vec2,
    /// Velocity in pixels/s
    pub vel: Vec2,
}

impl Ball {
    /// Resting above the paddle, aimed up and to the right
    pub fn serve() -> Self {
        Self {
            pos: Vec2::new(ARENA_W / 2.0 - BALL_RADIUS, PADDLE_Y - BALL_RADIUS * 2.0),
            vel: Vec2::new(BALL_SPEED * LAUNCH_ANGLE_X, -BALL_SPEED),
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: (ARENA_W - PADDLE_W) / 2.0,
        }
    }
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, PADDLE_Y, PADDLE_W, PADDLE_H)
    }

    /// Centre the paddle under a pointer x (arena coordinates)
    pub fn follow_pointer(&mut self, pointer_x: f32) {
        self.set_x(pointer_x - PADDLE_W / 2.0);
    }

    /// Move by whole key steps (negative = left)
    pub fn nudge(&mut self, steps: i32) {
        self.set_x(self.x + steps as f32 * PADDLE_KEY_STEP);
    }

    fn set_x(&mut self, x: f32) {
        self.x = x.clamp(0.0, ARENA_W - PADDLE_W);
    }
}

/// Complete breakout state
#[derive(Debug, Clone)]
pub struct BreakoutState {
    pub phase: BreakoutPhase,
    /// Remaining bricks in id order (only ever shrinks)
    pub bricks: Vec<Brick>,
    pub ball: Ball,
    pub paddle: Paddle,
    pub score: u32,
    /// Seconds since creation or reset
    pub clock: f32,
    pub flags: TransientFlags<BreakoutFlag>,
    /// Events since the host last drained them
    pub events: Vec<BreakoutEvent>,
}

impl Default for BreakoutState {
    fn default() -> Self {
        Self::new()
    }
}

impl BreakoutState {
    pub fn new() -> Self {
        Self {
            phase: BreakoutPhase::Idle,
            bricks: create_bricks(),
            ball: Ball::serve(),
            paddle: Paddle::default(),
            score: 0,
            clock: 0.0,
            flags: TransientFlags::new(),
            events: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
        log::info!("Breakout reset");
    }

    pub fn show_score_pulse(&self) -> bool {
        self.flags.is_active(BreakoutFlag::ScorePulse)
    }

    pub fn drain_events(&mut self) -> Vec<BreakoutEvent> {
        std::mem::take(&mut self.events)
    }
}
