//! Ship movement

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::approach;

/// Top horizontal speed (units/s)
pub const MOVE_SPEED: f32 = 14.0;
/// Half-width of the lane the ship is clamped to
pub const MAX_X: f32 = 8.5;
/// Horizontal velocity smoothing rate
pub const ACCEL: f32 = 10.0;
pub const JUMP_FORCE: f32 = 12.0;
pub const GRAVITY: f32 = 30.0;
pub const GROUND_Y: f32 = 0.5;

/// Roll at full sideways speed (radians)
pub const TILT_AMOUNT: f32 = 0.4;
pub const TILT_RATE: f32 = 8.0;
/// Nose-down pitch while airborne (radians)
pub const JUMP_PITCH: f32 = -0.15;
pub const PITCH_RATE: f32 = 5.0;

/// Where the ship is this frame, handed to every obstacle check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub pos: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    /// Horizontal velocity
    pub vx: f32,
    /// Vertical velocity, only meaningful while airborne
    pub vy: f32,
    pub airborne: bool,
    /// Roll, cosmetic
    pub tilt: f32,
    /// Pitch, cosmetic
    pub pitch: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec3::new(0.0, GROUND_Y, 0.0),
            vx: 0.0,
            vy: 0.0,
            airborne: false,
            tilt: 0.0,
            pitch: 0.0,
        }
    }
}

impl Player {
    /// Target horizontal velocity for the held keys, right wins over left
    pub fn steer_target(left: bool, right: bool) -> f32 {
        if right {
            MOVE_SPEED
        } else if left {
            -MOVE_SPEED
        } else {
            0.0
        }
    }

    /// Integrate one frame of movement
    pub fn update(&mut self, target_vx: f32, jump: bool, dt: f32) {
        if jump && !self.airborne {
            self.airborne = true;
            self.vy = JUMP_FORCE;
        }

        if self.airborne {
            self.vy -= GRAVITY * dt;
            self.pos.y += self.vy * dt;
            if self.pos.y <= GROUND_Y {
                self.pos.y = GROUND_Y;
                self.airborne = false;
                self.vy = 0.0;
            }
        }

        self.vx = approach(self.vx, target_vx, ACCEL, dt);
        self.pos.x = (self.pos.x + self.vx * dt).clamp(-MAX_X, MAX_X);

        let target_tilt = -(self.vx / MOVE_SPEED) * TILT_AMOUNT;
        self.tilt = approach(self.tilt, target_tilt, TILT_RATE, dt);
        let target_pitch = if self.airborne { JUMP_PITCH } else { 0.0 };
        self.pitch = approach(self.pitch, target_pitch, PITCH_RATE, dt);
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot { pos: self.pos }
    }
}
