//! Axis-aligned collision tests
//!
//! The ball is a circle but is tested as its bounding square against each
//! rectangle (the rectangle inflated by the ball radius).

use glam::Vec2;

/// Axis-aligned rectangle, `min` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }
}

/// Check if a ball at `pos` overlaps `rect` (strict overlap, touching is a miss)
#[inline]
pub fn ball_rect_collision(pos: Vec2, radius: f32, rect: &Rect) -> bool {
    let max = rect.max();
    pos.x + radius > rect.min.x
        && pos.x - radius < max.x
        && pos.y + radius > rect.min.y
        && pos.y - radius < max.y
}

/// Where along the paddle the ball hit: 0 = centre, -1/+1 = edges (clamped)
pub fn paddle_hit_offset(ball_x: f32, paddle: &Rect) -> f32 {
    let half = paddle.size.x / 2.0;
    ((ball_x - paddle.center().x) / half).clamp(-1.0, 1.0)
}
