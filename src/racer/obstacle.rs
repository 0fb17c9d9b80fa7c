//! Obstacle kinds and their collision rules
//!
//! Each obstacle judges itself against a read-only [`PlayerSnapshot`]. The
//! checks are pure; the caller decides what a [`Contact`] does to the run.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::player::PlayerSnapshot;

/// Obstacles past this z are behind the ship and get cleaned up
pub const PASS_Z: f32 = 3.0;

const SIMPLE_BAR_HALF_X: f32 = 2.0;
const SIMPLE_BAR_HALF_Z: f32 = 1.2;
/// Ship must be above this to clear a simple bar
const SIMPLE_BAR_CLEAR_Y: f32 = 1.8;

const CYLINDER_RADIUS: f32 = 1.2;

const WALL_HALF_Z: f32 = 1.5;
const WALL_GAP_COUNT: u32 = 8;
const WALL_GAP_SPACING: f32 = 1.5;
pub const EASY_WALL_GAP_WIDTH: f32 = 6.0;
pub const LOW_BAR_GAP_WIDTH: f32 = 3.0;
/// Top gaps need the ship above this
const GAP_TOP_MIN_Y: f32 = 2.2;
/// Bottom gaps need the ship below this
const GAP_BOTTOM_MAX_Y: f32 = 1.5;

const HIGH_BAR_HALF_X: f32 = 4.0;
const HIGH_BAR_HALF_Z: f32 = 1.5;
const HIGH_BAR_MAX_Y: f32 = 2.0;

/// The z band in which an arch is judged, once
const ARCH_CHECK_Z: (f32, f32) = (0.0, 2.0);
/// Ring radius minus its thickness
const ARCH_PASS_RADIUS: f32 = 2.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    /// Small block: jump over or dodge
    SimpleBar,
    /// Pillar: dodge
    Cylinder,
    /// Wall with a wide gap
    EasyWall,
    /// Wall with a narrow gap
    LowBar,
    /// Overhead bar: stay low
    HighBar,
    /// Gate ring to fly through
    Arch,
}

impl ObstacleKind {
    pub fn is_wall(self) -> bool {
        matches!(self, ObstacleKind::EasyWall | ObstacleKind::LowBar)
    }
}

/// Opening in a wall, derived from the wall's gap index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallGap {
    pub index: u32,
    pub center_x: f32,
    pub width: f32,
    /// Gap at the top (jump through) rather than at the bottom (drive through)
    pub on_top: bool,
}

impl WallGap {
    pub fn new(index: u32, width: f32) -> Self {
        let index = index % WALL_GAP_COUNT;
        Self {
            index,
            center_x: (index as f32 - 4.0) * WALL_GAP_SPACING,
            width,
            on_top: index >= WALL_GAP_COUNT / 2,
        }
    }

    fn contains_x(&self, x: f32) -> bool {
        (x - self.center_x).abs() < self.width / 2.0
    }

    /// The ship fits through only at the right height and inside the gap
    fn admits(&self, pos: Vec3) -> bool {
        let height_ok = if self.on_top {
            pos.y > GAP_TOP_MIN_Y
        } else {
            pos.y < GAP_BOTTOM_MAX_Y
        };
        height_ok && self.contains_x(pos.x)
    }
}

/// Outcome of checking one obstacle against the ship this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    None,
    Collision,
    GatePassed,
    GateMissed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u64,
    pub kind: ObstacleKind,
    pub pos: Vec3,
    /// Present for walls only
    pub gap: Option<WallGap>,
    /// Arch already judged
    pub gate_checked: bool,
}

impl Obstacle {
    pub fn new(id: u64, kind: ObstacleKind, pos: Vec3) -> Self {
        Self {
            id,
            kind,
            pos,
            gap: None,
            gate_checked: false,
        }
    }

    /// Wall across the whole lane with its opening at `gap_index`
    pub fn wall(id: u64, kind: ObstacleKind, gap_index: u32, z: f32) -> Self {
        let width = match kind {
            ObstacleKind::LowBar => LOW_BAR_GAP_WIDTH,
            _ => EASY_WALL_GAP_WIDTH,
        };
        Self {
            gap: Some(WallGap::new(gap_index, width)),
            ..Self::new(id, kind, Vec3::new(0.0, 0.0, z))
        }
    }

    pub fn advance(&mut self, dz: f32) {
        self.pos.z += dz;
    }

    /// Behind the ship and ready to be removed
    pub fn is_past(&self) -> bool {
        self.pos.z > PASS_Z
    }

    /// Judge this obstacle against the ship
    pub fn contact(&self, player: &PlayerSnapshot) -> Contact {
        let p = player.pos;
        let dx = (self.pos.x - p.x).abs();
        let dz = (self.pos.z - p.z).abs();

        let hit = match self.kind {
            ObstacleKind::SimpleBar => {
                dx < SIMPLE_BAR_HALF_X && dz < SIMPLE_BAR_HALF_Z && p.y <= SIMPLE_BAR_CLEAR_Y
            }
            ObstacleKind::Cylinder => {
                Vec2::new(self.pos.x, self.pos.z).distance(Vec2::new(p.x, p.z)) < CYLINDER_RADIUS
            }
            ObstacleKind::EasyWall | ObstacleKind::LowBar => {
                dz < WALL_HALF_Z && !self.gap.is_some_and(|gap| gap.admits(p))
            }
            ObstacleKind::HighBar => {
                dx < HIGH_BAR_HALF_X && dz < HIGH_BAR_HALF_Z && p.y >= HIGH_BAR_MAX_Y
            }
            ObstacleKind::Arch => return self.gate_contact(p),
        };

        if hit { Contact::Collision } else { Contact::None }
    }

    fn gate_contact(&self, p: Vec3) -> Contact {
        let (near, far) = ARCH_CHECK_Z;
        if self.gate_checked || self.pos.z <= near || self.pos.z >= far {
            return Contact::None;
        }

        let offset = Vec2::new(p.x - self.pos.x, p.y - self.pos.y);
        if offset.length() < ARCH_PASS_RADIUS {
            Contact::GatePassed
        } else {
            Contact::GateMissed
        }
    }
}
