//! Obstacle spawning per level
//!
//! Two timers run while a round is live. The main timer emits a batch chosen
//! by the level's [`SpawnMode`]; the gate timer runs half an interval out of
//! phase and drops an arch on every other main spawn. Both restart whenever
//! the level changes.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleKind};

/// Where new obstacles appear, far down the track
pub const SPAWN_Z: f32 = -60.0;
/// Obstacle approach speed before level and boost multipliers
pub const BASE_OBSTACLE_SPEED: f32 = 12.0;
pub const BOOST_MULTIPLIER: f32 = 2.0;

/// Cylinders in a cluster keep at least this far apart in x
const CLUSTER_MIN_SPACING: f32 = 2.5;
const CLUSTER_MAX_ATTEMPTS: u32 = 10;
const CLUSTER_SPREAD: f32 = 14.0;
const SINGLE_SPREAD: f32 = 12.0;
const CLUSTER_Z_JITTER: f32 = 2.0;

const SIMPLE_BAR_Y: f32 = 0.6;
const CYLINDER_Y: f32 = 2.0;
const ARCH_Y: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnMode {
    /// Single small obstacles
    Tutorial,
    /// Wide-gap walls or small cylinder clusters
    Normal,
    /// Narrow-gap walls or larger clusters
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Obstacle speed multiplier
    pub speed_multiplier: f32,
    /// Track scroll multiplier
    pub track_multiplier: f32,
    /// Seconds between main spawns
    pub spawn_interval: f32,
    pub mode: SpawnMode,
}

/// Tuning for `level`; everything past level 3 plays like level 3
pub fn level_config(level: u32) -> LevelConfig {
    match level {
        0 | 1 => LevelConfig {
            speed_multiplier: 1.15,
            track_multiplier: 1.0,
            spawn_interval: 2.0,
            mode: SpawnMode::Tutorial,
        },
        2 => LevelConfig {
            speed_multiplier: 1.25,
            track_multiplier: 1.25,
            spawn_interval: 1.8,
            mode: SpawnMode::Normal,
        },
        _ => LevelConfig {
            speed_multiplier: 1.67,
            track_multiplier: 1.67,
            spawn_interval: 1.6,
            mode: SpawnMode::Hard,
        },
    }
}

#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    config: LevelConfig,
    level: u32,
    /// Seconds until the next main spawn
    spawn_timer: f32,
    /// Seconds until the next gate tick
    gate_timer: f32,
    /// Main spawns this round, gates follow odd counts
    pub spawn_count: u32,
    next_id: u64,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        let mut spawner = Self {
            rng: Pcg32::seed_from_u64(seed),
            config: level_config(1),
            level: 1,
            spawn_timer: 0.0,
            gate_timer: 0.0,
            spawn_count: 0,
            next_id: 0,
        };
        spawner.restart_timers();
        spawner
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// Back to level 1 with fresh timers and counters, RNG stream continues
    pub fn reset(&mut self) {
        self.level = 1;
        self.config = level_config(1);
        self.spawn_count = 0;
        self.next_id = 0;
        self.restart_timers();
    }

    fn restart_timers(&mut self) {
        self.spawn_timer = self.config.spawn_interval;
        self.gate_timer = self.config.spawn_interval * 1.5;
    }

    /// Switch tuning when the level changes, restarting both timers
    pub fn set_level(&mut self, level: u32) {
        if level == self.level {
            return;
        }
        self.level = level;
        self.config = level_config(level);
        self.restart_timers();
        log::debug!(
            "Spawner at level {level}: {:?} every {}s",
            self.config.mode,
            self.config.spawn_interval
        );
    }

    /// Run the timers for `dt` seconds, pushing anything spawned onto `out`
    pub fn update(&mut self, dt: f32, out: &mut Vec<Obstacle>) {
        let interval = self.config.spawn_interval;

        self.spawn_timer -= dt;
        while self.spawn_timer <= 0.0 {
            self.spawn_timer += interval;
            self.spawn_count += 1;
            self.spawn_batch(out);
        }

        self.gate_timer -= dt;
        while self.gate_timer <= 0.0 {
            self.gate_timer += interval;
            if self.spawn_count % 2 == 1 {
                let x = self.spread(SINGLE_SPREAD);
                let id = self.take_id();
                out.push(Obstacle::new(
                    id,
                    ObstacleKind::Arch,
                    Vec3::new(x, ARCH_Y, SPAWN_Z),
                ));
            }
        }
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Uniform in (-width/2, width/2)
    fn spread(&mut self, width: f32) -> f32 {
        (self.rng.random::<f32>() - 0.5) * width
    }

    fn spawn_batch(&mut self, out: &mut Vec<Obstacle>) {
        match self.config.mode {
            SpawnMode::Tutorial => {
                let roll = self.rng.random::<f32>();
                let x = self.spread(SINGLE_SPREAD);
                let id = self.take_id();
                let obstacle = if roll < 0.5 {
                    Obstacle::new(id, ObstacleKind::SimpleBar, Vec3::new(x, SIMPLE_BAR_Y, SPAWN_Z))
                } else {
                    Obstacle::new(id, ObstacleKind::Cylinder, Vec3::new(x, CYLINDER_Y, SPAWN_Z))
                };
                out.push(obstacle);
            }
            SpawnMode::Normal => {
                if self.rng.random::<f32>() < 0.7 {
                    self.spawn_wall(ObstacleKind::EasyWall, out);
                } else {
                    let count = self.rng.random_range(2..=3);
                    self.spawn_cluster(count, out);
                }
            }
            SpawnMode::Hard => {
                if self.rng.random::<f32>() < 0.6 {
                    self.spawn_wall(ObstacleKind::LowBar, out);
                } else {
                    let count = self.rng.random_range(3..=5);
                    self.spawn_cluster(count, out);
                }
            }
        }
    }

    fn spawn_wall(&mut self, kind: ObstacleKind, out: &mut Vec<Obstacle>) {
        let gap = self.rng.random_range(0..8);
        let id = self.take_id();
        out.push(Obstacle::wall(id, kind, gap, SPAWN_Z));
    }

    /// Up to `count` cylinders, each placed by rejection sampling
    fn spawn_cluster(&mut self, count: u32, out: &mut Vec<Obstacle>) {
        let mut used: Vec<f32> = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let placed = (0..CLUSTER_MAX_ATTEMPTS)
                .map(|_| self.spread(CLUSTER_SPREAD))
                .find(|x| used.iter().all(|u| (u - x).abs() >= CLUSTER_MIN_SPACING));

            // A slot with no room after every attempt is skipped
            let Some(x) = placed else { continue };
            used.push(x);
            let z = SPAWN_Z + self.spread(CLUSTER_Z_JITTER * 2.0);
            let id = self.take_id();
            out.push(Obstacle::new(
                id,
                ObstacleKind::Cylinder,
                Vec3::new(x, CYLINDER_Y, z),
            ));
        }
    }
}
