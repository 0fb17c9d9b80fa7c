//! Racer run state and progression

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleKind};
use super::player::Player;
use super::spawner::{BASE_OBSTACLE_SPEED, BOOST_MULTIPLIER, Spawner};
use crate::audio::MusicCue;
use crate::timers::TransientFlags;

pub const POINTS_PER_OBSTACLE: u32 = 10;
pub const POINTS_PER_GATE: u32 = 50;
/// Fraction of the track speed applied to the scrolling grid texture
pub const TRACK_SCROLL_FACTOR: f32 = 0.25;
/// Default music volume
pub const DEFAULT_VOLUME: f32 = 0.1;
/// Music volume multiplier once the ship is wrecked
pub const GAME_OVER_DUCK: f32 = 0.3;

pub const GATE_POPUP_SECS: f32 = 1.0;
pub const LEVEL_UP_SECS: f32 = 2.0;
pub const HINT_SECS: f32 = 3.0;

/// Gates to collect before leaving `level`
pub fn gates_needed(level: u32) -> u32 {
    match level {
        0 | 1 => 3,
        2 => 4,
        _ => 5,
    }
}

/// Hint shown the first time a run reaches `level`
pub fn hint_text(level: u32) -> Option<&'static str> {
    match level {
        2 => Some("Walls ahead: drive through low gaps, jump through high ones"),
        3 => Some("Hold W or Up to boost - double speed, same points"),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RacerPhase {
    /// Start screen; the ship can move but nothing spawns
    Idle,
    Running,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RacerFlag {
    GatePopup,
    LevelUp,
    Hint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RacerEvent {
    Started,
    GatePassed { collected: u32, needed: u32 },
    GateMissed,
    ObstaclePassed { kind: ObstacleKind, points: u32 },
    LevelUp { level: u32 },
    Hint { level: u32, text: String },
    Explosion { at: Vec3 },
    Restarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub level: u32,
    pub score: u32,
    /// Gates collected toward the next level
    pub gates_collected: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            level: 1,
            score: 0,
            gates_collected: 0,
        }
    }
}

impl Progress {
    pub fn gates_needed(&self) -> u32 {
        gates_needed(self.level)
    }
}

#[derive(Debug, Clone)]
pub struct RacerState {
    pub phase: RacerPhase,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub spawner: Spawner,
    pub progress: Progress,
    pub boosting: bool,
    /// Scroll position of the track grid
    pub track_offset: f32,
    /// Music volume slider, 0..=1
    pub volume: f32,
    /// Where the ship blew up
    pub explosion: Option<Vec3>,
    /// Latest "n/needed" popup text
    pub gate_popup: String,
    /// Latest hint text
    pub hint: String,
    /// Levels whose hint was already shown this run
    pub(crate) hints_shown: Vec<u32>,
    pub clock: f32,
    pub flags: TransientFlags<RacerFlag>,
    pub events: Vec<RacerEvent>,
}

impl RacerState {
    pub fn new(seed: u64) -> Self {
        Self {
            phase: RacerPhase::Idle,
            player: Player::default(),
            obstacles: Vec::new(),
            spawner: Spawner::new(seed),
            progress: Progress::default(),
            boosting: false,
            track_offset: 0.0,
            volume: DEFAULT_VOLUME,
            explosion: None,
            gate_popup: String::new(),
            hint: String::new(),
            hints_shown: Vec::new(),
            clock: 0.0,
            flags: TransientFlags::new(),
            events: Vec::new(),
        }
    }

    pub fn is_started(&self) -> bool {
        self.phase != RacerPhase::Idle
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RacerPhase::GameOver
    }

    pub fn start(&mut self) {
        if self.phase == RacerPhase::Idle {
            self.phase = RacerPhase::Running;
            self.events.push(RacerEvent::Started);
            log::info!("Racer started");
        }
    }

    /// Straight back into a running round at level 1; volume is kept
    pub fn restart(&mut self) {
        self.phase = RacerPhase::Running;
        self.player = Player::default();
        self.obstacles.clear();
        self.spawner.reset();
        self.progress = Progress::default();
        self.boosting = false;
        self.explosion = None;
        self.gate_popup.clear();
        self.hint.clear();
        self.hints_shown.clear();
        self.flags.clear();
        self.events.push(RacerEvent::Restarted);
        log::info!("Racer restarted");
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn boost_multiplier(&self) -> f32 {
        if self.boosting { BOOST_MULTIPLIER } else { 1.0 }
    }

    /// Obstacle approach speed this frame
    pub fn obstacle_speed(&self) -> f32 {
        BASE_OBSTACLE_SPEED * self.spawner.config().speed_multiplier * self.boost_multiplier()
    }

    /// Grid scroll speed this frame
    pub fn track_speed(&self) -> f32 {
        BASE_OBSTACLE_SPEED * self.spawner.config().track_multiplier * self.boost_multiplier()
    }

    pub fn show_level_up(&self) -> bool {
        self.flags.is_active(RacerFlag::LevelUp)
    }

    pub fn gate_popup(&self) -> Option<&str> {
        self.flags
            .is_active(RacerFlag::GatePopup)
            .then_some(self.gate_popup.as_str())
    }

    pub fn active_hint(&self) -> Option<&str> {
        self.flags
            .is_active(RacerFlag::Hint)
            .then_some(self.hint.as_str())
    }

    /// What the music should be doing right now
    pub fn music_cue(&self) -> MusicCue {
        MusicCue {
            playing: self.is_started(),
            volume: if self.is_game_over() {
                self.volume * GAME_OVER_DUCK
            } else {
                self.volume
            },
        }
    }

    pub fn drain_events(&mut self) -> Vec<RacerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Score a non-gate obstacle that made it behind the ship
    pub(crate) fn obstacle_passed(&mut self, kind: ObstacleKind) {
        let points = POINTS_PER_OBSTACLE * self.progress.level;
        self.progress.score += points;
        self.events.push(RacerEvent::ObstaclePassed { kind, points });
    }

    /// Count a gate, levelling up once enough have been collected
    pub(crate) fn collect_gate(&mut self) {
        let level = self.progress.level;
        let needed = gates_needed(level);
        let collected = self.progress.gates_collected + 1;

        self.progress.score += POINTS_PER_GATE * level;
        self.gate_popup = format!("{collected}/{needed}");
        self.flags
            .trigger(RacerFlag::GatePopup, self.clock, GATE_POPUP_SECS);
        self.events.push(RacerEvent::GatePassed { collected, needed });

        if collected < needed {
            self.progress.gates_collected = collected;
            return;
        }

        self.progress.gates_collected = 0;
        self.progress.level = level + 1;
        let new_level = self.progress.level;
        self.spawner.set_level(new_level);
        self.flags
            .trigger(RacerFlag::LevelUp, self.clock, LEVEL_UP_SECS);
        self.events.push(RacerEvent::LevelUp { level: new_level });
        log::info!(
            "Racer level {new_level} - score {}",
            self.progress.score
        );

        if let Some(text) = hint_text(new_level) {
            if !self.hints_shown.contains(&new_level) {
                self.hints_shown.push(new_level);
                self.hint = text.to_string();
                self.flags.trigger(RacerFlag::Hint, self.clock, HINT_SECS);
                self.events.push(RacerEvent::Hint {
                    level: new_level,
                    text: text.to_string(),
                });
            }
        }
    }

    /// First collision ends the run
    pub(crate) fn explode(&mut self) {
        if self.phase == RacerPhase::GameOver {
            return;
        }
        let at = self.player.pos;
        self.phase = RacerPhase::GameOver;
        self.explosion = Some(at);
        self.events.push(RacerEvent::Explosion { at });
        log::info!(
            "Racer wrecked at level {} - score {}",
            self.progress.level,
            self.progress.score
        );
    }
}
