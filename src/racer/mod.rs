//! Neon Racer
//!
//! Endless 3D runner on a fixed track. The ship dodges, jumps and flies
//! through arch gates while obstacles stream toward it along +z. Collecting
//! enough gates raises the level, which speeds everything up and switches the
//! spawn policy.

pub mod obstacle;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use obstacle::{Contact, Obstacle, ObstacleKind, WallGap};
pub use player::{Player, PlayerSnapshot};
pub use spawner::{LevelConfig, SpawnMode, Spawner, level_config};
pub use state::{Progress, RacerEvent, RacerFlag, RacerPhase, RacerState, gates_needed};
pub use tick::{RacerInput, tick};
