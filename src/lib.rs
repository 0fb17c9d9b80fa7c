//! Neon Arcade - game logic for the portfolio mini-games
//!
//! Core modules:
//! - `snake`: Grid snake with discrete, speed-up-on-food ticks
//! - `breakout`: Ball/paddle/brick physics with a single life
//! - `wordle`: Two-pass guess feedback and round state
//! - `kanban`: Board CRUD and drag/drop card moves
//! - `racer`: Neon Racer player physics, obstacles, spawner and progression
//! - `driver`: Fixed-timestep frame loop shared by the real-time games
//! - `timers`: Transient UI flags ("+10", banners, popups)
//! - `input`, `audio`, `settings`: Host boundary
//!
//! Every engine owns its state exclusively and is advanced by a pure step
//! function `(state, input, dt)`; nothing here renders or blocks.

pub mod audio;
pub mod breakout;
pub mod driver;
pub mod error;
pub mod input;
pub mod kanban;
pub mod racer;
pub mod settings;
pub mod snake;
pub mod timers;
pub mod wordle;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use driver::{FrameLoop, Simulation};
pub use error::{KanbanError, SettingsError, WordleError};
pub use settings::Settings;

/// Game loop configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one animation frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the driver will accept (tab was hidden, debugger, ...)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Exponential approach of `current` toward `target` at `rate` per second
#[inline]
pub fn approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * rate * dt
}
