//! Snake state and grid types

use std::collections::VecDeque;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::input::Key;
use crate::timers::TransientFlags;

/// Grid width in cells
pub const COLS: i32 = 17;
/// Grid height in cells
pub const ROWS: i32 = 15;

/// Step interval at the start of a run
pub const INITIAL_TICK_MS: u32 = 220;
/// Fastest the snake will ever move
pub const MIN_TICK_MS: u32 = 65;
pub const SPEED_UP_PER_FOOD_MS: u32 = 12;
pub const POINTS_PER_FOOD: u32 = 10;
/// How long the "+10" pulse stays up
pub const SCORE_PULSE_SECS: f32 = 0.5;

/// Grid coordinate, 0-indexed, y grows downward
pub type Cell = IVec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowUp => Some(Direction::Up),
            Key::ArrowDown => Some(Direction::Down),
            Key::ArrowLeft => Some(Direction::Left),
            Key::ArrowRight => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakePhase {
    /// Waiting for the first arrow key
    Idle,
    Running,
    /// Terminal until restart
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeFlag {
    ScorePulse,
}

/// Complete snake game state
#[derive(Debug, Clone)]
pub struct SnakeState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: SnakePhase,
    /// Body cells, head first
    pub body: VecDeque<Cell>,
    pub food: Cell,
    /// Direction committed on the last step
    pub heading: Direction,
    /// Direction the next step will commit
    pub buffered: Direction,
    pub score: u32,
    /// Current step interval
    pub tick_ms: u32,
    /// Milliseconds accumulated toward the next step
    pub step_accumulator_ms: f32,
    /// Seconds since the state was created or reset
    pub clock: f32,
    pub flags: TransientFlags<SnakeFlag>,
}

impl SnakeState {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let body = VecDeque::from([Self::start_cell()]);
        let food = place_food(&mut rng, &body).unwrap_or(IVec2::ZERO);

        Self {
            seed,
            rng,
            phase: SnakePhase::Idle,
            body,
            food,
            heading: Direction::Right,
            buffered: Direction::Right,
            score: 0,
            tick_ms: INITIAL_TICK_MS,
            step_accumulator_ms: 0.0,
            clock: 0.0,
            flags: TransientFlags::new(),
        }
    }

    /// Centre of the grid
    pub fn start_cell() -> Cell {
        IVec2::new(COLS / 2, ROWS / 2)
    }

    /// Reinitialize everything except the RNG stream
    pub fn reset(&mut self) {
        let body = VecDeque::from([Self::start_cell()]);
        self.food = place_food(&mut self.rng, &body).unwrap_or(IVec2::ZERO);
        self.body = body;
        self.phase = SnakePhase::Idle;
        self.heading = Direction::Right;
        self.buffered = Direction::Right;
        self.score = 0;
        self.tick_ms = INITIAL_TICK_MS;
        self.step_accumulator_ms = 0.0;
        self.clock = 0.0;
        self.flags.clear();
        log::info!("Snake reset");
    }

    pub fn head(&self) -> Cell {
        self.body.front().copied().unwrap_or_else(Self::start_cell)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn show_score_pulse(&self) -> bool {
        self.flags.is_active(SnakeFlag::ScorePulse)
    }

    /// Apply a directional key press.
    ///
    /// The first press starts the run. A press that would reverse the
    /// committed heading is dropped; otherwise it replaces the buffered
    /// direction, so the latest legal press before a step wins.
    pub fn steer(&mut self, dir: Direction) {
        match self.phase {
            SnakePhase::GameOver => return,
            SnakePhase::Idle => {
                self.phase = SnakePhase::Running;
                log::info!("Snake started");
            }
            SnakePhase::Running => {}
        }

        if dir == self.heading.opposite() {
            log::debug!("Ignoring reversal {:?} while heading {:?}", dir, self.heading);
            return;
        }
        self.buffered = dir;
    }

    /// Relocate food to a free cell; `false` if the board is full
    pub(crate) fn respawn_food(&mut self) -> bool {
        match place_food(&mut self.rng, &self.body) {
            Some(cell) => {
                self.food = cell;
                true
            }
            None => false,
        }
    }
}

pub fn in_bounds(cell: Cell) -> bool {
    cell.x >= 0 && cell.x < COLS && cell.y >= 0 && cell.y < ROWS
}

/// Pick a uniformly random cell not covered by `body`
fn place_food(rng: &mut Pcg32, body: &VecDeque<Cell>) -> Option<Cell> {
    let free: Vec<Cell> = (0..ROWS)
        .flat_map(|y| (0..COLS).map(move |x| IVec2::new(x, y)))
        .filter(|cell| !body.contains(cell))
        .collect();

    if free.is_empty() {
        return None;
    }
    Some(free[rng.random_range(0..free.len())])
}
