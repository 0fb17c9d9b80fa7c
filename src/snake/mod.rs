//! Grid snake
//!
//! Discrete-tick movement on a `COLS × ROWS` grid. [`tick`] is frame driven:
//! it applies input, advances the clock and performs a [`step`] each time the
//! current interval elapses. [`step`] alone is the one-move transition.

pub mod state;
pub mod tick;

pub use state::{
    COLS, Cell, Direction, INITIAL_TICK_MS, MIN_TICK_MS, POINTS_PER_FOOD, ROWS,
    SCORE_PULSE_SECS, SPEED_UP_PER_FOOD_MS, SnakeFlag, SnakePhase, SnakeState,
};
pub use tick::{SnakeInput, step, tick};
