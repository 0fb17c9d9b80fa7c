//! Kanban board
//!
//! Columns of cards with add, edit, remove and drag-to-move. Every operation
//! either succeeds completely or returns an error and leaves the board as it
//! was, so every card always belongs to exactly one existing column.

pub mod board;
pub mod drag;

pub use board::{Board, Card, Column, DEFAULT_COLUMN_TITLE};
pub use drag::DragSession;
