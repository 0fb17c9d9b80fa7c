//! Wordle
//!
//! Six tries to find a five letter answer. [`feedback`] scores a guess with
//! repeated letters never credited more often than the answer holds them.

pub mod feedback;
pub mod state;

pub use feedback::{Feedback, LetterStatus, WORD_LEN, Word, feedback, keyboard_statuses};
pub use state::{KEYBOARD_ROWS, MAX_GUESSES, WORD_LIST, WordlePhase, WordleState};
