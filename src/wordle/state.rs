//! Wordle round state

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::feedback::{Feedback, LetterStatus, WORD_LEN, Word, feedback, keyboard_statuses};
use crate::error::WordleError;
use crate::input::Key;

pub const MAX_GUESSES: usize = 6;

/// Answers drawn at random each round
pub const WORD_LIST: [&str; 30] = [
    "APPLE", "BLACK", "CHIME", "DANCE", "EARTH", "FLAME", "GRAPE", "HEART", "IVORY", "JEWEL",
    "KNIFE", "LEMON", "MAGIC", "NORTH", "OCEAN", "PIANO", "QUICK", "RIVER", "STONE", "TRUCK",
    "ULTRA", "VIVID", "WATER", "YOUTH", "ZEBRA", "BEACH", "CLOUD", "DOUBT", "EMBER", "FOCUS",
];

/// On-screen keyboard layout
pub const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordlePhase {
    Playing,
    Won,
    Lost,
}

#[derive(Debug, Clone)]
pub struct WordleState {
    rng: Pcg32,
    answer: Word,
    /// Submitted guesses, oldest first
    pub guesses: Vec<Word>,
    /// Letters typed for the next guess (uppercase, at most five)
    pub current: String,
    pub phase: WordlePhase,
}

impl WordleState {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let answer = random_answer(&mut rng);
        Self::build(rng, answer)
    }

    /// Fixed answer, for puzzles and tests
    pub fn with_answer(answer: Word, seed: u64) -> Self {
        Self::build(Pcg32::seed_from_u64(seed), answer)
    }

    fn build(rng: Pcg32, answer: Word) -> Self {
        Self {
            rng,
            answer,
            guesses: Vec::with_capacity(MAX_GUESSES),
            current: String::with_capacity(WORD_LEN),
            phase: WordlePhase::Playing,
        }
    }

    /// Only meant to be revealed once the round is over
    pub fn answer(&self) -> &Word {
        &self.answer
    }

    pub fn is_finished(&self) -> bool {
        self.phase != WordlePhase::Playing
    }

    pub fn feedback_rows(&self) -> Vec<Feedback> {
        self.guesses
            .iter()
            .map(|guess| feedback(guess, &self.answer))
            .collect()
    }

    pub fn keyboard(&self) -> BTreeMap<char, LetterStatus> {
        keyboard_statuses(&self.guesses, &self.answer)
    }

    /// Append a letter to the current guess, ignored once five are typed
    pub fn type_letter(&mut self, c: char) -> Result<(), WordleError> {
        if self.is_finished() {
            return Err(WordleError::GameFinished);
        }
        if !c.is_ascii_alphabetic() {
            return Err(WordleError::NotAlphabetic(c));
        }
        if self.current.len() < WORD_LEN {
            self.current.push(c.to_ascii_uppercase());
        }
        Ok(())
    }

    pub fn backspace(&mut self) {
        if !self.is_finished() {
            self.current.pop();
        }
    }

    /// Submit the current guess
    ///
    /// Guesses are not checked against a dictionary. An incomplete guess is
    /// refused and left in place for the player to finish.
    pub fn submit(&mut self) -> Result<Feedback, WordleError> {
        if self.is_finished() {
            return Err(WordleError::GameFinished);
        }
        if self.current.len() != WORD_LEN {
            return Err(WordleError::IncompleteGuess);
        }

        let guess: Word = self.current.parse()?;
        self.current.clear();
        self.guesses.push(guess);
        let result = feedback(&guess, &self.answer);

        if guess == self.answer {
            self.phase = WordlePhase::Won;
            log::info!("Wordle solved in {} guesses", self.guesses.len());
        } else if self.guesses.len() >= MAX_GUESSES {
            self.phase = WordlePhase::Lost;
            log::info!("Wordle lost - answer was {}", self.answer);
        }
        Ok(result)
    }

    /// Route a key press, returning feedback when a guess was submitted
    pub fn handle_key(&mut self, key: Key) -> Option<Feedback> {
        let outcome = match key {
            Key::Letter(c) => self.type_letter(c).map(|_| None),
            Key::Backspace => {
                self.backspace();
                Ok(None)
            }
            Key::Enter => self.submit().map(Some),
            _ => Ok(None),
        };

        match outcome {
            Ok(result) => result,
            Err(err) => {
                log::debug!("Wordle ignored {key:?}: {err}");
                None
            }
        }
    }

    /// New answer from the round's RNG, all guesses cleared
    pub fn reset(&mut self) {
        self.answer = random_answer(&mut self.rng);
        self.guesses.clear();
        self.current.clear();
        self.phase = WordlePhase::Playing;
    }
}

fn random_answer(rng: &mut Pcg32) -> Word {
    let pick = WORD_LIST[rng.random_range(0..WORD_LIST.len())];
    // Every entry is five ASCII letters
    pick.parse().unwrap_or_else(|_| Word::from_letters(*b"APPLE"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordle::LetterStatus::{Absent, Correct, Present};

    fn game(answer: &str) -> WordleState {
        WordleState::with_answer(answer.parse().unwrap(), 1)
    }

    fn type_word(state: &mut WordleState, word: &str) {
        for c in word.chars() {
            state.handle_key(Key::Letter(c.to_ascii_uppercase()));
        }
    }

    #[test]
    fn test_word_list_parses() {
        for w in WORD_LIST {
            assert!(w.parse::<Word>().is_ok(), "{w}");
        }
    }

    #[test]
    fn test_typing_caps_at_five() {
        let mut state = game("APPLE");
        type_word(&mut state, "grapes");
        assert_eq!(state.current, "GRAPE");
        state.handle_key(Key::Backspace);
        assert_eq!(state.current, "GRAP");
        assert_eq!(state.type_letter('3'), Err(WordleError::NotAlphabetic('3')));
    }

    #[test]
    fn test_incomplete_guess_refused() {
        let mut state = game("APPLE");
        type_word(&mut state, "APP");
        assert_eq!(state.submit(), Err(WordleError::IncompleteGuess));
        assert_eq!(state.current, "APP");
        assert!(state.guesses.is_empty());
        assert_eq!(state.handle_key(Key::Enter), None);
    }

    #[test]
    fn test_win_is_terminal() {
        let mut state = game("APPLE");
        type_word(&mut state, "PLANE");
        let row = state.handle_key(Key::Enter).unwrap();
        assert_eq!(row, [Present, Present, Present, Absent, Correct]);

        type_word(&mut state, "APPLE");
        assert_eq!(state.handle_key(Key::Enter), Some([Correct; 5]));
        assert_eq!(state.phase, WordlePhase::Won);
        assert_eq!(state.guesses.len(), 2);

        type_word(&mut state, "HEART");
        assert!(state.current.is_empty());
        assert_eq!(state.submit(), Err(WordleError::GameFinished));
        assert_eq!(state.guesses.len(), 2);
    }

    #[test]
    fn test_six_misses_lose() {
        let mut state = game("ZEBRA");
        for _ in 0..MAX_GUESSES {
            type_word(&mut state, "OCEAN");
            assert!(state.submit().is_ok());
        }
        assert_eq!(state.phase, WordlePhase::Lost);
        assert_eq!(state.feedback_rows().len(), MAX_GUESSES);
    }

    #[test]
    fn test_reset_is_deterministic() {
        let mut a = WordleState::new(99);
        let mut b = WordleState::new(99);
        assert_eq!(a.answer(), b.answer());
        assert!(WORD_LIST.contains(&a.answer().to_string().as_str()));

        type_word(&mut a, "APPLE");
        a.submit().unwrap();
        a.reset();
        b.reset();
        assert_eq!(a.answer(), b.answer());
        assert!(a.guesses.is_empty());
        assert_eq!(a.phase, WordlePhase::Playing);
    }
}
