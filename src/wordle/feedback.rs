//! Guess scoring

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WordleError;

pub const WORD_LEN: usize = 5;

/// Per-letter verdict, ordered so the best status compares greatest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterStatus {
    Absent,
    Present,
    Correct,
}

pub type Feedback = [LetterStatus; WORD_LEN];

/// Five uppercase ASCII letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word([u8; WORD_LEN]);

impl Word {
    /// `letters` must already be uppercase ASCII
    pub(crate) const fn from_letters(letters: [u8; WORD_LEN]) -> Self {
        Word(letters)
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(|&b| b as char)
    }

    pub fn as_bytes(&self) -> &[u8; WORD_LEN] {
        &self.0
    }
}

impl FromStr for Word {
    type Err = WordleError;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let len = s.chars().count();
        if len != WORD_LEN {
            return Err(WordleError::WrongLength(len));
        }

        let mut letters = [0u8; WORD_LEN];
        for (slot, c) in letters.iter_mut().zip(s.chars()) {
            if !c.is_ascii_alphabetic() {
                return Err(WordleError::NotAlphabetic(c));
            }
            *slot = c.to_ascii_uppercase() as u8;
        }
        Ok(Word(letters))
    }
}

impl TryFrom<String> for Word {
    type Error = WordleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.to_string()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.letters() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[inline]
fn slot(letter: u8) -> usize {
    (letter - b'A') as usize
}

/// Score `guess` against `answer`
///
/// Exact matches are credited first; the remaining positions are `Present`
/// only while the answer still has unclaimed copies of that letter.
pub fn feedback(guess: &Word, answer: &Word) -> Feedback {
    let mut total = [0u8; 26];
    for &b in answer.as_bytes() {
        total[slot(b)] += 1;
    }

    let mut used = [0u8; 26];
    let mut statuses = [LetterStatus::Absent; WORD_LEN];

    for (i, (&g, &a)) in guess.as_bytes().iter().zip(answer.as_bytes()).enumerate() {
        if g == a {
            statuses[i] = LetterStatus::Correct;
            used[slot(g)] += 1;
        }
    }

    for (i, &g) in guess.as_bytes().iter().enumerate() {
        if statuses[i] == LetterStatus::Correct {
            continue;
        }
        let s = slot(g);
        if used[s] < total[s] {
            statuses[i] = LetterStatus::Present;
            used[s] += 1;
        }
    }

    statuses
}

/// Best status seen for each guessed letter across all guesses
pub fn keyboard_statuses<'a>(
    guesses: impl IntoIterator<Item = &'a Word>,
    answer: &Word,
) -> BTreeMap<char, LetterStatus> {
    let mut best = BTreeMap::new();
    for guess in guesses {
        for (letter, status) in guess.letters().zip(feedback(guess, answer)) {
            best.entry(letter)
                .and_modify(|existing: &mut LetterStatus| *existing = (*existing).max(status))
                .or_insert(status);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::LetterStatus::{Absent, Correct, Present};
    use super::*;

    fn word(s: &str) -> Word {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_word() {
        assert_eq!(word(" apple ").to_string(), "APPLE");
        assert_eq!("APPL".parse::<Word>(), Err(WordleError::WrongLength(4)));
        assert_eq!("APP1E".parse::<Word>(), Err(WordleError::NotAlphabetic('1')));
        assert_eq!("ÄPPLE".parse::<Word>(), Err(WordleError::NotAlphabetic('Ä')));
    }

    #[test]
    fn test_all_correct() {
        assert_eq!(feedback(&word("CRANE"), &word("CRANE")), [Correct; 5]);
    }

    #[test]
    fn test_repeated_guess_letter_credited_once_per_copy() {
        // HELLO has two Ls, both in place
        assert_eq!(
            feedback(&word("LLLLL"), &word("HELLO")),
            [Absent, Absent, Correct, Correct, Absent]
        );
        // The exact L and A use up the answer's only copies
        assert_eq!(
            feedback(&word("LLAMA"), &word("PLANT")),
            [Absent, Correct, Correct, Absent, Absent]
        );
        assert_eq!(
            feedback(&word("ALLOT"), &word("LEMON")),
            [Absent, Present, Absent, Correct, Absent]
        );
    }

    #[test]
    fn test_exact_match_claims_before_present() {
        // The E in position 4 is exact, so the earlier E gets nothing
        assert_eq!(
            feedback(&word("EERIE"), &word("APPLE")),
            [Absent, Absent, Absent, Absent, Correct]
        );
    }

    #[test]
    fn test_keyboard_keeps_best_status() {
        let answer = word("APPLE");
        let guesses = [word("PLANE"), word("APPLE")];
        let keys = keyboard_statuses(&guesses, &answer);
        assert_eq!(keys[&'P'], Correct);
        assert_eq!(keys[&'N'], Absent);
        assert_eq!(keys[&'A'], Correct);

        let keys = keyboard_statuses(&guesses[..1], &answer);
        assert_eq!(keys[&'P'], Present);
        assert_eq!(keys[&'E'], Correct);
        assert!(!keys.contains_key(&'Z'));
    }

    #[test]
    fn test_word_serde() {
        let json = serde_json::to_string(&word("ember")).unwrap();
        assert_eq!(json, "\"EMBER\"");
        assert!(serde_json::from_str::<Word>("\"EMBERS\"").is_err());
    }

    fn arb_word() -> impl Strategy<Value = Word> {
        // Small alphabet so repeats are common
        "[A-E]{5}".prop_map(|s| s.parse().unwrap())
    }

    proptest! {
        #[test]
        fn test_answer_scores_all_correct(letters in "[A-Za-z]{5}") {
            let w: Word = letters.parse().unwrap();
            prop_assert_eq!(feedback(&w, &w), [Correct; WORD_LEN]);
        }

        #[test]
        fn test_credit_never_exceeds_frequency(guess in arb_word(), answer in arb_word()) {
            let statuses = feedback(&guess, &answer);
            for letter in b'A'..=b'E' {
                let credited = guess
                    .as_bytes()
                    .iter()
                    .zip(statuses)
                    .filter(|(g, s)| **g == letter && *s != Absent)
                    .count();
                let available = answer.as_bytes().iter().filter(|&&a| a == letter).count();
                prop_assert!(credited <= available);
            }
            for i in 0..WORD_LEN {
                prop_assert_eq!(
                    statuses[i] == Correct,
                    guess.as_bytes()[i] == answer.as_bytes()[i]
                );
            }
        }
    }
}
