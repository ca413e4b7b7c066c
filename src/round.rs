use thiserror::Error;

pub const MAX_LIVES: u8 = 6;
pub const PLACEHOLDER: char = '_';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("Please enter a letter!")]
    EmptyInput,
    #[error("Enter a single letter (A-Z).")]
    InvalidInput,
    #[error("You already guessed '{0}'!")]
    DuplicateGuess(char),
    #[error("This round is over. Start a new one.")]
    RoundFinished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    None,
    Correct,
    Wrong,
    Warning(GuessError),
}

impl Feedback {
    pub fn message(&self) -> String {
        match self {
            Feedback::None => String::new(),
            Feedback::Correct => "Correct guess!".to_string(),
            Feedback::Wrong => "Wrong guess!".to_string(),
            Feedback::Warning(err) => err.to_string(),
        }
    }
}

/// What a single accepted guess did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessOutcome {
    pub letter: char,
    /// Number of positions uncovered; zero on a miss.
    pub revealed: usize,
    /// Set only on the guess that ended the round.
    pub finished: Option<RoundStatus>,
}

impl GuessOutcome {
    pub fn is_hit(&self) -> bool {
        self.revealed > 0
    }
}

#[derive(Debug, Clone)]
pub struct RoundState {
    secret: Vec<char>,
    category: String,
    revealed: Vec<Option<char>>,
    lives: u8,
    guessed: Vec<char>,
    feedback: Feedback,
    status: RoundStatus,
}

impl RoundState {
    pub fn new(word: &str, category: &str) -> Self {
        let secret: Vec<char> = word.to_lowercase().chars().collect();
        Self {
            revealed: vec![None; secret.len()],
            secret,
            category: category.to_string(),
            lives: MAX_LIVES,
            guessed: Vec::new(),
            feedback: Feedback::None,
            status: RoundStatus::InProgress,
        }
    }

    /// Apply one guess. Rejected input only updates the feedback.
    pub fn submit_guess(&mut self, input: &str) -> Result<GuessOutcome, GuessError> {
        if self.is_finished() {
            return Err(GuessError::RoundFinished);
        }
        let letter = match parse_letter(input) {
            Ok(letter) if self.guessed.contains(&letter) => Err(GuessError::DuplicateGuess(letter)),
            other => other,
        }
        .map_err(|err| {
            self.feedback = Feedback::Warning(err.clone());
            err
        })?;

        self.guessed.push(letter);
        let mut revealed = 0;
        for (slot, &c) in self.revealed.iter_mut().zip(&self.secret) {
            if c == letter && slot.is_none() {
                *slot = Some(c);
                revealed += 1;
            }
        }

        if revealed > 0 {
            self.feedback = Feedback::Correct;
        } else {
            self.lives = self.lives.saturating_sub(1);
            self.feedback = Feedback::Wrong;
        }

        let finished = self.evaluate();
        Ok(GuessOutcome {
            letter,
            revealed,
            finished,
        })
    }

    fn evaluate(&mut self) -> Option<RoundStatus> {
        if self.revealed.iter().all(Option::is_some) {
            self.status = RoundStatus::Won;
        } else if self.lives == 0 {
            self.status = RoundStatus::Lost;
        } else {
            return None;
        }
        Some(self.status)
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status != RoundStatus::InProgress
    }

    pub fn secret_word(&self) -> String {
        self.secret.iter().collect()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn lives_remaining(&self) -> u8 {
        self.lives
    }

    pub fn guessed_letters(&self) -> &[char] {
        &self.guessed
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn pattern(&self) -> Vec<char> {
        self.revealed
            .iter()
            .map(|slot| slot.unwrap_or(PLACEHOLDER))
            .collect()
    }

    /// Pattern with spaces between letters, e.g. `c a _`.
    pub fn display(&self) -> String {
        self.pattern()
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn correct_guesses(&self) -> usize {
        self.guessed
            .iter()
            .filter(|c| self.secret.contains(c))
            .count()
    }

    pub fn wrong_guesses(&self) -> usize {
        self.guessed.len() - self.correct_guesses()
    }
}

fn parse_letter(input: &str) -> Result<char, GuessError> {
    let input = input.trim().to_lowercase();
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Err(GuessError::EmptyInput),
        (Some(c), None) if c.is_alphabetic() => Ok(c),
        _ => Err(GuessError::InvalidInput),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_round() {
        let round = RoundState::new("cat", "animals");
        assert_eq!(round.pattern(), vec!['_', '_', '_']);
        assert_eq!(round.display(), "_ _ _");
        assert_eq!(round.lives_remaining(), MAX_LIVES);
        assert!(round.guessed_letters().is_empty());
        assert_eq!(round.feedback().message(), "");
        assert_eq!(round.status(), RoundStatus::InProgress);
        assert_eq!(round.category(), "animals");
    }

    #[test]
    fn test_cat_scenario() {
        let mut round = RoundState::new("cat", "animals");

        let outcome = round.submit_guess("a").unwrap();
        assert!(outcome.is_hit());
        assert_eq!(round.pattern(), vec!['_', 'a', '_']);
        assert_eq!(outcome.finished, None);

        round.submit_guess("C").unwrap();
        assert_eq!(round.pattern(), vec!['c', 'a', '_']);

        let outcome = round.submit_guess("t").unwrap();
        assert_eq!(round.pattern(), vec!['c', 'a', 't']);
        assert_eq!(outcome.finished, Some(RoundStatus::Won));
        assert_eq!(round.status(), RoundStatus::Won);
        assert_eq!(round.lives_remaining(), MAX_LIVES);
        assert_eq!(round.correct_guesses(), 3);
    }

    #[test]
    fn test_dog_scenario_loses() {
        let mut round = RoundState::new("dog", "animals");
        for (i, letter) in ["x", "y", "z", "q", "w", "e"].iter().enumerate() {
            let outcome = round.submit_guess(letter).unwrap();
            assert!(!outcome.is_hit());
            assert_eq!(round.lives_remaining() as usize, 5 - i);
        }
        assert_eq!(round.status(), RoundStatus::Lost);
        assert_eq!(round.feedback(), &Feedback::Wrong);
        assert_eq!(round.submit_guess("d"), Err(GuessError::RoundFinished));
    }

    #[test]
    fn test_repeated_letter_reveals_every_position() {
        let mut round = RoundState::new("banana", "fruits");
        let outcome = round.submit_guess("a").unwrap();
        assert_eq!(outcome.revealed, 3);
        assert_eq!(round.display(), "_ a _ a _ a");
    }

    #[test]
    fn test_duplicate_guess_changes_nothing_but_feedback() {
        let mut round = RoundState::new("dog", "animals");
        round.submit_guess("x").unwrap();
        let lives = round.lives_remaining();
        let guessed = round.guessed_letters().to_vec();

        assert_eq!(round.submit_guess("X"), Err(GuessError::DuplicateGuess('x')));
        assert_eq!(round.lives_remaining(), lives);
        assert_eq!(round.guessed_letters(), guessed.as_slice());
        assert_eq!(
            round.feedback(),
            &Feedback::Warning(GuessError::DuplicateGuess('x'))
        );
    }

    #[test]
    fn test_invalid_input() {
        let mut round = RoundState::new("dog", "animals");
        assert_eq!(round.submit_guess(""), Err(GuessError::EmptyInput));
        assert_eq!(round.submit_guess("   "), Err(GuessError::EmptyInput));
        assert_eq!(round.submit_guess("7"), Err(GuessError::InvalidInput));
        assert_eq!(round.submit_guess("ab"), Err(GuessError::InvalidInput));
        assert_eq!(round.submit_guess("?"), Err(GuessError::InvalidInput));
        assert_eq!(round.lives_remaining(), MAX_LIVES);
        assert!(round.guessed_letters().is_empty());
        assert_eq!(round.feedback().message(), "Enter a single letter (A-Z).");
    }

    #[test]
    fn test_lives_plus_wrong_guesses_is_constant() {
        let mut round = RoundState::new("python", "languages");
        for letter in "qpzyxwvo".chars() {
            let _ = round.submit_guess(&letter.to_string());
            assert_eq!(
                round.lives_remaining() as usize + round.wrong_guesses(),
                MAX_LIVES as usize
            );
            if round.is_finished() {
                break;
            }
        }
    }

    #[test]
    fn test_round_ends_within_bounded_guesses() {
        let word = "pineapple";
        let mut round = RoundState::new(word, "fruits");
        let mut guesses = 0;
        for letter in ('a'..='z').rev() {
            if round.is_finished() {
                break;
            }
            round.submit_guess(&letter.to_string()).unwrap();
            guesses += 1;
        }
        assert!(round.is_finished());
        assert!(guesses <= MAX_LIVES as usize + word.len());
    }
}
