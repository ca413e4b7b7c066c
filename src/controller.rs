use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{AdminCredentials, Config};
use crate::round::{GuessError, GuessOutcome, RoundState, RoundStatus};
use crate::scores::{PlayerRecord, ScoreStore, WIN_BONUS};
use crate::storage::StorageError;
use crate::words::{WordBank, WordBankError};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("Please enter a valid name.")]
    InvalidName,
    #[error("Invalid credentials!")]
    Unauthorized,
    #[error("No words available. Ask an admin to add some.")]
    NoWordsAvailable,
    #[error(transparent)]
    Guess(#[from] GuessError),
    #[error(transparent)]
    WordBank(#[from] WordBankError),
    #[error("could not save: {0}")]
    Storage(#[from] StorageError),
}

/// A logged-in player and their current round. Created by
/// [`GameController::login`], consumed by [`GameController::logout`].
#[derive(Debug)]
pub struct Session {
    player: String,
    round: RoundState,
}

impl Session {
    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }
}

/// Proof that admin credentials were accepted.
#[derive(Debug)]
pub struct AdminSession {
    username: String,
}

impl AdminSession {
    pub fn username(&self) -> &str {
        &self.username
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessReport {
    pub outcome: GuessOutcome,
    /// Points added to the player's score by this guess, bonus included.
    pub points: u32,
}

pub struct GameController {
    scores: ScoreStore,
    words: WordBank,
    admin: AdminCredentials,
    leaderboard_size: usize,
    rng: StdRng,
}

impl GameController {
    pub fn new(scores: ScoreStore, words: WordBank, config: &Config) -> Self {
        Self::with_rng(scores, words, config, StdRng::from_entropy())
    }

    pub fn with_rng(scores: ScoreStore, words: WordBank, config: &Config, rng: StdRng) -> Self {
        Self {
            scores,
            words,
            admin: config.admin.clone(),
            leaderboard_size: config.leaderboard_size,
            rng,
        }
    }

    pub fn login(&mut self, name: &str) -> Result<Session, GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::InvalidName);
        }
        // Save even for a known name: an earlier failed save may have left it unwritten.
        self.scores.get_or_create(name);
        self.scores.save()?;
        let round = self.start_round()?;
        info!(player = name, "player logged in");
        Ok(Session {
            player: name.to_string(),
            round,
        })
    }

    pub fn logout(&self, session: Session) {
        info!(player = %session.player, "player logged out");
    }

    /// Throw away the current round and start a fresh one.
    pub fn new_round(&mut self, session: &mut Session) -> Result<(), GameError> {
        session.round = self.start_round()?;
        Ok(())
    }

    fn start_round(&mut self) -> Result<RoundState, GameError> {
        let (word, category) = self
            .words
            .random_pick(&mut self.rng)
            .ok_or(GameError::NoWordsAvailable)?;
        debug!(category = %category, length = word.chars().count(), "starting round");
        Ok(RoundState::new(&word, &category))
    }

    /// Start a round on a known word, bypassing the word bank. Test support.
    #[doc(hidden)]
    pub fn start_round_with(&self, session: &mut Session, word: &str, category: &str) {
        session.round = RoundState::new(word, category);
    }

    pub fn submit_guess(
        &mut self,
        session: &mut Session,
        input: &str,
    ) -> Result<GuessReport, GameError> {
        let outcome = session.round.submit_guess(input)?;
        let player = session.player.as_str();

        let mut points = 0;
        if outcome.is_hit() {
            points += 1;
            self.scores.award_points(player, 1);
        }
        match outcome.finished {
            Some(RoundStatus::Won) => {
                points += WIN_BONUS;
                self.scores.record_win(player);
                info!(player, word = %session.round.secret_word(), "round won");
            }
            Some(RoundStatus::Lost) => {
                self.scores.record_loss(player);
                info!(player, word = %session.round.secret_word(), "round lost");
            }
            Some(RoundStatus::InProgress) | None => {}
        }

        if points > 0 || outcome.finished.is_some() {
            self.scores.save().map_err(|err| {
                warn!(player, error = %err, "failed to persist scores");
                err
            })?;
        }
        Ok(GuessReport { outcome, points })
    }

    pub fn player(&self, name: &str) -> Option<&PlayerRecord> {
        self.scores.get(name)
    }

    /// Top `n` players by score; equal scores keep first-login order.
    pub fn leaderboard(&self, n: usize) -> Vec<(&str, &PlayerRecord)> {
        let mut ranked: Vec<_> = self.scores.players().collect();
        ranked.sort_by(|a, b| b.1.score.cmp(&a.1.score));
        ranked.truncate(n);
        ranked
    }

    pub fn leaderboard_default(&self) -> Vec<(&str, &PlayerRecord)> {
        self.leaderboard(self.leaderboard_size)
    }

    pub fn admin_login(&self, username: &str, password: &str) -> Result<AdminSession, GameError> {
        if !self.admin.matches(username, password) {
            warn!(username, "rejected admin login");
            return Err(GameError::Unauthorized);
        }
        info!(username, "admin logged in");
        Ok(AdminSession {
            username: username.to_string(),
        })
    }

    pub fn admin_logout(&self, admin: AdminSession) {
        info!(username = %admin.username, "admin logged out");
    }

    pub fn add_word(
        &mut self,
        _admin: &AdminSession,
        category: &str,
        word: &str,
    ) -> Result<String, GameError> {
        Ok(self.words.add_word(category, word)?)
    }

    pub fn remove_word(
        &mut self,
        _admin: &AdminSession,
        category: &str,
        word: &str,
    ) -> Result<(), GameError> {
        Ok(self.words.remove_word(category, word)?)
    }

    pub fn word_bank(&self) -> &WordBank {
        &self.words
    }
}
