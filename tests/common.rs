#![allow(dead_code)]

use quizguess::{Config, GameController, MemoryStorage, ScoreStore, Session, WordBank};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Handles onto the records a test controller writes to.
pub struct TestRecords {
    pub scores: MemoryStorage,
    pub categories: MemoryStorage,
}

/// Creates a controller over in-memory records and a seeded rng
pub fn create_test_controller() -> (GameController, TestRecords) {
    create_controller_with(MemoryStorage::new(), MemoryStorage::new())
}

/// Creates a controller over the given records
pub fn create_controller_with(
    scores: MemoryStorage,
    categories: MemoryStorage,
) -> (GameController, TestRecords) {
    let score_store = ScoreStore::load(Box::new(scores.clone())).unwrap();
    let word_bank = WordBank::open(Box::new(categories.clone())).unwrap();
    let controller = GameController::with_rng(
        score_store,
        word_bank,
        &Config::default(),
        StdRng::seed_from_u64(42),
    );
    (controller, TestRecords { scores, categories })
}

/// Logs a player in and pins the round to a known word
pub fn login_with_word(controller: &mut GameController, name: &str, word: &str) -> Session {
    let mut session = controller.login(name).unwrap();
    controller.start_round_with(&mut session, word, "test");
    session
}

/// Plays `word` to a win by guessing its distinct letters in order
pub fn win_round(controller: &mut GameController, session: &mut Session) {
    let word = session.round().secret_word();
    let mut seen = Vec::new();
    for c in word.chars() {
        if !seen.contains(&c) {
            seen.push(c);
            controller.submit_guess(session, &c.to_string()).unwrap();
        }
    }
}
