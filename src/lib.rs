pub mod config;
pub mod controller;
pub mod round;
pub mod scores;
pub mod storage;
pub mod words;

pub use config::{AdminCredentials, Config, ConfigError};
pub use controller::{AdminSession, GameController, GameError, GuessReport, Session};
pub use round::{Feedback, GuessError, GuessOutcome, RoundState, RoundStatus, MAX_LIVES};
pub use scores::{PlayerRecord, ScoreStore, WIN_BONUS};
pub use storage::{JsonFile, MemoryStorage, Storage, StorageError};
pub use words::{WordBank, WordBankError};
