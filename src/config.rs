//! Runtime configuration read from `QUIZGUESS_*` environment variables.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

const DATA_DIR_ENV: &str = "QUIZGUESS_DATA_DIR";
const SCORES_FILE_ENV: &str = "QUIZGUESS_SCORES_FILE";
const CATEGORIES_FILE_ENV: &str = "QUIZGUESS_CATEGORIES_FILE";
const LOG_FILE_ENV: &str = "QUIZGUESS_LOG_FILE";
const ADMIN_USER_ENV: &str = "QUIZGUESS_ADMIN_USER";
const ADMIN_PASSWORD_ENV: &str = "QUIZGUESS_ADMIN_PASSWORD";
const LEADERBOARD_SIZE_ENV: &str = "QUIZGUESS_LEADERBOARD_SIZE";

pub const DEFAULT_LEADERBOARD_SIZE: usize = 5;
// Plain-text defaults; override via the environment.
const DEFAULT_ADMIN_USER: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub scores_path: PathBuf,
    pub categories_path: PathBuf,
    pub log_path: PathBuf,
    pub admin: AdminCredentials,
    pub leaderboard_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let path_or = |var: &str, file: &str| {
            lookup(var)
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join(file))
        };

        let leaderboard_size = match lookup(LEADERBOARD_SIZE_ENV) {
            None => DEFAULT_LEADERBOARD_SIZE,
            Some(value) => match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        var: LEADERBOARD_SIZE_ENV,
                        value,
                    })
                }
            },
        };

        Ok(Self {
            scores_path: path_or(SCORES_FILE_ENV, "scores.json"),
            categories_path: path_or(CATEGORIES_FILE_ENV, "categories.json"),
            log_path: path_or(LOG_FILE_ENV, "quizguess.log"),
            admin: AdminCredentials {
                username: lookup(ADMIN_USER_ENV).unwrap_or_else(|| DEFAULT_ADMIN_USER.to_string()),
                password: lookup(ADMIN_PASSWORD_ENV)
                    .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()),
            },
            leaderboard_size,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            scores_path: data_dir.join("scores.json"),
            categories_path: data_dir.join("categories.json"),
            log_path: data_dir.join("quizguess.log"),
            admin: AdminCredentials {
                username: DEFAULT_ADMIN_USER.to_string(),
                password: DEFAULT_ADMIN_PASSWORD.to_string(),
            },
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
        }
    }
}

fn default_data_dir() -> PathBuf {
    // Store next to the executable
    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            return dir.to_path_buf();
        }
    }
    PathBuf::from(".")
}
