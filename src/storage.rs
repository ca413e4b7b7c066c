use std::cell::{Cell, RefCell};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::rc::Rc;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("malformed record {path}: {reason}")]
    Malformed { path: String, reason: String },
}

impl StorageError {
    pub fn malformed(path: impl Into<String>, reason: impl ToString) -> Self {
        StorageError::Malformed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// A whole-record persistence backend. Records are read and rewritten in full.
pub trait Storage {
    /// Returns `None` when the record has never been written.
    fn read(&self) -> StorageResult<Option<String>>;
    fn write(&mut self, contents: &str) -> StorageResult<()>;
    /// Human-readable location, used in logs and error messages.
    fn describe(&self) -> String;
}

/// File-backed record. Writes go through a sibling temp file and a rename.
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.describe(),
            source,
        }
    }
}

impl Storage for JsonFile {
    fn read(&self) -> StorageResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.io_error(err)),
        }
    }

    fn write(&mut self, contents: &str) -> StorageResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, contents).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory record. Clones share the same cell, so a test can keep a handle
/// and inspect what the store wrote.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    record: Rc<RefCell<Option<String>>>,
    fail_reads: Rc<Cell<bool>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        let storage = Self::default();
        *storage.record.borrow_mut() = Some(contents.into());
        storage
    }

    pub fn contents(&self) -> Option<String> {
        self.record.borrow().clone()
    }

    /// Make subsequent reads fail, as an unreadable file would.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Make subsequent writes fail, to exercise save-failure paths.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    fn rejected(&self, what: &str) -> StorageError {
        StorageError::Io {
            path: self.describe(),
            source: io::Error::new(ErrorKind::Other, format!("{what} rejected")),
        }
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> StorageResult<Option<String>> {
        if self.fail_reads.get() {
            return Err(self.rejected("read"));
        }
        Ok(self.record.borrow().clone())
    }

    fn write(&mut self, contents: &str) -> StorageResult<()> {
        if self.fail_writes.get() {
            return Err(self.rejected("write"));
        }
        *self.record.borrow_mut() = Some(contents.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

/// Serialize as JSON indented with four spaces.
pub fn to_pretty_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
